//! Ensemble vote and confidence

use truthlens_core::{EnsembleOutcome, Error, Label, ModelResult, Result};

/// Combine per-model results into one outcome.
///
/// The label is the mean vote (`< 0.5` is FAKE, so an even split is REAL).
/// Confidence is the mean of the finite reported probabilities, or
/// `|vote - 0.5| * 2` when no model reported one.
pub fn aggregate(results: &[ModelResult]) -> Result<EnsembleOutcome> {
    if results.is_empty() {
        return Err(Error::NoPredictions);
    }

    let votes: Vec<f64> = results
        .iter()
        .map(|r| f64::from(r.prediction.value()))
        .collect();
    let vote = sorted_mean(votes);

    let label = if vote < 0.5 { Label::Fake } else { Label::Real };

    let probabilities: Vec<f64> = results
        .iter()
        .filter_map(|r| r.probability)
        .filter(|p| p.is_finite())
        .collect();
    let confidence = if probabilities.is_empty() {
        (vote - 0.5).abs() * 2.0
    } else {
        sorted_mean(probabilities)
    };

    Ok(EnsembleOutcome {
        label,
        confidence: confidence.clamp(0.0, 1.0),
        models_used: results.len(),
    })
}

// sorting first makes the sum independent of input order
fn sorted_mean(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use truthlens_core::ModelRole;

    fn prob(role: ModelRole, label: Label, p: f64) -> ModelResult {
        ModelResult::with_probability(role, label, p)
    }

    #[test]
    fn test_single_confident_model() {
        let outcome = aggregate(&[prob(ModelRole::RandomForest, Label::Real, 0.9)]).unwrap();
        assert_eq!(outcome.label, Label::Real);
        assert!((outcome.confidence - 0.9).abs() < 1e-12);
        assert_eq!(outcome.models_used, 1);
    }

    #[test]
    fn test_even_split_resolves_to_real() {
        let outcome = aggregate(&[
            ModelResult::label_only(ModelRole::DecisionTree, Label::Fake),
            prob(ModelRole::RandomForest, Label::Real, 0.7),
        ])
        .unwrap();
        assert_eq!(outcome.label, Label::Real);
        assert!((outcome.confidence - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_label_only_confidence_from_vote_margin() {
        let outcome =
            aggregate(&[ModelResult::label_only(ModelRole::DecisionTree, Label::Fake)]).unwrap();
        assert_eq!(outcome.label, Label::Fake);
        assert_eq!(outcome.confidence, 1.0);

        let outcome = aggregate(&[
            ModelResult::label_only(ModelRole::DecisionTree, Label::Fake),
            ModelResult::label_only(ModelRole::BernoulliNb, Label::Real),
        ])
        .unwrap();
        assert_eq!(outcome.label, Label::Real);
        assert_eq!(outcome.confidence, 0.0);
    }

    #[test]
    fn test_majority_fake() {
        let outcome = aggregate(&[
            prob(ModelRole::BernoulliNb, Label::Fake, 0.1),
            ModelResult::label_only(ModelRole::DecisionTree, Label::Fake),
            prob(ModelRole::PcaBased, Label::Real, 0.6),
        ])
        .unwrap();
        assert_eq!(outcome.label, Label::Fake);
        assert!((outcome.confidence - 0.35).abs() < 1e-12);
    }

    #[test]
    fn test_empty_input_is_error() {
        assert!(matches!(aggregate(&[]), Err(Error::NoPredictions)));
    }

    #[test]
    fn test_out_of_range_probability_clamped() {
        let outcome = aggregate(&[prob(ModelRole::PcaBased, Label::Real, 1.0 + 1e-9)]).unwrap();
        assert_eq!(outcome.confidence, 1.0);
    }

    #[test]
    fn test_non_finite_probability_ignored() {
        let outcome = aggregate(&[
            prob(ModelRole::BernoulliNb, Label::Real, f64::NAN),
            prob(ModelRole::RandomForest, Label::Real, 0.8),
        ])
        .unwrap();
        assert_eq!(outcome.label, Label::Real);
        assert!((outcome.confidence - 0.8).abs() < 1e-12);

        let outcome = aggregate(&[prob(ModelRole::PcaBased, Label::Fake, f64::INFINITY)]).unwrap();
        assert_eq!(outcome.confidence, 1.0);
    }

    fn result_strategy() -> impl Strategy<Value = ModelResult> {
        (
            prop::sample::select(ModelRole::ALL.to_vec()),
            any::<bool>(),
            prop::option::of(0.0f64..=1.0),
        )
            .prop_map(|(role, real, probability)| ModelResult {
                role,
                prediction: if real { Label::Real } else { Label::Fake },
                probability,
            })
    }

    proptest! {
        #[test]
        fn prop_confidence_in_unit_interval(results in prop::collection::vec(result_strategy(), 1..=4)) {
            let outcome = aggregate(&results).unwrap();
            prop_assert!((0.0..=1.0).contains(&outcome.confidence));
            prop_assert_eq!(outcome.models_used, results.len());
        }

        #[test]
        fn prop_order_independent(
            (results, shuffled) in prop::collection::vec(result_strategy(), 1..=4)
                .prop_flat_map(|results| (Just(results.clone()), Just(results).prop_shuffle()))
        ) {
            let original = aggregate(&results).unwrap();
            let permuted = aggregate(&shuffled).unwrap();
            prop_assert_eq!(original.label, permuted.label);
            prop_assert_eq!(original.confidence.to_bits(), permuted.confidence.to_bits());
        }
    }
}
