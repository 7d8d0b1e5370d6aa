//! Mapping from (label, confidence) onto the six-level LIAR scale

use truthlens_core::{EnsembleOutcome, Label, LiarScale, OrdinalScore};

/// Scale level for a label at a given confidence.
///
/// Confidence splits at 0.6 and 0.8; both boundaries belong to the
/// less confident bucket.
pub fn scale_for(label: Label, confidence: f64) -> LiarScale {
    match label {
        Label::Fake if confidence > 0.8 => LiarScale::PantsFire,
        Label::Fake if confidence > 0.6 => LiarScale::False,
        Label::Fake => LiarScale::BarelyTrue,
        Label::Real if confidence > 0.8 => LiarScale::True,
        Label::Real if confidence > 0.6 => LiarScale::MostlyTrue,
        Label::Real => LiarScale::HalfTrue,
    }
}

pub fn to_ordinal(outcome: &EnsembleOutcome) -> OrdinalScore {
    OrdinalScore {
        scale: scale_for(outcome.label, outcome.confidence),
        confidence: outcome.confidence,
    }
}

/// String-label entry point. Anything other than `"FAKE"` takes the REAL path.
pub fn convert_to_liar_scale(label: &str, confidence: f64) -> u8 {
    let label = if label == Label::Fake.as_str() {
        Label::Fake
    } else {
        Label::Real
    };
    scale_for(label, confidence).ordinal()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(convert_to_liar_scale("FAKE", 0.85), 0);
        assert_eq!(convert_to_liar_scale("FAKE", 0.8), 1);
        assert_eq!(convert_to_liar_scale("FAKE", 0.61), 1);
        assert_eq!(convert_to_liar_scale("FAKE", 0.6), 2);
        assert_eq!(convert_to_liar_scale("REAL", 0.55), 3);
        assert_eq!(convert_to_liar_scale("REAL", 0.6), 3);
        assert_eq!(convert_to_liar_scale("REAL", 0.7), 4);
        assert_eq!(convert_to_liar_scale("REAL", 0.8), 4);
        assert_eq!(convert_to_liar_scale("REAL", 0.9), 5);
    }

    #[test]
    fn test_unknown_label_follows_real_branch() {
        assert_eq!(convert_to_liar_scale("fake", 0.9), 5);
        assert_eq!(convert_to_liar_scale("", 0.1), 3);
    }

    #[test]
    fn test_to_ordinal_keeps_confidence() {
        let score = to_ordinal(&EnsembleOutcome {
            label: Label::Real,
            confidence: 0.7,
            models_used: 2,
        });
        assert_eq!(score.scale, LiarScale::MostlyTrue);
        assert_eq!(score.verdict().0, 4);
        assert_eq!(score.confidence, 0.7);
    }

    fn expected_bucket(confidence: f64) -> usize {
        if confidence > 0.8 {
            2
        } else if confidence > 0.6 {
            1
        } else {
            0
        }
    }

    proptest! {
        #[test]
        fn prop_fake_buckets_partition_unit_interval(c in 0.0f64..=1.0) {
            let ordinal = scale_for(Label::Fake, c).ordinal();
            prop_assert!(ordinal <= 2);
            prop_assert_eq!(2 - ordinal as usize, expected_bucket(c));
        }

        #[test]
        fn prop_real_buckets_partition_unit_interval(c in 0.0f64..=1.0) {
            let ordinal = scale_for(Label::Real, c).ordinal();
            prop_assert!((3..=5).contains(&ordinal));
            prop_assert_eq!(ordinal as usize - 3, expected_bucket(c));
        }

        #[test]
        fn prop_real_never_below_fake(c in 0.0f64..=1.0) {
            prop_assert!(scale_for(Label::Real, c) > scale_for(Label::Fake, c));
        }
    }
}
