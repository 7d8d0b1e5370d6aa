//! Hand-fitted artifacts over a ten-term vocabulary.
//!
//! Terms 0-4 lean REAL, terms 5-9 lean FAKE. [`REAL_TEXT`] hits terms 0-4 and
//! [`FAKE_TEXT`] hits terms 5, 6 and 9.
#![allow(dead_code)]

use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use truthlens_core::ModelRole;

pub const VOCABULARY: [&str; 10] = [
    "verifi",
    "sourc",
    "govern",
    "announc",
    "polici",
    "shock",
    "secret",
    "reveal",
    "conspiraci",
    "mind",
];

pub const N_FEATURES: usize = 10;

pub const REAL_TEXT: &str =
    "According to verified sources, the government announced new policies today.";

pub const FAKE_TEXT: &str = "SHOCKING! Scientists discover SECRET that will BLOW YOUR MIND!";

pub fn vectorizer_json() -> Value {
    let vocabulary: serde_json::Map<String, Value> = VOCABULARY
        .iter()
        .enumerate()
        .map(|(i, term)| (term.to_string(), json!(i)))
        .collect();
    json!({
        "vocabulary": vocabulary,
        "idf": vec![1.0; N_FEATURES],
        "norm": "l2",
    })
}

pub fn bernoulli_nb_json() -> Value {
    let row = |lean_real: bool| -> Vec<f64> {
        (0..N_FEATURES)
            .map(|j| {
                let real_term = j < 5;
                let p: f64 = if real_term == lean_real { 0.8 } else { 0.1 };
                p.ln()
            })
            .collect()
    };
    json!({
        "n_features": N_FEATURES,
        "classes": [0, 1],
        "class_log_prior": [0.5f64.ln(), 0.5f64.ln()],
        "feature_log_prob": [row(false), row(true)],
    })
}

/// Root splits on "verifi"; the left branch splits on "shock"
pub fn decision_tree_json() -> Value {
    json!({
        "n_features": N_FEATURES,
        "classes": [0, 1],
        "children_left": [1, 2, -1, -1, -1],
        "children_right": [4, 3, -1, -1, -1],
        "feature": [0, 5, -2, -2, -2],
        "threshold": [0.1, 0.1, -2.0, -2.0, -2.0],
        "value": [[13.0, 17.0], [12.0, 8.0], [3.0, 7.0], [9.0, 1.0], [1.0, 9.0]],
    })
}

/// One component `[1 x5, -1 x5] / sqrt(10)`, head weight 2
pub fn pca_based_json(n_features: usize) -> Value {
    let scale = (n_features as f64).sqrt();
    let component: Vec<f64> = (0..n_features)
        .map(|j| if j < n_features / 2 { 1.0 / scale } else { -1.0 / scale })
        .collect();
    json!({
        "n_features": n_features,
        "classes": [0, 1],
        "mean": vec![0.0; n_features],
        "components": [component],
        "coef": [2.0],
        "intercept": 0.0,
    })
}

pub fn random_forest_json() -> Value {
    let tree_a = decision_tree_json();
    json!({
        "n_features": N_FEATURES,
        "classes": [0, 1],
        "estimators": [
            {
                "children_left": tree_a["children_left"],
                "children_right": tree_a["children_right"],
                "feature": tree_a["feature"],
                "threshold": tree_a["threshold"],
                "value": tree_a["value"],
            },
            {
                "children_left": [1, -1, -1],
                "children_right": [2, -1, -1],
                "feature": [6, -2, -2],
                "threshold": [0.1, -2.0, -2.0],
                "value": [[10.0, 10.0], [2.0, 8.0], [8.0, 2.0]],
            }
        ],
    })
}

pub fn role_json(role: ModelRole) -> Value {
    match role {
        ModelRole::BernoulliNb => bernoulli_nb_json(),
        ModelRole::DecisionTree => decision_tree_json(),
        ModelRole::PcaBased => pca_based_json(N_FEATURES),
        ModelRole::RandomForest => random_forest_json(),
    }
}

pub fn write_json(dir: &Path, file: &str, value: &Value) {
    fs::write(dir.join(file), serde_json::to_vec_pretty(value).unwrap()).unwrap();
}

pub fn write_vectorizer(dir: &Path) {
    write_json(dir, "tfidf_vectorizer.json", &vectorizer_json());
}

pub fn write_role(dir: &Path, role: ModelRole) {
    write_json(dir, role.default_artifact(), &role_json(role));
}

/// Temp dir holding the vectorizer plus the given roles
pub fn model_dir_with(roles: &[ModelRole]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_vectorizer(dir.path());
    for role in roles {
        write_role(dir.path(), *role);
    }
    dir
}

/// Temp dir holding every artifact
pub fn full_model_dir() -> TempDir {
    model_dir_with(&ModelRole::ALL)
}
