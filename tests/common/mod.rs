//! Shared helpers for integration tests.
//!
//! For assertion helpers, use `zscore_svm::testing`.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use zscore_svm::{Model, SparseFeatureVector};

#[allow(unused_imports)]
pub use zscore_svm::assert_approx_eq_f64;
#[allow(unused_imports)]
pub use zscore_svm::testing::{
    assert_models_equivalent, assert_slices_relative_eq, DEFAULT_TOLERANCE_F64,
    FEATURE_TOLERANCE,
};

/// Directory of the embedded model blobs.
pub fn models_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("models")
}

/// Every `.model` file under `models/`, sorted.
pub fn blob_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for group in ["regression", "decision"] {
        let dir = models_dir().join(group);
        let entries = fs::read_dir(&dir)
            .unwrap_or_else(|e| panic!("cannot list {}: {e}", dir.display()));
        for entry in entries {
            let path = entry.expect("dir entry").path();
            if path.extension().is_some_and(|ext| ext == "model") {
                paths.push(path);
            }
        }
    }
    paths.sort();
    paths
}

pub fn read_text(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
}

/// Engine returning the sum of the scaled inputs.
pub fn sum_engine(_: &Model, x: &SparseFeatureVector) -> f64 {
    x.iter().map(|(_, v)| v).sum()
}

/// Two-class regression model in the text format.
pub const SCENARIO: &str = "svm_type epsilon_svr
kernel_type linear
nr_class 2
total_sv 2
rho 0.5
SV
1 1:0.2 2:0.8
-1 1:0.4 2:0.6
";
