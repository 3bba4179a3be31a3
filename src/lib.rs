//! zscore-svm: SVM models for RNA folding-energy z-scores.
//!
//! Parses and writes the libsvm text model format, scales features the way
//! the embedded models were trained, and selects among the precompiled
//! regression and decision models. Kernel evaluation is left to an external
//! engine behind the [`SvmEngine`] trait.
//!
//! # Key Types
//!
//! - [`Model`] / [`ModelParts`] - Immutable, validated libsvm model
//! - [`SparseFeatureVector`] - Sentinel-terminated sparse input
//! - [`RegressionVariant`] / [`DecisionVariant`] - Built-in model selection
//! - [`ZScorer`] / [`DecisionScorer`] - End-to-end pipelines
//! - [`ScorerConfig`] - Configuration builder
//!
//! # Parsing and writing
//!
//! ```
//! use zscore_svm::{parse_model, serialize_model};
//!
//! let text = "svm_type epsilon_svr\nkernel_type linear\nnr_class 2\ntotal_sv 1\nrho 0.5\nSV\n0.25 1:0.5 2:-1\n";
//! let model = parse_model(text).unwrap();
//! assert_eq!(model.support_vector_count(), 1);
//! assert_eq!(serialize_model(&model), text);
//! ```
//!
//! # Z-scores
//!
//! ```no_run
//! use zscore_svm::{Model, SparseFeatureVector, ZScorer};
//!
//! # fn kernel_sum(_: &Model, _: &SparseFeatureVector) -> f64 { 0.0 }
//! let scorer = ZScorer::new(kernel_sum).unwrap();
//! let z = scorer.zscore("GGGAAACCCUUUGGGAAACCC", -5.4).unwrap();
//! println!("z = {:.2} ({:?})", z.value, z.variant);
//! ```

pub mod config;
pub mod error;
pub mod io;
pub mod library;
pub mod model;
pub mod predict;
pub mod scale;
pub mod testing;
pub mod zscore;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use config::ScorerConfig;
pub use error::{Error, Result};
pub use io::{
    load_model_file, parse_model, serialize_model, write_model, ModelIoError, ParseError,
};
pub use library::{
    decision_model, regression_models, DecisionVariant, RegressionModels, RegressionVariant,
    SelectionError,
};
pub use model::{Kernel, KernelType, Model, ModelParts, SparseFeatureVector, SvmType};
pub use predict::SvmEngine;
pub use scale::{backscale_regression, ScaleError, ScalingScheme};
pub use zscore::{DecisionScorer, ZScore, ZScoreError, ZScoreWarning, ZScorer};
