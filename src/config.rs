//! Scorer configuration.
//!
//! # Example
//!
//! ```
//! use zscore_svm::config::ScorerConfig;
//! use zscore_svm::library::DecisionVariant;
//!
//! let config = ScorerConfig::builder()
//!     .decision_variant(DecisionVariant::Dinucleotide)
//!     .max_length(200usize)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.min_length, 50);
//!
//! let config = ScorerConfig::from_json_str(r#"{"decision_variant": "rna_features"}"#).unwrap();
//! assert_eq!(config.decision_variant, DecisionVariant::RnaFeatures);
//! ```

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::library::{DecisionVariant, RegressionVariant};

/// Shortest sequence the regression models were trained for.
pub const DEFAULT_MIN_LENGTH: usize = 50;

/// Longest sequence the regression models give usable estimates for.
pub const DEFAULT_MAX_LENGTH: usize = 400;

/// Settings for [`crate::zscore::ZScorer`] and [`crate::zscore::DecisionScorer`].
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct ScorerConfig {
    /// Feature set of the decision model.
    #[builder(default)]
    pub decision_variant: DecisionVariant,

    /// Directory holding a custom `decision.model`. Built-in models are used
    /// when unset.
    #[builder(setter(into, strip_option), default)]
    pub model_dir: Option<PathBuf>,

    /// Always use this regression pair instead of choosing by GC content.
    #[builder(setter(into, strip_option), default)]
    pub regression_variant: Option<RegressionVariant>,

    /// Sequences shorter than this get a length warning.
    #[builder(default = "DEFAULT_MIN_LENGTH")]
    pub min_length: usize,

    /// Sequences longer than this get a length warning.
    #[builder(default = "DEFAULT_MAX_LENGTH")]
    pub max_length: usize,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            decision_variant: DecisionVariant::default(),
            model_dir: None,
            regression_variant: None,
            min_length: DEFAULT_MIN_LENGTH,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

impl ScorerConfig {
    pub fn builder() -> ScorerConfigBuilder {
        ScorerConfigBuilder::default()
    }

    /// Parse a JSON configuration. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Returns true if `length` lies within `[min_length, max_length]`.
    pub fn length_in_range(&self, length: usize) -> bool {
        (self.min_length..=self.max_length).contains(&length)
    }
}
