//! Folding-energy z-scores and decision values.
//!
//! The z-score of a minimum free energy (MFE) compares it with the energy
//! distribution of shuffled sequences of the same composition. Instead of
//! shuffling, the mean and standard deviation of that distribution are
//! predicted by a pair of regression SVMs from four features: GC content,
//! A/(A+U), C/(C+G) and length.
//!
//! ```text
//! sequence ──► composition ──► standardize ──► engine(mean), engine(stdev)
//!                                                   │
//!                                 back-scale ◄──────┘
//!                                     │
//!                         z = (mfe - mean) / stdev
//! ```
//!
//! [`DecisionScorer`] runs the final classifier on features computed
//! upstream (z-scores, SCI, identity, ...).

use std::fmt;
use std::path::Path;

use tracing::{debug, warn};

use crate::config::ScorerConfig;
use crate::error::Error;
use crate::library::{DecisionSource, DecisionVariant, RegressionModels, RegressionVariant};
use crate::model::{Model, SparseFeatureVector};
use crate::predict::SvmEngine;
use crate::scale::{self, tables, ScalingScheme};

/// Error type for z-score and decision computation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ZScoreError {
    #[error("sequence contains no nucleotides")]
    EmptySequence,
    #[error("predicted standard deviation {stdev} is not positive ({variant:?} models)")]
    DegenerateStdev {
        stdev: f64,
        variant: RegressionVariant,
    },
    #[error("{variant:?} decision model expects {expected} features, got {actual}")]
    FeatureCount {
        variant: DecisionVariant,
        expected: usize,
        actual: usize,
    },
}

/// The input lies outside the range the regression models were trained on.
///
/// The z-score is still computed but is less reliable.
#[derive(Debug, Clone, PartialEq)]
pub enum ZScoreWarning {
    /// No GC bucket covers the sequence; the generic pair was used.
    GcOutOfRange { percent: f64 },
    LengthOutOfRange {
        length: usize,
        min: usize,
        max: usize,
    },
}

impl fmt::Display for ZScoreWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZScoreWarning::GcOutOfRange { percent } => write!(
                f,
                "GC content {percent:.1}% is outside the trained range, using generic models"
            ),
            ZScoreWarning::LengthOutOfRange { length, min, max } => write!(
                f,
                "sequence length {length} is outside the trained range {min}-{max}"
            ),
        }
    }
}

// =============================================================================
// Composition
// =============================================================================

/// Nucleotide counts of a sequence.
///
/// Counting is case insensitive and `T` counts as `U`. Gap characters
/// (`-`, `.`, `_`, `~`) are skipped; any other symbol (e.g. `N`) only
/// contributes to the length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceComposition {
    pub length: usize,
    pub a: usize,
    pub c: usize,
    pub g: usize,
    pub u: usize,
}

impl SequenceComposition {
    pub fn from_sequence(seq: &str) -> Result<Self, ZScoreError> {
        let mut comp = SequenceComposition {
            length: 0,
            a: 0,
            c: 0,
            g: 0,
            u: 0,
        };
        for b in seq.bytes() {
            match b.to_ascii_uppercase() {
                b'-' | b'.' | b'_' | b'~' => continue,
                b'A' => comp.a += 1,
                b'C' => comp.c += 1,
                b'G' => comp.g += 1,
                b'U' | b'T' => comp.u += 1,
                _ => {}
            }
            comp.length += 1;
        }
        if comp.length == 0 {
            return Err(ZScoreError::EmptySequence);
        }
        Ok(comp)
    }

    /// (G + C) / length
    pub fn gc_content(&self) -> f64 {
        (self.g + self.c) as f64 / self.length as f64
    }

    pub fn gc_percent(&self) -> f64 {
        100.0 * self.gc_content()
    }

    /// A / (A + U), 0.5 if neither occurs.
    pub fn a_content(&self) -> f64 {
        ratio(self.a, self.u)
    }

    /// C / (C + G), 0.5 if neither occurs.
    pub fn c_content(&self) -> f64 {
        ratio(self.c, self.g)
    }

    /// Unscaled regression inputs, in feature index order 1-4.
    pub fn regression_features(&self) -> [f64; 4] {
        [
            self.gc_content(),
            self.a_content(),
            self.c_content(),
            self.length as f64,
        ]
    }
}

fn ratio(x: usize, y: usize) -> f64 {
    if x + y == 0 {
        0.5
    } else {
        x as f64 / (x + y) as f64
    }
}

// =============================================================================
// Z-scores
// =============================================================================

/// Result of [`ZScorer::zscore`].
#[derive(Debug, Clone, PartialEq)]
pub struct ZScore {
    /// `(mfe - mean) / stdev`
    pub value: f64,
    /// Predicted mean MFE of shuffled sequences, kcal/mol.
    pub mean: f64,
    /// Predicted standard deviation, kcal/mol.
    pub stdev: f64,
    pub variant: RegressionVariant,
    pub warnings: Vec<ZScoreWarning>,
}

/// Computes MFE z-scores with the built-in regression models.
///
/// All eleven regression pairs are parsed once on construction.
#[derive(Debug)]
pub struct ZScorer<E> {
    engine: E,
    /// Indexed by `RegressionVariant as usize`.
    models: Vec<RegressionModels>,
    config: ScorerConfig,
}

impl<E: SvmEngine> ZScorer<E> {
    pub fn new(engine: E) -> Result<Self, Error> {
        Self::with_config(engine, &ScorerConfig::default())
    }

    /// Use length limits and an optional fixed regression variant from `config`.
    pub fn with_config(engine: E, config: &ScorerConfig) -> Result<Self, Error> {
        let models = RegressionVariant::ALL
            .into_iter()
            .map(RegressionModels::builtin)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(pairs = models.len(), "regression models ready");
        Ok(Self {
            engine,
            models,
            config: config.clone(),
        })
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn models(&self, variant: RegressionVariant) -> &RegressionModels {
        &self.models[variant as usize]
    }

    /// Z-score of `mfe` for `seq`, choosing the regression pair by GC content.
    ///
    /// Sequences outside 20-80% GC fall back to the generic pair.
    pub fn zscore(&self, seq: &str, mfe: f64) -> Result<ZScore, Error> {
        let comp = SequenceComposition::from_sequence(seq)?;
        let mut warnings = Vec::new();

        let variant = match self.config.regression_variant {
            Some(variant) => variant,
            None => {
                let percent = comp.gc_percent();
                RegressionVariant::for_gc_content(percent).unwrap_or_else(|| {
                    warn!(percent, "GC content out of range, using generic models");
                    warnings.push(ZScoreWarning::GcOutOfRange { percent });
                    RegressionVariant::Generic
                })
            }
        };

        self.score(&comp, mfe, variant, warnings)
    }

    /// Z-score of `mfe` for `seq` with a fixed regression pair.
    pub fn zscore_with_variant(
        &self,
        seq: &str,
        mfe: f64,
        variant: RegressionVariant,
    ) -> Result<ZScore, Error> {
        let comp = SequenceComposition::from_sequence(seq)?;
        self.score(&comp, mfe, variant, Vec::new())
    }

    fn score(
        &self,
        comp: &SequenceComposition,
        mfe: f64,
        variant: RegressionVariant,
        mut warnings: Vec<ZScoreWarning>,
    ) -> Result<ZScore, Error> {
        if !self.config.length_in_range(comp.length) {
            warn!(
                length = comp.length,
                min = self.config.min_length,
                max = self.config.max_length,
                "sequence length out of range"
            );
            warnings.push(ZScoreWarning::LengthOutOfRange {
                length: comp.length,
                min: self.config.min_length,
                max: self.config.max_length,
            });
        }

        let mut x = SparseFeatureVector::from_dense(&comp.regression_features());
        scale::scale(&mut x, ScalingScheme::Regression.table())?;

        let pair = self.models(variant);
        let (mean, stdev) = scale::backscale_regression(
            self.engine.predict(&pair.mean, &x),
            self.engine.predict(&pair.stdev, &x),
            &tables::MEAN_TARGET,
            &tables::STDEV_TARGET,
        );

        // Also rejects NaN.
        if !(stdev > 0.0) {
            return Err(ZScoreError::DegenerateStdev { stdev, variant }.into());
        }

        let value = (mfe - mean) / stdev;
        debug!(?variant, mfe, mean, stdev, value, "z-score");
        Ok(ZScore {
            value,
            mean,
            stdev,
            variant,
            warnings,
        })
    }
}

// =============================================================================
// Decision values
// =============================================================================

/// A decision model together with the feature set it expects.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionScorer {
    model: Model,
    variant: DecisionVariant,
}

impl DecisionScorer {
    /// Load `<base_path>/decision.model` if given, else the built-in model
    /// for `variant`.
    ///
    /// A custom model is still scaled with `variant`'s table.
    pub fn new(base_path: Option<&Path>, variant: DecisionVariant) -> Result<Self, Error> {
        let source = match base_path {
            Some(dir) => DecisionSource::Custom(dir),
            None => DecisionSource::Builtin(variant),
        };
        Ok(Self {
            model: source.load()?,
            variant,
        })
    }

    pub fn from_config(config: &ScorerConfig) -> Result<Self, Error> {
        Self::new(config.model_dir.as_deref(), config.decision_variant)
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn variant(&self) -> DecisionVariant {
        self.variant
    }

    /// Min-max scale `raw_features` and predict.
    ///
    /// # Errors
    ///
    /// [`ZScoreError::FeatureCount`] unless exactly
    /// `variant.feature_count()` features are given.
    pub fn decision_value<E: SvmEngine>(
        &self,
        engine: &E,
        raw_features: &[f64],
    ) -> Result<f64, Error> {
        let expected = self.variant.feature_count();
        if raw_features.len() != expected {
            return Err(ZScoreError::FeatureCount {
                variant: self.variant,
                expected,
                actual: raw_features.len(),
            }
            .into());
        }

        let mut x = SparseFeatureVector::from_dense(raw_features);
        scale::scale(&mut x, self.variant.scale_table())?;
        Ok(engine.predict(&self.model, &x))
    }
}
