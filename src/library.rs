//! Library of precompiled models.
//!
//! Every model the z-score and decision pipelines need ships inside the
//! binary as text (`include_str!`), so selecting a built-in model never
//! touches the file system. Only a custom decision model is read from disk.
//!
//! # Regression pairs
//!
//! The mean and standard deviation of the folding energy of shuffled
//! sequences are predicted by a pair of ε-SVR models. One generic pair is
//! independent of composition; ten more are trained on sequences of length
//! 50-200 within a GC-content bucket:
//!
//! | discriminant | variant | GC % |
//! |---|---|---|
//! | -1 | `Generic` | any |
//! | 0 | `Gc20To30` | 20-30 |
//! | 1 | `Gc30To36` | 30-36 |
//! | 2 | `Gc36To40` | 36-40 |
//! | 3 | `Gc40To46` | 40-46 |
//! | 4 | `Gc46To50` | 46-50 |
//! | 5 | `Gc50To56` | 50-56 |
//! | 6 | `Gc56To60` | 56-60 |
//! | 7 | `Gc60To66` | 60-66 |
//! | 8 | `Gc66To70` | 66-70 |
//! | 9 | `Gc70To80` | 70-80 |
//!
//! # Decision models
//!
//! Four classifiers, discriminants 1-4, see [`DecisionVariant`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Error;
use crate::io::{load_model_file, parse_model};
use crate::model::Model;
use crate::scale::{ScaleTable, ScalingScheme};

/// File name of a custom decision model inside its base directory.
pub const DECISION_MODEL_FILE: &str = "decision.model";

/// Error type for model selection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("unknown {kind} model discriminant: {value}")]
    UnknownDiscriminant { kind: &'static str, value: i32 },
}

// =============================================================================
// Regression variants
// =============================================================================

/// Which mean/stdev regression pair to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegressionVariant {
    /// Composition-independent default pair.
    Generic,
    Gc20To30,
    Gc30To36,
    Gc36To40,
    Gc40To46,
    Gc46To50,
    Gc50To56,
    Gc56To60,
    Gc60To66,
    Gc66To70,
    Gc70To80,
}

impl RegressionVariant {
    /// All variants in discriminant order (-1, 0..=9).
    pub const ALL: [RegressionVariant; 11] = [
        RegressionVariant::Generic,
        RegressionVariant::Gc20To30,
        RegressionVariant::Gc30To36,
        RegressionVariant::Gc36To40,
        RegressionVariant::Gc40To46,
        RegressionVariant::Gc46To50,
        RegressionVariant::Gc50To56,
        RegressionVariant::Gc56To60,
        RegressionVariant::Gc60To66,
        RegressionVariant::Gc66To70,
        RegressionVariant::Gc70To80,
    ];

    /// Integer code used by callers (-1 for generic, 0-9 for buckets).
    pub fn discriminant(self) -> i32 {
        self as i32 - 1
    }

    /// GC percentage range `[low, high)` of a bucket; `None` for the generic pair.
    pub fn gc_range(self) -> Option<(f64, f64)> {
        let range = match self {
            RegressionVariant::Generic => return None,
            RegressionVariant::Gc20To30 => (20.0, 30.0),
            RegressionVariant::Gc30To36 => (30.0, 36.0),
            RegressionVariant::Gc36To40 => (36.0, 40.0),
            RegressionVariant::Gc40To46 => (40.0, 46.0),
            RegressionVariant::Gc46To50 => (46.0, 50.0),
            RegressionVariant::Gc50To56 => (50.0, 56.0),
            RegressionVariant::Gc56To60 => (56.0, 60.0),
            RegressionVariant::Gc60To66 => (60.0, 66.0),
            RegressionVariant::Gc66To70 => (66.0, 70.0),
            RegressionVariant::Gc70To80 => (70.0, 80.0),
        };
        Some(range)
    }

    /// Bucket containing a GC percentage.
    ///
    /// Lower bounds are inclusive, upper bounds exclusive, except that 80%
    /// still belongs to the last bucket. Outside `[20, 80]` there is no bucket.
    pub fn for_gc_content(percent: f64) -> Option<Self> {
        if percent == 80.0 {
            return Some(RegressionVariant::Gc70To80);
        }
        Self::ALL.into_iter().find(|v| {
            v.gc_range()
                .is_some_and(|(low, high)| percent >= low && percent < high)
        })
    }

    fn blobs(self) -> (&'static str, &'static str) {
        match self {
            RegressionVariant::Generic => (
                include_str!("../models/regression/generic_mean.model"),
                include_str!("../models/regression/generic_stdev.model"),
            ),
            RegressionVariant::Gc20To30 => (
                include_str!("../models/regression/gc20_30_mean.model"),
                include_str!("../models/regression/gc20_30_stdev.model"),
            ),
            RegressionVariant::Gc30To36 => (
                include_str!("../models/regression/gc30_36_mean.model"),
                include_str!("../models/regression/gc30_36_stdev.model"),
            ),
            RegressionVariant::Gc36To40 => (
                include_str!("../models/regression/gc36_40_mean.model"),
                include_str!("../models/regression/gc36_40_stdev.model"),
            ),
            RegressionVariant::Gc40To46 => (
                include_str!("../models/regression/gc40_46_mean.model"),
                include_str!("../models/regression/gc40_46_stdev.model"),
            ),
            RegressionVariant::Gc46To50 => (
                include_str!("../models/regression/gc46_50_mean.model"),
                include_str!("../models/regression/gc46_50_stdev.model"),
            ),
            RegressionVariant::Gc50To56 => (
                include_str!("../models/regression/gc50_56_mean.model"),
                include_str!("../models/regression/gc50_56_stdev.model"),
            ),
            RegressionVariant::Gc56To60 => (
                include_str!("../models/regression/gc56_60_mean.model"),
                include_str!("../models/regression/gc56_60_stdev.model"),
            ),
            RegressionVariant::Gc60To66 => (
                include_str!("../models/regression/gc60_66_mean.model"),
                include_str!("../models/regression/gc60_66_stdev.model"),
            ),
            RegressionVariant::Gc66To70 => (
                include_str!("../models/regression/gc66_70_mean.model"),
                include_str!("../models/regression/gc66_70_stdev.model"),
            ),
            RegressionVariant::Gc70To80 => (
                include_str!("../models/regression/gc70_80_mean.model"),
                include_str!("../models/regression/gc70_80_stdev.model"),
            ),
        }
    }
}

impl TryFrom<i32> for RegressionVariant {
    type Error = SelectionError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        value
            .checked_add(1)
            .and_then(|i| usize::try_from(i).ok())
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(SelectionError::UnknownDiscriminant {
                kind: "regression",
                value,
            })
    }
}

/// Mean and stdev estimators for one regression variant.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionModels {
    pub variant: RegressionVariant,
    /// Predicts the standardized mean folding energy.
    pub mean: Model,
    /// Predicts the standardized standard deviation of the folding energy.
    pub stdev: Model,
}

impl RegressionModels {
    /// Parse the built-in pair for `variant`.
    pub fn builtin(variant: RegressionVariant) -> Result<Self, Error> {
        let (mean, stdev) = variant.blobs();
        debug!(?variant, "parsing built-in regression models");
        Ok(Self {
            variant,
            mean: parse_model(mean)?,
            stdev: parse_model(stdev)?,
        })
    }
}

/// Select the regression pair for an integer discriminant.
///
/// `-1` selects the generic pair, `0..=9` a GC bucket.
///
/// # Errors
///
/// [`SelectionError::UnknownDiscriminant`] for any other value.
pub fn regression_models(discriminant: i32) -> Result<RegressionModels, Error> {
    let variant = RegressionVariant::try_from(discriminant)?;
    RegressionModels::builtin(variant)
}

// =============================================================================
// Decision variants
// =============================================================================

/// Feature set of a decision model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionVariant {
    /// z-score, SCI, mean pairwise identity, number of sequences (1).
    #[default]
    Standard,
    /// Dinucleotide-shuffle z-score, SCI, Shannon entropy (2).
    Dinucleotide,
    /// Dinucleotide z-score with structural training data (3).
    DinucleotideStructural,
    /// Extended composition, conservation, energy and ensemble features (4).
    RnaFeatures,
}

impl DecisionVariant {
    pub const ALL: [DecisionVariant; 4] = [
        DecisionVariant::Standard,
        DecisionVariant::Dinucleotide,
        DecisionVariant::DinucleotideStructural,
        DecisionVariant::RnaFeatures,
    ];

    /// Integer code used by callers (1-4).
    pub fn discriminant(self) -> i32 {
        self as i32 + 1
    }

    /// Min-max table for this variant's inputs.
    pub fn scale_table(self) -> ScaleTable {
        ScalingScheme::Decision(self).table()
    }

    /// Number of input features.
    pub fn feature_count(self) -> usize {
        self.scale_table().len()
    }

    fn blob(self) -> &'static str {
        match self {
            DecisionVariant::Standard => include_str!("../models/decision/standard.model"),
            DecisionVariant::Dinucleotide => include_str!("../models/decision/dinucleotide.model"),
            DecisionVariant::DinucleotideStructural => {
                include_str!("../models/decision/dinucleotide_structural.model")
            }
            DecisionVariant::RnaFeatures => include_str!("../models/decision/rna_features.model"),
        }
    }
}

impl TryFrom<i32> for DecisionVariant {
    type Error = SelectionError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        value
            .checked_sub(1)
            .and_then(|i| usize::try_from(i).ok())
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(SelectionError::UnknownDiscriminant {
                kind: "decision",
                value,
            })
    }
}

/// Where a decision model comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionSource<'a> {
    /// `<dir>/decision.model` on disk.
    Custom(&'a Path),
    /// One of the embedded models.
    Builtin(DecisionVariant),
}

impl DecisionSource<'_> {
    pub fn load(self) -> Result<Model, Error> {
        match self {
            DecisionSource::Custom(dir) => {
                let path = dir.join(DECISION_MODEL_FILE);
                let model = load_model_file(&path)?;
                info!(path = %path.display(), "loaded custom decision model");
                Ok(model)
            }
            DecisionSource::Builtin(variant) => {
                debug!(?variant, "parsing built-in decision model");
                Ok(parse_model(variant.blob())?)
            }
        }
    }
}

/// Select a decision model.
///
/// With `base_path`, loads `<base_path>/decision.model` and ignores the
/// discriminant. Otherwise `discriminant` (1-4) picks a built-in model.
///
/// # Errors
///
/// [`Error::Io`] if the custom file cannot be read or parsed,
/// [`SelectionError::UnknownDiscriminant`] for an unknown built-in.
pub fn decision_model(base_path: Option<&Path>, discriminant: i32) -> Result<Model, Error> {
    let source = match base_path {
        Some(dir) => DecisionSource::Custom(dir),
        None => DecisionSource::Builtin(DecisionVariant::try_from(discriminant)?),
    };
    source.load()
}
