//! Feature scaling for SVM inputs and back-scaling of regression outputs.
//!
//! The models were trained on normalized data, so raw features must go
//! through the same transform before prediction:
//!
//! - regression inputs are standardized: `(x - location) / scale`
//! - decision inputs are min-max scaled to `[-1, 1]`
//!
//! Regression outputs come back in standardized units and are mapped to
//! kcal/mol with [`backscale_regression`]. Decision values are never
//! back-scaled.
//!
//! Tables are indexed by `feature index - 1`. A vector that references an
//! index the table does not cover is rejected before any value is touched.

pub mod tables;

use crate::library::DecisionVariant;
use crate::model::SparseFeatureVector;

/// Error type for feature scaling.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScaleError {
    #[error("feature index {index} is outside the scale table (1..={table_len})")]
    DimensionMismatch { index: i32, table_len: usize },
}

// =============================================================================
// Table entries
// =============================================================================

/// Location/scale pair for standardization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Standardization {
    pub location: f64,
    pub scale: f64,
}

impl Standardization {
    pub const fn new(location: f64, scale: f64) -> Self {
        Self { location, scale }
    }

    /// `(x - location) / scale`
    #[inline]
    pub fn apply(&self, x: f64) -> f64 {
        (x - self.location) / self.scale
    }

    /// `x * scale + location`
    #[inline]
    pub fn invert(&self, x: f64) -> f64 {
        x * self.scale + self.location
    }
}

/// Observed range for min-max scaling to `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMax {
    pub min: f64,
    pub max: f64,
}

impl MinMax {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `-1 + 2 (x - min) / (max - min)`
    #[inline]
    pub fn apply(&self, x: f64) -> f64 {
        -1.0 + 2.0 * (x - self.min) / (self.max - self.min)
    }

    #[inline]
    pub fn invert(&self, y: f64) -> f64 {
        self.min + (y + 1.0) * (self.max - self.min) / 2.0
    }
}

// =============================================================================
// Tables and schemes
// =============================================================================

/// One of the fixed scaling tables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleTable {
    Standard(&'static [Standardization]),
    MinMax(&'static [MinMax]),
}

impl ScaleTable {
    /// Number of features covered.
    pub fn len(&self) -> usize {
        match self {
            ScaleTable::Standard(t) => t.len(),
            ScaleTable::MinMax(t) => t.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Which table a feature vector is scaled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalingScheme {
    /// Inputs of the mean/stdev regression models.
    Regression,
    /// Inputs of a decision model.
    Decision(DecisionVariant),
}

impl ScalingScheme {
    /// All five schemes.
    pub const ALL: [ScalingScheme; 5] = [
        ScalingScheme::Regression,
        ScalingScheme::Decision(DecisionVariant::Standard),
        ScalingScheme::Decision(DecisionVariant::Dinucleotide),
        ScalingScheme::Decision(DecisionVariant::DinucleotideStructural),
        ScalingScheme::Decision(DecisionVariant::RnaFeatures),
    ];

    pub fn table(self) -> ScaleTable {
        match self {
            ScalingScheme::Regression => ScaleTable::Standard(&tables::REGRESSION),
            ScalingScheme::Decision(variant) => ScaleTable::MinMax(match variant {
                DecisionVariant::Standard => &tables::DECISION_STANDARD[..],
                DecisionVariant::Dinucleotide => &tables::DECISION_DINUCLEOTIDE[..],
                DecisionVariant::DinucleotideStructural => {
                    &tables::DECISION_DINUCLEOTIDE_STRUCTURAL[..]
                }
                DecisionVariant::RnaFeatures => &tables::DECISION_RNA_FEATURES[..],
            }),
        }
    }
}

// =============================================================================
// Scaling
// =============================================================================

/// Standardize every feature of `vector` in place.
///
/// # Errors
///
/// [`ScaleError::DimensionMismatch`] if an index is not covered by `table`;
/// the vector is left unchanged.
pub fn scale_standard(
    vector: &mut SparseFeatureVector,
    table: &[Standardization],
) -> Result<(), ScaleError> {
    check_indices(vector, table.len())?;
    for (index, value) in vector.iter_mut() {
        *value = table[slot(index)].apply(*value);
    }
    Ok(())
}

/// Min-max scale every feature of `vector` in place.
///
/// # Errors
///
/// [`ScaleError::DimensionMismatch`] if an index is not covered by `table`;
/// the vector is left unchanged.
pub fn scale_min_max(vector: &mut SparseFeatureVector, table: &[MinMax]) -> Result<(), ScaleError> {
    check_indices(vector, table.len())?;
    for (index, value) in vector.iter_mut() {
        *value = table[slot(index)].apply(*value);
    }
    Ok(())
}

/// Scale `vector` with whichever transform `table` holds.
pub fn scale(vector: &mut SparseFeatureVector, table: ScaleTable) -> Result<(), ScaleError> {
    match table {
        ScaleTable::Standard(t) => scale_standard(vector, t),
        ScaleTable::MinMax(t) => scale_min_max(vector, t),
    }
}

/// Map standardized regression outputs back to energy units.
///
/// Returns `(mean, stdev)`.
pub fn backscale_regression(
    mean: f64,
    stdev: f64,
    mean_stats: &Standardization,
    stdev_stats: &Standardization,
) -> (f64, f64) {
    (mean_stats.invert(mean), stdev_stats.invert(stdev))
}

#[inline]
fn slot(index: i32) -> usize {
    (index - 1) as usize
}

fn check_indices(vector: &SparseFeatureVector, table_len: usize) -> Result<(), ScaleError> {
    match vector
        .iter()
        .find(|&(index, _)| index < 1 || index as usize > table_len)
    {
        Some((index, _)) => Err(ScaleError::DimensionMismatch { index, table_len }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn standardization_is_invertible() {
        let raw = [0.42, 0.31, 0.55, 120.0];
        let mut v = SparseFeatureVector::from_dense(&raw);
        scale_standard(&mut v, &tables::REGRESSION).unwrap();

        for ((index, scaled), original) in v.iter().zip(raw) {
            let back = tables::REGRESSION[slot(index)].invert(scaled);
            assert_relative_eq!(back, original, max_relative = 1e-9);
        }
    }

    #[test]
    fn min_max_maps_bounds_exactly() {
        for scheme in ScalingScheme::ALL {
            let ScaleTable::MinMax(table) = scheme.table() else {
                continue;
            };
            let mins: Vec<f64> = table.iter().map(|e| e.min).collect();
            let maxs: Vec<f64> = table.iter().map(|e| e.max).collect();

            let mut lo = SparseFeatureVector::from_dense(&mins);
            let mut hi = SparseFeatureVector::from_dense(&maxs);
            scale_min_max(&mut lo, table).unwrap();
            scale_min_max(&mut hi, table).unwrap();

            assert!(lo.iter().all(|(_, v)| v == -1.0), "{scheme:?}: {lo:?}");
            assert!(hi.iter().all(|(_, v)| v == 1.0), "{scheme:?}: {hi:?}");
        }
    }

    #[test]
    fn min_max_midpoint_is_zero() {
        let mut v = SparseFeatureVector::from_dense(&[4.0]);
        scale_min_max(&mut v, &[MinMax::new(2.0, 6.0)]).unwrap();
        assert_eq!(v.get(1), Some(0.0));
    }

    #[test]
    fn sparse_indices_use_their_own_entry() {
        let mut v = SparseFeatureVector::from_pairs([(4, 225.0), (1, 0.5)]);
        scale_standard(&mut v, &tables::REGRESSION).unwrap();
        assert_eq!(v.get(4), Some(0.0));
        assert_eq!(v.get(1), Some(0.0));
    }

    #[test]
    fn out_of_table_index_is_rejected_without_mutation() {
        let mut v = SparseFeatureVector::from_dense(&[0.1, 0.2, 0.3, 100.0, 7.0]);
        let before = v.clone();

        let err = scale_standard(&mut v, &tables::REGRESSION).unwrap_err();
        assert_eq!(err, ScaleError::DimensionMismatch { index: 5, table_len: 4 });
        assert_eq!(v, before);

        let err = scale(&mut v, ScalingScheme::Decision(DecisionVariant::Dinucleotide).table())
            .unwrap_err();
        assert_eq!(err, ScaleError::DimensionMismatch { index: 4, table_len: 3 });
    }

    #[test]
    fn sentinel_survives_scaling() {
        let mut v = SparseFeatureVector::from_dense(&[0.0, 0.5]);
        scale(&mut v, ScalingScheme::Decision(DecisionVariant::Standard).table()).unwrap();
        let sentinels = v.nodes().iter().filter(|n| n.is_sentinel()).count();
        assert_eq!(sentinels, 1);
        assert!(v.nodes().last().unwrap().is_sentinel());
    }

    #[test]
    fn backscale_inverts_target_standardization() {
        let (mean, stdev) = (-42.5, 4.75);
        let scaled_mean = tables::MEAN_TARGET.apply(mean);
        let scaled_stdev = tables::STDEV_TARGET.apply(stdev);

        let (m, s) = backscale_regression(
            scaled_mean,
            scaled_stdev,
            &tables::MEAN_TARGET,
            &tables::STDEV_TARGET,
        );
        assert_relative_eq!(m, mean, max_relative = 1e-12);
        assert_relative_eq!(s, stdev, max_relative = 1e-12);
    }

    #[test]
    fn table_sizes_per_scheme() {
        let sizes: Vec<usize> = ScalingScheme::ALL.iter().map(|s| s.table().len()).collect();
        assert_eq!(sizes, vec![4, 4, 3, 3, 8]);
    }
}
