//! Fixed scaling constants.
//!
//! Entry `i` of each table applies to feature index `i + 1`.

use super::{MinMax, Standardization};

/// Regression inputs, standardized: GC content, A content, C content, length.
pub static REGRESSION: [Standardization; 4] = [
    Standardization::new(0.5, 0.1581213081),
    Standardization::new(0.5, 0.1581213081),
    Standardization::new(0.5, 0.1581213081),
    Standardization::new(225.0, 114.569772373),
];

/// Decision variant 1: z-score, SCI, mean pairwise identity, number of sequences.
pub static DECISION_STANDARD: [MinMax; 4] = [
    MinMax::new(-7.87, 2.76),
    MinMax::new(0.0, 1.23),
    MinMax::new(52.35, 99.55),
    MinMax::new(2.0, 6.0),
];

/// Decision variant 2: dinucleotide-shuffle z-score, SCI, normalized Shannon entropy.
pub static DECISION_DINUCLEOTIDE: [MinMax; 3] = [
    MinMax::new(-8.15, 2.01),
    MinMax::new(0.0, 1.29),
    MinMax::new(0.0, 1.28718),
];

/// Decision variant 3: as variant 2, trained with structural features.
pub static DECISION_DINUCLEOTIDE_STRUCTURAL: [MinMax; 3] = [
    MinMax::new(-8.13, 2.01),
    MinMax::new(0.0, 1.31),
    MinMax::new(0.0, 1.38353),
];

/// Decision variant 4: extended RNA feature set.
pub static DECISION_RNA_FEATURES: [MinMax; 8] = [
    // z-score
    MinMax::new(-6.18, 2.73),
    // SCI
    MinMax::new(0.0, 1.28),
    // normalized Shannon entropy
    MinMax::new(0.00619, 0.82296),
    // cis (cross) energy
    MinMax::new(-2.36296, 2.71455),
    // trans energy
    MinMax::new(-97.76377, 26.64685),
    // MFE log probability
    MinMax::new(-5.233691, -0.213344),
    // MFE minus Boltzmann expected energy, per base
    MinMax::new(0.010874, 0.050835),
    // Boltzmann variance, per base
    MinMax::new(0.000163, 0.001514),
];

/// Statistics of the regression target for the mean-energy model.
pub static MEAN_TARGET: Standardization = Standardization::new(-58.60276, 45.24618);

/// Statistics of the regression target for the stdev-energy model.
pub static STDEV_TARGET: Standardization = Standardization::new(4.098457, 1.107606);
