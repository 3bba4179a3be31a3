//! In-memory libsvm model.
//!
//! A [`Model`] is built in one step from [`ModelParts`]: either every
//! invariant holds and a complete model is returned, or nothing is. There is
//! no way to observe a half-populated model, and a model is immutable once
//! built.
//!
//! # Invariants
//!
//! For `k = class_count`:
//!
//! - `k >= 1`
//! - `rho.len() == k * (k - 1) / 2`, and `prob_a`/`prob_b` match it when present
//! - `labels`/`n_sv` have length `k` when present
//! - `coefficients` has `k - 1` rows, each as long as `support_vectors`

mod vector;

pub use vector::{FeatureNode, InvalidFeatureIndex, SparseFeatureVector, SENTINEL_INDEX};

use std::fmt;
use std::str::FromStr;

use crate::io::text::ParseError;

// =============================================================================
// Vocabularies
// =============================================================================

/// libsvm formulation, in file-format ordinal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SvmType {
    /// C-support vector classification.
    CSvc,
    /// ν-support vector classification.
    NuSvc,
    /// One-class distribution estimation.
    OneClass,
    /// ε-support vector regression.
    EpsilonSvr,
    /// ν-support vector regression.
    NuSvr,
}

impl SvmType {
    /// All types, indexed by their ordinal.
    pub const ALL: [SvmType; 5] = [
        SvmType::CSvc,
        SvmType::NuSvc,
        SvmType::OneClass,
        SvmType::EpsilonSvr,
        SvmType::NuSvr,
    ];

    /// Token used in the text format.
    pub fn as_str(self) -> &'static str {
        match self {
            SvmType::CSvc => "c_svc",
            SvmType::NuSvc => "nu_svc",
            SvmType::OneClass => "one_class",
            SvmType::EpsilonSvr => "epsilon_svr",
            SvmType::NuSvr => "nu_svr",
        }
    }

    /// Ordinal (0-4) in the text-format vocabulary.
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Returns true for the two regression formulations.
    pub fn is_regression(self) -> bool {
        matches!(self, SvmType::EpsilonSvr | SvmType::NuSvr)
    }
}

impl FromStr for SvmType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SvmType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ParseError::UnknownModelType(s.to_string()))
    }
}

impl fmt::Display for SvmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kernel family, in file-format ordinal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KernelType {
    Linear,
    Polynomial,
    Rbf,
    Sigmoid,
}

impl KernelType {
    /// All kernel types, indexed by their ordinal.
    pub const ALL: [KernelType; 4] = [
        KernelType::Linear,
        KernelType::Polynomial,
        KernelType::Rbf,
        KernelType::Sigmoid,
    ];

    /// Token used in the text format.
    pub fn as_str(self) -> &'static str {
        match self {
            KernelType::Linear => "linear",
            KernelType::Polynomial => "polynomial",
            KernelType::Rbf => "rbf",
            KernelType::Sigmoid => "sigmoid",
        }
    }

    /// Ordinal (0-3) in the text-format vocabulary.
    pub fn ordinal(self) -> usize {
        self as usize
    }
}

impl FromStr for KernelType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KernelType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ParseError::UnknownKernelType(s.to_string()))
    }
}

impl fmt::Display for KernelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Kernel
// =============================================================================

/// Kernel together with the hyperparameters it actually uses.
///
/// `degree` is kept as `f64`: model files written by other tools sometimes
/// carry a fractional representation, and it is written back unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kernel {
    /// `u'v`
    Linear,
    /// `(gamma * u'v + coef0)^degree`
    Polynomial { degree: f64, gamma: f64, coef0: f64 },
    /// `exp(-gamma * |u - v|^2)`
    Rbf { gamma: f64 },
    /// `tanh(gamma * u'v + coef0)`
    Sigmoid { gamma: f64, coef0: f64 },
}

impl Kernel {
    /// Build a kernel from its type and the raw header values.
    ///
    /// Values the kernel does not use are dropped.
    pub fn from_params(kind: KernelType, degree: f64, gamma: f64, coef0: f64) -> Self {
        match kind {
            KernelType::Linear => Kernel::Linear,
            KernelType::Polynomial => Kernel::Polynomial {
                degree,
                gamma,
                coef0,
            },
            KernelType::Rbf => Kernel::Rbf { gamma },
            KernelType::Sigmoid => Kernel::Sigmoid { gamma, coef0 },
        }
    }

    pub fn kind(&self) -> KernelType {
        match self {
            Kernel::Linear => KernelType::Linear,
            Kernel::Polynomial { .. } => KernelType::Polynomial,
            Kernel::Rbf { .. } => KernelType::Rbf,
            Kernel::Sigmoid { .. } => KernelType::Sigmoid,
        }
    }

    pub fn degree(&self) -> Option<f64> {
        match *self {
            Kernel::Polynomial { degree, .. } => Some(degree),
            _ => None,
        }
    }

    pub fn gamma(&self) -> Option<f64> {
        match *self {
            Kernel::Linear => None,
            Kernel::Polynomial { gamma, .. }
            | Kernel::Rbf { gamma }
            | Kernel::Sigmoid { gamma, .. } => Some(gamma),
        }
    }

    pub fn coef0(&self) -> Option<f64> {
        match *self {
            Kernel::Polynomial { coef0, .. } | Kernel::Sigmoid { coef0, .. } => Some(coef0),
            _ => None,
        }
    }
}

// =============================================================================
// Model
// =============================================================================

/// Number of pairwise decision functions for `class_count` classes, or
/// `None` if it does not fit in a `usize`.
#[inline]
pub fn pairwise_count(class_count: usize) -> Option<usize> {
    class_count
        .checked_mul(class_count.saturating_sub(1))
        .map(|n| n / 2)
}

/// Validated class count and its pairwise count.
pub(crate) fn class_dimensions(class_count: usize) -> Result<(usize, usize), ParseError> {
    if class_count == 0 {
        return Err(ParseError::InvalidValue {
            field: "nr_class",
            message: "a model needs at least one class".to_string(),
        });
    }
    let pairs = pairwise_count(class_count).ok_or_else(|| ParseError::InvalidValue {
        field: "nr_class",
        message: format!("{class_count} classes is too many"),
    })?;
    Ok((class_count, pairs))
}

/// Unvalidated model contents, consumed by [`Model::from_parts`].
#[derive(Debug, Clone, PartialEq)]
pub struct ModelParts {
    pub svm_type: SvmType,
    pub kernel: Kernel,
    pub class_count: usize,
    pub rho: Vec<f64>,
    pub prob_a: Option<Vec<f64>>,
    pub prob_b: Option<Vec<f64>>,
    pub labels: Option<Vec<i32>>,
    pub n_sv: Option<Vec<u32>>,
    pub support_vectors: Vec<SparseFeatureVector>,
    /// `class_count - 1` rows, one column per support vector.
    pub coefficients: Vec<Vec<f64>>,
}

/// A trained libsvm model.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    svm_type: SvmType,
    kernel: Kernel,
    class_count: usize,
    rho: Vec<f64>,
    prob_a: Option<Vec<f64>>,
    prob_b: Option<Vec<f64>>,
    labels: Option<Vec<i32>>,
    n_sv: Option<Vec<u32>>,
    support_vectors: Vec<SparseFeatureVector>,
    coefficients: Vec<Vec<f64>>,
}

impl Model {
    /// Validate `parts` and build a model.
    ///
    /// # Errors
    ///
    /// [`ParseError::InvalidValue`] if `class_count` is zero or too large,
    /// and [`ParseError::DimensionMismatch`] for any array whose length disagrees
    /// with `class_count` or the support vector count.
    pub fn from_parts(parts: ModelParts) -> Result<Self, ParseError> {
        let (k, pairs) = class_dimensions(parts.class_count)?;
        let total_sv = parts.support_vectors.len();

        check_len("rho", parts.rho.len(), pairs)?;
        if let Some(prob_a) = &parts.prob_a {
            check_len("probA", prob_a.len(), pairs)?;
        }
        if let Some(prob_b) = &parts.prob_b {
            check_len("probB", prob_b.len(), pairs)?;
        }
        if let Some(labels) = &parts.labels {
            check_len("label", labels.len(), k)?;
        }
        if let Some(n_sv) = &parts.n_sv {
            check_len("nr_sv", n_sv.len(), k)?;
        }
        check_len("sv_coef", parts.coefficients.len(), k - 1)?;
        for row in &parts.coefficients {
            check_len("sv_coef", row.len(), total_sv)?;
        }

        let ModelParts {
            svm_type,
            kernel,
            class_count,
            rho,
            prob_a,
            prob_b,
            labels,
            n_sv,
            support_vectors,
            coefficients,
        } = parts;

        Ok(Self {
            svm_type,
            kernel,
            class_count,
            rho,
            prob_a,
            prob_b,
            labels,
            n_sv,
            support_vectors,
            coefficients,
        })
    }

    /// Parse a model from its text representation.
    ///
    /// Shorthand for [`crate::io::parse_model`].
    pub fn from_text(text: &str) -> Result<Self, ParseError> {
        crate::io::parse_model(text)
    }

    /// Render the model in the text format.
    ///
    /// Shorthand for [`crate::io::serialize_model`].
    pub fn to_text(&self) -> String {
        crate::io::serialize_model(self)
    }

    /// Break the model back into its parts.
    pub fn into_parts(self) -> ModelParts {
        ModelParts {
            svm_type: self.svm_type,
            kernel: self.kernel,
            class_count: self.class_count,
            rho: self.rho,
            prob_a: self.prob_a,
            prob_b: self.prob_b,
            labels: self.labels,
            n_sv: self.n_sv,
            support_vectors: self.support_vectors,
            coefficients: self.coefficients,
        }
    }

    #[inline]
    pub fn svm_type(&self) -> SvmType {
        self.svm_type
    }

    #[inline]
    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    #[inline]
    pub fn kernel_type(&self) -> KernelType {
        self.kernel.kind()
    }

    /// Number of classes (2 for regression and one-class models).
    #[inline]
    pub fn class_count(&self) -> usize {
        self.class_count
    }

    /// Number of support vectors.
    #[inline]
    pub fn support_vector_count(&self) -> usize {
        self.support_vectors.len()
    }

    /// Decision-function offsets, one per class pair.
    #[inline]
    pub fn rho(&self) -> &[f64] {
        &self.rho
    }

    /// Pairwise probability parameter A, if the model was trained with it.
    #[inline]
    pub fn prob_a(&self) -> Option<&[f64]> {
        self.prob_a.as_deref()
    }

    /// Pairwise probability parameter B, if the model was trained with it.
    #[inline]
    pub fn prob_b(&self) -> Option<&[f64]> {
        self.prob_b.as_deref()
    }

    /// Class labels (classification only).
    #[inline]
    pub fn labels(&self) -> Option<&[i32]> {
        self.labels.as_deref()
    }

    /// Support vectors per class (classification only).
    #[inline]
    pub fn n_sv(&self) -> Option<&[u32]> {
        self.n_sv.as_deref()
    }

    #[inline]
    pub fn support_vectors(&self) -> &[SparseFeatureVector] {
        &self.support_vectors
    }

    /// Dual coefficients: `class_count - 1` rows × `support_vector_count` columns.
    #[inline]
    pub fn coefficients(&self) -> &[Vec<f64>] {
        &self.coefficients
    }

    /// Dual coefficients of one support vector across all rows.
    pub fn coefficients_of(&self, sv: usize) -> impl Iterator<Item = f64> + '_ {
        self.coefficients.iter().map(move |row| row[sv])
    }
}

impl FromStr for Model {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Model::from_text(s)
    }
}

fn check_len(field: &'static str, actual: usize, expected: usize) -> Result<(), ParseError> {
    if actual != expected {
        return Err(ParseError::DimensionMismatch {
            field,
            expected,
            actual,
        });
    }
    Ok(())
}
