//! Seam to the SVM prediction engine.
//!
//! Kernel evaluation lives outside this crate. Anything that can turn a
//! parsed [`Model`] and an already scaled input vector into a decision or
//! regression value implements [`SvmEngine`]; closures do so automatically.
//!
//! ```
//! use zscore_svm::model::{Model, SparseFeatureVector};
//! use zscore_svm::predict::SvmEngine;
//!
//! let engine = |_: &Model, x: &SparseFeatureVector| x.iter().map(|(_, v)| v).sum::<f64>();
//! # let model: Model = "svm_type epsilon_svr\nkernel_type linear\nnr_class 2\ntotal_sv 0\nrho 0\nSV\n".parse().unwrap();
//! let x = SparseFeatureVector::from_dense(&[0.25, 0.5]);
//! assert_eq!(engine.predict(&model, &x), 0.75);
//! ```

use crate::model::{Model, SparseFeatureVector};

/// An SVM prediction engine.
pub trait SvmEngine {
    /// Decision value (classification) or predicted target (regression) for
    /// the scaled input `x`.
    fn predict(&self, model: &Model, x: &SparseFeatureVector) -> f64;
}

impl<F> SvmEngine for F
where
    F: Fn(&Model, &SparseFeatureVector) -> f64,
{
    #[inline]
    fn predict(&self, model: &Model, x: &SparseFeatureVector) -> f64 {
        self(model, x)
    }
}
