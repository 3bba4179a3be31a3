//! Sentinel-terminated sparse feature vectors.
//!
//! libsvm represents an input row as a list of `(index, value)` nodes closed
//! by a node with index `-1`. The sentinel is kept here so that the layout a
//! prediction engine sees is the one libsvm expects, but it is owned by the
//! vector: callers can read and rescale values, never move or drop the
//! terminator.

/// Index carried by the terminating node of every [`SparseFeatureVector`].
pub const SENTINEL_INDEX: i32 = -1;

/// A feature index below 1 was given for a real feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("feature index must be positive, got {0}")]
pub struct InvalidFeatureIndex(pub i32);

/// A single `(index, value)` entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureNode {
    /// 1-based feature index, or [`SENTINEL_INDEX`] for the terminator.
    pub index: i32,
    /// Feature value.
    pub value: f64,
}

impl FeatureNode {
    /// The terminating node.
    pub const SENTINEL: FeatureNode = FeatureNode {
        index: SENTINEL_INDEX,
        value: 0.0,
    };

    /// Returns true if this is the terminating node.
    #[inline]
    pub fn is_sentinel(&self) -> bool {
        self.index == SENTINEL_INDEX
    }
}

/// Ordered sparse vector, always terminated by exactly one sentinel node.
///
/// Indices are positive. Ascending order is conventional but not enforced.
///
/// # Example
///
/// ```
/// use zscore_svm::model::SparseFeatureVector;
///
/// let v = SparseFeatureVector::from_dense(&[0.2, 0.8]);
/// assert_eq!(v.len(), 2);
/// assert_eq!(v.nodes().len(), 3);
/// assert!(v.nodes()[2].is_sentinel());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SparseFeatureVector {
    nodes: Vec<FeatureNode>,
}

impl SparseFeatureVector {
    /// Create an empty vector (sentinel only).
    pub fn new() -> Self {
        Self {
            nodes: vec![FeatureNode::SENTINEL],
        }
    }

    /// Create an empty vector with room for `capacity` features.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity + 1);
        nodes.push(FeatureNode::SENTINEL);
        Self { nodes }
    }

    /// Build from dense values, numbering features from 1.
    pub fn from_dense(values: &[f64]) -> Self {
        let mut v = Self::with_capacity(values.len());
        for (i, &value) in values.iter().enumerate() {
            v.push(i as i32 + 1, value);
        }
        v
    }

    /// Build from `(index, value)` pairs in the given order.
    ///
    /// # Panics
    ///
    /// Panics if any index is not positive.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (i32, f64)>,
    {
        let mut v = Self::new();
        for (index, value) in pairs {
            v.push(index, value);
        }
        v
    }

    /// Append a feature in front of the sentinel.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not positive. See [`Self::try_push`].
    pub fn push(&mut self, index: i32, value: f64) {
        if let Err(e) = self.try_push(index, value) {
            panic!("{e}");
        }
    }

    /// Append a feature in front of the sentinel, rejecting indices below 1.
    pub fn try_push(&mut self, index: i32, value: f64) -> Result<(), InvalidFeatureIndex> {
        if index < 1 {
            return Err(InvalidFeatureIndex(index));
        }
        let sentinel = self.nodes.len() - 1;
        self.nodes.insert(sentinel, FeatureNode { index, value });
        Ok(())
    }

    /// Number of features, excluding the sentinel.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Returns true if the vector holds only the sentinel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All nodes including the trailing sentinel.
    #[inline]
    pub fn nodes(&self) -> &[FeatureNode] {
        &self.nodes
    }

    /// Feature nodes without the sentinel.
    #[inline]
    pub fn features(&self) -> &[FeatureNode] {
        &self.nodes[..self.len()]
    }

    /// Iterate indices with mutable access to their values.
    ///
    /// Indices stay read-only so the sentinel can never be duplicated.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (i32, &mut f64)> + '_ {
        let len = self.len();
        self.nodes[..len].iter_mut().map(|n| (n.index, &mut n.value))
    }

    /// Value of the first node with the given index.
    pub fn get(&self, index: i32) -> Option<f64> {
        self.features()
            .iter()
            .find(|n| n.index == index)
            .map(|n| n.value)
    }

    /// Iterate `(index, value)` pairs, excluding the sentinel.
    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.features().iter().map(|n| (n.index, n.value))
    }
}

impl Default for SparseFeatureVector {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<(i32, f64)> for SparseFeatureVector {
    fn from_iter<T: IntoIterator<Item = (i32, f64)>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentinel_count(v: &SparseFeatureVector) -> usize {
        v.nodes().iter().filter(|n| n.is_sentinel()).count()
    }

    #[test]
    fn empty_vector_is_just_the_sentinel() {
        let v = SparseFeatureVector::new();
        assert!(v.is_empty());
        assert_eq!(v.nodes(), &[FeatureNode::SENTINEL]);
    }

    #[test]
    fn push_keeps_sentinel_last() {
        let mut v = SparseFeatureVector::new();
        v.push(3, 1.5);
        v.push(1, -2.0);

        assert_eq!(v.len(), 2);
        assert_eq!(sentinel_count(&v), 1);
        assert!(v.nodes().last().unwrap().is_sentinel());
        // insertion order is preserved, not sorted
        assert_eq!(v.iter().collect::<Vec<_>>(), vec![(3, 1.5), (1, -2.0)]);
    }

    #[test]
    fn try_push_rejects_non_positive_indices() {
        let mut v = SparseFeatureVector::from_dense(&[1.0]);
        assert_eq!(v.try_push(0, 2.0), Err(InvalidFeatureIndex(0)));
        assert_eq!(v.try_push(SENTINEL_INDEX, 2.0), Err(InvalidFeatureIndex(-1)));
        assert_eq!(v.len(), 1);
        assert_eq!(sentinel_count(&v), 1);

        assert_eq!(v.try_push(7, 2.0), Ok(()));
        assert_eq!(v.get(7), Some(2.0));
    }

    #[test]
    #[should_panic(expected = "feature index must be positive")]
    fn push_panics_on_sentinel_index() {
        SparseFeatureVector::new().push(SENTINEL_INDEX, 0.0);
    }

    #[test]
    fn from_dense_numbers_from_one() {
        let v = SparseFeatureVector::from_dense(&[0.1, 0.2, 0.3]);
        let indices: Vec<i32> = v.features().iter().map(|n| n.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
        assert_eq!(v.get(2), Some(0.2));
        assert_eq!(v.get(4), None);
    }

    #[test]
    fn iter_mut_cannot_reach_sentinel() {
        let mut v = SparseFeatureVector::from_dense(&[1.0, 2.0]);
        for (_, value) in v.iter_mut() {
            *value *= 10.0;
        }
        assert_eq!(v.iter().collect::<Vec<_>>(), vec![(1, 10.0), (2, 20.0)]);
        assert_eq!(sentinel_count(&v), 1);
    }

    #[test]
    #[should_panic(expected = "feature index must be positive")]
    fn push_rejects_sentinel_index() {
        let mut v = SparseFeatureVector::new();
        v.push(SENTINEL_INDEX, 1.0);
    }
}
