use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Label of a document that belongs to no cluster.
pub const NOISE: i32 = -1;

/// One label per document, indexed like the document set.
///
/// Non-negative labels are cluster ids; [`NOISE`] marks unclustered
/// documents. Ids carry no meaning beyond equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterLabels(Vec<i32>);

impl ClusterLabels {
    pub fn new(labels: Vec<i32>) -> Self {
        Self(labels)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn get(&self, doc: usize) -> Option<i32> {
        self.0.get(doc).copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }

    #[inline]
    pub fn is_noise(&self, doc: usize) -> bool {
        self.get(doc) == Some(NOISE)
    }

    /// True when both documents carry the same non-noise label.
    #[inline]
    pub fn same_cluster(&self, a: usize, b: usize) -> bool {
        match (self.get(a), self.get(b)) {
            (Some(x), Some(y)) => x != NOISE && x == y,
            _ => false,
        }
    }

    pub fn noise_count(&self) -> usize {
        self.0.iter().filter(|&&l| l == NOISE).count()
    }

    /// Member count per cluster id, ascending by id. Noise is excluded.
    pub fn sizes(&self) -> BTreeMap<i32, usize> {
        let mut sizes = BTreeMap::new();
        for &l in self.0.iter().filter(|&&l| l != NOISE) {
            *sizes.entry(l).or_insert(0) += 1;
        }
        sizes
    }

    pub fn n_clusters(&self) -> usize {
        self.sizes().len()
    }

    /// Document indices carrying `label`, ascending.
    pub fn members(&self, label: i32) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, &l)| l == label)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn into_inner(self) -> Vec<i32> {
        self.0
    }
}

impl From<Vec<i32>> for ClusterLabels {
    fn from(labels: Vec<i32>) -> Self {
        Self(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_and_membership() {
        let labels = ClusterLabels::new(vec![0, 0, NOISE, 1, NOISE, 1, 1]);
        assert_eq!(labels.n_clusters(), 2);
        assert_eq!(labels.noise_count(), 2);
        assert_eq!(labels.sizes().into_iter().collect::<Vec<_>>(), vec![(0, 2), (1, 3)]);
        assert_eq!(labels.members(1), vec![3, 5, 6]);
        assert!(labels.same_cluster(0, 1));
        assert!(!labels.same_cluster(2, 4));
        assert!(!labels.same_cluster(0, 3));
        assert!(!labels.same_cluster(0, 99));
        assert!(labels.is_noise(4));
    }

    #[test]
    fn serializes_as_plain_array() {
        let labels = ClusterLabels::from(vec![NOISE, 0]);
        assert_eq!(serde_json::to_string(&labels).unwrap(), "[-1,0]");
    }
}
