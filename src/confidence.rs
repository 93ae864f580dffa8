//! Per-document confidence in its cluster assignment.

use std::collections::HashMap;

use serde::Serialize;

use crate::cluster::{ClusterLabels, NOISE};
use crate::config::ConfidenceConfig;
use crate::similarity::SimilarityMatrix;
use crate::utils::normalizer::UnitInterval;

/// One score in `[0, 1]` per document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConfidenceScores(Vec<f64>);

impl ConfidenceScores {
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn get(&self, doc: usize) -> Option<f64> {
        self.0.get(doc).copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for ConfidenceScores {
    fn from(scores: Vec<f64>) -> Self {
        Self(scores)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfidenceScorer {
    config: ConfidenceConfig,
}

impl ConfidenceScorer {
    pub fn new(config: ConfidenceConfig) -> Self {
        Self { config }
    }

    /// Mean similarity to every member of the same cluster, self included.
    /// Noise documents get the fixed noise confidence.
    ///
    /// `similarity` and `labels` must describe the same documents. Debug
    /// builds assert this.
    pub fn score(&self, similarity: &SimilarityMatrix, labels: &ClusterLabels) -> ConfidenceScores {
        debug_assert_eq!(similarity.len(), labels.len(), "similarity matrix size");
        let mut members: HashMap<i32, Vec<usize>> = HashMap::new();
        for (doc, &label) in labels.as_slice().iter().enumerate() {
            if label != NOISE {
                members.entry(label).or_default().push(doc);
            }
        }

        let noise = self.config.noise_confidence.clip_unit();
        let scores = labels
            .as_slice()
            .iter()
            .enumerate()
            .map(|(doc, label)| match members.get(label) {
                Some(peers) => {
                    let row = similarity.row(doc);
                    let sum: f64 = peers.iter().map(|&p| row[p]).sum();
                    (sum / peers.len() as f64).clip_unit()
                }
                None => noise,
            })
            .collect();
        ConfidenceScores(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::math::vector::SparseVec;

    fn sim(vectors: &[(u32, f64)]) -> SimilarityMatrix {
        let rows: Vec<SparseVec> = vectors
            .iter()
            .map(|&(i, v)| SparseVec::from_unsorted(4, vec![i], vec![v]))
            .collect();
        SimilarityMatrix::from_vectors(&rows)
    }

    #[test]
    fn cluster_mean_includes_self() {
        let s = SimilarityMatrix::from_vectors(&[
            SparseVec::from_unsorted(2, vec![0], vec![1.0]),
            SparseVec::from_unsorted(2, vec![0, 1], vec![1.0, 1.0]),
        ]);
        let labels = ClusterLabels::new(vec![0, 0]);
        let scores = ConfidenceScorer::default().score(&s, &labels);
        let expected = (1.0 + std::f64::consts::FRAC_1_SQRT_2) / 2.0;
        assert!((scores.get(0).unwrap() - expected).abs() < 1e-12);
        assert!((scores.get(1).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn noise_gets_fixed_low_confidence() {
        let s = sim(&[(0, 1.0), (1, 1.0), (2, 1.0)]);
        let labels = ClusterLabels::new(vec![NOISE, 0, NOISE]);
        let scores = ConfidenceScorer::default().score(&s, &labels);
        assert_eq!(scores.as_slice(), &[0.1, 1.0, 0.1]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "similarity matrix size")]
    fn labels_must_match_the_similarity_matrix() {
        let s = sim(&[(0, 1.0), (0, 1.0)]);
        let labels = ClusterLabels::new(vec![0, 0, 0]);
        ConfidenceScorer::default().score(&s, &labels);
    }

    #[test]
    fn configurable_noise_and_bounds() {
        let s = sim(&[(0, 1.0), (0, 2.0)]);
        let labels = ClusterLabels::new(vec![0, NOISE]);
        let scores = ConfidenceScorer::new(ConfidenceConfig { noise_confidence: 0.25 }).score(&s, &labels);
        assert_eq!(scores.as_slice(), &[1.0, 0.25]);
        assert!(scores.as_slice().iter().all(|c| (0.0..=1.0).contains(c)));
    }
}
