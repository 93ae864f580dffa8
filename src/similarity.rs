//! Pairwise cosine similarity and the derived distance matrix.

use rayon::prelude::*;

use crate::error::ClusteringError;
use crate::utils::math::vector::SparseVec;
use crate::utils::normalizer::UnitInterval;

/// Dense, row-major N×N matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct SquareMatrix {
    n: usize,
    data: Vec<f64>,
}

impl SquareMatrix {
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }
}

/// Cosine similarity of every document pair.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix(SquareMatrix);

/// `clip(1 - similarity, 0, 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix(SquareMatrix);

impl SimilarityMatrix {
    /// Compute all pairs. Rows are computed in parallel; every entry is
    /// clipped to `[0, 1]` and the diagonal is exactly 1.
    pub fn from_vectors(vectors: &[SparseVec]) -> Self {
        let n = vectors.len();
        // upper triangle per row, mirrored below
        let upper: Vec<Vec<f64>> = (0..n)
            .into_par_iter()
            .map(|i| {
                (i + 1..n)
                    .map(|j| vectors[i].cosine_similarity(&vectors[j]).clip_unit())
                    .collect()
            })
            .collect();

        let mut data = vec![0.0; n * n];
        for (i, row) in upper.iter().enumerate() {
            data[i * n + i] = 1.0;
            for (k, &s) in row.iter().enumerate() {
                let j = i + 1 + k;
                data[i * n + j] = s;
                data[j * n + i] = s;
            }
        }
        SimilarityMatrix(SquareMatrix { n, data })
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
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.0.get(i, j)
    }

    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        self.0.row(i)
    }

    pub fn to_distance(&self) -> DistanceMatrix {
        DistanceMatrix(SquareMatrix {
            n: self.0.n,
            data: self.0.data.iter().map(|s| (1.0 - s).clip_unit()).collect(),
        })
    }
}

impl DistanceMatrix {
    /// Wrap precomputed distances. Only the shape is checked here; the
    /// cluster assigner validates the values.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ClusteringError> {
        let n = rows.len();
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != n) {
            return Err(ClusteringError::NotSquare {
                rows: n,
                row,
                cols: r.len(),
            });
        }
        Ok(DistanceMatrix(SquareMatrix {
            n,
            data: rows.into_iter().flatten().collect(),
        }))
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
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.0.get(i, j)
    }

    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        self.0.row(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sv(len: usize, pairs: &[(u32, f64)]) -> SparseVec {
        let (i, v): (Vec<u32>, Vec<f64>) = pairs.iter().copied().unzip();
        SparseVec::from_unsorted(len, i, v).l2_normalized()
    }

    #[test]
    fn similarity_is_symmetric_bounded_with_unit_diagonal() {
        let vectors = vec![
            sv(4, &[(0, 1.0), (1, 2.0)]),
            sv(4, &[(1, 1.0), (2, 1.0)]),
            sv(4, &[(3, 5.0)]),
            SparseVec::new(4),
        ];
        let sim = SimilarityMatrix::from_vectors(&vectors);
        assert_eq!(sim.len(), 4);
        for i in 0..4 {
            assert_eq!(sim.get(i, i), 1.0);
            for j in 0..4 {
                assert_eq!(sim.get(i, j), sim.get(j, i));
                assert!((0.0..=1.0).contains(&sim.get(i, j)));
            }
        }
        assert_eq!(sim.get(0, 2), 0.0);
        assert_eq!(sim.get(3, 0), 0.0);
        assert!(sim.get(0, 1) > 0.0);
    }

    #[test]
    fn distance_is_one_minus_similarity() {
        let vectors = vec![sv(2, &[(0, 1.0)]), sv(2, &[(0, 1.0)]), sv(2, &[(1, 1.0)])];
        let dist = SimilarityMatrix::from_vectors(&vectors).to_distance();
        assert_eq!(dist.row(0), &[0.0, 0.0, 1.0]);
        assert_eq!(dist.get(2, 2), 0.0);
    }

    #[test]
    fn empty_and_single() {
        let sim = SimilarityMatrix::from_vectors(&[]);
        assert!(sim.is_empty());
        assert_eq!(sim.len(), 0);

        let sim = SimilarityMatrix::from_vectors(&[SparseVec::new(1)]);
        assert_eq!(sim.len(), 1);
        assert_eq!(sim.row(0), &[1.0]);
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        assert_eq!(
            DistanceMatrix::from_rows(vec![vec![0.0, 1.0]]).unwrap_err(),
            ClusteringError::NotSquare { rows: 1, row: 0, cols: 2 }
        );
        assert_eq!(
            DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]]).unwrap_err(),
            ClusteringError::NotSquare { rows: 2, row: 1, cols: 1 }
        );
        let d = DistanceMatrix::from_rows(vec![vec![0.0, 0.5], vec![0.5, 0.0]]).unwrap();
        assert_eq!(d.get(1, 0), 0.5);
    }
}
