use rayon::prelude::*;
use tracing::debug;

use crate::cluster::labels::{ClusterLabels, NOISE};
use crate::cluster::params::ClusterParams;
use crate::error::ClusteringError;
use crate::similarity::DistanceMatrix;

/// `d(i, j)` and `d(j, i)` may differ by at most this much.
pub const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// Density-based clustering over precomputed distances.
///
/// Deterministic: seeds are visited in index order and expansion uses a
/// stack, so identical input always yields identical labels. Cluster ids
/// are handed out 0, 1, 2… in the order their first core point is met.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dbscan {
    params: ClusterParams,
}

impl Dbscan {
    pub fn new(params: ClusterParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ClusterParams {
        &self.params
    }

    /// Label every document.
    ///
    /// # Errors
    /// Invalid params, or a distance that is NaN, infinite, negative or
    /// asymmetric.
    pub fn fit(&self, distances: &DistanceMatrix) -> Result<ClusterLabels, ClusteringError> {
        self.params.validate()?;
        validate_distances(distances)?;

        let n = distances.len();
        let eps = self.params.eps;
        let neighborhoods: Vec<Vec<usize>> = (0..n)
            .into_par_iter()
            .map(|i| {
                distances
                    .row(i)
                    .iter()
                    .enumerate()
                    .filter(|(_, &d)| d <= eps)
                    .map(|(j, _)| j)
                    .collect()
            })
            .collect();
        let is_core: Vec<bool> = neighborhoods
            .iter()
            .map(|nb| nb.len() >= self.params.min_samples)
            .collect();

        let mut labels = vec![NOISE; n];
        let mut next_label = 0;
        let mut stack = Vec::new();
        for seed in 0..n {
            if labels[seed] != NOISE || !is_core[seed] {
                continue;
            }
            let mut i = seed;
            loop {
                if labels[i] == NOISE {
                    labels[i] = next_label;
                    if is_core[i] {
                        stack.extend(neighborhoods[i].iter().copied().filter(|&v| labels[v] == NOISE));
                    }
                }
                match stack.pop() {
                    Some(v) => i = v,
                    None => break,
                }
            }
            next_label += 1;
        }

        let labels = ClusterLabels::new(labels);
        debug!(
            clusters = labels.n_clusters(),
            noise = labels.noise_count(),
            sizes = ?labels.sizes(),
            "clusters assigned"
        );
        Ok(labels)
    }
}

fn validate_distances(distances: &DistanceMatrix) -> Result<(), ClusteringError> {
    let n = distances.len();
    for row in 0..n {
        for col in 0..n {
            let value = distances.get(row, col);
            if !value.is_finite() {
                return Err(ClusteringError::NonFinite { row, col });
            }
            if value < 0.0 {
                return Err(ClusteringError::Negative { row, col, value });
            }
            if col > row && (value - distances.get(col, row)).abs() > SYMMETRY_TOLERANCE {
                return Err(ClusteringError::Asymmetric { row, col });
            }
        }
    }
    Ok(())
}
