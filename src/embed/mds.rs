//! Metric multidimensional scaling by stress majorization (SMACOF).

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::debug;

use crate::similarity::DistanceMatrix;

/// Stand-in for a zero layout distance when forming the Guttman ratio.
const MIN_LAYOUT_DISTANCE: f64 = 1e-5;

pub type Point = [f64; 2];

/// Raw layout before canvas scaling.
#[derive(Debug, Clone, PartialEq)]
pub struct MdsLayout {
    pub points: Vec<Point>,
    /// Raw stress of the chosen start
    pub stress: f64,
    pub n_iter: usize,
}

/// SMACOF solver with seeded random starts.
#[derive(Debug, Clone, Copy)]
pub struct Smacof {
    pub seed: u64,
    pub n_init: usize,
    pub max_iter: usize,
    pub tolerance: f64,
}

impl Smacof {
    /// Run every start and keep the lowest stress. Ties go to the earliest
    /// start. Starts are independent and run in parallel; each draws from
    /// its own seed, so the outcome does not depend on scheduling.
    pub fn fit(&self, distances: &DistanceMatrix) -> MdsLayout {
        let n = distances.len();
        match n {
            0 => {
                return MdsLayout {
                    points: Vec::new(),
                    stress: 0.0,
                    n_iter: 0,
                }
            }
            1 => {
                return MdsLayout {
                    points: vec![[0.0, 0.0]],
                    stress: 0.0,
                    n_iter: 0,
                }
            }
            _ => {}
        }

        let mut master = ChaCha8Rng::seed_from_u64(self.seed);
        let seeds: Vec<u64> = (0..self.n_init.max(1)).map(|_| master.gen()).collect();

        let runs: Vec<MdsLayout> = seeds
            .par_iter()
            .map(|&s| self.single(distances, ChaCha8Rng::seed_from_u64(s)))
            .collect();

        let mut best: Option<MdsLayout> = None;
        for (init, run) in runs.into_iter().enumerate() {
            debug!(init, stress = run.stress, iterations = run.n_iter, "mds start finished");
            if best.as_ref().map_or(true, |b| run.stress < b.stress) {
                best = Some(run);
            }
        }
        // n_init >= 1, so at least one run exists
        best.unwrap_or(MdsLayout {
            points: vec![[0.0, 0.0]; n],
            stress: 0.0,
            n_iter: 0,
        })
    }

    fn single(&self, distances: &DistanceMatrix, mut rng: ChaCha8Rng) -> MdsLayout {
        let n = distances.len();
        let mut x: Vec<Point> = (0..n).map(|_| [rng.gen::<f64>(), rng.gen::<f64>()]).collect();
        let mut old_stress: Option<f64> = None;
        let mut stress = 0.0;
        let mut n_iter = 0;

        for it in 0..self.max_iter {
            n_iter = it + 1;
            let layout = pairwise(&x);
            stress = 0.0;
            for i in 0..n {
                for j in 0..n {
                    let diff = layout[i * n + j] - distances.get(i, j);
                    stress += diff * diff;
                }
            }
            stress /= 2.0;

            // Guttman transform: x_i <- 1/n * sum_j ratio_ij (x_i - x_j)
            let prev = &x;
            let next: Vec<Point> = (0..n)
                .into_par_iter()
                .map(|i| {
                    let mut acc = [0.0; 2];
                    for j in (0..n).filter(|&j| j != i) {
                        let d = layout[i * n + j];
                        let ratio = distances.get(i, j) / if d == 0.0 { MIN_LAYOUT_DISTANCE } else { d };
                        acc[0] += ratio * (prev[i][0] - prev[j][0]);
                        acc[1] += ratio * (prev[i][1] - prev[j][1]);
                    }
                    [acc[0] / n as f64, acc[1] / n as f64]
                })
                .collect();
            x = next;

            let spread: f64 = x.iter().map(|p| (p[0] * p[0] + p[1] * p[1]).sqrt()).sum();
            if spread == 0.0 {
                // collapsed onto the origin, nothing left to improve
                break;
            }
            let relative = stress / spread;
            if let Some(old) = old_stress {
                if old - relative < self.tolerance {
                    break;
                }
            }
            old_stress = Some(relative);
        }

        MdsLayout {
            points: x,
            stress,
            n_iter,
        }
    }
}

/// Row-major Euclidean distances between layout points.
fn pairwise(points: &[Point]) -> Vec<f64> {
    let n = points.len();
    let mut out = vec![0.0; n * n];
    for i in 0..n {
        for j in i + 1..n {
            let dx = points[i][0] - points[j][0];
            let dy = points[i][1] - points[j][1];
            let d = (dx * dx + dy * dy).sqrt();
            out[i * n + j] = d;
            out[j * n + i] = d;
        }
    }
    out
}
