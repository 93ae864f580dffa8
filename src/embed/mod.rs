//! Planar layout of the distance matrix, scaled onto a fixed canvas.

pub mod mds;

use serde::Serialize;
use tracing::warn;

use crate::config::EmbeddingConfig;
use crate::embed::mds::Smacof;
use crate::similarity::DistanceMatrix;
use crate::utils::normalizer::FiniteOrZero;
use crate::utils::scaler::rescale_axis;

/// Canvas position of one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Embedding {
    /// One per document, every value finite and inside the canvas
    pub coordinates: Vec<Coordinate>,
    pub stress: f64,
}

#[derive(Debug, Clone, Default)]
pub struct PlanarEmbedder {
    config: EmbeddingConfig,
}

impl PlanarEmbedder {
    pub fn new(config: EmbeddingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EmbeddingConfig {
        &self.config
    }

    pub fn embed(&self, distances: &DistanceMatrix) -> Embedding {
        let solver = Smacof {
            seed: self.config.seed,
            n_init: self.config.n_init,
            max_iter: self.config.max_iter,
            tolerance: self.config.tolerance,
        };
        let layout = solver.fit(distances);

        let mut repaired = 0usize;
        let mut repair = |v: f64| {
            if !v.is_finite() {
                repaired += 1;
            }
            v.finite_or_zero()
        };
        let xs: Vec<f64> = layout.points.iter().map(|p| repair(p[0])).collect();
        let ys: Vec<f64> = layout.points.iter().map(|p| repair(p[1])).collect();
        if repaired > 0 {
            warn!(repaired, documents = xs.len(), "degenerate embedding, non-finite coordinates replaced with 0");
        }

        let canvas = self.config.canvas;
        let xs = rescale_axis(&xs, canvas.width);
        let ys = rescale_axis(&ys, canvas.height);
        Embedding {
            coordinates: xs
                .into_iter()
                .zip(ys)
                .map(|(x, y)| Coordinate { x, y })
                .collect(),
            stress: layout.stress.finite_or_zero(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Canvas;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn dist(rows: Vec<Vec<f64>>) -> DistanceMatrix {
        DistanceMatrix::from_rows(rows).unwrap()
    }

    #[test]
    fn coordinates_fill_the_canvas() {
        let d = dist(vec![
            vec![0.0, 0.1, 1.0, 1.0],
            vec![0.1, 0.0, 1.0, 1.0],
            vec![1.0, 1.0, 0.0, 1.0],
            vec![1.0, 1.0, 1.0, 0.0],
        ]);
        let e = PlanarEmbedder::default().embed(&d);
        assert_eq!(e.coordinates.len(), 4);
        for c in &e.coordinates {
            assert!((0.0..=800.0).contains(&c.x));
            assert!((0.0..=600.0).contains(&c.y));
        }
        let max_x = e.coordinates.iter().map(|c| c.x).fold(0.0, f64::max);
        assert!(max_x > 799.0);
    }

    #[test]
    fn degenerate_inputs_stay_finite() {
        let single = PlanarEmbedder::default().embed(&dist(vec![vec![0.0]]));
        assert_eq!(single.coordinates, vec![Coordinate { x: 0.0, y: 0.0 }]);

        let flat = PlanarEmbedder::default().embed(&dist(vec![vec![0.0; 4]; 4]));
        assert!(flat.coordinates.iter().all(|c| c.x.is_finite() && c.y.is_finite()));

        assert!(PlanarEmbedder::default().embed(&dist(vec![])).coordinates.is_empty());
    }

    #[test]
    fn nan_distances_are_zeroed_and_logged() {
        let d = dist(vec![
            vec![0.0, f64::NAN, 0.5],
            vec![f64::NAN, 0.0, 0.5],
            vec![0.5, 0.5, 0.0],
        ]);
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let e = tracing::dispatcher::with_default(&tracing::Dispatch::new(subscriber), || {
            PlanarEmbedder::default().embed(&d)
        });

        assert_eq!(e.coordinates.len(), 3);
        for c in &e.coordinates {
            assert!(c.x.is_finite() && c.y.is_finite());
            assert_eq!(*c, Coordinate { x: 0.0, y: 0.0 });
        }
        assert!(e.stress.is_finite());

        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("WARN"));
        assert!(logs.contains("degenerate embedding"));
    }

    #[test]
    fn seed_controls_layout() {
        let d = dist(vec![
            vec![0.0, 0.3, 0.9],
            vec![0.3, 0.0, 0.6],
            vec![0.9, 0.6, 0.0],
        ]);
        let config = EmbeddingConfig {
            canvas: Canvas { width: 100.0, height: 100.0 },
            ..EmbeddingConfig::default()
        };
        let a = PlanarEmbedder::new(config.clone()).embed(&d);
        let b = PlanarEmbedder::new(config).embed(&d);
        assert_eq!(a, b);
    }
}
