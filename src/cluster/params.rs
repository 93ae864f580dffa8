use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Neighbor radius in distance units (`1 - cosine`).
pub const DEFAULT_EPS: f64 = 0.7;
/// Neighborhood size, the point itself included, needed to seed a cluster.
pub const DEFAULT_MIN_SAMPLES: usize = 2;

/// Density clustering knobs.
///
/// Two documents are neighbors when their distance is at most `eps`. A
/// document is a core point when its neighborhood, itself included, holds
/// at least `min_samples` documents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterParams {
    pub eps: f64,
    pub min_samples: usize,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            eps: DEFAULT_EPS,
            min_samples: DEFAULT_MIN_SAMPLES,
        }
    }
}

impl ClusterParams {
    pub fn new(eps: f64, min_samples: usize) -> Self {
        Self { eps, min_samples }
    }

    #[must_use]
    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    #[must_use]
    pub fn with_min_samples(mut self, min_samples: usize) -> Self {
        self.min_samples = min_samples;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.eps.is_finite() && self.eps > 0.0) {
            return Err(ConfigError::invalid(
                "cluster.eps",
                format!("must be finite and > 0, got {}", self.eps),
            ));
        }
        if self.min_samples == 0 {
            return Err(ConfigError::invalid("cluster.min_samples", "must be >= 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_and_validation() {
        let p = ClusterParams::default().with_eps(0.3).with_min_samples(1);
        assert_eq!(p, ClusterParams::new(0.3, 1));
        assert!(p.validate().is_ok());

        assert!(ClusterParams::new(0.0, 2).validate().is_err());
        assert!(ClusterParams::new(f64::NAN, 2).validate().is_err());
        assert!(matches!(
            ClusterParams::new(0.5, 0).validate(),
            Err(ConfigError::InvalidValue { field: "cluster.min_samples", .. })
        ));
    }
}
