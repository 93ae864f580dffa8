//! Pipeline configuration.
//!
//! Every knob that shapes the output is a named field with a documented
//! default. A JSON config file may set any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cluster::ClusterParams;
use crate::error::ConfigError;

/// Vocabulary cap used when none is configured.
pub const DEFAULT_MAX_FEATURES: usize = 1000;
/// Terms present in more than this fraction of documents are dropped.
pub const DEFAULT_MAX_DF: f64 = 0.9;
/// Confidence assigned to noise points.
pub const NOISE_CONFIDENCE: f64 = 0.1;
/// Pairs at or below this similarity get no edge.
pub const DEFAULT_EDGE_THRESHOLD: f64 = 0.3;
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_CANVAS_WIDTH: f64 = 800.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;

/// Full configuration, one section per stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub vectorizer: VectorizerConfig,
    pub cluster: ClusterParams,
    pub confidence: ConfidenceConfig,
    pub embedding: EmbeddingConfig,
    pub graph: GraphConfig,
    pub summary: SummaryConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    /// Keep at most this many terms, highest corpus count first
    pub max_features: usize,
    /// Drop terms seen in fewer documents than this
    pub min_df: u64,
    /// Drop terms seen in more than `floor(max_df * N)` documents; corpora
    /// too small for the fraction to exclude anything but universal terms
    /// keep those
    pub max_df: f64,
    /// Remove English stop words
    pub stop_words: bool,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            min_df: 1,
            max_df: DEFAULT_MAX_DF,
            stop_words: true,
        }
    }
}

impl VectorizerConfig {
    #[must_use]
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    #[must_use]
    pub fn with_max_df(mut self, max_df: f64) -> Self {
        self.max_df = max_df;
        self
    }

    #[must_use]
    pub fn with_stop_words(mut self, stop_words: bool) -> Self {
        self.stop_words = stop_words;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_features == 0 {
            return Err(ConfigError::invalid("vectorizer.max_features", "must be >= 1"));
        }
        if self.min_df == 0 {
            return Err(ConfigError::invalid("vectorizer.min_df", "must be >= 1"));
        }
        if !(self.max_df > 0.0 && self.max_df <= 1.0) {
            return Err(ConfigError::invalid(
                "vectorizer.max_df",
                format!("must be in (0, 1], got {}", self.max_df),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    pub noise_confidence: f64,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            noise_confidence: NOISE_CONFIDENCE,
        }
    }
}

impl ConfidenceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.noise_confidence) {
            return Err(ConfigError::invalid("confidence.noise_confidence", "must be in [0, 1]"));
        }
        Ok(())
    }
}

/// Target box for the 2D layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Seed for the random starting layouts
    pub seed: u64,
    /// Number of random starts; the lowest-stress layout wins
    pub n_init: usize,
    /// Iteration cap per start
    pub max_iter: usize,
    /// Stop once relative stress improves by less than this
    pub tolerance: f64,
    pub canvas: Canvas,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            n_init: 4,
            max_iter: 300,
            tolerance: 1e-3,
            canvas: Canvas::default(),
        }
    }
}

impl EmbeddingConfig {
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_init == 0 {
            return Err(ConfigError::invalid("embedding.n_init", "must be >= 1"));
        }
        if self.max_iter == 0 {
            return Err(ConfigError::invalid("embedding.max_iter", "must be >= 1"));
        }
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(ConfigError::invalid("embedding.tolerance", "must be finite and >= 0"));
        }
        let Canvas { width, height } = self.canvas;
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(ConfigError::invalid("embedding.canvas", "dimensions must be finite and > 0"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Edges require similarity strictly above this
    pub edge_threshold: f64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            edge_threshold: DEFAULT_EDGE_THRESHOLD,
        }
    }
}

impl GraphConfig {
    #[must_use]
    pub fn with_edge_threshold(mut self, edge_threshold: f64) -> Self {
        self.edge_threshold = edge_threshold;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.edge_threshold) {
            return Err(ConfigError::invalid("graph.edge_threshold", "must be in [0, 1)"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Terms listed per cluster report
    pub top_terms: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self { top_terms: 5 }
    }
}

impl PipelineConfig {
    /// Check every section; the first offending field is reported.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.vectorizer.validate()?;
        self.cluster.validate()?;
        self.confidence.validate()?;
        self.embedding.validate()?;
        self.graph.validate()?;
        Ok(())
    }

    /// Parse a JSON config; absent fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Load(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Load(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cluster.eps, crate::cluster::DEFAULT_EPS);
        assert_eq!(config.cluster.min_samples, crate::cluster::DEFAULT_MIN_SAMPLES);
        assert_eq!(config.graph.edge_threshold, 0.3);
        assert_eq!(config.confidence.noise_confidence, 0.1);
        assert_eq!(config.embedding.canvas, Canvas { width: 800.0, height: 600.0 });
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = PipelineConfig::from_json_str(
            r#"{"cluster": {"eps": 0.5}, "embedding": {"seed": 7}}"#,
        )
        .unwrap();
        assert_eq!(config.cluster.eps, 0.5);
        assert_eq!(config.cluster.min_samples, 2);
        assert_eq!(config.embedding.seed, 7);
        assert_eq!(config.embedding.max_iter, 300);
        assert_eq!(config.vectorizer, VectorizerConfig::default());
    }

    #[test]
    fn rejects_out_of_range_values() {
        let err = PipelineConfig::from_json_str(r#"{"vectorizer": {"max_df": 1.5}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "vectorizer.max_df", .. }));

        let mut config = PipelineConfig::default();
        config.graph = config.graph.with_edge_threshold(1.0);
        assert!(config.validate().is_err());

        let mut config = PipelineConfig::default();
        config.embedding.canvas.width = 0.0;
        assert!(config.validate().is_err());

        assert!(matches!(
            PipelineConfig::from_json_str("not json").unwrap_err(),
            ConfigError::Load(_)
        ));
    }
}
