//! Error types for the clustering pipeline.
//!
//! Each stage owns one error enum. The orchestrator folds them into
//! [`PipelineError`] through `#[from]` conversions so every stage can be
//! composed with `?`.

use thiserror::Error;

/// Rejected input at the batch boundary.
#[derive(Debug, Error)]
pub enum InputError {
    /// The payload is not valid JSON for a sequence of batches.
    #[error("malformed search result payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A batch carries an empty keyword.
    #[error("batch {index} has an empty keyword")]
    EmptyKeyword {
        /// Position of the batch in the input sequence
        index: usize,
    },
}

/// Failure while building the term-weight space.
#[derive(Debug, Error, PartialEq)]
pub enum VectorizationError {
    /// Every term was removed by stop-word or document-frequency filtering.
    #[error("empty vocabulary after filtering {documents} documents; documents may contain only stop words")]
    EmptyVocabulary {
        /// Number of documents that were vectorized
        documents: usize,
    },
}

/// Malformed distance input handed to the cluster assigner.
#[derive(Debug, Error, PartialEq)]
pub enum ClusteringError {
    /// The distance matrix is not N×N.
    #[error("distance matrix must be square: {rows} rows, row {row} has {cols} columns")]
    NotSquare {
        rows: usize,
        row: usize,
        cols: usize,
    },

    /// A distance is NaN or infinite.
    #[error("non-finite distance at ({row}, {col})")]
    NonFinite { row: usize, col: usize },

    /// A distance is negative.
    #[error("negative distance {value} at ({row}, {col})")]
    Negative { row: usize, col: usize, value: f64 },

    /// `d(i, j)` and `d(j, i)` disagree.
    #[error("asymmetric distances at ({row}, {col})")]
    Asymmetric { row: usize, col: usize },

    /// The clustering parameters are unusable.
    #[error(transparent)]
    Params(#[from] ConfigError),
}

/// Out-of-range configuration value.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue {
        /// Dotted path of the offending field
        field: &'static str,
        reason: String,
    },

    /// The config file could not be read or parsed.
    #[error("could not load config: {0}")]
    Load(String),
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

/// Top-level error returned by [`crate::Pipeline::run`].
///
/// An empty batch is not an error; it produces an empty graph.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    InvalidInput(#[from] InputError),

    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),

    #[error("vectorization failed: {0}")]
    Vectorization(#[from] VectorizationError),

    #[error("clustering failed: {0}")]
    Clustering(#[from] ClusteringError),
}

impl PipelineError {
    /// Neutral message suitable for end users; never includes internals.
    pub fn user_message(&self) -> &'static str {
        match self {
            PipelineError::InvalidInput(_) => "The search results could not be read.",
            PipelineError::InvalidConfig(_) => "The clustering configuration is invalid.",
            PipelineError::Vectorization(_) | PipelineError::Clustering(_) => {
                "The search results could not be analyzed."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_errors_convert_into_pipeline_error() {
        let err: PipelineError = VectorizationError::EmptyVocabulary { documents: 3 }.into();
        assert!(matches!(err, PipelineError::Vectorization(_)));
        assert_eq!(err.user_message(), "The search results could not be analyzed.");

        let err: PipelineError = ClusteringError::NonFinite { row: 0, col: 1 }.into();
        assert!(err.to_string().contains("(0, 1)"));
    }

    #[test]
    fn config_error_names_the_field() {
        let err = ConfigError::invalid("cluster.eps", "must be > 0");
        assert_eq!(err.to_string(), "invalid value for `cluster.eps`: must be > 0");
    }
}
