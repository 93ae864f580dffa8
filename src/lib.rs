//! This crate groups keyword search results into topic clusters and emits a
//! renderable similarity graph.

pub mod cluster;
pub mod config;
pub mod confidence;
pub mod embed;
pub mod error;
pub mod extract;
pub mod graph;
pub mod model;
pub mod pipeline;
pub mod similarity;
pub mod summary;
pub mod utils;
pub mod vectorizer;

/// Cluster Pipeline
/// The top-level struct of this crate. It turns a sequence of search result
/// batches into a `Graph` of documents and same-cluster links.
///
/// Each run, in order:
/// - Extracts one document per non-empty result item
/// - Builds a run-scoped TF-IDF vocabulary and weights every document
/// - Computes pairwise cosine similarity and distance
/// - Clusters by density over the precomputed distances
/// - Scores each document's confidence in its cluster
/// - Lays the documents out on a fixed canvas with seeded metric MDS
/// - Links same-cluster pairs above the edge threshold
///
/// The pipeline keeps no state between runs. `Pipeline::with_dispatch` routes
/// its logs to a caller-provided `tracing::Dispatch`.
///
/// # Errors
/// An empty input is not an error; it yields an empty graph. Malformed input,
/// out-of-range configuration, an empty vocabulary or malformed distances
/// return `PipelineError`.
pub use pipeline::Pipeline;

/// Pipeline Configuration
/// One section per stage, every field with a documented default.
/// Deserializable from JSON; absent fields keep their defaults.
pub use config::{Canvas, ConfidenceConfig, EmbeddingConfig, GraphConfig, PipelineConfig, SummaryConfig, VectorizerConfig};

/// Search Result Batch
/// The input boundary type: `{keyword, timestamp, results: [{title, url, description}]}`.
/// Parsed and validated before any vector or matrix code runs.
pub use model::{ResultItem, SearchResultBatch};

/// Graph
/// The output artifact, `{nodes, links}`, serializable with serde.
/// Node ids are the decimal document index; links carry raw similarity.
pub use graph::{Edge, Graph, Node};

/// Cluster Summary
/// Returned by `Pipeline::analyze` next to the graph: per-cluster size,
/// mean confidence, source keywords and dominant terms.
pub use summary::{Analysis, ClusterReport, ClusterSummary};

/// TF-IDF Vectorizer
/// Fits a vocabulary over one document set and returns L2-normalized rows.
///
/// `TFIDFVectorizer<E>` is generic over the weighting engine `E`.
/// `DefaultTFIDFEngine` weights raw counts by smoothed IDF.
pub use vectorizer::{tfidf::{DefaultTFIDFEngine, TFIDFEngine}, TFIDFVectorizer, TfIdfMatrix, Vocabulary};

/// Corpus statistics and per-document term counts used for IDF and TF.
pub use vectorizer::{corpus::Corpus, term::TermFrequency};

/// Density clustering over precomputed distances.
pub use cluster::{ClusterLabels, ClusterParams, Dbscan, NOISE};

pub use similarity::{DistanceMatrix, SimilarityMatrix};
pub use confidence::{ConfidenceScorer, ConfidenceScores};
pub use embed::{Coordinate, Embedding, PlanarEmbedder};
pub use extract::{Document, Documents};

/// Error Types
/// One enum per stage, folded into `PipelineError` at the boundary.
pub use error::{ClusteringError, ConfigError, InputError, PipelineError, VectorizationError};
