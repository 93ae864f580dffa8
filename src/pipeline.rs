//! One-shot orchestration of every stage, from search batches to a graph.
//!
//! A [`Pipeline`] holds only configuration and an optional log sink. Every
//! call rebuilds the vocabulary, matrices, clusters and layout from the
//! batches it is given, so concurrent calls on a shared pipeline are safe.

use tracing::{debug, error, info, info_span, Dispatch};

use crate::cluster::{ClusterLabels, Dbscan};
use crate::config::PipelineConfig;
use crate::confidence::{ConfidenceScorer, ConfidenceScores};
use crate::embed::{Embedding, PlanarEmbedder};
use crate::error::PipelineError;
use crate::extract::Documents;
use crate::graph::{Graph, GraphBuilder, GraphInputs};
use crate::model::SearchResultBatch;
use crate::similarity::SimilarityMatrix;
use crate::summary::{Analysis, ClusterSummary};
use crate::vectorizer::{TFIDFVectorizer, TfIdfMatrix};

#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
    dispatch: Option<Dispatch>,
}

/// Intermediate results of one run, all indexed by document.
struct Stages {
    documents: Documents,
    matrix: TfIdfMatrix,
    labels: ClusterLabels,
    confidence: ConfidenceScores,
    embedding: Embedding,
    graph: Graph,
}

impl Pipeline {
    /// Log through whatever subscriber is current at call time.
    pub fn new(config: PipelineConfig) -> Self {
        Self { config, dispatch: None }
    }

    /// Log every run through `dispatch` instead of the ambient subscriber.
    pub fn with_dispatch(config: PipelineConfig, dispatch: Dispatch) -> Self {
        Self {
            config,
            dispatch: Some(dispatch),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Cluster the batches into a renderable graph.
    ///
    /// No usable documents is not an error and yields [`Graph::empty`].
    /// Failures are logged once here and returned; no partial graph escapes.
    pub fn run(&self, batches: &[SearchResultBatch]) -> Result<Graph, PipelineError> {
        self.scoped(|| Ok(self.execute(batches)?.map(|s| s.graph).unwrap_or_default()))
    }

    /// Like [`Pipeline::run`], plus a per-cluster summary.
    pub fn analyze(&self, batches: &[SearchResultBatch]) -> Result<Analysis, PipelineError> {
        self.scoped(|| {
            let Some(stages) = self.execute(batches)? else {
                return Ok(Analysis::default());
            };
            let summary = ClusterSummary::build(
                &stages.documents,
                &stages.matrix,
                &stages.labels,
                &stages.confidence,
                stages.embedding.stress,
                self.config.summary.top_terms,
            );
            Ok(Analysis {
                graph: stages.graph,
                summary,
            })
        })
    }

    fn scoped<T>(&self, f: impl FnOnce() -> Result<T, PipelineError>) -> Result<T, PipelineError> {
        let logged = || {
            let result = f();
            if let Err(e) = &result {
                error!(error = %e, "cluster pipeline failed");
            }
            result
        };
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, logged),
            None => logged(),
        }
    }

    fn execute(&self, batches: &[SearchResultBatch]) -> Result<Option<Stages>, PipelineError> {
        self.config.validate()?;
        SearchResultBatch::validate_all(batches)?;

        let documents = Documents::extract(batches);
        let span = info_span!("cluster_pipeline", documents = documents.len());
        let _enter = span.enter();
        debug!(batches = batches.len(), dropped = documents.dropped(), "documents extracted");
        if documents.is_empty() {
            info!("no usable documents, returning empty graph");
            return Ok(None);
        }

        let matrix = TFIDFVectorizer::new(self.config.vectorizer.clone()).fit_transform(&documents.texts())?;
        let similarity = SimilarityMatrix::from_vectors(&matrix.rows);
        let distances = similarity.to_distance();

        let labels = Dbscan::new(self.config.cluster).fit(&distances)?;
        let confidence = ConfidenceScorer::new(self.config.confidence.clone()).score(&similarity, &labels);
        let embedding = PlanarEmbedder::new(self.config.embedding.clone()).embed(&distances);

        let graph = GraphBuilder::new(self.config.graph.edge_threshold).build(GraphInputs {
            documents: &documents,
            similarity: &similarity,
            labels: &labels,
            confidence: &confidence,
            coordinates: &embedding.coordinates,
        });
        info!(
            nodes = graph.nodes.len(),
            links = graph.links.len(),
            clusters = labels.n_clusters(),
            noise = labels.noise_count(),
            "cluster graph built"
        );

        Ok(Some(Stages {
            documents,
            matrix,
            labels,
            confidence,
            embedding,
            graph,
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::error::{InputError, VectorizationError};
    use crate::model::ResultItem;

    fn batch(items: &[(&str, &str)]) -> Vec<SearchResultBatch> {
        vec![SearchResultBatch::new(
            "climate",
            chrono::Utc::now(),
            items
                .iter()
                .enumerate()
                .map(|(i, (t, d))| ResultItem::new(*t, format!("https://r/{i}"), *d))
                .collect(),
        )]
    }

    #[test]
    fn empty_input_is_an_empty_graph() {
        let pipeline = Pipeline::default();
        assert_eq!(pipeline.run(&[]).unwrap(), Graph::empty());
        assert_eq!(pipeline.run(&batch(&[("", "  ")])).unwrap(), Graph::empty());
        assert_eq!(pipeline.analyze(&[]).unwrap(), Analysis::default());
    }

    #[test]
    fn stop_word_only_input_fails_with_vectorization_error() {
        let err = Pipeline::default().run(&batch(&[("the", "and of"), ("it", "is")])).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Vectorization(VectorizationError::EmptyVocabulary { documents: 2 })
        ));
        assert_eq!(err.user_message(), "The search results could not be analyzed.");
    }

    #[test]
    fn invalid_config_and_input_are_rejected() {
        let mut config = PipelineConfig::default();
        config.cluster.min_samples = 0;
        let err = Pipeline::new(config).run(&batch(&[("a title", "")])).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidConfig(_)));

        let mut batches = batch(&[("title", "desc")]);
        batches[0].keyword.clear();
        let err = Pipeline::default().run(&batches).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidInput(InputError::EmptyKeyword { index: 0 })));
    }

    #[test]
    fn analyze_summarizes_the_same_graph() {
        let batches = batch(&[
            ("carbon offsets explained", "carbon offsets market"),
            ("carbon offsets guide", "carbon offsets market"),
            ("jazz festival", "summer music lineup"),
        ]);
        let pipeline = Pipeline::default();
        let analysis = pipeline.analyze(&batches).unwrap();
        assert_eq!(analysis.graph, pipeline.run(&batches).unwrap());
        assert_eq!(analysis.summary.documents, 3);
        assert_eq!(analysis.summary.clusters.len(), 1);
        assert_eq!(analysis.summary.clusters[0].size, 2);
        assert_eq!(analysis.summary.noise, 1);
        assert_eq!(analysis.summary.clusters[0].keywords, vec!["climate"]);
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn injected_dispatch_receives_run_logs() {
        let sink = Captured::default();
        let writer = sink.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let pipeline = Pipeline::with_dispatch(PipelineConfig::default(), Dispatch::new(subscriber));

        pipeline.run(&batch(&[("solar panels", "cheap solar")])).unwrap();
        let _ = pipeline.run(&batch(&[("the", "of")]));

        let logs = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("cluster graph built"));
        assert!(logs.contains("cluster pipeline failed"));
    }
}
