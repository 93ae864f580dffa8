//! Renderable node/link graph, the only artifact handed to callers.

use serde::{Deserialize, Serialize};

use crate::cluster::ClusterLabels;
use crate::confidence::ConfidenceScores;
use crate::embed::Coordinate;
use crate::extract::Documents;
use crate::similarity::SimilarityMatrix;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Decimal document index
    pub id: String,
    pub title: String,
    pub url: String,
    pub keyword: String,
    pub x: f64,
    pub y: f64,
    pub cluster: i32,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub links: Vec<Edge>,
}

impl Graph {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// Everything the builder joins by document index.
#[derive(Debug, Clone, Copy)]
pub struct GraphInputs<'a> {
    pub documents: &'a Documents,
    pub similarity: &'a SimilarityMatrix,
    pub labels: &'a ClusterLabels,
    pub confidence: &'a ConfidenceScores,
    pub coordinates: &'a [Coordinate],
}

#[derive(Debug, Clone, Copy)]
pub struct GraphBuilder {
    edge_threshold: f64,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_EDGE_THRESHOLD)
    }
}

impl GraphBuilder {
    pub fn new(edge_threshold: f64) -> Self {
        Self { edge_threshold }
    }

    /// One node per document; one edge per same-cluster pair whose
    /// similarity is strictly above the threshold, ordered by (source, target).
    ///
    /// The similarity matrix and the labels must cover exactly the given
    /// documents. Debug builds assert this.
    pub fn build(&self, inputs: GraphInputs<'_>) -> Graph {
        let GraphInputs {
            documents,
            similarity,
            labels,
            confidence,
            coordinates,
        } = inputs;
        debug_assert_eq!(similarity.len(), documents.len(), "similarity matrix size");
        debug_assert_eq!(labels.len(), documents.len(), "label count");

        let nodes = documents
            .iter()
            .enumerate()
            .map(|(i, doc)| {
                let at = coordinates.get(i).copied().unwrap_or_default();
                Node {
                    id: i.to_string(),
                    title: doc.title.clone(),
                    url: doc.url.clone(),
                    keyword: doc.keyword.clone(),
                    x: at.x,
                    y: at.y,
                    cluster: labels.get(i).unwrap_or(crate::cluster::NOISE),
                    confidence: confidence.get(i).unwrap_or_default(),
                }
            })
            .collect::<Vec<_>>();

        let n = nodes.len();
        let mut links = Vec::new();
        for i in 0..n {
            for j in i + 1..n {
                if !labels.same_cluster(i, j) {
                    continue;
                }
                let value = similarity.get(i, j);
                if value > self.edge_threshold {
                    links.push(Edge {
                        source: i.to_string(),
                        target: j.to_string(),
                        value,
                    });
                }
            }
        }
        Graph { nodes, links }
    }
}
