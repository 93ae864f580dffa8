//! Per-cluster report: sizes, certainty, source keywords and dominant terms.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::cluster::ClusterLabels;
use crate::confidence::ConfidenceScores;
use crate::extract::Documents;
use crate::graph::Graph;
use crate::vectorizer::TfIdfMatrix;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterReport {
    pub cluster: i32,
    pub size: usize,
    pub mean_confidence: f64,
    /// Distinct keywords of the member documents, sorted
    pub keywords: Vec<String>,
    /// Highest summed TF-IDF weight first, ties alphabetical
    pub top_terms: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClusterSummary {
    /// Ascending by cluster id
    pub clusters: Vec<ClusterReport>,
    pub noise: usize,
    pub documents: usize,
    pub vocabulary: usize,
    /// Raw stress of the chosen layout
    pub stress: f64,
}

/// Graph plus its summary, returned by [`crate::Pipeline::analyze`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Analysis {
    pub graph: Graph,
    pub summary: ClusterSummary,
}

impl ClusterSummary {
    pub fn build(
        documents: &Documents,
        matrix: &TfIdfMatrix,
        labels: &ClusterLabels,
        confidence: &ConfidenceScores,
        stress: f64,
        top_terms: usize,
    ) -> Self {
        let clusters = labels
            .sizes()
            .into_iter()
            .map(|(cluster, size)| {
                let members = labels.members(cluster);
                let mean_confidence = members
                    .iter()
                    .filter_map(|&m| confidence.get(m))
                    .sum::<f64>()
                    / size as f64;
                let keywords: BTreeSet<&str> = members
                    .iter()
                    .filter_map(|&m| documents.get(m))
                    .map(|d| d.keyword.as_str())
                    .collect();
                ClusterReport {
                    cluster,
                    size,
                    mean_confidence,
                    keywords: keywords.into_iter().map(str::to_string).collect(),
                    top_terms: dominant_terms(matrix, &members, top_terms),
                }
            })
            .collect();

        Self {
            clusters,
            noise: labels.noise_count(),
            documents: documents.len(),
            vocabulary: matrix.vocabulary.len(),
            stress,
        }
    }
}

fn dominant_terms(matrix: &TfIdfMatrix, members: &[usize], k: usize) -> Vec<String> {
    let mut weights = vec![0.0; matrix.vocabulary.len()];
    for row in members.iter().filter_map(|&m| matrix.row(m)) {
        row.add_into(&mut weights);
    }
    let mut ranked: Vec<(usize, f64)> = weights
        .into_iter()
        .enumerate()
        .filter(|&(_, w)| w > 0.0)
        .collect();
    // columns are alphabetical, so the index breaks ties
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
        .into_iter()
        .take(k)
        .filter_map(|(col, _)| matrix.vocabulary.term(col).map(str::to_string))
        .collect()
}
