//! Flatten keyword-tagged batches into a document list.

use serde::Serialize;

use crate::model::SearchResultBatch;

/// One usable search hit. Its position in [`Documents`] is the join key for
/// every downstream array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// `title + " " + description`, both trimmed
    pub text: String,
    pub title: String,
    pub url: String,
    pub keyword: String,
}

/// Extracted documents in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Documents {
    docs: Vec<Document>,
    dropped: usize,
}

impl Documents {
    /// Walk every batch in order and keep each item with non-blank text.
    pub fn extract(batches: &[SearchResultBatch]) -> Self {
        let mut docs = Vec::new();
        let mut dropped = 0usize;
        for batch in batches {
            for item in &batch.results {
                let title = item.title.trim();
                let description = item.description.trim();
                let text = format!("{title} {description}");
                if text.trim().is_empty() {
                    dropped += 1;
                    continue;
                }
                docs.push(Document {
                    text,
                    title: title.to_string(),
                    url: item.url.clone(),
                    keyword: batch.keyword.clone(),
                });
            }
        }
        Documents { docs, dropped }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Items skipped because both title and description were blank.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn as_slice(&self) -> &[Document] {
        &self.docs
    }

    pub fn get(&self, index: usize) -> Option<&Document> {
        self.docs.get(index)
    }

    pub fn texts(&self) -> Vec<&str> {
        self.docs.iter().map(|d| d.text.as_str()).collect()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.docs.iter().map(|d| d.title.as_str()).collect()
    }

    pub fn urls(&self) -> Vec<&str> {
        self.docs.iter().map(|d| d.url.as_str()).collect()
    }

    pub fn keywords(&self) -> Vec<&str> {
        self.docs.iter().map(|d| d.keyword.as_str()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.docs.iter()
    }
}

impl<'a> IntoIterator for &'a Documents {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.docs.iter()
    }
}
