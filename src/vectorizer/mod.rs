pub mod corpus;
pub mod stop_words;
pub mod term;
pub mod tfidf;

use std::marker::PhantomData;

use indexmap::IndexSet;
use rayon::prelude::*;
use tracing::debug;

use crate::config::VectorizerConfig;
use crate::error::VectorizationError;
use crate::utils::math::vector::SparseVec;
use crate::vectorizer::{
    corpus::Corpus,
    term::TermFrequency,
    tfidf::{DefaultTFIDFEngine, TFIDFEngine},
};

/// Selected term dimensions, alphabetical. A term's position is its column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    terms: IndexSet<Box<str>>,
}

impl Vocabulary {
    /// Build from terms already sorted and unique
    pub fn from_sorted(terms: Vec<String>) -> Self {
        debug_assert!(terms.windows(2).all(|w| w[0] < w[1]));
        Self {
            terms: terms.into_iter().map(String::into_boxed_str).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    #[inline]
    pub fn column(&self, term: &str) -> Option<usize> {
        self.terms.get_index_of(term)
    }

    #[inline]
    pub fn term(&self, column: usize) -> Option<&str> {
        self.terms.get_index(column).map(|t| t.as_ref())
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|t| t.as_ref())
    }
}

/// One L2-normalized TF-IDF row per document.
#[derive(Debug, Clone, PartialEq)]
pub struct TfIdfMatrix {
    pub vocabulary: Vocabulary,
    pub rows: Vec<SparseVec>,
}

impl TfIdfMatrix {
    #[inline]
    pub fn n_docs(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn row(&self, doc: usize) -> Option<&SparseVec> {
        self.rows.get(doc)
    }
}

/// TF-IDF Vectorizer
/// Fits a run-scoped vocabulary over a document set and returns its
/// term-weight matrix. Nothing is kept between calls.
///
/// `TFIDFVectorizer<E>` is generic over the weighting engine; the default
/// engine weights raw counts by smoothed IDF.
#[derive(Debug, Clone)]
pub struct TFIDFVectorizer<E = DefaultTFIDFEngine>
where
    E: TFIDFEngine,
{
    config: VectorizerConfig,
    _marker: PhantomData<E>,
}

impl TFIDFVectorizer {
    /// Vectorizer with the default engine
    pub fn new(config: VectorizerConfig) -> Self {
        Self::with_engine(config)
    }
}

impl<E> TFIDFVectorizer<E>
where
    E: TFIDFEngine,
{
    /// Vectorizer weighting with engine `E`
    pub fn with_engine(config: VectorizerConfig) -> Self {
        Self {
            config,
            _marker: PhantomData,
        }
    }

    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }

    /// Tokenize, select the vocabulary, and weight every document.
    ///
    /// # Errors
    /// `EmptyVocabulary` when filtering leaves no terms at all.
    pub fn fit_transform<T>(&self, texts: &[T]) -> Result<TfIdfMatrix, VectorizationError>
    where
        T: AsRef<str> + Sync,
    {
        let stop_words = self.config.stop_words;
        let freqs: Vec<TermFrequency> = texts
            .par_iter()
            .map(|t| TermFrequency::from_text(t.as_ref(), stop_words))
            .collect();
        let corpus: Corpus = freqs.iter().collect();

        let vocabulary = self.select_vocabulary(&corpus);
        debug!(
            documents = texts.len(),
            raw_terms = corpus.vocab_size(),
            vocabulary = vocabulary.len(),
            "vocabulary selected"
        );
        if vocabulary.is_empty() {
            return Err(VectorizationError::EmptyVocabulary { documents: texts.len() });
        }

        let idf = E::idf_vec(&corpus, &vocabulary);
        let rows = freqs
            .par_iter()
            .map(|freq| E::tf_vec(freq, &vocabulary).hadamard_dense(&idf).l2_normalized())
            .collect();
        Ok(TfIdfMatrix { vocabulary, rows })
    }

    /// min_df, then max_df, then max_features; result sorted alphabetically
    fn select_vocabulary(&self, corpus: &Corpus) -> Vocabulary {
        let max_docs = max_doc_count(self.config.max_df, corpus.get_doc_num());

        let mut kept: Vec<(&str, u64)> = corpus
            .iter()
            .filter(|(_, s)| s.doc_freq >= self.config.min_df && s.doc_freq <= max_docs)
            .map(|(t, s)| (t, s.total))
            .collect();

        if kept.len() > self.config.max_features {
            kept.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
            kept.truncate(self.config.max_features);
        }

        let mut terms: Vec<String> = kept.into_iter().map(|(t, _)| t.to_string()).collect();
        terms.sort();
        Vocabulary::from_sorted(terms)
    }
}

/// Largest document frequency a term may have and survive `max_df`.
///
/// `floor(max_df * N)`, except while `max_df * N > N - 1`: there the only
/// terms above the fraction are the ones in every document, and the bound
/// is `N` so small corpora keep their shared terms.
fn max_doc_count(max_df: f64, doc_num: u64) -> u64 {
    let scaled = max_df * doc_num as f64;
    if scaled - 1e-9 > doc_num.saturating_sub(1) as f64 {
        doc_num
    } else {
        // float noise must not pull an exact product down a whole document
        (scaled + 1e-9).floor().max(0.0) as u64
    }
}

impl Default for TFIDFVectorizer {
    fn default() -> Self {
        Self::new(VectorizerConfig::default())
    }
}
