use indexmap::IndexMap;

use crate::vectorizer::term::TermFrequency;

/// Per-term statistics across the corpus
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TermStats {
    /// number of documents containing the term
    pub doc_freq: u64,
    /// occurrences summed over all documents
    pub total: u64,
}

/// keep document count and term statistics for one run
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    doc_num: u64,
    term_stats: IndexMap<Box<str>, TermStats>,
}

impl Corpus {
    /// Create a new instance
    pub fn new() -> Self {
        Self {
            doc_num: 0,
            term_stats: IndexMap::new(),
        }
    }

    /// Add a document's terms to the corpus
    pub fn add_doc(&mut self, freq: &TermFrequency) {
        self.doc_num += 1;
        for (term, count) in freq.iter() {
            match self.term_stats.get_mut(term) {
                Some(stats) => {
                    stats.doc_freq += 1;
                    stats.total += count;
                }
                None => {
                    self.term_stats.insert(term.into(), TermStats { doc_freq: 1, total: count });
                }
            }
        }
    }

    /// Get the number of documents in the corpus
    #[inline]
    pub fn get_doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Document frequency of `term`, 0 when unseen
    #[inline]
    pub fn doc_freq(&self, term: &str) -> u64 {
        self.term_stats.get(term).map_or(0, |s| s.doc_freq)
    }

    /// Get the current vocabulary size (number of unique terms)
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.term_stats.len()
    }

    /// Iterate all terms with their statistics, first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, TermStats)> {
        self.term_stats.iter().map(|(t, s)| (t.as_ref(), *s))
    }
}

impl<'a> FromIterator<&'a TermFrequency> for Corpus {
    fn from_iter<I: IntoIterator<Item = &'a TermFrequency>>(iter: I) -> Self {
        let mut corpus = Corpus::new();
        for freq in iter {
            corpus.add_doc(freq);
        }
        corpus
    }
}
