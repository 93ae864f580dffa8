use crate::{
    utils::math::vector::SparseVec,
    vectorizer::{corpus::Corpus, term::TermFrequency, Vocabulary},
};

pub trait TFIDFEngine {
    /// Build the IDF vector
    /// # Arguments
    /// * `corpus` - corpus statistics
    /// * `vocabulary` - selected term dimensions
    /// # Returns
    /// * `Vec<f64>` - one weight per vocabulary column
    fn idf_vec(corpus: &Corpus, vocabulary: &Vocabulary) -> Vec<f64>;
    /// Build the TF vector for one document over the vocabulary
    /// Terms outside the vocabulary are ignored
    fn tf_vec(freq: &TermFrequency, vocabulary: &Vocabulary) -> SparseVec;
}

/// Default TF-IDF engine
/// raw counts for TF, smoothed IDF `ln((1 + n) / (1 + df)) + 1`
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl DefaultTFIDFEngine {
    #[inline]
    pub fn idf_calc(doc_num: u64, doc_freq: u64) -> f64 {
        ((1.0 + doc_num as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
    }
}

impl TFIDFEngine for DefaultTFIDFEngine {
    fn idf_vec(corpus: &Corpus, vocabulary: &Vocabulary) -> Vec<f64> {
        let doc_num = corpus.get_doc_num();
        vocabulary
            .terms()
            .map(|term| Self::idf_calc(doc_num, corpus.doc_freq(term)))
            .collect()
    }

    fn tf_vec(freq: &TermFrequency, vocabulary: &Vocabulary) -> SparseVec {
        let mut inds = Vec::with_capacity(freq.term_num());
        let mut vals = Vec::with_capacity(freq.term_num());
        for (term, count) in freq.iter() {
            if let Some(col) = vocabulary.column(term) {
                inds.push(col as u32);
                vals.push(count as f64);
            }
        }
        SparseVec::from_unsorted(vocabulary.len(), inds, vals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idf_is_one_for_universal_terms() {
        assert!((DefaultTFIDFEngine::idf_calc(4, 4) - 1.0).abs() < 1e-12);
        assert!((DefaultTFIDFEngine::idf_calc(4, 1) - ((5.0f64 / 2.0).ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn tf_vec_ignores_unknown_terms() {
        let vocabulary = Vocabulary::from_sorted(vec!["alpha".into(), "beta".into()]);
        let mut freq = TermFrequency::new();
        freq.add_terms(&["beta", "gamma", "beta", "alpha"]);
        let tf = DefaultTFIDFEngine::tf_vec(&freq, &vocabulary);
        assert_eq!(tf.len(), 2);
        assert_eq!(tf.iter().collect::<Vec<_>>(), vec![(0, 1.0), (1, 2.0)]);
    }
}
