use std::cmp::Ordering;

use super::SparseVec;

impl SparseVec {
    /// dot product
    /// d(a, b) = Σ(a_i * b_i)
    ///
    /// Walks both index lists in lockstep, so cost is O(nnz_a + nnz_b).
    pub fn dot(&self, other: &Self) -> f64 {
        debug_assert_eq!(
            self.len(),
            other.len(),
            "Vectors must be of the same length to compute dot product."
        );
        let mut a_it = self.iter();
        let mut b_it = other.iter();
        let mut a_next = a_it.next();
        let mut b_next = b_it.next();
        let mut dot = 0_f64;
        while let (Some((ia, va)), Some((ib, vb))) = (a_next, b_next) {
            match ia.cmp(&ib) {
                Ordering::Equal => {
                    dot += va * vb;
                    a_next = a_it.next();
                    b_next = b_it.next();
                }
                Ordering::Less => a_next = a_it.next(),
                Ordering::Greater => b_next = b_it.next(),
            }
        }
        dot
    }

    /// ||a||^2 = Σ(a_i^2)
    #[inline]
    pub fn norm_sq(&self) -> f64 {
        self.iter().map(|(_, v)| v * v).sum()
    }

    /// cosine similarity
    /// cos(θ) = Σ(a_i * b_i) / sqrt(||a||^2 * ||b||^2)
    ///
    /// Returns 0.0 when either side is the zero vector. Identical vectors
    /// give exactly 1.0.
    pub fn cosine_similarity(&self, other: &Self) -> f64 {
        let norm_a = self.norm_sq();
        let norm_b = other.norm_sq();
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }
        self.dot(other) / (norm_a * norm_b).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sv(len: usize, pairs: &[(u32, f64)]) -> SparseVec {
        let (i, v): (Vec<u32>, Vec<f64>) = pairs.iter().copied().unzip();
        SparseVec::from_unsorted(len, i, v)
    }

    #[test]
    fn dot_skips_disjoint_indices() {
        let a = sv(6, &[(0, 1.0), (2, 2.0), (5, 3.0)]);
        let b = sv(6, &[(1, 4.0), (2, 0.5), (5, 2.0)]);
        assert!((a.dot(&b) - 7.0).abs() < 1e-12);
    }

    #[test]
    fn cosine_of_identical_vectors_is_exactly_one() {
        let a = sv(4, &[(0, 0.3), (1, 1.7), (3, 0.11)]);
        assert_eq!(a.cosine_similarity(&a.clone()), 1.0);
    }

    #[test]
    fn cosine_of_disjoint_or_zero_vectors_is_zero() {
        let a = sv(4, &[(0, 1.0)]);
        let b = sv(4, &[(3, 1.0)]);
        assert_eq!(a.cosine_similarity(&b), 0.0);
        assert_eq!(a.cosine_similarity(&SparseVec::new(4)), 0.0);
    }

    #[test]
    fn cosine_partial_overlap() {
        let a = sv(3, &[(0, 1.0), (1, 1.0)]);
        let b = sv(3, &[(1, 1.0), (2, 1.0)]);
        assert!((a.cosine_similarity(&b) - 0.5).abs() < 1e-12);
    }
}
