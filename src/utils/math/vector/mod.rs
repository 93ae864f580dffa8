pub mod math;

/// SparseVec is a sparse vector that stores only non-zero elements.
/// It holds `inds` and `vals` side by side:
/// `inds` keeps the element positions, `vals` keeps the element values.
///
/// Elements are guaranteed to be sorted by ascending index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVec {
    inds: Vec<u32>,
    vals: Vec<f64>,
    len: usize,
}

impl SparseVec {
    #[inline]
    pub fn new(len: usize) -> Self {
        SparseVec {
            inds: Vec::new(),
            vals: Vec::new(),
            len,
        }
    }

    /// Build from unordered `(index, value)` columns.
    /// Zeros are dropped; duplicate indices are summed.
    ///
    /// # Arguments
    /// * `len` - logical dimension
    /// * `inds` - element positions, each `< len`
    /// * `vals` - element values, same length as `inds`
    pub fn from_unsorted(len: usize, inds: Vec<u32>, vals: Vec<f64>) -> Self {
        debug_assert!(inds.iter().all(|&i| (i as usize) < len));
        debug_assert_eq!(inds.len(), vals.len());
        let mut pairs: Vec<(u32, f64)> = inds.into_iter().zip(vals).collect();
        // stable, so duplicates are summed in input order
        pairs.sort_by_key(|&(i, _)| i);

        let mut out_i: Vec<u32> = Vec::with_capacity(pairs.len());
        let mut out_v: Vec<f64> = Vec::with_capacity(pairs.len());
        for (i, v) in pairs {
            match out_i.last() {
                Some(&last) if last == i => {
                    if let Some(acc) = out_v.last_mut() {
                        *acc += v;
                    }
                }
                _ => {
                    out_i.push(i);
                    out_v.push(v);
                }
            }
        }
        let mut sv = SparseVec {
            inds: out_i,
            vals: out_v,
            len,
        };
        sv.drop_zeros();
        sv
    }

    fn drop_zeros(&mut self) {
        let mut keep = 0;
        for k in 0..self.vals.len() {
            if self.vals[k] != 0.0 {
                self.inds[keep] = self.inds[k];
                self.vals[keep] = self.vals[k];
                keep += 1;
            }
        }
        self.inds.truncate(keep);
        self.vals.truncate(keep);
    }

    /// logical dimension
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// number of stored (non-zero) elements
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    /// `(index, value)` in ascending index order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.inds.iter().zip(&self.vals).map(|(&i, &v)| (i as usize, v))
    }

    /// value at `index`, 0 when not stored
    pub fn get(&self, index: usize) -> f64 {
        match self.inds.binary_search(&(index as u32)) {
            Ok(pos) => self.vals[pos],
            Err(_) => 0.0,
        }
    }

    /// Element-wise product with a dense weight vector
    pub fn hadamard_dense(&self, weights: &[f64]) -> Self {
        let mut out = self.clone();
        for (i, v) in out.inds.iter().zip(out.vals.iter_mut()) {
            *v *= weights.get(*i as usize).copied().unwrap_or(0.0);
        }
        out.drop_zeros();
        out
    }

    /// Scale to unit L2 norm; the zero vector stays zero
    pub fn l2_normalized(&self) -> Self {
        let norm = self.norm_sq().sqrt();
        let mut out = self.clone();
        if norm > 0.0 {
            out.vals.iter_mut().for_each(|v| *v /= norm);
        }
        out
    }

    /// Add this vector into a dense accumulator of the same dimension
    pub fn add_into(&self, dense: &mut [f64]) {
        for (i, v) in self.iter() {
            if let Some(slot) = dense.get_mut(i) {
                *slot += v;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_unsorted_sorts_merges_and_drops_zeros() {
        let sv = SparseVec::from_unsorted(10, vec![7, 2, 5, 2, 9], vec![1.0, 2.0, 0.0, 3.0, -1.0]);
        assert_eq!(sv.iter().collect::<Vec<_>>(), vec![(2, 5.0), (7, 1.0), (9, -1.0)]);
        assert_eq!(sv.nnz(), 3);
        assert_eq!(sv.len(), 10);
        assert_eq!(sv.get(7), 1.0);
        assert_eq!(sv.get(3), 0.0);
    }

    #[test]
    fn from_unsorted_handles_reversed_and_cancelling_columns() {
        let inds: Vec<u32> = (0..64).rev().chain([3, 3]).collect();
        let mut vals: Vec<f64> = (0..64).rev().map(|i| i as f64 + 1.0).collect();
        vals.extend([-4.0, 0.5]);
        let sv = SparseVec::from_unsorted(64, inds, vals);

        let got: Vec<(usize, f64)> = sv.iter().collect();
        assert_eq!(got.len(), 64);
        assert!(got.windows(2).all(|w| w[0].0 < w[1].0));
        // 4.0 - 4.0 + 0.5
        assert_eq!(sv.get(3), 0.5);
        assert_eq!(sv.get(63), 64.0);

        let cancelled = SparseVec::from_unsorted(4, vec![1, 1], vec![2.0, -2.0]);
        assert_eq!(cancelled.nnz(), 0);
        assert_eq!(SparseVec::from_unsorted(4, vec![], vec![]).nnz(), 0);
    }

    #[test]
    fn hadamard_and_normalize() {
        let sv = SparseVec::from_unsorted(3, vec![0, 2], vec![2.0, 1.0]);
        let weighted = sv.hadamard_dense(&[1.5, 9.0, 0.0]);
        assert_eq!(weighted.iter().collect::<Vec<_>>(), vec![(0, 3.0)]);

        let unit = SparseVec::from_unsorted(2, vec![0, 1], vec![3.0, 4.0]).l2_normalized();
        assert_eq!(unit.iter().collect::<Vec<_>>(), vec![(0, 0.6), (1, 0.8)]);
        assert_eq!(SparseVec::new(4).l2_normalized().nnz(), 0);
    }

    #[test]
    fn add_into_accumulates() {
        let mut dense = vec![0.0; 3];
        SparseVec::from_unsorted(3, vec![1], vec![0.5]).add_into(&mut dense);
        SparseVec::from_unsorted(3, vec![1, 2], vec![0.25, 1.0]).add_into(&mut dense);
        assert_eq!(dense, vec![0.0, 0.75, 1.0]);
    }
}
