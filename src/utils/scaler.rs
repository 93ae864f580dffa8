use num::Float;

/// Guard added to every axis range before dividing.
pub const RANGE_EPSILON: f64 = 1e-10;

/// Min-max rescale of one axis onto `[0, extent]`.
///
/// `(v - min) * extent / (max - min + RANGE_EPSILON)`. A flat axis maps
/// every value to 0. Non-finite inputs are ignored when finding the range
/// and map to 0.
pub fn rescale_axis<F: Float>(values: &[F], extent: F) -> Vec<F> {
    let eps = F::from(RANGE_EPSILON).unwrap_or_else(F::epsilon);
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let (min, max) = finite.fold(None, |acc: Option<(F, F)>, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
    .unwrap_or((F::zero(), F::zero()));

    let scale = extent / (max - min + eps);
    values
        .iter()
        .map(|&v| if v.is_finite() { (v - min) * scale } else { F::zero() })
        .collect()
}
