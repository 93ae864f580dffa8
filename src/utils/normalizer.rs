use num::Float;

/// Clamp a score into the closed unit interval
pub trait UnitInterval {
    /// NaN -> 0, below 0 -> 0, above 1 -> 1
    fn clip_unit(self) -> Self;
}

impl<F: Float> UnitInterval for F {
    #[inline]
    fn clip_unit(self) -> F {
        if self.is_nan() {
            return F::zero();
        }
        if self < F::zero() {
            return F::zero();
        }
        if self > F::one() {
            return F::one();
        }
        self
    }
}

/// Replace NaN and infinities with zero
pub trait FiniteOrZero {
    fn finite_or_zero(self) -> Self;
}

impl<F: Float> FiniteOrZero for F {
    #[inline]
    fn finite_or_zero(self) -> F {
        if self.is_finite() {
            self
        } else {
            F::zero()
        }
    }
}
