//! Exact rational intervals.
//!
//! `RationalInterval` bounds an unknown exact rational (or real) value
//! between two known rational endpoints. It backs the bisection search used
//! to pin down the sign of algebraic numbers in [`crate::numfield`] without
//! ever resorting to floating point.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use crate::error::{KernelError, Result};

/// A closed interval `[low, high]` of exact rationals, with `low <= high`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RationalInterval {
    low: BigRational,
    high: BigRational,
}

impl RationalInterval {
    /// Builds an interval from two endpoints, which must satisfy `low <= high`.
    ///
    /// # Errors
    /// Returns [`KernelError::DomainValue`] if `low > high`.
    pub fn new(low: BigRational, high: BigRational) -> Result<Self> {
        if low > high {
            return Err(KernelError::DomainValue {
                constraint: "interval low <= high",
                detail: format!("low={low}, high={high}"),
            });
        }
        Ok(Self { low, high })
    }

    /// Builds a degenerate interval `[v, v]` containing exactly `v`.
    pub fn exact(v: BigRational) -> Self {
        Self {
            low: v.clone(),
            high: v,
        }
    }

    /// Builds a degenerate interval from an integer.
    pub fn from_int(v: i64) -> Self {
        Self::exact(BigRational::from_integer(BigInt::from(v)))
    }

    /// The lower bound.
    pub fn low(&self) -> &BigRational {
        &self.low
    }

    /// The upper bound.
    pub fn high(&self) -> &BigRational {
        &self.high
    }

    /// `(low + high) / 2`.
    pub fn midpoint(&self) -> BigRational {
        (&self.low + &self.high) / BigRational::from_integer(BigInt::from(2))
    }

    /// `high - low`.
    pub fn width(&self) -> BigRational {
        &self.high - &self.low
    }

    /// True if `self` is contained in `other` (non-strictly).
    pub fn is_subset_of(&self, other: &Self) -> bool {
        other.low <= self.low && self.high <= other.high
    }

    /// True if `v` falls within `[low, high]`.
    pub fn contains(&self, v: &BigRational) -> bool {
        self.low <= *v && *v <= self.high
    }

    /// Interval sum: `[a.low + b.low, a.high + b.high]`.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        Self {
            low: &self.low + &other.low,
            high: &self.high + &other.high,
        }
    }

    /// Interval negation: `[-high, -low]`.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self {
            low: -self.high.clone(),
            high: -self.low.clone(),
        }
    }

    /// Interval difference, implemented as `self + (-other)`.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Interval product: the min/max of the four corner products.
    ///
    /// This is the standard (non-tight but always correct) interval
    /// multiplication rule: since each endpoint pairing is a valid product of
    /// *some* point in each operand's range, the true product range is
    /// bounded by the extremes among all four corner products.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        let corners = [
            &self.low * &other.low,
            &self.low * &other.high,
            &self.high * &other.low,
            &self.high * &other.high,
        ];
        let mut low = corners[0].clone();
        let mut high = corners[0].clone();
        for c in &corners[1..] {
            if *c < low {
                low = c.clone();
            }
            if *c > high {
                high = c.clone();
            }
        }
        Self { low, high }
    }

    /// True if every point in this interval is strictly less than zero.
    pub fn is_strictly_negative(&self) -> bool {
        self.high < BigRational::zero()
    }

    /// True if every point in this interval is strictly greater than zero.
    pub fn is_strictly_positive(&self) -> bool {
        self.low > BigRational::zero()
    }

    /// True if this interval straddles (or touches) zero, i.e. neither strict
    /// sign condition holds.
    pub fn straddles_zero(&self) -> bool {
        !self.is_strictly_negative() && !self.is_strictly_positive()
    }
}

impl From<BigRational> for RationalInterval {
    fn from(v: BigRational) -> Self {
        Self::exact(v)
    }
}

/// The interval `[1, 1]`, used as a multiplicative identity in folds.
pub fn one() -> RationalInterval {
    RationalInterval::exact(BigRational::one())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn rejects_inverted_bounds() {
        assert!(RationalInterval::new(q(11, 2), q(5, 1)).is_err());
    }

    #[test]
    fn accepts_equal_bounds() {
        let iv = RationalInterval::new(q(3, 1), q(3, 1)).expect("valid interval");
        assert_eq!(iv.low(), &q(3, 1));
        assert_eq!(iv.high(), &q(3, 1));
    }

    #[test]
    fn subset_and_width_shrink_together() {
        let outer = RationalInterval::new(q(0, 1), q(4, 1)).expect("valid");
        let inner = RationalInterval::new(q(1, 1), q(3, 1)).expect("valid");
        assert!(inner.is_subset_of(&outer));
        assert!(inner.width() < outer.width());
    }

    #[test]
    fn mul_covers_all_corner_signs() {
        let a = RationalInterval::new(q(-1, 1), q(2, 1)).expect("valid");
        let b = RationalInterval::new(q(-3, 1), q(1, 1)).expect("valid");
        let p = a.mul(&b);
        // corners: 3, -1, -6, 2 => [-6, 3]
        assert_eq!(p.low(), &q(-6, 1));
        assert_eq!(p.high(), &q(3, 1));
    }

    #[test]
    fn strict_sign_checks() {
        let pos = RationalInterval::new(q(1, 2), q(1, 1)).expect("valid");
        assert!(pos.is_strictly_positive());
        let neg = RationalInterval::new(q(-1, 1), q(-1, 2)).expect("valid");
        assert!(neg.is_strictly_negative());
        let straddle = RationalInterval::new(q(-1, 1), q(1, 1)).expect("valid");
        assert!(straddle.straddles_zero());
    }

    quickcheck::quickcheck! {
        fn degenerate_add_matches_integer_sum(a: i32, b: i32) -> bool {
            let (a, b) = (i64::from(a), i64::from(b));
            RationalInterval::from_int(a).add(&RationalInterval::from_int(b)) == RationalInterval::from_int(a + b)
        }

        fn midpoint_always_lies_within_its_own_interval(lo: i32, width: u16) -> bool {
            let low = q(i64::from(lo), 1);
            let high = &low + q(i64::from(width), 1);
            match RationalInterval::new(low, high) {
                Ok(iv) => iv.contains(&iv.midpoint()),
                Err(_) => true,
            }
        }
    }
}
