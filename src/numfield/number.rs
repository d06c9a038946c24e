//! `K = Q(alpha)`, the degree-4 algebraic number field generated by
//! `alpha = sqrt(2*(5+sqrt(5)))`, a root of `x^4 - 20*x^2 + 80`.
//!
//! Every coordinate in the geometry kernel lives in `K`: Penrose vertices,
//! expressed in the regular-decagon trigonometric basis, are exactly
//! representable here, and all comparisons are decided exactly via
//! [`Sign`] rather than by casting to floating point.

use std::cmp::Ordering;
use std::sync::LazyLock;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};

use super::alpha::{self, POWERS_OF_ALPHA};
use crate::rational::RationalInterval;

/// The exact sign of a value, decided without floating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Strictly less than zero.
    Negative,
    /// Exactly zero.
    Zero,
    /// Strictly greater than zero.
    Positive,
}

/// An element of `K = Q(alpha)`, stored as its coefficients
/// `(c0, c1, c2, c3)` in the power basis `1, alpha, alpha^2, alpha^3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct K {
    c: [BigRational; 4],
}

fn q(n: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}

impl K {
    /// Builds `c0 + c1*alpha + c2*alpha^2 + c3*alpha^3` from integer
    /// coefficients.
    pub fn new_i64(c0: i64, c1: i64, c2: i64, c3: i64) -> Self {
        Self {
            c: [q(c0), q(c1), q(c2), q(c3)],
        }
    }

    /// Builds a value from exact rational coefficients.
    pub fn new(c0: BigRational, c1: BigRational, c2: BigRational, c3: BigRational) -> Self {
        Self { c: [c0, c1, c2, c3] }
    }

    /// Builds a rational (non-irrational) element of `K`.
    pub fn from_rational(v: BigRational) -> Self {
        Self {
            c: [v, q(0), q(0), q(0)],
        }
    }

    /// True if this value lies in `Q` (the `alpha`, `alpha^2`, `alpha^3`
    /// coefficients are all zero).
    fn is_rational(&self) -> bool {
        self.c[1].is_zero() && self.c[2].is_zero() && self.c[3].is_zero()
    }

    /// The coefficients `(c0, c1, c2, c3)`.
    pub fn coeffs(&self) -> &[BigRational; 4] {
        &self.c
    }

    /// Adds two elements of `K`, componentwise.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        Self {
            c: std::array::from_fn(|i| &self.c[i] + &other.c[i]),
        }
    }

    /// Negates this value.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self {
            c: std::array::from_fn(|i| -self.c[i].clone()),
        }
    }

    /// Subtracts `other` from `self`.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Multiplies two elements of `K`.
    ///
    /// Rational values (both factors, or either factor, with the other
    /// reduced to a scalar multiply) take a direct fast path; otherwise the
    /// two degree-3 polynomials are convolved into a degree-6 polynomial in
    /// `alpha`, then folded back into the 4-term basis using
    /// [`POWERS_OF_ALPHA`].
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_rational() {
            return Self {
                c: std::array::from_fn(|i| &self.c[0] * &other.c[i]),
            };
        }
        if other.is_rational() {
            return Self {
                c: std::array::from_fn(|i| &self.c[i] * &other.c[0]),
            };
        }

        let mut conv = [q(0), q(0), q(0), q(0), q(0), q(0), q(0)];
        for (i, ai) in self.c.iter().enumerate() {
            for (j, bj) in other.c.iter().enumerate() {
                conv[i + j] = &conv[i + j] + ai * bj;
            }
        }

        let table = &*POWERS_OF_ALPHA;
        let mut result = [q(0), q(0), q(0), q(0)];
        for (k, coeff) in conv.iter().enumerate() {
            if coeff.is_zero() {
                continue;
            }
            for m in 0..4 {
                result[m] = &result[m] + coeff * &table[k][m];
            }
        }
        Self { c: result }
    }

    /// Evaluates the Horner-form interval bound on this value, given an
    /// interval known to contain `alpha`.
    fn bound_over(&self, alpha_interval: &RationalInterval) -> RationalInterval {
        let mut acc = RationalInterval::exact(self.c[3].clone());
        for k in (0..3).rev() {
            acc = acc.mul(alpha_interval).add(&RationalInterval::exact(self.c[k].clone()));
        }
        acc
    }

    /// The exact sign of this value, decided by bisecting `alpha`'s
    /// enclosing interval until the value's own interval no longer straddles
    /// zero.
    ///
    /// Terminates because nonzero coefficient tuples can never evaluate to
    /// exactly zero: `{1, alpha, alpha^2, alpha^3}` is a basis of `K` over
    /// `Q`, so only the all-zero tuple represents the zero element.
    pub fn sgn(&self) -> Sign {
        if self.is_rational() {
            return match self.c[0].cmp(&q(0)) {
                Ordering::Less => Sign::Negative,
                Ordering::Equal => Sign::Zero,
                Ordering::Greater => Sign::Positive,
            };
        }
        let mut n = 0;
        loop {
            let alpha_interval = alpha::interval_for_alpha(n);
            let bound = self.bound_over(&alpha_interval);
            if bound.is_strictly_negative() {
                return Sign::Negative;
            }
            if bound.is_strictly_positive() {
                return Sign::Positive;
            }
            n += 1;
        }
    }

    /// The bounding rational interval for this value's own magnitude,
    /// narrowed until `floor(low) == floor(high)`.
    fn narrow_value_interval(&self) -> RationalInterval {
        let mut n = 0;
        loop {
            let alpha_interval = alpha::interval_for_alpha(n);
            let bound = self.bound_over(&alpha_interval);
            if bound.low().floor() == bound.high().floor() {
                return bound;
            }
            n += 1;
        }
    }

    /// The greatest integer `<= self`.
    pub fn floor(&self) -> BigInt {
        if self.is_rational() {
            return self.c[0].floor().to_integer();
        }
        self.narrow_value_interval().low().floor().to_integer()
    }

    /// The least integer `>= self`.
    pub fn ceil(&self) -> BigInt {
        if self.is_rational() {
            return self.c[0].ceil().to_integer();
        }
        // A nonzero-alpha-coefficient value can never be an exact integer
        // (by the same basis-independence argument `sgn` relies on), so it
        // always lies strictly inside `(floor, floor + 1)`.
        self.floor() + BigInt::from(1)
    }

    /// Truncation toward zero.
    pub fn trunc(&self) -> BigInt {
        match self.sgn() {
            Sign::Negative => self.ceil(),
            Sign::Zero => BigInt::from(0),
            Sign::Positive => self.floor(),
        }
    }

    /// A lossy `f64` approximation, for display/debugging only. Never use
    /// this for geometric decisions; use [`K::sgn`] and comparisons instead.
    pub fn to_f64_approx(&self) -> f64 {
        let alpha_f64 = *ALPHA_F64;
        let mut acc = self.c[3].to_f64().unwrap_or(0.0);
        for k in (0..3).rev() {
            acc = acc * alpha_f64 + self.c[k].to_f64().unwrap_or(0.0);
        }
        acc
    }
}

impl PartialOrd for K {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for K {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.sub(other).sgn() {
            Sign::Negative => Ordering::Less,
            Sign::Zero => Ordering::Equal,
            Sign::Positive => Ordering::Greater,
        }
    }
}

static ALPHA_F64: LazyLock<f64> = LazyLock::new(|| (2.0 * (5.0 + 5.0_f64.sqrt())).sqrt());

static ONE: LazyLock<K> = LazyLock::new(|| K::new_i64(1, 0, 0, 0));
static ALPHA: LazyLock<K> = LazyLock::new(|| K::new_i64(0, 1, 0, 0));
static SQRT5: LazyLock<K> =
    LazyLock::new(|| K::new(q(-5), q(0), BigRational::new(BigInt::from(1), BigInt::from(2)), q(0)));
static PHI: LazyLock<K> = LazyLock::new(|| {
    let half = BigRational::new(BigInt::from(1), BigInt::from(2));
    SQRT5.add(&ONE).mul(&K::from_rational(half))
});
static INV_PHI: LazyLock<K> = LazyLock::new(|| PHI.sub(&ONE));

/// `1`, as an element of `K`.
pub fn one() -> K {
    ONE.clone()
}

/// `alpha = sqrt(2*(5+sqrt(5)))`.
pub fn alpha_const() -> K {
    ALPHA.clone()
}

/// `sqrt(5)`.
pub fn sqrt5() -> K {
    SQRT5.clone()
}

/// The golden ratio, `(1+sqrt(5))/2`.
pub fn phi() -> K {
    PHI.clone()
}

/// `1/phi = phi - 1`.
pub fn inv_phi() -> K {
    INV_PHI.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_is_literally_one() {
        assert_eq!(one().sgn(), Sign::Positive);
        assert_eq!(one().sub(&one()).sgn(), Sign::Zero);
    }

    #[test]
    fn phi_identities() {
        let phi = phi();
        let inv_phi = inv_phi();
        // phi * (phi - 1) == 1
        assert_eq!(phi.mul(&phi.sub(&one())), one());
        // phi * phi == phi + 1
        assert_eq!(phi.mul(&phi), phi.add(&one()));
        // phi > 1
        assert_eq!(phi.cmp(&one()), Ordering::Greater);
        // phi * inv_phi == 1
        assert_eq!(phi.mul(&inv_phi), one());
    }

    #[test]
    fn sqrt5_identity() {
        let sqrt5 = sqrt5();
        assert_eq!(sqrt5.mul(&sqrt5), K::from_rational(q(5)));
        let lower = K::from_rational(BigRational::new(BigInt::from(13), BigInt::from(6)));
        let upper = K::from_rational(BigRational::new(BigInt::from(9), BigInt::from(4)));
        assert_eq!(lower.cmp(&sqrt5), Ordering::Less);
        assert_eq!(sqrt5.cmp(&upper), Ordering::Less);
    }

    #[test]
    fn alpha_manual_powers() {
        let alpha = alpha_const();
        assert_eq!(alpha, K::new_i64(0, 1, 0, 0));
        assert_eq!(alpha.mul(&alpha), K::new_i64(0, 0, 1, 0));
        assert_eq!(alpha.mul(&alpha).mul(&alpha), K::new_i64(0, 0, 0, 1));
        let a4 = alpha.mul(&alpha).mul(&alpha).mul(&alpha);
        assert_eq!(a4, K::new_i64(-80, 0, 20, 0));
        let a5 = a4.mul(&alpha);
        assert_eq!(a5, K::new_i64(0, -80, 0, 20));
    }

    #[test]
    fn floor_and_ceil_of_irrational_value() {
        // phi is between 1 and 2.
        assert_eq!(phi().floor(), BigInt::from(1));
        assert_eq!(phi().ceil(), BigInt::from(2));
    }

    quickcheck::quickcheck! {
        fn multiples_of_alpha_compare_consistently_with_their_integer_coefficient(a: i16, b: i16) -> bool {
            let (a, b) = (i64::from(a), i64::from(b));
            let lhs = alpha_const().mul(&K::from_rational(q(a)));
            let rhs = alpha_const().mul(&K::from_rational(q(b)));
            lhs.cmp(&rhs) == a.cmp(&b)
        }

        fn floor_never_exceeds_the_value_it_bounds(c0: i16, c1: i16) -> bool {
            let v = K::new_i64(i64::from(c0), i64::from(c1), 0, 0);
            K::from_rational(BigRational::from_integer(v.floor())).cmp(&v) != Ordering::Greater
        }
    }
}
