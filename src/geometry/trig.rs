//! Exact trigonometric values for multiples of 18 degrees.
//!
//! Every Penrose vertex angle is a multiple of 18 degrees (`pi/10`), and
//! `cos(18deg)` and `sin(18deg)` are both expressible in `K = Q(alpha)`
//! (`alpha = sqrt(2*(5+sqrt(5)))`). Every other multiple is built from these
//! two by repeated angle-addition, so the whole decagon's worth of
//! directions stays in exact arithmetic.

use std::sync::LazyLock;

use crate::numfield::K;

/// `cos(18deg) = alpha / 4`.
pub fn cos18() -> K {
    K::new_i64(0, 1, 0, 0).mul(&quarter())
}

/// `sin(18deg) = -3/2 + alpha^2 / 8`.
pub fn sin18() -> K {
    K::new_i64(-3, 0, 0, 0)
        .mul(&half())
        .add(&K::new_i64(0, 0, 1, 0).mul(&eighth()))
}

fn half() -> K {
    use num_bigint::BigInt;
    use num_rational::BigRational;
    K::from_rational(BigRational::new(BigInt::from(1), BigInt::from(2)))
}

fn quarter() -> K {
    use num_bigint::BigInt;
    use num_rational::BigRational;
    K::from_rational(BigRational::new(BigInt::from(1), BigInt::from(4)))
}

fn eighth() -> K {
    use num_bigint::BigInt;
    use num_rational::BigRational;
    K::from_rational(BigRational::new(BigInt::from(1), BigInt::from(8)))
}

/// `(cos(n*18deg), sin(n*18deg))` for `n` in `0..20`, built by repeated
/// angle-addition (`cos(a+18) = cos(a)cos18 - sin(a)sin18`, and similarly
/// for sine) starting from `n = 0`.
pub static TRIG_TABLE: LazyLock<[(K, K); 20]> = LazyLock::new(|| {
    let cos18 = cos18();
    let sin18 = sin18();
    let mut table: [(K, K); 20] = std::array::from_fn(|_| (K::new_i64(0, 0, 0, 0), K::new_i64(0, 0, 0, 0)));
    table[0] = (K::new_i64(1, 0, 0, 0), K::new_i64(0, 0, 0, 0));
    for n in 1..20 {
        let (c, s) = &table[n - 1];
        let next_c = c.mul(&cos18).sub(&s.mul(&sin18));
        let next_s = s.mul(&cos18).add(&c.mul(&sin18));
        table[n] = (next_c, next_s);
    }
    table
});

/// `(cos(n*18deg), sin(n*18deg))` for any integer `n`, normalized into
/// `0..20` first.
pub fn cos_sin_multiple(n: i32) -> (K, K) {
    let idx = n.rem_euclid(20) as usize;
    TRIG_TABLE[idx].clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_periodic_with_period_20() {
        let (c0, s0) = cos_sin_multiple(0);
        let (c20, s20) = cos_sin_multiple(20);
        assert_eq!(c0, c20);
        assert_eq!(s0, s20);
    }

    #[test]
    fn half_turn_negates() {
        let (c0, s0) = cos_sin_multiple(0);
        let (c10, s10) = cos_sin_multiple(10);
        assert_eq!(c10, c0.neg());
        assert_eq!(s10, s0.neg());
    }
}
