//! The defining quartic for `alpha = sqrt(2*(5+sqrt(5)))` and the shared,
//! process-wide bisection cache that narrows down its location.
//!
//! `alpha` is a root of `x^4 - 20*x^2 + 80`. Rather than carry a floating
//! point approximation, we keep a monotonically shrinking sequence of exact
//! rational intervals known to contain it, each derived from the last by
//! bisection. The sequence is append-only and shared process-wide (mirrors
//! the teacher's `LazyLock<SymbolRegistry>` pattern in
//! `core/symbol/registry.rs`), so repeated sign queries amortize the cost of
//! narrowing the interval instead of restarting from scratch.

use std::sync::{LazyLock, Mutex};

use num_bigint::BigInt;
use num_rational::BigRational;

use crate::rational::RationalInterval;

/// `alpha^k` for `k` in `0..=6`, each expressed as the coefficient 4-tuple
/// `(c0, c1, c2, c3)` of `c0 + c1*alpha + c2*alpha^2 + c3*alpha^3` in the
/// basis `{1, alpha, alpha^2, alpha^3}` of `K = Q(alpha)`.
///
/// Powers beyond `alpha^3` are reduced using `alpha^4 = 20*alpha^2 - 80`,
/// which is why a 7-term table (covering the degree-6 convolution that
/// arises when multiplying two degree-3 elements of `K`) is enough to express
/// every power a product can produce.
pub static POWERS_OF_ALPHA: LazyLock<[[BigRational; 4]; 7]> = LazyLock::new(|| {
    let r = |n: i64| BigRational::from_integer(BigInt::from(n));
    let z = || r(0);
    [
        [r(1), z(), z(), z()],     // alpha^0
        [z(), r(1), z(), z()],     // alpha^1
        [z(), z(), r(1), z()],     // alpha^2
        [z(), z(), z(), r(1)],     // alpha^3
        [r(-80), z(), r(20), z()], // alpha^4 = 20*alpha^2 - 80
        [z(), r(-80), z(), r(20)], // alpha^5 = 20*alpha^3 - 80*alpha
        [r(-1600), z(), r(320), z()], // alpha^6 = 320*alpha^2 - 1600
    ]
});

/// `f(x) = ((x*x - 20) * x*x) + 80`, whose unique positive root above 3 is
/// `alpha`.
pub fn generating_poly(x: &BigRational) -> BigRational {
    let x2 = x * x;
    let twenty = BigRational::from_integer(BigInt::from(20));
    let eighty = BigRational::from_integer(BigInt::from(80));
    (&x2 - &twenty) * &x2 + eighty
}

static ALPHA_INTERVALS: LazyLock<Mutex<Vec<RationalInterval>>> = LazyLock::new(|| {
    let low = BigRational::new(BigInt::from(7), BigInt::from(2));
    let high = BigRational::from_integer(BigInt::from(4));
    let seed = RationalInterval::new(low, high).expect("seed interval is well-formed by construction");
    Mutex::new(vec![seed])
});

/// Bisects `interval` once, keeping the half whose generating-polynomial
/// signs still bracket a zero (`f(low) < 0`, `f(high) > 0`).
///
/// `f` evaluated at a rational midpoint cannot be exactly zero here: that
/// would make the midpoint a rational root of an irreducible quartic, which
/// is impossible, so exactly one of the two halves keeps the bracketing
/// property.
fn bisect(interval: &RationalInterval) -> RationalInterval {
    let mid = interval.midpoint();
    if generating_poly(&mid) < BigRational::from_integer(BigInt::from(0)) {
        RationalInterval::new(mid, interval.high().clone())
            .expect("midpoint <= high by construction")
    } else {
        RationalInterval::new(interval.low().clone(), mid).expect("low <= midpoint by construction")
    }
}

/// Returns the `n`th interval (0-indexed) in the shared bisection sequence
/// for `alpha`, extending the cache as needed.
///
/// `trace!` logs how many new bisection steps were required, matching the
/// ambient-observability role the teacher's `simplification/engine.rs` fills
/// with an env-gated `eprintln!`, replaced here with the `log` facade.
pub fn interval_for_alpha(n: usize) -> RationalInterval {
    let mut cache = ALPHA_INTERVALS.lock().expect("alpha interval cache mutex poisoned");
    while cache.len() <= n {
        let next = bisect(cache.last().expect("cache is seeded with at least one interval"));
        log::trace!(
            "alpha bisection: step {} width {}",
            cache.len(),
            next.width()
        );
        cache.push(next);
    }
    cache[n].clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intervals_narrow_and_keep_bracketing_the_root() {
        let mut prev: Option<RationalInterval> = None;
        for i in 0..40 {
            let interval = interval_for_alpha(i);
            if let Some(p) = &prev {
                assert!(interval.is_subset_of(p));
                assert!(interval.width() < p.width());
            }
            assert!(generating_poly(interval.low()) < BigRational::from_integer(BigInt::from(0)));
            assert!(generating_poly(interval.high()) > BigRational::from_integer(BigInt::from(0)));
            prev = Some(interval);
        }
    }

    #[test]
    fn alpha_powers_satisfy_the_minimal_polynomial() {
        // alpha^4 should equal 20*alpha^2 - 80 in the coefficient table.
        let table = &*POWERS_OF_ALPHA;
        assert_eq!(table[4][0], BigRational::from_integer(BigInt::from(-80)));
        assert_eq!(table[4][2], BigRational::from_integer(BigInt::from(20)));
    }
}
