//! The algebraic number field `K = Q(alpha)` used for exact Penrose
//! vertex coordinates, and the shared machinery (generating polynomial,
//! bisection cache) that backs its exact comparisons.

mod alpha;
mod number;

pub use alpha::{generating_poly, interval_for_alpha};
pub use number::{alpha_const, inv_phi, one, phi, sqrt5, Sign, K};
