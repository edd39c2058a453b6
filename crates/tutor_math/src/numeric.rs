// =============================================================================
// Numerical Helpers
// =============================================================================

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};
use std::cmp::Ordering;

#[inline]
pub fn int(n: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}

#[inline]
pub fn ratio(n: i64, d: i64) -> BigRational {
    BigRational::new(BigInt::from(n), BigInt::from(d))
}

/// Sign of a rational as an `Ordering` against zero.
#[inline]
pub fn sign_of(value: &BigRational) -> Ordering {
    if value.is_zero() {
        Ordering::Equal
    } else if value.is_positive() {
        Ordering::Greater
    } else {
        Ordering::Less
    }
}

/// Product of two signs.
pub fn sign_mul(a: Ordering, b: Ordering) -> Ordering {
    match (a, b) {
        (Ordering::Equal, _) | (_, Ordering::Equal) => Ordering::Equal,
        (x, y) if x == y => Ordering::Greater,
        _ => Ordering::Less,
    }
}

/// Exact square root of a non-negative rational if it is a perfect square.
pub fn rational_sqrt(value: &BigRational) -> Option<BigRational> {
    if value.is_negative() {
        return None;
    }
    let n = value.numer().sqrt();
    let d = value.denom().sqrt();
    if &(&n * &n) == value.numer() && &(&d * &d) == value.denom() {
        Some(BigRational::new(n, d))
    } else {
        None
    }
}

/// Integer value as `i64` if it fits.
pub fn to_i64(value: &BigRational) -> Option<i64> {
    if value.is_integer() {
        value.to_integer().to_i64()
    } else {
        None
    }
}

/// Real roots of `a·x² + b·x + c` for `a ≠ 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuadraticRoots {
    /// Negative discriminant.
    None,
    Double(BigRational),
    /// Ascending order.
    Two(BigRational, BigRational),
    /// Positive discriminant that is not a rational square.
    Irrational { discriminant: BigRational },
}

pub fn quadratic_roots(a: &BigRational, b: &BigRational, c: &BigRational) -> QuadraticRoots {
    let discriminant = b * b - int(4) * a * c;
    if discriminant.is_negative() {
        return QuadraticRoots::None;
    }
    let two_a = int(2) * a;
    if discriminant.is_zero() {
        return QuadraticRoots::Double(-b / &two_a);
    }
    match rational_sqrt(&discriminant) {
        Some(root) => {
            let r1 = (-b - &root) / &two_a;
            let r2 = (-b + &root) / &two_a;
            if r1 <= r2 {
                QuadraticRoots::Two(r1, r2)
            } else {
                QuadraticRoots::Two(r2, r1)
            }
        }
        None => QuadraticRoots::Irrational { discriminant },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rational_sqrt_perfect_squares() {
        assert_eq!(rational_sqrt(&int(25)), Some(int(5)));
        assert_eq!(rational_sqrt(&ratio(9, 4)), Some(ratio(3, 2)));
        assert_eq!(rational_sqrt(&int(0)), Some(int(0)));
        assert_eq!(rational_sqrt(&int(2)), None);
        assert_eq!(rational_sqrt(&int(-4)), None);
    }

    #[test]
    fn sign_multiplication_table() {
        assert_eq!(sign_mul(Ordering::Less, Ordering::Less), Ordering::Greater);
        assert_eq!(sign_mul(Ordering::Less, Ordering::Greater), Ordering::Less);
        assert_eq!(sign_mul(Ordering::Equal, Ordering::Less), Ordering::Equal);
    }

    #[test]
    fn quadratic_roots_cases() {
        assert_eq!(
            quadratic_roots(&int(1), &int(-2), &int(-3)),
            QuadraticRoots::Two(int(-1), int(3))
        );
        assert_eq!(
            quadratic_roots(&int(-1), &int(0), &int(4)),
            QuadraticRoots::Two(int(-2), int(2))
        );
        assert_eq!(quadratic_roots(&int(1), &int(-4), &int(4)), QuadraticRoots::Double(int(2)));
        assert_eq!(quadratic_roots(&int(1), &int(0), &int(1)), QuadraticRoots::None);
        assert_eq!(
            quadratic_roots(&int(1), &int(0), &int(-2)),
            QuadraticRoots::Irrational { discriminant: int(8) }
        );
    }

    #[test]
    fn to_i64_only_for_integers() {
        assert_eq!(to_i64(&int(-7)), Some(-7));
        assert_eq!(to_i64(&ratio(1, 2)), None);
    }
}
