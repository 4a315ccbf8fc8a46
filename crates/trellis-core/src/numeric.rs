//! Integer root finders and cycle-aware state iteration.
//!
//! All root finders work in exact integer arithmetic: a candidate root is
//! only reported when substituting it back into the polynomial yields
//! exactly zero. Intermediate products are widened to `i128`; a candidate
//! whose check would overflow even that is rejected.

use std::hash::Hash;

use indexmap::IndexSet;
use tracing::debug;

use crate::error::CoreError;

/// Return the `n`-th iterate of `step` starting from `initial`.
///
/// Every visited state is memoized in visit order. As soon as a state
/// repeats, the orbit is known to be periodic from the first occurrence
/// onwards and the answer is read straight out of the memo, so huge `n`
/// cost no more than the length of the orbit's tail plus one period.
///
/// Returns `Err(CoreError::InvalidArgument)` if `n` is negative.
///
/// # Examples
///
/// ```
/// use trellis_core::iterate_state;
///
/// let s = iterate_state(0u32, 10_000_003, |x| (x + 1) % 5).unwrap();
/// assert_eq!(s, 3);
/// ```
pub fn iterate_state<S, F>(initial: S, n: i64, mut step: F) -> Result<S, CoreError>
where
    S: Clone + Eq + Hash,
    F: FnMut(&S) -> S,
{
    if n < 0 {
        return Err(CoreError::invalid(format!(
            "iteration count must be non-negative, got {n}"
        )));
    }
    let n = n as u64;

    let mut orbit: IndexSet<S> = IndexSet::new();
    let mut current = initial;
    let mut index: u64 = 0;
    loop {
        if index == n {
            return Ok(current);
        }
        let (seen_at, inserted) = orbit.insert_full(current.clone());
        if !inserted {
            let start = seen_at as u64;
            let length = index - start;
            debug!(start, length, "state cycle detected");
            let offset = (n - start) % length;
            return Ok(orbit[(start + offset) as usize].clone());
        }
        current = step(&current);
        index += 1;
    }
}

/// The unique integer root of `a·x + b = 0`, if there is one.
///
/// Returns `None` when `a == 0` or when the real root is not an integer.
pub fn linear_roots_int(a: i64, b: i64) -> Option<i64> {
    if a == 0 {
        return None;
    }
    let (a, b) = (i128::from(a), i128::from(b));
    if b % a != 0 {
        return None;
    }
    let x = -b / a;
    if a * x + b != 0 {
        return None;
    }
    i64::try_from(x).ok()
}

/// The integer roots of `a·x² + b·x + c = 0`.
///
/// Each slot is independently `Some(root)` or `None`: `2x² - 3x + 1` has
/// the real roots `1/2` and `1`, so only the second slot is filled. When
/// both are present the smaller root comes first. A negative (or
/// non-square) discriminant yields `(None, None)`; when `a == 0` both
/// slots hold the [`linear_roots_int`] root of `b·x + c`.
///
/// # Examples
///
/// ```
/// use trellis_core::quadratic_roots_int;
///
/// // (x - 2)(x - 5) = x² - 7x + 10
/// assert_eq!(quadratic_roots_int(1, -7, 10), (Some(2), Some(5)));
/// assert_eq!(quadratic_roots_int(1, 0, 1), (None, None));
/// ```
pub fn quadratic_roots_int(a: i64, b: i64, c: i64) -> (Option<i64>, Option<i64>) {
    if a == 0 {
        let root = linear_roots_int(b, c);
        return (root, root);
    }
    let (wa, wb, wc) = (i128::from(a), i128::from(b), i128::from(c));
    let discriminant = match wa
        .checked_mul(wc)
        .and_then(|ac| ac.checked_mul(4))
        .and_then(|four_ac| (wb * wb).checked_sub(four_ac))
    {
        Some(d) => d,
        None => return (None, None),
    };
    if discriminant < 0 {
        return (None, None);
    }
    let s = discriminant.isqrt();
    if s * s != discriminant {
        // Irrational roots are never integers.
        return (None, None);
    }

    let root = |numerator: i128| -> Option<i64> {
        let denominator = 2 * wa;
        if numerator % denominator != 0 {
            return None;
        }
        let x = i64::try_from(numerator / denominator).ok()?;
        (eval_quadratic(a, b, c, x)? == 0).then_some(x)
    };
    let minus = root(-wb - s);
    let plus = root(-wb + s);
    if a > 0 {
        (minus, plus)
    } else {
        (plus, minus)
    }
}

/// Evaluate `a·x² + b·x + c`, or `None` on `i128` overflow.
fn eval_quadratic(a: i64, b: i64, c: i64, x: i64) -> Option<i128> {
    let x = i128::from(x);
    let x2 = x.checked_mul(x)?;
    i128::from(a)
        .checked_mul(x2)?
        .checked_add(i128::from(b).checked_mul(x)?)?
        .checked_add(i128::from(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ── iterate_state ───────────────────────────────────────────

    #[test]
    fn iterate_zero_returns_initial() {
        assert_eq!(iterate_state(7u8, 0, |x| x + 1).unwrap(), 7);
    }

    #[test]
    fn iterate_negative_is_invalid_argument() {
        assert!(matches!(
            iterate_state(0u8, -1, |x| *x),
            Err(CoreError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn iterate_large_count_uses_cycle() {
        assert_eq!(iterate_state(0u32, 10_000_003, |x| (x + 1) % 5).unwrap(), 3);
    }

    #[test]
    fn iterate_cycle_with_tail() {
        // 10 -> 9 -> ... -> 3 -> 0 -> 1 -> 2 -> 0 ...
        let f = |x: &u32| if *x > 3 { x - 1 } else if *x == 3 { 0 } else { (x + 1) % 3 };
        let mut naive = 10u32;
        for _ in 0..1000 {
            naive = f(&naive);
        }
        assert_eq!(iterate_state(10u32, 1000, f).unwrap(), naive);
    }

    #[test]
    fn iterate_fixed_point() {
        assert_eq!(iterate_state(4u32, i64::MAX, |x| *x).unwrap(), 4);
    }

    // ── Root finders ────────────────────────────────────────────

    #[test]
    fn linear_exact_and_fractional() {
        assert_eq!(linear_roots_int(2, -6), Some(3));
        assert_eq!(linear_roots_int(-3, -9), Some(-3));
        assert_eq!(linear_roots_int(2, 1), None);
        assert_eq!(linear_roots_int(0, 5), None);
        assert_eq!(linear_roots_int(0, 0), None);
    }

    #[test]
    fn quadratic_degenerates_to_linear() {
        assert_eq!(quadratic_roots_int(0, 2, -10), (Some(5), Some(5)));
        assert_eq!(quadratic_roots_int(0, 0, 3), (None, None));
    }

    #[test]
    fn quadratic_half_integer_root_is_dropped() {
        // 2x² - 3x + 1 = (2x - 1)(x - 1)
        assert_eq!(quadratic_roots_int(2, -3, 1), (None, Some(1)));
    }

    #[test]
    fn quadratic_negative_leading_coefficient_orders_ascending() {
        // -(x + 1)(x - 4) = -x² + 3x + 4
        assert_eq!(quadratic_roots_int(-1, 3, 4), (Some(-1), Some(4)));
    }

    #[test]
    fn quadratic_double_root() {
        assert_eq!(quadratic_roots_int(1, -6, 9), (Some(3), Some(3)));
    }

    #[test]
    fn quadratic_negative_discriminant() {
        assert_eq!(quadratic_roots_int(1, 0, 1), (None, None));
    }

    #[test]
    fn quadratic_irrational() {
        assert_eq!(quadratic_roots_int(1, 0, -2), (None, None));
    }

    // ── Property tests ──────────────────────────────────────────

    proptest! {
        #[test]
        fn quadratic_roots_satisfy_equation(
            a in -50i64..50, b in -500i64..500, c in -5000i64..5000,
        ) {
            let (r1, r2) = quadratic_roots_int(a, b, c);
            for r in [r1, r2].into_iter().flatten() {
                prop_assert_eq!(a * r * r + b * r + c, 0);
            }
        }

        #[test]
        fn quadratic_recovers_constructed_roots(
            k in 1i64..20, r1 in -100i64..100, r2 in -100i64..100, negate in any::<bool>(),
        ) {
            let k = if negate { -k } else { k };
            // k(x - r1)(x - r2)
            let (a, b, c) = (k, -k * (r1 + r2), k * r1 * r2);
            let (lo, hi) = quadratic_roots_int(a, b, c);
            prop_assert_eq!(lo, Some(r1.min(r2)));
            prop_assert_eq!(hi, Some(r1.max(r2)));
        }

        #[test]
        fn iterate_matches_naive(start in 0u32..50, modulus in 1u32..40, n in 0i64..500) {
            let f = |x: &u32| (x * 3 + 1) % modulus;
            let mut naive = start;
            for _ in 0..n {
                naive = f(&naive);
            }
            prop_assert_eq!(iterate_state(start, n, f).unwrap(), naive);
        }

        #[test]
        fn iterate_is_a_recurrence(start in 0u32..50, n in 1i64..300) {
            let f = |x: &u32| (x * x + 1) % 97;
            let prev = iterate_state(start, n - 1, f).unwrap();
            prop_assert_eq!(iterate_state(start, n, f).unwrap(), f(&prev));
        }
    }
}
