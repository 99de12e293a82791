//! Means and presentation rounding for region summaries.

/// Sum of `values` rounded once, as if computed exactly.
///
/// Shewchuk's algorithm: keeps a list of non-overlapping partial sums
/// so no low-order bits are lost while adding, then rounds the total
/// to the nearest double (ties to even).
pub fn fsum(values: &[f64]) -> f64 {
    let mut partials: Vec<f64> = Vec::new();

    for &value in values {
        let mut x = value;
        let mut kept = 0;
        for j in 0..partials.len() {
            let mut y = partials[j];
            if x.abs() < y.abs() {
                std::mem::swap(&mut x, &mut y);
            }
            let hi = x + y;
            let lo = y - (hi - x);
            if lo != 0.0 {
                partials[kept] = lo;
                kept += 1;
            }
            x = hi;
        }
        partials.truncate(kept);
        partials.push(x);
    }

    let Some(mut n) = partials.len().checked_sub(1) else {
        return 0.0;
    };
    let mut hi = partials[n];
    let mut lo = 0.0;
    while n > 0 {
        n -= 1;
        let x = hi;
        let y = partials[n];
        hi = x + y;
        lo = y - (hi - x);
        if lo != 0.0 {
            break;
        }
    }

    // Half-way case: the partials below decide which way to round.
    if n > 0 && ((lo < 0.0 && partials[n - 1] < 0.0) || (lo > 0.0 && partials[n - 1] > 0.0)) {
        let y = lo * 2.0;
        let x = hi + y;
        if y == x - hi {
            hi = x;
        }
    }

    hi
}

/// Arithmetic mean over an exactly rounded sum. `None` for no values.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(fsum(values) / values.len() as f64)
}

/// Round to `places` decimals, ties to even, on the exact binary value.
///
/// 2.675 is stored as 2.67499… and rounds to 2.67; 100.125 is an exact
/// tie and rounds to 100.12.
pub fn round_to(value: f64, places: usize) -> f64 {
    format!("{value:.places$}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fsum_keeps_low_order_bits() {
        assert_eq!(fsum(&[0.1; 10]), 1.0);
        assert_eq!(fsum(&[1e100, 1.0, -1e100]), 1.0);
        assert_eq!(fsum(&[1e16, 1.0, 1e-16]), 10_000_000_000_000_002.0);
    }

    #[test]
    fn fsum_of_nothing_is_zero() {
        assert_eq!(fsum(&[]), 0.0);
    }

    #[test]
    fn mean_of_values() {
        assert_eq!(mean(&[100.25, 100.0]), Some(100.125));
        assert_eq!(mean(&[99.9, 99.8, 99.95]).map(|m| round_to(m, 3)), Some(99.883));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn exact_ties_round_to_even() {
        assert_eq!(round_to(100.125, 2), 100.12);
        assert_eq!(round_to(150.375, 2), 150.38);
        assert_eq!(round_to(0.125, 2), 0.12);
    }

    #[test]
    fn rounds_the_stored_value_not_the_literal() {
        assert_eq!(round_to(2.675, 2), 2.67);
        assert_eq!(round_to(1.115, 2), 1.11);
    }

    #[test]
    fn ordinary_rounding() {
        assert_eq!(round_to(150.0, 2), 150.0);
        assert_eq!(round_to(99.883_333, 3), 99.883);
        assert_eq!(round_to(123.456_7, 2), 123.46);
    }
}
