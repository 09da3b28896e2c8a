//! Numeric primitives shared by the KPI calculations.
//!
//! These are pure functions over slices of `f64`. An empty slice means an
//! insufficient trailing window, which every KPI treats as a defined zero,
//! so `mean` returns 0.0 rather than NaN for empty input.

/// Arithmetic mean of the values, or 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Rounds to `decimals` decimal places (half away from zero).
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Percentage change from `previous` to `current`, 0.0 when `previous` is 0.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    (current - previous) / previous * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn mean_of_values() {
        assert!((mean(&[1.0, 2.0, 3.0]) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn round_to_two_decimals() {
        assert_eq!(round_to(12.345, 2), 12.35);
        assert_eq!(round_to(12.344, 2), 12.34);
        assert_eq!(round_to(-0.005, 1), -0.0);
    }

    #[test]
    fn round_to_one_decimal() {
        assert_eq!(round_to(79.96, 1), 80.0);
    }

    #[test]
    fn percent_change_guards_zero_previous() {
        assert_eq!(percent_change(110.0, 0.0), 0.0);
        assert!((percent_change(110.0, 100.0) - 10.0).abs() < 1e-12);
        assert!((percent_change(90.0, 100.0) + 10.0).abs() < 1e-12);
    }
}
