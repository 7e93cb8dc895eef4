//! Arithmetic for client-derived columns

/// Units left without any action: `max(sent - automatic - manual, 0)`.
pub fn shortfall(sent: i64, automatic: i64, manual: i64) -> i64 {
    sent.saturating_sub(automatic).saturating_sub(manual).max(0)
}

/// Sum that stops at `i64::MAX`/`i64::MIN` instead of overflowing; cells
/// can hold any integer a spreadsheet carries.
pub fn saturating_sum(values: impl IntoIterator<Item = i64>) -> i64 {
    values.into_iter().fold(0, i64::saturating_add)
}

/// `part / whole * 100` rounded to one decimal; 0 when `whole` is 0.
#[allow(clippy::cast_precision_loss)]
pub fn percentage(part: i64, whole: i64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64 * 1000.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortfall_is_never_negative() {
        assert_eq!(shortfall(1500, 1200, 250), 50);
        assert_eq!(shortfall(100, 80, 40), 0);
        assert_eq!(shortfall(0, 0, 0), 0);
        for sent in [0, 7, 100] {
            for automatic in [0, 50, 200] {
                for manual in [0, 3, 90] {
                    assert!(shortfall(sent, automatic, manual) >= 0);
                }
            }
        }
    }

    #[test]
    fn sums_saturate_at_the_bounds() {
        assert_eq!(saturating_sum([1, 2, 3]), 6);
        assert_eq!(saturating_sum([i64::MAX, 1, 1]), i64::MAX);
        assert_eq!(saturating_sum([i64::MIN, -5]), i64::MIN);
        assert_eq!(saturating_sum([]), 0);
    }

    #[test]
    fn percentage_rounds_to_one_decimal() {
        assert!((percentage(1200, 1500) - 80.0).abs() < f64::EPSILON);
        assert!((percentage(600, 800) - 75.0).abs() < f64::EPSILON);
        assert!((percentage(1, 3) - 33.3).abs() < 1e-9);
        assert!((percentage(2, 3) - 66.7).abs() < 1e-9);
        assert!(percentage(5, 0).abs() < f64::EPSILON);
    }
}
