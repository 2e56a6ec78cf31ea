use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

/// Formats a value with at most `precision` decimals and no trailing zeros.
///
/// Non-finite values and values outside the decimal range fall back to the
/// plain `f64` representation.
#[must_use]
pub fn format_value(value: f64, precision: u32) -> String {
    match Decimal::from_f64_retain(value) {
        Some(decimal) => decimal.round_dp(precision).normalize().to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::format_value;

    #[test]
    fn format_value_rounds_and_trims_trailing_zeros() {
        assert_eq!(format_value(1.23456, 2), "1.23");
        assert_eq!(format_value(2.5, 2), "2.5");
        assert_eq!(format_value(4.0, 2), "4");
        assert_eq!(format_value(-0.125, 1), "-0.1");
    }

    #[test]
    fn format_value_falls_back_for_non_finite_input() {
        assert_eq!(format_value(f64::NAN, 2), "NaN");
        assert_eq!(format_value(f64::INFINITY, 2), "inf");
    }
}
