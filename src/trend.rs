//! Signed percentage comparing a metric across two adjacent periods.

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats the change from `previous` to `current` as a percentage string.
///
/// A zero baseline cannot produce a meaningful ratio: any growth from zero
/// reads as `"+100%"` and no activity at all as `"0%"`. Otherwise the change
/// is `(current - previous) / |previous| * 100`, rounded half-away-from-zero
/// to one decimal place, with a `+` prefix on positive values.
///
/// This function does no date math; callers produce `previous` and `current`
/// by aggregating two adjacent windows themselves.
pub fn trend(previous: Decimal, current: Decimal) -> String {
    if previous.is_zero() {
        return if current > Decimal::ZERO {
            "+100%".to_string()
        } else {
            "0%".to_string()
        };
    }

    let percent = (current - previous) / previous.abs() * Decimal::ONE_HUNDRED;
    let percent = percent.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);

    if percent > Decimal::ZERO {
        format!("+{:.1}%", percent)
    } else {
        format!("{:.1}%", percent)
    }
}
