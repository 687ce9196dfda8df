//! Rate math
//!
//! Collection and attendance rates, 2 decimal places, round half-up.
//! Zero denominators yield exactly zero rather than an error.

use rust_decimal::{Decimal, RoundingStrategy};

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// actual / expected × 100, or 0 when nothing was expected.
pub fn collection_rate(actual: Decimal, expected: Decimal) -> Decimal {
    if expected.is_zero() {
        return Decimal::ZERO;
    }
    round2(actual * Decimal::ONE_HUNDRED / expected)
}

/// present / (present + absent) × 100, or 0 when no records exist.
pub fn attendance_rate(present: i64, absent: i64) -> Decimal {
    let total = present + absent;
    if total == 0 {
        return Decimal::ZERO;
    }
    round2(Decimal::from(present) * Decimal::ONE_HUNDRED / Decimal::from(total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn collection_rate_zero_expected_is_zero() {
        assert_eq!(
            collection_rate(Decimal::from(500_000), Decimal::ZERO),
            Decimal::ZERO
        );
        assert_eq!(collection_rate(Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn collection_rate_half_paid() {
        let rate = collection_rate(Decimal::from(300_000), Decimal::from(600_000));
        assert_eq!(rate, Decimal::from_str("50.00").unwrap());
    }

    #[test]
    fn collection_rate_rounds_half_up() {
        // 1/3 × 100 = 33.333... → 33.33
        let rate = collection_rate(Decimal::from(1), Decimal::from(3));
        assert_eq!(rate, Decimal::from_str("33.33").unwrap());
        // 100/16 = 6.25 exactly, then 1/16 of 100% = 6.25 → stays
        let rate = collection_rate(Decimal::from(1), Decimal::from(16));
        assert_eq!(rate, Decimal::from_str("6.25").unwrap());
        // 0.125 × 100 / 100 = 0.125 → half-up to 0.13
        let rate = collection_rate(Decimal::from_str("0.125").unwrap(), Decimal::from(100));
        assert_eq!(rate, Decimal::from_str("0.13").unwrap());
    }

    #[test]
    fn collection_rate_can_exceed_hundred() {
        // back-payments can push actual above expected
        let rate = collection_rate(Decimal::from(900_000), Decimal::from(600_000));
        assert_eq!(rate, Decimal::from_str("150.00").unwrap());
    }

    #[test]
    fn attendance_rate_bounds() {
        assert_eq!(attendance_rate(0, 0), Decimal::ZERO);
        assert_eq!(attendance_rate(5, 0), Decimal::from_str("100.00").unwrap());
        assert_eq!(attendance_rate(0, 5), Decimal::from_str("0.00").unwrap());
        assert_eq!(attendance_rate(1, 2), Decimal::from_str("33.33").unwrap());
        assert_eq!(attendance_rate(2, 1), Decimal::from_str("66.67").unwrap());
    }
}
