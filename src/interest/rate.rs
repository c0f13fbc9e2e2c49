use rust_decimal::Decimal;

use crate::decimal::Rate;

const MONTHS_PER_YEAR: u32 = 12;

/// converts an annual percentage rate into periodic accrual rates
///
/// the daily rate splits the monthly rate over the actual days of the
/// month being simulated, so every month accrues the same nominal rate
/// regardless of its length
pub struct RateConverter;

impl RateConverter {
    /// apr / 12
    pub fn monthly_rate(apr: Rate) -> Rate {
        Rate::from_decimal(apr.as_decimal() / Decimal::from(MONTHS_PER_YEAR))
    }

    /// monthly rate / days in month
    pub fn daily_rate(apr: Rate, days_in_month: u32) -> Rate {
        if days_in_month == 0 || apr.is_zero() {
            return Rate::ZERO;
        }
        Rate::from_decimal(Self::monthly_rate(apr).as_decimal() / Decimal::from(days_in_month))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_rate() {
        let apr = Rate::from_percentage(12);
        assert_eq!(RateConverter::monthly_rate(apr).as_decimal(), dec!(0.01));
    }

    #[test]
    fn test_daily_rate_uses_actual_days() {
        let apr = Rate::from_percentage(24);

        let february = RateConverter::daily_rate(apr, 28);
        let march = RateConverter::daily_rate(apr, 31);

        assert!(february > march);
        assert!((february.as_decimal() * dec!(28) - dec!(0.02)).abs() < dec!(0.000000001));
        assert!((march.as_decimal() * dec!(31) - dec!(0.02)).abs() < dec!(0.000000001));
    }

    #[test]
    fn test_zero_apr_has_zero_daily_rate() {
        assert_eq!(RateConverter::daily_rate(Rate::ZERO, 30), Rate::ZERO);
        assert_eq!(RateConverter::monthly_rate(Rate::ZERO), Rate::ZERO);
    }
}
