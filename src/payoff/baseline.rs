use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{Result, SimulationError};
use crate::interest::DailyAccrualSimulator;
use crate::payoff::MonthStrategy;
use crate::types::MonthLedgerEntry;

/// conventional strategy the velocity run is measured against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BaselineStrategy {
    /// percentage-of-balance minimum with a floor, per the config policy
    #[default]
    MinimumPayment,
    /// same installment every month
    FixedPayment(Money),
}

impl BaselineStrategy {
    pub fn validate(&self) -> Result<()> {
        match self {
            BaselineStrategy::MinimumPayment => Ok(()),
            BaselineStrategy::FixedPayment(amount) if amount.is_negative() => {
                Err(SimulationError::InvalidConfiguration {
                    message: format!("fixed baseline payment cannot be negative: {}", amount),
                })
            }
            BaselineStrategy::FixedPayment(_) => Ok(()),
        }
    }
}

/// minimum payment paid once at month end; interest accrues daily on the
/// start-of-month balance, which is held constant through the month
pub struct MinimumPaymentStrategy {
    annual_rate: Rate,
    percentage: Decimal,
    floor: Money,
}

impl MinimumPaymentStrategy {
    pub fn new(annual_rate: Rate, percentage: Decimal, floor: Money) -> Self {
        Self {
            annual_rate,
            percentage,
            floor,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(
            config.account.annual_percentage_rate,
            config.policy.minimum_payment_percentage,
            config.policy.minimum_payment_floor,
        )
    }

    /// max(balance * percentage, floor)
    pub fn minimum_payment(&self, balance: Money) -> Money {
        (balance * self.percentage).max(self.floor)
    }
}

impl MonthStrategy for MinimumPaymentStrategy {
    fn name(&self) -> &'static str {
        "minimum_payment"
    }

    fn simulate_month(
        &self,
        month_index: u32,
        days_in_month: u32,
        starting_balance: Money,
    ) -> MonthLedgerEntry {
        let interest = DailyAccrualSimulator::new(self.annual_rate, days_in_month)
            .accrue_on_constant_balance(starting_balance);

        MonthLedgerEntry::settle(
            month_index,
            days_in_month,
            starting_balance,
            interest,
            self.minimum_payment(starting_balance),
            Money::ZERO,
        )
    }
}

/// fixed installment paid once at month end
pub struct FixedPaymentStrategy {
    annual_rate: Rate,
    payment: Money,
}

impl FixedPaymentStrategy {
    pub fn new(annual_rate: Rate, payment: Money) -> Self {
        Self {
            annual_rate,
            payment,
        }
    }
}

impl MonthStrategy for FixedPaymentStrategy {
    fn name(&self) -> &'static str {
        "fixed_payment"
    }

    fn simulate_month(
        &self,
        month_index: u32,
        days_in_month: u32,
        starting_balance: Money,
    ) -> MonthLedgerEntry {
        let interest = DailyAccrualSimulator::new(self.annual_rate, days_in_month)
            .accrue_on_constant_balance(starting_balance);

        MonthLedgerEntry::settle(
            month_index,
            days_in_month,
            starting_balance,
            interest,
            self.payment,
            Money::ZERO,
        )
    }
}
