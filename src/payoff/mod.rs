pub mod baseline;
pub mod comparison;
pub mod scheduler;
pub mod serialization;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{AccountId, MonthLedgerEntry, PayoffState};

pub use baseline::{BaselineStrategy, FixedPaymentStrategy, MinimumPaymentStrategy};
pub use comparison::{ComparativeAnalyzer, ComparisonResult};
pub use scheduler::{PayoffScheduler, VelocityStrategy};
pub use serialization::{ComparisonView, LedgerRowView, PayoffView};

/// per-month payment rule driven by the scheduler
pub trait MonthStrategy {
    /// label used in logs and exported views
    fn name(&self) -> &'static str;

    fn simulate_month(
        &self,
        month_index: u32,
        days_in_month: u32,
        starting_balance: Money,
    ) -> MonthLedgerEntry;
}

/// full schedule and summary metrics of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffResult {
    pub account_id: Option<AccountId>,
    pub strategy: String,
    pub starting_balance: Money,
    pub schedule: Vec<MonthLedgerEntry>,
    pub total_interest_paid: Money,
    pub months_to_payoff: u32,
    pub outcome: PayoffState,
    /// last day of the final month, for paid-off runs on a date calendar
    pub payoff_date: Option<NaiveDate>,
    /// set when compared against a baseline
    pub interest_saved: Option<Money>,
}

impl PayoffResult {
    pub fn new(
        account_id: Option<AccountId>,
        strategy: &str,
        starting_balance: Money,
        schedule: Vec<MonthLedgerEntry>,
        outcome: PayoffState,
        payoff_date: Option<NaiveDate>,
    ) -> Self {
        let total_interest_paid: Money = schedule.iter().map(|e| e.interest_accrued).sum();
        let months_to_payoff = schedule.len() as u32;

        Self {
            account_id,
            strategy: strategy.to_string(),
            starting_balance,
            schedule,
            total_interest_paid,
            months_to_payoff,
            outcome,
            payoff_date,
            interest_saved: None,
        }
    }

    pub fn is_paid_off(&self) -> bool {
        self.outcome.converged()
    }

    pub fn total_paid(&self) -> Money {
        self.schedule.iter().map(|e| e.total_payment).sum()
    }

    pub fn total_principal_paid(&self) -> Money {
        self.schedule.iter().map(|e| e.principal_paid).sum()
    }

    pub fn total_chunk_payments(&self) -> Money {
        self.schedule.iter().map(|e| e.chunk_payments).sum()
    }

    /// balance left after the last simulated month
    pub fn remaining_balance(&self) -> Money {
        self.schedule
            .last()
            .map(|e| e.ending_balance)
            .unwrap_or(self.starting_balance)
    }

    /// months to payoff split into whole years and leftover months
    pub fn years_and_months(&self) -> (u32, u32) {
        (self.months_to_payoff / 12, self.months_to_payoff % 12)
    }

    pub fn get_month(&self, month_index: u32) -> Option<&MonthLedgerEntry> {
        month_index
            .checked_sub(1)
            .and_then(|i| self.schedule.get(i as usize))
    }
}
