/// serialization support for payoff results
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::payoff::{BaselineStrategy, ComparisonResult, PayoffResult};
use crate::types::{AccountId, MonthLedgerEntry, PayoffState};

/// display-ready view of a payoff run, money rounded to cents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffView {
    pub account_id: Option<AccountId>,
    pub strategy: String,
    pub outcome: PayoffState,
    pub months_to_payoff: u32,
    pub years: u32,
    pub months: u32,
    pub payoff_date: Option<NaiveDate>,
    pub starting_balance: Money,
    pub total_interest_paid: Money,
    pub total_paid: Money,
    pub total_principal_paid: Money,
    pub remaining_balance: Money,
    pub interest_saved: Option<Money>,
    pub schedule: Vec<LedgerRowView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRowView {
    pub month: u32,
    pub days: u32,
    pub starting_balance: Money,
    pub payment: Money,
    pub chunk_payments: Money,
    pub interest: Money,
    pub principal: Money,
    pub ending_balance: Money,
}

impl LedgerRowView {
    pub fn from_entry(entry: &MonthLedgerEntry) -> Self {
        LedgerRowView {
            month: entry.month_index,
            days: entry.days_in_month,
            starting_balance: entry.starting_balance.to_cents(),
            payment: entry.total_payment.to_cents(),
            chunk_payments: entry.chunk_payments.to_cents(),
            interest: entry.interest_accrued.to_cents(),
            principal: entry.principal_paid.to_cents(),
            ending_balance: entry.ending_balance.to_cents(),
        }
    }
}

impl PayoffView {
    pub fn from_result(result: &PayoffResult) -> Self {
        let (years, months) = result.years_and_months();

        PayoffView {
            account_id: result.account_id,
            strategy: result.strategy.clone(),
            outcome: result.outcome,
            months_to_payoff: result.months_to_payoff,
            years,
            months,
            payoff_date: result.payoff_date,
            starting_balance: result.starting_balance.to_cents(),
            total_interest_paid: result.total_interest_paid.to_cents(),
            total_paid: result.total_paid().to_cents(),
            total_principal_paid: result.total_principal_paid().to_cents(),
            remaining_balance: result.remaining_balance().to_cents(),
            interest_saved: result.interest_saved.map(|m| m.to_cents()),
            schedule: result.schedule.iter().map(LedgerRowView::from_entry).collect(),
        }
    }
}

/// side-by-side view of a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonView {
    pub baseline_strategy: BaselineStrategy,
    pub interest_saved: Money,
    pub months_saved: Option<i64>,
    pub velocity_is_better: bool,
    pub velocity: PayoffView,
    pub baseline: PayoffView,
}

impl ComparisonView {
    pub fn from_comparison(comparison: &ComparisonResult) -> Self {
        ComparisonView {
            baseline_strategy: comparison.baseline_strategy,
            interest_saved: comparison.interest_saved.to_cents(),
            months_saved: comparison.months_saved(),
            velocity_is_better: comparison.velocity_is_better(),
            velocity: PayoffView::from_result(&comparison.velocity),
            baseline: PayoffView::from_result(&comparison.baseline),
        }
    }
}

impl PayoffResult {
    /// get json representation of the run
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(&PayoffView::from_result(self))
            .unwrap_or_else(|e| format!("JSON error: {}", e))
    }

    /// short alias for json output
    pub fn json(&self) -> String {
        self.to_json_pretty()
    }
}

impl ComparisonResult {
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(&ComparisonView::from_comparison(self))
            .unwrap_or_else(|e| format!("JSON error: {}", e))
    }
}
