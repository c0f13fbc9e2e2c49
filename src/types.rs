use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};

/// identifier of the debt record a simulation was run for
pub type AccountId = Uuid;

/// debt being paid down; never mutated by a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanAccount {
    pub id: Option<AccountId>,
    pub balance: Money,
    pub annual_percentage_rate: Rate,
    pub credit_limit: Option<Money>,
}

impl LoanAccount {
    pub fn new(balance: Money, annual_percentage_rate: Rate) -> Self {
        Self {
            id: None,
            balance,
            annual_percentage_rate,
            credit_limit: None,
        }
    }

    pub fn with_id(mut self, id: AccountId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_credit_limit(mut self, limit: Money) -> Self {
        self.credit_limit = Some(limit);
        self
    }

    /// share of the credit line in use; None without a positive limit
    pub fn utilization_rate(&self) -> Option<Rate> {
        self.credit_limit.and_then(|limit| self.balance.ratio_to(limit))
    }

    pub fn utilization_state(&self) -> Option<UtilizationState> {
        self.utilization_rate().map(UtilizationState::from_rate)
    }

    /// remaining headroom on the credit line
    pub fn available_credit(&self) -> Option<Money> {
        self.credit_limit.map(|limit| (limit - self.balance).floor_zero())
    }
}

/// utilization bands for a revolving line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UtilizationState {
    Unused,    // 0%
    Low,       // < 30%
    Moderate,  // 30-70%
    High,      // 70-90%
    Maxed,     // 90-100%
    Overlimit, // > 100%
}

impl UtilizationState {
    pub fn from_rate(rate: Rate) -> Self {
        if rate == Rate::ZERO {
            UtilizationState::Unused
        } else if rate < Rate::from_percentage(30) {
            UtilizationState::Low
        } else if rate < Rate::from_percentage(70) {
            UtilizationState::Moderate
        } else if rate < Rate::from_percentage(90) {
            UtilizationState::High
        } else if rate <= Rate::from_percentage(100) {
            UtilizationState::Maxed
        } else {
            UtilizationState::Overlimit
        }
    }
}

/// periodic lump-sum payment plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkPlan {
    pub amount: Money,
    pub frequency_weeks: u32,
}

impl ChunkPlan {
    pub fn new(amount: Money, frequency_weeks: u32) -> Self {
        Self {
            amount,
            frequency_weeks,
        }
    }

    /// days between chunk payments
    pub fn period_days(&self) -> u32 {
        self.frequency_weeks * 7
    }
}

/// household cash flow routed through the credit line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowProfile {
    pub monthly_income: Money,
    pub monthly_expenses: Money,
    /// fixed amount paid on top of net cash flow every month
    #[serde(default)]
    pub extra_payment: Money,
    #[serde(default)]
    pub chunk: Option<ChunkPlan>,
}

impl CashFlowProfile {
    pub fn new(monthly_income: Money, monthly_expenses: Money) -> Self {
        Self {
            monthly_income,
            monthly_expenses,
            extra_payment: Money::ZERO,
            chunk: None,
        }
    }

    pub fn with_extra_payment(mut self, extra: Money) -> Self {
        self.extra_payment = extra;
        self
    }

    pub fn with_chunking(mut self, amount: Money, frequency_weeks: u32) -> Self {
        self.chunk = Some(ChunkPlan::new(amount, frequency_weeks));
        self
    }

    /// income minus expenses; may be zero or negative
    pub fn available_cash(&self) -> Money {
        self.monthly_income - self.monthly_expenses
    }
}

/// month-to-month scheduler state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayoffState {
    /// still simulating
    Running,
    /// balance fell to or below the epsilon
    PaidOff,
    /// balance grew past the divergence ceiling
    Diverging,
    /// hit the month cap without paying off
    CappedAtMaxMonths,
}

impl PayoffState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PayoffState::Running)
    }

    pub fn converged(&self) -> bool {
        matches!(self, PayoffState::PaidOff)
    }
}

/// one simulated month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthLedgerEntry {
    /// 1-based
    pub month_index: u32,
    pub days_in_month: u32,
    pub starting_balance: Money,
    pub ending_balance: Money,
    pub total_payment: Money,
    pub interest_accrued: Money,
    pub principal_paid: Money,
    /// portion of total_payment that came from chunk payments
    pub chunk_payments: Money,
}

impl MonthLedgerEntry {
    /// settle a month from its starting balance, accrued interest, and scheduled payment
    ///
    /// payment is capped at the payoff amount so the final month never overpays
    pub fn settle(
        month_index: u32,
        days_in_month: u32,
        starting_balance: Money,
        interest_accrued: Money,
        scheduled_payment: Money,
        chunk_payments: Money,
    ) -> Self {
        let payoff_amount = starting_balance + interest_accrued;
        let total_payment = scheduled_payment.floor_zero().min(payoff_amount);

        Self {
            month_index,
            days_in_month,
            starting_balance,
            ending_balance: (payoff_amount - total_payment).floor_zero(),
            total_payment,
            interest_accrued,
            principal_paid: (total_payment - interest_accrued).floor_zero(),
            chunk_payments: chunk_payments.min(total_payment),
        }
    }

    /// interest not covered by this month's payment
    pub fn interest_shortfall(&self) -> Money {
        (self.interest_accrued - self.total_payment).floor_zero()
    }
}
