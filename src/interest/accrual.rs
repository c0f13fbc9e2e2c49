use crate::cashflow::MonthlyCashPlan;
use crate::decimal::{Money, Rate};
use crate::interest::RateConverter;
use crate::types::MonthLedgerEntry;

/// one day of the intra-month walk
#[derive(Debug, Clone, PartialEq)]
pub struct DailyAccrual {
    pub day: u32,
    pub opening_balance: Money,
    pub interest_amount: Money,
    pub cash_reduction: Money,
    pub chunk_payment: Money,
    pub closing_balance: Money,
}

/// walks a single month day by day
///
/// each day accrues interest on the previous day's closing balance before
/// that day's cash reduction and chunk payment are applied
pub struct DailyAccrualSimulator {
    daily_rate: Rate,
    days_in_month: u32,
}

impl DailyAccrualSimulator {
    pub fn new(annual_rate: Rate, days_in_month: u32) -> Self {
        Self {
            daily_rate: RateConverter::daily_rate(annual_rate, days_in_month),
            days_in_month,
        }
    }

    /// simulate one velocity month and settle it into a ledger row
    pub fn simulate_month(
        &self,
        month_index: u32,
        starting_balance: Money,
        plan: &MonthlyCashPlan,
    ) -> MonthLedgerEntry {
        let mut walk = MonthWalk::new(starting_balance);
        for day in 1..=self.days_in_month {
            walk.step(day, self.daily_rate, plan);
        }

        MonthLedgerEntry::settle(
            month_index,
            self.days_in_month,
            starting_balance,
            walk.interest,
            plan.monthly_reduction + walk.chunks_applied,
            walk.chunks_applied,
        )
    }

    /// per-day breakdown of the same walk `simulate_month` performs
    pub fn daily_trace(&self, starting_balance: Money, plan: &MonthlyCashPlan) -> Vec<DailyAccrual> {
        let mut walk = MonthWalk::new(starting_balance);
        (1..=self.days_in_month)
            .map(|day| walk.step(day, self.daily_rate, plan))
            .collect()
    }

    /// interest on a balance held constant for the whole month
    pub fn accrue_on_constant_balance(&self, balance: Money) -> Money {
        let daily_interest = balance.floor_zero() * self.daily_rate;
        (0..self.days_in_month).map(|_| daily_interest).sum()
    }
}

/// running state inside one month
struct MonthWalk {
    balance: Money,
    interest: Money,
    chunks_applied: Money,
}

impl MonthWalk {
    fn new(starting_balance: Money) -> Self {
        Self {
            balance: starting_balance.floor_zero(),
            interest: Money::ZERO,
            chunks_applied: Money::ZERO,
        }
    }

    fn step(&mut self, day: u32, daily_rate: Rate, plan: &MonthlyCashPlan) -> DailyAccrual {
        let opening_balance = self.balance;

        // accrue
        let interest_amount = self.balance * daily_rate;
        self.interest += interest_amount;

        // continuous reduction
        let cash_reduction = plan.daily_cash_reduction.min(self.balance);
        self.balance -= cash_reduction;

        // chunk, only what the balance can absorb
        let mut chunk_payment = Money::ZERO;
        if plan.is_chunk_day(day) && self.balance.is_positive() {
            chunk_payment = plan.chunk_amount.min(self.balance);
            self.balance -= chunk_payment;
            self.chunks_applied += chunk_payment;
        }

        DailyAccrual {
            day,
            opening_balance,
            interest_amount,
            cash_reduction,
            chunk_payment,
            closing_balance: self.balance,
        }
    }
}
