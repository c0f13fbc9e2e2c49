use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::decimal::Money;
use crate::types::{CashFlowProfile, ChunkPlan};

/// payment capacity for a single month
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyCashPlan {
    pub days_in_month: u32,
    /// income minus expenses, not clamped
    pub available_cash: Money,
    /// cash that actually reduces debt this month (never negative)
    pub monthly_reduction: Money,
    pub daily_cash_reduction: Money,
    pub chunk_amount: Money,
    /// 1-based day indices on which a chunk payment lands
    pub chunk_days: Vec<u32>,
}

impl MonthlyCashPlan {
    pub fn is_chunk_day(&self, day: u32) -> bool {
        self.chunk_days.contains(&day)
    }

    /// chunk total if every scheduled chunk is applied in full
    pub fn scheduled_chunk_total(&self) -> Money {
        self.chunk_amount * Decimal::from(self.chunk_days.len() as u32)
    }

    /// false when neither cash flow nor chunks can reduce the balance
    pub fn can_reduce_debt(&self) -> bool {
        self.monthly_reduction.is_positive() || !self.chunk_days.is_empty()
    }
}

/// derives monthly payment capacity and chunk days from a cash flow profile
pub struct CashFlowPlanner<'a> {
    profile: &'a CashFlowProfile,
}

impl<'a> CashFlowPlanner<'a> {
    pub fn new(profile: &'a CashFlowProfile) -> Self {
        Self { profile }
    }

    /// income minus expenses, passed through even when negative
    pub fn available_cash(&self) -> Money {
        self.profile.available_cash()
    }

    /// net cash plus the fixed extra payment
    pub fn payment_capacity(&self) -> Money {
        self.available_cash() + self.profile.extra_payment
    }

    /// plan one month of `days_in_month` days
    ///
    /// a non-positive capacity means no continuous reduction this month;
    /// it never feeds back into the balance as a negative payment
    pub fn plan_month(&self, days_in_month: u32) -> MonthlyCashPlan {
        let monthly_reduction = self.payment_capacity().floor_zero();
        let daily_cash_reduction = if days_in_month == 0 {
            Money::ZERO
        } else {
            monthly_reduction / Decimal::from(days_in_month)
        };

        let (chunk_amount, chunk_days) = match &self.profile.chunk {
            Some(plan) => (plan.amount, Self::chunk_days(plan, days_in_month)),
            None => (Money::ZERO, Vec::new()),
        };

        MonthlyCashPlan {
            days_in_month,
            available_cash: self.available_cash(),
            monthly_reduction,
            daily_cash_reduction,
            chunk_amount,
            chunk_days,
        }
    }

    /// day indices that are exact multiples of the chunk period, within the month
    pub fn chunk_days(plan: &ChunkPlan, days_in_month: u32) -> Vec<u32> {
        let period = plan.period_days();
        if period == 0 {
            return Vec::new();
        }
        (1..=days_in_month).filter(|day| day % period == 0).collect()
    }

    /// interest-free estimate of months to payoff: ceil(balance / (cash + extra))
    pub fn estimate_payoff_months(
        balance: Money,
        available_cash: Money,
        extra_payment: Money,
    ) -> Option<u32> {
        let monthly = available_cash + extra_payment;
        if !monthly.is_positive() {
            return None;
        }
        if !balance.is_positive() {
            return Some(0);
        }

        let months = (balance.as_decimal() / monthly.as_decimal()).ceil();
        months.to_u32()
    }
}
