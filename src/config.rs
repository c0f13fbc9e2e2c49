use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calendar::DayCalendar;
use crate::decimal::{Money, Rate};
use crate::errors::{Result, SimulationError};
use crate::types::{AccountId, CashFlowProfile, ChunkPlan, LoanAccount};

/// policy knobs for termination and the minimum-payment baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConstants {
    /// hard ceiling on simulated months
    pub max_months: u32,
    /// balance at or below this counts as paid off
    pub balance_epsilon: Money,
    /// run diverges once the balance exceeds the opening balance times this
    pub divergence_factor: Decimal,
    /// baseline minimum payment as a share of the balance
    pub minimum_payment_percentage: Decimal,
    /// baseline minimum payment floor
    pub minimum_payment_floor: Money,
}

impl Default for PolicyConstants {
    fn default() -> Self {
        Self {
            max_months: 600,
            balance_epsilon: Money::CENT,
            divergence_factor: dec!(1.10),
            minimum_payment_percentage: dec!(0.02),
            minimum_payment_floor: Money::from_major(25),
        }
    }
}

impl PolicyConstants {
    pub fn validate(&self) -> Result<()> {
        if self.max_months == 0 {
            return Err(SimulationError::InvalidConfiguration {
                message: "max months must be at least 1".to_string(),
            });
        }
        if self.balance_epsilon.is_negative() {
            return Err(SimulationError::InvalidConfiguration {
                message: format!("balance epsilon cannot be negative: {}", self.balance_epsilon),
            });
        }
        if self.divergence_factor <= Decimal::ONE {
            return Err(SimulationError::InvalidConfiguration {
                message: format!("divergence factor must exceed 1, got {}", self.divergence_factor),
            });
        }
        if self.minimum_payment_percentage.is_sign_negative() || self.minimum_payment_floor.is_negative() {
            return Err(SimulationError::InvalidConfiguration {
                message: "minimum payment policy cannot be negative".to_string(),
            });
        }
        Ok(())
    }
}

/// everything a payoff run needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub account: LoanAccount,
    pub cash_flow: CashFlowProfile,
    pub calendar: DayCalendar,
    #[serde(default)]
    pub policy: PolicyConstants,
}

impl SimulationConfig {
    pub fn new(account: LoanAccount, cash_flow: CashFlowProfile, calendar: DayCalendar) -> Self {
        Self {
            account,
            cash_flow,
            calendar,
            policy: PolicyConstants::default(),
        }
    }

    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::new()
    }

    pub fn with_policy(mut self, policy: PolicyConstants) -> Self {
        self.policy = policy;
        self
    }

    /// boundary checks; every entry point runs these before simulating
    pub fn validate(&self) -> Result<()> {
        let account = &self.account;
        if account.annual_percentage_rate.is_negative() {
            return Err(SimulationError::InvalidRate {
                rate: account.annual_percentage_rate,
            });
        }
        if account.balance.is_negative() {
            return Err(SimulationError::InvalidBalance {
                balance: account.balance,
            });
        }
        if let Some(limit) = account.credit_limit {
            if limit.is_negative() {
                return Err(SimulationError::InvalidCreditLimit { limit });
            }
        }

        let cash_flow = &self.cash_flow;
        for (field, amount) in [
            ("monthly income", cash_flow.monthly_income),
            ("monthly expenses", cash_flow.monthly_expenses),
            ("extra payment", cash_flow.extra_payment),
        ] {
            if amount.is_negative() {
                return Err(SimulationError::InvalidCashFlow { field, amount });
            }
        }
        if let Some(chunk) = &cash_flow.chunk {
            validate_chunk(chunk)?;
        }

        self.policy.validate()?;
        self.calendar.validate(self.policy.max_months)
    }
}

fn validate_chunk(chunk: &ChunkPlan) -> Result<()> {
    if !chunk.amount.is_positive() {
        return Err(SimulationError::InvalidChunkConfig {
            message: format!("chunk amount must be positive, got {}", chunk.amount),
        });
    }
    if !(1..=4).contains(&chunk.frequency_weeks) {
        return Err(SimulationError::InvalidChunkConfig {
            message: format!("chunk frequency must be 1-4 weeks, got {}", chunk.frequency_weeks),
        });
    }
    Ok(())
}

/// fluent builder mirroring the calculator form fields
#[derive(Debug, Default)]
pub struct SimulationConfigBuilder {
    account_id: Option<AccountId>,
    balance: Option<Money>,
    rate: Option<Rate>,
    credit_limit: Option<Money>,
    monthly_income: Option<Money>,
    monthly_expenses: Option<Money>,
    extra_payment: Option<Money>,
    chunk: Option<ChunkPlan>,
    calendar: Option<DayCalendar>,
    policy: Option<PolicyConstants>,
}

impl SimulationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account_id(mut self, id: AccountId) -> Self {
        self.account_id = Some(id);
        self
    }

    pub fn balance(mut self, balance: Money) -> Self {
        self.balance = Some(balance);
        self
    }

    pub fn rate(mut self, rate: Rate) -> Self {
        self.rate = Some(rate);
        self
    }

    pub fn credit_limit(mut self, limit: Money) -> Self {
        self.credit_limit = Some(limit);
        self
    }

    pub fn monthly_income(mut self, income: Money) -> Self {
        self.monthly_income = Some(income);
        self
    }

    pub fn monthly_expenses(mut self, expenses: Money) -> Self {
        self.monthly_expenses = Some(expenses);
        self
    }

    pub fn extra_payment(mut self, extra: Money) -> Self {
        self.extra_payment = Some(extra);
        self
    }

    pub fn chunking(mut self, amount: Money, frequency_weeks: u32) -> Self {
        self.chunk = Some(ChunkPlan::new(amount, frequency_weeks));
        self
    }

    pub fn reference_date(mut self, date: NaiveDate) -> Self {
        self.calendar = Some(DayCalendar::FromDate(date));
        self
    }

    pub fn days_in_months(mut self, days: Vec<u32>) -> Self {
        self.calendar = Some(DayCalendar::Fixed(days));
        self
    }

    /// anchor the calendar on the provider's current date
    pub fn set_time(mut self, time: &SafeTimeProvider) -> Self {
        self.calendar = Some(DayCalendar::from_time_provider(time));
        self
    }

    pub fn policy(mut self, policy: PolicyConstants) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn max_months(mut self, months: u32) -> Self {
        self.policy.get_or_insert_with(PolicyConstants::default).max_months = months;
        self
    }

    /// build and validate; a calendar must be set through `reference_date`,
    /// `days_in_months` or `set_time`
    pub fn build(self) -> Result<SimulationConfig> {
        let balance = self.balance.ok_or(SimulationError::InvalidConfiguration {
            message: "balance required".to_string(),
        })?;
        let rate = self.rate.ok_or(SimulationError::InvalidConfiguration {
            message: "rate required".to_string(),
        })?;
        let calendar = self.calendar.ok_or(SimulationError::InvalidConfiguration {
            message: "calendar required. Call set_time() or reference_date() first".to_string(),
        })?;

        let account = LoanAccount {
            id: self.account_id,
            balance,
            annual_percentage_rate: rate,
            credit_limit: self.credit_limit,
        };

        let cash_flow = CashFlowProfile {
            monthly_income: self.monthly_income.unwrap_or(Money::ZERO),
            monthly_expenses: self.monthly_expenses.unwrap_or(Money::ZERO),
            extra_payment: self.extra_payment.unwrap_or(Money::ZERO),
            chunk: self.chunk,
        };

        let config = SimulationConfig {
            account,
            cash_flow,
            calendar,
            policy: self.policy.unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }
}
