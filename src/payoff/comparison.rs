use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::SimulationConfig;
use crate::decimal::Money;
use crate::errors::Result;
use crate::payoff::{
    BaselineStrategy, FixedPaymentStrategy, MinimumPaymentStrategy, PayoffResult, PayoffScheduler,
};

/// velocity run, baseline run, and the savings between them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub baseline_strategy: BaselineStrategy,
    pub velocity: PayoffResult,
    pub baseline: PayoffResult,
    /// never negative
    pub interest_saved: Money,
}

impl ComparisonResult {
    /// baseline months minus velocity months, negative when velocity takes longer.
    /// None unless both runs paid the debt off.
    pub fn months_saved(&self) -> Option<i64> {
        if self.velocity.is_paid_off() && self.baseline.is_paid_off() {
            Some(self.baseline.months_to_payoff as i64 - self.velocity.months_to_payoff as i64)
        } else {
            None
        }
    }

    /// a run that pays off beats one that never does; otherwise compare interest
    pub fn velocity_is_better(&self) -> bool {
        match (self.velocity.is_paid_off(), self.baseline.is_paid_off()) {
            (true, false) => true,
            (true, true) => self.interest_saved.is_positive(),
            (false, _) => false,
        }
    }
}

/// runs the velocity strategy and a conventional baseline over the same inputs
pub struct ComparativeAnalyzer<'a> {
    config: &'a SimulationConfig,
    baseline: BaselineStrategy,
}

impl<'a> ComparativeAnalyzer<'a> {
    /// compare against the minimum-payment baseline
    pub fn new(config: &'a SimulationConfig) -> Self {
        Self {
            config,
            baseline: BaselineStrategy::MinimumPayment,
        }
    }

    pub fn with_baseline(mut self, baseline: BaselineStrategy) -> Self {
        self.baseline = baseline;
        self
    }

    /// run only the baseline schedule
    pub fn run_baseline(&self) -> Result<PayoffResult> {
        self.baseline.validate()?;
        let scheduler = PayoffScheduler::new(self.config);

        match self.baseline {
            BaselineStrategy::MinimumPayment => {
                scheduler.drive(&MinimumPaymentStrategy::from_config(self.config))
            }
            BaselineStrategy::FixedPayment(payment) => scheduler.drive(&FixedPaymentStrategy::new(
                self.config.account.annual_percentage_rate,
                payment,
            )),
        }
    }

    pub fn compare(&self) -> Result<ComparisonResult> {
        let baseline = self.run_baseline()?;
        let mut velocity = PayoffScheduler::new(self.config).run()?;

        let interest_saved = Self::interest_saved(&baseline, &velocity);
        velocity.interest_saved = Some(interest_saved);

        info!(
            baseline = baseline.strategy.as_str(),
            velocity_months = velocity.months_to_payoff,
            baseline_months = baseline.months_to_payoff,
            interest_saved = %interest_saved,
            "compared payoff strategies"
        );

        Ok(ComparisonResult {
            baseline_strategy: self.baseline,
            velocity,
            baseline,
            interest_saved,
        })
    }

    /// max(0, baseline interest - velocity interest)
    pub fn interest_saved(baseline: &PayoffResult, velocity: &PayoffResult) -> Money {
        (baseline.total_interest_paid - velocity.total_interest_paid).floor_zero()
    }
}
