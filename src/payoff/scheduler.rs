use tracing::{debug, warn};

use crate::cashflow::CashFlowPlanner;
use crate::config::SimulationConfig;
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::interest::DailyAccrualSimulator;
use crate::payoff::{MonthStrategy, PayoffResult};
use crate::types::{MonthLedgerEntry, PayoffState};

/// velocity banking: net cash flow reduces the balance continuously,
/// chunk payments land on their scheduled days
pub struct VelocityStrategy<'a> {
    planner: CashFlowPlanner<'a>,
    annual_rate: Rate,
}

impl<'a> VelocityStrategy<'a> {
    pub fn new(config: &'a SimulationConfig) -> Self {
        Self {
            planner: CashFlowPlanner::new(&config.cash_flow),
            annual_rate: config.account.annual_percentage_rate,
        }
    }
}

impl MonthStrategy for VelocityStrategy<'_> {
    fn name(&self) -> &'static str {
        "velocity"
    }

    fn simulate_month(
        &self,
        month_index: u32,
        days_in_month: u32,
        starting_balance: Money,
    ) -> MonthLedgerEntry {
        let plan = self.planner.plan_month(days_in_month);
        DailyAccrualSimulator::new(self.annual_rate, days_in_month)
            .simulate_month(month_index, starting_balance, &plan)
    }
}

/// drives a month strategy until the balance is extinguished or a guard trips
pub struct PayoffScheduler<'a> {
    config: &'a SimulationConfig,
}

impl<'a> PayoffScheduler<'a> {
    pub fn new(config: &'a SimulationConfig) -> Self {
        Self { config }
    }

    /// run the velocity strategy
    pub fn run(&self) -> Result<PayoffResult> {
        self.drive(&VelocityStrategy::new(self.config))
    }

    /// run any month strategy against this config's account, calendar and guards
    pub fn drive<S: MonthStrategy>(&self, strategy: &S) -> Result<PayoffResult> {
        self.config.validate()?;

        let account = &self.config.account;
        let policy = &self.config.policy;
        let opening_balance = account.balance;
        let divergence_ceiling = opening_balance * policy.divergence_factor;

        debug!(
            strategy = strategy.name(),
            balance = %opening_balance,
            apr = %account.annual_percentage_rate,
            max_months = policy.max_months,
            "starting payoff simulation"
        );

        let mut schedule = Vec::new();
        let mut state = if opening_balance <= policy.balance_epsilon {
            PayoffState::PaidOff
        } else {
            PayoffState::Running
        };
        let mut balance = opening_balance;
        let mut month_index = 0;

        while !state.is_terminal() {
            month_index += 1;
            let days_in_month = self.config.calendar.days_in_month(month_index)?;
            let entry = strategy.simulate_month(month_index, days_in_month, balance);

            balance = entry.ending_balance;
            schedule.push(entry);
            state = self.next_state(month_index, balance, divergence_ceiling);
        }

        let payoff_date = match state {
            PayoffState::PaidOff if month_index > 0 => self.config.calendar.month_end(month_index),
            _ => None,
        };

        let result = PayoffResult::new(
            account.id,
            strategy.name(),
            opening_balance,
            schedule,
            state,
            payoff_date,
        );

        match result.outcome {
            PayoffState::PaidOff => debug!(
                strategy = strategy.name(),
                months = result.months_to_payoff,
                total_interest = %result.total_interest_paid,
                "debt paid off"
            ),
            outcome => warn!(
                strategy = strategy.name(),
                ?outcome,
                months = result.months_to_payoff,
                remaining = %result.remaining_balance(),
                "strategy does not pay off the debt"
            ),
        }

        Ok(result)
    }

    /// transition out of Running after a month closes at `ending_balance`
    fn next_state(&self, month_index: u32, ending_balance: Money, divergence_ceiling: Money) -> PayoffState {
        let policy = &self.config.policy;

        if ending_balance <= policy.balance_epsilon {
            PayoffState::PaidOff
        } else if month_index > 1 && ending_balance > divergence_ceiling {
            PayoffState::Diverging
        } else if month_index >= policy.max_months {
            PayoffState::CappedAtMaxMonths
        } else {
            PayoffState::Running
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::DayCalendar;
    use crate::types::{CashFlowProfile, LoanAccount};
    use chrono::{NaiveDate, TimeZone, Utc};
    use hourglass_rs::{SafeTimeProvider, TimeSource};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn config(balance: i64, apr: Rate, income: i64, expenses: i64) -> SimulationConfig {
        SimulationConfig::new(
            LoanAccount::new(Money::from_major(balance), apr),
            CashFlowProfile::new(Money::from_major(income), Money::from_major(expenses)),
            DayCalendar::FromDate(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()),
        )
    }

    fn assert_ledger_invariants(result: &PayoffResult) {
        for entry in &result.schedule {
            assert!(entry.ending_balance >= Money::ZERO);
            assert_eq!(
                entry.ending_balance,
                (entry.starting_balance + entry.interest_accrued - entry.total_payment).floor_zero()
            );
            if entry.total_payment >= entry.interest_accrued {
                assert_eq!(entry.total_payment, entry.interest_accrued + entry.principal_paid);
                assert_eq!(entry.interest_shortfall(), Money::ZERO);
            } else {
                assert_eq!(entry.principal_paid, Money::ZERO);
                assert_eq!(
                    entry.interest_shortfall(),
                    entry.interest_accrued - entry.total_payment
                );
            }
        }
    }

    #[test]
    fn test_typical_card_pays_off_in_low_twenties() {
        let config = config(10_000, Rate::from_percentage_decimal(dec!(18.99)), 3_000, 2_500);
        let result = PayoffScheduler::new(&config).run().unwrap();

        assert_eq!(result.outcome, PayoffState::PaidOff);
        assert!((20..=26).contains(&result.months_to_payoff));
        assert!(result.total_interest_paid > Money::from_major(1_500));
        assert!(result.total_interest_paid < Money::from_major(2_500));
        assert_eq!(result.remaining_balance(), Money::ZERO);
        assert_eq!(
            result.total_principal_paid(),
            Money::from_major(10_000),
        );
        assert_ledger_invariants(&result);
    }

    #[test]
    fn test_zero_apr_pays_off_in_exact_months() {
        let config = config(5_000, Rate::ZERO, 3_000, 2_500);
        let result = PayoffScheduler::new(&config).run().unwrap();

        assert_eq!(result.outcome, PayoffState::PaidOff);
        assert_eq!(result.months_to_payoff, 10);
        assert_eq!(result.total_interest_paid, Money::ZERO);
        assert!(result.schedule.iter().all(|e| e.interest_accrued.is_zero()));
        assert_eq!(result.payoff_date, NaiveDate::from_ymd_opt(2026, 10, 31));
    }

    #[test]
    fn test_zero_apr_rounds_partial_month_up() {
        let config = config(1_050, Rate::ZERO, 1_500, 1_000);
        let result = PayoffScheduler::new(&config).run().unwrap();

        assert_eq!(result.months_to_payoff, 3);
        assert_eq!(result.schedule[2].total_payment, Money::from_major(50));
    }

    #[test]
    fn test_no_cash_flow_diverges() {
        let config = config(1_000, Rate::from_percentage(24), 2_000, 2_000);
        let result = PayoffScheduler::new(&config).run().unwrap();

        assert_eq!(result.outcome, PayoffState::Diverging);
        assert_eq!(result.months_to_payoff, 5);
        assert!(!result.is_paid_off());
        assert!(result.payoff_date.is_none());

        let summed: Money = result.schedule.iter().map(|e| e.interest_accrued).sum();
        assert_eq!(result.total_interest_paid, summed);
        assert_eq!(result.total_interest_paid.to_cents(), Money::from_str_exact("104.08").unwrap());
        assert!(result.remaining_balance() > Money::from_major(1_100));
        assert_ledger_invariants(&result);
    }

    #[test]
    fn test_shortfall_months_record_unpaid_interest() {
        // about 200/month of interest against 100/month of cash
        let config = config(10_000, Rate::from_percentage(24), 2_600, 2_500);
        let result = PayoffScheduler::new(&config).run().unwrap();

        assert_eq!(result.outcome, PayoffState::Diverging);
        assert_ledger_invariants(&result);
        for entry in &result.schedule {
            assert!(entry.total_payment < entry.interest_accrued);
            assert_eq!(entry.principal_paid, Money::ZERO);
            assert_eq!(entry.interest_shortfall(), entry.interest_accrued - entry.total_payment);
            assert_eq!(
                entry.ending_balance,
                entry.starting_balance + entry.interest_shortfall()
            );
        }
    }

    #[test]
    fn test_negative_cash_flow_does_not_reduce_balance() {
        let config = config(1_000, Rate::from_percentage(6), 2_000, 2_500);
        let result = PayoffScheduler::new(&config).run().unwrap();

        assert!(result.schedule.iter().all(|e| e.total_payment.is_zero()));
        assert!(result.schedule.windows(2).all(|w| w[1].ending_balance >= w[0].ending_balance));
        assert!(matches!(
            result.outcome,
            PayoffState::Diverging | PayoffState::CappedAtMaxMonths
        ));
    }

    #[test]
    fn test_zero_apr_zero_cash_hits_month_cap() {
        let config = config(1_000, Rate::ZERO, 0, 0);
        let result = PayoffScheduler::new(&config).run().unwrap();

        assert_eq!(result.outcome, PayoffState::CappedAtMaxMonths);
        assert_eq!(result.months_to_payoff, 600);
        assert_eq!(result.remaining_balance(), Money::from_major(1_000));
    }

    #[test]
    fn test_custom_month_cap() {
        let mut config = config(10_000, Rate::from_percentage(18), 3_000, 2_500);
        config.policy.max_months = 6;
        let result = PayoffScheduler::new(&config).run().unwrap();

        assert_eq!(result.outcome, PayoffState::CappedAtMaxMonths);
        assert_eq!(result.months_to_payoff, 6);
    }

    #[test]
    fn test_zero_balance_is_already_paid_off() {
        let config = config(0, Rate::from_percentage(18), 3_000, 2_500);
        let result = PayoffScheduler::new(&config).run().unwrap();

        assert_eq!(result.outcome, PayoffState::PaidOff);
        assert_eq!(result.months_to_payoff, 0);
        assert!(result.schedule.is_empty());
        assert!(result.payoff_date.is_none());
    }

    #[test]
    fn test_balance_monotonically_decreases() {
        let config = config(25_000, Rate::from_percentage(22), 4_000, 3_200);
        let result = PayoffScheduler::new(&config).run().unwrap();

        assert_eq!(result.outcome, PayoffState::PaidOff);
        for pair in result.schedule.windows(2) {
            assert!(pair[1].ending_balance <= pair[0].ending_balance);
            assert_eq!(pair[1].starting_balance, pair[0].ending_balance);
        }
    }

    #[test]
    fn test_chunking_adds_to_monthly_payment() {
        let mut config = config(10_000, Rate::from_percentage_decimal(dec!(18.99)), 3_000, 2_500);
        config.cash_flow = config.cash_flow.clone().with_chunking(Money::from_major(200), 2);
        let result = PayoffScheduler::new(&config).run().unwrap();

        // january and february 2026 both hold days 14 and 28
        for entry in &result.schedule[..2] {
            assert_eq!(entry.chunk_payments, Money::from_major(400));
            assert_eq!(entry.total_payment, Money::from_major(900));
        }

        let without = PayoffScheduler::new(&self::config(
            10_000,
            Rate::from_percentage_decimal(dec!(18.99)),
            3_000,
            2_500,
        ))
        .run()
        .unwrap();
        assert!(result.months_to_payoff < without.months_to_payoff);
        assert!(result.total_interest_paid < without.total_interest_paid);
        assert_ledger_invariants(&result);
    }

    #[test]
    fn test_weekly_chunks_follow_month_length() {
        let mut config = config(50_000, Rate::from_percentage(12), 3_000, 2_500);
        config.cash_flow = config.cash_flow.clone().with_chunking(Money::from_major(100), 1);
        config.calendar = DayCalendar::Fixed(vec![28, 31]);
        let result = PayoffScheduler::new(&config).run().unwrap();

        assert_eq!(result.schedule[0].days_in_month, 28);
        assert_eq!(result.schedule[0].chunk_payments, Money::from_major(400));
        assert_eq!(result.schedule[1].days_in_month, 31);
        assert_eq!(result.schedule[1].chunk_payments, Money::from_major(400));
    }

    #[test]
    fn test_extra_payment_shortens_payoff() {
        let base = config(10_000, Rate::from_percentage(18), 3_000, 2_500);
        let mut boosted = base.clone();
        boosted.cash_flow.extra_payment = Money::from_major(250);

        let base_result = PayoffScheduler::new(&base).run().unwrap();
        let boosted_result = PayoffScheduler::new(&boosted).run().unwrap();

        assert!(boosted_result.months_to_payoff < base_result.months_to_payoff);
        assert_eq!(boosted_result.schedule[0].total_payment, Money::from_major(750));
    }

    #[test]
    fn test_same_config_is_idempotent() {
        let config = config(10_000, Rate::from_percentage_decimal(dec!(18.99)), 3_000, 2_500);
        let first = PayoffScheduler::new(&config).run().unwrap();
        let second = PayoffScheduler::new(&config).run().unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_injected_time_drives_day_counts() {
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 2, 10, 0, 0, 0).unwrap()
        ));
        let control = time.test_control().unwrap();

        let mut config = config(10_000, Rate::from_percentage(18), 3_000, 2_500);
        config.calendar = DayCalendar::from_time_provider(&time);
        let february = PayoffScheduler::new(&config).run().unwrap();
        assert_eq!(february.schedule[0].days_in_month, 29);

        control.advance(chrono::Duration::days(30));
        config.calendar = DayCalendar::from_time_provider(&time);
        let march = PayoffScheduler::new(&config).run().unwrap();
        assert_eq!(march.schedule[0].days_in_month, 31);
    }

    #[test]
    fn test_invalid_config_fails_before_simulating() {
        let config = config(1_000, Rate::from_decimal(dec!(-0.05)), 3_000, 2_500);
        assert!(PayoffScheduler::new(&config).run().is_err());
    }

    #[test]
    fn test_account_id_carried_to_result() {
        let id = uuid::Uuid::new_v4();
        let mut config = config(1_000, Rate::from_percentage(10), 3_000, 2_500);
        config.account = config.account.clone().with_id(id);
        let result = PayoffScheduler::new(&config).run().unwrap();

        assert_eq!(result.account_id, Some(id));
        assert_eq!(result.strategy, "velocity");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_ledger_invariants_hold(
            balance in 0i64..60_000,
            apr_bps in 0u32..3_600,
            income in 0i64..8_000,
            expenses in 0i64..8_000,
        ) {
            let config = config(balance, Rate::from_bps(apr_bps), income, expenses);
            let result = PayoffScheduler::new(&config).run().unwrap();

            prop_assert!(result.months_to_payoff <= 600);
            prop_assert!(result.outcome.is_terminal());
            for entry in &result.schedule {
                prop_assert!(entry.ending_balance >= Money::ZERO);
                prop_assert!(entry.principal_paid >= Money::ZERO);
                if entry.total_payment >= entry.interest_accrued {
                    prop_assert_eq!(entry.total_payment, entry.interest_accrued + entry.principal_paid);
                } else {
                    prop_assert_eq!(entry.principal_paid, Money::ZERO);
                    prop_assert_eq!(
                        entry.interest_shortfall(),
                        entry.interest_accrued - entry.total_payment
                    );
                }
            }
        }

        #[test]
        fn prop_zero_apr_matches_ceiling_division(
            balance in 1i64..100_000,
            cash in 1i64..5_000,
        ) {
            let config = config(balance, Rate::ZERO, cash, 0);
            let result = PayoffScheduler::new(&config).run().unwrap();

            let expected = (Decimal::from(balance) / Decimal::from(cash)).ceil();
            prop_assert_eq!(result.total_interest_paid, Money::ZERO);
            if expected <= Decimal::from(600) {
                prop_assert_eq!(Decimal::from(result.months_to_payoff), expected);
                prop_assert_eq!(result.outcome, PayoffState::PaidOff);
            }
        }
    }
}
