/// quick start - minimal velocity payoff run
use velocity_payoff_rs::{
    Money, PayoffScheduler, Rate, SafeTimeProvider, SimulationConfig, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // $10,000 at 18.99% with $500 of monthly cash flow
    let time = SafeTimeProvider::new(TimeSource::System);
    let config = SimulationConfig::builder()
        .balance(Money::from_major(10_000))
        .rate(Rate::from_bps(1_899))
        .monthly_income(Money::from_major(3_000))
        .monthly_expenses(Money::from_major(2_500))
        .set_time(&time)
        .build()?;

    let result = PayoffScheduler::new(&config).run()?;

    let (years, months) = result.years_and_months();
    println!("outcome: {:?}", result.outcome);
    println!("paid off in {} months ({}y {}m)", result.months_to_payoff, years, months);
    println!("total interest: ${}", result.total_interest_paid.to_cents());

    Ok(())
}
