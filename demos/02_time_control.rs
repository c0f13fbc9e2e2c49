/// time control - deterministic calendars with controlled time
use chrono::{Duration, TimeZone, Utc};
use velocity_payoff_rs::{
    Money, PayoffScheduler, Rate, SafeTimeProvider, SimulationConfig, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== time control example ===\n");

    // create controlled time for testing
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
    ));
    let controller = time.test_control().unwrap();

    let run = |time: &SafeTimeProvider| -> Result<(), Box<dyn std::error::Error>> {
        let config = SimulationConfig::builder()
            .balance(Money::from_major(5_000))
            .rate(Rate::from_percentage(22))
            .monthly_income(Money::from_major(2_800))
            .monthly_expenses(Money::from_major(2_400))
            .set_time(time)
            .build()?;

        let result = PayoffScheduler::new(&config).run()?;
        let first = &result.schedule[0];

        println!("reference date: {}", time.now().format("%Y-%m-%d"));
        println!("  first month days: {}", first.days_in_month);
        println!("  first month interest: ${}", first.interest_accrued.to_cents());
        println!("  months to payoff: {}", result.months_to_payoff);
        if let Some(date) = result.payoff_date {
            println!("  payoff date: {}", date);
        }
        println!("  total interest: ${}\n", result.total_interest_paid.to_cents());
        Ok(())
    };

    // january, 31 days
    run(&time)?;

    // advance into february of a leap year
    controller.advance(Duration::days(31));
    run(&time)?;

    // a fixed calendar ignores the clock entirely
    let fixed = SimulationConfig::builder()
        .balance(Money::from_major(5_000))
        .rate(Rate::from_percentage(22))
        .monthly_income(Money::from_major(2_800))
        .monthly_expenses(Money::from_major(2_400))
        .days_in_months(vec![30])
        .build()?;
    let result = PayoffScheduler::new(&fixed).run()?;
    println!("fixed 30-day months: {} months, ${} interest", result.months_to_payoff, result.total_interest_paid.to_cents());
    println!("payoff date: {:?}", result.payoff_date);

    Ok(())
}
