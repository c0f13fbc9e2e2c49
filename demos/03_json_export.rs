/// json export - serialize a run and a comparison for a front end
use chrono::NaiveDate;
use velocity_payoff_rs::{ComparativeAnalyzer, Money, PayoffScheduler, Rate, SimulationConfig, Uuid};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = SimulationConfig::builder()
        .account_id(Uuid::new_v4())
        .balance(Money::from_major(2_500))
        .rate(Rate::from_percentage(20))
        .credit_limit(Money::from_major(5_000))
        .monthly_income(Money::from_major(3_200))
        .monthly_expenses(Money::from_major(2_700))
        .extra_payment(Money::from_major(50))
        .reference_date(NaiveDate::from_ymd_opt(2025, 6, 1).ok_or("bad date")?)
        .build()?;

    if let Some(state) = config.account.utilization_state() {
        println!("utilization: {:?}\n", state);
    }

    let result = PayoffScheduler::new(&config).run()?;
    println!("{}", result.json());

    let comparison = ComparativeAnalyzer::new(&config).compare()?;
    println!("\n{}", comparison.to_json_pretty());

    // inputs round-trip too
    println!("\n{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}
