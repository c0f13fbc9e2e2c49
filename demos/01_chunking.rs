/// chunking - lump-sum payments on top of daily cash flow, compared with minimum payments
use tracing_subscriber::EnvFilter;
use velocity_payoff_rs::{
    BaselineStrategy, ComparativeAnalyzer, Money, Rate, SafeTimeProvider, SimulationConfig,
    TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== chunking example ===\n");

    let time = SafeTimeProvider::new(TimeSource::System);

    let base = SimulationConfig::builder()
        .balance(Money::from_major(10_000))
        .rate(Rate::from_bps(1_899))
        .monthly_income(Money::from_major(3_000))
        .monthly_expenses(Money::from_major(2_500))
        .set_time(&time);

    // no chunks
    let plain = base.build()?;
    let plain_cmp = ComparativeAnalyzer::new(&plain).compare()?;

    // $200 chunk every 2 weeks
    let chunked = SimulationConfig::builder()
        .balance(Money::from_major(10_000))
        .rate(Rate::from_bps(1_899))
        .monthly_income(Money::from_major(3_000))
        .monthly_expenses(Money::from_major(2_500))
        .chunking(Money::from_major(200), 2)
        .set_time(&time)
        .build()?;
    let chunked_cmp = ComparativeAnalyzer::new(&chunked).compare()?;

    for (label, cmp) in [("cash flow only", &plain_cmp), ("with chunks", &chunked_cmp)] {
        println!("{}:", label);
        println!("  velocity months:   {}", cmp.velocity.months_to_payoff);
        println!("  velocity interest: ${}", cmp.velocity.total_interest_paid.to_cents());
        println!("  chunks applied:    ${}", cmp.velocity.total_chunk_payments().to_cents());
        println!("  baseline months:   {}", cmp.baseline.months_to_payoff);
        println!("  interest saved:    ${}", cmp.interest_saved.to_cents());
        match cmp.months_saved() {
            Some(months) => println!("  months saved:      {}\n", months),
            None => println!("  months saved:      n/a (baseline never pays off)\n"),
        }
    }

    // against a flat $500 installment instead of the minimum payment
    let fixed = ComparativeAnalyzer::new(&chunked)
        .with_baseline(BaselineStrategy::FixedPayment(Money::from_major(500)))
        .compare()?;
    println!("vs fixed $500/month:");
    println!("  baseline months:   {}", fixed.baseline.months_to_payoff);
    println!("  interest saved:    ${}", fixed.interest_saved.to_cents());

    Ok(())
}
