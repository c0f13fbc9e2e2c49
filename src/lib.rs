pub mod calendar;
pub mod cashflow;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod interest;
pub mod payoff;
pub mod types;

// re-export key types
pub use calendar::DayCalendar;
pub use cashflow::{CashFlowPlanner, MonthlyCashPlan};
pub use config::{PolicyConstants, SimulationConfig, SimulationConfigBuilder};
pub use decimal::{Money, Rate};
pub use errors::{Result, SimulationError};
pub use interest::{DailyAccrual, DailyAccrualSimulator, RateConverter};
pub use payoff::{
    BaselineStrategy, ComparativeAnalyzer, ComparisonResult, ComparisonView, MonthStrategy,
    PayoffResult, PayoffScheduler, PayoffView,
};
pub use types::{
    AccountId, CashFlowProfile, ChunkPlan, LoanAccount, MonthLedgerEntry, PayoffState,
    UtilizationState,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
