pub mod accrual;
pub mod rate;

pub use accrual::{DailyAccrual, DailyAccrualSimulator};
pub use rate::RateConverter;
