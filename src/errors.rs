use thiserror::Error;

use crate::decimal::{Money, Rate};

/// boundary validation failures, raised before any month is simulated
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("invalid interest rate: {rate}")]
    InvalidRate {
        rate: Rate,
    },

    #[error("invalid balance: {balance}")]
    InvalidBalance {
        balance: Money,
    },

    #[error("invalid chunk configuration: {message}")]
    InvalidChunkConfig {
        message: String,
    },

    #[error("invalid cash flow: {field} is {amount}")]
    InvalidCashFlow {
        field: &'static str,
        amount: Money,
    },

    #[error("invalid credit limit: {limit}")]
    InvalidCreditLimit {
        limit: Money,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, SimulationError>;
