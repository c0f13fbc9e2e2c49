use chrono::{Datelike, Months, NaiveDate};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, SimulationError};

/// source of day counts for each simulated month
///
/// month 1 is the calendar month containing the reference date; the engine
/// never reads the wall clock itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayCalendar {
    /// real calendar months counted from a reference date
    FromDate(NaiveDate),
    /// explicit day counts, cycled when the run outlasts the sequence
    Fixed(Vec<u32>),
}

impl DayCalendar {
    /// anchor on the provider's current date
    pub fn from_time_provider(time_provider: &SafeTimeProvider) -> Self {
        DayCalendar::FromDate(time_provider.now().date_naive())
    }

    /// first day of the given 1-based month; only defined for date calendars
    pub fn month_start(&self, month_index: u32) -> Option<NaiveDate> {
        match self {
            DayCalendar::FromDate(reference) => {
                let offset = month_index.checked_sub(1)?;
                reference
                    .with_day(1)?
                    .checked_add_months(Months::new(offset))
            }
            DayCalendar::Fixed(_) => None,
        }
    }

    /// last day of the given 1-based month; only defined for date calendars
    pub fn month_end(&self, month_index: u32) -> Option<NaiveDate> {
        let start = self.month_start(month_index)?;
        let days = days_in_calendar_month(start.year(), start.month())?;
        start.with_day(days)
    }

    /// number of days in the given 1-based month
    pub fn days_in_month(&self, month_index: u32) -> Result<u32> {
        if month_index == 0 {
            return Err(SimulationError::InvalidDate {
                message: "month index is 1-based".to_string(),
            });
        }

        match self {
            DayCalendar::FromDate(_) => {
                let start = self.month_start(month_index).ok_or_else(|| {
                    SimulationError::InvalidDate {
                        message: format!("month {} is outside the supported date range", month_index),
                    }
                })?;
                days_in_calendar_month(start.year(), start.month()).ok_or_else(|| {
                    SimulationError::InvalidDate {
                        message: format!("cannot count days for {}", start),
                    }
                })
            }
            DayCalendar::Fixed(days) => {
                if days.is_empty() {
                    return Err(SimulationError::InvalidConfiguration {
                        message: "fixed day calendar is empty".to_string(),
                    });
                }
                Ok(days[((month_index - 1) as usize) % days.len()])
            }
        }
    }

    /// check every month up to the cap can be resolved
    pub fn validate(&self, max_months: u32) -> Result<()> {
        match self {
            DayCalendar::FromDate(_) => {
                if max_months > 0 && self.month_start(max_months).is_none() {
                    return Err(SimulationError::InvalidDate {
                        message: format!("reference date cannot be extended by {} months", max_months),
                    });
                }
                Ok(())
            }
            DayCalendar::Fixed(days) => {
                if days.is_empty() {
                    return Err(SimulationError::InvalidConfiguration {
                        message: "fixed day calendar is empty".to_string(),
                    });
                }
                if let Some(bad) = days.iter().find(|d| !(28..=31).contains(*d)) {
                    return Err(SimulationError::InvalidConfiguration {
                        message: format!("days in month must be 28-31, got {}", bad),
                    });
                }
                Ok(())
            }
        }
    }
}

/// actual days in a calendar month
pub fn days_in_calendar_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = first.checked_add_months(Months::new(1))?;
    Some((next - first).num_days() as u32)
}
