use thiserror::Error;

/// Errors raised by the forecasting engine before any arithmetic happens.
///
/// The engine itself never fails on data quality (missing stat blocks,
/// missing categories, empty days all degrade to zero contributions); these
/// variants only cover out-of-range requests.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ForecastError {
    #[error("week index must be 1 or greater, got {0}")]
    InvalidWeek(u32),

    #[error("no scoring-period range configured for week {0}")]
    UnknownWeek(u32),

    #[error("start day {start_day} is outside the {days}-day week")]
    StartDayOutOfRange { start_day: usize, days: usize },

    #[error("invalid week range '{0}', expected FIRST-LAST with FIRST <= LAST, at most 31 days")]
    InvalidWeekRange(String),
}
