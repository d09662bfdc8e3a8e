use chrono::{Duration, NaiveDate};

/// Scoring period 1 of the 2025-26 season.
pub const DEFAULT_SEASON_START: &str = "2025-10-21";

/// Converts between scoring periods and calendar dates. Period 1 is the
/// season's opening day and every period is one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonCalendar {
    start: NaiveDate,
}

impl SeasonCalendar {
    pub fn new(start: NaiveDate) -> Self {
        SeasonCalendar { start }
    }

    pub fn period_to_date(&self, scoring_period: u32) -> NaiveDate {
        self.start + Duration::days(scoring_period as i64 - 1)
    }

    /// `None` for dates before opening day.
    pub fn date_to_period(&self, date: NaiveDate) -> Option<u32> {
        let offset = (date - self.start).num_days();
        if offset < 0 {
            return None;
        }
        Some(offset as u32 + 1)
    }

    /// Period for `today`, clamped to 1 before the season starts.
    pub fn current_period(&self, today: NaiveDate) -> u32 {
        self.date_to_period(today).unwrap_or(1)
    }

    /// Full English weekday name, e.g. "Tuesday".
    pub fn weekday_name(&self, scoring_period: u32) -> String {
        self.period_to_date(scoring_period).format("%A").to_string()
    }
}

impl Default for SeasonCalendar {
    fn default() -> Self {
        // 2025-10-21 is a valid calendar date
        SeasonCalendar::new(NaiveDate::from_ymd_opt(2025, 10, 21).unwrap_or_default())
    }
}
