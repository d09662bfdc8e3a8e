pub mod calendar;
pub mod error;
pub mod forecast;
pub mod roster;
pub mod scoring;
pub mod week;

pub use calendar::SeasonCalendar;
pub use forecast::{predict_week, remaining_days_forecast, RemainingDaysForecast, WeekPrediction};
pub use roster::{ForecastOptions, WeekForecast};
pub use week::{LegacyWeekResolver, TableWeekResolver, Week, WeekToPeriodResolver};
