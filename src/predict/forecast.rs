//! League-wide weekly forecasts.
//!
//! Both entry points resolve the matchup week once, then run a
//! [`RosterWeekPredictor`] per fantasy team. All data comes from an already
//! fetched [`League`]; nothing here performs I/O.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::league::League;

use super::error::ForecastError;
use super::roster::{DailyOutcome, ForecastOptions, RosterWeekPredictor, WeekForecast};
use super::week::{Week, WeekToPeriodResolver};

/// Per-team forecast for one matchup week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekPrediction {
    pub week: Week,
    pub start_day: usize,
    /// Team name -> usable roster-slot days
    pub game_counts: BTreeMap<String, u32>,
    /// Team name -> (mean, std_dev)
    pub forecasts: BTreeMap<String, WeekForecast>,
}

/// Per-team suffix forecasts: entry `i` covers day `start_day + i` through
/// the last day of the week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemainingDaysForecast {
    pub week: Week,
    pub start_day: usize,
    pub by_team: BTreeMap<String, Vec<WeekForecast>>,
}

/// Resolve the week and make sure the override day falls inside it.
pub fn resolve_window(
    league: &League,
    resolver: &dyn WeekToPeriodResolver,
    week_index: u32,
    options: &ForecastOptions,
) -> Result<Week, ForecastError> {
    let week = Week::resolve(league, resolver, week_index)?;
    week.check_start_day(options.start_day)?;
    debug!(
        "Week {} covers scoring periods {}-{} ({} days, starting at day {})",
        week_index,
        week.scoring_period.0,
        week.scoring_period.1,
        week.num_days(),
        options.start_day
    );
    Ok(week)
}

pub fn predict_week(
    league: &League,
    resolver: &dyn WeekToPeriodResolver,
    week_index: u32,
    options: &ForecastOptions,
) -> Result<WeekPrediction, ForecastError> {
    let week = resolve_window(league, resolver, week_index, options)?;

    let mut game_counts = BTreeMap::new();
    let mut forecasts = BTreeMap::new();
    for team in &league.teams {
        let predictor = RosterWeekPredictor::new(&team.roster, &week);
        let forecast = predictor.predict(options);
        let games = predictor.count_games(options);
        debug!(
            "{}: {:.1} ± {:.1} over {} games",
            team.name, forecast.mean, forecast.std_dev, games
        );
        forecasts.insert(team.name.clone(), forecast);
        game_counts.insert(team.name.clone(), games);
    }

    info!(
        "Predicted week {} for {} teams",
        week_index,
        forecasts.len()
    );
    Ok(WeekPrediction {
        week,
        start_day: options.start_day,
        game_counts,
        forecasts,
    })
}

/// Suffix sums over daily outcomes: element `i` is the forecast for days
/// `i..` with the variance summed before the square root.
pub fn cumulative_from_days(days: &[DailyOutcome]) -> Vec<WeekForecast> {
    let mut suffix = Vec::with_capacity(days.len());
    let mut mean = 0.0;
    let mut variance = 0.0;
    for day in days.iter().rev() {
        mean += day.mean;
        variance += day.variance;
        suffix.push(WeekForecast {
            mean,
            std_dev: f64::sqrt(variance),
        });
    }
    suffix.reverse();
    suffix
}

pub fn remaining_days_forecast(
    league: &League,
    resolver: &dyn WeekToPeriodResolver,
    week_index: u32,
    options: &ForecastOptions,
) -> Result<RemainingDaysForecast, ForecastError> {
    let week = resolve_window(league, resolver, week_index, options)?;

    let by_team: BTreeMap<String, Vec<WeekForecast>> = league
        .teams
        .iter()
        .map(|team| {
            let daily = RosterWeekPredictor::new(&team.roster, &week).daily_outcomes(options);
            (team.name.clone(), cumulative_from_days(&daily))
        })
        .collect();

    info!(
        "Remaining-days table for week {}: {} teams x {} start days",
        week_index,
        by_team.len(),
        week.num_days() - options.start_day
    );
    Ok(RemainingDaysForecast {
        week,
        start_day: options.start_day,
        by_team,
    })
}
