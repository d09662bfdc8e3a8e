use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::iter::Skip;
use std::slice;

use crate::league::models::{InjuryStatus, Player};

use super::scoring::{default_stat_periods, estimate, PointEstimate};
use super::week::Week;

/// ESPN only counts a limited number of active slots per day.
pub const DEFAULT_DAILY_CAP: usize = 9;

/// Knobs shared by every roster forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastOptions {
    /// First day of the window to count (0 = first day of the week)
    pub start_day: usize,
    /// Injury statuses that may still be started
    pub injury_statuses: Vec<InjuryStatus>,
    /// Max players whose points count on a single day
    pub daily_cap: usize,
    /// Stat-period labels fed to the point estimator
    pub stat_periods: Vec<String>,
}

impl ForecastOptions {
    pub fn for_season(year: i32) -> Self {
        ForecastOptions {
            start_day: 0,
            injury_statuses: vec![InjuryStatus::Active],
            daily_cap: DEFAULT_DAILY_CAP,
            stat_periods: default_stat_periods(year),
        }
    }

    pub fn with_start_day(mut self, start_day: usize) -> Self {
        self.start_day = start_day;
        self
    }

    pub fn with_injury_statuses(mut self, statuses: Vec<InjuryStatus>) -> Self {
        self.injury_statuses = statuses;
        self
    }

    pub fn with_daily_cap(mut self, daily_cap: usize) -> Self {
        self.daily_cap = daily_cap;
        self
    }

    pub fn with_stat_periods(mut self, stat_periods: Vec<String>) -> Self {
        self.stat_periods = stat_periods;
        self
    }

    fn allows(&self, player: &Player) -> bool {
        self.injury_statuses.contains(&player.status())
    }
}

/// Summed expectation and variance of the players counted on one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DailyOutcome {
    pub mean: f64,
    pub variance: f64,
}

/// Week-level (or remaining-days) forecast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WeekForecast {
    pub mean: f64,
    pub std_dev: f64,
}

impl WeekForecast {
    /// Daily variances add for independent days; their square roots don't.
    pub fn from_days<'a>(days: impl IntoIterator<Item = &'a DailyOutcome>) -> Self {
        let (mean, variance) = days
            .into_iter()
            .fold((0.0, 0.0), |(m, v), day| (m + day.mean, v + day.variance));
        WeekForecast {
            mean,
            std_dev: variance.sqrt(),
        }
    }

    pub fn low(&self) -> f64 {
        self.mean - self.std_dev
    }

    pub fn high(&self) -> f64 {
        self.mean + self.std_dev
    }
}

/// Players from `roster` whose pro team plays and whose status is allowed.
pub fn eligible_players<'a>(
    roster: &'a [Player],
    day_teams: &BTreeSet<String>,
    options: &ForecastOptions,
) -> Vec<&'a Player> {
    roster
        .iter()
        .filter(|p| day_teams.contains(&p.pro_team))
        .filter(|p| options.allows(p))
        .collect()
}

/// Emulate one day of "start your best `daily_cap` players".
///
/// Eligible players are ranked by expected points (stable, so ties keep
/// roster order) and only the top `daily_cap` count. Negative estimates still
/// fill slots when fewer positive options are available.
pub fn simulate_day(
    roster: &[Player],
    day_teams: &BTreeSet<String>,
    options: &ForecastOptions,
) -> DailyOutcome {
    let mut estimates: Vec<PointEstimate> = eligible_players(roster, day_teams, options)
        .into_iter()
        .map(|p| estimate(p, &options.stat_periods))
        .collect();

    estimates.sort_by(|a, b| b.mean.partial_cmp(&a.mean).unwrap_or(Ordering::Equal));

    estimates
        .iter()
        .take(options.daily_cap)
        .fold(DailyOutcome::default(), |acc, est| DailyOutcome {
            mean: acc.mean + est.mean,
            variance: acc.variance + est.variance,
        })
}

/// Runs the daily simulation for one fantasy roster across a week window.
pub struct RosterWeekPredictor<'a> {
    roster: &'a [Player],
    week: &'a Week,
}

impl<'a> RosterWeekPredictor<'a> {
    pub fn new(roster: &'a [Player], week: &'a Week) -> Self {
        RosterWeekPredictor { roster, week }
    }

    fn days(&self, options: &ForecastOptions) -> Skip<slice::Iter<'a, BTreeSet<String>>> {
        self.week.team_game_list.iter().skip(options.start_day)
    }

    /// One outcome per day from `start_day` to the end of the window.
    pub fn daily_outcomes(&self, options: &ForecastOptions) -> Vec<DailyOutcome> {
        self.days(options)
            .map(|teams| simulate_day(self.roster, teams, options))
            .collect()
    }

    pub fn predict(&self, options: &ForecastOptions) -> WeekForecast {
        WeekForecast::from_days(&self.daily_outcomes(options))
    }

    /// Usable roster-slot days: eligible players per day, capped like scoring.
    pub fn count_games(&self, options: &ForecastOptions) -> u32 {
        self.days(options)
            .map(|teams| {
                eligible_players(self.roster, teams, options)
                    .len()
                    .min(options.daily_cap) as u32
            })
            .sum()
    }
}
