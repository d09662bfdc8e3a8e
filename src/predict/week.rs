//! Matchup-week schedule windows.
//!
//! A matchup week is a run of consecutive scoring periods (one per calendar
//! day). Which periods belong to which week is season-specific, so the
//! mapping is a pluggable [`WeekToPeriodResolver`]; the [`Week`] itself just
//! records the resolved range and which pro teams play on each day of it.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use super::error::ForecastError;

/// Longest window a table entry may cover.
pub const MAX_WEEK_DAYS: u32 = 31;

/// Anything that can say which pro teams have a game in a scoring period.
pub trait ScheduleSource {
    fn teams_playing(&self, scoring_period: u32) -> BTreeSet<String>;
}

impl ScheduleSource for BTreeMap<u32, BTreeSet<String>> {
    fn teams_playing(&self, scoring_period: u32) -> BTreeSet<String> {
        self.get(&scoring_period).cloned().unwrap_or_default()
    }
}

/// Maps a 1-based matchup week to its inclusive scoring-period range.
pub trait WeekToPeriodResolver: Send + Sync {
    fn period_range(&self, week_index: u32) -> Result<(u32, u32), ForecastError>;
}

/// The fixed convention the league has used historically: week 1 is eight
/// days (periods 0-7), every later week is seven (`7(w-1)..=7w-1`).
///
/// Not calendar-aware. Use [`TableWeekResolver`] for seasons whose weeks
/// don't line up with it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyWeekResolver;

impl WeekToPeriodResolver for LegacyWeekResolver {
    fn period_range(&self, week_index: u32) -> Result<(u32, u32), ForecastError> {
        match week_index {
            0 => Err(ForecastError::InvalidWeek(week_index)),
            1 => Ok((0, 7)),
            w => {
                let last = w
                    .checked_mul(7)
                    .and_then(|p| p.checked_sub(1))
                    .ok_or(ForecastError::InvalidWeek(w))?;
                Ok((last - 6, last))
            }
        }
    }
}

/// Explicit week -> period table, week 1 first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableWeekResolver {
    ranges: BTreeMap<u32, (u32, u32)>,
}

impl TableWeekResolver {
    pub fn new(ranges: impl IntoIterator<Item = (u32, u32)>) -> Self {
        let ranges = ranges
            .into_iter()
            .enumerate()
            .map(|(i, range)| (i as u32 + 1, range))
            .collect();
        TableWeekResolver { ranges }
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

impl WeekToPeriodResolver for TableWeekResolver {
    fn period_range(&self, week_index: u32) -> Result<(u32, u32), ForecastError> {
        if week_index == 0 {
            return Err(ForecastError::InvalidWeek(week_index));
        }
        self.ranges
            .get(&week_index)
            .copied()
            .ok_or(ForecastError::UnknownWeek(week_index))
    }
}

/// Parses `"0-7,8-14,15-21"` (whitespace tolerant). Each range covers at
/// most [`MAX_WEEK_DAYS`] periods.
impl FromStr for TableWeekResolver {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut ranges = Vec::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let invalid = || ForecastError::InvalidWeekRange(part.to_string());
            let (first, last) = part.split_once('-').ok_or_else(invalid)?;
            let first: u32 = first.trim().parse().map_err(|_| invalid())?;
            let last: u32 = last.trim().parse().map_err(|_| invalid())?;
            if first > last || last - first >= MAX_WEEK_DAYS {
                return Err(invalid());
            }
            ranges.push((first, last));
        }
        Ok(TableWeekResolver::new(ranges))
    }
}

/// Resolved schedule window for one matchup week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Week {
    pub week_index: u32,
    /// Inclusive (first, last) scoring periods
    pub scoring_period: (u32, u32),
    /// Pro teams with a game, one entry per day of the window
    pub team_game_list: Vec<BTreeSet<String>>,
}

impl Week {
    pub fn resolve<S>(
        source: &S,
        resolver: &dyn WeekToPeriodResolver,
        week_index: u32,
    ) -> Result<Self, ForecastError>
    where
        S: ScheduleSource + ?Sized,
    {
        let (first, last) = resolver.period_range(week_index)?;
        let team_game_list = (first..=last)
            .map(|period| source.teams_playing(period))
            .collect();
        Ok(Week {
            week_index,
            scoring_period: (first, last),
            team_game_list,
        })
    }

    pub fn num_days(&self) -> usize {
        self.team_game_list.len()
    }

    pub fn scoring_period_of(&self, day: usize) -> u32 {
        self.scoring_period.0 + day as u32
    }

    pub fn check_start_day(&self, start_day: usize) -> Result<(), ForecastError> {
        if start_day >= self.num_days() {
            return Err(ForecastError::StartDayOutOfRange {
                start_day,
                days: self.num_days(),
            });
        }
        Ok(())
    }

    /// Number of game days each pro team has in this window.
    pub fn cumulate_number_of_games(&self) -> BTreeMap<String, u32> {
        let mut games: BTreeMap<String, u32> = BTreeMap::new();
        for day in &self.team_game_list {
            for team in day {
                *games.entry(team.clone()).or_default() += 1;
            }
        }
        games
    }
}
