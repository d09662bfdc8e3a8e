use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::league::models::InjuryStatus;
use crate::predict::calendar::DEFAULT_SEASON_START;
use crate::predict::roster::DEFAULT_DAILY_CAP;
use crate::predict::{
    ForecastOptions, LegacyWeekResolver, SeasonCalendar, TableWeekResolver, WeekToPeriodResolver,
};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Fantasy basketball weekly outlook
#[derive(Parser, Debug, Clone)]
#[command(name = "hoops-outlook", version, about)]
pub struct Config {
    /// ESPN fantasy league id (required unless --snapshot-path is given)
    #[arg(long, env = "LEAGUE_ID")]
    pub league_id: Option<i64>,

    /// Season year as ESPN labels it (2026 = the 2025-26 season)
    #[arg(long, env = "SEASON_YEAR", default_value = "2026")]
    pub season_year: i32,

    /// `espn_s2` cookie for private leagues
    #[arg(long, env = "ESPN_S2")]
    pub espn_s2: Option<String>,

    /// `SWID` cookie for private leagues
    #[arg(long, env = "SWID")]
    pub swid: Option<String>,

    /// ESPN fantasy API base URL
    #[arg(
        long,
        env = "ESPN_API_URL",
        default_value = "https://lm-api-reads.fantasy.espn.com/apis/v3"
    )]
    pub espn_api_url: String,

    /// Read the league from a JSON snapshot instead of calling ESPN
    #[arg(long, env = "SNAPSHOT_PATH")]
    pub snapshot_path: Option<PathBuf>,

    /// Matchup week to forecast (defaults to the league's current week)
    #[arg(long, env = "WEEK_INDEX")]
    pub week_index: Option<u32>,

    /// First day of the week to count, 0 = first day
    #[arg(long, env = "DAY_OF_WEEK_OVERRIDE", default_value = "0")]
    pub day_of_week_override: usize,

    /// Injury statuses that may still be started (comma separated)
    #[arg(long, env = "INJURY_STATUS", value_delimiter = ',', default_value = "ACTIVE")]
    pub injury_status: Vec<String>,

    /// Max players counted per day
    #[arg(long, env = "DAILY_CAP", default_value_t = DEFAULT_DAILY_CAP)]
    pub daily_cap: usize,

    /// Stat period labels for the point estimate (comma separated;
    /// defaults to last 30/15/7 and projected for the season)
    #[arg(long, env = "STAT_PERIODS", value_delimiter = ',')]
    pub stat_periods: Vec<String>,

    /// Explicit week ranges, e.g. "0-7,8-14,15-21"
    #[arg(long, env = "WEEK_RANGES")]
    pub week_ranges: Option<String>,

    /// Date of scoring period 1
    #[arg(long, env = "SEASON_START", default_value = DEFAULT_SEASON_START)]
    pub season_start: NaiveDate,

    /// Output format
    #[arg(long, env = "OUTPUT", value_enum, default_value = "table")]
    pub output: OutputFormat,

    /// Also forecast the following week
    #[arg(long, env = "INCLUDE_NEXT_WEEK", default_value = "false")]
    pub include_next_week: bool,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.league_id.is_none() && self.snapshot_path.is_none() {
            anyhow::bail!("LEAGUE_ID is required unless SNAPSHOT_PATH is set");
        }
        if self.daily_cap == 0 {
            anyhow::bail!("daily_cap must be at least 1");
        }
        if self.week_index == Some(0) {
            anyhow::bail!("week_index must be 1 or greater");
        }
        if self.injury_statuses().is_empty() {
            anyhow::bail!("injury_status must list at least one status");
        }
        if self.stat_periods.iter().any(|p| p.trim().is_empty()) {
            anyhow::bail!("stat_periods must not contain empty labels");
        }
        if let Some(ranges) = &self.week_ranges {
            let table: TableWeekResolver = ranges.parse()?;
            if table.is_empty() {
                anyhow::bail!("week_ranges must list at least one week");
            }
        }
        Ok(())
    }

    pub fn injury_statuses(&self) -> Vec<InjuryStatus> {
        self.injury_status
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(InjuryStatus::parse)
            .collect()
    }

    pub fn stat_periods(&self) -> Vec<String> {
        if self.stat_periods.is_empty() {
            ForecastOptions::for_season(self.season_year).stat_periods
        } else {
            self.stat_periods.iter().map(|p| p.trim().to_string()).collect()
        }
    }

    pub fn forecast_options(&self) -> ForecastOptions {
        ForecastOptions::for_season(self.season_year)
            .with_start_day(self.day_of_week_override)
            .with_injury_statuses(self.injury_statuses())
            .with_daily_cap(self.daily_cap)
            .with_stat_periods(self.stat_periods())
    }

    pub fn week_resolver(&self) -> anyhow::Result<Box<dyn WeekToPeriodResolver>> {
        match &self.week_ranges {
            Some(ranges) => Ok(Box::new(ranges.parse::<TableWeekResolver>()?)),
            None => Ok(Box::new(LegacyWeekResolver)),
        }
    }

    pub fn calendar(&self) -> SeasonCalendar {
        SeasonCalendar::new(self.season_start)
    }
}
