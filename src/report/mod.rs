//! Presentation of forecasts: terminal tables via `tabled` and a
//! serializable bundle for `--output json`.

use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::league::League;
use crate::predict::{RemainingDaysForecast, SeasonCalendar, Week, WeekForecast, WeekPrediction};

#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct WeekRow {
    #[tabled(rename = "Team")]
    pub team: String,
    #[tabled(rename = "Games")]
    pub games: u32,
    #[tabled(rename = "Mean", display_with = "one_decimal")]
    pub mean: f64,
    #[tabled(rename = "Std", display_with = "one_decimal")]
    pub std_dev: f64,
    #[tabled(rename = "Low", display_with = "one_decimal")]
    pub low: f64,
    #[tabled(rename = "High", display_with = "one_decimal")]
    pub high: f64,
}

/// One head-to-head pairing with both sides' forecasts. Bye weeks have no
/// away side and no spread.
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct MatchupRow {
    #[tabled(rename = "Home")]
    pub home: String,
    #[tabled(rename = "Mean", display_with = "one_decimal")]
    pub home_mean: f64,
    #[tabled(rename = "Games")]
    pub home_games: u32,
    #[tabled(rename = "Away", display_with = "away_or_bye")]
    pub away: Option<String>,
    #[tabled(rename = "Mean", display_with = "maybe_one_decimal")]
    pub away_mean: Option<f64>,
    #[tabled(rename = "Games", display_with = "maybe_count")]
    pub away_games: Option<u32>,
    /// home mean - away mean
    #[tabled(rename = "+/-", display_with = "signed_spread")]
    pub spread: Option<f64>,
}

fn one_decimal(value: &f64) -> String {
    format!("{:.1}", value)
}

fn maybe_one_decimal(value: &Option<f64>) -> String {
    value.as_ref().map_or_else(|| "-".to_string(), one_decimal)
}

fn maybe_count(value: &Option<u32>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn away_or_bye(away: &Option<String>) -> String {
    away.clone().unwrap_or_else(|| "BYE".to_string())
}

fn signed_spread(spread: &Option<f64>) -> String {
    spread.map_or_else(|| "-".to_string(), |s| format!("{:+.1}", s))
}

fn by_mean_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

fn window_mean(cells: &[WeekForecast]) -> f64 {
    cells.first().map(|c| c.mean).unwrap_or(0.0)
}

fn plus_minus(forecast: &WeekForecast) -> String {
    format!("{:.1} ± {:.1}", forecast.mean, forecast.std_dev)
}

/// Week forecast per team, best first.
pub fn week_table(prediction: &WeekPrediction) -> Vec<WeekRow> {
    let mut rows: Vec<WeekRow> = prediction
        .forecasts
        .iter()
        .map(|(team, forecast)| WeekRow {
            team: team.clone(),
            games: prediction.game_counts.get(team).copied().unwrap_or(0),
            mean: forecast.mean,
            std_dev: forecast.std_dev,
            low: forecast.low(),
            high: forecast.high(),
        })
        .collect();
    rows.sort_by(|a, b| by_mean_desc(a.mean, b.mean));
    rows
}

/// Column labels for the remaining-days table, e.g. "Friday (Friday to Sunday)".
pub fn remaining_days_labels(
    week: &Week,
    start_day: usize,
    calendar: &SeasonCalendar,
) -> Vec<String> {
    let last = calendar.weekday_name(week.scoring_period.1);
    (start_day..week.num_days())
        .map(|day| {
            let first = calendar.weekday_name(week.scoring_period_of(day));
            format!("{} ({} to {})", first, first, last)
        })
        .collect()
}

/// `[team, "m ± s", ...]` rows ordered by the full remaining-window mean.
pub fn remaining_days_rows(by_team: &BTreeMap<String, Vec<WeekForecast>>) -> Vec<Vec<String>> {
    let mut teams: Vec<(&String, &Vec<WeekForecast>)> = by_team.iter().collect();
    teams.sort_by(|a, b| by_mean_desc(window_mean(a.1), window_mean(b.1)));
    teams
        .into_iter()
        .map(|(team, cells)| {
            let mut row = vec![team.clone()];
            row.extend(cells.iter().map(plus_minus));
            row
        })
        .collect()
}

/// The header row depends on the start day, so the table is built row by row.
pub fn remaining_days_table(
    labels: &[String],
    by_team: &BTreeMap<String, Vec<WeekForecast>>,
) -> Table {
    let mut builder = Builder::default();
    let mut header = vec!["Team Name".to_string()];
    header.extend(labels.iter().cloned());
    builder.push_record(header);
    for row in remaining_days_rows(by_team) {
        builder.push_record(row);
    }
    let mut table = builder.build();
    table.with(Style::psql());
    table
}

pub fn matchup_table(league: &League, prediction: &WeekPrediction) -> Vec<MatchupRow> {
    let mean_of = |team: &str| prediction.forecasts.get(team).map(|f| f.mean).unwrap_or(0.0);
    let games_of = |team: &str| prediction.game_counts.get(team).copied().unwrap_or(0);

    league
        .matchups_for(prediction.week.week_index)
        .into_iter()
        .map(|(home, away)| {
            let home_mean = mean_of(&home);
            let away_mean = away.as_deref().map(mean_of);
            MatchupRow {
                home_games: games_of(&home),
                away_games: away.as_deref().map(games_of),
                spread: away_mean.map(|a| home_mean - a),
                home,
                home_mean,
                away,
                away_mean,
            }
        })
        .collect()
}

/// Everything printed for one matchup week.
#[derive(Debug, Clone, Serialize)]
pub struct WeekReport {
    pub week_index: u32,
    pub scoring_period: (u32, u32),
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub start_day: usize,
    pub teams: Vec<WeekRow>,
    /// Pro team abbreviation -> game days inside the window
    pub pro_team_games: BTreeMap<String, u32>,
    pub remaining_labels: Vec<String>,
    pub remaining_days: BTreeMap<String, Vec<WeekForecast>>,
    pub matchups: Vec<MatchupRow>,
}

impl WeekReport {
    pub fn new(
        league: &League,
        prediction: &WeekPrediction,
        remaining: &RemainingDaysForecast,
        calendar: &SeasonCalendar,
    ) -> Self {
        let (first, last) = prediction.week.scoring_period;
        WeekReport {
            week_index: prediction.week.week_index,
            scoring_period: (first, last),
            first_date: calendar.period_to_date(first),
            last_date: calendar.period_to_date(last),
            start_day: prediction.start_day,
            teams: week_table(prediction),
            pro_team_games: prediction.week.cumulate_number_of_games(),
            remaining_labels: remaining_days_labels(&remaining.week, remaining.start_day, calendar),
            remaining_days: remaining.by_team.clone(),
            matchups: matchup_table(league, prediction),
        }
    }
}

impl fmt::Display for WeekReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Week {} ({} to {}, scoring periods {}-{})",
            self.week_index,
            self.first_date,
            self.last_date,
            self.scoring_period.0,
            self.scoring_period.1
        )?;
        writeln!(f)?;
        writeln!(f, "{}", Table::new(&self.teams).with(Style::psql()))?;

        if !self.pro_team_games.is_empty() {
            let games: Vec<String> = self
                .pro_team_games
                .iter()
                .map(|(team, n)| format!("{} {}", team, n))
                .collect();
            writeln!(f)?;
            writeln!(f, "Pro team games: {}", games.join(", "))?;
        }

        writeln!(f)?;
        writeln!(f, "Remaining days")?;
        writeln!(
            f,
            "{}",
            remaining_days_table(&self.remaining_labels, &self.remaining_days)
        )?;

        if !self.matchups.is_empty() {
            writeln!(f)?;
            writeln!(f, "Matchups")?;
            writeln!(f, "{}", Table::new(&self.matchups).with(Style::psql()))?;
        }
        Ok(())
    }
}
