use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

mod config;
mod league;
mod predict;
mod providers;
mod report;

use config::{Config, OutputFormat};
use league::League;
use predict::{
    predict_week, remaining_days_forecast, ForecastOptions, SeasonCalendar, WeekToPeriodResolver,
};
use providers::{EspnClient, LeagueProvider, SnapshotProvider};
use report::WeekReport;

fn build_provider(config: &Config) -> Result<Box<dyn LeagueProvider>> {
    if let Some(path) = &config.snapshot_path {
        return Ok(Box::new(SnapshotProvider::new(path.clone())));
    }
    let league_id = config
        .league_id
        .context("LEAGUE_ID is required unless SNAPSHOT_PATH is set")?;
    let client = EspnClient::new(
        &config.espn_api_url,
        league_id,
        config.season_year,
        config.espn_s2.as_deref(),
        config.swid.as_deref(),
    )?;
    Ok(Box::new(client))
}

fn week_report(
    league: &League,
    resolver: &dyn WeekToPeriodResolver,
    week_index: u32,
    options: &ForecastOptions,
    calendar: &SeasonCalendar,
) -> Result<WeekReport> {
    let prediction = predict_week(league, resolver, week_index, options)
        .with_context(|| format!("Failed to forecast week {}", week_index))?;
    let remaining = remaining_days_forecast(league, resolver, week_index, options)
        .with_context(|| format!("Failed to build remaining-days table for week {}", week_index))?;
    Ok(WeekReport::new(league, &prediction, &remaining, calendar))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    config.validate()?;

    let provider = build_provider(&config)?;
    info!("Fetching league from {}", provider.name());
    let league = provider.fetch_league().await?;
    info!(
        "League {} ({}): {} teams, {} rostered players, current week {}",
        league.league_id,
        league.year,
        league.teams.len(),
        league.roster_size(),
        league.current_matchup_period
    );

    let calendar = config.calendar();
    let resolver = config.week_resolver()?;
    let options = config.forecast_options();
    let week_index = config
        .week_index
        .unwrap_or_else(|| league.current_matchup_period.max(1));

    let period = calendar.current_period(chrono::Local::now().date_naive());
    if period != league.current_scoring_period {
        warn!(
            "Calendar says scoring period {}, league says {}; check SEASON_START",
            period, league.current_scoring_period
        );
    }

    let mut reports = vec![week_report(
        &league,
        resolver.as_ref(),
        week_index,
        &options,
        &calendar,
    )?];
    if config.include_next_week {
        // The override day only applies to the current week.
        let next_options = options.clone().with_start_day(0);
        let next_week = week_index
            .checked_add(1)
            .context("No week follows the requested week")?;
        reports.push(week_report(
            &league,
            resolver.as_ref(),
            next_week,
            &next_options,
            &calendar,
        )?);
    }

    match config.output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        OutputFormat::Table => {
            for (i, report) in reports.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print!("{}", report);
            }
        }
    }

    Ok(())
}
