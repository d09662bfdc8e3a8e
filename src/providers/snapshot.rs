use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

use crate::league::League;

use super::provider::LeagueProvider;

/// Loads a previously exported league from a JSON file, for offline runs.
pub struct SnapshotProvider {
    path: PathBuf,
}

impl SnapshotProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SnapshotProvider { path: path.into() }
    }
}

#[async_trait]
impl LeagueProvider for SnapshotProvider {
    fn name(&self) -> &str {
        "Snapshot"
    }

    async fn fetch_league(&self) -> Result<League> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read league snapshot {}", self.path.display()))?;
        let league: League = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid league snapshot {}", self.path.display()))?;
        info!(
            "Loaded league {} ({}) from {}: {} teams",
            league.league_id,
            league.year,
            self.path.display(),
            league.teams.len()
        );
        Ok(league)
    }
}
