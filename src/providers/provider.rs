use anyhow::Result;
use async_trait::async_trait;

use crate::league::League;

/// Trait that every league data source must implement.
#[async_trait]
pub trait LeagueProvider: Send + Sync {
    /// Fetch teams, rosters, player stats and the pro schedule in one go.
    async fn fetch_league(&self) -> Result<League>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}
