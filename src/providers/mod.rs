pub mod constants;
pub mod espn;
pub mod provider;
pub mod snapshot;

pub use espn::EspnClient;
pub use provider::LeagueProvider;
pub use snapshot::SnapshotProvider;
