use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Roster-eligibility status as reported by the league. Players without a
/// reported status are treated as `Active`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InjuryStatus {
    Active,
    DayToDay,
    Out,
    Suspension,
    /// Any status string the league reports that we don't model explicitly.
    Other(String),
}

impl InjuryStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "" | "ACTIVE" | "NORMAL" => InjuryStatus::Active,
            "DAY_TO_DAY" | "DTD" => InjuryStatus::DayToDay,
            "OUT" | "O" => InjuryStatus::Out,
            "SUSPENSION" | "SSPD" => InjuryStatus::Suspension,
            other => InjuryStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            InjuryStatus::Active => "ACTIVE",
            InjuryStatus::DayToDay => "DAY_TO_DAY",
            InjuryStatus::Out => "OUT",
            InjuryStatus::Suspension => "SUSPENSION",
            InjuryStatus::Other(s) => s,
        }
    }
}

impl From<String> for InjuryStatus {
    fn from(raw: String) -> Self {
        InjuryStatus::parse(&raw)
    }
}

impl From<InjuryStatus> for String {
    fn from(status: InjuryStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for InjuryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-category stat values for one stat period, e.g. `"PTS" -> 21.4`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatLine(BTreeMap<String, f64>);

impl StatLine {
    /// Value for a category; categories the league didn't report count as 0.
    pub fn get(&self, category: &str) -> f64 {
        self.0.get(category).copied().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for StatLine {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        StatLine(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// One stat window ("last 15 days", "season projection", ...) for a player.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatPeriod {
    /// Per-game averages; the only block the point estimator reads.
    #[serde(default)]
    pub avg: Option<StatLine>,
    #[serde(default)]
    pub total: Option<StatLine>,
}

/// A rostered NBA player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: i64,
    pub name: String,
    /// Pro team abbreviation, e.g. "LAL"
    pub pro_team: String,
    #[serde(default)]
    pub injury_status: Option<InjuryStatus>,
    #[serde(default)]
    pub eligible_slots: Vec<u32>,
    /// Stat period label (e.g. "2026_last_30") -> stat blocks
    #[serde(default)]
    pub stats: BTreeMap<String, StatPeriod>,
}

impl Player {
    /// Effective injury status, defaulting to `Active` when none is reported.
    pub fn status(&self) -> InjuryStatus {
        self.injury_status.clone().unwrap_or(InjuryStatus::Active)
    }
}

/// A fantasy team and its roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub roster: Vec<Player>,
}

/// One head-to-head pairing in the fantasy schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matchup {
    pub matchup_period: u32,
    pub home_team_id: i64,
    /// `None` on a bye week
    #[serde(default)]
    pub away_team_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_injury_status_parse() {
        assert_eq!(InjuryStatus::parse("ACTIVE"), InjuryStatus::Active);
        assert_eq!(InjuryStatus::parse(""), InjuryStatus::Active);
        assert_eq!(InjuryStatus::parse("day_to_day"), InjuryStatus::DayToDay);
        assert_eq!(InjuryStatus::parse("OUT"), InjuryStatus::Out);
        assert_eq!(
            InjuryStatus::parse("INJURY_RESERVE"),
            InjuryStatus::Other("INJURY_RESERVE".into())
        );
    }

    #[test]
    fn test_injury_status_serde_uses_league_strings() {
        let json = serde_json::to_string(&InjuryStatus::DayToDay).unwrap();
        assert_eq!(json, r#""DAY_TO_DAY""#);
        let back: InjuryStatus = serde_json::from_str(r#""OUT""#).unwrap();
        assert_eq!(back, InjuryStatus::Out);
    }

    #[test]
    fn test_stat_line_missing_category_is_zero() {
        let line: StatLine = [("PTS", 20.0)].into_iter().collect();
        assert_eq!(line.get("PTS"), 20.0);
        assert_eq!(line.get("BLK"), 0.0);
    }

    #[test]
    fn test_player_without_status_is_active() {
        let json = r#"{"id": 1, "name": "A", "pro_team": "LAL"}"#;
        let player: Player = serde_json::from_str(json).unwrap();
        assert_eq!(player.status(), InjuryStatus::Active);
        assert!(player.stats.is_empty());
    }
}
