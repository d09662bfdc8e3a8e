use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub mod models;
use models::*;

use crate::predict::week::ScheduleSource;

/// Everything the forecaster needs from a fantasy league, fetched up front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct League {
    pub league_id: i64,
    pub year: i32,
    pub current_matchup_period: u32,
    pub current_scoring_period: u32,
    pub teams: Vec<Team>,
    /// Scoring period -> pro team abbreviations with a game that day
    #[serde(default)]
    pub pro_schedule: BTreeMap<u32, BTreeSet<String>>,
    #[serde(default)]
    pub matchups: Vec<Matchup>,
}

impl League {
    pub fn team(&self, team_id: i64) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == team_id)
    }

    /// `(home, away)` team names for a matchup period; `away` is `None` on a bye.
    pub fn matchups_for(&self, matchup_period: u32) -> Vec<(String, Option<String>)> {
        self.matchups
            .iter()
            .filter(|m| m.matchup_period == matchup_period)
            .filter_map(|m| {
                let home = self.team(m.home_team_id)?.name.clone();
                let away = m
                    .away_team_id
                    .and_then(|id| self.team(id))
                    .map(|t| t.name.clone());
                Some((home, away))
            })
            .collect()
    }

    pub fn roster_size(&self) -> usize {
        self.teams.iter().map(|t| t.roster.len()).sum()
    }
}

impl ScheduleSource for League {
    fn teams_playing(&self, scoring_period: u32) -> BTreeSet<String> {
        self.pro_schedule.teams_playing(scoring_period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(id: i64, name: &str) -> Team {
        Team {
            id,
            name: name.into(),
            roster: vec![],
        }
    }

    fn league() -> League {
        let mut pro_schedule = BTreeMap::new();
        pro_schedule.insert(3, ["LAL".to_string()].into_iter().collect());
        League {
            league_id: 42,
            year: 2026,
            current_matchup_period: 2,
            current_scoring_period: 10,
            teams: vec![team(1, "Dunkers"), team(2, "Bricklayers"), team(3, "Bench Mob")],
            pro_schedule,
            matchups: vec![
                Matchup {
                    matchup_period: 1,
                    home_team_id: 1,
                    away_team_id: Some(2),
                },
                Matchup {
                    matchup_period: 1,
                    home_team_id: 3,
                    away_team_id: None,
                },
                Matchup {
                    matchup_period: 2,
                    home_team_id: 2,
                    away_team_id: Some(3),
                },
            ],
        }
    }

    #[test]
    fn test_matchups_for_period() {
        let lg = league();
        let week1 = lg.matchups_for(1);
        assert_eq!(
            week1,
            vec![
                ("Dunkers".to_string(), Some("Bricklayers".to_string())),
                ("Bench Mob".to_string(), None),
            ]
        );
        assert_eq!(lg.matchups_for(2).len(), 1);
        assert!(lg.matchups_for(9).is_empty());
    }

    #[test]
    fn test_schedule_source_defaults_to_no_games() {
        let lg = league();
        assert!(lg.teams_playing(3).contains("LAL"));
        assert!(lg.teams_playing(4).is_empty());
    }

    #[test]
    fn test_league_json_round_trip() {
        let lg = league();
        let json = serde_json::to_string(&lg).unwrap();
        let back: League = serde_json::from_str(&json).unwrap();
        assert_eq!(back, lg);
    }
}
