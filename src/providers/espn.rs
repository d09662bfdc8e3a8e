use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::COOKIE;
use reqwest::Client;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};
use url::Url;

use crate::league::models::{InjuryStatus, Matchup, Player, StatLine, StatPeriod, Team};
use crate::league::League;

use super::constants::{pro_team_abbrev, stat_category, stat_window};
use super::provider::LeagueProvider;

/// Read-only client for the ESPN fantasy basketball (`fba`) API.
///
/// Public leagues need no credentials; private leagues need the `espn_s2`
/// and `SWID` cookies of a league member.
#[derive(Clone)]
pub struct EspnClient {
    http: Client,
    base_url: String,
    league_id: i64,
    year: i32,
    cookie: Option<String>,
}

impl EspnClient {
    pub fn new(
        base_url: &str,
        league_id: i64,
        year: i32,
        espn_s2: Option<&str>,
        swid: Option<&str>,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;
        let cookie = match (espn_s2, swid) {
            (Some(s2), Some(swid)) => Some(format!("espn_s2={}; SWID={}", s2, swid)),
            _ => None,
        };
        Ok(EspnClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            league_id,
            year,
            cookie,
        })
    }

    fn season_url(&self) -> String {
        format!("{}/games/fba/seasons/{}", self.base_url, self.year)
    }

    fn league_url(&self) -> Result<Url> {
        let url = format!(
            "{}/segments/0/leagues/{}",
            self.season_url(),
            self.league_id
        );
        Url::parse_with_params(
            &url,
            &[
                ("view", "mTeam"),
                ("view", "mRoster"),
                ("view", "mMatchup"),
                ("view", "mSettings"),
            ],
        )
        .context("Invalid ESPN league URL")
    }

    fn pro_schedule_url(&self) -> Result<Url> {
        Url::parse_with_params(&self.season_url(), &[("view", "proTeamSchedules_wl")])
            .context("Invalid ESPN season URL")
    }

    async fn get_json(&self, url: Url) -> Result<Value> {
        debug!("Fetching {}", url);
        let mut req = self.http.get(url.clone());
        if let Some(cookie) = &self.cookie {
            req = req.header(COOKIE, cookie);
        }
        let resp = req.send().await.context("ESPN request failed")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("ESPN API error {} for {}: {}", status, url, body);
        }

        resp.json()
            .await
            .with_context(|| format!("Failed to parse ESPN response from {}", url))
    }
}

#[async_trait]
impl LeagueProvider for EspnClient {
    fn name(&self) -> &str {
        "ESPN"
    }

    async fn fetch_league(&self) -> Result<League> {
        let league_url = self.league_url()?;
        let schedule_url = self.pro_schedule_url()?;
        let (league_raw, schedule_raw) =
            tokio::try_join!(self.get_json(league_url), self.get_json(schedule_url))?;

        let mut league = parse_league(self.league_id, self.year, &league_raw)?;
        league.pro_schedule = parse_pro_schedule(&schedule_raw);
        info!(
            "Fetched ESPN league {} ({}): {} teams, {} rostered players, {} scheduled days",
            self.league_id,
            self.year,
            league.teams.len(),
            league.roster_size(),
            league.pro_schedule.len()
        );
        Ok(league)
    }
}

/// Parse the `mTeam`/`mRoster`/`mMatchup` league payload. The pro schedule
/// comes from a separate request and is left empty here.
pub fn parse_league(league_id: i64, year: i32, raw: &Value) -> Result<League> {
    let teams = raw["teams"]
        .as_array()
        .context("ESPN league response has no teams")?
        .iter()
        .filter_map(parse_team)
        .collect();

    let matchups = raw["schedule"]
        .as_array()
        .map(|games| games.iter().filter_map(parse_matchup).collect())
        .unwrap_or_default();

    Ok(League {
        league_id,
        year,
        current_matchup_period: raw["status"]["currentMatchupPeriod"]
            .as_u64()
            .unwrap_or(1) as u32,
        current_scoring_period: raw["scoringPeriodId"].as_u64().unwrap_or(1) as u32,
        teams,
        pro_schedule: BTreeMap::new(),
        matchups,
    })
}

fn parse_team(raw: &Value) -> Option<Team> {
    let id = raw["id"].as_i64()?;
    let name = match raw["name"].as_str() {
        Some(n) => n.trim().to_string(),
        None => format!(
            "{} {}",
            raw["location"].as_str().unwrap_or_default(),
            raw["nickname"].as_str().unwrap_or_default()
        )
        .trim()
        .to_string(),
    };
    let roster = raw["roster"]["entries"]
        .as_array()
        .map(|entries| entries.iter().filter_map(parse_player).collect())
        .unwrap_or_default();
    Some(Team { id, name, roster })
}

fn parse_player(entry: &Value) -> Option<Player> {
    let p = &entry["playerPoolEntry"]["player"];
    let id = p["id"].as_i64()?;
    let name = p["fullName"].as_str()?.to_string();
    let pro_team = p["proTeamId"]
        .as_i64()
        .and_then(pro_team_abbrev)
        .unwrap_or("FA")
        .to_string();
    let injury_status = p["injuryStatus"].as_str().map(InjuryStatus::parse);
    let eligible_slots = p["eligibleSlots"]
        .as_array()
        .map(|slots| {
            slots
                .iter()
                .filter_map(|s| s.as_u64().map(|v| v as u32))
                .collect()
        })
        .unwrap_or_default();
    let stats = p["stats"]
        .as_array()
        .map(|splits| splits.iter().filter_map(parse_stat_split).collect())
        .unwrap_or_default();

    Some(Player {
        id,
        name,
        pro_team,
        injury_status,
        eligible_slots,
        stats,
    })
}

/// One entry of a player's `stats` array, keyed like `2026_last_15`.
/// Per-scoring-period splits (unknown prefixes) are keyed by the period id.
fn parse_stat_split(raw: &Value) -> Option<(String, StatPeriod)> {
    let id = raw["id"].as_str()?;
    if id.len() < 3 || !id.is_char_boundary(2) {
        return None;
    }
    let (prefix, season) = id.split_at(2);
    let label = match stat_window(prefix) {
        Some(window) => format!("{}_{}", season, window),
        None => raw["scoringPeriodId"].as_u64()?.to_string(),
    };

    let total = raw["stats"].as_object().map(parse_stat_line);
    let avg = raw["averageStats"].as_object().map(parse_stat_line);
    if total.as_ref().map_or(true, StatLine::is_empty) && avg.is_none() {
        return None;
    }
    Some((label, StatPeriod { avg, total }))
}

fn parse_stat_line(obj: &Map<String, Value>) -> StatLine {
    obj.iter()
        .filter_map(|(id, v)| Some((stat_category(id)?, v.as_f64()?)))
        .collect()
}

fn parse_matchup(raw: &Value) -> Option<Matchup> {
    Some(Matchup {
        matchup_period: raw["matchupPeriodId"].as_u64()? as u32,
        home_team_id: raw["home"]["teamId"].as_i64()?,
        away_team_id: raw["away"]["teamId"].as_i64(),
    })
}

/// Parse `view=proTeamSchedules_wl` into scoring period -> teams playing.
pub fn parse_pro_schedule(raw: &Value) -> BTreeMap<u32, BTreeSet<String>> {
    let mut schedule: BTreeMap<u32, BTreeSet<String>> = BTreeMap::new();
    let pro_teams = match raw["settings"]["proTeams"].as_array() {
        Some(a) => a,
        None => return schedule,
    };

    for team in pro_teams {
        let abbrev = match team["id"].as_i64().and_then(pro_team_abbrev) {
            Some("FA") | None => continue,
            Some(a) => a,
        };
        let games = match team["proGamesByScoringPeriod"].as_object() {
            Some(g) => g,
            None => continue,
        };
        for (period, day_games) in games {
            if day_games.as_array().map_or(true, |g| g.is_empty()) {
                continue;
            }
            if let Ok(period) = period.parse::<u32>() {
                schedule
                    .entry(period)
                    .or_default()
                    .insert(abbrev.to_string());
            }
        }
    }
    schedule
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn league_payload() -> Value {
        json!({
            "scoringPeriodId": 12,
            "status": { "currentMatchupPeriod": 2 },
            "teams": [
                {
                    "id": 1,
                    "name": "Dunk Dynasty ",
                    "roster": { "entries": [
                        { "playerPoolEntry": { "player": {
                            "id": 3112335,
                            "fullName": "Nikola Jokic",
                            "proTeamId": 7,
                            "injuryStatus": "ACTIVE",
                            "eligibleSlots": [4, 11, 12, 13],
                            "stats": [
                                { "id": "032026", "scoringPeriodId": 0,
                                  "stats": { "0": 820.0 },
                                  "averageStats": {
                                      "0": 29.5, "6": 12.8, "3": 10.1, "11": 3.2, "99": 1.0
                                  } },
                                { "id": "102026", "scoringPeriodId": 0,
                                  "stats": { "0": 2200.0 } },
                                { "id": "012026", "scoringPeriodId": 0, "stats": {} }
                            ]
                        }}},
                        { "playerPoolEntry": { "player": {
                            "id": 4278073,
                            "fullName": "Injured Guy",
                            "proTeamId": 13,
                            "injuryStatus": "OUT"
                        }}}
                    ]}
                },
                { "id": 2, "location": "Brick", "nickname": "Layers" }
            ],
            "schedule": [
                { "matchupPeriodId": 1, "home": { "teamId": 1 }, "away": { "teamId": 2 } },
                { "matchupPeriodId": 2, "home": { "teamId": 2 } }
            ]
        })
    }

    #[test]
    fn test_parse_league_teams_and_status() {
        let league = parse_league(99, 2026, &league_payload()).unwrap();
        assert_eq!(league.league_id, 99);
        assert_eq!(league.current_matchup_period, 2);
        assert_eq!(league.current_scoring_period, 12);
        assert_eq!(league.teams.len(), 2);
        assert_eq!(league.teams[0].name, "Dunk Dynasty");
        assert_eq!(league.teams[1].name, "Brick Layers");
        assert!(league.teams[1].roster.is_empty());
    }

    #[test]
    fn test_parse_player_fields() {
        let league = parse_league(99, 2026, &league_payload()).unwrap();
        let jokic = &league.teams[0].roster[0];
        assert_eq!(jokic.pro_team, "DEN");
        assert_eq!(jokic.status(), InjuryStatus::Active);
        assert_eq!(jokic.eligible_slots, vec![4, 11, 12, 13]);

        let last_30 = &jokic.stats["2026_last_30"];
        let avg = last_30.avg.as_ref().unwrap();
        assert_eq!(avg.get("PTS"), 29.5);
        assert_eq!(avg.get("REB"), 12.8);
        assert_eq!(avg.get("TO"), 3.2);
        assert_eq!(last_30.total.as_ref().unwrap().get("PTS"), 820.0);

        // projection without averages is kept but has no avg block
        assert!(jokic.stats["2026_projected"].avg.is_none());
        // empty split is dropped
        assert!(!jokic.stats.contains_key("2026_last_7"));

        let hurt = &league.teams[0].roster[1];
        assert_eq!(hurt.pro_team, "LAL");
        assert_eq!(hurt.status(), InjuryStatus::Out);
    }

    #[test]
    fn test_parse_matchups_with_bye() {
        let league = parse_league(99, 2026, &league_payload()).unwrap();
        assert_eq!(league.matchups.len(), 2);
        assert_eq!(league.matchups[0].away_team_id, Some(2));
        assert_eq!(league.matchups[1].away_team_id, None);
    }

    #[test]
    fn test_parse_league_without_teams_fails() {
        assert!(parse_league(1, 2026, &json!({ "status": {} })).is_err());
    }

    #[test]
    fn test_parse_pro_schedule() {
        let raw = json!({
            "settings": { "proTeams": [
                { "id": 0, "proGamesByScoringPeriod": { "1": [{ "id": 1 }] } },
                { "id": 13, "proGamesByScoringPeriod": {
                    "1": [{ "id": 401 }], "2": [], "3": [{ "id": 402 }] } },
                { "id": 2, "proGamesByScoringPeriod": { "1": [{ "id": 401 }] } },
                { "id": 9 }
            ]}
        });
        let schedule = parse_pro_schedule(&raw);
        assert_eq!(schedule.len(), 2);
        assert_eq!(
            schedule[&1],
            ["BOS", "LAL"]
                .iter()
                .map(|s| s.to_string())
                .collect::<BTreeSet<String>>()
        );
        assert!(!schedule.contains_key(&2));
        assert!(schedule[&3].contains("LAL"));
        assert!(parse_pro_schedule(&json!({})).is_empty());
    }

    #[test]
    fn test_league_url_carries_views() {
        let client =
            EspnClient::new("https://example.test/apis/v3/", 1234, 2026, None, None).unwrap();
        let url = client.league_url().unwrap();
        assert_eq!(
            url.path(),
            "/apis/v3/games/fba/seasons/2026/segments/0/leagues/1234"
        );
        let views: Vec<String> = url
            .query_pairs()
            .filter(|(k, _)| k == "view")
            .map(|(_, v)| v.into_owned())
            .collect();
        assert_eq!(views, vec!["mTeam", "mRoster", "mMatchup", "mSettings"]);
        assert!(client.cookie.is_none());
    }

    #[test]
    fn test_cookie_requires_both_credentials() {
        let both = EspnClient::new("https://x.test", 1, 2026, Some("s2"), Some("{SW}")).unwrap();
        assert_eq!(both.cookie.as_deref(), Some("espn_s2=s2; SWID={SW}"));
        let one = EspnClient::new("https://x.test", 1, 2026, Some("s2"), None).unwrap();
        assert!(one.cookie.is_none());
    }
}
