//! ESPN fantasy basketball id tables.

/// ESPN pro team id -> abbreviation, indexed by id. Id 0 is "free agent".
const PRO_TEAMS: [&str; 31] = [
    "FA", "ATL", "BOS", "NOP", "CHI", "CLE", "DAL", "DEN", "DET", "GSW", "HOU", "IND", "LAC",
    "LAL", "MIA", "MIL", "MIN", "BKN", "NYK", "ORL", "PHL", "PHO", "POR", "SAC", "SAS", "OKC",
    "UTA", "WAS", "TOR", "MEM", "CHA",
];

pub fn pro_team_abbrev(id: i64) -> Option<&'static str> {
    usize::try_from(id).ok().and_then(|i| PRO_TEAMS.get(i).copied())
}

/// ESPN numeric stat id -> box-score category name.
pub fn stat_category(id: &str) -> Option<&'static str> {
    let name = match id {
        "0" => "PTS",
        "1" => "BLK",
        "2" => "STL",
        "3" => "AST",
        "4" => "OREB",
        "5" => "DREB",
        "6" => "REB",
        "9" => "PF",
        "11" => "TO",
        "13" => "FGM",
        "14" => "FGA",
        "15" => "FTM",
        "16" => "FTA",
        "17" => "3PTM",
        "18" => "3PTA",
        "19" => "FG%",
        "20" => "FT%",
        "21" => "3PT%",
        "40" => "MIN",
        "41" => "GS",
        "42" => "GP",
        _ => return None,
    };
    Some(name)
}

/// Two-digit prefix of an ESPN stat split id ("032026" = last 30, 2026).
pub fn stat_window(prefix: &str) -> Option<&'static str> {
    match prefix {
        "00" => Some("total"),
        "01" => Some("last_7"),
        "02" => Some("last_15"),
        "03" => Some("last_30"),
        "10" => Some("projected"),
        _ => None,
    }
}
