//! Fantasy-point scoring and per-player point estimates.
//!
//! League scoring is a fixed linear formula over box-score categories:
//!
//!   FPTS = PTS + 3PTM − FGA + 2·FGM − FTA + FTM + REB + 2·AST + 4·STL + 4·BLK − 2·TO
//!
//! A player's expected output is estimated from several stat windows (recent
//! form plus the season projection). Each window yields one FPTS sample; the
//! mean of the samples is the expectation and their spread is the variance.
use serde::Serialize;

use crate::league::models::{Player, StatLine};

/// Category weights, in the order listed above.
pub const SCORING_WEIGHTS: [(&str, f64); 11] = [
    ("PTS", 1.0),
    ("3PTM", 1.0),
    ("FGA", -1.0),
    ("FGM", 2.0),
    ("FTA", -1.0),
    ("FTM", 1.0),
    ("REB", 1.0),
    ("AST", 2.0),
    ("STL", 4.0),
    ("BLK", 4.0),
    ("TO", -2.0),
];

/// Default stat windows for a season, most recent form first.
pub fn default_stat_periods(year: i32) -> Vec<String> {
    ["last_30", "last_15", "last_7", "projected"]
        .iter()
        .map(|window| format!("{}_{}", year, window))
        .collect()
}

/// Expected fantasy points for one game and the variance of that estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PointEstimate {
    pub mean: f64,
    pub variance: f64,
}

pub fn fantasy_points(line: &StatLine) -> f64 {
    SCORING_WEIGHTS
        .iter()
        .map(|(category, weight)| weight * line.get(category))
        .sum()
}

/// FPTS for one stat window, or `None` if the player has no usable averages
/// for it.
pub fn points_for_period(player: &Player, label: &str) -> Option<f64> {
    let period = player.stats.get(label)?;
    period.avg.as_ref().map(fantasy_points)
}

/// Mean and unbiased sample variance of a set of FPTS samples.
///
/// No samples gives `(0, 0)`; a single sample has no spread, so its variance
/// is 0.
pub fn summarize(samples: &[f64]) -> PointEstimate {
    let n = samples.len();
    if n == 0 {
        return PointEstimate::default();
    }
    let mean = samples.iter().sum::<f64>() / n as f64;
    let variance = if n > 1 {
        samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
    } else {
        0.0
    };
    PointEstimate { mean, variance }
}

pub fn estimate(player: &Player, stat_periods: &[String]) -> PointEstimate {
    let samples: Vec<f64> = stat_periods
        .iter()
        .filter_map(|label| points_for_period(player, label))
        .collect();
    summarize(&samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::models::StatPeriod;
    use approx::assert_relative_eq;
    use std::collections::BTreeMap;

    fn full_line() -> StatLine {
        [
            ("PTS", 20.0),
            ("3PTM", 2.0),
            ("FGA", 15.0),
            ("FGM", 8.0),
            ("FTA", 5.0),
            ("FTM", 4.0),
            ("REB", 5.0),
            ("AST", 3.0),
            ("STL", 1.0),
            ("BLK", 1.0),
            ("TO", 2.0),
        ]
        .into_iter()
        .collect()
    }

    fn player_with(periods: Vec<(&str, Option<StatLine>)>) -> Player {
        let stats: BTreeMap<String, StatPeriod> = periods
            .into_iter()
            .map(|(label, avg)| (label.to_string(), StatPeriod { avg, total: None }))
            .collect();
        Player {
            id: 1,
            name: "Test Player".into(),
            pro_team: "LAL".into(),
            injury_status: None,
            eligible_slots: vec![],
            stats,
        }
    }

    fn line_worth(points: f64) -> StatLine {
        [("PTS", points)].into_iter().collect()
    }

    #[test]
    fn test_fantasy_points_full_line() {
        // 20 + 2 - 15 + 16 - 5 + 4 + 5 + 6 + 4 + 4 - 4
        assert_relative_eq!(fantasy_points(&full_line()), 37.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fantasy_points_missing_categories_default_to_zero() {
        let line: StatLine = [("PTS", 10.0), ("FGA", 8.0), ("FGM", 4.0)]
            .into_iter()
            .collect();
        assert_relative_eq!(fantasy_points(&line), 10.0 - 8.0 + 8.0, epsilon = 1e-9);
        assert_eq!(fantasy_points(&StatLine::default()), 0.0);
    }

    #[test]
    fn test_points_for_period_skips_missing_or_avgless() {
        let player = player_with(vec![("2026_last_7", None), ("2026_last_15", Some(full_line()))]);
        assert_eq!(points_for_period(&player, "2026_last_30"), None);
        assert_eq!(points_for_period(&player, "2026_last_7"), None);
        assert_relative_eq!(
            points_for_period(&player, "2026_last_15").unwrap(),
            37.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_estimate_no_data() {
        let player = player_with(vec![]);
        let est = estimate(&player, &default_stat_periods(2026));
        assert_eq!(est, PointEstimate::default());
    }

    #[test]
    fn test_estimate_single_sample_has_zero_variance() {
        let player = player_with(vec![("2026_projected", Some(line_worth(30.0)))]);
        let est = estimate(&player, &default_stat_periods(2026));
        assert_relative_eq!(est.mean, 30.0);
        assert_eq!(est.variance, 0.0);
    }

    #[test]
    fn test_estimate_uses_sample_variance() {
        let player = player_with(vec![
            ("2026_last_30", Some(line_worth(20.0))),
            ("2026_last_15", Some(line_worth(30.0))),
            ("2026_last_7", None),
            ("2026_projected", Some(line_worth(40.0))),
        ]);
        let est = estimate(&player, &default_stat_periods(2026));
        assert_relative_eq!(est.mean, 30.0, epsilon = 1e-9);
        // ((-10)^2 + 0 + 10^2) / (3 - 1)
        assert_relative_eq!(est.variance, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_estimate_ignores_periods_not_requested() {
        let player = player_with(vec![
            ("2025_last_30", Some(line_worth(99.0))),
            ("2026_last_30", Some(line_worth(25.0))),
        ]);
        let est = estimate(&player, &default_stat_periods(2026));
        assert_relative_eq!(est.mean, 25.0);
    }

    #[test]
    fn test_summarize_variance_never_negative() {
        let sets: [&[f64]; 4] = [&[], &[5.0], &[-3.0, -3.0], &[1.5, -7.25, 12.0, 0.0]];
        for samples in sets {
            assert!(summarize(samples).variance >= 0.0);
        }
    }

    #[test]
    fn test_default_stat_periods() {
        assert_eq!(
            default_stat_periods(2026),
            vec!["2026_last_30", "2026_last_15", "2026_last_7", "2026_projected"]
        );
    }
}
