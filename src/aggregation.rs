//! Season figures derived from a team's match rows.
//!
//! Both functions are pure: they read the match slice and never keep state
//! between calls, so calling them again on the same rows yields the same output.

use crate::data_access::{MatchResult, Outcome};
use chrono::NaiveDate;
use serde::Serialize;

/// Win/draw/loss record and points total of one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonSummary {
    pub team: String,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub total_points: u32,
}

impl SeasonSummary {
    fn empty(team: &str) -> Self {
        Self {
            team: team.to_string(),
            wins: 0,
            draws: 0,
            losses: 0,
            total_points: 0,
        }
    }

    /// Number of matches counted in the record
    pub fn played(&self) -> u32 {
        self.wins
            .saturating_add(self.draws)
            .saturating_add(self.losses)
    }

    fn record(&mut self, result: &MatchResult) {
        let count = match result.outcome {
            Outcome::Win => &mut self.wins,
            Outcome::Draw => &mut self.draws,
            Outcome::Loss => &mut self.losses,
        };
        *count = count.saturating_add(1);
        self.total_points = self.total_points.saturating_add(result.points);
    }
}

/// Builds one summary per team, in order of the team's first appearance.
///
/// Outcome categories a team never reached stay at zero.
pub fn summarize(matches: &[MatchResult]) -> Vec<SeasonSummary> {
    let mut summaries: Vec<SeasonSummary> = Vec::new();
    for result in matches {
        let position = match summaries.iter().position(|s| s.team == result.team) {
            Some(position) => position,
            None => {
                summaries.push(SeasonSummary::empty(&result.team));
                summaries.len() - 1
            }
        };
        summaries[position].record(result);
    }
    summaries
}

/// Running points total after each match, in the order of `matches`
/// (date ascending as fetched). Totals saturate at `u32::MAX`.
pub fn cumulative_points(
    matches: &[MatchResult],
) -> impl Iterator<Item = (NaiveDate, u32)> + Clone + '_ {
    matches.iter().scan(0u32, |total, result| {
        *total = total.saturating_add(result.points);
        Some((result.date, *total))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::TestDataBuilder;

    #[test]
    fn test_scenario_summary_and_cumulative_points() {
        let matches = TestDataBuilder::scenario_matches();

        let summary = summarize(&matches);
        assert_eq!(
            summary,
            vec![SeasonSummary {
                team: "Alpha".to_string(),
                wins: 1,
                draws: 1,
                losses: 1,
                total_points: 4,
            }]
        );

        let series: Vec<(String, u32)> = cumulative_points(&matches)
            .map(|(date, total)| (date.to_string(), total))
            .collect();
        assert_eq!(
            series,
            vec![
                ("2023-01-01".to_string(), 3),
                ("2023-01-08".to_string(), 4),
                ("2023-01-15".to_string(), 4),
            ]
        );
    }

    #[test]
    fn test_missing_categories_default_to_zero() {
        let matches = vec![
            TestDataBuilder::create_match("2023-01-01", "Alpha", "Beta", 2, 0),
            TestDataBuilder::create_match("2023-01-08", "Alpha", "Gamma", 1, 0),
        ];

        let summary = summarize(&matches);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].wins, 2);
        assert_eq!(summary[0].draws, 0);
        assert_eq!(summary[0].losses, 0);
        assert_eq!(summary[0].total_points, 6);
    }

    #[test]
    fn test_empty_match_set() {
        assert!(summarize(&[]).is_empty());
        assert_eq!(cumulative_points(&[]).count(), 0);
    }

    #[test]
    fn test_one_summary_per_team_in_first_appearance_order() {
        let matches = vec![
            TestDataBuilder::create_match("2023-01-01", "Beta", "Alpha", 0, 1),
            TestDataBuilder::create_match("2023-01-01", "Alpha", "Beta", 1, 0),
            TestDataBuilder::create_match("2023-01-08", "Beta", "Gamma", 2, 2),
        ];

        let summary = summarize(&matches);
        let teams: Vec<&str> = summary.iter().map(|s| s.team.as_str()).collect();
        assert_eq!(teams, vec!["Beta", "Alpha"]);
        assert_eq!(summary[0].played(), 2);
        assert_eq!(summary[0].total_points, 1);
        assert_eq!(summary[1].total_points, 3);
    }

    #[test]
    fn test_record_counts_match_total() {
        let matches = TestDataBuilder::season_of(
            "Alpha",
            &[(3, 0), (1, 1), (0, 2), (2, 2), (4, 1), (0, 1), (1, 0)],
        );
        let summary = summarize(&matches);
        assert_eq!(summary[0].played() as usize, matches.len());

        let points: u32 = matches.iter().map(|m| m.points).sum();
        assert_eq!(cumulative_points(&matches).last().map(|(_, t)| t), Some(points));
        assert_eq!(summary[0].total_points, points);
    }

    #[test]
    fn test_cumulative_points_is_restartable() {
        let matches = TestDataBuilder::scenario_matches();
        let series = cumulative_points(&matches);
        let first: Vec<_> = series.clone().collect();
        let second: Vec<_> = series.collect();
        assert_eq!(first, second);
        assert_eq!(summarize(&matches), summarize(&matches));
    }

    #[test]
    fn test_huge_point_values_saturate() {
        let mut matches = TestDataBuilder::season_of("Alpha", &[(1, 0), (1, 0)]);
        for result in &mut matches {
            result.points = u32::MAX / 2 + 1;
        }

        let summary = summarize(&matches);
        assert_eq!(summary[0].total_points, u32::MAX);
        assert_eq!(summary[0].wins, 2);

        let totals: Vec<u32> = cumulative_points(&matches).map(|(_, t)| t).collect();
        assert_eq!(totals, vec![u32::MAX / 2 + 1, u32::MAX]);
    }
}
