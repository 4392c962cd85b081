use crate::data_access::{MatchResult, Outcome};
use chrono::{Duration, NaiveDate};
use rusqlite::{Connection, params};
use std::path::Path;

/// DDL of the `results` table as the viewer expects it
pub const RESULTS_TABLE_DDL: &str = "CREATE TABLE IF NOT EXISTS results (
    division TEXT NOT NULL,
    season TEXT NOT NULL,
    team TEXT NOT NULL,
    opponent TEXT NOT NULL,
    \"date\" TEXT NOT NULL,
    goals_for INTEGER NOT NULL,
    goals_against INTEGER NOT NULL,
    outcome TEXT NOT NULL,
    points INTEGER NOT NULL
)";

/// A match row together with the division and season it belongs to
#[derive(Debug, Clone)]
pub struct ResultRow {
    pub division: String,
    pub season: String,
    pub result: MatchResult,
}

/// Test utilities for creating mock data and testing scenarios
pub struct TestDataBuilder;

impl TestDataBuilder {
    /// Creates a match whose outcome and points (3/1/0) follow from the score
    pub fn create_match(
        date: &str,
        team: &str,
        opponent: &str,
        goals_for: u32,
        goals_against: u32,
    ) -> MatchResult {
        let outcome = match goals_for.cmp(&goals_against) {
            std::cmp::Ordering::Greater => Outcome::Win,
            std::cmp::Ordering::Equal => Outcome::Draw,
            std::cmp::Ordering::Less => Outcome::Loss,
        };
        let points = match outcome {
            Outcome::Win => 3,
            Outcome::Draw => 1,
            Outcome::Loss => 0,
        };
        MatchResult {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("test dates are YYYY-MM-DD"),
            team: team.to_string(),
            opponent: opponent.to_string(),
            goals_for,
            goals_against,
            outcome,
            points,
        }
    }

    /// Alpha's three matches: a win, a draw and a loss one week apart
    pub fn scenario_matches() -> Vec<MatchResult> {
        vec![
            Self::create_match("2023-01-01", "Alpha", "Beta", 2, 0),
            Self::create_match("2023-01-08", "Alpha", "Gamma", 1, 1),
            Self::create_match("2023-01-15", "Alpha", "Delta", 0, 1),
        ]
    }

    /// Weekly matches of `team` starting 2023-01-01, one per score line
    pub fn season_of(team: &str, scores: &[(u32, u32)]) -> Vec<MatchResult> {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid start date");
        scores
            .iter()
            .enumerate()
            .map(|(week, &(goals_for, goals_against))| {
                let date = start + Duration::weeks(week as i64);
                Self::create_match(
                    &date.format("%Y-%m-%d").to_string(),
                    team,
                    &format!("Opponent {}", week + 1),
                    goals_for,
                    goals_against,
                )
            })
            .collect()
    }

    /// Wraps a match into a row of the given division and season
    pub fn row(division: &str, season: &str, result: MatchResult) -> ResultRow {
        ResultRow {
            division: division.to_string(),
            season: season.to_string(),
            result,
        }
    }

    /// Small league: D1 has seasons 2022 (Alpha, Gamma) and 2023 (Alpha, Beta),
    /// D2 has season 2023 (Delta, Echo). Rows are deliberately not in date order.
    pub fn league_rows() -> Vec<ResultRow> {
        vec![
            Self::row("D1", "2023", Self::create_match("2023-01-15", "Alpha", "Beta", 0, 1)),
            Self::row("D1", "2023", Self::create_match("2023-01-15", "Beta", "Alpha", 1, 0)),
            Self::row("D1", "2023", Self::create_match("2023-01-01", "Alpha", "Beta", 2, 0)),
            Self::row("D1", "2023", Self::create_match("2023-01-01", "Beta", "Alpha", 0, 2)),
            Self::row("D1", "2023", Self::create_match("2023-01-08", "Alpha", "Beta", 1, 1)),
            Self::row("D1", "2023", Self::create_match("2023-01-08", "Beta", "Alpha", 1, 1)),
            Self::row("D1", "2022", Self::create_match("2022-03-01", "Alpha", "Gamma", 3, 1)),
            Self::row("D1", "2022", Self::create_match("2022-03-01", "Gamma", "Alpha", 1, 3)),
            Self::row("D2", "2023", Self::create_match("2023-02-01", "Delta", "Echo", 2, 2)),
            Self::row("D2", "2023", Self::create_match("2023-02-01", "Echo", "Delta", 2, 2)),
        ]
    }
}

/// Creates the `results` table on `conn`
pub fn create_results_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(RESULTS_TABLE_DDL)
}

/// Inserts `rows` into the `results` table
pub fn insert_matches(conn: &Connection, rows: &[ResultRow]) -> rusqlite::Result<()> {
    let mut stmt = conn.prepare(
        "INSERT INTO results (division, season, team, opponent, \"date\", goals_for, goals_against, outcome, points)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )?;
    for row in rows {
        let result = &row.result;
        stmt.execute(params![
            row.division,
            row.season,
            result.team,
            result.opponent,
            result.date.format("%Y-%m-%d").to_string(),
            result.goals_for,
            result.goals_against,
            result.outcome.code(),
            result.points,
        ])?;
    }
    Ok(())
}

/// Creates a database file at `path` holding the `results` table and `rows`
pub fn create_results_db(path: &Path, rows: &[ResultRow]) -> rusqlite::Result<()> {
    let conn = Connection::open(path)?;
    create_results_table(&conn)?;
    insert_matches(&conn, rows)
}
