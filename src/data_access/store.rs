//! Read queries against the `results` table.
//!
//! Every filter value is passed as a bound parameter. Unmatched filters yield
//! empty sequences; only driver failures and undecodable rows are errors.

use super::models::{MatchResult, Outcome};
use crate::constants::{RESULTS_COLUMNS, RESULTS_TABLE};
use crate::error::AppError;
use chrono::NaiveDate;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, Row, params};

const DIVISIONS_SQL: &str = "SELECT DISTINCT division FROM results \
     WHERE division IS NOT NULL \
     ORDER BY division ASC";

const SEASONS_SQL: &str = "SELECT DISTINCT season FROM results \
     WHERE division = ?1 AND season IS NOT NULL \
     ORDER BY season ASC";

const TEAMS_SQL: &str = "SELECT DISTINCT team FROM results \
     WHERE division = ?1 AND season = ?2 AND team IS NOT NULL \
     ORDER BY team ASC";

const MATCHES_SQL: &str = "SELECT \"date\", team, opponent, goals_for, goals_against, outcome, points \
     FROM results \
     WHERE division = ?1 AND season = ?2 AND team = ?3 \
     ORDER BY \"date\" ASC";

/// Read operations over the match results store.
pub trait ResultsStore {
    /// Distinct divisions, ascending.
    fn list_divisions(&self) -> Result<Vec<String>, AppError>;

    /// Distinct seasons played in `division`, ascending.
    fn list_seasons(&self, division: &str) -> Result<Vec<String>, AppError>;

    /// Distinct teams of the (division, season) pair, ascending.
    fn list_teams(&self, division: &str, season: &str) -> Result<Vec<String>, AppError>;

    /// Match rows of one team in one season, by date ascending.
    fn list_matches(
        &self,
        division: &str,
        season: &str,
        team: &str,
    ) -> Result<Vec<MatchResult>, AppError>;
}

/// SQLite implementation of [`ResultsStore`] over a borrowed connection.
pub struct SqliteResultsStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteResultsStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Creates the store after checking the connection exposes the `results` schema.
    pub fn try_new(conn: &'conn Connection) -> Result<Self, AppError> {
        let store = Self::new(conn);
        store.verify()?;
        Ok(store)
    }

    /// Checks the `results` table and its columns, see [`verify_schema`].
    pub fn verify(&self) -> Result<(), AppError> {
        verify_schema(self.conn)
    }

    fn distinct_values(
        &self,
        sql: &str,
        params: &[&dyn rusqlite::ToSql],
    ) -> Result<Vec<String>, AppError> {
        let mut stmt = self.conn.prepare_cached(sql)?;
        let mut rows = stmt.query(params)?;
        let mut values = Vec::new();
        while let Some(row) = rows.next()? {
            if let Some(value) = text_column(row, 0, "value")? {
                values.push(value);
            }
        }
        Ok(values)
    }
}

impl ResultsStore for SqliteResultsStore<'_> {
    fn list_divisions(&self) -> Result<Vec<String>, AppError> {
        self.distinct_values(DIVISIONS_SQL, &[])
    }

    fn list_seasons(&self, division: &str) -> Result<Vec<String>, AppError> {
        if division.is_empty() {
            return Ok(Vec::new());
        }
        self.distinct_values(SEASONS_SQL, params![division])
    }

    fn list_teams(&self, division: &str, season: &str) -> Result<Vec<String>, AppError> {
        if division.is_empty() || season.is_empty() {
            return Ok(Vec::new());
        }
        self.distinct_values(TEAMS_SQL, params![division, season])
    }

    fn list_matches(
        &self,
        division: &str,
        season: &str,
        team: &str,
    ) -> Result<Vec<MatchResult>, AppError> {
        if division.is_empty() || season.is_empty() || team.is_empty() {
            return Ok(Vec::new());
        }
        let mut stmt = self.conn.prepare_cached(MATCHES_SQL)?;
        let mut rows = stmt.query(params![division, season, team])?;
        let mut matches = Vec::new();
        while let Some(row) = rows.next()? {
            matches.push(map_match_row(row)?);
        }
        Ok(matches)
    }
}

/// Checks that the `results` table exists and carries every required column.
pub fn verify_schema(conn: &Connection) -> Result<(), AppError> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1)")?;
    let columns = stmt
        .query_map(params![RESULTS_TABLE], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    if columns.is_empty() {
        return Err(AppError::schema_mismatch(format!(
            "table `{RESULTS_TABLE}` does not exist"
        )));
    }

    let missing: Vec<&str> = RESULTS_COLUMNS
        .iter()
        .copied()
        .filter(|required| !columns.iter().any(|c| c.eq_ignore_ascii_case(required)))
        .collect();
    if !missing.is_empty() {
        return Err(AppError::schema_mismatch(format!(
            "table `{RESULTS_TABLE}` is missing columns: {}",
            missing.join(", ")
        )));
    }

    Ok(())
}

fn map_match_row(row: &Row<'_>) -> Result<MatchResult, AppError> {
    let raw_date = text_column(row, 0, "date")?
        .ok_or_else(|| AppError::invalid_row("date", "missing match date"))?;
    let raw_outcome = text_column(row, 5, "outcome")?
        .ok_or_else(|| AppError::invalid_row("outcome", "missing outcome"))?;

    Ok(MatchResult {
        date: parse_match_date(&raw_date)?,
        team: text_column(row, 1, "team")?.unwrap_or_default(),
        opponent: text_column(row, 2, "opponent")?.unwrap_or_default(),
        goals_for: count_column(row, 3, "goals_for")?,
        goals_against: count_column(row, 4, "goals_against")?,
        outcome: Outcome::parse(&raw_outcome).ok_or_else(|| {
            AppError::invalid_row("outcome", format!("unknown outcome '{raw_outcome}'"))
        })?,
        points: count_column(row, 6, "points")?,
    })
}

/// Parses `YYYY-MM-DD`, ignoring any trailing time part.
pub(crate) fn parse_match_date(raw: &str) -> Result<NaiveDate, AppError> {
    let trimmed = raw.trim();
    let day = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|e| AppError::invalid_row("date", format!("'{raw}': {e}")))
}

/// Reads a key-like column as text. Numeric keys (e.g. a season stored as
/// INTEGER) are rendered in decimal; NULL is `None`.
fn text_column(row: &Row<'_>, idx: usize, column: &str) -> Result<Option<String>, AppError> {
    match row.get_ref(idx)? {
        ValueRef::Null => Ok(None),
        ValueRef::Integer(value) => Ok(Some(value.to_string())),
        ValueRef::Real(value) => Ok(Some(value.to_string())),
        ValueRef::Text(bytes) => String::from_utf8(bytes.to_vec())
            .map(Some)
            .map_err(|e| AppError::invalid_row(column, e.to_string())),
        ValueRef::Blob(_) => Err(AppError::invalid_row(column, "unexpected blob value")),
    }
}

fn count_column(row: &Row<'_>, idx: usize, column: &str) -> Result<u32, AppError> {
    let value: Option<i64> = row.get(idx)?;
    let value = value.unwrap_or(0);
    u32::try_from(value)
        .map_err(|_| AppError::invalid_row(column, format!("expected a non-negative count, got {value}")))
}
