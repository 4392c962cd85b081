use super::models::MatchResult;
use super::store::ResultsStore;
use crate::error::AppError;

/// A downstream lookup requested by a selection change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Seasons {
        division: String,
    },
    Teams {
        division: String,
        season: String,
    },
    Matches {
        division: String,
        season: String,
        team: String,
    },
}

/// Rows returned for a [`Query`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Seasons(Vec<String>),
    Teams(Vec<String>),
    Matches(Vec<MatchResult>),
}

impl Query {
    /// Operation name used in logs and timeout errors
    pub fn name(&self) -> &'static str {
        match self {
            Query::Seasons { .. } => "list_seasons",
            Query::Teams { .. } => "list_teams",
            Query::Matches { .. } => "list_matches",
        }
    }

    /// Runs the lookup against `store`.
    pub fn execute<S: ResultsStore + ?Sized>(&self, store: &S) -> Result<Answer, AppError> {
        match self {
            Query::Seasons { division } => store.list_seasons(division).map(Answer::Seasons),
            Query::Teams { division, season } => {
                store.list_teams(division, season).map(Answer::Teams)
            }
            Query::Matches {
                division,
                season,
                team,
            } => store
                .list_matches(division, season, team)
                .map(Answer::Matches),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::{TestDataBuilder, create_results_table, insert_matches};
    use crate::data_access::store::SqliteResultsStore;
    use rusqlite::Connection;

    #[test]
    fn test_query_names() {
        let seasons = Query::Seasons {
            division: "D1".to_string(),
        };
        let teams = Query::Teams {
            division: "D1".to_string(),
            season: "2023".to_string(),
        };
        assert_eq!(seasons.name(), "list_seasons");
        assert_eq!(teams.name(), "list_teams");
    }

    #[test]
    fn test_execute_dispatches_to_store() {
        let conn = Connection::open_in_memory().unwrap();
        create_results_table(&conn).unwrap();
        insert_matches(&conn, &TestDataBuilder::league_rows()).unwrap();
        let store = SqliteResultsStore::new(&conn);

        let answer = Query::Teams {
            division: "D2".to_string(),
            season: "2023".to_string(),
        }
        .execute(&store)
        .unwrap();
        assert_eq!(
            answer,
            Answer::Teams(vec!["Delta".to_string(), "Echo".to_string()])
        );

        let answer = Query::Matches {
            division: "D1".to_string(),
            season: "2023".to_string(),
            team: "Alpha".to_string(),
        }
        .execute(&store)
        .unwrap();
        assert!(matches!(answer, Answer::Matches(ref rows) if rows.len() == 3));
    }
}
