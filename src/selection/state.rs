use crate::data_access::MatchResult;
use serde::Serialize;

/// Where the user is in the division -> season -> team -> load sequence.
///
/// Each state carries exactly the selections that are valid in it, so a
/// cleared upstream choice can never leave a stale downstream value behind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    NoDivision,
    DivisionOnly {
        division: String,
    },
    DivisionSeason {
        division: String,
        season: String,
    },
    DivisionSeasonTeam {
        division: String,
        season: String,
        team: String,
    },
    ResultsLoaded {
        division: String,
        season: String,
        team: String,
        matches: Vec<MatchResult>,
    },
}

/// Field-less name of a [`SelectionState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    NoDivision,
    DivisionOnly,
    DivisionSeason,
    DivisionSeasonTeam,
    ResultsLoaded,
}

impl SelectionState {
    pub fn phase(&self) -> Phase {
        match self {
            SelectionState::NoDivision => Phase::NoDivision,
            SelectionState::DivisionOnly { .. } => Phase::DivisionOnly,
            SelectionState::DivisionSeason { .. } => Phase::DivisionSeason,
            SelectionState::DivisionSeasonTeam { .. } => Phase::DivisionSeasonTeam,
            SelectionState::ResultsLoaded { .. } => Phase::ResultsLoaded,
        }
    }

    pub fn division(&self) -> Option<&str> {
        match self {
            SelectionState::NoDivision => None,
            SelectionState::DivisionOnly { division }
            | SelectionState::DivisionSeason { division, .. }
            | SelectionState::DivisionSeasonTeam { division, .. }
            | SelectionState::ResultsLoaded { division, .. } => Some(division),
        }
    }

    pub fn season(&self) -> Option<&str> {
        match self {
            SelectionState::NoDivision | SelectionState::DivisionOnly { .. } => None,
            SelectionState::DivisionSeason { season, .. }
            | SelectionState::DivisionSeasonTeam { season, .. }
            | SelectionState::ResultsLoaded { season, .. } => Some(season),
        }
    }

    pub fn team(&self) -> Option<&str> {
        match self {
            SelectionState::DivisionSeasonTeam { team, .. }
            | SelectionState::ResultsLoaded { team, .. } => Some(team),
            _ => None,
        }
    }

    /// Loaded match rows, only present in `ResultsLoaded`
    pub fn matches(&self) -> Option<&[MatchResult]> {
        match self {
            SelectionState::ResultsLoaded { matches, .. } => Some(matches),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_follow_state() {
        let state = SelectionState::DivisionSeason {
            division: "D1".to_string(),
            season: "2023".to_string(),
        };
        assert_eq!(state.phase(), Phase::DivisionSeason);
        assert_eq!(state.division(), Some("D1"));
        assert_eq!(state.season(), Some("2023"));
        assert_eq!(state.team(), None);
        assert!(state.matches().is_none());

        let state = SelectionState::ResultsLoaded {
            division: "D1".to_string(),
            season: "2023".to_string(),
            team: "Alpha".to_string(),
            matches: Vec::new(),
        };
        assert_eq!(state.team(), Some("Alpha"));
        assert_eq!(state.matches(), Some(&[][..]));
        assert_eq!(SelectionState::default().phase(), Phase::NoDivision);
    }
}
