//! Cascading selection rules.
//!
//! `Selection::handle` decides what an event does and which lookup (if any) it
//! needs; the caller runs that lookup and hands the rows back through
//! `Selection::apply`. Keeping the I/O outside makes every transition a plain
//! function of the current state.

use super::state::SelectionState;
use crate::data_access::{Answer, Query};
use serde::{Deserialize, Serialize};

/// A user interaction on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "value", rename_all = "snake_case")]
pub enum SelectionEvent {
    ChooseDivision(String),
    ChooseSeason(String),
    ChooseTeam(String),
    Load,
}

/// Why an event left the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Suppression {
    /// A required upstream selection is unset
    MissingUpstream,
    /// The selector was cleared
    EmptyValue,
    /// The value is not among the current options
    UnknownOption,
    /// The value is already selected
    Unchanged,
    /// Load requested outside `DivisionSeasonTeam`
    NotLoadable,
}

/// What the caller has to do after [`Selection::handle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Run the lookup and pass its rows to [`Selection::apply`]
    Fetch(Query),
    /// The transition is complete
    Settled,
    /// Nothing changed
    Suppressed(Suppression),
}

/// Option lists plus the current selection state of one session.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    divisions: Vec<String>,
    seasons: Vec<String>,
    teams: Vec<String>,
    state: SelectionState,
}

impl Selection {
    /// Starts with nothing selected and the given division options.
    pub fn new(divisions: Vec<String>) -> Self {
        Self {
            divisions,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn divisions(&self) -> &[String] {
        &self.divisions
    }

    pub fn seasons(&self) -> &[String] {
        &self.seasons
    }

    pub fn teams(&self) -> &[String] {
        &self.teams
    }

    /// True when an explicit load would be accepted
    pub fn can_load(&self) -> bool {
        matches!(self.state, SelectionState::DivisionSeasonTeam { .. })
    }

    pub fn handle(&mut self, event: SelectionEvent) -> Step {
        match event {
            SelectionEvent::ChooseDivision(division) => self.choose_division(division),
            SelectionEvent::ChooseSeason(season) => self.choose_season(season),
            SelectionEvent::ChooseTeam(team) => self.choose_team(team),
            SelectionEvent::Load => self.load(),
        }
    }

    /// Stores the rows of `query`. Returns `false` and changes nothing when the
    /// answer no longer matches the current selection.
    pub fn apply(&mut self, query: &Query, answer: Answer) -> bool {
        match (query, answer) {
            (Query::Seasons { division }, Answer::Seasons(seasons)) => {
                if matches!(&self.state, SelectionState::DivisionOnly { division: d } if d == division)
                {
                    self.seasons = seasons;
                    return true;
                }
                false
            }
            (Query::Teams { division, season }, Answer::Teams(teams)) => {
                if matches!(
                    &self.state,
                    SelectionState::DivisionSeason { division: d, season: s }
                        if d == division && s == season
                ) {
                    self.teams = teams;
                    return true;
                }
                false
            }
            (
                Query::Matches {
                    division,
                    season,
                    team,
                },
                Answer::Matches(matches),
            ) => {
                if matches!(
                    &self.state,
                    SelectionState::DivisionSeasonTeam { division: d, season: s, team: t }
                        if d == division && s == season && t == team
                ) {
                    self.state = SelectionState::ResultsLoaded {
                        division: division.clone(),
                        season: season.clone(),
                        team: team.clone(),
                        matches,
                    };
                    return true;
                }
                false
            }
            _ => false,
        }
    }

    fn choose_division(&mut self, division: String) -> Step {
        if division.trim().is_empty() {
            return Step::Suppressed(Suppression::EmptyValue);
        }
        if !self.divisions.contains(&division) {
            return Step::Suppressed(Suppression::UnknownOption);
        }
        if self.state.division() == Some(division.as_str()) {
            return Step::Suppressed(Suppression::Unchanged);
        }

        self.seasons.clear();
        self.teams.clear();
        self.state = SelectionState::DivisionOnly {
            division: division.clone(),
        };
        Step::Fetch(Query::Seasons { division })
    }

    fn choose_season(&mut self, season: String) -> Step {
        if season.trim().is_empty() {
            return Step::Suppressed(Suppression::EmptyValue);
        }
        let Some(division) = self.state.division().map(str::to_string) else {
            return Step::Suppressed(Suppression::MissingUpstream);
        };
        if !self.seasons.contains(&season) {
            return Step::Suppressed(Suppression::UnknownOption);
        }
        if self.state.season() == Some(season.as_str()) {
            return Step::Suppressed(Suppression::Unchanged);
        }

        self.teams.clear();
        self.state = SelectionState::DivisionSeason {
            division: division.clone(),
            season: season.clone(),
        };
        Step::Fetch(Query::Teams { division, season })
    }

    fn choose_team(&mut self, team: String) -> Step {
        if team.trim().is_empty() {
            return Step::Suppressed(Suppression::EmptyValue);
        }
        let (Some(division), Some(season)) = (self.state.division(), self.state.season()) else {
            return Step::Suppressed(Suppression::MissingUpstream);
        };
        if !self.teams.contains(&team) {
            return Step::Suppressed(Suppression::UnknownOption);
        }
        if self.state.team() == Some(team.as_str()) {
            return Step::Suppressed(Suppression::Unchanged);
        }

        self.state = SelectionState::DivisionSeasonTeam {
            division: division.to_string(),
            season: season.to_string(),
            team,
        };
        Step::Settled
    }

    fn load(&mut self) -> Step {
        match &self.state {
            SelectionState::DivisionSeasonTeam {
                division,
                season,
                team,
            } => Step::Fetch(Query::Matches {
                division: division.clone(),
                season: season.clone(),
                team: team.clone(),
            }),
            SelectionState::ResultsLoaded { .. } => Step::Suppressed(Suppression::NotLoadable),
            _ => Step::Suppressed(Suppression::MissingUpstream),
        }
    }
}
