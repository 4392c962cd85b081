use crate::aggregation::{SeasonSummary, cumulative_points, summarize};
use crate::data_access::MatchResult;
use crate::selection::{Phase, Session};
use chrono::NaiveDate;
use serde::Serialize;

/// One step of the running points total
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CumulativePoint {
    pub date: NaiveDate,
    pub total: u32,
}

/// Everything the page shows for one session.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub phase: Phase,
    pub divisions: Vec<String>,
    pub seasons: Vec<String>,
    pub teams: Vec<String>,
    pub division: Option<String>,
    pub season: Option<String>,
    pub team: Option<String>,
    pub can_load: bool,
    /// `None` until results are loaded; an empty list is a loaded empty result
    pub matches: Option<Vec<MatchResult>>,
    pub summary: Vec<SeasonSummary>,
    pub cumulative: Vec<CumulativePoint>,
    pub error: Option<String>,
}

impl DashboardView {
    pub fn from_session(session: &Session) -> Self {
        let selection = session.selection();
        let state = selection.state();
        let matches = state.matches();

        Self {
            phase: state.phase(),
            divisions: selection.divisions().to_vec(),
            seasons: selection.seasons().to_vec(),
            teams: selection.teams().to_vec(),
            division: state.division().map(str::to_string),
            season: state.season().map(str::to_string),
            team: state.team().map(str::to_string),
            can_load: selection.can_load(),
            matches: matches.map(<[MatchResult]>::to_vec),
            summary: matches.map(summarize).unwrap_or_default(),
            cumulative: matches
                .map(|m| {
                    cumulative_points(m)
                        .map(|(date, total)| CumulativePoint { date, total })
                        .collect()
                })
                .unwrap_or_default(),
            error: session.last_error().map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session_view() {
        let session = Session::new(vec!["D1".to_string(), "D2".to_string()]);
        let view = DashboardView::from_session(&session);

        assert_eq!(view.phase, Phase::NoDivision);
        assert_eq!(view.divisions, vec!["D1", "D2"]);
        assert!(view.seasons.is_empty());
        assert!(view.division.is_none());
        assert!(!view.can_load);
        assert!(view.matches.is_none());
        assert!(view.summary.is_empty());
        assert!(view.error.is_none());

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["phase"], "NoDivision");
        assert_eq!(json["matches"], serde_json::Value::Null);
    }
}
