use super::escape_html;
use crate::aggregation::SeasonSummary;
use crate::constants::presentation::MAX_RESULT_ROWS;
use crate::data_access::MatchResult;

const RESULT_HEADERS: [&str; 7] = ["Date", "Team", "Opponent", "GF", "GA", "Result", "Points"];
const SUMMARY_HEADERS: [&str; 5] = ["Team", "W", "D", "L", "Points"];

fn header_row(headers: &[&str]) -> String {
    let cells: String = headers
        .iter()
        .map(|header| format!("<th>{header}</th>"))
        .collect();
    format!("<thead><tr>{cells}</tr></thead>")
}

/// Match rows as an HTML table. Only the first 50 rows are shown.
pub fn results_table(matches: &[MatchResult]) -> String {
    let mut html = String::from("<table class=\"results\">");
    html.push_str(&header_row(&RESULT_HEADERS));
    html.push_str("<tbody>");
    for result in matches.iter().take(MAX_RESULT_ROWS) {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            result.date.format("%Y-%m-%d"),
            escape_html(&result.team),
            escape_html(&result.opponent),
            result.goals_for,
            result.goals_against,
            result.outcome.code(),
            result.points,
        ));
    }
    html.push_str("</tbody></table>");
    html
}

/// Season record per team as an HTML table.
pub fn summary_table(summaries: &[SeasonSummary]) -> String {
    let mut html = String::from("<table class=\"summary\">");
    html.push_str(&header_row(&SUMMARY_HEADERS));
    html.push_str("<tbody>");
    for summary in summaries {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&summary.team),
            summary.wins,
            summary.draws,
            summary.losses,
            summary.total_points,
        ));
    }
    html.push_str("</tbody></table>");
    html
}
