use super::chart::PointsChart;
use super::escape_html;
use super::tables::{results_table, summary_table};
use super::view::DashboardView;
use crate::constants::presentation::PAGE_TITLE;

const STYLE: &str = "body{font-family:sans-serif;margin:2rem;color:#222}\
.selectors{display:flex;gap:1rem;align-items:flex-end;margin-bottom:1.5rem}\
.selectors label{display:block;font-size:.85rem;margin-bottom:.25rem}\
select{min-width:12rem}\
.error{background:#fde2e1;border:1px solid #f5a3a0;padding:.75rem;margin-bottom:1rem}\
table{border-collapse:collapse;margin-bottom:1.5rem}\
th,td{border:1px solid #ccc;padding:.25rem .6rem;text-align:left}\
th{background:#f3f3f3}";

/// A cascading selector that posts its value as soon as it changes.
fn selector(label: &str, action: &str, options: &[String], selected: Option<&str>) -> String {
    let disabled = if options.is_empty() { " disabled" } else { "" };
    let mut html = format!(
        "<form method=\"post\" action=\"{action}\"><label>{label}<select name=\"value\" onchange=\"this.form.submit()\"{disabled}>\
<option value=\"\">Select {}</option>",
        label.to_lowercase()
    );
    for option in options {
        let escaped = escape_html(option);
        let marker = if selected == Some(option.as_str()) {
            " selected"
        } else {
            ""
        };
        html.push_str(&format!(
            "<option value=\"{escaped}\"{marker}>{escaped}</option>"
        ));
    }
    html.push_str("</select></label></form>");
    html
}

/// Full HTML document for `view`.
pub fn render_page(view: &DashboardView) -> String {
    let mut body = format!("<h1>{PAGE_TITLE}</h1>");

    if let Some(error) = &view.error {
        body.push_str(&format!(
            "<div class=\"error\" role=\"alert\">{}</div>",
            escape_html(error)
        ));
    }

    body.push_str("<div class=\"selectors\">");
    body.push_str(&selector(
        "Division",
        "/select/division",
        &view.divisions,
        view.division.as_deref(),
    ));
    body.push_str(&selector(
        "Season",
        "/select/season",
        &view.seasons,
        view.season.as_deref(),
    ));
    body.push_str(&selector(
        "Team",
        "/select/team",
        &view.teams,
        view.team.as_deref(),
    ));
    let disabled = if view.can_load { "" } else { " disabled" };
    body.push_str(&format!(
        "<form method=\"post\" action=\"/load\"><button type=\"submit\"{disabled}>Submit</button></form>"
    ));
    body.push_str("</div>");

    if let Some(matches) = &view.matches {
        body.push_str("<section id=\"results\"><h2>Results</h2>");
        if matches.is_empty() {
            body.push_str("<p>No matches found for this selection.</p>");
        }
        body.push_str(&results_table(matches));
        body.push_str("</section><section id=\"summary\"><h2>Season Summary</h2>");
        body.push_str(&summary_table(&view.summary));
        body.push_str("</section><section id=\"chart\">");
        body.push_str(&PointsChart::from_matches(matches).to_svg());
        body.push_str("</section>");
    }

    format!(
        "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\">\
<title>{PAGE_TITLE}</title><style>{STYLE}</style></head><body>{body}</body></html>"
    )
}
