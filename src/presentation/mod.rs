//! HTML rendering of the dashboard.
//!
//! Everything here is a pure function of a [`DashboardView`]; the server only
//! decides which view to render.

pub mod chart;
pub mod page;
pub mod tables;
pub mod view;

pub use chart::PointsChart;
pub use page::render_page;
pub use tables::{results_table, summary_table};
pub use view::{CumulativePoint, DashboardView};

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
