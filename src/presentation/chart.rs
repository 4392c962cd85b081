use super::escape_html;
use crate::aggregation::cumulative_points;
use crate::constants::presentation::{
    CHART_HEIGHT, CHART_PADDING, CHART_TITLE, CHART_WIDTH, MARKER_RADIUS,
};
use crate::data_access::MatchResult;
use chrono::NaiveDate;

/// Line chart of a running points total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointsChart {
    pub title: String,
    pub points: Vec<(NaiveDate, u32)>,
}

impl PointsChart {
    /// Chart of the cumulative points over `matches`, in their stored order.
    pub fn from_matches(matches: &[MatchResult]) -> Self {
        Self {
            title: CHART_TITLE.to_string(),
            points: cumulative_points(matches).collect(),
        }
    }

    /// Pixel position of every point inside the plot area.
    fn coordinates(&self) -> Vec<(f64, f64)> {
        let width = f64::from(CHART_WIDTH);
        let height = f64::from(CHART_HEIGHT);
        let padding = f64::from(CHART_PADDING);
        let plot_width = width - 2.0 * padding;
        let plot_height = height - 2.0 * padding;

        let max_total = self.points.iter().map(|(_, t)| *t).max().unwrap_or(0).max(1);
        let steps = self.points.len().saturating_sub(1);

        self.points
            .iter()
            .enumerate()
            .map(|(i, (_, total))| {
                let x = if steps == 0 {
                    width / 2.0
                } else {
                    padding + plot_width * i as f64 / steps as f64
                };
                let y = height - padding - plot_height * f64::from(*total) / f64::from(max_total);
                (x, y)
            })
            .collect()
    }

    /// Renders the chart as an inline SVG element.
    pub fn to_svg(&self) -> String {
        let width = CHART_WIDTH;
        let height = CHART_HEIGHT;
        let padding = CHART_PADDING;
        let baseline = height - padding;

        let mut svg = format!(
            "<svg class=\"points-chart\" xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {width} {height}\" width=\"{width}\" height=\"{height}\" role=\"img\">"
        );
        svg.push_str(&format!(
            "<title>{}</title><text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-size=\"16\">{}</text>",
            escape_html(&self.title),
            width / 2,
            padding / 2,
            escape_html(&self.title),
        ));
        // Axes
        svg.push_str(&format!(
            "<line x1=\"{padding}\" y1=\"{baseline}\" x2=\"{}\" y2=\"{baseline}\" stroke=\"#888\"/>\
<line x1=\"{padding}\" y1=\"{padding}\" x2=\"{padding}\" y2=\"{baseline}\" stroke=\"#888\"/>",
            width - padding,
        ));

        let coordinates = self.coordinates();
        if !coordinates.is_empty() {
            let polyline: Vec<String> = coordinates
                .iter()
                .map(|(x, y)| format!("{x:.1},{y:.1}"))
                .collect();
            svg.push_str(&format!(
                "<polyline class=\"series\" points=\"{}\" fill=\"none\" stroke=\"#1f77b4\" stroke-width=\"2\"/>",
                polyline.join(" ")
            ));
            for ((x, y), (date, total)) in coordinates.iter().zip(&self.points) {
                svg.push_str(&format!(
                    "<circle class=\"marker\" cx=\"{x:.1}\" cy=\"{y:.1}\" r=\"{MARKER_RADIUS}\" fill=\"#1f77b4\"><title>{date}: {total}</title></circle>"
                ));
            }

            let max_total = self.points.iter().map(|(_, t)| *t).max().unwrap_or(0);
            let first = self.points.first().map(|(d, _)| d.to_string()).unwrap_or_default();
            let last = self.points.last().map(|(d, _)| d.to_string()).unwrap_or_default();
            svg.push_str(&format!(
                "<text x=\"{padding}\" y=\"{}\" font-size=\"11\">{first}</text>\
<text x=\"{}\" y=\"{}\" font-size=\"11\" text-anchor=\"end\">{last}</text>\
<text x=\"{}\" y=\"{padding}\" font-size=\"11\" text-anchor=\"end\">{max_total}</text>",
                baseline + 16,
                width - padding,
                baseline + 16,
                padding - 6,
            ));
        }
        svg.push_str(&format!(
            "<text x=\"{}\" y=\"{baseline}\" font-size=\"11\" text-anchor=\"end\">0</text>",
            padding - 6
        ));

        svg.push_str("</svg>");
        svg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::TestDataBuilder;

    #[test]
    fn test_chart_from_scenario() {
        let chart = PointsChart::from_matches(&TestDataBuilder::scenario_matches());
        assert_eq!(chart.title, "Points Accumulation");
        let totals: Vec<u32> = chart.points.iter().map(|(_, t)| *t).collect();
        assert_eq!(totals, vec![3, 4, 4]);
    }

    #[test]
    fn test_svg_has_line_and_marker_per_point() {
        let chart = PointsChart::from_matches(&TestDataBuilder::scenario_matches());
        let svg = chart.to_svg();

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<polyline").count(), 1);
        assert_eq!(svg.matches("class=\"marker\"").count(), 3);
        assert!(svg.contains("<title>Points Accumulation</title>"));
        assert!(svg.contains("2023-01-08: 4"));
        assert!(!svg.contains("class=\"legend\""));
    }

    #[test]
    fn test_points_rise_with_total() {
        let chart = PointsChart::from_matches(&TestDataBuilder::scenario_matches());
        let coordinates = chart.coordinates();
        // Higher totals sit higher on the canvas, equal totals at equal height
        assert!(coordinates[1].1 < coordinates[0].1);
        assert_eq!(coordinates[1].1, coordinates[2].1);
        assert!(coordinates[0].0 < coordinates[1].0);
    }

    #[test]
    fn test_empty_and_single_point_charts() {
        let svg = PointsChart::from_matches(&[]).to_svg();
        assert!(!svg.contains("<polyline"));
        assert!(!svg.contains("class=\"marker\""));

        let single = vec![TestDataBuilder::create_match("2023-01-01", "Alpha", "Beta", 0, 0)];
        let chart = PointsChart::from_matches(&single);
        assert_eq!(chart.coordinates(), vec![(f64::from(CHART_WIDTH) / 2.0, f64::from(CHART_PADDING))]);
        assert_eq!(chart.to_svg().matches("class=\"marker\"").count(), 1);
    }
}
