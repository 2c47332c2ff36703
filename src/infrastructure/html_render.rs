// HTML rendering for the dashboard page: body classes, status text, SVG line charts
use crate::application::status_poller::StatusTargets;
use crate::domain::chart::ChartModel;
use crate::domain::page::PageModel;
use chrono::{DateTime, Utc};

const CHART_WIDTH: f64 = 640.0;
const CHART_HEIGHT: f64 = 240.0;
const MARGIN: f64 = 40.0;

const STYLE: &str = "\
body { font-family: sans-serif; margin: 2em; }
.body-light-on { background: #fffbe6; color: #222; }
.body-light-off { background: #1e1e1e; color: #ddd; }
svg { background: #fff; border: 1px solid #ccc; }
";

/// Render the whole page. `refresh_secs` of zero disables the meta refresh.
pub fn render_page(
    page: &PageModel,
    targets: &StatusTargets,
    charts: &[ChartModel],
    refresh_secs: u64,
) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    if refresh_secs > 0 {
        html.push_str(&format!(
            "<meta http-equiv=\"refresh\" content=\"{refresh_secs}\">\n"
        ));
    }
    html.push_str(&format!(
        "<title>Laundry</title>\n<style>\n{STYLE}</style>\n</head>\n"
    ));
    html.push_str(&format!(
        "<body id=\"{}\" class=\"{}\">\n",
        escape(&targets.body_element),
        escape(&page.class_attr(&targets.body_element))
    ));
    html.push_str(&format!(
        "<p id=\"{}\">{}</p>\n",
        escape(&targets.text_element),
        escape(page.text(&targets.text_element).unwrap_or(""))
    ));
    for chart in charts {
        html.push_str(&render_chart(chart));
    }
    html.push_str("</body>\n</html>\n");
    html
}

/// Render one chart as an inline SVG polyline.
pub fn render_chart(chart: &ChartModel) -> String {
    let plot_w = CHART_WIDTH - 2.0 * MARGIN;
    let plot_h = CHART_HEIGHT - 2.0 * MARGIN;
    let right = CHART_WIDTH - MARGIN;
    let bottom = CHART_HEIGHT - MARGIN;

    let mut svg = format!(
        "<figure>\n<figcaption>{}</figcaption>\n\
         <svg id=\"{}\" width=\"{CHART_WIDTH}\" height=\"{CHART_HEIGHT}\" \
         viewBox=\"0 0 {CHART_WIDTH} {CHART_HEIGHT}\">\n",
        escape(&chart.label),
        escape(&chart.id)
    );
    svg.push_str(&format!(
        "<line x1=\"{MARGIN}\" y1=\"{bottom}\" x2=\"{right}\" y2=\"{bottom}\" stroke=\"#888\"/>\n\
         <line x1=\"{MARGIN}\" y1=\"{MARGIN}\" x2=\"{MARGIN}\" y2=\"{bottom}\" stroke=\"#888\"/>\n"
    ));

    if !chart.data.is_empty() {
        let (x_min, x_max) = extent(&chart.labels);
        let (y_min, y_max) = (chart.y_min(), chart.y_max());
        let x_span = if x_max > x_min { x_max - x_min } else { 1.0 };
        let y_span = if y_max > y_min { y_max - y_min } else { 1.0 };

        let points: Vec<String> = chart
            .labels
            .iter()
            .zip(&chart.data)
            .map(|(x, y)| {
                let px = MARGIN + (x - x_min) / x_span * plot_w;
                let py = bottom - (y - y_min) / y_span * plot_h;
                format!("{px:.1},{py:.1}")
            })
            .collect();
        svg.push_str(&format!(
            "<polyline fill=\"none\" stroke=\"{}\" stroke-width=\"2\" points=\"{}\"/>\n",
            escape(&chart.color),
            points.join(" ")
        ));

        let tick_y = bottom + 14.0;
        let tick_x = MARGIN - 4.0;
        svg.push_str(&tick(MARGIN, tick_y, "start", &format_x(x_min)));
        svg.push_str(&tick(right, tick_y, "end", &format_x(x_max)));
        svg.push_str(&tick(tick_x, bottom, "end", &format_y(y_min)));
        svg.push_str(&tick(tick_x, MARGIN, "end", &format_y(y_max)));
    }

    svg.push_str("</svg>\n</figure>\n");
    svg
}

fn tick(x: f64, y: f64, anchor: &str, label: &str) -> String {
    format!("<text x=\"{x}\" y=\"{y}\" font-size=\"10\" text-anchor=\"{anchor}\">{label}</text>\n")
}

fn extent(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        })
}

/// The time axis reads x as milliseconds since the Unix epoch.
fn format_x(x: f64) -> String {
    DateTime::<Utc>::from_timestamp_millis(x as i64)
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| format_y(x))
}

fn format_y(y: f64) -> String {
    let s = format!("{y:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
