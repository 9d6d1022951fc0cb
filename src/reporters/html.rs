//! HTML reporter with embedded styles and charts
//!
//! Generates a standalone, printable HTML report that can be viewed in any
//! browser. Includes:
//! - Overall level badge
//! - Radar chart of current vs. ideal maturity
//! - Maturity x importance matrix with the priority highlighted
//! - Category table and priority guidance
//!
//! Charts are inline SVG so the file has no external dependencies.

use super::{fmt_avg, level_label};
use crate::models::{AssessmentReport, CategoryKey, MAX_IMPORTANCE, MIN_IMPORTANCE};
use crate::scoring::{MatrixPoint, RadarPoint, Status, IDEAL_MATURITY};
use anyhow::Result;
use chrono::Local;

/// Render report as standalone HTML
pub fn render(report: &AssessmentReport) -> Result<String> {
    let mut html = String::new();

    // DOCTYPE and head
    html.push_str(&render_head(report));

    // Body
    html.push_str("<body>\n<div class=\"container\">\n");

    // Header
    html.push_str(&render_header(report));

    // Content
    html.push_str("<div class=\"content\">\n");

    // Level section
    html.push_str(&render_level_section(report));

    // Charts
    html.push_str(&render_charts(report));

    // Category table
    html.push_str(&render_category_table(report));

    // Priority guidance
    html.push_str(&render_priority(report));

    html.push_str("</div>\n"); // content

    // Footer
    html.push_str(&render_footer());

    html.push_str("</div>\n</body>\n</html>");

    Ok(html)
}

fn render_head(report: &AssessmentReport) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Maturity Report - {}</title>
    <style>
{CSS}
    </style>
</head>
"#,
        html_escape(report.display_name())
    )
}

fn render_header(report: &AssessmentReport) -> String {
    let timestamp = match report.created_at {
        Some(at) => at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
        None => Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    };
    let size = report
        .size
        .map(|s| format!(" &middot; {}", html_escape(s.label())))
        .unwrap_or_default();
    format!(
        r#"<div class="header">
    <h1>Project Management Maturity Report</h1>
    <p class="company">{}{}</p>
    <p class="timestamp">Generated {}</p>
</div>
"#,
        html_escape(report.display_name()),
        size,
        timestamp
    )
}

fn render_level_section(report: &AssessmentReport) -> String {
    let eval = &report.evaluation;
    let level = eval.overall_level();

    format!(
        r#"<div class="level-section">
    <div class="level-badge {}">{}</div>
    <p class="level-description">Answered {} of {} questions</p>
</div>
"#,
        status_class(level),
        level_label(level),
        eval.answered,
        eval.total_questions
    )
}

fn render_charts(report: &AssessmentReport) -> String {
    let eval = &report.evaluation;
    if eval.insufficient_data {
        return String::new();
    }

    format!(
        r#"<div class="section">
    <h2 class="section-title">Overview</h2>
    <div class="charts">
        <div class="chart-card">
            <h3>Current vs. Ideal Maturity</h3>
{}
        </div>
        <div class="chart-card">
            <h3>Maturity x Importance</h3>
{}
        </div>
    </div>
</div>
"#,
        radar_svg(&eval.radar()),
        matrix_svg(&eval.matrix())
    )
}

/// Radar center and radius in SVG user units
const RADAR_CENTER: f64 = 150.0;
const RADAR_RADIUS: f64 = 110.0;

/// One axis per category, starting at 12 o'clock and going clockwise
fn radar_xy(category: CategoryKey, value: f64) -> (f64, f64) {
    let step = std::f64::consts::TAU / CategoryKey::ALL.len() as f64;
    let angle = category.index() as f64 * step - std::f64::consts::FRAC_PI_2;
    let r = RADAR_RADIUS * value / IDEAL_MATURITY;
    (
        RADAR_CENTER + r * angle.cos(),
        RADAR_CENTER + r * angle.sin(),
    )
}

fn polygon_points(points: impl Iterator<Item = (f64, f64)>) -> String {
    points
        .map(|(x, y)| format!("{:.1},{:.1}", x, y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn radar_svg(radar: &[RadarPoint]) -> String {
    let mut svg = String::from(
        r#"            <svg class="radar" viewBox="0 0 300 300" role="img" aria-label="Radar chart">
"#,
    );

    // Grid rings and axes
    for level in 1..=3 {
        let ring = polygon_points(
            CategoryKey::ALL
                .iter()
                .map(|k| radar_xy(*k, level as f64)),
        );
        svg.push_str(&format!(
            "                <polygon class=\"grid\" points=\"{}\"/>\n",
            ring
        ));
    }
    for key in CategoryKey::ALL {
        let (x, y) = radar_xy(key, IDEAL_MATURITY);
        let (lx, ly) = radar_xy(key, IDEAL_MATURITY + 0.35);
        svg.push_str(&format!(
            "                <line class=\"grid\" x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\"/>\n",
            RADAR_CENTER, RADAR_CENTER, x, y
        ));
        svg.push_str(&format!(
            "                <text class=\"axis-label\" x=\"{:.1}\" y=\"{:.1}\">{}</text>\n",
            lx, ly, key
        ));
    }

    // Ideal series covers every axis; the current series only answered ones
    let ideal = polygon_points(
        CategoryKey::ALL
            .iter()
            .map(|k| radar_xy(*k, IDEAL_MATURITY)),
    );
    let current = polygon_points(radar.iter().map(|p| radar_xy(p.category, p.current)));
    svg.push_str(&format!(
        "                <polygon class=\"ideal\" points=\"{}\"/>\n",
        ideal
    ));
    svg.push_str(&format!(
        "                <polygon class=\"current\" points=\"{}\"/>\n",
        current
    ));
    for p in radar {
        let (x, y) = radar_xy(p.category, p.current);
        svg.push_str(&format!(
            "                <circle class=\"current\" cx=\"{:.1}\" cy=\"{:.1}\" r=\"4\"><title>{}: {:.2}</title></circle>\n",
            x,
            y,
            html_escape(p.name),
            p.current
        ));
    }

    svg.push_str("            </svg>");
    svg
}

/// Matrix plot area in SVG user units
const PLOT_LEFT: f64 = 40.0;
const PLOT_TOP: f64 = 20.0;
const PLOT_SIZE: f64 = 240.0;

fn matrix_xy(maturity: f64, importance: f64) -> (f64, f64) {
    let span = (MAX_IMPORTANCE - MIN_IMPORTANCE) as f64;
    let x = PLOT_LEFT + PLOT_SIZE * maturity / IDEAL_MATURITY;
    let y = PLOT_TOP + PLOT_SIZE * (1.0 - (importance - MIN_IMPORTANCE as f64) / span);
    (x, y)
}

fn matrix_svg(matrix: &[MatrixPoint]) -> String {
    let mut svg = String::from(
        r#"            <svg class="matrix" viewBox="0 0 300 300" role="img" aria-label="Maturity and importance matrix">
"#,
    );

    // Frame, with the danger quadrant (low maturity, high importance) shaded
    let (mid_x, mid_y) = matrix_xy(IDEAL_MATURITY / 2.0, 2.0);
    svg.push_str(&format!(
        "                <rect class=\"danger\" x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\"/>\n",
        PLOT_LEFT,
        PLOT_TOP,
        mid_x - PLOT_LEFT,
        mid_y - PLOT_TOP
    ));
    svg.push_str(&format!(
        "                <rect class=\"frame\" x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\"/>\n",
        PLOT_LEFT, PLOT_TOP, PLOT_SIZE, PLOT_SIZE
    ));
    svg.push_str(&format!(
        "                <line class=\"grid\" x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\"/>\n",
        mid_x,
        PLOT_TOP,
        mid_x,
        PLOT_TOP + PLOT_SIZE
    ));
    svg.push_str(&format!(
        "                <line class=\"grid\" x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\"/>\n",
        PLOT_LEFT,
        mid_y,
        PLOT_LEFT + PLOT_SIZE,
        mid_y
    ));
    svg.push_str(&format!(
        "                <text class=\"axis-label\" x=\"{:.1}\" y=\"295\">Maturity</text>\n",
        PLOT_LEFT + PLOT_SIZE / 2.0
    ));
    svg.push_str(&format!(
        "                <text class=\"axis-label\" x=\"12\" y=\"{:.1}\" transform=\"rotate(-90 12 {:.1})\">Importance</text>\n",
        PLOT_TOP + PLOT_SIZE / 2.0,
        PLOT_TOP + PLOT_SIZE / 2.0
    ));

    for p in matrix {
        let (x, y) = matrix_xy(p.maturity, p.importance);
        let class = if p.is_priority { "point priority" } else { "point" };
        svg.push_str(&format!(
            "                <circle class=\"{}\" cx=\"{:.1}\" cy=\"{:.1}\" r=\"{}\"><title>{}: maturity {:.2}, importance {:.2}</title></circle>\n",
            class,
            x,
            y,
            if p.is_priority { 9 } else { 6 },
            html_escape(p.name),
            p.maturity,
            p.importance
        ));
        svg.push_str(&format!(
            "                <text class=\"point-label\" x=\"{:.1}\" y=\"{:.1}\">{}</text>\n",
            x + 11.0,
            y + 4.0,
            p.category
        ));
    }

    svg.push_str("            </svg>");
    svg
}

fn render_category_table(report: &AssessmentReport) -> String {
    let eval = &report.evaluation;
    let mut rows = String::new();

    for c in &eval.categories {
        let row_class = if eval.recommendation() == Some(c.category) {
            " class=\"priority-row\""
        } else {
            ""
        };
        let risk = c
            .display_risk
            .map_or_else(|| "-".to_string(), |r| format!("{:.2}", r));
        let status = match c.status {
            Some(s) => format!(
                "<span class=\"status-badge {}\">{}</span>",
                status_class(Some(s)),
                s
            ),
            None => "<span class=\"status-badge status-none\">No data</span>".to_string(),
        };
        rows.push_str(&format!(
            r#"            <tr{}>
                <td><strong>{}</strong> {}</td>
                <td>{}</td>
                <td>{}</td>
                <td>{}</td>
                <td>{}</td>
                <td>{}</td>
            </tr>
"#,
            row_class,
            c.category,
            html_escape(c.name),
            c.aggregate.count,
            fmt_avg(c.avg_maturity),
            fmt_avg(c.avg_importance),
            risk,
            status
        ));
    }

    format!(
        r#"<div class="section">
    <h2 class="section-title">Category Scores</h2>
    <table class="scores">
        <thead>
            <tr><th>Category</th><th>Answered</th><th>Avg Maturity</th><th>Avg Importance</th><th>Risk</th><th>Status</th></tr>
        </thead>
        <tbody>
{}        </tbody>
    </table>
</div>
"#,
        rows
    )
}

fn render_priority(report: &AssessmentReport) -> String {
    let Some(fb) = &report.feedback else {
        return r#"<div class="section">
    <h2 class="section-title">Priority</h2>
    <p class="empty-state">No questions were answered, so no priority can be recommended.</p>
</div>
"#
        .to_string();
    };

    let actions: String = fb
        .actions
        .iter()
        .map(|a| format!("            <li>{}</li>\n", html_escape(a)))
        .collect();
    let actions_html = if actions.is_empty() {
        String::new()
    } else {
        format!(
            "        <div class=\"actions-label\">Recommended actions</div>\n        <ul class=\"actions\">\n{}        </ul>\n",
            actions
        )
    };
    let note_html = fb
        .size_note
        .as_deref()
        .map(|n| format!("        <div class=\"size-note\">{}</div>\n", html_escape(n)))
        .unwrap_or_default();

    format!(
        r#"<div class="section">
    <h2 class="section-title">Priority: {} {}</h2>
    <div class="priority-card">
        <div class="priority-headline">{}</div>
        <p class="priority-text">{}</p>
{}{}    </div>
</div>
"#,
        fb.category,
        html_escape(fb.category.name()),
        html_escape(fb.headline),
        html_escape(fb.text),
        actions_html,
        note_html
    )
}

fn render_footer() -> String {
    r#"<div class="footer">
    <p>Generated by maturity-check</p>
</div>
"#
    .to_string()
}

fn status_class(status: Option<Status>) -> &'static str {
    match status {
        Some(Status::Critical) => "status-critical",
        Some(Status::Caution) => "status-caution",
        Some(Status::Healthy) => "status-healthy",
        None => "status-none",
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// Embedded CSS
const CSS: &str = r#"
:root {
    --primary-color: #0f766e;
    --background-color: #f8fafc;
    --text-color: #1e293b;
    --card-background: white;
    --border-color: #e2e8f0;
}

* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    line-height: 1.6;
    color: var(--text-color);
    background: var(--background-color);
    padding: 2rem;
}

.container {
    max-width: 1000px;
    margin: 0 auto;
    background: var(--card-background);
    border-radius: 12px;
    box-shadow: 0 4px 6px -1px rgba(0,0,0,0.1);
    overflow: hidden;
}

.header {
    background: linear-gradient(135deg, #0f766e 0%, #0e7490 100%);
    color: white;
    padding: 2.5rem 2rem;
    text-align: center;
}

.header h1 { font-size: 2rem; margin-bottom: 0.25rem; }
.header .company { font-size: 1.1rem; font-weight: 600; }
.header .timestamp { opacity: 0.85; font-size: 0.9rem; }

.content { padding: 2rem; }

.level-section {
    text-align: center;
    padding: 1.5rem;
    background: #f1f5f9;
    border-radius: 8px;
    margin-bottom: 2rem;
}

.level-badge {
    display: inline-block;
    font-size: 1.5rem;
    font-weight: bold;
    padding: 0.5rem 1.5rem;
    border-radius: 999px;
    color: white;
    margin-bottom: 0.5rem;
}

.level-description { color: #64748b; }

.status-critical { background: #dc2626; color: white; }
.status-caution { background: #ca8a04; color: white; }
.status-healthy { background: #16a34a; color: white; }
.status-none { background: #94a3b8; color: white; }

.section { margin-bottom: 2rem; }
.section-title {
    font-size: 1.4rem;
    margin-bottom: 1rem;
    padding-bottom: 0.5rem;
    border-bottom: 2px solid var(--border-color);
}

.charts {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(300px, 1fr));
    gap: 1rem;
}

.chart-card {
    border: 1px solid var(--border-color);
    border-radius: 8px;
    padding: 1rem;
}

.chart-card h3 {
    font-size: 0.875rem;
    color: #64748b;
    margin-bottom: 0.5rem;
    text-transform: uppercase;
}

.chart-card svg { width: 100%; height: auto; }

svg .grid { fill: none; stroke: #cbd5e1; stroke-width: 1; }
svg .frame { fill: none; stroke: #94a3b8; stroke-width: 1; }
svg .danger { fill: #fee2e2; }
svg .ideal { fill: none; stroke: #94a3b8; stroke-dasharray: 4 3; stroke-width: 1.5; }
svg polygon.current { fill: rgba(15, 118, 110, 0.25); stroke: #0f766e; stroke-width: 2; }
svg circle.current { fill: #0f766e; }
svg .point { fill: #0e7490; }
svg .point.priority { fill: #dc2626; }
svg .axis-label { font-size: 12px; fill: #475569; text-anchor: middle; }
svg .point-label { font-size: 12px; fill: #1e293b; font-weight: 600; }

table.scores { width: 100%; border-collapse: collapse; }
table.scores th, table.scores td {
    text-align: left;
    padding: 0.6rem 0.75rem;
    border-bottom: 1px solid var(--border-color);
}
table.scores th { font-size: 0.8rem; color: #64748b; text-transform: uppercase; }
table.scores tr.priority-row { background: #fef2f2; }

.status-badge {
    padding: 0.15rem 0.6rem;
    border-radius: 6px;
    font-size: 0.8rem;
    font-weight: 600;
    white-space: nowrap;
}

.priority-card {
    padding: 1.25rem;
    background: #ecfdf5;
    border-left: 4px solid var(--primary-color);
    border-radius: 4px;
}

.priority-headline { font-weight: 700; font-size: 1.15rem; margin-bottom: 0.5rem; }
.priority-text { margin-bottom: 1rem; }
.actions-label { font-weight: 600; color: #047857; margin-bottom: 0.25rem; }
.actions { margin: 0 0 1rem 1.5rem; }
.size-note { color: #475569; font-style: italic; }
.empty-state { color: #64748b; font-style: italic; }

.footer {
    text-align: center;
    padding: 2rem;
    color: #64748b;
    border-top: 1px solid var(--border-color);
}

@media (max-width: 768px) {
    body { padding: 1rem; }
    .header { padding: 2rem 1rem; }
    .header h1 { font-size: 1.5rem; }
}

@media print {
    body { padding: 0; background: white; }
    .container { box-shadow: none; }
    .chart-card, .priority-card { page-break-inside: avoid; }
}
"#;
