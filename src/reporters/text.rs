//! Text (terminal) reporter with colors and formatting

use super::{fmt_avg, level_label};
use crate::models::AssessmentReport;
use crate::scoring::Status;
use anyhow::Result;

/// Status colors (ANSI escape codes)
fn status_color(status: Option<Status>) -> &'static str {
    match status {
        Some(Status::Critical) => "\x1b[31m", // Red
        Some(Status::Caution) => "\x1b[33m",  // Yellow
        Some(Status::Healthy) => "\x1b[32m",  // Green
        None => "\x1b[90m",                   // Gray
    }
}

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Status tag
fn status_tag(status: Option<Status>) -> &'static str {
    match status {
        Some(Status::Critical) => "[!]",
        Some(Status::Caution) => "[~]",
        Some(Status::Healthy) => "[ok]",
        None => "[-]",
    }
}

/// Render report as formatted terminal output
pub fn render(report: &AssessmentReport) -> Result<String> {
    let eval = &report.evaluation;
    let mut out = String::new();

    // Header
    let level = eval.overall_level();
    let level_c = status_color(level);
    out.push_str(&format!("\n{BOLD}Project Management Maturity Check{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!("Company: {}", report.display_name()));
    if let Some(size) = report.size {
        out.push_str(&format!("  Size: {}", size.label()));
    }
    if let Some(id) = report.id {
        out.push_str(&format!("  {DIM}#{}{RESET}", id));
    }
    out.push('\n');
    out.push_str(&format!(
        "Level: {level_c}{BOLD}{}{RESET}  Answered: {}/{}\n\n",
        level_label(level),
        eval.answered,
        eval.total_questions
    ));

    // Category table
    out.push_str(&format!("{BOLD}CATEGORIES{RESET}\n"));
    out.push_str(&format!(
        "{DIM}       CATEGORY                      MATURITY  IMPORTANCE  RISK{RESET}\n"
    ));
    out.push_str(&format!(
        "{DIM}  ─────────────────────────────────────────────────────────────{RESET}\n"
    ));
    for c in &eval.categories {
        let color = status_color(c.status);
        let marker = if eval.recommendation() == Some(c.category) {
            "*"
        } else {
            " "
        };
        let risk = c
            .display_risk
            .map_or_else(|| "no data".to_string(), |r| format!("{:.2}", r));
        out.push_str(&format!(
            "  {marker}{color}{:<5}{RESET} {} {:<26}  {:>8}  {:>10}  {}\n",
            status_tag(c.status),
            c.category,
            c.name,
            fmt_avg(c.avg_maturity),
            fmt_avg(c.avg_importance),
            risk
        ));
    }
    out.push('\n');

    // Priority and feedback
    match &report.feedback {
        Some(fb) => {
            out.push_str(&format!(
                "{BOLD}PRIORITY{RESET}  {} {}\n",
                fb.category,
                fb.category.name()
            ));
            out.push_str(&format!("  {BOLD}{}{RESET}\n", fb.headline));
            out.push_str(&format!("  {}\n", fb.text));
            for action in &fb.actions {
                out.push_str(&format!("  - {}\n", action));
            }
            if let Some(note) = &fb.size_note {
                out.push_str(&format!("  {DIM}{}{RESET}\n", note));
            }
            out.push('\n');
        }
        None => {
            out.push_str(&format!(
                "{BOLD}PRIORITY{RESET}  {DIM}insufficient data{RESET}\n"
            ));
            out.push_str(&format!(
                "{DIM}Answer at least one question to get a recommendation.{RESET}\n\n"
            ));
        }
    }

    Ok(out)
}
