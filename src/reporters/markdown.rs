//! Markdown reporter for GitHub-flavored Markdown output
//!
//! Generates reports suitable for:
//! - Sharing in wikis and issue trackers
//! - Pasting into meeting notes
//! - Conversion to PDF with external tools

use super::{fmt_avg, level_label};
use crate::models::AssessmentReport;
use crate::scoring::Status;
use anyhow::Result;
use chrono::Local;

/// Render report as GitHub-flavored Markdown
pub fn render(report: &AssessmentReport) -> Result<String> {
    let mut md = String::new();

    // Header
    md.push_str(&render_header(report));
    md.push('\n');

    // Table of Contents
    md.push_str(&render_toc());
    md.push('\n');

    // Summary
    md.push_str(&render_summary(report));
    md.push('\n');

    // Category Scores
    md.push_str(&render_categories(report));
    md.push('\n');

    // Priority
    md.push_str(&render_priority(report));
    md.push('\n');

    // Footer
    md.push_str(&render_footer());

    Ok(md)
}

fn render_header(report: &AssessmentReport) -> String {
    let level = report.evaluation.overall_level();
    let timestamp = match report.created_at {
        Some(at) => at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
        None => Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    };

    format!(
        r#"# {} Project Management Maturity Report

**Company: {}** | **Level: {}**

Generated: {}
"#,
        status_emoji(level),
        report.display_name(),
        level_label(level),
        timestamp
    )
}

fn render_toc() -> String {
    r#"## Table of Contents

- [Summary](#summary)
- [Category Scores](#category-scores)
- [Priority](#priority)
"#
    .to_string()
}

fn render_summary(report: &AssessmentReport) -> String {
    let eval = &report.evaluation;
    let size = report.size.map_or("Not specified", |s| s.label());
    let priority = eval
        .recommendation()
        .map_or_else(|| "Insufficient data".to_string(), |k| format!("{} {}", k, k.name()));
    let id = report
        .id
        .map_or_else(|| "-".to_string(), |id| format!("#{}", id));

    format!(
        r#"## Summary

| Metric | Value |
|--------|-------|
| **Submission** | {} |
| **Company Size** | {} |
| **Questions Answered** | {}/{} |
| **Priority** | {} |
"#,
        id, size, eval.answered, eval.total_questions, priority
    )
}

fn render_categories(report: &AssessmentReport) -> String {
    let eval = &report.evaluation;
    let mut md = String::from(
        r#"## Category Scores

| Category | Answered | Avg Maturity | Avg Importance | Risk | Status |
|----------|----------|--------------|----------------|------|--------|
"#,
    );

    for c in &eval.categories {
        let name = if eval.recommendation() == Some(c.category) {
            format!("**{} {}**", c.category, c.name)
        } else {
            format!("{} {}", c.category, c.name)
        };
        let risk = c
            .display_risk
            .map_or_else(|| "-".to_string(), |r| format!("{:.2}", r));
        let status = c
            .status
            .map_or_else(|| "No data".to_string(), |s| format!("{} {}", status_emoji(Some(s)), s));
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            name,
            c.aggregate.count,
            fmt_avg(c.avg_maturity),
            fmt_avg(c.avg_importance),
            risk,
            status
        ));
    }

    md
}

fn render_priority(report: &AssessmentReport) -> String {
    let mut md = String::from("## Priority\n\n");

    let Some(fb) = &report.feedback else {
        md.push_str("No questions were answered, so no priority can be recommended.\n");
        return md;
    };

    md.push_str(&format!(
        "### {}: {} {}\n\n",
        fb.headline,
        fb.category,
        fb.category.name()
    ));
    md.push_str(&format!("{}\n\n", fb.text));
    if !fb.actions.is_empty() {
        md.push_str("**Recommended actions:**\n\n");
        for action in &fb.actions {
            md.push_str(&format!("- {}\n", action));
        }
        md.push('\n');
    }
    if let Some(note) = &fb.size_note {
        md.push_str(&format!("> {}\n", note));
    }

    md
}

fn render_footer() -> String {
    r#"---

*Generated by maturity-check*
"#
    .to_string()
}

fn status_emoji(status: Option<Status>) -> &'static str {
    match status {
        Some(Status::Critical) => "🔴",
        Some(Status::Caution) => "🟡",
        Some(Status::Healthy) => "🟢",
        None => "⚪",
    }
}
