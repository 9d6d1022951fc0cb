//! Report and evaluate commands - render an evaluation in any format

use super::{emit, Workspace};
use anyhow::{Context, Result};
use maturity_check::catalog::{SizeBracket, QUESTIONS};
use maturity_check::models::{AssessmentReport, SubmissionRequest};
use maturity_check::reporters::{report_with_format, OutputFormat};
use maturity_check::scoring::evaluate;
use maturity_check::store::{FileStore, SubmissionStore};
use maturity_check::validate::validate;
use std::path::Path;
use tracing::warn;

/// Re-evaluate a stored submission and render it
pub fn run_stored(
    ws: &Workspace,
    id: u64,
    format: Option<&str>,
    output: Option<&Path>,
    size: Option<&str>,
    explain: bool,
) -> Result<()> {
    let format = ws.format(format)?;
    let store_dir = ws.config.store_dir(&ws.root);
    let store = FileStore::open(&store_dir)
        .with_context(|| format!("Failed to open store {}", store_dir.display()))?;
    let submission = store.get(id)?;

    // Scores are never stored; always recompute from the raw answers
    let evaluation = evaluate(QUESTIONS, &submission.answers)
        .with_context(|| format!("Stored submission {} is no longer valid", id))?;
    let report = AssessmentReport::for_submission(&submission, evaluation, ws.default_size(size));

    render(&report, format, output, explain)
}

/// Evaluate a request without storing it
pub fn run_unsaved(
    ws: &Workspace,
    request: &SubmissionRequest,
    format: Option<&str>,
    output: Option<&Path>,
    size: Option<&str>,
    explain: bool,
) -> Result<()> {
    let format = ws.format(format)?;
    if let Err(e) = validate(request, QUESTIONS) {
        anyhow::bail!("Invalid answers: {} (field: {})", e, e.field());
    }

    let evaluation = evaluate(QUESTIONS, &request.answers)?;
    let declared = request
        .user_info
        .as_ref()
        .and_then(|u| u.company_size.as_deref())
        .filter(|s| SizeBracket::from_id(s).is_some());
    let mut report = AssessmentReport::new(evaluation, declared.or(ws.default_size(size)));
    report.company_name = request
        .user_info
        .as_ref()
        .and_then(|u| u.company_name.clone())
        .filter(|s| !s.trim().is_empty());

    render(&report, format, output, explain)
}

fn render(
    report: &AssessmentReport,
    format: OutputFormat,
    output: Option<&Path>,
    explain: bool,
) -> Result<()> {
    let mut content = report_with_format(report, format)?;

    if explain {
        match format {
            OutputFormat::Text | OutputFormat::Markdown => {
                content.push('\n');
                content.push_str(&report.evaluation.explain());
            }
            _ => warn!("--explain is ignored for {} output", format),
        }
    }

    emit(&content, output)
}
