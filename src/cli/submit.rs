//! Submit command - validate, store, evaluate and notify

use super::Workspace;
use anyhow::{Context, Result};
use console::style;
use maturity_check::catalog::QUESTIONS;
use maturity_check::models::{AssessmentReport, SubmissionRequest};
use maturity_check::notify::{compose, dispatch, OutboxNotifier};
use maturity_check::scoring::evaluate;
use maturity_check::store::{submit, FileStore, SubmitError};
use tracing::{debug, info};

/// Run the submit command
pub fn run(ws: &Workspace, request: SubmissionRequest, notify: bool) -> Result<()> {
    let store_dir = ws.config.store_dir(&ws.root);
    let store = FileStore::open(&store_dir)
        .with_context(|| format!("Failed to open store {}", store_dir.display()))?;

    let submission = match submit(&store, request, QUESTIONS) {
        Ok(submission) => submission,
        Err(SubmitError::Invalid(e)) => {
            anyhow::bail!("Invalid submission: {} (field: {})", e, e.field())
        }
        Err(SubmitError::Store(e)) => return Err(e).context("Failed to store submission"),
    };
    info!("Stored submission {}", submission.id);

    // Already validated, so evaluation cannot reject it
    let evaluation = evaluate(QUESTIONS, &submission.answers)?;
    let report = AssessmentReport::for_submission(
        &submission,
        evaluation,
        ws.config.defaults.size.as_deref(),
    );

    println!(
        "{} Stored submission {}",
        style("✓").green(),
        style(format!("#{}", submission.id)).cyan()
    );
    match report.evaluation.recommendation() {
        Some(key) => println!(
            "  Priority: {} {}",
            style(key).bold(),
            style(key.name()).bold()
        ),
        None => println!("  Priority: {}", style("insufficient data").dim()),
    }
    if let Some(fb) = &report.feedback {
        println!("  {}", fb.headline);
    }

    if notify && ws.config.notify.enabled {
        let attachments = ws.config.attachments_dir(&ws.root);
        match compose(
            &submission,
            &report,
            &ws.config.notify.from,
            attachments.as_deref(),
        ) {
            Some(notification) => {
                let notifier = OutboxNotifier::new(ws.config.outbox_dir(&ws.root));
                if dispatch(&notifier, submission.id, &notification) {
                    println!(
                        "{} Results for {} written to {}",
                        style("✓").green(),
                        notification.to,
                        style(notifier.message_path(submission.id).display()).dim()
                    );
                } else {
                    println!(
                        "{} Could not write the notification; the submission is saved",
                        style("!").yellow()
                    );
                }
            }
            None => debug!("No email on submission {}, skipping notification", submission.id),
        }
    }

    println!(
        "\nView the full report with {}",
        style(format!("maturity-check report {}", submission.id)).cyan()
    );

    Ok(())
}
