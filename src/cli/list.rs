//! List command - stored submissions with their current priority

use super::Workspace;
use anyhow::{Context, Result};
use console::style;
use maturity_check::catalog::QUESTIONS;
use maturity_check::scoring::evaluate;
use maturity_check::store::{FileStore, SubmissionStore};
use tracing::warn;

pub fn run(ws: &Workspace) -> Result<()> {
    let store_dir = ws.config.store_dir(&ws.root);
    let store = FileStore::open(&store_dir)
        .with_context(|| format!("Failed to open store {}", store_dir.display()))?;
    let submissions = store.list()?;

    if submissions.is_empty() {
        println!(
            "No submissions yet. Run {}",
            style("maturity-check submit <answers.json>").cyan()
        );
        return Ok(());
    }

    println!(
        "{}",
        style(format!(
            "  {:>4}  {:<19}  {:<24}  {:>8}  PRIORITY",
            "ID", "CREATED", "COMPANY", "ANSWERED"
        ))
        .dim()
    );
    for sub in &submissions {
        let priority = match evaluate(QUESTIONS, &sub.answers) {
            Ok(eval) => match eval.recommendation() {
                Some(key) => format!("{} {}", key, key.name()),
                None => "insufficient data".to_string(),
            },
            Err(e) => {
                warn!("Submission {} cannot be evaluated: {}", sub.id, e);
                "invalid".to_string()
            }
        };
        let company: String = sub.company_name().unwrap_or("-").chars().take(24).collect();
        println!(
            "  {:>4}  {:<19}  {:<24}  {:>8}  {}",
            sub.id,
            sub.created_at.format("%Y-%m-%d %H:%M:%S"),
            company,
            format!("{}/{}", sub.answers.len(), QUESTIONS.len()),
            priority
        );
    }
    println!("\n{} submission(s)", submissions.len());

    Ok(())
}
