//! Result notification
//!
//! After a submission is stored, a summary email is composed for the
//! submitter. Delivery goes through a [`Notifier`]; the built-in
//! [`OutboxNotifier`] writes RFC 5322 `.eml` files to a directory instead
//! of talking to a mail server.
//!
//! Notification is strictly best-effort: [`dispatch`] logs failures and
//! never propagates them, so a stored submission is never rolled back.

use crate::feedback;
use crate::models::{AssessmentReport, Submission};
use crate::reporters::fmt_avg;
use chrono::Utc;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors from a notifier
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

/// An outgoing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub body: String,
    /// Category guide, only set when the file exists
    pub attachment: Option<PathBuf>,
}

/// Delivery backend
pub trait Notifier: Send + Sync {
    /// Name of this notifier (for logging)
    fn name(&self) -> &str;

    /// Deliver one message
    fn send(&self, submission_id: u64, notification: &Notification) -> Result<(), NotifyError>;
}

/// Compose the result email for a stored submission.
///
/// Returns `None` when the submitter left no email address.
pub fn compose(
    submission: &Submission,
    report: &AssessmentReport,
    from: &str,
    attachments_dir: Option<&Path>,
) -> Option<Notification> {
    let to = submission.email.as_deref()?.trim();
    if to.is_empty() {
        return None;
    }

    let attachment = match (report.evaluation.recommendation(), attachments_dir) {
        (Some(key), Some(dir)) => {
            let path = dir.join(feedback::attachment_name(key));
            if path.is_file() {
                Some(path)
            } else {
                warn!("Guide {} not found, sending without attachment", path.display());
                None
            }
        }
        _ => None,
    };

    Some(Notification {
        to: to.to_string(),
        from: from.to_string(),
        subject: header_value(&format!(
            "Your project management maturity results ({})",
            report.display_name()
        )),
        body: render_body(report),
        attachment,
    })
}

/// Header-safe copy of a value: line breaks and other control characters
/// become spaces so user input cannot start a new header.
fn header_value(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

fn render_body(report: &AssessmentReport) -> String {
    let eval = &report.evaluation;
    let mut body = String::new();

    body.push_str("Thank you for completing the project management maturity check.\n\n");
    body.push_str(&format!("Company: {}\n", report.display_name()));
    if let Some(size) = report.size {
        body.push_str(&format!("Size: {}\n", size.label()));
    }
    body.push_str(&format!(
        "Answered: {} of {} questions\n\n",
        eval.answered, eval.total_questions
    ));

    match &report.feedback {
        Some(fb) => {
            body.push_str(&format!(
                "Priority: {} {}\n{}\n\n{}\n",
                fb.category,
                fb.category.name(),
                fb.headline,
                fb.text
            ));
            for action in &fb.actions {
                body.push_str(&format!("  - {}\n", action));
            }
            if let Some(note) = &fb.size_note {
                body.push_str(&format!("\n{}\n", note));
            }
        }
        None => body.push_str("No questions were answered, so no priority could be selected.\n"),
    }

    body.push_str("\nCategory summary (avg maturity / avg importance / status):\n");
    for c in &eval.categories {
        let status = c.status.map_or("no data", |s| s.label());
        body.push_str(&format!(
            "  {} {:<26} {:>4} / {:>4}  {}\n",
            c.category,
            c.name,
            fmt_avg(c.avg_maturity),
            fmt_avg(c.avg_importance),
            status
        ));
    }

    body
}

/// Writes each message as `<outbox>/submission-<id>.eml`
pub struct OutboxNotifier {
    dir: PathBuf,
}

impl OutboxNotifier {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the message file for a submission
    pub fn message_path(&self, submission_id: u64) -> PathBuf {
        self.dir.join(format!("submission-{}.eml", submission_id))
    }
}

fn io_error(context: String) -> impl FnOnce(std::io::Error) -> NotifyError {
    move |source| NotifyError::Io { context, source }
}

impl Notifier for OutboxNotifier {
    fn name(&self) -> &str {
        "outbox"
    }

    fn send(&self, submission_id: u64, n: &Notification) -> Result<(), NotifyError> {
        std::fs::create_dir_all(&self.dir)
            .map_err(io_error(format!("Failed to create outbox {}", self.dir.display())))?;

        let mut eml = String::new();
        eml.push_str(&format!("From: {}\r\n", header_value(&n.from)));
        eml.push_str(&format!("To: {}\r\n", header_value(&n.to)));
        eml.push_str(&format!("Subject: {}\r\n", header_value(&n.subject)));
        eml.push_str(&format!("Date: {}\r\n", Utc::now().to_rfc2822()));
        eml.push_str("MIME-Version: 1.0\r\n");
        eml.push_str("Content-Type: text/plain; charset=utf-8\r\n");

        // The guide is copied next to the message and referenced by header
        if let Some(src) = &n.attachment {
            let file_name = src
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_else(|| "guide.pdf".to_string());
            let copied = format!("submission-{}-{}", submission_id, file_name);
            std::fs::copy(src, self.dir.join(&copied))
                .map_err(io_error(format!("Failed to copy attachment {}", src.display())))?;
            eml.push_str(&format!("X-Attachment: {}\r\n", header_value(&copied)));
        }

        eml.push_str("\r\n");
        eml.push_str(&n.body.replace('\n', "\r\n"));

        let path = self.message_path(submission_id);
        std::fs::write(&path, eml)
            .map_err(io_error(format!("Failed to write {}", path.display())))?;
        debug!("Wrote {}", path.display());
        Ok(())
    }
}

/// Send a notification, logging instead of failing.
///
/// Returns whether delivery succeeded.
pub fn dispatch(notifier: &dyn Notifier, submission_id: u64, notification: &Notification) -> bool {
    match notifier.send(submission_id, notification) {
        Ok(()) => {
            info!(
                "Sent results for submission {} to {} via {}",
                submission_id,
                notification.to,
                notifier.name()
            );
            true
        }
        Err(e) => {
            warn!(
                "Failed to notify {} for submission {}: {}",
                notification.to, submission_id, e
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Answer, AnswerSet, UserInfo};
    use crate::scoring::evaluate_builtin;

    fn submission(email: Option<&str>) -> Submission {
        let mut answers = AnswerSet::new();
        answers.insert("B1".into(), Answer::new(0, 3));
        answers.insert("A1".into(), Answer::new(2, 1));
        Submission {
            id: 5,
            answers,
            email: email.map(str::to_string),
            user_info: Some(UserInfo {
                company_name: Some("Acme".into()),
                company_size: Some("S2".into()),
                ..Default::default()
            }),
            created_at: Utc::now(),
        }
    }

    fn report_for(sub: &Submission) -> AssessmentReport {
        let eval = evaluate_builtin(&sub.answers).unwrap();
        AssessmentReport::for_submission(sub, eval, None)
    }

    #[test]
    fn test_no_email_no_notification() {
        let sub = submission(None);
        assert!(compose(&sub, &report_for(&sub), "from@x.io", None).is_none());
        let blank = submission(Some("  "));
        assert!(compose(&blank, &report_for(&blank), "from@x.io", None).is_none());
    }

    #[test]
    fn test_compose_body() {
        let sub = submission(Some("pm@acme.io"));
        let n = compose(&sub, &report_for(&sub), "from@x.io", None).unwrap();
        assert_eq!(n.to, "pm@acme.io");
        assert!(n.subject.contains("Acme"));
        assert!(n.body.contains("Priority: B Skills & Staffing"));
        assert!(n.body.contains("11-30 people"));
        assert!(n.body.contains("D Process Maturity"));
        assert!(n.body.contains("no data"));
        assert!(n.attachment.is_none());
    }

    #[test]
    fn test_attachment_resolved_by_priority() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("guide-skills-and-staffing.pdf"), b"%PDF").unwrap();
        let sub = submission(Some("pm@acme.io"));
        let n = compose(&sub, &report_for(&sub), "from@x.io", Some(dir.path())).unwrap();
        assert_eq!(
            n.attachment,
            Some(dir.path().join("guide-skills-and-staffing.pdf"))
        );
    }

    #[test]
    fn test_missing_attachment_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let sub = submission(Some("pm@acme.io"));
        let n = compose(&sub, &report_for(&sub), "from@x.io", Some(dir.path())).unwrap();
        assert!(n.attachment.is_none());
    }

    #[test]
    fn test_outbox_writes_eml() {
        let dir = tempfile::tempdir().unwrap();
        let guides = tempfile::tempdir().unwrap();
        std::fs::write(guides.path().join("guide-skills-and-staffing.pdf"), b"%PDF").unwrap();

        let sub = submission(Some("pm@acme.io"));
        let n = compose(&sub, &report_for(&sub), "from@x.io", Some(guides.path())).unwrap();
        let outbox = OutboxNotifier::new(dir.path().join("outbox"));
        assert!(dispatch(&outbox, sub.id, &n));

        let eml = std::fs::read_to_string(outbox.message_path(5)).unwrap();
        assert!(eml.starts_with("From: from@x.io\r\n"));
        assert!(eml.contains("To: pm@acme.io\r\n"));
        assert!(eml.contains("X-Attachment: submission-5-guide-skills-and-staffing.pdf"));
        assert!(outbox
            .dir()
            .join("submission-5-guide-skills-and-staffing.pdf")
            .exists());
    }

    #[test]
    fn test_company_name_cannot_add_headers() {
        let mut sub = submission(Some("pm@acme.io"));
        sub.user_info = Some(UserInfo {
            company_name: Some("Acme\r\nBcc: attacker@evil.io".into()),
            ..Default::default()
        });
        let n = compose(&sub, &report_for(&sub), "from@x.io", None).unwrap();
        assert!(!n.subject.contains('\r') && !n.subject.contains('\n'));

        let dir = tempfile::tempdir().unwrap();
        let outbox = OutboxNotifier::new(dir.path());
        assert!(dispatch(&outbox, sub.id, &n));

        let eml = std::fs::read_to_string(outbox.message_path(5)).unwrap();
        let (headers, _) = eml.split_once("\r\n\r\n").unwrap();
        let headers: Vec<&str> = headers.split("\r\n").collect();
        assert!(headers.iter().all(|h| !h.starts_with("Bcc:")), "{:?}", headers);
        assert!(headers
            .iter()
            .any(|h| h.starts_with("Subject: ") && h.contains("Bcc: attacker@evil.io")));
    }

    #[test]
    fn test_dispatch_failure_is_reported_not_raised() {
        let dir = tempfile::tempdir().unwrap();
        // a file where the outbox directory should be
        let blocked = dir.path().join("outbox");
        std::fs::write(&blocked, "").unwrap();

        let sub = submission(Some("pm@acme.io"));
        let n = compose(&sub, &report_for(&sub), "from@x.io", None).unwrap();
        assert!(!dispatch(&OutboxNotifier::new(&blocked), sub.id, &n));
    }
}
