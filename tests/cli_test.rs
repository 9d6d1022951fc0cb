//! CLI contract tests
//!
//! Runs the real binary inside isolated temp directories and checks the
//! submit → store → report flow, validation failures, notification and
//! configuration handling.

use std::path::Path;
use std::process::Command;

fn maturity_bin() -> &'static str {
    env!("CARGO_BIN_EXE_maturity-check")
}

/// Run the binary in `dir` and return (exit_code, stdout, stderr)
fn run(dir: &Path, args: &[&str]) -> (i32, String, String) {
    run_with_env(dir, args, &[])
}

fn run_with_env(dir: &Path, args: &[&str], env: &[(&str, &str)]) -> (i32, String, String) {
    let mut cmd = Command::new(maturity_bin());
    cmd.arg("--dir").arg(dir);
    cmd.args(args);
    cmd.env_remove("RUST_LOG");
    cmd.env_remove("MATURITY_STORE_DIR");
    cmd.env_remove("MATURITY_OUTBOX_DIR");
    for (key, value) in env {
        cmd.env(key, value);
    }
    let output = cmd.output().expect("Failed to run maturity-check");
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

/// Category A clearly riskiest, D unanswered
const ANSWERS: &str = r#"{
    "A1": { "maturity": 0, "importance": 3 },
    "A2": { "maturity": 1, "importance": 3 },
    "B1": { "maturity": 2, "importance": 2 },
    "C1": { "maturity": 3, "importance": 1 }
}"#;

fn write_file(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

fn parse_json(s: &str) -> serde_json::Value {
    serde_json::from_str(s).unwrap_or_else(|e| panic!("Invalid JSON ({}): {}", e, s))
}

// ============================================================================
// evaluate
// ============================================================================

#[test]
fn test_evaluate_json_priority() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "answers.json", ANSWERS);

    let (code, stdout, stderr) = run(dir.path(), &["evaluate", &file, "--format", "json"]);
    assert_eq!(code, 0, "stderr: {}", stderr);

    let json = parse_json(&stdout);
    assert_eq!(json["recommendation"], "A");
    assert_eq!(json["overall_level"], "Critical");
    assert_eq!(json["evaluation"]["answered"], 4);
    assert_eq!(json["evaluation"]["categories"][0]["aggregate"]["risk_sum"], 15);
    assert!(json["evaluation"]["categories"][3]["status"].is_null());

    // nothing persisted
    assert!(!dir.path().join(".maturity").exists());
}

#[test]
fn test_evaluate_empty_answers_is_insufficient() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "empty.json", "{}");

    let (code, stdout, _) = run(dir.path(), &["evaluate", &file, "-f", "json"]);
    assert_eq!(code, 0);
    let json = parse_json(&stdout);
    assert!(json["recommendation"].is_null());
    assert_eq!(json["evaluation"]["insufficient_data"], true);
}

#[test]
fn test_evaluate_text_with_explain() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "answers.json", ANSWERS);

    let (code, stdout, _) = run(dir.path(), &["evaluate", &file, "--explain"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Utilization Management"));
    assert!(stdout.contains("# Scoring Breakdown"));
    assert!(stdout.contains("Priority: A Utilization Management"));
}

#[test]
fn test_evaluate_rejects_out_of_range() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(
        dir.path(),
        "bad.json",
        r#"{ "A1": { "maturity": 4, "importance": 2 } }"#,
    );

    let (code, _, stderr) = run(dir.path(), &["evaluate", &file]);
    assert_ne!(code, 0);
    assert!(stderr.contains("answers.A1.maturity"), "stderr: {}", stderr);
}

#[test]
fn test_evaluate_rejects_rating_outside_byte_range() {
    let dir = tempfile::tempdir().unwrap();
    for (body, field) in [
        (r#"{ "A1": { "maturity": -1, "importance": 2 } }"#, "answers.A1.maturity"),
        (r#"{ "B3": { "maturity": 1, "importance": 300 } }"#, "answers.B3.importance"),
    ] {
        let file = write_file(dir.path(), "bad.json", body);
        let (code, _, stderr) = run(dir.path(), &["evaluate", &file]);
        assert_ne!(code, 0);
        assert!(stderr.contains(field), "stderr: {}", stderr);
    }
}

// ============================================================================
// submit / report
// ============================================================================

#[test]
fn test_submit_then_report() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "answers.json", ANSWERS);

    let (code, stdout, stderr) = run(
        dir.path(),
        &["submit", &file, "--company", "Acme", "--size", "S2", "--no-notify"],
    );
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stdout.contains("#1"));
    assert!(stdout.contains("Priority: A Utilization Management"));
    assert!(dir.path().join(".maturity/submissions/1.json").exists());

    let (code, stdout, _) = run(dir.path(), &["report", "1", "--format", "json"]);
    assert_eq!(code, 0);
    let json = parse_json(&stdout);
    assert_eq!(json["id"], 1);
    assert_eq!(json["company_name"], "Acme");
    assert_eq!(json["size"], "S2");
    assert_eq!(json["feedback"]["category"], "A");
    assert!(json["feedback"]["size_note"]
        .as_str()
        .unwrap()
        .contains("11-30 people"));
}

#[test]
fn test_submission_ids_increase() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "answers.json", ANSWERS);

    for expected in ["#1", "#2", "#3"] {
        let (code, stdout, _) = run(dir.path(), &["submit", &file]);
        assert_eq!(code, 0);
        assert!(stdout.contains(expected), "stdout: {}", stdout);
    }

    let (code, stdout, _) = run(dir.path(), &["list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("3 submission(s)"));
    assert!(stdout.contains("A Utilization Management"));
}

#[test]
fn test_invalid_submission_not_stored() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(
        dir.path(),
        "bad.json",
        r#"{ "answers": { "B2": { "maturity": 1, "importance": 0 } } }"#,
    );

    let (code, _, stderr) = run(dir.path(), &["submit", &file]);
    assert_ne!(code, 0);
    assert!(stderr.contains("answers.B2.importance"), "stderr: {}", stderr);

    let stored = std::fs::read_dir(dir.path().join(".maturity/submissions"))
        .map(|entries| entries.count())
        .unwrap_or(0);
    assert_eq!(stored, 0);
}

#[test]
fn test_submit_accepts_free_form_size() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "answers.json", ANSWERS);

    let (code, _, stderr) = run(
        dir.path(),
        &["submit", &file, "--size", "about 50 people", "--no-notify"],
    );
    assert_eq!(code, 0, "stderr: {}", stderr);

    let (code, stdout, _) = run(dir.path(), &["report", "1", "--format", "json"]);
    assert_eq!(code, 0);
    let json = parse_json(&stdout);
    assert!(json.get("size").is_none());
    assert_eq!(json["feedback"]["category"], "A");
    assert!(json["feedback"].get("size_note").map_or(true, |n| n.is_null()));
}

#[test]
fn test_list_skips_corrupt_submission() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "answers.json", ANSWERS);
    let (code, _, _) = run(dir.path(), &["submit", &file]);
    assert_eq!(code, 0);
    std::fs::write(dir.path().join(".maturity/submissions/2.json"), "").unwrap();

    let (code, stdout, stderr) = run(dir.path(), &["list"]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stdout.contains("1 submission(s)"), "stdout: {}", stdout);
}

#[test]
fn test_invalid_email_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "answers.json", ANSWERS);

    let (code, _, stderr) = run(dir.path(), &["submit", &file, "--email", "not-an-email"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("field: email"), "stderr: {}", stderr);
}

#[test]
fn test_report_unknown_id() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run(dir.path(), &["report", "42"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Submission 42 not found"), "stderr: {}", stderr);
}

#[test]
fn test_report_html_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "answers.json", ANSWERS);
    run(dir.path(), &["submit", &file, "--no-notify"]);

    let out = dir.path().join("report.html");
    let (code, _, stderr) = run(
        dir.path(),
        &["report", "1", "-f", "html", "-o", out.to_str().unwrap()],
    );
    assert_eq!(code, 0, "stderr: {}", stderr);
    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<svg class=\"radar\""));
}

// ============================================================================
// notification
// ============================================================================

#[test]
fn test_submit_with_email_writes_outbox() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "answers.json", ANSWERS);

    let (code, stdout, stderr) = run(dir.path(), &["submit", &file, "--email", "pm@acme.io"]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stdout.contains("pm@acme.io"));

    let eml = std::fs::read_to_string(dir.path().join(".maturity/outbox/submission-1.eml")).unwrap();
    assert!(eml.contains("To: pm@acme.io"));
    assert!(eml.contains("Priority: A Utilization Management"));
}

#[test]
fn test_no_notify_flag() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "answers.json", ANSWERS);

    let (code, _, _) = run(
        dir.path(),
        &["submit", &file, "--email", "pm@acme.io", "--no-notify"],
    );
    assert_eq!(code, 0);
    assert!(!dir.path().join(".maturity/outbox").exists());
}

#[test]
fn test_notification_failure_keeps_submission() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "answers.json", ANSWERS);
    // a regular file where the outbox directory should go
    let blocked = write_file(dir.path(), "outbox", "");

    let (code, stdout, _) = run_with_env(
        dir.path(),
        &["submit", &file, "--email", "pm@acme.io"],
        &[("MATURITY_OUTBOX_DIR", blocked.as_str())],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("the submission is saved"));
    assert!(dir.path().join(".maturity/submissions/1.json").exists());
}

// ============================================================================
// configuration
// ============================================================================

#[test]
fn test_init_writes_config() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run(dir.path(), &["init"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Created"));
    let config = std::fs::read_to_string(dir.path().join("maturity.toml")).unwrap();
    assert!(config.contains("[store]"));

    // second run leaves it alone
    let (code, stdout, _) = run(dir.path(), &["init"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Already initialized"));
}

#[test]
fn test_config_store_dir_and_defaults() {
    let dir = tempfile::tempdir().unwrap();
    write_file(
        dir.path(),
        "maturity.toml",
        r#"
[store]
dir = "data"

[notify]
enabled = false

[defaults]
format = "markdown"
size = "S5"
"#,
    );
    let file = write_file(dir.path(), "answers.json", ANSWERS);

    let (code, _, _) = run(dir.path(), &["submit", &file, "--email", "pm@acme.io"]);
    assert_eq!(code, 0);
    assert!(dir.path().join("data/1.json").exists());
    assert!(!dir.path().join(".maturity/outbox").exists());

    let (code, stdout, _) = run(dir.path(), &["report", "1"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("## Category Scores"));
    assert!(stdout.contains("301+ people"));
}

#[test]
fn test_env_overrides_store_dir() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "answers.json", ANSWERS);
    let store = dir.path().join("elsewhere");

    let (code, _, _) = run_with_env(
        dir.path(),
        &["submit", &file, "--no-notify"],
        &[("MATURITY_STORE_DIR", store.to_str().unwrap())],
    );
    assert_eq!(code, 0);
    assert!(store.join("1.json").exists());
}

#[test]
fn test_explicit_config_must_load() {
    let dir = tempfile::tempdir().unwrap();
    let broken = write_file(dir.path(), "broken.toml", "[store\n");
    let (code, _, stderr) = run(dir.path(), &["--config", &broken, "list"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Failed to load config"), "stderr: {}", stderr);
}

#[test]
fn test_questions_lists_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run(dir.path(), &["questions"]);
    assert_eq!(code, 0);
    for id in ["A1", "B3", "C2", "D3", "S5"] {
        assert!(stdout.contains(id), "missing {}", id);
    }
}
