//! CLI command definitions and handlers

mod init;
mod list;
mod questions;
mod report;
mod submit;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use maturity_check::config::{load_config_file, load_project_config, ProjectConfig};
use maturity_check::models::{AnswerSet, SubmissionRequest};
use maturity_check::reporters::OutputFormat;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// maturity-check - project management maturity self-assessment
///
/// Everything stays local: submissions are JSON files, notifications are
/// written to an outbox directory.
#[derive(Parser, Debug)]
#[command(name = "maturity-check")]
#[command(
    version,
    about = "Project management maturity check: rate maturity and importance, get one priority to fix first",
    long_about = "maturity-check scores twelve questions across four categories \
(utilization, staffing, profitability, process). Each answer rates how mature a \
practice is (0-3) and how important it is (1-3). Unpracticed but important areas \
carry the most risk; the riskiest category becomes the priority.",
    after_help = "\
Examples:
  maturity-check init                              Write a default maturity.toml
  maturity-check questions                         Show the questionnaire
  maturity-check evaluate answers.json             Score answers without saving
  maturity-check submit answers.json --email a@b.co   Save, score and notify
  maturity-check report 3 --format html -o r.html  Printable report for submission 3
  maturity-check list                              Stored submissions"
)]
pub struct Cli {
    /// Working directory holding maturity.toml and the store (default: current directory)
    #[arg(long, short = 'C', global = true, default_value = ".")]
    pub dir: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Explicit config file (TOML, or JSON by extension)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a maturity.toml config file with example settings
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// List the questionnaire: categories, questions and size brackets
    Questions,

    /// Validate and store a submission, then print its priority
    #[command(after_help = "\
The input file holds either a full submission:
  { \"answers\": { \"A1\": { \"maturity\": 1, \"importance\": 3 } },
    \"email\": \"pm@example.com\",
    \"userInfo\": { \"companyName\": \"Acme\", \"companySize\": \"S3\" } }
or just the answers object. Use '-' to read from stdin.

Examples:
  maturity-check submit answers.json
  maturity-check submit answers.json --company Acme --size S2 --email pm@acme.io
  cat answers.json | maturity-check submit -")]
    Submit {
        /// Answers file (JSON), or '-' for stdin
        file: PathBuf,

        /// Email address to send the results to
        #[arg(long)]
        email: Option<String>,

        /// Company name
        #[arg(long)]
        company: Option<String>,

        /// Respondent role
        #[arg(long)]
        role: Option<String>,

        /// Respondent name
        #[arg(long)]
        name: Option<String>,

        /// Company size bracket (S1..S5)
        #[arg(long)]
        size: Option<String>,

        /// Do not write a notification even if an email is given
        #[arg(long)]
        no_notify: bool,
    },

    /// Re-evaluate a stored submission and render a report
    #[command(after_help = "\
Examples:
  maturity-check report 1
  maturity-check report 1 --format json
  maturity-check report 1 --format html -o report.html
  maturity-check report 1 --explain")]
    Report {
        /// Submission id
        id: u64,

        /// Output format: text, json, html, markdown (or md)
        #[arg(long, short = 'f', value_parser = ["text", "json", "html", "markdown", "md"])]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Size bracket to use when the submission has none (S1..S5)
        #[arg(long)]
        size: Option<String>,

        /// Append the scoring breakdown
        #[arg(long)]
        explain: bool,
    },

    /// Score an answers file without storing it
    Evaluate {
        /// Answers file (JSON), or '-' for stdin
        file: PathBuf,

        /// Output format: text, json, html, markdown (or md)
        #[arg(long, short = 'f', value_parser = ["text", "json", "html", "markdown", "md"])]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Company size bracket (S1..S5)
        #[arg(long)]
        size: Option<String>,

        /// Append the scoring breakdown
        #[arg(long)]
        explain: bool,
    },

    /// List stored submissions with their priority
    List,
}

/// Resolved working directory and configuration shared by all commands
pub(crate) struct Workspace {
    pub root: PathBuf,
    pub config: ProjectConfig,
}

impl Workspace {
    fn load(dir: &Path, config: Option<&Path>) -> Result<Self> {
        let root = dir
            .canonicalize()
            .with_context(|| format!("Path does not exist: {}", dir.display()))?;
        if !root.is_dir() {
            anyhow::bail!("Path is not a directory: {}", root.display());
        }

        let config = match config {
            Some(path) => {
                let mut config = load_config_file(path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?;
                config.apply_overrides(|key| std::env::var(key).ok());
                config
            }
            None => load_project_config(&root),
        };
        debug!("Store: {}", config.store_dir(&root).display());

        Ok(Self { root, config })
    }

    /// Format from the flag, else the config default, else text
    pub fn format(&self, flag: Option<&str>) -> Result<OutputFormat> {
        let name = flag
            .or(self.config.defaults.format.as_deref())
            .unwrap_or("text");
        OutputFormat::from_str(name)
    }

    /// Size bracket from the flag, else the config default
    pub fn default_size<'a>(&'a self, flag: Option<&'a str>) -> Option<&'a str> {
        flag.or(self.config.defaults.size.as_deref())
    }
}

/// Run the CLI
pub fn run(cli: Cli) -> Result<()> {
    // init and questions work without a config; a broken one must not block them
    let workspace = || Workspace::load(&cli.dir, cli.config.as_deref());

    match cli.command {
        Commands::Init { force } => init::run(&cli.dir, force),

        Commands::Questions => questions::run(),

        Commands::Submit {
            file,
            email,
            company,
            role,
            name,
            size,
            no_notify,
        } => {
            let ws = workspace()?;
            let mut request = read_request(&file)?;
            let info = request.user_info.get_or_insert_with(Default::default);
            if company.is_some() {
                info.company_name = company;
            }
            if role.is_some() {
                info.role = role;
            }
            if name.is_some() {
                info.name = name;
            }
            if size.is_some() {
                info.company_size = size;
            }
            if email.is_some() {
                request.email = email;
            }
            submit::run(&ws, request, !no_notify)
        }

        Commands::Report {
            id,
            format,
            output,
            size,
            explain,
        } => report::run_stored(
            &workspace()?,
            id,
            format.as_deref(),
            output.as_deref(),
            size.as_deref(),
            explain,
        ),

        Commands::Evaluate {
            file,
            format,
            output,
            size,
            explain,
        } => {
            let ws = workspace()?;
            let request = read_request(&file)?;
            report::run_unsaved(
                &ws,
                &request,
                format.as_deref(),
                output.as_deref(),
                size.as_deref(),
                explain,
            )
        }

        Commands::List => list::run(&workspace()?),
    }
}

/// Read a submission from a file or stdin.
///
/// Accepts a full request object or a bare answers map.
fn read_request(path: &Path) -> Result<SubmissionRequest> {
    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read answers from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };
    parse_request(&content).with_context(|| format!("Invalid answers file {}", path.display()))
}

fn parse_request(content: &str) -> Result<SubmissionRequest> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    if value.get("answers").is_some() {
        Ok(serde_json::from_value(value)?)
    } else {
        let answers: AnswerSet = serde_json::from_value(value)?;
        Ok(SubmissionRequest {
            answers,
            ..Default::default()
        })
    }
}

/// Write rendered output to a file or stdout
fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{} Report written to {}",
                console::style("✓").green(),
                console::style(path.display()).cyan()
            );
        }
        None => println!("{}", content),
    }
    Ok(())
}
