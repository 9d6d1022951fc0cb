//! Init command - write a default maturity.toml

use anyhow::{Context, Result};
use console::style;
use maturity_check::config::{CONFIG_FILE, DEFAULT_CONFIG_TEMPLATE};
use std::path::Path;

/// Run the init command
pub fn run(path: &Path, force: bool) -> Result<()> {
    let root = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;

    if !root.is_dir() {
        anyhow::bail!("Path is not a directory: {}", root.display());
    }

    println!("\n{} Initializing maturity-check\n", style("▸").bold());

    let config_path = root.join(CONFIG_FILE);
    if config_path.exists() && !force {
        println!(
            "{} Already initialized at {} (use --force to overwrite)",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
    } else {
        std::fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        println!(
            "{} Created {}",
            style("✓").green(),
            style(CONFIG_FILE).cyan()
        );
    }

    // Keep stored submissions out of version control
    let gitignore_path = root.join(".gitignore");
    let gitignore_entry = "\n# maturity-check\n.maturity/\n";

    if gitignore_path.exists() {
        let content = std::fs::read_to_string(&gitignore_path).unwrap_or_default();
        if !content.contains(".maturity/") {
            let mut file = std::fs::OpenOptions::new()
                .append(true)
                .open(&gitignore_path)
                .with_context(|| format!("Failed to open {}", gitignore_path.display()))?;
            use std::io::Write;
            file.write_all(gitignore_entry.as_bytes())?;
            println!(
                "{} Added .maturity/ to {}",
                style("✓").green(),
                style(".gitignore").cyan()
            );
        }
    }

    println!("\nNext steps:");
    println!("  {} See the questionnaire", style("maturity-check questions").cyan());
    println!(
        "  {} Score an answers file",
        style("maturity-check evaluate answers.json").cyan()
    );
    println!(
        "  {} Store it and get a report id",
        style("maturity-check submit answers.json").cyan()
    );

    Ok(())
}
