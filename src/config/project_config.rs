//! Project-level configuration support
//!
//! Loads configuration from `maturity.toml` or `.maturityrc.json` in the
//! working directory.
//!
//! # Configuration Format
//!
//! ```toml
//! # maturity.toml
//!
//! [store]
//! dir = ".maturity/submissions"
//!
//! [notify]
//! enabled = true
//! outbox_dir = ".maturity/outbox"
//! attachments_dir = "guides"
//! from = "assessment@example.com"
//!
//! [defaults]
//! format = "text"
//! size = "S3"
//! ```
//!
//! `MATURITY_STORE_DIR` and `MATURITY_OUTBOX_DIR` override the file.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Primary config file name
pub const CONFIG_FILE: &str = "maturity.toml";
/// JSON fallback config file name
pub const JSON_CONFIG_FILE: &str = ".maturityrc.json";

/// Environment variable overriding `[store] dir`
pub const ENV_STORE_DIR: &str = "MATURITY_STORE_DIR";
/// Environment variable overriding `[notify] outbox_dir`
pub const ENV_OUTBOX_DIR: &str = "MATURITY_OUTBOX_DIR";

/// Example written by `maturity-check init`
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# maturity-check configuration

[store]
# Where submissions are kept, one JSON file each
dir = ".maturity/submissions"

[notify]
# Write a follow-up message for submissions that include an email address
enabled = true
outbox_dir = ".maturity/outbox"
# Directory holding the per-category guide PDFs (optional)
# attachments_dir = "guides"
from = "assessment@localhost"

[defaults]
# Default report format (text, json, markdown, html)
format = "text"
# Default organization size bracket (S1..S5) when a submission has none
# size = "S3"
"#;

/// Configuration loaded from maturity.toml or similar
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub notify: NotifyConfig,

    /// Default CLI flags
    #[serde(default)]
    pub defaults: CliDefaults,
}

/// Submission store settings
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_dir")]
    pub dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: default_store_dir(),
        }
    }
}

fn default_store_dir() -> PathBuf {
    PathBuf::from(".maturity/submissions")
}

/// Follow-up notification settings
#[derive(Debug, Clone, Deserialize)]
pub struct NotifyConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_outbox_dir")]
    pub outbox_dir: PathBuf,

    /// Directory with the per-category guide attachments
    #[serde(default)]
    pub attachments_dir: Option<PathBuf>,

    #[serde(default = "default_from")]
    pub from: String,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            outbox_dir: default_outbox_dir(),
            attachments_dir: None,
            from: default_from(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_outbox_dir() -> PathBuf {
    PathBuf::from(".maturity/outbox")
}

fn default_from() -> String {
    "assessment@localhost".to_string()
}

/// Default CLI flags that can be set in config
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CliDefaults {
    /// Default report format (text, json, markdown, html)
    #[serde(default)]
    pub format: Option<String>,

    /// Size bracket used when a submission does not declare one
    #[serde(default)]
    pub size: Option<String>,
}

/// Load configuration from a directory.
///
/// Searches for `maturity.toml`, then `.maturityrc.json`. A file that fails to
/// parse is reported and skipped. Environment overrides are applied last.
pub fn load_project_config(root: &Path) -> ProjectConfig {
    let mut config = find_config(root).unwrap_or_else(|| {
        debug!("No config found in {}, using defaults", root.display());
        ProjectConfig::default()
    });
    config.apply_overrides(|key| std::env::var(key).ok());
    config
}

fn find_config(root: &Path) -> Option<ProjectConfig> {
    for name in [CONFIG_FILE, JSON_CONFIG_FILE] {
        let path = root.join(name);
        if !path.exists() {
            continue;
        }
        match load_config_file(&path) {
            Ok(config) => {
                debug!("Loaded config from {}", path.display());
                return Some(config);
            }
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
            }
        }
    }
    None
}

/// Load configuration from an explicit file, TOML or JSON by extension
pub fn load_config_file(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config = if path.extension().and_then(|e| e.to_str()) == Some("json") {
        serde_json::from_str(&content)?
    } else {
        toml::from_str(&content)?
    };
    Ok(config)
}

impl ProjectConfig {
    /// Apply environment-style overrides from `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_STORE_DIR).filter(|v| !v.is_empty()) {
            self.store.dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(ENV_OUTBOX_DIR).filter(|v| !v.is_empty()) {
            self.notify.outbox_dir = PathBuf::from(dir);
        }
    }

    /// Store directory, relative paths resolved against `root`
    pub fn store_dir(&self, root: &Path) -> PathBuf {
        resolve(root, &self.store.dir)
    }

    /// Outbox directory, relative paths resolved against `root`
    pub fn outbox_dir(&self, root: &Path) -> PathBuf {
        resolve(root, &self.notify.outbox_dir)
    }

    /// Attachments directory, relative paths resolved against `root`
    pub fn attachments_dir(&self, root: &Path) -> Option<PathBuf> {
        self.notify
            .attachments_dir
            .as_deref()
            .map(|dir| resolve(root, dir))
    }
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProjectConfig::default();
        assert_eq!(config.store.dir, PathBuf::from(".maturity/submissions"));
        assert!(config.notify.enabled);
        assert!(config.notify.attachments_dir.is_none());
        assert!(config.defaults.format.is_none());
    }

    #[test]
    fn test_template_parses() {
        let config: ProjectConfig = toml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.defaults.format.as_deref(), Some("text"));
        assert_eq!(config.notify.outbox_dir, PathBuf::from(".maturity/outbox"));
    }

    #[test]
    fn test_parse_toml_config() {
        let toml_content = r#"
[store]
dir = "/var/lib/maturity"

[notify]
enabled = false
attachments_dir = "guides"

[defaults]
size = "S2"
"#;
        let config: ProjectConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.store_dir(Path::new("/ignored")), PathBuf::from("/var/lib/maturity"));
        assert!(!config.notify.enabled);
        assert_eq!(
            config.attachments_dir(Path::new("/work")),
            Some(PathBuf::from("/work/guides"))
        );
        assert_eq!(config.defaults.size.as_deref(), Some("S2"));
        // unspecified fields keep defaults
        assert_eq!(config.notify.from, "assessment@localhost");
    }

    #[test]
    fn test_invalid_toml_does_not_crash() {
        let bad_toml = "this is [[ not valid toml {{{}}}";
        assert!(toml::from_str::<ProjectConfig>(bad_toml).is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = ProjectConfig::default();
        config.apply_overrides(|key| match key {
            ENV_STORE_DIR => Some("/tmp/store".to_string()),
            ENV_OUTBOX_DIR => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.store.dir, PathBuf::from("/tmp/store"));
        // empty values are ignored
        assert_eq!(config.notify.outbox_dir, PathBuf::from(".maturity/outbox"));
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(JSON_CONFIG_FILE),
            r#"{ "defaults": { "format": "markdown" } }"#,
        )
        .unwrap();
        let config = find_config(dir.path()).unwrap();
        assert_eq!(config.defaults.format.as_deref(), Some("markdown"));
    }

    #[test]
    fn test_broken_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[store\n").unwrap();
        assert!(find_config(dir.path()).is_none());
    }
}
