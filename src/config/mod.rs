//! Configuration module for maturity-check
//!
//! This module handles:
//! - Project-level configuration (maturity.toml)
//! - Store and outbox locations
//! - CLI defaults

mod project_config;

pub use project_config::{
    load_config_file, load_project_config, CliDefaults, NotifyConfig, ProjectConfig,
    StoreConfig, CONFIG_FILE, DEFAULT_CONFIG_TEMPLATE, ENV_OUTBOX_DIR, ENV_STORE_DIR,
    JSON_CONFIG_FILE,
};
