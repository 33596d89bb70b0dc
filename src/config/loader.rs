//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::SentinelConfig;
use crate::config::validation::ValidationError;

/// Error type for configuration resolution.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("missing required option(s): {0} (pass them as flags or via --config)")]
    MissingRequired(&'static str),

    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load a configuration file from disk. Semantic validation happens later,
/// after CLI overrides have been applied.
pub fn load_file(path: &Path) -> Result<SentinelConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse(&content)
}

/// Parse a TOML document into a [`SentinelConfig`].
pub fn parse(content: &str) -> Result<SentinelConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}
