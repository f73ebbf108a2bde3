use thiserror::Error;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("dotenv error: {0}")]
    Dotenv(#[from] dotenvy::Error),

    #[error("Invalid network: {0}. Must be: testnet or localhost")]
    InvalidNetwork(String),

    #[error("Invalid load mode: {0}. Must be: strict or compile-only")]
    InvalidMode(String),

    #[error("Configuration validation failed with {} problem(s):\n{}", .0.len(), render_issues(.0))]
    Invalid(Vec<ConfigIssue>),
}

impl ConfigError {
    /// Individual problems, if this is a validation failure
    pub fn issues(&self) -> &[ConfigIssue] {
        match self {
            ConfigError::Invalid(issues) => issues,
            _ => &[],
        }
    }
}

/// A single problem found while validating the configuration.
///
/// Secret-bearing variables are only ever named, never quoted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    #[error("{var} is not set (required for {field})")]
    MissingVar {
        var: &'static str,
        field: &'static str,
    },

    /// Only the scheme and host of the rejected endpoint are kept
    #[error("{field} must start with http:// or https://: {origin}")]
    InvalidUrl { field: String, origin: String },

    #[error("{var} is not a hex-encoded private key")]
    InvalidPrivateKey { var: &'static str },

    #[error("{var} has an invalid value: {value}")]
    InvalidValue { var: &'static str, value: String },

    #[error("compiler list is empty")]
    NoCompilers,

    #[error("invalid compiler version: {0}. Expected MAJOR.MINOR.PATCH")]
    InvalidCompilerVersion(String),

    #[error("compiler version listed twice: {0}")]
    DuplicateCompilerVersion(String),

    #[error("default network {0} is not declared")]
    UnknownDefaultNetwork(String),

    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("docgen page extension must start with '.': {0}")]
    InvalidPageExtension(String),
}

fn render_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("  - {}", issue))
        .collect::<Vec<_>>()
        .join("\n")
}
