//! Non-secret overlay file (`chainbuild.toml`).
//!
//! Every key is optional and replaces the built-in default for that field.
//! Unknown keys are rejected, which keeps credentials such as `accounts` or
//! `api_key` out of files that tend to get committed.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::config::{PageMode, SizeUnit};
use crate::error::ConfigError;

/// Default overlay file name, looked up in the working directory
pub const OVERRIDES_FILE: &str = "chainbuild.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    pub compilers: Option<Vec<String>>,
    pub default_network: Option<String>,
    #[serde(default)]
    pub networks: NetworksOverride,
    #[serde(default)]
    pub sourcify: SourcifyOverride,
    #[serde(default)]
    pub contract_sizer: ContractSizerOverride,
    #[serde(default)]
    pub gas_reporter: GasReporterOverride,
    #[serde(default)]
    pub docgen: DocgenOverride,
}

/// Only the local node's endpoint can be set from a file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworksOverride {
    pub localhost: Option<LocalhostOverride>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocalhostOverride {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourcifyOverride {
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContractSizerOverride {
    pub run_on_compile: Option<bool>,
    pub output_file: Option<PathBuf>,
    pub unit: Option<SizeUnit>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GasReporterOverride {
    pub enabled: Option<bool>,
    pub currency: Option<String>,
    pub token: Option<String>,
    pub output_file: Option<PathBuf>,
    pub no_colors: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocgenOverride {
    pub output_dir: Option<PathBuf>,
    pub pages: Option<PageMode>,
    pub exclude: Option<Vec<String>>,
    pub theme: Option<String>,
    pub collapse_newlines: Option<bool>,
    pub page_extension: Option<String>,
    pub sources_dir: Option<PathBuf>,
}

impl ConfigOverrides {
    /// Parse overrides from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::TomlError)
    }

    /// Read overrides from `path`
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Read `path` if it exists, otherwise return empty overrides
    pub fn from_file_if_exists(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            tracing::debug!(path = %path.display(), "reading configuration overrides");
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }
}
