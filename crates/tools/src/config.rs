//! Build configuration for compiling, deploying and reporting on contracts
//!
//! This module resolves the configuration consumed by the compiler driver,
//! the explorer verifier, the gas and size reporters and the documentation
//! generator. Values are resolved in priority order:
//!
//! 1. Environment variables (`RPC_URL`, `PRIVATE_KEY`, `ETHERSCAN_API_KEY`,
//!    `COINMARKETCAP_API_KEY`, `CHAINBUILD_MODE`)
//! 2. `chainbuild.toml` overrides for non-secret fields
//! 3. Built-in defaults
//!
//! Every problem is collected before returning, so a single
//! [`ConfigError::Invalid`] lists everything that needs fixing.
//!
//! # Examples
//!
//! ```rust,no_run
//! use chainbuild_tools::config::BuildConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BuildConfig::load()?;
//! println!("Default network: {}", config.default_network());
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::env::{EnvSource, ProcessEnv};
use crate::error::{ConfigError, ConfigIssue};
use crate::network::{
    endpoint_origin, Network, NetworkConfig, BUILTIN_NETWORK, PLACEHOLDER_RPC_URL,
};
use crate::overrides::{ConfigOverrides, OVERRIDES_FILE};
use crate::secret::Secret;

pub const RPC_URL_VAR: &str = "RPC_URL";
pub const PRIVATE_KEY_VAR: &str = "PRIVATE_KEY";
pub const ETHERSCAN_API_KEY_VAR: &str = "ETHERSCAN_API_KEY";
pub const COINMARKETCAP_API_KEY_VAR: &str = "COINMARKETCAP_API_KEY";
pub const MODE_VAR: &str = "CHAINBUILD_MODE";

const DEFAULT_COMPILER: &str = "0.8.28";

/// How strictly missing inputs are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Every input the testnet needs must be present
    #[default]
    Strict,
    /// Compile and test locally: missing testnet inputs fall back to a
    /// placeholder endpoint and an empty credential list
    CompileOnly,
}

impl LoadMode {
    /// Get mode as string
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadMode::Strict => "strict",
            LoadMode::CompileOnly => "compile-only",
        }
    }
}

impl FromStr for LoadMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(LoadMode::Strict),
            "compile-only" | "compile_only" => Ok(LoadMode::CompileOnly),
            other => Err(ConfigError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for LoadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit the size reporter prints contract sizes in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeUnit {
    #[serde(rename = "B")]
    Byte,
    #[serde(rename = "kB")]
    KiloByte,
}

impl SizeUnit {
    /// Unit label as the size reporter prints it
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeUnit::Byte => "B",
            SizeUnit::KiloByte => "kB",
        }
    }

    /// Bytes per displayed unit
    pub fn divisor(&self) -> u64 {
        match self {
            SizeUnit::Byte => 1,
            SizeUnit::KiloByte => 1_000,
        }
    }
}

/// Documentation layout: one page for everything, or one per source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageMode {
    Single,
    Multiple,
}

/// Contract size analyzer options
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizeReporting {
    pub run_on_compile: bool,
    pub output_file: PathBuf,
    pub unit: SizeUnit,
}

impl Default for SizeReporting {
    fn default() -> Self {
        Self {
            run_on_compile: true,
            output_file: PathBuf::from("contract-sizes.txt"),
            unit: SizeUnit::KiloByte,
        }
    }
}

/// Gas cost reporter options
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostReporting {
    pub enabled: bool,
    /// Fiat currency costs are converted to
    pub currency: String,
    /// Native token whose price the conversion uses
    pub token: String,
    /// Price feed key. Without it costs are reported in gas only.
    pub price_api_key: Option<Secret>,
    /// Report file; the console when unset
    pub output_file: Option<PathBuf>,
    pub no_colors: bool,
}

impl CostReporting {
    /// Whether the reporter can fetch live conversion rates
    pub fn live_prices(&self) -> bool {
        self.enabled && self.price_api_key.is_some()
    }
}

impl Default for CostReporting {
    fn default() -> Self {
        Self {
            enabled: true,
            currency: "USD".to_string(),
            token: "MATIC".to_string(),
            price_api_key: None,
            output_file: None,
            no_colors: false,
        }
    }
}

/// Documentation generator options
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocGeneration {
    pub output_dir: PathBuf,
    pub pages: PageMode,
    /// Source paths left out of the generated docs
    pub exclude: BTreeSet<String>,
    pub theme: String,
    pub collapse_newlines: bool,
    pub page_extension: String,
    pub sources_dir: PathBuf,
}

impl Default for DocGeneration {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./docs"),
            pages: PageMode::Single,
            exclude: BTreeSet::new(),
            theme: "markdown".to_string(),
            collapse_newlines: true,
            page_extension: ".md".to_string(),
            sources_dir: PathBuf::from("contracts"),
        }
    }
}

/// Resolved build configuration.
///
/// Built once by [`ConfigLoader::load`] and read-only afterwards.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    compilers: Vec<String>,
    default_network: String,
    networks: BTreeMap<String, NetworkConfig>,
    explorer_api_keys: BTreeMap<String, Secret>,
    source_verification: bool,
    size_reporting: SizeReporting,
    cost_reporting: CostReporting,
    doc_generation: DocGeneration,
    mode: LoadMode,
}

impl BuildConfig {
    /// Load configuration from the process environment, `.env` and
    /// `chainbuild.toml`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `chainbuild.toml` exists but cannot be read or parsed
    /// - Any required variable is missing or any value is invalid
    pub fn load() -> Result<Self, ConfigError> {
        ConfigLoader::from_process()
            .with_overrides_file_if_exists(OVERRIDES_FILE)?
            .load()
    }

    /// Compiler versions, in the order the compiler driver tries them
    pub fn compilers(&self) -> &[String] {
        &self.compilers
    }

    /// Network used when none is selected explicitly
    pub fn default_network(&self) -> &str {
        &self.default_network
    }

    /// Declared networks by name
    pub fn networks(&self) -> &BTreeMap<String, NetworkConfig> {
        &self.networks
    }

    /// Entry for a single network
    pub fn network(&self, name: &str) -> Option<&NetworkConfig> {
        self.networks.get(name)
    }

    /// Block explorer API keys by network name
    pub fn explorer_api_keys(&self) -> &BTreeMap<String, Secret> {
        &self.explorer_api_keys
    }

    /// Explorer API key for one network
    pub fn explorer_key(&self, network: &str) -> Option<&Secret> {
        self.explorer_api_keys.get(network)
    }

    /// Whether Sourcify verification is enabled
    pub fn source_verification(&self) -> bool {
        self.source_verification
    }

    /// Contract size analyzer options
    pub fn size_reporting(&self) -> &SizeReporting {
        &self.size_reporting
    }

    /// Gas reporter options
    pub fn cost_reporting(&self) -> &CostReporting {
        &self.cost_reporting
    }

    /// Documentation generator options
    pub fn doc_generation(&self) -> &DocGeneration {
        &self.doc_generation
    }

    /// Mode the configuration was loaded in
    pub fn mode(&self) -> LoadMode {
        self.mode
    }

    /// Print the resolved configuration
    pub fn print_summary(&self) {
        println!("╔════════════════════════════════════════════════════════════════╗");
        println!("║              BUILD CONFIGURATION RESOLVED                      ║");
        println!("╚════════════════════════════════════════════════════════════════╝");
        println!("  Mode:                {}", self.mode);
        println!("  Compilers:           {}", self.compilers.join(", "));
        println!("  Default Network:     {}", self.default_network);

        for (name, network) in &self.networks {
            let endpoint = if network.has_endpoint() {
                endpoint_origin(&network.url)
            } else {
                "(not configured)".to_string()
            };
            println!(
                "  Network {:<12} chain {} @ {} ({} account(s))",
                name,
                network.chain_id,
                endpoint,
                network.accounts.len()
            );
        }

        if self.explorer_api_keys.is_empty() {
            println!("  Explorer Keys:       (not configured)");
        } else {
            let names: Vec<&str> = self.explorer_api_keys.keys().map(String::as_str).collect();
            println!("  Explorer Keys:       {}", names.join(", "));
        }

        println!("  Sourcify:            {}", enabled(self.source_verification));
        println!(
            "  Contract Sizer:      {} -> {} ({})",
            enabled(self.size_reporting.run_on_compile),
            self.size_reporting.output_file.display(),
            self.size_reporting.unit.as_str()
        );
        println!(
            "  Gas Reporter:        {} ({} / {}, live prices {})",
            enabled(self.cost_reporting.enabled),
            self.cost_reporting.currency,
            self.cost_reporting.token,
            enabled(self.cost_reporting.live_prices())
        );
        println!(
            "  Docgen:              {} ({:?}, {})",
            self.doc_generation.output_dir.display(),
            self.doc_generation.pages,
            self.doc_generation.theme
        );
        println!("╚════════════════════════════════════════════════════════════════╝");
    }

    /// Get configuration as JSON, with secrets redacted
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn enabled(flag: bool) -> &'static str {
    if flag {
        "enabled"
    } else {
        "disabled"
    }
}

// The load mode is not part of the consumed record.
impl Serialize for BuildConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(8))?;
        map.serialize_entry("compilers", &self.compilers)?;
        map.serialize_entry("default_network", &self.default_network)?;
        map.serialize_entry("networks", &self.networks)?;
        map.serialize_entry("explorer_api_keys", &self.explorer_api_keys)?;
        map.serialize_entry("source_verification", &self.source_verification)?;
        map.serialize_entry("size_reporting", &self.size_reporting)?;
        map.serialize_entry("cost_reporting", &self.cost_reporting)?;
        map.serialize_entry("doc_generation", &self.doc_generation)?;
        map.end()
    }
}

/// Builds a [`BuildConfig`] from an environment source and optional overrides
#[derive(Debug, Clone)]
pub struct ConfigLoader<E> {
    env: E,
    mode: Option<LoadMode>,
    overrides: ConfigOverrides,
}

impl ConfigLoader<ProcessEnv> {
    /// Loader over the process environment, after reading `.env` if present
    pub fn from_process() -> Self {
        Self::new(ProcessEnv::with_dotenv())
    }
}

impl<E: EnvSource> ConfigLoader<E> {
    /// Loader over `env` with no overrides and the mode taken from `CHAINBUILD_MODE`
    pub fn new(env: E) -> Self {
        Self {
            env,
            mode: None,
            overrides: ConfigOverrides::default(),
        }
    }

    /// Force a load mode. Takes precedence over `CHAINBUILD_MODE`.
    pub fn with_mode(mut self, mode: LoadMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Use `overrides` instead of built-in defaults where they set a value
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Read overrides from `path`, which must exist
    pub fn with_overrides_file(self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let overrides = ConfigOverrides::from_file(path)?;
        Ok(self.with_overrides(overrides))
    }

    /// Read overrides from `path` if it exists
    pub fn with_overrides_file_if_exists(
        self,
        path: impl AsRef<Path>,
    ) -> Result<Self, ConfigError> {
        let overrides = ConfigOverrides::from_file_if_exists(path)?;
        Ok(self.with_overrides(overrides))
    }

    /// Resolve and validate the configuration
    ///
    /// # Resolution Order
    ///
    /// 1. Determine the load mode (explicit, then `CHAINBUILD_MODE`, then strict)
    /// 2. Start from built-in defaults
    /// 3. Apply `chainbuild.toml` overrides
    /// 4. Read endpoint and secrets from the environment
    /// 5. Validate everything, collecting all issues
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` listing every missing or invalid input.
    pub fn load(&self) -> Result<BuildConfig, ConfigError> {
        let mut issues = Vec::new();
        let mode = self.resolve_mode(&mut issues);
        let o = &self.overrides;

        let compilers = o
            .compilers
            .clone()
            .unwrap_or_else(|| vec![DEFAULT_COMPILER.to_string()]);
        validate_compilers(&compilers, &mut issues);

        let mut networks = BTreeMap::new();
        networks.insert(
            Network::Testnet.as_str().to_string(),
            self.testnet(mode, &mut issues),
        );
        networks.insert(
            Network::Localhost.as_str().to_string(),
            self.localhost(&mut issues),
        );

        let default_network = o
            .default_network
            .clone()
            .unwrap_or_else(|| BUILTIN_NETWORK.to_string());
        if default_network != BUILTIN_NETWORK && !networks.contains_key(&default_network) {
            issues.push(ConfigIssue::UnknownDefaultNetwork(default_network.clone()));
        }

        let mut explorer_api_keys = BTreeMap::new();
        if let Some(key) = self.required(
            mode,
            ETHERSCAN_API_KEY_VAR,
            "explorer_api_keys.testnet",
            &mut issues,
        ) {
            explorer_api_keys.insert(Network::Testnet.as_str().to_string(), Secret::new(key));
        }

        let size_reporting = self.size_reporting(&mut issues);
        let cost_reporting = self.cost_reporting(&mut issues);
        let doc_generation = self.doc_generation(&mut issues);

        if !issues.is_empty() {
            warn!(count = issues.len(), %mode, "configuration rejected");
            return Err(ConfigError::Invalid(issues));
        }

        info!(
            %mode,
            default_network = %default_network,
            networks = networks.len(),
            "configuration loaded"
        );

        Ok(BuildConfig {
            compilers,
            default_network,
            networks,
            explorer_api_keys,
            source_verification: o.sourcify.enabled.unwrap_or(true),
            size_reporting,
            cost_reporting,
            doc_generation,
            mode,
        })
    }

    fn resolve_mode(&self, issues: &mut Vec<ConfigIssue>) -> LoadMode {
        if let Some(mode) = self.mode {
            return mode;
        }
        match self.env.get_non_empty(MODE_VAR) {
            None => LoadMode::default(),
            Some(value) => value.parse().unwrap_or_else(|_| {
                issues.push(ConfigIssue::InvalidValue {
                    var: MODE_VAR,
                    value,
                });
                LoadMode::default()
            }),
        }
    }

    /// Read a variable the testnet needs. Missing values are an issue in
    /// strict mode and a logged fallback in compile-only mode.
    fn required(
        &self,
        mode: LoadMode,
        var: &'static str,
        field: &'static str,
        issues: &mut Vec<ConfigIssue>,
    ) -> Option<String> {
        match self.env.get_non_empty(var) {
            Some(value) => {
                debug!(var, "resolved from environment");
                Some(value)
            }
            None if mode == LoadMode::CompileOnly => {
                warn!(var, field, "not set, continuing in compile-only mode");
                None
            }
            None => {
                issues.push(ConfigIssue::MissingVar { var, field });
                None
            }
        }
    }

    fn testnet(&self, mode: LoadMode, issues: &mut Vec<ConfigIssue>) -> NetworkConfig {
        let url = match self.required(mode, RPC_URL_VAR, "networks.testnet.url", issues) {
            Some(url) => {
                validate_url("networks.testnet.url", &url, issues);
                url
            }
            None => PLACEHOLDER_RPC_URL.to_string(),
        };

        let mut accounts = Vec::new();
        if let Some(key) =
            self.required(mode, PRIVATE_KEY_VAR, "networks.testnet.accounts", issues)
        {
            if is_private_key(&key) {
                accounts.push(Secret::new(key));
            } else {
                issues.push(ConfigIssue::InvalidPrivateKey {
                    var: PRIVATE_KEY_VAR,
                });
            }
        }

        NetworkConfig::new(Network::Testnet, url, accounts)
    }

    fn localhost(&self, issues: &mut Vec<ConfigIssue>) -> NetworkConfig {
        let url = self
            .overrides
            .networks
            .localhost
            .as_ref()
            .and_then(|l| l.url.clone())
            .unwrap_or_else(|| {
                Network::Localhost
                    .default_rpc_url()
                    .unwrap_or_default()
                    .to_string()
            });
        validate_url("networks.localhost.url", &url, issues);

        NetworkConfig::new(Network::Localhost, url, Vec::new())
    }

    fn size_reporting(&self, issues: &mut Vec<ConfigIssue>) -> SizeReporting {
        let o = &self.overrides.contract_sizer;
        let defaults = SizeReporting::default();
        let output_file = o.output_file.clone().unwrap_or(defaults.output_file);
        if output_file.as_os_str().is_empty() {
            issues.push(ConfigIssue::EmptyField("contract_sizer.output_file"));
        }
        SizeReporting {
            run_on_compile: o.run_on_compile.unwrap_or(defaults.run_on_compile),
            output_file,
            unit: o.unit.unwrap_or(defaults.unit),
        }
    }

    fn cost_reporting(&self, issues: &mut Vec<ConfigIssue>) -> CostReporting {
        let o = &self.overrides.gas_reporter;
        let defaults = CostReporting::default();

        let currency = o.currency.clone().unwrap_or(defaults.currency);
        if currency.trim().is_empty() {
            issues.push(ConfigIssue::EmptyField("gas_reporter.currency"));
        }
        let token = o.token.clone().unwrap_or(defaults.token);
        if token.trim().is_empty() {
            issues.push(ConfigIssue::EmptyField("gas_reporter.token"));
        }
        if o
            .output_file
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            issues.push(ConfigIssue::EmptyField("gas_reporter.output_file"));
        }

        let price_api_key = self.env.get_non_empty(COINMARKETCAP_API_KEY_VAR).map(Secret::new);
        if price_api_key.is_none() {
            debug!(
                var = COINMARKETCAP_API_KEY_VAR,
                "not set, gas costs reported without live prices"
            );
        }

        CostReporting {
            enabled: o.enabled.unwrap_or(defaults.enabled),
            currency,
            token,
            price_api_key,
            output_file: o.output_file.clone(),
            no_colors: o.no_colors.unwrap_or(defaults.no_colors),
        }
    }

    fn doc_generation(&self, issues: &mut Vec<ConfigIssue>) -> DocGeneration {
        let o = &self.overrides.docgen;
        let defaults = DocGeneration::default();

        let output_dir = o.output_dir.clone().unwrap_or(defaults.output_dir);
        if output_dir.as_os_str().is_empty() {
            issues.push(ConfigIssue::EmptyField("docgen.output_dir"));
        }
        let page_extension = o.page_extension.clone().unwrap_or(defaults.page_extension);
        if !page_extension.starts_with('.') || page_extension.len() < 2 {
            issues.push(ConfigIssue::InvalidPageExtension(page_extension.clone()));
        }

        DocGeneration {
            output_dir,
            pages: o.pages.unwrap_or(defaults.pages),
            exclude: o
                .exclude
                .as_ref()
                .map(|paths| paths.iter().cloned().collect())
                .unwrap_or(defaults.exclude),
            theme: o.theme.clone().unwrap_or(defaults.theme),
            collapse_newlines: o.collapse_newlines.unwrap_or(defaults.collapse_newlines),
            page_extension,
            sources_dir: o.sources_dir.clone().unwrap_or(defaults.sources_dir),
        }
    }
}

fn validate_url(field: &str, url: &str, issues: &mut Vec<ConfigIssue>) {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        issues.push(ConfigIssue::InvalidUrl {
            field: field.to_string(),
            origin: endpoint_origin(url),
        });
    }
}

fn is_private_key(key: &str) -> bool {
    let hex = key
        .strip_prefix("0x")
        .or_else(|| key.strip_prefix("0X"))
        .unwrap_or(key);
    !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit())
}

fn validate_compilers(compilers: &[String], issues: &mut Vec<ConfigIssue>) {
    if compilers.is_empty() {
        issues.push(ConfigIssue::NoCompilers);
        return;
    }

    let mut seen = BTreeSet::new();
    for version in compilers {
        let parts: Vec<&str> = version.split('.').collect();
        let well_formed = parts.len() == 3
            && parts
                .iter()
                .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()));
        if !well_formed {
            issues.push(ConfigIssue::InvalidCompilerVersion(version.clone()));
        } else if !seen.insert(version.as_str()) {
            issues.push(ConfigIssue::DuplicateCompilerVersion(version.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnv;
    use crate::overrides::{DocgenOverride, LocalhostOverride};

    fn full_env() -> MapEnv {
        MapEnv::new()
            .set(RPC_URL_VAR, "https://example.test")
            .set(PRIVATE_KEY_VAR, "0xabc")
            .set(ETHERSCAN_API_KEY_VAR, "key1")
    }

    fn missing_vars(err: &ConfigError) -> Vec<&'static str> {
        err.issues()
            .iter()
            .filter_map(|issue| match issue {
                ConfigIssue::MissingVar { var, .. } => Some(*var),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_load_from_full_env() {
        let config = ConfigLoader::new(full_env()).load().unwrap();

        let testnet = config.network("testnet").unwrap();
        assert_eq!(testnet.url, "https://example.test");
        assert_eq!(testnet.accounts, vec![Secret::new("0xabc")]);
        assert_eq!(testnet.chain_id, 11155111);

        let keys: BTreeMap<&str, &str> = config
            .explorer_api_keys()
            .iter()
            .map(|(k, v)| (k.as_str(), v.expose()))
            .collect();
        assert_eq!(keys, BTreeMap::from([("testnet", "key1")]));
        assert_eq!(config.mode(), LoadMode::Strict);
    }

    #[test]
    fn test_defaults() {
        let config = ConfigLoader::new(full_env()).load().unwrap();

        assert_eq!(config.compilers(), ["0.8.28".to_string()]);
        assert_eq!(config.default_network(), "hardhat");
        assert!(config.source_verification());

        let localhost = config.network("localhost").unwrap();
        assert_eq!(localhost.url, "http://localhost:8545");
        assert_eq!(localhost.chain_id, 31337);
        assert!(localhost.accounts.is_empty());

        let sizes = config.size_reporting();
        assert!(sizes.run_on_compile);
        assert_eq!(sizes.output_file, PathBuf::from("contract-sizes.txt"));
        assert_eq!(sizes.unit, SizeUnit::KiloByte);

        let gas = config.cost_reporting();
        assert!(gas.enabled);
        assert_eq!(gas.currency, "USD");
        assert_eq!(gas.token, "MATIC");
        assert!(!gas.live_prices());

        let docs = config.doc_generation();
        assert_eq!(docs.output_dir, PathBuf::from("./docs"));
        assert_eq!(docs.pages, PageMode::Single);
        assert!(docs.exclude.is_empty());
        assert_eq!(docs.theme, "markdown");
        assert!(docs.collapse_newlines);
        assert_eq!(docs.page_extension, ".md");
    }

    #[test]
    fn test_json_has_exactly_the_documented_sections() {
        let config = ConfigLoader::new(full_env()).load().unwrap();
        let value: serde_json::Value = serde_json::from_str(&config.to_json().unwrap()).unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        let mut expected = vec![
            "compilers",
            "default_network",
            "networks",
            "explorer_api_keys",
            "source_verification",
            "size_reporting",
            "cost_reporting",
            "doc_generation",
        ];
        expected.sort_unstable();
        let mut keys = keys;
        keys.sort_unstable();
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_json_redacts_secrets() {
        let env = full_env().set(COINMARKETCAP_API_KEY_VAR, "cmc-secret");
        let json = ConfigLoader::new(env).load().unwrap().to_json().unwrap();
        assert!(!json.contains("0xabc"));
        assert!(!json.contains("key1"));
        assert!(!json.contains("cmc-secret"));
        assert!(json.contains("[REDACTED]"));
    }

    #[test]
    fn test_strict_reports_every_missing_var() {
        let err = ConfigLoader::new(MapEnv::new()).load().unwrap_err();
        assert_eq!(
            missing_vars(&err),
            vec![RPC_URL_VAR, PRIVATE_KEY_VAR, ETHERSCAN_API_KEY_VAR]
        );
    }

    #[test]
    fn test_strict_missing_rpc_url() {
        let env = MapEnv::new()
            .set(PRIVATE_KEY_VAR, "0xabc")
            .set(ETHERSCAN_API_KEY_VAR, "key1");
        let err = ConfigLoader::new(env).load().unwrap_err();
        assert_eq!(missing_vars(&err), vec![RPC_URL_VAR]);
    }

    #[test]
    fn test_strict_missing_private_key() {
        let env = MapEnv::new()
            .set(RPC_URL_VAR, "https://example.test")
            .set(ETHERSCAN_API_KEY_VAR, "key1");
        let err = ConfigLoader::new(env).load().unwrap_err();
        assert_eq!(missing_vars(&err), vec![PRIVATE_KEY_VAR]);
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let env = full_env().set(RPC_URL_VAR, "  ");
        let err = ConfigLoader::new(env).load().unwrap_err();
        assert_eq!(missing_vars(&err), vec![RPC_URL_VAR]);
    }

    #[test]
    fn test_compile_only_uses_placeholder_and_no_credentials() {
        let config = ConfigLoader::new(MapEnv::new())
            .with_mode(LoadMode::CompileOnly)
            .load()
            .unwrap();

        let testnet = config.network("testnet").unwrap();
        assert_eq!(testnet.url, PLACEHOLDER_RPC_URL);
        assert!(testnet.accounts.is_empty());
        assert!(!testnet.is_deployable());
        assert!(config.explorer_api_keys().is_empty());
        assert_eq!(config.mode(), LoadMode::CompileOnly);
    }

    #[test]
    fn test_compile_only_from_env_var() {
        let env = MapEnv::new().set(MODE_VAR, "compile-only");
        let config = ConfigLoader::new(env).load().unwrap();
        assert_eq!(config.mode(), LoadMode::CompileOnly);
    }

    #[test]
    fn test_explicit_mode_wins_over_env_var() {
        let env = MapEnv::new().set(MODE_VAR, "compile-only");
        let err = ConfigLoader::new(env)
            .with_mode(LoadMode::Strict)
            .load()
            .unwrap_err();
        assert_eq!(missing_vars(&err).len(), 3);
    }

    #[test]
    fn test_invalid_mode_var() {
        let env = full_env().set(MODE_VAR, "dry-run");
        let err = ConfigLoader::new(env).load().unwrap_err();
        assert_eq!(
            err.issues(),
            [ConfigIssue::InvalidValue {
                var: MODE_VAR,
                value: "dry-run".to_string(),
            }]
        );
    }

    #[test]
    fn test_compile_only_still_rejects_invalid_values() {
        let env = MapEnv::new()
            .set(RPC_URL_VAR, "ftp://example.test")
            .set(PRIVATE_KEY_VAR, "not-a-key");
        let err = ConfigLoader::new(env)
            .with_mode(LoadMode::CompileOnly)
            .load()
            .unwrap_err();
        assert_eq!(err.issues().len(), 2);
        assert!(matches!(err.issues()[0], ConfigIssue::InvalidUrl { .. }));
        assert_eq!(
            err.issues()[1],
            ConfigIssue::InvalidPrivateKey {
                var: PRIVATE_KEY_VAR
            }
        );
    }

    #[test]
    fn test_invalid_private_key_is_not_echoed() {
        let env = full_env().set(PRIVATE_KEY_VAR, "0xnothex-supersecret");
        let err = ConfigLoader::new(env).load().unwrap_err();
        assert!(!err.to_string().contains("supersecret"));
    }

    #[test]
    fn test_private_key_formats() {
        assert!(is_private_key("0xabc"));
        assert!(is_private_key("0XABC123"));
        assert!(is_private_key("deadbeef"));
        assert!(!is_private_key("0x"));
        assert!(!is_private_key("0xzz"));
    }

    #[test]
    fn test_price_key_enables_live_prices() {
        let env = full_env().set(COINMARKETCAP_API_KEY_VAR, "cmc");
        let config = ConfigLoader::new(env).load().unwrap();
        assert!(config.cost_reporting().live_prices());
        assert_eq!(
            config.cost_reporting().price_api_key.as_ref().map(Secret::expose),
            Some("cmc")
        );
    }

    #[test]
    fn test_overrides_apply() {
        let toml = r#"
compilers = ["0.8.28", "0.8.8"]
default_network = "localhost"

[networks.localhost]
url = "http://127.0.0.1:8545"

[sourcify]
enabled = false

[gas_reporter]
enabled = false
currency = "EUR"

[docgen]
pages = "multiple"
exclude = ["mocks", "mocks"]
"#;
        let overrides = ConfigOverrides::from_toml_str(toml).unwrap();
        let env = full_env().set(COINMARKETCAP_API_KEY_VAR, "cmc");
        let config = ConfigLoader::new(env).with_overrides(overrides).load().unwrap();

        assert_eq!(config.compilers(), ["0.8.28".to_string(), "0.8.8".to_string()]);
        assert_eq!(config.default_network(), "localhost");
        assert_eq!(config.network("localhost").unwrap().url, "http://127.0.0.1:8545");
        assert!(!config.source_verification());
        assert_eq!(config.cost_reporting().currency, "EUR");
        assert!(!config.cost_reporting().live_prices());
        assert_eq!(config.doc_generation().pages, PageMode::Multiple);
        assert_eq!(
            config.doc_generation().exclude,
            BTreeSet::from(["mocks".to_string()])
        );
    }

    #[test]
    fn test_override_issues_are_collected_with_env_issues() {
        let overrides = ConfigOverrides {
            compilers: Some(vec![
                "0.8".to_string(),
                "0.8.28".to_string(),
                "0.8.28".to_string(),
            ]),
            default_network: Some("mainnet".to_string()),
            networks: crate::overrides::NetworksOverride {
                localhost: Some(LocalhostOverride {
                    url: Some("localhost:8545".to_string()),
                }),
            },
            docgen: DocgenOverride {
                page_extension: Some("md".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = ConfigLoader::new(MapEnv::new())
            .with_overrides(overrides)
            .load()
            .unwrap_err();

        let issues = err.issues();
        assert!(issues.contains(&ConfigIssue::InvalidCompilerVersion("0.8".to_string())));
        assert!(issues.contains(&ConfigIssue::DuplicateCompilerVersion("0.8.28".to_string())));
        assert!(issues.contains(&ConfigIssue::UnknownDefaultNetwork("mainnet".to_string())));
        assert!(issues.contains(&ConfigIssue::InvalidPageExtension("md".to_string())));
        assert!(issues
            .iter()
            .any(|i| matches!(
                i,
                ConfigIssue::InvalidUrl { field, .. } if field == "networks.localhost.url"
            )));
        assert_eq!(missing_vars(&err).len(), 3);
    }

    #[test]
    fn test_empty_report_settings_are_collected_together() {
        let toml = r#"
[contract_sizer]
output_file = ""

[gas_reporter]
currency = " "
token = ""
output_file = ""
"#;
        let overrides = ConfigOverrides::from_toml_str(toml).unwrap();
        let err = ConfigLoader::new(full_env())
            .with_overrides(overrides)
            .load()
            .unwrap_err();

        assert_eq!(
            err.issues(),
            [
                ConfigIssue::EmptyField("contract_sizer.output_file"),
                ConfigIssue::EmptyField("gas_reporter.currency"),
                ConfigIssue::EmptyField("gas_reporter.token"),
                ConfigIssue::EmptyField("gas_reporter.output_file"),
            ]
        );
    }

    #[test]
    fn test_unset_gas_report_file_goes_to_console() {
        let config = ConfigLoader::new(full_env()).load().unwrap();
        assert_eq!(config.cost_reporting().output_file, None);
    }

    #[test]
    fn test_invalid_rpc_url_error_keeps_only_origin() {
        let env = full_env().set(
            RPC_URL_VAR,
            "wss://eth-sepolia.g.alchemy.com/v2/SUPERSECRETKEY",
        );
        let err = ConfigLoader::new(env).load().unwrap_err();

        assert_eq!(
            err.issues(),
            [ConfigIssue::InvalidUrl {
                field: "networks.testnet.url".to_string(),
                origin: "wss://eth-sepolia.g.alchemy.com".to_string(),
            }]
        );
        assert!(!err.to_string().contains("SUPERSECRETKEY"));
    }

    #[test]
    fn test_localhost_loads_without_testnet_inputs_in_compile_only() {
        let config = ConfigLoader::new(MapEnv::new())
            .with_mode(LoadMode::CompileOnly)
            .load()
            .unwrap();
        let localhost = config.network("localhost").unwrap();
        assert_eq!(localhost.network, Network::Localhost);
        assert!(localhost.is_deployable());
    }

    #[test]
    fn test_empty_compiler_list() {
        let overrides = ConfigOverrides {
            compilers: Some(vec![]),
            ..Default::default()
        };
        let err = ConfigLoader::new(full_env())
            .with_overrides(overrides)
            .load()
            .unwrap_err();
        assert_eq!(err.issues(), [ConfigIssue::NoCompilers]);
    }

    #[test]
    fn test_load_mode_from_str() {
        assert_eq!("strict".parse::<LoadMode>().unwrap(), LoadMode::Strict);
        assert_eq!(
            "Compile-Only".parse::<LoadMode>().unwrap(),
            LoadMode::CompileOnly
        );
        assert!("dry".parse::<LoadMode>().is_err());
    }

    #[test]
    fn test_size_unit() {
        assert_eq!(SizeUnit::Byte.divisor(), 1);
        assert_eq!(SizeUnit::KiloByte.divisor(), 1000);
        assert_eq!(SizeUnit::KiloByte.as_str(), "kB");
    }
}
