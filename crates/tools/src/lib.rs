//! Chainbuild Tools Library
//!
//! Provides the build configuration consumed by contract compilation,
//! deployment, verification and reporting tooling.

pub mod config;
pub mod env;
pub mod error;
pub mod logging;
pub mod network;
pub mod overrides;
pub mod probe;
pub mod secret;

pub use config::{BuildConfig, ConfigLoader, LoadMode};
pub use env::{EnvSource, MapEnv, ProcessEnv};
pub use error::{ConfigError, ConfigIssue};
pub use network::{Network, NetworkConfig};
pub use secret::Secret;
