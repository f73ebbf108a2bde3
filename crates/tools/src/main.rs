use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use chainbuild_tools::config::{BuildConfig, ConfigLoader, LoadMode};
use chainbuild_tools::overrides::OVERRIDES_FILE;
use chainbuild_tools::{logging, probe, Network};

#[derive(Parser)]
#[command(name = "chainbuild")]
#[command(about = "Chainbuild CLI tools for resolving and checking contract build configuration")]
struct Cli {
    /// Overrides file, used if it exists
    #[arg(long, global = true, default_value = OVERRIDES_FILE)]
    config: PathBuf,
    /// Allow missing testnet endpoint and credentials
    #[arg(long, global = true)]
    compile_only: bool,
    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved configuration
    Config {
        /// Emit JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Validate configuration and report every problem
    Check,
    /// List declared networks
    Networks,
    /// Check a network endpoint reports the declared chain id.
    /// Probing localhost does not need the testnet variables.
    Probe {
        /// Network to probe
        #[arg(short, long, default_value = "testnet")]
        network: String,
        /// Request timeout in milliseconds
        #[arg(long, default_value_t = 10_000)]
        timeout_ms: u64,
    },
}

fn load(cli: &Cli, mode: Option<LoadMode>) -> Result<BuildConfig> {
    let mut loader = ConfigLoader::from_process()
        .with_overrides_file_if_exists(&cli.config)
        .with_context(|| format!("Failed to read {}", cli.config.display()))?;
    if cli.compile_only {
        loader = loader.with_mode(LoadMode::CompileOnly);
    } else if let Some(mode) = mode {
        loader = loader.with_mode(mode);
    }
    loader.load().context("Invalid build configuration")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose).context("Failed to initialise logging")?;

    match cli.command {
        Commands::Config { json } => {
            let config = load(&cli, None)?;
            if json {
                println!("{}", config.to_json()?);
            } else {
                config.print_summary();
            }
            Ok(())
        }
        Commands::Check => {
            let config = load(&cli, None)?;
            println!("Configuration is valid ({} mode)", config.mode());
            Ok(())
        }
        Commands::Networks => {
            let config = load(&cli, None)?;
            for (name, network) in config.networks() {
                let marker = if name == config.default_network() { "*" } else { " " };
                println!(
                    "{} {:<12} chain {:<10} {}",
                    marker,
                    name,
                    network.chain_id,
                    if network.is_deployable() {
                        "deployable"
                    } else {
                        "compile only"
                    }
                );
            }
            Ok(())
        }
        Commands::Probe {
            ref network,
            timeout_ms,
        } => {
            let network: Network = network.parse()?;
            let config = load(&cli, probe::load_mode_for(network))?;
            let entry = config
                .network(network.as_str())
                .with_context(|| format!("Network {} is not declared", network))?;
            let chain_id = probe::verify_chain_id(
                network.as_str(),
                entry,
                Duration::from_millis(timeout_ms),
            )
            .await?;
            println!("{} endpoint reports chain id {}", network, chain_id);
            Ok(())
        }
    }
}
