//! Resolve and inspect the build/deployment configuration of a contract project.
//!
//! Commands:
//! - `show`: print the resolved configuration (signer redacted)
//! - `networks`: list registered networks
//! - `backends`: list registered compiler backends
//! - `check`: verify the active endpoint serves the expected chain
//! - `signer`: print the signer address (fails without a signer)

use clap::{Parser, Subcommand};
use config::ProcessEnv;
use deployer::{check_network, list_backends, list_networks, load_resolver, ConfigSource};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "deployer")]
#[command(about = "Resolve network-aware contract build and deployment configuration")]
struct Cli {
    /// Path to the project file (defaults to ./deploy.toml, then the built-in sample)
    #[arg(short, long, env = "DEPLOY_CONFIG")]
    config: Option<PathBuf>,

    /// Network to target instead of the project default
    #[arg(short, long, env = "DEPLOY_NETWORK")]
    network: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the resolved configuration as JSON
    Show,

    /// List registered networks
    Networks,

    /// List registered compiler backends
    Backends,

    /// Verify the active network's RPC endpoint serves the expected chain ID
    Check,

    /// Print the address of the configured signer
    Signer,
}

fn init_tracing(json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let source = ConfigSource::discover(cli.config, &std::env::current_dir()?);
    let resolver = load_resolver(&source)?;

    let resolve = || resolver.resolve(cli.network.as_deref(), &ProcessEnv);

    match cli.command {
        Command::Show => {
            let config = resolve()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Command::Networks => {
            let networks = list_networks(&resolver);
            println!("{}", serde_json::to_string_pretty(&networks)?);
        }
        Command::Backends => {
            let backends = list_backends(&resolver);
            println!("{}", serde_json::to_string_pretty(&backends)?);
        }
        Command::Check => {
            check_network(&resolve()?).await?;
        }
        Command::Signer => {
            let address = client::signer_address(&resolve()?)?;
            println!("{address}");
        }
    }

    Ok(())
}
