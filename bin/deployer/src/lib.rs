pub mod source;

use config::{ChainKind, CompilerSource, ResolvedConfiguration, Resolver, SignerSource};
use serde::Serialize;
use tracing::info;

pub use source::{load_resolver, ConfigSource};

/// Outcome of checking the active network's endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkCheck {
    /// Local network, nothing to connect to
    Local,
    /// Endpoint serves the expected chain
    Verified { chain_id: u64 },
}

/// Connect to the active network and verify its chain ID.
pub async fn check_network(config: &ResolvedConfiguration) -> eyre::Result<NetworkCheck> {
    let network = config.active_network();
    if network.local {
        info!(network = %network.name, "Local network, skipping endpoint check");
        return Ok(NetworkCheck::Local);
    }

    info!(network = %network.name, "Connecting to RPC endpoint...");
    let provider = client::provider_for(config).await?;
    let chain_id = client::verify_chain_id(&provider, network.chain_id).await?;

    Ok(NetworkCheck::Verified { chain_id })
}

/// One row of the `networks` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkSummary {
    pub name: String,
    pub chain_id: u64,
    pub kind: ChainKind,
    pub local: bool,
    pub default: bool,
    /// Environment variable holding the signer, if any
    pub signer_env: Option<String>,
    /// Compiler version pinned for the network's kind, if a backend is registered
    pub compiler: Option<String>,
}

/// Registered networks ordered by name.
pub fn list_networks(resolver: &Resolver) -> Vec<NetworkSummary> {
    let registry = resolver.networks();
    registry
        .iter()
        .map(|profile| NetworkSummary {
            name: profile.name.clone(),
            chain_id: profile.chain_id,
            kind: profile.kind,
            local: profile.local,
            default: profile.name == registry.default_network(),
            signer_env: match &profile.signer_source {
                SignerSource::FromEnvKey(key) => Some(key.clone()),
                SignerSource::None => None,
            },
            compiler: resolver
                .backends()
                .get(profile.kind)
                .map(|backend| backend.version.clone()),
        })
        .collect()
}

/// One row of the `backends` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendSummary {
    pub kind: ChainKind,
    pub version: String,
    /// Optimizer runs, `None` when the optimizer is off
    pub optimizer_runs: Option<u32>,
    pub source: CompilerSource,
}

/// Registered compiler backends ordered by kind.
pub fn list_backends(resolver: &Resolver) -> Vec<BackendSummary> {
    resolver
        .backends()
        .iter()
        .map(|backend| BackendSummary {
            kind: backend.kind,
            version: backend.version.clone(),
            optimizer_runs: backend.optimizer.effective_runs(),
            source: backend.source,
        })
        .collect()
}
