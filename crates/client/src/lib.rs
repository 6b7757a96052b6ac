//! RPC plumbing for a resolved deployment configuration.
//!
//! Providers are only built on demand. A configuration without a signer can
//! still get a read-only provider; asking for a wallet provider is where the
//! missing signer surfaces.

use alloy_network::EthereumWallet;
use alloy_primitives::Address;
use alloy_provider::{Provider, ProviderBuilder};
use alloy_signer_local::PrivateKeySigner;
use config::{ConfigError, ResolvedConfiguration, SignerMaterial};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ClientError {
    /// Error parsing or validating URLs
    #[error("Invalid RPC URL: {0}")]
    InvalidUrl(String),

    /// Error connecting to the RPC endpoint
    #[error("Connection error: {0}")]
    Connection(String),

    /// Error with private key
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// Network has no RPC endpoint (local, in-process network)
    #[error("Network `{0}` is local and has no RPC endpoint")]
    NoEndpoint(String),

    /// Endpoint reports a different chain than the profile
    #[error("Chain ID mismatch: expected {expected}, endpoint reports {actual}")]
    ChainIdMismatch { expected: u64, actual: u64 },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Convenience function to create an ethereum rpc provider from url.
pub async fn create_provider(rpc_url: &str) -> Result<impl Provider + Clone, ClientError> {
    let url = rpc_url
        .parse()
        .map_err(|e| ClientError::InvalidUrl(format!("{}", e)))?;
    let provider = ProviderBuilder::new().connect_http(url);

    Ok(provider)
}

/// Create a provider with wallet signing capability from a private key.
pub fn create_wallet_provider(
    rpc_url: &str,
    private_key: &SignerMaterial,
) -> Result<impl Provider + Clone, ClientError> {
    let url = rpc_url
        .parse()
        .map_err(|e| ClientError::InvalidUrl(format!("{}", e)))?;

    let wallet = EthereumWallet::from(local_signer(private_key)?);

    let provider = ProviderBuilder::new().wallet(wallet).connect_http(url);

    Ok(provider)
}

/// Parse signer material into a local signer.
pub fn local_signer(material: &SignerMaterial) -> Result<PrivateKeySigner, ClientError> {
    material
        .expose()
        .parse()
        .map_err(|e| ClientError::InvalidPrivateKey(format!("{}", e)))
}

/// Address of the configured signer. Fails with `MissingSigner` when absent.
pub fn signer_address(config: &ResolvedConfiguration) -> Result<Address, ClientError> {
    let signer = local_signer(config.require_signer()?)?;
    Ok(signer.address())
}

/// Read-only provider for the active network.
pub async fn provider_for(
    config: &ResolvedConfiguration,
) -> Result<impl Provider + Clone, ClientError> {
    let rpc_url = endpoint(config)?;
    debug!(network = %config.active_network().name, "Creating provider");
    create_provider(rpc_url).await
}

/// Signing provider for the active network.
///
/// This is the point where a missing signer becomes an error.
pub fn wallet_provider_for(
    config: &ResolvedConfiguration,
) -> Result<impl Provider + Clone, ClientError> {
    let rpc_url = endpoint(config)?;
    let material = config.require_signer()?;
    debug!(network = %config.active_network().name, "Creating wallet provider");
    create_wallet_provider(rpc_url, material)
}

/// Check that the endpoint serves chain `expected`. Returns the reported ID.
pub async fn verify_chain_id<P: Provider>(provider: &P, expected: u64) -> Result<u64, ClientError> {
    let actual = provider
        .get_chain_id()
        .await
        .map_err(|e| ClientError::Connection(format!("{}", e)))?;

    if actual != expected {
        return Err(ClientError::ChainIdMismatch { expected, actual });
    }

    info!(chain_id = actual, "Endpoint chain ID verified");
    Ok(actual)
}

fn endpoint(config: &ResolvedConfiguration) -> Result<&str, ClientError> {
    config
        .rpc_url()
        .ok_or_else(|| ClientError::NoEndpoint(config.active_network().name.clone()))
}
