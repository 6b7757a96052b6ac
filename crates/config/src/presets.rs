//! Built-in sample registry.
//!
//! A local `hardhat` network simulating Polygon Amoy, and Amoy itself. The
//! rollup backend is registered too so rollup networks can be added without
//! touching the toolchain pins.

use crate::backend::{BackendRegistry, CompilerBackend, CompilerSource, Optimizer};
use crate::error::ConfigResult;
use crate::network::{ChainKind, NetworkProfile, NetworkRegistry};
use crate::resolve::Resolver;
use std::path::PathBuf;

pub const DEFAULT_NETWORK: &str = "polygon-amoy";

/// Polygon Amoy testnet chain ID.
pub const AMOY_CHAIN_ID: u64 = 80002;

/// Public Amoy endpoint. Set `RPC_URL` to use a dedicated node.
pub const AMOY_PUBLIC_RPC: &str = "https://rpc-amoy.polygon.technology";

pub const PRIVATE_KEY_ENV: &str = "PRIVATE_KEY";
pub const RPC_URL_ENV: &str = "RPC_URL";

pub fn networks() -> Vec<NetworkProfile> {
    vec![
        NetworkProfile::local("hardhat", AMOY_CHAIN_ID),
        NetworkProfile::remote(DEFAULT_NETWORK, AMOY_CHAIN_ID, AMOY_PUBLIC_RPC)
            .with_signer_env(PRIVATE_KEY_ENV)
            .with_rpc_env(RPC_URL_ENV),
    ]
}

pub fn backends() -> Vec<CompilerBackend> {
    vec![
        CompilerBackend::new(ChainKind::Standard, "0.8.23").with_optimizer(Optimizer::enabled(200)),
        CompilerBackend::new(ChainKind::Rollup, "1.4.1")
            .with_optimizer(Optimizer::enabled(200))
            .with_source(CompilerSource::Binary),
    ]
}

/// Resolver over the sample registry, rooted at `project_root`.
pub fn resolver(project_root: impl Into<PathBuf>) -> ConfigResult<Resolver> {
    Ok(Resolver::new(
        NetworkRegistry::new(networks(), DEFAULT_NETWORK)?,
        BackendRegistry::new(backends())?,
        project_root,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_resolves() {
        let resolver = resolver("/project").unwrap();
        let empty: [(&str, &str); 0] = [];

        let config = resolver.resolve(None, &empty).unwrap();
        assert_eq!(config.active_network().name, DEFAULT_NETWORK);
        assert_eq!(config.rpc_url(), Some(AMOY_PUBLIC_RPC));
        assert_eq!(config.backend().version, "0.8.23");
        assert!(!config.can_deploy());

        let local = resolver.resolve(Some("hardhat"), &[(PRIVATE_KEY_ENV, "abc")]).unwrap();
        assert!(local.active_network().local);
        assert!(!local.can_deploy());
    }
}
