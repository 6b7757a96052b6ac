//! Project file loading.
//!
//! ```toml
//! default_network = "polygon-amoy"
//!
//! [networks.hardhat]
//! chain_id = 80002
//! local = true
//!
//! [networks.polygon-amoy]
//! chain_id = 80002
//! rpc_url = "https://rpc-amoy.polygon.technology"
//! rpc_env = "RPC_URL"
//! signer = { from_env_key = "PRIVATE_KEY" }
//!
//! [backends.standard]
//! version = "0.8.23"
//! optimizer = { enabled = true, runs = 200 }
//!
//! [paths]
//! sources = "contracts"
//! ```

use crate::backend::{BackendRegistry, CompilerBackend, CompilerSource, Optimizer};
use crate::error::ConfigResult;
use crate::layout::LayoutPolicy;
use crate::network::{ChainKind, NetworkProfile, NetworkRegistry, SignerSource};
use crate::resolve::Resolver;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Contents of a project file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    pub default_network: String,
    #[serde(default)]
    pub networks: BTreeMap<String, NetworkEntry>,
    /// Keyed by chain kind name
    #[serde(default)]
    pub backends: BTreeMap<String, BackendEntry>,
    #[serde(default)]
    pub paths: LayoutPolicy,
}

/// A `[networks.<name>]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkEntry {
    pub chain_id: u64,
    #[serde(default)]
    pub kind: ChainKind,
    #[serde(default)]
    pub local: bool,
    pub rpc_url: Option<String>,
    pub rpc_env: Option<String>,
    #[serde(default)]
    pub signer: SignerSource,
}

/// A `[backends.<kind>]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendEntry {
    pub version: String,
    #[serde(default)]
    pub optimizer: Optimizer,
    #[serde(default)]
    pub source: CompilerSource,
}

impl ProjectConfig {
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validate the file and build a resolver rooted at `project_root`.
    pub fn into_resolver(self, project_root: impl Into<PathBuf>) -> ConfigResult<Resolver> {
        let profiles = self.networks.into_iter().map(|(name, entry)| NetworkProfile {
            name,
            chain_id: entry.chain_id,
            kind: entry.kind,
            local: entry.local,
            rpc_url: entry.rpc_url,
            rpc_env: entry.rpc_env,
            signer_source: entry.signer,
        });
        let networks = NetworkRegistry::new(profiles, self.default_network)?;

        let backends = self
            .backends
            .into_iter()
            .map(|(kind, entry)| -> ConfigResult<CompilerBackend> {
                Ok(CompilerBackend::new(kind.parse()?, entry.version)
                    .with_optimizer(entry.optimizer)
                    .with_source(entry.source))
            })
            .collect::<ConfigResult<Vec<_>>>()?;
        let backends = BackendRegistry::new(backends)?;

        Resolver::new(networks, backends, project_root).with_layout_policy(self.paths)
    }
}

impl Resolver {
    /// Load a project file. Paths are relative to the file's directory.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        ProjectConfig::from_file(path)?.into_resolver(root)
    }
}
