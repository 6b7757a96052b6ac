//! Network profiles for contract deployment.
//!
//! A profile names one deployable target. The [`NetworkRegistry`] holds every
//! profile a project knows about plus the default one, and validates them
//! once when it is built.

use crate::env::EnvSource;
use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use tracing::debug;
use url::Url;

/// Kind of chain a network targets. Decides which compiler backend builds for it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ChainKind {
    /// EVM chain compiled with the standard compiler
    #[default]
    Standard,
    /// Rollup that needs its own compiler
    Rollup,
}

impl ChainKind {
    pub const ALL: [Self; 2] = [Self::Standard, Self::Rollup];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Rollup => "rollup",
        }
    }
}

impl fmt::Display for ChainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChainKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "rollup" => Ok(Self::Rollup),
            other => Err(ConfigError::UnknownChainKind(other.to_string())),
        }
    }
}

/// Where the signer for a network comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignerSource {
    /// No signer. Local networks never read secrets.
    #[default]
    None,
    /// Private key read from the named environment variable
    FromEnvKey(String),
}

/// One deployable network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkProfile {
    /// Unique name within the registry
    pub name: String,
    /// Chain ID
    pub chain_id: u64,
    /// Chain kind, used to select the compiler backend
    pub kind: ChainKind,
    /// In-process network with no remote endpoint
    pub local: bool,
    /// RPC endpoint url
    pub rpc_url: Option<String>,
    /// Environment variable that overrides `rpc_url` when set
    pub rpc_env: Option<String>,
    /// Signer requirement
    pub signer_source: SignerSource,
}

impl NetworkProfile {
    /// A purely local network: no endpoint, no signer.
    pub fn local(name: impl Into<String>, chain_id: u64) -> Self {
        Self {
            name: name.into(),
            chain_id,
            kind: ChainKind::Standard,
            local: true,
            rpc_url: None,
            rpc_env: None,
            signer_source: SignerSource::None,
        }
    }

    /// A remote network reached through `rpc_url`.
    pub fn remote(name: impl Into<String>, chain_id: u64, rpc_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            chain_id,
            kind: ChainKind::Standard,
            local: false,
            rpc_url: Some(rpc_url.into()),
            rpc_env: None,
            signer_source: SignerSource::None,
        }
    }

    /// Set the chain kind.
    pub fn with_kind(mut self, kind: ChainKind) -> Self {
        self.kind = kind;
        self
    }

    /// Read the signer from environment variable `key`.
    pub fn with_signer_env(mut self, key: impl Into<String>) -> Self {
        self.signer_source = SignerSource::FromEnvKey(key.into());
        self
    }

    /// Allow environment variable `key` to override the RPC url.
    pub fn with_rpc_env(mut self, key: impl Into<String>) -> Self {
        self.rpc_env = Some(key.into());
        self
    }

    /// Copy of this profile with the RPC override from `env` applied.
    ///
    /// Local profiles and unset or blank overrides leave the url untouched.
    /// An override must be a valid http(s) url.
    pub fn with_env_overrides(&self, env: &impl EnvSource) -> ConfigResult<Self> {
        let mut profile = self.clone();
        if self.local {
            return Ok(profile);
        }

        let override_url = self
            .rpc_env
            .as_deref()
            .and_then(|key| env.var(key))
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        if let Some(url) = override_url {
            check_rpc_url(&self.name, &url)?;
            debug!(network = %self.name, "RPC url overridden from environment");
            profile.rpc_url = Some(url);
        }
        Ok(profile)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.chain_id == 0 {
            return Err(ConfigError::InvalidChainId {
                network: self.name.clone(),
            });
        }
        match self.rpc_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => check_rpc_url(&self.name, url),
            _ if self.local => Ok(()),
            _ => Err(ConfigError::MissingRpcUrl {
                network: self.name.clone(),
            }),
        }
    }
}

/// An RPC endpoint must parse as an http or https url.
fn check_rpc_url(network: &str, rpc_url: &str) -> ConfigResult<()> {
    let invalid = |reason: String| ConfigError::InvalidRpcUrl {
        network: network.to_string(),
        url: rpc_url.to_string(),
        reason,
    };

    let parsed = Url::parse(rpc_url).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme `{other}`"))),
    }
}

/// Named network profiles plus the default network.
#[derive(Debug, Clone)]
pub struct NetworkRegistry {
    networks: BTreeMap<String, NetworkProfile>,
    default_network: String,
}

impl NetworkRegistry {
    /// Build a registry, validating every profile.
    ///
    /// Chain IDs must be unique among non-local networks; a local network may
    /// reuse the ID of the chain it simulates.
    pub fn new(
        profiles: impl IntoIterator<Item = NetworkProfile>,
        default_network: impl Into<String>,
    ) -> ConfigResult<Self> {
        let mut networks: BTreeMap<String, NetworkProfile> = BTreeMap::new();
        let mut chain_ids: HashMap<u64, String> = HashMap::new();

        for profile in profiles {
            profile.validate()?;

            if networks.contains_key(&profile.name) {
                return Err(ConfigError::DuplicateNetwork(profile.name));
            }

            if !profile.local {
                if let Some(first) = chain_ids.get(&profile.chain_id) {
                    return Err(ConfigError::DuplicateChainId {
                        chain_id: profile.chain_id,
                        first: first.clone(),
                        second: profile.name,
                    });
                }
                chain_ids.insert(profile.chain_id, profile.name.clone());
            }

            networks.insert(profile.name.clone(), profile);
        }

        let registry = Self {
            networks,
            default_network: default_network.into(),
        };
        // default must exist
        registry.lookup(&registry.default_network)?;

        Ok(registry)
    }

    /// Resolve `name`, or the default network when `name` is `None`.
    pub fn resolve(&self, name: Option<&str>) -> ConfigResult<&NetworkProfile> {
        self.lookup(name.unwrap_or(&self.default_network))
    }

    /// Name of the default network.
    pub fn default_network(&self) -> &str {
        &self.default_network
    }

    /// Profiles ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = &NetworkProfile> {
        self.networks.values()
    }

    fn lookup(&self, name: &str) -> ConfigResult<&NetworkProfile> {
        self.networks
            .get(name)
            .ok_or_else(|| ConfigError::UnknownNetwork {
                name: name.to_string(),
                available: self
                    .networks
                    .keys()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}
