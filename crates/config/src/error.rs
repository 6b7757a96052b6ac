use crate::network::ChainKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Requested network is not in the registry
    #[error("Unknown network `{name}` (available: {available})")]
    UnknownNetwork { name: String, available: String },

    /// No compiler backend is registered for the network's chain kind
    #[error("Network `{network}` targets chain kind `{kind}`, but no compiler backend is registered for it")]
    UnsupportedNetworkKind { network: String, kind: ChainKind },

    /// Pinned compiler version is not one the backend registry knows
    #[error("Unrecognized {kind} compiler version `{version}`")]
    UnrecognizedCompilerVersion { kind: ChainKind, version: String },

    /// A signing operation was attempted without signer material
    #[error("Cannot deploy to `{network}`: no signer configured")]
    MissingSigner { network: String },

    #[error("Network `{network}` is not local and has no rpc_url")]
    MissingRpcUrl { network: String },

    #[error("Network `{network}` has invalid rpc_url `{url}`: {reason}")]
    InvalidRpcUrl {
        network: String,
        url: String,
        reason: String,
    },

    #[error("Network `{network}` has invalid chain_id 0")]
    InvalidChainId { network: String },

    #[error("chain_id {chain_id} is used by both `{first}` and `{second}`")]
    DuplicateChainId {
        chain_id: u64,
        first: String,
        second: String,
    },

    #[error("Network `{0}` is defined more than once")]
    DuplicateNetwork(String),

    #[error("Compiler backend for chain kind `{0}` is defined more than once")]
    DuplicateBackend(ChainKind),

    #[error("Unknown chain kind `{0}` (expected `standard` or `rollup`)")]
    UnknownChainKind(String),

    /// Two backends would write to the same output directory
    #[error("Artifact layout collision: `{path}` is used by both {first} and {second}")]
    LayoutCollision {
        path: String,
        first: String,
        second: String,
    },

    #[error("Invalid `{field}` directory `{value}`: {reason}")]
    InvalidLayoutPath {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
