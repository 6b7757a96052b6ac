//! Compiler backends and the per-chain-kind backend registry.

use crate::error::{ConfigError, ConfigResult};
use crate::network::{ChainKind, NetworkProfile};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Standard compiler releases the registry accepts.
pub const STANDARD_VERSIONS: &[&str] = &[
    "0.7.6", "0.8.0", "0.8.1", "0.8.2", "0.8.3", "0.8.4", "0.8.5", "0.8.6", "0.8.7", "0.8.8",
    "0.8.9", "0.8.10", "0.8.11", "0.8.12", "0.8.13", "0.8.14", "0.8.15", "0.8.16", "0.8.17",
    "0.8.18", "0.8.19", "0.8.20", "0.8.21", "0.8.22", "0.8.23", "0.8.24", "0.8.25", "0.8.26",
    "0.8.27", "0.8.28",
];

/// Rollup compiler releases the registry accepts.
pub const ROLLUP_VERSIONS: &[&str] = &[
    "1.3.13", "1.3.14", "1.3.16", "1.3.17", "1.3.18", "1.3.19", "1.3.21", "1.3.22", "1.3.23",
    "1.4.0", "1.4.1", "1.5.0", "1.5.1", "1.5.2", "1.5.3", "1.5.4", "1.5.6", "1.5.7",
];

impl ChainKind {
    /// Compiler versions recognized for this kind.
    pub const fn known_versions(self) -> &'static [&'static str] {
        match self {
            Self::Standard => STANDARD_VERSIONS,
            Self::Rollup => ROLLUP_VERSIONS,
        }
    }
}

/// Default optimizer run count.
pub const DEFAULT_OPTIMIZER_RUNS: u32 = 200;

const fn default_runs() -> u32 {
    DEFAULT_OPTIMIZER_RUNS
}

/// Optimizer settings. `runs` only matters when `enabled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Optimizer {
    pub enabled: bool,
    #[serde(default = "default_runs")]
    pub runs: u32,
}

impl Optimizer {
    pub const fn enabled(runs: u32) -> Self {
        Self {
            enabled: true,
            runs,
        }
    }

    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            runs: DEFAULT_OPTIMIZER_RUNS,
        }
    }

    /// Runs passed to the compiler, `None` when the optimizer is off.
    pub const fn effective_runs(&self) -> Option<u32> {
        if self.enabled {
            Some(self.runs)
        } else {
            None
        }
    }
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::disabled()
    }
}

/// How the rollup compiler binary is obtained. Ignored by the standard backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompilerSource {
    #[default]
    Binary,
    Docker,
}

/// A pinned compiler toolchain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CompilerBackend {
    pub kind: ChainKind,
    pub version: String,
    pub optimizer: Optimizer,
    pub source: CompilerSource,
}

impl CompilerBackend {
    /// Backend with the optimizer off and binary source.
    pub fn new(kind: ChainKind, version: impl Into<String>) -> Self {
        Self {
            kind,
            version: version.into(),
            optimizer: Optimizer::default(),
            source: CompilerSource::default(),
        }
    }

    pub fn with_optimizer(mut self, optimizer: Optimizer) -> Self {
        self.optimizer = optimizer;
        self
    }

    pub fn with_source(mut self, source: CompilerSource) -> Self {
        self.source = source;
        self
    }

    pub fn is_known_version(&self) -> bool {
        self.kind.known_versions().contains(&self.version.as_str())
    }
}

/// Compiler backends keyed by the chain kind they build for.
#[derive(Debug, Clone, Default)]
pub struct BackendRegistry {
    backends: BTreeMap<ChainKind, CompilerBackend>,
}

impl BackendRegistry {
    /// Build a registry, rejecting unknown versions and duplicate kinds.
    pub fn new(backends: impl IntoIterator<Item = CompilerBackend>) -> ConfigResult<Self> {
        let mut registry = BTreeMap::new();
        for backend in backends {
            if !backend.is_known_version() {
                return Err(ConfigError::UnrecognizedCompilerVersion {
                    kind: backend.kind,
                    version: backend.version,
                });
            }
            if registry.contains_key(&backend.kind) {
                return Err(ConfigError::DuplicateBackend(backend.kind));
            }
            registry.insert(backend.kind, backend);
        }
        Ok(Self { backends: registry })
    }

    /// Backend for the chain kind `profile` targets.
    ///
    /// Settings are returned exactly as registered.
    pub fn select(&self, profile: &NetworkProfile) -> ConfigResult<CompilerBackend> {
        let backend = self
            .backends
            .get(&profile.kind)
            .ok_or_else(|| ConfigError::UnsupportedNetworkKind {
                network: profile.name.clone(),
                kind: profile.kind,
            })?;

        debug!(
            network = %profile.name,
            kind = %backend.kind,
            version = %backend.version,
            "Selected compiler backend"
        );
        Ok(backend.clone())
    }

    pub fn get(&self, kind: ChainKind) -> Option<&CompilerBackend> {
        self.backends.get(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompilerBackend> {
        self.backends.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> BackendRegistry {
        BackendRegistry::new([
            CompilerBackend::new(ChainKind::Standard, "0.8.23")
                .with_optimizer(Optimizer::enabled(200)),
            CompilerBackend::new(ChainKind::Rollup, "1.4.1")
                .with_optimizer(Optimizer::enabled(DEFAULT_OPTIMIZER_RUNS)),
        ])
        .unwrap()
    }

    #[test]
    fn test_select_by_kind() {
        let registry = registry();
        let profile = NetworkProfile::remote("era", 324, "https://mainnet.era.zksync.io")
            .with_kind(ChainKind::Rollup);

        let backend = registry.select(&profile).unwrap();
        assert_eq!(backend.kind, ChainKind::Rollup);
        assert_eq!(backend.version, "1.4.1");
    }

    #[test]
    fn test_select_is_deterministic() {
        let registry = registry();
        let profile = NetworkProfile::local("local", 31337);
        assert_eq!(
            registry.select(&profile).unwrap(),
            registry.select(&profile).unwrap()
        );
    }

    #[test]
    fn test_select_unsupported_kind() {
        let registry = BackendRegistry::new([CompilerBackend::new(ChainKind::Standard, "0.8.23")])
            .unwrap();
        let profile = NetworkProfile::local("zk-local", 270).with_kind(ChainKind::Rollup);

        match registry.select(&profile) {
            Err(ConfigError::UnsupportedNetworkKind { network, kind }) => {
                assert_eq!(network, "zk-local");
                assert_eq!(kind, ChainKind::Rollup);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_version_fails_fast() {
        let result = BackendRegistry::new([CompilerBackend::new(ChainKind::Standard, "0.8.99")]);
        assert!(matches!(
            result,
            Err(ConfigError::UnrecognizedCompilerVersion { kind: ChainKind::Standard, ref version })
                if version == "0.8.99"
        ));
    }

    #[test]
    fn test_version_checked_against_own_kind() {
        // a rollup version is not a standard version
        let result = BackendRegistry::new([CompilerBackend::new(ChainKind::Standard, "1.4.1")]);
        assert!(matches!(
            result,
            Err(ConfigError::UnrecognizedCompilerVersion { .. })
        ));
    }

    #[test]
    fn test_duplicate_kind_rejected() {
        let result = BackendRegistry::new([
            CompilerBackend::new(ChainKind::Standard, "0.8.23"),
            CompilerBackend::new(ChainKind::Standard, "0.8.24"),
        ]);
        assert!(matches!(
            result,
            Err(ConfigError::DuplicateBackend(ChainKind::Standard))
        ));
    }

    #[test]
    fn test_optimizer_runs() {
        assert_eq!(Optimizer::enabled(1000).effective_runs(), Some(1000));
        assert_eq!(Optimizer::disabled().effective_runs(), None);
    }
}
