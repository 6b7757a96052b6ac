//! End-to-end configuration resolution.

use crate::backend::{BackendRegistry, CompilerBackend};
use crate::credential::{resolve_signer, Signer, SignerMaterial};
use crate::env::EnvSource;
use crate::error::ConfigResult;
use crate::layout::{ArtifactLayout, LayoutPolicy};
use crate::network::{NetworkProfile, NetworkRegistry};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Everything the build/deploy driver needs for one invocation.
///
/// Built once by [`Resolver::resolve`] and read-only afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedConfiguration {
    active_network: NetworkProfile,
    signer: Signer,
    backend: CompilerBackend,
    layout: ArtifactLayout,
}

impl ResolvedConfiguration {
    pub const fn active_network(&self) -> &NetworkProfile {
        &self.active_network
    }

    pub const fn signer(&self) -> &Signer {
        &self.signer
    }

    pub const fn backend(&self) -> &CompilerBackend {
        &self.backend
    }

    pub const fn layout(&self) -> &ArtifactLayout {
        &self.layout
    }

    /// RPC endpoint of the active network, after environment overrides.
    pub fn rpc_url(&self) -> Option<&str> {
        self.active_network.rpc_url.as_deref()
    }

    /// Whether a deployment can sign. Compilation never needs this.
    pub const fn can_deploy(&self) -> bool {
        self.signer.is_present()
    }

    /// Signer material, or `MissingSigner` naming the active network.
    pub fn require_signer(&self) -> ConfigResult<&SignerMaterial> {
        self.signer.require(&self.active_network.name)
    }
}

/// Network and backend registries plus the project layout.
#[derive(Debug, Clone)]
pub struct Resolver {
    networks: NetworkRegistry,
    backends: BackendRegistry,
    layout: LayoutPolicy,
    project_root: PathBuf,
}

impl Resolver {
    /// Resolver with the default layout policy.
    pub fn new(
        networks: NetworkRegistry,
        backends: BackendRegistry,
        project_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            networks,
            backends,
            layout: LayoutPolicy::default(),
            project_root: project_root.into(),
        }
    }

    /// Replace the layout policy, rejecting one whose outputs collide.
    pub fn with_layout_policy(mut self, layout: LayoutPolicy) -> ConfigResult<Self> {
        layout.validate()?;
        self.layout = layout;
        Ok(self)
    }

    pub const fn networks(&self) -> &NetworkRegistry {
        &self.networks
    }

    pub const fn backends(&self) -> &BackendRegistry {
        &self.backends
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Resolve the configuration for `network`, or the default network.
    ///
    /// Fails on the first violation without returning anything partial. A
    /// missing signer is not a failure.
    pub fn resolve(
        &self,
        network: Option<&str>,
        env: &impl EnvSource,
    ) -> ConfigResult<ResolvedConfiguration> {
        let active_network = self.networks.resolve(network)?.with_env_overrides(env)?;
        let backend = self.backends.select(&active_network)?;
        let signer = resolve_signer(&active_network, env);
        let layout = self.layout.layout_for(&backend, &self.project_root);

        info!(
            network = %active_network.name,
            chain_id = active_network.chain_id,
            backend = %backend.kind,
            version = %backend.version,
            signer = signer.is_present(),
            "Resolved configuration"
        );

        Ok(ResolvedConfiguration {
            active_network,
            signer,
            backend,
            layout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Optimizer;
    use crate::error::ConfigError;
    use crate::network::ChainKind;
    use std::collections::HashMap;

    const KEY: &str = "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

    fn resolver() -> Resolver {
        let networks = NetworkRegistry::new(
            [
                NetworkProfile::local("local", 31337),
                NetworkProfile::remote("amoy", 80002, "https://rpc-amoy.polygon.technology")
                    .with_signer_env("PRIVATE_KEY")
                    .with_rpc_env("RPC_URL"),
                NetworkProfile::remote("era-sepolia", 300, "https://sepolia.era.zksync.dev")
                    .with_kind(ChainKind::Rollup),
            ],
            "local",
        )
        .unwrap();
        let backends = BackendRegistry::new([CompilerBackend::new(ChainKind::Standard, "0.8.23")
            .with_optimizer(Optimizer::enabled(200))])
        .unwrap();
        Resolver::new(networks, backends, "/project")
    }

    #[test]
    fn test_default_network_without_env() {
        let config = resolver().resolve(None, &HashMap::<String, String>::new()).unwrap();
        assert_eq!(config.active_network().name, "local");
        assert_eq!(config.signer(), &Signer::Absent);
        assert!(!config.can_deploy());
        assert_eq!(config.rpc_url(), None);
    }

    #[test]
    fn test_override_with_env() {
        let env = [("PRIVATE_KEY", KEY), ("RPC_URL", "https://my-node.example")];
        let config = resolver().resolve(Some("amoy"), &env).unwrap();

        assert_eq!(config.active_network().chain_id, 80002);
        assert_eq!(config.rpc_url(), Some("https://my-node.example"));
        assert_eq!(config.require_signer().unwrap().expose(), format!("0x{KEY}"));
        assert_eq!(
            config.layout().artifacts_dir,
            PathBuf::from("/project/artifacts")
        );
    }

    #[test]
    fn test_missing_signer_deferred() {
        let empty: [(&str, &str); 0] = [];
        let config = resolver().resolve(Some("amoy"), &empty).unwrap();
        assert!(matches!(
            config.require_signer(),
            Err(ConfigError::MissingSigner { network }) if network == "amoy"
        ));
    }

    #[test]
    fn test_unsupported_kind_fails() {
        let empty: [(&str, &str); 0] = [];
        let result = resolver().resolve(Some("era-sepolia"), &empty);
        assert!(matches!(
            result,
            Err(ConfigError::UnsupportedNetworkKind { .. })
        ));
    }

    #[test]
    fn test_layout_policy_collision_rejected() {
        let policy = LayoutPolicy {
            cache: "artifacts".to_string(),
            ..LayoutPolicy::default()
        };
        assert!(resolver().with_layout_policy(policy).is_err());
    }
}
