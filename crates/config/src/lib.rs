//! Build and deployment configuration for contract projects.
//!
//! This crate provides:
//! - Network profiles and the registry the active network is picked from
//! - Compiler backend selection per chain kind
//! - Signer resolution from the environment
//! - Artifact layout per backend
//! - Project file loading and the built-in sample registry

pub mod backend;
pub mod credential;
pub mod env;
pub mod error;
pub mod layout;
pub mod network;
pub mod presets;
pub mod project;
pub mod resolve;

pub use backend::{BackendRegistry, CompilerBackend, CompilerSource, Optimizer};
pub use credential::{resolve_signer, Signer, SignerMaterial};
pub use env::{EnvSource, ProcessEnv};
pub use error::{ConfigError, ConfigResult};
pub use layout::{layout_for, ArtifactLayout, LayoutPolicy};
pub use network::{ChainKind, NetworkProfile, NetworkRegistry, SignerSource};
pub use project::ProjectConfig;
pub use resolve::{ResolvedConfiguration, Resolver};
