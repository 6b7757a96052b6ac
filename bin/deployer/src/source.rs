use config::{presets, Resolver};
use std::path::{Path, PathBuf};
use tracing::info;

/// Project file picked up from the working directory when none is given.
pub const DEFAULT_PROJECT_FILE: &str = "deploy.toml";

/// Where the network and backend registries come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// A project file
    File(PathBuf),
    /// The built-in sample registry, rooted at the given directory
    Sample(PathBuf),
}

impl ConfigSource {
    /// Explicit path if given, else `deploy.toml` in `cwd` if present, else
    /// the sample registry.
    pub fn discover(explicit: Option<PathBuf>, cwd: &Path) -> Self {
        if let Some(path) = explicit {
            return Self::File(path);
        }
        let candidate = cwd.join(DEFAULT_PROJECT_FILE);
        if candidate.is_file() {
            Self::File(candidate)
        } else {
            Self::Sample(cwd.to_path_buf())
        }
    }
}

pub fn load_resolver(source: &ConfigSource) -> eyre::Result<Resolver> {
    match source {
        ConfigSource::File(path) => {
            info!(path = %path.display(), "Loading project file");
            Ok(Resolver::from_file(path)?)
        }
        ConfigSource::Sample(root) => {
            info!("No project file found, using the built-in sample registry");
            Ok(presets::resolver(root)?)
        }
    }
}
