//! Output directories for compiled artifacts.
//!
//! Artifacts and cache directories carry a per-kind suffix so two backends
//! compiling the same sources never read each other's output. Sources and
//! tests are shared. Nothing here touches the filesystem.

use crate::backend::CompilerBackend;
use crate::error::{ConfigError, ConfigResult};
use crate::network::ChainKind;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

impl ChainKind {
    /// Suffix appended to artifact and cache directory names.
    pub const fn artifact_suffix(self) -> Option<&'static str> {
        match self {
            Self::Standard => None,
            Self::Rollup => Some("zk"),
        }
    }
}

/// Filesystem destinations for one backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactLayout {
    pub artifacts_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub sources_dir: PathBuf,
    pub tests_dir: PathBuf,
}

/// Base directory names, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutPolicy {
    pub artifacts: String,
    pub cache: String,
    pub sources: String,
    pub tests: String,
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self {
            artifacts: "artifacts".to_string(),
            cache: "cache".to_string(),
            sources: "contracts".to_string(),
            tests: "test".to_string(),
        }
    }
}

impl LayoutPolicy {
    /// Layout for `backend` under `project_root`.
    pub fn layout_for(&self, backend: &CompilerBackend, project_root: &Path) -> ArtifactLayout {
        self.layout_for_kind(backend.kind, project_root)
    }

    fn layout_for_kind(&self, kind: ChainKind, project_root: &Path) -> ArtifactLayout {
        ArtifactLayout {
            artifacts_dir: project_root.join(suffixed(relative_dir(&self.artifacts), kind)),
            cache_dir: project_root.join(suffixed(relative_dir(&self.cache), kind)),
            sources_dir: project_root.join(relative_dir(&self.sources)),
            tests_dir: project_root.join(relative_dir(&self.tests)),
        }
    }

    /// Check every base name and that no output directory is shared or
    /// nested inside another, across every chain kind.
    pub fn validate(&self) -> ConfigResult<()> {
        for (field, base) in [
            ("artifacts", &self.artifacts),
            ("cache", &self.cache),
            ("sources", &self.sources),
            ("tests", &self.tests),
        ] {
            check_base(field, base)?;
        }

        let root = Path::new("");
        let mut seen: Vec<(PathBuf, String)> = Vec::new();

        for kind in ChainKind::ALL {
            let layout = self.layout_for_kind(kind, root);
            for (role, path) in [
                ("artifacts", layout.artifacts_dir),
                ("cache", layout.cache_dir),
            ] {
                let owner = format!("{kind} {role}");
                let clash = seen
                    .iter()
                    .find(|(other, _)| path.starts_with(other) || other.starts_with(&path));
                if let Some((_, first)) = clash {
                    return Err(ConfigError::LayoutCollision {
                        path: path.display().to_string(),
                        first: first.clone(),
                        second: owner,
                    });
                }
                seen.push((path, owner));
            }
        }
        Ok(())
    }
}

/// Layout for `backend` under the default directory names.
pub fn layout_for(backend: &CompilerBackend, project_root: &Path) -> ArtifactLayout {
    LayoutPolicy::default().layout_for(backend, project_root)
}

/// `base` without `.` segments or trailing separators.
fn relative_dir(base: &str) -> PathBuf {
    Path::new(base)
        .components()
        .filter(|component| *component != Component::CurDir)
        .collect()
}

/// A base name must name a directory below the project root.
fn check_base(field: &'static str, base: &str) -> ConfigResult<()> {
    let invalid = |reason: &'static str| ConfigError::InvalidLayoutPath {
        field,
        value: base.to_string(),
        reason,
    };

    let mut named = false;
    for component in Path::new(base).components() {
        match component {
            Component::Normal(_) => named = true,
            Component::CurDir => {}
            Component::ParentDir => return Err(invalid("must not contain `..`")),
            Component::RootDir | Component::Prefix(_) => {
                return Err(invalid("must be relative to the project root"))
            }
        }
    }
    if !named {
        return Err(invalid("must name a directory"));
    }
    Ok(())
}

/// Append the kind suffix to the last path segment.
fn suffixed(dir: PathBuf, kind: ChainKind) -> PathBuf {
    let Some(suffix) = kind.artifact_suffix() else {
        return dir;
    };
    let name = match dir.file_name() {
        Some(name) => format!("{}-{suffix}", name.to_string_lossy()),
        None => return dir.join(suffix),
    };
    dir.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_do_not_share_output() {
        let root = Path::new("/project");
        let standard = layout_for(&CompilerBackend::new(ChainKind::Standard, "0.8.23"), root);
        let rollup = layout_for(&CompilerBackend::new(ChainKind::Rollup, "1.4.1"), root);

        assert_ne!(standard.artifacts_dir, rollup.artifacts_dir);
        assert_ne!(standard.cache_dir, rollup.cache_dir);
        assert_eq!(standard.sources_dir, rollup.sources_dir);
        assert_eq!(standard.tests_dir, rollup.tests_dir);
    }

    #[test]
    fn test_rollup_paths() {
        let layout = layout_for(
            &CompilerBackend::new(ChainKind::Rollup, "1.4.1"),
            Path::new("/project"),
        );
        assert_eq!(layout.artifacts_dir, PathBuf::from("/project/artifacts-zk"));
        assert_eq!(layout.cache_dir, PathBuf::from("/project/cache-zk"));
        assert_eq!(layout.sources_dir, PathBuf::from("/project/contracts"));
        assert_eq!(layout.tests_dir, PathBuf::from("/project/test"));
    }

    #[test]
    fn test_default_policy_is_valid() {
        assert!(LayoutPolicy::default().validate().is_ok());
    }

    #[test]
    fn test_shared_base_names_rejected() {
        let policy = LayoutPolicy {
            cache: "artifacts".to_string(),
            ..LayoutPolicy::default()
        };
        assert!(matches!(
            policy.validate(),
            Err(ConfigError::LayoutCollision { .. })
        ));
    }

    #[test]
    fn test_cross_kind_collision_rejected() {
        // standard artifacts would land in rollup cache
        let policy = LayoutPolicy {
            artifacts: "out-zk".to_string(),
            cache: "out".to_string(),
            ..LayoutPolicy::default()
        };
        match policy.validate() {
            Err(ConfigError::LayoutCollision { path, .. }) => assert_eq!(path, "out-zk"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_current_dir_prefix_still_collides() {
        let policy = LayoutPolicy {
            artifacts: "./out-zk".to_string(),
            cache: "out".to_string(),
            ..LayoutPolicy::default()
        };
        match policy.validate() {
            Err(ConfigError::LayoutCollision { path, .. }) => assert_eq!(path, "out-zk"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_trailing_separator_suffixes_directory_name() {
        let policy = LayoutPolicy {
            artifacts: "out/".to_string(),
            cache: "./cache/".to_string(),
            ..LayoutPolicy::default()
        };
        assert!(policy.validate().is_ok());

        let root = Path::new("/project");
        let standard = policy.layout_for(&CompilerBackend::new(ChainKind::Standard, "0.8.23"), root);
        let rollup = policy.layout_for(&CompilerBackend::new(ChainKind::Rollup, "1.4.1"), root);
        assert_eq!(standard.artifacts_dir, PathBuf::from("/project/out"));
        assert_eq!(rollup.artifacts_dir, PathBuf::from("/project/out-zk"));
        assert_eq!(rollup.cache_dir, PathBuf::from("/project/cache-zk"));
        assert!(!rollup.artifacts_dir.starts_with(&standard.artifacts_dir));
    }

    #[test]
    fn test_nested_output_rejected() {
        let policy = LayoutPolicy {
            artifacts: "out".to_string(),
            cache: "out/cache".to_string(),
            ..LayoutPolicy::default()
        };
        assert!(matches!(
            policy.validate(),
            Err(ConfigError::LayoutCollision { .. })
        ));
    }

    #[test]
    fn test_bad_base_names_rejected() {
        for (artifacts, reason) in [
            ("", "must name a directory"),
            ("./", "must name a directory"),
            ("../out", "must not contain `..`"),
            ("/tmp/out", "must be relative to the project root"),
        ] {
            let policy = LayoutPolicy {
                artifacts: artifacts.to_string(),
                ..LayoutPolicy::default()
            };
            match policy.validate() {
                Err(ConfigError::InvalidLayoutPath {
                    field,
                    reason: got,
                    ..
                }) => {
                    assert_eq!(field, "artifacts");
                    assert_eq!(got, reason);
                }
                other => panic!("unexpected result for {artifacts:?}: {other:?}"),
            }
        }
    }
}
