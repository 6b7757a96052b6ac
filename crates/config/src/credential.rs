//! Signer resolution from the environment.
//!
//! A missing key is not an error here. Resolution yields [`Signer::Absent`]
//! and the operation that actually needs to sign reports
//! [`ConfigError::MissingSigner`] through [`Signer::require`].

use crate::env::EnvSource;
use crate::error::{ConfigError, ConfigResult};
use crate::network::{NetworkProfile, SignerSource};
use serde::{Serialize, Serializer};
use std::fmt;
use tracing::debug;

/// Canonical hex prefix of a private key.
pub const HEX_PREFIX: &str = "0x";

/// Normalized private key material.
///
/// `Debug` and `Serialize` never reveal the key.
#[derive(Clone, PartialEq, Eq)]
pub struct SignerMaterial(String);

impl SignerMaterial {
    /// Normalize a raw key: trim whitespace and ensure exactly one `0x` prefix.
    ///
    /// Returns `None` for an empty key. Normalizing an already normalized key
    /// returns it unchanged.
    pub fn normalize(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let body = trimmed
            .strip_prefix(HEX_PREFIX)
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if body.is_empty() {
            return None;
        }
        Some(Self(format!("{HEX_PREFIX}{body}")))
    }

    /// The normalized key. Do not log the returned value.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SignerMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SignerMaterial(<redacted>)")
    }
}

/// Resolved signer, or the marker that none is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signer {
    Present(SignerMaterial),
    Absent,
}

impl Signer {
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    pub const fn material(&self) -> Option<&SignerMaterial> {
        match self {
            Self::Present(material) => Some(material),
            Self::Absent => None,
        }
    }

    /// Signer material for an operation that must sign on `network`.
    pub fn require(&self, network: &str) -> ConfigResult<&SignerMaterial> {
        self.material().ok_or_else(|| ConfigError::MissingSigner {
            network: network.to_string(),
        })
    }
}

impl Serialize for Signer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Present(_) => serializer.serialize_str("<redacted>"),
            Self::Absent => serializer.serialize_none(),
        }
    }
}

/// Resolve the signer for `profile`.
///
/// Profiles with [`SignerSource::None`] never read the environment.
pub fn resolve_signer(profile: &NetworkProfile, env: &impl EnvSource) -> Signer {
    let key = match &profile.signer_source {
        SignerSource::None => return Signer::Absent,
        SignerSource::FromEnvKey(key) => key,
    };

    match env.var(key).as_deref().and_then(SignerMaterial::normalize) {
        Some(material) => {
            debug!(network = %profile.name, env = %key, "Signer loaded from environment");
            Signer::Present(material)
        }
        None => {
            debug!(network = %profile.name, env = %key, "No signer in environment");
            Signer::Absent
        }
    }
}
