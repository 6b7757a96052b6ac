//! Read-only view of environment variables.

use std::collections::HashMap;
use std::hash::BuildHasher;

/// A source of environment variables.
///
/// Resolution only ever reads from it. Tests pass a map or an array of pairs
/// instead of touching the process environment.
pub trait EnvSource {
    /// Value of `key`, or `None` if unset or not valid unicode.
    fn var(&self, key: &str) -> Option<String>;
}

/// The environment of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}

impl<S: BuildHasher> EnvSource for HashMap<String, String, S> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<const N: usize> EnvSource for [(&str, &str); N] {
    fn var(&self, key: &str) -> Option<String> {
        self.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| (*v).to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_lookup() {
        let env = [("PRIVATE_KEY", "abc"), ("RPC_URL", "http://localhost:8545")];
        assert_eq!(env.var("RPC_URL").as_deref(), Some("http://localhost:8545"));
        assert_eq!(env.var("MISSING"), None);
    }

    #[test]
    fn test_map_lookup_through_reference() {
        let mut env = HashMap::new();
        env.insert("PRIVATE_KEY".to_string(), "abc".to_string());
        let by_ref = &env;
        assert_eq!(by_ref.var("PRIVATE_KEY").as_deref(), Some("abc"));
    }
}
