//! API key storage.
//!
//! The key lives in the OS keychain (macOS Keychain, Windows Credential
//! Manager, Secret Service on Linux). Read and write failures are logged and
//! otherwise treated as "no key".

use parking_lot::Mutex;

pub const KEYRING_SERVICE: &str = "support-chat";

pub trait CredentialStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, key: &str);
}

/// Keychain-backed store for one variant's key.
pub struct KeyringStore {
    key_name: String,
}

impl KeyringStore {
    pub fn new(key_name: impl Into<String>) -> Self {
        Self {
            key_name: key_name.into(),
        }
    }

    fn entry(&self) -> keyring::Result<keyring::Entry> {
        keyring::Entry::new(KEYRING_SERVICE, &self.key_name)
    }
}

impl CredentialStore for KeyringStore {
    fn get(&self) -> Option<String> {
        let result = self.entry().and_then(|entry| entry.get_password());
        match result {
            Ok(key) if !key.trim().is_empty() => Some(key),
            Ok(_) => None,
            Err(keyring::Error::NoEntry) => {
                tracing::debug!(key = %self.key_name, "no stored API key");
                None
            }
            Err(e) => {
                tracing::warn!(key = %self.key_name, "keychain read failed: {}", e);
                None
            }
        }
    }

    fn set(&self, key: &str) {
        let result = self.entry().and_then(|entry| entry.set_password(key));
        match result {
            Ok(()) => tracing::info!(key = %self.key_name, "API key saved to keychain"),
            Err(e) => tracing::warn!(key = %self.key_name, "keychain write failed: {}", e),
        }
    }
}

/// Process-local store that lives for one session; nothing is persisted.
#[derive(Default)]
pub struct MemoryStore {
    value: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(key.into())),
        }
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self) -> Option<String> {
        self.value.lock().clone().filter(|k| !k.trim().is_empty())
    }

    fn set(&self, key: &str) {
        *self.value.lock() = Some(key.to_string());
    }
}

/// Resolve the session key: the stored key, or `default` written back on first run.
pub fn resolve_api_key(store: &dyn CredentialStore, default: Option<&str>) -> Option<String> {
    if let Some(key) = store.get() {
        return Some(key);
    }
    let default = default.filter(|k| !k.trim().is_empty())?;
    store.set(default);
    tracing::info!("seeded secure storage with the configured default key");
    Some(default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_run_persists_default() {
        let store = MemoryStore::new();
        assert!(store.get().is_none());

        let key = resolve_api_key(&store, Some("seed-key"));
        assert_eq!(key.as_deref(), Some("seed-key"));
        assert_eq!(store.get().as_deref(), Some("seed-key"));
    }

    #[test]
    fn test_stored_key_wins_over_default() {
        let store = MemoryStore::with_key("stored");
        let key = resolve_api_key(&store, Some("seed-key"));
        assert_eq!(key.as_deref(), Some("stored"));
        assert_eq!(store.get().as_deref(), Some("stored"));
    }

    #[test]
    fn test_no_key_anywhere() {
        let store = MemoryStore::new();
        assert!(resolve_api_key(&store, None).is_none());
        assert!(resolve_api_key(&store, Some("  ")).is_none());
        assert!(store.get().is_none());
    }
}
