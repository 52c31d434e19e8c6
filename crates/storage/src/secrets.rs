//! Secure credential store for the session token
//!
//! One token slot per installation, backed by the platform credential vault.
//! The store is internally serialized so overlapping save/get/delete calls
//! never race, and the blocking vault calls run on the blocking pool.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

/// Fixed account identifier for the single token slot.
const TOKEN_KEY: &str = "nexa_jwt_token";

/// Fixed service identifier scoping entries to this application.
const SERVICE: &str = "com.nexa.NexaDemo";

/// Secret store error types
#[derive(Debug, Error)]
pub enum SecretStoreError {
    /// Platform credential vault error
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    /// Background task failed before completing the vault call
    #[error("Storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Result type for secret store operations
pub type Result<T> = std::result::Result<T, SecretStoreError>;

/// Storage contract for the single persisted session token.
///
/// `save` fully replaces any previous value, `get` returns `None` when no
/// token has ever been saved (or after a delete), and `delete` is idempotent.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Persist the token, replacing any previously stored value
    async fn save(&self, token: &str) -> Result<()>;

    /// Retrieve the stored token, if any
    async fn get(&self) -> Result<Option<String>>;

    /// Remove the stored token
    async fn delete(&self) -> Result<()>;
}

/// Secret store backed by the OS credential vault
///
/// Entries survive process restarts but not app removal. All operations
/// serialize through an internal lock so the vault never sees interleaved
/// writes for the token slot.
pub struct KeyringStore {
    service: String,
    account: String,
    lock: Mutex<()>,
}

impl KeyringStore {
    /// Create a store using the application's fixed service/account identifiers
    pub fn new() -> Self {
        Self::with_identity(SERVICE, TOKEN_KEY)
    }

    /// Create a store with custom identifiers (separate slot, e.g. for dev builds)
    pub fn with_identity(service: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            account: account.into(),
            lock: Mutex::new(()),
        }
    }

    fn entry(service: &str, account: &str) -> std::result::Result<keyring::Entry, keyring::Error> {
        keyring::Entry::new(service, account)
    }
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SecretStore for KeyringStore {
    async fn save(&self, token: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let (service, account) = (self.service.clone(), self.account.clone());
        let token = token.to_string();

        tokio::task::spawn_blocking(move || -> Result<()> {
            let entry = Self::entry(&service, &account)?;
            // Delete-then-insert: never leaves a merged or partially
            // overwritten value behind on vault backends without upsert.
            match entry.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => {}
                Err(e) => return Err(e.into()),
            }
            entry.set_password(&token)?;
            tracing::debug!("session token saved");
            Ok(())
        })
        .await?
    }

    async fn get(&self) -> Result<Option<String>> {
        let _guard = self.lock.lock().await;
        let (service, account) = (self.service.clone(), self.account.clone());

        tokio::task::spawn_blocking(move || -> Result<Option<String>> {
            let entry = Self::entry(&service, &account)?;
            match entry.get_password() {
                Ok(token) => Ok(Some(token)),
                Err(keyring::Error::NoEntry) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await?
    }

    async fn delete(&self) -> Result<()> {
        let _guard = self.lock.lock().await;
        let (service, account) = (self.service.clone(), self.account.clone());

        tokio::task::spawn_blocking(move || -> Result<()> {
            let entry = Self::entry(&service, &account)?;
            match entry.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => {
                    tracing::debug!("session token cleared");
                    Ok(())
                }
                Err(e) => Err(e.into()),
            }
        })
        .await?
    }
}

/// In-memory secret store for tests and simulator builds
#[derive(Default)]
pub struct MemoryStore {
    token: Mutex<Option<String>>,
}

impl MemoryStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an in-memory store pre-seeded with a token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    /// Wrap in an `Arc<dyn SecretStore>` for injection
    pub fn shared(self) -> Arc<dyn SecretStore> {
        Arc::new(self)
    }
}

#[async_trait]
impl SecretStore for MemoryStore {
    async fn save(&self, token: &str) -> Result<()> {
        *self.token.lock().await = Some(token.to_string());
        Ok(())
    }

    async fn get(&self) -> Result<Option<String>> {
        Ok(self.token.lock().await.clone())
    }

    async fn delete(&self) -> Result<()> {
        *self.token.lock().await = None;
        Ok(())
    }
}
