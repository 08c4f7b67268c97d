use async_trait::async_trait;
use managersol_core::{AppResult, Principal};

/// Persistence port for a client-side key-value session store.
///
/// Reads and writes are synchronous: route guards must be able to resolve
/// the session before the first paint of protected content, with no
/// suspension point in between. The store is single-writer (only login and
/// logout mutate it) and every reader re-reads the raw value, so no change
/// notification mechanism is part of the port.
pub trait SessionStore: Send + Sync {
    /// Returns the raw value stored under `key`, if present.
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: &str) -> AppResult<()>;

    /// Removes the value stored under `key`, if any.
    fn remove(&self, key: &str) -> AppResult<()>;
}

/// Gateway port for the backend authentication endpoint.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchanges credentials for an authenticated principal.
    ///
    /// Returns `AppError::Unauthorized` when the backend rejects the
    /// credentials.
    async fn login(&self, email: &str, password: &str) -> AppResult<Principal>;
}
