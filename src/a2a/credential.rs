//! Request-scoped credential carrier.
//!
//! The `X-API-Key` header is read by the HTTP middleware and made available
//! to the agent executor without threading it through handler signatures.
//! The key lives in a tokio task-local, so every request task only ever sees
//! the key established on its own call chain.
//!
//! Tasks started with `tokio::spawn` do not inherit the scope. Code that needs
//! the credential must run on the request task (or re-establish the scope).

use std::fmt;
use std::future::Future;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Header the caller's API key is read from.
pub const API_KEY_HEADER: &str = "x-api-key";

tokio::task_local! {
    static API_KEY: ApiKey;
}

/// Caller-supplied API key. Wiped from memory on drop, redacted in `Debug`.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key, for building the outbound `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

impl From<&str> for ApiKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Run `future` with `key` as the ambient credential.
///
/// The scope follows the future across `.await` points and ends when it
/// completes or is dropped. An enclosing scope is shadowed for the duration.
pub async fn with_credential<F>(key: ApiKey, future: F) -> F::Output
where
    F: Future,
{
    API_KEY.scope(key, future).await
}

/// The credential of the innermost active scope, `None` outside any scope.
pub fn current_credential() -> Option<ApiKey> {
    API_KEY.try_with(ApiKey::clone).ok()
}
