//! Transport seam between the request bindings and an HTTP client.

use async_trait::async_trait;
use serde::Serialize;

/// Anything that can issue a GET or a JSON POST against the backend.
///
/// `path` is always relative to the backend root (for example
/// `/paper-trading/accounts`); resolving it to a full URL is the
/// implementor's job, as are auth headers, timeouts and body encoding.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Successful response handed back to the caller.
    type Response: Send;
    /// Failure handed back to the caller.
    type Error: Send;

    /// Issue a GET request.
    async fn get(&self, path: &str) -> Result<Self::Response, Self::Error>;

    /// Issue a POST request with `body` as its JSON payload.
    async fn post<B>(&self, path: &str, body: &B) -> Result<Self::Response, Self::Error>
    where
        B: Serialize + Sync + ?Sized;
}
