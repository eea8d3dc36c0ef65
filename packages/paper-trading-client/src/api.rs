//! Request bindings for the `/paper-trading` endpoints.
//!
//! Each method issues exactly one request through the injected transport and
//! returns the transport's result as-is. Nothing is retried, cached or
//! validated here.

use serde::Serialize;

use crate::transport::HttpTransport;
use crate::types::{ActivateStrategyRequest, CreateAccountRequest};

/// Starting cash used when `create_account` is called without an amount.
///
/// Serialized as the JSON float `1000000.0`, numerically equal to `1000000`.
pub const DEFAULT_INITIAL_CASH: f64 = 1_000_000.0;

type Outcome<T> = Result<<T as HttpTransport>::Response, <T as HttpTransport>::Error>;

/// Paper-trading operations bound to a transport.
#[derive(Debug, Clone)]
pub struct PaperTradingApi<T> {
    transport: T,
}

impl<T: HttpTransport> PaperTradingApi<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Get the underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn get(&self, path: String) -> Outcome<T> {
        tracing::debug!(method = "GET", %path, "paper-trading request");
        self.transport.get(&path).await
    }

    async fn post<B>(&self, path: &str, body: &B) -> Outcome<T>
    where
        B: Serialize + Sync + ?Sized,
    {
        tracing::debug!(method = "POST", %path, "paper-trading request");
        self.transport.post(path, body).await
    }

    // ========================================================================
    // Accounts
    // ========================================================================

    /// Create a simulated account, defaulting to [`DEFAULT_INITIAL_CASH`]
    pub async fn create_account(&self, account_id: &str, initial_cash: Option<f64>) -> Outcome<T> {
        let request = CreateAccountRequest {
            account_id: account_id.to_string(),
            initial_cash: initial_cash.unwrap_or(DEFAULT_INITIAL_CASH),
        };
        self.post("/paper-trading/accounts", &request).await
    }

    /// Get an account by ID
    pub async fn get_account(&self, account_id: &str) -> Outcome<T> {
        self.get(format!("/paper-trading/accounts/{}", account_id)).await
    }

    // ========================================================================
    // Orders
    // ========================================================================

    /// Submit an order; the payload is forwarded verbatim
    pub async fn submit_order<B>(&self, order: &B) -> Outcome<T>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.post("/paper-trading/orders", order).await
    }

    /// List the orders of an account
    pub async fn get_orders(&self, account_id: &str) -> Outcome<T> {
        self.get(format!("/paper-trading/orders/{}", account_id)).await
    }

    // ========================================================================
    // Strategies
    // ========================================================================

    /// Create a strategy; the payload is forwarded verbatim
    pub async fn create_strategy<B>(&self, strategy: &B) -> Outcome<T>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.post("/paper-trading/strategies", strategy).await
    }

    /// List the strategies owned by a user
    pub async fn get_user_strategies(&self, user_id: &str) -> Outcome<T> {
        self.get(format!("/paper-trading/strategies/user/{}", user_id)).await
    }

    /// Get a strategy by ID
    pub async fn get_strategy(&self, strategy_id: &str) -> Outcome<T> {
        self.get(format!("/paper-trading/strategies/{}", strategy_id)).await
    }

    /// Activate or deactivate a strategy
    pub async fn activate_strategy(&self, strategy_id: &str, is_active: bool) -> Outcome<T> {
        let request = ActivateStrategyRequest {
            strategy_id: strategy_id.to_string(),
            is_active,
        };
        self.post("/paper-trading/strategies/activate", &request).await
    }

    /// Get run statistics for a strategy
    pub async fn get_strategy_performance(&self, strategy_id: &str) -> Outcome<T> {
        self.get(format!("/paper-trading/strategies/{}/performance", strategy_id))
            .await
    }
}
