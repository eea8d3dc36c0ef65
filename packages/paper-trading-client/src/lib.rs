//! Paper Trading Client - HTTP bindings for the paper-trading backend.
//!
//! This crate maps each paper-trading operation onto exactly one REST call:
//!
//! - **Accounts**: create a simulated account, fetch its balances
//! - **Orders**: submit an order, list an account's orders
//! - **Strategies**: create, list, inspect, (de)activate, performance
//!
//! Requests go through an injected [`HttpTransport`]. Whatever the transport
//! returns, success or failure, is handed back to the caller untouched.
//!
//! # Example
//!
//! ```rust,no_run
//! use paper_trading_client::{ClientConfig, PaperTradingApi, RestClient};
//!
//! # async fn run() -> paper_trading_client::Result<()> {
//! let config = ClientConfig::load()?;
//! let api = PaperTradingApi::new(RestClient::from_config(&config)?);
//!
//! // POST /paper-trading/accounts with the default 1,000,000 starting cash
//! let account = api.create_account("acc1", None).await?;
//! println!("{}", account);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod transport;
pub mod types;

pub use api::{PaperTradingApi, DEFAULT_INITIAL_CASH};
pub use client::RestClient;
pub use config::ClientConfig;
pub use transport::HttpTransport;
pub use types::{
    Account, ActivateStrategyRequest, ApiEnvelope, CreateAccountRequest, CreatedStrategy, Order,
    OrderRequest, OrderSide, OrderStatus, OrderType, Position, StrategyExecution,
    StrategyPerformance, StrategyRecord, StrategyRequest,
};

/// Error types for paper-trading client operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request failed: {status} {body}")]
    Status { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result type for paper-trading client operations.
pub type Result<T> = std::result::Result<T, Error>;
