//! Request payloads and response shapes of the paper-trading backend.

use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

use crate::{Error, Result};

// ============================================================================
// Requests
// ============================================================================

/// Body of `POST /paper-trading/accounts`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateAccountRequest {
    pub account_id: String,
    pub initial_cash: f64,
}

/// Body of `POST /paper-trading/strategies/activate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivateStrategyRequest {
    pub strategy_id: String,
    pub is_active: bool,
}

/// Order side
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

/// Order type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    #[default]
    Market,
    Limit,
}

/// Order lifecycle status as reported by the backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Submitted,
    PartialFilled,
    Filled,
    Cancelled,
    Rejected,
}

/// Order payload accepted by `POST /paper-trading/orders`.
///
/// Any other `Serialize` value may be submitted instead; the backend owns
/// the schema and nothing here is validated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderRequest {
    pub account_id: String,
    pub symbol: String,
    pub side: OrderSide,
    pub quantity: i64,
    #[serde(default)]
    pub order_type: OrderType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy_id: Option<String>,
}

impl OrderRequest {
    /// Market order with no strategy attached.
    pub fn market(account_id: &str, symbol: &str, side: OrderSide, quantity: i64) -> Self {
        Self {
            account_id: account_id.to_string(),
            symbol: symbol.to_string(),
            side,
            quantity,
            order_type: OrderType::Market,
            price: None,
            strategy_id: None,
        }
    }

    /// Limit order at `price`.
    pub fn limit(
        account_id: &str,
        symbol: &str,
        side: OrderSide,
        quantity: i64,
        price: f64,
    ) -> Self {
        Self {
            order_type: OrderType::Limit,
            price: Some(price),
            ..Self::market(account_id, symbol, side, quantity)
        }
    }
}

/// Strategy payload accepted by `POST /paper-trading/strategies`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StrategyRequest {
    pub user_id: String,
    pub strategy_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_strategy_type")]
    pub strategy_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

fn default_strategy_type() -> String {
    "custom".to_string()
}

impl StrategyRequest {
    /// Custom strategy with an empty description and no parameters.
    pub fn new(user_id: &str, strategy_name: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            strategy_name: strategy_name.to_string(),
            description: String::new(),
            strategy_type: default_strategy_type(),
            parameters: None,
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

/// `{success, data}` wrapper the backend puts around every response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl<T: DeserializeOwned> ApiEnvelope<T> {
    /// Decode a raw JSON response.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

impl<T> ApiEnvelope<T> {
    /// Unwrap `data`, failing when the backend reported no success.
    pub fn into_data(self) -> Result<T> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(Error::Backend("response carried no data".to_string())),
            (false, _) => Err(Error::Backend(
                self.detail
                    .unwrap_or_else(|| "request unsuccessful".to_string()),
            )),
        }
    }

    /// Check the success flag of a response that carries no data.
    pub fn into_success(self) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            Err(Error::Backend(
                self.detail
                    .unwrap_or_else(|| "request unsuccessful".to_string()),
            ))
        }
    }
}

/// A held position inside a simulated account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub symbol: String,
    pub quantity: i64,
    pub cost_basis: f64,
    pub average_price: f64,
    pub updated_time: NaiveDateTime,
}

/// Simulated account snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub account_id: String,
    pub initial_cash: f64,
    pub cash: f64,
    pub total_value: f64,
    pub total_pnl: f64,
    /// Return on initial cash, in percent
    pub return_pct: f64,
    #[serde(default)]
    pub positions: HashMap<String, Position>,
    #[serde(default)]
    pub trade_count: u64,
    pub created_time: NaiveDateTime,
    pub updated_time: NaiveDateTime,
}

/// Order as recorded by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub order_id: String,
    pub symbol: String,
    pub side: OrderSide,
    pub quantity: i64,
    pub order_type: OrderType,
    pub price: Option<f64>,
    pub strategy_id: Option<String>,
    pub status: OrderStatus,
    pub filled_quantity: i64,
    pub average_price: f64,
    pub commission: f64,
    pub created_time: NaiveDateTime,
    pub updated_time: NaiveDateTime,
    pub filled_time: Option<NaiveDateTime>,
}

impl Order {
    pub fn is_filled(&self) -> bool {
        self.status == OrderStatus::Filled
    }
}

/// Returned by strategy creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreatedStrategy {
    pub strategy_id: String,
}

/// Stored strategy definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StrategyRecord {
    pub strategy_id: String,
    pub user_id: String,
    pub strategy_name: String,
    pub description: Option<String>,
    pub strategy_type: String,
    #[serde(default)]
    pub parameters: serde_json::Value,
    /// Stored as 0/1 by the backend
    #[serde(deserialize_with = "bool_or_int")]
    pub is_active: bool,
    pub created_time: NaiveDateTime,
    pub updated_time: NaiveDateTime,
    pub last_run_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub total_runs: u64,
    #[serde(default)]
    pub total_profit: f64,
    #[serde(default)]
    pub win_rate: f64,
}

/// One recorded strategy run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StrategyExecution {
    pub strategy_id: String,
    pub execution_time: NaiveDateTime,
    pub status: String,
    /// JSON-encoded list of symbols, as stored
    pub selected_stocks: Option<String>,
    #[serde(default)]
    pub profit_loss: f64,
    pub error_message: Option<String>,
}

/// Aggregate run statistics for a strategy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StrategyPerformance {
    pub strategy_id: String,
    pub total_runs: u64,
    pub successful_runs: u64,
    /// Percentage of successful runs
    pub success_rate: f64,
    pub total_profit: f64,
    #[serde(default)]
    pub recent_executions: Vec<StrategyExecution>,
}

fn bool_or_int<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(i) => i != 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_request_market_omits_price() {
        let order = OrderRequest::market("acc1", "600000.SH", OrderSide::Buy, 100);
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(
            value,
            json!({
                "account_id": "acc1",
                "symbol": "600000.SH",
                "side": "buy",
                "quantity": 100,
                "order_type": "market",
            })
        );
    }

    #[test]
    fn test_order_request_limit() {
        let order = OrderRequest::limit("acc1", "AAPL", OrderSide::Sell, 5, 180.5);
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["order_type"], "limit");
        assert_eq!(value["side"], "sell");
        assert_eq!(value["price"], 180.5);
    }

    #[test]
    fn test_strategy_request_defaults() {
        let request: StrategyRequest =
            serde_json::from_value(json!({"user_id": "u1", "strategy_name": "dip"})).unwrap();
        assert_eq!(request, StrategyRequest::new("u1", "dip"));
        assert_eq!(request.strategy_type, "custom");
    }

    #[test]
    fn test_account_envelope() {
        let raw = json!({
            "success": true,
            "data": {
                "account_id": "acc1",
                "initial_cash": 1000000.0,
                "cash": 998996.7,
                "total_value": 999996.7,
                "total_pnl": -3.3,
                "return_pct": -0.00033,
                "positions": {
                    "AAPL": {
                        "symbol": "AAPL",
                        "quantity": 100,
                        "cost_basis": 1000.0,
                        "average_price": 10.0,
                        "updated_time": "2024-03-01T09:30:00.123456"
                    }
                },
                "trade_count": 1,
                "created_time": "2024-03-01T09:00:00",
                "updated_time": "2024-03-01T09:30:00.123456"
            }
        });

        let account = ApiEnvelope::<Account>::from_value(raw)
            .unwrap()
            .into_data()
            .unwrap();
        assert_eq!(account.account_id, "acc1");
        assert_eq!(account.trade_count, 1);
        assert_eq!(account.positions["AAPL"].quantity, 100);
    }

    #[test]
    fn test_order_list_envelope() {
        let raw = json!({
            "success": true,
            "data": [{
                "order_id": "acc1_1a2b3c4d",
                "symbol": "AAPL",
                "side": "buy",
                "quantity": 100,
                "order_type": "market",
                "price": null,
                "strategy_id": null,
                "status": "filled",
                "filled_quantity": 100,
                "average_price": 10.0,
                "commission": 0.3,
                "created_time": "2024-03-01T09:30:00",
                "updated_time": "2024-03-01T09:30:00",
                "filled_time": "2024-03-01T09:30:00"
            }]
        });

        let orders = ApiEnvelope::<Vec<Order>>::from_value(raw)
            .unwrap()
            .into_data()
            .unwrap();
        assert_eq!(orders.len(), 1);
        assert!(orders[0].is_filled());
        assert_eq!(orders[0].order_type, OrderType::Market);
    }

    #[test]
    fn test_strategy_record_int_flag() {
        let raw = json!({
            "id": 7,
            "strategy_id": "strategy_1a2b3c4d",
            "user_id": "u1",
            "strategy_name": "dip",
            "description": "",
            "strategy_type": "custom",
            "parameters": {"threshold": 0.05},
            "is_active": 1,
            "created_time": "2024-03-01T09:00:00",
            "updated_time": "2024-03-01T09:00:00",
            "last_run_time": null,
            "total_runs": 0,
            "total_profit": 0.0,
            "win_rate": 0.0
        });

        let record: StrategyRecord = serde_json::from_value(raw).unwrap();
        assert!(record.is_active);
        assert_eq!(record.parameters["threshold"], 0.05);
    }

    #[test]
    fn test_performance_decodes() {
        let raw = json!({
            "success": true,
            "data": {
                "strategy_id": "s1",
                "total_runs": 2,
                "successful_runs": 1,
                "success_rate": 50.0,
                "total_profit": 120.5,
                "recent_executions": [{
                    "id": 3,
                    "strategy_id": "s1",
                    "execution_time": "2024-03-02T15:00:00",
                    "status": "success",
                    "selected_stocks": "[\"AAPL\"]",
                    "profit_loss": 120.5,
                    "error_message": null
                }]
            }
        });

        let perf = ApiEnvelope::<StrategyPerformance>::from_value(raw)
            .unwrap()
            .into_data()
            .unwrap();
        assert_eq!(perf.successful_runs, 1);
        assert_eq!(perf.recent_executions[0].status, "success");
    }

    #[test]
    fn test_unsuccessful_envelope() {
        let raw = json!({"detail": "Strategy not found"});
        let result = ApiEnvelope::<()>::from_value(raw).unwrap().into_success();
        match result {
            Err(Error::Backend(msg)) => assert_eq!(msg, "Strategy not found"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_activation_envelope_success() {
        let envelope = ApiEnvelope::<()>::from_value(json!({"success": true})).unwrap();
        assert!(envelope.into_success().is_ok());
    }

    #[test]
    fn test_missing_data_is_an_error() {
        let envelope =
            ApiEnvelope::<CreatedStrategy>::from_value(json!({"success": true})).unwrap();
        assert!(matches!(envelope.into_data(), Err(Error::Backend(_))));
    }
}
