//! Paper trading CLI - command line access to the paper-trading backend.
//!
//! Every subcommand issues one request and prints the backend's `data` as
//! pretty JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use paper_trading_client::{
    ApiEnvelope, ClientConfig, OrderRequest, OrderSide, OrderType, PaperTradingApi, RestClient,
    StrategyRequest,
};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "paper-trading")]
#[command(about = "Paper trading CLI - accounts, orders and strategies")]
#[command(version)]
struct Cli {
    /// Backend root URL (overrides config and environment)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Account commands
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// Order commands
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Strategy commands
    Strategy {
        #[command(subcommand)]
        action: StrategyAction,
    },
}

#[derive(Subcommand)]
enum AccountAction {
    /// Create a simulated account
    Create {
        /// Account ID
        id: String,
        /// Starting cash (defaults to 1,000,000)
        #[arg(short, long)]
        cash: Option<f64>,
    },
    /// Get account balances and positions
    Get {
        /// Account ID
        id: String,
    },
}

#[derive(Subcommand)]
enum OrderAction {
    /// Submit an order
    Submit {
        /// Account ID
        #[arg(short, long)]
        account: String,
        /// Stock symbol
        #[arg(short, long)]
        symbol: String,
        /// Buy or sell
        #[arg(long, value_enum)]
        side: OrderSide,
        /// Number of shares
        #[arg(short = 'n', long)]
        quantity: i64,
        /// Market or limit
        #[arg(long, value_enum, default_value = "market")]
        order_type: OrderType,
        /// Limit price
        #[arg(short, long)]
        price: Option<f64>,
        /// Strategy the order belongs to
        #[arg(long)]
        strategy: Option<String>,
    },
    /// List orders of an account
    List {
        /// Account ID
        account: String,
    },
}

#[derive(Subcommand)]
enum StrategyAction {
    /// Create a strategy
    Create {
        /// Owning user ID
        #[arg(short, long)]
        user: String,
        /// Strategy name
        #[arg(short, long)]
        name: String,
        /// Free-form description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Strategy type
        #[arg(short = 't', long = "type", default_value = "custom")]
        strategy_type: String,
        /// Parameters as a JSON object
        #[arg(long)]
        params: Option<String>,
    },
    /// List strategies of a user
    List {
        /// User ID
        user: String,
    },
    /// Get strategy details
    Get {
        /// Strategy ID
        id: String,
    },
    /// Activate a strategy
    Activate {
        /// Strategy ID
        id: String,
    },
    /// Deactivate a strategy
    Deactivate {
        /// Strategy ID
        id: String,
    },
    /// Get strategy run statistics
    Performance {
        /// Strategy ID
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => ClientConfig::load_required(path)?
            .with_overrides(|key| std::env::var(key).ok()),
        None => ClientConfig::load()?,
    };
    if let Some(url) = cli.base_url {
        config.base_url = url;
    }

    tracing::debug!("Using backend at {}", config.base_url);
    let api = PaperTradingApi::new(RestClient::from_config(&config)?);

    let response = match cli.command {
        Commands::Account { action } => handle_account(&api, action).await?,
        Commands::Order { action } => handle_order(&api, action).await?,
        Commands::Strategy { action } => handle_strategy(&api, action).await?,
    };

    let envelope = ApiEnvelope::<Value>::from_value(response)?;
    let output = if envelope.data.is_some() {
        envelope.into_data()?
    } else {
        envelope.into_success()?;
        serde_json::json!({ "success": true })
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn handle_account(api: &PaperTradingApi<RestClient>, action: AccountAction) -> Result<Value> {
    let response = match action {
        AccountAction::Create { id, cash } => api.create_account(&id, cash).await?,
        AccountAction::Get { id } => api.get_account(&id).await?,
    };
    Ok(response)
}

async fn handle_order(api: &PaperTradingApi<RestClient>, action: OrderAction) -> Result<Value> {
    let response = match action {
        OrderAction::Submit {
            account,
            symbol,
            side,
            quantity,
            order_type,
            price,
            strategy,
        } => {
            let order = OrderRequest {
                order_type,
                price,
                strategy_id: strategy,
                ..OrderRequest::market(&account, &symbol, side, quantity)
            };
            api.submit_order(&order).await?
        }
        OrderAction::List { account } => api.get_orders(&account).await?,
    };
    Ok(response)
}

async fn handle_strategy(
    api: &PaperTradingApi<RestClient>,
    action: StrategyAction,
) -> Result<Value> {
    let response = match action {
        StrategyAction::Create {
            user,
            name,
            description,
            strategy_type,
            params,
        } => {
            let parameters = params
                .map(|raw| serde_json::from_str::<Value>(&raw))
                .transpose()
                .context("--params must be valid JSON")?;
            let strategy = StrategyRequest {
                description,
                strategy_type,
                parameters,
                ..StrategyRequest::new(&user, &name)
            };
            api.create_strategy(&strategy).await?
        }
        StrategyAction::List { user } => api.get_user_strategies(&user).await?,
        StrategyAction::Get { id } => api.get_strategy(&id).await?,
        StrategyAction::Activate { id } => api.activate_strategy(&id, true).await?,
        StrategyAction::Deactivate { id } => api.activate_strategy(&id, false).await?,
        StrategyAction::Performance { id } => api.get_strategy_performance(&id).await?,
    };
    Ok(response)
}
