#![allow(dead_code)]

/// Six-digit KRX ticker, e.g. "005930" for Samsung Electronics.
pub type StockCode = String;

/// Entry from the symbol master list.
#[derive(Clone, Debug, PartialEq)]
pub struct Stock {
    pub code: StockCode,
    pub name: String,
    pub market: Option<String>,
}

/// Account-level numbers for the dashboard KPI row, all in whole KRW.
#[derive(Clone, Debug, PartialEq)]
pub struct AccountSummary {
    pub account_no: String,
    pub total_asset: i64,
    pub available_cash: i64,
    pub total_purchase: i64,
    pub total_eval: i64,
    pub total_profit: i64,
    pub profit_rate: f64,
}

/// One holding in the account.
#[derive(Clone, Debug, PartialEq)]
pub struct Position {
    pub code: StockCode,
    pub name: String,
    pub quantity: i64,
    pub avg_price: f64,
    /// Latest quote; absent until market data arrives.
    pub current_price: Option<f64>,
    pub eval_amount: Option<i64>,
    pub profit: Option<i64>,
    pub profit_rate: Option<f64>,
}

impl Position {
    pub fn purchase_amount(&self) -> f64 {
        self.avg_price * self.quantity as f64
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn label(&self) -> &'static str {
        match self {
            OrderSide::Buy => "Buy",
            OrderSide::Sell => "Sell",
        }
    }

    pub fn is_sell(&self) -> bool {
        matches!(self, OrderSide::Sell)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    PartiallyFilled,
    Filled,
    Cancelled,
    Rejected,
}

impl OrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::PartiallyFilled => "Partial",
            OrderStatus::Filled => "Filled",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Rejected => "Rejected",
        }
    }

    /// Only resting orders can still be pulled.
    pub fn is_cancellable(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::PartiallyFilled)
    }
}

/// An order as reported by the backend.
#[derive(Clone, Debug, PartialEq)]
pub struct Order {
    pub id: String,
    pub code: StockCode,
    pub name: String,
    pub side: OrderSide,
    pub status: OrderStatus,
    pub quantity: i64,
    pub filled_quantity: i64,
    /// Limit price; market orders carry none.
    pub price: Option<f64>,
    /// "YYYY-MM-DD HH:MM:SS" as sent by the backend.
    pub ordered_at: String,
}

impl Order {
    pub fn order_amount(&self) -> Option<f64> {
        self.price.map(|price| price * self.quantity as f64)
    }
}

/// Automated-trading strategy for one symbol, as stored by the backend.
/// Target and stop-loss prices are resolved to absolute KRW by the strategy
/// form before they get here.
#[derive(Clone, Debug, PartialEq)]
pub struct Strategy {
    pub id: String,
    pub name: String,
    pub code: StockCode,
    pub stock_name: String,
    pub enabled: bool,
    /// KRW allocated per entry.
    pub buy_amount: i64,
    pub target_price: Option<f64>,
    pub stop_loss_price: Option<f64>,
}

/// Broker API credentials as typed into the settings form. Sent to the
/// backend verbatim; encryption at rest is the backend's job.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApiCredentials {
    pub app_key: String,
    pub app_secret: String,
    pub account_no: String,
}

impl ApiCredentials {
    pub fn is_complete(&self) -> bool {
        !self.app_key.trim().is_empty()
            && !self.app_secret.trim().is_empty()
            && !self.account_no.trim().is_empty()
    }
}
