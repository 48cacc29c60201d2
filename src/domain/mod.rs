//! Domain types and the pure price/cost arithmetic.

pub mod app_state;
pub mod entities;
pub mod pricing;

#[allow(unused_imports)]
pub use app_state::{AppState, CacheResource, CacheTimestamps, PersistedState};
#[allow(unused_imports)]
pub use entities::{
    AccountSummary, ApiCredentials, Order, OrderSide, OrderStatus, Position, Stock, StockCode,
    Strategy,
};
#[allow(unused_imports)]
pub use pricing::{
    price_by_type, price_from_percent, stop_loss_price, target_price, total_trading_cost,
    trading_cost, trading_fee, transaction_tax, PriceKind, TradingCost,
};
