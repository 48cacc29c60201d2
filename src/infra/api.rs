#![allow(dead_code)]

//! Thin asynchronous client for the backend trading API (`/api/v1`).
//!
//! - Typed accessors for account, positions, orders, strategies.
//! - Per-resource in-memory cache with a short TTL and stale fallbacks, so
//!   a flaky backend degrades to old data instead of an empty screen.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, SystemTime},
};

use reqwest::{Client, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::{
    AccountSummary, ApiCredentials, Order, OrderSide, OrderStatus, Position, Stock, Strategy,
};
use crate::infra::cache::{load_stock_cache, save_stock_cache, StockCache};
use crate::ui::state::DateRange;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/v1/";
const BASE_URL_ENV: &str = "DASHBOARD_API_BASE";
const DEFAULT_TTL: Duration = Duration::from_secs(60);
const USER_AGENT: &str = "ktrade-dashboard/0.1.0";

#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api error: {0}")]
    Api(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CacheStatus {
    Fresh,
    Cached,
    Stale,
}

#[derive(Clone, Debug)]
pub struct CachedPayload<T> {
    pub data: T,
    pub fetched_at: SystemTime,
    pub status: CacheStatus,
}

impl<T> CachedPayload<T> {
    fn new(data: T, fetched_at: SystemTime, status: CacheStatus) -> Self {
        Self {
            data,
            fetched_at,
            status,
        }
    }
}

#[derive(Default)]
struct ApiCache {
    account: Option<Cached<AccountSummary>>,
    positions: Option<Cached<Vec<Position>>>,
    /// Keyed by "start..end" ISO bounds.
    orders: HashMap<String, Cached<Vec<Order>>>,
    strategies: Option<Cached<Vec<Strategy>>>,
    stocks: Option<StockCache>,
}

impl ApiCache {
    fn clear(&mut self) {
        self.account = None;
        self.positions = None;
        self.orders.clear();
        self.strategies = None;
        // Note: the symbol master is NOT cleared here - it persists across
        // cache clears and only refreshes on its own TTL.
    }

    fn invalidate_trading(&mut self) {
        self.account = None;
        self.positions = None;
        self.orders.clear();
    }
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    status: String,
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Clone)]
pub struct TradeApiClient {
    http: Client,
    base_url: Url,
    cache: Arc<Mutex<ApiCache>>,
    ttl: Duration,
}

impl TradeApiClient {
    pub fn new() -> Result<Self, ApiClientError> {
        let base =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::with_base_url(&base)
    }

    pub fn with_base_url(base: &str) -> Result<Self, ApiClientError> {
        let base_url = Url::parse(base)?;
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            base_url,
            cache: Arc::new(Mutex::new(ApiCache::default())),
            ttl: DEFAULT_TTL,
        })
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub async fn get_account_summary(
        &self,
    ) -> Result<CachedPayload<AccountSummary>, ApiClientError> {
        {
            let cache = self.cache.lock().await;
            if let Some(payload) = cache.account.as_ref().and_then(|e| e.if_fresh(self.ttl)) {
                return Ok(payload);
            }
        }

        let url = self.url("account/summary")?;
        match self.fetch_data::<AccountSummaryDto>(self.http.get(url)).await {
            Ok(dto) => {
                let summary = AccountSummary::from(dto);
                let fetched_at = SystemTime::now();
                let payload =
                    CachedPayload::new(summary.clone(), fetched_at, CacheStatus::Fresh);
                self.cache.lock().await.account = Some(Cached::new(summary, fetched_at));
                Ok(payload)
            }
            Err(error) => {
                let cache = self.cache.lock().await;
                if let Some(stale) = cache.account.as_ref().map(Cached::stale) {
                    println!("[api] account summary fetch failed, serving stale: {error}");
                    return Ok(stale);
                }
                Err(error)
            }
        }
    }

    pub async fn get_positions(&self) -> Result<CachedPayload<Vec<Position>>, ApiClientError> {
        {
            let cache = self.cache.lock().await;
            if let Some(payload) = cache.positions.as_ref().and_then(|e| e.if_fresh(self.ttl)) {
                return Ok(payload);
            }
        }

        let url = self.url("positions")?;
        match self.fetch_data::<Vec<PositionDto>>(self.http.get(url)).await {
            Ok(dtos) => {
                let positions: Vec<Position> =
                    dtos.into_iter().map(Position::from).collect();
                let fetched_at = SystemTime::now();
                let payload =
                    CachedPayload::new(positions.clone(), fetched_at, CacheStatus::Fresh);
                self.cache.lock().await.positions = Some(Cached::new(positions, fetched_at));
                Ok(payload)
            }
            Err(error) => {
                let cache = self.cache.lock().await;
                if let Some(stale) = cache.positions.as_ref().map(Cached::stale) {
                    println!("[api] positions fetch failed, serving stale: {error}");
                    return Ok(stale);
                }
                Err(error)
            }
        }
    }

    pub async fn get_orders(
        &self,
        range: &DateRange,
    ) -> Result<CachedPayload<Vec<Order>>, ApiClientError> {
        let key = format!("{}..{}", range.start_iso(), range.end_iso());
        {
            let cache = self.cache.lock().await;
            if let Some(payload) = cache
                .orders
                .get(&key)
                .and_then(|entry| entry.if_fresh(self.ttl))
            {
                println!("[api] serving cached orders for {key}");
                return Ok(payload);
            }
        }

        let mut url = self.url("orders")?;
        url.query_pairs_mut()
            .append_pair("start_date", &range.start_iso())
            .append_pair("end_date", &range.end_iso());

        match self.fetch_data::<Vec<OrderDto>>(self.http.get(url)).await {
            Ok(dtos) => {
                let orders: Vec<Order> = dtos.into_iter().map(Order::from).collect();
                let fetched_at = SystemTime::now();
                let payload = CachedPayload::new(orders.clone(), fetched_at, CacheStatus::Fresh);
                self.cache
                    .lock()
                    .await
                    .orders
                    .insert(key, Cached::new(orders, fetched_at));
                Ok(payload)
            }
            Err(error) => {
                let cache = self.cache.lock().await;
                if let Some(stale) = cache.orders.get(&key).map(Cached::stale) {
                    println!("[api] orders fetch failed for {key}, serving stale: {error}");
                    return Ok(stale);
                }
                Err(error)
            }
        }
    }

    /// Submits a new order; returns it as echoed back by the backend.
    pub async fn place_order(&self, request: &OrderRequest) -> Result<Order, ApiClientError> {
        let url = self.url("orders")?;
        println!(
            "[api] placing {} order for {} x{}",
            request.side, request.code, request.quantity
        );
        let dto: OrderDto = self
            .fetch_data(self.http.post(url).json(request))
            .await?;
        self.cache.lock().await.invalidate_trading();
        Ok(Order::from(dto))
    }

    pub async fn cancel_order(&self, order_id: &str) -> Result<(), ApiClientError> {
        let url = self.url(&format!("orders/{order_id}"))?;
        println!("[api] cancelling order {order_id}");
        let _: serde_json::Value = self.fetch_data(self.http.delete(url)).await?;
        self.cache.lock().await.invalidate_trading();
        Ok(())
    }

    pub async fn get_strategies(
        &self,
    ) -> Result<CachedPayload<Vec<Strategy>>, ApiClientError> {
        {
            let cache = self.cache.lock().await;
            if let Some(payload) = cache
                .strategies
                .as_ref()
                .and_then(|entry| entry.if_fresh(self.ttl))
            {
                return Ok(payload);
            }
        }

        let url = self.url("strategies")?;
        match self.fetch_data::<Vec<StrategyDto>>(self.http.get(url)).await {
            Ok(dtos) => {
                let strategies: Vec<Strategy> =
                    dtos.into_iter().map(Strategy::from).collect();
                let fetched_at = SystemTime::now();
                let payload =
                    CachedPayload::new(strategies.clone(), fetched_at, CacheStatus::Fresh);
                self.cache.lock().await.strategies =
                    Some(Cached::new(strategies, fetched_at));
                Ok(payload)
            }
            Err(error) => {
                let cache = self.cache.lock().await;
                if let Some(stale) = cache.strategies.as_ref().map(Cached::stale) {
                    println!("[api] strategies fetch failed, serving stale: {error}");
                    return Ok(stale);
                }
                Err(error)
            }
        }
    }

    /// Creates or updates a strategy depending on whether `id` is set.
    pub async fn save_strategy(
        &self,
        payload: &StrategyPayload,
    ) -> Result<Strategy, ApiClientError> {
        let dto: StrategyDto = match &payload.id {
            Some(id) => {
                let url = self.url(&format!("strategies/{id}"))?;
                self.fetch_data(self.http.put(url).json(payload)).await?
            }
            None => {
                let url = self.url("strategies")?;
                self.fetch_data(self.http.post(url).json(payload)).await?
            }
        };
        self.cache.lock().await.strategies = None;
        Ok(Strategy::from(dto))
    }

    pub async fn delete_strategy(&self, strategy_id: &str) -> Result<(), ApiClientError> {
        let url = self.url(&format!("strategies/{strategy_id}"))?;
        let _: serde_json::Value = self.fetch_data(self.http.delete(url)).await?;
        self.cache.lock().await.strategies = None;
        Ok(())
    }

    /// Hands the broker credentials to the backend, which encrypts and
    /// stores them. Nothing is kept on this side.
    pub async fn save_credentials(
        &self,
        credentials: &ApiCredentials,
    ) -> Result<(), ApiClientError> {
        let url = self.url("credentials")?;
        let body = CredentialsPayload {
            app_key: &credentials.app_key,
            app_secret: &credentials.app_secret,
            account_no: &credentials.account_no,
        };
        let _: serde_json::Value = self.fetch_data(self.http.post(url).json(&body)).await?;
        println!("[api] credentials submitted for account {}", credentials.account_no);
        Ok(())
    }

    /// Loads the symbol master, preferring the in-memory copy, then the
    /// on-disk cache (7-day TTL), then the API.
    pub async fn get_stocks(&self) -> Result<StockCache, ApiClientError> {
        {
            let cache = self.cache.lock().await;
            if let Some(ref stocks) = cache.stocks {
                println!(
                    "[stocks] using in-memory symbol master ({} entries, age: {})",
                    stocks.stocks.len(),
                    stocks.age_string()
                );
                return Ok(stocks.clone());
            }
        }

        if let Some(disk_cache) = load_stock_cache() {
            if !disk_cache.is_expired() {
                println!(
                    "[stocks] disk cache valid (age: {}, as of {})",
                    disk_cache.age_string(),
                    disk_cache.as_of
                );
                self.cache.lock().await.stocks = Some(disk_cache.clone());
                return Ok(disk_cache);
            }
            println!(
                "[stocks] disk cache expired (age: {}), refreshing...",
                disk_cache.age_string()
            );
        }

        self.refresh_stocks().await
    }

    /// Force refresh the symbol master from the API.
    pub async fn refresh_stocks(&self) -> Result<StockCache, ApiClientError> {
        println!("[stocks] fetching symbol master from API...");
        let url = self.url("stocks")?;
        let payload: StockListDto = self.fetch_data(self.http.get(url)).await?;

        let as_of = payload.as_of.unwrap_or_else(|| "unknown".to_string());
        let stocks: Vec<Stock> = payload.stocks.into_iter().map(Stock::from).collect();
        println!("[stocks] loaded {} symbols (as of {})", stocks.len(), as_of);

        let cache = StockCache::new(as_of, stocks);
        if let Err(e) = save_stock_cache(&cache) {
            println!("[stocks] warning: failed to save cache: {e}");
        }
        self.cache.lock().await.stocks = Some(cache.clone());
        Ok(cache)
    }

    pub async fn clear_cache(&self) {
        self.cache.lock().await.clear();
    }

    async fn fetch_data<T>(&self, builder: reqwest::RequestBuilder) -> Result<T, ApiClientError>
    where
        T: DeserializeOwned,
    {
        let response = builder.send().await?.error_for_status()?;
        let envelope: ApiEnvelope<T> = response.json().await?;
        let ApiEnvelope {
            status,
            data,
            message,
        } = envelope;

        if status.eq_ignore_ascii_case("ok") {
            data.ok_or_else(|| ApiClientError::Api("response missing data".into()))
        } else {
            Err(ApiClientError::Api(message.unwrap_or(status)))
        }
    }

    fn url(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path)
    }
}

struct Cached<T> {
    value: T,
    fetched_at: SystemTime,
}

impl<T: Clone> Cached<T> {
    fn new(value: T, fetched_at: SystemTime) -> Self {
        Self { value, fetched_at }
    }

    fn if_fresh(&self, ttl: Duration) -> Option<CachedPayload<T>> {
        if self
            .fetched_at
            .elapsed()
            .map(|elapsed| elapsed <= ttl)
            .unwrap_or(false)
        {
            Some(CachedPayload::new(
                self.value.clone(),
                self.fetched_at,
                CacheStatus::Cached,
            ))
        } else {
            None
        }
    }

    fn stale(&self) -> CachedPayload<T> {
        CachedPayload::new(self.value.clone(), self.fetched_at, CacheStatus::Stale)
    }
}

/// Body for `POST /api/v1/orders`.
#[derive(Clone, Debug, Serialize)]
pub struct OrderRequest {
    pub client_order_id: String,
    pub code: String,
    pub side: String,
    pub quantity: i64,
    /// Limit price; `None` submits a market order.
    pub price: Option<f64>,
}

impl OrderRequest {
    pub fn new(code: &str, side: OrderSide, quantity: i64, price: Option<f64>) -> Self {
        Self {
            client_order_id: Uuid::new_v4().to_string(),
            code: code.to_string(),
            side: match side {
                OrderSide::Buy => "buy".to_string(),
                OrderSide::Sell => "sell".to_string(),
            },
            quantity,
            price,
        }
    }
}

/// Body for strategy create/update.
#[derive(Clone, Debug, Serialize)]
pub struct StrategyPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub code: String,
    pub enabled: bool,
    pub buy_amount: i64,
    pub target_price: Option<f64>,
    pub stop_loss_price: Option<f64>,
}

#[derive(Serialize)]
struct CredentialsPayload<'a> {
    app_key: &'a str,
    app_secret: &'a str,
    account_no: &'a str,
}

#[derive(Debug, Deserialize)]
struct AccountSummaryDto {
    #[serde(default)]
    account_no: Option<String>,
    #[serde(default)]
    total_asset: Option<i64>,
    #[serde(default)]
    available_cash: Option<i64>,
    #[serde(default)]
    total_purchase: Option<i64>,
    #[serde(default)]
    total_eval: Option<i64>,
    #[serde(default)]
    total_profit: Option<i64>,
    #[serde(default)]
    profit_rate: Option<f64>,
}

impl From<AccountSummaryDto> for AccountSummary {
    fn from(dto: AccountSummaryDto) -> Self {
        Self {
            account_no: dto.account_no.unwrap_or_else(|| "unknown".to_string()),
            total_asset: dto.total_asset.unwrap_or(0),
            available_cash: dto.available_cash.unwrap_or(0),
            total_purchase: dto.total_purchase.unwrap_or(0),
            total_eval: dto.total_eval.unwrap_or(0),
            total_profit: dto.total_profit.unwrap_or(0),
            profit_rate: dto.profit_rate.unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PositionDto {
    code: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    quantity: Option<i64>,
    #[serde(default)]
    avg_price: Option<f64>,
    #[serde(default)]
    current_price: Option<f64>,
    #[serde(default)]
    eval_amount: Option<i64>,
    #[serde(default)]
    profit: Option<i64>,
    #[serde(default)]
    profit_rate: Option<f64>,
}

impl From<PositionDto> for Position {
    fn from(dto: PositionDto) -> Self {
        Self {
            code: dto.code,
            name: dto.name.unwrap_or_else(|| "Unknown".to_string()),
            quantity: dto.quantity.unwrap_or(0),
            avg_price: dto.avg_price.unwrap_or(0.0),
            current_price: dto.current_price,
            eval_amount: dto.eval_amount,
            profit: dto.profit,
            profit_rate: dto.profit_rate,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OrderDto {
    id: String,
    code: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    side: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    quantity: Option<i64>,
    #[serde(default)]
    filled_quantity: Option<i64>,
    #[serde(default)]
    price: Option<f64>,
    #[serde(default)]
    ordered_at: Option<String>,
}

impl From<OrderDto> for Order {
    fn from(dto: OrderDto) -> Self {
        let side = match dto.side.as_deref() {
            Some("sell") => OrderSide::Sell,
            _ => OrderSide::Buy,
        };
        let status = match dto.status.as_deref() {
            Some("partial") => OrderStatus::PartiallyFilled,
            Some("filled") => OrderStatus::Filled,
            Some("cancelled") => OrderStatus::Cancelled,
            Some("rejected") => OrderStatus::Rejected,
            _ => OrderStatus::Pending,
        };
        Self {
            id: dto.id,
            code: dto.code,
            name: dto.name.unwrap_or_else(|| "Unknown".to_string()),
            side,
            status,
            quantity: dto.quantity.unwrap_or(0),
            filled_quantity: dto.filled_quantity.unwrap_or(0),
            price: dto.price,
            ordered_at: dto.ordered_at.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct StrategyDto {
    id: String,
    #[serde(default)]
    name: Option<String>,
    code: String,
    #[serde(default)]
    stock_name: Option<String>,
    #[serde(default)]
    enabled: Option<bool>,
    #[serde(default)]
    buy_amount: Option<i64>,
    #[serde(default)]
    target_price: Option<f64>,
    #[serde(default)]
    stop_loss_price: Option<f64>,
}

impl From<StrategyDto> for Strategy {
    fn from(dto: StrategyDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name.unwrap_or_else(|| "Unnamed".to_string()),
            code: dto.code,
            stock_name: dto.stock_name.unwrap_or_else(|| "Unknown".to_string()),
            enabled: dto.enabled.unwrap_or(false),
            buy_amount: dto.buy_amount.unwrap_or(0),
            target_price: dto.target_price,
            stop_loss_price: dto.stop_loss_price,
        }
    }
}

#[derive(Debug, Deserialize)]
struct StockListDto {
    #[serde(default)]
    as_of: Option<String>,
    #[serde(default)]
    stocks: Vec<StockDto>,
}

#[derive(Debug, Deserialize)]
struct StockDto {
    code: String,
    name: String,
    #[serde(default)]
    market: Option<String>,
}

impl From<StockDto> for Stock {
    fn from(dto: StockDto) -> Self {
        Self {
            code: dto.code,
            name: dto.name,
            market: dto.market,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_dto_maps_side_and_status() {
        let json = r#"{
            "id": "ord-1",
            "code": "005930",
            "name": "Samsung Electronics",
            "side": "sell",
            "status": "partial",
            "quantity": 10,
            "filled_quantity": 4,
            "price": 71000.0,
            "ordered_at": "2024-01-08 09:31:02"
        }"#;
        let dto: OrderDto = serde_json::from_str(json).unwrap();
        let order = Order::from(dto);
        assert_eq!(order.side, OrderSide::Sell);
        assert_eq!(order.status, OrderStatus::PartiallyFilled);
        assert!(order.status.is_cancellable());
        assert_eq!(order.order_amount(), Some(710_000.0));
    }

    #[test]
    fn order_dto_defaults_unknown_fields() {
        let json = r#"{"id": "ord-2", "code": "035720"}"#;
        let dto: OrderDto = serde_json::from_str(json).unwrap();
        let order = Order::from(dto);
        assert_eq!(order.side, OrderSide::Buy);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.price, None);
        assert_eq!(order.order_amount(), None);
    }

    #[test]
    fn position_dto_keeps_missing_quote_as_none() {
        let json = r#"{"code": "000660", "name": "SK hynix", "quantity": 5, "avg_price": 130000.0}"#;
        let dto: PositionDto = serde_json::from_str(json).unwrap();
        let position = Position::from(dto);
        assert_eq!(position.current_price, None);
        assert_eq!(position.profit_rate, None);
        assert_eq!(position.purchase_amount(), 650_000.0);
    }

    #[test]
    fn envelope_error_status_surfaces_message() {
        let json = r#"{"status": "error", "message": "account not linked"}"#;
        let envelope: ApiEnvelope<Vec<OrderDto>> = serde_json::from_str(json).unwrap();
        assert!(!envelope.status.eq_ignore_ascii_case("ok"));
        assert_eq!(envelope.message.as_deref(), Some("account not linked"));
    }

    #[test]
    fn order_request_serializes_market_orders_without_price() {
        let request = OrderRequest::new("005930", OrderSide::Buy, 10, None);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["side"], "buy");
        assert!(value["price"].is_null());
        assert!(!value["client_order_id"].as_str().unwrap().is_empty());
    }
}
