#![allow(dead_code)]

use std::{
    collections::HashMap,
    time::{Duration, SystemTime},
};

use serde::{Deserialize, Serialize};

use super::entities::{AccountSummary, Order, Position, Stock, StockCode, Strategy};
use crate::ui::state::DatePreset;

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub account: Option<AccountSummary>,
    pub positions: Vec<Position>,
    pub orders: Vec<Order>,
    pub strategies: Vec<Strategy>,
    /// Symbol master used for code -> name lookups and the watch list.
    pub stocks: Vec<Stock>,
    pub watch_codes: Vec<StockCode>,
    /// Preferred preset for the orders page date filter.
    pub order_preset: DatePreset,
    pub cache: CacheTimestamps,
}

impl AppState {
    pub fn is_stale(&self, resource: &CacheResource, ttl: Duration) -> bool {
        self.cache.is_stale(resource, ttl)
    }

    pub fn stock_name(&self, code: &str) -> Option<&str> {
        self.stocks
            .iter()
            .find(|stock| stock.code == code)
            .map(|stock| stock.name.as_str())
    }

    pub fn position_for(&self, code: &str) -> Option<&Position> {
        self.positions.iter().find(|position| position.code == code)
    }

    pub fn apply_persisted(&mut self, persisted: PersistedState) {
        self.watch_codes = persisted.watch_codes;
        self.order_preset = persisted.order_preset;
    }

    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            watch_codes: self.watch_codes.clone(),
            order_preset: self.order_preset,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct CacheTimestamps {
    entries: HashMap<CacheResource, SystemTime>,
}

impl CacheTimestamps {
    pub fn record_fetch(&mut self, resource: CacheResource, fetched_at: SystemTime) {
        self.entries.insert(resource, fetched_at);
    }

    pub fn fetched_at(&self, resource: &CacheResource) -> Option<SystemTime> {
        self.entries.get(resource).copied()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CacheResource, &SystemTime)> {
        self.entries.iter()
    }

    pub fn is_stale(&self, resource: &CacheResource, ttl: Duration) -> bool {
        self.fetched_at(resource)
            .map(|time| time.elapsed().map(|elapsed| elapsed > ttl).unwrap_or(true))
            .unwrap_or(true)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CacheResource {
    Account,
    Positions,
    Orders,
    Strategies,
    Stocks,
}

/// The slice of UI state written to disk between sessions.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub watch_codes: Vec<StockCode>,
    #[serde(default)]
    pub order_preset: DatePreset,
}
