//! Persistent on-disk caching for the symbol master with TTL tracking.

use std::{
    fs,
    path::PathBuf,
    sync::OnceLock,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use serde::{Deserialize, Serialize};

use crate::domain::Stock;

const CACHE_FILENAME: &str = "stock_cache.json";

/// Cache TTL: 7 days. Listings change rarely (IPOs, delistings, renames).
pub const STOCK_CACHE_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Cached symbol master with TTL tracking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockCache {
    /// Trading date the backend built this list for.
    pub as_of: String,
    /// Unix timestamp (seconds) when this cache was created.
    pub cached_at: u64,
    pub stocks: Vec<CachedStock>,
}

/// Serializable mirror of [`Stock`] for the cache file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedStock {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub market: Option<String>,
}

impl StockCache {
    pub fn new(as_of: String, stocks: Vec<Stock>) -> Self {
        let cached_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            as_of,
            cached_at,
            stocks: stocks
                .into_iter()
                .map(|stock| CachedStock {
                    code: stock.code,
                    name: stock.name,
                    market: stock.market,
                })
                .collect(),
        }
    }

    pub fn to_stocks(&self) -> Vec<Stock> {
        self.stocks
            .iter()
            .map(|cached| Stock {
                code: cached.code.clone(),
                name: cached.name.clone(),
                market: cached.market.clone(),
            })
            .collect()
    }

    pub fn is_expired(&self) -> bool {
        self.age() > STOCK_CACHE_TTL
    }

    pub fn age(&self) -> Duration {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Duration::from_secs(now.saturating_sub(self.cached_at))
    }

    /// Human-readable age string.
    pub fn age_string(&self) -> String {
        let secs = self.age().as_secs();
        if secs < 60 {
            format!("{secs}s")
        } else if secs < 3600 {
            format!("{}m", secs / 60)
        } else if secs < 86400 {
            format!("{}h", secs / 3600)
        } else {
            format!("{}d", secs / 86400)
        }
    }
}

fn cache_path() -> PathBuf {
    static PATH: OnceLock<PathBuf> = OnceLock::new();
    PATH.get_or_init(|| {
        let base = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ktrade-dashboard");
        let _ = fs::create_dir_all(&base);
        base.join(CACHE_FILENAME)
    })
    .clone()
}

/// Load the symbol-master cache from disk, if it exists.
pub fn load_stock_cache() -> Option<StockCache> {
    let path = cache_path();

    if !path.exists() {
        println!("[cache] no symbol master cache at {}", path.display());
        return None;
    }

    match fs::read_to_string(&path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(cache) => {
                println!("[cache] loaded symbol master from {}", path.display());
                Some(cache)
            }
            Err(e) => {
                println!("[cache] failed to parse symbol master cache: {e}");
                None
            }
        },
        Err(e) => {
            println!("[cache] failed to read symbol master cache: {e}");
            None
        }
    }
}

/// Save the symbol-master cache to disk.
pub fn save_stock_cache(cache: &StockCache) -> Result<(), std::io::Error> {
    let path = cache_path();
    let content = serde_json::to_string(cache)?; // compact, the list is large
    fs::write(&path, content)?;
    println!(
        "[cache] saved symbol master ({} entries, as of {}) to {}",
        cache.stocks.len(),
        cache.as_of,
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_cache_is_not_expired() {
        let cache = StockCache::new(
            "2024-01-08".to_string(),
            vec![Stock {
                code: "005930".to_string(),
                name: "Samsung Electronics".to_string(),
                market: Some("KOSPI".to_string()),
            }],
        );
        assert!(!cache.is_expired());
        assert_eq!(cache.to_stocks().len(), 1);
    }

    #[test]
    fn old_cache_expires() {
        let mut cache = StockCache::new("2023-01-01".to_string(), Vec::new());
        cache.cached_at -= STOCK_CACHE_TTL.as_secs() + 60;
        assert!(cache.is_expired());
    }
}
