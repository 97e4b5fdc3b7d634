//! In-memory caching using moka
//!
//! Holds provider data the quote engine reads: per-hotel rate snapshots and the
//! active seasonal periods. Quotes themselves are never cached; every request
//! is priced from scratch against whatever snapshot is current.

use moka::future::Cache;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};
use uuid::Uuid;

use crate::pricing::services;
use crate::pricing::{HotelRates, SeasonalPeriod};

const SEASONS_KEY: &str = "seasons";

/// Application cache holding rate snapshots and seasons
#[derive(Clone)]
pub struct AppCache {
    /// Hotel rates (hotel_id -> HotelRates)
    pub hotel_rates: Cache<Uuid, Arc<HotelRates>>,
    /// Active seasonal periods (singleton)
    pub seasons: Cache<String, Arc<Vec<SeasonalPeriod>>>,
}

impl AppCache {
    /// Create a new cache instance with the given TTL
    pub fn new(ttl: Duration) -> Self {
        Self {
            // Hotel rates: 500 hotels, admin edits show up within one TTL
            hotel_rates: Cache::builder()
                .max_capacity(500)
                .time_to_live(ttl)
                .time_to_idle(ttl / 2)
                .build(),

            // Seasons: 1 entry
            seasons: Cache::builder().max_capacity(1).time_to_live(ttl).build(),
        }
    }

    pub async fn get_seasons(&self) -> Option<Arc<Vec<SeasonalPeriod>>> {
        self.seasons.get(SEASONS_KEY).await
    }

    pub async fn insert_seasons(&self, seasons: Vec<SeasonalPeriod>) -> Arc<Vec<SeasonalPeriod>> {
        let seasons = Arc::new(seasons);
        self.seasons
            .insert(SEASONS_KEY.to_string(), seasons.clone())
            .await;
        seasons
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hotel_rates_size: self.hotel_rates.entry_count(),
            seasons_cached: self.seasons.entry_count() > 0,
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.hotel_rates.invalidate_all();
        self.seasons.invalidate_all();
        info!("All caches invalidated");
    }

    /// Invalidate a single hotel's rates
    pub async fn invalidate_hotel(&self, hotel_id: Uuid) {
        self.hotel_rates.invalidate(&hotel_id).await;
        info!("Cache invalidated for hotel: {}", hotel_id);
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(10 * 60))
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub hotel_rates_size: u64,
    pub seasons_cached: bool,
}

/// Shortest refresh period the warmer accepts.
const MIN_WARM_INTERVAL: Duration = Duration::from_secs(1);

/// Start background cache warmer
///
/// Warms the cache on startup and refreshes on the given interval, never more
/// often than once a second.
pub async fn start_cache_warmer(cache: AppCache, db: PgPool, every: Duration) {
    let mut interval = interval(warm_interval(every));
    loop {
        interval.tick().await;
        warm_cache(&cache, &db).await;
    }
}

fn warm_interval(every: Duration) -> Duration {
    every.max(MIN_WARM_INTERVAL)
}

/// Reload seasons and every active hotel's rates
async fn warm_cache(cache: &AppCache, db: &PgPool) {
    info!("Starting cache warm-up...");

    match services::load_seasons(db).await {
        Ok(seasons) => {
            cache.insert_seasons(seasons).await;
        }
        Err(e) => warn!("Failed to warm seasons cache: {}", e),
    }

    match crate::pricing::queries::get_active_hotel_ids(db).await {
        Ok(ids) => {
            for hotel_id in ids {
                match services::load_hotel_rates(db, hotel_id).await {
                    Ok(rates) => cache.hotel_rates.insert(hotel_id, Arc::new(rates)).await,
                    Err(e) => warn!("Failed to warm rates for hotel {}: {}", hotel_id, e),
                }
            }
        }
        Err(e) => warn!("Failed to list hotels for cache warm-up: {}", e),
    }

    info!("Cache warm-up complete. Stats: {:?}", cache.stats());
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_seasons_round_trip_through_cache() {
        let cache = AppCache::default();
        assert!(cache.get_seasons().await.is_none());

        let season = SeasonalPeriod::new(
            "Easter",
            NaiveDate::from_ymd_opt(2025, 4, 17).unwrap(),
            NaiveDate::from_ymd_opt(2025, 4, 21).unwrap(),
            dec!(1.25),
        )
        .unwrap();
        cache.insert_seasons(vec![season]).await;

        let cached = cache.get_seasons().await.unwrap();
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].name, "Easter");
    }

    #[tokio::test]
    async fn test_invalidate_hotel() {
        let cache = AppCache::default();
        let hotel_id = Uuid::new_v4();
        let rates = HotelRates {
            hotel_id,
            name: "Beverly Hills Hotel".to_string(),
            minimum_rate: None,
            rates: vec![],
        };
        cache.hotel_rates.insert(hotel_id, Arc::new(rates)).await;
        assert!(cache.hotel_rates.get(&hotel_id).await.is_some());

        cache.invalidate_hotel(hotel_id).await;
        assert!(cache.hotel_rates.get(&hotel_id).await.is_none());
    }

    #[tokio::test]
    async fn test_warm_interval_never_zero() {
        assert_eq!(warm_interval(Duration::ZERO), MIN_WARM_INTERVAL);
        assert_eq!(warm_interval(Duration::from_secs(600)), Duration::from_secs(600));

        // A zero period would panic inside the spawned warmer
        let ticker = tokio::spawn(async {
            let mut ticks = interval(warm_interval(Duration::ZERO));
            ticks.tick().await;
        });
        assert!(ticker.await.is_ok());
    }
}
