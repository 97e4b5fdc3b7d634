//! Pricing service functions with database access.
//!
//! These functions load rate and season data through the cache (falling back
//! to the database) and hand it to the pure engine in [`super::quote`].

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::cache::AppCache;
use crate::error::AppError;

use super::activities::Activity;
use super::catalog::Destination;
use super::quote::{calculate_quote, Package, Quote, QuoteInput};
use super::queries;
use super::rates::{HotelRates, RoomCapacity, RoomRate};
use super::seasons::SeasonalPeriod;
use super::stay::{Occupancy, Stay};

/// Pricing calculation error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    #[error("No {capacity} rate available for {date}")]
    NoRate { capacity: RoomCapacity, date: NaiveDate },

    #[error("Unknown hotel {hotel_id}")]
    UnknownHotel { hotel_id: Uuid },

    #[error("Invalid season '{name}': {reason}")]
    InvalidSeason { name: String, reason: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

/// A booking to be priced at one or more hotels
#[derive(Debug, Clone)]
pub struct QuoteRequestParams {
    pub destination: Destination,
    pub stay: Stay,
    pub occupancy: Occupancy,
    pub rooms: Vec<RoomCapacity>,
    pub package: Package,
    pub selected_activities: Vec<String>,
    pub transport_cost: Decimal,
}

/// Outcome of pricing one candidate hotel
#[derive(Debug, Clone)]
pub struct HotelQuoteResult {
    pub hotel_id: Uuid,
    pub hotel_name: Option<String>,
    pub result: Result<Quote, String>,
}

/// Load a hotel and its rate records straight from the database.
///
/// Rows that cannot be converted (unknown capacity, negative rates) and an
/// out-of-range minimum rate are skipped with a warning rather than failing
/// the whole hotel.
pub async fn load_hotel_rates(pool: &PgPool, hotel_id: Uuid) -> Result<HotelRates, AppError> {
    let hotel = queries::get_hotel(pool, hotel_id)
        .await?
        .ok_or(PricingError::UnknownHotel { hotel_id })?;

    let rates = queries::get_room_rates(pool, hotel_id)
        .await?
        .into_iter()
        .filter_map(|row| {
            let row_id = row.id;
            RoomRate::try_from(row)
                .map_err(|e| tracing::warn!("Skipping room rate {}: {}", row_id, e))
                .ok()
        })
        .collect();

    let minimum_rate = hotel.checked_minimum_rate().unwrap_or_else(|e| {
        tracing::warn!("Ignoring minimum rate: {}", e);
        None
    });

    Ok(HotelRates {
        hotel_id: hotel.id,
        name: hotel.name,
        minimum_rate,
        rates,
    })
}

/// Load active seasons straight from the database, skipping invalid rows.
pub async fn load_seasons(pool: &PgPool) -> Result<Vec<SeasonalPeriod>, AppError> {
    let today = Utc::now().date_naive();
    let seasons = queries::get_active_seasons(pool, today)
        .await?
        .into_iter()
        .filter_map(|row| {
            let row_id = row.id;
            SeasonalPeriod::try_from(row)
                .map_err(|e| tracing::warn!("Skipping season {}: {}", row_id, e))
                .ok()
        })
        .collect();

    Ok(seasons)
}

/// Hotel rates from cache, loading on a miss
pub async fn hotel_rates(
    pool: &PgPool,
    cache: &AppCache,
    hotel_id: Uuid,
) -> Result<Arc<HotelRates>, AppError> {
    if let Some(cached) = cache.hotel_rates.get(&hotel_id).await {
        tracing::debug!("Cache HIT for hotel rates: {}", hotel_id);
        return Ok(cached);
    }

    tracing::debug!("Cache MISS for hotel rates: {}", hotel_id);
    let rates = Arc::new(load_hotel_rates(pool, hotel_id).await?);
    cache.hotel_rates.insert(hotel_id, rates.clone()).await;
    Ok(rates)
}

/// Active seasons from cache, loading on a miss
pub async fn seasons(
    pool: &PgPool,
    cache: &AppCache,
) -> Result<Arc<Vec<SeasonalPeriod>>, AppError> {
    if let Some(cached) = cache.get_seasons().await {
        return Ok(cached);
    }

    let loaded = load_seasons(pool).await?;
    Ok(cache.insert_seasons(loaded).await)
}

/// Price a booking at one hotel.
pub async fn quote_for_hotel(
    pool: &PgPool,
    cache: &AppCache,
    hotel_id: Uuid,
    params: &QuoteRequestParams,
) -> Result<(Arc<HotelRates>, Quote), AppError> {
    let hotel = hotel_rates(pool, cache, hotel_id).await?;
    let seasons = seasons(pool, cache).await?;
    let catalog = params.destination.activities();

    let quote = price_with(&hotel, &seasons, &catalog, params)?;
    Ok((hotel, quote))
}

/// Price the same booking at several hotels.
///
/// Each hotel is priced independently; one hotel failing does not stop the
/// others. Results come back in the order the ids were given.
pub async fn compare_hotels(
    pool: &PgPool,
    cache: &AppCache,
    hotel_ids: &[Uuid],
    params: &QuoteRequestParams,
) -> Result<Vec<HotelQuoteResult>, AppError> {
    let seasons = seasons(pool, cache).await?;
    let catalog = params.destination.activities();

    let mut results = Vec::with_capacity(hotel_ids.len());
    for &hotel_id in hotel_ids {
        let outcome = match hotel_rates(pool, cache, hotel_id).await {
            Ok(hotel) => HotelQuoteResult {
                hotel_id,
                hotel_name: Some(hotel.name.clone()),
                result: price_with(&hotel, &seasons, &catalog, params).map_err(|e| e.to_string()),
            },
            Err(AppError::Pricing(e)) => HotelQuoteResult {
                hotel_id,
                hotel_name: None,
                result: Err(e.to_string()),
            },
            Err(e) => return Err(e),
        };
        results.push(outcome);
    }

    Ok(results)
}

fn price_with(
    hotel: &HotelRates,
    seasons: &[SeasonalPeriod],
    catalog: &[Activity],
    params: &QuoteRequestParams,
) -> Result<Quote, PricingError> {
    let input = QuoteInput {
        hotel,
        seasons,
        stay: params.stay,
        occupancy: &params.occupancy,
        rooms: &params.rooms,
        package: &params.package,
        catalog,
        selected_activities: &params.selected_activities,
        transport_cost: params.transport_cost,
    };
    calculate_quote(&input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pricing_error_display() {
        let err = PricingError::NoRate {
            capacity: RoomCapacity::FourSleeper,
            date: NaiveDate::from_ymd_opt(2025, 12, 24).unwrap(),
        };
        assert_eq!(err.to_string(), "No 4-sleeper rate available for 2025-12-24");

        let hotel_id = Uuid::new_v4();
        let err = PricingError::UnknownHotel { hotel_id };
        assert!(err.to_string().contains(&hotel_id.to_string()));

        let err = PricingError::InvalidSeason {
            name: "Festive".to_string(),
            reason: "multiplier must be positive".to_string(),
        };
        assert!(err.to_string().contains("Festive"));
    }

    #[test]
    fn test_price_with_uses_destination_catalog() {
        let hotel = HotelRates {
            hotel_id: Uuid::new_v4(),
            name: "Protea Hotel Cape Town".to_string(),
            minimum_rate: None,
            rates: vec![RoomRate::open_ended(
                Uuid::new_v4(),
                RoomCapacity::TwoSleeper,
                dec!(1500),
                dec!(1800),
            )],
        };
        let params = QuoteRequestParams {
            destination: Destination::CapeTown,
            stay: Stay::new(
                NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
                NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
            ),
            occupancy: Occupancy::new(2, vec![], 1),
            rooms: vec![RoomCapacity::TwoSleeper],
            package: Package {
                name: "Cape Town City Break".to_string(),
                base_price: dec!(1000),
                kids_price: None,
                kids_price_tiers: None,
                activities_included: vec![],
            },
            selected_activities: vec!["Table Mountain cableway".to_string()],
            transport_cost: dec!(0),
        };
        let catalog = params.destination.activities();
        let quote = price_with(&hotel, &[], &catalog, &params).unwrap();

        assert_eq!(quote.activities.len(), 1);
        assert_eq!(quote.activities[0].matched, "Table Mountain Aerial Cableway");
        // 1500 + 2000 + 1700 + 840
        assert_eq!(quote.grand_total, dec!(6040));
    }
}
