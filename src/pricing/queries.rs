//! Database queries for the quote engine.
//!
//! These are the room-rate and seasonal-period providers: they only read the
//! admin-managed tables and hand rows back for conversion into engine types.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;

use super::models::{Hotel, RoomRateRow, SeasonRow};

/// Get an active hotel by id
pub async fn get_hotel(pool: &PgPool, hotel_id: Uuid) -> Result<Option<Hotel>, AppError> {
    let hotel = sqlx::query_as::<_, Hotel>(
        r#"
        SELECT id, name, area_id, minimum_rate, active, deleted_at
        FROM hotels_hotel
        WHERE id = $1
          AND active = true
          AND deleted_at IS NULL
        "#,
    )
    .bind(hotel_id)
    .fetch_optional(pool)
    .await?;

    Ok(hotel)
}

/// Get every rate record for a hotel's room types
///
/// Rates are returned regardless of validity window; the resolver picks the
/// record in effect for each night.
pub async fn get_room_rates(pool: &PgPool, hotel_id: Uuid) -> Result<Vec<RoomRateRow>, AppError> {
    let rates = sqlx::query_as::<_, RoomRateRow>(
        r#"
        SELECT
            r.id, r.room_type_id, t.hotel_id, t.sleeps,
            r.weekday_rate, r.weekend_rate,
            r.effective_from, r.effective_to
        FROM hotels_roomrate r
        JOIN hotels_roomtype t ON t.id = r.room_type_id
        WHERE t.hotel_id = $1
          AND t.deleted_at IS NULL
        ORDER BY t.sleeps, r.effective_from NULLS FIRST
        "#,
    )
    .bind(hotel_id)
    .fetch_all(pool)
    .await?;

    Ok(rates)
}

/// Get active seasons ending on or after the given date
///
/// Ordered by creation so that equal multipliers resolve to the oldest season.
pub async fn get_active_seasons(
    pool: &PgPool,
    from: NaiveDate,
) -> Result<Vec<SeasonRow>, AppError> {
    let seasons = sqlx::query_as::<_, SeasonRow>(
        r#"
        SELECT id, name, start_date, end_date, multiplier, active
        FROM pricing_season
        WHERE active = true
          AND end_date >= $1
        ORDER BY created_at, id
        "#,
    )
    .bind(from)
    .fetch_all(pool)
    .await?;

    Ok(seasons)
}

/// Get ids of all active hotels (for cache warming)
pub async fn get_active_hotel_ids(pool: &PgPool) -> Result<Vec<Uuid>, AppError> {
    let ids = sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT id
        FROM hotels_hotel
        WHERE active = true
          AND deleted_at IS NULL
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(ids)
}
