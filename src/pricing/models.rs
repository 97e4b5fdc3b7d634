//! Database models for pricing queries.
//!
//! These models use sqlx's FromRow derive for direct database deserialization.
//! Tables are owned by the admin application; we only read them.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use super::calculators::is_valid_amount;
use super::rates::{RoomCapacity, RoomRate};
use super::seasons::SeasonalPeriod;
use super::services::PricingError;

/// Hotel from hotels_hotel
#[derive(Debug, Clone, FromRow)]
pub struct Hotel {
    pub id: Uuid,
    pub name: String,
    pub area_id: Option<Uuid>,
    pub minimum_rate: Option<Decimal>,
    pub active: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Hotel {
    /// The minimum nightly rate, rejected when negative or out of range.
    pub fn checked_minimum_rate(&self) -> Result<Option<Decimal>, PricingError> {
        match self.minimum_rate {
            Some(rate) if !is_valid_amount(rate) => Err(PricingError::InvalidInput {
                message: format!("hotel {} minimum rate {} is out of range", self.id, rate),
            }),
            rate => Ok(rate),
        }
    }
}

/// Room rate from hotels_roomrate joined to hotels_roomtype
#[derive(Debug, Clone, FromRow)]
pub struct RoomRateRow {
    pub id: Uuid,
    pub room_type_id: Uuid,
    pub hotel_id: Uuid,
    pub sleeps: i32,
    pub weekday_rate: Decimal,
    pub weekend_rate: Decimal,
    pub effective_from: Option<NaiveDate>,
    pub effective_to: Option<NaiveDate>,
}

impl TryFrom<RoomRateRow> for RoomRate {
    type Error = PricingError;

    fn try_from(row: RoomRateRow) -> Result<Self, Self::Error> {
        let capacity =
            RoomCapacity::from_sleeps(row.sleeps).ok_or_else(|| PricingError::InvalidInput {
                message: format!(
                    "room type {} sleeps {}, expected 2 or 4",
                    row.room_type_id, row.sleeps
                ),
            })?;
        if !is_valid_amount(row.weekday_rate) || !is_valid_amount(row.weekend_rate) {
            return Err(PricingError::InvalidInput {
                message: format!("room rate {} is negative or out of range", row.id),
            });
        }
        Ok(RoomRate {
            room_type_id: row.room_type_id,
            capacity,
            weekday_rate: row.weekday_rate,
            weekend_rate: row.weekend_rate,
            effective_from: row.effective_from,
            effective_to: row.effective_to,
        })
    }
}

/// Season from pricing_season
#[derive(Debug, Clone, FromRow)]
pub struct SeasonRow {
    pub id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub multiplier: Decimal,
    pub active: bool,
}

impl TryFrom<SeasonRow> for SeasonalPeriod {
    type Error = PricingError;

    fn try_from(row: SeasonRow) -> Result<Self, Self::Error> {
        SeasonalPeriod::new(row.name, row.start_date, row.end_date, row.multiplier)
    }
}
