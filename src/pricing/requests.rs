//! Request DTOs for pricing API endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;

use super::calculators::{is_valid_amount, MAX_AMOUNT};
use super::catalog::Destination;
use super::children::{AgeRange, KidsPriceTier};
use super::quote::Package;
use super::rates::RoomCapacity;
use super::services::QuoteRequestParams;
use super::stay::{Occupancy, Stay};

/// Oldest age accepted for a child on the booking form.
const MAX_CHILD_AGE: i32 = 17;

/// Request to quote a booking at one hotel
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub hotel_id: Uuid,
    #[serde(flatten)]
    pub booking: BookingRequest,
}

/// Request to quote the same booking at several hotels
#[derive(Debug, Deserialize)]
pub struct CompareQuotesRequest {
    pub hotel_ids: Vec<Uuid>,
    #[serde(flatten)]
    pub booking: BookingRequest,
}

/// Booking details shared by quote requests
#[derive(Debug, Deserialize)]
pub struct BookingRequest {
    pub destination: Destination,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub adults: i32,
    #[serde(default)]
    pub children_ages: Vec<i32>,
    pub rooms: Vec<RoomCapacity>,
    pub package: PackageRequest,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub transport_cost: Option<Decimal>,
}

/// Package pricing in the request
#[derive(Debug, Deserialize)]
pub struct PackageRequest {
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub base_price: Decimal,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub kids_price: Option<Decimal>,
    #[serde(default)]
    pub kids_price_tiers: Option<Vec<KidsPriceTierRequest>>,
    #[serde(default)]
    pub activities_included: Vec<String>,
}

/// A kids price tier in the request
#[derive(Debug, Deserialize)]
pub struct KidsPriceTierRequest {
    pub min_age: u8,
    pub max_age: u8,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
}

/// Request to calculate service fees from child ages
#[derive(Debug, Deserialize)]
pub struct ServiceFeesRequest {
    pub adults: i32,
    #[serde(default)]
    pub children_ages: Vec<i32>,
}

/// Request to calculate service fees from a child head count
#[derive(Debug, Deserialize)]
pub struct ServiceFeesByCountRequest {
    pub adults: i32,
    #[serde(default)]
    pub child_count: i32,
}

/// Request to resolve an activity name
#[derive(Debug, Deserialize)]
pub struct ActivityMatchRequest {
    pub destination: Destination,
    pub name: String,
}

/// Request to price one activity for a party
#[derive(Debug, Deserialize)]
pub struct ActivityCostRequest {
    pub destination: Destination,
    pub name: String,
    pub adults: i32,
    #[serde(default)]
    pub children_ages: Vec<i32>,
}

/// Reject negative adult counts.
pub fn validate_adults(adults: i32) -> Result<u32, AppError> {
    u32::try_from(adults)
        .map_err(|_| AppError::Validation(format!("adults must not be negative, got {}", adults)))
}

/// Reject child ages outside 0-17.
pub fn validate_child_ages(ages: &[i32]) -> Result<Vec<u8>, AppError> {
    ages.iter()
        .map(|&age| {
            if (0..=MAX_CHILD_AGE).contains(&age) {
                Ok(age as u8)
            } else {
                Err(AppError::Validation(format!(
                    "child age {} is out of range 0-{}",
                    age, MAX_CHILD_AGE
                )))
            }
        })
        .collect()
}

/// Reject prices outside 0 to [`MAX_AMOUNT`].
pub fn validate_amount(field: &str, amount: Decimal) -> Result<Decimal, AppError> {
    if is_valid_amount(amount) {
        Ok(amount)
    } else {
        Err(AppError::Validation(format!(
            "{} must be between 0 and {}, got {}",
            field, MAX_AMOUNT, amount
        )))
    }
}

impl PackageRequest {
    pub fn into_package(self) -> Result<Package, AppError> {
        validate_amount("package base price", self.base_price)?;
        if let Some(kids_price) = self.kids_price {
            validate_amount("package kids price", kids_price)?;
        }
        let kids_price_tiers = self
            .kids_price_tiers
            .map(|tiers| {
                tiers
                    .into_iter()
                    .map(|tier| {
                        if tier.min_age > tier.max_age {
                            return Err(AppError::Validation(format!(
                                "kids price tier {}-{} has min age above max age",
                                tier.min_age, tier.max_age
                            )));
                        }
                        Ok(KidsPriceTier {
                            ages: AgeRange::new(tier.min_age, tier.max_age),
                            price: validate_amount("kids price tier", tier.price)?,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        Ok(Package {
            name: self.name,
            base_price: self.base_price,
            kids_price: self.kids_price,
            kids_price_tiers,
            activities_included: self.activities_included,
        })
    }
}

impl BookingRequest {
    /// Validate and convert into engine parameters.
    pub fn into_params(self) -> Result<QuoteRequestParams, AppError> {
        let adults = validate_adults(self.adults)?;
        let children = validate_child_ages(&self.children_ages)?;
        if self.rooms.is_empty() {
            return Err(AppError::Validation("at least one room is required".to_string()));
        }
        if adults == 0 && children.is_empty() {
            return Err(AppError::Validation("the party has no travellers".to_string()));
        }
        let transport_cost =
            validate_amount("transport cost", self.transport_cost.unwrap_or(Decimal::ZERO))?;

        let room_count = self.rooms.len() as u32;
        Ok(QuoteRequestParams {
            destination: self.destination,
            stay: Stay::new(self.check_in, self.check_out),
            occupancy: Occupancy::new(adults, children, room_count),
            rooms: self.rooms,
            package: self.package.into_package()?,
            selected_activities: self.activities,
            transport_cost,
        })
    }
}
