//! Response DTOs for pricing API endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::activities::{ActivityCost, MatchKind};
use super::fees::{FeeRegime, ServiceFeeBreakdown};
use super::quote::{ActivityLine, Quote};
use super::rates::{RateSource, RoomCapacity, RoomCost};

/// All quotes are priced in South African rand.
pub const CURRENCY: &str = "ZAR";

/// Money value for JSON responses
#[derive(Debug, Clone, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

impl From<Decimal> for MoneyResponse {
    fn from(amount: Decimal) -> Self {
        Self {
            amount,
            currency: CURRENCY.to_string(),
        }
    }
}

/// Response for a priced room
#[derive(Debug, Serialize)]
pub struct RoomCostResponse {
    pub requested: RoomCapacity,
    pub priced_as: Option<RoomCapacity>,
    pub source: RateSource,
    pub nights: u32,
    pub total: MoneyResponse,
    pub per_night_average: MoneyResponse,
    pub nightly: Vec<NightlyChargeResponse>,
}

/// One night of a room's cost
#[derive(Debug, Serialize)]
pub struct NightlyChargeResponse {
    pub date: NaiveDate,
    pub weekend: bool,
    #[serde(with = "rust_decimal::serde::str")]
    pub base_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub multiplier: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

impl From<RoomCost> for RoomCostResponse {
    fn from(room: RoomCost) -> Self {
        Self {
            requested: room.requested,
            priced_as: room.priced_as,
            source: room.source,
            nights: room.cost.nights,
            total: room.cost.total.into(),
            per_night_average: room.cost.per_night_average.into(),
            nightly: room
                .cost
                .nightly
                .into_iter()
                .map(|night| NightlyChargeResponse {
                    date: night.date,
                    weekend: night.weekend,
                    base_rate: night.base_rate,
                    multiplier: night.multiplier,
                    amount: night.amount,
                })
                .collect(),
        }
    }
}

/// Response for service fee calculation
#[derive(Debug, Serialize)]
pub struct ServiceFeesResponse {
    pub regime: FeeRegime,
    pub adult_fees: MoneyResponse,
    pub kids_fees: MoneyResponse,
    pub total_fees: MoneyResponse,
    pub charged_children: usize,
}

impl From<ServiceFeeBreakdown> for ServiceFeesResponse {
    fn from(fees: ServiceFeeBreakdown) -> Self {
        Self {
            regime: fees.regime,
            adult_fees: fees.adult_fees.into(),
            kids_fees: fees.kids_fees.into(),
            total_fees: fees.total_fees.into(),
            charged_children: fees.charged_children,
        }
    }
}

/// A priced add-on activity
#[derive(Debug, Serialize)]
pub struct ActivityLineResponse {
    pub requested: String,
    pub matched: String,
    #[serde(rename = "match")]
    pub kind: MatchKind,
    pub adult_cost: MoneyResponse,
    pub child_cost: MoneyResponse,
    pub total: MoneyResponse,
}

impl From<ActivityLine> for ActivityLineResponse {
    fn from(line: ActivityLine) -> Self {
        Self {
            requested: line.requested,
            matched: line.matched,
            kind: line.kind,
            adult_cost: line.adult_cost.into(),
            child_cost: line.child_cost.into(),
            total: line.total.into(),
        }
    }
}

/// Response for a full quote
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub hotel_id: Uuid,
    pub hotel_name: String,
    pub nights: u32,
    pub rooms: Vec<RoomCostResponse>,
    pub accommodation_cost: MoneyResponse,
    pub package_total: MoneyResponse,
    pub kids_package_cost: MoneyResponse,
    pub service_fees: ServiceFeesResponse,
    pub activities: Vec<ActivityLineResponse>,
    pub included_activities: Vec<String>,
    pub unmatched_activities: Vec<String>,
    pub activity_cost: MoneyResponse,
    pub transport_cost: MoneyResponse,
    pub grand_total: MoneyResponse,
    pub rounded_grand_total: MoneyResponse,
    pub price_per_person: MoneyResponse,
}

impl QuoteResponse {
    pub fn new(hotel_id: Uuid, hotel_name: String, quote: Quote) -> Self {
        Self {
            hotel_id,
            hotel_name,
            nights: quote.nights,
            rooms: quote.rooms.into_iter().map(Into::into).collect(),
            accommodation_cost: quote.accommodation_cost.into(),
            package_total: quote.package_total.into(),
            kids_package_cost: quote.kids_package_cost.into(),
            service_fees: quote.fees.into(),
            activities: quote.activities.into_iter().map(Into::into).collect(),
            included_activities: quote.included_activities,
            unmatched_activities: quote.unmatched_activities,
            activity_cost: quote.activity_cost.into(),
            transport_cost: quote.transport_cost.into(),
            grand_total: quote.grand_total.into(),
            rounded_grand_total: quote.rounded_grand_total.into(),
            price_per_person: quote.price_per_person.into(),
        }
    }
}

/// One hotel's entry in a comparison
#[derive(Debug, Serialize)]
pub struct HotelQuoteEntry {
    pub hotel_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<QuoteResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response for a hotel comparison
#[derive(Debug, Serialize)]
pub struct CompareQuotesResponse {
    pub quotes: Vec<HotelQuoteEntry>,
}

/// A matched catalog activity
#[derive(Debug, Serialize)]
pub struct MatchedActivityResponse {
    pub name: String,
    #[serde(rename = "match")]
    pub kind: MatchKind,
}

/// A ranked candidate
#[derive(Debug, Serialize)]
pub struct CandidateResponse {
    pub name: String,
    pub score: f64,
}

/// Response for activity name resolution
#[derive(Debug, Serialize)]
pub struct ActivityMatchResponse {
    pub query: String,
    pub normalized: String,
    pub matched: Option<MatchedActivityResponse>,
    pub candidates: Vec<CandidateResponse>,
}

/// Response for pricing a single activity
#[derive(Debug, Serialize)]
pub struct ActivityCostResponse {
    pub matched: Option<MatchedActivityResponse>,
    pub adult_cost: MoneyResponse,
    pub child_cost: MoneyResponse,
    pub total: MoneyResponse,
}

impl ActivityCostResponse {
    pub fn new(matched: Option<MatchedActivityResponse>, cost: ActivityCost) -> Self {
        Self {
            matched,
            adult_cost: cost.adult_cost.into(),
            child_cost: cost.child_cost.into(),
            total: cost.total.into(),
        }
    }
}

/// Generic pricing error response
#[derive(Debug, Serialize)]
pub struct PricingErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
