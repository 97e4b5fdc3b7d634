//! Quote aggregation.
//!
//! Combines room rates, package prices, child pricing, service fees and
//! activities into one [`Quote`]. Everything here is pure: the caller loads
//! rates and seasons up front and passes them in.

use rust_decimal::Decimal;

use super::activities::{match_activity, price_activity, Activity, MatchKind};
use super::calculators::{checked_total, per_person_share, round_to_nearest_10};
use super::children::{kids_package_cost, KidsPriceTier};
use super::fees::{calculate_service_fees, ServiceFeeBreakdown};
use super::rates::{room_cost, HotelRates, RoomCapacity, RoomCost};
use super::seasons::SeasonalPeriod;
use super::services::PricingError;
use super::stay::{Occupancy, Stay};

/// A sellable travel package.
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    pub name: String,
    /// Price per adult.
    pub base_price: Decimal,
    pub kids_price: Option<Decimal>,
    pub kids_price_tiers: Option<Vec<KidsPriceTier>>,
    /// Included activity names, already covered by `base_price`.
    pub activities_included: Vec<String>,
}

/// Everything needed to price one booking.
#[derive(Debug, Clone)]
pub struct QuoteInput<'a> {
    pub hotel: &'a HotelRates,
    pub seasons: &'a [SeasonalPeriod],
    pub stay: Stay,
    pub occupancy: &'a Occupancy,
    /// One entry per booked room.
    pub rooms: &'a [RoomCapacity],
    pub package: &'a Package,
    pub catalog: &'a [Activity],
    /// Freeform add-on activity names.
    pub selected_activities: &'a [String],
    /// Externally quoted bus/shuttle cost, added as-is.
    pub transport_cost: Decimal,
}

/// A priced add-on activity.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityLine {
    pub requested: String,
    pub matched: String,
    pub kind: MatchKind,
    pub adult_cost: Decimal,
    pub child_cost: Decimal,
    pub total: Decimal,
}

/// Final price for a booking.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub nights: u32,
    pub rooms: Vec<RoomCost>,
    pub accommodation_cost: Decimal,
    pub package_total: Decimal,
    pub kids_package_cost: Decimal,
    pub fees: ServiceFeeBreakdown,
    pub service_fees: Decimal,
    pub activities: Vec<ActivityLine>,
    /// Catalog names of the package's included activities.
    pub included_activities: Vec<String>,
    pub unmatched_activities: Vec<String>,
    pub activity_cost: Decimal,
    pub transport_cost: Decimal,
    pub grand_total: Decimal,
    pub rounded_grand_total: Decimal,
    pub price_per_person: Decimal,
}

/// Price a booking.
///
/// Fails when a room cannot be priced at all or a total does not fit in a
/// `Decimal`. Unknown activity names are skipped and listed in
/// `unmatched_activities`. Add-ons that resolve to an activity the package
/// already includes are not charged again.
pub fn calculate_quote(input: &QuoteInput<'_>) -> Result<Quote, PricingError> {
    if input.rooms.is_empty() {
        return Err(PricingError::InvalidInput {
            message: "at least one room is required".to_string(),
        });
    }

    let occupancy = input.occupancy;
    let children = &occupancy.children;

    if input.stay.is_clamped() {
        tracing::warn!(
            check_in = %input.stay.check_in,
            check_out = %input.stay.check_out,
            "Check-out is not after check-in, pricing a single night"
        );
    }

    let rooms = input
        .rooms
        .iter()
        .map(|&capacity| room_cost(input.hotel, capacity, &input.stay, input.seasons))
        .collect::<Result<Vec<_>, _>>()?;
    let accommodation_cost =
        checked_total(rooms.iter().map(|room| room.cost.total)).ok_or_else(|| overflow("rooms"))?;

    let package_total = input
        .package
        .base_price
        .checked_mul(Decimal::from(occupancy.adults))
        .ok_or_else(|| overflow("package"))?;
    let kids_package_cost =
        kids_package_cost(input.package, children).ok_or_else(|| overflow("kids package"))?;

    let fees = calculate_service_fees(occupancy.adults, children);

    let included: Vec<&Activity> = input
        .package
        .activities_included
        .iter()
        .filter_map(|name| match_activity(name, input.catalog).map(|found| found.activity))
        .collect();

    let mut activities = Vec::new();
    let mut unmatched_activities = Vec::new();
    for name in input.selected_activities {
        match match_activity(name, input.catalog) {
            Some(found) if included.iter().any(|a| a.name == found.activity.name) => {
                tracing::debug!(activity = %name, "Activity already included in package");
            }
            Some(found) => {
                let cost = price_activity(found.activity, occupancy.adults, children);
                activities.push(ActivityLine {
                    requested: name.clone(),
                    matched: found.activity.name.clone(),
                    kind: found.kind,
                    adult_cost: cost.adult_cost,
                    child_cost: cost.child_cost,
                    total: cost.total,
                });
            }
            None => {
                tracing::warn!(activity = %name, "No catalog match for activity, skipping");
                unmatched_activities.push(name.clone());
            }
        }
    }
    let activity_cost = checked_total(activities.iter().map(|line| line.total))
        .ok_or_else(|| overflow("activities"))?;

    let grand_total = checked_total([
        accommodation_cost,
        package_total,
        kids_package_cost,
        fees.total_fees,
        activity_cost,
        input.transport_cost,
    ])
    .ok_or_else(|| overflow("grand total"))?;

    let price_per_person = per_person_share(grand_total, occupancy.group_size());

    tracing::debug!(
        hotel = %input.hotel.name,
        nights = input.stay.nights(),
        rooms = rooms.len(),
        %grand_total,
        %price_per_person,
        "Quote calculated"
    );

    Ok(Quote {
        nights: input.stay.nights(),
        rooms,
        accommodation_cost,
        package_total,
        kids_package_cost,
        service_fees: fees.total_fees,
        fees,
        activities,
        included_activities: included.iter().map(|a| a.name.clone()).collect(),
        unmatched_activities,
        activity_cost,
        transport_cost: input.transport_cost,
        grand_total,
        rounded_grand_total: round_to_nearest_10(grand_total),
        price_per_person,
    })
}

fn overflow(what: &str) -> PricingError {
    PricingError::InvalidInput {
        message: format!("{} total is too large to price", what),
    }
}
