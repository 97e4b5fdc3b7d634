//! Age-based child pricing rules.
//!
//! Three independent questions get asked about every child:
//! what they add to the package price, what they add to an activity, and
//! whether they attract a service fee. Each uses its own age brackets.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::activities::ActivityRates;
use super::calculators::checked_total;
use super::quote::Package;

/// Youngest age that attracts a service fee.
pub const FEE_MIN_AGE: u8 = 4;
/// Oldest age that attracts a service fee.
pub const FEE_MAX_AGE: u8 = 16;

/// Inclusive age bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    pub min: u8,
    pub max: u8,
}

impl AgeRange {
    pub fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, age: u8) -> bool {
        self.min <= age && age <= self.max
    }
}

/// A package price for children within an age bracket.
#[derive(Debug, Clone, PartialEq)]
pub struct KidsPriceTier {
    pub ages: AgeRange,
    pub price: Decimal,
}

/// What one child adds to the package price.
///
/// The first matching tier wins. Without a matching tier the flat kids price
/// applies; without either the child travels on the package for free.
pub fn package_child_price(package: &Package, age: u8) -> Decimal {
    let tier_price = package
        .kids_price_tiers
        .as_deref()
        .and_then(|tiers| tiers.iter().find(|tier| tier.ages.contains(age)))
        .map(|tier| tier.price);

    tier_price
        .or(package.kids_price)
        .unwrap_or(Decimal::ZERO)
}

/// Package cost for all children on the booking, `None` on overflow.
pub fn kids_package_cost(package: &Package, ages: &[u8]) -> Option<Decimal> {
    checked_total(ages.iter().map(|&age| package_child_price(package, age)))
}

/// What one child adds to an activity.
///
/// Children under the free age go free. A declared age range gates
/// eligibility entirely: ages outside it are free, not charged as adults.
pub fn activity_child_price(rates: &ActivityRates, age: u8) -> Decimal {
    if age < rates.free_age {
        return Decimal::ZERO;
    }
    match rates.child_age_range {
        Some(range) if !range.contains(age) => Decimal::ZERO,
        _ => rates.child,
    }
}

/// Service fees only apply to children aged 4 to 16 inclusive.
pub fn is_fee_eligible(age: u8) -> bool {
    (FEE_MIN_AGE..=FEE_MAX_AGE).contains(&age)
}
