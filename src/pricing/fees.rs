//! Service fees for a travelling group.
//!
//! Small groups pay a per-adult fee that drops as the adult count grows.
//! Groups of 25 or more heads switch to a flat per-head regime.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::children::is_fee_eligible;

/// Head count (adults plus all children) at which the flat group regime starts.
pub const GROUP_THRESHOLD: usize = 25;

const GROUP_ADULT_FEE: Decimal = dec!(400);
const GROUP_CHILD_FEE: Decimal = dec!(150);
const GROUP_LONE_ADULT_CHILD_FEE: Decimal = dec!(300);
const CHILD_FEE: Decimal = dec!(150);
const LONE_ADULT_FIRST_CHILD_FEE: Decimal = dec!(450);

/// Which fee schedule applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeRegime {
    Tiered,
    Group,
}

/// Service fee totals for a group
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceFeeBreakdown {
    pub regime: FeeRegime,
    pub adult_fees: Decimal,
    pub kids_fees: Decimal,
    pub total_fees: Decimal,
    /// Children that were charged a fee.
    pub charged_children: usize,
}

impl ServiceFeeBreakdown {
    fn new(
        regime: FeeRegime,
        adult_fees: Decimal,
        kids_fees: Decimal,
        charged_children: usize,
    ) -> Self {
        Self {
            regime,
            adult_fees,
            kids_fees,
            total_fees: adult_fees + kids_fees,
            charged_children,
        }
    }
}

/// Per-adult fee for groups under the threshold.
pub fn tiered_adult_fee(adults: u32) -> Decimal {
    match adults {
        0 => Decimal::ZERO,
        1 => dec!(1000),
        2..=3 => dec!(850),
        4..=9 => dec!(800),
        _ => dec!(750),
    }
}

fn regime_for(group_size: usize) -> FeeRegime {
    if group_size >= GROUP_THRESHOLD {
        FeeRegime::Group
    } else {
        FeeRegime::Tiered
    }
}

fn adult_fees(regime: FeeRegime, adults: u32) -> Decimal {
    let per_adult = match regime {
        FeeRegime::Group => GROUP_ADULT_FEE,
        FeeRegime::Tiered => tiered_adult_fee(adults),
    };
    per_adult * Decimal::from(adults)
}

/// Service fees from adult count and each child's age.
///
/// Only children aged 4-16 are charged. In the tiered regime a lone adult
/// pays 450 for the first such child in booking order and 150 for each later
/// one. This is the formulation used when quoting.
pub fn calculate_service_fees(adults: u32, child_ages: &[u8]) -> ServiceFeeBreakdown {
    let regime = regime_for(adults as usize + child_ages.len());
    let eligible = child_ages.iter().filter(|&&age| is_fee_eligible(age)).count();

    let kids_fees = match regime {
        FeeRegime::Group => group_child_fee(adults) * Decimal::from(eligible),
        FeeRegime::Tiered if adults >= 2 => CHILD_FEE * Decimal::from(eligible),
        FeeRegime::Tiered => child_ages
            .iter()
            .filter(|&&age| is_fee_eligible(age))
            .enumerate()
            .map(|(position, _)| {
                if position == 0 {
                    LONE_ADULT_FIRST_CHILD_FEE
                } else {
                    CHILD_FEE
                }
            })
            .sum(),
    };

    ServiceFeeBreakdown::new(regime, adult_fees(regime, adults), kids_fees, eligible)
}

/// Service fees from adult count and a bare child head count.
///
/// Used where only the number of children is known, not their ages, so every
/// child is charged. Agrees with [`calculate_service_fees`] only when all
/// children are in the 4-16 band.
pub fn calculate_service_fees_by_count(adults: u32, child_count: usize) -> ServiceFeeBreakdown {
    let regime = regime_for(adults as usize + child_count);

    let kids_fees = match regime {
        FeeRegime::Group => group_child_fee(adults) * Decimal::from(child_count),
        FeeRegime::Tiered if adults >= 2 => CHILD_FEE * Decimal::from(child_count),
        FeeRegime::Tiered => lone_adult_child_fees(child_count),
    };

    ServiceFeeBreakdown::new(regime, adult_fees(regime, adults), kids_fees, child_count)
}

/// Lone-adult child fees by head count: 450 for one child, 450 + 150 for each extra.
pub fn lone_adult_child_fees(child_count: usize) -> Decimal {
    match child_count {
        0 => Decimal::ZERO,
        1 => LONE_ADULT_FIRST_CHILD_FEE,
        n => LONE_ADULT_FIRST_CHILD_FEE + CHILD_FEE * Decimal::from(n - 1),
    }
}

fn group_child_fee(adults: u32) -> Decimal {
    if adults >= 2 {
        GROUP_CHILD_FEE
    } else {
        GROUP_LONE_ADULT_CHILD_FEE
    }
}
