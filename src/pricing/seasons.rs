//! Seasonal rate multipliers.
//!
//! A season is an inclusive date range with a multiplier applied to the base
//! nightly rate. Seasons may overlap; the highest multiplier wins.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::services::PricingError;

/// Largest accepted seasonal multiplier.
pub const MAX_MULTIPLIER: Decimal = Decimal::ONE_HUNDRED;

/// A named date range with a rate multiplier (e.g. "December holidays" at 1.5).
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalPeriod {
    pub name: String,
    pub start_date: NaiveDate,
    /// Inclusive.
    pub end_date: NaiveDate,
    pub multiplier: Decimal,
}

impl SeasonalPeriod {
    /// Build a period, rejecting multipliers outside `(0, MAX_MULTIPLIER]` and
    /// reversed ranges.
    pub fn new(
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        multiplier: Decimal,
    ) -> Result<Self, PricingError> {
        let name = name.into();
        if multiplier <= Decimal::ZERO || multiplier > MAX_MULTIPLIER {
            return Err(PricingError::InvalidSeason {
                name,
                reason: format!(
                    "multiplier must be above 0 and at most {}, got {}",
                    MAX_MULTIPLIER, multiplier
                ),
            });
        }
        if end_date < start_date {
            return Err(PricingError::InvalidSeason {
                name,
                reason: format!("end date {} is before start date {}", end_date, start_date),
            });
        }
        Ok(Self {
            name,
            start_date,
            end_date,
            multiplier,
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// The period that applies to `date`, if any.
///
/// Among overlapping periods the highest multiplier wins. Equal multipliers
/// resolve to whichever period comes first in `periods`.
pub fn applicable_period(date: NaiveDate, periods: &[SeasonalPeriod]) -> Option<&SeasonalPeriod> {
    periods
        .iter()
        .filter(|period| period.contains(date))
        .fold(None, |best: Option<&SeasonalPeriod>, period| match best {
            Some(current) if current.multiplier >= period.multiplier => Some(current),
            _ => Some(period),
        })
}

/// Multiplier for a single night. `1` when no season covers the date.
pub fn multiplier_for(date: NaiveDate, periods: &[SeasonalPeriod]) -> Decimal {
    applicable_period(date, periods)
        .map(|period| period.multiplier)
        .unwrap_or(Decimal::ONE)
}
