//! Nightly room rate resolution.
//!
//! Each night of a stay is priced independently: pick the rate record that is
//! in effect for that date, take its weekday or weekend rate, then apply the
//! seasonal multiplier for that same date. A stay can therefore straddle both a
//! rate change and a season boundary.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::calculators::round_money;
use super::seasons::{multiplier_for, SeasonalPeriod};
use super::services::PricingError;
use super::stay::{is_weekend, Stay};

/// Sleeping capacity of a room type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomCapacity {
    #[serde(rename = "2-sleeper")]
    TwoSleeper,
    #[serde(rename = "4-sleeper")]
    FourSleeper,
}

impl RoomCapacity {
    pub fn sleeps(self) -> u32 {
        match self {
            RoomCapacity::TwoSleeper => 2,
            RoomCapacity::FourSleeper => 4,
        }
    }

    /// The other capacity, tried when the requested one has no rate.
    pub fn alternate(self) -> Self {
        match self {
            RoomCapacity::TwoSleeper => RoomCapacity::FourSleeper,
            RoomCapacity::FourSleeper => RoomCapacity::TwoSleeper,
        }
    }

    pub fn from_sleeps(sleeps: i32) -> Option<Self> {
        match sleeps {
            2 => Some(RoomCapacity::TwoSleeper),
            4 => Some(RoomCapacity::FourSleeper),
            _ => None,
        }
    }
}

impl std::fmt::Display for RoomCapacity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-sleeper", self.sleeps())
    }
}

/// A rate snapshot for one room type, valid for a date window.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomRate {
    pub room_type_id: Uuid,
    pub capacity: RoomCapacity,
    pub weekday_rate: Decimal,
    pub weekend_rate: Decimal,
    /// Open start when `None`.
    pub effective_from: Option<NaiveDate>,
    /// Exclusive. Open end when `None`.
    pub effective_to: Option<NaiveDate>,
}

impl RoomRate {
    /// An always-valid rate record, handy for live API results without validity dates.
    pub fn open_ended(
        room_type_id: Uuid,
        capacity: RoomCapacity,
        weekday_rate: Decimal,
        weekend_rate: Decimal,
    ) -> Self {
        Self {
            room_type_id,
            capacity,
            weekday_rate,
            weekend_rate,
            effective_from: None,
            effective_to: None,
        }
    }

    /// Check if this rate is in effect on the given night
    pub fn covers(&self, date: NaiveDate) -> bool {
        if let Some(from) = self.effective_from {
            if from > date {
                return false;
            }
        }
        match self.effective_to {
            Some(end) => date < end,
            None => true,
        }
    }

    /// Weekday or weekend base rate for a night, before seasonal adjustment.
    pub fn base_rate_for(&self, date: NaiveDate) -> Decimal {
        if is_weekend(date) {
            self.weekend_rate
        } else {
            self.weekday_rate
        }
    }
}

/// All rate records for one hotel plus its last-resort minimum nightly rate.
#[derive(Debug, Clone, PartialEq)]
pub struct HotelRates {
    pub hotel_id: Uuid,
    pub name: String,
    pub minimum_rate: Option<Decimal>,
    pub rates: Vec<RoomRate>,
}

/// One priced night.
#[derive(Debug, Clone, PartialEq)]
pub struct NightlyCharge {
    pub date: NaiveDate,
    pub weekend: bool,
    pub base_rate: Decimal,
    pub multiplier: Decimal,
    pub amount: Decimal,
}

/// Cost of one room for the whole stay.
#[derive(Debug, Clone, PartialEq)]
pub struct StayCost {
    pub total: Decimal,
    pub nights: u32,
    pub per_night_average: Decimal,
    pub nightly: Vec<NightlyCharge>,
}

impl StayCost {
    fn from_nightly(nightly: Vec<NightlyCharge>, nights: u32) -> Self {
        let total: Decimal = nightly.iter().map(|n| n.amount).sum();
        let per_night_average = round_money(total / Decimal::from(nights.max(1)), 2);
        Self {
            total,
            nights,
            per_night_average,
            nightly,
        }
    }
}

/// Where the nightly rates for a room came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    Exact,
    AlternateCapacity,
    HotelMinimum,
}

/// Resolved cost for one booked room.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomCost {
    pub requested: RoomCapacity,
    pub priced_as: Option<RoomCapacity>,
    pub source: RateSource,
    pub cost: StayCost,
}

/// Price a stay against a single rate snapshot.
///
/// Validity dates on `room` are ignored; the snapshot is taken as fixed for
/// the quote.
pub fn price_stay(room: &RoomRate, stay: &Stay, seasons: &[SeasonalPeriod]) -> StayCost {
    let nightly = stay
        .night_dates()
        .map(|date| charge_night(date, room.base_rate_for(date), seasons))
        .collect();
    StayCost::from_nightly(nightly, stay.nights())
}

/// The rate record in effect for `capacity` on `date`.
///
/// When several records cover the date, the most recently effective one wins.
pub fn resolve_nightly_rate(
    rates: &[RoomRate],
    capacity: RoomCapacity,
    date: NaiveDate,
) -> Option<&RoomRate> {
    rates
        .iter()
        .filter(|rate| rate.capacity == capacity && rate.covers(date))
        .fold(None, |best: Option<&RoomRate>, rate| match best {
            Some(current) if current.effective_from >= rate.effective_from => Some(current),
            _ => Some(rate),
        })
}

/// Price a stay for one capacity, resolving the rate record night by night.
///
/// Fails with [`PricingError::NoRate`] on the first night without a rate; it
/// never substitutes zero.
pub fn stay_cost(
    rates: &[RoomRate],
    capacity: RoomCapacity,
    stay: &Stay,
    seasons: &[SeasonalPeriod],
) -> Result<StayCost, PricingError> {
    let nightly = stay
        .night_dates()
        .map(|date| -> Result<NightlyCharge, PricingError> {
            let rate = resolve_nightly_rate(rates, capacity, date)
                .ok_or(PricingError::NoRate { capacity, date })?;
            Ok(charge_night(date, rate.base_rate_for(date), seasons))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(StayCost::from_nightly(nightly, stay.nights()))
}

/// Price one room with the fallback chain: requested capacity, then the
/// alternate capacity, then the hotel's minimum nightly rate.
pub fn room_cost(
    hotel: &HotelRates,
    requested: RoomCapacity,
    stay: &Stay,
    seasons: &[SeasonalPeriod],
) -> Result<RoomCost, PricingError> {
    let first_miss = match stay_cost(&hotel.rates, requested, stay, seasons) {
        Ok(cost) => {
            return Ok(RoomCost {
                requested,
                priced_as: Some(requested),
                source: RateSource::Exact,
                cost,
            })
        }
        Err(err) => err,
    };

    let alternate = requested.alternate();
    if let Ok(cost) = stay_cost(&hotel.rates, alternate, stay, seasons) {
        tracing::info!(
            hotel = %hotel.name,
            %requested,
            %alternate,
            "No rate for requested room, priced with alternate capacity"
        );
        return Ok(RoomCost {
            requested,
            priced_as: Some(alternate),
            source: RateSource::AlternateCapacity,
            cost,
        });
    }

    if let Some(minimum) = hotel.minimum_rate {
        tracing::info!(
            hotel = %hotel.name,
            %requested,
            %minimum,
            "No room rate available, priced with hotel minimum rate"
        );
        let nightly = stay
            .night_dates()
            .map(|date| charge_night(date, minimum, seasons))
            .collect();
        return Ok(RoomCost {
            requested,
            priced_as: None,
            source: RateSource::HotelMinimum,
            cost: StayCost::from_nightly(nightly, stay.nights()),
        });
    }

    Err(first_miss)
}

fn charge_night(date: NaiveDate, base_rate: Decimal, seasons: &[SeasonalPeriod]) -> NightlyCharge {
    let multiplier = multiplier_for(date, seasons);
    NightlyCharge {
        date,
        weekend: is_weekend(date),
        base_rate,
        multiplier,
        amount: base_rate * multiplier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn standard_room() -> RoomRate {
        RoomRate::open_ended(Uuid::new_v4(), RoomCapacity::TwoSleeper, dec!(1000), dec!(1300))
    }

    fn hotel(rates: Vec<RoomRate>, minimum_rate: Option<Decimal>) -> HotelRates {
        HotelRates {
            hotel_id: Uuid::new_v4(),
            name: "Umhlanga Sands".to_string(),
            minimum_rate,
            rates,
        }
    }

    // ==================== price_stay tests ====================

    #[test]
    fn test_weekday_plus_weekend_night() {
        // Thursday + Friday night
        let stay = Stay::new(date(2025, 6, 12), date(2025, 6, 14));
        let cost = price_stay(&standard_room(), &stay, &[]);

        assert_eq!(cost.nights, 2);
        assert_eq!(cost.total, dec!(1000) + dec!(1300));
        assert!(!cost.nightly[0].weekend);
        assert!(cost.nightly[1].weekend);
        assert_eq!(cost.per_night_average, dec!(1150));
    }

    #[test]
    fn test_seasonal_multiplier_single_night() {
        // Monday, inside a 1.5x season
        let seasons = vec![SeasonalPeriod::new(
            "Winter school holidays",
            date(2025, 6, 27),
            date(2025, 7, 21),
            dec!(1.5),
        )
        .unwrap()];
        let stay = Stay::new(date(2025, 7, 14), date(2025, 7, 15));
        let cost = price_stay(&standard_room(), &stay, &seasons);

        assert_eq!(cost.total, dec!(1500));
        assert_eq!(cost.nightly[0].multiplier, dec!(1.5));
    }

    #[test]
    fn test_season_applied_per_night_across_boundary() {
        // Season starts on the second night (Tue 2025-07-01 -> Wed 2025-07-02)
        let seasons = vec![SeasonalPeriod::new(
            "July peak",
            date(2025, 7, 1),
            date(2025, 7, 31),
            dec!(1.2),
        )
        .unwrap()];
        let stay = Stay::new(date(2025, 6, 30), date(2025, 7, 2));
        let cost = price_stay(&standard_room(), &stay, &seasons);

        assert_eq!(cost.total, dec!(1000) + dec!(1200));
    }

    #[test]
    fn test_clamped_stay_prices_one_night() {
        let stay = Stay::new(date(2025, 3, 4), date(2025, 3, 4));
        let cost = price_stay(&standard_room(), &stay, &[]);
        assert_eq!(cost.nights, 1);
        assert_eq!(cost.total, dec!(1000));
    }

    // ==================== resolve_nightly_rate tests ====================

    #[test]
    fn test_resolve_uses_effective_window() {
        let id = Uuid::new_v4();
        let old = RoomRate {
            room_type_id: id,
            capacity: RoomCapacity::TwoSleeper,
            weekday_rate: dec!(900),
            weekend_rate: dec!(1100),
            effective_from: Some(date(2025, 1, 1)),
            effective_to: Some(date(2025, 7, 1)),
        };
        let new = RoomRate {
            weekday_rate: dec!(950),
            weekend_rate: dec!(1200),
            effective_from: Some(date(2025, 7, 1)),
            effective_to: None,
            ..old.clone()
        };
        let rates = vec![old, new];

        let two = RoomCapacity::TwoSleeper;
        let june = resolve_nightly_rate(&rates, two, date(2025, 6, 30)).unwrap();
        assert_eq!(june.weekday_rate, dec!(900));
        // effective_to is exclusive
        let july = resolve_nightly_rate(&rates, two, date(2025, 7, 1)).unwrap();
        assert_eq!(july.weekday_rate, dec!(950));
        assert!(resolve_nightly_rate(&rates, two, date(2024, 12, 31)).is_none());
        let four = RoomCapacity::FourSleeper;
        assert!(resolve_nightly_rate(&rates, four, date(2025, 7, 1)).is_none());
    }

    #[test]
    fn test_resolve_prefers_latest_effective_from() {
        let id = Uuid::new_v4();
        let base = RoomRate {
            room_type_id: id,
            capacity: RoomCapacity::FourSleeper,
            weekday_rate: dec!(1800),
            weekend_rate: dec!(2100),
            effective_from: Some(date(2025, 1, 1)),
            effective_to: None,
        };
        let promo = RoomRate {
            weekday_rate: dec!(1600),
            effective_from: Some(date(2025, 5, 1)),
            ..base.clone()
        };
        let rates = vec![base, promo];
        let rate =
            resolve_nightly_rate(&rates, RoomCapacity::FourSleeper, date(2025, 5, 5)).unwrap();
        assert_eq!(rate.weekday_rate, dec!(1600));
    }

    #[test]
    fn test_stay_cost_straddles_rate_change() {
        let id = Uuid::new_v4();
        let rates = vec![
            RoomRate {
                room_type_id: id,
                capacity: RoomCapacity::TwoSleeper,
                weekday_rate: dec!(900),
                weekend_rate: dec!(1100),
                effective_from: None,
                effective_to: Some(date(2025, 7, 1)),
            },
            RoomRate {
                room_type_id: id,
                capacity: RoomCapacity::TwoSleeper,
                weekday_rate: dec!(950),
                weekend_rate: dec!(1200),
                effective_from: Some(date(2025, 7, 1)),
                effective_to: None,
            },
        ];
        // Mon 30 June + Tue 1 July
        let stay = Stay::new(date(2025, 6, 30), date(2025, 7, 2));
        let cost = stay_cost(&rates, RoomCapacity::TwoSleeper, &stay, &[]).unwrap();
        assert_eq!(cost.total, dec!(1850));
    }

    #[test]
    fn test_stay_cost_reports_missing_night() {
        let rates = vec![RoomRate {
            effective_to: Some(date(2025, 6, 1)),
            ..standard_room()
        }];
        let stay = Stay::new(date(2025, 5, 31), date(2025, 6, 2));
        let err = stay_cost(&rates, RoomCapacity::TwoSleeper, &stay, &[]).unwrap_err();
        assert_eq!(
            err,
            PricingError::NoRate {
                capacity: RoomCapacity::TwoSleeper,
                date: date(2025, 6, 1),
            }
        );
    }

    // ==================== room_cost fallback tests ====================

    #[test]
    fn test_room_cost_exact_match() {
        let hotel = hotel(vec![standard_room()], Some(dec!(500)));
        let stay = Stay::new(date(2025, 3, 3), date(2025, 3, 4));
        let room = room_cost(&hotel, RoomCapacity::TwoSleeper, &stay, &[]).unwrap();
        assert_eq!(room.source, RateSource::Exact);
        assert_eq!(room.priced_as, Some(RoomCapacity::TwoSleeper));
        assert_eq!(room.cost.total, dec!(1000));
    }

    #[test]
    fn test_room_cost_falls_back_to_alternate_capacity() {
        let hotel = hotel(vec![standard_room()], Some(dec!(500)));
        let stay = Stay::new(date(2025, 3, 3), date(2025, 3, 4));
        let room = room_cost(&hotel, RoomCapacity::FourSleeper, &stay, &[]).unwrap();
        assert_eq!(room.source, RateSource::AlternateCapacity);
        assert_eq!(room.priced_as, Some(RoomCapacity::TwoSleeper));
        assert_eq!(room.cost.total, dec!(1000));
    }

    #[test]
    fn test_room_cost_falls_back_to_hotel_minimum() {
        let hotel = hotel(vec![], Some(dec!(750)));
        let peak = SeasonalPeriod::new("Peak", date(2025, 3, 1), date(2025, 3, 31), dec!(2));
        let seasons = vec![peak.unwrap()];
        let stay = Stay::new(date(2025, 3, 3), date(2025, 3, 5));
        let room = room_cost(&hotel, RoomCapacity::FourSleeper, &stay, &seasons).unwrap();
        assert_eq!(room.source, RateSource::HotelMinimum);
        assert_eq!(room.priced_as, None);
        assert_eq!(room.cost.total, dec!(3000));
    }

    #[test]
    fn test_room_cost_no_rate_at_all() {
        let hotel = hotel(vec![], None);
        let stay = Stay::new(date(2025, 3, 3), date(2025, 3, 4));
        let err = room_cost(&hotel, RoomCapacity::FourSleeper, &stay, &[]).unwrap_err();
        assert!(matches!(
            err,
            PricingError::NoRate { capacity: RoomCapacity::FourSleeper, .. }
        ));
    }

    #[test]
    fn test_capacity_helpers() {
        assert_eq!(RoomCapacity::TwoSleeper.alternate(), RoomCapacity::FourSleeper);
        assert_eq!(RoomCapacity::from_sleeps(4), Some(RoomCapacity::FourSleeper));
        assert_eq!(RoomCapacity::from_sleeps(3), None);
        assert_eq!(RoomCapacity::TwoSleeper.to_string(), "2-sleeper");
    }
}
