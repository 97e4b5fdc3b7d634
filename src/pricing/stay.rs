//! Stay dates and group composition.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Check-in/check-out pair for a booking.
///
/// `check_out` is exclusive: the night of `check_out` is not paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stay {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl Stay {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self { check_in, check_out }
    }

    /// Number of paid nights, never less than one.
    ///
    /// A reversed or empty range still renders as a one-night stay.
    pub fn nights(&self) -> u32 {
        let days = (self.check_out - self.check_in).num_days();
        days.max(1) as u32
    }

    /// Calendar dates of each paid night, starting at check-in.
    pub fn night_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..i64::from(self.nights())).map(move |offset| self.check_in + Duration::days(offset))
    }

    /// True when check-out is not after check-in.
    pub fn is_clamped(&self) -> bool {
        self.check_out <= self.check_in
    }
}

/// Friday, Saturday and Sunday nights are charged at the weekend rate.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Fri | Weekday::Sat | Weekday::Sun)
}

/// Who is travelling: adult head count plus each child's age.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupancy {
    pub adults: u32,
    /// Ages in the order they were entered on the booking form.
    pub children: Vec<u8>,
    pub rooms: u32,
}

impl Occupancy {
    pub fn new(adults: u32, children: Vec<u8>, rooms: u32) -> Self {
        Self {
            adults,
            children,
            rooms: rooms.max(1),
        }
    }

    pub fn group_size(&self) -> usize {
        self.adults as usize + self.children.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_nights_counts_days_between() {
        let stay = Stay::new(date(2025, 3, 3), date(2025, 3, 6));
        assert_eq!(stay.nights(), 3);
        assert!(!stay.is_clamped());
    }

    #[test]
    fn test_nights_clamps_to_one() {
        let same_day = Stay::new(date(2025, 3, 3), date(2025, 3, 3));
        assert_eq!(same_day.nights(), 1);
        assert!(same_day.is_clamped());

        let reversed = Stay::new(date(2025, 3, 6), date(2025, 3, 3));
        assert_eq!(reversed.nights(), 1);
    }

    #[test]
    fn test_night_dates_excludes_check_out() {
        let stay = Stay::new(date(2024, 12, 30), date(2025, 1, 2));
        let nights: Vec<_> = stay.night_dates().collect();
        assert_eq!(nights, vec![date(2024, 12, 30), date(2024, 12, 31), date(2025, 1, 1)]);
    }

    #[test]
    fn test_night_dates_clamped_prices_check_in() {
        let stay = Stay::new(date(2025, 3, 6), date(2025, 3, 3));
        let nights: Vec<_> = stay.night_dates().collect();
        assert_eq!(nights, vec![date(2025, 3, 6)]);
    }

    #[test]
    fn test_is_weekend() {
        // 2025-03-03 is a Monday
        assert!(!is_weekend(date(2025, 3, 3)));
        assert!(!is_weekend(date(2025, 3, 6))); // Thursday
        assert!(is_weekend(date(2025, 3, 7))); // Friday
        assert!(is_weekend(date(2025, 3, 8))); // Saturday
        assert!(is_weekend(date(2025, 3, 9))); // Sunday
    }

    #[test]
    fn test_occupancy_group_size() {
        let occupancy = Occupancy::new(2, vec![3, 9, 16], 0);
        assert_eq!(occupancy.group_size(), 5);
        assert_eq!(occupancy.rooms, 1);
    }
}
