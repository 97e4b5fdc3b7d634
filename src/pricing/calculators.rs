//! Core money helpers.
//!
//! Pure functions for pricing math - no database access.

use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

/// Largest single price or rate the engine accepts, in rand.
pub const MAX_AMOUNT: Decimal = dec!(1000000000);

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. Used for informational figures such as
/// per-night averages, never for displayed quote totals.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use safari_quote::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Round a displayed currency figure to the nearest multiple of 10.
///
/// `round(x / 10) * 10`, with midpoints rounded away from zero. Quote figures
/// are never negative, so for every value we see this is round-half-up.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use safari_quote::pricing::round_to_nearest_10;
///
/// assert_eq!(round_to_nearest_10(dec!(1234)), dec!(1230));
/// assert_eq!(round_to_nearest_10(dec!(1235)), dec!(1240));
/// ```
pub fn round_to_nearest_10(amount: Decimal) -> Decimal {
    let tens =
        (amount / dec!(10)).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    (tens * dec!(10)).normalize()
}

/// Split a total evenly across `people` heads and round the share to the nearest 10.
///
/// Returns zero for an empty party instead of dividing by zero.
pub fn per_person_share(total: Decimal, people: usize) -> Decimal {
    if people == 0 {
        return Decimal::ZERO;
    }
    round_to_nearest_10(total / Decimal::from(people))
}

/// True for a price in `0..=MAX_AMOUNT`.
pub fn is_valid_amount(amount: Decimal) -> bool {
    amount >= Decimal::ZERO && amount <= MAX_AMOUNT
}

/// Sum money amounts, `None` on overflow.
pub fn checked_total<I>(amounts: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |total, amount| total.checked_add(amount))
}
