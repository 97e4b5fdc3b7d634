//! Quote engine for travel packages.
//!
//! Prices a multi-night stay for a group: nightly room rates with weekend and
//! seasonal adjustment, package prices, child pricing, service fees and add-on
//! activities. The engine modules are pure; `services` loads provider data
//! and `routes` exposes it over HTTP/JSON.

pub mod activities;
pub mod calculators;
pub mod catalog;
pub mod children;
pub mod fees;
pub mod models;
pub mod queries;
pub mod quote;
pub mod rates;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod seasons;
pub mod services;
pub mod stay;

// Re-export commonly used items
pub use calculators::{round_money, round_to_nearest_10};
pub use catalog::Destination;
pub use quote::{calculate_quote, Package, Quote, QuoteInput};
pub use rates::{HotelRates, RoomCapacity, RoomRate};
pub use routes::router;
pub use seasons::SeasonalPeriod;
pub use services::PricingError;
pub use stay::{Occupancy, Stay};
