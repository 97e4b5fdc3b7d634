//! Destination activity catalogs.
//!
//! Every destination we sell maps to a fixed list of bookable activities with
//! their per-head rates. Adding a destination means adding a variant here, so
//! there is no way to look up a destination that has no catalog.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::activities::{Activity, ActivityRates};
use super::children::AgeRange;

/// Destinations with an activity catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    Durban,
    CapeTown,
    Drakensberg,
    SunCity,
}

impl Destination {
    pub const ALL: [Destination; 4] = [
        Destination::Durban,
        Destination::CapeTown,
        Destination::Drakensberg,
        Destination::SunCity,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Destination::Durban => "Durban",
            Destination::CapeTown => "Cape Town",
            Destination::Drakensberg => "Drakensberg",
            Destination::SunCity => "Sun City",
        }
    }

    /// Bookable activities for this destination.
    pub fn activities(self) -> Vec<Activity> {
        match self {
            Destination::Durban => vec![
                per_head("uShaka Marine World & Wet 'n Wild", dec!(395), dec!(310), 3, None),
                per_head("uShaka Sea World", dec!(245), dec!(185), 3, None),
                per_head("Durban Harbour Cruise (2 Hours)", dec!(250), dec!(150), 4, None),
                per_head("Durban City Bus Tour", dec!(180), dec!(90), 4, None),
                per_head("Moses Mabhida Stadium SkyCar", dec!(90), dec!(45), 3, None),
                per_head(
                    "Big Rush Big Swing",
                    dec!(750),
                    dec!(750),
                    12,
                    Some(AgeRange::new(12, 17)),
                ),
                shuttle("King Shaka Airport Shuttle", dec!(1200)),
            ],
            Destination::CapeTown => vec![
                per_head("Table Mountain Aerial Cableway", dec!(420), dec!(210), 4, None),
                per_head("Robben Island Tour", dec!(600), dec!(330), 4, None),
                per_head("Cape Point & Peninsula Bus Tour", dec!(950), dec!(650), 3, None),
                per_head("V&A Waterfront Sunset Cruise", dec!(380), dec!(190), 4, None),
                per_head("Two Oceans Aquarium", dec!(275), dec!(135), 4, None),
                shuttle("Cape Town Airport Shuttle", dec!(950)),
            ],
            Destination::Drakensberg => vec![
                per_head(
                    "Tugela Falls Guided Hike",
                    dec!(350),
                    dec!(175),
                    6,
                    Some(AgeRange::new(6, 17)),
                ),
                per_head(
                    "Drakensberg Canopy Tour",
                    dec!(695),
                    dec!(595),
                    7,
                    Some(AgeRange::new(7, 17)),
                ),
                per_head("Horse Riding (1 Hour)", dec!(300), dec!(250), 8, None),
                per_head("Giants Castle Bushman Rock Art Tour", dec!(150), dec!(80), 4, None),
                shuttle("Drakensberg Resort Shuttle", dec!(2800)),
            ],
            Destination::SunCity => vec![
                per_head("Valley of Waves", dec!(250), dec!(150), 3, None),
                per_head("Pilanesberg Game Drive (3 Hours)", dec!(695), dec!(350), 6, None),
                per_head("Zipline Sun City", dec!(595), dec!(595), 8, Some(AgeRange::new(8, 17))),
                per_head("Maze of the Lost City", dec!(120), dec!(90), 4, None),
                shuttle("Johannesburg to Sun City Shuttle", dec!(3500)),
            ],
        }
    }
}

fn per_head(
    name: &str,
    adult: Decimal,
    child: Decimal,
    free_age: u8,
    child_age_range: Option<AgeRange>,
) -> Activity {
    Activity {
        name: name.to_string(),
        rates: ActivityRates {
            adult,
            child,
            free_age,
            child_age_range,
        },
        is_shuttle: false,
        shuttle_base_cost: None,
    }
}

fn shuttle(name: &str, base_cost: Decimal) -> Activity {
    Activity {
        name: name.to_string(),
        rates: ActivityRates {
            adult: Decimal::ZERO,
            child: Decimal::ZERO,
            free_age: 0,
            child_age_range: None,
        },
        is_shuttle: true,
        shuttle_base_cost: Some(base_cost),
    }
}
