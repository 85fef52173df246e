// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Demo fleet used to populate an empty schedule.

use time::Duration;

use crate::error::DomainError;
use crate::types::{Ship, ShipId, Timestamp};

/// Names of the demo ships, in arrival order.
pub const DEMO_SHIP_NAMES: [&str; 14] = [
    "Titanic",
    "Queen Mary",
    "USS Enterprise",
    "HMS Victory",
    "Yamato",
    "Bismarck",
    "USS Nautilus",
    "Seawise Giant",
    "Santa Maria",
    "Mayflower",
    "INS Vikramaditya",
    "INS Kolkata",
    "INS Kochi",
    "INS Chennai",
];

/// Numeric suffix of the first demo ship ID (`BR2000`).
const FIRST_DEMO_ID: u32 = 2000;

/// Hours each demo ship stays docked.
const DEMO_DOCKING_HOURS: i64 = 8;

/// Builds the demo fleet relative to `now`.
///
/// Ship `n` gets ID `BR{2000 + n}`, arrives `n` days after `now` and
/// departs eight hours later. Every ship is stamped `created_at = now`.
///
/// # Errors
///
/// Returns `DomainError::TimestampOverflow` if the schedule cannot be
/// represented.
pub fn demo_fleet(now: Timestamp) -> Result<Vec<Ship>, DomainError> {
    DEMO_SHIP_NAMES
        .iter()
        .zip(0_u32..)
        .map(|(name, offset)| {
            let ship_id: ShipId = ShipId::new(&format!("BR{}", FIRST_DEMO_ID + offset))?;
            let arrival: Timestamp = now
                .checked_add(Duration::days(i64::from(offset)))
                .ok_or_else(|| DomainError::TimestampOverflow {
                    operation: format!("demo arrival for {ship_id}"),
                })?;
            let departure: Timestamp = arrival
                .checked_add(Duration::hours(DEMO_DOCKING_HOURS))
                .ok_or_else(|| DomainError::TimestampOverflow {
                    operation: format!("demo departure for {ship_id}"),
                })?;
            Ship::new(ship_id, name, arrival, departure, now)
        })
        .collect()
}
