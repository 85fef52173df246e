// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]


use harbour_domain::{InvoiceCharge, Ship, ShipId, Timestamp};

use crate::Persistence;

pub fn ts(value: &str) -> Timestamp {
    Timestamp::parse(value).expect("valid test timestamp")
}

pub fn create_test_ship(id: &str, name: &str, arrival: &str, departure: &str) -> Ship {
    Ship::new(
        ShipId::new(id).unwrap(),
        name,
        ts(arrival),
        ts(departure),
        ts("2026-01-01T00:00:00"),
    )
    .expect("valid test ship")
}

/// An in-memory store holding one ship, `BR9001`.
pub fn persistence_with_ship() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence
        .insert_ship(&create_test_ship(
            "BR9001",
            "Test Vessel",
            "2026-03-01T08:00:00",
            "2026-03-01T16:00:00",
        ))
        .unwrap();
    persistence
}

pub fn charge(hours: u32, cost: f64) -> InvoiceCharge {
    InvoiceCharge::compute(hours, cost).unwrap()
}
