// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use harbour_domain::Timestamp;
use harbour_persistence::Persistence;

use crate::{AddShipRequest, AdminCredentials, CreateInvoiceRequest};

/// Minimum bcrypt cost, to keep tests fast.
pub const TEST_BCRYPT_COST: u32 = 4;

pub fn test_now() -> Timestamp {
    Timestamp::parse("2025-01-01T00:00:00").unwrap()
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn create_test_credentials() -> AdminCredentials {
    AdminCredentials::with_cost("admin", "harbour-pass", TEST_BCRYPT_COST).unwrap()
}

pub fn ship_request(ship_id: &str, name: &str, arrival: &str, departure: &str) -> AddShipRequest {
    AddShipRequest {
        ship_id: String::from(ship_id),
        name: String::from(name),
        arrival: String::from(arrival),
        departure: String::from(departure),
    }
}

/// The ship used by the end-to-end invoicing scenario.
pub fn br9001_request() -> AddShipRequest {
    ship_request("BR9001", "Test Ship", "2025-01-01T10:00", "2025-01-01T18:00")
}

pub fn invoice_request(ship_id: &str, hours: &str, service_cost: &str) -> CreateInvoiceRequest {
    CreateInvoiceRequest {
        ship_id: String::from(ship_id),
        hours: Some(String::from(hours)),
        service_cost: Some(String::from(service_cost)),
    }
}
