// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod invoice;
mod seed;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use invoice::{BASE_RATE, InvoiceCharge, compute_total};
pub use seed::{DEMO_SHIP_NAMES, demo_fleet};
pub use types::{Circular, Invoice, Ship, ShipId, Timestamp};
pub use validation::{
    parse_hours, parse_service_cost, validate_required, validate_schedule, validate_service_cost,
};
