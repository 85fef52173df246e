// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for persistence layer.
//!
//! This module contains all read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `ships`: Schedule listings, lookups and counts
//! - `invoices`: Invoice listings joined with ship names
//! - `circulars`: Circular listings

pub mod circulars;
pub mod invoices;
pub mod ships;

pub use circulars::list_circulars;
pub use invoices::{count_invoices, get_invoice, list_invoices_with_ships};
pub use ships::{
    count_ships, get_ship, list_ship_options, list_ships, ship_exists, upcoming_arrivals,
};
