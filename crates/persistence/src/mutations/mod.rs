// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations for the persistence layer.
//!
//! Mutations use Diesel DSL throughout, falling back to the `backend`
//! module only for `last_insert_rowid()`.
//!
//! ## Module Organization
//!
//! - `ships`: Schedule inserts, demo seeding and cascading deletes
//! - `invoices`: Invoice creation and deletion
//! - `circulars`: Circular creation

pub mod circulars;
pub mod invoices;
pub mod ships;

pub use circulars::insert_circular;
pub use invoices::{delete_invoice, insert_invoice};
pub use ships::{delete_ship, insert_ship, insert_ships_if_absent};
