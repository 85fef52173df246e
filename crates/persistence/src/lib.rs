// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the harbour administration service.
//!
//! This crate stores ships, invoices and circulars in `SQLite` via Diesel.
//!
//! ## Storage
//!
//! - A file-backed database is opened in WAL mode and survives restarts.
//! - An in-memory database is used for tests and for runs without a
//!   configured path. Each `new_in_memory()` call gets its own instance.
//!
//! Migrations are embedded at compile time and applied on open, so the
//! schema is always current before the first query runs.
//!
//! ## Invariants Enforced Here
//!
//! - Ship IDs are unique.
//! - Every invoice references an existing ship.
//! - Deleting a ship deletes its invoices in the same transaction.
//! - Foreign key enforcement is verified on every open.
//!
//! ## Testing Philosophy
//!
//! - Tests run against isolated in-memory databases
//! - File-backed behavior is exercised with `tempfile` directories

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
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use harbour_domain::{Circular, Invoice, InvoiceCharge, Ship, ShipId, Timestamp};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{DeletedShip, InvoiceWithShip, SeedOutcome, ShipOption};
pub use error::PersistenceError;

/// Persistence adapter for ships, invoices and circulars.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique shared-cache database, so adapters never
    /// observe each other's data.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String =
            format!("file:memdb_harbour_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// The file is created if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    // ========================================================================
    // Ships
    // ========================================================================

    /// Lists every ship ordered by arrival.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn list_ships(&mut self) -> Result<Vec<Ship>, PersistenceError> {
        queries::list_ships(&mut self.conn)
    }

    /// Looks up a ship by ID.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ShipNotFound` if the ship does not exist.
    pub fn get_ship(&mut self, ship_id: &ShipId) -> Result<Ship, PersistenceError> {
        queries::get_ship(&mut self.conn, ship_id)
    }

    /// Returns whether a ship with this ID exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn ship_exists(&mut self, ship_id: &ShipId) -> Result<bool, PersistenceError> {
        queries::ship_exists(&mut self.conn, ship_id)
    }

    /// Counts all ships.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn count_ships(&mut self) -> Result<usize, PersistenceError> {
        queries::count_ships(&mut self.conn)
    }

    /// Returns up to `limit` ships arriving at or after `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn upcoming_arrivals(
        &mut self,
        now: Timestamp,
        limit: i64,
    ) -> Result<Vec<Ship>, PersistenceError> {
        queries::upcoming_arrivals(&mut self.conn, now, limit)
    }

    /// Lists `(ship_id, name)` pairs ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn list_ship_options(&mut self) -> Result<Vec<ShipOption>, PersistenceError> {
        queries::list_ship_options(&mut self.conn)
    }

    /// Schedules a new ship.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ShipAlreadyExists` if the ID is taken.
    pub fn insert_ship(&mut self, ship: &Ship) -> Result<(), PersistenceError> {
        mutations::insert_ship(&mut self.conn, ship)
    }

    /// Inserts every ship whose ID is not already present.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch cannot be written.
    pub fn insert_ships_if_absent(
        &mut self,
        fleet: &[Ship],
    ) -> Result<SeedOutcome, PersistenceError> {
        mutations::insert_ships_if_absent(&mut self.conn, fleet)
    }

    /// Deletes a ship together with its invoices.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails.
    pub fn delete_ship(&mut self, ship_id: &ShipId) -> Result<DeletedShip, PersistenceError> {
        mutations::delete_ship(&mut self.conn, ship_id)
    }

    // ========================================================================
    // Invoices
    // ========================================================================

    /// Records an invoice and returns its id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ShipNotFound` if the ship does not exist.
    pub fn insert_invoice(
        &mut self,
        ship_id: &ShipId,
        charge: &InvoiceCharge,
        issued_at: Timestamp,
    ) -> Result<i64, PersistenceError> {
        mutations::insert_invoice(&mut self.conn, ship_id, charge, issued_at)
    }

    /// Lists invoices newest first, with ship names.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn list_invoices_with_ships(&mut self) -> Result<Vec<InvoiceWithShip>, PersistenceError> {
        queries::list_invoices_with_ships(&mut self.conn)
    }

    /// Looks up an invoice by id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the invoice does not exist.
    pub fn get_invoice(&mut self, invoice_id: i64) -> Result<Invoice, PersistenceError> {
        queries::get_invoice(&mut self.conn, invoice_id)
    }

    /// Counts all invoices.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn count_invoices(&mut self) -> Result<usize, PersistenceError> {
        queries::count_invoices(&mut self.conn)
    }

    /// Deletes an invoice, returning whether one was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_invoice(&mut self, invoice_id: i64) -> Result<bool, PersistenceError> {
        mutations::delete_invoice(&mut self.conn, invoice_id)
    }

    // ========================================================================
    // Circulars
    // ========================================================================

    /// Records a circular and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_circular(
        &mut self,
        title: &str,
        filename: Option<&str>,
        uploaded_at: Timestamp,
    ) -> Result<i64, PersistenceError> {
        mutations::insert_circular(&mut self.conn, title, filename, uploaded_at)
    }

    /// Lists circulars, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn list_circulars(&mut self) -> Result<Vec<Circular>, PersistenceError> {
        queries::list_circulars(&mut self.conn)
    }
}
