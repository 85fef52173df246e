// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversion to domain values.

use diesel::prelude::*;
use harbour_domain::{Circular, Invoice, InvoiceCharge, Ship, ShipId, Timestamp};

use crate::diesel_schema::{circulars, invoices, ships};
use crate::error::PersistenceError;

fn parse_stored_timestamp(column: &str, value: &str) -> Result<Timestamp, PersistenceError> {
    Timestamp::parse(value).map_err(|e| {
        PersistenceError::ReconstructionError(format!("Invalid {column} value '{value}': {e}"))
    })
}

fn parse_stored_ship_id(value: &str) -> Result<ShipId, PersistenceError> {
    ShipId::new(value).map_err(|e| PersistenceError::ReconstructionError(e.to_string()))
}

/// A row of the `ships` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = ships)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ShipRow {
    pub ship_id: String,
    pub name: String,
    pub arrival: String,
    pub departure: String,
    pub created_at: String,
}

impl ShipRow {
    /// Rebuilds the domain ship.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ReconstructionError` if a stored value is
    /// malformed.
    pub fn into_domain(self) -> Result<Ship, PersistenceError> {
        Ship::new(
            parse_stored_ship_id(&self.ship_id)?,
            &self.name,
            parse_stored_timestamp("arrival", &self.arrival)?,
            parse_stored_timestamp("departure", &self.departure)?,
            parse_stored_timestamp("created_at", &self.created_at)?,
        )
        .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))
    }
}

/// Insertable form of a ship.
#[derive(Debug, Insertable)]
#[diesel(table_name = ships)]
pub struct NewShipRow {
    pub ship_id: String,
    pub name: String,
    pub arrival: String,
    pub departure: String,
    pub created_at: String,
}

impl From<&Ship> for NewShipRow {
    fn from(ship: &Ship) -> Self {
        Self {
            ship_id: ship.ship_id().value().to_string(),
            name: ship.name().to_string(),
            arrival: ship.arrival().canonical(),
            departure: ship.departure().canonical(),
            created_at: ship.created_at().canonical(),
        }
    }
}

/// A row of the `invoices` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = invoices)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InvoiceRow {
    pub id: i64,
    pub ship_id: String,
    pub hours_docked: i64,
    pub service_cost: f64,
    pub base_rate: f64,
    pub total: f64,
    pub issued_at: String,
}

impl InvoiceRow {
    /// Rebuilds the domain invoice.
    ///
    /// The total is recomputed from the stored hours, cost and rate rather
    /// than trusted from the row.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ReconstructionError` if a stored value is
    /// malformed.
    pub fn into_domain(self) -> Result<Invoice, PersistenceError> {
        let hours_docked: u32 = u32::try_from(self.hours_docked).map_err(|_| {
            PersistenceError::ReconstructionError(format!(
                "hours_docked out of range for invoice {}: {}",
                self.id, self.hours_docked
            ))
        })?;
        let charge: InvoiceCharge =
            InvoiceCharge::compute_with_rate(hours_docked, self.service_cost, self.base_rate)
                .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;

        Ok(Invoice {
            id: self.id,
            ship_id: parse_stored_ship_id(&self.ship_id)?,
            charge,
            issued_at: parse_stored_timestamp("issued_at", &self.issued_at)?,
        })
    }
}

/// Insertable form of an invoice. The id is assigned by the database.
#[derive(Debug, Insertable)]
#[diesel(table_name = invoices)]
pub struct NewInvoiceRow {
    pub ship_id: String,
    pub hours_docked: i64,
    pub service_cost: f64,
    pub base_rate: f64,
    pub total: f64,
    pub issued_at: String,
}

impl NewInvoiceRow {
    #[must_use]
    pub fn new(ship_id: &ShipId, charge: &InvoiceCharge, issued_at: Timestamp) -> Self {
        Self {
            ship_id: ship_id.value().to_string(),
            hours_docked: i64::from(charge.hours_docked()),
            service_cost: charge.service_cost(),
            base_rate: charge.base_rate(),
            total: charge.total(),
            issued_at: issued_at.canonical(),
        }
    }
}

/// A row of the `circulars` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = circulars)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CircularRow {
    pub id: i64,
    pub title: String,
    pub filename: Option<String>,
    pub uploaded_at: String,
}

impl CircularRow {
    /// Rebuilds the domain circular.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ReconstructionError` if the timestamp is
    /// malformed.
    pub fn into_domain(self) -> Result<Circular, PersistenceError> {
        Ok(Circular {
            id: self.id,
            title: self.title,
            filename: self.filename,
            uploaded_at: parse_stored_timestamp("uploaded_at", &self.uploaded_at)?,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = circulars)]
pub struct NewCircularRow {
    pub title: String,
    pub filename: Option<String>,
    pub uploaded_at: String,
}

/// An invoice together with the name of its ship.
///
/// The name is `None` only if the ship row has gone missing, which the
/// cascade normally prevents.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceWithShip {
    pub invoice: Invoice,
    pub ship_name: Option<String>,
}

/// A `(ship_id, name)` pair for populating selection lists.
#[derive(Debug, Clone, PartialEq, Eq, Queryable)]
pub struct ShipOption {
    pub ship_id: String,
    pub name: String,
}

/// The outcome of deleting a ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeletedShip {
    /// Number of ship rows removed (0 or 1).
    pub ships_deleted: usize,
    /// Number of invoices removed along with the ship.
    pub invoices_deleted: usize,
}

/// The outcome of inserting a batch of ships while skipping existing IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedOutcome {
    pub inserted: usize,
    pub skipped: usize,
}
