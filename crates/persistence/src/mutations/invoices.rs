// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Invoice mutations.

use diesel::prelude::*;
use diesel::{Connection, SqliteConnection};
use harbour_domain::{InvoiceCharge, ShipId, Timestamp};
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::NewInvoiceRow;
use crate::diesel_schema::invoices;
use crate::error::PersistenceError;
use crate::queries::ships::ship_exists;

/// Records an invoice against an existing ship.
///
/// # Returns
///
/// The id assigned to the new invoice.
///
/// # Errors
///
/// Returns `PersistenceError::ShipNotFound` if the ship does not exist.
pub fn insert_invoice(
    conn: &mut SqliteConnection,
    ship_id: &ShipId,
    charge: &InvoiceCharge,
    issued_at: Timestamp,
) -> Result<i64, PersistenceError> {
    let invoice_id: i64 = conn.transaction::<_, PersistenceError, _>(|conn| {
        if !ship_exists(conn, ship_id)? {
            return Err(PersistenceError::ShipNotFound(ship_id.value().to_string()));
        }

        diesel::insert_into(invoices::table)
            .values(NewInvoiceRow::new(ship_id, charge, issued_at))
            .execute(conn)?;

        get_last_insert_rowid(conn)
    })?;

    info!(
        invoice_id,
        ship_id = %ship_id,
        hours_docked = charge.hours_docked(),
        total = charge.total(),
        "Invoice created"
    );
    Ok(invoice_id)
}

/// Deletes an invoice.
///
/// # Returns
///
/// Whether an invoice was removed. Unknown ids are not an error.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_invoice(
    conn: &mut SqliteConnection,
    invoice_id: i64,
) -> Result<bool, PersistenceError> {
    let deleted: usize =
        diesel::delete(invoices::table.filter(invoices::id.eq(invoice_id))).execute(conn)?;
    info!(invoice_id, deleted, "Invoice delete requested");
    Ok(deleted > 0)
}
