// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Invoice queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use harbour_domain::Invoice;

use crate::data_models::{InvoiceRow, InvoiceWithShip};
use crate::diesel_schema::{invoices, ships};
use crate::error::PersistenceError;

/// Lists all invoices, newest first, each with its ship's name.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_invoices_with_ships(
    conn: &mut SqliteConnection,
) -> Result<Vec<InvoiceWithShip>, PersistenceError> {
    let rows: Vec<(InvoiceRow, Option<String>)> = invoices::table
        .left_join(ships::table)
        .select((InvoiceRow::as_select(), ships::name.nullable()))
        .order((invoices::issued_at.desc(), invoices::id.desc()))
        .load::<(InvoiceRow, Option<String>)>(conn)?;

    rows.into_iter()
        .map(|(row, ship_name)| {
            Ok(InvoiceWithShip {
                invoice: row.into_domain()?,
                ship_name,
            })
        })
        .collect()
}

/// Looks up a single invoice.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no invoice has this id.
pub fn get_invoice(
    conn: &mut SqliteConnection,
    invoice_id: i64,
) -> Result<Invoice, PersistenceError> {
    let row: Option<InvoiceRow> = invoices::table
        .select(InvoiceRow::as_select())
        .filter(invoices::id.eq(invoice_id))
        .first::<InvoiceRow>(conn)
        .optional()?;

    row.ok_or_else(|| PersistenceError::NotFound(format!("Invoice {invoice_id}")))?
        .into_domain()
}

/// Counts all invoices.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_invoices(conn: &mut SqliteConnection) -> Result<usize, PersistenceError> {
    let count: i64 = invoices::table.count().get_result(conn)?;
    usize::try_from(count)
        .map_err(|_| PersistenceError::QueryFailed(format!("Invalid invoice count: {count}")))
}
