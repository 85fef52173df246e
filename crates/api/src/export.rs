// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Spreadsheet export of the ships and invoices tables.
//!
//! Each export is a full snapshot written as CSV, replacing the previous
//! file. The header row is always present, so an empty table produces a
//! header-only file.

use std::path::{Path, PathBuf};

use harbour_domain::Ship;
use harbour_persistence::{InvoiceWithShip, Persistence, PersistenceError};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// File name of the ships export.
pub const SHIPS_EXPORT_FILE: &str = "ships.csv";

/// File name of the invoices export.
pub const FEES_EXPORT_FILE: &str = "fees.csv";

const SHIP_HEADERS: [&str; 5] = ["ship_id", "name", "arrival", "departure", "created_at"];

const FEE_HEADERS: [&str; 8] = [
    "id",
    "name",
    "ship_id",
    "hours_docked",
    "service_cost",
    "base_rate",
    "total",
    "issued_at",
];

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The table could not be read.
    #[error("Failed to read data for export: {0}")]
    Persistence(#[from] PersistenceError),

    /// The CSV file could not be written.
    #[error("Failed to write CSV export: {0}")]
    Csv(#[from] csv::Error),

    /// The export file could not be flushed to disk.
    #[error("Failed to write export file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Serialize)]
struct ShipExportRow<'a> {
    ship_id: &'a str,
    name: &'a str,
    arrival: String,
    departure: String,
    created_at: String,
}

impl<'a> From<&'a Ship> for ShipExportRow<'a> {
    fn from(ship: &'a Ship) -> Self {
        Self {
            ship_id: ship.ship_id().value(),
            name: ship.name(),
            arrival: ship.arrival().canonical(),
            departure: ship.departure().canonical(),
            created_at: ship.created_at().canonical(),
        }
    }
}

#[derive(Serialize)]
struct FeeExportRow<'a> {
    id: i64,
    name: Option<&'a str>,
    ship_id: &'a str,
    hours_docked: u32,
    service_cost: f64,
    base_rate: f64,
    total: f64,
    issued_at: String,
}

impl<'a> From<&'a InvoiceWithShip> for FeeExportRow<'a> {
    fn from(row: &'a InvoiceWithShip) -> Self {
        let charge = row.invoice.charge;
        Self {
            id: row.invoice.id,
            name: row.ship_name.as_deref(),
            ship_id: row.invoice.ship_id.value(),
            hours_docked: charge.hours_docked(),
            service_cost: charge.service_cost(),
            base_rate: charge.base_rate(),
            total: charge.total(),
            issued_at: row.invoice.issued_at.canonical(),
        }
    }
}

/// Writes table snapshots into a fixed directory.
#[derive(Debug, Clone)]
pub struct ExportWriter {
    dir: PathBuf,
}

impl ExportWriter {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn ships_path(&self) -> PathBuf {
        self.dir.join(SHIPS_EXPORT_FILE)
    }

    #[must_use]
    pub fn fees_path(&self) -> PathBuf {
        self.dir.join(FEES_EXPORT_FILE)
    }

    /// Regenerates `ships.csv` from the ships table, ordered by arrival.
    ///
    /// # Returns
    ///
    /// The number of data rows written.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be read or the file cannot be
    /// written.
    pub fn export_ships(&self, persistence: &mut Persistence) -> Result<usize, ExportError> {
        let ships: Vec<Ship> = persistence.list_ships()?;
        let rows = ships.iter().map(ShipExportRow::from);
        let written: usize = write_csv(&self.ships_path(), &SHIP_HEADERS, rows)?;
        debug!(rows = written, path = %self.ships_path().display(), "Ships export written");
        Ok(written)
    }

    /// Regenerates `fees.csv` from the invoices table, newest first.
    ///
    /// # Returns
    ///
    /// The number of data rows written.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be read or the file cannot be
    /// written.
    pub fn export_invoices(&self, persistence: &mut Persistence) -> Result<usize, ExportError> {
        let invoices: Vec<InvoiceWithShip> = persistence.list_invoices_with_ships()?;
        let rows = invoices.iter().map(FeeExportRow::from);
        let written: usize = write_csv(&self.fees_path(), &FEE_HEADERS, rows)?;
        debug!(rows = written, path = %self.fees_path().display(), "Invoices export written");
        Ok(written)
    }
}

fn write_csv<R, I>(path: &Path, headers: &[&str], rows: I) -> Result<usize, ExportError>
where
    R: Serialize,
    I: IntoIterator<Item = R>,
{
    // Header written by hand so an empty table still gets one
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(headers)?;

    let mut count: usize = 0;
    for row in rows {
        writer.serialize(row)?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}
