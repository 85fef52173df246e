// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use harbour_domain::{Circular, Ship};
use harbour_persistence::{InvoiceWithShip, ShipOption};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};

/// Bytes escaped in a download link path segment: all but RFC 3986
/// unreserved characters.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// API request to schedule a ship.
///
/// Fields arrive as raw form strings and are validated by the handler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AddShipRequest {
    #[serde(default)]
    pub ship_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub arrival: String,
    #[serde(default)]
    pub departure: String,
}

/// API response for a successfully scheduled ship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddShipResponse {
    pub ship_id: String,
    /// A success message.
    pub message: String,
}

/// API response for a ship deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteShipResponse {
    pub ship_id: String,
    /// Whether a ship row was actually removed.
    pub ship_deleted: bool,
    /// Number of invoices removed with the ship.
    pub invoices_deleted: usize,
    /// A success message.
    pub message: String,
}

/// API request to create an invoice.
///
/// `hours` and `service_cost` default to zero when absent or blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateInvoiceRequest {
    #[serde(default)]
    pub ship_id: String,
    pub hours: Option<String>,
    pub service_cost: Option<String>,
}

/// API response for a created invoice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateInvoiceResponse {
    pub invoice_id: i64,
    pub ship_id: String,
    pub total: f64,
    /// A success message including the formatted total.
    pub message: String,
}

/// API response for an invoice deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteInvoiceResponse {
    pub invoice_id: i64,
    /// Whether an invoice row was actually removed.
    pub deleted: bool,
    /// A success message.
    pub message: String,
}

/// A file attached to a circular upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// The name the client sent, possibly including a path.
    pub file_name: String,
    pub contents: Vec<u8>,
}

/// API request to upload a circular.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadCircularRequest {
    pub title: String,
    pub file: Option<UploadedFile>,
}

/// API response for an uploaded circular.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadCircularResponse {
    pub circular_id: i64,
    /// The stored attachment name, if a file was saved.
    pub filename: Option<String>,
    /// A success message.
    pub message: String,
}

/// API response for demo seeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedResponse {
    pub inserted: usize,
    pub skipped: usize,
    /// A success message.
    pub message: &'static str,
}

/// API request to log in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Where to go after a successful login.
    pub next: Option<String>,
}

/// API response for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponse {
    pub username: String,
    /// A success message.
    pub message: String,
}

/// A ship as shown in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShipInfo {
    pub ship_id: String,
    pub name: String,
    pub arrival: String,
    pub departure: String,
    pub created_at: String,
}

impl From<&Ship> for ShipInfo {
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

/// Dashboard view model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardResponse {
    pub ship_count: usize,
    pub invoice_count: usize,
    /// The next ships to arrive, soonest first.
    pub upcoming: Vec<ShipInfo>,
    /// The reference time used to select `upcoming`.
    pub now: String,
}

/// Schedule listing view model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleListResponse {
    pub ships: Vec<ShipInfo>,
}

/// A selectable ship in the invoice form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShipOptionInfo {
    pub ship_id: String,
    pub name: String,
}

impl From<ShipOption> for ShipOptionInfo {
    fn from(option: ShipOption) -> Self {
        Self {
            ship_id: option.ship_id,
            name: option.name,
        }
    }
}

/// Invoice form view model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceFormResponse {
    pub ships: Vec<ShipOptionInfo>,
    pub base_rate: f64,
}

/// An invoice as shown in listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceInfo {
    pub id: i64,
    pub ship_id: String,
    /// `None` if the ship no longer exists.
    pub ship_name: Option<String>,
    pub hours_docked: u32,
    pub service_cost: f64,
    pub base_rate: f64,
    pub total: f64,
    pub issued_at: String,
}

impl From<&InvoiceWithShip> for InvoiceInfo {
    fn from(row: &InvoiceWithShip) -> Self {
        let charge = row.invoice.charge;
        Self {
            id: row.invoice.id,
            ship_id: row.invoice.ship_id.value().to_string(),
            ship_name: row.ship_name.clone(),
            hours_docked: charge.hours_docked(),
            service_cost: charge.service_cost(),
            base_rate: charge.base_rate(),
            total: charge.total(),
            issued_at: row.invoice.issued_at.canonical(),
        }
    }
}

/// Invoice listing view model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceListResponse {
    pub invoices: Vec<InvoiceInfo>,
}

/// A circular as shown in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CircularInfo {
    pub id: i64,
    pub title: String,
    pub filename: Option<String>,
    /// Link to the attachment, if there is one.
    pub download_url: Option<String>,
    pub uploaded_at: String,
}

impl From<&Circular> for CircularInfo {
    fn from(circular: &Circular) -> Self {
        Self {
            id: circular.id,
            title: circular.title.clone(),
            filename: circular.filename.clone(),
            download_url: circular
                .filename
                .as_ref()
                .map(|name| format!("/uploads/{}", utf8_percent_encode(name, PATH_SEGMENT))),
            uploaded_at: circular.uploaded_at.canonical(),
        }
    }
}

/// Circular listing view model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CircularListResponse {
    pub circulars: Vec<CircularInfo>,
}
