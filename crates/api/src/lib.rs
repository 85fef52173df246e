// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the harbour administration service.
//!
//! Each user-facing operation is a plain function over the persistence
//! adapter that takes a typed request and returns a typed response or an
//! `ApiError`. The HTTP layer is responsible for sessions, redirects and
//! triggering exports.

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

mod auth;
mod error;
mod export;
mod handlers;
mod request_response;
mod uploads;

#[cfg(test)]
mod tests;

pub use auth::{AdminCredentials, AuthenticationService};
pub use error::{ApiError, AuthError, translate_domain_error};
pub use export::{ExportError, ExportWriter, FEES_EXPORT_FILE, SHIPS_EXPORT_FILE};
pub use handlers::{
    UPCOMING_ARRIVALS_LIMIT, add_ship, create_invoice, dashboard, delete_invoice, delete_ship,
    invoice_form, list_circulars, list_invoices, list_schedules, login, seed_demo_data,
    upload_circular,
};
pub use request_response::{
    AddShipRequest, AddShipResponse, CircularInfo, CircularListResponse, CreateInvoiceRequest,
    CreateInvoiceResponse, DashboardResponse, DeleteInvoiceResponse, DeleteShipResponse,
    InvoiceFormResponse, InvoiceInfo, InvoiceListResponse, LoginRequest, LoginResponse,
    ScheduleListResponse, SeedResponse, ShipInfo, ShipOptionInfo, UploadCircularRequest,
    UploadCircularResponse, UploadedFile,
};
pub use uploads::{UploadError, UploadStore};
