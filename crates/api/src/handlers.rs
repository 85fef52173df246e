// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! One function per user-facing operation.
//!
//! Handlers are synchronous and take the persistence adapter by mutable
//! reference. Callers supply "now" so that behavior is deterministic under
//! test.

use harbour_domain::{
    BASE_RATE, InvoiceCharge, Ship, ShipId, Timestamp, demo_fleet, parse_hours,
    parse_service_cost, validate_required,
};
use harbour_persistence::{DeletedShip, Persistence, SeedOutcome};
use tracing::{debug, info, warn};

use crate::auth::{AdminCredentials, AuthenticationService};
use crate::error::{ApiError, translate_domain_error};
use crate::request_response::{
    AddShipRequest, AddShipResponse, CircularInfo, CircularListResponse, CreateInvoiceRequest,
    CreateInvoiceResponse, DashboardResponse, DeleteInvoiceResponse, DeleteShipResponse,
    InvoiceFormResponse, InvoiceInfo, InvoiceListResponse, LoginRequest, LoginResponse,
    ScheduleListResponse, SeedResponse, ShipInfo, ShipOptionInfo, UploadCircularRequest,
    UploadCircularResponse,
};
use crate::uploads::UploadStore;

/// Number of upcoming arrivals shown on the dashboard.
pub const UPCOMING_ARRIVALS_LIMIT: i64 = 5;

/// Builds the dashboard: counts plus the next few arrivals.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn dashboard(
    persistence: &mut Persistence,
    now: Timestamp,
) -> Result<DashboardResponse, ApiError> {
    let ship_count: usize = persistence.count_ships()?;
    let invoice_count: usize = persistence.count_invoices()?;
    let upcoming: Vec<ShipInfo> = persistence
        .upcoming_arrivals(now, UPCOMING_ARRIVALS_LIMIT)?
        .iter()
        .map(ShipInfo::from)
        .collect();

    debug!(ship_count, invoice_count, upcoming = upcoming.len(), "Dashboard built");

    Ok(DashboardResponse {
        ship_count,
        invoice_count,
        upcoming,
        now: now.canonical(),
    })
}

/// Lists all ships by arrival.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_schedules(persistence: &mut Persistence) -> Result<ScheduleListResponse, ApiError> {
    let ships: Vec<ShipInfo> = persistence
        .list_ships()?
        .iter()
        .map(ShipInfo::from)
        .collect();
    Ok(ScheduleListResponse { ships })
}

/// Schedules a new ship.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The raw form fields
/// * `now` - Recorded as the ship's `created_at`
///
/// # Errors
///
/// Returns an error if:
/// - Any field is blank
/// - A timestamp cannot be parsed
/// - Departure is not after arrival
/// - The ship ID is already taken
pub fn add_ship(
    persistence: &mut Persistence,
    request: &AddShipRequest,
    now: Timestamp,
) -> Result<AddShipResponse, ApiError> {
    let ship_id: &str =
        validate_required("ship_id", &request.ship_id).map_err(translate_domain_error)?;
    let name: &str = validate_required("name", &request.name).map_err(translate_domain_error)?;
    let arrival: &str =
        validate_required("arrival", &request.arrival).map_err(translate_domain_error)?;
    let departure: &str =
        validate_required("departure", &request.departure).map_err(translate_domain_error)?;

    let arrival: Timestamp = Timestamp::parse(arrival).map_err(translate_domain_error)?;
    let departure: Timestamp = Timestamp::parse(departure).map_err(translate_domain_error)?;

    let ship: Ship = Ship::new(
        ShipId::new(ship_id).map_err(translate_domain_error)?,
        name,
        arrival,
        departure,
        now,
    )
    .map_err(|e| {
        warn!(ship_id, error = %e, "Rejected ship");
        translate_domain_error(e)
    })?;

    persistence.insert_ship(&ship)?;

    Ok(AddShipResponse {
        ship_id: ship_id.to_string(),
        message: format!("Ship {ship_id} added."),
    })
}

/// Deletes a ship and all invoices that reference it.
///
/// Deleting an unknown ship succeeds without effect.
///
/// # Errors
///
/// Returns an error if the ID is blank or the transaction fails.
pub fn delete_ship(
    persistence: &mut Persistence,
    ship_id: &str,
) -> Result<DeleteShipResponse, ApiError> {
    let id: ShipId = ShipId::new(ship_id).map_err(translate_domain_error)?;
    let deleted: DeletedShip = persistence.delete_ship(&id)?;

    Ok(DeleteShipResponse {
        ship_id: id.value().to_string(),
        ship_deleted: deleted.ships_deleted > 0,
        invoices_deleted: deleted.invoices_deleted,
        message: format!("Ship {id} and related invoices deleted."),
    })
}

/// Builds the invoice form: selectable ships and the current rate.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn invoice_form(persistence: &mut Persistence) -> Result<InvoiceFormResponse, ApiError> {
    let ships: Vec<ShipOptionInfo> = persistence
        .list_ship_options()?
        .into_iter()
        .map(ShipOptionInfo::from)
        .collect();
    Ok(InvoiceFormResponse {
        ships,
        base_rate: BASE_RATE,
    })
}

/// Reads an optional numeric form field, treating absent or blank as zero.
fn numeric_field(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Creates an invoice at the current base rate.
///
/// # Errors
///
/// Returns an error if:
/// - `hours` is not a non-negative integer
/// - `service_cost` is not a non-negative number
/// - The ship does not exist
pub fn create_invoice(
    persistence: &mut Persistence,
    request: &CreateInvoiceRequest,
    now: Timestamp,
) -> Result<CreateInvoiceResponse, ApiError> {
    let hours: u32 = numeric_field(request.hours.as_deref())
        .map_or(Ok(0), parse_hours)
        .map_err(translate_domain_error)?;
    let service_cost: f64 = numeric_field(request.service_cost.as_deref())
        .map_or(Ok(0.0), parse_service_cost)
        .map_err(translate_domain_error)?;

    // A blank ship is reported like an unknown one
    let ship_id: ShipId =
        ShipId::new(&request.ship_id).map_err(|_| ApiError::ResourceNotFound {
            resource_type: String::from("Ship"),
            message: String::from("Ship not found. Add ship first."),
        })?;

    let charge: InvoiceCharge =
        InvoiceCharge::compute(hours, service_cost).map_err(translate_domain_error)?;
    let invoice_id: i64 = persistence.insert_invoice(&ship_id, &charge, now)?;

    Ok(CreateInvoiceResponse {
        invoice_id,
        ship_id: ship_id.value().to_string(),
        total: charge.total(),
        message: format!("Invoice created for {ship_id}: ₹{:.2}", charge.total()),
    })
}

/// Lists all invoices, newest first.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_invoices(persistence: &mut Persistence) -> Result<InvoiceListResponse, ApiError> {
    let invoices: Vec<InvoiceInfo> = persistence
        .list_invoices_with_ships()?
        .iter()
        .map(InvoiceInfo::from)
        .collect();
    Ok(InvoiceListResponse { invoices })
}

/// Deletes an invoice. Unknown ids succeed without effect.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_invoice(
    persistence: &mut Persistence,
    invoice_id: i64,
) -> Result<DeleteInvoiceResponse, ApiError> {
    let deleted: bool = persistence.delete_invoice(invoice_id)?;
    Ok(DeleteInvoiceResponse {
        invoice_id,
        deleted,
        message: format!("Invoice #{invoice_id} deleted."),
    })
}

/// Lists all circulars, most recent first.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_circulars(persistence: &mut Persistence) -> Result<CircularListResponse, ApiError> {
    let circulars: Vec<CircularInfo> = persistence
        .list_circulars()?
        .iter()
        .map(CircularInfo::from)
        .collect();
    Ok(CircularListResponse { circulars })
}

/// Records a circular, storing its attachment if one was sent.
///
/// # Errors
///
/// Returns an error if the title is blank, the attachment cannot be
/// written, or the insert fails. A failed insert removes the attachment.
pub fn upload_circular(
    persistence: &mut Persistence,
    uploads: &UploadStore,
    request: &UploadCircularRequest,
    now: Timestamp,
) -> Result<UploadCircularResponse, ApiError> {
    let title: &str =
        validate_required("title", &request.title).map_err(|_| ApiError::InvalidInput {
            field: String::from("title"),
            message: String::from("Title is required."),
        })?;

    let filename: Option<String> = match &request.file {
        Some(file) => uploads
            .save(&file.file_name, &file.contents, now)
            .map_err(|e| ApiError::Internal {
                message: e.to_string(),
            })?,
        None => None,
    };

    let circular_id: i64 = match persistence.insert_circular(title, filename.as_deref(), now) {
        Ok(id) => id,
        Err(e) => {
            if let Some(Err(discard_err)) = filename.as_deref().map(|name| uploads.discard(name)) {
                warn!(filename = ?filename, error = %discard_err, "Failed to discard attachment");
            }
            return Err(e.into());
        }
    };

    Ok(UploadCircularResponse {
        circular_id,
        filename,
        message: String::from("Circular uploaded."),
    })
}

/// Inserts the demo fleet, skipping IDs that already exist.
///
/// # Errors
///
/// Returns an error if the fleet cannot be built or written.
pub fn seed_demo_data(
    persistence: &mut Persistence,
    now: Timestamp,
) -> Result<SeedResponse, ApiError> {
    let fleet: Vec<Ship> = demo_fleet(now).map_err(translate_domain_error)?;
    let outcome: SeedOutcome = persistence.insert_ships_if_absent(&fleet)?;

    info!(
        inserted = outcome.inserted,
        skipped = outcome.skipped,
        "Demo data seeded"
    );

    Ok(SeedResponse {
        inserted: outcome.inserted,
        skipped: outcome.skipped,
        message: "Demo data seeded.",
    })
}

/// Checks the submitted credentials against the configured admin account.
///
/// # Errors
///
/// Returns `ApiError::AuthenticationFailed` if the credentials do not match.
pub fn login(
    credentials: &AdminCredentials,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let username: String =
        AuthenticationService::login(credentials, &request.username, &request.password)?;
    Ok(LoginResponse {
        message: format!("Logged in as {username}."),
        username,
    })
}
