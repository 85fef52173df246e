// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod session;

#[cfg(test)]
mod tests;

use axum::{
    Form, Json, Router,
    extract::{
        DefaultBodyLimit, Multipart, Path, Query, State as AxumState,
        multipart::{MultipartError, MultipartRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use clap::Parser;
use harbour_api::{
    AddShipRequest, AdminCredentials, ApiError, CircularListResponse, CreateInvoiceRequest,
    DashboardResponse, ExportError, ExportWriter, FEES_EXPORT_FILE, InvoiceFormResponse,
    InvoiceListResponse, LoginRequest, SHIPS_EXPORT_FILE, ScheduleListResponse,
    UploadCircularRequest, UploadError, UploadStore, UploadedFile, add_ship, create_invoice,
    dashboard, delete_invoice, delete_ship, invoice_form, list_circulars, list_invoices,
    list_schedules, login, seed_demo_data, upload_circular,
};
use harbour_domain::Timestamp;
use harbour_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer, cookie::SameSite};
use tracing::{error, info, warn};

use session::{AdminSession, Flash, FlashLevel, SessionUser, safe_next};

/// Largest accepted circular upload, attachment included.
const MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

/// Harbour Server - port authority administration over HTTP
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "HARBOUR_DATABASE")]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, env = "HARBOUR_PORT", default_value_t = 3000)]
    port: u16,

    /// Administrator login name
    #[arg(long, env = "HARBOUR_ADMIN_USERNAME", default_value = "admin")]
    admin_username: String,

    /// Administrator password (hashed on startup, never stored)
    #[arg(long, env = "HARBOUR_ADMIN_PASSWORD", hide_env_values = true)]
    admin_password: String,

    /// Directory for uploaded circular attachments
    #[arg(long, env = "HARBOUR_UPLOADS_DIR", default_value = "uploads")]
    uploads_dir: PathBuf,

    /// Directory the CSV exports are written to
    #[arg(long, env = "HARBOUR_EXPORT_DIR", default_value = ".")]
    export_dir: PathBuf,

    /// Mark the session cookie `Secure` (enable behind HTTPS)
    #[arg(long, env = "HARBOUR_SECURE_COOKIES")]
    secure_cookies: bool,
}

/// Application state shared across handlers.
///
/// The persistence adapter owns the only database connection and is
/// wrapped in a Mutex so handlers take turns with it.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for ships, invoices and circulars.
    persistence: Arc<Mutex<Persistence>>,
    /// The configured administrator account.
    credentials: Arc<AdminCredentials>,
    /// Where circular attachments are stored.
    uploads: UploadStore,
    /// Where spreadsheet exports are written.
    exports: ExportWriter,
}

impl AppState {
    /// Regenerates the ships export after a committed change.
    ///
    /// Failure is logged and does not fail the request.
    fn refresh_ships_export(&self, persistence: &mut Persistence) {
        if let Err(e) = self.exports.export_ships(persistence) {
            warn!(error = %e, "Failed to refresh ships export");
        }
    }

    /// Regenerates the invoices export after a committed change.
    ///
    /// Failure is logged and does not fail the request.
    fn refresh_invoices_export(&self, persistence: &mut Persistence) {
        if let Err(e) = self.exports.export_invoices(persistence) {
            warn!(error = %e, "Failed to refresh invoices export");
        }
    }
}

/// Envelope for every page view.
#[derive(Debug, Serialize)]
struct PageResponse<T> {
    /// Whether the caller is logged in.
    logged_in: bool,
    /// The logged-in username.
    user: Option<String>,
    /// Messages queued by earlier requests.
    flashes: Vec<Flash>,
    /// Page-specific data.
    #[serde(flatten)]
    page: T,
}

/// Add-ship form view.
#[derive(Debug, Serialize)]
struct ShipFormPage {
    fields: [&'static str; 4],
}

/// Login form view.
#[derive(Debug, Serialize)]
struct LoginPage {
    next: Option<String>,
}

/// Query string carrying a post-login destination.
#[derive(Debug, Default, Deserialize)]
struct NextQuery {
    next: Option<String>,
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    /// Always true.
    error: bool,
    /// The error message.
    message: String,
}

/// HTTP error wrapper.
#[derive(Debug)]
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl HttpError {
    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::AuthenticationFailed { .. } => Self {
                status: StatusCode::UNAUTHORIZED,
                message: err.to_string(),
            },
            ApiError::DomainRuleViolation { .. } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: err.to_string(),
            },
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                Self::internal(err.to_string())
            }
        }
    }
}

impl From<ExportError> for HttpError {
    fn from(err: ExportError) -> Self {
        error!(error = %err, "Export failed");
        Self::internal(format!("Export failed: {err}"))
    }
}

impl From<UploadError> for HttpError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::NotFound(_) => Self {
                status: StatusCode::NOT_FOUND,
                message: String::from("File not found"),
            },
            UploadError::Io(_) => {
                error!(error = %err, "Upload storage failed");
                Self::internal(err.to_string())
            }
        }
    }
}

impl From<tower_sessions::session::Error> for HttpError {
    fn from(err: tower_sessions::session::Error) -> Self {
        error!(error = %err, "Session store error");
        Self::internal(format!("Session error: {err}"))
    }
}

/// Wraps page data with the session envelope, consuming pending flashes.
async fn render<T>(session: &Session, page: T) -> Result<Json<PageResponse<T>>, HttpError> {
    let user: Option<String> = SessionUser::get(session).await?;
    let flashes: Vec<Flash> = Flash::take_all(session).await?;
    Ok(Json(PageResponse {
        logged_in: user.is_some(),
        user,
        flashes,
        page,
    }))
}

/// Redirects with a success flash.
async fn succeed(
    session: &Session,
    message: impl Into<String>,
    to: &str,
) -> Result<Redirect, HttpError> {
    Flash::push(session, FlashLevel::Success, message).await?;
    Ok(Redirect::to(to))
}

/// Turns a rejected operation into a flash and a redirect back to `to`.
///
/// Internal errors are not shown as flashes; they become HTTP 500.
async fn reject(session: &Session, err: ApiError, to: &str) -> Result<Redirect, HttpError> {
    if matches!(err, ApiError::Internal { .. }) {
        return Err(HttpError::from(err));
    }
    warn!(error = %err, "Request rejected");
    Flash::push(session, FlashLevel::Danger, err.user_message()).await?;
    Ok(Redirect::to(to))
}

/// Builds a file download response.
fn attachment(content_type: &'static str, file_name: &str, body: Vec<u8>) -> Response {
    let disposition: String = format!("attachment; filename=\"{}\"", file_name.replace('"', ""));
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}

async fn handle_dashboard(
    AxumState(app_state): AxumState<AppState>,
    session: Session,
) -> Result<Json<PageResponse<DashboardResponse>>, HttpError> {
    let view: DashboardResponse = {
        let mut persistence = app_state.persistence.lock().await;
        dashboard(&mut persistence, Timestamp::now())?
    };
    render(&session, view).await
}

async fn handle_list_schedules(
    AxumState(app_state): AxumState<AppState>,
    session: Session,
) -> Result<Json<PageResponse<ScheduleListResponse>>, HttpError> {
    let view: ScheduleListResponse = {
        let mut persistence = app_state.persistence.lock().await;
        list_schedules(&mut persistence)?
    };
    render(&session, view).await
}

async fn handle_add_ship_form(
    admin: AdminSession,
) -> Result<Json<PageResponse<ShipFormPage>>, HttpError> {
    let page: ShipFormPage = ShipFormPage {
        fields: ["ship_id", "name", "arrival", "departure"],
    };
    render(&admin.session, page).await
}

async fn handle_add_ship(
    AxumState(app_state): AxumState<AppState>,
    admin: AdminSession,
    Form(request): Form<AddShipRequest>,
) -> Result<Redirect, HttpError> {
    let outcome = {
        let mut persistence = app_state.persistence.lock().await;
        let outcome = add_ship(&mut persistence, &request, Timestamp::now());
        if outcome.is_ok() {
            app_state.refresh_ships_export(&mut persistence);
        }
        outcome
    };

    match outcome {
        Ok(response) => {
            info!(ship_id = %response.ship_id, user = %admin.username, "Ship added");
            succeed(&admin.session, response.message, "/schedules").await
        }
        Err(err) => reject(&admin.session, err, "/schedules/add").await,
    }
}

async fn handle_delete_ship(
    AxumState(app_state): AxumState<AppState>,
    admin: AdminSession,
    Path(ship_id): Path<String>,
) -> Result<Redirect, HttpError> {
    let outcome = {
        let mut persistence = app_state.persistence.lock().await;
        let outcome = delete_ship(&mut persistence, &ship_id);
        if outcome.is_ok() {
            app_state.refresh_ships_export(&mut persistence);
            app_state.refresh_invoices_export(&mut persistence);
        }
        outcome
    };

    match outcome {
        Ok(response) => {
            info!(
                ship_id = %response.ship_id,
                ship_deleted = response.ship_deleted,
                invoices_deleted = response.invoices_deleted,
                user = %admin.username,
                "Ship deleted"
            );
            succeed(&admin.session, response.message, "/schedules").await
        }
        Err(err) => reject(&admin.session, err, "/schedules").await,
    }
}

async fn handle_invoice_form(
    AxumState(app_state): AxumState<AppState>,
    admin: AdminSession,
) -> Result<Json<PageResponse<InvoiceFormResponse>>, HttpError> {
    let view: InvoiceFormResponse = {
        let mut persistence = app_state.persistence.lock().await;
        invoice_form(&mut persistence)?
    };
    render(&admin.session, view).await
}

async fn handle_create_invoice(
    AxumState(app_state): AxumState<AppState>,
    admin: AdminSession,
    Form(request): Form<CreateInvoiceRequest>,
) -> Result<Redirect, HttpError> {
    let outcome = {
        let mut persistence = app_state.persistence.lock().await;
        let outcome = create_invoice(&mut persistence, &request, Timestamp::now());
        if outcome.is_ok() {
            app_state.refresh_invoices_export(&mut persistence);
        }
        outcome
    };

    match outcome {
        Ok(response) => {
            info!(
                invoice_id = response.invoice_id,
                ship_id = %response.ship_id,
                total = response.total,
                user = %admin.username,
                "Invoice created"
            );
            succeed(&admin.session, response.message, "/invoices").await
        }
        Err(err) => reject(&admin.session, err, "/fees").await,
    }
}

async fn handle_list_invoices(
    AxumState(app_state): AxumState<AppState>,
    session: Session,
) -> Result<Json<PageResponse<InvoiceListResponse>>, HttpError> {
    let view: InvoiceListResponse = {
        let mut persistence = app_state.persistence.lock().await;
        list_invoices(&mut persistence)?
    };
    render(&session, view).await
}

async fn handle_delete_invoice(
    AxumState(app_state): AxumState<AppState>,
    admin: AdminSession,
    Path(invoice_id): Path<i64>,
) -> Result<Redirect, HttpError> {
    let outcome = {
        let mut persistence = app_state.persistence.lock().await;
        let outcome = delete_invoice(&mut persistence, invoice_id);
        if outcome.is_ok() {
            app_state.refresh_invoices_export(&mut persistence);
        }
        outcome
    };

    match outcome {
        Ok(response) => {
            info!(
                invoice_id,
                deleted = response.deleted,
                user = %admin.username,
                "Invoice deleted"
            );
            succeed(&admin.session, response.message, "/invoices").await
        }
        Err(err) => reject(&admin.session, err, "/invoices").await,
    }
}

async fn handle_list_circulars(
    AxumState(app_state): AxumState<AppState>,
    session: Session,
) -> Result<Json<PageResponse<CircularListResponse>>, HttpError> {
    let view: CircularListResponse = {
        let mut persistence = app_state.persistence.lock().await;
        list_circulars(&mut persistence)?
    };
    render(&session, view).await
}

/// Reads the `title` and optional `file` parts of a circular upload.
async fn read_circular_form(
    mut multipart: Multipart,
) -> Result<UploadCircularRequest, MultipartError> {
    let mut request: UploadCircularRequest = UploadCircularRequest::default();
    while let Some(field) = multipart.next_field().await? {
        let name: String = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => request.title = field.text().await?,
            "file" => {
                let file_name: String = field.file_name().unwrap_or_default().to_string();
                let contents: Vec<u8> = field.bytes().await?.to_vec();
                request.file = Some(UploadedFile {
                    file_name,
                    contents,
                });
            }
            _ => {}
        }
    }
    Ok(request)
}

/// The rejection shown when an upload body cannot be read.
fn unreadable_upload(reason: &impl std::fmt::Display) -> ApiError {
    warn!(reason = %reason, "Unreadable circular upload");
    ApiError::InvalidInput {
        field: String::from("file"),
        message: String::from("Upload could not be read."),
    }
}

async fn handle_upload_circular(
    AxumState(app_state): AxumState<AppState>,
    session: Session,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Redirect, HttpError> {
    let Some(username) = SessionUser::get(&session).await? else {
        Flash::push(
            &session,
            FlashLevel::Warning,
            "Login required to upload circulars.",
        )
        .await?;
        return Ok(Redirect::to("/login"));
    };

    let multipart: Multipart = match multipart {
        Ok(multipart) => multipart,
        Err(e) => return reject(&session, unreadable_upload(&e), "/circulars").await,
    };
    let request: UploadCircularRequest = match read_circular_form(multipart).await {
        Ok(request) => request,
        Err(e) => return reject(&session, unreadable_upload(&e), "/circulars").await,
    };

    let outcome = {
        let mut persistence = app_state.persistence.lock().await;
        upload_circular(
            &mut persistence,
            &app_state.uploads,
            &request,
            Timestamp::now(),
        )
    };

    match outcome {
        Ok(response) => {
            info!(
                circular_id = response.circular_id,
                filename = ?response.filename,
                user = %username,
                "Circular uploaded"
            );
            succeed(&session, response.message, "/circulars").await
        }
        Err(err) => reject(&session, err, "/circulars").await,
    }
}

async fn handle_download_upload(
    AxumState(app_state): AxumState<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, HttpError> {
    let path: PathBuf = app_state.uploads.resolve(&filename)?;
    let contents: Vec<u8> = tokio::fs::read(&path)
        .await
        .map_err(|e| HttpError::from(UploadError::Io(e)))?;
    Ok(attachment("application/octet-stream", &filename, contents))
}

async fn handle_login_form(
    session: Session,
    Query(query): Query<NextQuery>,
) -> Result<Json<PageResponse<LoginPage>>, HttpError> {
    render(&session, LoginPage { next: query.next }).await
}

async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    session: Session,
    Query(query): Query<NextQuery>,
    Form(request): Form<LoginRequest>,
) -> Result<Redirect, HttpError> {
    let next: Option<String> = query.next.or_else(|| request.next.clone());

    match login(&app_state.credentials, &request) {
        Ok(response) => {
            SessionUser::insert(&session, &response.username).await?;
            succeed(&session, response.message, safe_next(next.as_deref())).await
        }
        Err(err) => {
            let back: String = next.as_deref().map_or_else(
                || String::from("/login"),
                session::login_redirect_target,
            );
            reject(&session, err, &back).await
        }
    }
}

async fn handle_logout(session: Session) -> Result<Redirect, HttpError> {
    session.clear().await;
    Flash::push(&session, FlashLevel::Info, "Logged out.").await?;
    Ok(Redirect::to("/"))
}

async fn handle_seed(
    AxumState(app_state): AxumState<AppState>,
    session: Session,
) -> Result<Redirect, HttpError> {
    let outcome = {
        let mut persistence = app_state.persistence.lock().await;
        let outcome = seed_demo_data(&mut persistence, Timestamp::now());
        if outcome.is_ok() {
            app_state.refresh_ships_export(&mut persistence);
        }
        outcome
    };

    match outcome {
        Ok(response) => {
            info!(inserted = response.inserted, skipped = response.skipped, "Seed requested");
            succeed(&session, response.message, "/schedules").await
        }
        Err(err) => reject(&session, err, "/schedules").await,
    }
}

async fn handle_download_ships(
    AxumState(app_state): AxumState<AppState>,
    admin: AdminSession,
) -> Result<Response, HttpError> {
    let rows: usize = {
        let mut persistence = app_state.persistence.lock().await;
        app_state.exports.export_ships(&mut persistence)?
    };

    let contents: Vec<u8> = tokio::fs::read(app_state.exports.ships_path())
        .await
        .map_err(|e| HttpError::from(ExportError::Io(e)))?;
    info!(rows, user = %admin.username, "Ships export downloaded");
    Ok(attachment("text/csv", SHIPS_EXPORT_FILE, contents))
}

async fn handle_download_fees(
    AxumState(app_state): AxumState<AppState>,
    admin: AdminSession,
) -> Result<Response, HttpError> {
    let rows: usize = {
        let mut persistence = app_state.persistence.lock().await;
        app_state.exports.export_invoices(&mut persistence)?
    };

    let contents: Vec<u8> = tokio::fs::read(app_state.exports.fees_path())
        .await
        .map_err(|e| HttpError::from(ExportError::Io(e)))?;
    info!(rows, user = %admin.username, "Invoices export downloaded");
    Ok(attachment("text/csv", FEES_EXPORT_FILE, contents))
}

/// Builds the application router with session and trace layers.
fn build_router(app_state: AppState, secure_cookies: bool) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnSessionEnd);

    Router::new()
        .route("/", get(handle_dashboard))
        .route("/schedules", get(handle_list_schedules))
        .route(
            "/schedules/add",
            get(handle_add_ship_form).post(handle_add_ship),
        )
        .route("/schedules/delete/{ship_id}", post(handle_delete_ship))
        .route("/fees", get(handle_invoice_form).post(handle_create_invoice))
        .route("/invoices", get(handle_list_invoices))
        .route("/invoices/delete/{id}", post(handle_delete_invoice))
        .route(
            "/circulars",
            get(handle_list_circulars)
                .post(handle_upload_circular)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/uploads/{filename}", get(handle_download_upload))
        .route("/login", get(handle_login_form).post(handle_login))
        .route("/logout", get(handle_logout))
        .route("/seed", get(handle_seed))
        .route("/download/ships", get(handle_download_ships))
        .route("/download/fees", get(handle_download_fees))
        .with_state(app_state)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Harbour Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!(db_path = %db_path, "Using file-based database");
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    std::fs::create_dir_all(&args.uploads_dir)?;
    std::fs::create_dir_all(&args.export_dir)?;
    info!(
        uploads_dir = %args.uploads_dir.display(),
        export_dir = %args.export_dir.display(),
        "Storage directories ready"
    );

    let credentials: AdminCredentials =
        AdminCredentials::new(&args.admin_username, &args.admin_password)?;

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        credentials: Arc::new(credentials),
        uploads: UploadStore::new(args.uploads_dir),
        exports: ExportWriter::new(args.export_dir),
    };

    // Build router
    let app: Router = build_router(app_state, args.secure_cookies);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!(%addr, "Server listening");

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
