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

mod identity;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::{Parser, Subcommand};
use leaves::{BootstrapSummary, LedgerConfig};
use leaves_api::{
    AllocationSummaryResponse, ApiError, DashboardResponse, DeleteEmployeeResponse,
    DeleteLeaveRequestResponse, DisabledDatesResponse, LeaveRequestInfo, LeaveRequestResponse,
    ListEmployeesQuery, ListEmployeesResponse, ListLeaveRequestsQuery, ListLeaveRequestsResponse,
    RegisterEmployeeRequest, RegisterEmployeeResponse, ReviewLeaveRequest, RunAllocationRequest,
    RunAllocationResponse, SubmitLeaveRequest, UpdateEmployeeRequest, UpdateEmployeeResponse,
    allocate_year, approve_leave_request, delete_employee, delete_leave_request,
    get_allocation_summary, get_dashboard, get_disabled_dates, get_leave_request, list_employees,
    list_leave_requests, register_employee, reject_leave_request, run_yearly_allocation,
    seed_reference_data, submit_leave_request, update_employee,
};
use leaves_domain::AllocationYearPolicy;
use leaves_persistence::Persistence;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::identity::Caller;

/// Leaves Server - HTTP server for the Leaves system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, global = true)]
    database: Option<String>,

    /// Which year's allocation a request is validated and debited against.
    #[arg(long, global = true, default_value = "current-year")]
    allocation_year_policy: AllocationYearPolicy,

    #[command(subcommand)]
    command: Option<ServerCommand>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum ServerCommand {
    /// Serve the HTTP API (default)
    Serve {
        /// Port to bind the server to
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Grant or reset every employee's standard quotas for a year, then exit
    Allocate {
        /// The year to allocate; defaults to the current year
        #[arg(long)]
        year: Option<i32>,
    },
}

/// Application state shared across handlers.
///
/// The store handle is wrapped in a Mutex so each request holds it for
/// the duration of one operation.
#[derive(Clone)]
struct AppState {
    /// The `SQLite` store.
    persistence: Arc<Mutex<Persistence>>,
    /// Ledger configuration.
    config: LedgerConfig,
}

/// Optional `year` query parameter.
#[derive(Debug, Clone, Copy, Deserialize)]
struct YearQuery {
    year: Option<i32>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
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
        let status: StatusCode = match &err {
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Parses an optional JSON body, treating an empty body as the default.
fn parse_optional_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, HttpError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|err| HttpError {
        status: StatusCode::BAD_REQUEST,
        message: format!("Invalid request body: {err}"),
    })
}

/// Handler for POST `/employees` endpoint.
async fn handle_register_employee(
    AxumState(app_state): AxumState<AppState>,
    Caller(actor): Caller,
    Json(req): Json<RegisterEmployeeRequest>,
) -> Result<Json<RegisterEmployeeResponse>, HttpError> {
    info!(actor_id = actor.employee_id, "Handling register_employee request");

    let today = OffsetDateTime::now_utc().date();
    let mut persistence = app_state.persistence.lock().await;
    let response = register_employee(&mut persistence, &actor, req, today)?;

    Ok(Json(response))
}

/// Handler for GET `/employees` endpoint.
async fn handle_list_employees(
    AxumState(app_state): AxumState<AppState>,
    Caller(actor): Caller,
    Query(query): Query<ListEmployeesQuery>,
) -> Result<Json<ListEmployeesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = list_employees(&mut persistence, &actor, &query)?;

    Ok(Json(response))
}

/// Handler for PUT `/employees/{employee_id}` endpoint.
async fn handle_update_employee(
    AxumState(app_state): AxumState<AppState>,
    Caller(actor): Caller,
    Path(employee_id): Path<i64>,
    Json(req): Json<UpdateEmployeeRequest>,
) -> Result<Json<UpdateEmployeeResponse>, HttpError> {
    info!(actor_id = actor.employee_id, employee_id, "Handling update_employee request");

    let today = OffsetDateTime::now_utc().date();
    let mut persistence = app_state.persistence.lock().await;
    let response = update_employee(&mut persistence, &actor, employee_id, req, today)?;

    Ok(Json(response))
}

/// Handler for DELETE `/employees/{employee_id}` endpoint.
async fn handle_delete_employee(
    AxumState(app_state): AxumState<AppState>,
    Caller(actor): Caller,
    Path(employee_id): Path<i64>,
) -> Result<Json<DeleteEmployeeResponse>, HttpError> {
    info!(actor_id = actor.employee_id, employee_id, "Handling delete_employee request");

    let mut persistence = app_state.persistence.lock().await;
    let response = delete_employee(&mut persistence, &actor, employee_id)?;

    Ok(Json(response))
}

/// Handler for GET `/allocations` endpoint.
///
/// Summarizes the caller's own allocations.
async fn handle_get_own_allocations(
    AxumState(app_state): AxumState<AppState>,
    Caller(actor): Caller,
    Query(query): Query<YearQuery>,
) -> Result<Json<AllocationSummaryResponse>, HttpError> {
    let year: i32 = query
        .year
        .unwrap_or_else(|| OffsetDateTime::now_utc().year());

    let mut persistence = app_state.persistence.lock().await;
    let response = get_allocation_summary(&mut persistence, &actor, actor.employee_id, year)?;

    Ok(Json(response))
}

/// Handler for GET `/employees/{employee_id}/allocations` endpoint.
async fn handle_get_employee_allocations(
    AxumState(app_state): AxumState<AppState>,
    Caller(actor): Caller,
    Path(employee_id): Path<i64>,
    Query(query): Query<YearQuery>,
) -> Result<Json<AllocationSummaryResponse>, HttpError> {
    let year: i32 = query
        .year
        .unwrap_or_else(|| OffsetDateTime::now_utc().year());

    let mut persistence = app_state.persistence.lock().await;
    let response = get_allocation_summary(&mut persistence, &actor, employee_id, year)?;

    Ok(Json(response))
}

/// Handler for POST `/allocations/allocate` endpoint.
async fn handle_run_allocation(
    AxumState(app_state): AxumState<AppState>,
    Caller(actor): Caller,
    Query(req): Query<RunAllocationRequest>,
) -> Result<Json<RunAllocationResponse>, HttpError> {
    info!(actor_id = actor.employee_id, year = ?req.year, "Handling yearly allocation request");

    let today = OffsetDateTime::now_utc().date();
    let mut persistence = app_state.persistence.lock().await;
    let response = run_yearly_allocation(&mut persistence, &actor, req, today)?;

    Ok(Json(response))
}

/// Handler for POST `/leave_requests` endpoint.
async fn handle_submit_leave_request(
    AxumState(app_state): AxumState<AppState>,
    Caller(actor): Caller,
    Json(req): Json<SubmitLeaveRequest>,
) -> Result<Json<LeaveRequestResponse>, HttpError> {
    info!(
        actor_id = actor.employee_id,
        leave_type_id = req.leave_type_id,
        "Handling submit_leave_request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response = submit_leave_request(
        &mut persistence,
        &app_state.config,
        &actor,
        req,
        OffsetDateTime::now_utc(),
    )?;

    Ok(Json(response))
}

/// Handler for GET `/leave_requests` endpoint.
async fn handle_list_leave_requests(
    AxumState(app_state): AxumState<AppState>,
    Caller(actor): Caller,
    Query(query): Query<ListLeaveRequestsQuery>,
) -> Result<Json<ListLeaveRequestsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = list_leave_requests(&mut persistence, &actor, &query)?;

    Ok(Json(response))
}

/// Handler for GET `/leave_requests/{request_id}` endpoint.
async fn handle_get_leave_request(
    AxumState(app_state): AxumState<AppState>,
    Caller(actor): Caller,
    Path(request_id): Path<i64>,
) -> Result<Json<LeaveRequestInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = get_leave_request(&mut persistence, &actor, request_id)?;

    Ok(Json(response))
}

/// Handler for DELETE `/leave_requests/{request_id}` endpoint.
async fn handle_delete_leave_request(
    AxumState(app_state): AxumState<AppState>,
    Caller(actor): Caller,
    Path(request_id): Path<i64>,
) -> Result<Json<DeleteLeaveRequestResponse>, HttpError> {
    info!(actor_id = actor.employee_id, request_id, "Handling delete_leave_request");

    let mut persistence = app_state.persistence.lock().await;
    let response =
        delete_leave_request(&mut persistence, &actor, request_id, OffsetDateTime::now_utc())?;

    Ok(Json(response))
}

/// Handler for POST `/leave_requests/{request_id}/approve` endpoint.
///
/// The body is optional.
async fn handle_approve_leave_request(
    AxumState(app_state): AxumState<AppState>,
    Caller(actor): Caller,
    Path(request_id): Path<i64>,
    body: Bytes,
) -> Result<Json<LeaveRequestResponse>, HttpError> {
    info!(actor_id = actor.employee_id, request_id, "Handling approve_leave_request");

    let req: ReviewLeaveRequest = parse_optional_body(&body)?;
    let mut persistence = app_state.persistence.lock().await;
    let response = approve_leave_request(
        &mut persistence,
        &app_state.config,
        &actor,
        request_id,
        req,
        OffsetDateTime::now_utc(),
    )?;

    Ok(Json(response))
}

/// Handler for POST `/leave_requests/{request_id}/reject` endpoint.
async fn handle_reject_leave_request(
    AxumState(app_state): AxumState<AppState>,
    Caller(actor): Caller,
    Path(request_id): Path<i64>,
    body: Bytes,
) -> Result<Json<LeaveRequestResponse>, HttpError> {
    info!(actor_id = actor.employee_id, request_id, "Handling reject_leave_request");

    let req: ReviewLeaveRequest = parse_optional_body(&body)?;
    let mut persistence = app_state.persistence.lock().await;
    let response = reject_leave_request(
        &mut persistence,
        &app_state.config,
        &actor,
        request_id,
        req,
        OffsetDateTime::now_utc(),
    )?;

    Ok(Json(response))
}

/// Handler for GET `/leave_requests/disabled_dates` endpoint.
async fn handle_get_disabled_dates(
    AxumState(app_state): AxumState<AppState>,
    Caller(actor): Caller,
) -> Result<Json<DisabledDatesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = get_disabled_dates(&mut persistence, &actor)?;

    Ok(Json(response))
}

/// Handler for GET `/dashboard` endpoint.
async fn handle_get_dashboard(
    AxumState(app_state): AxumState<AppState>,
    Caller(actor): Caller,
) -> Result<Json<DashboardResponse>, HttpError> {
    let today = OffsetDateTime::now_utc().date();
    let mut persistence = app_state.persistence.lock().await;
    let response = get_dashboard(&mut persistence, &actor, today)?;

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/employees",
            post(handle_register_employee).get(handle_list_employees),
        )
        .route(
            "/employees/{employee_id}",
            put(handle_update_employee).delete(handle_delete_employee),
        )
        .route(
            "/employees/{employee_id}/allocations",
            get(handle_get_employee_allocations),
        )
        .route("/allocations", get(handle_get_own_allocations))
        .route("/allocations/allocate", post(handle_run_allocation))
        .route(
            "/leave_requests",
            post(handle_submit_leave_request).get(handle_list_leave_requests),
        )
        .route(
            "/leave_requests/disabled_dates",
            get(handle_get_disabled_dates),
        )
        .route(
            "/leave_requests/{request_id}",
            get(handle_get_leave_request).delete(handle_delete_leave_request),
        )
        .route(
            "/leave_requests/{request_id}/approve",
            post(handle_approve_leave_request),
        )
        .route(
            "/leave_requests/{request_id}/reject",
            post(handle_reject_leave_request),
        )
        .route("/dashboard", get(handle_get_dashboard))
        .with_state(app_state)
}

/// Opens the store and makes sure the reference leave types exist.
fn open_persistence(database: Option<&str>) -> Result<Persistence, Box<dyn std::error::Error>> {
    let mut persistence: Persistence = if let Some(db_path) = database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };
    seed_reference_data(&mut persistence)?;
    Ok(persistence)
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

    info!(
        policy = %args.allocation_year_policy,
        "Initializing Leaves Server"
    );

    let mut persistence: Persistence = open_persistence(args.database.as_deref())?;

    match args.command.unwrap_or(ServerCommand::Serve { port: 3000 }) {
        ServerCommand::Allocate { year } => {
            if args.database.is_none() {
                warn!("Allocating into an in-memory database; nothing will be kept");
            }
            let year: i32 = year.unwrap_or_else(|| OffsetDateTime::now_utc().year());
            let summary: BootstrapSummary = allocate_year(&mut persistence, year)?;
            println!(
                "Allocated leave for {} employees for year {} ({} created, {} updated)",
                summary.employees_processed, summary.year, summary.created, summary.updated
            );
            Ok(())
        }
        ServerCommand::Serve { port } => {
            let app_state: AppState = AppState {
                persistence: Arc::new(Mutex::new(persistence)),
                config: LedgerConfig::new(args.allocation_year_policy),
            };

            // Build router
            let app: Router = build_router(app_state);

            // Bind to address
            let addr: std::net::SocketAddr = format!("127.0.0.1:{port}").parse()?;
            info!("Server listening on {}", addr);

            // Run server
            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;

            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;
