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
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod body;
mod session;

use agrizone_api::{
    ApiError, AppConfig, AssignmentDetailInfo, AssignmentInfo, AuthResponse,
    CreateAssignmentRequest, CreateCropRequest, CreateZoneRequest, CropInfo,
    ForgotPasswordRequest, HariInfo, HealthResponse, ListQuery, LogMailer, Mailer,
    MessageResponse, ResetPasswordRequest, SigninRequest, SignupRequest, SuccessResponse,
    UpdateAssignmentRequest, UpdateCropRequest, UpdateProfileRequest, UpdateZoneRequest,
    UserProfile, VerifyOtpRequest, ZoneInfo,
};
use agrizone_persistence::Persistence;
use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::body::JsonBody;
use crate::session::SessionUser;

/// `AgriZone` Server - HTTP server for the farm-management backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "0.0.0.0")]
    bind: String,

    /// How long a session token stays valid, in days
    #[arg(long, default_value_t = 7)]
    session_ttl_days: i64,

    /// How long a password reset code stays valid, in minutes
    #[arg(long, default_value_t = 5)]
    reset_code_ttl_minutes: i64,

    /// Minimum password length for signup and reset
    #[arg(long, default_value_t = 4)]
    password_min_length: usize,

    /// Sender address for password reset mail
    #[arg(long, default_value = "no-reply@agrizone.local")]
    mail_from: String,
}

impl Args {
    fn app_config(&self) -> AppConfig {
        AppConfig {
            session_ttl: time::Duration::days(self.session_ttl_days),
            reset_code_ttl: time::Duration::minutes(self.reset_code_ttl_minutes),
            password_min_length: self.password_min_length,
            mail_from: self.mail_from.clone(),
        }
    }
}

/// Application state shared across handlers.
///
/// The persistence layer is wrapped in a Mutex; every request holds the
/// lock for the duration of its handler.
#[derive(Clone)]
struct AppState {
    /// The persistence layer.
    persistence: Arc<Mutex<Persistence>>,
    /// Configuration built at start-up.
    config: Arc<AppConfig>,
    /// Delivers password reset codes.
    mailer: Arc<dyn Mailer>,
}

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// A stable machine-readable error code.
    error: String,
    /// A human-readable message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The stable error code.
    error: &'static str,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: self.error.to_string(),
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::AuthenticationFailed { reason } => Self {
                status: StatusCode::UNAUTHORIZED,
                error: "unauthorized",
                message: reason,
            },
            ApiError::Unauthorized {
                action,
                required_role,
            } => Self {
                status: StatusCode::FORBIDDEN,
                error: "forbidden",
                message: format!("Only {required_role}s can {action}"),
            },
            ApiError::DomainRuleViolation { message, .. }
            | ApiError::InvalidInput { message, .. }
            | ApiError::PasswordPolicyViolation { message } => Self {
                status: StatusCode::BAD_REQUEST,
                error: "validation_error",
                message,
            },
            ApiError::InvalidReference { message } => Self {
                status: StatusCode::BAD_REQUEST,
                error: "invalid_reference",
                message,
            },
            ApiError::Conflict { message } => Self {
                status: StatusCode::CONFLICT,
                error: "conflict",
                message,
            },
            ApiError::ResourceNotFound { message, .. } => Self {
                status: StatusCode::NOT_FOUND,
                error: "not_found",
                message,
            },
            ApiError::Internal { message } => {
                error!(error = %message, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: "internal_error",
                    message: String::from("Internal server error"),
                }
            }
        }
    }
}

// ============================================================================
// Accounts
// ============================================================================

/// Handler for POST `/api/auth/signup`.
async fn handle_signup(
    AxumState(app_state): AxumState<AppState>,
    JsonBody(req): JsonBody<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: AuthResponse =
        agrizone_api::signup(&mut persistence, &app_state.config, &req)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for POST `/api/auth/signin`.
async fn handle_signin(
    AxumState(app_state): AxumState<AppState>,
    JsonBody(req): JsonBody<SigninRequest>,
) -> Result<Json<AuthResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: AuthResponse =
        agrizone_api::signin(&mut persistence, &app_state.config, &req)?;
    Ok(Json(response))
}

/// Handler for POST `/api/auth/logout`.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
) -> Result<Json<MessageResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: MessageResponse = agrizone_api::logout(&mut persistence, &session.token)?;
    info!(user_id = session.actor.user_id, "Logged out");
    Ok(Json(response))
}

// ============================================================================
// Password reset
// ============================================================================

/// Handler for POST `/api/password/forgot`.
async fn handle_forgot_password(
    AxumState(app_state): AxumState<AppState>,
    JsonBody(req): JsonBody<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: MessageResponse = agrizone_api::forgot_password(
        &mut persistence,
        &app_state.config,
        app_state.mailer.as_ref(),
        &req,
    )?;
    Ok(Json(response))
}

/// Handler for POST `/api/password/verify-otp`.
async fn handle_verify_otp(
    AxumState(app_state): AxumState<AppState>,
    JsonBody(req): JsonBody<VerifyOtpRequest>,
) -> Result<Json<MessageResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: MessageResponse = agrizone_api::verify_otp(&mut persistence, &req)?;
    Ok(Json(response))
}

/// Handler for POST `/api/password/reset`.
async fn handle_reset_password(
    AxumState(app_state): AxumState<AppState>,
    JsonBody(req): JsonBody<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: MessageResponse =
        agrizone_api::reset_password(&mut persistence, &app_state.config, &req)?;
    Ok(Json(response))
}

// ============================================================================
// Profile
// ============================================================================

/// Handler for GET `/api/profile/me`.
async fn handle_get_profile(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
) -> Result<Json<UserProfile>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let profile: UserProfile = agrizone_api::get_profile(&mut persistence, &session.actor)?;
    Ok(Json(profile))
}

/// Handler for PUT `/api/profile/me`.
async fn handle_update_profile(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    JsonBody(req): JsonBody<UpdateProfileRequest>,
) -> Result<Json<UserProfile>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let profile: UserProfile =
        agrizone_api::update_profile(&mut persistence, &session.actor, &req)?;
    Ok(Json(profile))
}

// ============================================================================
// Zones
// ============================================================================

/// Handler for POST `/api/zones`.
async fn handle_create_zone(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    JsonBody(req): JsonBody<CreateZoneRequest>,
) -> Result<(StatusCode, Json<ZoneInfo>), HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let zone: ZoneInfo = agrizone_api::create_zone(&mut persistence, &session.actor, &req)?;
    Ok((StatusCode::CREATED, Json(zone)))
}

/// Handler for GET `/api/zones`.
async fn handle_list_zones(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ZoneInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let zones: Vec<ZoneInfo> =
        agrizone_api::list_zones(&mut persistence, &session.actor, &query)?;
    Ok(Json(zones))
}

/// Handler for PUT `/api/zones/{zone_id}`.
async fn handle_update_zone(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    Path(zone_id): Path<i64>,
    JsonBody(req): JsonBody<UpdateZoneRequest>,
) -> Result<Json<ZoneInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let zone: ZoneInfo =
        agrizone_api::update_zone(&mut persistence, &session.actor, zone_id, &req)?;
    Ok(Json(zone))
}

/// Handler for DELETE `/api/zones/{zone_id}`.
async fn handle_delete_zone(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    Path(zone_id): Path<i64>,
) -> Result<Json<SuccessResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: SuccessResponse =
        agrizone_api::delete_zone(&mut persistence, &session.actor, zone_id)?;
    Ok(Json(response))
}

// ============================================================================
// Crops
// ============================================================================

/// Handler for POST `/api/crops`.
async fn handle_create_crop(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    JsonBody(req): JsonBody<CreateCropRequest>,
) -> Result<(StatusCode, Json<CropInfo>), HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let crop: CropInfo = agrizone_api::create_crop(&mut persistence, &session.actor, &req)?;
    Ok((StatusCode::CREATED, Json(crop)))
}

/// Handler for GET `/api/crops`.
async fn handle_list_crops(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<CropInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let crops: Vec<CropInfo> =
        agrizone_api::list_crops(&mut persistence, &session.actor, &query)?;
    Ok(Json(crops))
}

/// Handler for PUT `/api/crops/{crop_id}`.
async fn handle_update_crop(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    Path(crop_id): Path<i64>,
    JsonBody(req): JsonBody<UpdateCropRequest>,
) -> Result<Json<CropInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let crop: CropInfo =
        agrizone_api::update_crop(&mut persistence, &session.actor, crop_id, &req)?;
    Ok(Json(crop))
}

/// Handler for DELETE `/api/crops/{crop_id}`.
async fn handle_delete_crop(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    Path(crop_id): Path<i64>,
) -> Result<Json<SuccessResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: SuccessResponse =
        agrizone_api::delete_crop(&mut persistence, &session.actor, crop_id)?;
    Ok(Json(response))
}

// ============================================================================
// Haris
// ============================================================================

/// Handler for GET `/api/haris`.
async fn handle_list_haris(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
) -> Result<Json<Vec<HariInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let haris: Vec<HariInfo> = agrizone_api::list_haris(&mut persistence, &session.actor)?;
    Ok(Json(haris))
}

// ============================================================================
// Assignments
// ============================================================================

/// Handler for POST `/api/assignments`.
async fn handle_create_assignment(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    JsonBody(req): JsonBody<CreateAssignmentRequest>,
) -> Result<(StatusCode, Json<AssignmentInfo>), HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let assignment: AssignmentInfo =
        agrizone_api::create_assignment(&mut persistence, &session.actor, &req)?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

/// Handler for GET `/api/assignments`.
///
/// Landowners see every assignment they own; haris see their own active and
/// pending assignments.
async fn handle_list_assignments(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
) -> Result<Json<Vec<AssignmentDetailInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let assignments: Vec<AssignmentDetailInfo> =
        agrizone_api::list_assignments(&mut persistence, &session.actor)?;
    Ok(Json(assignments))
}

/// Handler for PUT `/api/assignments/{assignment_id}`.
async fn handle_update_assignment(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    Path(assignment_id): Path<i64>,
    JsonBody(req): JsonBody<UpdateAssignmentRequest>,
) -> Result<Json<AssignmentInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let assignment: AssignmentInfo =
        agrizone_api::update_assignment(&mut persistence, &session.actor, assignment_id, &req)?;
    Ok(Json(assignment))
}

/// Handler for DELETE `/api/assignments/{assignment_id}`.
async fn handle_delete_assignment(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    Path(assignment_id): Path<i64>,
) -> Result<Json<SuccessResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: SuccessResponse =
        agrizone_api::delete_assignment(&mut persistence, &session.actor, assignment_id)?;
    Ok(Json(response))
}

// ============================================================================
// Health and fallback
// ============================================================================

/// Handler for GET `/api/health`.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("OK"),
        message: String::from("AgriZone Backend is running"),
    })
}

/// Handler for unmatched routes.
async fn handle_not_found() -> HttpError {
    HttpError {
        status: StatusCode::NOT_FOUND,
        error: "not_found",
        message: String::from("API route not found"),
    }
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/auth/signup", post(handle_signup))
        .route("/api/auth/signin", post(handle_signin))
        .route("/api/auth/logout", post(handle_logout))
        .route("/api/password/forgot", post(handle_forgot_password))
        .route("/api/password/verify-otp", post(handle_verify_otp))
        .route("/api/password/reset", post(handle_reset_password))
        .route(
            "/api/profile/me",
            get(handle_get_profile).put(handle_update_profile),
        )
        .route("/api/zones", get(handle_list_zones).post(handle_create_zone))
        .route(
            "/api/zones/{zone_id}",
            put(handle_update_zone).delete(handle_delete_zone),
        )
        .route("/api/crops", get(handle_list_crops).post(handle_create_crop))
        .route(
            "/api/crops/{crop_id}",
            put(handle_update_crop).delete(handle_delete_crop),
        )
        .route("/api/haris", get(handle_list_haris))
        .route(
            "/api/assignments",
            get(handle_list_assignments).post(handle_create_assignment),
        )
        .route(
            "/api/assignments/{assignment_id}",
            put(handle_update_assignment).delete(handle_delete_assignment),
        )
        .route("/api/health", get(handle_health))
        .fallback(handle_not_found)
        .with_state(app_state)
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

    info!("Initializing AgriZone Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let purged: usize = persistence.delete_expired_sessions()?;
    info!(purged, "Removed expired sessions");

    let config: AppConfig = args.app_config();
    let mailer: LogMailer = LogMailer::new(config.mail_from.clone());

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        config: Arc::new(config),
        mailer: Arc::new(mailer),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
