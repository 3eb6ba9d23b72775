// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session extraction for the server.
//!
//! This module provides the Axum extractor that validates session tokens
//! and enforces authentication at the server boundary.

use agrizone_api::{AuthenticatedActor, AuthenticationService};
use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::{AppState, ErrorResponse};

/// Extractor for authenticated accounts.
///
/// Validates the `Authorization: Bearer <token>` header and yields the
/// caller's identity together with the token that carried it.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     session: SessionUser,
/// ) -> Result<Json<Response>, HttpError> {
///     // session.actor: AuthenticatedActor
///     // session.token: String
///     Ok(Json(Response { ... }))
/// }
/// ```
///
/// # Errors
///
/// Rejects with HTTP 401 if the header is missing or malformed, or the
/// session is unknown, expired, or belongs to a deleted account.
pub struct SessionUser {
    /// The authenticated account.
    pub actor: AuthenticatedActor,
    /// The session token from the request.
    pub token: String,
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header: &str = parts
            .headers
            .get("Authorization")
            .ok_or_else(|| {
                debug!("Missing Authorization header");
                SessionError::MissingAuthorizationHeader
            })?
            .to_str()
            .map_err(|_| {
                warn!("Invalid Authorization header encoding");
                SessionError::InvalidAuthorizationHeader
            })?;

        let token: &str = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                warn!("Authorization header is not a bearer token");
                SessionError::InvalidAuthorizationHeader
            })?;

        let mut persistence = state.persistence.lock().await;
        let (actor, _user) = AuthenticationService::validate_session(&mut persistence, token)
            .map_err(|e| {
                warn!(error = %e, "Session validation failed");
                SessionError::InvalidSession(e.to_string())
            })?;

        debug!(
            user_id = actor.user_id,
            role = actor.role.as_str(),
            "Session validated"
        );

        Ok(Self {
            actor,
            token: token.to_string(),
        })
    }
}

/// Session extraction errors.
///
/// These are converted to HTTP 401 responses automatically.
#[derive(Debug)]
pub enum SessionError {
    /// Authorization header is missing.
    MissingAuthorizationHeader,
    /// Authorization header format is invalid.
    InvalidAuthorizationHeader,
    /// Session validation failed.
    InvalidSession(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::MissingAuthorizationHeader => String::from("Missing Authorization header"),
            Self::InvalidAuthorizationHeader => String::from(
                "Invalid Authorization header format. Expected: 'Bearer <token>'",
            ),
            Self::InvalidSession(reason) => reason,
        };

        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: String::from("unauthorized"),
                message,
            }),
        )
            .into_response()
    }
}
