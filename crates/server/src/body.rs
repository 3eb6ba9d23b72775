// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! JSON request body extraction.
//!
//! Wraps Axum's `Json` extractor so that a body which cannot be read or
//! deserialized is reported with the same `{error, message}` shape as every
//! other failure.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{AppState, ErrorResponse};

/// Extractor for JSON request bodies.
///
/// # Errors
///
/// Rejects with HTTP 400 `validation_error` if the body is not JSON, is
/// missing the JSON content type, or does not match the expected shape.
pub struct JsonBody<T>(pub T);

impl<T> FromRequest<AppState> for JsonBody<T>
where
    T: DeserializeOwned + Send,
{
    type Rejection = BodyError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            debug!(error = %rejection.body_text(), "Rejected request body");
            BodyError(rejection)
        })?;
        Ok(Self(value))
    }
}

/// A request body Axum could not turn into the expected type.
#[derive(Debug)]
pub struct BodyError(JsonRejection);

impl IntoResponse for BodyError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: String::from("validation_error"),
                message: self.0.body_text(),
            }),
        )
            .into_response()
    }
}
