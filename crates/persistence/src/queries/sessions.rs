// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session and password reset code queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::{ResetCodeData, SessionData};
use crate::diesel_schema::{password_reset_codes, sessions};
use crate::error::PersistenceError;

/// Diesel Queryable struct for session rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = sessions)]
struct SessionRow {
    session_id: i64,
    session_token: String,
    user_id: i64,
    created_at: String,
    expires_at: String,
}

/// Diesel Queryable struct for reset code rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = password_reset_codes)]
struct ResetCodeRow {
    reset_code_id: i64,
    email: String,
    code: String,
    created_at: String,
    expires_at: String,
}

/// Retrieves a session by token.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The session token
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the session is not found.
pub fn get_session_by_token(
    conn: &mut SqliteConnection,
    session_token: &str,
) -> Result<Option<SessionData>, PersistenceError> {
    debug!("Looking up session by token");

    let result: Result<SessionRow, diesel::result::Error> = sessions::table
        .filter(sessions::session_token.eq(session_token))
        .select(SessionRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(SessionData {
            session_id: row.session_id,
            session_token: row.session_token,
            user_id: row.user_id,
            created_at: row.created_at,
            expires_at: row.expires_at,
        })),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves the newest reset code matching an email and code.
///
/// Expiry is not checked here; the caller decides what an expired code
/// means.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no code matches.
pub fn find_reset_code(
    conn: &mut SqliteConnection,
    email: &str,
    code: &str,
) -> Result<Option<ResetCodeData>, PersistenceError> {
    debug!(email, "Looking up password reset code");

    let result: Result<ResetCodeRow, diesel::result::Error> = password_reset_codes::table
        .filter(password_reset_codes::email.eq(email))
        .filter(password_reset_codes::code.eq(code))
        .order_by(password_reset_codes::reset_code_id.desc())
        .select(ResetCodeRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(ResetCodeData {
            reset_code_id: row.reset_code_id,
            email: row.email,
            code: row.code,
            created_at: row.created_at,
            expires_at: row.expires_at,
        })),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
