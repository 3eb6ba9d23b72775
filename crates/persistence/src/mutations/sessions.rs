// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session and password reset code mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, info};

use crate::connection::last_insert_rowid;
use crate::diesel_schema::{password_reset_codes, sessions};
use crate::error::PersistenceError;

/// Creates a new session for a user.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The unique session token
/// * `user_id` - The user ID
/// * `expires_at` - The expiration timestamp (ISO 8601 format)
///
/// # Errors
///
/// Returns an error if the session cannot be created.
pub fn create_session(
    conn: &mut SqliteConnection,
    session_token: &str,
    user_id: i64,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    debug!(user_id, expires_at, "Creating session");

    diesel::insert_into(sessions::table)
        .values((
            sessions::session_token.eq(session_token),
            sessions::user_id.eq(user_id),
            sessions::expires_at.eq(expires_at),
        ))
        .execute(conn)?;

    let session_id: i64 = last_insert_rowid(conn)?;

    debug!(session_id, user_id, "Session created");
    Ok(session_id)
}

/// Deletes a session by token.
///
/// This is used for logout and for expired sessions.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_session(
    conn: &mut SqliteConnection,
    session_token: &str,
) -> Result<usize, PersistenceError> {
    debug!("Deleting session by token");

    let rows_affected: usize = diesel::delete(sessions::table)
        .filter(sessions::session_token.eq(session_token))
        .execute(conn)?;

    Ok(rows_affected)
}

/// Deletes every session belonging to a user.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_sessions_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<usize, PersistenceError> {
    let rows_affected: usize = diesel::delete(sessions::table)
        .filter(sessions::user_id.eq(user_id))
        .execute(conn)?;

    info!(user_id, rows_affected, "Deleted sessions for user");
    Ok(rows_affected)
}

/// Deletes every session that expired before `now`.
///
/// `now` must use the same ISO 8601 format as the stored expiry so the
/// text comparison orders correctly.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_expired_sessions(
    conn: &mut SqliteConnection,
    now: &str,
) -> Result<usize, PersistenceError> {
    let rows_affected: usize = diesel::delete(sessions::table)
        .filter(sessions::expires_at.lt(now))
        .execute(conn)?;

    if rows_affected > 0 {
        info!(rows_affected, "Deleted expired sessions");
    }
    Ok(rows_affected)
}

/// Stores a password reset code.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_reset_code(
    conn: &mut SqliteConnection,
    email: &str,
    code: &str,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(password_reset_codes::table)
        .values((
            password_reset_codes::email.eq(email),
            password_reset_codes::code.eq(code),
            password_reset_codes::expires_at.eq(expires_at),
        ))
        .execute(conn)?;

    let reset_code_id: i64 = last_insert_rowid(conn)?;

    info!(reset_code_id, email, expires_at, "Password reset code stored");
    Ok(reset_code_id)
}

/// Deletes a single reset code.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_reset_code(
    conn: &mut SqliteConnection,
    reset_code_id: i64,
) -> Result<usize, PersistenceError> {
    debug!(reset_code_id, "Deleting password reset code");

    let rows_affected: usize = diesel::delete(password_reset_codes::table)
        .filter(password_reset_codes::reset_code_id.eq(reset_code_id))
        .execute(conn)?;

    Ok(rows_affected)
}
