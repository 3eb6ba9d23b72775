// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use agrizone_domain::{HariSummary, User, UserType};

use crate::data_models::UserCredentials;
use crate::diesel_schema::users;
use crate::error::PersistenceError;

/// Diesel Queryable struct for user rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = users)]
pub(crate) struct UserRow {
    user_id: i64,
    first_name: String,
    middle_name: String,
    last_name: String,
    father_name: String,
    phone_number: String,
    email: String,
    password_hash: String,
    date_of_birth: String,
    cnic: String,
    user_type: String,
    avatar_url: String,
    created_at: String,
}

impl UserRow {
    /// Converts a stored row into a domain user plus its password hash.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::InvalidRecord` if the stored role or date
    /// of birth cannot be parsed.
    pub(crate) fn into_credentials(self) -> Result<UserCredentials, PersistenceError> {
        let user_type: UserType = self
            .user_type
            .parse()
            .map_err(|e| PersistenceError::InvalidRecord(format!("user {}: {e}", self.user_id)))?;
        let date_of_birth: time::Date = agrizone_domain::parse_date_of_birth(&self.date_of_birth)
            .map_err(|e| PersistenceError::InvalidRecord(format!("user {}: {e}", self.user_id)))?;

        Ok(UserCredentials {
            user: User {
                user_id: self.user_id,
                first_name: self.first_name,
                middle_name: self.middle_name,
                last_name: self.last_name,
                father_name: self.father_name,
                phone_number: self.phone_number,
                email: self.email,
                date_of_birth,
                cnic: self.cnic,
                user_type,
                avatar_url: self.avatar_url,
                created_at: self.created_at,
            },
            password_hash: self.password_hash,
        })
    }
}

/// Retrieves a user by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user_id` - The user ID
///
/// # Errors
///
/// Returns an error if the database query fails or the row is malformed.
/// Returns `Ok(None)` if the user is not found.
pub fn get_user_by_id(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Option<User>, PersistenceError> {
    debug!(user_id, "Looking up user by ID");

    let result: Result<UserRow, diesel::result::Error> = users::table
        .filter(users::user_id.eq(user_id))
        .select(UserRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into_credentials()?.user)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves a user and their password hash by email.
///
/// The email must already be normalized.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is malformed.
/// Returns `Ok(None)` if no user has this email.
pub fn get_user_credentials_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<UserCredentials>, PersistenceError> {
    debug!(email, "Looking up user by email");

    let result: Result<UserRow, diesel::result::Error> = users::table
        .filter(users::email.eq(email))
        .select(UserRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into_credentials()?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Returns whether a user with the given ID has the given role.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn user_has_role(
    conn: &mut SqliteConnection,
    user_id: i64,
    role: UserType,
) -> Result<bool, PersistenceError> {
    use diesel::dsl::count;

    let matches: i64 = users::table
        .filter(users::user_id.eq(user_id))
        .filter(users::user_type.eq(role.as_str()))
        .select(count(users::user_id))
        .first(conn)?;

    debug!(user_id, role = role.as_str(), matches, "Checked user role");
    Ok(matches == 1)
}

/// Lists the contact details of every user with the hari role.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_haris(conn: &mut SqliteConnection) -> Result<Vec<HariSummary>, PersistenceError> {
    debug!("Listing haris");

    let rows: Vec<(i64, String, String, String, String)> = users::table
        .filter(users::user_type.eq(UserType::Hari.as_str()))
        .select((
            users::user_id,
            users::first_name,
            users::last_name,
            users::email,
            users::phone_number,
        ))
        .order_by(users::user_id.asc())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(
            |(user_id, first_name, last_name, email, phone_number)| HariSummary {
                user_id,
                first_name,
                last_name,
                email,
                phone_number,
            },
        )
        .collect())
}
