// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User account mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, info};

use agrizone_domain::{NewUser, UserProfilePatch};

use crate::connection::last_insert_rowid;
use crate::diesel_schema::users;
use crate::error::PersistenceError;

/// Profile columns that may be edited, `None` meaning "leave as is".
#[derive(AsChangeset)]
#[diesel(table_name = users)]
struct ProfileChanges<'a> {
    first_name: Option<&'a str>,
    middle_name: Option<&'a str>,
    last_name: Option<&'a str>,
    father_name: Option<&'a str>,
    phone_number: Option<&'a str>,
    date_of_birth: Option<String>,
    cnic: Option<&'a str>,
    avatar_url: Option<&'a str>,
}

/// Hashes a plain-text password with bcrypt.
///
/// # Errors
///
/// Returns an error if hashing fails.
pub fn hash_password(password: &str, cost: u32) -> Result<String, PersistenceError> {
    bcrypt::hash(password, cost)
        .map_err(|e| PersistenceError::PasswordHashing(format!("Failed to hash password: {e}")))
}

/// Creates a new user account.
///
/// The email is stored as given; callers normalize it first.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user` - The validated account details
/// * `password` - The plain-text password (will be hashed)
/// * `cost` - The bcrypt cost factor
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the email or CNIC is
/// already registered, or another error if the insert fails.
pub fn create_user(
    conn: &mut SqliteConnection,
    user: &NewUser,
    password: &str,
    cost: u32,
) -> Result<i64, PersistenceError> {
    info!(
        email = %user.email,
        user_type = user.user_type.as_str(),
        "Creating user"
    );

    let password_hash: String = hash_password(password, cost)?;

    diesel::insert_into(users::table)
        .values((
            users::first_name.eq(&user.first_name),
            users::middle_name.eq(&user.middle_name),
            users::last_name.eq(&user.last_name),
            users::father_name.eq(&user.father_name),
            users::phone_number.eq(&user.phone_number),
            users::email.eq(&user.email),
            users::password_hash.eq(&password_hash),
            users::date_of_birth.eq(user.date_of_birth.to_string()),
            users::cnic.eq(&user.cnic),
            users::user_type.eq(user.user_type.as_str()),
        ))
        .execute(conn)?;

    let user_id: i64 = last_insert_rowid(conn)?;

    info!(user_id, "User created");
    Ok(user_id)
}

/// Applies a profile edit to a user.
///
/// Returns the number of rows changed (0 when the user does not exist).
/// An empty patch changes nothing and returns 0 without touching the
/// database.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the new CNIC belongs to
/// another user, or another error if the update fails.
pub fn update_user_profile(
    conn: &mut SqliteConnection,
    user_id: i64,
    patch: &UserProfilePatch,
) -> Result<usize, PersistenceError> {
    if patch.is_empty() {
        return Ok(0);
    }

    debug!(user_id, "Updating user profile");

    let changes: ProfileChanges<'_> = ProfileChanges {
        first_name: patch.first_name.as_deref(),
        middle_name: patch.middle_name.as_deref(),
        last_name: patch.last_name.as_deref(),
        father_name: patch.father_name.as_deref(),
        phone_number: patch.phone_number.as_deref(),
        date_of_birth: patch.date_of_birth.map(|d| d.to_string()),
        cnic: patch.cnic.as_deref(),
        avatar_url: patch.avatar_url.as_deref(),
    };

    let rows_affected: usize = diesel::update(users::table)
        .filter(users::user_id.eq(user_id))
        .set(changes)
        .execute(conn)?;

    info!(user_id, rows_affected, "User profile updated");
    Ok(rows_affected)
}

/// Replaces a user's password.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user_id` - The user ID
/// * `new_password` - The new password (will be hashed)
/// * `cost` - The bcrypt cost factor
///
/// # Errors
///
/// Returns an error if the password cannot be hashed or the update fails.
pub fn update_password(
    conn: &mut SqliteConnection,
    user_id: i64,
    new_password: &str,
    cost: u32,
) -> Result<usize, PersistenceError> {
    info!(user_id, "Updating password");

    let password_hash: String = hash_password(new_password, cost)?;

    let rows_affected: usize = diesel::update(users::table)
        .filter(users::user_id.eq(user_id))
        .set(users::password_hash.eq(&password_hash))
        .execute(conn)?;

    Ok(rows_affected)
}
