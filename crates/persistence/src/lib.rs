// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the AgriZone backend.
//!
//! This crate stores users, login sessions, password reset codes, zones,
//! crops and assignments in `SQLite` through Diesel, and implements the
//! [`agrizone::AssignmentStore`] trait the assignment rules run against.
//!
//! ## Database
//!
//! - In-memory databases (`Persistence::new_in_memory`) are used by tests;
//!   each call gets its own isolated database.
//! - File databases (`Persistence::new_with_file`) use WAL journaling.
//! - Migrations are embedded and applied on open. Foreign key enforcement
//!   is switched on and verified before the adapter is returned.
//!
//! ## Integrity
//!
//! The schema, not application code, is the final word on uniqueness:
//!
//! - `users.email` and `users.cnic` are unique
//! - an assignment's (landowner, hari, zone, crop) tuple is unique
//! - at most one active or pending assignment exists per
//!   (landowner, hari, zone)
//!
//! Violations surface as [`PersistenceError::UniqueViolation`].
//!
//! ## Testing Philosophy
//!
//! - Tests run against fresh in-memory databases
//! - Password hashing cost can be lowered with
//!   [`Persistence::set_password_cost`] to keep tests fast

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;
use time::format_description::well_known::Iso8601;

use agrizone_domain::{
    Crop, CropPatch, HariSummary, NewCrop, NewUser, NewZone, User, UserProfilePatch, Zone,
    ZonePatch,
};

mod connection;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod store;

#[cfg(test)]
mod tests;

pub use data_models::{ResetCodeData, SessionData, UserCredentials};
pub use error::PersistenceError;

use connection::StoreLocation;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Returns the current UTC time in the format used for stored timestamps.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted.
fn now_timestamp() -> Result<String, PersistenceError> {
    OffsetDateTime::now_utc()
        .format(&Iso8601::DEFAULT)
        .map_err(|e| PersistenceError::Other(format!("Failed to format timestamp: {e}")))
}

/// Persistence adapter for the AgriZone entity store.
///
/// Holds a single `SQLite` connection. Callers share it behind a mutex.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
    password_cost: u32,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:agrizone_memdb_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection = connection::open(&shared_memory_url, StoreLocation::Memory)?;

        Ok(Self {
            conn,
            password_cost: bcrypt::DEFAULT_COST,
        })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let conn: SqliteConnection = connection::open(path_str, StoreLocation::File)?;

        Ok(Self {
            conn,
            password_cost: bcrypt::DEFAULT_COST,
        })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        if connection::foreign_keys_enabled(&mut self.conn)? {
            Ok(())
        } else {
            Err(PersistenceError::ForeignKeyEnforcementNotEnabled)
        }
    }

    /// Sets the bcrypt cost used for new password hashes.
    ///
    /// Defaults to `bcrypt::DEFAULT_COST`. Existing hashes keep the cost
    /// they were created with.
    pub const fn set_password_cost(&mut self, cost: u32) {
        self.password_cost = cost;
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Creates a user account and returns the stored user.
    ///
    /// # Arguments
    ///
    /// * `user` - The validated account details, email already normalized
    /// * `password` - The plain-text password (will be hashed)
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::UniqueViolation` if the email or CNIC is
    /// taken, or another error if the insert fails.
    pub fn create_user(&mut self, user: &NewUser, password: &str) -> Result<User, PersistenceError> {
        let user_id: i64 =
            mutations::users::create_user(&mut self.conn, user, password, self.password_cost)?;
        queries::users::get_user_by_id(&mut self.conn, user_id)?
            .ok_or_else(|| PersistenceError::NotFound(format!("User {user_id}")))
    }

    /// Retrieves a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_id(&mut self, user_id: i64) -> Result<Option<User>, PersistenceError> {
        queries::users::get_user_by_id(&mut self.conn, user_id)
    }

    /// Retrieves a user and their password hash by (normalized) email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_credentials_by_email(
        &mut self,
        email: &str,
    ) -> Result<Option<UserCredentials>, PersistenceError> {
        queries::users::get_user_credentials_by_email(&mut self.conn, email)
    }

    /// Verifies a password against a stored hash.
    ///
    /// # Arguments
    ///
    /// * `password` - The plain-text password
    /// * `password_hash` - The stored bcrypt hash
    ///
    /// # Errors
    ///
    /// Returns an error if the stored hash is malformed.
    pub fn verify_password(
        password: &str,
        password_hash: &str,
    ) -> Result<bool, PersistenceError> {
        bcrypt::verify(password, password_hash).map_err(|e| {
            PersistenceError::PasswordHashing(format!("Failed to verify password: {e}"))
        })
    }

    /// Applies a profile edit and returns the updated user.
    ///
    /// Returns `None` if the user does not exist.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::UniqueViolation` if the new CNIC belongs
    /// to another user, or another error if the update fails.
    pub fn update_user_profile(
        &mut self,
        user_id: i64,
        patch: &UserProfilePatch,
    ) -> Result<Option<User>, PersistenceError> {
        mutations::users::update_user_profile(&mut self.conn, user_id, patch)?;
        queries::users::get_user_by_id(&mut self.conn, user_id)
    }

    /// Replaces a user's password.
    ///
    /// Returns whether the user exists.
    ///
    /// # Errors
    ///
    /// Returns an error if hashing or the update fails.
    pub fn update_password(
        &mut self,
        user_id: i64,
        new_password: &str,
    ) -> Result<bool, PersistenceError> {
        let rows: usize = mutations::users::update_password(
            &mut self.conn,
            user_id,
            new_password,
            self.password_cost,
        )?;
        Ok(rows > 0)
    }

    /// Lists every user with the hari role.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_haris(&mut self) -> Result<Vec<HariSummary>, PersistenceError> {
        queries::users::list_haris(&mut self.conn)
    }

    // ========================================================================
    // Sessions
    // ========================================================================

    /// Creates a new session for a user.
    ///
    /// # Arguments
    ///
    /// * `session_token` - The unique session token
    /// * `user_id` - The user ID
    /// * `expires_at` - The expiration timestamp (ISO 8601 format)
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be created.
    pub fn create_session(
        &mut self,
        session_token: &str,
        user_id: i64,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::sessions::create_session(&mut self.conn, session_token, user_id, expires_at)
    }

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::sessions::get_session_by_token(&mut self.conn, session_token)
    }

    /// Deletes a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::sessions::delete_session(&mut self.conn, session_token)?;
        Ok(())
    }

    /// Deletes all sessions for a specific user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_sessions_for_user(&mut self, user_id: i64) -> Result<usize, PersistenceError> {
        mutations::sessions::delete_sessions_for_user(&mut self.conn, user_id)
    }

    /// Deletes all sessions that have expired.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_expired_sessions(&mut self) -> Result<usize, PersistenceError> {
        let now: String = now_timestamp()?;
        mutations::sessions::delete_expired_sessions(&mut self.conn, &now)
    }

    // ========================================================================
    // Password reset codes
    // ========================================================================

    /// Stores a password reset code.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_reset_code(
        &mut self,
        email: &str,
        code: &str,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::sessions::create_reset_code(&mut self.conn, email, code, expires_at)
    }

    /// Retrieves the newest reset code matching an email and code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn find_reset_code(
        &mut self,
        email: &str,
        code: &str,
    ) -> Result<Option<ResetCodeData>, PersistenceError> {
        queries::sessions::find_reset_code(&mut self.conn, email, code)
    }

    /// Deletes a reset code once it has been used or has expired.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_reset_code(&mut self, reset_code_id: i64) -> Result<(), PersistenceError> {
        mutations::sessions::delete_reset_code(&mut self.conn, reset_code_id)?;
        Ok(())
    }

    // ========================================================================
    // Zones
    // ========================================================================

    /// Creates a zone and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_zone(
        &mut self,
        landowner_id: i64,
        zone: &NewZone,
    ) -> Result<Zone, PersistenceError> {
        let zone_id: i64 = mutations::zones::create_zone(&mut self.conn, landowner_id, zone)?;
        queries::zones::get_zone(&mut self.conn, zone_id, landowner_id)?
            .ok_or_else(|| PersistenceError::NotFound(format!("Zone {zone_id}")))
    }

    /// Lists a landowner's zones, newest first.
    ///
    /// # Arguments
    ///
    /// * `landowner_id` - The owning landowner
    /// * `name_filter` - Optional case-insensitive name substring
    /// * `limit` - Maximum number of zones
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_zones(
        &mut self,
        landowner_id: i64,
        name_filter: Option<&str>,
        limit: i64,
    ) -> Result<Vec<Zone>, PersistenceError> {
        queries::zones::list_zones(&mut self.conn, landowner_id, name_filter, limit)
    }

    /// Applies a zone edit and returns the updated record.
    ///
    /// Returns `None` if the landowner owns no such zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_zone(
        &mut self,
        zone_id: i64,
        landowner_id: i64,
        patch: &ZonePatch,
    ) -> Result<Option<Zone>, PersistenceError> {
        mutations::zones::update_zone(&mut self.conn, zone_id, landowner_id, patch)?;
        queries::zones::get_zone(&mut self.conn, zone_id, landowner_id)
    }

    /// Deletes a zone. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_zone(&mut self, zone_id: i64, landowner_id: i64) -> Result<bool, PersistenceError> {
        let rows: usize = mutations::zones::delete_zone(&mut self.conn, zone_id, landowner_id)?;
        Ok(rows > 0)
    }

    // ========================================================================
    // Crops
    // ========================================================================

    /// Creates a crop and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_crop(
        &mut self,
        landowner_id: i64,
        crop: &NewCrop,
    ) -> Result<Crop, PersistenceError> {
        let crop_id: i64 = mutations::zones::create_crop(&mut self.conn, landowner_id, crop)?;
        queries::zones::get_crop(&mut self.conn, crop_id, landowner_id)?
            .ok_or_else(|| PersistenceError::NotFound(format!("Crop {crop_id}")))
    }

    /// Lists a landowner's crops, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_crops(
        &mut self,
        landowner_id: i64,
        name_filter: Option<&str>,
        limit: i64,
    ) -> Result<Vec<Crop>, PersistenceError> {
        queries::zones::list_crops(&mut self.conn, landowner_id, name_filter, limit)
    }

    /// Applies a crop edit and returns the updated record.
    ///
    /// Returns `None` if the landowner owns no such crop.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_crop(
        &mut self,
        crop_id: i64,
        landowner_id: i64,
        patch: &CropPatch,
    ) -> Result<Option<Crop>, PersistenceError> {
        mutations::zones::update_crop(&mut self.conn, crop_id, landowner_id, patch)?;
        queries::zones::get_crop(&mut self.conn, crop_id, landowner_id)
    }

    /// Deletes a crop. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_crop(&mut self, crop_id: i64, landowner_id: i64) -> Result<bool, PersistenceError> {
        let rows: usize = mutations::zones::delete_crop(&mut self.conn, crop_id, landowner_id)?;
        Ok(rows > 0)
    }
}
