// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Opening the AgriZone `SQLite` store.
//!
//! A connection is only handed to [`crate::Persistence`] once foreign keys
//! are on, the embedded migrations have run and every table the adapter
//! reads from is present.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer, Text};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Tables the adapter cannot work without.
const REQUIRED_TABLES: [&str; 6] = [
    "users",
    "sessions",
    "password_reset_codes",
    "zones",
    "crops",
    "assignments",
];

/// Where the store lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreLocation {
    /// A private in-memory database.
    Memory,
    /// A database file, journaled with WAL.
    File,
}

#[derive(QueryableByName)]
struct ForeignKeysRow {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

#[derive(QueryableByName)]
struct TableNameRow {
    #[diesel(sql_type = Text)]
    name: String,
}

/// Opens and prepares the store at `url`.
///
/// # Arguments
///
/// * `url` - A `SQLite` URL or file path
/// * `location` - Whether `url` names a memory or file database
///
/// # Errors
///
/// Returns an error if the connection cannot be established, a pragma or
/// migration fails, foreign keys stay off, or a required table is missing
/// after migration.
pub fn open(url: &str, location: StoreLocation) -> Result<SqliteConnection, PersistenceError> {
    info!(url, ?location, "Opening AgriZone store");

    let mut conn: SqliteConnection = SqliteConnection::establish(url)
        .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;
    if location == StoreLocation::File {
        diesel::sql_query("PRAGMA journal_mode = WAL")
            .execute(&mut conn)
            .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;
    }

    let applied: usize = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?
        .len();
    debug!(applied, "Migrations applied");

    if !foreign_keys_enabled(&mut conn)? {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }
    check_required_tables(&mut conn)?;

    Ok(conn)
}

/// Reports whether `SQLite` is enforcing foreign keys on this connection.
///
/// # Errors
///
/// Returns an error if the pragma cannot be read.
pub fn foreign_keys_enabled(conn: &mut SqliteConnection) -> Result<bool, PersistenceError> {
    let row: ForeignKeysRow = diesel::sql_query("PRAGMA foreign_keys").get_result(conn)?;
    Ok(row.foreign_keys != 0)
}

/// Returns the row ID assigned by the most recent insert on this connection.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn last_insert_rowid(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}

pub(crate) fn check_required_tables(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let present: Vec<String> =
        diesel::sql_query("SELECT name FROM sqlite_master WHERE type = 'table'")
            .load::<TableNameRow>(conn)?
            .into_iter()
            .map(|row| row.name)
            .collect();

    let missing: Vec<&str> = REQUIRED_TABLES
        .into_iter()
        .filter(|table| !present.iter().any(|name| name == *table))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(PersistenceError::InitializationError(format!(
            "Missing tables after migration: {}",
            missing.join(", ")
        )))
    }
}
