// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment mutations.
//!
//! The schema carries a unique index over the unresolved
//! (landowner, hari, zone) slot and a unique constraint over the full
//! (landowner, hari, zone, crop) tuple. Writes that break either surface as
//! `PersistenceError::UniqueViolation`.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use agrizone_domain::{AssignmentPatch, NewAssignment};

use crate::connection::last_insert_rowid;
use crate::diesel_schema::assignments;
use crate::error::PersistenceError;

#[derive(AsChangeset)]
#[diesel(table_name = assignments)]
struct AssignmentChanges {
    zone_id: Option<i64>,
    crop_id: Option<i64>,
    status: Option<String>,
    updated_at: String,
}

/// Inserts a new assignment. The assigned date is stamped by the database.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the row would duplicate
/// an existing binding, or another error if the insert fails.
pub fn insert_assignment(
    conn: &mut SqliteConnection,
    assignment: &NewAssignment,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(assignments::table)
        .values((
            assignments::landowner_id.eq(assignment.landowner_id),
            assignments::hari_id.eq(assignment.hari_id),
            assignments::zone_id.eq(assignment.zone_id),
            assignments::crop_id.eq(assignment.crop_id),
            assignments::status.eq(assignment.status.as_str()),
        ))
        .execute(conn)?;

    let assignment_id: i64 = last_insert_rowid(conn)?;

    info!(
        assignment_id,
        landowner_id = assignment.landowner_id,
        hari_id = assignment.hari_id,
        zone_id = assignment.zone_id,
        crop_id = assignment.crop_id,
        status = assignment.status.as_str(),
        "Assignment created"
    );
    Ok(assignment_id)
}

/// Applies the fields present in `patch` to an assignment owned by
/// `landowner_id`.
///
/// Returns the number of rows changed (0 when no such assignment exists).
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the change would
/// duplicate an existing binding, or another error if the update fails.
pub fn update_assignment(
    conn: &mut SqliteConnection,
    assignment_id: i64,
    landowner_id: i64,
    patch: &AssignmentPatch,
    updated_at: &str,
) -> Result<usize, PersistenceError> {
    let changes: AssignmentChanges = AssignmentChanges {
        zone_id: patch.zone_id,
        crop_id: patch.crop_id,
        status: patch.status.map(|s| s.as_str().to_string()),
        updated_at: updated_at.to_string(),
    };

    let rows_affected: usize = diesel::update(assignments::table)
        .filter(assignments::assignment_id.eq(assignment_id))
        .filter(assignments::landowner_id.eq(landowner_id))
        .set(changes)
        .execute(conn)?;

    info!(
        assignment_id,
        landowner_id,
        rows_affected,
        zone_id = ?patch.zone_id,
        crop_id = ?patch.crop_id,
        status = ?patch.status,
        "Assignment updated"
    );
    Ok(rows_affected)
}

/// Deletes an assignment owned by `landowner_id`.
///
/// Returns the number of rows removed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_assignment(
    conn: &mut SqliteConnection,
    assignment_id: i64,
    landowner_id: i64,
) -> Result<usize, PersistenceError> {
    let rows_affected: usize = diesel::delete(assignments::table)
        .filter(assignments::assignment_id.eq(assignment_id))
        .filter(assignments::landowner_id.eq(landowner_id))
        .execute(conn)?;

    info!(assignment_id, landowner_id, rows_affected, "Assignment deleted");
    Ok(rows_affected)
}
