// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment queries.
//!
//! Storage keeps only identifiers. Listings join the hari, zone and crop in
//! at read time with `LEFT JOIN`s, so an assignment whose zone or crop has
//! been deleted is still listed, with that summary absent.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use agrizone_domain::{
    Assignment, AssignmentDetail, AssignmentStatus, CropSummary, HariSummary, ZoneSummary,
};

use crate::diesel_schema::{assignments, crops, users, zones};
use crate::error::PersistenceError;

/// Diesel Queryable struct for assignment rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = assignments)]
pub(crate) struct AssignmentRow {
    assignment_id: i64,
    landowner_id: i64,
    hari_id: i64,
    zone_id: i64,
    crop_id: i64,
    status: String,
    assigned_date: String,
}

impl AssignmentRow {
    /// Converts a stored row into a domain assignment.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::InvalidRecord` if the stored status is
    /// unknown.
    pub(crate) fn into_assignment(self) -> Result<Assignment, PersistenceError> {
        let status: AssignmentStatus = self.status.parse().map_err(|e| {
            PersistenceError::InvalidRecord(format!("assignment {}: {e}", self.assignment_id))
        })?;

        Ok(Assignment {
            assignment_id: self.assignment_id,
            landowner_id: self.landowner_id,
            hari_id: self.hari_id,
            zone_id: self.zone_id,
            crop_id: self.crop_id,
            status,
            assigned_date: self.assigned_date,
        })
    }
}

type HariColumns = (i64, String, String, String, String);
type ZoneColumns = (i64, String);
type CropColumns = (i64, String, String, String);

fn zone_summary(columns: Option<ZoneColumns>) -> Option<ZoneSummary> {
    columns.map(|(zone_id, name)| ZoneSummary { zone_id, name })
}

fn crop_summary(columns: Option<CropColumns>) -> Option<CropSummary> {
    columns.map(|(crop_id, name, crop_type, season)| CropSummary {
        crop_id,
        name,
        crop_type,
        season,
    })
}

fn unresolved_statuses() -> [&'static str; 2] {
    AssignmentStatus::UNRESOLVED.map(|s| s.as_str())
}

/// Retrieves an assignment owned by `landowner_id`.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is malformed.
/// Returns `Ok(None)` if no such assignment exists for this landowner.
pub fn get_assignment(
    conn: &mut SqliteConnection,
    assignment_id: i64,
    landowner_id: i64,
) -> Result<Option<Assignment>, PersistenceError> {
    debug!(assignment_id, landowner_id, "Looking up assignment");

    let result: Result<AssignmentRow, diesel::result::Error> = assignments::table
        .filter(assignments::assignment_id.eq(assignment_id))
        .filter(assignments::landowner_id.eq(landowner_id))
        .select(AssignmentRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into_assignment()?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Returns the IDs of active or pending assignments binding `hari_id` to
/// `zone_id` under `landowner_id`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn unresolved_assignment_ids(
    conn: &mut SqliteConnection,
    landowner_id: i64,
    hari_id: i64,
    zone_id: i64,
) -> Result<Vec<i64>, PersistenceError> {
    let ids: Vec<i64> = assignments::table
        .filter(assignments::landowner_id.eq(landowner_id))
        .filter(assignments::hari_id.eq(hari_id))
        .filter(assignments::zone_id.eq(zone_id))
        .filter(assignments::status.eq_any(unresolved_statuses()))
        .select(assignments::assignment_id)
        .load(conn)?;

    debug!(
        landowner_id,
        hari_id,
        zone_id,
        found = ids.len(),
        "Checked for unresolved assignments"
    );
    Ok(ids)
}

/// Lists every assignment owned by `landowner_id`, newest first, with the
/// hari's contact details, the zone name and the crop details joined in.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is malformed.
pub fn list_assignments_for_landowner(
    conn: &mut SqliteConnection,
    landowner_id: i64,
) -> Result<Vec<AssignmentDetail>, PersistenceError> {
    debug!(landowner_id, "Listing assignments for landowner");

    let rows: Vec<(
        AssignmentRow,
        Option<HariColumns>,
        Option<ZoneColumns>,
        Option<CropColumns>,
    )> = assignments::table
        .left_join(users::table.on(users::user_id.eq(assignments::hari_id)))
        .left_join(zones::table.on(zones::zone_id.eq(assignments::zone_id)))
        .left_join(crops::table.on(crops::crop_id.eq(assignments::crop_id)))
        .filter(assignments::landowner_id.eq(landowner_id))
        // Newest first. AUTOINCREMENT ids follow assigned_date but never tie.
        .order_by(assignments::assignment_id.desc())
        .select((
            AssignmentRow::as_select(),
            (
                users::user_id,
                users::first_name,
                users::last_name,
                users::email,
                users::phone_number,
            )
                .nullable(),
            (zones::zone_id, zones::name).nullable(),
            (crops::crop_id, crops::name, crops::crop_type, crops::season).nullable(),
        ))
        .load(conn)?;

    rows.into_iter()
        .map(|(row, hari, zone, crop)| {
            Ok(AssignmentDetail {
                assignment: row.into_assignment()?,
                hari: hari.map(
                    |(user_id, first_name, last_name, email, phone_number)| HariSummary {
                        user_id,
                        first_name,
                        last_name,
                        email,
                        phone_number,
                    },
                ),
                zone: zone_summary(zone),
                crop: crop_summary(crop),
            })
        })
        .collect()
}

/// Lists the active and pending assignments of `hari_id` across every
/// landowner, with the zone name and crop details joined in.
///
/// Rows are returned in creation order.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is malformed.
pub fn list_open_assignments_for_hari(
    conn: &mut SqliteConnection,
    hari_id: i64,
) -> Result<Vec<AssignmentDetail>, PersistenceError> {
    debug!(hari_id, "Listing open assignments for hari");

    let rows: Vec<(AssignmentRow, Option<ZoneColumns>, Option<CropColumns>)> = assignments::table
        .left_join(zones::table.on(zones::zone_id.eq(assignments::zone_id)))
        .left_join(crops::table.on(crops::crop_id.eq(assignments::crop_id)))
        .filter(assignments::hari_id.eq(hari_id))
        .filter(assignments::status.eq_any(unresolved_statuses()))
        .order_by(assignments::assignment_id.asc())
        .select((
            AssignmentRow::as_select(),
            (zones::zone_id, zones::name).nullable(),
            (crops::crop_id, crops::name, crops::crop_type, crops::season).nullable(),
        ))
        .load(conn)?;

    rows.into_iter()
        .map(|(row, zone, crop)| {
            Ok(AssignmentDetail {
                assignment: row.into_assignment()?,
                hari: None,
                zone: zone_summary(zone),
                crop: crop_summary(crop),
            })
        })
        .collect()
}
