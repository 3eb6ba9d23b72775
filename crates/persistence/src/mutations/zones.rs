// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Zone and crop mutations.
//!
//! Every update and delete is scoped to the owning landowner; a row owned
//! by someone else is indistinguishable from a missing one.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use agrizone_domain::{CropPatch, NewCrop, NewZone, ZonePatch};

use crate::connection::last_insert_rowid;
use crate::diesel_schema::{crops, zones};
use crate::error::PersistenceError;

#[derive(AsChangeset)]
#[diesel(table_name = zones)]
struct ZoneChanges<'a> {
    name: Option<&'a str>,
    location: Option<&'a str>,
    total_area: Option<f64>,
    description: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crops)]
struct CropChanges<'a> {
    name: Option<&'a str>,
    crop_type: Option<&'a str>,
    season: Option<&'a str>,
}

/// Creates a zone owned by `landowner_id`.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_zone(
    conn: &mut SqliteConnection,
    landowner_id: i64,
    zone: &NewZone,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(zones::table)
        .values((
            zones::landowner_id.eq(landowner_id),
            zones::name.eq(&zone.name),
            zones::location.eq(&zone.location),
            zones::total_area.eq(zone.total_area),
            zones::description.eq(&zone.description),
        ))
        .execute(conn)?;

    let zone_id: i64 = last_insert_rowid(conn)?;

    info!(zone_id, landowner_id, name = %zone.name, "Zone created");
    Ok(zone_id)
}

/// Applies a zone edit.
///
/// Returns the number of rows changed. An empty patch returns 0 without
/// touching the database.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_zone(
    conn: &mut SqliteConnection,
    zone_id: i64,
    landowner_id: i64,
    patch: &ZonePatch,
) -> Result<usize, PersistenceError> {
    if patch.is_empty() {
        return Ok(0);
    }

    let changes: ZoneChanges<'_> = ZoneChanges {
        name: patch.name.as_deref(),
        location: patch.location.as_deref(),
        total_area: patch.total_area,
        description: patch.description.as_deref(),
    };

    let rows_affected: usize = diesel::update(zones::table)
        .filter(zones::zone_id.eq(zone_id))
        .filter(zones::landowner_id.eq(landowner_id))
        .set(changes)
        .execute(conn)?;

    info!(zone_id, landowner_id, rows_affected, "Zone updated");
    Ok(rows_affected)
}

/// Deletes a zone.
///
/// Assignments that reference the zone are left in place.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_zone(
    conn: &mut SqliteConnection,
    zone_id: i64,
    landowner_id: i64,
) -> Result<usize, PersistenceError> {
    let rows_affected: usize = diesel::delete(zones::table)
        .filter(zones::zone_id.eq(zone_id))
        .filter(zones::landowner_id.eq(landowner_id))
        .execute(conn)?;

    info!(zone_id, landowner_id, rows_affected, "Zone deleted");
    Ok(rows_affected)
}

/// Creates a crop owned by `landowner_id`.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_crop(
    conn: &mut SqliteConnection,
    landowner_id: i64,
    crop: &NewCrop,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(crops::table)
        .values((
            crops::landowner_id.eq(landowner_id),
            crops::name.eq(&crop.name),
            crops::crop_type.eq(&crop.crop_type),
            crops::season.eq(&crop.season),
        ))
        .execute(conn)?;

    let crop_id: i64 = last_insert_rowid(conn)?;

    info!(crop_id, landowner_id, name = %crop.name, "Crop created");
    Ok(crop_id)
}

/// Applies a crop edit.
///
/// Returns the number of rows changed. An empty patch returns 0 without
/// touching the database.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_crop(
    conn: &mut SqliteConnection,
    crop_id: i64,
    landowner_id: i64,
    patch: &CropPatch,
) -> Result<usize, PersistenceError> {
    if patch.is_empty() {
        return Ok(0);
    }

    let changes: CropChanges<'_> = CropChanges {
        name: patch.name.as_deref(),
        crop_type: patch.crop_type.as_deref(),
        season: patch.season.as_deref(),
    };

    let rows_affected: usize = diesel::update(crops::table)
        .filter(crops::crop_id.eq(crop_id))
        .filter(crops::landowner_id.eq(landowner_id))
        .set(changes)
        .execute(conn)?;

    info!(crop_id, landowner_id, rows_affected, "Crop updated");
    Ok(rows_affected)
}

/// Deletes a crop.
///
/// Assignments that reference the crop are left in place.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_crop(
    conn: &mut SqliteConnection,
    crop_id: i64,
    landowner_id: i64,
) -> Result<usize, PersistenceError> {
    let rows_affected: usize = diesel::delete(crops::table)
        .filter(crops::crop_id.eq(crop_id))
        .filter(crops::landowner_id.eq(landowner_id))
        .execute(conn)?;

    info!(crop_id, landowner_id, rows_affected, "Crop deleted");
    Ok(rows_affected)
}
