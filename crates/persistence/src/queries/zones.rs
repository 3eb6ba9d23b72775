// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Zone and crop queries.
//!
//! Both record kinds are owned by one landowner and every query is scoped
//! to that owner.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use agrizone_domain::{Crop, Zone};

use crate::diesel_schema::{crops, zones};
use crate::error::PersistenceError;

/// Diesel Queryable struct for zone rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = zones)]
pub(crate) struct ZoneRow {
    zone_id: i64,
    landowner_id: i64,
    name: String,
    location: String,
    total_area: f64,
    description: String,
    created_at: String,
}

impl From<ZoneRow> for Zone {
    fn from(row: ZoneRow) -> Self {
        Self {
            zone_id: row.zone_id,
            landowner_id: row.landowner_id,
            name: row.name,
            location: row.location,
            total_area: row.total_area,
            description: row.description,
            created_at: row.created_at,
        }
    }
}

/// Diesel Queryable struct for crop rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = crops)]
pub(crate) struct CropRow {
    crop_id: i64,
    landowner_id: i64,
    name: String,
    crop_type: String,
    season: String,
    created_at: String,
}

impl From<CropRow> for Crop {
    fn from(row: CropRow) -> Self {
        Self {
            crop_id: row.crop_id,
            landowner_id: row.landowner_id,
            name: row.name,
            crop_type: row.crop_type,
            season: row.season,
            created_at: row.created_at,
        }
    }
}

/// Builds a `LIKE` pattern matching `needle` anywhere, with wildcard
/// characters in `needle` taken literally.
fn contains_pattern(needle: &str) -> String {
    let mut escaped: String = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Retrieves a zone owned by `landowner_id`.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the zone does not exist or belongs to another
/// landowner.
pub fn get_zone(
    conn: &mut SqliteConnection,
    zone_id: i64,
    landowner_id: i64,
) -> Result<Option<Zone>, PersistenceError> {
    debug!(zone_id, landowner_id, "Looking up zone");

    let result: Result<ZoneRow, diesel::result::Error> = zones::table
        .filter(zones::zone_id.eq(zone_id))
        .filter(zones::landowner_id.eq(landowner_id))
        .select(ZoneRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(Zone::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists zones owned by `landowner_id`, newest first.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `landowner_id` - The owning landowner
/// * `name_filter` - Case-insensitive substring to match against the name
/// * `limit` - Maximum number of rows
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_zones(
    conn: &mut SqliteConnection,
    landowner_id: i64,
    name_filter: Option<&str>,
    limit: i64,
) -> Result<Vec<Zone>, PersistenceError> {
    debug!(landowner_id, ?name_filter, limit, "Listing zones");

    let mut query = zones::table
        .filter(zones::landowner_id.eq(landowner_id))
        .select(ZoneRow::as_select())
        .order_by(zones::zone_id.desc())
        .limit(limit)
        .into_boxed();

    if let Some(needle) = name_filter {
        query = query.filter(zones::name.like(contains_pattern(needle)).escape('\\'));
    }

    let rows: Vec<ZoneRow> = query.load(conn)?;
    Ok(rows.into_iter().map(Zone::from).collect())
}

/// Returns whether zone `zone_id` exists and is owned by `landowner_id`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn zone_owned_by(
    conn: &mut SqliteConnection,
    zone_id: i64,
    landowner_id: i64,
) -> Result<bool, PersistenceError> {
    use diesel::dsl::count;

    let matches: i64 = zones::table
        .filter(zones::zone_id.eq(zone_id))
        .filter(zones::landowner_id.eq(landowner_id))
        .select(count(zones::zone_id))
        .first(conn)?;

    Ok(matches == 1)
}

/// Retrieves a crop owned by `landowner_id`.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the crop does not exist or belongs to another
/// landowner.
pub fn get_crop(
    conn: &mut SqliteConnection,
    crop_id: i64,
    landowner_id: i64,
) -> Result<Option<Crop>, PersistenceError> {
    debug!(crop_id, landowner_id, "Looking up crop");

    let result: Result<CropRow, diesel::result::Error> = crops::table
        .filter(crops::crop_id.eq(crop_id))
        .filter(crops::landowner_id.eq(landowner_id))
        .select(CropRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(Crop::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists crops owned by `landowner_id`, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_crops(
    conn: &mut SqliteConnection,
    landowner_id: i64,
    name_filter: Option<&str>,
    limit: i64,
) -> Result<Vec<Crop>, PersistenceError> {
    debug!(landowner_id, ?name_filter, limit, "Listing crops");

    let mut query = crops::table
        .filter(crops::landowner_id.eq(landowner_id))
        .select(CropRow::as_select())
        .order_by(crops::crop_id.desc())
        .limit(limit)
        .into_boxed();

    if let Some(needle) = name_filter {
        query = query.filter(crops::name.like(contains_pattern(needle)).escape('\\'));
    }

    let rows: Vec<CropRow> = query.load(conn)?;
    Ok(rows.into_iter().map(Crop::from).collect())
}

/// Returns whether crop `crop_id` exists and is owned by `landowner_id`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn crop_owned_by(
    conn: &mut SqliteConnection,
    crop_id: i64,
    landowner_id: i64,
) -> Result<bool, PersistenceError> {
    use diesel::dsl::count;

    let matches: i64 = crops::table
        .filter(crops::crop_id.eq(crop_id))
        .filter(crops::landowner_id.eq(landowner_id))
        .select(count(crops::crop_id))
        .first(conn)?;

    Ok(matches == 1)
}
