// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::store::AssignmentStore;
use agrizone_domain::UserType;

/// Checks that an assignment's references are usable by a landowner.
///
/// All three lookups are performed; the result is `true` only if every one
/// finds its record:
///
/// - `hari_id` names a user with the hari role (any landowner may assign
///   any hari)
/// - `zone_id` names a zone owned by `landowner_id`
/// - `crop_id` names a crop owned by `landowner_id`
///
/// This has no side effects and may be called speculatively.
///
/// # Arguments
///
/// * `store` - The entity store
/// * `landowner_id` - The trusted landowner scope, never client-supplied
/// * `hari_id` - The referenced worker
/// * `zone_id` - The referenced zone
/// * `crop_id` - The referenced crop
///
/// # Errors
///
/// Returns `CoreError::Storage` if a lookup fails. A missing or foreign
/// record is not an error; it yields `Ok(false)`.
pub fn validate_ownership<S: AssignmentStore + ?Sized>(
    store: &mut S,
    landowner_id: i64,
    hari_id: i64,
    zone_id: i64,
    crop_id: i64,
) -> Result<bool, CoreError> {
    let hari_found: bool = store.user_has_role(hari_id, UserType::Hari)?;
    let zone_found: bool = store.zone_owned_by(zone_id, landowner_id)?;
    let crop_found: bool = store.crop_owned_by(crop_id, landowner_id)?;

    Ok(hari_found && zone_found && crop_found)
}
