// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::caller::{AssignmentAction, Caller, authorize_assignment_write};
use crate::conflict::has_conflict;
use crate::error::CoreError;
use crate::ownership::validate_ownership;
use crate::store::AssignmentStore;
use agrizone_domain::{
    Assignment, AssignmentDetail, AssignmentPatch, AssignmentStatus, NewAssignment, UserType,
    require_reference,
};

/// A create request as received from the caller.
///
/// References are optional here so that a missing one is reported as a
/// validation failure rather than a decoding failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CreateAssignment {
    pub hari_id: Option<i64>,
    pub zone_id: Option<i64>,
    pub crop_id: Option<i64>,
    /// Defaults to active.
    pub status: Option<AssignmentStatus>,
}

fn assignment_not_found(assignment_id: i64) -> CoreError {
    CoreError::NotFound {
        resource_type: String::from("Assignment"),
        message: format!("Assignment {assignment_id} not found"),
    }
}

/// Creates an assignment.
///
/// Steps, in order:
/// 1. Role gate (landowner only)
/// 2. `hariId`, `zoneId` and `cropId` must all be present
/// 3. Ownership check
/// 4. Conflict check
/// 5. Insert
///
/// # Errors
///
/// - `CoreError::Forbidden` if the caller is not a landowner
/// - `CoreError::DomainViolation` if a reference is missing
/// - `CoreError::InvalidReference` if the ownership check fails
/// - `CoreError::Conflict` if an unresolved assignment already binds the
///   hari to the zone, including when a concurrent insert wins the race
/// - `CoreError::Storage` if the store fails
pub fn create_assignment<S: AssignmentStore + ?Sized>(
    store: &mut S,
    caller: &Caller,
    request: CreateAssignment,
) -> Result<Assignment, CoreError> {
    let landowner_id: i64 = authorize_assignment_write(caller, AssignmentAction::Create)?;

    let hari_id: i64 = require_reference("hariId", request.hari_id)?;
    let zone_id: i64 = require_reference("zoneId", request.zone_id)?;
    let crop_id: i64 = require_reference("cropId", request.crop_id)?;

    if !validate_ownership(store, landowner_id, hari_id, zone_id, crop_id)? {
        return Err(CoreError::InvalidReference {
            message: String::from("Hari/Zone/Crop must belong to the same landowner"),
        });
    }

    if has_conflict(store, landowner_id, hari_id, zone_id, None)? {
        return Err(CoreError::Conflict {
            message: String::from("Hari already has an active assignment in this zone"),
        });
    }

    let new_assignment: NewAssignment = NewAssignment {
        landowner_id,
        hari_id,
        zone_id,
        crop_id,
        status: request.status.unwrap_or_default(),
    };

    Ok(store.insert_assignment(&new_assignment)?)
}

/// Lists the assignments visible to the caller.
///
/// A landowner sees every assignment they own, newest first, with hari,
/// zone and crop summaries. A hari sees only their own active and pending
/// assignments, with zone and crop summaries.
///
/// # Errors
///
/// Returns `CoreError::Storage` if the store fails.
pub fn list_assignments<S: AssignmentStore + ?Sized>(
    store: &mut S,
    caller: &Caller,
) -> Result<Vec<AssignmentDetail>, CoreError> {
    let details: Vec<AssignmentDetail> = match caller.role {
        UserType::Landowner => store.list_assignments_for_landowner(caller.user_id)?,
        UserType::Hari => store.list_open_assignments_for_hari(caller.user_id)?,
    };
    Ok(details)
}

/// Applies a partial edit to an assignment.
///
/// The ownership check runs only when the patch changes the zone or the
/// crop. It validates the effective zone and crop (patched value, else the
/// stored one) together with the stored hari. A status-only patch never
/// consults the resolver, so it succeeds even if the zone or crop has since
/// been deleted.
///
/// The conflict check is not re-run here. Moving an assignment onto a zone
/// where the hari already has an unresolved assignment is only caught by the
/// store's uniqueness constraint, and reported as `CoreError::Conflict`.
///
/// # Errors
///
/// - `CoreError::Forbidden` if the caller is not a landowner
/// - `CoreError::NotFound` if the caller owns no such assignment
/// - `CoreError::InvalidReference` if the ownership check fails
/// - `CoreError::Conflict` if the store rejects the change as a duplicate
/// - `CoreError::Storage` if the store fails
pub fn update_assignment<S: AssignmentStore + ?Sized>(
    store: &mut S,
    caller: &Caller,
    assignment_id: i64,
    patch: AssignmentPatch,
) -> Result<Assignment, CoreError> {
    let landowner_id: i64 = authorize_assignment_write(caller, AssignmentAction::Update)?;

    if patch.touches_references() {
        let current: Assignment = store
            .find_assignment(assignment_id, landowner_id)?
            .ok_or_else(|| assignment_not_found(assignment_id))?;

        let zone_id: i64 = patch.effective_zone_id(&current);
        let crop_id: i64 = patch.effective_crop_id(&current);

        if !validate_ownership(store, landowner_id, current.hari_id, zone_id, crop_id)? {
            return Err(CoreError::InvalidReference {
                message: String::from("Zone/Crop must belong to the same landowner"),
            });
        }
    }

    if patch.is_empty() {
        return store
            .find_assignment(assignment_id, landowner_id)?
            .ok_or_else(|| assignment_not_found(assignment_id));
    }

    store
        .update_assignment(assignment_id, landowner_id, &patch)?
        .ok_or_else(|| assignment_not_found(assignment_id))
}

/// Deletes an assignment owned by the caller.
///
/// # Errors
///
/// - `CoreError::Forbidden` if the caller is not a landowner
/// - `CoreError::NotFound` if the caller owns no such assignment
/// - `CoreError::Storage` if the store fails
pub fn delete_assignment<S: AssignmentStore + ?Sized>(
    store: &mut S,
    caller: &Caller,
    assignment_id: i64,
) -> Result<(), CoreError> {
    let landowner_id: i64 = authorize_assignment_write(caller, AssignmentAction::Delete)?;

    if store.delete_assignment(assignment_id, landowner_id)? {
        Ok(())
    } else {
        Err(assignment_not_found(assignment_id))
    }
}
