// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::store::AssignmentStore;

/// Returns whether an active or pending assignment already binds `hari_id`
/// to `zone_id` under `landowner_id`.
///
/// `exclude_assignment_id` ignores one assignment, so an assignment never
/// conflicts with itself. Creation passes `None`.
///
/// This is an early exit only. Two writers can both pass it; the store's
/// uniqueness constraint decides which one wins.
///
/// # Errors
///
/// Returns `CoreError::Storage` if the query fails.
pub fn has_conflict<S: AssignmentStore + ?Sized>(
    store: &mut S,
    landowner_id: i64,
    hari_id: i64,
    zone_id: i64,
    exclude_assignment_id: Option<i64>,
) -> Result<bool, CoreError> {
    let unresolved: Vec<i64> = store.unresolved_assignment_ids(landowner_id, hari_id, zone_id)?;

    Ok(unresolved
        .iter()
        .any(|id| Some(*id) != exclude_assignment_id))
}
