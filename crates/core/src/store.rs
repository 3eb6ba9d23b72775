// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use agrizone_domain::{
    Assignment, AssignmentDetail, AssignmentPatch, NewAssignment, UserType,
};

/// Errors reported by an [`AssignmentStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A write was rejected by a uniqueness constraint.
    UniqueViolation {
        /// The constraint or columns involved, for logging.
        constraint: String,
    },
    /// Any other storage failure.
    Backend(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UniqueViolation { constraint } => {
                write!(f, "Unique constraint violated: {constraint}")
            }
            Self::Backend(msg) => write!(f, "Storage backend error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// The entity store as seen by the assignment rules.
///
/// Lookups are filtered: each answers whether exactly one record matches
/// the id *and* the ownership or role filter, so the caller never sees a
/// record it is not entitled to.
///
/// Writes that take a `landowner_id` are scoped to it. A record belonging to
/// another landowner behaves exactly like a missing one.
pub trait AssignmentStore {
    /// Returns whether user `user_id` exists with role `role`.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn user_has_role(&mut self, user_id: i64, role: UserType) -> Result<bool, StoreError>;

    /// Returns whether zone `zone_id` exists and is owned by `landowner_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn zone_owned_by(&mut self, zone_id: i64, landowner_id: i64) -> Result<bool, StoreError>;

    /// Returns whether crop `crop_id` exists and is owned by `landowner_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn crop_owned_by(&mut self, crop_id: i64, landowner_id: i64) -> Result<bool, StoreError>;

    /// Returns the ids of assignments binding `hari_id` to `zone_id` under
    /// `landowner_id` whose status is active or pending.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn unresolved_assignment_ids(
        &mut self,
        landowner_id: i64,
        hari_id: i64,
        zone_id: i64,
    ) -> Result<Vec<i64>, StoreError>;

    /// Loads one assignment owned by `landowner_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn find_assignment(
        &mut self,
        assignment_id: i64,
        landowner_id: i64,
    ) -> Result<Option<Assignment>, StoreError>;

    /// Inserts a new assignment, stamping its assigned date.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UniqueViolation` if a uniqueness constraint
    /// rejects the row, or another error if the insert fails.
    fn insert_assignment(&mut self, assignment: &NewAssignment) -> Result<Assignment, StoreError>;

    /// Applies the fields present in `patch` to an assignment owned by
    /// `landowner_id`.
    ///
    /// Returns `None` when no such assignment exists.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UniqueViolation` if a uniqueness constraint
    /// rejects the change, or another error if the update fails.
    fn update_assignment(
        &mut self,
        assignment_id: i64,
        landowner_id: i64,
        patch: &AssignmentPatch,
    ) -> Result<Option<Assignment>, StoreError>;

    /// Deletes an assignment owned by `landowner_id`.
    ///
    /// Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    fn delete_assignment(&mut self, assignment_id: i64, landowner_id: i64)
    -> Result<bool, StoreError>;

    /// Lists every assignment owned by `landowner_id`, newest first, with
    /// hari, zone and crop summaries joined in.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn list_assignments_for_landowner(
        &mut self,
        landowner_id: i64,
    ) -> Result<Vec<AssignmentDetail>, StoreError>;

    /// Lists the active and pending assignments of `hari_id` across all
    /// landowners, with zone and crop summaries joined in.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn list_open_assignments_for_hari(
        &mut self,
        hari_id: i64,
    ) -> Result<Vec<AssignmentDetail>, StoreError>;
}
