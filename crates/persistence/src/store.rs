// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The `AssignmentStore` implementation backing the assignment rules.

use agrizone::{AssignmentStore, StoreError};
use agrizone_domain::{
    Assignment, AssignmentDetail, AssignmentPatch, NewAssignment, UserType,
};

use crate::error::PersistenceError;
use crate::{Persistence, mutations, now_timestamp, queries};

impl Persistence {
    fn load_assignment(
        &mut self,
        assignment_id: i64,
        landowner_id: i64,
    ) -> Result<Assignment, PersistenceError> {
        queries::assignments::get_assignment(&mut self.conn, assignment_id, landowner_id)?
            .ok_or_else(|| PersistenceError::NotFound(format!("Assignment {assignment_id}")))
    }
}

impl AssignmentStore for Persistence {
    fn user_has_role(&mut self, user_id: i64, role: UserType) -> Result<bool, StoreError> {
        Ok(queries::users::user_has_role(&mut self.conn, user_id, role)?)
    }

    fn zone_owned_by(&mut self, zone_id: i64, landowner_id: i64) -> Result<bool, StoreError> {
        Ok(queries::zones::zone_owned_by(
            &mut self.conn,
            zone_id,
            landowner_id,
        )?)
    }

    fn crop_owned_by(&mut self, crop_id: i64, landowner_id: i64) -> Result<bool, StoreError> {
        Ok(queries::zones::crop_owned_by(
            &mut self.conn,
            crop_id,
            landowner_id,
        )?)
    }

    fn unresolved_assignment_ids(
        &mut self,
        landowner_id: i64,
        hari_id: i64,
        zone_id: i64,
    ) -> Result<Vec<i64>, StoreError> {
        Ok(queries::assignments::unresolved_assignment_ids(
            &mut self.conn,
            landowner_id,
            hari_id,
            zone_id,
        )?)
    }

    fn find_assignment(
        &mut self,
        assignment_id: i64,
        landowner_id: i64,
    ) -> Result<Option<Assignment>, StoreError> {
        Ok(queries::assignments::get_assignment(
            &mut self.conn,
            assignment_id,
            landowner_id,
        )?)
    }

    fn insert_assignment(&mut self, assignment: &NewAssignment) -> Result<Assignment, StoreError> {
        let assignment_id: i64 =
            mutations::assignments::insert_assignment(&mut self.conn, assignment)?;
        Ok(self.load_assignment(assignment_id, assignment.landowner_id)?)
    }

    fn update_assignment(
        &mut self,
        assignment_id: i64,
        landowner_id: i64,
        patch: &AssignmentPatch,
    ) -> Result<Option<Assignment>, StoreError> {
        let updated_at: String = now_timestamp()?;
        let rows: usize = mutations::assignments::update_assignment(
            &mut self.conn,
            assignment_id,
            landowner_id,
            patch,
            &updated_at,
        )?;
        if rows == 0 {
            return Ok(None);
        }
        Ok(Some(self.load_assignment(assignment_id, landowner_id)?))
    }

    fn delete_assignment(
        &mut self,
        assignment_id: i64,
        landowner_id: i64,
    ) -> Result<bool, StoreError> {
        let rows: usize =
            mutations::assignments::delete_assignment(&mut self.conn, assignment_id, landowner_id)?;
        Ok(rows > 0)
    }

    fn list_assignments_for_landowner(
        &mut self,
        landowner_id: i64,
    ) -> Result<Vec<AssignmentDetail>, StoreError> {
        Ok(queries::assignments::list_assignments_for_landowner(
            &mut self.conn,
            landowner_id,
        )?)
    }

    fn list_open_assignments_for_hari(
        &mut self,
        hari_id: i64,
    ) -> Result<Vec<AssignmentDetail>, StoreError> {
        Ok(queries::assignments::list_open_assignments_for_hari(
            &mut self.conn,
            hari_id,
        )?)
    }
}
