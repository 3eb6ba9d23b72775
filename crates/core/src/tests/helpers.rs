// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{AssignmentStore, Caller, StoreError};
use agrizone_domain::{
    Assignment, AssignmentDetail, AssignmentPatch, NewAssignment, UserType, ZoneSummary,
};

pub const LANDOWNER: i64 = 1;
pub const OTHER_LANDOWNER: i64 = 2;
pub const HARI: i64 = 10;
pub const OTHER_HARI: i64 = 11;
pub const ZONE: i64 = 100;
pub const SECOND_ZONE: i64 = 101;
pub const FOREIGN_ZONE: i64 = 200;
pub const CROP: i64 = 300;
pub const SECOND_CROP: i64 = 301;
pub const FOREIGN_CROP: i64 = 400;

/// An in-memory store that mirrors the SQLite schema's constraints.
///
/// Counts resolver lookups so tests can prove when the ownership check was
/// (or was not) consulted.
#[derive(Debug, Default)]
pub struct FakeStore {
    pub users: Vec<(i64, UserType)>,
    pub zones: Vec<(i64, i64)>,
    pub crops: Vec<(i64, i64)>,
    pub assignments: Vec<Assignment>,
    pub next_id: i64,
    pub resolver_lookups: usize,
    /// Simulates a concurrent writer: the conflict query sees nothing even
    /// though the row exists.
    pub stale_conflict_reads: bool,
}

impl FakeStore {
    fn violates_uniqueness(&self, candidate: &Assignment) -> bool {
        self.assignments.iter().any(|existing| {
            if existing.assignment_id == candidate.assignment_id {
                return false;
            }
            let same_slot: bool = existing.landowner_id == candidate.landowner_id
                && existing.hari_id == candidate.hari_id
                && existing.zone_id == candidate.zone_id;
            let same_tuple: bool = same_slot && existing.crop_id == candidate.crop_id;
            let both_unresolved: bool =
                existing.status.is_unresolved() && candidate.status.is_unresolved();
            same_tuple || (same_slot && both_unresolved)
        })
    }

    fn detail(&self, assignment: &Assignment) -> AssignmentDetail {
        let zone: Option<ZoneSummary> = self
            .zones
            .iter()
            .find(|(id, _)| *id == assignment.zone_id)
            .map(|(id, _)| ZoneSummary {
                zone_id: *id,
                name: format!("Zone {id}"),
            });
        AssignmentDetail {
            assignment: assignment.clone(),
            hari: None,
            zone,
            crop: None,
        }
    }
}

impl AssignmentStore for FakeStore {
    fn user_has_role(&mut self, user_id: i64, role: UserType) -> Result<bool, StoreError> {
        self.resolver_lookups += 1;
        Ok(self.users.contains(&(user_id, role)))
    }

    fn zone_owned_by(&mut self, zone_id: i64, landowner_id: i64) -> Result<bool, StoreError> {
        self.resolver_lookups += 1;
        Ok(self.zones.contains(&(zone_id, landowner_id)))
    }

    fn crop_owned_by(&mut self, crop_id: i64, landowner_id: i64) -> Result<bool, StoreError> {
        self.resolver_lookups += 1;
        Ok(self.crops.contains(&(crop_id, landowner_id)))
    }

    fn unresolved_assignment_ids(
        &mut self,
        landowner_id: i64,
        hari_id: i64,
        zone_id: i64,
    ) -> Result<Vec<i64>, StoreError> {
        if self.stale_conflict_reads {
            return Ok(Vec::new());
        }
        Ok(self
            .assignments
            .iter()
            .filter(|a| {
                a.landowner_id == landowner_id
                    && a.hari_id == hari_id
                    && a.zone_id == zone_id
                    && a.status.is_unresolved()
            })
            .map(|a| a.assignment_id)
            .collect())
    }

    fn find_assignment(
        &mut self,
        assignment_id: i64,
        landowner_id: i64,
    ) -> Result<Option<Assignment>, StoreError> {
        Ok(self
            .assignments
            .iter()
            .find(|a| a.assignment_id == assignment_id && a.landowner_id == landowner_id)
            .cloned())
    }

    fn insert_assignment(&mut self, assignment: &NewAssignment) -> Result<Assignment, StoreError> {
        self.next_id += 1;
        let created: Assignment = Assignment {
            assignment_id: self.next_id,
            landowner_id: assignment.landowner_id,
            hari_id: assignment.hari_id,
            zone_id: assignment.zone_id,
            crop_id: assignment.crop_id,
            status: assignment.status,
            assigned_date: String::from("2026-01-01T00:00:00Z"),
        };
        if self.violates_uniqueness(&created) {
            return Err(StoreError::UniqueViolation {
                constraint: String::from("assignments"),
            });
        }
        self.assignments.push(created.clone());
        Ok(created)
    }

    fn update_assignment(
        &mut self,
        assignment_id: i64,
        landowner_id: i64,
        patch: &AssignmentPatch,
    ) -> Result<Option<Assignment>, StoreError> {
        let Some(current) = self.find_assignment(assignment_id, landowner_id)? else {
            return Ok(None);
        };
        let updated: Assignment = Assignment {
            zone_id: patch.zone_id.unwrap_or(current.zone_id),
            crop_id: patch.crop_id.unwrap_or(current.crop_id),
            status: patch.status.unwrap_or(current.status),
            ..current
        };
        if self.violates_uniqueness(&updated) {
            return Err(StoreError::UniqueViolation {
                constraint: String::from("assignments"),
            });
        }
        for slot in &mut self.assignments {
            if slot.assignment_id == assignment_id {
                *slot = updated.clone();
            }
        }
        Ok(Some(updated))
    }

    fn delete_assignment(
        &mut self,
        assignment_id: i64,
        landowner_id: i64,
    ) -> Result<bool, StoreError> {
        let before: usize = self.assignments.len();
        self.assignments
            .retain(|a| !(a.assignment_id == assignment_id && a.landowner_id == landowner_id));
        Ok(self.assignments.len() < before)
    }

    fn list_assignments_for_landowner(
        &mut self,
        landowner_id: i64,
    ) -> Result<Vec<AssignmentDetail>, StoreError> {
        let mut details: Vec<AssignmentDetail> = self
            .assignments
            .iter()
            .filter(|a| a.landowner_id == landowner_id)
            .map(|a| self.detail(a))
            .collect();
        details.sort_by(|a, b| b.assignment.assignment_id.cmp(&a.assignment.assignment_id));
        Ok(details)
    }

    fn list_open_assignments_for_hari(
        &mut self,
        hari_id: i64,
    ) -> Result<Vec<AssignmentDetail>, StoreError> {
        Ok(self
            .assignments
            .iter()
            .filter(|a| a.hari_id == hari_id && a.status.is_unresolved())
            .map(|a| self.detail(a))
            .collect())
    }
}

/// A store with two landowners, two haris, and zones and crops on both
/// sides of the tenant boundary.
pub fn create_test_store() -> FakeStore {
    FakeStore {
        users: vec![
            (LANDOWNER, UserType::Landowner),
            (OTHER_LANDOWNER, UserType::Landowner),
            (HARI, UserType::Hari),
            (OTHER_HARI, UserType::Hari),
        ],
        zones: vec![
            (ZONE, LANDOWNER),
            (SECOND_ZONE, LANDOWNER),
            (FOREIGN_ZONE, OTHER_LANDOWNER),
        ],
        crops: vec![
            (CROP, LANDOWNER),
            (SECOND_CROP, LANDOWNER),
            (FOREIGN_CROP, OTHER_LANDOWNER),
        ],
        ..FakeStore::default()
    }
}

pub const fn create_test_landowner() -> Caller {
    Caller::new(LANDOWNER, UserType::Landowner)
}

pub const fn create_test_hari() -> Caller {
    Caller::new(HARI, UserType::Hari)
}
