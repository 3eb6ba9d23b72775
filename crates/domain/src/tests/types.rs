// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::str::FromStr;

use crate::{Assignment, AssignmentPatch, AssignmentStatus, DomainError, UserType};

fn create_test_assignment() -> Assignment {
    Assignment {
        assignment_id: 1,
        landowner_id: 10,
        hari_id: 20,
        zone_id: 30,
        crop_id: 40,
        status: AssignmentStatus::Active,
        assigned_date: String::from("2026-03-01T08:00:00.000000000Z"),
    }
}

#[test]
fn test_user_type_round_trips_through_str() {
    assert_eq!(UserType::from_str("hari").unwrap(), UserType::Hari);
    assert_eq!(UserType::from_str("landowner").unwrap(), UserType::Landowner);
    assert_eq!(UserType::Hari.as_str(), "hari");
    assert_eq!(UserType::Landowner.to_string(), "landowner");
}

#[test]
fn test_user_type_rejects_unknown_role() {
    let result: Result<UserType, DomainError> = UserType::from_str("Landowner");
    assert!(matches!(result, Err(DomainError::InvalidUserType(_))));
}

#[test]
fn test_assignment_status_defaults_to_active() {
    assert_eq!(AssignmentStatus::default(), AssignmentStatus::Active);
}

#[test]
fn test_assignment_status_unresolved_set() {
    assert!(AssignmentStatus::Active.is_unresolved());
    assert!(AssignmentStatus::Pending.is_unresolved());
    assert!(!AssignmentStatus::Completed.is_unresolved());
    assert_eq!(
        AssignmentStatus::UNRESOLVED,
        [AssignmentStatus::Active, AssignmentStatus::Pending]
    );
}

#[test]
fn test_assignment_status_parses_known_values_only() {
    assert_eq!(
        AssignmentStatus::from_str("completed").unwrap(),
        AssignmentStatus::Completed
    );
    assert!(matches!(
        AssignmentStatus::from_str("cancelled"),
        Err(DomainError::InvalidAssignmentStatus(_))
    ));
}

#[test]
fn test_status_only_patch_does_not_touch_references() {
    let patch: AssignmentPatch = AssignmentPatch {
        status: Some(AssignmentStatus::Completed),
        ..AssignmentPatch::default()
    };
    assert!(!patch.touches_references());
    assert!(!patch.is_empty());
}

#[test]
fn test_patch_effective_references_fall_back_to_current() {
    let current: Assignment = create_test_assignment();
    let patch: AssignmentPatch = AssignmentPatch {
        crop_id: Some(41),
        ..AssignmentPatch::default()
    };

    assert!(patch.touches_references());
    assert_eq!(patch.effective_zone_id(&current), 30);
    assert_eq!(patch.effective_crop_id(&current), 41);
}

#[test]
fn test_empty_patch() {
    assert!(AssignmentPatch::default().is_empty());
}
