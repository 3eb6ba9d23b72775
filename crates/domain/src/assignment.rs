// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::AssignmentStatus;
use serde::{Deserialize, Serialize};

/// The binding of one hari to one zone and one crop under one landowner.
///
/// Storage keeps only identifiers; names are joined in at read time
/// (see [`AssignmentDetail`]).
///
/// `landowner_id` and `hari_id` never change after creation. Reassigning a
/// worker is a delete followed by a create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// The canonical numeric identifier assigned by the database.
    pub assignment_id: i64,
    /// The owning landowner (authority boundary).
    pub landowner_id: i64,
    /// The assigned worker. Always a user with the hari role at creation.
    pub hari_id: i64,
    /// A zone owned by `landowner_id`.
    pub zone_id: i64,
    /// A crop owned by `landowner_id`.
    pub crop_id: i64,
    /// Current status.
    pub status: AssignmentStatus,
    /// Creation timestamp (ISO 8601).
    pub assigned_date: String,
}

/// An assignment that has passed validation and is ready to be inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewAssignment {
    pub landowner_id: i64,
    pub hari_id: i64,
    pub zone_id: i64,
    pub crop_id: i64,
    pub status: AssignmentStatus,
}

/// A partial assignment edit.
///
/// Only the zone, the crop and the status are mutable. `None` leaves the
/// stored value untouched; there is no way to clear a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AssignmentPatch {
    pub zone_id: Option<i64>,
    pub crop_id: Option<i64>,
    pub status: Option<AssignmentStatus>,
}

impl AssignmentPatch {
    /// Returns whether the patch changes a zone or crop reference.
    ///
    /// Only such patches need the ownership check.
    #[must_use]
    pub const fn touches_references(&self) -> bool {
        self.zone_id.is_some() || self.crop_id.is_some()
    }

    /// Returns whether the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.zone_id.is_none() && self.crop_id.is_none() && self.status.is_none()
    }

    /// Returns the zone the assignment will point at once the patch applies.
    #[must_use]
    pub fn effective_zone_id(&self, current: &Assignment) -> i64 {
        self.zone_id.unwrap_or(current.zone_id)
    }

    /// Returns the crop the assignment will point at once the patch applies.
    #[must_use]
    pub fn effective_crop_id(&self, current: &Assignment) -> i64 {
        self.crop_id.unwrap_or(current.crop_id)
    }
}

/// Contact details of the assigned hari, joined in for landowner listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HariSummary {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
}

/// Zone name joined in for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSummary {
    pub zone_id: i64,
    pub name: String,
}

/// Crop details joined in for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropSummary {
    pub crop_id: i64,
    pub name: String,
    pub crop_type: String,
    pub season: String,
}

/// An assignment enriched with the records it references.
///
/// A summary is `None` when the referenced record no longer exists (zones
/// and crops may be deleted while assignments still point at them), or when
/// the listing does not include it (haris do not see themselves).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentDetail {
    pub assignment: Assignment,
    pub hari: Option<HariSummary>,
    pub zone: Option<ZoneSummary>,
    pub crop: Option<CropSummary>,
}
