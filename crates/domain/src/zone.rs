// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// A named farming area owned by exactly one landowner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// The canonical numeric identifier assigned by the database.
    pub zone_id: i64,
    /// The owning landowner.
    pub landowner_id: i64,
    /// Display name (never empty).
    pub name: String,
    /// Free-text location.
    pub location: String,
    /// Total area, never negative.
    pub total_area: f64,
    /// Free-text description.
    pub description: String,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
}

/// A zone that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewZone {
    pub name: String,
    pub location: String,
    pub total_area: f64,
    pub description: String,
}

/// A partial zone edit. `None` leaves the stored value untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ZonePatch {
    pub name: Option<String>,
    pub location: Option<String>,
    pub total_area: Option<f64>,
    pub description: Option<String>,
}

impl ZonePatch {
    /// Returns whether the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.location.is_none()
            && self.total_area.is_none()
            && self.description.is_none()
    }
}
