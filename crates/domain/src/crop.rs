// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// A named crop type owned by exactly one landowner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crop {
    /// The canonical numeric identifier assigned by the database.
    pub crop_id: i64,
    /// The owning landowner.
    pub landowner_id: i64,
    /// Display name (never empty).
    pub name: String,
    /// Free-text crop type (e.g. "grain").
    pub crop_type: String,
    /// Free-text growing season (e.g. "rabi").
    pub season: String,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
}

/// A crop that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewCrop {
    pub name: String,
    pub crop_type: String,
    pub season: String,
}

/// A partial crop edit. `None` leaves the stored value untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CropPatch {
    pub name: Option<String>,
    pub crop_type: Option<String>,
    pub season: Option<String>,
}

impl CropPatch {
    /// Returns whether the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.crop_type.is_none() && self.season.is_none()
    }
}
