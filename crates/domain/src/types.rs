// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The role attached to every user account.
///
/// The set is closed: authorization gates match on it exhaustively, so a
/// new role forces every gate to make an explicit decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// An agricultural worker who can be assigned to zones and crops.
    Hari,
    /// The owner of zones and crops, and the authority over assignments.
    Landowner,
}

impl UserType {
    /// Converts this role to its wire and storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hari => "hari",
            Self::Landowner => "landowner",
        }
    }
}

impl FromStr for UserType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hari" => Ok(Self::Hari),
            "landowner" => Ok(Self::Landowner),
            _ => Err(DomainError::InvalidUserType(s.to_string())),
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The status of an assignment.
///
/// Any status may be replaced by any other through an update; `Completed`
/// is terminal by convention only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    /// The hari is currently working the zone.
    #[default]
    Active,
    /// The assignment has been agreed but work has not started.
    Pending,
    /// The work is finished.
    Completed,
}

impl AssignmentStatus {
    /// Statuses that still occupy the `(landowner, hari, zone)` slot.
    pub const UNRESOLVED: [Self; 2] = [Self::Active, Self::Pending];

    /// Converts this status to its wire and storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }

    /// Returns whether an assignment in this status blocks another
    /// assignment of the same hari to the same zone.
    #[must_use]
    pub const fn is_unresolved(&self) -> bool {
        matches!(self, Self::Active | Self::Pending)
    }
}

impl FromStr for AssignmentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            _ => Err(DomainError::InvalidAssignmentStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
