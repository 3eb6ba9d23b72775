// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::store::StoreError;
use agrizone_domain::DomainError;

/// Errors produced by the assignment lifecycle.
///
/// Every variant except `Storage` is a caller-recoverable outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A required field was missing or malformed.
    DomainViolation(DomainError),
    /// A referenced hari, zone or crop does not exist or is not owned by
    /// the caller.
    InvalidReference {
        /// A human-readable message.
        message: String,
    },
    /// An unresolved assignment already occupies the (landowner, hari, zone)
    /// slot.
    Conflict {
        /// A human-readable message.
        message: String,
    },
    /// The caller's role may not perform the action.
    Forbidden {
        /// The attempted action.
        action: String,
        /// The role the action requires.
        required_role: String,
    },
    /// The target does not exist within the caller's ownership scope.
    NotFound {
        /// The kind of record that was not found.
        resource_type: String,
        /// A human-readable message.
        message: String,
    },
    /// The store failed unexpectedly.
    Storage(String),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::InvalidReference { message } => write!(f, "Invalid reference: {message}"),
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::Forbidden {
                action,
                required_role,
            } => write!(f, "Forbidden: {action} requires role {required_role}"),
            Self::NotFound {
                resource_type,
                message,
            } => write!(f, "{resource_type} not found: {message}"),
            Self::Storage(msg) => write!(f, "Storage error: {msg}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            // A racing writer got there first.
            StoreError::UniqueViolation { .. } => Self::Conflict {
                message: String::from("Hari already has an active assignment in this zone"),
            },
            StoreError::Backend(msg) => Self::Storage(msg),
        }
    }
}
