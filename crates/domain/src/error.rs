// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field was absent or blank.
    MissingField {
        /// The wire name of the missing field.
        field: &'static str,
    },
    /// A field that may be omitted was supplied but left empty.
    EmptyField {
        /// The wire name of the empty field.
        field: &'static str,
    },
    /// Email address is malformed.
    InvalidEmail(String),
    /// User type is not one of the known roles.
    InvalidUserType(String),
    /// Assignment status is not one of the known statuses.
    InvalidAssignmentStatus(String),
    /// Zone total area is negative or not a finite number.
    InvalidTotalArea(String),
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "Field '{field}' is required"),
            Self::EmptyField { field } => write!(f, "Field '{field}' cannot be empty"),
            Self::InvalidEmail(email) => write!(f, "Invalid email address: '{email}'"),
            Self::InvalidUserType(value) => {
                write!(
                    f,
                    "Invalid user type: '{value}'. Must be 'hari' or 'landowner'"
                )
            }
            Self::InvalidAssignmentStatus(value) => {
                write!(
                    f,
                    "Invalid assignment status: '{value}'. Must be 'active', 'pending' or 'completed'"
                )
            }
            Self::InvalidTotalArea(value) => {
                write!(
                    f,
                    "Invalid total area: {value}. Must be a non-negative number"
                )
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
