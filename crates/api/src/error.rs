// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use agrizone::CoreError;
use agrizone_domain::DomainError;
use agrizone_persistence::PersistenceError;
use tracing::error;

use crate::mailer::MailerError;
use crate::password_policy::PasswordPolicyError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
/// Each variant corresponds to exactly one HTTP status at the server layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor's role does not permit the action.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A uniqueness rule was violated (duplicate email or CNIC).
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A referenced hari, zone or crop failed the ownership check.
    InvalidReference {
        /// A human-readable description of the failure.
        message: String,
    },
    /// The hari already holds an unresolved assignment in the zone.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// Password policy violation.
    PasswordPolicyViolation {
        /// A human-readable description of the policy violation.
        message: String,
    },
    /// An internal error occurred.
    ///
    /// The message is for logs only and never reaches a client.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::InvalidReference { message } => write!(f, "Invalid references: {message}"),
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::PasswordPolicyViolation { message } => {
                write!(f, "Password policy violation: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::PasswordPolicyViolation {
            message: err.to_string(),
        }
    }
}

impl From<MailerError> for ApiError {
    fn from(err: MailerError) -> Self {
        Self::Internal {
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::MissingField { field } | DomainError::EmptyField { field } => {
            ApiError::InvalidInput {
                field: field.to_string(),
                message,
            }
        }
        DomainError::InvalidEmail(_) => ApiError::InvalidInput {
            field: String::from("email"),
            message,
        },
        DomainError::InvalidUserType(_) => ApiError::InvalidInput {
            field: String::from("userType"),
            message,
        },
        DomainError::InvalidAssignmentStatus(_) => ApiError::InvalidInput {
            field: String::from("status"),
            message,
        },
        DomainError::InvalidTotalArea(_) => ApiError::InvalidInput {
            field: String::from("totalArea"),
            message,
        },
        DomainError::DateParseError { .. } => ApiError::InvalidInput {
            field: String::from("dateOfBirth"),
            message,
        },
    }
}

/// Translates a core error into an API error.
///
/// Storage failures are logged here with their detail; the resulting
/// `ApiError::Internal` is rendered generically by the server.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::InvalidReference { message } => ApiError::InvalidReference { message },
        CoreError::Conflict { message } => ApiError::Conflict { message },
        CoreError::Forbidden {
            action,
            required_role,
        } => ApiError::Unauthorized {
            action,
            required_role,
        },
        CoreError::NotFound {
            resource_type,
            message,
        } => ApiError::ResourceNotFound {
            resource_type,
            message,
        },
        CoreError::Storage(msg) => {
            error!(error = %msg, "Assignment store failure");
            ApiError::Internal {
                message: format!("Storage error: {msg}"),
            }
        }
    }
}

/// Translates an unexpected persistence error into an API error.
///
/// Callers handle the expected cases (uniqueness, absence) before falling
/// back to this.
///
/// # Arguments
///
/// * `context` - What the handler was doing when the error occurred
/// * `err` - The persistence error
#[must_use]
pub fn translate_persistence_error(context: &str, err: &PersistenceError) -> ApiError {
    error!(error = %err, context, "Persistence failure");
    ApiError::Internal {
        message: format!("{context}: {err}"),
    }
}
