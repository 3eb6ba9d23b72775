// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use agrizone_domain::UserType;

/// The authenticated identity behind a request.
///
/// Supplied by the authentication layer and trusted as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    /// The caller's user id.
    pub user_id: i64,
    /// The caller's role.
    pub role: UserType,
}

impl Caller {
    /// Creates a new `Caller`.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The authenticated user's id
    /// * `role` - The authenticated user's role
    #[must_use]
    pub const fn new(user_id: i64, role: UserType) -> Self {
        Self { user_id, role }
    }
}

/// The assignment writes guarded by the role gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentAction {
    Create,
    Update,
    Delete,
}

impl AssignmentAction {
    /// Returns a short description used in error messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create assignment",
            Self::Update => "update assignment",
            Self::Delete => "delete assignment",
        }
    }
}

/// The role gate shared by every assignment write.
///
/// Runs before any other validation, so a hari learns nothing about the
/// records it references.
///
/// # Arguments
///
/// * `caller` - The authenticated caller
/// * `action` - The write being attempted
///
/// # Returns
///
/// The caller's id, which becomes the landowner scope of the write.
///
/// # Errors
///
/// Returns `CoreError::Forbidden` if the caller is not a landowner.
pub fn authorize_assignment_write(
    caller: &Caller,
    action: AssignmentAction,
) -> Result<i64, CoreError> {
    match caller.role {
        UserType::Landowner => Ok(caller.user_id),
        UserType::Hari => Err(CoreError::Forbidden {
            action: action.as_str().to_string(),
            required_role: UserType::Landowner.as_str().to_string(),
        }),
    }
}
