// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::UserType;
use serde::{Deserialize, Serialize};
use time::Date;

/// A persisted user account, without its credential.
///
/// Email and CNIC are each unique across all users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The canonical numeric identifier assigned by the database.
    pub user_id: i64,
    /// First name.
    pub first_name: String,
    /// Middle name, empty when the user has none.
    pub middle_name: String,
    /// Last name.
    pub last_name: String,
    /// Father's name.
    pub father_name: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Login email, normalized to lowercase.
    pub email: String,
    /// Date of birth.
    pub date_of_birth: Date,
    /// National identity card number.
    pub cnic: String,
    /// The user's role.
    pub user_type: UserType,
    /// Avatar reference, empty when none has been set.
    pub avatar_url: String,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
}

impl User {
    /// Returns the user's display name ("first last").
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A user account that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub father_name: String,
    pub phone_number: String,
    pub email: String,
    pub date_of_birth: Date,
    pub cnic: String,
    pub user_type: UserType,
}

/// A partial profile edit.
///
/// `None` leaves the stored value untouched. Email, role and credential are
/// not editable through the profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfilePatch {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub father_name: Option<String>,
    pub phone_number: Option<String>,
    pub date_of_birth: Option<Date>,
    pub cnic: Option<String>,
    pub avatar_url: Option<String>,
}

impl UserProfilePatch {
    /// Returns whether the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.middle_name.is_none()
            && self.last_name.is_none()
            && self.father_name.is_none()
            && self.phone_number.is_none()
            && self.date_of_birth.is_none()
            && self.cnic.is_none()
            && self.avatar_url.is_none()
    }
}
