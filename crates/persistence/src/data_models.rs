// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use agrizone_domain::User;

/// A stored login session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub user_id: i64,
    pub created_at: String,
    /// Expiry timestamp (ISO 8601).
    pub expires_at: String,
}

/// A stored one-time password reset code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetCodeData {
    pub reset_code_id: i64,
    pub email: String,
    pub code: String,
    pub created_at: String,
    /// Expiry timestamp (ISO 8601).
    pub expires_at: String,
}

/// A user together with the stored password hash.
///
/// Only the sign-in path needs the hash; everything else works with
/// [`User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}
