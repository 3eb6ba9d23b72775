// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application configuration.
//!
//! Built once at process start and passed by reference to the handlers
//! that need it.

use time::Duration;

use crate::password_policy::PasswordPolicy;

/// Configuration for authentication, password reset and mail delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// How long a session token stays valid (default: 7 days).
    pub session_ttl: Duration,
    /// How long a password reset code stays valid (default: 5 minutes).
    pub reset_code_ttl: Duration,
    /// Minimum password length for signup and reset (default: 4).
    pub password_min_length: usize,
    /// Sender address for outgoing mail.
    pub mail_from: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            session_ttl: Duration::days(7),
            reset_code_ttl: Duration::minutes(5),
            password_min_length: 4,
            mail_from: String::from("no-reply@agrizone.local"),
        }
    }
}

impl AppConfig {
    /// Returns the password policy derived from this configuration.
    #[must_use]
    pub const fn password_policy(&self) -> PasswordPolicy {
        PasswordPolicy {
            min_length: self.password_min_length,
        }
    }
}
