// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Outgoing mail.
//!
//! Password reset codes are handed to a `Mailer`. The shipped
//! implementation only records the delivery in the log.

use thiserror::Error;
use time::Duration;
use tracing::info;

/// Mail delivery errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MailerError {
    /// The message could not be delivered.
    #[error("Failed to deliver mail to {recipient}: {reason}")]
    DeliveryFailed { recipient: String, reason: String },
}

/// Delivers password reset codes to account holders.
pub trait Mailer: Send + Sync {
    /// Sends a one-time password reset code.
    ///
    /// # Arguments
    ///
    /// * `recipient` - The account email address
    /// * `code` - The six-digit code
    /// * `valid_for` - How long the code remains valid
    ///
    /// # Errors
    ///
    /// Returns an error if the message could not be delivered.
    fn send_reset_code(
        &self,
        recipient: &str,
        code: &str,
        valid_for: Duration,
    ) -> Result<(), MailerError>;
}

/// A mailer that writes each delivery to the log instead of sending it.
#[derive(Debug, Clone)]
pub struct LogMailer {
    from: String,
}

impl LogMailer {
    /// Creates a log mailer that reports `from` as the sender.
    #[must_use]
    pub const fn new(from: String) -> Self {
        Self { from }
    }
}

impl Mailer for LogMailer {
    fn send_reset_code(
        &self,
        recipient: &str,
        code: &str,
        valid_for: Duration,
    ) -> Result<(), MailerError> {
        info!(
            from = %self.from,
            recipient,
            code,
            valid_minutes = valid_for.whole_minutes(),
            "Password reset code issued"
        );
        Ok(())
    }
}
