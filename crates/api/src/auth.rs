// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use agrizone::Caller;
use agrizone_domain::{User, UserType};
use agrizone_persistence::{Persistence, PersistenceError, SessionData, UserCredentials};
use time::format_description::well_known::Iso8601;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};

use crate::error::AuthError;

/// An authenticated account with its role.
///
/// This is the identity handed to every handler once a session token has
/// been validated. Credentials are never re-checked past this point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The account's user ID.
    pub user_id: i64,
    /// The account's role.
    pub role: UserType,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The account's user ID
    /// * `role` - The account's role
    #[must_use]
    pub const fn new(user_id: i64, role: UserType) -> Self {
        Self { user_id, role }
    }

    /// Converts this actor into the caller identity used by the assignment
    /// rules.
    #[must_use]
    pub const fn to_caller(&self) -> Caller {
        Caller::new(self.user_id, self.role)
    }
}

/// Authorization service for the landowner-only resources.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that the actor is a landowner.
    ///
    /// Zones, crops and the hari directory belong to landowners. Assignment
    /// writes are gated separately by the assignment rules.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    /// * `action` - The attempted action, for the error message
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is a hari.
    pub fn require_landowner(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        match actor.role {
            UserType::Landowner => Ok(()),
            UserType::Hari => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: UserType::Landowner.as_str().to_string(),
            }),
        }
    }
}

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Reason reported for an unknown email or a wrong password.
    const INVALID_CREDENTIALS: &'static str = "Invalid email or password";

    /// Verifies credentials and opens a session.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `email` - The normalized account email
    /// * `password` - The plain-text password
    /// * `expected_role` - The role the client signed in as
    /// * `session_ttl` - How long the new session stays valid
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `expires_at`, `user`)
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are wrong, the account holds a
    /// different role, or the session cannot be stored.
    pub fn signin(
        persistence: &mut Persistence,
        email: &str,
        password: &str,
        expected_role: UserType,
        session_ttl: Duration,
    ) -> Result<(String, String, User), AuthError> {
        let credentials: UserCredentials = persistence
            .get_user_credentials_by_email(email)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| {
                warn!(email, "Sign-in for unknown email");
                AuthError::AuthenticationFailed {
                    reason: String::from(Self::INVALID_CREDENTIALS),
                }
            })?;

        let password_valid: bool =
            Persistence::verify_password(password, &credentials.password_hash)
                .map_err(Self::map_persistence_error)?;
        if !password_valid {
            warn!(email, "Sign-in with wrong password");
            return Err(AuthError::AuthenticationFailed {
                reason: String::from(Self::INVALID_CREDENTIALS),
            });
        }

        let user: User = credentials.user;
        if user.user_type != expected_role {
            warn!(
                email,
                registered = user.user_type.as_str(),
                requested = expected_role.as_str(),
                "Sign-in with mismatched role"
            );
            return Err(AuthError::AuthenticationFailed {
                reason: format!(
                    "This account is registered as a {}, not {}",
                    user.user_type, expected_role
                ),
            });
        }

        let (session_token, expires_at): (String, String) =
            Self::open_session(persistence, user.user_id, session_ttl)?;

        info!(user_id = user.user_id, role = user.user_type.as_str(), "Signed in");
        Ok((session_token, expires_at, user))
    }

    /// Creates a session for an account that has just been verified.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `user_id` - The account to open the session for
    /// * `session_ttl` - How long the session stays valid
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `expires_at`)
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be stored.
    pub fn open_session(
        persistence: &mut Persistence,
        user_id: i64,
        session_ttl: Duration,
    ) -> Result<(String, String), AuthError> {
        let session_token: String = Self::generate_session_token();

        let expires_at: OffsetDateTime = OffsetDateTime::now_utc() + session_ttl;
        let expires_at_str: String =
            expires_at
                .format(&Iso8601::DEFAULT)
                .map_err(|e| AuthError::AuthenticationFailed {
                    reason: format!("Failed to format expiration time: {e}"),
                })?;

        persistence
            .create_session(&session_token, user_id, &expires_at_str)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to create session: {e}"),
            })?;

        Ok((session_token, expires_at_str))
    }

    /// Validates a session token and returns the authenticated actor.
    ///
    /// An expired session is deleted as a side effect.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `session_token` - The session token to validate
    ///
    /// # Returns
    ///
    /// A tuple of (`authenticated_actor`, `user`)
    ///
    /// # Errors
    ///
    /// Returns an error if the session is invalid or expired, or the account
    /// no longer exists.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<(AuthenticatedActor, User), AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: OffsetDateTime = OffsetDateTime::parse(&session.expires_at, &Iso8601::DEFAULT)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to parse session expiration: {e}"),
            })?;

        if OffsetDateTime::now_utc() > expires_at {
            persistence
                .delete_session(session_token)
                .map_err(Self::map_persistence_error)?;
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let user: User = persistence
            .get_user_by_id(session.user_id)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Account not found"),
            })?;

        debug!(user_id = user.user_id, "Session validated");
        Ok((AuthenticatedActor::new(user.user_id, user.user_type), user))
    }

    /// Logs out by deleting the session.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `session_token` - The session token to delete
    ///
    /// # Errors
    ///
    /// Returns an error if the logout fails.
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })?;

        Ok(())
    }

    /// Generates a 256-bit session token as 64 hex characters.
    fn generate_session_token() -> String {
        format!(
            "{:032x}{:032x}",
            rand::random::<u128>(),
            rand::random::<u128>()
        )
    }

    /// Maps persistence errors to authentication errors.
    fn map_persistence_error(err: PersistenceError) -> AuthError {
        AuthError::AuthenticationFailed {
            reason: format!("Database error: {err}"),
        }
    }
}
