// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use agrizone_domain::{User, UserType};
use agrizone_persistence::Persistence;

use super::helpers::{
    TEST_PASSWORD, create_test_config, create_test_persistence, create_test_signup_request,
};
use crate::{
    ApiError, AuthError, AuthResponse, AuthenticatedActor, AuthenticationService,
    AuthorizationService, SigninRequest, SignupRequest, logout, signin, signup,
};

fn create_test_signin_request(email: &str, password: &str, user_type: &str) -> SigninRequest {
    SigninRequest {
        email: Some(email.to_string()),
        password: Some(password.to_string()),
        user_type: Some(user_type.to_string()),
    }
}

// ============================================================================
// Signup
// ============================================================================

#[test]
fn test_signup_creates_account_and_session() {
    let mut persistence: Persistence = create_test_persistence();

    let response: AuthResponse = signup(
        &mut persistence,
        &create_test_config(),
        &create_test_signup_request("Owner@Example.com ", "L-1", "landowner"),
    )
    .unwrap();

    assert_eq!(response.message, "User created successfully");
    assert_eq!(response.token.len(), 64);
    assert_eq!(response.user.email, "owner@example.com");
    assert_eq!(response.user.user_type, "landowner");
    assert_eq!(response.user.date_of_birth, "1990-05-17");
    assert_eq!(response.user.middle_name, "");

    let (actor, user): (AuthenticatedActor, User) =
        AuthenticationService::validate_session(&mut persistence, &response.token).unwrap();
    assert_eq!(actor.user_id, response.user.id);
    assert_eq!(actor.role, UserType::Landowner);
    assert_eq!(user.cnic, "L-1");
}

#[test]
fn test_signup_rejects_duplicate_email_case_insensitively() {
    let mut persistence: Persistence = create_test_persistence();
    signup(
        &mut persistence,
        &create_test_config(),
        &create_test_signup_request("owner@example.com", "L-1", "landowner"),
    )
    .unwrap();

    let result: Result<AuthResponse, ApiError> = signup(
        &mut persistence,
        &create_test_config(),
        &create_test_signup_request("OWNER@example.com", "L-2", "hari"),
    );

    assert_eq!(
        result.unwrap_err(),
        ApiError::DomainRuleViolation {
            rule: String::from("unique_email"),
            message: String::from("An account with this email already exists"),
        }
    );
}

#[test]
fn test_signup_rejects_duplicate_cnic() {
    let mut persistence: Persistence = create_test_persistence();
    signup(
        &mut persistence,
        &create_test_config(),
        &create_test_signup_request("a@example.com", "CNIC-1", "landowner"),
    )
    .unwrap();

    let result: Result<AuthResponse, ApiError> = signup(
        &mut persistence,
        &create_test_config(),
        &create_test_signup_request("b@example.com", "CNIC-1", "hari"),
    );

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "unique_cnic"
    ));
}

#[test]
fn test_signup_requires_every_field() {
    let mut persistence: Persistence = create_test_persistence();
    let request: SignupRequest = SignupRequest {
        first_name: Some(String::from("   ")),
        ..create_test_signup_request("a@example.com", "C-1", "hari")
    };

    let result: Result<AuthResponse, ApiError> =
        signup(&mut persistence, &create_test_config(), &request);

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "firstName"
    ));

    let request: SignupRequest = SignupRequest {
        password: None,
        ..create_test_signup_request("a@example.com", "C-1", "hari")
    };
    let result: Result<AuthResponse, ApiError> =
        signup(&mut persistence, &create_test_config(), &request);

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "password"
    ));
}

#[test]
fn test_signup_enforces_password_policy() {
    let mut persistence: Persistence = create_test_persistence();
    let request: SignupRequest = SignupRequest {
        password: Some(String::from("abc")),
        ..create_test_signup_request("a@example.com", "C-1", "hari")
    };

    let result: Result<AuthResponse, ApiError> =
        signup(&mut persistence, &create_test_config(), &request);

    assert_eq!(
        result.unwrap_err(),
        ApiError::PasswordPolicyViolation {
            message: String::from("Password must be at least 4 characters"),
        }
    );
}

#[test]
fn test_signup_rejects_unknown_role_and_bad_date() {
    let mut persistence: Persistence = create_test_persistence();

    let result: Result<AuthResponse, ApiError> = signup(
        &mut persistence,
        &create_test_config(),
        &create_test_signup_request("a@example.com", "C-1", "admin"),
    );
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "userType"
    ));

    let request: SignupRequest = SignupRequest {
        date_of_birth: Some(String::from("1990-13-40")),
        ..create_test_signup_request("a@example.com", "C-1", "hari")
    };
    let result: Result<AuthResponse, ApiError> =
        signup(&mut persistence, &create_test_config(), &request);
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "dateOfBirth"
    ));
}

#[test]
fn test_signup_accepts_full_timestamp_for_date_of_birth() {
    let mut persistence: Persistence = create_test_persistence();
    let request: SignupRequest = SignupRequest {
        date_of_birth: Some(String::from("1985-02-03T00:00:00.000Z")),
        ..create_test_signup_request("a@example.com", "C-1", "hari")
    };

    let response: AuthResponse =
        signup(&mut persistence, &create_test_config(), &request).unwrap();

    assert_eq!(response.user.date_of_birth, "1985-02-03");
}

// ============================================================================
// Signin
// ============================================================================

#[test]
fn test_signin_opens_new_session() {
    let mut persistence: Persistence = create_test_persistence();
    let created: AuthResponse = signup(
        &mut persistence,
        &create_test_config(),
        &create_test_signup_request("hari@example.com", "H-1", "hari"),
    )
    .unwrap();

    let response: AuthResponse = signin(
        &mut persistence,
        &create_test_config(),
        &create_test_signin_request(" HARI@example.com", TEST_PASSWORD, "hari"),
    )
    .unwrap();

    assert_eq!(response.message, "Login successful");
    assert_eq!(response.user.id, created.user.id);
    assert_ne!(response.token, created.token);
    assert!(AuthenticationService::validate_session(&mut persistence, &created.token).is_ok());
    assert!(AuthenticationService::validate_session(&mut persistence, &response.token).is_ok());
}

#[test]
fn test_signin_wrong_password_and_unknown_email_look_alike() {
    let mut persistence: Persistence = create_test_persistence();
    signup(
        &mut persistence,
        &create_test_config(),
        &create_test_signup_request("hari@example.com", "H-1", "hari"),
    )
    .unwrap();

    let wrong_password: ApiError = signin(
        &mut persistence,
        &create_test_config(),
        &create_test_signin_request("hari@example.com", "nope-nope", "hari"),
    )
    .unwrap_err();
    let unknown_email: ApiError = signin(
        &mut persistence,
        &create_test_config(),
        &create_test_signin_request("ghost@example.com", TEST_PASSWORD, "hari"),
    )
    .unwrap_err();

    let expected: ApiError = ApiError::AuthenticationFailed {
        reason: String::from("Invalid email or password"),
    };
    assert_eq!(wrong_password, expected);
    assert_eq!(unknown_email, expected);
}

#[test]
fn test_signin_rejects_role_mismatch() {
    let mut persistence: Persistence = create_test_persistence();
    signup(
        &mut persistence,
        &create_test_config(),
        &create_test_signup_request("hari@example.com", "H-1", "hari"),
    )
    .unwrap();

    let result: Result<AuthResponse, ApiError> = signin(
        &mut persistence,
        &create_test_config(),
        &create_test_signin_request("hari@example.com", TEST_PASSWORD, "landowner"),
    );

    assert_eq!(
        result.unwrap_err(),
        ApiError::AuthenticationFailed {
            reason: String::from("This account is registered as a hari, not landowner"),
        }
    );
}

#[test]
fn test_signin_role_mismatch_with_wrong_password_is_generic() {
    let mut persistence: Persistence = create_test_persistence();
    signup(
        &mut persistence,
        &create_test_config(),
        &create_test_signup_request("hari@example.com", "H-1", "hari"),
    )
    .unwrap();

    let result: Result<AuthResponse, ApiError> = signin(
        &mut persistence,
        &create_test_config(),
        &create_test_signin_request("hari@example.com", "wrong-one", "landowner"),
    );

    assert_eq!(
        result.unwrap_err(),
        ApiError::AuthenticationFailed {
            reason: String::from("Invalid email or password"),
        }
    );
}

// ============================================================================
// Sessions
// ============================================================================

#[test]
fn test_logout_invalidates_session() {
    let mut persistence: Persistence = create_test_persistence();
    let response: AuthResponse = signup(
        &mut persistence,
        &create_test_config(),
        &create_test_signup_request("a@example.com", "C-1", "landowner"),
    )
    .unwrap();

    logout(&mut persistence, &response.token).unwrap();

    assert_eq!(
        AuthenticationService::validate_session(&mut persistence, &response.token).unwrap_err(),
        AuthError::AuthenticationFailed {
            reason: String::from("Invalid session token"),
        }
    );
}

#[test]
fn test_expired_session_is_rejected_and_removed() {
    let mut persistence: Persistence = create_test_persistence();
    let response: AuthResponse = signup(
        &mut persistence,
        &create_test_config(),
        &create_test_signup_request("a@example.com", "C-1", "landowner"),
    )
    .unwrap();
    persistence
        .create_session("stale-token", response.user.id, "2000-01-01T00:00:00.000000000Z")
        .unwrap();

    let result: Result<(AuthenticatedActor, User), AuthError> =
        AuthenticationService::validate_session(&mut persistence, "stale-token");

    assert_eq!(
        result.unwrap_err(),
        AuthError::AuthenticationFailed {
            reason: String::from("Session expired"),
        }
    );
    assert!(
        persistence
            .get_session_by_token("stale-token")
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_require_landowner() {
    let landowner: AuthenticatedActor = AuthenticatedActor::new(1, UserType::Landowner);
    let hari: AuthenticatedActor = AuthenticatedActor::new(2, UserType::Hari);

    assert!(AuthorizationService::require_landowner(&landowner, "manage zones").is_ok());
    assert_eq!(
        AuthorizationService::require_landowner(&hari, "manage zones").unwrap_err(),
        AuthError::Unauthorized {
            action: String::from("manage zones"),
            required_role: String::from("landowner"),
        }
    );
}
