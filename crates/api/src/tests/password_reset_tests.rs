// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use agrizone_persistence::Persistence;

use super::helpers::{
    FailingMailer, RecordingMailer, TEST_PASSWORD, create_test_config, create_test_persistence,
    signup_hari,
};
use crate::{
    ApiError, AuthenticationService, ForgotPasswordRequest, MessageResponse,
    ResetPasswordRequest, SigninRequest, VerifyOtpRequest, forgot_password, reset_password,
    signin, verify_otp,
};

const HARI_EMAIL: &str = "hari-1@example.com";

fn forgot(email: &str) -> ForgotPasswordRequest {
    ForgotPasswordRequest {
        email: Some(email.to_string()),
    }
}

fn verify(email: &str, otp: &str) -> VerifyOtpRequest {
    VerifyOtpRequest {
        email: Some(email.to_string()),
        otp: Some(otp.to_string()),
    }
}

fn reset(email: &str, otp: &str, new_password: &str) -> ResetPasswordRequest {
    ResetPasswordRequest {
        email: Some(email.to_string()),
        otp: Some(otp.to_string()),
        new_password: Some(new_password.to_string()),
    }
}

fn invalid_otp(message: &str) -> ApiError {
    ApiError::InvalidInput {
        field: String::from("otp"),
        message: message.to_string(),
    }
}

#[test]
fn test_forgot_password_for_unknown_email_sends_nothing() {
    let mut persistence: Persistence = create_test_persistence();
    let mailer: RecordingMailer = RecordingMailer::default();

    let response: MessageResponse = forgot_password(
        &mut persistence,
        &create_test_config(),
        &mailer,
        &forgot("ghost@example.com"),
    )
    .unwrap();

    assert_eq!(
        response.message,
        "If an account exists with this email, you will receive an OTP."
    );
    assert_eq!(mailer.count(), 0);
}

#[test]
fn test_forgot_password_requires_email() {
    let mut persistence: Persistence = create_test_persistence();
    let mailer: RecordingMailer = RecordingMailer::default();

    let result: Result<MessageResponse, ApiError> = forgot_password(
        &mut persistence,
        &create_test_config(),
        &mailer,
        &ForgotPasswordRequest { email: None },
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "email"
    ));
}

#[test]
fn test_forgot_password_mails_six_digit_code() {
    let mut persistence: Persistence = create_test_persistence();
    signup_hari(&mut persistence, "1");
    let mailer: RecordingMailer = RecordingMailer::default();

    let response: MessageResponse = forgot_password(
        &mut persistence,
        &create_test_config(),
        &mailer,
        &forgot("Hari-1@Example.com"),
    )
    .unwrap();

    assert_eq!(
        response.message,
        "OTP sent to your email. Please check your inbox."
    );
    let sent: Vec<(String, String)> = mailer.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, HARI_EMAIL);
    assert_eq!(sent[0].1.len(), 6);
    assert!(sent[0].1.chars().all(|c| c.is_ascii_digit()));
    assert!(
        persistence
            .find_reset_code(HARI_EMAIL, &sent[0].1)
            .unwrap()
            .is_some()
    );
}

#[test]
fn test_undelivered_code_is_discarded() {
    let mut persistence: Persistence = create_test_persistence();
    signup_hari(&mut persistence, "1");
    let mailer: FailingMailer = FailingMailer::default();

    let result: Result<MessageResponse, ApiError> = forgot_password(
        &mut persistence,
        &create_test_config(),
        &mailer,
        &forgot(HARI_EMAIL),
    );

    assert!(matches!(result, Err(ApiError::Internal { .. })));
    let code: String = mailer.attempted.lock().unwrap()[0].clone();
    assert!(
        persistence
            .find_reset_code(HARI_EMAIL, &code)
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_verify_otp_consumes_code() {
    let mut persistence: Persistence = create_test_persistence();
    signup_hari(&mut persistence, "1");
    let mailer: RecordingMailer = RecordingMailer::default();
    forgot_password(
        &mut persistence,
        &create_test_config(),
        &mailer,
        &forgot(HARI_EMAIL),
    )
    .unwrap();
    let code: String = mailer.last_code().unwrap();

    let response: MessageResponse = verify_otp(&mut persistence, &verify(HARI_EMAIL, &code)).unwrap();
    assert_eq!(response.message, "OTP verified successfully");

    assert_eq!(
        verify_otp(&mut persistence, &verify(HARI_EMAIL, &code)).unwrap_err(),
        invalid_otp("Invalid or expired OTP. Please try again.")
    );
}

#[test]
fn test_verify_otp_rejects_wrong_code() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .create_reset_code(HARI_EMAIL, "111111", "2999-01-01T00:00:00.000000000Z")
        .unwrap();

    assert_eq!(
        verify_otp(&mut persistence, &verify(HARI_EMAIL, "222222")).unwrap_err(),
        invalid_otp("Invalid or expired OTP. Please try again.")
    );
    assert_eq!(
        verify_otp(&mut persistence, &verify("other@example.com", "111111")).unwrap_err(),
        invalid_otp("Invalid or expired OTP. Please try again.")
    );
}

#[test]
fn test_expired_code_is_rejected_then_gone() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .create_reset_code(HARI_EMAIL, "123456", "2000-01-01T00:00:00.000000000Z")
        .unwrap();

    assert_eq!(
        verify_otp(&mut persistence, &verify(HARI_EMAIL, "123456")).unwrap_err(),
        invalid_otp("OTP has expired. Please request a new one.")
    );
    assert_eq!(
        verify_otp(&mut persistence, &verify(HARI_EMAIL, "123456")).unwrap_err(),
        invalid_otp("Invalid or expired OTP. Please try again.")
    );
}

#[test]
fn test_reset_password_replaces_credential_and_revokes_sessions() {
    let mut persistence: Persistence = create_test_persistence();
    signup_hari(&mut persistence, "1");
    let session_token: String = signin(
        &mut persistence,
        &create_test_config(),
        &SigninRequest {
            email: Some(String::from(HARI_EMAIL)),
            password: Some(String::from(TEST_PASSWORD)),
            user_type: Some(String::from("hari")),
        },
    )
    .unwrap()
    .token;
    let mailer: RecordingMailer = RecordingMailer::default();
    forgot_password(
        &mut persistence,
        &create_test_config(),
        &mailer,
        &forgot(HARI_EMAIL),
    )
    .unwrap();
    let code: String = mailer.last_code().unwrap();

    let response: MessageResponse = reset_password(
        &mut persistence,
        &create_test_config(),
        &reset(HARI_EMAIL, &code, "brand-new"),
    )
    .unwrap();

    assert_eq!(
        response.message,
        "Password reset successfully. You can now login with your new password."
    );
    assert!(AuthenticationService::validate_session(&mut persistence, &session_token).is_err());

    let old_password: Result<_, ApiError> = signin(
        &mut persistence,
        &create_test_config(),
        &SigninRequest {
            email: Some(String::from(HARI_EMAIL)),
            password: Some(String::from(TEST_PASSWORD)),
            user_type: Some(String::from("hari")),
        },
    );
    assert!(matches!(old_password, Err(ApiError::AuthenticationFailed { .. })));

    let new_password: Result<_, ApiError> = signin(
        &mut persistence,
        &create_test_config(),
        &SigninRequest {
            email: Some(String::from(HARI_EMAIL)),
            password: Some(String::from("brand-new")),
            user_type: Some(String::from("hari")),
        },
    );
    assert!(new_password.is_ok());

    assert_eq!(
        reset_password(
            &mut persistence,
            &create_test_config(),
            &reset(HARI_EMAIL, &code, "another-one"),
        )
        .unwrap_err(),
        invalid_otp("Invalid or expired OTP. Please try again.")
    );
}

#[test]
fn test_reset_password_enforces_policy_before_consuming_code() {
    let mut persistence: Persistence = create_test_persistence();
    signup_hari(&mut persistence, "1");
    persistence
        .create_reset_code(HARI_EMAIL, "654321", "2999-01-01T00:00:00.000000000Z")
        .unwrap();

    let result: Result<MessageResponse, ApiError> = reset_password(
        &mut persistence,
        &create_test_config(),
        &reset(HARI_EMAIL, "654321", "no"),
    );

    assert!(matches!(
        result,
        Err(ApiError::PasswordPolicyViolation { .. })
    ));
    assert!(
        persistence
            .find_reset_code(HARI_EMAIL, "654321")
            .unwrap()
            .is_some()
    );
}

#[test]
fn test_reset_password_for_missing_account() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .create_reset_code("gone@example.com", "654321", "2999-01-01T00:00:00.000000000Z")
        .unwrap();

    let result: Result<MessageResponse, ApiError> = reset_password(
        &mut persistence,
        &create_test_config(),
        &reset("gone@example.com", "654321", "brand-new"),
    );

    assert_eq!(
        result.unwrap_err(),
        ApiError::ResourceNotFound {
            resource_type: String::from("User"),
            message: String::from("User does not exist."),
        }
    );
}
