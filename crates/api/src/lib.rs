// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the AgriZone backend.
//!
//! This crate owns the request and response contract, authentication and
//! authorization, and the translation of domain, core and persistence
//! errors into API errors. It is transport-agnostic: the server crate maps
//! HTTP onto the handler functions exported here.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod auth;
mod config;
mod error;
mod handlers;
mod mailer;
mod password_policy;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthenticationService, AuthorizationService};
pub use config::AppConfig;
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    DEFAULT_LIST_LIMIT, create_assignment, create_crop, create_zone, delete_assignment,
    delete_crop, delete_zone, forgot_password, get_profile, list_assignments, list_crops,
    list_haris, list_zones, logout, reset_password, resolve_limit, signin, signup,
    update_assignment, update_crop, update_profile, update_zone, verify_otp,
};
pub use mailer::{LogMailer, Mailer, MailerError};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use request_response::{
    AssignmentDetailInfo, AssignmentInfo, AuthResponse, CreateAssignmentRequest,
    CreateCropRequest, CreateZoneRequest, CropInfo, CropRef, ForgotPasswordRequest,
    HariInfo, HealthResponse, ListQuery, MessageResponse, ResetPasswordRequest, SigninRequest,
    SignupRequest, SuccessResponse, UpdateAssignmentRequest, UpdateCropRequest,
    UpdateProfileRequest, UpdateZoneRequest, UserProfile, VerifyOtpRequest, ZoneInfo, ZoneRef,
};
