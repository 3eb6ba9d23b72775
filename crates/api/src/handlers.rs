// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for every endpoint.
//!
//! Handlers are transport-agnostic: they take the persistence layer, the
//! authenticated actor where one is required, and a request DTO, and return
//! a response DTO or an `ApiError`.

use time::format_description::well_known::Iso8601;
use time::{Date, OffsetDateTime};
use tracing::{debug, error, info, warn};

use agrizone::{
    AssignmentAction, CreateAssignment, authorize_assignment_write,
    create_assignment as create_assignment_rule,
};
use agrizone_domain::{
    Assignment, AssignmentDetail, AssignmentPatch, AssignmentStatus, Crop, CropPatch,
    HariSummary, NewCrop, NewUser, NewZone, User, UserProfilePatch, UserType, Zone, ZonePatch,
    normalize_email, parse_date_of_birth, require_field, validate_crop_patch, validate_new_crop,
    validate_new_user, validate_new_zone, validate_profile_patch, validate_zone_patch,
};
use agrizone_persistence::{Persistence, ResetCodeData, UserCredentials};

use crate::auth::{AuthenticatedActor, AuthenticationService, AuthorizationService};
use crate::config::AppConfig;
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::mailer::Mailer;
use crate::request_response::{
    AssignmentDetailInfo, AssignmentInfo, AuthResponse, CreateAssignmentRequest,
    CreateCropRequest, CreateZoneRequest, CropInfo, ForgotPasswordRequest, HariInfo, ListQuery,
    MessageResponse, ResetPasswordRequest, SigninRequest, SignupRequest, SuccessResponse,
    UpdateAssignmentRequest, UpdateCropRequest, UpdateProfileRequest, UpdateZoneRequest,
    UserProfile, VerifyOtpRequest, ZoneInfo,
};

/// Default and fallback page size for zone and crop listings.
pub const DEFAULT_LIST_LIMIT: i64 = 100;

/// Reset codes are six decimal digits.
const RESET_CODE_RANGE: std::ops::Range<u32> = 100_000..1_000_000;

fn required(field: &'static str, value: Option<&String>) -> Result<String, ApiError> {
    require_field(field, value.map(String::as_str)).map_err(translate_domain_error)
}

fn trimmed(value: Option<&String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

/// Resolves the `limit` query parameter. Anything that is not a positive
/// integer yields the default.
#[must_use]
pub fn resolve_limit(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|limit| *limit > 0)
        .unwrap_or(DEFAULT_LIST_LIMIT)
}

/// Resolves the `q` query parameter. Blank means no filter.
fn resolve_name_filter(raw: Option<&String>) -> Option<&str> {
    raw.map(|q| q.trim()).filter(|q| !q.is_empty())
}

fn parse_status(raw: Option<&String>) -> Result<Option<AssignmentStatus>, ApiError> {
    raw.map(|s| s.trim().parse::<AssignmentStatus>())
        .transpose()
        .map_err(translate_domain_error)
}

fn format_timestamp(at: OffsetDateTime) -> Result<String, ApiError> {
    at.format(&Iso8601::DEFAULT).map_err(|e| ApiError::Internal {
        message: format!("Failed to format timestamp: {e}"),
    })
}

fn has_expired(expires_at: &str) -> Result<bool, ApiError> {
    let expires_at: OffsetDateTime =
        OffsetDateTime::parse(expires_at, &Iso8601::DEFAULT).map_err(|e| ApiError::Internal {
            message: format!("Failed to parse expiration '{expires_at}': {e}"),
        })?;
    Ok(OffsetDateTime::now_utc() > expires_at)
}

// ============================================================================
// Accounts
// ============================================================================

/// Creates an account and opens its first session.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `config` - The application configuration
/// * `request` - The signup request
///
/// # Errors
///
/// Returns an error if:
/// - A required field is missing or malformed
/// - The password does not meet the policy
/// - The email or CNIC is already registered
/// - The account or session cannot be stored
pub fn signup(
    persistence: &mut Persistence,
    config: &AppConfig,
    request: &SignupRequest,
) -> Result<AuthResponse, ApiError> {
    let first_name: String = required("firstName", request.first_name.as_ref())?;
    let last_name: String = required("lastName", request.last_name.as_ref())?;
    let father_name: String = required("fatherName", request.father_name.as_ref())?;
    let phone_number: String = required("phoneNumber", request.phone_number.as_ref())?;
    let email: String = required("email", request.email.as_ref())?;
    let password: String = request
        .password
        .clone()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::InvalidInput {
            field: String::from("password"),
            message: String::from("Field 'password' is required"),
        })?;
    let date_of_birth: String = required("dateOfBirth", request.date_of_birth.as_ref())?;
    let cnic: String = required("cnic", request.cnic.as_ref())?;
    let user_type: String = required("userType", request.user_type.as_ref())?;

    config.password_policy().validate(&password)?;

    let user_type: UserType = user_type.parse().map_err(translate_domain_error)?;
    let date_of_birth: Date = parse_date_of_birth(&date_of_birth).map_err(translate_domain_error)?;

    let new_user: NewUser = NewUser {
        first_name,
        middle_name: trimmed(request.middle_name.as_ref()).unwrap_or_default(),
        last_name,
        father_name,
        phone_number,
        email: normalize_email(&email),
        date_of_birth,
        cnic,
        user_type,
    };
    validate_new_user(&new_user).map_err(translate_domain_error)?;

    let user: User = persistence
        .create_user(&new_user, &password)
        .map_err(|e| match e {
            e if e.is_unique_violation_on("users.email") => ApiError::DomainRuleViolation {
                rule: String::from("unique_email"),
                message: String::from("An account with this email already exists"),
            },
            e if e.is_unique_violation_on("users.cnic") => ApiError::DomainRuleViolation {
                rule: String::from("unique_cnic"),
                message: String::from("An account with this CNIC already exists"),
            },
            e => translate_persistence_error("Failed to create account", &e),
        })?;

    info!(
        user_id = user.user_id,
        role = user.user_type.as_str(),
        "Account created"
    );

    let (token, expires_at): (String, String) =
        AuthenticationService::open_session(persistence, user.user_id, config.session_ttl)?;

    Ok(AuthResponse {
        message: String::from("User created successfully"),
        token,
        expires_at,
        user: UserProfile::from(&user),
    })
}

/// Verifies credentials and opens a session.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `config` - The application configuration
/// * `request` - The signin request
///
/// # Errors
///
/// Returns an error if a field is missing, the credentials are wrong, or
/// the account holds a different role than requested.
pub fn signin(
    persistence: &mut Persistence,
    config: &AppConfig,
    request: &SigninRequest,
) -> Result<AuthResponse, ApiError> {
    let email: String = required("email", request.email.as_ref())?;
    let password: String = request
        .password
        .clone()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::InvalidInput {
            field: String::from("password"),
            message: String::from("Field 'password' is required"),
        })?;
    let user_type: UserType = required("userType", request.user_type.as_ref())?
        .parse()
        .map_err(translate_domain_error)?;

    let (token, expires_at, user): (String, String, User) = AuthenticationService::signin(
        persistence,
        &normalize_email(&email),
        &password,
        user_type,
        config.session_ttl,
    )?;

    Ok(AuthResponse {
        message: String::from("Login successful"),
        token,
        expires_at,
        user: UserProfile::from(&user),
    })
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
pub fn logout(
    persistence: &mut Persistence,
    session_token: &str,
) -> Result<MessageResponse, ApiError> {
    AuthenticationService::logout(persistence, session_token)?;
    Ok(MessageResponse::new("Logged out"))
}

// ============================================================================
// Password reset
// ============================================================================

/// Issues a password reset code and hands it to the mailer.
///
/// An unknown email receives the same response as a known one, minus the
/// delivery.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `config` - The application configuration
/// * `mailer` - Delivers the code
/// * `request` - The forgot-password request
///
/// # Errors
///
/// Returns an error if the email is missing, or the code cannot be stored
/// or delivered. An undelivered code is deleted.
pub fn forgot_password(
    persistence: &mut Persistence,
    config: &AppConfig,
    mailer: &dyn Mailer,
    request: &ForgotPasswordRequest,
) -> Result<MessageResponse, ApiError> {
    let email: String = normalize_email(&required("email", request.email.as_ref())?);

    let known: bool = persistence
        .get_user_credentials_by_email(&email)
        .map_err(|e| translate_persistence_error("Failed to look up account", &e))?
        .is_some();
    if !known {
        debug!(email, "Password reset requested for unknown email");
        return Ok(MessageResponse::new(
            "If an account exists with this email, you will receive an OTP.",
        ));
    }

    let code: String = rand::random_range(RESET_CODE_RANGE).to_string();
    let expires_at: String = format_timestamp(OffsetDateTime::now_utc() + config.reset_code_ttl)?;

    let reset_code_id: i64 = persistence
        .create_reset_code(&email, &code, &expires_at)
        .map_err(|e| translate_persistence_error("Failed to store reset code", &e))?;

    if let Err(e) = mailer.send_reset_code(&email, &code, config.reset_code_ttl) {
        error!(error = %e, email, "Reset code delivery failed");
        persistence
            .delete_reset_code(reset_code_id)
            .map_err(|e| translate_persistence_error("Failed to discard reset code", &e))?;
        return Err(e.into());
    }

    info!(email, "Password reset code issued");
    Ok(MessageResponse::new(
        "OTP sent to your email. Please check your inbox.",
    ))
}

/// Finds the reset code for `email`, rejecting unknown or expired codes.
///
/// An expired code is deleted.
fn take_valid_reset_code(
    persistence: &mut Persistence,
    email: &str,
    otp: &str,
) -> Result<ResetCodeData, ApiError> {
    let reset_code: ResetCodeData = persistence
        .find_reset_code(email, otp)
        .map_err(|e| translate_persistence_error("Failed to look up reset code", &e))?
        .ok_or_else(|| {
            warn!(email, "Unknown reset code");
            ApiError::InvalidInput {
                field: String::from("otp"),
                message: String::from("Invalid or expired OTP. Please try again."),
            }
        })?;

    if has_expired(&reset_code.expires_at)? {
        persistence
            .delete_reset_code(reset_code.reset_code_id)
            .map_err(|e| translate_persistence_error("Failed to discard reset code", &e))?;
        warn!(email, "Expired reset code");
        return Err(ApiError::InvalidInput {
            field: String::from("otp"),
            message: String::from("OTP has expired. Please request a new one."),
        });
    }

    Ok(reset_code)
}

/// Checks a reset code and consumes it.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The verify request
///
/// # Errors
///
/// Returns an error if a field is missing or the code is unknown or expired.
pub fn verify_otp(
    persistence: &mut Persistence,
    request: &VerifyOtpRequest,
) -> Result<MessageResponse, ApiError> {
    let email: String = normalize_email(&required("email", request.email.as_ref())?);
    let otp: String = required("otp", request.otp.as_ref())?;

    let reset_code: ResetCodeData = take_valid_reset_code(persistence, &email, &otp)?;
    persistence
        .delete_reset_code(reset_code.reset_code_id)
        .map_err(|e| translate_persistence_error("Failed to consume reset code", &e))?;

    Ok(MessageResponse::new("OTP verified successfully"))
}

/// Replaces a password using a reset code.
///
/// The code is consumed and every session of the account is invalidated.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `config` - The application configuration
/// * `request` - The reset request
///
/// # Errors
///
/// Returns an error if:
/// - A field is missing
/// - The new password does not meet the policy
/// - The code is unknown or expired
/// - No account has this email
pub fn reset_password(
    persistence: &mut Persistence,
    config: &AppConfig,
    request: &ResetPasswordRequest,
) -> Result<MessageResponse, ApiError> {
    let email: String = normalize_email(&required("email", request.email.as_ref())?);
    let otp: String = required("otp", request.otp.as_ref())?;
    let new_password: String = request
        .new_password
        .clone()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::InvalidInput {
            field: String::from("newPassword"),
            message: String::from("Field 'newPassword' is required"),
        })?;

    config.password_policy().validate(&new_password)?;

    let reset_code: ResetCodeData = take_valid_reset_code(persistence, &email, &otp)?;

    let credentials: UserCredentials = persistence
        .get_user_credentials_by_email(&email)
        .map_err(|e| translate_persistence_error("Failed to look up account", &e))?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("User"),
            message: String::from("User does not exist."),
        })?;
    let user_id: i64 = credentials.user.user_id;

    persistence
        .update_password(user_id, &new_password)
        .map_err(|e| translate_persistence_error("Failed to update password", &e))?;
    persistence
        .delete_reset_code(reset_code.reset_code_id)
        .map_err(|e| translate_persistence_error("Failed to consume reset code", &e))?;
    let revoked: usize = persistence
        .delete_sessions_for_user(user_id)
        .map_err(|e| translate_persistence_error("Failed to invalidate sessions", &e))?;

    info!(user_id, revoked_sessions = revoked, "Password reset");
    Ok(MessageResponse::new(
        "Password reset successfully. You can now login with your new password.",
    ))
}

// ============================================================================
// Profile
// ============================================================================

fn profile_not_found() -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("User"),
        message: String::from("User not found"),
    }
}

/// Returns the caller's profile.
///
/// # Errors
///
/// Returns an error if the account no longer exists.
pub fn get_profile(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<UserProfile, ApiError> {
    let user: User = persistence
        .get_user_by_id(actor.user_id)
        .map_err(|e| translate_persistence_error("Failed to fetch profile", &e))?
        .ok_or_else(profile_not_found)?;
    Ok(UserProfile::from(&user))
}

/// Applies a partial edit to the caller's profile.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `actor` - The authenticated actor
/// * `request` - The fields to change
///
/// # Errors
///
/// Returns an error if a required field is set empty, the date of birth is
/// malformed, the CNIC belongs to another account, or the account no longer
/// exists.
pub fn update_profile(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &UpdateProfileRequest,
) -> Result<UserProfile, ApiError> {
    let date_of_birth: Option<Date> = request
        .date_of_birth
        .as_deref()
        .map(parse_date_of_birth)
        .transpose()
        .map_err(translate_domain_error)?;

    let patch: UserProfilePatch = UserProfilePatch {
        first_name: trimmed(request.first_name.as_ref()),
        middle_name: trimmed(request.middle_name.as_ref()),
        last_name: trimmed(request.last_name.as_ref()),
        father_name: trimmed(request.father_name.as_ref()),
        phone_number: trimmed(request.phone_number.as_ref()),
        date_of_birth,
        cnic: trimmed(request.cnic.as_ref()),
        avatar_url: trimmed(request.avatar_url.as_ref()),
    };
    validate_profile_patch(&patch).map_err(translate_domain_error)?;

    let user: User = persistence
        .update_user_profile(actor.user_id, &patch)
        .map_err(|e| {
            if e.is_unique_violation_on("users.cnic") {
                ApiError::DomainRuleViolation {
                    rule: String::from("unique_cnic"),
                    message: String::from("CNIC already in use"),
                }
            } else {
                translate_persistence_error("Failed to update profile", &e)
            }
        })?
        .ok_or_else(profile_not_found)?;

    info!(user_id = user.user_id, "Profile updated");
    Ok(UserProfile::from(&user))
}

// ============================================================================
// Zones
// ============================================================================

fn zone_not_found(zone_id: i64) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("Zone"),
        message: format!("Zone {zone_id} not found"),
    }
}

/// Creates a zone owned by the caller.
///
/// # Errors
///
/// Returns an error if the caller is not a landowner, the name is missing,
/// or the total area is negative.
pub fn create_zone(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &CreateZoneRequest,
) -> Result<ZoneInfo, ApiError> {
    AuthorizationService::require_landowner(actor, "manage zones")?;

    let zone: NewZone = NewZone {
        name: required("name", request.name.as_ref())?,
        location: trimmed(request.location.as_ref()).unwrap_or_default(),
        total_area: request.total_area.unwrap_or(0.0),
        description: trimmed(request.description.as_ref()).unwrap_or_default(),
    };
    validate_new_zone(&zone).map_err(translate_domain_error)?;

    let created: Zone = persistence
        .create_zone(actor.user_id, &zone)
        .map_err(|e| translate_persistence_error("Failed to create zone", &e))?;

    info!(zone_id = created.zone_id, landowner_id = actor.user_id, "Zone created");
    Ok(created.into())
}

/// Lists the caller's zones, newest first.
///
/// # Errors
///
/// Returns an error if the caller is not a landowner.
pub fn list_zones(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    query: &ListQuery,
) -> Result<Vec<ZoneInfo>, ApiError> {
    AuthorizationService::require_landowner(actor, "manage zones")?;

    let zones: Vec<Zone> = persistence
        .list_zones(
            actor.user_id,
            resolve_name_filter(query.q.as_ref()),
            resolve_limit(query.limit.as_deref()),
        )
        .map_err(|e| translate_persistence_error("Failed to fetch zones", &e))?;

    Ok(zones.into_iter().map(ZoneInfo::from).collect())
}

/// Applies a partial edit to one of the caller's zones.
///
/// # Errors
///
/// Returns an error if the caller is not a landowner, a field is invalid,
/// or the caller owns no such zone.
pub fn update_zone(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    zone_id: i64,
    request: &UpdateZoneRequest,
) -> Result<ZoneInfo, ApiError> {
    AuthorizationService::require_landowner(actor, "manage zones")?;

    let patch: ZonePatch = ZonePatch {
        name: trimmed(request.name.as_ref()),
        location: trimmed(request.location.as_ref()),
        total_area: request.total_area,
        description: trimmed(request.description.as_ref()),
    };
    validate_zone_patch(&patch).map_err(translate_domain_error)?;

    let zone: Zone = persistence
        .update_zone(zone_id, actor.user_id, &patch)
        .map_err(|e| translate_persistence_error("Failed to update zone", &e))?
        .ok_or_else(|| zone_not_found(zone_id))?;

    info!(zone_id, landowner_id = actor.user_id, "Zone updated");
    Ok(zone.into())
}

/// Deletes one of the caller's zones.
///
/// Assignments that reference the zone are kept.
///
/// # Errors
///
/// Returns an error if the caller is not a landowner or owns no such zone.
pub fn delete_zone(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    zone_id: i64,
) -> Result<SuccessResponse, ApiError> {
    AuthorizationService::require_landowner(actor, "manage zones")?;

    let deleted: bool = persistence
        .delete_zone(zone_id, actor.user_id)
        .map_err(|e| translate_persistence_error("Failed to delete zone", &e))?;
    if !deleted {
        return Err(zone_not_found(zone_id));
    }

    info!(zone_id, landowner_id = actor.user_id, "Zone deleted");
    Ok(SuccessResponse { success: true })
}

// ============================================================================
// Crops
// ============================================================================

fn crop_not_found(crop_id: i64) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("Crop"),
        message: format!("Crop {crop_id} not found"),
    }
}

/// Creates a crop owned by the caller.
///
/// # Errors
///
/// Returns an error if the caller is not a landowner or the name is missing.
pub fn create_crop(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &CreateCropRequest,
) -> Result<CropInfo, ApiError> {
    AuthorizationService::require_landowner(actor, "manage crops")?;

    let crop: NewCrop = NewCrop {
        name: required("name", request.name.as_ref())?,
        crop_type: trimmed(request.crop_type.as_ref()).unwrap_or_default(),
        season: trimmed(request.season.as_ref()).unwrap_or_default(),
    };
    validate_new_crop(&crop).map_err(translate_domain_error)?;

    let created: Crop = persistence
        .create_crop(actor.user_id, &crop)
        .map_err(|e| translate_persistence_error("Failed to create crop", &e))?;

    info!(crop_id = created.crop_id, landowner_id = actor.user_id, "Crop created");
    Ok(created.into())
}

/// Lists the caller's crops, newest first.
///
/// # Errors
///
/// Returns an error if the caller is not a landowner.
pub fn list_crops(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    query: &ListQuery,
) -> Result<Vec<CropInfo>, ApiError> {
    AuthorizationService::require_landowner(actor, "manage crops")?;

    let crops: Vec<Crop> = persistence
        .list_crops(
            actor.user_id,
            resolve_name_filter(query.q.as_ref()),
            resolve_limit(query.limit.as_deref()),
        )
        .map_err(|e| translate_persistence_error("Failed to fetch crops", &e))?;

    Ok(crops.into_iter().map(CropInfo::from).collect())
}

/// Applies a partial edit to one of the caller's crops.
///
/// # Errors
///
/// Returns an error if the caller is not a landowner, the name is set
/// empty, or the caller owns no such crop.
pub fn update_crop(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    crop_id: i64,
    request: &UpdateCropRequest,
) -> Result<CropInfo, ApiError> {
    AuthorizationService::require_landowner(actor, "manage crops")?;

    let patch: CropPatch = CropPatch {
        name: trimmed(request.name.as_ref()),
        crop_type: trimmed(request.crop_type.as_ref()),
        season: trimmed(request.season.as_ref()),
    };
    validate_crop_patch(&patch).map_err(translate_domain_error)?;

    let crop: Crop = persistence
        .update_crop(crop_id, actor.user_id, &patch)
        .map_err(|e| translate_persistence_error("Failed to update crop", &e))?
        .ok_or_else(|| crop_not_found(crop_id))?;

    info!(crop_id, landowner_id = actor.user_id, "Crop updated");
    Ok(crop.into())
}

/// Deletes one of the caller's crops.
///
/// Assignments that reference the crop are kept.
///
/// # Errors
///
/// Returns an error if the caller is not a landowner or owns no such crop.
pub fn delete_crop(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    crop_id: i64,
) -> Result<SuccessResponse, ApiError> {
    AuthorizationService::require_landowner(actor, "manage crops")?;

    let deleted: bool = persistence
        .delete_crop(crop_id, actor.user_id)
        .map_err(|e| translate_persistence_error("Failed to delete crop", &e))?;
    if !deleted {
        return Err(crop_not_found(crop_id));
    }

    info!(crop_id, landowner_id = actor.user_id, "Crop deleted");
    Ok(SuccessResponse { success: true })
}

// ============================================================================
// Haris
// ============================================================================

/// Lists every hari account.
///
/// # Errors
///
/// Returns an error if the caller is not a landowner.
pub fn list_haris(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<Vec<HariInfo>, ApiError> {
    AuthorizationService::require_landowner(actor, "list haris")?;

    let haris: Vec<HariSummary> = persistence
        .list_haris()
        .map_err(|e| translate_persistence_error("Failed to fetch haris", &e))?;

    Ok(haris.into_iter().map(HariInfo::from).collect())
}

// ============================================================================
// Assignments
// ============================================================================

/// Assigns a hari to one of the caller's zones and crops.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not a landowner
/// - `hariId`, `zoneId` or `cropId` is missing, or `status` is unknown
/// - A reference fails the ownership check
/// - The hari already holds an active or pending assignment in the zone
pub fn create_assignment(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &CreateAssignmentRequest,
) -> Result<AssignmentInfo, ApiError> {
    authorize_assignment_write(&actor.to_caller(), AssignmentAction::Create)
        .map_err(translate_core_error)?;

    let create: CreateAssignment = CreateAssignment {
        hari_id: request.hari_id,
        zone_id: request.zone_id,
        crop_id: request.crop_id,
        status: parse_status(request.status.as_ref())?,
    };

    let assignment: Assignment =
        create_assignment_rule(persistence, &actor.to_caller(), create).map_err(|e| {
            warn!(landowner_id = actor.user_id, error = %e, "Assignment rejected");
            translate_core_error(e)
        })?;

    info!(
        assignment_id = assignment.assignment_id,
        landowner_id = assignment.landowner_id,
        hari_id = assignment.hari_id,
        zone_id = assignment.zone_id,
        status = assignment.status.as_str(),
        "Assignment created"
    );
    Ok(assignment.into())
}

/// Lists assignments visible to the caller.
///
/// A landowner sees all of their assignments, newest first. A hari sees
/// their own active and pending assignments.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn list_assignments(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<Vec<AssignmentDetailInfo>, ApiError> {
    let details: Vec<AssignmentDetail> =
        agrizone::list_assignments(persistence, &actor.to_caller()).map_err(translate_core_error)?;

    debug!(
        user_id = actor.user_id,
        role = actor.role.as_str(),
        count = details.len(),
        "Listed assignments"
    );
    Ok(details.into_iter().map(AssignmentDetailInfo::from).collect())
}

/// Applies a partial edit to one of the caller's assignments.
///
/// # Errors
///
/// Returns an error if the caller is not a landowner, `status` is unknown,
/// a new zone or crop fails the ownership check, the assignment does not
/// exist under the caller, or the edit would give the hari a second
/// unresolved assignment in the zone.
pub fn update_assignment(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    assignment_id: i64,
    request: &UpdateAssignmentRequest,
) -> Result<AssignmentInfo, ApiError> {
    authorize_assignment_write(&actor.to_caller(), AssignmentAction::Update)
        .map_err(translate_core_error)?;

    let patch: AssignmentPatch = AssignmentPatch {
        zone_id: request.zone_id,
        crop_id: request.crop_id,
        status: parse_status(request.status.as_ref())?,
    };

    let assignment: Assignment =
        agrizone::update_assignment(persistence, &actor.to_caller(), assignment_id, patch)
            .map_err(|e| {
                warn!(assignment_id, error = %e, "Assignment update rejected");
                translate_core_error(e)
            })?;

    info!(
        assignment_id,
        status = assignment.status.as_str(),
        "Assignment updated"
    );
    Ok(assignment.into())
}

/// Deletes one of the caller's assignments.
///
/// # Errors
///
/// Returns an error if the caller is not a landowner or the assignment does
/// not exist under the caller.
pub fn delete_assignment(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    assignment_id: i64,
) -> Result<SuccessResponse, ApiError> {
    agrizone::delete_assignment(persistence, &actor.to_caller(), assignment_id)
        .map_err(translate_core_error)?;

    info!(assignment_id, landowner_id = actor.user_id, "Assignment deleted");
    Ok(SuccessResponse { success: true })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_limit() {
        assert_eq!(resolve_limit(None), DEFAULT_LIST_LIMIT);
        assert_eq!(resolve_limit(Some("25")), 25);
        assert_eq!(resolve_limit(Some(" 7 ")), 7);
        assert_eq!(resolve_limit(Some("0")), DEFAULT_LIST_LIMIT);
        assert_eq!(resolve_limit(Some("-3")), DEFAULT_LIST_LIMIT);
        assert_eq!(resolve_limit(Some("ten")), DEFAULT_LIST_LIMIT);
    }

    #[test]
    fn test_resolve_name_filter_ignores_blank() {
        let blank: String = String::from("   ");
        let term: String = String::from(" wheat ");

        assert_eq!(resolve_name_filter(None), None);
        assert_eq!(resolve_name_filter(Some(&blank)), None);
        assert_eq!(resolve_name_filter(Some(&term)), Some("wheat"));
    }

    #[test]
    fn test_parse_status() {
        let pending: String = String::from("pending");
        let bogus: String = String::from("archived");

        assert_eq!(parse_status(None), Ok(None));
        assert_eq!(
            parse_status(Some(&pending)),
            Ok(Some(AssignmentStatus::Pending))
        );
        assert!(matches!(
            parse_status(Some(&bogus)),
            Err(ApiError::InvalidInput { ref field, .. }) if field == "status"
        ));
    }
}
