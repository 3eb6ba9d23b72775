// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Field names are camelCase on the wire. Request fields are optional so
//! that a missing field is reported by the handler with a field-specific
//! message rather than as a deserialization failure.

use serde::{Deserialize, Serialize};

use agrizone_domain::{
    Assignment, AssignmentDetail, Crop, CropSummary, HariSummary, User, Zone, ZoneSummary,
};

// ============================================================================
// Accounts
// ============================================================================

/// API request to create an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub father_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    /// Calendar date, `YYYY-MM-DD`.
    pub date_of_birth: Option<String>,
    pub cnic: Option<String>,
    /// `hari` or `landowner`.
    pub user_type: Option<String>,
}

/// API request to sign in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigninRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    /// The role the client expects the account to have.
    pub user_type: Option<String>,
}

/// The public view of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub father_name: String,
    pub phone_number: String,
    pub email: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date_of_birth: String,
    pub cnic: String,
    pub user_type: String,
    pub avatar_url: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id,
            first_name: user.first_name.clone(),
            middle_name: user.middle_name.clone(),
            last_name: user.last_name.clone(),
            father_name: user.father_name.clone(),
            phone_number: user.phone_number.clone(),
            email: user.email.clone(),
            date_of_birth: user.date_of_birth.to_string(),
            cnic: user.cnic.clone(),
            user_type: user.user_type.as_str().to_string(),
            avatar_url: user.avatar_url.clone(),
        }
    }
}

/// API response for a successful signup or signin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// A success message.
    pub message: String,
    /// The opaque session token for the `Authorization: Bearer` header.
    pub token: String,
    /// When the session token stops being accepted (ISO 8601).
    pub expires_at: String,
    /// The signed-in account.
    pub user: UserProfile,
}

// ============================================================================
// Password reset
// ============================================================================

/// API request to start a password reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    pub email: Option<String>,
}

/// API request to check a reset code without using it for a reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    pub email: Option<String>,
    pub otp: Option<String>,
}

/// API request to replace a password using a reset code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: Option<String>,
    pub otp: Option<String>,
    pub new_password: Option<String>,
}

/// A response carrying only a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    #[must_use]
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// A response acknowledging a deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

// ============================================================================
// Profile
// ============================================================================

/// API request to edit the caller's profile. Absent fields are untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub father_name: Option<String>,
    pub phone_number: Option<String>,
    pub date_of_birth: Option<String>,
    pub cnic: Option<String>,
    pub avatar_url: Option<String>,
}

// ============================================================================
// Zones and crops
// ============================================================================

/// Query parameters accepted by the zone and crop listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive substring to match against the name.
    pub q: Option<String>,
    /// Maximum number of records. Kept as text so a malformed value falls
    /// back to the default instead of rejecting the request.
    pub limit: Option<String>,
}

/// API request to create a zone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateZoneRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    pub total_area: Option<f64>,
    pub description: Option<String>,
}

/// API request to edit a zone. Absent fields are untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateZoneRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    pub total_area: Option<f64>,
    pub description: Option<String>,
}

/// A zone as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneInfo {
    pub id: i64,
    pub landowner_id: i64,
    pub name: String,
    pub location: String,
    pub total_area: f64,
    pub description: String,
    pub created_at: String,
}

impl From<Zone> for ZoneInfo {
    fn from(zone: Zone) -> Self {
        Self {
            id: zone.zone_id,
            landowner_id: zone.landowner_id,
            name: zone.name,
            location: zone.location,
            total_area: zone.total_area,
            description: zone.description,
            created_at: zone.created_at,
        }
    }
}

/// API request to create a crop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCropRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub crop_type: Option<String>,
    pub season: Option<String>,
}

/// API request to edit a crop. Absent fields are untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCropRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub crop_type: Option<String>,
    pub season: Option<String>,
}

/// A crop as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropInfo {
    pub id: i64,
    pub landowner_id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub crop_type: String,
    pub season: String,
    pub created_at: String,
}

impl From<Crop> for CropInfo {
    fn from(crop: Crop) -> Self {
        Self {
            id: crop.crop_id,
            landowner_id: crop.landowner_id,
            name: crop.name,
            crop_type: crop.crop_type,
            season: crop.season,
            created_at: crop.created_at,
        }
    }
}

// ============================================================================
// Haris
// ============================================================================

/// The contact details of a hari.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HariInfo {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
}

impl From<HariSummary> for HariInfo {
    fn from(hari: HariSummary) -> Self {
        Self {
            id: hari.user_id,
            first_name: hari.first_name,
            last_name: hari.last_name,
            email: hari.email,
            phone_number: hari.phone_number,
        }
    }
}

// ============================================================================
// Assignments
// ============================================================================

/// API request to create an assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssignmentRequest {
    pub hari_id: Option<i64>,
    pub zone_id: Option<i64>,
    pub crop_id: Option<i64>,
    /// Defaults to `active`.
    pub status: Option<String>,
}

/// API request to edit an assignment. Absent fields are untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssignmentRequest {
    pub zone_id: Option<i64>,
    pub crop_id: Option<i64>,
    pub status: Option<String>,
}

/// An assignment as stored: identifiers only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentInfo {
    pub id: i64,
    pub landowner_id: i64,
    pub hari_id: i64,
    pub zone_id: i64,
    pub crop_id: i64,
    pub status: String,
    pub assigned_date: String,
}

impl From<Assignment> for AssignmentInfo {
    fn from(assignment: Assignment) -> Self {
        Self {
            id: assignment.assignment_id,
            landowner_id: assignment.landowner_id,
            hari_id: assignment.hari_id,
            zone_id: assignment.zone_id,
            crop_id: assignment.crop_id,
            status: assignment.status.as_str().to_string(),
            assigned_date: assignment.assigned_date,
        }
    }
}

/// The zone fields joined into an assignment listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRef {
    pub id: i64,
    pub name: String,
}

/// The crop fields joined into an assignment listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRef {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub crop_type: String,
    pub season: String,
}

/// An assignment enriched for listing.
///
/// A summary is `null` when the referenced record no longer exists, and
/// `hari` is always `null` in a hari's own listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentDetailInfo {
    #[serde(flatten)]
    pub assignment: AssignmentInfo,
    pub hari: Option<HariInfo>,
    pub zone: Option<ZoneRef>,
    pub crop: Option<CropRef>,
}

impl From<AssignmentDetail> for AssignmentDetailInfo {
    fn from(detail: AssignmentDetail) -> Self {
        Self {
            assignment: detail.assignment.into(),
            hari: detail.hari.map(HariInfo::from),
            zone: detail
                .zone
                .map(|ZoneSummary { zone_id, name }| ZoneRef { id: zone_id, name }),
            crop: detail.crop.map(
                |CropSummary {
                     crop_id,
                     name,
                     crop_type,
                     season,
                 }| CropRef {
                    id: crop_id,
                    name,
                    crop_type,
                    season,
                },
            ),
        }
    }
}

// ============================================================================
// Health
// ============================================================================

/// API response for the liveness probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}
