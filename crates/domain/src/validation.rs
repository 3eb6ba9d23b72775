// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::crop::{CropPatch, NewCrop};
use crate::error::DomainError;
use crate::user::{NewUser, UserProfilePatch};
use crate::zone::{NewZone, ZonePatch};
use time::Date;
use time::macros::format_description;

/// Returns the trimmed value of a required text field.
///
/// # Errors
///
/// Returns `DomainError::MissingField` if the value is absent or blank.
pub fn require_field(field: &'static str, value: Option<&str>) -> Result<String, DomainError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(DomainError::MissingField { field }),
    }
}

/// Returns a required entity reference.
///
/// # Errors
///
/// Returns `DomainError::MissingField` if the reference is absent.
pub const fn require_reference(field: &'static str, value: Option<i64>) -> Result<i64, DomainError> {
    match value {
        Some(id) => Ok(id),
        None => Err(DomainError::MissingField { field }),
    }
}

/// Normalizes an email address for storage and lookup.
///
/// Emails are trimmed and lowercased so uniqueness is case-insensitive.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Parses a date of birth.
///
/// Accepts a calendar date (`YYYY-MM-DD`). A trailing time component
/// (`YYYY-MM-DDTHH:MM:SS...`) is ignored so clients may send full ISO 8601
/// timestamps.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the date portion is not a valid
/// calendar date.
pub fn parse_date_of_birth(value: &str) -> Result<Date, DomainError> {
    let trimmed: &str = value.trim();
    let date_part: &str = trimmed.split('T').next().unwrap_or(trimmed);

    Date::parse(date_part, format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        }
    })
}

/// Validates a user account before it is persisted.
///
/// This does NOT check email or CNIC uniqueness; that requires the store.
///
/// # Errors
///
/// Returns an error if:
/// - Any required name, phone, email or CNIC field is empty
/// - The email has no `@` or nothing on either side of it
pub fn validate_new_user(user: &NewUser) -> Result<(), DomainError> {
    let required: [(&'static str, &str); 6] = [
        ("firstName", &user.first_name),
        ("lastName", &user.last_name),
        ("fatherName", &user.father_name),
        ("phoneNumber", &user.phone_number),
        ("email", &user.email),
        ("cnic", &user.cnic),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(DomainError::MissingField { field });
        }
    }

    validate_email(&user.email)
}

fn validate_email(email: &str) -> Result<(), DomainError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(DomainError::InvalidEmail(email.to_string())),
    }
}

/// Validates a profile edit.
///
/// # Errors
///
/// Returns `DomainError::EmptyField` if a name, phone or CNIC field is
/// supplied but empty. Middle name and avatar may be cleared.
pub fn validate_profile_patch(patch: &UserProfilePatch) -> Result<(), DomainError> {
    let non_clearable: [(&'static str, Option<&String>); 5] = [
        ("firstName", patch.first_name.as_ref()),
        ("lastName", patch.last_name.as_ref()),
        ("fatherName", patch.father_name.as_ref()),
        ("phoneNumber", patch.phone_number.as_ref()),
        ("cnic", patch.cnic.as_ref()),
    ];
    for (field, value) in non_clearable {
        if value.is_some_and(|v| v.trim().is_empty()) {
            return Err(DomainError::EmptyField { field });
        }
    }
    Ok(())
}

fn validate_total_area(total_area: f64) -> Result<(), DomainError> {
    // Rule: area must be a finite, non-negative number
    if !total_area.is_finite() || total_area < 0.0 {
        return Err(DomainError::InvalidTotalArea(total_area.to_string()));
    }
    Ok(())
}

/// Validates a zone before it is persisted.
///
/// # Errors
///
/// Returns an error if the name is empty or the total area is negative.
pub fn validate_new_zone(zone: &NewZone) -> Result<(), DomainError> {
    if zone.name.trim().is_empty() {
        return Err(DomainError::MissingField { field: "name" });
    }
    validate_total_area(zone.total_area)
}

/// Validates a zone edit.
///
/// # Errors
///
/// Returns an error if the name is supplied but empty, or the total area is
/// supplied and negative.
pub fn validate_zone_patch(patch: &ZonePatch) -> Result<(), DomainError> {
    if patch.name.as_ref().is_some_and(|n| n.trim().is_empty()) {
        return Err(DomainError::EmptyField { field: "name" });
    }
    if let Some(total_area) = patch.total_area {
        validate_total_area(total_area)?;
    }
    Ok(())
}

/// Validates a crop before it is persisted.
///
/// # Errors
///
/// Returns an error if the name is empty.
pub fn validate_new_crop(crop: &NewCrop) -> Result<(), DomainError> {
    if crop.name.trim().is_empty() {
        return Err(DomainError::MissingField { field: "name" });
    }
    Ok(())
}

/// Validates a crop edit.
///
/// # Errors
///
/// Returns an error if the name is supplied but empty.
pub fn validate_crop_patch(patch: &CropPatch) -> Result<(), DomainError> {
    if patch.name.as_ref().is_some_and(|n| n.trim().is_empty()) {
        return Err(DomainError::EmptyField { field: "name" });
    }
    Ok(())
}
