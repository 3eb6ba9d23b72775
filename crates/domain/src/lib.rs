// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types for the AgriZone backend.
//!
//! Everything here is pure: no I/O, no clocks, no storage. Records carry
//! their canonical numeric identifiers once persisted; validation functions
//! check field-level rules that do not need any context beyond the value
//! being validated.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod assignment;
mod crop;
mod error;
mod types;
mod user;
mod validation;
mod zone;

#[cfg(test)]
mod tests;

pub use assignment::{
    Assignment, AssignmentDetail, AssignmentPatch, CropSummary, HariSummary, NewAssignment,
    ZoneSummary,
};
pub use crop::{Crop, CropPatch, NewCrop};
pub use error::DomainError;
pub use types::{AssignmentStatus, UserType};
pub use user::{NewUser, User, UserProfilePatch};
pub use validation::{
    normalize_email, parse_date_of_birth, require_field, require_reference, validate_crop_patch,
    validate_new_crop, validate_new_user, validate_new_zone, validate_profile_patch,
    validate_zone_patch,
};
pub use zone::{NewZone, Zone, ZonePatch};
