// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment integrity rules.
//!
//! An assignment binds one hari to one zone and one crop under one
//! landowner. This crate decides whether such a binding may be written:
//!
//! - [`validate_ownership`] confirms every referenced record exists and
//!   belongs to the right landowner or carries the right role.
//! - [`has_conflict`] detects an unresolved binding of the same hari to the
//!   same zone.
//! - The lifecycle functions ([`create_assignment`], [`list_assignments`],
//!   [`update_assignment`], [`delete_assignment`]) run the role gate and
//!   both checks before touching the store.
//!
//! Storage is reached only through the [`AssignmentStore`] trait. A unique
//! violation reported by the store is always surfaced as
//! [`CoreError::Conflict`]: the pre-write conflict check narrows the race
//! window, the storage constraint closes it.

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

mod caller;
mod conflict;
mod error;
mod lifecycle;
mod ownership;
mod store;

#[cfg(test)]
mod tests;

pub use caller::{AssignmentAction, Caller, authorize_assignment_write};
pub use conflict::has_conflict;
pub use error::CoreError;
pub use lifecycle::{
    CreateAssignment, create_assignment, delete_assignment, list_assignments, update_assignment,
};
pub use ownership::validate_ownership;
pub use store::{AssignmentStore, StoreError};
