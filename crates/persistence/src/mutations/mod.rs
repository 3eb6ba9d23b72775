// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! ## Module Organization
//!
//! - `users` — Account creation, profile edits, password changes
//! - `sessions` — Login sessions and password reset codes
//! - `zones` — Zones and crops
//! - `assignments` — Assignment writes
//!
//! Mutations use Diesel DSL. New row IDs come from
//! `connection::last_insert_rowid`.

pub mod assignments;
pub mod sessions;
pub mod users;
pub mod zones;
