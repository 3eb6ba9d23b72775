// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! ## Module Organization
//!
//! - `users` — Users, credentials, role checks, the hari directory
//! - `sessions` — Login sessions and password reset codes
//! - `zones` — Zones and crops, including ownership checks
//! - `assignments` — Assignment lookups, conflict probes, enriched listings

pub mod assignments;
pub mod sessions;
pub mod users;
pub mod zones;
