// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `counts`: Table row counts
//! - `lookups`: Work-location and per-employee lookups
//!
//! All query functions are generated in `_sqlite` and `_mysql` variants;
//! the `Persistence` adapter dispatches on the active connection.

pub mod counts;
pub mod lookups;
