// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain model for the staffload source-to-OLTP pipeline.
//!
//! This crate holds the types that flow between the record normalizer and
//! the relational loader, the field coercion rules applied to raw source
//! cells, and the contract for the work-location reference data provider.
//!
//! Nothing in this crate performs I/O.

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
#![allow(clippy::multiple_crate_versions)]

mod coercion;
mod error;
mod location;
mod provider;
mod types;

#[cfg(test)]
mod tests;

pub use coercion::{DateFormat, coerce_absence, coerce_age, coerce_date, coerce_in_training};
pub use error::DomainError;
pub use location::{
    PLACEHOLDER_ADDRESS, ResolvedLocation, distinct_location_names, resolve_locations,
    split_location_label,
};
pub use provider::{LocationProvider, LookupError};
pub use types::{
    AttendanceCandidate, EmployeeIdentity, LocationDetails, NormalizedBatch, RawRecord,
    SourceField,
};
