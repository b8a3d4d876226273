// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reading side of the staffload pipeline.
//!
//! Source files are read in bounded chunks ([`SourceReader`]), each chunk is
//! validated and normalized into unique employees plus attendance candidates
//! ([`Normalizer`]), and work-location reference data comes from one of the
//! [`LocationProvider`](staffload_domain::LocationProvider) implementations
//! in this crate. Persisting the result is the job of
//! `staffload-persistence`.

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

mod columns;
mod config;
mod error;
mod locations;
mod normalize;
mod source;

#[cfg(test)]
mod tests;

pub use columns::{ColumnIndex, ColumnMapping};
pub use config::{DEFAULT_CHUNK_SIZE, EtlConfig, LookupPolicy};
pub use error::CoreError;
pub use locations::{JsonFileLocationProvider, RetryingLocationProvider, StaticLocationProvider};
pub use normalize::{Normalizer, reshape};
pub use source::{
    CsvChunkReader, RawChunk, SourceReader, XlsxChunkReader, convert_xlsx_to_csv, is_workbook,
};
