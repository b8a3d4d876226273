// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Run configuration.
//!
//! The configuration file is JSON. Every setting has a default, so an empty
//! object (or no file at all) describes the standard HR export:
//!
//! ```json
//! {
//!     "source_columns": { "age": "Leeftijd" },
//!     "date_format": "[day padding:none]-[month padding:none]-[year]",
//!     "chunk_size": 100000,
//!     "lookup": { "max_attempts": 3, "base_delay_ms": 1000 }
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use staffload_domain::DateFormat;
use tracing::info;

use crate::columns::ColumnMapping;
use crate::error::CoreError;

/// Default number of source rows normalized and loaded together.
pub const DEFAULT_CHUNK_SIZE: usize = 100_000;

/// Retry policy for the reference data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Delay before the first retry; doubled for every further retry.
    pub base_delay_ms: u64,
}

impl Default for LookupPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1000,
        }
    }
}

impl LookupPolicy {
    /// Returns the base delay as a `Duration`.
    #[must_use]
    pub const fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }
}

/// Settings for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EtlConfig {
    pub source_columns: ColumnMapping,
    pub date_format: DateFormat,
    pub chunk_size: usize,
    pub lookup: LookupPolicy,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            source_columns: ColumnMapping::default(),
            date_format: DateFormat::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            lookup: LookupPolicy::default(),
        }
    }
}

impl EtlConfig {
    /// Reads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// holds out-of-range values.
    pub fn from_file(path: &Path) -> Result<Self, CoreError> {
        info!("Loading configuration from {}", path.display());
        let text: String = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parses and validates a configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid JSON or holds
    /// out-of-range values.
    pub fn from_json(text: &str) -> Result<Self, CoreError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns an error if the chunk size or attempt count is zero.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.chunk_size == 0 {
            return Err(CoreError::InvalidConfigValue {
                field: "chunk_size",
                reason: String::from("must be greater than 0"),
            });
        }

        if self.lookup.max_attempts == 0 {
            return Err(CoreError::InvalidConfigValue {
                field: "lookup.max_attempts",
                reason: String::from("must be greater than 0"),
            });
        }

        Ok(())
    }
}
