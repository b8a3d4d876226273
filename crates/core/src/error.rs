// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::path::PathBuf;

use staffload_domain::DomainError;

/// Errors raised while reading source data or configuration.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A domain rule was violated (including missing source columns).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV reader or writer failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The Excel reader failed.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// The workbook does not contain a worksheet to read.
    #[error("Workbook {0} contains no worksheets")]
    EmptyWorkbook(PathBuf),

    /// The configuration file could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A configuration value is out of range.
    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidConfigValue {
        /// The offending setting.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl CoreError {
    /// Returns the missing source column names if this is a schema error.
    #[must_use]
    pub fn missing_columns(&self) -> Option<&[String]> {
        match self {
            Self::Domain(DomainError::MissingColumns { missing }) => Some(missing),
            _ => None,
        }
    }
}
