// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::SourceField;

/// Errors raised while turning raw source data into domain values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// One or more required source columns are absent.
    ///
    /// This is fatal for the whole batch: no row is processed.
    #[error("Missing required source columns: {}", .missing.join(", "))]
    MissingColumns {
        /// The source header names that could not be found.
        missing: Vec<String>,
    },
    /// A cell could not be coerced into its typed representation.
    ///
    /// Callers resolve this to a null value and keep the row.
    #[error("Cannot coerce {field} value '{value}': {reason}")]
    Coercion {
        /// The logical field being coerced.
        field: SourceField,
        /// The raw cell text.
        value: String,
        /// Why coercion failed.
        reason: String,
    },
    /// The configured date format description is invalid.
    #[error("Invalid date format '{format}': {reason}")]
    InvalidDateFormat {
        /// The format description as configured.
        format: String,
        /// The parser's complaint.
        reason: String,
    },
}
