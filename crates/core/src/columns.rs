// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mapping of logical source fields to source column headers.

use std::collections::{BTreeMap, HashMap};

use csv::StringRecord;
use serde::{Deserialize, Serialize};
use staffload_domain::{DomainError, SourceField};

/// Source header names for the ten logical fields.
///
/// Fields not listed in the configuration keep their default header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMapping {
    overrides: BTreeMap<SourceField, String>,
}

impl ColumnMapping {
    /// Creates a mapping with a single header overridden.
    #[must_use]
    pub fn with_header(mut self, field: SourceField, header: &str) -> Self {
        self.overrides.insert(field, header.to_string());
        self
    }

    /// Returns the source header for a field.
    #[must_use]
    pub fn header(&self, field: SourceField) -> &str {
        self.overrides
            .get(&field)
            .map_or_else(|| field.default_header(), String::as_str)
    }

    /// Locates every field in a header row.
    ///
    /// Header cells are compared after trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MissingColumns`] listing every absent header
    /// if any field cannot be located.
    pub fn locate(&self, headers: &StringRecord) -> Result<ColumnIndex, DomainError> {
        // First occurrence wins for duplicated headers.
        let mut positions: HashMap<&str, usize> = HashMap::new();
        for (idx, header) in headers.iter().enumerate() {
            positions.entry(header.trim()).or_insert(idx);
        }

        let mut missing: Vec<String> = Vec::new();
        let mut index: [usize; 10] = [0; 10];

        for field in SourceField::ALL {
            let header: &str = self.header(field);
            match positions.get(header) {
                Some(&position) => index[field as usize] = position,
                None => missing.push(header.to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(DomainError::MissingColumns { missing });
        }

        Ok(ColumnIndex { positions: index })
    }
}

/// Column positions of the ten logical fields within one source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    positions: [usize; 10],
}

impl ColumnIndex {
    /// Returns the column position of a field.
    #[must_use]
    pub const fn position(&self, field: SourceField) -> usize {
        self.positions[field as usize]
    }

    /// Returns a field's cell from a row, or an empty string for a short row.
    #[must_use]
    pub fn get<'r>(&self, row: &'r StringRecord, field: SourceField) -> &'r str {
        row.get(self.position(field)).unwrap_or("")
    }
}
