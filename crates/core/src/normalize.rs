// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The record normalizer.
//!
//! Turns a chunk of per-day source rows into the unique employees it
//! mentions plus one attendance candidate per row.

use std::collections::HashSet;

use csv::StringRecord;
use staffload_domain::{
    AttendanceCandidate, DateFormat, DomainError, EmployeeIdentity, NormalizedBatch, RawRecord,
    SourceField, coerce_absence, coerce_age, coerce_date, coerce_in_training,
};
use tracing::{debug, warn};

use crate::columns::{ColumnIndex, ColumnMapping};
use crate::config::EtlConfig;
use crate::source::RawChunk;

/// Parses and reshapes source chunks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalizer {
    columns: ColumnMapping,
    date_format: DateFormat,
}

impl Normalizer {
    #[must_use]
    pub const fn new(columns: ColumnMapping, date_format: DateFormat) -> Self {
        Self {
            columns,
            date_format,
        }
    }

    /// Creates a normalizer from the run configuration.
    #[must_use]
    pub fn from_config(config: &EtlConfig) -> Self {
        Self::new(config.source_columns.clone(), config.date_format.clone())
    }

    /// Checks that a header row provides every logical field.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MissingColumns`] naming every absent header.
    pub fn validate_headers(&self, headers: &StringRecord) -> Result<ColumnIndex, DomainError> {
        self.columns.locate(headers)
    }

    /// Normalizes one chunk.
    ///
    /// Headers are validated before any row is looked at. Cells that cannot
    /// be coerced are logged and treated as null; the row is kept.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MissingColumns`] if the chunk's header row
    /// lacks a required field.
    pub fn normalize(&self, chunk: &RawChunk) -> Result<NormalizedBatch, DomainError> {
        let index: ColumnIndex = self.validate_headers(&chunk.headers)?;

        let records: Vec<RawRecord> = chunk
            .rows
            .iter()
            .enumerate()
            .map(|(offset, row)| self.parse_row(&index, row, chunk.first_row + offset))
            .collect();

        let batch: NormalizedBatch = reshape(records);
        debug!(
            rows = chunk.rows.len(),
            employees = batch.employees.len(),
            absences = batch.absence_count(),
            "Normalized chunk"
        );
        Ok(batch)
    }

    fn parse_row(&self, index: &ColumnIndex, row: &StringRecord, row_number: usize) -> RawRecord {
        let cell = |field: SourceField| index.get(row, field);

        RawRecord {
            gender: cell(SourceField::Gender).to_string(),
            age: recover(row_number, coerce_age(cell(SourceField::Age))),
            contract_hours: cell(SourceField::ContractHours).to_string(),
            in_training: recover(
                row_number,
                coerce_in_training(cell(SourceField::InTraining)),
            ),
            is_absent: recover(row_number, coerce_absence(cell(SourceField::IsAbsent))),
            expertise: cell(SourceField::Expertise).to_string(),
            hire_date: self.date(row_number, SourceField::HireDate, cell(SourceField::HireDate)),
            date: self.date(row_number, SourceField::Date, cell(SourceField::Date)),
            end_date: self.date(row_number, SourceField::EndDate, cell(SourceField::EndDate)),
            work_location: cell(SourceField::WorkLocation).to_string(),
        }
    }

    fn date(&self, row_number: usize, field: SourceField, raw: &str) -> Option<time::Date> {
        recover(row_number, coerce_date(field, raw, &self.date_format))
    }
}

/// Logs a coercion failure and falls back to the field's null value.
fn recover<T: Default>(row_number: usize, result: Result<T, DomainError>) -> T {
    result.unwrap_or_else(|e| {
        warn!(row = row_number, error = %e, "Coercion failed, treating value as null");
        T::default()
    })
}

/// Splits typed records into unique employees and attendance candidates.
///
/// Employees keep first-seen order; candidates keep row order.
#[must_use]
pub fn reshape(records: Vec<RawRecord>) -> NormalizedBatch {
    let mut seen: HashSet<EmployeeIdentity> = HashSet::new();
    let mut employees: Vec<EmployeeIdentity> = Vec::new();
    let mut attendance: Vec<AttendanceCandidate> = Vec::with_capacity(records.len());

    for record in records {
        let identity: EmployeeIdentity = record.identity();
        if seen.insert(identity.clone()) {
            employees.push(identity.clone());
        }

        attendance.push(AttendanceCandidate {
            employee: identity,
            date: record.date,
            is_absent: record.is_absent,
        });
    }

    NormalizedBatch {
        employees,
        attendance,
    }
}
