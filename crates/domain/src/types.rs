// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::location::split_location_label;

/// The ten logical fields every source table must provide.
///
/// The source header each field is read from is configurable; the set of
/// fields is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceField {
    Gender,
    Age,
    ContractHours,
    InTraining,
    IsAbsent,
    Expertise,
    HireDate,
    Date,
    EndDate,
    WorkLocation,
}

impl SourceField {
    /// All logical fields, in canonical order.
    pub const ALL: [Self; 10] = [
        Self::Gender,
        Self::Age,
        Self::ContractHours,
        Self::InTraining,
        Self::IsAbsent,
        Self::Expertise,
        Self::HireDate,
        Self::Date,
        Self::EndDate,
        Self::WorkLocation,
    ];

    /// Returns the internal (snake case) name of this field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gender => "gender",
            Self::Age => "age",
            Self::ContractHours => "contract_hours",
            Self::InTraining => "in_training",
            Self::IsAbsent => "is_absent",
            Self::Expertise => "expertise",
            Self::HireDate => "hire_date",
            Self::Date => "date",
            Self::EndDate => "end_date",
            Self::WorkLocation => "work_location",
        }
    }

    /// Returns the source header used when no mapping overrides it.
    ///
    /// These are the headers of the HR spreadsheet export.
    #[must_use]
    pub const fn default_header(&self) -> &'static str {
        match self {
            Self::Gender => "Geslacht",
            Self::Age => "Leeftijd",
            Self::ContractHours => "Dienstverband/uren contract",
            Self::InTraining => "In opleiding",
            Self::IsAbsent => "Verzuim",
            Self::Expertise => "Deskundigheid",
            Self::HireDate => "Datum in dienst",
            Self::Date => "Datum",
            Self::EndDate => "Datum uit dienst",
            Self::WorkLocation => "Werklocatie",
        }
    }
}

impl std::fmt::Display for SourceField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One typed source row: one employee on one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub gender: String,
    pub age: Option<i32>,
    pub contract_hours: String,
    pub in_training: Option<bool>,
    pub is_absent: bool,
    pub expertise: String,
    pub hire_date: Option<Date>,
    pub date: Option<Date>,
    pub end_date: Option<Date>,
    /// Possibly a comma-joined list of location names.
    pub work_location: String,
}

impl RawRecord {
    /// Extracts the day-invariant fields that identify the employee.
    #[must_use]
    pub fn identity(&self) -> EmployeeIdentity {
        EmployeeIdentity {
            gender: self.gender.clone(),
            age: self.age,
            contract_hours: self.contract_hours.clone(),
            in_training: self.in_training,
            expertise: self.expertise.clone(),
            work_location: self.work_location.clone(),
            hire_date: self.hire_date,
            end_date: self.end_date,
        }
    }
}

/// The natural key of an employee.
///
/// The source carries no stable employee identifier, so two rows whose
/// identity fields are all equal denote the same employee. Equality and
/// hashing cover exactly these eight fields and nothing else; the record
/// date and absence flag are deliberately not part of the key.
///
/// Two distinct people who share every attribute collapse into one
/// employee. That is a property of the source data, not something this
/// type tries to repair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EmployeeIdentity {
    pub gender: String,
    pub age: Option<i32>,
    pub contract_hours: String,
    pub in_training: Option<bool>,
    pub expertise: String,
    pub work_location: String,
    pub hire_date: Option<Date>,
    pub end_date: Option<Date>,
}

impl EmployeeIdentity {
    /// Returns the individual location names in the work-location label.
    #[must_use]
    pub fn location_names(&self) -> Vec<&str> {
        split_location_label(&self.work_location)
    }

    /// Returns whether this employee has left the organisation.
    #[must_use]
    pub const fn has_left(&self) -> bool {
        self.end_date.is_some()
    }
}

/// An attendance row not yet resolved to an employee surrogate key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceCandidate {
    /// The identity of the employee the row was read from.
    pub employee: EmployeeIdentity,
    pub date: Option<Date>,
    pub is_absent: bool,
}

/// Output of the record normalizer for one chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedBatch {
    /// Unique employees in first-seen order.
    pub employees: Vec<EmployeeIdentity>,
    /// One candidate per source row, in source order.
    pub attendance: Vec<AttendanceCandidate>,
}

impl NormalizedBatch {
    /// Returns whether the batch has neither employees nor attendance rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty() && self.attendance.is_empty()
    }

    /// Counts the attendance candidates flagged as absent.
    #[must_use]
    pub fn absence_count(&self) -> usize {
        self.attendance.iter().filter(|a| a.is_absent).count()
    }
}

/// A structured work-location address, as returned by the reference data
/// provider.
///
/// Providers are best effort; street and postal code may be missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationDetails {
    pub name: String,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
}

impl LocationDetails {
    /// Creates location details.
    #[must_use]
    pub fn new(name: &str, street: Option<&str>, postal_code: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            street: street.map(str::to_string),
            postal_code: postal_code.map(str::to_string),
        }
    }
}
