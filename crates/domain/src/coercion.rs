// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field coercion rules for raw source cells.
//!
//! Every function here distinguishes three outcomes:
//!
//! - an empty cell, which is a legitimate null (`Ok(None)` or `Ok(false)`)
//! - a well-formed value
//! - a malformed value, reported as [`DomainError::Coercion`]
//!
//! A coercion failure never drops the row. The normalizer logs it and
//! substitutes null.

use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use time::Date;
use time::format_description::{BorrowedFormatItem, OwnedFormatItem};
use time::macros::format_description;

use crate::error::DomainError;
use crate::types::SourceField;

/// Day-month-year with optional zero padding, e.g. `5-3-2024` or `05-03-2024`.
const DAY_MONTH_YEAR: &[BorrowedFormatItem<'static>] =
    format_description!("[day padding:none]-[month padding:none]-[year]");

/// Cell texts that spreadsheet exports use for "no value".
const NULL_MARKERS: &[&str] = &["", "nan", "nat", "none", "null"];

/// A parsed `time` format description used for every date column.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateFormat {
    description: String,
    items: OwnedFormatItem,
}

impl DateFormat {
    /// The format description used when none is configured.
    pub const DEFAULT_DESCRIPTION: &'static str = "[day padding:none]-[month padding:none]-[year]";

    /// Parses a `time` format description such as `[year]-[month]-[day]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the description is not valid.
    pub fn parse(description: &str) -> Result<Self, DomainError> {
        let items: OwnedFormatItem = time::format_description::parse_owned::<2>(description)
            .map_err(|e| DomainError::InvalidDateFormat {
                format: description.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            description: description.to_string(),
            items,
        })
    }

    /// Returns the format description text.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Renders a date in this format.
    ///
    /// # Errors
    ///
    /// Returns an error if the format contains components a date cannot supply.
    pub fn format(&self, date: Date) -> Result<String, DomainError> {
        date.format(&self.items)
            .map_err(|e| DomainError::InvalidDateFormat {
                format: self.description.clone(),
                reason: e.to_string(),
            })
    }

    fn parse_date(&self, value: &str) -> Result<Date, time::error::Parse> {
        Date::parse(value, &self.items)
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self {
            description: Self::DEFAULT_DESCRIPTION.to_string(),
            items: OwnedFormatItem::from(DAY_MONTH_YEAR),
        }
    }
}

impl PartialEq for DateFormat {
    fn eq(&self, other: &Self) -> bool {
        self.description == other.description
    }
}

impl Eq for DateFormat {}

impl TryFrom<String> for DateFormat {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DateFormat> for String {
    fn from(value: DateFormat) -> Self {
        value.description
    }
}

fn is_null_marker(value: &str) -> bool {
    NULL_MARKERS
        .iter()
        .any(|marker| value.eq_ignore_ascii_case(marker))
}

fn coercion_error(field: SourceField, value: &str, reason: &str) -> DomainError {
    DomainError::Coercion {
        field,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Coerces a date cell using the configured format.
///
/// # Errors
///
/// Returns [`DomainError::Coercion`] if a non-empty cell does not match the format.
pub fn coerce_date(
    field: SourceField,
    raw: &str,
    format: &DateFormat,
) -> Result<Option<Date>, DomainError> {
    let value: &str = raw.trim();
    if is_null_marker(value) {
        return Ok(None);
    }

    format
        .parse_date(value)
        .map(Some)
        .map_err(|e| coercion_error(field, value, &e.to_string()))
}

/// Coerces the in-training cell from its `ja`/`nee` encoding.
///
/// # Errors
///
/// Returns [`DomainError::Coercion`] for any other non-empty value.
pub fn coerce_in_training(raw: &str) -> Result<Option<bool>, DomainError> {
    let value: &str = raw.trim();
    if is_null_marker(value) {
        return Ok(None);
    }

    match value.to_lowercase().as_str() {
        "ja" => Ok(Some(true)),
        "nee" => Ok(Some(false)),
        _ => Err(coercion_error(
            SourceField::InTraining,
            value,
            "expected 'ja' or 'nee'",
        )),
    }
}

/// Coerces the absence flag.
///
/// Accepts the spellings spreadsheet exports produce for a boolean: numbers
/// (non-zero is absent), `true`/`false`, `ja`/`nee`, `yes`/`no` and their
/// one-letter forms. An empty cell is not absent.
///
/// # Errors
///
/// Returns [`DomainError::Coercion`] for any other value.
pub fn coerce_absence(raw: &str) -> Result<bool, DomainError> {
    let value: &str = raw.trim();
    if is_null_marker(value) {
        return Ok(false);
    }

    match value.to_lowercase().as_str() {
        "true" | "t" | "ja" | "j" | "yes" | "y" | "waar" => Ok(true),
        "false" | "f" | "nee" | "n" | "no" | "onwaar" => Ok(false),
        other => other.parse::<f64>().map_or_else(
            |_| {
                Err(coercion_error(
                    SourceField::IsAbsent,
                    value,
                    "not a recognised boolean",
                ))
            },
            |number| Ok(number.abs() > f64::EPSILON),
        ),
    }
}

/// Coerces the age cell to whole years.
///
/// Spreadsheet readers often render integers as `42.0`; whole floats are
/// accepted.
///
/// # Errors
///
/// Returns [`DomainError::Coercion`] for non-numeric, fractional or
/// out-of-range values.
pub fn coerce_age(raw: &str) -> Result<Option<i32>, DomainError> {
    let value: &str = raw.trim();
    if is_null_marker(value) {
        return Ok(None);
    }

    if let Ok(age) = value.parse::<i32>() {
        return Ok(Some(age));
    }

    let number: f64 = value
        .parse::<f64>()
        .map_err(|_| coercion_error(SourceField::Age, value, "not a number"))?;

    if number.fract().abs() > f64::EPSILON {
        return Err(coercion_error(SourceField::Age, value, "not a whole number"));
    }

    number
        .to_i32()
        .map(Some)
        .ok_or_else(|| coercion_error(SourceField::Age, value, "out of range"))
}
