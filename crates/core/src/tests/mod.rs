// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod locations;

use csv::StringRecord;
use staffload_domain::SourceField;
use time::{Date, Month};

use crate::RawChunk;

pub fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).expect("Valid test date")
}

/// The default Dutch header row, in canonical field order.
pub fn default_headers() -> StringRecord {
    SourceField::ALL
        .iter()
        .map(SourceField::default_header)
        .collect()
}

/// Builds a source row in canonical field order.
#[allow(clippy::too_many_arguments)]
pub fn source_row(
    gender: &str,
    age: &str,
    in_training: &str,
    absent: &str,
    hire_date: &str,
    day: &str,
    end_date: &str,
    work_location: &str,
) -> StringRecord {
    StringRecord::from(vec![
        gender,
        age,
        "32",
        in_training,
        absent,
        "Verpleegkundige",
        hire_date,
        day,
        end_date,
        work_location,
    ])
}

/// A nurse at Zonnehof on the given day.
pub fn nurse_row(day: &str, absent: &str) -> StringRecord {
    source_row("V", "42", "nee", absent, "1-6-2019", day, "", "Zonnehof")
}

pub fn chunk(rows: Vec<StringRecord>) -> RawChunk {
    RawChunk::new(default_headers(), rows)
}

/// Renders rows as CSV text with the default header row.
pub fn csv_text(rows: &[StringRecord]) -> String {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&default_headers()).unwrap();
    for row in rows {
        writer.write_record(row).unwrap();
    }
    String::from_utf8(writer.into_inner().unwrap()).unwrap()
}
