// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod identity;

use time::{Date, Month};

use crate::{EmployeeIdentity, RawRecord};

pub fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).expect("Valid test date")
}

pub fn create_test_record(work_location: &str, is_absent: bool) -> RawRecord {
    RawRecord {
        gender: String::from("V"),
        age: Some(42),
        contract_hours: String::from("32"),
        in_training: Some(false),
        is_absent,
        expertise: String::from("Verpleegkundige"),
        hire_date: Some(date(2019, Month::June, 1)),
        date: Some(date(2024, Month::March, 5)),
        end_date: None,
        work_location: String::from(work_location),
    }
}

pub fn create_test_identity(work_location: &str) -> EmployeeIdentity {
    create_test_record(work_location, false).identity()
}
