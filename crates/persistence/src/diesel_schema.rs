// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Diesel table descriptors for the OLTP store.
//!
//! The DDL these describe lives in `schema.rs`; the two must stay in step.

diesel::table! {
    work_locations (work_location_id) {
        work_location_id -> BigInt,
        name -> Text,
        street -> Nullable<Text>,
        postal_code -> Nullable<Text>,
    }
}

diesel::table! {
    employees (employee_id) {
        employee_id -> BigInt,
        gender -> Text,
        age -> Integer,
        contract_hours -> Text,
        in_training -> Integer,
        expertise -> Text,
        hire_date -> Text,
    }
}

diesel::table! {
    employee_work_locations (employee_id, work_location_id) {
        employee_id -> BigInt,
        work_location_id -> BigInt,
    }
}

diesel::table! {
    absences (absence_id) {
        absence_id -> BigInt,
        employee_id -> BigInt,
        absence_date -> Text,
    }
}

diesel::table! {
    left_organisation (employee_id) {
        employee_id -> BigInt,
        end_date -> Text,
    }
}

diesel::joinable!(absences -> employees (employee_id));
diesel::joinable!(employee_work_locations -> employees (employee_id));
diesel::joinable!(employee_work_locations -> work_locations (work_location_id));
diesel::joinable!(left_organisation -> employees (employee_id));

diesel::allow_tables_to_appear_in_same_query!(
    absences,
    employee_work_locations,
    employees,
    left_organisation,
    work_locations,
);
