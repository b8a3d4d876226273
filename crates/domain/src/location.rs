// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::{BTreeSet, HashMap};

use crate::types::{EmployeeIdentity, LocationDetails};

/// Street and postal code stored for a location the reference data does not know.
pub const PLACEHOLDER_ADDRESS: &str = "Not Found";

/// A location name paired with the address it will be stored with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    pub details: LocationDetails,
    /// `false` when the address is the placeholder.
    pub matched: bool,
}

/// Splits a work-location label into individual location names.
///
/// Names are separated by commas; surrounding whitespace is dropped and
/// empty segments are ignored, so `"SiteA, SiteB"` and `"SiteA,SiteB,"`
/// both yield `["SiteA", "SiteB"]`.
#[must_use]
pub fn split_location_label(label: &str) -> Vec<&str> {
    label
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Collects every distinct location name referenced by the employees.
#[must_use]
pub fn distinct_location_names(employees: &[EmployeeIdentity]) -> BTreeSet<String> {
    employees
        .iter()
        .flat_map(EmployeeIdentity::location_names)
        .map(str::to_string)
        .collect()
}

/// Matches location names against the reference candidates by exact name.
///
/// Every name resolves to exactly one entry. A name without a candidate gets
/// the placeholder address instead of being dropped. When the reference data
/// lists a name more than once, the first entry wins.
#[must_use]
pub fn resolve_locations(
    names: &BTreeSet<String>,
    candidates: &[LocationDetails],
) -> Vec<ResolvedLocation> {
    let mut by_name: HashMap<&str, &LocationDetails> = HashMap::new();
    for candidate in candidates {
        by_name.entry(candidate.name.as_str()).or_insert(candidate);
    }

    names
        .iter()
        .map(|name| {
            by_name.get(name.as_str()).map_or_else(
                || ResolvedLocation {
                    details: LocationDetails::new(
                        name,
                        Some(PLACEHOLDER_ADDRESS),
                        Some(PLACEHOLDER_ADDRESS),
                    ),
                    matched: false,
                },
                |candidate| ResolvedLocation {
                    details: (*candidate).clone(),
                    matched: true,
                },
            )
        })
        .collect()
}
