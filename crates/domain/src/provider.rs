// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::LocationDetails;

/// Errors a reference data provider can report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// A failure that may succeed on retry (network hiccup, busy source).
    #[error("Transient location lookup failure: {0}")]
    Transient(String),
    /// A failure retrying will not fix (missing source, malformed payload).
    #[error("Location lookup unavailable: {0}")]
    Unavailable(String),
    /// All retry attempts failed.
    #[error("Location lookup failed after {attempts} attempts: {last}")]
    Exhausted {
        /// Number of attempts made.
        attempts: u32,
        /// The error from the final attempt.
        last: Box<Self>,
    },
}

impl LookupError {
    /// Returns whether retrying the lookup may help.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

/// Source of structured work-location addresses.
///
/// Implementations are treated as stateless external services: every call
/// recomputes the full candidate set, and callers match names themselves.
/// The list may be incomplete or empty.
pub trait LocationProvider {
    /// Returns every location the provider knows about.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference data cannot be obtained.
    fn lookup_locations(&self) -> Result<Vec<LocationDetails>, LookupError>;
}

impl<P: LocationProvider + ?Sized> LocationProvider for &P {
    fn lookup_locations(&self) -> Result<Vec<LocationDetails>, LookupError> {
        (**self).lookup_locations()
    }
}

impl<P: LocationProvider + ?Sized> LocationProvider for Box<P> {
    fn lookup_locations(&self) -> Result<Vec<LocationDetails>, LookupError> {
        (**self).lookup_locations()
    }
}
