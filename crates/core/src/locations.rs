// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Work-location reference data providers.

use std::path::{Path, PathBuf};
use std::time::Duration;

use staffload_domain::{LocationDetails, LocationProvider, LookupError};
use tracing::{debug, error, info, warn};

use crate::config::LookupPolicy;

/// Reads the scraper's output: a JSON array of location objects.
///
/// ```json
/// [{ "name": "Zonnehof", "street": "Dorpsstraat 1", "postal_code": "1234 AB" }]
/// ```
///
/// `street` and `postal_code` may be omitted or `null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileLocationProvider {
    path: PathBuf,
}

impl JsonFileLocationProvider {
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl LocationProvider for JsonFileLocationProvider {
    fn lookup_locations(&self) -> Result<Vec<LocationDetails>, LookupError> {
        if !self.path.exists() {
            return Err(LookupError::Unavailable(format!(
                "{} does not exist",
                self.path.display()
            )));
        }

        let text: String = std::fs::read_to_string(&self.path)
            .map_err(|e| LookupError::Transient(format!("{}: {e}", self.path.display())))?;

        let locations: Vec<LocationDetails> = serde_json::from_str(&text)
            .map_err(|e| LookupError::Unavailable(format!("{}: {e}", self.path.display())))?;

        debug!(
            count = locations.len(),
            "Read reference locations from {}",
            self.path.display()
        );
        Ok(locations)
    }
}

/// A provider returning a fixed candidate list.
///
/// An empty list is valid: every location then receives a placeholder
/// address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticLocationProvider {
    locations: Vec<LocationDetails>,
}

impl StaticLocationProvider {
    #[must_use]
    pub const fn new(locations: Vec<LocationDetails>) -> Self {
        Self { locations }
    }
}

impl LocationProvider for StaticLocationProvider {
    fn lookup_locations(&self) -> Result<Vec<LocationDetails>, LookupError> {
        Ok(self.locations.clone())
    }
}

/// Retries transient failures of another provider with exponential backoff.
///
/// The delay before retry `n` (1-based) is `base_delay * 2^(n-1)`.
/// Permanent failures are returned immediately.
#[derive(Debug, Clone)]
pub struct RetryingLocationProvider<P> {
    inner: P,
    max_attempts: u32,
    base_delay: Duration,
}

impl<P: LocationProvider> RetryingLocationProvider<P> {
    #[must_use]
    pub const fn new(inner: P, max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            inner,
            max_attempts,
            base_delay,
        }
    }

    /// Wraps a provider using a configured retry policy.
    #[must_use]
    pub const fn with_policy(inner: P, policy: LookupPolicy) -> Self {
        Self::new(inner, policy.max_attempts, policy.base_delay())
    }

    fn backoff(&self, attempt: u32) -> Duration {
        let factor: u32 = 1_u32.checked_shl(attempt.saturating_sub(1)).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }
}

impl<P: LocationProvider> LocationProvider for RetryingLocationProvider<P> {
    fn lookup_locations(&self) -> Result<Vec<LocationDetails>, LookupError> {
        let max_attempts: u32 = self.max_attempts.max(1);
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            match self.inner.lookup_locations() {
                Ok(locations) => {
                    if attempt > 1 {
                        info!(attempt, "Location lookup succeeded after retry");
                    }
                    return Ok(locations);
                }
                Err(e) if !e.is_transient() => return Err(e),
                Err(e) if attempt >= max_attempts => {
                    error!(attempts = attempt, error = %e, "Location lookup failed");
                    return Err(LookupError::Exhausted {
                        attempts: attempt,
                        last: Box::new(e),
                    });
                }
                Err(e) => {
                    let delay: Duration = self.backoff(attempt);
                    warn!(
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis(),
                        error = %e,
                        "Location lookup failed, retrying"
                    );
                    std::thread::sleep(delay);
                }
            }
        }
    }
}
