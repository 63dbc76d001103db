//! Property-test run profile parsing for CI and local overrides.
//!
//! Every property suite reads the same two variables, so CI can scale case
//! counts or enable forking without touching the suites themselves.

use std::env;

use thiserror::Error;

/// Environment variable overriding proptest case counts.
pub const PBT_CASES_ENV_KEY: &str = "TSUNAGI_PBT_CASES";
/// Environment variable toggling proptest process forking.
pub const PBT_FORK_ENV_KEY: &str = "TSUNAGI_PBT_FORK";

/// Reasons an override is ignored.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileOverrideError {
    #[error("case count is not an unsigned integer: {0}")]
    NotANumber(String),
    #[error("case count must be greater than zero")]
    ZeroCases,
    #[error("expected one of true/false/1/0/yes/no/on/off")]
    NotABool,
}

/// Runtime profile for property-test execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Loads a profile, falling back to the defaults for unset or invalid
    /// variables.
    ///
    /// # Examples
    /// ```
    /// use tsunagi_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: override_or(PBT_CASES_ENV_KEY, default_cases, parse_cases),
            fork: override_or(PBT_FORK_ENV_KEY, default_fork, parse_bool),
        }
    }

    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }

    #[must_use]
    pub fn fork(&self) -> bool {
        self.fork
    }
}

fn override_or<T>(
    key: &'static str,
    default: T,
    parse: fn(&str) -> Result<T, ProfileOverrideError>,
) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parse(&raw).unwrap_or_else(|reason| {
        tracing::warn!(
            env = key,
            raw = %raw,
            %reason,
            "ignoring invalid property-test override",
        );
        default
    })
}

fn parse_cases(raw: &str) -> Result<u32, ProfileOverrideError> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err(ProfileOverrideError::ZeroCases),
        Ok(cases) => Ok(cases),
        Err(error) => Err(ProfileOverrideError::NotANumber(error.to_string())),
    }
}

fn parse_bool(raw: &str) -> Result<bool, ProfileOverrideError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ProfileOverrideError::NotABool),
    }
}
