//! Target framework versions
//!
//! `major.minor[.build[.revision]]`, the four-part scheme framework releases
//! use. Only the major component influences bundle policy; the rest is kept
//! so the resolved target can be displayed faithfully.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BundleError, Result};

/// Framework version this build of the tool targets when none is given.
const CURRENT_MAJOR: u32 = 10;
const CURRENT_MINOR: u32 = 0;

/// Target framework version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FrameworkVersion {
    pub major: u32,
    pub minor: u32,
    pub build: Option<u32>,
    pub revision: Option<u32>,
}

impl FrameworkVersion {
    pub fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            build: None,
            revision: None,
        }
    }

    /// The framework version the tool itself ships against.
    pub fn current() -> Self {
        Self::new(CURRENT_MAJOR, CURRENT_MINOR)
    }

    /// Parse a version string.
    ///
    /// Accepts `8`, `8.0`, `3.1.4`, `6.0.0.1`, and target framework monikers
    /// such as `net8.0`, `netcoreapp3.1` or `v6.0`. Dotless monikers
    /// (`net48`, `net472`) are rejected.
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let moniker = trimmed
            .strip_prefix("netcoreapp")
            .or_else(|| trimmed.strip_prefix("net"));
        let digits = match moniker {
            // `net48`, `net472`: legacy framework monikers, not `major.minor`.
            Some(rest) if !rest.contains('.') => {
                return Err(BundleError::InvalidFrameworkVersion(s.to_string()));
            }
            Some(rest) => rest,
            None => trimmed.strip_prefix('v').unwrap_or(trimmed),
        };

        let parts: Vec<&str> = digits.split('.').collect();
        if parts.is_empty() || parts.len() > 4 {
            return Err(BundleError::InvalidFrameworkVersion(s.to_string()));
        }

        let mut numbers = Vec::with_capacity(parts.len());
        for part in &parts {
            let n = part
                .parse::<u32>()
                .map_err(|_| BundleError::InvalidFrameworkVersion(s.to_string()))?;
            numbers.push(n);
        }

        Ok(Self {
            major: numbers[0],
            minor: numbers.get(1).copied().unwrap_or(0),
            build: numbers.get(2).copied(),
            revision: numbers.get(3).copied(),
        })
    }
}

impl fmt::Display for FrameworkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if let Some(build) = self.build {
            write!(f, ".{}", build)?;
            if let Some(revision) = self.revision {
                write!(f, ".{}", revision)?;
            }
        }
        Ok(())
    }
}

impl FromStr for FrameworkVersion {
    type Err = BundleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FrameworkVersion {
    type Error = BundleError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<FrameworkVersion> for String {
    fn from(v: FrameworkVersion) -> String {
        v.to_string()
    }
}

impl PartialOrd for FrameworkVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrameworkVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        // A missing component sorts before any present one, as 6.0 < 6.0.0.
        (self.major, self.minor, self.build, self.revision).cmp(&(
            other.major,
            other.minor,
            other.build,
            other.revision,
        ))
    }
}
