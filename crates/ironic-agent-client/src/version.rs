//! Bare Metal API microversions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A `major.minor` API microversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Microversion {
    major: u32,
    minor: u32,
}

impl Microversion {
    /// Create a microversion.
    #[must_use]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Major version.
    #[must_use]
    pub const fn major(self) -> u32 {
        self.major
    }

    /// Minor version.
    #[must_use]
    pub const fn minor(self) -> u32 {
        self.minor
    }
}

impl fmt::Display for Microversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Error returned for strings that are not `major.minor`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid microversion: {0:?}")]
pub struct InvalidMicroversion(pub String);

impl FromStr for Microversion {
    type Err = InvalidMicroversion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidMicroversion(s.to_string());
        let (major, minor) = s.trim().split_once('.').ok_or_else(invalid)?;
        Ok(Self {
            major: major.parse().map_err(|_| invalid())?,
            minor: minor.parse().map_err(|_| invalid())?,
        })
    }
}

impl TryFrom<String> for Microversion {
    type Error = InvalidMicroversion;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Microversion> for String {
    fn from(v: Microversion) -> Self {
        v.to_string()
    }
}
