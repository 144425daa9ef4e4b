//! Packed shader versions.
//!
//! Shader releases are identified by `(name, version)`, where the version is
//! stored as a single 32-bit integer: `major << 22 | minor << 12 | patch`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{LibraryError, Result};

const MAJOR_SHIFT: u32 = 22;
const MINOR_SHIFT: u32 = 12;

/// Largest representable major component (10 bits).
pub const MAX_MAJOR: u32 = (1 << 10) - 1;
/// Largest representable minor component (10 bits).
pub const MAX_MINOR: u32 = (1 << 10) - 1;
/// Largest representable patch component (12 bits).
pub const MAX_PATCH: u32 = (1 << 12) - 1;

/// A `MAJOR.MINOR.PATCH` version whose components fit the packed layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShaderVersion {
    major: u32,
    minor: u32,
    patch: u32,
}

impl ShaderVersion {
    /// Creates a version, rejecting components that overflow their bit range.
    pub fn new(major: u32, minor: u32, patch: u32) -> Result<Self> {
        check_range("major", major, MAX_MAJOR)?;
        check_range("minor", minor, MAX_MINOR)?;
        check_range("patch", patch, MAX_PATCH)?;
        Ok(Self {
            major,
            minor,
            patch,
        })
    }

    #[must_use]
    pub fn major(&self) -> u32 {
        self.major
    }

    #[must_use]
    pub fn minor(&self) -> u32 {
        self.minor
    }

    #[must_use]
    pub fn patch(&self) -> u32 {
        self.patch
    }

    /// Packs the version into its 32-bit database representation.
    #[must_use]
    pub fn pack(&self) -> u32 {
        (self.major << MAJOR_SHIFT) | (self.minor << MINOR_SHIFT) | self.patch
    }

    /// Recovers a version from its packed representation.
    #[must_use]
    pub fn unpack(packed: u32) -> Self {
        Self {
            major: packed >> MAJOR_SHIFT,
            minor: (packed >> MINOR_SHIFT) & MAX_MINOR,
            patch: packed & MAX_PATCH,
        }
    }
}

fn check_range(component: &'static str, value: u32, max: u32) -> Result<()> {
    if value > max {
        return Err(LibraryError::VersionOutOfRange {
            component,
            value,
            max,
        });
    }
    Ok(())
}

impl FromStr for ShaderVersion {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || LibraryError::InvalidVersion(s.to_string());

        let mut parts = s.split('.');
        let mut next = || -> Result<u32> {
            let part = parts.next().ok_or_else(invalid)?;
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            part.parse::<u32>().map_err(|_| invalid())
        };

        let (major, minor, patch) = (next()?, next()?, next()?);
        if parts.next().is_some() {
            return Err(invalid());
        }
        Self::new(major, minor, patch)
    }
}

impl fmt::Display for ShaderVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl Serialize for ShaderVersion {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ShaderVersion {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
