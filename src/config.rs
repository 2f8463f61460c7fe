//! Directory configuration

use crate::error::{Error, Result};
use std::env;
use std::fmt;
use std::str::FromStr;

/// What happens when a mailbox is registered under an address that is
/// already taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RegistrationPolicy {
    /// The new mailbox replaces the old one (last write wins).
    #[default]
    Overwrite,
    /// The registration fails and the existing mailbox stays.
    Reject,
}

impl RegistrationPolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overwrite => "overwrite",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for RegistrationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistrationPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(Self::Overwrite),
            "reject" => Ok(Self::Reject),
            other => Err(Error::Config(format!(
                "Invalid MAILTREE_REGISTRATION: {other} (expected overwrite or reject)"
            ))),
        }
    }
}

/// Settings for a [`Directory`](crate::Directory)
#[derive(Debug, Clone, Default)]
pub struct DirectoryConfig {
    pub registration: RegistrationPolicy,
}

impl DirectoryConfig {
    /// Load directory configuration from environment variables
    ///
    /// Reads from `.env` file if present. Optional (with defaults):
    /// - `MAILTREE_REGISTRATION` (default: `overwrite`)
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `MAILTREE_REGISTRATION` holds an
    /// unknown policy.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            registration: env::var("MAILTREE_REGISTRATION")
                .map_or_else(|_| Ok(RegistrationPolicy::default()), |v| v.parse())?,
        })
    }
}
