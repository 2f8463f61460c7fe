//! Search criteria
//!
//! Provides a strongly-typed enum for the message field a search
//! matches against instead of raw strings. Parsing, from text or from
//! JSON, ignores case and accepts `from` as another name for `sender`.

use crate::error::Error;
use crate::message::Message;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The message field a folder search compares against.
///
/// # Examples
///
/// ```
/// use mailtree::Criterion;
///
/// let c: Criterion = "subject".parse().unwrap();
/// assert_eq!(c, Criterion::Subject);
/// assert_eq!(Criterion::Sender.as_str(), "sender");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Criterion {
    /// Match against the message subject.
    Subject,
    /// Match against the sender address.
    Sender,
}

impl Criterion {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Subject => "subject",
            Self::Sender => "sender",
        }
    }

    /// The field of `message` this criterion looks at.
    #[must_use]
    pub fn field(self, message: &Message) -> &str {
        match self {
            Self::Subject => message.subject(),
            Self::Sender => message.sender(),
        }
    }

    /// Case-insensitive substring match of `needle` against the
    /// selected field. `needle` must already be lowercased.
    pub(crate) fn matches_lowered(self, message: &Message, needle: &str) -> bool {
        self.field(message).to_lowercase().contains(needle)
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Criterion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("subject") {
            Ok(Self::Subject)
        } else if s.eq_ignore_ascii_case("sender") || s.eq_ignore_ascii_case("from") {
            Ok(Self::Sender)
        } else {
            Err(Error::UnknownCriterion(s.to_string()))
        }
    }
}

impl TryFrom<String> for Criterion {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
