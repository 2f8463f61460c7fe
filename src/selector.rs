//! Message selectors for move operations

use crate::message::Message;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Picks one message out of a folder's own sequence.
///
/// # Examples
///
/// ```
/// use mailtree::Selector;
///
/// assert_eq!(Selector::from("Hi"), Selector::Subject("Hi".to_string()));
/// assert_eq!(Selector::from(2), Selector::Index(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selector {
    /// The first message whose subject equals this string exactly.
    Subject(String),
    /// The message at this zero-based position.
    Index(usize),
}

impl Selector {
    /// Position of the first message in `messages` this selector picks.
    #[must_use]
    pub fn position(&self, messages: &[Message]) -> Option<usize> {
        match self {
            Self::Subject(subject) => messages.iter().position(|m| m.subject() == subject),
            Self::Index(index) => (*index < messages.len()).then_some(*index),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Subject(subject) => write!(f, "subject {subject:?}"),
            Self::Index(index) => write!(f, "index {index}"),
        }
    }
}

impl From<&str> for Selector {
    fn from(s: &str) -> Self {
        Self::Subject(s.to_string())
    }
}

impl From<String> for Selector {
    fn from(s: String) -> Self {
        Self::Subject(s)
    }
}

impl From<usize> for Selector {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}
