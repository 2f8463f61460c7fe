//! Message value type

use serde::{Deserialize, Serialize};
use std::fmt;

/// An immutable mail message.
///
/// Messages carry no identity beyond their contents. Inside a
/// [`Folder`](crate::Folder) a message is addressed by its position in
/// the folder's own sequence.
///
/// # Examples
///
/// ```
/// use mailtree::Message;
///
/// let msg = Message::new("a@x", "b@x", "Hi", "hello");
/// assert_eq!(msg.to_string(), "From: a@x, To: b@x, Subject: Hi");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    sender: String,
    recipient: String,
    subject: String,
    body: String,
}

impl Message {
    #[must_use]
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }

    #[must_use]
    pub fn sender(&self) -> &str {
        &self.sender
    }

    #[must_use]
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "From: {}, To: {}, Subject: {}",
            self.sender, self.recipient, self.subject
        )
    }
}
