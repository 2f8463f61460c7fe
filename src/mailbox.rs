//! Per-user mailbox

use crate::criterion::Criterion;
use crate::directory::{Delivery, Router};
use crate::error::{Error, Result};
use crate::folder::Folder;
use crate::message::Message;
use crate::selector::Selector;
use serde::Serialize;
use tracing::{debug, warn};

/// Name of the root folder of every mailbox.
pub const ROOT: &str = "root";
/// Folder that receives delivered mail.
pub const INBOX: &str = "inbox";
/// Folder that records sent mail.
pub const SENT: &str = "sent";

/// A user's mailbox: an address plus a folder tree.
///
/// The root folder always holds `inbox` and `sent`. Every path taken
/// by the methods below is resolved from the root, so `"inbox"` and
/// `"inbox/work"` are both valid once `work` has been created.
///
/// # Examples
///
/// ```
/// use mailtree::{Mailbox, Message, Selector};
///
/// let mut mailbox = Mailbox::new("Ana", "ana@example.com");
/// mailbox.deliver(Message::new("bo@example.com", "ana@example.com", "Hi", "hello"));
/// mailbox.create_subfolder("inbox", "friends").unwrap();
/// mailbox
///     .move_message("inbox", "inbox/friends", &Selector::from("Hi"))
///     .unwrap();
///
/// assert!(mailbox.inbox().is_empty());
/// assert_eq!(mailbox.list_messages("inbox/friends").len(), 1);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Mailbox {
    name: String,
    address: String,
    root: Folder,
}

impl Mailbox {
    #[must_use]
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            root: Folder::new(ROOT)
                .with_child(Folder::new(INBOX))
                .with_child(Folder::new(SENT)),
        }
    }

    /// Display name of the owner.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub const fn root(&self) -> &Folder {
        &self.root
    }

    /// Every folder path in this mailbox, depth-first.
    #[must_use]
    pub fn folder_paths(&self) -> Vec<String> {
        self.root.folder_paths()
    }

    /// Put an incoming message in the inbox.
    pub fn deliver(&mut self, message: Message) {
        debug!("Delivering {} to {}", message, self.address);
        self.append_to(INBOX, message);
    }

    /// Build a message from this mailbox's address.
    #[must_use]
    pub fn compose(
        &self,
        recipient: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Message {
        Message::new(self.address.clone(), recipient, subject, body)
    }

    /// Compose a message, hand it to `router` and keep a copy in `sent`.
    ///
    /// The copy is recorded even when the router cannot find the
    /// recipient; the returned [`Delivery`] tells the two cases apart.
    pub fn send<R: Router + ?Sized>(
        &mut self,
        router: &mut R,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> Delivery {
        let message = self.compose(recipient, subject, body);
        let delivery = router.route(message.clone());
        self.record_sent(message);
        delivery
    }

    pub(crate) fn record_sent(&mut self, message: Message) {
        self.append_to(SENT, message);
    }

    fn append_to(&mut self, folder: &str, message: Message) {
        if let Some(target) = self.root.child_mut(folder) {
            target.append(message);
        } else {
            warn!("Mailbox {} has no {} folder", self.address, folder);
        }
    }

    /// Create `name` under the folder at `parent` (`""` for the root).
    ///
    /// # Errors
    ///
    /// [`Error::PathNotFound`] if `parent` does not exist,
    /// [`Error::InvalidPath`] for a malformed parent or name.
    pub fn create_subfolder(&mut self, parent: &str, name: &str) -> Result<&mut Folder> {
        self.root.resolve_mut(parent)?.create_child(name)
    }

    /// Move the message picked by `selector` out of `source` and append
    /// it to `destination`.
    ///
    /// # Errors
    ///
    /// [`Error::PathNotFound`] if either folder is missing,
    /// [`Error::MessageNotFound`] if the selector picks nothing.
    pub fn move_message(
        &mut self,
        source: &str,
        destination: &str,
        selector: &Selector,
    ) -> Result<()> {
        let position = self
            .root
            .resolve(source)?
            .position(selector)
            .ok_or_else(|| Error::MessageNotFound(format!("{selector} in {source}")))?;
        self.root.relocate(source, position, destination)
    }

    /// Search every folder of this mailbox.
    #[must_use]
    pub fn search(&self, criterion: Criterion, value: &str) -> Vec<&Message> {
        self.root.search(criterion, value)
    }

    /// Own messages of the folder at `path`, or nothing if it does not
    /// exist.
    #[must_use]
    pub fn list_messages(&self, path: &str) -> &[Message] {
        self.root.resolve(path).map_or(&[][..], Folder::messages)
    }

    #[must_use]
    pub fn inbox(&self) -> &[Message] {
        self.list_messages(INBOX)
    }

    #[must_use]
    pub fn sent(&self) -> &[Message] {
        self.list_messages(SENT)
    }
}
