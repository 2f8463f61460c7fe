//! Test fixtures for building populated directories
//!
//! Provides a builder-style API for constructing directory state:
//!
//! ```ignore
//! let directory = DirectoryBuilder::new()
//!     .mailbox("A", "a@x")
//!         .folder("inbox", "work")
//!         .deliver("inbox/work", "b@x", "Plan")
//!     .mailbox("B", "b@x")
//!     .build();
//! ```
//!
//! Calls after `.mailbox()` act on the most recently added mailbox.

use mailtree::{Directory, Mailbox, Message};

pub struct DirectoryBuilder {
    mailboxes: Vec<Mailbox>,
}

impl DirectoryBuilder {
    pub fn new() -> Self {
        Self {
            mailboxes: Vec::new(),
        }
    }

    /// Add a new mailbox. Subsequent calls populate this mailbox.
    pub fn mailbox(mut self, name: &str, address: &str) -> Self {
        self.mailboxes.push(Mailbox::new(name, address));
        self
    }

    /// Create folder `name` under `parent` in the current mailbox.
    ///
    /// # Panics
    ///
    /// Panics if called before any `.mailbox()` call or if `parent`
    /// does not exist.
    pub fn folder(mut self, parent: &str, name: &str) -> Self {
        self.current()
            .create_subfolder(parent, name)
            .expect("parent folder exists");
        self
    }

    /// Append a message from `sender` straight into the folder at
    /// `path` of the current mailbox.
    pub fn deliver(mut self, path: &str, sender: &str, subject: &str) -> Self {
        let mailbox = self.current();
        let message = Message::new(sender, mailbox.address(), subject, "body");
        mailbox
            .root()
            .resolve(path)
            .expect("folder exists before delivery");
        // Inbox delivery, then a move when the target is elsewhere.
        mailbox.deliver(message);
        if path != mailtree::INBOX {
            let last = mailbox.inbox().len() - 1;
            mailbox
                .move_message(mailtree::INBOX, path, &last.into())
                .expect("move into fixture folder");
        }
        self
    }

    /// Consume the builder and return a directory with every mailbox
    /// registered.
    pub fn build(self) -> Directory {
        let mut directory = Directory::new();
        for mailbox in self.mailboxes {
            directory
                .register(mailbox)
                .expect("fixture addresses are unique");
        }
        directory
    }

    fn current(&mut self) -> &mut Mailbox {
        self.mailboxes
            .last_mut()
            .expect("call .mailbox() before populating it")
    }
}
