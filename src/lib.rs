//! In-memory mailboxes built on a folder tree
//!
//! Each [`Mailbox`] owns a tree of [`Folder`]s rooted at `root`, which
//! always holds `inbox` and `sent`. Folders are addressed by
//! `/`-separated paths resolved from the root. Messages can be moved
//! between any two folders and searched recursively by [`Criterion`].
//!
//! A [`Directory`] maps addresses to mailboxes and routes messages to
//! the recipient's inbox. A [`Script`] replays a sequence of mailbox
//! operations against a directory.
//!
//! ```
//! use mailtree::{Criterion, Directory, Mailbox, Selector};
//!
//! let mut directory = Directory::new();
//! directory.register(Mailbox::new("A", "a@x")).unwrap();
//! directory.register(Mailbox::new("B", "b@x")).unwrap();
//! directory.send("a@x", "b@x", "Hi", "hello").unwrap();
//!
//! let b = directory.mailbox_mut("b@x").unwrap();
//! b.create_subfolder("inbox", "work").unwrap();
//! b.move_message("inbox", "inbox/work", &Selector::from("Hi")).unwrap();
//!
//! assert_eq!(b.search(Criterion::Sender, "a@x").len(), 1);
//! ```

mod config;
mod criterion;
mod directory;
mod error;
mod folder;
mod mailbox;
mod message;
mod script;
mod selector;

pub use config::{DirectoryConfig, RegistrationPolicy};
pub use criterion::Criterion;
pub use directory::{Delivery, Directory, Router};
pub use error::{Error, Result};
pub use folder::{Folder, SEPARATOR};
pub use mailbox::{INBOX, Mailbox, ROOT, SENT};
pub use message::Message;
pub use script::{MailboxEntry, Outcome, Script, Step};
pub use selector::Selector;
