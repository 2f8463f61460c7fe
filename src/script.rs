//! Replayable mailbox scripts
//!
//! A script is a JSON document naming the mailboxes to register and the
//! steps to run against them:
//!
//! ```json
//! {
//!   "mailboxes": [
//!     { "name": "Ana", "address": "ana@example.com" },
//!     { "name": "Bo", "address": "bo@example.com" }
//!   ],
//!   "steps": [
//!     { "op": "send", "from": "ana@example.com", "to": "bo@example.com",
//!       "subject": "Hi", "body": "hello" },
//!     { "op": "create_folder", "address": "bo@example.com",
//!       "parent": "inbox", "name": "friends" },
//!     { "op": "move", "address": "bo@example.com", "from": "inbox",
//!       "to": "inbox/friends", "subject": "Hi" },
//!     { "op": "list", "address": "bo@example.com", "path": "inbox/friends" },
//!     { "op": "search", "address": "bo@example.com",
//!       "criterion": "sender", "value": "ana" },
//!     { "op": "folders", "address": "bo@example.com" }
//!   ]
//! }
//! ```
//!
//! Every step produces one [`Outcome`]. A failing step yields
//! [`Outcome::Failed`] and the remaining steps still run.

use crate::criterion::Criterion;
use crate::directory::{Delivery, Directory};
use crate::error::{Error, Result};
use crate::folder::SEPARATOR;
use crate::mailbox::{INBOX, Mailbox};
use crate::message::Message;
use crate::selector::Selector;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// A mailbox to register before the steps run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailboxEntry {
    pub name: String,
    pub address: String,
}

fn default_folder() -> String {
    INBOX.to_string()
}

/// One operation against a registered mailbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Send {
        from: String,
        to: String,
        subject: String,
        #[serde(default)]
        body: String,
    },
    CreateFolder {
        address: String,
        #[serde(default)]
        parent: String,
        name: String,
    },
    /// Exactly one of `subject` and `index` must be given.
    Move {
        address: String,
        from: String,
        to: String,
        #[serde(default)]
        subject: Option<String>,
        #[serde(default)]
        index: Option<usize>,
    },
    List {
        address: String,
        #[serde(default = "default_folder")]
        path: String,
    },
    Search {
        address: String,
        criterion: Criterion,
        value: String,
    },
    Folders {
        address: String,
    },
}

impl Step {
    /// Address of the mailbox this step acts on.
    #[must_use]
    pub const fn address(&self) -> &str {
        match self {
            Self::Send { from, .. } => from.as_str(),
            Self::CreateFolder { address, .. }
            | Self::Move { address, .. }
            | Self::List { address, .. }
            | Self::Search { address, .. }
            | Self::Folders { address } => address.as_str(),
        }
    }
}

fn move_selector(
    subject: Option<&String>,
    index: Option<usize>,
) -> std::result::Result<Selector, &'static str> {
    match (subject, index) {
        (Some(subject), None) => Ok(Selector::Subject(subject.clone())),
        (None, Some(index)) => Ok(Selector::Index(index)),
        (Some(_), Some(_)) => Err("move takes either subject or index, not both"),
        (None, None) => Err("move needs a subject or an index"),
    }
}

/// The result of running one [`Step`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Sent {
        from: String,
        to: String,
        delivery: Delivery,
    },
    FolderCreated {
        address: String,
        path: String,
    },
    Moved {
        address: String,
        from: String,
        to: String,
    },
    Messages {
        address: String,
        path: String,
        messages: Vec<Message>,
    },
    SearchResults {
        address: String,
        criterion: Criterion,
        value: String,
        messages: Vec<Message>,
    },
    Folders {
        address: String,
        paths: Vec<String>,
    },
    Failed {
        step: usize,
        error: String,
    },
}

/// Mailboxes plus the steps to replay against them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub mailboxes: Vec<MailboxEntry>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Script {
    /// Parse a script from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] for malformed JSON or an unknown step.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a script file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::Json`] if it does not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading script {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Check the script without running it.
    ///
    /// Every step must act on a declared mailbox and every move must
    /// carry exactly one selector. Send recipients are not checked,
    /// since sending to an unknown address is a valid scenario.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Script`] naming the first offending step.
    pub fn validate(&self) -> Result<()> {
        let declared: HashSet<&str> = self
            .mailboxes
            .iter()
            .map(|m| m.address.as_str())
            .collect();

        for (i, step) in self.steps.iter().enumerate() {
            let number = i + 1;
            if !declared.contains(step.address()) {
                return Err(Error::Script(format!(
                    "step {number}: mailbox {} is not declared",
                    step.address()
                )));
            }
            if let Step::Move { subject, index, .. } = step {
                move_selector(subject.as_ref(), *index)
                    .map_err(|e| Error::Script(format!("step {number}: {e}")))?;
            }
        }
        Ok(())
    }

    /// Register the script's mailboxes in `directory`, then run every
    /// step in order.
    ///
    /// # Errors
    ///
    /// Only registration errors abort the run; step failures are
    /// reported as [`Outcome::Failed`].
    pub fn run(&self, directory: &mut Directory) -> Result<Vec<Outcome>> {
        for entry in &self.mailboxes {
            directory.register(Mailbox::new(entry.name.clone(), entry.address.clone()))?;
        }

        info!("Running {} step(s)", self.steps.len());
        Ok(self
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| {
                apply(step, directory).unwrap_or_else(|e| Outcome::Failed {
                    step: i + 1,
                    error: e.to_string(),
                })
            })
            .collect())
    }
}

fn mailbox<'a>(directory: &'a Directory, address: &str) -> Result<&'a Mailbox> {
    directory
        .mailbox(address)
        .ok_or_else(|| Error::UnknownMailbox(address.to_string()))
}

fn mailbox_mut<'a>(directory: &'a mut Directory, address: &str) -> Result<&'a mut Mailbox> {
    directory
        .mailbox_mut(address)
        .ok_or_else(|| Error::UnknownMailbox(address.to_string()))
}

fn apply(step: &Step, directory: &mut Directory) -> Result<Outcome> {
    match step {
        Step::Send {
            from,
            to,
            subject,
            body,
        } => Ok(Outcome::Sent {
            from: from.clone(),
            to: to.clone(),
            delivery: directory.send(from, to, subject, body)?,
        }),
        Step::CreateFolder {
            address,
            parent,
            name,
        } => {
            mailbox_mut(directory, address)?.create_subfolder(parent, name)?;
            let path = if parent.is_empty() {
                name.clone()
            } else {
                format!("{parent}{SEPARATOR}{name}")
            };
            Ok(Outcome::FolderCreated {
                address: address.clone(),
                path,
            })
        }
        Step::Move {
            address,
            from,
            to,
            subject,
            index,
        } => {
            let selector =
                move_selector(subject.as_ref(), *index).map_err(|e| Error::Script(e.to_string()))?;
            mailbox_mut(directory, address)?.move_message(from, to, &selector)?;
            Ok(Outcome::Moved {
                address: address.clone(),
                from: from.clone(),
                to: to.clone(),
            })
        }
        Step::List { address, path } => {
            let mailbox = mailbox(directory, address)?;
            Ok(Outcome::Messages {
                address: address.clone(),
                path: path.clone(),
                messages: mailbox.list_messages(path).to_vec(),
            })
        }
        Step::Search {
            address,
            criterion,
            value,
        } => {
            let mailbox = mailbox(directory, address)?;
            Ok(Outcome::SearchResults {
                address: address.clone(),
                criterion: *criterion,
                value: value.clone(),
                messages: mailbox
                    .search(*criterion, value)
                    .into_iter()
                    .cloned()
                    .collect(),
            })
        }
        Step::Folders { address } => Ok(Outcome::Folders {
            address: address.clone(),
            paths: mailbox(directory, address)?.folder_paths(),
        }),
    }
}
