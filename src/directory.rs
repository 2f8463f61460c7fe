//! Address directory and message routing

use crate::config::{DirectoryConfig, RegistrationPolicy};
use crate::error::{Error, Result};
use crate::mailbox::Mailbox;
use crate::message::Message;
use serde::Serialize;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::{info, warn};

/// Outcome of routing one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "recipient", rename_all = "snake_case")]
pub enum Delivery {
    /// The message is in the recipient's inbox.
    Delivered,
    /// No mailbox is registered for this address.
    UnknownRecipient(String),
}

impl Delivery {
    #[must_use]
    pub const fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

/// Something that can take a message to its recipient.
pub trait Router {
    fn route(&mut self, message: Message) -> Delivery;
}

/// Maps addresses to the mailboxes that own them.
///
/// Each `Directory` is an independent value; nothing is shared between
/// instances.
///
/// # Examples
///
/// ```
/// use mailtree::{Delivery, Directory, Mailbox};
///
/// let mut directory = Directory::new();
/// directory.register(Mailbox::new("A", "a@x")).unwrap();
/// directory.register(Mailbox::new("B", "b@x")).unwrap();
///
/// let delivery = directory.send("a@x", "b@x", "Hi", "hello").unwrap();
/// assert_eq!(delivery, Delivery::Delivered);
/// assert_eq!(directory.mailbox("b@x").unwrap().inbox().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Directory {
    config: DirectoryConfig,
    mailboxes: HashMap<String, Mailbox>,
}

impl Directory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: DirectoryConfig) -> Self {
        Self {
            config,
            mailboxes: HashMap::new(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// Register `mailbox` under its address.
    ///
    /// With [`RegistrationPolicy::Overwrite`] an existing mailbox is
    /// replaced and returned.
    ///
    /// # Errors
    ///
    /// With [`RegistrationPolicy::Reject`], returns
    /// [`Error::AddressInUse`] if the address is taken; the existing
    /// registration is kept.
    pub fn register(&mut self, mailbox: Mailbox) -> Result<Option<Mailbox>> {
        match self.mailboxes.entry(mailbox.address().to_string()) {
            Entry::Vacant(slot) => {
                info!("Registered mailbox {}", slot.key());
                slot.insert(mailbox);
                Ok(None)
            }
            Entry::Occupied(mut slot) => match self.config.registration {
                RegistrationPolicy::Overwrite => {
                    info!("Replaced mailbox {}", slot.key());
                    Ok(Some(slot.insert(mailbox)))
                }
                RegistrationPolicy::Reject => {
                    warn!("Rejected second registration of {}", slot.key());
                    Err(Error::AddressInUse(slot.key().clone()))
                }
            },
        }
    }

    #[must_use]
    pub fn mailbox(&self, address: &str) -> Option<&Mailbox> {
        self.mailboxes.get(address)
    }

    pub fn mailbox_mut(&mut self, address: &str) -> Option<&mut Mailbox> {
        self.mailboxes.get_mut(address)
    }

    /// Registered addresses in sorted order.
    #[must_use]
    pub fn addresses(&self) -> Vec<&str> {
        let mut addresses: Vec<&str> = self.mailboxes.keys().map(String::as_str).collect();
        addresses.sort_unstable();
        addresses
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.mailboxes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mailboxes.is_empty()
    }

    /// Send a message on behalf of the registered mailbox at `from`.
    ///
    /// Same semantics as [`Mailbox::send`]: the message is routed, then
    /// recorded in the sender's `sent` folder whatever the outcome.
    /// Sending to oneself is allowed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownMailbox`] if nothing is registered at
    /// `from`.
    pub fn send(&mut self, from: &str, to: &str, subject: &str, body: &str) -> Result<Delivery> {
        let message = self
            .mailbox(from)
            .ok_or_else(|| Error::UnknownMailbox(from.to_string()))?
            .compose(to, subject, body);

        let delivery = self.route(message.clone());

        self.mailbox_mut(from)
            .ok_or_else(|| Error::UnknownMailbox(from.to_string()))?
            .record_sent(message);
        Ok(delivery)
    }
}

impl Router for Directory {
    fn route(&mut self, message: Message) -> Delivery {
        if let Some(mailbox) = self.mailboxes.get_mut(message.recipient()) {
            info!("Routing {}", message);
            mailbox.deliver(message);
            Delivery::Delivered
        } else {
            warn!("Recipient {} not found", message.recipient());
            Delivery::UnknownRecipient(message.recipient().to_string())
        }
    }
}
