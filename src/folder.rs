//! Folder tree
//!
//! A [`Folder`] owns its messages and its child folders outright. There
//! are no parent links: every lookup walks down from a known starting
//! folder by a `/`-separated path such as `inbox/work/2024`.
//!
//! Path rules:
//! - the empty path `""` names the starting folder itself;
//! - every other path is split on `/` and each segment must name an
//!   existing child of the folder reached so far;
//! - empty segments (`"a//b"`, `"/a"`, `"a/"`) are rejected with
//!   [`Error::InvalidPath`]; there is no `..`.
//!
//! Children are stored in creation order with a name index beside
//! them, so each path segment is a single map lookup.

use crate::criterion::Criterion;
use crate::error::{Error, Result};
use crate::message::Message;
use crate::selector::Selector;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Separator between folder names in a path.
pub const SEPARATOR: char = '/';

fn segments(path: &str) -> Result<Vec<&str>> {
    if path.is_empty() {
        return Ok(Vec::new());
    }
    let parts: Vec<&str> = path.split(SEPARATOR).collect();
    if parts.iter().any(|s| s.is_empty()) {
        return Err(Error::InvalidPath(path.to_string()));
    }
    Ok(parts)
}

/// A node of a mailbox folder tree.
///
/// Messages keep insertion order. Children keep creation order, which
/// is also the order [`Folder::search`] visits them in.
///
/// # Examples
///
/// ```
/// use mailtree::{Criterion, Folder, Message};
///
/// let mut root = Folder::new("root");
/// root.create_child("inbox").unwrap().create_child("work").unwrap();
///
/// let work = root.resolve_mut("inbox/work").unwrap();
/// work.append(Message::new("a@x", "b@x", "Budget", "..."));
///
/// let hits = root.search(Criterion::Subject, "budget");
/// assert_eq!(hits.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Folder {
    name: String,
    messages: Vec<Message>,
    children: Vec<Self>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Folder {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            messages: Vec::new(),
            children: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Builder used for fixed layouts whose child names are known to be
    /// distinct.
    #[must_use]
    pub(crate) fn with_child(mut self, child: Self) -> Self {
        self.insert_child(child);
        self
    }

    fn insert_child(&mut self, child: Self) -> usize {
        let position = self.children.len();
        self.index.insert(child.name.clone(), position);
        self.children.push(child);
        position
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// This folder's own messages, without those of descendants.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.index.get(name).map(|&i| &self.children[i])
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Self> {
        self.index.get(name).map(|&i| &mut self.children[i])
    }

    /// Number of messages directly in this folder.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of messages in this folder and all of its descendants.
    #[must_use]
    pub fn total_messages(&self) -> usize {
        self.messages.len() + self.children.iter().map(Self::total_messages).sum::<usize>()
    }

    /// Add a message at the end of this folder's own sequence.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Get the child called `name`, creating it first if needed.
    ///
    /// Calling this twice with the same name yields the same child.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if `name` is empty or contains
    /// the path separator.
    pub fn create_child(&mut self, name: &str) -> Result<&mut Self> {
        if name.is_empty() || name.contains(SEPARATOR) {
            return Err(Error::InvalidPath(name.to_string()));
        }

        let position = if let Some(&i) = self.index.get(name) {
            i
        } else {
            debug!("Creating folder {} under {}", name, self.name);
            self.insert_child(Self::new(name))
        };
        Ok(&mut self.children[position])
    }

    /// Walk `path` down from this folder.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathNotFound`] if a segment does not exist and
    /// [`Error::InvalidPath`] if the path has an empty segment.
    pub fn resolve(&self, path: &str) -> Result<&Self> {
        let mut current = self;
        for segment in segments(path)? {
            current = current
                .child(segment)
                .ok_or_else(|| Error::PathNotFound(path.to_string()))?;
        }
        Ok(current)
    }

    /// Mutable counterpart of [`Folder::resolve`].
    ///
    /// # Errors
    ///
    /// Same as [`Folder::resolve`].
    pub fn resolve_mut(&mut self, path: &str) -> Result<&mut Self> {
        let mut current = self;
        for segment in segments(path)? {
            current = current
                .child_mut(segment)
                .ok_or_else(|| Error::PathNotFound(path.to_string()))?;
        }
        Ok(current)
    }

    /// Position of the first own message picked by `selector`.
    #[must_use]
    pub fn position(&self, selector: &Selector) -> Option<usize> {
        selector.position(&self.messages)
    }

    /// Move the message at `position` to the folder at `destination`,
    /// resolved relative to this folder. The message lands at the end
    /// of the destination.
    ///
    /// # Errors
    ///
    /// Fails without touching either folder if the destination does not
    /// resolve or there is no message at `position`.
    pub fn move_to(&mut self, position: usize, destination: &str) -> Result<()> {
        self.relocate("", position, destination)
    }

    /// Move the message at `position` of the folder at `source` to the
    /// folder at `destination`. Both paths are resolved from this
    /// folder, so messages can move between any two folders of the
    /// subtree.
    ///
    /// # Errors
    ///
    /// [`Error::PathNotFound`] or [`Error::InvalidPath`] for a bad
    /// path, [`Error::MessageNotFound`] if `position` is out of range.
    /// Nothing is mutated on error.
    pub fn relocate(&mut self, source: &str, position: usize, destination: &str) -> Result<()> {
        let available = self.resolve(source)?.messages.len();
        self.resolve(destination)?;
        if position >= available {
            return Err(Error::MessageNotFound(format!(
                "no message at position {position} in {source:?}"
            )));
        }

        let message = self.resolve_mut(source)?.messages.remove(position);
        debug!(
            "Moving message {:?} from {:?} to {:?}",
            message.subject(),
            source,
            destination
        );
        self.resolve_mut(destination)?.messages.push(message);
        Ok(())
    }

    /// Case-insensitive substring search over this folder and all
    /// descendants.
    ///
    /// Results are depth-first: this folder's own matches come first,
    /// then each child's full result set in creation order.
    #[must_use]
    pub fn search(&self, criterion: Criterion, value: &str) -> Vec<&Message> {
        let needle = value.to_lowercase();
        let mut found = Vec::new();
        self.collect_matches(criterion, &needle, &mut found);
        found
    }

    fn collect_matches<'a>(
        &'a self,
        criterion: Criterion,
        needle: &str,
        found: &mut Vec<&'a Message>,
    ) {
        found.extend(
            self.messages
                .iter()
                .filter(|m| criterion.matches_lowered(m, needle)),
        );
        for child in &self.children {
            child.collect_matches(criterion, needle, found);
        }
    }

    /// Paths of every descendant folder, relative to this folder, in
    /// depth-first order.
    #[must_use]
    pub fn folder_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        self.collect_paths("", &mut paths);
        paths
    }

    fn collect_paths(&self, prefix: &str, paths: &mut Vec<String>) {
        for child in &self.children {
            let path = if prefix.is_empty() {
                child.name.clone()
            } else {
                format!("{prefix}{SEPARATOR}{}", child.name)
            };
            paths.push(path.clone());
            child.collect_paths(&path, paths);
        }
    }
}
