// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The attribute document collaborator.
//!
//! [`AttributeDocument`] owns the serialized attribute text and records an
//! [`AttributeChange`] for every mutation. The element glue drains the
//! change log and dispatches each record to the live values watching that
//! attribute; a record produced by a live value's own write-back carries
//! that value's [`OriginId`], which is how self-invalidation is suppressed.
//!
//! Suppression is scoped: [`AttributeDocument::begin_self_change`] returns
//! a guard whose mutations are tagged with the origin and whose `Drop` ends
//! the window on every exit path, including early returns and panics.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use hashbrown::HashMap;

use crate::name::QualName;

/// Identity of a live value for change attribution.
///
/// Handed out by [`AttributeDocument::register_origin`]; a live value tags
/// its own write-backs with its origin and ignores change records carrying
/// it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OriginId(u32);

/// How an attribute changed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    /// The attribute did not exist before.
    Added,
    /// The attribute existed and its text was replaced.
    Modified,
    /// The attribute was removed.
    Removed,
}

/// One recorded attribute mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeChange {
    /// The attribute that changed.
    pub name: QualName,
    /// Added, modified, or removed.
    pub kind: ChangeKind,
    /// Text before the change, if any.
    pub old: Option<String>,
    /// Text after the change, if any.
    pub new: Option<String>,
    /// The live value that performed the mutation, or `None` for external
    /// edits.
    pub origin: Option<OriginId>,
}

/// Attribute text storage with change recording.
///
/// # Example
///
/// ```rust
/// use trellis_live::{AttributeDocument, ChangeKind, QualName};
///
/// const POINTS: QualName = QualName::local("points");
///
/// let mut doc = AttributeDocument::new();
/// doc.set(POINTS, "0,0 10,10");
/// assert_eq!(doc.get(POINTS), Some("0,0 10,10"));
///
/// let changes = doc.drain_changes();
/// assert_eq!(changes.len(), 1);
/// assert_eq!(changes[0].kind, ChangeKind::Added);
/// assert_eq!(changes[0].origin, None);
/// ```
#[derive(Debug, Default)]
pub struct AttributeDocument {
    attrs: HashMap<QualName, String>,
    changes: Vec<AttributeChange>,
    active_origin: Option<OriginId>,
    next_origin: u32,
}

impl AttributeDocument {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the attribute's text, if present.
    #[must_use]
    pub fn get(&self, name: QualName) -> Option<&str> {
        self.attrs.get(&name).map(String::as_str)
    }

    /// Returns `true` if the attribute is present.
    #[must_use]
    pub fn contains(&self, name: QualName) -> bool {
        self.attrs.contains_key(&name)
    }

    /// Sets the attribute's text, recording an `Added` or `Modified` change.
    pub fn set(&mut self, name: QualName, value: &str) {
        let old = self.attrs.insert(name, value.to_string());
        let kind = if old.is_some() {
            ChangeKind::Modified
        } else {
            ChangeKind::Added
        };
        self.changes.push(AttributeChange {
            name,
            kind,
            old,
            new: Some(value.to_string()),
            origin: self.active_origin,
        });
    }

    /// Removes the attribute, recording a `Removed` change if it existed.
    pub fn remove(&mut self, name: QualName) {
        if let Some(old) = self.attrs.remove(&name) {
            self.changes.push(AttributeChange {
                name,
                kind: ChangeKind::Removed,
                old: Some(old),
                new: None,
                origin: self.active_origin,
            });
        }
    }

    /// Allocates an [`OriginId`] for a new live value.
    pub fn register_origin(&mut self) -> OriginId {
        let id = OriginId(self.next_origin);
        self.next_origin += 1;
        id
    }

    /// Opens a self-change window: mutations made through the returned
    /// scope are attributed to `origin`.
    ///
    /// The window closes when the scope is dropped, on every exit path.
    pub fn begin_self_change(&mut self, origin: OriginId) -> SelfChangeScope<'_> {
        self.active_origin = Some(origin);
        SelfChangeScope { doc: self }
    }

    /// Takes all recorded changes, oldest first.
    ///
    /// The element glue dispatches these to the live values watching each
    /// attribute.
    pub fn drain_changes(&mut self) -> Vec<AttributeChange> {
        core::mem::take(&mut self.changes)
    }

    /// Returns `true` if there are undrained changes.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// Drop guard for an attribute-document self-change window.
///
/// See [`AttributeDocument::begin_self_change`].
#[derive(Debug)]
pub struct SelfChangeScope<'a> {
    doc: &'a mut AttributeDocument,
}

impl SelfChangeScope<'_> {
    /// Sets an attribute, attributed to the scope's origin.
    pub fn set(&mut self, name: QualName, value: &str) {
        self.doc.set(name, value);
    }

    /// Removes an attribute, attributed to the scope's origin.
    pub fn remove(&mut self, name: QualName) {
        self.doc.remove(name);
    }
}

impl Drop for SelfChangeScope<'_> {
    fn drop(&mut self) {
        self.doc.active_origin = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const D: QualName = QualName::local("d");

    #[test]
    fn change_kinds() {
        let mut doc = AttributeDocument::new();
        doc.set(D, "M 0 0");
        doc.set(D, "M 1 1");
        doc.remove(D);
        // Removing an absent attribute records nothing.
        doc.remove(D);

        let changes = doc.drain_changes();
        assert_eq!(changes.len(), 3);
        assert_eq!(changes[0].kind, ChangeKind::Added);
        assert_eq!(changes[0].old, None);
        assert_eq!(changes[1].kind, ChangeKind::Modified);
        assert_eq!(changes[1].old.as_deref(), Some("M 0 0"));
        assert_eq!(changes[2].kind, ChangeKind::Removed);
        assert_eq!(changes[2].new, None);
        assert!(!doc.has_changes());
    }

    #[test]
    fn self_change_attribution() {
        let mut doc = AttributeDocument::new();
        let origin = doc.register_origin();

        {
            let mut scope = doc.begin_self_change(origin);
            scope.set(D, "M 0 0");
        }
        // Outside the scope, edits are external again.
        doc.set(D, "M 1 1");

        let changes = doc.drain_changes();
        assert_eq!(changes[0].origin, Some(origin));
        assert_eq!(changes[1].origin, None);
    }

    #[test]
    fn scope_closes_on_early_exit() {
        fn write_or_bail(doc: &mut AttributeDocument, origin: OriginId, bail: bool) {
            let mut scope = doc.begin_self_change(origin);
            if bail {
                return;
            }
            scope.set(D, "M 0 0");
        }

        let mut doc = AttributeDocument::new();
        let origin = doc.register_origin();
        write_or_bail(&mut doc, origin, true);
        doc.set(D, "external");
        assert_eq!(doc.drain_changes()[0].origin, None);
    }

    #[test]
    fn distinct_origins() {
        let mut doc = AttributeDocument::new();
        assert_ne!(doc.register_origin(), doc.register_origin());
    }
}
