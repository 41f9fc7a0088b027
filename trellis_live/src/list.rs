// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The structured-list engine.
//!
//! [`LiveList`] is the one generic container behind every list-kind
//! attribute value. It caches parsed items, revalidates lazily from the
//! backing text, and writes every structural mutation back through a
//! self-change scope so its own edits don't invalidate it.
//!
//! The backing is chosen at construction: attribute-backed lists read and
//! write document text; memory-backed lists (used for animated overlays)
//! keep their serialized form privately and are never invalidated from
//! outside.

use alloc::string::{String, ToString};
use smallvec::SmallVec;

use trellis_value::ListValue;

use crate::document::{AttributeChange, AttributeDocument, OriginId};
use crate::error::LiveError;
use crate::name::QualName;

/// Inline capacity for cached items.
///
/// Most list attributes in real documents hold only a handful of items
/// (a few points, two or three transforms), so this avoids heap allocation
/// in the common case. Path data routinely exceeds it and spills.
const INLINE_ITEMS: usize = 4;

/// What a [`LiveList`] reads from and writes to.
#[derive(Clone, Debug)]
pub(crate) enum Backing {
    /// Backed by document attribute text.
    Attribute {
        /// The backing attribute.
        name: QualName,
        /// This list's identity for change attribution.
        origin: OriginId,
    },
    /// Backed by private text; used for animated overlay values.
    Memory {
        /// The serialized form, `None` until first written.
        text: Option<String>,
    },
}

/// A live, lazily-revalidated list of structured items.
///
/// # Example
///
/// ```rust
/// use trellis_live::{AttributeDocument, LiveList, QualName};
/// use trellis_value::Number;
///
/// const VALUES: QualName = QualName::local("values");
///
/// let mut doc = AttributeDocument::new();
/// doc.set(VALUES, "10 20 30");
///
/// let mut list = LiveList::<Number>::attribute_backed(VALUES, &mut doc);
/// assert_eq!(list.len(&doc), 3);
/// assert_eq!(*list.item(1, &doc).unwrap(), Number(20.0));
///
/// list.append(Number(40.0), &mut doc);
/// assert_eq!(doc.get(VALUES), Some("10 20 30 40"));
/// ```
#[derive(Clone, Debug)]
pub struct LiveList<T: ListValue> {
    backing: Backing,
    items: SmallVec<[T; INLINE_ITEMS]>,
    valid: bool,
    malformed: bool,
}

impl<T: ListValue> LiveList<T> {
    /// Creates a list backed by the given document attribute.
    ///
    /// The list starts invalid; the first read parses the current text.
    #[must_use]
    pub fn attribute_backed(name: QualName, doc: &mut AttributeDocument) -> Self {
        Self {
            backing: Backing::Attribute {
                name,
                origin: doc.register_origin(),
            },
            items: SmallVec::new(),
            valid: false,
            malformed: false,
        }
    }

    /// Creates an empty memory-backed list.
    #[must_use]
    pub fn memory_backed() -> Self {
        Self {
            backing: Backing::Memory { text: None },
            items: SmallVec::new(),
            valid: true,
            malformed: false,
        }
    }

    /// Returns the backing attribute name, or `None` for memory backing.
    #[must_use]
    pub fn attribute_name(&self) -> Option<QualName> {
        match &self.backing {
            Backing::Attribute { name, .. } => Some(*name),
            Backing::Memory { .. } => None,
        }
    }

    /// Returns `true` if the cached items are current.
    ///
    /// A mutation through this list's own API leaves it valid; only an
    /// external change to the backing text clears the flag.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Re-parses the backing text if the cache is stale.
    ///
    /// A parse failure adopts the empty sequence and taints the list as
    /// malformed instead of failing the read; the taint is surfaced only by
    /// [`check`](Self::check). The list is marked valid either way so bad
    /// text is not re-parsed on every read.
    pub fn revalidate(&mut self, doc: &AttributeDocument) {
        if self.valid {
            return;
        }
        let text = match &self.backing {
            Backing::Attribute { name, .. } => doc.get(*name),
            Backing::Memory { text } => text.as_deref(),
        };
        self.items.clear();
        self.malformed = false;
        if let Some(text) = text {
            match T::parse_list(text) {
                Ok(items) => self.items = SmallVec::from_vec(items),
                Err(_) => self.malformed = true,
            }
        }
        self.valid = true;
    }

    /// Returns the number of items.
    pub fn len(&mut self, doc: &AttributeDocument) -> usize {
        self.revalidate(doc);
        self.items.len()
    }

    /// Returns `true` if the list has no items.
    pub fn is_empty(&mut self, doc: &AttributeDocument) -> bool {
        self.len(doc) == 0
    }

    /// Returns the item at `index`.
    pub fn item(&mut self, index: usize, doc: &AttributeDocument) -> Result<&T, LiveError> {
        self.revalidate(doc);
        let len = self.items.len();
        self.items
            .get(index)
            .ok_or(LiveError::IndexOutOfBounds { index, len })
    }

    /// Returns all items.
    pub fn items(&mut self, doc: &AttributeDocument) -> &[T] {
        self.revalidate(doc);
        &self.items
    }

    /// Removes all items.
    pub fn clear(&mut self, doc: &mut AttributeDocument) {
        self.revalidate(doc);
        self.items.clear();
        self.write_back(doc);
    }

    /// Replaces the whole list with one item.
    pub fn initialize(&mut self, item: T, doc: &mut AttributeDocument) {
        self.revalidate(doc);
        self.items.clear();
        self.items.push(item);
        self.write_back(doc);
    }

    /// Inserts `item` before `index`; an index past the end appends.
    pub fn insert_before(&mut self, item: T, index: usize, doc: &mut AttributeDocument) {
        self.revalidate(doc);
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        self.write_back(doc);
    }

    /// Replaces the item at `index`.
    pub fn replace(
        &mut self,
        item: T,
        index: usize,
        doc: &mut AttributeDocument,
    ) -> Result<(), LiveError> {
        self.revalidate(doc);
        let len = self.items.len();
        let slot = self
            .items
            .get_mut(index)
            .ok_or(LiveError::IndexOutOfBounds { index, len })?;
        *slot = item;
        self.write_back(doc);
        Ok(())
    }

    /// Removes and returns the item at `index`.
    pub fn remove(&mut self, index: usize, doc: &mut AttributeDocument) -> Result<T, LiveError> {
        self.revalidate(doc);
        let len = self.items.len();
        if index >= len {
            return Err(LiveError::IndexOutOfBounds { index, len });
        }
        let removed = self.items.remove(index);
        self.write_back(doc);
        Ok(removed)
    }

    /// Appends `item`.
    ///
    /// When the list is non-empty and its attribute text is non-empty, the
    /// write-back concatenates `SEPARATOR + item` onto the existing text
    /// instead of re-serializing the whole list. The result is equivalent
    /// to a full re-serialization up to numeric formatting of the untouched
    /// prefix.
    pub fn append(&mut self, item: T, doc: &mut AttributeDocument) {
        self.revalidate(doc);
        let appended = match &self.backing {
            Backing::Attribute { name, .. } if !self.items.is_empty() => doc
                .get(*name)
                .filter(|text| !text.is_empty())
                .map(|existing| {
                    let mut text = String::from(existing);
                    text.push_str(T::SEPARATOR);
                    item.write_text(&mut text);
                    text
                }),
            _ => None,
        };
        self.items.push(item);
        match appended {
            Some(text) => self.write_text_back(text, doc),
            None => self.write_back(doc),
        }
    }

    /// Reacts to a drained document change.
    ///
    /// Returns `true` if the change invalidated this list. Changes carrying
    /// this list's own origin are its write-backs echoing back and are
    /// ignored; so are changes to other attributes.
    pub fn handle_change(&mut self, change: &AttributeChange) -> bool {
        let Backing::Attribute { name, origin } = &self.backing else {
            return false;
        };
        if change.name != *name || change.origin == Some(*origin) {
            return false;
        }
        self.valid = false;
        self.malformed = false;
        true
    }

    /// Validates the backing attribute.
    ///
    /// Errors with [`LiveError::Missing`] when the attribute is absent and
    /// [`LiveError::Malformed`] when its text failed to parse. An empty
    /// attribute is a present, well-formed empty list.
    pub fn check(&mut self, doc: &AttributeDocument) -> Result<(), LiveError> {
        self.revalidate(doc);
        let Backing::Attribute { name, .. } = &self.backing else {
            // Memory text is only ever produced by serialization and
            // cannot be missing or malformed.
            return Ok(());
        };
        let name = *name;
        match doc.get(name) {
            None => Err(LiveError::Missing { name }),
            Some(text) if self.malformed => Err(LiveError::Malformed {
                name,
                text: text.to_string(),
            }),
            Some(_) => Ok(()),
        }
    }

    /// Overwrites the list contents, reusing existing item slots
    /// index-by-index and appending or truncating the remainder.
    pub(crate) fn assign(&mut self, values: &[T], doc: &mut AttributeDocument) {
        self.revalidate(doc);
        let reused = self.items.len().min(values.len());
        for (slot, value) in self.items.iter_mut().zip(values) {
            *slot = value.clone();
        }
        if values.len() > reused {
            self.items.extend(values[reused..].iter().cloned());
        } else {
            self.items.truncate(values.len());
        }
        self.write_back(doc);
    }

    /// Serializes the cached items and writes them to the backing.
    fn write_back(&mut self, doc: &mut AttributeDocument) {
        let text = T::serialize_list(&self.items);
        self.write_text_back(text, doc);
    }

    fn write_text_back(&mut self, text: String, doc: &mut AttributeDocument) {
        match &mut self.backing {
            Backing::Attribute { name, origin } => {
                let mut scope = doc.begin_self_change(*origin);
                scope.set(*name, &text);
            }
            Backing::Memory { text: slot } => *slot = Some(text),
        }
        // The serialized text is parseable, so any taint from the previous
        // backing text is gone.
        self.malformed = false;
        self.valid = true;
    }
}
