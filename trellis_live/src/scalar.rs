// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Live scalar values: the list protocol for single-valued kinds.
//!
//! Lengths, numbers, rects, and enumerations follow the same
//! revalidate/write-back contract as [`LiveList`](crate::LiveList), minus
//! the structural operations.

use alloc::string::ToString;

use trellis_value::{Enumeration, ScalarValue};

use crate::document::{AttributeChange, AttributeDocument, OriginId};
use crate::error::LiveError;
use crate::name::QualName;

/// A live, lazily-revalidated scalar value.
///
/// # Example
///
/// ```rust
/// use trellis_live::{AttributeDocument, LiveScalar, QualName};
/// use trellis_value::{Length, LengthUnit};
///
/// const WIDTH: QualName = QualName::local("width");
///
/// let mut doc = AttributeDocument::new();
/// doc.set(WIDTH, "50%");
///
/// let mut width = LiveScalar::<Length>::attribute_backed(WIDTH, &mut doc);
/// assert_eq!(*width.get(&doc), Length::new(50.0, LengthUnit::Percent));
///
/// width.set(Length::new(120.0, LengthUnit::Px), &mut doc);
/// assert_eq!(doc.get(WIDTH), Some("120px"));
/// ```
#[derive(Clone, Debug)]
pub struct LiveScalar<T: ScalarValue> {
    name: QualName,
    origin: OriginId,
    value: T,
    valid: bool,
    malformed: bool,
}

impl<T: ScalarValue> LiveScalar<T> {
    /// Creates a scalar backed by the given document attribute.
    #[must_use]
    pub fn attribute_backed(name: QualName, doc: &mut AttributeDocument) -> Self {
        Self {
            name,
            origin: doc.register_origin(),
            value: T::default(),
            valid: false,
            malformed: false,
        }
    }

    /// Returns the backing attribute name.
    #[must_use]
    pub fn attribute_name(&self) -> QualName {
        self.name
    }

    /// Returns `true` if the cached value is current.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Re-parses the backing text if the cache is stale.
    ///
    /// Absent text and parse failures both fall back to `T::default()`;
    /// only the latter taints the value for [`check`](Self::check).
    pub fn revalidate(&mut self, doc: &AttributeDocument) {
        if self.valid {
            return;
        }
        self.malformed = false;
        self.value = match doc.get(self.name) {
            Some(text) => T::parse(text).unwrap_or_else(|_| {
                self.malformed = true;
                T::default()
            }),
            None => T::default(),
        };
        self.valid = true;
    }

    /// Returns the current value.
    pub fn get(&mut self, doc: &AttributeDocument) -> &T {
        self.revalidate(doc);
        &self.value
    }

    /// Sets the value, writing it back to the attribute.
    pub fn set(&mut self, value: T, doc: &mut AttributeDocument) {
        let text = value.serialize();
        self.value = value;
        self.malformed = false;
        let mut scope = doc.begin_self_change(self.origin);
        scope.set(self.name, &text);
        self.valid = true;
    }

    /// Reacts to a drained document change; see
    /// [`LiveList::handle_change`](crate::LiveList::handle_change).
    pub fn handle_change(&mut self, change: &AttributeChange) -> bool {
        if change.name != self.name || change.origin == Some(self.origin) {
            return false;
        }
        self.valid = false;
        self.malformed = false;
        true
    }

    /// Validates the backing attribute.
    pub fn check(&mut self, doc: &AttributeDocument) -> Result<(), LiveError> {
        self.revalidate(doc);
        match doc.get(self.name) {
            None => Err(LiveError::Missing { name: self.name }),
            Some(text) if self.malformed => Err(LiveError::Malformed {
                name: self.name,
                text: text.to_string(),
            }),
            Some(_) => Ok(()),
        }
    }
}

impl<T: ScalarValue + Enumeration> LiveScalar<T> {
    /// Sets the value by numeric index.
    ///
    /// Index `0` is reserved for "unknown" and indices past the keyword set
    /// are rejected with [`LiveError::TypeMismatch`] before any write-back.
    pub fn set_index(&mut self, index: u16, doc: &mut AttributeDocument) -> Result<(), LiveError> {
        let value = T::from_index(index).ok_or(LiveError::TypeMismatch { expected: T::NAME })?;
        self.set(value, doc);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_value::{Number, Rect, SpreadMethod};

    const X: QualName = QualName::local("x");
    const SPREAD: QualName = QualName::local("spreadMethod");

    #[test]
    fn default_when_absent() {
        let mut doc = AttributeDocument::new();
        let mut x = LiveScalar::<Number>::attribute_backed(X, &mut doc);
        assert_eq!(*x.get(&doc), Number(0.0));
        assert!(matches!(x.check(&doc), Err(LiveError::Missing { .. })));
    }

    #[test]
    fn set_writes_back_and_stays_valid() {
        let mut doc = AttributeDocument::new();
        let mut x = LiveScalar::<Number>::attribute_backed(X, &mut doc);
        x.set(Number(42.0), &mut doc);
        assert_eq!(doc.get(X), Some("42"));

        for change in doc.drain_changes() {
            assert!(!x.handle_change(&change));
        }
        assert!(x.is_valid());
    }

    #[test]
    fn external_change_invalidates() {
        let mut doc = AttributeDocument::new();
        doc.set(X, "1");
        doc.drain_changes();

        let mut x = LiveScalar::<Number>::attribute_backed(X, &mut doc);
        assert_eq!(*x.get(&doc), Number(1.0));

        doc.set(X, "2");
        for change in doc.drain_changes() {
            assert!(x.handle_change(&change));
        }
        assert_eq!(*x.get(&doc), Number(2.0));
    }

    #[test]
    fn malformed_scalar() {
        let mut doc = AttributeDocument::new();
        doc.set(X, "wat");
        doc.drain_changes();

        let mut x = LiveScalar::<Rect>::attribute_backed(X, &mut doc);
        assert_eq!(*x.get(&doc), Rect::default());
        assert!(matches!(x.check(&doc), Err(LiveError::Malformed { .. })));

        // Setting a good value clears the taint.
        x.set(Rect::new(0.0, 0.0, 10.0, 10.0), &mut doc);
        assert!(x.check(&doc).is_ok());
    }

    #[test]
    fn enumeration_index() {
        let mut doc = AttributeDocument::new();
        let mut spread = LiveScalar::<SpreadMethod>::attribute_backed(SPREAD, &mut doc);

        spread.set_index(2, &mut doc).unwrap();
        assert_eq!(doc.get(SPREAD), Some("reflect"));

        // Unknown indices are a type mismatch and leave the text alone.
        assert_eq!(
            spread.set_index(0, &mut doc).unwrap_err(),
            LiveError::TypeMismatch {
                expected: "spread method"
            }
        );
        assert_eq!(
            spread.set_index(9, &mut doc).unwrap_err(),
            LiveError::TypeMismatch {
                expected: "spread method"
            }
        );
        assert_eq!(doc.get(SPREAD), Some("reflect"));
    }
}
