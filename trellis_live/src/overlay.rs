// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Base/animated value overlays.
//!
//! A [`LiveValue`] pairs an attribute-backed base list with a memory-backed
//! animated list. While an animated overlay is installed the effective view
//! reads from the overlay; the base keeps tracking the attribute text
//! underneath and shows through again the moment the overlay is cleared.
//! The effective view is read-only at all times: structural edits go
//! through [`LiveValue::base_mut`], overlay installation through
//! [`LiveValue::set_animated_value`].

use alloc::boxed::Box;
use alloc::vec::Vec;
use smallvec::SmallVec;

use trellis_value::{ListValue, ScalarValue};

use crate::document::{AttributeChange, AttributeDocument};
use crate::error::LiveError;
use crate::list::LiveList;
use crate::scalar::LiveScalar;

/// Which half of an overlay changed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ValueChange {
    /// The attribute-backed base value changed.
    Base,
    /// An animated overlay was installed, updated, or cleared.
    Animated,
}

/// Callback invoked when either half of an overlay changes.
pub type ValueChangedCallback = Box<dyn Fn(ValueChange) + Send + Sync>;

/// Handle for removing a registered callback.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ListenerId(u32);

#[derive(Default)]
struct Listeners {
    entries: SmallVec<[(ListenerId, ValueChangedCallback); 1]>,
    next_id: u32,
}

impl Listeners {
    fn add(&mut self, callback: ValueChangedCallback) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, callback));
        id
    }

    fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    fn notify(&self, change: ValueChange) {
        for (_, callback) in &self.entries {
            callback(change);
        }
    }
}

impl core::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.entries.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

/// An attribute-backed list with an optional animated overlay.
///
/// # Example
///
/// ```rust
/// use trellis_live::{AttributeDocument, LiveValue, QualName};
/// use trellis_value::Number;
///
/// const VALUES: QualName = QualName::local("values");
///
/// let mut doc = AttributeDocument::new();
/// doc.set(VALUES, "1 2 3");
///
/// let mut value = LiveValue::<Number>::new(VALUES, &mut doc);
/// assert_eq!(value.len(&doc), 3);
///
/// value.set_animated_value(Some(&[Number(5.0), Number(6.0)]), &mut doc);
/// assert_eq!(value.len(&doc), 2);
/// assert_eq!(*value.item(0, &doc).unwrap(), Number(5.0));
///
/// value.set_animated_value(None, &mut doc);
/// assert_eq!(value.len(&doc), 3);
/// ```
#[derive(Debug)]
pub struct LiveValue<T: ListValue> {
    base: LiveList<T>,
    animated: LiveList<T>,
    has_animated: bool,
    listeners: Listeners,
}

impl<T: ListValue> LiveValue<T> {
    /// Creates an overlay over the given document attribute.
    #[must_use]
    pub fn new(name: crate::QualName, doc: &mut AttributeDocument) -> Self {
        Self {
            base: LiveList::attribute_backed(name, doc),
            animated: LiveList::memory_backed(),
            has_animated: false,
            listeners: Listeners::default(),
        }
    }

    /// Returns `true` while an animated overlay is installed.
    #[must_use]
    pub fn has_animated(&self) -> bool {
        self.has_animated
    }

    /// The attribute-backed base list.
    ///
    /// Mutations through this view take effect on the attribute text even
    /// while an overlay masks them; they become visible through the
    /// effective view once the overlay is cleared.
    pub fn base_mut(&mut self) -> &mut LiveList<T> {
        &mut self.base
    }

    fn effective(&mut self) -> &mut LiveList<T> {
        if self.has_animated {
            &mut self.animated
        } else {
            &mut self.base
        }
    }

    /// Number of items in the effective view.
    pub fn len(&mut self, doc: &AttributeDocument) -> usize {
        self.effective().len(doc)
    }

    /// Returns `true` if the effective view is empty.
    pub fn is_empty(&mut self, doc: &AttributeDocument) -> bool {
        self.len(doc) == 0
    }

    /// The item at `index` in the effective view.
    pub fn item(&mut self, index: usize, doc: &AttributeDocument) -> Result<&T, LiveError> {
        self.effective().item(index, doc)
    }

    /// All items of the effective view.
    pub fn items(&mut self, doc: &AttributeDocument) -> &[T] {
        self.effective().items(doc)
    }

    /// Extracts the effective items by value.
    pub fn values(&mut self, doc: &AttributeDocument) -> Vec<T> {
        // One clone per index; the cache is already revalidated by `len`.
        let count = self.len(doc);
        let mut out = Vec::with_capacity(count);
        for index in 0..count {
            if let Ok(item) = self.effective().item(index, doc) {
                out.push(item.clone());
            }
        }
        out
    }

    /// Rejected: the effective view is read-only.
    pub fn append(&mut self, _item: T) -> Result<(), LiveError> {
        Err(LiveError::ReadOnly)
    }

    /// Rejected: the effective view is read-only.
    pub fn insert_before(&mut self, _item: T, _index: usize) -> Result<(), LiveError> {
        Err(LiveError::ReadOnly)
    }

    /// Rejected: the effective view is read-only.
    pub fn replace(&mut self, _item: T, _index: usize) -> Result<(), LiveError> {
        Err(LiveError::ReadOnly)
    }

    /// Rejected: the effective view is read-only.
    pub fn remove(&mut self, _index: usize) -> Result<T, LiveError> {
        Err(LiveError::ReadOnly)
    }

    /// Rejected: the effective view is read-only.
    pub fn clear(&mut self) -> Result<(), LiveError> {
        Err(LiveError::ReadOnly)
    }

    /// Rejected: the effective view is read-only.
    pub fn initialize(&mut self, _item: T) -> Result<(), LiveError> {
        Err(LiveError::ReadOnly)
    }

    /// Installs or clears the animated overlay.
    ///
    /// Installing reuses the existing animated items index-by-index over
    /// the overlapping range and appends or truncates the rest; `None`
    /// clears the overlay so reads revert to the current base contents.
    /// Listeners are notified either way.
    pub fn set_animated_value(&mut self, values: Option<&[T]>, doc: &mut AttributeDocument) {
        match values {
            Some(values) => {
                self.animated.assign(values, doc);
                self.has_animated = true;
            }
            None => {
                self.has_animated = false;
            }
        }
        self.listeners.notify(ValueChange::Animated);
    }

    /// Forwards a drained document change to the base list.
    ///
    /// Fires base listeners for every change of the backing attribute,
    /// whether it came from outside or from the base list's own
    /// write-back; only the former invalidates the cache.
    pub fn handle_change(&mut self, change: &AttributeChange) {
        let relevant = self.base.attribute_name() == Some(change.name);
        self.base.handle_change(change);
        if relevant {
            self.listeners.notify(ValueChange::Base);
        }
    }

    /// Validates the base attribute, unless an overlay masks it.
    pub fn check(&mut self, doc: &AttributeDocument) -> Result<(), LiveError> {
        if self.has_animated {
            return Ok(());
        }
        self.base.check(doc)
    }

    /// Registers a change callback.
    pub fn on_changed(&mut self, callback: ValueChangedCallback) -> ListenerId {
        self.listeners.add(callback)
    }

    /// Removes a callback; returns `true` if it was registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }
}

/// An attribute-backed scalar with an optional animated override.
///
/// The scalar counterpart of [`LiveValue`], for length, number, rect, and
/// enumeration attributes.
#[derive(Debug)]
pub struct LiveScalarValue<T: ScalarValue> {
    base: LiveScalar<T>,
    animated: Option<T>,
    listeners: Listeners,
}

impl<T: ScalarValue> LiveScalarValue<T> {
    /// Creates an overlay over the given document attribute.
    #[must_use]
    pub fn new(name: crate::QualName, doc: &mut AttributeDocument) -> Self {
        Self {
            base: LiveScalar::attribute_backed(name, doc),
            animated: None,
            listeners: Listeners::default(),
        }
    }

    /// Returns `true` while an animated override is installed.
    #[must_use]
    pub fn has_animated(&self) -> bool {
        self.animated.is_some()
    }

    /// The attribute-backed base value.
    pub fn base_mut(&mut self) -> &mut LiveScalar<T> {
        &mut self.base
    }

    /// The effective value: the override if installed, else the base.
    pub fn get(&mut self, doc: &AttributeDocument) -> &T {
        if let Some(animated) = &self.animated {
            animated
        } else {
            self.base.get(doc)
        }
    }

    /// Installs or clears the animated override.
    pub fn set_animated_value(&mut self, value: Option<T>) {
        self.animated = value;
        self.listeners.notify(ValueChange::Animated);
    }

    /// Forwards a drained document change to the base value.
    pub fn handle_change(&mut self, change: &AttributeChange) {
        let relevant = self.base.attribute_name() == change.name;
        self.base.handle_change(change);
        if relevant {
            self.listeners.notify(ValueChange::Base);
        }
    }

    /// Validates the base attribute, unless an override masks it.
    pub fn check(&mut self, doc: &AttributeDocument) -> Result<(), LiveError> {
        if self.animated.is_some() {
            return Ok(());
        }
        self.base.check(doc)
    }

    /// Registers a change callback.
    pub fn on_changed(&mut self, callback: ValueChangedCallback) -> ListenerId {
        self.listeners.add(callback)
    }

    /// Removes a callback; returns `true` if it was registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::sync::Arc;
    use core::sync::atomic::{AtomicUsize, Ordering};

    use trellis_value::{Length, LengthUnit, Number};

    use crate::QualName;

    const VALUES: QualName = QualName::local("values");
    const WIDTH: QualName = QualName::local("width");

    fn doc_with(text: &str) -> AttributeDocument {
        let mut doc = AttributeDocument::new();
        doc.set(VALUES, text);
        doc.drain_changes();
        doc
    }

    #[test]
    fn overlay_masks_and_reverts() {
        let mut doc = doc_with("1 2 3");
        let mut value = LiveValue::<Number>::new(VALUES, &mut doc);

        value.set_animated_value(Some(&[Number(5.0), Number(6.0)]), &mut doc);
        assert!(value.has_animated());
        assert_eq!(value.len(&doc), 2);
        assert_eq!(*value.item(0, &doc).unwrap(), Number(5.0));

        value.set_animated_value(None, &mut doc);
        assert!(!value.has_animated());
        assert_eq!(value.len(&doc), 3);
        assert_eq!(*value.item(0, &doc).unwrap(), Number(1.0));
    }

    #[test]
    fn effective_view_is_read_only() {
        let mut doc = doc_with("1 2 3");
        let mut value = LiveValue::<Number>::new(VALUES, &mut doc);
        value.set_animated_value(Some(&[Number(5.0)]), &mut doc);

        assert_eq!(value.append(Number(9.0)), Err(LiveError::ReadOnly));
        assert_eq!(value.replace(Number(9.0), 0), Err(LiveError::ReadOnly));
        assert_eq!(value.remove(0), Err(LiveError::ReadOnly));
        assert_eq!(value.clear(), Err(LiveError::ReadOnly));
        assert_eq!(value.initialize(Number(9.0)), Err(LiveError::ReadOnly));
        assert_eq!(
            value.insert_before(Number(9.0), 0),
            Err(LiveError::ReadOnly)
        );
    }

    #[test]
    fn base_writes_take_effect_under_overlay() {
        let mut doc = doc_with("1 2 3");
        let mut value = LiveValue::<Number>::new(VALUES, &mut doc);
        value.set_animated_value(Some(&[Number(5.0)]), &mut doc);

        value.base_mut().append(Number(4.0), &mut doc);
        // Masked while animated...
        assert_eq!(value.len(&doc), 1);
        assert_eq!(doc.get(VALUES), Some("1 2 3 4"));

        // ...visible once cleared.
        value.set_animated_value(None, &mut doc);
        assert_eq!(value.len(&doc), 4);
    }

    #[test]
    fn install_reuses_items_index_by_index() {
        let mut doc = doc_with("");
        let mut value = LiveValue::<Number>::new(VALUES, &mut doc);

        value.set_animated_value(Some(&[Number(1.0), Number(2.0), Number(3.0)]), &mut doc);
        value.set_animated_value(Some(&[Number(7.0)]), &mut doc);
        assert_eq!(value.len(&doc), 1);
        assert_eq!(*value.item(0, &doc).unwrap(), Number(7.0));

        value.set_animated_value(Some(&[Number(8.0), Number(9.0)]), &mut doc);
        assert_eq!(value.values(&doc), [Number(8.0), Number(9.0)]);
    }

    #[test]
    fn values_uses_each_index() {
        // Regression: extraction must walk the loop index, not read the
        // same position `len` times.
        let mut doc = doc_with("10 20 30 40");
        let mut value = LiveValue::<Number>::new(VALUES, &mut doc);

        let values = value.values(&doc);
        assert_eq!(
            values,
            [Number(10.0), Number(20.0), Number(30.0), Number(40.0)]
        );
        for (index, extracted) in values.iter().enumerate() {
            assert_eq!(extracted, value.item(index, &doc).unwrap());
        }
    }

    #[test]
    fn check_masked_by_overlay() {
        // Malformed base text...
        let mut doc = doc_with("1 x");
        let mut value = LiveValue::<Number>::new(VALUES, &mut doc);
        assert!(matches!(
            value.check(&doc),
            Err(LiveError::Malformed { .. })
        ));

        // ...is masked while animated.
        value.set_animated_value(Some(&[Number(1.0)]), &mut doc);
        assert!(value.check(&doc).is_ok());

        value.set_animated_value(None, &mut doc);
        assert!(value.check(&doc).is_err());
    }

    #[test]
    fn listener_fan_out() {
        let mut doc = doc_with("1");
        let mut value = LiveValue::<Number>::new(VALUES, &mut doc);

        let base_count = Arc::new(AtomicUsize::new(0));
        let animated_count = Arc::new(AtomicUsize::new(0));
        let (b, a) = (base_count.clone(), animated_count.clone());
        let id = value.on_changed(Box::new(move |change| {
            match change {
                ValueChange::Base => b.fetch_add(1, Ordering::SeqCst),
                ValueChange::Animated => a.fetch_add(1, Ordering::SeqCst),
            };
        }));

        value.set_animated_value(Some(&[Number(2.0)]), &mut doc);
        assert_eq!(animated_count.load(Ordering::SeqCst), 1);

        doc.set(VALUES, "9");
        for change in doc.drain_changes() {
            value.handle_change(&change);
        }
        assert_eq!(base_count.load(Ordering::SeqCst), 1);

        assert!(value.remove_listener(id));
        assert!(!value.remove_listener(id));
        value.set_animated_value(None, &mut doc);
        assert_eq!(animated_count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn scalar_overlay() {
        let mut doc = AttributeDocument::new();
        doc.set(WIDTH, "10px");
        doc.drain_changes();

        let mut width = LiveScalarValue::<Length>::new(WIDTH, &mut doc);
        assert_eq!(*width.get(&doc), Length::new(10.0, LengthUnit::Px));

        width.set_animated_value(Some(Length::new(50.0, LengthUnit::Percent)));
        assert_eq!(*width.get(&doc), Length::new(50.0, LengthUnit::Percent));
        // The attribute text is untouched by animation.
        assert_eq!(doc.get(WIDTH), Some("10px"));

        width.set_animated_value(None);
        assert_eq!(*width.get(&doc), Length::new(10.0, LengthUnit::Px));
    }
}
