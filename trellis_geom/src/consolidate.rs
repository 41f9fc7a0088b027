// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transform-list consolidation.
//!
//! A transform attribute applies its functions left to right: each item
//! transforms the coordinate system established by the items before it.
//! [`concatenate`] folds a live list into the single equivalent matrix;
//! [`consolidate`] additionally rewrites the list (and thereby the
//! attribute text) down to that one `matrix(...)` item.

use kurbo::Affine;

use trellis_live::{AttributeDocument, LiveList};
use trellis_value::Transform;

/// The single matrix equivalent to applying the whole list in order.
///
/// Returns `None` for an empty list, which leaves "no transform"
/// distinguishable from an explicit identity.
#[must_use]
pub fn concatenate(list: &mut LiveList<Transform>, doc: &AttributeDocument) -> Option<Affine> {
    let items = list.items(doc);
    if items.is_empty() {
        return None;
    }
    let mut total = Affine::IDENTITY;
    for item in items {
        // `a * b` applies `b` first, so appending on the right matches the
        // list's left-to-right application order.
        total *= item.matrix();
    }
    Some(total)
}

/// Collapses the list to one [`Transform::Matrix`] item in place.
///
/// The replacement goes through the ordinary write-back path, so the
/// backing attribute text becomes a single `matrix(...)` function. An
/// empty list is left untouched.
///
/// # Example
///
/// ```rust
/// use trellis_geom::consolidate;
/// use trellis_live::{AttributeDocument, LiveList, QualName};
/// use trellis_value::Transform;
///
/// const TRANSFORM: QualName = QualName::local("transform");
///
/// let mut doc = AttributeDocument::new();
/// doc.set(TRANSFORM, "translate(10, 20) scale(2)");
///
/// let mut list = LiveList::<Transform>::attribute_backed(TRANSFORM, &mut doc);
/// consolidate(&mut list, &mut doc);
/// assert_eq!(doc.get(TRANSFORM), Some("matrix(2, 0, 0, 2, 10, 20)"));
/// ```
pub fn consolidate(
    list: &mut LiveList<Transform>,
    doc: &mut AttributeDocument,
) -> Option<Affine> {
    let total = concatenate(list, doc)?;
    list.initialize(Transform::Matrix(total), doc);
    Some(total)
}
