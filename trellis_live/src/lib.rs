// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Live: Live attribute-backed value views.
//!
//! This crate keeps typed views of attribute text synchronized with an
//! [`AttributeDocument`] in both directions. Grammar parsing and
//! serialization live in `trellis_value`; this crate adds the caching,
//! invalidation, and write-back machinery around them.
//!
//! ## Core Concepts
//!
//! ### Lazy validation
//!
//! [`LiveList`] and [`LiveScalar`] parse their backing attribute on first
//! read after construction or invalidation, never eagerly. Malformed text
//! reads as the empty list (or the type's default) and only surfaces as an
//! error through `check()`.
//!
//! ### Write-back and suppression
//!
//! Typed mutations reserialize the items and write the text back through a
//! [`SelfChangeScope`], tagging the resulting [`AttributeChange`] records
//! with the view's own [`OriginId`]. When the records are later drained and
//! dispatched, each view ignores its own records and invalidates on
//! everyone else's.
//!
//! ### Overlays
//!
//! [`LiveValue`] and [`LiveScalarValue`] pair an attribute-backed base with
//! a detached animated value. Reads resolve to the overlay while one is
//! installed; the base keeps tracking the attribute underneath.
//!
//! ## Quick Start
//!
//! ```rust
//! use trellis_live::{AttributeDocument, LiveList, QualName};
//! use trellis_value::Number;
//!
//! const VALUES: QualName = QualName::local("values");
//!
//! let mut doc = AttributeDocument::new();
//! doc.set(VALUES, "1 2 3");
//! doc.drain_changes();
//!
//! let mut list = LiveList::<Number>::attribute_backed(VALUES, &mut doc);
//! assert_eq!(list.len(&doc), 3);
//!
//! // Typed edits write back to the attribute text.
//! list.append(Number(4.0), &mut doc);
//! assert_eq!(doc.get(VALUES), Some("1 2 3 4"));
//!
//! // The views' own write-backs are ignored on dispatch; external
//! // changes invalidate the cache.
//! for change in doc.drain_changes() {
//!     list.handle_change(&change);
//! }
//! assert!(list.is_valid());
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod document;
mod error;
mod list;
mod name;
mod overlay;
mod scalar;

pub use document::{
    AttributeChange, AttributeDocument, ChangeKind, OriginId, SelfChangeScope,
};
pub use error::LiveError;
pub use list::LiveList;
pub use name::QualName;
pub use overlay::{
    ListenerId, LiveScalarValue, LiveValue, ValueChange, ValueChangedCallback,
};
pub use scalar::LiveScalar;
