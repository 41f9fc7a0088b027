// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Geom: geometry passes over structured attribute values.
//!
//! Two passes that consume the typed values maintained by `trellis_live`:
//!
//! - [`normalize`] rewrites parsed path data into an absolute-cubic-only
//!   stream: `MoveTo`, `LineTo`, `CurveTo`, and `ClosePath`, all absolute.
//!   Relative commands, shorthands, quadratics, and elliptical arcs are
//!   resolved away.
//! - [`concatenate`] and [`consolidate`] fold a transform list into the
//!   single equivalent matrix, the latter rewriting the backing attribute
//!   text to one `matrix(...)` function.
//!
//! ## Quick Start
//!
//! ```rust
//! use trellis_geom::normalize;
//! use trellis_value::{ListValue, PathSeg};
//!
//! let segs = PathSeg::parse_list("M 0 0 Q 30 60 60 0 z").unwrap();
//! let cubic = normalize(&segs);
//! assert_eq!(
//!     PathSeg::serialize_list(&cubic),
//!     "M 0 0 C 20 40 40 40 60 0 Z"
//! );
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. Enable the `libm` feature for
//! float math on targets without `std`.

#![no_std]

extern crate alloc;

mod consolidate;
mod normalize;

pub use consolidate::{concatenate, consolidate};
pub use normalize::normalize;
