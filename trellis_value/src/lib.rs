// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Value: structured attribute value types and their text grammars.
//!
//! This crate defines the item types that make up structured attribute
//! values — numbers, lengths, points, path segments, transforms, rects, and
//! enumerations — together with one grammar module per kind for converting
//! between attribute text and item sequences.
//!
//! The live-value engine (`trellis_live`) is generic over two seams defined
//! here:
//!
//! - [`ListValue`]: an item of a list-kind value (one path segment, one
//!   transform function, one point, ...). Knows its list separator and how
//!   to parse a whole list and render one item.
//! - [`ScalarValue`]: a single-valued kind (a length, a rect, an
//!   enumeration keyword).
//!
//! Every grammar obeys the round-trip law: serializing an item sequence and
//! re-parsing it yields an equivalent sequence, though numeric formatting
//! may differ from the original text.
//!
//! ## Quick Start
//!
//! ```rust
//! use trellis_value::{ListValue, Number};
//!
//! let numbers = Number::parse_list("10, 20 30").unwrap();
//! assert_eq!(numbers, [Number(10.0), Number(20.0), Number(30.0)]);
//! assert_eq!(Number::serialize_list(&numbers), "10 20 30");
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. Enable the `libm` feature for
//! float math on targets without `std`.

#![no_std]

extern crate alloc;

mod enumeration;
mod length;
mod number;
mod path;
mod point;
mod rect;
mod stream;
mod transform;

pub use enumeration::{Enumeration, SpreadMethod};
pub use length::{Length, LengthAxis, LengthContext, LengthUnit};
pub use number::Number;
pub use path::{CoordinateMode, PathSeg};
pub use point::Point;
pub use rect::Rect;
pub use stream::{ParseError, ParseErrorKind, Stream};
pub use transform::Transform;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write as _;

/// An item of a list-kind attribute value.
///
/// Implementors define the grammar of one value kind: how a whole list is
/// parsed from attribute text and how a single item renders back to text.
pub trait ListValue: Clone + core::fmt::Debug + Sized {
    /// Separator emitted between items when serializing.
    const SEPARATOR: &'static str;

    /// Parses attribute text into an item sequence.
    ///
    /// Empty (or whitespace-only) text is the empty list, not an error.
    fn parse_list(text: &str) -> Result<Vec<Self>, ParseError>;

    /// Appends this item's textual form to `out`.
    fn write_text(&self, out: &mut String);

    /// Returns this item's textual form.
    #[must_use]
    fn item_text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }

    /// Serializes an item sequence to attribute text.
    #[must_use]
    fn serialize_list(items: &[Self]) -> String {
        let mut out = String::new();
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push_str(Self::SEPARATOR);
            }
            item.write_text(&mut out);
        }
        out
    }
}

/// A single-valued attribute kind.
pub trait ScalarValue: Clone + core::fmt::Debug + Default {
    /// Parses attribute text into one value. The whole input must match.
    fn parse(text: &str) -> Result<Self, ParseError>;

    /// Appends this value's textual form to `out`.
    fn write_text(&self, out: &mut String);

    /// Returns this value's textual form.
    #[must_use]
    fn serialize(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }
}

/// Writes `value` in the shortest form that parses back exactly.
///
/// Integral values are written without a fractional part (`10`, not `10.0`);
/// everything else uses the shortest round-tripping decimal form.
pub fn write_number(value: f64, out: &mut String) {
    // `f64`'s `Display` is already the shortest round-tripping form and
    // omits `.0` for integral values.
    let _ = write!(out, "{value}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_formatting() {
        let mut out = String::new();
        write_number(10.0, &mut out);
        out.push(' ');
        write_number(-3.25, &mut out);
        out.push(' ');
        write_number(0.1, &mut out);
        assert_eq!(out, "10 -3.25 0.1");
    }

    #[test]
    fn serialize_list_joins_with_separator() {
        let items = [Number(1.0), Number(2.0), Number(3.5)];
        assert_eq!(Number::serialize_list(&items), "1 2 3.5");
        assert_eq!(Number::serialize_list(&[]), "");
    }
}
