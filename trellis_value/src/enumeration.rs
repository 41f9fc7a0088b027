// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyword enumerations: closed keyword sets with dense numeric indices.
//!
//! Enumeration attributes expose both a keyword form (the attribute text)
//! and a numeric index form (the typed accessor). Index `0` is reserved for
//! "unknown" and is never a valid stored value, which is what makes setting
//! an out-of-range index a type mismatch in the live layer.

use alloc::string::String;

use crate::stream::{ParseError, ParseErrorKind, Stream};
use crate::ScalarValue;

/// A closed keyword set with a dense `u16` index range.
///
/// `from_index(0)` and indices past the last variant return `None`; the
/// live layer turns that into a type-mismatch error before any write-back.
pub trait Enumeration: Copy + Eq + core::fmt::Debug + Default + 'static {
    /// Human-readable kind name, used in error messages.
    const NAME: &'static str;

    /// Looks up a variant by its attribute keyword.
    fn from_keyword(keyword: &str) -> Option<Self>;

    /// Returns the attribute keyword of this variant.
    fn keyword(self) -> &'static str;

    /// Looks up a variant by numeric index (`1..`).
    fn from_index(index: u16) -> Option<Self>;

    /// Returns this variant's numeric index (`1..`).
    fn index(self) -> u16;
}

/// Gradient spread method, the canonical enumeration kind.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SpreadMethod {
    /// Extend the edge colors (`pad`).
    #[default]
    Pad,
    /// Mirror the gradient (`reflect`).
    Reflect,
    /// Tile the gradient (`repeat`).
    Repeat,
}

impl Enumeration for SpreadMethod {
    const NAME: &'static str = "spread method";

    fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "pad" => Self::Pad,
            "reflect" => Self::Reflect,
            "repeat" => Self::Repeat,
            _ => return None,
        })
    }

    fn keyword(self) -> &'static str {
        match self {
            Self::Pad => "pad",
            Self::Reflect => "reflect",
            Self::Repeat => "repeat",
        }
    }

    fn from_index(index: u16) -> Option<Self> {
        Some(match index {
            1 => Self::Pad,
            2 => Self::Reflect,
            3 => Self::Repeat,
            _ => return None,
        })
    }

    fn index(self) -> u16 {
        match self {
            Self::Pad => 1,
            Self::Reflect => 2,
            Self::Repeat => 3,
        }
    }
}

impl ScalarValue for SpreadMethod {
    fn parse(text: &str) -> Result<Self, ParseError> {
        let mut s = Stream::new(text);
        s.skip_ws();
        let at = s.position();
        let keyword = s.parse_ident();
        let value = Self::from_keyword(keyword).ok_or(ParseError {
            pos: at,
            kind: ParseErrorKind::UnknownKeyword,
        })?;
        s.expect_end()?;
        Ok(value)
    }

    fn write_text(&self, out: &mut String) {
        out.push_str(self.keyword());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_round_trip() {
        for method in [SpreadMethod::Pad, SpreadMethod::Reflect, SpreadMethod::Repeat] {
            assert_eq!(SpreadMethod::parse(method.keyword()).unwrap(), method);
            assert_eq!(SpreadMethod::from_index(method.index()), Some(method));
        }
    }

    #[test]
    fn unknown_keyword_fails() {
        assert_eq!(
            SpreadMethod::parse("mirror").unwrap_err().kind,
            ParseErrorKind::UnknownKeyword
        );
        // Case matters.
        assert!(SpreadMethod::parse("Pad").is_err());
    }

    #[test]
    fn zero_index_is_reserved() {
        assert_eq!(SpreadMethod::from_index(0), None);
        assert_eq!(SpreadMethod::from_index(4), None);
    }
}
