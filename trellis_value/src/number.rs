// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The number grammar: comma/whitespace-separated floats.

use alloc::string::String;
use alloc::vec::Vec;

use crate::stream::{ParseError, ParseErrorKind, Stream};
use crate::{ListValue, ScalarValue, write_number};

/// One element of a number list, or a scalar number attribute.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Number(pub f64);

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl ListValue for Number {
    const SEPARATOR: &'static str = " ";

    fn parse_list(text: &str) -> Result<Vec<Self>, ParseError> {
        let mut s = Stream::new(text);
        let mut items = Vec::new();
        s.skip_ws();
        while !s.at_end() {
            items.push(Self(s.parse_number()?));
            let comma = s.skip_ws_comma();
            // A comma promises another item.
            if comma && s.at_end() {
                return Err(ParseError {
                    pos: s.position(),
                    kind: ParseErrorKind::UnexpectedEnd,
                });
            }
        }
        Ok(items)
    }

    fn write_text(&self, out: &mut String) {
        write_number(self.0, out);
    }
}

impl ScalarValue for Number {
    fn parse(text: &str) -> Result<Self, ParseError> {
        let mut s = Stream::new(text);
        s.skip_ws();
        let value = s.parse_number()?;
        s.expect_end()?;
        Ok(Self(value))
    }

    fn write_text(&self, out: &mut String) {
        write_number(self.0, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::ParseErrorKind;

    #[test]
    fn list_round_trip() {
        let items = Number::parse_list(" 1,2.5  3 ,4 ").unwrap();
        assert_eq!(
            items,
            [Number(1.0), Number(2.5), Number(3.0), Number(4.0)]
        );
        let text = Number::serialize_list(&items);
        assert_eq!(Number::parse_list(&text).unwrap(), items);
    }

    #[test]
    fn empty_is_empty_list() {
        assert!(Number::parse_list("").unwrap().is_empty());
        assert!(Number::parse_list("  \t\n").unwrap().is_empty());
    }

    #[test]
    fn trailing_comma_fails() {
        assert_eq!(
            Number::parse_list("1 2,").unwrap_err().kind,
            ParseErrorKind::UnexpectedEnd
        );
        assert!(Number::parse_list("1 2, ").is_err());
        // Trailing whitespace alone is fine.
        assert!(Number::parse_list("1 2 ").is_ok());
    }

    #[test]
    fn malformed_list() {
        let err = Number::parse_list("1 2 x").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidNumber);
        assert_eq!(err.pos, 4);
    }

    #[test]
    fn scalar_requires_whole_input() {
        assert_eq!(Number::parse("42").unwrap(), Number(42.0));
        assert!(Number::parse("42 7").is_err());
    }
}
