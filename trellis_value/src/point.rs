// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The point-list grammar: an even run of coordinates.

use alloc::string::String;
use alloc::vec::Vec;

use crate::stream::{ParseError, ParseErrorKind, Stream};
use crate::{ListValue, write_number};

/// One point of a point-list attribute.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    /// Horizontal coordinate in user units.
    pub x: f64,
    /// Vertical coordinate in user units.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl ListValue for Point {
    const SEPARATOR: &'static str = " ";

    fn parse_list(text: &str) -> Result<Vec<Self>, ParseError> {
        let mut s = Stream::new(text);
        let mut items = Vec::new();
        s.skip_ws();
        while !s.at_end() {
            let x = s.parse_number()?;
            s.skip_ws_comma();
            // An odd number of coordinates leaves a dangling x.
            if s.at_end() {
                return Err(ParseError {
                    pos: s.position(),
                    kind: ParseErrorKind::UnexpectedEnd,
                });
            }
            let y = s.parse_number()?;
            items.push(Self { x, y });
            let comma = s.skip_ws_comma();
            // A comma promises another pair.
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
        write_number(self.x, out);
        out.push(',');
        write_number(self.y, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_forms() {
        let expected = [Point::new(1.0, 2.0), Point::new(3.0, 4.0)];
        assert_eq!(Point::parse_list("1,2 3,4").unwrap(), expected);
        assert_eq!(Point::parse_list("1 2 3 4").unwrap(), expected);
        assert_eq!(Point::parse_list(" 1, 2, 3, 4 ").unwrap(), expected);
    }

    #[test]
    fn odd_coordinate_count_fails() {
        assert_eq!(
            Point::parse_list("1 2 3").unwrap_err().kind,
            ParseErrorKind::UnexpectedEnd
        );
    }

    #[test]
    fn trailing_comma_fails() {
        assert_eq!(
            Point::parse_list("1,2 3,4,").unwrap_err().kind,
            ParseErrorKind::UnexpectedEnd
        );
        assert!(Point::parse_list("1,2 3,4 ").is_ok());
    }

    #[test]
    fn round_trip() {
        let items = Point::parse_list("0,0 10,0 10,10").unwrap();
        let text = Point::serialize_list(&items);
        assert_eq!(text, "0,0 10,0 10,10");
        assert_eq!(Point::parse_list(&text).unwrap(), items);
    }
}
