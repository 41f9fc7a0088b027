// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rect grammar: exactly four numbers (`x y width height`).

use alloc::string::String;

use crate::stream::{ParseError, Stream};
use crate::{ScalarValue, write_number};

/// A rectangle-valued attribute such as a view box.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    /// Minimum x.
    pub x: f64,
    /// Minimum y.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Creates a rect.
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl ScalarValue for Rect {
    fn parse(text: &str) -> Result<Self, ParseError> {
        let mut s = Stream::new(text);
        s.skip_ws();
        let x = s.parse_number()?;
        s.skip_ws_comma();
        let y = s.parse_number()?;
        s.skip_ws_comma();
        let width = s.parse_number()?;
        s.skip_ws_comma();
        let height = s.parse_number()?;
        s.expect_end()?;
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    fn write_text(&self, out: &mut String) {
        write_number(self.x, out);
        out.push(' ');
        write_number(self.y, out);
        out.push(' ');
        write_number(self.width, out);
        out.push(' ');
        write_number(self.height, out);
    }
}
