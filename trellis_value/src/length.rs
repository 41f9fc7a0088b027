// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The length grammar: a number with an optional unit suffix.

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `sqrt`

use crate::stream::{ParseError, ParseErrorKind, Stream};
use crate::{ListValue, ScalarValue, write_number};

/// Unit of a [`Length`] value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LengthUnit {
    /// Bare number: user units.
    #[default]
    None,
    /// CSS pixels; identical to user units here.
    Px,
    /// Relative to the context font size.
    Em,
    /// Relative to the context x-height (approximated as half the font size).
    Ex,
    /// Inches (96 user units).
    In,
    /// Centimeters.
    Cm,
    /// Millimeters.
    Mm,
    /// Points (1/72 in).
    Pt,
    /// Picas (16 user units).
    Pc,
    /// Percentage of a viewport dimension; see [`LengthAxis`].
    Percent,
}

impl LengthUnit {
    fn suffix(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Px => "px",
            Self::Em => "em",
            Self::Ex => "ex",
            Self::In => "in",
            Self::Cm => "cm",
            Self::Mm => "mm",
            Self::Pt => "pt",
            Self::Pc => "pc",
            Self::Percent => "%",
        }
    }

    fn from_suffix(suffix: &str) -> Option<Self> {
        Some(match suffix {
            "" => Self::None,
            "px" => Self::Px,
            "em" => Self::Em,
            "ex" => Self::Ex,
            "in" => Self::In,
            "cm" => Self::Cm,
            "mm" => Self::Mm,
            "pt" => Self::Pt,
            "pc" => Self::Pc,
            _ => return None,
        })
    }
}

/// Which viewport dimension a percentage length is measured against.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LengthAxis {
    /// Percentages resolve against the viewport width.
    Horizontal,
    /// Percentages resolve against the viewport height.
    Vertical,
    /// Percentages resolve against the normalized viewport diagonal.
    #[default]
    Other,
}

/// Resolution context for relative length units.
///
/// This is the percentage-interpretation lookup consumed from the animation
/// collaborator, reduced to the data it actually supplies.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LengthContext {
    /// Viewport width in user units.
    pub viewport_width: f64,
    /// Viewport height in user units.
    pub viewport_height: f64,
    /// Font size in user units, for `em`/`ex`.
    pub font_size: f64,
}

impl LengthContext {
    fn percentage_base(&self, axis: LengthAxis) -> f64 {
        match axis {
            LengthAxis::Horizontal => self.viewport_width,
            LengthAxis::Vertical => self.viewport_height,
            LengthAxis::Other => {
                // Normalized diagonal per the SVG definition:
                // sqrt(w^2 + h^2) / sqrt(2).
                let w = self.viewport_width;
                let h = self.viewport_height;
                (w * w + h * h).sqrt() / core::f64::consts::SQRT_2
            }
        }
    }
}

/// A length: a number paired with a [`LengthUnit`].
///
/// # Example
///
/// ```rust
/// use trellis_value::{Length, LengthUnit, ScalarValue};
///
/// let length = Length::parse("1.5em").unwrap();
/// assert_eq!(length, Length::new(1.5, LengthUnit::Em));
/// assert_eq!(length.serialize(), "1.5em");
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Length {
    /// The numeric part, in `unit` units.
    pub value: f64,
    /// The unit the value is expressed in.
    pub unit: LengthUnit,
}

impl Length {
    /// Creates a length from a value and unit.
    #[must_use]
    pub fn new(value: f64, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    /// Resolves this length to user units.
    ///
    /// `axis` selects the reference dimension for percentages.
    #[must_use]
    pub fn resolve(&self, ctx: &LengthContext, axis: LengthAxis) -> f64 {
        match self.unit {
            LengthUnit::None | LengthUnit::Px => self.value,
            LengthUnit::Em => self.value * ctx.font_size,
            LengthUnit::Ex => self.value * ctx.font_size * 0.5,
            LengthUnit::In => self.value * 96.0,
            LengthUnit::Cm => self.value * 96.0 / 2.54,
            LengthUnit::Mm => self.value * 96.0 / 25.4,
            LengthUnit::Pt => self.value * 96.0 / 72.0,
            LengthUnit::Pc => self.value * 16.0,
            LengthUnit::Percent => self.value / 100.0 * ctx.percentage_base(axis),
        }
    }

    fn parse_one(s: &mut Stream<'_>) -> Result<Self, ParseError> {
        let value = s.parse_number()?;
        let unit = if s.peek() == Some(b'%') {
            s.advance();
            LengthUnit::Percent
        } else {
            let at = s.position();
            let suffix = s.parse_ident();
            LengthUnit::from_suffix(suffix).ok_or(ParseError {
                pos: at,
                kind: ParseErrorKind::UnknownKeyword,
            })?
        };
        Ok(Self { value, unit })
    }
}

impl ScalarValue for Length {
    fn parse(text: &str) -> Result<Self, ParseError> {
        let mut s = Stream::new(text);
        s.skip_ws();
        let length = Self::parse_one(&mut s)?;
        s.expect_end()?;
        Ok(length)
    }

    fn write_text(&self, out: &mut String) {
        write_number(self.value, out);
        out.push_str(self.unit.suffix());
    }
}

impl ListValue for Length {
    const SEPARATOR: &'static str = " ";

    fn parse_list(text: &str) -> Result<Vec<Self>, ParseError> {
        let mut s = Stream::new(text);
        let mut items = Vec::new();
        s.skip_ws();
        while !s.at_end() {
            items.push(Self::parse_one(&mut s)?);
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
        ScalarValue::write_text(self, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> LengthContext {
        LengthContext {
            viewport_width: 300.0,
            viewport_height: 400.0,
            font_size: 16.0,
        }
    }

    #[test]
    fn parse_units() {
        assert_eq!(Length::parse("10").unwrap().unit, LengthUnit::None);
        assert_eq!(Length::parse("10px").unwrap().unit, LengthUnit::Px);
        assert_eq!(Length::parse("-2.5em").unwrap().unit, LengthUnit::Em);
        assert_eq!(Length::parse("50%").unwrap().unit, LengthUnit::Percent);
        assert!(Length::parse("10vw").is_err());
        assert!(Length::parse("px").is_err());
    }

    #[test]
    fn resolve_absolute() {
        let c = ctx();
        assert_eq!(Length::new(10.0, LengthUnit::None).resolve(&c, LengthAxis::Other), 10.0);
        assert_eq!(Length::new(1.0, LengthUnit::In).resolve(&c, LengthAxis::Other), 96.0);
        assert_eq!(Length::new(72.0, LengthUnit::Pt).resolve(&c, LengthAxis::Other), 96.0);
        assert_eq!(Length::new(2.0, LengthUnit::Em).resolve(&c, LengthAxis::Other), 32.0);
    }

    #[test]
    fn resolve_percent_axes() {
        let c = ctx();
        let half = Length::new(50.0, LengthUnit::Percent);
        assert_eq!(half.resolve(&c, LengthAxis::Horizontal), 150.0);
        assert_eq!(half.resolve(&c, LengthAxis::Vertical), 200.0);
        // 50% of sqrt(300^2 + 400^2) / sqrt(2) = 250 / sqrt(2) * ... = 176.77...
        let diagonal = half.resolve(&c, LengthAxis::Other);
        assert!((diagonal - 250.0 / core::f64::consts::SQRT_2).abs() < 1e-9);
    }

    #[test]
    fn trailing_comma_fails() {
        assert!(Length::parse_list("10px, 50%,").is_err());
        assert!(Length::parse_list("10px ").is_ok());
    }

    #[test]
    fn list_round_trip() {
        let items = Length::parse_list("10px, 50% 2em").unwrap();
        assert_eq!(items.len(), 3);
        let text = Length::serialize_list(&items);
        assert_eq!(text, "10px 50% 2em");
        assert_eq!(Length::parse_list(&text).unwrap(), items);
    }
}
