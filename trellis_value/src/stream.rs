// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Byte-cursor tokenizer shared by all attribute grammars.
//!
//! Every grammar in this crate scans its input through [`Stream`]: a
//! position-tracking cursor with primitives for SVG whitespace, the
//! comma-or-whitespace list separator, numbers, and keyword idents.

use core::fmt;

/// Error produced when attribute text violates its grammar.
///
/// Parse errors carry the byte offset at which scanning stopped, so a
/// malformed attribute can be reported with context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    /// Byte offset into the input at which the error was detected.
    pub pos: usize,
    /// What went wrong.
    pub kind: ParseErrorKind,
}

/// The specific grammar violation behind a [`ParseError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The input ended where more tokens were required.
    UnexpectedEnd,
    /// A number was expected but the text at the cursor is not one.
    InvalidNumber,
    /// A specific byte was expected.
    UnexpectedChar {
        /// The byte actually found.
        found: u8,
    },
    /// An identifier was scanned but is not a keyword of this grammar.
    UnknownKeyword,
    /// The grammar was satisfied but input remains.
    TrailingGarbage,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseErrorKind::UnexpectedEnd => {
                write!(f, "unexpected end of input at offset {}", self.pos)
            }
            ParseErrorKind::InvalidNumber => {
                write!(f, "invalid number at offset {}", self.pos)
            }
            ParseErrorKind::UnexpectedChar { found } => {
                write!(
                    f,
                    "unexpected character {:?} at offset {}",
                    found as char, self.pos
                )
            }
            ParseErrorKind::UnknownKeyword => {
                write!(f, "unknown keyword at offset {}", self.pos)
            }
            ParseErrorKind::TrailingGarbage => {
                write!(f, "trailing characters at offset {}", self.pos)
            }
        }
    }
}

impl core::error::Error for ParseError {}

/// Returns `true` for SVG whitespace (space, tab, CR, LF).
#[inline]
const fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n')
}

/// A streaming cursor over attribute text.
///
/// # Example
///
/// ```rust
/// use trellis_value::Stream;
///
/// let mut s = Stream::new(" 10, 20 ");
/// s.skip_ws();
/// assert_eq!(s.parse_number().unwrap(), 10.0);
/// s.skip_ws_comma();
/// assert_eq!(s.parse_number().unwrap(), 20.0);
/// s.skip_ws();
/// assert!(s.at_end());
/// ```
#[derive(Clone, Debug)]
pub struct Stream<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Stream<'a> {
    /// Creates a cursor at the start of `text`.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// Returns the current byte offset.
    #[must_use]
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns `true` if the cursor has consumed all input.
    #[must_use]
    #[inline]
    pub fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Returns the byte at the cursor without consuming it.
    #[must_use]
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    /// Consumes one byte.
    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    /// Skips SVG whitespace.
    pub fn skip_ws(&mut self) {
        while self.peek().is_some_and(is_space) {
            self.pos += 1;
        }
    }

    /// Skips whitespace with at most one embedded comma.
    ///
    /// This is the list-item separator shared by number, length, point, and
    /// transform lists: `ws* ','? ws*`. Returns `true` if a comma was
    /// consumed, so grammars that forbid a trailing comma can tell a
    /// separator from mere whitespace.
    pub fn skip_ws_comma(&mut self) -> bool {
        self.skip_ws();
        if self.peek() == Some(b',') {
            self.pos += 1;
            self.skip_ws();
            true
        } else {
            false
        }
    }

    /// Consumes `byte` or fails with `UnexpectedChar`/`UnexpectedEnd`.
    pub fn expect(&mut self, byte: u8) -> Result<(), ParseError> {
        match self.peek() {
            Some(found) if found == byte => {
                self.pos += 1;
                Ok(())
            }
            Some(found) => Err(ParseError {
                pos: self.pos,
                kind: ParseErrorKind::UnexpectedChar { found },
            }),
            None => Err(ParseError {
                pos: self.pos,
                kind: ParseErrorKind::UnexpectedEnd,
            }),
        }
    }

    /// Fails with `TrailingGarbage` unless the remaining input is whitespace.
    pub fn expect_end(&mut self) -> Result<(), ParseError> {
        self.skip_ws();
        if self.at_end() {
            Ok(())
        } else {
            Err(ParseError {
                pos: self.pos,
                kind: ParseErrorKind::TrailingGarbage,
            })
        }
    }

    /// Scans an ASCII-alphabetic identifier (possibly empty).
    ///
    /// Used for length units, transform function names, and enumeration
    /// keywords.
    pub fn parse_ident(&mut self) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_alphabetic()) {
            self.pos += 1;
        }
        &self.text[start..self.pos]
    }

    /// Scans one number: `sign? (digits ('.' digits?)? | '.' digits) exponent?`.
    ///
    /// Scanning stops at the first byte that cannot extend the number, so
    /// run-together path data like `10-20` or `-.5.5` yields two numbers.
    pub fn parse_number(&mut self) -> Result<f64, ParseError> {
        let start = self.pos;
        let bytes = self.text.as_bytes();
        let mut i = self.pos;

        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let int_digits = Self::scan_digits(bytes, &mut i);
        let mut frac_digits = 0;
        if bytes.get(i) == Some(&b'.') {
            // A '.' with no digits on either side is not a number.
            i += 1;
            frac_digits = Self::scan_digits(bytes, &mut i);
        }
        if int_digits == 0 && frac_digits == 0 {
            return Err(ParseError {
                pos: start,
                kind: if i >= bytes.len() {
                    ParseErrorKind::UnexpectedEnd
                } else {
                    ParseErrorKind::InvalidNumber
                },
            });
        }
        // Exponent, only when followed by at least one digit. A lone `e`
        // may be the start of an `em`/`ex` unit suffix.
        if matches!(bytes.get(i), Some(b'e' | b'E')) {
            let mut j = i + 1;
            if matches!(bytes.get(j), Some(b'+' | b'-')) {
                j += 1;
            }
            if Self::scan_digits(bytes, &mut j) > 0 {
                i = j;
            }
        }

        let number = self.text[start..i].parse::<f64>().map_err(|_| ParseError {
            pos: start,
            kind: ParseErrorKind::InvalidNumber,
        })?;
        if !number.is_finite() {
            return Err(ParseError {
                pos: start,
                kind: ParseErrorKind::InvalidNumber,
            });
        }
        self.pos = i;
        Ok(number)
    }

    /// Scans a single `0`/`1` arc flag.
    ///
    /// Arc flags are single characters and need no separator from the next
    /// number, so `110-.1` is two flags followed by `-0.1`.
    pub fn parse_flag(&mut self) -> Result<bool, ParseError> {
        match self.peek() {
            Some(b'0') => {
                self.pos += 1;
                Ok(false)
            }
            Some(b'1') => {
                self.pos += 1;
                Ok(true)
            }
            Some(found) => Err(ParseError {
                pos: self.pos,
                kind: ParseErrorKind::UnexpectedChar { found },
            }),
            None => Err(ParseError {
                pos: self.pos,
                kind: ParseErrorKind::UnexpectedEnd,
            }),
        }
    }

    fn scan_digits(bytes: &[u8], i: &mut usize) -> usize {
        let start = *i;
        while bytes.get(*i).is_some_and(u8::is_ascii_digit) {
            *i += 1;
        }
        *i - start
    }
}
