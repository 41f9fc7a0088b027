// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The path-data grammar: the SVG path mini-language.
//!
//! A command letter may be followed by several parameter groups without
//! restating the letter; each group becomes its own [`PathSeg`]. A repeated
//! `M`/`m` group after the first is an implicit `L`/`l`. Segments keep the
//! absolute/relative case of the command they were parsed from; conversion
//! to an absolute-cubic-only stream lives in `trellis_geom`.

use alloc::string::String;
use alloc::vec::Vec;

use crate::stream::{ParseError, ParseErrorKind, Stream};
use crate::{ListValue, write_number};

/// Whether a segment's coordinates are absolute or relative to the current
/// point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CoordinateMode {
    /// Uppercase command: coordinates are absolute.
    Absolute,
    /// Lowercase command: coordinates are offsets from the current point.
    Relative,
}

impl CoordinateMode {
    fn letter(self, base: u8) -> char {
        match self {
            Self::Absolute => base.to_ascii_uppercase() as char,
            Self::Relative => base.to_ascii_lowercase() as char,
        }
    }
}

/// One segment of a path-data attribute.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PathSeg {
    /// `M`/`m`: start a new subpath.
    MoveTo {
        /// Coordinate interpretation.
        mode: CoordinateMode,
        /// Target x.
        x: f64,
        /// Target y.
        y: f64,
    },
    /// `L`/`l`: straight line.
    LineTo {
        /// Coordinate interpretation.
        mode: CoordinateMode,
        /// Target x.
        x: f64,
        /// Target y.
        y: f64,
    },
    /// `H`/`h`: horizontal line.
    HLineTo {
        /// Coordinate interpretation.
        mode: CoordinateMode,
        /// Target x.
        x: f64,
    },
    /// `V`/`v`: vertical line.
    VLineTo {
        /// Coordinate interpretation.
        mode: CoordinateMode,
        /// Target y.
        y: f64,
    },
    /// `C`/`c`: cubic Bezier.
    CurveTo {
        /// Coordinate interpretation.
        mode: CoordinateMode,
        /// First control x.
        x1: f64,
        /// First control y.
        y1: f64,
        /// Second control x.
        x2: f64,
        /// Second control y.
        y2: f64,
        /// Target x.
        x: f64,
        /// Target y.
        y: f64,
    },
    /// `S`/`s`: cubic Bezier with reflected first control point.
    SmoothCurveTo {
        /// Coordinate interpretation.
        mode: CoordinateMode,
        /// Second control x.
        x2: f64,
        /// Second control y.
        y2: f64,
        /// Target x.
        x: f64,
        /// Target y.
        y: f64,
    },
    /// `Q`/`q`: quadratic Bezier.
    QuadTo {
        /// Coordinate interpretation.
        mode: CoordinateMode,
        /// Control x.
        x1: f64,
        /// Control y.
        y1: f64,
        /// Target x.
        x: f64,
        /// Target y.
        y: f64,
    },
    /// `T`/`t`: quadratic Bezier with reflected control point.
    SmoothQuadTo {
        /// Coordinate interpretation.
        mode: CoordinateMode,
        /// Target x.
        x: f64,
        /// Target y.
        y: f64,
    },
    /// `A`/`a`: elliptical arc.
    Arc {
        /// Coordinate interpretation.
        mode: CoordinateMode,
        /// X radius.
        rx: f64,
        /// Y radius.
        ry: f64,
        /// Rotation of the ellipse's x axis, in degrees.
        x_rotation: f64,
        /// Take the longer of the two candidate arcs.
        large_arc: bool,
        /// Sweep in the positive-angle direction.
        sweep: bool,
        /// Target x.
        x: f64,
        /// Target y.
        y: f64,
    },
    /// `Z`/`z`: close the current subpath.
    ClosePath,
}

impl PathSeg {
    /// Returns this segment's single-letter command code.
    #[must_use]
    pub fn command(&self) -> char {
        match *self {
            Self::MoveTo { mode, .. } => mode.letter(b'm'),
            Self::LineTo { mode, .. } => mode.letter(b'l'),
            Self::HLineTo { mode, .. } => mode.letter(b'h'),
            Self::VLineTo { mode, .. } => mode.letter(b'v'),
            Self::CurveTo { mode, .. } => mode.letter(b'c'),
            Self::SmoothCurveTo { mode, .. } => mode.letter(b's'),
            Self::QuadTo { mode, .. } => mode.letter(b'q'),
            Self::SmoothQuadTo { mode, .. } => mode.letter(b't'),
            Self::Arc { mode, .. } => mode.letter(b'a'),
            Self::ClosePath => 'Z',
        }
    }

    /// Absolute lineto constructor, used by the normalizer.
    #[must_use]
    pub fn line_to(x: f64, y: f64) -> Self {
        Self::LineTo {
            mode: CoordinateMode::Absolute,
            x,
            y,
        }
    }

    /// Absolute moveto constructor, used by the normalizer.
    #[must_use]
    pub fn move_to(x: f64, y: f64) -> Self {
        Self::MoveTo {
            mode: CoordinateMode::Absolute,
            x,
            y,
        }
    }

    /// Absolute curveto constructor, used by the normalizer.
    #[must_use]
    pub fn curve_to(x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) -> Self {
        Self::CurveTo {
            mode: CoordinateMode::Absolute,
            x1,
            y1,
            x2,
            y2,
            x,
            y,
        }
    }
}

fn mode_of(command: u8) -> CoordinateMode {
    if command.is_ascii_uppercase() {
        CoordinateMode::Absolute
    } else {
        CoordinateMode::Relative
    }
}

/// True when the byte at the cursor starts a parameter group rather than a
/// new command letter.
fn starts_parameters(s: &Stream<'_>) -> bool {
    matches!(s.peek(), Some(b'0'..=b'9' | b'+' | b'-' | b'.'))
}

fn parse_coord_pair(s: &mut Stream<'_>) -> Result<(f64, f64), ParseError> {
    let x = s.parse_number()?;
    s.skip_ws_comma();
    let y = s.parse_number()?;
    Ok((x, y))
}

fn parse_group(s: &mut Stream<'_>, command: u8) -> Result<PathSeg, ParseError> {
    let mode = mode_of(command);
    match command.to_ascii_lowercase() {
        b'm' => {
            let (x, y) = parse_coord_pair(s)?;
            Ok(PathSeg::MoveTo { mode, x, y })
        }
        b'l' => {
            let (x, y) = parse_coord_pair(s)?;
            Ok(PathSeg::LineTo { mode, x, y })
        }
        b'h' => Ok(PathSeg::HLineTo {
            mode,
            x: s.parse_number()?,
        }),
        b'v' => Ok(PathSeg::VLineTo {
            mode,
            y: s.parse_number()?,
        }),
        b'c' => {
            let (x1, y1) = parse_coord_pair(s)?;
            s.skip_ws_comma();
            let (x2, y2) = parse_coord_pair(s)?;
            s.skip_ws_comma();
            let (x, y) = parse_coord_pair(s)?;
            Ok(PathSeg::CurveTo {
                mode,
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            })
        }
        b's' => {
            let (x2, y2) = parse_coord_pair(s)?;
            s.skip_ws_comma();
            let (x, y) = parse_coord_pair(s)?;
            Ok(PathSeg::SmoothCurveTo { mode, x2, y2, x, y })
        }
        b'q' => {
            let (x1, y1) = parse_coord_pair(s)?;
            s.skip_ws_comma();
            let (x, y) = parse_coord_pair(s)?;
            Ok(PathSeg::QuadTo { mode, x1, y1, x, y })
        }
        b't' => {
            let (x, y) = parse_coord_pair(s)?;
            Ok(PathSeg::SmoothQuadTo { mode, x, y })
        }
        b'a' => {
            let rx = s.parse_number()?;
            s.skip_ws_comma();
            let ry = s.parse_number()?;
            s.skip_ws_comma();
            let x_rotation = s.parse_number()?;
            s.skip_ws_comma();
            let large_arc = s.parse_flag()?;
            s.skip_ws_comma();
            let sweep = s.parse_flag()?;
            s.skip_ws_comma();
            let (x, y) = parse_coord_pair(s)?;
            Ok(PathSeg::Arc {
                mode,
                rx,
                ry,
                x_rotation,
                large_arc,
                sweep,
                x,
                y,
            })
        }
        _ => Err(ParseError {
            pos: s.position(),
            kind: ParseErrorKind::UnexpectedChar { found: command },
        }),
    }
}

impl ListValue for PathSeg {
    const SEPARATOR: &'static str = " ";

    fn parse_list(text: &str) -> Result<Vec<Self>, ParseError> {
        let mut s = Stream::new(text);
        let mut segments = Vec::new();

        s.skip_ws();
        if s.at_end() {
            return Ok(segments);
        }
        // Path data must open with a moveto.
        if let Some(found) = s.peek()
            && !matches!(found, b'M' | b'm')
        {
            return Err(ParseError {
                pos: s.position(),
                kind: ParseErrorKind::UnexpectedChar { found },
            });
        }

        while !s.at_end() {
            let at = s.position();
            let command = s.peek().ok_or(ParseError {
                pos: at,
                kind: ParseErrorKind::UnexpectedEnd,
            })?;
            if !command.is_ascii_alphabetic() {
                return Err(ParseError {
                    pos: at,
                    kind: ParseErrorKind::UnexpectedChar { found: command },
                });
            }
            s.advance();
            s.skip_ws();

            if command.to_ascii_lowercase() == b'z' {
                segments.push(Self::ClosePath);
                s.skip_ws();
                continue;
            }

            segments.push(parse_group(&mut s, command)?);
            s.skip_ws_comma();

            // Implicit repetition: further parameter groups reuse the
            // command, except moveto which continues as lineto.
            let repeat = if command.to_ascii_lowercase() == b'm' {
                if mode_of(command) == CoordinateMode::Absolute {
                    b'L'
                } else {
                    b'l'
                }
            } else {
                command
            };
            while starts_parameters(&s) {
                segments.push(parse_group(&mut s, repeat)?);
                s.skip_ws_comma();
            }
        }

        Ok(segments)
    }

    fn write_text(&self, out: &mut String) {
        out.push(self.command());
        let push = |out: &mut String, value: f64| {
            out.push(' ');
            write_number(value, out);
        };
        match *self {
            Self::MoveTo { x, y, .. }
            | Self::LineTo { x, y, .. }
            | Self::SmoothQuadTo { x, y, .. } => {
                push(out, x);
                push(out, y);
            }
            Self::HLineTo { x, .. } => push(out, x),
            Self::VLineTo { y, .. } => push(out, y),
            Self::CurveTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
                ..
            } => {
                push(out, x1);
                push(out, y1);
                push(out, x2);
                push(out, y2);
                push(out, x);
                push(out, y);
            }
            Self::SmoothCurveTo { x2, y2, x, y, .. } => {
                push(out, x2);
                push(out, y2);
                push(out, x);
                push(out, y);
            }
            Self::QuadTo { x1, y1, x, y, .. } => {
                push(out, x1);
                push(out, y1);
                push(out, x);
                push(out, y);
            }
            Self::Arc {
                rx,
                ry,
                x_rotation,
                large_arc,
                sweep,
                x,
                y,
                ..
            } => {
                push(out, rx);
                push(out, ry);
                push(out, x_rotation);
                out.push(' ');
                out.push(if large_arc { '1' } else { '0' });
                out.push(' ');
                out.push(if sweep { '1' } else { '0' });
                push(out, x);
                push(out, y);
            }
            Self::ClosePath => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CoordinateMode::{Absolute, Relative};

    #[test]
    fn basic_commands() {
        let segs = PathSeg::parse_list("M 10 20 L 30 40 Z").unwrap();
        assert_eq!(
            segs,
            [
                PathSeg::move_to(10.0, 20.0),
                PathSeg::line_to(30.0, 40.0),
                PathSeg::ClosePath,
            ]
        );
    }

    #[test]
    fn relative_case_is_preserved() {
        let segs = PathSeg::parse_list("m 1 2 l 3 4 h 5 v -6").unwrap();
        assert_eq!(
            segs,
            [
                PathSeg::MoveTo {
                    mode: Relative,
                    x: 1.0,
                    y: 2.0
                },
                PathSeg::LineTo {
                    mode: Relative,
                    x: 3.0,
                    y: 4.0
                },
                PathSeg::HLineTo { mode: Relative, x: 5.0 },
                PathSeg::VLineTo { mode: Relative, y: -6.0 },
            ]
        );
    }

    #[test]
    fn implicit_repetition() {
        let segs = PathSeg::parse_list("L 1 2 3 4");
        // Path data must start with a moveto.
        assert!(segs.is_err());

        let segs = PathSeg::parse_list("M 0 0 C 1 1 2 2 3 3 4 4 5 5 6 6").unwrap();
        assert_eq!(segs.len(), 3);
        assert_eq!(
            segs[2],
            PathSeg::curve_to(4.0, 4.0, 5.0, 5.0, 6.0, 6.0)
        );
    }

    #[test]
    fn moveto_continues_as_lineto() {
        let segs = PathSeg::parse_list("M 10 20 30 40 50 60").unwrap();
        assert_eq!(
            segs,
            [
                PathSeg::move_to(10.0, 20.0),
                PathSeg::line_to(30.0, 40.0),
                PathSeg::line_to(50.0, 60.0),
            ]
        );

        let segs = PathSeg::parse_list("m 10 20 30 40").unwrap();
        assert_eq!(
            segs[1],
            PathSeg::LineTo {
                mode: Relative,
                x: 30.0,
                y: 40.0
            }
        );
    }

    #[test]
    fn compact_arc_flags() {
        // Flags need no separator from the following number.
        let segs = PathSeg::parse_list("M10-20A5.5.3-4 110-.1").unwrap();
        assert_eq!(segs[0], PathSeg::move_to(10.0, -20.0));
        assert_eq!(
            segs[1],
            PathSeg::Arc {
                mode: Absolute,
                rx: 5.5,
                ry: 0.3,
                x_rotation: -4.0,
                large_arc: true,
                sweep: true,
                x: 0.0,
                y: -0.1,
            }
        );
    }

    #[test]
    fn round_trip() {
        let text = "M 10 20 c 1 2 3 4 5 6 S 7 8 9 10 Q 1 1 2 2 t 3 3 A 5 5 30 1 0 40 40 Z";
        let segs = PathSeg::parse_list(text).unwrap();
        let serialized = PathSeg::serialize_list(&segs);
        assert_eq!(PathSeg::parse_list(&serialized).unwrap(), segs);
    }

    #[test]
    fn trailing_separator_is_tolerated() {
        // Unlike the flat list grammars, path data does not treat a
        // dangling comma after the last group as an error.
        let segs = PathSeg::parse_list("M 0 0 L 10 10, ").unwrap();
        assert_eq!(segs.len(), 2);
    }

    #[test]
    fn garbage_command_fails() {
        assert!(PathSeg::parse_list("M 0 0 X 1 2").is_err());
        assert!(PathSeg::parse_list("M 0").is_err());
    }
}
