// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The transform-list grammar: `translate`, `scale`, `rotate`, `skewX`,
//! `skewY`, and `matrix` functions.
//!
//! Every item carries enough to reproduce its textual form and can
//! materialize its equivalent [`Affine`] matrix on demand.

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `tan`
use kurbo::{Affine, Point as KPoint, Vec2};

use crate::stream::{ParseError, ParseErrorKind, Stream};
use crate::{ListValue, write_number};

/// One function of a transform-list attribute.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Transform {
    /// `translate(tx[, ty])`; a missing `ty` parses as `0`.
    Translate {
        /// X offset.
        tx: f64,
        /// Y offset.
        ty: f64,
    },
    /// `scale(sx[, sy])`; a missing `sy` parses as `sx`.
    Scale {
        /// X factor.
        sx: f64,
        /// Y factor.
        sy: f64,
    },
    /// `rotate(angle[, cx, cy])`; the center defaults to the origin.
    Rotate {
        /// Rotation angle in degrees.
        angle: f64,
        /// Rotation center x.
        cx: f64,
        /// Rotation center y.
        cy: f64,
    },
    /// `skewX(angle)`, degrees.
    SkewX {
        /// Skew angle in degrees.
        angle: f64,
    },
    /// `skewY(angle)`, degrees.
    SkewY {
        /// Skew angle in degrees.
        angle: f64,
    },
    /// `matrix(a, b, c, d, e, f)`: an explicit affine.
    Matrix(Affine),
}

impl Transform {
    /// Materializes the equivalent affine matrix.
    #[must_use]
    pub fn matrix(&self) -> Affine {
        match *self {
            Self::Translate { tx, ty } => Affine::translate(Vec2::new(tx, ty)),
            Self::Scale { sx, sy } => Affine::scale_non_uniform(sx, sy),
            Self::Rotate { angle, cx, cy } => {
                Affine::rotate_about(angle.to_radians(), KPoint::new(cx, cy))
            }
            Self::SkewX { angle } => Affine::skew(angle.to_radians().tan(), 0.0),
            Self::SkewY { angle } => Affine::skew(0.0, angle.to_radians().tan()),
            Self::Matrix(affine) => affine,
        }
    }
}

/// Parses `count_min..=count_max` comma/whitespace-separated arguments
/// between parentheses.
fn parse_args(
    s: &mut Stream<'_>,
    min: usize,
    max: usize,
) -> Result<Vec<f64>, ParseError> {
    s.skip_ws();
    s.expect(b'(')?;
    s.skip_ws();
    let mut args = Vec::new();
    while args.len() < max {
        args.push(s.parse_number()?);
        let comma = s.skip_ws_comma();
        if s.peek() == Some(b')') {
            // A comma promises another argument.
            if comma {
                return Err(ParseError {
                    pos: s.position(),
                    kind: ParseErrorKind::UnexpectedChar { found: b')' },
                });
            }
            break;
        }
    }
    s.expect(b')')?;
    if args.len() < min {
        return Err(ParseError {
            pos: s.position(),
            kind: ParseErrorKind::UnexpectedEnd,
        });
    }
    Ok(args)
}

impl ListValue for Transform {
    const SEPARATOR: &'static str = " ";

    fn parse_list(text: &str) -> Result<Vec<Self>, ParseError> {
        let mut s = Stream::new(text);
        let mut items = Vec::new();
        s.skip_ws();
        while !s.at_end() {
            let at = s.position();
            let name = s.parse_ident();
            let item = match name {
                "translate" => {
                    let args = parse_args(&mut s, 1, 2)?;
                    Self::Translate {
                        tx: args[0],
                        ty: args.get(1).copied().unwrap_or(0.0),
                    }
                }
                "scale" => {
                    let args = parse_args(&mut s, 1, 2)?;
                    Self::Scale {
                        sx: args[0],
                        sy: args.get(1).copied().unwrap_or(args[0]),
                    }
                }
                "rotate" => {
                    let args = parse_args(&mut s, 1, 3)?;
                    if args.len() == 2 {
                        return Err(ParseError {
                            pos: s.position(),
                            kind: ParseErrorKind::UnexpectedEnd,
                        });
                    }
                    Self::Rotate {
                        angle: args[0],
                        cx: args.get(1).copied().unwrap_or(0.0),
                        cy: args.get(2).copied().unwrap_or(0.0),
                    }
                }
                "skewX" => Self::SkewX {
                    angle: parse_args(&mut s, 1, 1)?[0],
                },
                "skewY" => Self::SkewY {
                    angle: parse_args(&mut s, 1, 1)?[0],
                },
                "matrix" => {
                    let args = parse_args(&mut s, 6, 6)?;
                    Self::Matrix(Affine::new([
                        args[0], args[1], args[2], args[3], args[4], args[5],
                    ]))
                }
                _ => {
                    return Err(ParseError {
                        pos: at,
                        kind: ParseErrorKind::UnknownKeyword,
                    });
                }
            };
            items.push(item);
            let comma = s.skip_ws_comma();
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
        let args = |out: &mut String, name: &str, values: &[f64]| {
            out.push_str(name);
            out.push('(');
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_number(*value, out);
            }
            out.push(')');
        };
        match *self {
            Self::Translate { tx, ty } => args(out, "translate", &[tx, ty]),
            Self::Scale { sx, sy } => args(out, "scale", &[sx, sy]),
            Self::Rotate { angle, cx, cy } => {
                if cx == 0.0 && cy == 0.0 {
                    args(out, "rotate", &[angle]);
                } else {
                    args(out, "rotate", &[angle, cx, cy]);
                }
            }
            Self::SkewX { angle } => args(out, "skewX", &[angle]),
            Self::SkewY { angle } => args(out, "skewY", &[angle]),
            Self::Matrix(affine) => args(out, "matrix", &affine.as_coeffs()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_forms() {
        let items =
            Transform::parse_list("translate(10) scale(2, 3), rotate(45 1 2) skewX(30)")
                .unwrap();
        assert_eq!(
            items,
            [
                Transform::Translate { tx: 10.0, ty: 0.0 },
                Transform::Scale { sx: 2.0, sy: 3.0 },
                Transform::Rotate {
                    angle: 45.0,
                    cx: 1.0,
                    cy: 2.0
                },
                Transform::SkewX { angle: 30.0 },
            ]
        );
    }

    #[test]
    fn scale_defaults_to_uniform() {
        let items = Transform::parse_list("scale(2)").unwrap();
        assert_eq!(items, [Transform::Scale { sx: 2.0, sy: 2.0 }]);
    }

    #[test]
    fn rotate_rejects_two_args() {
        assert!(Transform::parse_list("rotate(45, 1)").is_err());
    }

    #[test]
    fn matrix_arity() {
        let items = Transform::parse_list("matrix(1 0 0 1 10 20)").unwrap();
        assert_eq!(
            items,
            [Transform::Matrix(Affine::new([1.0, 0.0, 0.0, 1.0, 10.0, 20.0]))]
        );
        assert!(Transform::parse_list("matrix(1 0 0 1 10)").is_err());
    }

    #[test]
    fn trailing_comma_fails() {
        // Inside an argument list...
        assert!(Transform::parse_list("translate(1,)").is_err());
        assert!(Transform::parse_list("scale(2 ,)").is_err());
        assert!(Transform::parse_list("matrix(1,2,3,4,5,6,)").is_err());
        // ...and after the last function.
        assert!(Transform::parse_list("translate(1),").is_err());
        // A separating comma between functions is fine.
        assert!(Transform::parse_list("translate(1), scale(2)").is_ok());
    }

    #[test]
    fn unknown_function_fails() {
        let err = Transform::parse_list("translate(1) frobnicate(2)").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnknownKeyword);
    }

    #[test]
    fn round_trip() {
        let text = "translate(10, 20) scale(2, 3) rotate(45, 1, 2) skewY(10) matrix(1, 2, 3, 4, 5, 6)";
        let items = Transform::parse_list(text).unwrap();
        let serialized = Transform::serialize_list(&items);
        assert_eq!(Transform::parse_list(&serialized).unwrap(), items);
    }

    #[test]
    fn translate_matrix() {
        let m = Transform::Translate { tx: 10.0, ty: -5.0 }.matrix();
        let p = m * KPoint::new(1.0, 1.0);
        assert_eq!(p, KPoint::new(11.0, -4.0));
    }

    #[test]
    fn rotate_about_center_matrix() {
        let m = Transform::Rotate {
            angle: 90.0,
            cx: 10.0,
            cy: 10.0,
        }
        .matrix();
        let p = m * KPoint::new(10.0, 0.0);
        assert!((p.x - 20.0).abs() < 1e-9);
        assert!((p.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn skew_matrix() {
        let m = Transform::SkewX { angle: 45.0 }.matrix();
        let p = m * KPoint::new(0.0, 1.0);
        assert!((p.x - 1.0).abs() < 1e-9);
        assert!((p.y - 1.0).abs() < 1e-9);
    }
}
