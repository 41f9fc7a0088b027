// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path normalization to an absolute-cubic-only segment stream.
//!
//! [`normalize`] rewrites any parsed path into segments drawn from the
//! four-command subset `MoveTo`, `LineTo`, `CurveTo`, `ClosePath`, all
//! absolute. Relative offsets are resolved against the current point,
//! horizontal/vertical lines borrow the missing coordinate, quadratics and
//! arcs become cubics, and the smooth shorthands get their reflected
//! control point filled in.

use alloc::vec::Vec;

use kurbo::{Point, Vec2};

use trellis_value::{CoordinateMode, PathSeg};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `sin`, `cos`, `tan`, `atan2`, `sqrt`, `ceil`, `abs`, `powi`

/// Curve family of the previously emitted segment, for smooth reflection.
#[derive(Copy, Clone, PartialEq, Eq)]
enum Family {
    Cubic,
    Quad,
    Other,
}

struct Normalizer {
    out: Vec<PathSeg>,
    current: Point,
    subpath_start: Point,
    /// Second control point of the last cubic, or the (sole) control point
    /// of the last quadratic before conversion. Only meaningful when
    /// `family` matches the smooth command consuming it.
    prev_ctrl: Point,
    family: Family,
}

/// Rewrites `segments` into absolute `MoveTo`/`LineTo`/`CurveTo`/`ClosePath`
/// form.
///
/// # Example
///
/// ```rust
/// use trellis_geom::normalize;
/// use trellis_value::{ListValue, PathSeg};
///
/// let segs = PathSeg::parse_list("m 10 20 h 5 z").unwrap();
/// assert_eq!(
///     normalize(&segs),
///     [
///         PathSeg::move_to(10.0, 20.0),
///         PathSeg::line_to(15.0, 20.0),
///         PathSeg::ClosePath,
///     ]
/// );
/// ```
#[must_use]
pub fn normalize(segments: &[PathSeg]) -> Vec<PathSeg> {
    let mut n = Normalizer {
        out: Vec::with_capacity(segments.len()),
        current: Point::ZERO,
        subpath_start: Point::ZERO,
        prev_ctrl: Point::ZERO,
        family: Family::Other,
    };
    for segment in segments {
        n.push(segment);
    }
    n.out
}

impl Normalizer {
    /// Resolves a coordinate pair against the current point.
    fn abs(&self, mode: CoordinateMode, x: f64, y: f64) -> Point {
        match mode {
            CoordinateMode::Absolute => Point::new(x, y),
            CoordinateMode::Relative => self.current + Vec2::new(x, y),
        }
    }

    fn push(&mut self, segment: &PathSeg) {
        match *segment {
            PathSeg::MoveTo { mode, x, y } => {
                let p = self.abs(mode, x, y);
                self.out.push(PathSeg::move_to(p.x, p.y));
                self.current = p;
                self.subpath_start = p;
                self.family = Family::Other;
            }
            PathSeg::LineTo { mode, x, y } => {
                let p = self.abs(mode, x, y);
                self.line_to(p);
            }
            PathSeg::HLineTo { mode, x } => {
                let x = match mode {
                    CoordinateMode::Absolute => x,
                    CoordinateMode::Relative => self.current.x + x,
                };
                self.line_to(Point::new(x, self.current.y));
            }
            PathSeg::VLineTo { mode, y } => {
                let y = match mode {
                    CoordinateMode::Absolute => y,
                    CoordinateMode::Relative => self.current.y + y,
                };
                self.line_to(Point::new(self.current.x, y));
            }
            PathSeg::CurveTo {
                mode,
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                let c1 = self.abs(mode, x1, y1);
                let c2 = self.abs(mode, x2, y2);
                let p = self.abs(mode, x, y);
                self.curve_to(c1, c2, p);
            }
            PathSeg::SmoothCurveTo { mode, x2, y2, x, y } => {
                let c1 = self.reflected(Family::Cubic);
                let c2 = self.abs(mode, x2, y2);
                let p = self.abs(mode, x, y);
                self.curve_to(c1, c2, p);
            }
            PathSeg::QuadTo { mode, x1, y1, x, y } => {
                let q = self.abs(mode, x1, y1);
                let p = self.abs(mode, x, y);
                self.quad_to(q, p);
            }
            PathSeg::SmoothQuadTo { mode, x, y } => {
                let q = self.reflected(Family::Quad);
                let p = self.abs(mode, x, y);
                self.quad_to(q, p);
            }
            PathSeg::Arc {
                mode,
                rx,
                ry,
                x_rotation,
                large_arc,
                sweep,
                x,
                y,
            } => {
                let p = self.abs(mode, x, y);
                self.arc_to(rx, ry, x_rotation, large_arc, sweep, p);
            }
            PathSeg::ClosePath => {
                self.out.push(PathSeg::ClosePath);
                self.current = self.subpath_start;
                self.family = Family::Other;
            }
        }
    }

    /// The previous control point reflected through the current point, when
    /// the previous segment belongs to `family`; the current point
    /// otherwise.
    fn reflected(&self, family: Family) -> Point {
        if self.family == family {
            self.current + (self.current - self.prev_ctrl)
        } else {
            self.current
        }
    }

    fn line_to(&mut self, p: Point) {
        self.out.push(PathSeg::line_to(p.x, p.y));
        self.current = p;
        self.family = Family::Other;
    }

    fn curve_to(&mut self, c1: Point, c2: Point, p: Point) {
        self.out
            .push(PathSeg::curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y));
        self.current = p;
        self.prev_ctrl = c2;
        self.family = Family::Cubic;
    }

    /// Degree elevation of a quadratic to the equivalent cubic.
    fn quad_to(&mut self, q: Point, p: Point) {
        let c1 = self.current + (q - self.current) * (2.0 / 3.0);
        let c2 = p + (q - p) * (2.0 / 3.0);
        self.out
            .push(PathSeg::curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y));
        self.current = p;
        // Reflection of a following `T` works on the quadratic's own
        // control point, not the elevated cubic's.
        self.prev_ctrl = q;
        self.family = Family::Quad;
    }

    /// Elliptical arc as a run of cubics, one per quadrant piece.
    ///
    /// Endpoint-to-center parameterization per the SVG 1.1 implementation
    /// notes (F.6.5), with out-of-range handling (F.6.6): radii signs are
    /// dropped, too-small radii are scaled up to reach the endpoint, and a
    /// zero radius or coincident endpoints degrade to a straight line.
    fn arc_to(
        &mut self,
        rx: f64,
        ry: f64,
        x_rotation: f64,
        large_arc: bool,
        sweep: bool,
        end: Point,
    ) {
        let start = self.current;
        let mut rx = rx.abs();
        let mut ry = ry.abs();
        if rx == 0.0 || ry == 0.0 || start == end {
            self.line_to(end);
            return;
        }

        let phi = x_rotation.to_radians();
        let (sin_phi, cos_phi) = (phi.sin(), phi.cos());

        // Step 1: midpoint transform into the ellipse's axis-aligned frame.
        let d = (start - end) * 0.5;
        let x1p = cos_phi * d.x + sin_phi * d.y;
        let y1p = -sin_phi * d.x + cos_phi * d.y;

        // Step 2: scale radii up when no ellipse of the given size reaches
        // both endpoints.
        let lambda = (x1p / rx).powi(2) + (y1p / ry).powi(2);
        if lambda > 1.0 {
            let scale = lambda.sqrt();
            rx *= scale;
            ry *= scale;
        }

        // Step 3: center in the primed frame, then back in user space.
        let num = rx * rx * ry * ry - rx * rx * y1p * y1p - ry * ry * x1p * x1p;
        let den = rx * rx * y1p * y1p + ry * ry * x1p * x1p;
        let mut co = (num.max(0.0) / den).sqrt();
        if large_arc == sweep {
            co = -co;
        }
        let cxp = co * rx * y1p / ry;
        let cyp = -co * ry * x1p / rx;
        let mid = start.midpoint(end);
        let center = Point::new(
            cos_phi * cxp - sin_phi * cyp + mid.x,
            sin_phi * cxp + cos_phi * cyp + mid.y,
        );

        // Step 4: start angle and signed sweep extent.
        let theta1 = ((y1p - cyp) / ry).atan2((x1p - cxp) / rx);
        let theta2 = ((-y1p - cyp) / ry).atan2((-x1p - cxp) / rx);
        let mut delta = theta2 - theta1;
        if sweep && delta < 0.0 {
            delta += core::f64::consts::TAU;
        } else if !sweep && delta > 0.0 {
            delta -= core::f64::consts::TAU;
        }

        let point_at = |theta: f64| {
            let (sin_t, cos_t) = (theta.sin(), theta.cos());
            center
                + Vec2::new(
                    cos_phi * rx * cos_t - sin_phi * ry * sin_t,
                    sin_phi * rx * cos_t + cos_phi * ry * sin_t,
                )
        };
        let tangent_at = |theta: f64| {
            let (sin_t, cos_t) = (theta.sin(), theta.cos());
            Vec2::new(
                -cos_phi * rx * sin_t - sin_phi * ry * cos_t,
                -sin_phi * rx * sin_t + cos_phi * ry * cos_t,
            )
        };

        // Split into pieces no wider than a quadrant; each piece is one
        // cubic with control distance 4/3 * tan(delta / 4).
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "ceil of |delta| / (pi/2) is a small positive integer"
        )]
        let pieces = (delta.abs() / core::f64::consts::FRAC_PI_2).ceil().max(1.0) as usize;
        let step = delta / pieces as f64;
        let alpha = 4.0 / 3.0 * (step / 4.0).tan();
        for i in 0..pieces {
            let t0 = theta1 + step * i as f64;
            let t1 = t0 + step;
            let p0 = point_at(t0);
            // Land exactly on the requested endpoint.
            let p3 = if i == pieces - 1 { end } else { point_at(t1) };
            let c1 = p0 + tangent_at(t0) * alpha;
            let c2 = p3 - tangent_at(t1) * alpha;
            self.out
                .push(PathSeg::curve_to(c1.x, c1.y, c2.x, c2.y, p3.x, p3.y));
        }
        self.current = end;
        self.family = Family::Other;
    }
}
