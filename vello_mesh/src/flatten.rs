// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flattening quadratic and cubic Bézier curves into line segments.
//!
//! Curves are sampled uniformly in their parameter. How many samples are taken is decided by a
//! [`SamplingPolicy`]; the default [`EndpointDistance`] policy takes one segment per pixel of
//! displacement between the start and end point of the curve. This is cheap, but it only looks
//! at the endpoints: a curve whose control points bow far away from a short chord (for example a
//! loop) is under-sampled.

use crate::point::Point;

/// The largest number of segments [`EndpointDistance`] produces for a single curve.
pub const MAX_SEGMENTS: usize = 1 << 14;

/// A quadratic or cubic Bézier curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Curve {
    /// A quadratic Bézier curve.
    Quad {
        /// The start point.
        p0: Point,
        /// The control point.
        p1: Point,
        /// The end point.
        p2: Point,
    },
    /// A cubic Bézier curve.
    Cubic {
        /// The start point.
        p0: Point,
        /// The first control point.
        p1: Point,
        /// The second control point.
        p2: Point,
        /// The end point.
        p3: Point,
    },
}

impl Curve {
    /// The start point of the curve.
    pub fn start(&self) -> Point {
        match *self {
            Self::Quad { p0, .. } | Self::Cubic { p0, .. } => p0,
        }
    }

    /// The end point of the curve.
    pub fn end(&self) -> Point {
        match *self {
            Self::Quad { p2, .. } => p2,
            Self::Cubic { p3, .. } => p3,
        }
    }

    /// Evaluate the curve at `t` using the Bernstein form.
    pub fn eval(&self, t: f32) -> Point {
        let mt = 1. - t;
        match *self {
            Self::Quad { p0, p1, p2 } => p0 * (mt * mt) + p1 * (2. * t * mt) + p2 * (t * t),
            Self::Cubic { p0, p1, p2, p3 } => {
                p0 * (mt * mt * mt)
                    + p1 * (3. * mt * mt * t)
                    + p2 * (3. * mt * t * t)
                    + p3 * (t * t * t)
            }
        }
    }

    /// Sample the curve at `t = 0, 1/n, ..., 1`, yielding `n + 1` points.
    ///
    /// The last sample is always exactly [`Curve::end`]. `n` is clamped to at least 1.
    pub fn samples(&self, n: usize) -> Samples {
        Samples {
            curve: *self,
            n: n.max(1),
            i: 0,
        }
    }

    /// Flatten the curve into points, using `policy` to choose the number of segments.
    pub fn flatten(&self, policy: &impl SamplingPolicy) -> Samples {
        self.samples(policy.segments(self))
    }
}

/// An iterator over uniformly spaced samples of a [`Curve`].
#[derive(Clone, Debug)]
pub struct Samples {
    curve: Curve,
    n: usize,
    i: usize,
}

impl Iterator for Samples {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.i > self.n {
            return None;
        }
        let i = self.i;
        self.i += 1;
        // Computing `t` from the counter keeps the step count exact.
        if i == self.n {
            Some(self.curve.end())
        } else {
            Some(self.curve.eval(i as f32 / self.n as f32))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.n + 1).saturating_sub(self.i);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Samples {}

/// Decides how many line segments a curve is flattened into.
///
/// Implementations must return at least 1.
pub trait SamplingPolicy {
    /// The number of line segments to use for `curve`.
    fn segments(&self, curve: &Curve) -> usize;
}

impl<P: SamplingPolicy + ?Sized> SamplingPolicy for &P {
    fn segments(&self, curve: &Curve) -> usize {
        (**self).segments(curve)
    }
}

/// One segment per unit of the largest axis-aligned displacement between the curve's endpoints.
///
/// Control points are ignored. A curve which ends where it starts gets a single segment, and
/// displacements beyond [`MAX_SEGMENTS`] units are capped at `MAX_SEGMENTS` segments.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EndpointDistance;

impl EndpointDistance {
    /// The number of segments for a curve from `(x0, y0)` to `(x1, y1)`.
    pub fn segments_between(x0: f32, y0: f32, x1: f32, y1: f32) -> usize {
        let dist = (x1 - x0).abs().max((y1 - y0).abs());
        if !dist.is_finite() {
            return 1;
        }
        (dist.ceil() as usize).clamp(1, MAX_SEGMENTS)
    }
}

impl SamplingPolicy for EndpointDistance {
    fn segments(&self, curve: &Curve) -> usize {
        let (p0, p1) = (curve.start(), curve.end());
        Self::segments_between(p0.x, p0.y, p1.x, p1.y)
    }
}

/// The same number of segments for every curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedSegments(pub usize);

impl SamplingPolicy for FixedSegments {
    fn segments(&self, _: &Curve) -> usize {
        self.0.max(1)
    }
}
