// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Building paths out of subpaths of flattened points.

use crate::flatten::{Curve, EndpointDistance, SamplingPolicy};
use crate::kurbo::PathEl;
use crate::point::Point;

/// A collection of subpaths, each an ordered list of points.
///
/// Curves are flattened as soon as they are added, so a path only ever stores points. Every
/// subpath is filled as a polygon which is implicitly closed from its last point back to its
/// first.
#[derive(Clone, Debug, Default)]
pub struct Path<S = EndpointDistance> {
    subpaths: Vec<Vec<Point>>,
    cursor: Point,
    open: bool,
    policy: S,
}

impl Path {
    /// Create an empty path using the [`EndpointDistance`] sampling policy.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: SamplingPolicy> Path<S> {
    /// Create an empty path which flattens curves according to `policy`.
    pub fn with_policy(policy: S) -> Self {
        Self {
            subpaths: Vec::new(),
            cursor: Point::ZERO,
            open: false,
            policy,
        }
    }

    /// Start a new subpath at `(x, y)`.
    ///
    /// A new subpath is started even if the current one only holds a single point.
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.cursor = Point::new(x, y);
        self.subpaths.push(vec![self.cursor]);
        self.open = true;
    }

    /// Add a line from the current position to `(x, y)`.
    ///
    /// If no subpath is open, one is started at the current position first. That is the origin
    /// for a fresh path, or the start of the previous subpath after [`close`](Self::close).
    pub fn line_to(&mut self, x: f32, y: f32) {
        let p = Point::new(x, y);
        if !self.open {
            self.subpaths.push(vec![self.cursor]);
            self.open = true;
        }
        if let Some(subpath) = self.subpaths.last_mut() {
            subpath.push(p);
        }
        self.cursor = p;
    }

    /// Add a quadratic Bézier curve from the current position through `(cpx, cpy)` to `(x, y)`.
    pub fn quad_to(&mut self, cpx: f32, cpy: f32, x: f32, y: f32) {
        self.curve_to(Curve::Quad {
            p0: self.cursor,
            p1: Point::new(cpx, cpy),
            p2: Point::new(x, y),
        });
    }

    /// Add a cubic Bézier curve from the current position through `(cp0x, cp0y)` and
    /// `(cp1x, cp1y)` to `(x, y)`.
    pub fn cubic_to(&mut self, cp0x: f32, cp0y: f32, cp1x: f32, cp1y: f32, x: f32, y: f32) {
        self.curve_to(Curve::Cubic {
            p0: self.cursor,
            p1: Point::new(cp0x, cp0y),
            p2: Point::new(cp1x, cp1y),
            p3: Point::new(x, y),
        });
    }

    fn curve_to(&mut self, curve: Curve) {
        for p in curve.flatten(&self.policy) {
            self.line_to(p.x, p.y);
        }
    }

    /// Close the current subpath.
    ///
    /// No point is added, since subpaths are always filled as closed polygons. The current
    /// position moves back to the start of the subpath, and the next [`line_to`](Self::line_to)
    /// starts a new subpath there.
    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        if let Some(first) = self.subpaths.last().and_then(|s| s.first()) {
            self.cursor = *first;
        }
        self.open = false;
    }

    /// Remove all subpaths and move the current position back to the origin.
    ///
    /// This keeps the allocation of the outer subpath list, so a path can be rebuilt each frame.
    pub fn clear(&mut self) {
        self.subpaths.clear();
        self.cursor = Point::ZERO;
        self.open = false;
    }

    /// The subpaths of the path, in the order they were started.
    pub fn subpaths(&self) -> &[Vec<Point>] {
        &self.subpaths
    }

    /// The current position.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Whether a subpath is open, so the next [`line_to`](Self::line_to) extends it.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the path has no subpaths.
    pub fn is_empty(&self) -> bool {
        self.subpaths.is_empty()
    }

    /// Append a kurbo path element.
    pub fn push_el(&mut self, el: PathEl) {
        match el {
            PathEl::MoveTo(p) => {
                let p = Point::from(p);
                self.move_to(p.x, p.y);
            }
            PathEl::LineTo(p) => {
                let p = Point::from(p);
                self.line_to(p.x, p.y);
            }
            PathEl::QuadTo(p1, p2) => {
                let (p1, p2) = (Point::from(p1), Point::from(p2));
                self.quad_to(p1.x, p1.y, p2.x, p2.y);
            }
            PathEl::CurveTo(p1, p2, p3) => {
                let (p1, p2, p3) = (Point::from(p1), Point::from(p2), Point::from(p3));
                self.cubic_to(p1.x, p1.y, p2.x, p2.y, p3.x, p3.y);
            }
            PathEl::ClosePath => self.close(),
        }
    }
}

impl<S: SamplingPolicy> Extend<PathEl> for Path<S> {
    fn extend<I: IntoIterator<Item = PathEl>>(&mut self, iter: I) {
        for el in iter {
            self.push_el(el);
        }
    }
}

impl FromIterator<PathEl> for Path {
    fn from_iter<I: IntoIterator<Item = PathEl>>(iter: I) -> Self {
        let mut path = Self::new();
        path.extend(iter);
        path
    }
}
