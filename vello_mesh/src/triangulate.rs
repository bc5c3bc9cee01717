// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ear clipping triangulation of a single subpath.
//!
//! A subpath is treated as a polygon which is closed from its last point back to its first.
//! Triangles are found by repeatedly clipping an "ear": three consecutive vertices forming a
//! convex corner whose triangle contains no other remaining vertex. This runs in `O(n²)` time,
//! which is fine for the sizes of flattened paths.
//!
//! Every triangle `[a, b, c]` is emitted with a non-negative `(b - a) × (c - a)`, independent of
//! the orientation of the input. On a y-down screen that is clockwise.
//!
//! Degenerate input never panics. Zero-area corners (repeated or collinear points) are dropped
//! without emitting a triangle, so such polygons yield fewer triangles or none at all.
//! Self-intersecting polygons are triangulated on a best-effort basis.

use crate::error::{Error, Result, MAX_VERTICES};
use crate::point::Point;
use log::warn;

/// Triangulate a polygon, returning triples of indices into `points`.
///
/// Returns no triangles for fewer than three points, and for polygons which cannot be
/// triangulated at all; see [`try_triangulate`].
pub fn triangulate(points: &[Point]) -> Vec<[u16; 3]> {
    match try_triangulate(points) {
        Ok(triangles) => triangles,
        Err(e) => {
            warn!("Not triangulating subpath: {e}");
            Vec::new()
        }
    }
}

/// Triangulate a polygon, returning triples of indices into `points`.
///
/// # Errors
///
/// - [`Error::TooManyPoints`] if the points cannot be addressed by 16-bit indices.
/// - [`Error::NonFinitePoint`] if any coordinate is infinite or NaN.
pub fn try_triangulate(points: &[Point]) -> Result<Vec<[u16; 3]>> {
    if points.len() > MAX_VERTICES {
        return Err(Error::TooManyPoints(points.len()));
    }
    if !points.iter().all(|p| p.is_finite()) {
        return Err(Error::NonFinitePoint);
    }
    if points.len() < 3 {
        return Ok(Vec::new());
    }

    // Walk the polygon with positive orientation, so that convex corners have positive area.
    let mut remaining: Vec<u16> = (0..points.len()).map(|i| i as u16).collect();
    if signed_area(points) < 0. {
        remaining.reverse();
    }

    let mut triangles = Vec::with_capacity(points.len() - 2);
    while remaining.len() > 3 {
        let n = remaining.len();
        if let Some(i) = (0..n).find(|&i| is_ear(points, &remaining, i)) {
            triangles.push(corner(&remaining, i));
            remaining.remove(i);
            continue;
        }
        if let Some(i) = (0..n).find(|&i| area(points, corner(&remaining, i)) == 0.) {
            remaining.remove(i);
            continue;
        }
        // Only self-intersecting polygons get here.
        let i = (0..n)
            .find(|&i| area(points, corner(&remaining, i)) > 0.)
            .unwrap_or(0);
        triangles.push(oriented(points, corner(&remaining, i)));
        remaining.remove(i);
    }

    let last = [remaining[0], remaining[1], remaining[2]];
    if area(points, last) != 0. {
        triangles.push(oriented(points, last));
    }
    Ok(triangles)
}

/// Twice the signed area of a polygon; positive when counter-clockwise in a y-up frame.
pub fn signed_area(points: &[Point]) -> f32 {
    let Some(&last) = points.last() else {
        return 0.;
    };
    let mut prev = last;
    let mut sum = 0.;
    for &p in points {
        sum += prev.cross(p);
        prev = p;
    }
    sum
}

/// The corner at position `i` of the remaining polygon: its predecessor, itself, its successor.
fn corner(remaining: &[u16], i: usize) -> [u16; 3] {
    let n = remaining.len();
    [remaining[(i + n - 1) % n], remaining[i], remaining[(i + 1) % n]]
}

/// Twice the signed area of a triangle.
fn area(points: &[Point], [a, b, c]: [u16; 3]) -> f32 {
    let a = points[usize::from(a)];
    let b = points[usize::from(b)];
    let c = points[usize::from(c)];
    (b - a).cross(c - a)
}

fn oriented(points: &[Point], [a, b, c]: [u16; 3]) -> [u16; 3] {
    if area(points, [a, b, c]) < 0. {
        [a, c, b]
    } else {
        [a, b, c]
    }
}

fn is_ear(points: &[Point], remaining: &[u16], i: usize) -> bool {
    let tri = corner(remaining, i);
    if area(points, tri) <= 0. {
        return false;
    }
    let [p0, p1, p2] = tri.map(|j| points[usize::from(j)]);
    // Vertices sitting exactly on a corner (repeated points) don't block the ear.
    !remaining
        .iter()
        .filter(|j| !tri.contains(*j))
        .map(|&j| points[usize::from(j)])
        .any(|p| p != p0 && p != p1 && p != p2 && point_in_triangle(p, p0, p1, p2))
}

/// Whether `p` is inside or on the boundary of the triangle `(p0, p1, p2)`.
fn point_in_triangle(p: Point, p0: Point, p1: Point, p2: Point) -> bool {
    let d0 = (p1 - p0).cross(p - p0);
    let d1 = (p2 - p1).cross(p - p1);
    let d2 = (p0 - p2).cross(p - p2);

    (d0 >= 0. && d1 >= 0. && d2 >= 0.) || (d0 <= 0. && d1 <= 0. && d2 <= 0.)
}

#[cfg(test)]
mod tests {
    use super::{area, signed_area, triangulate, try_triangulate};
    use crate::error::{Error, MAX_VERTICES};
    use crate::point::Point;

    fn points(coords: &[(f32, f32)]) -> Vec<Point> {
        coords.iter().map(|&p| Point::from(p)).collect()
    }

    fn total_area(points: &[Point], triangles: &[[u16; 3]]) -> f32 {
        triangles.iter().map(|&t| area(points, t)).sum::<f32>() / 2.
    }

    fn assert_valid(points: &[Point], triangles: &[[u16; 3]]) {
        for &t in triangles {
            assert!(t.iter().all(|&i| usize::from(i) < points.len()));
            assert!(area(points, t) >= 0., "triangle {t:?} has the wrong winding");
        }
    }

    #[test]
    fn too_few_points() {
        assert!(triangulate(&[]).is_empty());
        assert!(triangulate(&points(&[(1.0, 1.0)])).is_empty());
        assert!(triangulate(&points(&[(1.0, 1.0), (2.0, 3.0)])).is_empty());
    }

    #[test]
    fn single_triangle() {
        let pts = points(&[(0.0, 0.0), (4.0, 0.0), (0.0, 3.0)]);
        let triangles = triangulate(&pts);
        assert_eq!(triangles.len(), 1);
        let mut used = triangles[0];
        used.sort_unstable();
        assert_eq!(used, [0, 1, 2]);
        assert_eq!(total_area(&pts, &triangles), 6.0);
    }

    #[test]
    fn convex_quad() {
        let pts = points(&[(0.0, 0.0), (10.0, 0.0), (12.0, 8.0), (1.0, 10.0)]);
        let triangles = triangulate(&pts);
        assert_eq!(triangles.len(), 2);
        assert_valid(&pts, &triangles);
        let expected = signed_area(&pts).abs() / 2.;
        assert!((total_area(&pts, &triangles) - expected).abs() < 1e-3);
    }

    #[test]
    fn winding_is_independent_of_orientation() {
        let ccw = points(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        let cw: Vec<_> = ccw.iter().rev().copied().collect();
        for pts in [ccw, cw] {
            let triangles = triangulate(&pts);
            assert_eq!(triangles.len(), 2);
            assert_valid(&pts, &triangles);
            assert_eq!(total_area(&pts, &triangles), 100.0);
        }
    }

    #[test]
    fn concave_l_shape() {
        let pts = points(&[
            (0.0, 0.0),
            (20.0, 0.0),
            (20.0, 10.0),
            (10.0, 10.0),
            (10.0, 20.0),
            (0.0, 20.0),
        ]);
        let triangles = triangulate(&pts);
        assert_eq!(triangles.len(), 4);
        assert_valid(&pts, &triangles);
        assert_eq!(total_area(&pts, &triangles), 300.0);
    }

    #[test]
    fn concave_arrow() {
        // A fan from the first vertex would cover the notch.
        let pts = points(&[
            (5.0, 2.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (5.0, 8.0),
            (0.0, 10.0),
            (0.0, 0.0),
        ]);
        let triangles = triangulate(&pts);
        assert_eq!(triangles.len(), 4);
        assert_valid(&pts, &triangles);
        let expected = signed_area(&pts).abs() / 2.;
        assert!((total_area(&pts, &triangles) - expected).abs() < 1e-3);
    }

    #[test]
    fn collinear_points() {
        assert!(triangulate(&points(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)])).is_empty());
        assert!(
            triangulate(&points(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)])).is_empty()
        );
    }

    #[test]
    fn repeated_points() {
        let pts = points(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (0.0, 10.0),
            (0.0, 0.0),
        ]);
        let triangles = triangulate(&pts);
        assert_valid(&pts, &triangles);
        assert_eq!(total_area(&pts, &triangles), 100.0);
        assert!(triangulate(&points(&[(3.0, 3.0); 5])).is_empty());
    }

    #[test]
    fn self_intersecting_is_best_effort() {
        let pts = points(&[(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0)]);
        let triangles = triangulate(&pts);
        assert!(triangles.len() <= 2);
        assert_valid(&pts, &triangles);
    }

    #[test]
    fn circle() {
        let n = 64;
        let pts: Vec<_> = (0..n)
            .map(|i| {
                let a = i as f32 / n as f32 * core::f32::consts::TAU;
                Point::new(50. + 40. * a.cos(), 50. + 40. * a.sin())
            })
            .collect();
        let triangles = triangulate(&pts);
        assert_eq!(triangles.len(), n - 2);
        assert_valid(&pts, &triangles);
        let expected = signed_area(&pts).abs() / 2.;
        assert!((total_area(&pts, &triangles) - expected).abs() < 0.5);
    }

    #[test]
    fn errors() {
        let pts = vec![Point::ZERO; MAX_VERTICES + 1];
        assert_eq!(
            try_triangulate(&pts),
            Err(Error::TooManyPoints(MAX_VERTICES + 1))
        );
        let pts = points(&[(0.0, 0.0), (f32::NAN, 1.0), (1.0, 0.0)]);
        assert_eq!(try_triangulate(&pts), Err(Error::NonFinitePoint));
        assert!(triangulate(&pts).is_empty());
        let pts = points(&[(0.0, 0.0), (f32::INFINITY, 0.0), (0.0, 1.0)]);
        assert_eq!(try_triangulate(&pts), Err(Error::NonFinitePoint));
    }
}
