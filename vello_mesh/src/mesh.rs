// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vertex and index buffers for filled paths.

use crate::color::{StraightColor, ToPremulRgba16};
use crate::error::{Result, MAX_VERTICES};
use crate::flatten::SamplingPolicy;
use crate::path::Path;
use crate::point::Point;
use crate::triangulate::try_triangulate;
use bytemuck::{Pod, Zeroable};
use log::{debug, warn};

/// A vertex of a fill mesh.
///
/// The layout matches what a textured triangle pipeline expects: a destination position, a
/// source texture coordinate and a straight-alpha color which is multiplied with the sampled
/// texel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vertex {
    /// The x coordinate of the destination position.
    pub dst_x: f32,
    /// The y coordinate of the destination position.
    pub dst_y: f32,
    /// The x coordinate in the source texture, in texels.
    pub src_x: f32,
    /// The y coordinate in the source texture, in texels.
    pub src_y: f32,
    /// The red channel, straight alpha in `0..=1`.
    pub color_r: f32,
    /// The green channel, straight alpha in `0..=1`.
    pub color_g: f32,
    /// The blue channel, straight alpha in `0..=1`.
    pub color_b: f32,
    /// The alpha channel in `0..=1`.
    pub color_a: f32,
}

impl Vertex {
    /// Create a vertex at `position` which samples the origin of the fill texture.
    pub fn new(position: Point, color: StraightColor) -> Self {
        Self {
            dst_x: position.x,
            dst_y: position.y,
            src_x: 0.,
            src_y: 0.,
            color_r: color.r,
            color_g: color.g,
            color_b: color.b,
            color_a: color.a,
        }
    }

    /// The destination position.
    pub fn position(&self) -> Point {
        Point::new(self.dst_x, self.dst_y)
    }

    /// The vertex color.
    pub fn color(&self) -> StraightColor {
        StraightColor {
            r: self.color_r,
            g: self.color_g,
            b: self.color_b,
            a: self.color_a,
        }
    }
}

/// The vertices and triangle indices of a single draw call.
///
/// Every index is less than `vertices.len()` and the number of indices is a multiple of 3.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    /// The vertices, in subpath order.
    pub vertices: Vec<Vertex>,
    /// Triples of indices into `vertices`.
    pub indices: Vec<u16>,
}

impl Mesh {
    /// The number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether the mesh has at least one triangle.
    ///
    /// A mesh can hold vertices without any triangles, for subpaths of fewer than three points.
    pub fn has_triangles(&self) -> bool {
        !self.indices.is_empty()
    }

    /// The vertex buffer as bytes.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// The index buffer as bytes.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }
}

/// Assembles subpaths into meshes of a single color.
///
/// Subpaths are appended to the current mesh until it would need more vertices than 16-bit
/// indices can address, at which point a new mesh is started.
#[derive(Debug)]
pub struct MeshBuilder {
    color: StraightColor,
    current: Mesh,
    finished: Vec<Mesh>,
}

impl MeshBuilder {
    /// Create a builder for meshes filled with `color`.
    pub fn new(color: impl ToPremulRgba16) -> Self {
        Self {
            color: StraightColor::from_premul(color),
            current: Mesh::default(),
            finished: Vec::new(),
        }
    }

    /// The decoded color given to every vertex.
    pub fn color(&self) -> StraightColor {
        self.color
    }

    /// Triangulate a subpath and append it to the current mesh.
    ///
    /// # Errors
    ///
    /// See [`try_triangulate`]. Nothing is appended on error.
    pub fn push_subpath(&mut self, points: &[Point]) -> Result<()> {
        if points.is_empty() {
            return Ok(());
        }
        let triangles = try_triangulate(points)?;
        if self.current.vertices.len() + points.len() > MAX_VERTICES {
            self.flush();
        }
        let base = self.current.vertices.len() as u16;
        self.current
            .vertices
            .extend(points.iter().map(|&p| Vertex::new(p, self.color)));
        self.current
            .indices
            .extend(triangles.iter().flatten().map(|&i| base + i));
        Ok(())
    }

    /// Finish building, returning the meshes which have triangles, in order.
    pub fn finish(mut self) -> Vec<Mesh> {
        self.flush();
        self.finished
    }

    fn flush(&mut self) {
        if self.current.has_triangles() {
            self.finished.push(core::mem::take(&mut self.current));
        } else {
            self.current.clear();
        }
    }
}

impl<S: SamplingPolicy> Path<S> {
    /// Build the meshes filling this path with `color`.
    ///
    /// Usually this is a single mesh. Paths with more points than 16-bit indices can address
    /// are split into several meshes, and subpaths which can't be triangulated at all are
    /// skipped.
    pub fn to_mesh(&self, color: impl ToPremulRgba16) -> Vec<Mesh> {
        let mut builder = MeshBuilder::new(color);
        for (i, subpath) in self.subpaths().iter().enumerate() {
            if let Err(e) = builder.push_subpath(subpath) {
                warn!("Skipping subpath {i}: {e}");
            }
        }
        let meshes = builder.finish();
        if meshes.len() > 1 {
            debug!("Split fill into {} meshes", meshes.len());
        }
        meshes
    }
}

#[cfg(test)]
mod tests {
    use super::{Mesh, MeshBuilder, Vertex};
    use crate::color::StraightColor;
    use crate::error::{Error, MAX_VERTICES};
    use crate::path::Path;
    use crate::point::Point;

    const RED: [u16; 4] = [0xffff, 0, 0, 0xffff];

    fn triangle(x: f32) -> [Point; 3] {
        [
            Point::new(x, 0.0),
            Point::new(x + 1.0, 0.0),
            Point::new(x, 1.0),
        ]
    }

    #[test]
    fn vertex_layout() {
        assert_eq!(size_of::<Vertex>(), 32);
        let v = Vertex::new(Point::new(1.0, 2.0), StraightColor::from_premul(RED));
        let floats: &[f32] = bytemuck::cast_slice(core::slice::from_ref(&v));
        assert_eq!(floats, [1.0, 2.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
        assert_eq!(v.position(), Point::new(1.0, 2.0));
    }

    #[test]
    fn subpaths_are_offset() {
        let mut builder = MeshBuilder::new(RED);
        builder.push_subpath(&triangle(0.0)).unwrap();
        builder.push_subpath(&triangle(5.0)).unwrap();
        let meshes = builder.finish();
        assert_eq!(meshes.len(), 1);
        let mesh = &meshes[0];
        assert_eq!(mesh.vertices.len(), 6);
        assert_eq!(mesh.triangle_count(), 2);
        let mut second = [mesh.indices[3], mesh.indices[4], mesh.indices[5]];
        second.sort_unstable();
        assert_eq!(second, [3, 4, 5]);
        assert_eq!(mesh.index_bytes().len(), 12);
        assert_eq!(mesh.vertex_bytes().len(), 6 * 32);
    }

    #[test]
    fn points_without_triangles_still_take_vertices() {
        let mut builder = MeshBuilder::new(RED);
        builder.push_subpath(&[Point::new(9.0, 9.0)]).unwrap();
        builder.push_subpath(&triangle(0.0)).unwrap();
        let meshes = builder.finish();
        assert_eq!(meshes[0].vertices.len(), 4);
        assert!(meshes[0].indices.iter().all(|&i| (1..4).contains(&i)));
    }

    #[test]
    fn empty_meshes_are_dropped() {
        let mut builder = MeshBuilder::new(RED);
        builder.push_subpath(&[]).unwrap();
        builder
            .push_subpath(&[Point::ZERO, Point::new(1.0, 1.0)])
            .unwrap();
        assert_eq!(builder.finish(), Vec::<Mesh>::new());
    }

    #[test]
    fn errors_leave_builder_untouched() {
        let mut builder = MeshBuilder::new(RED);
        let nan = [Point::ZERO, Point::new(f32::NAN, 0.0), Point::ZERO];
        assert_eq!(builder.push_subpath(&nan), Err(Error::NonFinitePoint));
        let inf = [Point::ZERO, Point::new(0.0, f32::INFINITY), Point::ZERO];
        assert_eq!(builder.push_subpath(&inf), Err(Error::NonFinitePoint));
        let huge = vec![Point::ZERO; MAX_VERTICES + 1];
        assert_eq!(
            builder.push_subpath(&huge),
            Err(Error::TooManyPoints(MAX_VERTICES + 1))
        );
        assert!(builder.finish().is_empty());
    }

    #[test]
    fn split_at_index_limit() {
        let mut builder = MeshBuilder::new(RED);
        for i in 0..MAX_VERTICES / 3 {
            builder.push_subpath(&triangle(i as f32)).unwrap();
        }
        // Exactly fills the first mesh.
        builder.push_subpath(&[Point::ZERO]).unwrap();
        builder.push_subpath(&triangle(-5.0)).unwrap();
        let meshes = builder.finish();
        assert_eq!(meshes.len(), 2);
        assert_eq!(meshes[0].vertices.len(), MAX_VERTICES);
        assert_eq!(meshes[0].triangle_count(), MAX_VERTICES / 3);
        assert_eq!(meshes[1].vertices.len(), 3);
        assert_eq!(meshes[1].indices.len(), 3);
        for mesh in &meshes {
            assert!(mesh
                .indices
                .iter()
                .all(|&i| usize::from(i) < mesh.vertices.len()));
        }
    }

    #[test]
    fn path_to_mesh_skips_bad_subpaths() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.line_to(f32::NAN, 0.0);
        path.line_to(0.0, 1.0);
        path.move_to(0.0, 0.0);
        path.line_to(f32::INFINITY, 0.0);
        path.line_to(0.0, 1.0);
        path.move_to(0.0, 0.0);
        path.line_to(1.0, 0.0);
        path.line_to(0.0, 1.0);
        let meshes = path.to_mesh(RED);
        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].vertices.len(), 3);
        assert_eq!(meshes[0].triangle_count(), 1);
        assert!(meshes[0].vertices.iter().all(|v| v.position().is_finite()));
    }

    #[test]
    fn vertices_alone_are_not_triangles() {
        let mesh = Mesh {
            vertices: vec![Vertex::default(); 2],
            indices: Vec::new(),
        };
        assert!(!mesh.has_triangles());
        assert_eq!(mesh.triangle_count(), 0);
    }
}
