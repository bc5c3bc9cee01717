// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Submitting fill meshes to a triangle renderer.

use crate::color::ToPremulRgba16;
use crate::flatten::SamplingPolicy;
use crate::kurbo::Affine;
use crate::mesh::Vertex;
use crate::path::Path;
use crate::peniko::{BlendMode, Compose, Mix};
use crate::pixmap::{fill_texture, Pixmap};

/// Options for a triangle draw call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawTrianglesOptions {
    /// Transform applied to vertex positions.
    pub transform: Affine,
    /// How the triangles are blended with the destination.
    pub blend: BlendMode,
}

impl Default for DrawTrianglesOptions {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            blend: BlendMode::new(Mix::Normal, Compose::SrcOver),
        }
    }
}

/// A backend which can draw textured triangles.
pub trait Renderer {
    /// Draw the triangles given by `indices` into `vertices`, sampling `texture`.
    ///
    /// Callers in this crate guarantee that every index is less than `vertices.len()` and that
    /// the number of indices is a multiple of 3.
    fn draw_triangles(
        &mut self,
        vertices: &[Vertex],
        indices: &[u16],
        texture: &Pixmap,
        options: &DrawTrianglesOptions,
    );
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn draw_triangles(
        &mut self,
        vertices: &[Vertex],
        indices: &[u16],
        texture: &Pixmap,
        options: &DrawTrianglesOptions,
    ) {
        (**self).draw_triangles(vertices, indices, texture, options);
    }
}

/// Fill every subpath of `path` with `color`.
///
/// This issues one [`draw_triangles`](Renderer::draw_triangles) call per mesh of
/// [`Path::to_mesh`], using the shared [fill texture](fill_texture) and default options. Paths
/// without any triangles draw nothing. The path itself is not modified.
pub fn fill<S: SamplingPolicy>(
    renderer: &mut impl Renderer,
    path: &Path<S>,
    color: impl ToPremulRgba16,
) {
    let options = DrawTrianglesOptions::default();
    let texture = fill_texture();
    for mesh in path.to_mesh(color) {
        renderer.draw_triangles(&mesh.vertices, &mesh.indices, texture, &options);
    }
}

impl<S: SamplingPolicy> Path<S> {
    /// Fill the path with `color` using `renderer`.
    ///
    /// See [`fill`](crate::render::fill).
    pub fn fill(&self, renderer: &mut impl Renderer, color: impl ToPremulRgba16) {
        fill(renderer, self, color);
    }
}
