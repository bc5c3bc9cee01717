// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vello Mesh turns 2D vector paths into triangle meshes for filling with a solid color.
//!
//! It is meant for renderers which can only draw textured triangles: a [`Path`] is built with
//! the usual PostScript-style operations, curves are flattened into line segments as they are
//! added, and filling the path ear clips every subpath into triangles which are handed to a
//! [`Renderer`] together with a shared 1x1 white [fill texture](pixmap::fill_texture).
//!
//! ```
//! use vello_mesh::color::palette::css::RED;
//! use vello_mesh::Path;
//!
//! let mut path = Path::new();
//! path.move_to(0.0, 0.0);
//! path.line_to(10.0, 0.0);
//! path.quad_to(15.0, 5.0, 10.0, 10.0);
//! path.line_to(0.0, 10.0);
//!
//! let meshes = path.to_mesh(RED);
//! assert_eq!(meshes.len(), 1);
//! assert_eq!(meshes[0].indices.len() % 3, 0);
//! ```
//!
//! # Limitations
//!
//! - Subpaths are filled independently: nested subpaths do not cut holes.
//! - Curves are sampled at a fixed rate derived from their endpoints, see [`flatten`].
//! - Self-intersecting subpaths are triangulated on a best-effort basis.
//! - There is no anti-aliasing, stroking or clipping.

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![allow(
    clippy::cast_possible_truncation,
    reason = "Index and channel conversions are range checked before casting."
)]

pub mod color;
pub mod error;
pub mod flatten;
pub mod mesh;
pub mod path;
pub mod pixmap;
pub mod point;
pub mod render;
pub mod triangulate;

pub use peniko;
pub use peniko::kurbo;

pub use error::{Error, Result};
pub use mesh::{Mesh, Vertex};
pub use path::Path;
pub use point::Point;
pub use render::{DrawTrianglesOptions, Renderer};
