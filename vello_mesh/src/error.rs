// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors which can occur while building meshes.

use thiserror::Error;

/// The largest number of vertices a single draw call can address with 16-bit indices.
pub const MAX_VERTICES: usize = u16::MAX as usize + 1;

/// Errors that can occur in Vello Mesh.
///
/// Filling a path never fails; these surface only from the lower level
/// [`try_triangulate`](crate::triangulate::try_triangulate) and
/// [`MeshBuilder`](crate::mesh::MeshBuilder) APIs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A subpath has more points than can be addressed by 16-bit indices.
    #[error("Subpath has {0} points, at most {max} can be indexed", max = MAX_VERTICES)]
    TooManyPoints(usize),
    /// A subpath contains an infinite or NaN coordinate.
    #[error("Subpath contains a non-finite coordinate")]
    NonFinitePoint,
}

/// A specialized `Result` type for Vello Mesh operations.
pub type Result<T> = core::result::Result<T, Error>;
