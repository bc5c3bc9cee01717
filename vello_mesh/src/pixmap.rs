// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A simple pixmap type, and the texture sampled by solid fills.

use crate::color::{palette, AlphaColor, PremulRgba8, Srgb};
use std::sync::OnceLock;

const TRANSPARENT: PremulRgba8 = PremulRgba8 {
    r: 0,
    g: 0,
    b: 0,
    a: 0,
};

/// A pixmap of premultiplied RGBA8 values.
#[derive(Debug, Clone, PartialEq)]
pub struct Pixmap {
    /// Width of the pixmap in pixels.
    width: u16,
    /// Height of the pixmap in pixels.
    height: u16,
    /// Buffer of the pixmap in RGBA8 format, in row-major order.
    buf: Vec<PremulRgba8>,
}

impl Pixmap {
    /// Create a new pixmap with the given width and height in pixels.
    ///
    /// All pixels are initialized to transparent black.
    pub fn new(width: u16, height: u16) -> Self {
        let buf = vec![TRANSPARENT; usize::from(width) * usize::from(height)];
        Self { width, height, buf }
    }

    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: AlphaColor<Srgb>) {
        let premul = color.premultiply().to_rgba8();
        self.buf.fill(premul);
    }

    /// Return the width of the pixmap.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Return the height of the pixmap.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Returns a reference to the underlying data as premultiplied RGBA8.
    pub fn data(&self) -> &[PremulRgba8] {
        &self.buf
    }

    /// Returns the underlying data as bytes, for uploading.
    pub fn data_as_u8_slice(&self) -> &[u8] {
        bytemuck::cast_slice(&self.buf)
    }

    /// Sample a pixel, or `None` if it is out of bounds.
    pub fn sample(&self, x: u16, y: u16) -> Option<PremulRgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = usize::from(self.width) * usize::from(y) + usize::from(x);
        self.buf.get(idx).copied()
    }
}

static FILL_TEXTURE: OnceLock<Pixmap> = OnceLock::new();

/// The 1x1 opaque white texture sampled by solid fills.
///
/// It is created on first use and never changes afterwards, so it can be shared freely.
/// Vertices emitted by fills use the texture coordinate `(0, 0)`, so the vertex color is
/// reproduced exactly.
pub fn fill_texture() -> &'static Pixmap {
    FILL_TEXTURE.get_or_init(|| {
        let mut pixmap = Pixmap::new(1, 1);
        pixmap.fill(palette::css::WHITE);
        pixmap
    })
}
