// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fill colors.
//!
//! Colors enter the crate as premultiplied 16-bit channels through [`ToPremulRgba16`], and are
//! stored on vertices as straight-alpha floats ([`StraightColor`]).

pub use peniko::color::{palette, AlphaColor, PremulColor, PremulRgba8, Srgb};

/// The largest value of a 16-bit channel.
pub const MAX_CHANNEL: u16 = u16::MAX;

/// Types which can be converted to premultiplied RGBA with 16 bits per channel.
pub trait ToPremulRgba16 {
    /// Return the red, green, blue and alpha channels, with the color channels multiplied by
    /// alpha. No color channel may exceed alpha.
    fn to_premul_rgba16(&self) -> [u16; 4];
}

impl ToPremulRgba16 for [u16; 4] {
    fn to_premul_rgba16(&self) -> [u16; 4] {
        *self
    }
}

impl ToPremulRgba16 for PremulRgba8 {
    fn to_premul_rgba16(&self) -> [u16; 4] {
        // 0xff * 0x101 == 0xffff
        [self.r, self.g, self.b, self.a].map(|c| u16::from(c) * 0x101)
    }
}

impl ToPremulRgba16 for PremulColor<Srgb> {
    fn to_premul_rgba16(&self) -> [u16; 4] {
        let [r, g, b, a] = self.components.map(unit_to_u16);
        [r.min(a), g.min(a), b.min(a), a]
    }
}

impl ToPremulRgba16 for AlphaColor<Srgb> {
    fn to_premul_rgba16(&self) -> [u16; 4] {
        self.premultiply().to_premul_rgba16()
    }
}

impl<T: ToPremulRgba16 + ?Sized> ToPremulRgba16 for &T {
    fn to_premul_rgba16(&self) -> [u16; 4] {
        (**self).to_premul_rgba16()
    }
}

fn unit_to_u16(c: f32) -> u16 {
    // NaN saturates to 0.
    (c.clamp(0., 1.) * f32::from(MAX_CHANNEL)).round() as u16
}

/// A color with straight (not premultiplied) alpha, as normalized floats.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StraightColor {
    /// The red channel.
    pub r: f32,
    /// The green channel.
    pub g: f32,
    /// The blue channel.
    pub b: f32,
    /// The alpha channel.
    pub a: f32,
}

impl StraightColor {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self {
        r: 0.,
        g: 0.,
        b: 0.,
        a: 0.,
    };

    /// Undo the alpha premultiplication of a color.
    ///
    /// A fully transparent color decodes to all zeros.
    pub fn from_premul(color: impl ToPremulRgba16) -> Self {
        let [r, g, b, a] = color.to_premul_rgba16();
        if a == 0 {
            return Self::TRANSPARENT;
        }
        let alpha = f32::from(a);
        Self {
            r: f32::from(r) / alpha,
            g: f32::from(g) / alpha,
            b: f32::from(b) / alpha,
            a: alpha / f32::from(MAX_CHANNEL),
        }
    }

    /// The channels as an array, in RGBA order.
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}
