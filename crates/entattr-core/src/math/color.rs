// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Defines the `Rgba8` color type used by render attributes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A color with one unsigned byte per channel.
///
/// Engines store render colors as a single 32-bit integer with red in the
/// least significant byte. [`Rgba8::to_packed`] and [`Rgba8::from_packed`]
/// convert between the two representations.
///
/// `#[repr(C)]` keeps the byte order identical to the packed little-endian form.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
)]
#[repr(C)]
pub struct Rgba8 {
    /// The red channel.
    pub r: u8,
    /// The green channel.
    pub g: u8,
    /// The blue channel.
    pub b: u8,
    /// The alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Creates a new `Rgba8` with explicit channel values.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Unpacks a color from its 32-bit form, red in the least significant byte.
    #[inline]
    pub const fn from_packed(v: u32) -> Self {
        Self {
            r: (v & 0xFF) as u8,
            g: ((v >> 8) & 0xFF) as u8,
            b: ((v >> 16) & 0xFF) as u8,
            a: ((v >> 24) & 0xFF) as u8,
        }
    }

    /// Packs the channels into a 32-bit integer, red in the least significant byte.
    #[inline]
    pub const fn to_packed(self) -> u32 {
        self.r as u32 | (self.g as u32) << 8 | (self.b as u32) << 16 | (self.a as u32) << 24
    }

    /// Returns the channels as an `(r, g, b, a)` tuple.
    #[inline]
    pub const fn to_tuple(self) -> (u8, u8, u8, u8) {
        (self.r, self.g, self.b, self.a)
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_channel_order() {
        let c = Rgba8::from_packed(0x4080_00FF);
        assert_eq!(c.to_tuple(), (255, 0, 128, 64));
        assert_eq!(c.to_packed(), 0x4080_00FF);
    }

    #[test]
    fn test_packed_matches_memory_layout() {
        let c = Rgba8::new(1, 2, 3, 4);
        assert_eq!(bytemuck::bytes_of(&c), &c.to_packed().to_le_bytes());
    }
}
