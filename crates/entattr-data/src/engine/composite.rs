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

//! The `color` composite attribute, packed into the `render` colour field.

use entattr_core::{AttributeError, EngineBackend, Primitive, Rgba8, Value};

use super::{AttributeEngine, EntityHandle};

/// Name of the composite colour attribute.
pub const COLOR: &str = "color";
/// Packed `0xAABBGGRR` colour attribute backing [`COLOR`].
pub const RENDER: &str = "render";
/// Render mode attribute; bit 0 enables colour rendering.
pub const RENDERMODE: &str = "rendermode";
/// Render effects attribute; bit 8 enables alpha.
pub const RENDERFX: &str = "renderfx";

const RENDERMODE_COLOR_BIT: u64 = 1;
const RENDERFX_ALPHA_BIT: u64 = 256;
const ALPHA_MASK: u32 = 0xFF00_0000;

impl<B: EngineBackend> AttributeEngine<'_, B> {
    /// Reads the entity colour from `render`.
    pub fn get_color(&self, handle: &EntityHandle) -> Result<Rgba8, AttributeError> {
        let render = self.get(handle, RENDER)?;
        Ok(Rgba8::from_packed(render_bits(&render)?))
    }

    /// Writes the entity colour.
    ///
    /// Takes `[r, g, b]` or `[r, g, b, a]`. With three channels the current
    /// alpha byte of `render` is kept. The colour and alpha flag bits of
    /// `rendermode` and `renderfx` are raised before `render` is written;
    /// a failure part-way leaves earlier writes in place.
    pub fn set_color(
        &mut self,
        handle: &mut EntityHandle,
        channels: &[u8],
    ) -> Result<(), AttributeError> {
        let (r, g, b, alpha) = match *channels {
            [r, g, b] => {
                let render = self.get(handle, RENDER)?;
                (r, g, b, render_bits(&render)? & ALPHA_MASK)
            }
            [r, g, b, a] => (r, g, b, u32::from(a) << 24),
            _ => {
                return Err(AttributeError::InvalidArgumentCount {
                    name: "set_color".to_owned(),
                    given: channels.len(),
                    expected: vec![3, 4],
                });
            }
        };
        let packed = u32::from(r) + (u32::from(g) << 8) + (u32::from(b) << 16) + alpha;

        self.raise_flag(handle, RENDERMODE, RENDERMODE_COLOR_BIT)?;
        self.raise_flag(handle, RENDERFX, RENDERFX_ALPHA_BIT)?;
        self.set(handle, RENDER, Value::UInt(u64::from(packed)))
    }

    fn raise_flag(
        &mut self,
        handle: &mut EntityHandle,
        name: &str,
        mask: u64,
    ) -> Result<(), AttributeError> {
        let current = self.get(handle, name)?;
        let raised = current
            .with_bits(mask)
            .ok_or_else(|| AttributeError::TypeMismatch {
                expected: Primitive::I32,
                found: current.kind_name(),
            })?;
        self.set(handle, name, raised)
    }
}

fn render_bits(render: &Value) -> Result<u32, AttributeError> {
    render
        .as_bits32()
        .ok_or_else(|| AttributeError::TypeMismatch {
            expected: Primitive::I32,
            found: render.kind_name(),
        })
}
