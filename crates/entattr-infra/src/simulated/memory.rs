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

use std::ops::Range;

use bytemuck::Pod;
use entattr_core::{NativeError, Pointer, Primitive, Rgba8, Value, Vec3};

const ALIGNMENT: usize = 16;

/// A growable, contiguous byte arena addressed like process memory.
///
/// Addresses start at [`ArenaMemory::DEFAULT_BASE`] so that the null pointer
/// and small integers never alias a valid allocation. All scalars are stored
/// little-endian.
#[derive(Debug, Clone)]
pub struct ArenaMemory {
    base: usize,
    bytes: Vec<u8>,
}

impl ArenaMemory {
    /// Address of the first byte of a default arena.
    pub const DEFAULT_BASE: usize = 0x1000_0000;

    /// Creates an empty arena at [`Self::DEFAULT_BASE`].
    pub fn new() -> Self {
        Self::with_base(Self::DEFAULT_BASE)
    }

    /// Creates an empty arena whose first allocation lands at `base`.
    pub fn with_base(base: usize) -> Self {
        Self {
            base,
            bytes: Vec::new(),
        }
    }

    /// Reserves `size` zeroed bytes and returns their address.
    pub fn allocate(&mut self, size: usize) -> Pointer {
        let start = self.bytes.len().next_multiple_of(ALIGNMENT);
        self.bytes.resize(start + size, 0);
        Pointer(self.base + start)
    }

    /// Total bytes reserved so far.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if nothing was allocated.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns `true` if `address` points inside the arena.
    pub fn contains(&self, address: Pointer) -> bool {
        (self.base..self.base + self.bytes.len()).contains(&address.0)
    }

    fn span(&self, address: Pointer, size: usize) -> Result<Range<usize>, NativeError> {
        if !self.contains(address) {
            return Err(NativeError::InvalidAddress(address));
        }
        let start = address.0 - self.base;
        match start.checked_add(size) {
            Some(end) if end <= self.bytes.len() => Ok(start..end),
            _ => Err(NativeError::OutOfBounds { address, size }),
        }
    }

    /// Borrows `size` bytes at `address`.
    pub fn read_bytes(&self, address: Pointer, size: usize) -> Result<&[u8], NativeError> {
        let range = self.span(address, size)?;
        Ok(&self.bytes[range])
    }

    /// Overwrites bytes at `address`.
    pub fn write_bytes(&mut self, address: Pointer, data: &[u8]) -> Result<(), NativeError> {
        let range = self.span(address, data.len())?;
        self.bytes[range].copy_from_slice(data);
        Ok(())
    }

    /// Reads a plain-old-data value at `address`.
    pub fn read_pod<T: Pod>(&self, address: Pointer) -> Result<T, NativeError> {
        let bytes = self.read_bytes(address, std::mem::size_of::<T>())?;
        Ok(bytemuck::pod_read_unaligned(bytes))
    }

    /// Writes a plain-old-data value at `address`.
    pub fn write_pod<T: Pod>(&mut self, address: Pointer, value: &T) -> Result<(), NativeError> {
        self.write_bytes(address, bytemuck::bytes_of(value))
    }

    /// Reads a NUL-terminated string at `address`.
    pub fn read_c_str(&self, address: Pointer) -> Result<String, NativeError> {
        let range = self.span(address, 0)?;
        let tail = &self.bytes[range.start..];
        let len = tail
            .iter()
            .position(|&b| b == 0)
            .ok_or(NativeError::OutOfBounds {
                address,
                size: tail.len() + 1,
            })?;
        Ok(String::from_utf8_lossy(&tail[..len]).into_owned())
    }

    /// Writes `text` followed by a NUL terminator at `address`.
    pub fn write_c_str(&mut self, address: Pointer, text: &str) -> Result<(), NativeError> {
        let mut data = Vec::with_capacity(text.len() + 1);
        data.extend_from_slice(text.as_bytes());
        data.push(0);
        self.write_bytes(address, &data)
    }

    /// Reads a primitive at `address`.
    pub fn read_value(&self, address: Pointer, primitive: Primitive) -> Result<Value, NativeError> {
        let value = match primitive {
            Primitive::Bool => Value::Bool(self.read_pod::<u8>(address)? != 0),
            Primitive::I8 => Value::Int(self.read_pod::<i8>(address)? as i64),
            Primitive::U8 => Value::UInt(self.read_pod::<u8>(address)? as u64),
            Primitive::I16 => Value::Int(self.read_pod::<i16>(address)? as i64),
            Primitive::U16 => Value::UInt(self.read_pod::<u16>(address)? as u64),
            Primitive::I32 => Value::Int(self.read_pod::<i32>(address)? as i64),
            Primitive::U32 => Value::UInt(self.read_pod::<u32>(address)? as u64),
            Primitive::I64 => Value::Int(self.read_pod::<i64>(address)?),
            Primitive::U64 => Value::UInt(self.read_pod::<u64>(address)?),
            Primitive::F32 => Value::Float(self.read_pod::<f32>(address)? as f64),
            Primitive::F64 => Value::Float(self.read_pod::<f64>(address)?),
            Primitive::Pointer => Value::Pointer(Pointer(self.read_pod::<usize>(address)?)),
            Primitive::String => Value::String(self.read_c_str(address)?),
            Primitive::Vector3 => Value::Vector(self.read_pod::<Vec3>(address)?),
            Primitive::EntityHandle => Value::Handle(self.read_pod::<u32>(address)?),
            Primitive::Color => Value::Color(self.read_pod::<Rgba8>(address)?),
        };
        Ok(value)
    }

    /// Writes a primitive at `address`.
    ///
    /// The value must already be in the canonical form of `primitive`.
    pub fn write_value(
        &mut self,
        address: Pointer,
        primitive: Primitive,
        value: &Value,
    ) -> Result<(), NativeError> {
        let unsupported = || NativeError::UnsupportedPrimitive(primitive);

        match (primitive, value) {
            (Primitive::Bool, Value::Bool(b)) => self.write_pod(address, &(*b as u8)),
            (Primitive::F32, Value::Float(f)) => self.write_pod(address, &(*f as f32)),
            (Primitive::F64, Value::Float(f)) => self.write_pod(address, f),
            (Primitive::Pointer, Value::Pointer(p)) => self.write_pod(address, &p.0),
            (Primitive::String, Value::String(s)) => self.write_c_str(address, s),
            (Primitive::Vector3, Value::Vector(v)) => self.write_pod(address, v),
            (Primitive::EntityHandle, Value::Handle(h)) => self.write_pod(address, h),
            (Primitive::Color, Value::Color(c)) => self.write_pod(address, c),
            (_, Value::Int(_) | Value::UInt(_)) => {
                let size = primitive.integer_bits().ok_or_else(unsupported)? as usize / 8;
                let bits = value.as_integer().ok_or_else(unsupported)? as i64;
                self.write_bytes(address, &bits.to_le_bytes()[..size])
            }
            _ => Err(unsupported()),
        }
    }
}

impl Default for ArenaMemory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocations_are_aligned_and_zeroed() {
        let mut memory = ArenaMemory::new();
        let a = memory.allocate(3);
        let b = memory.allocate(8);

        assert_eq!(a, Pointer(ArenaMemory::DEFAULT_BASE));
        assert_eq!(b.0 % ALIGNMENT, 0);
        assert_eq!(memory.read_pod::<u64>(b).unwrap(), 0);
    }

    #[test]
    fn test_integer_bit_patterns_are_little_endian() {
        let mut memory = ArenaMemory::new();
        let at = memory.allocate(16);

        memory.write_value(at, Primitive::I32, &Value::Int(-1)).unwrap();
        assert_eq!(memory.read_value(at, Primitive::U32).unwrap(), Value::UInt(0xFFFF_FFFF));

        memory.write_value(at, Primitive::U16, &Value::UInt(0x1234)).unwrap();
        assert_eq!(memory.read_bytes(at, 2).unwrap(), &[0x34, 0x12]);
    }

    #[test]
    fn test_pod_and_string_values() {
        let mut memory = ArenaMemory::new();
        let at = memory.allocate(64);
        let v = Vec3::new(1.0, -2.5, 3.0);

        memory.write_value(at, Primitive::Vector3, &Value::Vector(v)).unwrap();
        assert_eq!(memory.read_value(at, Primitive::Vector3).unwrap(), Value::Vector(v));

        let text = Pointer(at.0 + 16);
        memory.write_value(text, Primitive::String, &Value::String("npc_zombie".into())).unwrap();
        assert_eq!(memory.read_c_str(text).unwrap(), "npc_zombie");
    }

    #[test]
    fn test_out_of_arena_accesses_fail() {
        let mut memory = ArenaMemory::new();
        let at = memory.allocate(4);

        assert_eq!(
            memory.read_value(Pointer::NULL, Primitive::I32),
            Err(NativeError::InvalidAddress(Pointer::NULL))
        );
        assert_eq!(
            memory.read_value(Pointer(at.0 + 2), Primitive::I32),
            Err(NativeError::OutOfBounds { address: Pointer(at.0 + 2), size: 4 })
        );
    }
}
