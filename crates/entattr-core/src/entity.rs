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

//! Identity types for world objects and raw engine memory.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The stable slot index of a world object in the engine's edict table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityIndex(pub u32);

impl fmt::Display for EntityIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for EntityIndex {
    fn from(index: u32) -> Self {
        Self(index)
    }
}

/// The state of an edict slot as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdictState {
    /// The slot has never been allocated.
    Unused,
    /// The slot was allocated and has since been released.
    Free,
    /// The slot holds a live world object.
    Live,
}

/// An address in engine memory.
///
/// Pointers are opaque to the resolution engine; only the backend's
/// [`MemoryAccess`](crate::native::MemoryAccess) implementation dereferences them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pointer(pub usize);

impl Pointer {
    /// The null address.
    pub const NULL: Self = Self(0);

    /// Returns `true` for the null address.
    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Returns the address `offset` bytes away, or `None` on overflow.
    #[inline]
    pub fn offset(self, offset: i32) -> Option<Self> {
        self.0.checked_add_signed(offset as isize).map(Self)
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}
