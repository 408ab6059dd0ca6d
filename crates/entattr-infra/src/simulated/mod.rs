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

//! An in-process engine that implements every backend contract.
//!
//! - [`ArenaMemory`] is a contiguous byte arena standing in for process memory.
//! - [`SimulatedEdict`] holds one live entity's class, properties, keyvalues
//!   and delegates.
//! - [`SimulatedEngine`] owns the edict table, the arena and the native
//!   function table, and records every native call.

mod edict;
mod engine;
mod memory;

pub use edict::{SimulatedEdict, StaticDelegate};
pub use engine::{NativeCall, NativeFn, SimulatedEngine};
pub use memory::ArenaMemory;
