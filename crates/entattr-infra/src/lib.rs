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

//! Concrete backends for the entattr collaborator contracts.
//!
//! The only backend shipped is [`simulated`], an in-process engine with an
//! edict table, networked properties, keyvalues, a flat memory arena and a
//! native function table. It backs the test suites and benchmarks.

#![warn(missing_docs)]

pub mod simulated;

pub use simulated::{ArenaMemory, NativeCall, SimulatedEdict, SimulatedEngine, StaticDelegate};
