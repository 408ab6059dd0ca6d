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

//! # Entattr Core
//!
//! Foundational crate containing the value model, attribute descriptors, and
//! the interface contracts that an engine backend implements so that entity
//! attributes can be resolved by name at access time.

#![warn(missing_docs)]

pub mod capability;
pub mod descriptor;
pub mod entity;
pub mod error;
pub mod math;
pub mod native;
pub mod types;
pub mod value;

pub use capability::CapabilitySet;
pub use descriptor::{
    AttributeDescriptor, BoolTranslation, FunctionBinding, KeyValueDescriptor, OffsetDescriptor,
    PropertyDescriptor,
};
pub use entity::{EdictState, EntityIndex, Pointer};
pub use error::{AttributeError, NativeError};
pub use math::{Rgba8, Vec3};
pub use native::{Delegate, EdictProvider, EngineBackend, MemoryAccess, NativeCaller};
pub use types::{AttributeType, Primitive, StoreKind};
pub use value::Value;
