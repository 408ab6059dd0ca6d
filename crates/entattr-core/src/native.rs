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

//! # Engine Backend Contracts
//!
//! Interface contracts the resolution engine consumes. A concrete backend
//! (a live game process binding, or the simulated engine in `entattr-infra`)
//! implements them; the engine never touches native objects or memory
//! except through these traits.
//!
//! | Trait             | Responsibility                                          |
//! |-------------------|---------------------------------------------------------|
//! | [`EdictProvider`] | Slot validity, delegates, property and keyvalue access  |
//! | [`MemoryAccess`]  | Typed reads and writes at a pointer plus offset         |
//! | [`NativeCaller`]  | Invoking bound native functions                         |
//! | [`EngineBackend`] | All three together                                      |
//!
//! All primitive operations receive values already coerced to the canonical
//! form of their [`Primitive`] (see [`Value::coerce`]).

use crate::descriptor::FunctionBinding;
use crate::entity::{EdictState, EntityIndex, Pointer};
use crate::error::NativeError;
use crate::types::Primitive;
use crate::value::Value;

/// A pre-resolved native object that exposes named members.
///
/// Delegates are consulted before any catalog, so a member here shadows a
/// catalog entry of the same name.
pub trait Delegate {
    /// A short name identifying the delegate in logs, e.g. `"edict"`.
    fn delegate_name(&self) -> &str;

    /// Returns the member's current value, or `None` if the delegate has no such member.
    fn member(&self, name: &str) -> Option<Value>;
}

/// Access to the engine's edict table.
pub trait EdictProvider {
    /// Reports whether the slot is unused, free, or live.
    fn edict_state(&self, index: EntityIndex) -> EdictState;

    /// Returns the class name of a live edict.
    fn class_name(&self, index: EntityIndex) -> Result<String, NativeError>;

    /// Returns the serialized integer handle of a live edict.
    fn int_handle(&self, index: EntityIndex) -> Result<u32, NativeError>;

    /// Returns the base pointer offsets are relative to.
    fn base_pointer(&self, index: EntityIndex) -> Result<Pointer, NativeError>;

    /// Returns the delegates of a live edict in priority order, edict first.
    fn delegates(&self, index: EntityIndex) -> Vec<&dyn Delegate>;

    /// Reads a networked property.
    fn read_property(
        &self,
        index: EntityIndex,
        prop: &str,
        primitive: Primitive,
    ) -> Result<Value, NativeError>;

    /// Writes a networked property.
    fn write_property(
        &mut self,
        index: EntityIndex,
        prop: &str,
        primitive: Primitive,
        value: &Value,
    ) -> Result<(), NativeError>;

    /// Reads a keyvalue by name.
    fn read_keyvalue(
        &self,
        index: EntityIndex,
        name: &str,
        primitive: Primitive,
    ) -> Result<Value, NativeError>;

    /// Writes a keyvalue by name.
    fn write_keyvalue(
        &mut self,
        index: EntityIndex,
        name: &str,
        primitive: Primitive,
        value: &Value,
    ) -> Result<(), NativeError>;
}

/// Typed access to raw engine memory.
pub trait MemoryAccess {
    /// Reads a primitive at `pointer + offset`.
    fn read(&self, pointer: Pointer, offset: i32, primitive: Primitive)
        -> Result<Value, NativeError>;

    /// Writes a primitive at `pointer + offset`.
    fn write(
        &mut self,
        pointer: Pointer,
        offset: i32,
        primitive: Primitive,
        value: &Value,
    ) -> Result<(), NativeError>;
}

/// Invocation of bound native functions.
pub trait NativeCaller {
    /// Calls the function with fully prepared arguments, receiver included.
    ///
    /// Returns `None` for functions without a return value.
    fn call(
        &mut self,
        binding: &FunctionBinding,
        args: &[Value],
    ) -> Result<Option<Value>, NativeError>;
}

/// Everything the resolution engine needs from an engine.
pub trait EngineBackend: EdictProvider + MemoryAccess + NativeCaller {}

impl<T: EdictProvider + MemoryAccess + NativeCaller> EngineBackend for T {}
