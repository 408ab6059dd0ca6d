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

use ahash::AHashMap;
use entattr_core::{
    Delegate, EdictProvider, EdictState, EntityIndex, FunctionBinding, MemoryAccess,
    NativeCaller, NativeError, Pointer, Primitive, Value,
};

use super::edict::SimulatedEdict;
use super::memory::ArenaMemory;

/// Bits of a serialized handle holding the edict index.
const ENTRY_BITS: u32 = 12;
/// Bytes reserved in the arena for each spawned entity object.
const ENTITY_SIZE: usize = 0x400;

/// A native function registered under a symbol.
pub type NativeFn = Box<dyn FnMut(&[Value]) -> Result<Option<Value>, NativeError> + Send>;

/// One recorded native call.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeCall {
    /// The symbol that was called.
    pub symbol: String,
    /// The arguments as received, receiver included.
    pub args: Vec<Value>,
}

#[derive(Debug, Clone)]
enum Slot {
    Unused,
    Free { serial: u32 },
    Live(SimulatedEdict),
}

/// In-process engine backend.
///
/// # Examples
///
/// ```
/// use entattr_core::{EdictProvider, EdictState, EntityIndex, Value};
/// use entattr_infra::SimulatedEngine;
///
/// let mut engine = SimulatedEngine::new(8);
/// engine
///     .spawn(1, "player")
///     .declare_property("m_iHealth", Value::Int(100));
///
/// assert_eq!(engine.edict_state(EntityIndex(1)), EdictState::Live);
/// assert_eq!(engine.edict_state(EntityIndex(2)), EdictState::Unused);
/// ```
pub struct SimulatedEngine {
    slots: Vec<Slot>,
    memory: ArenaMemory,
    natives: AHashMap<String, NativeFn>,
    calls: Vec<NativeCall>,
}

impl SimulatedEngine {
    /// Creates an engine with `max_edicts` unused slots.
    pub fn new(max_edicts: usize) -> Self {
        Self {
            slots: vec![Slot::Unused; max_edicts],
            memory: ArenaMemory::new(),
            natives: AHashMap::new(),
            calls: Vec::new(),
        }
    }

    /// Maximum number of edicts.
    pub fn max_edicts(&self) -> usize {
        self.slots.len()
    }

    /// Spawns an entity of `class_name` in slot `index` and returns it for setup.
    ///
    /// A slot that held an entity before gets a new serial number. Spawning
    /// into an occupied slot replaces the entity.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`Self::max_edicts`].
    pub fn spawn(&mut self, index: u32, class_name: &str) -> &mut SimulatedEdict {
        let slot = index as usize;
        assert!(slot < self.slots.len(), "edict index {index} out of range");

        let serial = match &self.slots[slot] {
            Slot::Unused => 0,
            Slot::Free { serial } => serial + 1,
            Slot::Live(edict) => edict.serial + 1,
        };
        let base = self.memory.allocate(ENTITY_SIZE);
        log::debug!("Spawned '{class_name}' in slot {index} at {base}");

        self.slots[slot] = Slot::Live(SimulatedEdict::new(class_name, serial, base));
        match &mut self.slots[slot] {
            Slot::Live(edict) => edict,
            _ => unreachable!("slot was just made live"),
        }
    }

    /// Frees a live entity. Returns `false` if the slot held none.
    pub fn free(&mut self, index: u32) -> bool {
        let Some(slot) = self.slots.get_mut(index as usize) else {
            return false;
        };
        match slot {
            Slot::Live(edict) => {
                let serial = edict.serial;
                *slot = Slot::Free { serial };
                true
            }
            _ => false,
        }
    }

    /// Returns a live entity.
    pub fn edict(&self, index: u32) -> Option<&SimulatedEdict> {
        match self.slots.get(index as usize)? {
            Slot::Live(edict) => Some(edict),
            _ => None,
        }
    }

    /// Returns a live entity mutably.
    pub fn edict_mut(&mut self, index: u32) -> Option<&mut SimulatedEdict> {
        match self.slots.get_mut(index as usize)? {
            Slot::Live(edict) => Some(edict),
            _ => None,
        }
    }

    /// The backing memory arena.
    pub fn memory(&self) -> &ArenaMemory {
        &self.memory
    }

    /// The backing memory arena, mutably.
    pub fn memory_mut(&mut self) -> &mut ArenaMemory {
        &mut self.memory
    }

    /// Registers a native function under `symbol`.
    pub fn register_native<F>(&mut self, symbol: impl Into<String>, function: F)
    where
        F: FnMut(&[Value]) -> Result<Option<Value>, NativeError> + Send + 'static,
    {
        self.natives.insert(symbol.into(), Box::new(function));
    }

    /// Every native call made so far, oldest first.
    pub fn calls(&self) -> &[NativeCall] {
        &self.calls
    }

    fn live(&self, index: EntityIndex) -> Result<&SimulatedEdict, NativeError> {
        self.edict(index.0).ok_or(NativeError::DeadEntity(index))
    }

    fn live_mut(&mut self, index: EntityIndex) -> Result<&mut SimulatedEdict, NativeError> {
        self.edict_mut(index.0).ok_or(NativeError::DeadEntity(index))
    }
}

fn convert(value: &Value, primitive: Primitive) -> Result<Value, NativeError> {
    value
        .coerce(primitive)
        .map_err(|e| NativeError::InvalidValue(Box::new(e)))
}

impl EdictProvider for SimulatedEngine {
    fn edict_state(&self, index: EntityIndex) -> EdictState {
        match self.slots.get(index.0 as usize) {
            Some(Slot::Live(_)) => EdictState::Live,
            Some(Slot::Free { .. }) => EdictState::Free,
            Some(Slot::Unused) | None => EdictState::Unused,
        }
    }

    fn class_name(&self, index: EntityIndex) -> Result<String, NativeError> {
        Ok(self.live(index)?.class_name.clone())
    }

    fn int_handle(&self, index: EntityIndex) -> Result<u32, NativeError> {
        let edict = self.live(index)?;
        Ok(index.0 | (edict.serial << ENTRY_BITS))
    }

    fn base_pointer(&self, index: EntityIndex) -> Result<Pointer, NativeError> {
        Ok(self.live(index)?.base)
    }

    fn delegates(&self, index: EntityIndex) -> Vec<&dyn Delegate> {
        match self.edict(index.0) {
            Some(edict) => vec![&edict.edict_fields as &dyn Delegate, &edict.entity_vars],
            None => Vec::new(),
        }
    }

    fn read_property(
        &self,
        index: EntityIndex,
        prop: &str,
        primitive: Primitive,
    ) -> Result<Value, NativeError> {
        let stored = self
            .live(index)?
            .properties
            .get(prop)
            .ok_or_else(|| NativeError::UnknownProperty(prop.to_owned()))?;
        convert(stored, primitive)
    }

    fn write_property(
        &mut self,
        index: EntityIndex,
        prop: &str,
        primitive: Primitive,
        value: &Value,
    ) -> Result<(), NativeError> {
        let value = convert(value, primitive)?;
        let slot = self
            .live_mut(index)?
            .properties
            .get_mut(prop)
            .ok_or_else(|| NativeError::UnknownProperty(prop.to_owned()))?;
        *slot = value;
        Ok(())
    }

    fn read_keyvalue(
        &self,
        index: EntityIndex,
        name: &str,
        primitive: Primitive,
    ) -> Result<Value, NativeError> {
        let stored = self
            .live(index)?
            .keyvalues
            .get(name)
            .ok_or_else(|| NativeError::UnknownKeyValue(name.to_owned()))?;
        convert(stored, primitive)
    }

    fn write_keyvalue(
        &mut self,
        index: EntityIndex,
        name: &str,
        primitive: Primitive,
        value: &Value,
    ) -> Result<(), NativeError> {
        let value = convert(value, primitive)?;
        let slot = self
            .live_mut(index)?
            .keyvalues
            .get_mut(name)
            .ok_or_else(|| NativeError::UnknownKeyValue(name.to_owned()))?;
        *slot = value;
        Ok(())
    }
}

impl MemoryAccess for SimulatedEngine {
    fn read(
        &self,
        pointer: Pointer,
        offset: i32,
        primitive: Primitive,
    ) -> Result<Value, NativeError> {
        let address = pointer
            .offset(offset)
            .ok_or(NativeError::InvalidAddress(pointer))?;
        self.memory.read_value(address, primitive)
    }

    fn write(
        &mut self,
        pointer: Pointer,
        offset: i32,
        primitive: Primitive,
        value: &Value,
    ) -> Result<(), NativeError> {
        let address = pointer
            .offset(offset)
            .ok_or(NativeError::InvalidAddress(pointer))?;
        self.memory.write_value(address, primitive, value)
    }
}

impl NativeCaller for SimulatedEngine {
    fn call(
        &mut self,
        binding: &FunctionBinding,
        args: &[Value],
    ) -> Result<Option<Value>, NativeError> {
        let function = self
            .natives
            .get_mut(&binding.symbol)
            .ok_or_else(|| NativeError::UnknownSymbol(binding.symbol.clone()))?;

        self.calls.push(NativeCall {
            symbol: binding.symbol.clone(),
            args: args.to_vec(),
        });
        log::trace!("native call '{}' with {} arguments", binding.symbol, args.len());
        function(args)
    }
}
