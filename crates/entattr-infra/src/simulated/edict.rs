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

use std::collections::BTreeMap;

use ahash::AHashMap;
use entattr_core::{Delegate, Pointer, Value};

/// A fixed set of named members exposed through the [`Delegate`] contract.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticDelegate {
    name: String,
    members: BTreeMap<String, Value>,
}

impl StaticDelegate {
    /// Creates an empty delegate called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: BTreeMap::new(),
        }
    }

    /// Adds or replaces a member.
    pub fn insert(&mut self, member: impl Into<String>, value: impl Into<Value>) {
        self.members.insert(member.into(), value.into());
    }

    /// Builder form of [`Self::insert`].
    pub fn with(mut self, member: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(member, value);
        self
    }
}

impl Delegate for StaticDelegate {
    fn delegate_name(&self) -> &str {
        &self.name
    }

    fn member(&self, name: &str) -> Option<Value> {
        self.members.get(name).cloned()
    }
}

/// One live entity of a [`SimulatedEngine`](super::SimulatedEngine).
///
/// Properties and keyvalues must be declared before the engine accepts
/// reads or writes of them, mirroring an engine whose send tables and
/// datamaps are fixed per class.
#[derive(Debug, Clone)]
pub struct SimulatedEdict {
    pub(crate) class_name: String,
    pub(crate) serial: u32,
    pub(crate) base: Pointer,
    pub(crate) properties: AHashMap<String, Value>,
    pub(crate) keyvalues: AHashMap<String, Value>,
    pub(crate) edict_fields: StaticDelegate,
    pub(crate) entity_vars: StaticDelegate,
}

impl SimulatedEdict {
    pub(crate) fn new(class_name: &str, serial: u32, base: Pointer) -> Self {
        Self {
            class_name: class_name.to_owned(),
            serial,
            base,
            properties: AHashMap::new(),
            keyvalues: AHashMap::new(),
            edict_fields: StaticDelegate::new("edict"),
            entity_vars: StaticDelegate::new("entvars"),
        }
    }

    /// The entity's class name.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Address of the entity object in the arena.
    pub fn base(&self) -> Pointer {
        self.base
    }

    /// Declares a networked property with its initial value.
    pub fn declare_property(
        &mut self,
        prop: impl Into<String>,
        value: impl Into<Value>,
    ) -> &mut Self {
        self.properties.insert(prop.into(), value.into());
        self
    }

    /// Declares a keyvalue with its initial value.
    pub fn declare_keyvalue(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> &mut Self {
        self.keyvalues.insert(name.into(), value.into());
        self
    }

    /// Returns the raw stored value of a property.
    pub fn property(&self, prop: &str) -> Option<&Value> {
        self.properties.get(prop)
    }

    /// Returns the raw stored value of a keyvalue.
    pub fn keyvalue(&self, name: &str) -> Option<&Value> {
        self.keyvalues.get(name)
    }

    /// Members of the engine-side edict structure; consulted first.
    pub fn edict_fields_mut(&mut self) -> &mut StaticDelegate {
        &mut self.edict_fields
    }

    /// Members of the entity-variables block; consulted after the edict.
    pub fn entity_vars_mut(&mut self) -> &mut StaticDelegate {
        &mut self.entity_vars
    }
}
