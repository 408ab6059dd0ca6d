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

use entattr_core::{CapabilitySet, EntityIndex, Value};

/// A resolved reference to one live world object.
///
/// The handle owns the object's index, its capability set, and any
/// instance-local values attached to it. It does not own the world object:
/// the engine-native side is looked up again through the backend on every
/// access, and dropping the handle leaves the object untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityHandle {
    index: EntityIndex,
    capabilities: CapabilitySet,
    locals: BTreeMap<String, Value>,
}

impl EntityHandle {
    /// Only the engine creates handles, after checking the index is live.
    pub(crate) fn new(index: EntityIndex, capabilities: CapabilitySet) -> Self {
        Self {
            index,
            capabilities,
            locals: BTreeMap::new(),
        }
    }

    /// The edict slot index.
    pub fn index(&self) -> EntityIndex {
        self.index
    }

    /// The capability set selecting this object's catalogs.
    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    /// Returns an instance-local value.
    pub fn local(&self, name: &str) -> Option<&Value> {
        self.locals.get(name)
    }

    /// Iterates instance-local values in name order.
    pub fn locals(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.locals.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn define_local(&mut self, name: &str, value: Value) {
        self.locals.insert(name.to_owned(), value);
    }
}
