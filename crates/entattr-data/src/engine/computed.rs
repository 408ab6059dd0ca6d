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

//! Read-only attributes computed from the handle and the edict.

use entattr_core::{AttributeError, EngineBackend, Value};

use super::handle::EntityHandle;

/// Prefix marking a private backing field.
pub(crate) const PRIVATE_PREFIX: char = '_';

/// An attribute derived from the handle or the edict rather than a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Computed {
    Index,
    ClassName,
    IntHandle,
    Pointer,
    Capabilities,
}

impl Computed {
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        match name {
            "index" => Some(Computed::Index),
            "classname" => Some(Computed::ClassName),
            "inthandle" => Some(Computed::IntHandle),
            "pointer" => Some(Computed::Pointer),
            "capabilities" => Some(Computed::Capabilities),
            _ => None,
        }
    }

    /// Resolves a private name such as `_index` to the attribute it backs.
    pub(crate) fn from_backing_field(name: &str) -> Option<Self> {
        name.strip_prefix(PRIVATE_PREFIX).and_then(Self::from_name)
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            Computed::Index => "index",
            Computed::ClassName => "classname",
            Computed::IntHandle => "inthandle",
            Computed::Pointer => "pointer",
            Computed::Capabilities => "capabilities",
        }
    }

    pub(crate) fn backing_field(self) -> String {
        format!("{PRIVATE_PREFIX}{}", self.name())
    }

    /// Returns the backing field if one was written, otherwise asks the backend.
    pub(crate) fn evaluate(
        self,
        handle: &EntityHandle,
        backend: &dyn EngineBackend,
    ) -> Result<Value, AttributeError> {
        if let Some(value) = handle.local(&self.backing_field()) {
            return Ok(value.clone());
        }

        let index = handle.index();
        let native = |e| AttributeError::native(self.name(), e);
        match self {
            Computed::Index => Ok(Value::UInt(index.0 as u64)),
            Computed::ClassName => backend.class_name(index).map(Value::String).map_err(native),
            Computed::IntHandle => backend.int_handle(index).map(Value::Handle).map_err(native),
            Computed::Pointer => backend.base_pointer(index).map(Value::Pointer).map_err(native),
            Computed::Capabilities => Ok(Value::String(handle.capabilities().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backing_field_names() {
        assert_eq!(Computed::from_backing_field("_index"), Some(Computed::Index));
        assert_eq!(Computed::from_backing_field("index"), None);
        assert_eq!(Computed::from_backing_field("_health"), None);
        assert_eq!(Computed::from_backing_field("_"), None);
        assert_eq!(Computed::ClassName.backing_field(), "_classname");
    }
}
