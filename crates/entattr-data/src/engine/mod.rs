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

//! # Attribute Resolution Engine
//!
//! [`AttributeEngine`] answers "what is attribute `name` of this entity?"
//! without knowing the entity's concrete type. A read goes through these
//! layers, stopping at the first one that knows the name:
//!
//! 1. the `color` composite and the read-only computed attributes
//!    (`index`, `classname`, `inthandle`, `pointer`, `capabilities`),
//! 2. values attached to the handle itself,
//! 3. the [resolver chain](resolver): delegates, properties, keyvalues, offsets.
//!
//! Writes follow the same order over the writable layers, and a name nobody
//! declares becomes a value attached to the handle.
//!
//! ```rust,ignore
//! let registry = CatalogRegistry::with_catalogs(catalogs);
//! let mut engine = AttributeEngine::new(&mut backend, &registry);
//!
//! let mut player = engine.resolve(1, CapabilitySet::new(["player"]))?;
//! engine.set(&mut player, "health", 75)?;
//! engine.set_color(&mut player, &[255, 0, 128])?;
//! ```

mod accessor;
mod composite;
mod computed;
mod function;
mod handle;
pub mod resolver;

use std::sync::Arc;

use entattr_core::{
    AttributeError, CapabilitySet, EdictState, EngineBackend, EntityIndex, Primitive, Value,
};

use crate::catalog::{CatalogRegistry, ComposedCatalogs};
use computed::{Computed, PRIVATE_PREFIX};
use resolver::{ResolveContext, RESOLVER_CHAIN};

pub use composite::{COLOR, RENDER, RENDERFX, RENDERMODE};
pub use function::BoundFunction;
pub use handle::EntityHandle;

/// Resolves and performs typed attribute accesses against one backend.
///
/// The engine borrows the backend mutably for its whole lifetime and takes a
/// fresh catalog snapshot from the registry on every call.
pub struct AttributeEngine<'a, B: EngineBackend> {
    backend: &'a mut B,
    registry: &'a CatalogRegistry,
}

impl<'a, B: EngineBackend> AttributeEngine<'a, B> {
    /// Creates an engine over `backend` using catalogs from `registry`.
    pub fn new(backend: &'a mut B, registry: &'a CatalogRegistry) -> Self {
        Self { backend, registry }
    }

    /// Returns the backend.
    pub fn backend(&self) -> &B {
        self.backend
    }

    /// Returns the backend mutably.
    pub fn backend_mut(&mut self) -> &mut B {
        self.backend
    }

    /// Creates a handle for a live edict.
    ///
    /// Fails with [`AttributeError::InvalidIndex`] when the slot is unused or
    /// free. The catalogs for `capabilities` are composed here, so a broken
    /// partition surfaces at construction rather than on first access.
    pub fn resolve(
        &self,
        index: impl Into<EntityIndex>,
        capabilities: CapabilitySet,
    ) -> Result<EntityHandle, AttributeError> {
        let index = index.into();
        match self.backend.edict_state(index) {
            EdictState::Live => {}
            state => {
                log::debug!("Refusing handle for entity {index}: edict is {state:?}");
                return Err(AttributeError::InvalidIndex(index));
            }
        }

        self.catalogs_for(&capabilities)?;
        Ok(EntityHandle::new(index, capabilities))
    }

    /// Returns the composed catalogs of the current snapshot for `capabilities`.
    pub fn catalogs_for(
        &self,
        capabilities: &CapabilitySet,
    ) -> Result<Arc<ComposedCatalogs>, AttributeError> {
        self.registry.snapshot().composed(capabilities)
    }

    /// Reads an attribute.
    pub fn get(&self, handle: &EntityHandle, name: &str) -> Result<Value, AttributeError> {
        if name == COLOR {
            return self.get_color(handle).map(Value::Color);
        }
        if let Some(computed) =
            Computed::from_name(name).or_else(|| Computed::from_backing_field(name))
        {
            return computed.evaluate(handle, &*self.backend);
        }
        if let Some(value) = handle.local(name) {
            log::trace!("get '{name}' on entity {} served by a local value", handle.index());
            return Ok(value.clone());
        }

        let catalogs = self.catalogs_for(handle.capabilities())?;
        let cx = ResolveContext {
            handle,
            catalogs: &catalogs,
        };
        for resolver in RESOLVER_CHAIN {
            if let Some(result) = resolver.try_get(&cx, &*self.backend, name) {
                log::trace!(
                    "get '{name}' on entity {} resolved by the {} layer",
                    handle.index(),
                    resolver.layer()
                );
                return result;
            }
        }

        Err(AttributeError::AttributeNotFound(name.to_owned()))
    }

    /// Writes an attribute.
    ///
    /// Names no layer declares are attached to the handle as local values.
    pub fn set(
        &mut self,
        handle: &mut EntityHandle,
        name: &str,
        value: impl Into<Value>,
    ) -> Result<(), AttributeError> {
        let value = value.into();

        if name.starts_with(PRIVATE_PREFIX) {
            return match Computed::from_backing_field(name) {
                Some(_) => {
                    handle.define_local(name, value);
                    Ok(())
                }
                None => Err(AttributeError::InvalidPrivateAttribute(name.to_owned())),
            };
        }
        if name == COLOR {
            return match value {
                Value::Color(c) => self.set_color(handle, &[c.r, c.g, c.b, c.a]),
                other => Err(AttributeError::TypeMismatch {
                    expected: Primitive::Color,
                    found: other.kind_name(),
                }),
            };
        }
        if Computed::from_name(name).is_some() {
            return Err(AttributeError::ReadOnlyAttribute(name.to_owned()));
        }

        let catalogs = self.catalogs_for(handle.capabilities())?;
        let cx = ResolveContext {
            handle: &*handle,
            catalogs: &catalogs,
        };
        for resolver in RESOLVER_CHAIN {
            if let Some(result) = resolver.try_set(&cx, &mut *self.backend, name, &value) {
                log::trace!(
                    "set '{name}' on entity {} resolved by the {} layer",
                    handle.index(),
                    resolver.layer()
                );
                return result;
            }
        }

        log::debug!(
            "'{name}' is not declared for entity {}; attaching it as a local value",
            handle.index()
        );
        handle.define_local(name, value);
        Ok(())
    }

    /// Looks up a function in the function catalog and binds it to the entity.
    pub fn function(
        &self,
        handle: &EntityHandle,
        name: &str,
    ) -> Result<BoundFunction, AttributeError> {
        let catalogs = self.catalogs_for(handle.capabilities())?;
        let binding = catalogs
            .function(name)
            .ok_or_else(|| AttributeError::AttributeNotFound(name.to_owned()))?
            .clone();

        let receiver = match binding.receiver_index {
            Some(_) => Some(
                self.backend
                    .base_pointer(handle.index())
                    .map_err(|e| AttributeError::native(name, e))?,
            ),
            None => None,
        };

        Ok(BoundFunction::new(name, binding, receiver))
    }

    /// Calls a function from the function catalog on the entity.
    pub fn call(
        &mut self,
        handle: &EntityHandle,
        name: &str,
        args: &[Value],
    ) -> Result<Option<Value>, AttributeError> {
        let function = self.function(handle, name)?;
        function.invoke(&mut *self.backend, args)
    }
}
