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

//! # Resolver Chain
//!
//! Plain attribute access walks a fixed, priority-ordered list of resolver
//! strategies. Each strategy either claims a name (returning `Some`) or
//! passes (`None`), and the first claim wins:
//!
//! | Priority | Resolver             | Readable | Writable |
//! |----------|----------------------|----------|----------|
//! | 1        | [`DelegateResolver`] | yes      | no       |
//! | 2        | [`PropertyResolver`] | yes      | yes      |
//! | 3        | [`KeyValueResolver`] | yes      | yes      |
//! | 4        | [`OffsetResolver`]   | yes      | yes      |
//!
//! The function catalog is deliberately absent; functions are reached through
//! [`AttributeEngine::function`](super::AttributeEngine::function).

use entattr_core::{AttributeError, EngineBackend, Value};

use super::accessor;
use super::handle::EntityHandle;
use crate::catalog::ComposedCatalogs;

/// What a resolver sees while handling one access.
pub struct ResolveContext<'a> {
    /// The object being accessed.
    pub handle: &'a EntityHandle,
    /// The catalogs composed for the object's capability set.
    pub catalogs: &'a ComposedCatalogs,
}

/// One strategy in the resolver chain.
pub trait AttributeResolver: Sync {
    /// A short name used in trace logs.
    fn layer(&self) -> &'static str;

    /// Reads `name` if this resolver owns it.
    fn try_get(
        &self,
        cx: &ResolveContext<'_>,
        backend: &dyn EngineBackend,
        name: &str,
    ) -> Option<Result<Value, AttributeError>>;

    /// Writes `name` if this resolver owns it.
    fn try_set(
        &self,
        cx: &ResolveContext<'_>,
        backend: &mut dyn EngineBackend,
        name: &str,
        value: &Value,
    ) -> Option<Result<(), AttributeError>>;
}

/// Members exposed directly by the edict and other delegates.
pub struct DelegateResolver;

impl AttributeResolver for DelegateResolver {
    fn layer(&self) -> &'static str {
        "delegate"
    }

    fn try_get(
        &self,
        cx: &ResolveContext<'_>,
        backend: &dyn EngineBackend,
        name: &str,
    ) -> Option<Result<Value, AttributeError>> {
        backend
            .delegates(cx.handle.index())
            .into_iter()
            .find_map(|delegate| {
                let value = delegate.member(name)?;
                log::trace!("'{name}' served by delegate '{}'", delegate.delegate_name());
                Some(Ok(value))
            })
    }

    fn try_set(
        &self,
        _cx: &ResolveContext<'_>,
        _backend: &mut dyn EngineBackend,
        _name: &str,
        _value: &Value,
    ) -> Option<Result<(), AttributeError>> {
        None
    }
}

/// Networked properties declared in the property catalog.
pub struct PropertyResolver;

impl AttributeResolver for PropertyResolver {
    fn layer(&self) -> &'static str {
        "property"
    }

    fn try_get(
        &self,
        cx: &ResolveContext<'_>,
        backend: &dyn EngineBackend,
        name: &str,
    ) -> Option<Result<Value, AttributeError>> {
        let descriptor = cx.catalogs.property(name)?;
        Some(accessor::read_property(backend, cx.handle, name, descriptor))
    }

    fn try_set(
        &self,
        cx: &ResolveContext<'_>,
        backend: &mut dyn EngineBackend,
        name: &str,
        value: &Value,
    ) -> Option<Result<(), AttributeError>> {
        let descriptor = cx.catalogs.property(name)?;
        Some(accessor::write_property(
            backend, cx.handle, name, descriptor, value,
        ))
    }
}

/// Keyvalues declared in the keyvalue catalog.
pub struct KeyValueResolver;

impl AttributeResolver for KeyValueResolver {
    fn layer(&self) -> &'static str {
        "keyvalue"
    }

    fn try_get(
        &self,
        cx: &ResolveContext<'_>,
        backend: &dyn EngineBackend,
        name: &str,
    ) -> Option<Result<Value, AttributeError>> {
        let descriptor = cx.catalogs.keyvalue(name)?;
        Some(accessor::read_keyvalue(backend, cx.handle, name, descriptor))
    }

    fn try_set(
        &self,
        cx: &ResolveContext<'_>,
        backend: &mut dyn EngineBackend,
        name: &str,
        value: &Value,
    ) -> Option<Result<(), AttributeError>> {
        let descriptor = cx.catalogs.keyvalue(name)?;
        Some(accessor::write_keyvalue(
            backend, cx.handle, name, descriptor, value,
        ))
    }
}

/// Raw memory fields declared in the offset catalog.
pub struct OffsetResolver;

impl AttributeResolver for OffsetResolver {
    fn layer(&self) -> &'static str {
        "offset"
    }

    fn try_get(
        &self,
        cx: &ResolveContext<'_>,
        backend: &dyn EngineBackend,
        name: &str,
    ) -> Option<Result<Value, AttributeError>> {
        let descriptor = cx.catalogs.offset(name)?;
        Some(accessor::read_offset(backend, cx.handle, name, descriptor))
    }

    fn try_set(
        &self,
        cx: &ResolveContext<'_>,
        backend: &mut dyn EngineBackend,
        name: &str,
        value: &Value,
    ) -> Option<Result<(), AttributeError>> {
        let descriptor = cx.catalogs.offset(name)?;
        Some(accessor::write_offset(
            backend, cx.handle, name, descriptor, value,
        ))
    }
}

/// The resolver chain in priority order.
pub const RESOLVER_CHAIN: [&dyn AttributeResolver; 4] = [
    &DelegateResolver,
    &PropertyResolver,
    &KeyValueResolver,
    &OffsetResolver,
];
