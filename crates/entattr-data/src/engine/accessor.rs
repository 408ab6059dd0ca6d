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

//! Typed accessor dispatch for the property, keyvalue, and offset stores.
//!
//! Each function maps the descriptor's type tag to a [`Primitive`](entattr_core::Primitive) for its
//! store, coerces outgoing values to that primitive, and performs exactly one
//! backend operation.

use entattr_core::{
    AttributeError, EngineBackend, KeyValueDescriptor, OffsetDescriptor, PropertyDescriptor,
    StoreKind, Value,
};

use super::handle::EntityHandle;

pub(crate) fn read_property(
    backend: &dyn EngineBackend,
    handle: &EntityHandle,
    name: &str,
    descriptor: &PropertyDescriptor,
) -> Result<Value, AttributeError> {
    let primitive = StoreKind::Property.primitive_for(descriptor.ty)?;
    let raw = backend
        .read_property(handle.index(), &descriptor.prop, primitive)
        .map_err(|e| AttributeError::native(name, e))?;

    match descriptor.translation.as_ref().and_then(|t| t.true_raw()) {
        Some(true_raw) => {
            let logical = raw.coerce(primitive)? == true_raw.coerce(primitive)?;
            Ok(Value::Bool(logical))
        }
        None => Ok(raw),
    }
}

pub(crate) fn write_property(
    backend: &mut dyn EngineBackend,
    handle: &EntityHandle,
    name: &str,
    descriptor: &PropertyDescriptor,
    value: &Value,
) -> Result<(), AttributeError> {
    let primitive = StoreKind::Property.primitive_for(descriptor.ty)?;

    let raw = match descriptor
        .translation
        .as_ref()
        .filter(|t| t.true_raw().is_some())
    {
        Some(translation) => {
            let key = value.logical_key();
            translation
                .raw_for(&key)
                .ok_or_else(|| AttributeError::InvalidPropertyValue {
                    name: name.to_owned(),
                    key: key.clone(),
                })?
                .coerce(primitive)?
        }
        None => value.coerce(primitive)?,
    };

    backend
        .write_property(handle.index(), &descriptor.prop, primitive, &raw)
        .map_err(|e| AttributeError::native(name, e))
}

pub(crate) fn read_keyvalue(
    backend: &dyn EngineBackend,
    handle: &EntityHandle,
    name: &str,
    descriptor: &KeyValueDescriptor,
) -> Result<Value, AttributeError> {
    let primitive = StoreKind::KeyValue.primitive_for(descriptor.ty)?;
    backend
        .read_keyvalue(handle.index(), name, primitive)
        .map_err(|e| AttributeError::native(name, e))
}

pub(crate) fn write_keyvalue(
    backend: &mut dyn EngineBackend,
    handle: &EntityHandle,
    name: &str,
    descriptor: &KeyValueDescriptor,
    value: &Value,
) -> Result<(), AttributeError> {
    let primitive = StoreKind::KeyValue.primitive_for(descriptor.ty)?;
    let value = value.coerce(primitive)?;
    backend
        .write_keyvalue(handle.index(), name, primitive, &value)
        .map_err(|e| AttributeError::native(name, e))
}

pub(crate) fn read_offset(
    backend: &dyn EngineBackend,
    handle: &EntityHandle,
    name: &str,
    descriptor: &OffsetDescriptor,
) -> Result<Value, AttributeError> {
    let primitive = StoreKind::Offset.primitive_for(descriptor.ty)?;
    let base = backend
        .base_pointer(handle.index())
        .map_err(|e| AttributeError::native(name, e))?;
    backend
        .read(base, descriptor.offset, primitive)
        .map_err(|e| AttributeError::native(name, e))
}

pub(crate) fn write_offset(
    backend: &mut dyn EngineBackend,
    handle: &EntityHandle,
    name: &str,
    descriptor: &OffsetDescriptor,
    value: &Value,
) -> Result<(), AttributeError> {
    let primitive = StoreKind::Offset.primitive_for(descriptor.ty)?;
    let value = value.coerce(primitive)?;
    let base = backend
        .base_pointer(handle.index())
        .map_err(|e| AttributeError::native(name, e))?;
    backend
        .write(base, descriptor.offset, primitive, &value)
        .map_err(|e| AttributeError::native(name, e))
}

