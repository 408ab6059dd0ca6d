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

//! Defines the error types for attribute resolution and engine backends.

use crate::entity::{EntityIndex, Pointer};
use crate::types::{Primitive, StoreKind};

/// An error raised by an engine backend while performing a primitive operation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NativeError {
    /// The edict slot does not hold a live object.
    #[error("Entity {0} is not live")]
    DeadEntity(EntityIndex),

    /// The address is outside any mapped region.
    #[error("Invalid memory address: {0}")]
    InvalidAddress(Pointer),

    /// Reading or writing `size` bytes at the address would leave its region.
    #[error("Memory access out of bounds at {address} (size: {size})")]
    OutOfBounds {
        /// Start address of the access.
        address: Pointer,
        /// Number of bytes requested.
        size: usize,
    },

    /// The edict has no networked property with this name.
    #[error("Unknown property: {0}")]
    UnknownProperty(String),

    /// The edict has no keyvalue with this name.
    #[error("Unknown keyvalue: {0}")]
    UnknownKeyValue(String),

    /// No native function is registered for the symbol.
    #[error("Unknown native symbol: {0}")]
    UnknownSymbol(String),

    /// The backend cannot perform the operation for this primitive.
    #[error("Primitive {0} is not supported by this operation")]
    UnsupportedPrimitive(Primitive),

    /// The backend cannot represent the value as the requested primitive.
    #[error("Value rejected by the backend: {0}")]
    InvalidValue(#[source] Box<AttributeError>),

    /// The native function reported a failure.
    #[error("Native call '{symbol}' failed: {reason}")]
    CallFailed {
        /// The symbol that was called.
        symbol: String,
        /// Backend-provided description.
        reason: String,
    },
}

/// An error raised while resolving, reading, or writing an attribute.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AttributeError {
    /// The index does not name a live world object.
    #[error("Index \"{0}\" is not a proper entity index")]
    InvalidIndex(EntityIndex),

    /// No computed attribute, local value, delegate, or catalog declares the name.
    #[error("Attribute \"{0}\" not found")]
    AttributeNotFound(String),

    /// A private-prefixed write that does not back a read-only computed attribute.
    #[error("Invalid private attribute \"{0}\" given")]
    InvalidPrivateAttribute(String),

    /// A direct write to a read-only computed attribute.
    #[error("Attribute \"{0}\" is read-only")]
    ReadOnlyAttribute(String),

    /// The type tag has no accessor, either at all or for the given store.
    #[error("Unsupported attribute type '{type_tag}'{}", store_suffix(.store))]
    UnsupportedAttributeType {
        /// The store the descriptor belongs to, if known.
        store: Option<StoreKind>,
        /// The offending type tag.
        type_tag: String,
    },

    /// The logical value has no raw counterpart in the property's boolean translation.
    #[error("Invalid value '{key}' for property \"{name}\"")]
    InvalidPropertyValue {
        /// The property name.
        name: String,
        /// The looked-up translation key.
        key: String,
    },

    /// A call received the wrong number of arguments.
    #[error("{name}() requires {} arguments, {given} were given", format_expected(.expected))]
    InvalidArgumentCount {
        /// The operation that was called.
        name: String,
        /// The number of arguments supplied.
        given: usize,
        /// The accepted argument counts.
        expected: Vec<usize>,
    },

    /// The value cannot be converted to the primitive.
    #[error("Expected a value convertible to {expected}, found {found}")]
    TypeMismatch {
        /// The primitive being written.
        expected: Primitive,
        /// The kind of value supplied.
        found: &'static str,
    },

    /// The integer does not fit the primitive's width.
    #[error("Value {value} is out of range for {primitive}")]
    ValueOutOfRange {
        /// The primitive being written.
        primitive: Primitive,
        /// The supplied value.
        value: String,
    },

    /// Two catalog layers declare the same name for one capability set.
    #[error("Attribute \"{name}\" is declared by both the {first} and {second} catalogs")]
    CatalogCollision {
        /// The colliding attribute name.
        name: String,
        /// The layer that resolves first.
        first: StoreKind,
        /// The shadowed layer.
        second: StoreKind,
    },

    /// The backend failed the primitive operation.
    #[error("Native access to \"{name}\" failed")]
    Native {
        /// The attribute being accessed.
        name: String,
        /// The backend error.
        #[source]
        source: NativeError,
    },
}

impl AttributeError {
    /// Wraps a backend error with the attribute name it occurred on.
    pub fn native(name: &str, source: NativeError) -> Self {
        AttributeError::Native {
            name: name.to_owned(),
            source,
        }
    }
}

fn store_suffix(store: &Option<StoreKind>) -> String {
    match store {
        Some(store) => format!(" for {store} store"),
        None => String::new(),
    }
}

fn format_expected(expected: &[usize]) -> String {
    let parts: Vec<String> = expected.iter().map(ToString::to_string).collect();
    parts.join(" or ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_argument_count_message() {
        let err = AttributeError::InvalidArgumentCount {
            name: "set_color".into(),
            given: 2,
            expected: vec![3, 4],
        };
        assert_eq!(
            err.to_string(),
            "set_color() requires 3 or 4 arguments, 2 were given"
        );
    }

    #[test]
    fn test_unsupported_type_message() {
        let err = AttributeError::UnsupportedAttributeType {
            store: Some(StoreKind::KeyValue),
            type_tag: "pointer".into(),
        };
        assert_eq!(
            err.to_string(),
            "Unsupported attribute type 'pointer' for keyvalue store"
        );
        let err = AttributeError::UnsupportedAttributeType {
            store: None,
            type_tag: "quat".into(),
        };
        assert_eq!(err.to_string(), "Unsupported attribute type 'quat'");
    }

    #[test]
    fn test_native_error_is_source() {
        let err =
            AttributeError::native("health", NativeError::UnknownProperty("m_iHealth".into()));
        let source = err.source().expect("native errors keep their source");
        assert_eq!(source.to_string(), "Unknown property: m_iHealth");
    }
}
