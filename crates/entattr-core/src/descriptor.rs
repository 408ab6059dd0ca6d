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

//! Descriptors: the metadata telling the engine how to read or write one attribute.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{AttributeType, StoreKind};
use crate::value::Value;

/// Maps logical values to the raw values a property stores.
///
/// A property that is logically boolean but stored as an arbitrary raw value
/// carries a map such as `{"True": Int(2), "False": Int(0)}`. Only the
/// `"True"` entry is needed for reads; writes look up the logical value's key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoolTranslation {
    values: BTreeMap<String, Value>,
}

impl BoolTranslation {
    /// Key of the raw value that reads as `true`.
    pub const TRUE_KEY: &'static str = "True";

    /// Builds a translation from `(key, raw)` pairs.
    pub fn new<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            values: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Shorthand for the common `{"True": t, "False": f}` map.
    pub fn boolean(true_raw: impl Into<Value>, false_raw: impl Into<Value>) -> Self {
        Self::new([("True", true_raw.into()), ("False", false_raw.into())])
    }

    /// Returns the raw value that reads as `true`, if the map declares one.
    pub fn true_raw(&self) -> Option<&Value> {
        self.values.get(Self::TRUE_KEY)
    }

    /// Returns the raw value stored for a logical key.
    pub fn raw_for(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }
}

/// A networked property read through the edict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    /// The engine-side property identifier, e.g. `m_iHealth`.
    pub prop: String,
    /// The declared type tag.
    #[serde(rename = "type")]
    pub ty: AttributeType,
    /// Boolean translation for properties stored as comparison values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<BoolTranslation>,
}

impl PropertyDescriptor {
    /// Creates an untranslated property descriptor.
    pub fn new(prop: impl Into<String>, ty: AttributeType) -> Self {
        Self {
            prop: prop.into(),
            ty,
            translation: None,
        }
    }

    /// Attaches a boolean translation map.
    pub fn with_translation(mut self, translation: BoolTranslation) -> Self {
        self.translation = Some(translation);
        self
    }
}

/// A map keyvalue, looked up by the attribute name itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyValueDescriptor {
    /// The declared type tag.
    #[serde(rename = "type")]
    pub ty: AttributeType,
}

/// A field at a fixed byte offset from the entity's base pointer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OffsetDescriptor {
    /// Byte offset from the base pointer.
    pub offset: i32,
    /// The declared type tag.
    #[serde(rename = "type")]
    pub ty: AttributeType,
}

/// A native function and how to call it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionBinding {
    /// The native symbol the backend resolves.
    pub symbol: String,
    /// Parameter types, including the receiver slot when one is injected.
    #[serde(default)]
    pub params: Vec<AttributeType>,
    /// Return type; `None` for functions returning nothing.
    #[serde(default)]
    pub return_type: Option<AttributeType>,
    /// Position at which the entity's own pointer is injected, if any.
    #[serde(default)]
    pub receiver_index: Option<usize>,
}

impl FunctionBinding {
    /// Number of arguments the caller supplies.
    pub fn caller_arity(&self) -> usize {
        match self.receiver_index {
            Some(_) => self.params.len().saturating_sub(1),
            None => self.params.len(),
        }
    }
}

/// Metadata for one attribute in one catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeDescriptor {
    /// See [`PropertyDescriptor`].
    Property(PropertyDescriptor),
    /// See [`KeyValueDescriptor`].
    KeyValue(KeyValueDescriptor),
    /// See [`OffsetDescriptor`].
    Offset(OffsetDescriptor),
    /// See [`FunctionBinding`].
    Function(FunctionBinding),
}

impl AttributeDescriptor {
    /// Returns the store this descriptor belongs to.
    pub fn store(&self) -> StoreKind {
        match self {
            AttributeDescriptor::Property(_) => StoreKind::Property,
            AttributeDescriptor::KeyValue(_) => StoreKind::KeyValue,
            AttributeDescriptor::Offset(_) => StoreKind::Offset,
            AttributeDescriptor::Function(_) => StoreKind::Function,
        }
    }

    /// Returns the value type tag; functions report their return type.
    pub fn attribute_type(&self) -> Option<AttributeType> {
        match self {
            AttributeDescriptor::Property(p) => Some(p.ty),
            AttributeDescriptor::KeyValue(k) => Some(k.ty),
            AttributeDescriptor::Offset(o) => Some(o.ty),
            AttributeDescriptor::Function(f) => f.return_type,
        }
    }
}

impl From<PropertyDescriptor> for AttributeDescriptor {
    fn from(d: PropertyDescriptor) -> Self {
        AttributeDescriptor::Property(d)
    }
}

impl From<KeyValueDescriptor> for AttributeDescriptor {
    fn from(d: KeyValueDescriptor) -> Self {
        AttributeDescriptor::KeyValue(d)
    }
}

impl From<OffsetDescriptor> for AttributeDescriptor {
    fn from(d: OffsetDescriptor) -> Self {
        AttributeDescriptor::Offset(d)
    }
}

impl From<FunctionBinding> for AttributeDescriptor {
    fn from(d: FunctionBinding) -> Self {
        AttributeDescriptor::Function(d)
    }
}
