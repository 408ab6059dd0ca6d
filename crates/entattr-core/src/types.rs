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

//! Type tags used by catalogs and the primitive accessor enumeration they map to.
//!
//! A catalog entry names the type of an attribute with an [`AttributeType`]
//! tag. Before a read or write, the tag is mapped to one [`Primitive`] for the
//! store that owns the attribute. Not every store supports every tag; an
//! unsupported pair is a catalog bug and is reported as
//! [`AttributeError::UnsupportedAttributeType`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AttributeError;

/// The backing store a descriptor belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    /// Networked properties read through the edict.
    Property,
    /// Map keyvalues read by name through the edict.
    KeyValue,
    /// Raw memory at a byte offset from the entity's base pointer.
    Offset,
    /// Native functions called with an optional injected receiver.
    Function,
}

impl StoreKind {
    /// All store kinds in resolution order.
    pub const ALL: [StoreKind; 4] = [
        StoreKind::Property,
        StoreKind::KeyValue,
        StoreKind::Offset,
        StoreKind::Function,
    ];

    /// Maps a catalog type tag to the primitive accessor for this store.
    pub fn primitive_for(self, ty: AttributeType) -> Result<Primitive, AttributeError> {
        use AttributeType as T;
        use Primitive as P;

        let primitive = match self {
            StoreKind::Property => match ty {
                T::Bool | T::Char | T::Short | T::Int | T::Long => Some(P::I32),
                T::UChar | T::UShort | T::UInt | T::ULong => Some(P::U32),
                T::Float => Some(P::F32),
                T::StringPointer | T::StringArray => Some(P::String),
                T::Vector => Some(P::Vector3),
                T::EHandle => Some(P::EntityHandle),
                _ => None,
            },
            StoreKind::KeyValue => match ty {
                T::Bool | T::Int => Some(P::I32),
                T::Float => Some(P::F32),
                T::StringPointer | T::StringArray => Some(P::String),
                T::Vector => Some(P::Vector3),
                T::Color => Some(P::Color),
                _ => None,
            },
            StoreKind::Offset | StoreKind::Function => match ty {
                T::Bool => Some(P::Bool),
                T::Char => Some(P::I8),
                T::UChar => Some(P::U8),
                T::Short => Some(P::I16),
                T::UShort => Some(P::U16),
                T::Int | T::Long => Some(P::I32),
                T::UInt | T::ULong => Some(P::U32),
                T::LongLong => Some(P::I64),
                T::ULongLong => Some(P::U64),
                T::Float => Some(P::F32),
                T::Double => Some(P::F64),
                T::Pointer => Some(P::Pointer),
                T::StringArray => Some(P::String),
                T::Vector => Some(P::Vector3),
                T::EHandle => Some(P::EntityHandle),
                T::Color => Some(P::Color),
                T::StringPointer => None,
            },
        };

        primitive.ok_or_else(|| AttributeError::UnsupportedAttributeType {
            store: Some(self),
            type_tag: ty.to_string(),
        })
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::Property => write!(f, "property"),
            StoreKind::KeyValue => write!(f, "keyvalue"),
            StoreKind::Offset => write!(f, "offset"),
            StoreKind::Function => write!(f, "function"),
        }
    }
}

/// The type tag written in a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    /// Boolean, stored as an integer by properties and keyvalues.
    Bool,
    /// Signed 8-bit integer.
    Char,
    /// Unsigned 8-bit integer.
    #[serde(rename = "uchar")]
    UChar,
    /// Signed 16-bit integer.
    Short,
    /// Unsigned 16-bit integer.
    #[serde(rename = "ushort")]
    UShort,
    /// Signed 32-bit integer.
    Int,
    /// Unsigned 32-bit integer.
    #[serde(rename = "uint")]
    UInt,
    /// Signed `long` (32-bit on the supported engines).
    Long,
    /// Unsigned `long` (32-bit on the supported engines).
    #[serde(rename = "ulong")]
    ULong,
    /// Signed 64-bit integer.
    LongLong,
    /// Unsigned 64-bit integer.
    #[serde(rename = "ulong_long")]
    ULongLong,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
    /// Raw pointer.
    Pointer,
    /// Pointer to a NUL-terminated string.
    StringPointer,
    /// Inline NUL-terminated character array.
    StringArray,
    /// Three-component float vector.
    Vector,
    /// Entity handle.
    #[serde(rename = "ehandle")]
    EHandle,
    /// Packed 8-bit-per-channel color.
    Color,
}

impl AttributeType {
    /// Returns the tag as written in catalogs.
    pub const fn as_str(self) -> &'static str {
        match self {
            AttributeType::Bool => "bool",
            AttributeType::Char => "char",
            AttributeType::UChar => "uchar",
            AttributeType::Short => "short",
            AttributeType::UShort => "ushort",
            AttributeType::Int => "int",
            AttributeType::UInt => "uint",
            AttributeType::Long => "long",
            AttributeType::ULong => "ulong",
            AttributeType::LongLong => "long_long",
            AttributeType::ULongLong => "ulong_long",
            AttributeType::Float => "float",
            AttributeType::Double => "double",
            AttributeType::Pointer => "pointer",
            AttributeType::StringPointer => "string_pointer",
            AttributeType::StringArray => "string_array",
            AttributeType::Vector => "vector",
            AttributeType::EHandle => "ehandle",
            AttributeType::Color => "color",
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttributeType {
    type Err = AttributeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ty = match s {
            "bool" => AttributeType::Bool,
            "char" => AttributeType::Char,
            "uchar" => AttributeType::UChar,
            "short" => AttributeType::Short,
            "ushort" => AttributeType::UShort,
            "int" => AttributeType::Int,
            "uint" => AttributeType::UInt,
            "long" => AttributeType::Long,
            "ulong" => AttributeType::ULong,
            "long_long" => AttributeType::LongLong,
            "ulong_long" => AttributeType::ULongLong,
            "float" => AttributeType::Float,
            "double" => AttributeType::Double,
            "pointer" => AttributeType::Pointer,
            "string_pointer" => AttributeType::StringPointer,
            "string_array" => AttributeType::StringArray,
            "vector" => AttributeType::Vector,
            "ehandle" => AttributeType::EHandle,
            "color" => AttributeType::Color,
            other => {
                return Err(AttributeError::UnsupportedAttributeType {
                    store: None,
                    type_tag: other.to_owned(),
                });
            }
        };
        Ok(ty)
    }
}

/// The closed set of primitive accessor operations a backend implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// One-byte boolean.
    Bool,
    /// Signed 8-bit integer.
    I8,
    /// Unsigned 8-bit integer.
    U8,
    /// Signed 16-bit integer.
    I16,
    /// Unsigned 16-bit integer.
    U16,
    /// Signed 32-bit integer.
    I32,
    /// Unsigned 32-bit integer.
    U32,
    /// Signed 64-bit integer.
    I64,
    /// Unsigned 64-bit integer.
    U64,
    /// 32-bit float.
    F32,
    /// 64-bit float.
    F64,
    /// Pointer-sized address.
    Pointer,
    /// Text.
    String,
    /// Three `f32` components.
    Vector3,
    /// 32-bit entity handle.
    EntityHandle,
    /// Packed 8-bit-per-channel color.
    Color,
}

impl Primitive {
    /// Returns the width in bits of an integer primitive, `None` otherwise.
    pub const fn integer_bits(self) -> Option<u32> {
        match self {
            Primitive::I8 | Primitive::U8 => Some(8),
            Primitive::I16 | Primitive::U16 => Some(16),
            Primitive::I32 | Primitive::U32 => Some(32),
            Primitive::I64 | Primitive::U64 => Some(64),
            _ => None,
        }
    }

    /// Returns `true` for the signed integer primitives.
    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            Primitive::I8 | Primitive::I16 | Primitive::I32 | Primitive::I64
        )
    }

    /// Returns the in-memory size in bytes, `None` for variable-length text.
    pub const fn size(self) -> Option<usize> {
        match self {
            Primitive::Bool | Primitive::I8 | Primitive::U8 => Some(1),
            Primitive::I16 | Primitive::U16 => Some(2),
            Primitive::I32 | Primitive::U32 | Primitive::F32 => Some(4),
            Primitive::EntityHandle | Primitive::Color => Some(4),
            Primitive::I64 | Primitive::U64 | Primitive::F64 => Some(8),
            Primitive::Pointer => Some(std::mem::size_of::<usize>()),
            Primitive::Vector3 => Some(12),
            Primitive::String => None,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Primitive::Bool => "bool",
            Primitive::I8 => "i8",
            Primitive::U8 => "u8",
            Primitive::I16 => "i16",
            Primitive::U16 => "u16",
            Primitive::I32 => "i32",
            Primitive::U32 => "u32",
            Primitive::I64 => "i64",
            Primitive::U64 => "u64",
            Primitive::F32 => "f32",
            Primitive::F64 => "f64",
            Primitive::Pointer => "pointer",
            Primitive::String => "string",
            Primitive::Vector3 => "vector3",
            Primitive::EntityHandle => "entity_handle",
            Primitive::Color => "color",
        };
        f.write_str(name)
    }
}
