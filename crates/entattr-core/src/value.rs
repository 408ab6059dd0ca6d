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

//! The dynamically typed value exchanged across the attribute boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entity::Pointer;
use crate::error::AttributeError;
use crate::math::{Rgba8, Vec3};
use crate::types::Primitive;

/// A value read from or written to an entity attribute.
///
/// Integer reads are widened to `Int` (signed primitives) or `UInt`
/// (unsigned primitives). [`Value::coerce`] converts an arbitrary value into
/// the canonical form of a primitive before it is handed to a backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// A boolean.
    Bool(bool),
    /// A signed integer of any width.
    Int(i64),
    /// An unsigned integer of any width.
    UInt(u64),
    /// A floating point number of any width.
    Float(f64),
    /// Text.
    String(String),
    /// A three-component vector.
    Vector(Vec3),
    /// An address in engine memory.
    Pointer(Pointer),
    /// A raw 32-bit entity handle.
    Handle(u32),
    /// An 8-bit-per-channel color.
    Color(Rgba8),
}

impl Value {
    /// Returns a short name for the variant, used in error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Vector(_) => "vector",
            Value::Pointer(_) => "pointer",
            Value::Handle(_) => "handle",
            Value::Color(_) => "color",
        }
    }

    /// Returns the value as a mathematical integer, if it is integral.
    pub fn as_integer(&self) -> Option<i128> {
        match *self {
            Value::Bool(b) => Some(b as i128),
            Value::Int(i) => Some(i as i128),
            Value::UInt(u) => Some(u as i128),
            Value::Handle(h) => Some(h as i128),
            Value::Pointer(p) => Some(p.0 as i128),
            _ => None,
        }
    }

    /// Returns the 32-bit pattern of an integer that fits in `i32` or `u32`.
    pub fn as_bits32(&self) -> Option<u32> {
        if let Value::Color(c) = self {
            return Some(c.to_packed());
        }
        let i = self.as_integer()?;
        if (i32::MIN as i128..=u32::MAX as i128).contains(&i) {
            Some(i as u32)
        } else {
            None
        }
    }

    /// Returns the value as `f64` if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Float(f) => Some(f),
            _ => self.as_integer().map(|i| i as f64),
        }
    }

    /// Returns the boolean if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the text if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns an integer value with `mask` OR-ed in, keeping the variant.
    ///
    /// Returns `None` for non-integer values.
    pub fn with_bits(&self, mask: u64) -> Option<Value> {
        match *self {
            Value::Int(i) => Some(Value::Int(i | mask as i64)),
            Value::UInt(u) => Some(Value::UInt(u | mask)),
            _ => None,
        }
    }

    /// The key used to look a logical value up in a boolean translation map.
    ///
    /// Booleans map to `"True"` / `"False"`; everything else uses its display form.
    pub fn logical_key(&self) -> String {
        match self {
            Value::Bool(true) => "True".to_owned(),
            Value::Bool(false) => "False".to_owned(),
            other => other.to_string(),
        }
    }

    /// Converts the value into the canonical form of `primitive`.
    ///
    /// Integer primitives accept any integral value that fits either the
    /// signed or the unsigned range of their width and keep its
    /// two's-complement bit pattern: signed primitives yield `Int`, unsigned
    /// ones `UInt`.
    pub fn coerce(&self, primitive: Primitive) -> Result<Value, AttributeError> {
        let mismatch = || AttributeError::TypeMismatch {
            expected: primitive,
            found: self.kind_name(),
        };

        match primitive {
            Primitive::Bool => match self.as_integer() {
                Some(0) => Ok(Value::Bool(false)),
                Some(1) => Ok(Value::Bool(true)),
                Some(_) => Err(self.out_of_range(primitive)),
                None => Err(mismatch()),
            },
            Primitive::I8
            | Primitive::U8
            | Primitive::I16
            | Primitive::U16
            | Primitive::I32
            | Primitive::U32
            | Primitive::I64
            | Primitive::U64 => {
                let bits = primitive.integer_bits().unwrap_or(64);
                match self {
                    Value::Bool(_) | Value::Int(_) | Value::UInt(_) | Value::Handle(_) => {}
                    _ => return Err(mismatch()),
                }
                let i = self.as_integer().ok_or_else(mismatch)?;
                let min = -(1i128 << (bits - 1));
                let max = (1i128 << bits) - 1;
                if i < min || i > max {
                    return Err(self.out_of_range(primitive));
                }
                let pattern = (i as u128) & (max as u128);
                if primitive.is_signed() {
                    let sign = 1u128 << (bits - 1);
                    let signed = if pattern & sign != 0 {
                        pattern as i128 - (1i128 << bits)
                    } else {
                        pattern as i128
                    };
                    Ok(Value::Int(signed as i64))
                } else {
                    Ok(Value::UInt(pattern as u64))
                }
            }
            Primitive::F32 => match self {
                Value::Float(f) => Ok(Value::Float(*f as f32 as f64)),
                Value::Int(_) | Value::UInt(_) => self
                    .as_f64()
                    .map(|f| Value::Float(f as f32 as f64))
                    .ok_or_else(mismatch),
                _ => Err(mismatch()),
            },
            Primitive::F64 => match self {
                Value::Float(_) | Value::Int(_) | Value::UInt(_) => {
                    self.as_f64().map(Value::Float).ok_or_else(mismatch)
                }
                _ => Err(mismatch()),
            },
            Primitive::Pointer => match self {
                Value::Pointer(p) => Ok(Value::Pointer(*p)),
                Value::Int(_) | Value::UInt(_) => {
                    let i = self.as_integer().ok_or_else(mismatch)?;
                    usize::try_from(i)
                        .map(|addr| Value::Pointer(Pointer(addr)))
                        .map_err(|_| self.out_of_range(primitive))
                }
                _ => Err(mismatch()),
            },
            Primitive::String => match self {
                Value::String(s) => Ok(Value::String(s.clone())),
                _ => Err(mismatch()),
            },
            Primitive::Vector3 => match self {
                Value::Vector(v) => Ok(Value::Vector(*v)),
                _ => Err(mismatch()),
            },
            Primitive::EntityHandle => match self {
                Value::Handle(h) => Ok(Value::Handle(*h)),
                Value::Int(_) | Value::UInt(_) => self
                    .as_bits32()
                    .map(Value::Handle)
                    .ok_or_else(|| self.out_of_range(primitive)),
                _ => Err(mismatch()),
            },
            Primitive::Color => match self {
                Value::Color(c) => Ok(Value::Color(*c)),
                Value::Int(_) | Value::UInt(_) => self
                    .as_bits32()
                    .map(|bits| Value::Color(Rgba8::from_packed(bits)))
                    .ok_or_else(|| self.out_of_range(primitive)),
                _ => Err(mismatch()),
            },
        }
    }

    fn out_of_range(&self, primitive: Primitive) -> AttributeError {
        AttributeError::ValueOutOfRange {
            primitive,
            value: self.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::UInt(u) => write!(f, "{u}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Vector(v) => write!(f, "{v}"),
            Value::Pointer(p) => write!(f, "{p}"),
            Value::Handle(h) => write!(f, "{h}"),
            Value::Color(c) => write!(f, "{c}"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::UInt(v as u64)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::UInt(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Vec3> for Value {
    fn from(v: Vec3) -> Self {
        Value::Vector(v)
    }
}

impl From<Rgba8> for Value {
    fn from(v: Rgba8) -> Self {
        Value::Color(v)
    }
}

impl From<Pointer> for Value {
    fn from(v: Pointer) -> Self {
        Value::Pointer(v)
    }
}
