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

use entattr_core::{AttributeError, FunctionBinding, NativeCaller, Pointer, StoreKind, Value};

/// A function-catalog entry bound to one entity.
///
/// When the binding has a receiver slot, the entity's base pointer was
/// captured at bind time and is injected there on every call; callers pass
/// only the remaining arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundFunction {
    name: String,
    binding: FunctionBinding,
    receiver: Option<Pointer>,
}

impl BoundFunction {
    pub(crate) fn new(name: &str, binding: FunctionBinding, receiver: Option<Pointer>) -> Self {
        Self {
            name: name.to_owned(),
            binding,
            receiver,
        }
    }

    /// Returns the catalog name of the function.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the native binding.
    pub fn binding(&self) -> &FunctionBinding {
        &self.binding
    }

    /// Returns the injected receiver, if any.
    pub fn receiver(&self) -> Option<Pointer> {
        self.receiver
    }

    /// Number of arguments the caller must supply.
    pub fn arity(&self) -> usize {
        self.binding.caller_arity()
    }

    /// Coerces `args`, injects the receiver and calls the native function.
    pub fn invoke(
        &self,
        caller: &mut dyn NativeCaller,
        args: &[Value],
    ) -> Result<Option<Value>, AttributeError> {
        let expected = self.arity();
        if args.len() != expected {
            return Err(AttributeError::InvalidArgumentCount {
                name: self.name.clone(),
                given: args.len(),
                expected: vec![expected],
            });
        }

        let receiver_slot = self.binding.receiver_index;
        let params = self
            .binding
            .params
            .iter()
            .enumerate()
            .filter(|(slot, _)| Some(*slot) != receiver_slot)
            .map(|(_, ty)| *ty);

        let mut prepared = Vec::with_capacity(args.len() + 1);
        for (arg, ty) in args.iter().zip(params) {
            let primitive = StoreKind::Function.primitive_for(ty)?;
            prepared.push(arg.coerce(primitive)?);
        }
        if let (Some(slot), Some(receiver)) = (receiver_slot, self.receiver) {
            prepared.insert(slot.min(prepared.len()), Value::Pointer(receiver));
        }

        log::trace!(
            "calling '{}' ({}) with {} arguments",
            self.name,
            self.binding.symbol,
            prepared.len()
        );
        let returned = caller
            .call(&self.binding, &prepared)
            .map_err(|e| AttributeError::native(&self.name, e))?;

        match (returned, self.binding.return_type) {
            (Some(value), Some(ty)) => {
                let primitive = StoreKind::Function.primitive_for(ty)?;
                value.coerce(primitive).map(Some)
            }
            (_, None) => Ok(None),
            (None, Some(_)) => Ok(None),
        }
    }
}
