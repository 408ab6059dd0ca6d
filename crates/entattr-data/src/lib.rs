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

//! # Entattr Data
//!
//! Attribute catalogs and the attribute resolution engine.
//!
//! - [`catalog`] stores descriptors per capability tag and per store kind,
//!   composes them for a capability set, and manages the process-wide
//!   snapshot lifecycle.
//! - [`engine`] resolves attribute names on entity handles against a backend
//!   and a catalog snapshot.

#![warn(missing_docs)]

pub mod catalog;
pub mod engine;

pub use catalog::{CatalogRegistry, CatalogSet, ComposedCatalogs};
pub use engine::{AttributeEngine, BoundFunction, EntityHandle};
