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

//! Attribute catalogs.
//!
//! A [`Catalog`] holds the descriptors of one store kind, arranged as an arena
//! of per-capability tables. A [`CatalogSet`] bundles the four catalogs
//! (properties, keyvalues, offsets, functions) into one immutable snapshot
//! and caches their [`ComposedCatalogs`] view per capability set. The
//! [`CatalogRegistry`] owns the current snapshot and swaps it on refresh.
//!
//! ## Lifecycle
//!
//! ```text
//! CatalogDocument (RON) ──parse──▶ CatalogSet ──load/refresh──▶ CatalogRegistry
//!                                                   │
//!                                    snapshot() per resolution call
//!                                                   ▼
//!                                  Arc<CatalogSet>::composed(&caps)
//! ```

mod composed;
mod document;
mod registry;
mod set;
mod table;

pub use composed::ComposedCatalogs;
pub use document::CatalogDocument;
pub use registry::CatalogRegistry;
pub use set::CatalogSet;
pub use table::Catalog;
