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

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use ahash::AHashMap;
use entattr_core::{
    AttributeDescriptor, AttributeError, CapabilitySet, FunctionBinding, KeyValueDescriptor,
    OffsetDescriptor, PropertyDescriptor, StoreKind,
};

use super::composed::ComposedCatalogs;
use super::table::Catalog;

/// One immutable snapshot of all four catalogs.
///
/// Composed views are cached per capability set. Because a published
/// snapshot is never mutated, the cache cannot go stale; a catalog change
/// produces a new `CatalogSet` with an empty cache.
#[derive(Debug)]
pub struct CatalogSet {
    properties: Catalog,
    keyvalues: Catalog,
    offsets: Catalog,
    functions: Catalog,
    compositions: RwLock<HashMap<CapabilitySet, Arc<ComposedCatalogs>>>,
}

impl CatalogSet {
    /// Creates a set with four empty catalogs.
    pub fn new() -> Self {
        Self {
            properties: Catalog::new(StoreKind::Property),
            keyvalues: Catalog::new(StoreKind::KeyValue),
            offsets: Catalog::new(StoreKind::Offset),
            functions: Catalog::new(StoreKind::Function),
            compositions: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the catalog of one store kind.
    pub fn catalog(&self, kind: StoreKind) -> &Catalog {
        match kind {
            StoreKind::Property => &self.properties,
            StoreKind::KeyValue => &self.keyvalues,
            StoreKind::Offset => &self.offsets,
            StoreKind::Function => &self.functions,
        }
    }

    fn catalog_mut(&mut self, kind: StoreKind) -> &mut Catalog {
        match kind {
            StoreKind::Property => &mut self.properties,
            StoreKind::KeyValue => &mut self.keyvalues,
            StoreKind::Offset => &mut self.offsets,
            StoreKind::Function => &mut self.functions,
        }
    }

    /// Declares an attribute for a capability tag in the catalog matching the descriptor.
    pub fn insert(&mut self, tag: &str, name: &str, descriptor: impl Into<AttributeDescriptor>) {
        let descriptor = descriptor.into();
        let kind = descriptor.store();
        let inserted = self.catalog_mut(kind).insert(tag, name, descriptor);
        debug_assert!(inserted.is_ok(), "descriptor routed to the {kind} catalog");
        self.compositions
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Builder form of [`insert`](Self::insert) for a property.
    pub fn with_property(mut self, tag: &str, name: &str, d: PropertyDescriptor) -> Self {
        self.insert(tag, name, d);
        self
    }

    /// Builder form of [`insert`](Self::insert) for a keyvalue.
    pub fn with_keyvalue(mut self, tag: &str, name: &str, d: KeyValueDescriptor) -> Self {
        self.insert(tag, name, d);
        self
    }

    /// Builder form of [`insert`](Self::insert) for an offset.
    pub fn with_offset(mut self, tag: &str, name: &str, d: OffsetDescriptor) -> Self {
        self.insert(tag, name, d);
        self
    }

    /// Builder form of [`insert`](Self::insert) for a function.
    pub fn with_function(mut self, tag: &str, name: &str, d: FunctionBinding) -> Self {
        self.insert(tag, name, d);
        self
    }

    /// Merges the per-capability tables of one catalog for `caps`.
    ///
    /// This always builds a fresh mapping; see [`composed`](Self::composed)
    /// for the cached view the engine uses.
    pub fn catalog_for(
        &self,
        kind: StoreKind,
        caps: &CapabilitySet,
    ) -> AHashMap<String, AttributeDescriptor> {
        self.catalog(kind).catalog_for(caps)
    }

    /// Returns the composed view for `caps`, building and caching it on first use.
    pub fn composed(&self, caps: &CapabilitySet) -> Result<Arc<ComposedCatalogs>, AttributeError> {
        if let Some(hit) = self
            .compositions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(caps)
        {
            return Ok(Arc::clone(hit));
        }

        let composed = Arc::new(ComposedCatalogs::compose(
            caps,
            [
                &self.properties,
                &self.keyvalues,
                &self.offsets,
                &self.functions,
            ],
        )?);

        self.compositions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(caps.clone(), Arc::clone(&composed));
        Ok(composed)
    }

    /// Checks the cross-catalog partition precondition for `caps`.
    pub fn validate(&self, caps: &CapabilitySet) -> Result<(), AttributeError> {
        self.composed(caps).map(|_| ())
    }

    /// Returns the number of cached compositions.
    pub fn cached_compositions(&self) -> usize {
        self.compositions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns the total number of declarations across all catalogs.
    pub fn len(&self) -> usize {
        StoreKind::ALL.iter().map(|&k| self.catalog(k).len()).sum()
    }

    /// Returns `true` if no catalog declares anything.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CatalogSet {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CatalogSet {
    /// Clones the catalogs; the composition cache starts empty.
    fn clone(&self) -> Self {
        Self {
            properties: self.properties.clone(),
            keyvalues: self.keyvalues.clone(),
            offsets: self.offsets.clone(),
            functions: self.functions.clone(),
            compositions: RwLock::new(HashMap::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entattr_core::AttributeType;

    fn sample() -> CatalogSet {
        CatalogSet::new()
            .with_property(
                "entity",
                "health",
                PropertyDescriptor::new("m_iHealth", AttributeType::Int),
            )
            .with_offset(
                "player",
                "armor",
                OffsetDescriptor {
                    offset: 0x20,
                    ty: AttributeType::Int,
                },
            )
    }

    #[test]
    fn test_insert_routes_by_descriptor_kind() {
        let set = sample();
        assert_eq!(set.catalog(StoreKind::Property).len(), 1);
        assert_eq!(set.catalog(StoreKind::Offset).len(), 1);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_composed_is_cached_per_capability_set() {
        let set = sample();
        let caps = CapabilitySet::new(["player"]);
        let a = set.composed(&caps).unwrap();
        let b = set.composed(&caps).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(set.cached_compositions(), 1);

        set.composed(&CapabilitySet::universal()).unwrap();
        assert_eq!(set.cached_compositions(), 2);
    }

    #[test]
    fn test_insert_clears_cache() {
        let mut set = sample();
        let caps = CapabilitySet::universal();
        assert!(set.composed(&caps).unwrap().offset("origin").is_none());

        set.insert(
            "entity",
            "origin",
            OffsetDescriptor {
                offset: 0x100,
                ty: AttributeType::Vector,
            },
        );
        assert_eq!(set.cached_compositions(), 0);
        assert!(set.composed(&caps).unwrap().offset("origin").is_some());
    }

    #[test]
    fn test_clone_starts_with_empty_cache() {
        let set = sample();
        set.validate(&CapabilitySet::universal()).unwrap();
        let copy = set.clone();
        assert_eq!(copy.cached_compositions(), 0);
        assert_eq!(copy.len(), set.len());
    }

    #[test]
    fn test_catalog_for_is_fresh() {
        let set = sample();
        let player = set.catalog_for(StoreKind::Offset, &CapabilitySet::new(["player"]));
        assert!(player.contains_key("armor"));
        let base = set.catalog_for(StoreKind::Offset, &CapabilitySet::universal());
        assert!(base.is_empty());
    }
}
