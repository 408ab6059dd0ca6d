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

use ahash::AHashMap;

use entattr_core::{
    AttributeDescriptor, AttributeError, CapabilitySet, FunctionBinding, KeyValueDescriptor,
    OffsetDescriptor, PropertyDescriptor, StoreKind,
};

use super::table::Catalog;

/// The four catalogs flattened for one capability set.
///
/// Built once per capability set per snapshot and shared behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct ComposedCatalogs {
    capabilities: CapabilitySet,
    properties: AHashMap<String, PropertyDescriptor>,
    keyvalues: AHashMap<String, KeyValueDescriptor>,
    offsets: AHashMap<String, OffsetDescriptor>,
    functions: AHashMap<String, FunctionBinding>,
}

impl ComposedCatalogs {
    /// Composes the given catalogs for `caps`.
    ///
    /// A name declared by more than one catalog is a precondition violation.
    /// Debug builds fail with [`AttributeError::CatalogCollision`]; release
    /// builds log it and let the earlier layer in resolution order win.
    pub(crate) fn compose(
        caps: &CapabilitySet,
        catalogs: [&Catalog; 4],
    ) -> Result<Self, AttributeError> {
        let [properties, keyvalues, offsets, functions] = catalogs;

        let composed = Self {
            capabilities: caps.clone(),
            properties: properties
                .catalog_for(caps)
                .into_iter()
                .filter_map(|(name, d)| match d {
                    AttributeDescriptor::Property(p) => Some((name, p)),
                    _ => None,
                })
                .collect(),
            keyvalues: keyvalues
                .catalog_for(caps)
                .into_iter()
                .filter_map(|(name, d)| match d {
                    AttributeDescriptor::KeyValue(k) => Some((name, k)),
                    _ => None,
                })
                .collect(),
            offsets: offsets
                .catalog_for(caps)
                .into_iter()
                .filter_map(|(name, d)| match d {
                    AttributeDescriptor::Offset(o) => Some((name, o)),
                    _ => None,
                })
                .collect(),
            functions: functions
                .catalog_for(caps)
                .into_iter()
                .filter_map(|(name, d)| match d {
                    AttributeDescriptor::Function(f) => Some((name, f)),
                    _ => None,
                })
                .collect(),
        };

        if let Some(err) = composed.first_collision() {
            if cfg!(debug_assertions) {
                return Err(err);
            }
            log::warn!("{err}; the earlier layer wins for capabilities [{caps}]");
        }

        log::debug!(
            "Composed catalogs for [{}]: {} properties, {} keyvalues, {} offsets, {} functions",
            caps,
            composed.properties.len(),
            composed.keyvalues.len(),
            composed.offsets.len(),
            composed.functions.len()
        );

        Ok(composed)
    }

    /// The capability set this view was composed for.
    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    /// Looks up a property descriptor.
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.get(name)
    }

    /// Looks up a keyvalue descriptor.
    pub fn keyvalue(&self, name: &str) -> Option<&KeyValueDescriptor> {
        self.keyvalues.get(name)
    }

    /// Looks up an offset descriptor.
    pub fn offset(&self, name: &str) -> Option<&OffsetDescriptor> {
        self.offsets.get(name)
    }

    /// Looks up a function binding.
    pub fn function(&self, name: &str) -> Option<&FunctionBinding> {
        self.functions.get(name)
    }

    /// Returns `true` if the catalog of `kind` declares `name`.
    pub fn contains(&self, kind: StoreKind, name: &str) -> bool {
        match kind {
            StoreKind::Property => self.properties.contains_key(name),
            StoreKind::KeyValue => self.keyvalues.contains_key(name),
            StoreKind::Offset => self.offsets.contains_key(name),
            StoreKind::Function => self.functions.contains_key(name),
        }
    }

    /// Returns the declared names of one catalog, sorted.
    pub fn names(&self, kind: StoreKind) -> Vec<&str> {
        let mut names: Vec<&str> = match kind {
            StoreKind::Property => self.properties.keys().map(String::as_str).collect(),
            StoreKind::KeyValue => self.keyvalues.keys().map(String::as_str).collect(),
            StoreKind::Offset => self.offsets.keys().map(String::as_str).collect(),
            StoreKind::Function => self.functions.keys().map(String::as_str).collect(),
        };
        names.sort_unstable();
        names
    }

    /// Finds the first name declared by two catalogs, in resolution order.
    fn first_collision(&self) -> Option<AttributeError> {
        for (i, &first) in StoreKind::ALL.iter().enumerate() {
            for &second in &StoreKind::ALL[i + 1..] {
                if let Some(name) = self
                    .names(second)
                    .into_iter()
                    .find(|name| self.contains(first, name))
                {
                    return Some(AttributeError::CatalogCollision {
                        name: name.to_owned(),
                        first,
                        second,
                    });
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entattr_core::AttributeType;

    fn catalogs() -> [Catalog; 4] {
        StoreKind::ALL.map(Catalog::new)
    }

    #[test]
    fn test_compose_splits_by_kind() {
        let mut c = catalogs();
        c[0].insert(
            "entity",
            "health",
            PropertyDescriptor::new("m_iHealth", AttributeType::Int).into(),
        )
        .unwrap();
        c[1].insert(
            "entity",
            "targetname",
            KeyValueDescriptor {
                ty: AttributeType::StringPointer,
            }
            .into(),
        )
        .unwrap();

        let [p, k, o, f] = &c;
        let composed =
            ComposedCatalogs::compose(&CapabilitySet::universal(), [p, k, o, f]).unwrap();
        assert!(composed.property("health").is_some());
        assert!(composed.keyvalue("targetname").is_some());
        assert!(composed.offset("health").is_none());
        assert!(composed.contains(StoreKind::KeyValue, "targetname"));
    }

    #[test]
    fn test_cross_catalog_collision_fails_in_debug() {
        let mut c = catalogs();
        c[0].insert(
            "entity",
            "speed",
            PropertyDescriptor::new("m_flSpeed", AttributeType::Float).into(),
        )
        .unwrap();
        c[2].insert(
            "entity",
            "speed",
            OffsetDescriptor {
                offset: 0x40,
                ty: AttributeType::Float,
            }
            .into(),
        )
        .unwrap();

        let [p, k, o, f] = &c;
        let result = ComposedCatalogs::compose(&CapabilitySet::universal(), [p, k, o, f]);
        if cfg!(debug_assertions) {
            assert_eq!(
                result.unwrap_err(),
                AttributeError::CatalogCollision {
                    name: "speed".into(),
                    first: StoreKind::Property,
                    second: StoreKind::Offset,
                }
            );
        } else {
            assert!(result.is_ok());
        }
    }
}
