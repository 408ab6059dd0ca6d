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
use std::collections::BTreeMap;

use entattr_core::{AttributeDescriptor, CapabilitySet, StoreKind};

/// The descriptors of one store kind, indexed by capability tag.
#[derive(Debug, Clone)]
pub struct Catalog {
    kind: StoreKind,
    /// One name→descriptor table per capability tag. A `BTreeMap` keeps the
    /// tags sorted so composition visits them in the same order as
    /// [`CapabilitySet::iter`].
    tables: BTreeMap<String, AHashMap<String, AttributeDescriptor>>,
}

impl Catalog {
    /// Creates an empty catalog for `kind`.
    pub fn new(kind: StoreKind) -> Self {
        Self {
            kind,
            tables: BTreeMap::new(),
        }
    }

    /// The store kind of every descriptor in this catalog.
    pub fn kind(&self) -> StoreKind {
        self.kind
    }

    /// Declares `name` for `tag`, replacing any previous declaration under the same tag.
    ///
    /// Descriptors of another store kind are rejected and returned unchanged.
    pub(crate) fn insert(
        &mut self,
        tag: &str,
        name: &str,
        descriptor: AttributeDescriptor,
    ) -> Result<(), AttributeDescriptor> {
        if descriptor.store() != self.kind {
            return Err(descriptor);
        }
        self.tables
            .entry(tag.to_owned())
            .or_default()
            .insert(name.to_owned(), descriptor);
        Ok(())
    }

    /// Returns the table declared for a single capability tag.
    pub fn table(&self, tag: &str) -> Option<&AHashMap<String, AttributeDescriptor>> {
        self.tables.get(tag)
    }

    /// Iterates the capability tags that declare at least one attribute.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Returns the total number of declarations across all tags.
    pub fn len(&self) -> usize {
        self.tables.values().map(|table| table.len()).sum()
    }

    /// Returns `true` if nothing is declared.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Merges the tables of every tag in `caps` into one flat mapping.
    ///
    /// Two tags declaring the same name is a precondition violation of the
    /// metadata source. It is logged, and the declaration of the tag that
    /// sorts first is kept.
    pub fn catalog_for(&self, caps: &CapabilitySet) -> AHashMap<String, AttributeDescriptor> {
        let mut merged: AHashMap<String, AttributeDescriptor> = AHashMap::new();
        let mut owners: AHashMap<&str, &str> = AHashMap::new();

        for tag in caps.iter() {
            let Some(table) = self.tables.get(tag) else {
                continue;
            };
            for (name, descriptor) in table {
                if let Some(owner) = owners.get(name.as_str()) {
                    log::warn!(
                        "{} catalog: '{}' declared by both '{}' and '{}'; keeping '{}'",
                        self.kind,
                        name,
                        owner,
                        tag,
                        owner
                    );
                    continue;
                }
                owners.insert(name.as_str(), tag);
                merged.insert(name.clone(), descriptor.clone());
            }
        }

        merged
    }
}
