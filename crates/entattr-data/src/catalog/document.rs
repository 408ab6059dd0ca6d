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

//! RON catalog documents.
//!
//! A document lists, per catalog kind, one table per capability tag:
//!
//! ```ron
//! (
//!     properties: {
//!         "entity": {
//!             "health": (prop: "m_iHealth", type: int),
//!             "alive": (prop: "m_lifeState", type: int,
//!                       translation: Some({"True": Int(0), "False": Int(2)})),
//!         },
//!     },
//!     keyvalues: { "entity": { "targetname": (type: string_pointer) } },
//!     offsets: { "player": { "armor": (offset: 0x1F4, type: int) } },
//!     functions: {
//!         "entity": {
//!             "teleport": (symbol: "CBaseEntity::Teleport",
//!                          params: [pointer, vector], receiver_index: Some(0)),
//!         },
//!     },
//! )
//! ```
//!
//! Every section is optional.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use entattr_core::{FunctionBinding, KeyValueDescriptor, OffsetDescriptor, PropertyDescriptor};

use super::set::CatalogSet;

type Tables<D> = BTreeMap<String, BTreeMap<String, D>>;

/// The serialized form of a [`CatalogSet`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Property tables keyed by capability tag.
    #[serde(default)]
    pub properties: Tables<PropertyDescriptor>,
    /// Keyvalue tables keyed by capability tag.
    #[serde(default)]
    pub keyvalues: Tables<KeyValueDescriptor>,
    /// Offset tables keyed by capability tag.
    #[serde(default)]
    pub offsets: Tables<OffsetDescriptor>,
    /// Function tables keyed by capability tag.
    #[serde(default)]
    pub functions: Tables<FunctionBinding>,
}

impl CatalogDocument {
    /// Parses a document from RON text.
    pub fn from_ron_str(source: &str) -> Result<Self> {
        ron::from_str(source).context("Failed to parse catalog document")
    }

    /// Serializes the document to pretty RON text.
    pub fn to_ron_string(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("Failed to serialize catalog document")
    }

    /// Adds every declaration of the document to `set`.
    pub fn apply_to(&self, set: &mut CatalogSet) {
        for (tag, table) in &self.properties {
            for (name, d) in table {
                set.insert(tag, name, d.clone());
            }
        }
        for (tag, table) in &self.keyvalues {
            for (name, d) in table {
                set.insert(tag, name, *d);
            }
        }
        for (tag, table) in &self.offsets {
            for (name, d) in table {
                set.insert(tag, name, *d);
            }
        }
        for (tag, table) in &self.functions {
            for (name, d) in table {
                set.insert(tag, name, d.clone());
            }
        }
    }
}

impl CatalogSet {
    /// Builds a catalog set from one RON document.
    pub fn from_ron_str(source: &str) -> Result<Self> {
        let document = CatalogDocument::from_ron_str(source)?;
        let mut set = CatalogSet::new();
        document.apply_to(&mut set);
        log::debug!("Catalog document parsed: {} declarations", set.len());
        Ok(set)
    }

    /// Merges additional RON documents into this set, later declarations winning per tag.
    pub fn extend_from_ron_str(&mut self, source: &str) -> Result<()> {
        let document = CatalogDocument::from_ron_str(source)?;
        document.apply_to(self);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entattr_core::{AttributeType, CapabilitySet, StoreKind, Value};

    const SAMPLE: &str = r#"(
        properties: {
            "entity": {
                "health": (prop: "m_iHealth", type: int),
                "alive": (prop: "m_lifeState", type: int,
                          translation: Some({"True": Int(0), "False": Int(2)})),
            },
        },
        keyvalues: { "entity": { "targetname": (type: string_pointer) } },
        offsets: { "player": { "armor": (offset: 0x1F4, type: int) } },
        functions: {
            "entity": {
                "teleport": (symbol: "CBaseEntity::Teleport",
                             params: [pointer, vector], receiver_index: Some(0)),
            },
        },
    )"#;

    #[test]
    fn test_parse_sample_document() {
        let set = CatalogSet::from_ron_str(SAMPLE).unwrap();
        assert_eq!(set.catalog(StoreKind::Property).len(), 2);
        assert_eq!(set.catalog(StoreKind::KeyValue).len(), 1);
        assert_eq!(set.catalog(StoreKind::Offset).len(), 1);
        assert_eq!(set.catalog(StoreKind::Function).len(), 1);

        let composed = set.composed(&CapabilitySet::new(["player"])).unwrap();
        assert_eq!(composed.offset("armor").unwrap().offset, 0x1F4);
        let alive = composed.property("alive").unwrap();
        assert_eq!(
            alive.translation.as_ref().unwrap().true_raw(),
            Some(&Value::Int(0))
        );
        let teleport = composed.function("teleport").unwrap();
        assert_eq!(teleport.receiver_index, Some(0));
        assert_eq!(teleport.params, vec![AttributeType::Pointer, AttributeType::Vector]);
    }

    #[test]
    fn test_unknown_type_tag_is_rejected() {
        let err = CatalogSet::from_ron_str(
            r#"(properties: { "entity": { "spin": (prop: "m_q", type: quaternion) } })"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("catalog document"));
    }

    #[test]
    fn test_document_round_trip_through_text() {
        let document = CatalogDocument::from_ron_str(SAMPLE).unwrap();
        let text = document.to_ron_string().unwrap();
        assert_eq!(CatalogDocument::from_ron_str(&text).unwrap(), document);
    }

    #[test]
    fn test_extend_merges_documents() {
        let mut set = CatalogSet::from_ron_str(SAMPLE).unwrap();
        set.extend_from_ron_str(r#"(keyvalues: { "weapon": { "ammo": (type: int) } })"#)
            .unwrap();
        assert_eq!(set.catalog(StoreKind::KeyValue).len(), 2);
    }
}
