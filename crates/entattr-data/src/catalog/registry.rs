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

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use super::set::CatalogSet;

/// Process-wide owner of the current catalog snapshot.
///
/// The registry is read-mostly: every attribute access takes a
/// [`snapshot`](Self::snapshot), while loaders publish a new [`CatalogSet`]
/// with [`load`](Self::load), [`refresh`](Self::refresh) or
/// [`update`](Self::update). Readers holding an
/// older snapshot keep a consistent view until they drop it.
///
/// # Example
///
/// ```rust
/// use entattr_core::{AttributeType, PropertyDescriptor};
/// use entattr_data::{CatalogRegistry, CatalogSet};
///
/// let registry = CatalogRegistry::new();
/// registry.load(CatalogSet::new().with_property(
///     "entity",
///     "health",
///     PropertyDescriptor::new("m_iHealth", AttributeType::Int),
/// ));
///
/// assert_eq!(registry.snapshot().len(), 1);
/// assert_eq!(registry.generation(), 1);
/// ```
#[derive(Debug, Default)]
pub struct CatalogRegistry {
    current: RwLock<Arc<CatalogSet>>,
    generation: AtomicU64,
}

impl CatalogRegistry {
    /// Creates a registry holding an empty catalog set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry that starts with `set` as its snapshot.
    #[must_use]
    pub fn with_catalogs(set: CatalogSet) -> Self {
        Self {
            current: RwLock::new(Arc::new(set)),
            generation: AtomicU64::new(0),
        }
    }

    /// Returns the current snapshot.
    pub fn snapshot(&self) -> Arc<CatalogSet> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Installs `set` as the current snapshot.
    pub fn load(&self, set: CatalogSet) {
        self.publish(set, "loaded");
    }

    /// Atomically replaces the current snapshot with a rebuilt `set`.
    ///
    /// Handles created before the refresh see the new catalogs on their next
    /// access; compositions cached by the old snapshot are never consulted again.
    pub fn refresh(&self, set: CatalogSet) {
        self.publish(set, "refreshed");
    }

    /// Publishes a modified copy of the current snapshot.
    ///
    /// The closure edits a clone with no lock held, so it may read the
    /// registry. If another publish lands while it runs, the edit is replayed
    /// on the newer snapshot; the closure can therefore run more than once.
    pub fn update<F>(&self, mut edit: F)
    where
        F: FnMut(&mut CatalogSet),
    {
        loop {
            let base = self.snapshot();
            let mut next = CatalogSet::clone(&base);
            edit(&mut next);

            let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
            if Arc::ptr_eq(&guard, &base) {
                let declarations = next.len();
                *guard = Arc::new(next);
                drop(guard);
                self.bump(declarations, "refreshed");
                return;
            }
            drop(guard);
            log::debug!("Catalog snapshot replaced during update; replaying the edit");
        }
    }

    fn publish(&self, set: CatalogSet, action: &str) {
        let declarations = set.len();
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(set);
        self.bump(declarations, action);
    }

    fn bump(&self, declarations: usize, action: &str) {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        log::info!("Catalogs {action}: {declarations} declarations (generation {generation})");
    }

    /// Returns how many times the snapshot has been replaced.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entattr_core::{AttributeType, CapabilitySet, KeyValueDescriptor, StoreKind};

    #[test]
    fn test_snapshot_survives_refresh() {
        let registry = CatalogRegistry::new();
        let before = registry.snapshot();
        assert!(before.is_empty());

        registry.update(|set| {
            set.insert(
                "entity",
                "targetname",
                KeyValueDescriptor {
                    ty: AttributeType::StringPointer,
                },
            )
        });

        assert!(before.is_empty(), "old snapshot must not change");
        let after = registry.snapshot();
        assert_eq!(after.catalog(StoreKind::KeyValue).len(), 1);
        assert_eq!(registry.generation(), 1);
    }

    #[test]
    fn test_refresh_invalidates_compositions() {
        let registry = CatalogRegistry::new();
        let caps = CapabilitySet::universal();
        let old = registry.snapshot().composed(&caps).unwrap();
        assert!(old.keyvalue("targetname").is_none());

        registry.update(|set| {
            set.insert(
                "entity",
                "targetname",
                KeyValueDescriptor {
                    ty: AttributeType::StringPointer,
                },
            )
        });

        let fresh = registry.snapshot().composed(&caps).unwrap();
        assert!(fresh.keyvalue("targetname").is_some());
    }

    #[test]
    fn test_update_closure_may_read_the_registry() {
        let registry = CatalogRegistry::new();
        let mut seen = Vec::new();

        registry.update(|set| {
            seen.push((registry.snapshot().len(), registry.generation()));
            set.insert(
                "entity",
                "targetname",
                KeyValueDescriptor {
                    ty: AttributeType::StringPointer,
                },
            );
        });

        assert_eq!(seen, vec![(0, 0)]);
        assert_eq!(registry.snapshot().len(), 1);
        assert_eq!(registry.generation(), 1);
    }

    #[test]
    fn test_update_replays_on_a_concurrent_publish() {
        let registry = CatalogRegistry::new();
        let mut runs = 0;

        registry.update(|set| {
            runs += 1;
            if runs == 1 {
                registry.load(CatalogSet::new().with_keyvalue(
                    "entity",
                    "model",
                    KeyValueDescriptor {
                        ty: AttributeType::StringPointer,
                    },
                ));
            }
            set.insert(
                "entity",
                "targetname",
                KeyValueDescriptor {
                    ty: AttributeType::StringPointer,
                },
            );
        });

        assert_eq!(runs, 2);
        let composed = registry.snapshot().composed(&CapabilitySet::universal()).unwrap();
        assert!(composed.keyvalue("model").is_some());
        assert!(composed.keyvalue("targetname").is_some());
        assert_eq!(registry.generation(), 2);
    }

    #[test]
    fn test_load_and_refresh_count_generations() {
        let registry = CatalogRegistry::with_catalogs(CatalogSet::new());
        registry.load(CatalogSet::new());
        registry.refresh(CatalogSet::new().with_keyvalue(
            "entity",
            "targetname",
            KeyValueDescriptor {
                ty: AttributeType::StringPointer,
            },
        ));
        assert_eq!(registry.generation(), 2);
        assert_eq!(registry.snapshot().len(), 1);
    }
}
