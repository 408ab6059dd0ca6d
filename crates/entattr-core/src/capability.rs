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

//! The set of capability tags that selects which catalogs apply to an entity.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// An immutable, deduplicated set of capability tags.
///
/// Every set contains [`CapabilitySet::UNIVERSAL`], so it is never empty.
/// Tags are kept in sorted order, which makes the set hashable and gives
/// catalog composition a deterministic iteration order.
///
/// # Example
///
/// ```rust
/// use entattr_core::CapabilitySet;
///
/// let caps = CapabilitySet::new(["player", "player"]);
/// assert!(caps.contains("player"));
/// assert!(caps.contains(CapabilitySet::UNIVERSAL));
/// assert_eq!(caps.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct CapabilitySet {
    tags: BTreeSet<String>,
}

impl CapabilitySet {
    /// The tag implicitly present in every capability set.
    pub const UNIVERSAL: &'static str = "entity";

    /// Builds a capability set from caller-supplied tags plus the universal tag.
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tags: BTreeSet<String> = tags.into_iter().map(Into::into).collect();
        tags.insert(Self::UNIVERSAL.to_owned());
        Self { tags }
    }

    /// Returns the set that only holds the universal tag.
    pub fn universal() -> Self {
        Self::new(std::iter::empty::<String>())
    }

    /// Returns `true` if `tag` is a member of the set.
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Iterates the tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Returns the number of tags, including the universal one.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl Default for CapabilitySet {
    fn default() -> Self {
        Self::universal()
    }
}

impl From<Vec<String>> for CapabilitySet {
    fn from(tags: Vec<String>) -> Self {
        Self::new(tags)
    }
}

impl From<CapabilitySet> for Vec<String> {
    fn from(caps: CapabilitySet) -> Self {
        caps.tags.into_iter().collect()
    }
}

impl fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.iter().collect();
        write!(f, "{}", joined.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_universal_tag_always_present() {
        let caps = CapabilitySet::new(Vec::<String>::new());
        assert_eq!(caps.len(), 1);
        assert!(caps.contains("entity"));
        assert!(!caps.is_empty());
    }

    #[test]
    fn test_set_semantics() {
        let a = CapabilitySet::new(["weapon", "player", "weapon"]);
        let b = CapabilitySet::new(["player", "entity", "weapon"]);
        assert_eq!(a, b);
        assert_eq!(a.iter().collect::<Vec<_>>(), vec!["entity", "player", "weapon"]);
    }

    #[test]
    fn test_display_is_sorted() {
        let caps = CapabilitySet::new(["player"]);
        assert_eq!(caps.to_string(), "entity,player");
    }

    #[test]
    fn test_deserialize_adds_universal() {
        let caps: CapabilitySet = ron::from_str(r#"["weapon"]"#).unwrap();
        assert!(caps.contains("weapon"));
        assert!(caps.contains("entity"));
    }
}
