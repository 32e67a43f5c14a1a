//! Section descriptors and the ordered registry that groups them.
//!
//! A [`SectionRegistry`] is the per-article list of navigable blocks. Its
//! order drives both the navigation menu and the expected top-to-bottom order
//! of the rendered content. Registries are immutable once built and carry an
//! identity: clones share the same allocation, while rebuilding the list from
//! scratch produces a new identity even when the ids are equal.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier of a navigable section, unique within one article.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SectionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for SectionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for SectionId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SectionId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Presentation hints attached to a section.
///
/// Nothing in the sync engine reads these values; they exist so views can
/// pick an icon or accent without a side table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayMeta {
    /// Short glyph rendered next to the label (e.g. "✦", "¶").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Named accent role used when the section is highlighted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    /// Any other keys supplied by the content author, in file order.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// One navigable content block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionDescriptor {
    pub id: SectionId,
    pub label: String,
    #[serde(default, rename = "display")]
    pub display_meta: DisplayMeta,
}

impl SectionDescriptor {
    pub fn new(id: impl Into<SectionId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            display_meta: DisplayMeta::default(),
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.display_meta.icon = Some(icon.into());
        self
    }
}

/// Ordered, immutable list of section descriptors with identity semantics.
///
/// Cloning is cheap and preserves identity. Use [`SectionRegistry::same_identity`]
/// to find out whether two handles refer to the very same list.
#[derive(Debug, Clone)]
pub struct SectionRegistry {
    sections: Arc<[SectionDescriptor]>,
}

impl SectionRegistry {
    pub fn new(sections: Vec<SectionDescriptor>) -> Self {
        Self {
            sections: Arc::from(sections),
        }
    }

    /// Convenience constructor using each id as its own label.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sections = ids
            .into_iter()
            .map(|id| {
                let id = id.into();
                SectionDescriptor::new(id.clone(), id)
            })
            .collect();
        Self::new(sections)
    }

    pub fn sections(&self) -> &[SectionDescriptor] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn first(&self) -> Option<&SectionDescriptor> {
        self.sections.first()
    }

    pub fn get(&self, id: &str) -> Option<&SectionDescriptor> {
        self.sections.iter().find(|section| section.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|section| section.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SectionDescriptor> {
        self.sections.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &SectionId> {
        self.sections.iter().map(|section| &section.id)
    }

    /// Returns `true` when both handles point at the same underlying list.
    pub fn same_identity(&self, other: &SectionRegistry) -> bool {
        Arc::ptr_eq(&self.sections, &other.sections)
    }
}

impl<'a> IntoIterator for &'a SectionRegistry {
    type Item = &'a SectionDescriptor;
    type IntoIter = std::slice::Iter<'a, SectionDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

impl FromIterator<SectionDescriptor> for SectionRegistry {
    fn from_iter<T: IntoIterator<Item = SectionDescriptor>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
