//! The live binding between registry ids and observed host elements.

use std::collections::HashMap;
use std::hash::Hash;

use lectern_types::{SectionId, SectionRegistry};

#[derive(Debug, Clone)]
pub struct ObservedEntry<E> {
    pub id: SectionId,
    /// Position of the section in the registry.
    pub order: usize,
    pub element: E,
}

/// Elements a controller is currently observing, in registry order.
///
/// Built by one `start` and consumed by the matching `stop`; it is never
/// shared between controllers.
#[derive(Debug, Clone)]
pub struct ObservedElementSet<E> {
    registry: SectionRegistry,
    entries: Vec<ObservedEntry<E>>,
    by_element: HashMap<E, usize>,
    unresolved: Vec<SectionId>,
}

impl<E: Clone + Eq + Hash> ObservedElementSet<E> {
    pub(crate) fn new(registry: SectionRegistry) -> Self {
        let capacity = registry.len();
        Self {
            registry,
            entries: Vec::with_capacity(capacity),
            by_element: HashMap::with_capacity(capacity),
            unresolved: Vec::new(),
        }
    }

    /// Records a resolved element. Returns `false` if the element is
    /// already bound to an earlier section, in which case nothing is added.
    pub(crate) fn insert(&mut self, id: SectionId, order: usize, element: E) -> bool {
        if self.by_element.contains_key(&element) {
            return false;
        }
        self.by_element.insert(element.clone(), self.entries.len());
        self.entries.push(ObservedEntry { id, order, element });
        true
    }

    pub(crate) fn mark_unresolved(&mut self, id: SectionId) {
        self.unresolved.push(id);
    }

    pub(crate) fn into_elements(self) -> impl Iterator<Item = E> {
        self.entries.into_iter().map(|entry| entry.element)
    }

    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ObservedEntry<E>> {
        self.entries.iter()
    }

    /// Ids that had no element when the set was built.
    pub fn unresolved(&self) -> &[SectionId] {
        &self.unresolved
    }

    pub fn element_for(&self, id: &str) -> Option<&E> {
        self.entries.iter().find(|entry| entry.id == id).map(|entry| &entry.element)
    }

    pub fn lookup(&self, element: &E) -> Option<&ObservedEntry<E>> {
        self.by_element.get(element).and_then(|index| self.entries.get(*index))
    }
}
