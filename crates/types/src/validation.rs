//! Advisory checks for section registries.
//!
//! Nothing here rejects a registry. The sync engine tolerates duplicate or
//! empty ids (they simply never highlight correctly), so callers decide what
//! to do with the reported issues: the TUI logs them, `lectern check` fails.

use std::collections::HashMap;
use std::fmt;

use crate::section::{SectionId, SectionRegistry};

/// A single problem found in a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryIssue {
    /// The id is empty or whitespace only.
    EmptyId { index: usize },
    /// The id appears more than once; `first` is the earliest position.
    DuplicateId { id: SectionId, first: usize, duplicate: usize },
    /// The label is empty, so menus render a blank row.
    EmptyLabel { id: SectionId },
}

impl fmt::Display for RegistryIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryIssue::EmptyId { index } => write!(f, "section #{} has an empty id", index + 1),
            RegistryIssue::DuplicateId { id, first, duplicate } => {
                write!(f, "section id '{}' at #{} repeats #{}", id, duplicate + 1, first + 1)
            }
            RegistryIssue::EmptyLabel { id } => write!(f, "section '{}' has an empty label", id),
        }
    }
}

/// Collect every issue in registry order.
pub fn validate_registry(registry: &SectionRegistry) -> Vec<RegistryIssue> {
    let mut issues = Vec::new();
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(registry.len());

    for (index, section) in registry.iter().enumerate() {
        if section.id.is_empty() {
            issues.push(RegistryIssue::EmptyId { index });
            continue;
        }
        if let Some(first) = seen.get(section.id.as_str()) {
            issues.push(RegistryIssue::DuplicateId {
                id: section.id.clone(),
                first: *first,
                duplicate: index,
            });
        } else {
            seen.insert(section.id.as_str(), index);
        }
        if section.label.trim().is_empty() {
            issues.push(RegistryIssue::EmptyLabel { id: section.id.clone() });
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::SectionDescriptor;

    #[test]
    fn clean_registry_has_no_issues() {
        let registry = SectionRegistry::from_ids(["intro", "science", "reflection"]);
        assert!(validate_registry(&registry).is_empty());
    }

    #[test]
    fn reports_duplicates_and_empty_ids() {
        let registry = SectionRegistry::new(vec![
            SectionDescriptor::new("intro", "Intro"),
            SectionDescriptor::new("  ", "Blank"),
            SectionDescriptor::new("intro", "Intro again"),
            SectionDescriptor::new("outro", ""),
        ]);
        let issues = validate_registry(&registry);
        assert_eq!(
            issues,
            vec![
                RegistryIssue::EmptyId { index: 1 },
                RegistryIssue::DuplicateId {
                    id: SectionId::from("intro"),
                    first: 0,
                    duplicate: 2
                },
                RegistryIssue::EmptyLabel { id: SectionId::from("outro") },
            ]
        );
        assert_eq!(issues[1].to_string(), "section id 'intro' at #3 repeats #1");
    }
}
