//! Seams between the controller and whatever renders the sections.
//!
//! The controller never looks anything up globally. Elements come from an
//! explicit [`ElementResolver`] handed to `start`, and all geometry work
//! (observing visibility, scrolling) is delegated to a [`ViewportHost`].

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use lectern_types::SectionId;
use thiserror::Error;

/// Visibility fraction a section needs before it can become active.
pub const DEFAULT_THRESHOLD: f32 = 0.3;

/// Raised when a threshold is outside `0.0..=1.0` or not a number.
#[derive(Debug, Error, PartialEq)]
#[error("visibility threshold must be between 0.0 and 1.0, got {0}")]
pub struct InvalidThreshold(pub f32);

/// Options shared by every observed element.
///
/// The observer root is always the whole viewport. One threshold applies to
/// every section so that tall and short sections are judged alike.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverConfig {
    root_margin: i32,
    threshold: f32,
    report_ratio_changes: bool,
}

impl ObserverConfig {
    pub fn new(threshold: f32) -> Result<Self, InvalidThreshold> {
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(InvalidThreshold(threshold));
        }
        Ok(Self {
            threshold,
            ..Self::default()
        })
    }

    /// Ask the host to also report ratio changes of sections that stay
    /// entered, not just threshold crossings.
    pub fn with_ratio_updates(mut self, enabled: bool) -> Self {
        self.report_ratio_changes = enabled;
        self
    }

    pub fn reports_ratio_changes(&self) -> bool {
        self.report_ratio_changes
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Margin (in host units) added around the viewport. Always zero today.
    pub fn root_margin(&self) -> i32 {
        self.root_margin
    }

    /// Returns `true` when `ratio` is far enough inside the viewport to count.
    pub fn is_past_threshold(&self, ratio: f32) -> bool {
        if self.threshold == 0.0 {
            return ratio > 0.0;
        }
        ratio >= self.threshold
    }
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            root_margin: 0,
            threshold: DEFAULT_THRESHOLD,
            report_ratio_changes: false,
        }
    }
}

/// How a navigation request should move the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Instant,
}

/// The rendering side of the controller: visibility observation and scrolling.
pub trait ViewportHost {
    /// Handle to a rendered section.
    type Element: Clone + Eq + Hash + Debug;

    /// Start reporting threshold crossings for `element`.
    fn observe(&mut self, element: &Self::Element, config: &ObserverConfig);

    /// Stop reporting anything for `element`.
    fn unobserve(&mut self, element: &Self::Element);

    /// Bring the top of `element` to the top of the viewport.
    ///
    /// Any fixed-header allowance is the host's business.
    fn scroll_into_view(&mut self, element: &Self::Element, behavior: ScrollBehavior);
}

/// Maps section ids to rendered elements.
pub trait ElementResolver<E> {
    fn resolve(&self, id: &SectionId) -> Option<E>;
}

impl<E, F> ElementResolver<E> for F
where
    F: Fn(&SectionId) -> Option<E>,
{
    fn resolve(&self, id: &SectionId) -> Option<E> {
        self(id)
    }
}

/// Explicit id → element table built by the host after layout.
#[derive(Debug, Clone)]
pub struct BindingTable<E> {
    bindings: HashMap<SectionId, E>,
}

impl<E> Default for BindingTable<E> {
    fn default() -> Self {
        Self { bindings: HashMap::new() }
    }
}

impl<E: Clone> BindingTable<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, id: impl Into<SectionId>, element: E) -> &mut Self {
        self.bindings.insert(id.into(), element);
        self
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<E: Clone> ElementResolver<E> for BindingTable<E> {
    fn resolve(&self, id: &SectionId) -> Option<E> {
        self.bindings.get(id).cloned()
    }
}

impl<E: Clone, I: Into<SectionId>> FromIterator<(I, E)> for BindingTable<E> {
    fn from_iter<T: IntoIterator<Item = (I, E)>>(iter: T) -> Self {
        Self {
            bindings: iter.into_iter().map(|(id, element)| (id.into(), element)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_must_be_a_fraction() {
        assert!(ObserverConfig::new(0.5).is_ok());
        assert_eq!(ObserverConfig::new(1.5), Err(InvalidThreshold(1.5)));
        assert!(ObserverConfig::new(f32::NAN).is_err());
    }

    #[test]
    fn zero_threshold_means_any_visible_row() {
        let config = ObserverConfig::new(0.0).expect("valid");
        assert!(!config.is_past_threshold(0.0));
        assert!(config.is_past_threshold(0.01));
        assert!(ObserverConfig::default().is_past_threshold(0.3));
        assert!(!ObserverConfig::default().is_past_threshold(0.29));
    }

    #[test]
    fn binding_table_and_closures_resolve() {
        let table: BindingTable<u16> = [("intro", 1u16), ("science", 2)].into_iter().collect();
        assert_eq!(table.resolve(&SectionId::from("science")), Some(2));
        assert_eq!(table.resolve(&SectionId::from("quran")), None);

        let by_length = |id: &SectionId| Some(id.as_str().len());
        assert_eq!(by_length.resolve(&SectionId::from("intro")), Some(5));
    }
}
