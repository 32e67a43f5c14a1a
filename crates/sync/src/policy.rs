//! Rules for turning a visibility batch into an active section.
//!
//! Policies never deactivate a section on their own. If a batch does not
//! name a winner the controller keeps the current active id.

use std::collections::HashMap;
use std::fmt::Debug;
use std::str::FromStr;

use lectern_types::SectionId;
use thiserror::Error;

/// A well-formed event after the controller mapped it back to its section.
#[derive(Debug, Clone, Copy)]
pub struct Observation<'a> {
    pub id: &'a SectionId,
    /// Registry position of the section.
    pub order: usize,
    pub is_entering: bool,
    pub ratio: f32,
}

pub trait ActivationPolicy: Debug + Send {
    /// Pick the section that should become active for this batch, if any.
    ///
    /// `batch` preserves delivery order.
    fn select(&mut self, batch: &[Observation<'_>]) -> Option<SectionId>;

    /// Forget anything remembered from previous batches.
    fn reset(&mut self) {}

    /// Whether the policy needs fresh ratios for sections that stay entered.
    /// Crossing-only hosts are enough when this is `false`.
    fn wants_ratio_updates(&self) -> bool {
        false
    }
}

/// Every entering section becomes active in turn; the last one wins.
#[derive(Debug, Default, Clone, Copy)]
pub struct LastEntered;

impl ActivationPolicy for LastEntered {
    fn select(&mut self, batch: &[Observation<'_>]) -> Option<SectionId> {
        batch
            .iter()
            .rev()
            .find(|observation| observation.is_entering)
            .map(|observation| observation.id.clone())
    }
}

/// The section with the largest visible ratio among those past the
/// threshold wins; ties go to the section that comes first.
///
/// Asks hosts for ratio updates, so entered sections report their current
/// ratio whenever it changes. Ratios are remembered across batches because a
/// batch only names the sections that changed. When the winner drops below
/// the threshold the best remaining section takes over; with no remaining
/// candidate the batch names no winner.
#[derive(Debug, Default, Clone)]
pub struct MostVisible {
    latest: HashMap<SectionId, (usize, f32, bool)>,
}

impl ActivationPolicy for MostVisible {
    fn select(&mut self, batch: &[Observation<'_>]) -> Option<SectionId> {
        for observation in batch {
            self.latest.insert(
                observation.id.clone(),
                (observation.order, observation.ratio, observation.is_entering),
            );
        }

        self.latest
            .iter()
            .filter(|(_, (_, _, entering))| *entering)
            .max_by(|(_, (left_order, left_ratio, _)), (_, (right_order, right_ratio, _))| {
                left_ratio
                    .total_cmp(right_ratio)
                    .then_with(|| right_order.cmp(left_order))
            })
            .map(|(id, _)| id.clone())
    }

    fn reset(&mut self) {
        self.latest.clear();
    }

    fn wants_ratio_updates(&self) -> bool {
        true
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown activation policy '{0}' (expected 'last-entered' or 'most-visible')")]
pub struct UnknownPolicy(pub String);

/// Named policies selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolicyKind {
    #[default]
    LastEntered,
    MostVisible,
}

impl PolicyKind {
    pub fn build(self) -> Box<dyn ActivationPolicy> {
        match self {
            PolicyKind::LastEntered => Box::new(LastEntered),
            PolicyKind::MostVisible => Box::new(MostVisible::default()),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PolicyKind::LastEntered => "last-entered",
            PolicyKind::MostVisible => "most-visible",
        }
    }
}

impl FromStr for PolicyKind {
    type Err = UnknownPolicy;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "last-entered" | "last" => Ok(PolicyKind::LastEntered),
            "most-visible" | "visible" => Ok(PolicyKind::MostVisible),
            other => Err(UnknownPolicy(other.to_string())),
        }
    }
}
