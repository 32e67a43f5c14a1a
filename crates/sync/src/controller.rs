//! The scroll-sync controller.
//!
//! One controller tracks one article. It answers a single question, "which
//! section is active right now", from two inputs:
//!
//! - visibility batches reported by the host while the viewport moves, and
//! - explicit navigation requests from the menus.
//!
//! Navigation updates the active id immediately, before the host has moved
//! anything. Visibility events that arrive while the host animates towards
//! the destination are applied as they come, so the highlight may pass over
//! intermediate sections before it settles.

use std::fmt;

use lectern_types::{SectionId, SectionRegistry};
use tracing::{debug, trace};

use crate::event::VisibilityEvent;
use crate::host::{ElementResolver, ObserverConfig, ScrollBehavior, ViewportHost};
use crate::observed::ObservedElementSet;
use crate::policy::{ActivationPolicy, LastEntered, Observation};

/// What last changed the active section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivationSource {
    #[default]
    Initial,
    Visibility,
    Navigation,
}

/// The controller's only mutable state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollSyncState {
    active_id: Option<SectionId>,
    source: ActivationSource,
}

impl ScrollSyncState {
    pub fn active_id(&self) -> Option<&SectionId> {
        self.active_id.as_ref()
    }

    pub fn source(&self) -> ActivationSource {
        self.source
    }

    /// Returns `true` if the active id changed.
    fn set(&mut self, id: SectionId, source: ActivationSource) -> bool {
        let changed = self.active_id.as_ref() != Some(&id);
        self.active_id = Some(id);
        self.source = source;
        changed
    }
}

/// Outcome of [`ScrollSyncController::navigate_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The host was asked to scroll the section into view.
    Scrolling,
    /// The id has no observed element; only the highlight moved.
    Unresolved,
}

pub struct ScrollSyncController<H: ViewportHost> {
    host: H,
    config: ObserverConfig,
    scroll_behavior: ScrollBehavior,
    policy: Box<dyn ActivationPolicy>,
    state: ScrollSyncState,
    observed: Option<ObservedElementSet<H::Element>>,
}

impl<H: ViewportHost> fmt::Debug for ScrollSyncController<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollSyncController")
            .field("config", &self.config)
            .field("scroll_behavior", &self.scroll_behavior)
            .field("policy", &self.policy)
            .field("state", &self.state)
            .field("observed", &self.observed.as_ref().map(ObservedElementSet::len))
            .finish()
    }
}

impl<H: ViewportHost> ScrollSyncController<H> {
    pub fn new(host: H) -> Self {
        Self::with_config(host, ObserverConfig::default())
    }

    pub fn with_config(host: H, config: ObserverConfig) -> Self {
        Self {
            host,
            config,
            scroll_behavior: ScrollBehavior::Smooth,
            policy: Box::new(LastEntered),
            state: ScrollSyncState::default(),
            observed: None,
        }
    }

    pub fn with_policy(mut self, policy: Box<dyn ActivationPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_scroll_behavior(mut self, behavior: ScrollBehavior) -> Self {
        self.scroll_behavior = behavior;
        self
    }

    /// Begin observing the sections of `registry`.
    ///
    /// Starting again with the same registry handle is a no-op. Starting with
    /// a different registry tears the current observation down first, so no
    /// stale element keeps reporting into this controller.
    pub fn start<R>(&mut self, registry: &SectionRegistry, resolver: &R)
    where
        R: ElementResolver<H::Element> + ?Sized,
    {
        match self.registry().map(|current| current.same_identity(registry)) {
            Some(true) => {
                trace!("scroll sync already observing this registry");
                return;
            }
            Some(false) => {
                debug!("section registry changed; rebuilding observation");
                self.stop();
            }
            None => {}
        }

        let config = self.config.with_ratio_updates(self.policy.wants_ratio_updates());
        let mut observed = ObservedElementSet::new(registry.clone());
        for (order, section) in registry.iter().enumerate() {
            let Some(element) = resolver.resolve(&section.id) else {
                debug!(section = %section.id, "section has no element; it will never become active by scrolling");
                observed.mark_unresolved(section.id.clone());
                continue;
            };
            if observed.insert(section.id.clone(), order, element.clone()) {
                self.host.observe(&element, &config);
            } else {
                debug!(section = %section.id, "element already observed for an earlier section");
            }
        }

        self.policy.reset();
        self.state = ScrollSyncState::default();
        if let Some(first) = registry.first() {
            self.state.set(first.id.clone(), ActivationSource::Initial);
        }
        debug!(
            sections = registry.len(),
            observed = observed.len(),
            threshold = self.config.threshold(),
            "scroll sync started"
        );
        self.observed = Some(observed);
    }

    /// Release every observed element. Safe to call at any time.
    pub fn stop(&mut self) {
        let Some(observed) = self.observed.take() else {
            return;
        };
        let count = observed.len();
        for element in observed.into_elements() {
            self.host.unobserve(&element);
        }
        self.policy.reset();
        debug!(released = count, "scroll sync stopped");
    }

    /// Reconcile a batch of visibility events delivered by the host.
    ///
    /// Returns `true` if the active section changed.
    pub fn on_visibility_change(&mut self, events: &[VisibilityEvent<H::Element>]) -> bool {
        let Some(observed) = &self.observed else {
            return false;
        };

        let batch: Vec<Observation<'_>> = events
            .iter()
            .filter(|event| event.is_well_formed())
            .filter_map(|event| {
                observed.lookup(&event.target).map(|entry| Observation {
                    id: &entry.id,
                    order: entry.order,
                    is_entering: event.is_entering,
                    ratio: event.ratio,
                })
            })
            .collect();
        if batch.len() != events.len() {
            trace!(dropped = events.len() - batch.len(), "ignored malformed or stale visibility events");
        }
        if batch.is_empty() {
            return false;
        }

        let Some(winner) = self.policy.select(&batch) else {
            return false;
        };
        let changed = self.state.set(winner, ActivationSource::Visibility);
        if changed {
            trace!(active = ?self.state.active_id(), "active section changed by visibility");
        }
        changed
    }

    /// Make `id` active right away and ask the host to scroll to it.
    ///
    /// The id is not validated. When nothing is observed under that id the
    /// highlight still moves but no scroll is requested.
    pub fn navigate_to(&mut self, id: impl Into<SectionId>) -> Navigation {
        let id = id.into();
        let element = self
            .observed
            .as_ref()
            .and_then(|observed| observed.element_for(id.as_str()))
            .cloned();
        self.state.set(id.clone(), ActivationSource::Navigation);

        match element {
            Some(element) => {
                debug!(section = %id, "navigating to section");
                self.host.scroll_into_view(&element, self.scroll_behavior);
                Navigation::Scrolling
            }
            None => {
                debug!(section = %id, "navigation target has no element; highlight only");
                Navigation::Unresolved
            }
        }
    }

    pub fn active_id(&self) -> Option<&SectionId> {
        self.state.active_id()
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.state.active_id().is_some_and(|active| active == id)
    }

    pub fn state(&self) -> &ScrollSyncState {
        &self.state
    }

    pub fn is_started(&self) -> bool {
        self.observed.is_some()
    }

    pub fn observed(&self) -> Option<&ObservedElementSet<H::Element>> {
        self.observed.as_ref()
    }

    pub fn registry(&self) -> Option<&SectionRegistry> {
        self.observed.as_ref().map(ObservedElementSet::registry)
    }

    pub fn config(&self) -> &ObserverConfig {
        &self.config
    }

    pub fn policy(&self) -> &dyn ActivationPolicy {
        self.policy.as_ref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<H: ViewportHost> Drop for ScrollSyncController<H> {
    fn drop(&mut self) {
        self.stop();
    }
}
