//! # Lectern scroll sync
//!
//! Active-section tracking for long, sectioned documents. A
//! [`ScrollSyncController`] watches which section is inside the viewport and
//! keeps a single active id that navigation menus highlight. Menus call
//! [`ScrollSyncController::navigate_to`] to jump; the highlight moves at once
//! and the host scrolls in the background.
//!
//! The controller is host-agnostic. Rendering backends implement
//! [`ViewportHost`] (observe, unobserve, scroll) and hand over an
//! [`ElementResolver`] that binds section ids to their elements.
//!
//! ```
//! use lectern_sync::{BindingTable, ObserverConfig, ScrollBehavior, ScrollSyncController, ViewportHost, VisibilityEvent};
//! use lectern_types::SectionRegistry;
//!
//! #[derive(Default)]
//! struct NullHost;
//!
//! impl ViewportHost for NullHost {
//!     type Element = usize;
//!     fn observe(&mut self, _: &usize, _: &ObserverConfig) {}
//!     fn unobserve(&mut self, _: &usize) {}
//!     fn scroll_into_view(&mut self, _: &usize, _: ScrollBehavior) {}
//! }
//!
//! let registry = SectionRegistry::from_ids(["intro", "science"]);
//! let bindings: BindingTable<usize> = [("intro", 0), ("science", 1)].into_iter().collect();
//!
//! let mut controller = ScrollSyncController::new(NullHost);
//! controller.start(&registry, &bindings);
//! assert!(controller.is_active("intro"));
//!
//! controller.on_visibility_change(&[VisibilityEvent::entered(1, 0.4)]);
//! assert!(controller.is_active("science"));
//! ```

mod controller;
mod event;
mod host;
mod observed;
mod policy;

pub use controller::{ActivationSource, Navigation, ScrollSyncController, ScrollSyncState};
pub use event::VisibilityEvent;
pub use host::{BindingTable, DEFAULT_THRESHOLD, ElementResolver, InvalidThreshold, ObserverConfig, ScrollBehavior, ViewportHost};
pub use observed::{ObservedElementSet, ObservedEntry};
pub use policy::{ActivationPolicy, LastEntered, MostVisible, Observation, PolicyKind, UnknownPolicy};
