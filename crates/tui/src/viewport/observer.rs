//! Threshold-crossing observer for laid-out sections.
//!
//! The observer keeps the last known entered state of each watched block.
//! `evaluate` recomputes visibility for the current scroll offset and queues
//! one event per block whose state changed. A freshly observed block has no
//! known state yet, so its first evaluation always reports it. Watches whose
//! config asks for ratio updates also report an entered block again whenever
//! its visible ratio changes.

use lectern_sync::{ObserverConfig, VisibilityEvent};

use super::document::{BlockHandle, DocumentLayout, SectionSpan};

#[derive(Debug, Clone)]
struct Watch {
    handle: BlockHandle,
    config: ObserverConfig,
    entered: Option<bool>,
    ratio: f32,
}

#[derive(Debug, Default)]
pub struct ViewportObserver {
    watches: Vec<Watch>,
    pending: Vec<VisibilityEvent<BlockHandle>>,
}

impl ViewportObserver {
    pub fn observe(&mut self, handle: BlockHandle, config: ObserverConfig) {
        if let Some(watch) = self.watches.iter_mut().find(|watch| watch.handle == handle) {
            watch.config = config;
            return;
        }
        self.watches.push(Watch {
            handle,
            config,
            entered: None,
            ratio: 0.0,
        });
    }

    /// Stops watching `handle` and drops any of its events not yet delivered.
    pub fn unobserve(&mut self, handle: &BlockHandle) {
        self.watches.retain(|watch| &watch.handle != handle);
        self.pending.retain(|event| &event.target != handle);
    }

    pub fn len(&self) -> usize {
        self.watches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.watches.is_empty()
    }

    pub fn is_observing(&self, handle: &BlockHandle) -> bool {
        self.watches.iter().any(|watch| &watch.handle == handle)
    }

    /// Queue crossings (and ratio updates where requested) for a viewport of `height` rows starting at `offset`.
    ///
    /// Watches whose handle no longer resolves in `layout` are left untouched.
    pub fn evaluate(&mut self, layout: &DocumentLayout, offset: u16, height: u16) {
        for watch in &mut self.watches {
            let Some(span) = layout.span(&watch.handle) else {
                continue;
            };
            let ratio = visible_ratio(span, offset, height);
            let entered = watch.config.is_past_threshold(ratio);
            let crossed = watch.entered != Some(entered);
            let refreshed = entered && watch.config.reports_ratio_changes() && ratio != watch.ratio;
            watch.ratio = ratio;
            if !crossed && !refreshed {
                continue;
            }
            watch.entered = Some(entered);
            self.pending.push(VisibilityEvent {
                target: watch.handle,
                is_entering: entered,
                ratio,
            });
        }
    }

    pub fn take_events(&mut self) -> Vec<VisibilityEvent<BlockHandle>> {
        std::mem::take(&mut self.pending)
    }
}

/// Visible fraction of `span` inside `[offset, offset + height)`.
///
/// Spans taller than the viewport are measured against the viewport height,
/// so a long section that fills the screen counts as fully visible.
pub fn visible_ratio(span: &SectionSpan, offset: u16, height: u16) -> f32 {
    let extent = span.height.min(height);
    if extent == 0 {
        return 0.0;
    }
    let viewport_bottom = offset.saturating_add(height);
    let visible = span.bottom().min(viewport_bottom).saturating_sub(span.top.max(offset));
    (f32::from(visible) / f32::from(extent)).clamp(0.0, 1.0)
}
