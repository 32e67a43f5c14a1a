//! Terminal implementation of the scroll-sync host.
//!
//! [`TerminalViewport`] owns the laid-out article, the scroll position, the
//! visibility observer and any smooth-scroll animation in flight. The
//! scroll-sync controller drives it through [`ViewportHost`]; the event loop
//! advances it with [`TerminalViewport::tick`] and drains visibility batches
//! with [`TerminalViewport::collect_visibility`].

mod animation;
mod document;
mod metrics;
mod observer;

use std::time::{Duration, Instant};

use lectern_sync::{ObserverConfig, ScrollBehavior, ViewportHost, VisibilityEvent};
use tracing::{debug, trace};

pub use animation::ScrollAnimation;
pub use document::{BlockHandle, DocLine, DocumentLayout, LineKind, SectionSpan};
pub use metrics::ScrollMetrics;
pub use observer::{ViewportObserver, visible_ratio};

#[derive(Debug)]
pub struct TerminalViewport {
    layout: DocumentLayout,
    metrics: ScrollMetrics,
    observer: ViewportObserver,
    animation: Option<ScrollAnimation>,
    scroll_margin: u16,
    smooth_scroll: Duration,
}

impl TerminalViewport {
    pub fn new(layout: DocumentLayout, scroll_margin: u16, smooth_scroll: Duration) -> Self {
        let mut metrics = ScrollMetrics::default();
        metrics.update_content_height(layout.height());
        Self {
            layout,
            metrics,
            observer: ViewportObserver::default(),
            animation: None,
            scroll_margin,
            smooth_scroll,
        }
    }

    pub fn layout(&self) -> &DocumentLayout {
        &self.layout
    }

    pub fn metrics(&self) -> &ScrollMetrics {
        &self.metrics
    }

    pub fn observer(&self) -> &ViewportObserver {
        &self.observer
    }

    pub fn offset(&self) -> u16 {
        self.metrics.offset()
    }

    pub fn viewport_height(&self) -> u16 {
        self.metrics.viewport_height()
    }

    /// Replace the layout, after a resize or when a new article is loaded.
    ///
    /// An animation in flight jumps straight to its section's new position.
    pub fn set_layout(&mut self, layout: DocumentLayout) {
        let retarget = self
            .animation
            .and_then(|animation| self.layout.section_at(animation.target().saturating_add(self.scroll_margin)))
            .map(|index| self.layout.handle(index));
        self.layout = layout;
        self.metrics.update_content_height(self.layout.height());
        self.animation = None;
        if let Some(handle) = retarget
            && let Some(target) = self.target_offset(&handle)
        {
            self.metrics.scroll_to(target);
        }
    }

    pub fn set_viewport_height(&mut self, height: u16) {
        self.metrics.update_viewport_height(height);
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Manual scrolling cancels any animation in flight.
    pub fn scroll_lines(&mut self, delta: i32) -> bool {
        self.animation = None;
        self.metrics.scroll_lines(delta)
    }

    pub fn scroll_pages(&mut self, delta: i32) -> bool {
        self.animation = None;
        self.metrics.scroll_pages(delta)
    }

    pub fn scroll_to_top(&mut self) -> bool {
        self.animation = None;
        self.metrics.scroll_to(0)
    }

    pub fn scroll_to_bottom(&mut self) -> bool {
        self.animation = None;
        self.metrics.scroll_to(self.metrics.max_offset())
    }

    /// Advance the animation to `now`. Returns `true` when the offset moved.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(animation) = self.animation else {
            return false;
        };
        let moved = self.metrics.scroll_to(animation.position(now));
        if animation.is_finished(now) {
            trace!(offset = self.metrics.offset(), "smooth scroll finished");
            self.animation = None;
        }
        moved
    }

    /// Evaluate the observer at the current offset and drain its events.
    pub fn collect_visibility(&mut self) -> Vec<VisibilityEvent<BlockHandle>> {
        self.observer
            .evaluate(&self.layout, self.metrics.offset(), self.metrics.viewport_height());
        self.observer.take_events()
    }

    /// Offset that puts `handle` at the top of the viewport, below the margin.
    pub fn target_offset(&self, handle: &BlockHandle) -> Option<u16> {
        let span = self.layout.span(handle)?;
        Some(self.metrics.clamp(span.top.saturating_sub(self.scroll_margin)))
    }
}

impl ViewportHost for TerminalViewport {
    type Element = BlockHandle;

    fn observe(&mut self, element: &BlockHandle, config: &ObserverConfig) {
        self.observer.observe(*element, *config);
    }

    fn unobserve(&mut self, element: &BlockHandle) {
        self.observer.unobserve(element);
    }

    fn scroll_into_view(&mut self, element: &BlockHandle, behavior: ScrollBehavior) {
        let Some(target) = self.target_offset(element) else {
            debug!(?element, "scroll target is not part of the current layout");
            return;
        };
        if behavior == ScrollBehavior::Instant || self.smooth_scroll.is_zero() {
            self.animation = None;
            self.metrics.scroll_to(target);
            return;
        }

        let now = Instant::now();
        let animation = match self.animation {
            Some(current) => current.redirect(target, now),
            None => ScrollAnimation::new(self.metrics.offset(), target, now, self.smooth_scroll),
        };
        trace!(from = self.metrics.offset(), to = target, "smooth scroll started");
        self.animation = Some(animation);
    }
}
