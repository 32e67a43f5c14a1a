use lectern_sync::{
    BindingTable, MostVisible, Navigation, ObserverConfig, ScrollBehavior, ScrollSyncController, ViewportHost, VisibilityEvent,
};
use lectern_types::SectionRegistry;

/// Host double that records every call the controller makes.
#[derive(Debug, Default)]
struct RecordingHost {
    observed: Vec<usize>,
    observe_calls: usize,
    unobserved: Vec<usize>,
    thresholds: Vec<f32>,
    ratio_updates: Vec<bool>,
    scroll_requests: Vec<(usize, ScrollBehavior)>,
}

impl ViewportHost for RecordingHost {
    type Element = usize;

    fn observe(&mut self, element: &usize, config: &ObserverConfig) {
        self.observe_calls += 1;
        self.observed.push(*element);
        self.thresholds.push(config.threshold());
        self.ratio_updates.push(config.reports_ratio_changes());
    }

    fn unobserve(&mut self, element: &usize) {
        self.unobserved.push(*element);
        self.observed.retain(|observed| observed != element);
    }

    fn scroll_into_view(&mut self, element: &usize, behavior: ScrollBehavior) {
        self.scroll_requests.push((*element, behavior));
    }
}

const PAGE: [&str; 4] = ["intro", "science", "quran", "reflection"];

fn page_registry() -> SectionRegistry {
    SectionRegistry::from_ids(PAGE)
}

fn page_bindings() -> BindingTable<usize> {
    PAGE.iter().enumerate().map(|(index, id)| (*id, index)).collect()
}

fn started_controller() -> ScrollSyncController<RecordingHost> {
    let mut controller = ScrollSyncController::new(RecordingHost::default());
    controller.start(&page_registry(), &page_bindings());
    controller
}

#[test]
fn first_section_is_active_right_after_start() {
    let controller = started_controller();
    assert_eq!(controller.active_id().map(|id| id.as_str()), Some("intro"));
    assert_eq!(controller.host().observed, vec![0, 1, 2, 3]);
}

#[test]
fn every_element_shares_one_threshold() {
    let config = ObserverConfig::new(0.45).expect("valid threshold");
    let mut controller = ScrollSyncController::with_config(RecordingHost::default(), config);
    controller.start(&page_registry(), &page_bindings());
    assert_eq!(controller.host().thresholds, vec![0.45; 4]);
}

#[test]
fn navigation_updates_state_before_any_scrolling_happens() {
    let mut controller = started_controller();
    let outcome = controller.navigate_to("science");

    assert_eq!(outcome, Navigation::Scrolling);
    assert!(controller.is_active("science"));
    assert_eq!(controller.host().scroll_requests, vec![(1, ScrollBehavior::Smooth)]);
}

#[test]
fn stop_twice_is_harmless_and_releases_everything() {
    let mut controller = started_controller();
    controller.stop();
    controller.stop();

    assert!(!controller.is_started());
    assert!(controller.host().observed.is_empty());
    assert_eq!(controller.host().unobserved.len(), 4, "each element is released exactly once");
}

#[test]
fn stop_without_start_is_harmless() {
    let mut controller = ScrollSyncController::new(RecordingHost::default());
    controller.stop();
    assert!(controller.host().unobserved.is_empty());
}

#[test]
fn navigating_to_unknown_section_moves_highlight_only() {
    let mut controller = started_controller();
    let outcome = controller.navigate_to("nonexistent");

    assert_eq!(outcome, Navigation::Unresolved);
    assert_eq!(controller.active_id().map(|id| id.as_str()), Some("nonexistent"));
    assert!(controller.host().scroll_requests.is_empty());
}

#[test]
fn entered_event_activates_its_section() {
    let mut controller = started_controller();
    assert!(controller.is_active("intro"));

    let changed = controller.on_visibility_change(&[VisibilityEvent::entered(2, 0.35)]);

    assert!(changed);
    assert!(controller.is_active("quran"));
}

#[test]
fn leaving_events_never_clear_the_active_section() {
    let mut controller = started_controller();
    controller.on_visibility_change(&[VisibilityEvent::entered(1, 0.5)]);
    let changed = controller.on_visibility_change(&[VisibilityEvent::left(1, 0.0)]);

    assert!(!changed);
    assert!(controller.is_active("science"));
}

#[test]
fn last_entered_event_in_a_batch_wins() {
    let mut controller = started_controller();
    controller.on_visibility_change(&[
        VisibilityEvent::entered(1, 0.9),
        VisibilityEvent::left(0, 0.1),
        VisibilityEvent::entered(2, 0.31),
    ]);
    assert!(controller.is_active("quran"));
}

#[test]
fn most_visible_policy_prefers_largest_ratio() {
    let mut controller = ScrollSyncController::new(RecordingHost::default()).with_policy(Box::new(MostVisible::default()));
    controller.start(&page_registry(), &page_bindings());
    controller.on_visibility_change(&[VisibilityEvent::entered(1, 0.9), VisibilityEvent::entered(2, 0.31)]);
    assert!(controller.is_active("science"));
}

#[test]
fn only_ratio_based_policies_ask_for_ratio_updates() {
    let controller = started_controller();
    assert_eq!(controller.host().ratio_updates, vec![false; 4]);

    let mut controller = ScrollSyncController::new(RecordingHost::default()).with_policy(Box::new(MostVisible::default()));
    controller.start(&page_registry(), &page_bindings());
    assert_eq!(controller.host().ratio_updates, vec![true; 4]);
}

#[test]
fn most_visible_follows_refreshed_ratios() {
    let mut controller = ScrollSyncController::new(RecordingHost::default()).with_policy(Box::new(MostVisible::default()));
    controller.start(&page_registry(), &page_bindings());
    controller.on_visibility_change(&[VisibilityEvent::entered(0, 1.0)]);
    controller.on_visibility_change(&[VisibilityEvent::entered(1, 0.3)]);
    assert!(controller.is_active("intro"));

    // Both stay entered; the host refreshes their ratios as the page moves.
    controller.on_visibility_change(&[VisibilityEvent::entered(0, 0.3), VisibilityEvent::entered(1, 0.7)]);
    assert!(controller.is_active("science"));
}

#[test]
fn missing_elements_are_skipped_without_error() {
    let mut bindings = BindingTable::new();
    bindings.bind("intro", 0usize).bind("reflection", 3usize);
    let mut controller = ScrollSyncController::new(RecordingHost::default());
    controller.start(&page_registry(), &bindings);

    let observed = controller.observed().expect("started");
    assert_eq!(observed.len(), 2);
    let unresolved: Vec<_> = observed.unresolved().iter().map(|id| id.as_str()).collect();
    assert_eq!(unresolved, vec!["science", "quran"]);
    assert_eq!(controller.navigate_to("science"), Navigation::Unresolved);
}

#[test]
fn restarting_with_the_same_registry_does_not_duplicate_observers() {
    let registry = page_registry();
    let bindings = page_bindings();
    let mut controller = ScrollSyncController::new(RecordingHost::default());
    controller.start(&registry, &bindings);
    controller.navigate_to("quran");
    controller.start(&registry.clone(), &bindings);

    assert_eq!(controller.host().observe_calls, 4);
    assert!(controller.is_active("quran"), "a redundant start keeps the current state");
}

#[test]
fn new_registry_identity_rebuilds_observation() {
    let mut controller = started_controller();

    let next_page = SectionRegistry::from_ids(["overview", "details"]);
    let next_bindings: BindingTable<usize> = [("overview", 10usize), ("details", 11usize)].into_iter().collect();
    controller.start(&next_page, &next_bindings);

    let host = controller.host();
    assert_eq!(host.unobserved, vec![0, 1, 2, 3]);
    assert_eq!(host.observed, vec![10, 11]);
    assert!(controller.is_active("overview"));

    // An event from the previous page must not leak into the new one.
    assert!(!controller.on_visibility_change(&[VisibilityEvent::entered(2, 0.8)]));
    assert!(controller.is_active("overview"));
}

#[test]
fn equal_ids_in_a_new_list_still_count_as_a_new_registry() {
    let mut controller = started_controller();
    controller.start(&page_registry(), &page_bindings());
    assert_eq!(controller.host().observe_calls, 8);
    assert_eq!(controller.host().unobserved.len(), 4);
}

#[test]
fn dropping_the_controller_releases_its_observers() {
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct SharedHost(Rc<RefCell<Vec<usize>>>);

    impl ViewportHost for SharedHost {
        type Element = usize;
        fn observe(&mut self, element: &usize, _config: &ObserverConfig) {
            self.0.borrow_mut().push(*element);
        }
        fn unobserve(&mut self, element: &usize) {
            self.0.borrow_mut().retain(|observed| observed != element);
        }
        fn scroll_into_view(&mut self, _element: &usize, _behavior: ScrollBehavior) {}
    }

    let live = Rc::new(RefCell::new(Vec::new()));
    {
        let mut controller = ScrollSyncController::new(SharedHost(Rc::clone(&live)));
        controller.start(&page_registry(), &page_bindings());
        assert_eq!(live.borrow().len(), 4);
    }
    assert!(live.borrow().is_empty());
}

/// Sections of equal height stacked top to bottom, scrolled by a viewport.
struct StackedPage {
    heights: Vec<u16>,
    viewport: u16,
    threshold: f32,
    entered: Vec<bool>,
}

impl StackedPage {
    fn new(heights: Vec<u16>, viewport: u16, threshold: f32) -> Self {
        let count = heights.len();
        Self {
            heights,
            viewport,
            threshold,
            entered: vec![false; count],
        }
    }

    fn top_of(&self, index: usize) -> u16 {
        self.heights[..index].iter().sum()
    }

    /// Threshold crossings caused by moving the viewport to `offset`.
    fn crossings_at(&mut self, offset: u16) -> Vec<VisibilityEvent<usize>> {
        let mut events = Vec::new();
        for index in 0..self.heights.len() {
            let top = self.top_of(index);
            let bottom = top + self.heights[index];
            let visible = bottom.min(offset + self.viewport).saturating_sub(top.max(offset));
            let ratio = f32::from(visible) / f32::from(self.heights[index].min(self.viewport));
            let entered = ratio >= self.threshold;
            if entered != self.entered[index] {
                self.entered[index] = entered;
                events.push(VisibilityEvent {
                    target: index,
                    is_entering: entered,
                    ratio,
                });
            }
        }
        events
    }
}

#[test]
fn long_programmatic_scroll_settles_on_the_destination() {
    let mut controller = started_controller();
    let mut page = StackedPage::new(vec![20, 20, 20, 20], 10, 0.3);
    controller.on_visibility_change(&page.crossings_at(0));
    assert!(controller.is_active("intro"));

    assert_eq!(controller.navigate_to("reflection"), Navigation::Scrolling);
    assert!(controller.is_active("reflection"), "highlight moves before the scroll starts");

    let (target, _) = controller.host().scroll_requests[0];
    let destination = page.top_of(target);
    let mut seen = Vec::new();
    let mut offset = 0;
    while offset < destination {
        offset = (offset + 4).min(destination);
        controller.on_visibility_change(&page.crossings_at(offset));
        seen.extend(controller.active_id().map(|id| id.to_string()));
    }

    // Passing sections may flicker through the highlight on the way down.
    assert!(seen.iter().all(|id| PAGE.contains(&id.as_str())), "unexpected ids: {:?}", seen);
    assert_eq!(controller.active_id().map(|id| id.as_str()), Some("reflection"));
}
