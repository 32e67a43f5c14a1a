use lectern_types::{SectionId, SectionRegistry};
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;

/// One row of a navigation view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub id: SectionId,
    pub label: String,
    pub icon: Option<String>,
}

impl NavEntry {
    pub fn from_registry(registry: &SectionRegistry) -> Vec<Self> {
        registry
            .iter()
            .map(|section| Self {
                id: section.id.clone(),
                label: section.label.clone(),
                icon: section.display_meta.icon.clone(),
            })
            .collect()
    }

    /// `icon label`, or just the label.
    pub fn title(&self) -> String {
        match &self.icon {
            Some(icon) => format!("{icon} {}", self.label),
            None => self.label.clone(),
        }
    }
}

/// State for the persistent section sidebar.
///
/// The keyboard cursor is independent from the active highlight: moving the
/// cursor never navigates, only `Enter` or a click does.
#[derive(Debug, Clone)]
pub struct SidebarState {
    pub entries: Vec<NavEntry>,
    pub cursor: usize,
    pub focus: FocusFlag,
    /// Last rendered area; used for mouse focus and hit testing.
    pub last_area: Rect,
    /// Last computed per-entry row areas for hit testing.
    pub per_item_areas: Vec<Rect>,
}

impl SidebarState {
    pub fn new(registry: &SectionRegistry) -> Self {
        Self {
            entries: NavEntry::from_registry(registry),
            cursor: 0,
            focus: FocusFlag::named("sidebar"),
            last_area: Rect::default(),
            per_item_areas: Vec::new(),
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.entries.len();
        if len == 0 {
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(len - 1);
    }

    pub fn cursor_entry(&self) -> Option<&NavEntry> {
        self.entries.get(self.cursor)
    }
}

impl HasFocus for SidebarState {
    fn build(&self, builder: &mut FocusBuilder) {
        builder.leaf_widget(self);
    }

    fn focus(&self) -> FocusFlag {
        self.focus.clone()
    }

    fn area(&self) -> Rect {
        self.last_area
    }
}
