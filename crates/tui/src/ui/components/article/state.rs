use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;

#[derive(Debug, Clone)]
pub struct ArticleViewState {
    pub focus: FocusFlag,
    pub last_area: Rect,
}

impl Default for ArticleViewState {
    fn default() -> Self {
        Self {
            focus: FocusFlag::named("article"),
            last_area: Rect::default(),
        }
    }
}

impl HasFocus for ArticleViewState {
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
