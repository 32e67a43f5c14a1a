//! Screen layout for the reader.
//!
//! The same computation serves rendering and the viewport: the article's
//! text area decides the wrap width and the number of visible rows.

use ratatui::layout::{Constraint, Layout, Margin, Rect};

const HEADER_HEIGHT: u16 = 2;
const HINT_BAR_HEIGHT: u16 = 1;
const SIDEBAR_WIDTH: u16 = 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReaderLayout {
    pub header: Rect,
    pub sidebar: Option<Rect>,
    /// The bordered article panel.
    pub article: Rect,
    /// Where article rows are drawn: the panel minus borders and padding.
    pub article_text: Rect,
    pub hints: Rect,
}

impl ReaderLayout {
    pub fn compute(area: Rect, show_sidebar: bool) -> Self {
        let [header, body, hints] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(HINT_BAR_HEIGHT),
        ])
        .areas(area);

        let (sidebar, article) = if show_sidebar {
            let [sidebar, article] = Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)]).areas(body);
            (Some(sidebar), article)
        } else {
            (None, body)
        };

        Self {
            header,
            sidebar,
            article,
            article_text: article.inner(Margin::new(2, 1)),
            hints,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sidebar_takes_a_fixed_column_when_shown() {
        let layout = ReaderLayout::compute(Rect::new(0, 0, 120, 40), true);
        let sidebar = layout.sidebar.expect("sidebar");
        assert_eq!(sidebar.width, SIDEBAR_WIDTH);
        assert_eq!(layout.article.x, SIDEBAR_WIDTH);
        assert_eq!(layout.article_text.width, 120 - SIDEBAR_WIDTH - 4);
        assert_eq!(layout.article_text.height, 40 - HEADER_HEIGHT - HINT_BAR_HEIGHT - 2);
    }

    #[test]
    fn narrow_layout_gives_the_article_everything() {
        let layout = ReaderLayout::compute(Rect::new(0, 0, 60, 20), false);
        assert!(layout.sidebar.is_none());
        assert_eq!(layout.article.width, 60);
    }
}
