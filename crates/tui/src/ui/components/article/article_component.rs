use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Margin, Position, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{App, Effect};
use crate::ui::components::Component;
use crate::ui::theme::{Theme, helpers as th};
use crate::viewport::{DocLine, LineKind};

const WHEEL_STEP: i32 = 3;

/// The scrollable article body.
#[derive(Debug, Default)]
pub struct ArticleComponent;

impl ArticleComponent {
    fn styled_line<'a>(theme: &dyn Theme, line: &'a DocLine) -> Line<'a> {
        match line.kind {
            LineKind::Heading => Line::from(Span::styled(line.text.as_str(), theme.heading_style())),
            LineKind::Body => Line::from(Span::styled(line.text.as_str(), theme.text_primary_style())),
            LineKind::Quote => Line::from(vec![
                Span::styled("│ ", theme.accent_primary_style()),
                Span::styled(line.text.as_str(), theme.quote_style()),
            ]),
            LineKind::Citation => Line::from(vec![
                Span::styled("│ ", theme.accent_primary_style()),
                Span::styled(line.text.as_str(), theme.text_muted_style()),
            ]),
            LineKind::Blank => Line::default(),
        }
    }
}

impl Component for ArticleComponent {
    fn handle_key_events(&mut self, _app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let effect = match key.code {
            KeyCode::Down | KeyCode::Char('j') => Effect::ScrollLines(1),
            KeyCode::Up | KeyCode::Char('k') => Effect::ScrollLines(-1),
            KeyCode::PageDown | KeyCode::Char(' ') => Effect::ScrollPages(1),
            KeyCode::PageUp => Effect::ScrollPages(-1),
            KeyCode::Home | KeyCode::Char('g') => Effect::ScrollToTop,
            KeyCode::End | KeyCode::Char('G') => Effect::ScrollToBottom,
            _ => return Vec::new(),
        };
        vec![effect]
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let position = Position::new(mouse.column, mouse.row);
        if !app.article_view.last_area.contains(position) {
            return Vec::new();
        }
        match mouse.kind {
            MouseEventKind::ScrollDown => vec![Effect::ScrollLines(WHEEL_STEP)],
            MouseEventKind::ScrollUp => vec![Effect::ScrollLines(-WHEEL_STEP)],
            MouseEventKind::Down(MouseButton::Left) => {
                app.focus.focus(&app.article_view);
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let viewport = app.sync.host();
        let title = app
            .sync
            .active_id()
            .and_then(|id| app.registry.get(id.as_str()))
            .map(|section| format!(" {} ", section.label))
            .unwrap_or_default();
        let block = th::block(theme, Some(title.as_str()), app.article_view.focus.get());
        frame.render_widget(block, area);

        let text_area = area.inner(Margin::new(2, 1));
        let offset = usize::from(viewport.offset());
        let rows = usize::from(text_area.height);
        let lines: Vec<Line> = viewport
            .layout()
            .lines()
            .iter()
            .skip(offset)
            .take(rows)
            .map(|line| Self::styled_line(theme, line))
            .collect();
        frame.render_widget(Paragraph::new(lines).style(th::panel_style(theme)), text_area);

        th::render_vertical_scrollbar(
            frame,
            area.inner(Margin::new(0, 1)),
            theme,
            usize::from(viewport.metrics().content_height()),
            offset,
            rows,
        );

        app.article_view.last_area = area;
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'static>> {
        th::build_hint_spans(&*app.ctx.theme, &[(" j/k", " Scroll "), (" PgUp/PgDn", " Page "), (" g/G", " Top/Bottom ")])
    }
}
