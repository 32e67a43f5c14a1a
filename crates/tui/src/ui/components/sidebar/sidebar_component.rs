use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{App, Effect};
use crate::ui::components::Component;
use crate::ui::theme::helpers as th;
use crate::ui::utils::{find_target_index_by_mouse_position, truncate_to_width};

/// Persistent list of sections shown on wide terminals.
#[derive(Debug, Default)]
pub struct SidebarComponent;

impl Component for SidebarComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let state = &mut app.sidebar;
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => state.move_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => state.move_cursor(-1),
            KeyCode::Home => state.cursor = 0,
            KeyCode::End => state.cursor = state.entries.len().saturating_sub(1),
            KeyCode::Enter => {
                if let Some(entry) = state.cursor_entry() {
                    return vec![Effect::NavigateTo(entry.id.clone())];
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if !app.wide || mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        let state = &app.sidebar;
        let Some(index) = find_target_index_by_mouse_position(&state.last_area, &state.per_item_areas, mouse.column, mouse.row) else {
            return Vec::new();
        };
        let Some(entry) = state.entries.get(index) else {
            return Vec::new();
        };
        let id = entry.id.clone();
        app.sidebar.cursor = index;
        app.focus.focus(&app.sidebar);
        vec![Effect::NavigateTo(id)]
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let focused = app.sidebar.focus.get();
        let block = th::block(theme, Some(" Sections "), focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let active = app.sync.active_id();
        let label_width = usize::from(inner.width.saturating_sub(2));
        let mut item_areas = Vec::with_capacity(app.sidebar.entries.len());
        for (index, entry) in app.sidebar.entries.iter().enumerate() {
            let Ok(row) = u16::try_from(index) else {
                break;
            };
            if row >= inner.height {
                break;
            }
            let row_area = Rect::new(inner.x, inner.y + row, inner.width, 1);
            let is_active = active == Some(&entry.id);
            let is_cursor = focused && index == app.sidebar.cursor;

            let marker = if is_active { "▌" } else { " " };
            let mut style = if is_active { theme.active_item_style() } else { theme.text_secondary_style() };
            if is_cursor {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            let line = Line::from(vec![
                Span::styled(marker, theme.accent_primary_style()),
                Span::raw(" "),
                Span::styled(truncate_to_width(&entry.title(), label_width), style),
            ]);
            frame.render_widget(Paragraph::new(line), row_area);
            item_areas.push(row_area);
        }

        app.sidebar.last_area = area;
        app.sidebar.per_item_areas = item_areas;
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'static>> {
        th::build_hint_spans(&*app.ctx.theme, &[(" ↑/↓", " Move "), (" Enter", " Go to section ")])
    }
}
