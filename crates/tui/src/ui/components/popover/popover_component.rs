use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use crate::app::{App, Effect};
use crate::ui::components::Component;
use crate::ui::components::sidebar::NavEntry;
use crate::ui::theme::helpers as th;
use crate::ui::utils::{centered_rect, find_target_index_by_mouse_position, truncate_to_width};

/// Centered section menu; the only navigation view on narrow terminals.
#[derive(Debug, Default)]
pub struct PopoverComponent;

impl PopoverComponent {
    fn entries(app: &App) -> Vec<NavEntry> {
        NavEntry::from_registry(&app.registry)
    }

    fn choose(app: &App, index: usize) -> Vec<Effect> {
        match app.registry.sections().get(index) {
            Some(section) => vec![Effect::NavigateTo(section.id.clone()), Effect::ClosePopover],
            None => Vec::new(),
        }
    }

    pub fn area_for(screen: Rect, entries: usize) -> Rect {
        let outer = centered_rect(60, 80, screen);
        let wanted = u16::try_from(entries).unwrap_or(u16::MAX).saturating_add(2);
        Rect {
            height: outer.height.min(wanted),
            ..outer
        }
    }
}

impl Component for PopoverComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let len = app.registry.len();
        match key.code {
            KeyCode::Esc | KeyCode::Char('m') => return vec![Effect::ClosePopover],
            KeyCode::Down | KeyCode::Char('j') => app.popover.move_cursor(1, len),
            KeyCode::Up | KeyCode::Char('k') => app.popover.move_cursor(-1, len),
            KeyCode::Enter => return Self::choose(app, app.popover.cursor),
            _ => {}
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        let state = &app.popover;
        if let Some(index) = find_target_index_by_mouse_position(&state.last_area, &state.per_item_areas, mouse.column, mouse.row) {
            return Self::choose(app, index);
        }
        if !state.last_area.contains(Position::new(mouse.column, mouse.row)) {
            return vec![Effect::ClosePopover];
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let entries = Self::entries(app);
        let area = Self::area_for(rect, entries.len());

        frame.render_widget(Clear, area);
        let block = th::block(theme, Some(" Jump to section "), true).style(theme.modal_background_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let active = app.sync.active_id();
        let width = usize::from(inner.width.saturating_sub(6));
        let mut item_areas = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let Ok(row) = u16::try_from(index) else {
                break;
            };
            if row >= inner.height {
                break;
            }
            let row_area = Rect::new(inner.x, inner.y + row, inner.width, 1);
            let is_active = active == Some(&entry.id);
            let mut style = if is_active { theme.active_item_style() } else { theme.text_primary_style() };
            if index == app.popover.cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            let shortcut = if index < 9 { format!("{} ", index + 1) } else { "  ".into() };
            let line = Line::from(vec![
                Span::styled(format!(" {shortcut}"), theme.text_muted_style()),
                Span::styled(truncate_to_width(&entry.title(), width), style),
            ]);
            frame.render_widget(Paragraph::new(line), row_area);
            item_areas.push(row_area);
        }

        app.popover.last_area = area;
        app.popover.per_item_areas = item_areas;
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'static>> {
        th::build_hint_spans(&*app.ctx.theme, &[(" ↑/↓", " Move "), (" Enter", " Go "), (" Esc", " Close ")])
    }
}
