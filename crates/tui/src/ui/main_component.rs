//! Root view: routes input to the focused component and renders the screen.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};
use ratatui::{Frame, layout::Rect};

use crate::app::{App, Effect, Msg};
use crate::ui::components::{
    ArticleComponent, Component, HeaderComponent, HintBarComponent, PopoverComponent, SidebarComponent,
};
use crate::ui::layout::ReaderLayout;

#[derive(Debug, Default)]
pub struct MainView {
    header: HeaderComponent,
    sidebar: SidebarComponent,
    article: ArticleComponent,
    popover: PopoverComponent,
    hint_bar: HintBarComponent,
}

impl MainView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runtime messages go straight to the app. Returns `true` when a redraw is needed.
    pub fn handle_message(&mut self, app: &mut App, msg: Msg) -> bool {
        app.update(&msg)
    }

    /// Keys every view understands, regardless of focus.
    fn handle_global_keys(app: &mut App, key: KeyEvent) -> Option<Vec<Effect>> {
        let effect = match key.code {
            KeyCode::Char('q') => Effect::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Effect::Quit,
            KeyCode::Char('m') => Effect::TogglePopover,
            KeyCode::Char('t') => Effect::CycleTheme,
            KeyCode::Char('r') => Effect::ReloadArticle,
            KeyCode::Char(digit @ '1'..='9') => {
                let id = digit.to_digit(10).and_then(|digit| app.section_for_digit(digit))?;
                Effect::NavigateTo(id)
            }
            KeyCode::Tab | KeyCode::BackTab => {
                if key.code == KeyCode::Tab {
                    app.focus.next();
                } else {
                    app.focus.prev();
                }
                return Some(Vec::new());
            }
            _ => return None,
        };
        Some(vec![effect])
    }
}

impl Component for MainView {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if key.kind == KeyEventKind::Release {
            return Vec::new();
        }
        app.status = None;
        if app.popover.is_open() {
            if key.code == KeyCode::Char('q') {
                return vec![Effect::Quit];
            }
            return self.popover.handle_key_events(app, key);
        }
        if let Some(effects) = Self::handle_global_keys(app, key) {
            return effects;
        }
        if app.sidebar_has_focus() {
            self.sidebar.handle_key_events(app, key)
        } else {
            self.article.handle_key_events(app, key)
        }
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if app.popover.is_open() {
            return self.popover.handle_mouse_events(app, mouse);
        }
        let mut effects = self.sidebar.handle_mouse_events(app, mouse);
        effects.extend(self.article.handle_mouse_events(app, mouse));
        effects
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let layout = ReaderLayout::compute(area, app.wide);
        self.header.render(frame, layout.header, app);
        if let Some(sidebar_area) = layout.sidebar {
            self.sidebar.render(frame, sidebar_area, app);
        }
        self.article.render(frame, layout.article, app);

        self.hint_bar.focused_hints = self.get_hint_spans(app);
        self.hint_bar.render(frame, layout.hints, app);

        if app.popover.is_open() {
            self.popover.render(frame, area, app);
        }
    }

    fn get_hint_spans(&self, app: &App) -> Vec<ratatui::text::Span<'static>> {
        if app.popover.is_open() {
            self.popover.get_hint_spans(app)
        } else if app.sidebar_has_focus() {
            self.sidebar.get_hint_spans(app)
        } else {
            self.article.get_hint_spans(app)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::{KeyEvent, KeyModifiers, MouseButton, MouseEventKind};
    use lectern_types::Article;
    use lectern_util::{ReaderConfig, UserPreferences};
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::app::{ArticleSource, SharedCtx};
    use crate::ui::theme::{LoadedTheme, catalog};

    fn app(width: u16, height: u16) -> App {
        let config = ReaderConfig {
            smooth_scroll: std::time::Duration::ZERO,
            ..ReaderConfig::default()
        };
        let ctx = SharedCtx::new(
            LoadedTheme::from_definition(catalog::default_truecolor()),
            Arc::new(UserPreferences::ephemeral()),
        );
        let article = Article::demo().expect("demo article");
        App::new(article, ArticleSource::Demo, config, ctx, (width, height))
    }

    fn press(view: &mut MainView, app: &mut App, code: KeyCode) {
        let effects = view.handle_key_events(app, KeyEvent::new(code, KeyModifiers::NONE));
        for effect in effects {
            app.apply_effect(effect);
        }
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        let mut text = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn draw(view: &mut MainView, app: &mut App, terminal: &mut Terminal<TestBackend>) {
        terminal.draw(|frame| view.render(frame, frame.area(), app)).expect("draw");
    }

    #[test]
    fn wide_screen_shows_sidebar_with_every_section() {
        let mut app = app(120, 40);
        let mut view = MainView::new();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).expect("terminal");
        draw(&mut view, &mut app, &mut terminal);

        let text = screen_text(&terminal);
        assert!(text.contains("The Expanding Universe"));
        for label in app.registry.iter().map(|section| section.label.clone()) {
            assert!(text.contains(&label), "sidebar is missing {label}");
        }
        assert_eq!(app.sidebar.per_item_areas.len(), app.registry.len());
    }

    #[test]
    fn digit_shortcut_moves_the_highlight_immediately() {
        let mut app = app(120, 40);
        let mut view = MainView::new();
        press(&mut view, &mut app, KeyCode::Char('4'));

        assert!(app.sync.is_active("reflection"));
    }

    #[test]
    fn narrow_screen_hides_sidebar_and_uses_the_popover() {
        let mut app = app(70, 30);
        let mut view = MainView::new();
        let mut terminal = Terminal::new(TestBackend::new(70, 30)).expect("terminal");
        assert!(!app.wide);

        let before = app.active_index().expect("active section");
        press(&mut view, &mut app, KeyCode::Char('m'));
        assert!(app.popover.is_open());
        assert_eq!(app.popover.cursor, before, "the menu opens on the active section");
        draw(&mut view, &mut app, &mut terminal);
        assert!(screen_text(&terminal).contains("Jump to section"));

        press(&mut view, &mut app, KeyCode::Down);
        press(&mut view, &mut app, KeyCode::Enter);
        assert!(!app.popover.is_open());
        assert_eq!(app.active_index(), Some(before + 1));
    }

    #[test]
    fn tab_moves_focus_to_the_sidebar_and_enter_navigates() {
        // Short enough that only the introduction is past the threshold at the top.
        let mut app = app(120, 24);
        let mut view = MainView::new();
        assert!(!app.sidebar_has_focus());

        press(&mut view, &mut app, KeyCode::Tab);
        assert!(app.sidebar_has_focus());

        press(&mut view, &mut app, KeyCode::Char('j'));
        press(&mut view, &mut app, KeyCode::Char('j'));
        assert!(app.sync.is_active("intro"), "moving the cursor does not navigate");
        assert_eq!(app.sidebar.cursor, 2);
        press(&mut view, &mut app, KeyCode::Enter);
        assert!(app.sync.is_active("quran"));
    }

    #[test]
    fn clicking_a_sidebar_entry_navigates() {
        let mut app = app(120, 24);
        let mut view = MainView::new();
        let mut terminal = Terminal::new(TestBackend::new(120, 24)).expect("terminal");
        draw(&mut view, &mut app, &mut terminal);
        assert!(app.sync.is_active("intro"));

        let row = app.sidebar.per_item_areas[1];
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: row.x + 2,
            row: row.y,
            modifiers: KeyModifiers::NONE,
        };
        for effect in view.handle_mouse_events(&mut app, click) {
            app.apply_effect(effect);
        }
        assert!(app.sync.is_active("science"));
        assert!(app.sidebar_has_focus());
    }

    #[test]
    fn quit_keys_request_exit() {
        let mut app = app(120, 40);
        let mut view = MainView::new();
        press(&mut view, &mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
