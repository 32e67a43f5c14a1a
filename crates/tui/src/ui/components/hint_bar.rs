use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::App;
use crate::ui::components::Component;
use crate::ui::theme::helpers as th;

/// Bottom line: hints of the focused view, global keys, and the status message.
#[derive(Debug, Default)]
pub struct HintBarComponent {
    pub focused_hints: Vec<Span<'static>>,
}

impl Component for HintBarComponent {
    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let mut spans = std::mem::take(&mut self.focused_hints);
        let mut global = vec![(" Tab", " Focus "), (" 1-9", " Jump "), (" m", " Menu "), (" t", " Theme "), (" r", " Reload ")];
        if !app.wide {
            global.remove(0);
        }
        global.push((" q", " Quit "));
        spans.extend(th::build_hint_spans(theme, &global));

        if let Some(status) = &app.status {
            spans.push(Span::styled(format!("  {status}"), theme.status_warning()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)).style(th::panel_style(theme)), area);
    }
}
