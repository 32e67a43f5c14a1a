use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::App;
use crate::ui::components::Component;
use crate::ui::theme::helpers as th;

/// Article title, subtitle and a reading-progress readout.
#[derive(Debug, Default)]
pub struct HeaderComponent;

impl HeaderComponent {
    fn progress(app: &App) -> String {
        let metrics = app.sync.host().metrics();
        let max = metrics.max_offset();
        let percent = if max == 0 {
            100
        } else {
            u32::from(metrics.offset()) * 100 / u32::from(max)
        };
        let section = match (app.active_index(), app.registry.len()) {
            (Some(index), total) => format!("§ {}/{}", index + 1, total),
            (None, total) => format!("§ -/{total}"),
        };
        format!("{section}  {percent:>3}% ")
    }
}

impl Component for HeaderComponent {
    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        frame.render_widget(Paragraph::new("").style(th::panel_style(theme)), area);

        let progress = Self::progress(app);
        let progress_width = u16::try_from(progress.chars().count()).unwrap_or(0);
        let [left, right] = Layout::horizontal([Constraint::Min(0), Constraint::Length(progress_width)]).areas(area);

        let mut lines = vec![Line::from(Span::styled(format!(" {}", app.article.title), theme.accent_emphasis_style()))];
        if let Some(subtitle) = &app.article.subtitle {
            lines.push(Line::from(Span::styled(format!(" {subtitle}"), theme.text_muted_style())));
        }
        frame.render_widget(Paragraph::new(lines), left);
        frame.render_widget(Paragraph::new(Span::styled(progress, theme.text_secondary_style())), right);
    }
}
