//! # Lectern reader
//!
//! Terminal front end for scroll-synchronized articles. The article is laid
//! out into rows, a [`viewport::TerminalViewport`] plays the host for the
//! scroll-sync controller, and two navigation views (a sidebar on wide
//! terminals, a popover menu everywhere) highlight the active section and
//! jump to sections on demand.

mod app;
mod ui;
pub mod viewport;

use std::sync::Arc;

use anyhow::Result;
use lectern_types::Article;
use lectern_util::{ReaderConfig, UserPreferences};

pub use app::ArticleSource;
pub use ui::theme::{
    THEME_ENV, ThemeDefinition,
    catalog::{all as themes, resolve as resolve_theme},
};

/// Everything needed to open the reader.
pub struct ReaderOptions {
    pub article: Article,
    pub source: ArticleSource,
    pub config: ReaderConfig,
    /// Theme name from the command line; wins over env and saved preference.
    pub theme: Option<String>,
    pub preferences: Arc<UserPreferences>,
}

/// Run the reader until the user quits.
///
/// Takes over the terminal (raw mode, alternate screen, mouse capture) and
/// restores it on exit.
pub async fn run(options: ReaderOptions) -> Result<()> {
    let preferred = options.preferences.preferred_theme();
    let loaded = ui::theme::load(options.theme.as_deref(), preferred.as_deref());
    tracing::debug!(theme = loaded.definition.id, "theme selected");

    let ctx = app::SharedCtx::new(loaded, options.preferences);
    let size = crossterm::terminal::size().unwrap_or((80, 24));
    let app = app::App::new(options.article, options.source, options.config, ctx, size);
    ui::runtime::run_app(app).await
}
