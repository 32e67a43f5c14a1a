//! Application state for the Lectern reader.
//!
//! [`App`] owns the loaded article, its section registry, the scroll-sync
//! controller (which in turn owns the terminal viewport) and the state of
//! every view. Components never mutate the controller directly; they return
//! [`Effect`]s that [`App::apply_effect`] executes.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use lectern_sync::{Navigation, ScrollSyncController};
use lectern_types::{Article, SectionId, SectionRegistry, validate_registry};
use lectern_util::{ReaderConfig, UserPreferences};
use rat_focus::{Focus, FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use tracing::{debug, info, warn};

use crate::ui::components::article::ArticleViewState;
use crate::ui::components::popover::PopoverState;
use crate::ui::components::sidebar::SidebarState;
use crate::ui::layout::ReaderLayout;
use crate::ui::theme::{self, ColorCapability, LoadedTheme, Theme, ThemeDefinition, catalog};
use crate::viewport::{DocumentLayout, TerminalViewport};

/// Side effects requested by components.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    NavigateTo(SectionId),
    ScrollLines(i32),
    ScrollPages(i32),
    ScrollToTop,
    ScrollToBottom,
    TogglePopover,
    ClosePopover,
    CycleTheme,
    ReloadArticle,
    Quit,
}

/// Messages delivered by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    Tick,
    Resize(u16, u16),
}

/// Cross-cutting context shared by every component.
pub struct SharedCtx {
    pub theme: Box<dyn Theme>,
    pub theme_definition: &'static ThemeDefinition,
    pub color_capability: ColorCapability,
    pub preferences: Arc<UserPreferences>,
}

impl SharedCtx {
    pub fn new(loaded: LoadedTheme, preferences: Arc<UserPreferences>) -> Self {
        Self {
            theme: loaded.theme,
            theme_definition: loaded.definition,
            color_capability: theme::detect_color_capability(),
            preferences,
        }
    }
}

/// Where the article came from, so it can be read again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleSource {
    Demo,
    File(PathBuf),
}

impl ArticleSource {
    pub fn load(&self) -> Result<Article> {
        match self {
            Self::Demo => Article::demo().context("failed to parse the bundled article"),
            Self::File(path) => Article::load_from_path(path).with_context(|| format!("failed to load {}", path.display())),
        }
    }
}

pub struct App {
    pub ctx: SharedCtx,
    pub config: ReaderConfig,
    pub article: Article,
    pub source: ArticleSource,
    pub registry: SectionRegistry,
    pub sync: ScrollSyncController<TerminalViewport>,
    pub sidebar: SidebarState,
    pub popover: PopoverState,
    pub article_view: ArticleViewState,
    pub focus: Focus,
    root_focus: FocusFlag,
    /// Whether the terminal is wide enough for the sidebar.
    pub wide: bool,
    pub area: Rect,
    /// One-line status shown in the hint bar.
    pub status: Option<String>,
    pub should_quit: bool,
    generation: u32,
}

impl App {
    pub fn new(article: Article, source: ArticleSource, config: ReaderConfig, ctx: SharedCtx, size: (u16, u16)) -> Self {
        let area = Rect::new(0, 0, size.0, size.1);
        let wide = size.0 >= config.sidebar_min_width;
        let text_area = ReaderLayout::compute(area, wide).article_text;

        let generation = 1;
        let layout = DocumentLayout::build(&article, text_area.width, generation);
        let mut viewport = TerminalViewport::new(layout, config.scroll_margin, config.smooth_scroll);
        viewport.set_viewport_height(text_area.height);
        let sync = ScrollSyncController::with_config(viewport, config.observer)
            .with_policy(config.policy.build())
            .with_scroll_behavior(config.scroll_behavior());

        let registry = article.registry();
        let mut app = Self {
            ctx,
            sidebar: SidebarState::new(&registry),
            popover: PopoverState::default(),
            article_view: ArticleViewState::default(),
            focus: Focus::default(),
            root_focus: FocusFlag::named("lectern"),
            config,
            article,
            source,
            registry,
            sync,
            wide,
            area,
            status: None,
            should_quit: false,
            generation,
        };
        app.start_sync();
        app.rebuild_focus();
        app.focus.focus(&app.article_view);
        app
    }

    /// Start tracking the current registry and deliver the initial visibility report.
    fn start_sync(&mut self) {
        for issue in validate_registry(&self.registry) {
            warn!(%issue, "section registry issue");
        }
        let bindings = self.sync.host().layout().bindings();
        self.sync.start(&self.registry, &bindings);
        self.sync_visibility();
        info!(
            title = %self.article.title,
            sections = self.registry.len(),
            policy = self.config.policy.as_str(),
            "article opened"
        );
    }

    /// Feed the viewport's pending visibility changes to the controller.
    pub fn sync_visibility(&mut self) -> bool {
        let events = self.sync.host_mut().collect_visibility();
        if events.is_empty() {
            return false;
        }
        self.sync.on_visibility_change(&events)
    }

    pub fn active_id(&self) -> Option<&SectionId> {
        self.sync.active_id()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_id().and_then(|id| self.registry.position(id.as_str()))
    }

    pub fn is_animating(&self) -> bool {
        self.sync.host().is_animating()
    }

    pub fn rebuild_focus(&mut self) {
        let old = std::mem::take(&mut self.focus);
        self.focus = FocusBuilder::rebuild_for(&*self, Some(old));
        if self.focus.focused().is_none() {
            self.focus.focus(&self.article_view);
        }
    }

    pub fn sidebar_has_focus(&self) -> bool {
        self.wide && self.sidebar.focus.get()
    }

    /// Update for runtime messages. Returns `true` when a redraw is needed.
    pub fn update(&mut self, msg: &Msg) -> bool {
        match *msg {
            Msg::Tick => {
                let moved = self.sync.host_mut().tick(Instant::now());
                if moved {
                    self.sync_visibility();
                }
                moved
            }
            Msg::Resize(width, height) => {
                self.resize(width, height);
                true
            }
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.area = Rect::new(0, 0, width, height);
        let wide = width >= self.config.sidebar_min_width;
        if wide != self.wide {
            debug!(width, wide, "sidebar visibility changed");
            self.wide = wide;
            if !wide {
                self.focus.focus(&self.article_view);
            }
            self.rebuild_focus();
        }

        let text_area = ReaderLayout::compute(self.area, self.wide).article_text;
        let viewport = self.sync.host_mut();
        if viewport.layout().width() != text_area.width.max(1) {
            viewport.set_layout(DocumentLayout::build(&self.article, text_area.width, self.generation));
        }
        viewport.set_viewport_height(text_area.height);
        self.sync_visibility();
    }

    /// Execute one effect. Returns `true` when a redraw is needed.
    pub fn apply_effect(&mut self, effect: Effect) -> bool {
        match effect {
            Effect::NavigateTo(id) => {
                let outcome = self.sync.navigate_to(id.clone());
                if outcome == Navigation::Unresolved {
                    self.status = Some(format!("No section '{id}' in this article"));
                }
                self.sync_visibility();
            }
            Effect::ScrollLines(delta) => {
                if self.sync.host_mut().scroll_lines(delta) {
                    self.sync_visibility();
                }
            }
            Effect::ScrollPages(delta) => {
                if self.sync.host_mut().scroll_pages(delta) {
                    self.sync_visibility();
                }
            }
            Effect::ScrollToTop => {
                if self.sync.host_mut().scroll_to_top() {
                    self.sync_visibility();
                }
            }
            Effect::ScrollToBottom => {
                if self.sync.host_mut().scroll_to_bottom() {
                    self.sync_visibility();
                }
            }
            Effect::TogglePopover => {
                if self.popover.is_open() {
                    self.popover.close();
                } else {
                    self.popover.open(self.active_index().unwrap_or(0));
                }
            }
            Effect::ClosePopover => self.popover.close(),
            Effect::CycleTheme => self.cycle_theme(),
            Effect::ReloadArticle => self.reload_article(),
            Effect::Quit => self.should_quit = true,
        }
        true
    }

    fn cycle_theme(&mut self) {
        if self.ctx.color_capability == ColorCapability::Ansi256 {
            self.status = Some("Theme is fixed on ANSI-only terminals".into());
            return;
        }
        let next = catalog::next_after(self.ctx.theme_definition.id);
        self.ctx.theme = next.build();
        self.ctx.theme_definition = next;
        self.status = Some(format!("Theme: {}", next.label));
        if let Err(error) = self.ctx.preferences.set_preferred_theme(Some(next.id.to_string())) {
            warn!(%error, "failed to save the theme preference");
        }
    }

    /// Read the article again and rebuild tracking against the new sections.
    pub fn reload_article(&mut self) {
        let article = match self.source.load() {
            Ok(article) => article,
            Err(error) => {
                warn!("article reload failed: {error:#}");
                self.status = Some(format!("Reload failed: {error:#}"));
                return;
            }
        };
        self.replace_article(article);
        self.status = Some(format!("Reloaded {} sections", self.registry.len()));
    }

    /// Swap in a different article. The new registry has a fresh identity, so
    /// the controller releases every element of the old one before observing
    /// the new sections.
    pub fn replace_article(&mut self, article: Article) {
        self.generation = self.generation.wrapping_add(1);
        let width = ReaderLayout::compute(self.area, self.wide).article_text.width;
        let layout = DocumentLayout::build(&article, width, self.generation);
        self.sync.host_mut().set_layout(layout);

        self.article = article;
        self.registry = self.article.registry();
        self.sidebar = SidebarState::new(&self.registry);
        self.popover.close();
        self.start_sync();
        self.rebuild_focus();
    }

    /// Section id behind the 1-based shortcut digit.
    pub fn section_for_digit(&self, digit: u32) -> Option<SectionId> {
        let index = usize::try_from(digit).ok()?.checked_sub(1)?;
        self.registry.sections().get(index).map(|section| section.id.clone())
    }
}

impl HasFocus for App {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        if self.wide {
            builder.widget(&self.sidebar);
        }
        builder.widget(&self.article_view);
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.root_focus.clone()
    }

    fn area(&self) -> Rect {
        self.area
    }
}
