//! UI components: sidebar, popover menu, article body, header and hint bar.

pub mod article;
pub mod component;
pub mod header;
pub mod hint_bar;
pub mod popover;
pub mod sidebar;

pub use article::ArticleComponent;
pub use component::*;
pub use header::HeaderComponent;
pub use hint_bar::HintBarComponent;
pub use popover::PopoverComponent;
pub use sidebar::SidebarComponent;
