mod article_component;
mod state;

pub use article_component::ArticleComponent;
pub use state::ArticleViewState;
