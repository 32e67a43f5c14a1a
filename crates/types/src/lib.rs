//! Shared data types for Lectern: section descriptors, the section registry,
//! and the article content model.

pub mod article;
pub mod section;
pub mod validation;

pub use article::{Article, ArticleError, ArticleSection, Block};
pub use section::{DisplayMeta, SectionDescriptor, SectionId, SectionRegistry};
pub use validation::{RegistryIssue, validate_registry};
