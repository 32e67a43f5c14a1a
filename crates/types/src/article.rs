//! Article content model and loaders.
//!
//! Articles are static content: a title, an optional subtitle and an ordered
//! list of sections, each holding paragraphs and quoted excerpts. The section
//! list doubles as the navigation registry.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::section::{SectionDescriptor, SectionRegistry};

const DEMO_ARTICLE: &str = include_str!("../data/demo_article.yaml");

/// Errors raised while loading an article file.
#[derive(Debug, Error)]
pub enum ArticleError {
    #[error("failed to read article '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid YAML article: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON article: {0}")]
    Json(#[from] serde_json::Error),
    #[error("article '{0}' has no sections")]
    NoSections(String),
}

/// A block of content inside a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Paragraph {
        text: String,
    },
    Quote {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        citation: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleSection {
    #[serde(flatten)]
    pub descriptor: SectionDescriptor,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub sections: Vec<ArticleSection>,
}

impl Article {
    /// The article bundled with the binary.
    pub fn demo() -> Result<Self, ArticleError> {
        Self::from_yaml_str(DEMO_ARTICLE)
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, ArticleError> {
        let article: Article = serde_yaml::from_str(source)?;
        article.ensure_sections()
    }

    pub fn from_json_str(source: &str) -> Result<Self, ArticleError> {
        let article: Article = serde_json::from_str(source)?;
        article.ensure_sections()
    }

    /// Load an article, choosing the parser from the file extension.
    ///
    /// Unknown extensions are parsed as YAML, which also accepts JSON.
    pub fn load_from_path(path: &Path) -> Result<Self, ArticleError> {
        let source = fs::read_to_string(path).map_err(|source| ArticleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Self::from_json_str(&source),
            _ => Self::from_yaml_str(&source),
        }
    }

    /// Build a fresh registry from the section list.
    ///
    /// Every call yields a new registry identity; callers that need stable
    /// identity should build once and keep the handle.
    pub fn registry(&self) -> SectionRegistry {
        self.sections.iter().map(|section| section.descriptor.clone()).collect()
    }

    pub fn section(&self, id: &str) -> Option<&ArticleSection> {
        self.sections.iter().find(|section| section.descriptor.id == id)
    }

    fn ensure_sections(self) -> Result<Self, ArticleError> {
        if self.sections.is_empty() {
            return Err(ArticleError::NoSections(self.title));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_article_parses_with_expected_sections() {
        let article = Article::demo().expect("demo article");
        let ids: Vec<_> = article.registry().ids().map(|id| id.to_string()).collect();
        assert_eq!(ids, vec!["intro", "science", "quran", "reflection"]);
    }

    #[test]
    fn json_and_yaml_share_the_same_shape() {
        let json = r#"{
            "title": "Tides",
            "sections": [
                { "id": "intro", "label": "Intro", "blocks": [ { "kind": "paragraph", "text": "Water moves." } ] },
                { "id": "source", "label": "Source", "display": { "icon": "❝" },
                  "blocks": [ { "kind": "quote", "text": "The moon pulls.", "citation": "Notes, 3" } ] }
            ]
        }"#;
        let article = Article::from_json_str(json).expect("json article");
        assert_eq!(article.sections.len(), 2);
        assert_eq!(article.sections[1].descriptor.display_meta.icon.as_deref(), Some("❝"));
        assert_eq!(
            article.sections[1].blocks[0],
            Block::Quote {
                text: "The moon pulls.".into(),
                citation: Some("Notes, 3".into())
            }
        );
    }

    #[test]
    fn article_without_sections_is_rejected() {
        let error = Article::from_yaml_str("title: Empty\nsections: []\n").expect_err("must fail");
        assert!(matches!(error, ArticleError::NoSections(title) if title == "Empty"));
    }

    #[test]
    fn registry_calls_produce_new_identities() {
        let article = Article::demo().expect("demo article");
        assert!(!article.registry().same_identity(&article.registry()));
    }
}
