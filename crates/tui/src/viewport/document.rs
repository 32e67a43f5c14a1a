//! Row layout of an article for a given terminal width.
//!
//! Sections are stacked top to bottom. Each one contributes a heading row, a
//! blank row, its wrapped blocks separated by blank rows, and a trailing
//! blank row. The layout remembers where every section starts and how many
//! rows it spans so the viewport can measure visibility and scroll targets.

use lectern_sync::BindingTable;
use lectern_types::{Article, Block, SectionId};
use tracing::warn;

const QUOTE_INDENT: u16 = 2;

/// Stable handle to a laid-out section.
///
/// The generation changes whenever a different article is loaded, so a
/// handle from an earlier article never resolves against a newer layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockHandle {
    pub generation: u32,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Heading,
    Body,
    Quote,
    Citation,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocLine {
    pub kind: LineKind,
    pub text: String,
    /// Index of the section this row belongs to.
    pub section: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSpan {
    pub id: SectionId,
    pub top: u16,
    pub height: u16,
}

impl SectionSpan {
    pub fn bottom(&self) -> u16 {
        self.top.saturating_add(self.height)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentLayout {
    generation: u32,
    width: u16,
    lines: Vec<DocLine>,
    spans: Vec<SectionSpan>,
}

impl DocumentLayout {
    pub fn build(article: &Article, width: u16, generation: u32) -> Self {
        let width = width.max(1);
        let mut lines = Vec::new();
        let mut spans = Vec::with_capacity(article.sections.len());

        for (index, section) in article.sections.iter().enumerate() {
            let top = row_count(lines.len());
            let descriptor = &section.descriptor;
            let heading = match descriptor.display_meta.icon.as_deref() {
                Some(icon) => format!("{icon} {}", descriptor.label),
                None => descriptor.label.clone(),
            };
            lines.push(DocLine::new(LineKind::Heading, heading, index));
            lines.push(DocLine::blank(index));

            for (position, block) in section.blocks.iter().enumerate() {
                if position > 0 {
                    lines.push(DocLine::blank(index));
                }
                push_block(&mut lines, block, width, index);
            }
            lines.push(DocLine::blank(index));

            spans.push(SectionSpan {
                id: descriptor.id.clone(),
                top,
                height: row_count(lines.len()) - top,
            });
        }

        let max_rows = usize::from(u16::MAX);
        if lines.len() > max_rows {
            let unreachable = spans.iter().filter(|span| span.height == 0).count();
            warn!(
                rows = lines.len(),
                kept = max_rows,
                unreachable_sections = unreachable,
                "article is too long to lay out; trailing rows are cut off"
            );
            lines.truncate(max_rows);
        }

        Self {
            generation,
            width,
            lines,
            spans,
        }
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    /// Total rows of content.
    pub fn height(&self) -> u16 {
        row_count(self.lines.len())
    }

    pub fn lines(&self) -> &[DocLine] {
        &self.lines
    }

    pub fn spans(&self) -> &[SectionSpan] {
        &self.spans
    }

    pub fn handle(&self, index: usize) -> BlockHandle {
        BlockHandle {
            generation: self.generation,
            index,
        }
    }

    /// Span for `handle`, or `None` when the handle belongs to another article.
    pub fn span(&self, handle: &BlockHandle) -> Option<&SectionSpan> {
        if handle.generation != self.generation {
            return None;
        }
        self.spans.get(handle.index)
    }

    /// Binds every section id to its handle, for `ScrollSyncController::start`.
    pub fn bindings(&self) -> BindingTable<BlockHandle> {
        self.spans
            .iter()
            .enumerate()
            .map(|(index, span)| (span.id.clone(), self.handle(index)))
            .collect()
    }

    /// Section whose rows contain `row`.
    pub fn section_at(&self, row: u16) -> Option<usize> {
        self.lines.get(usize::from(row)).map(|line| line.section)
    }
}

impl DocLine {
    fn new(kind: LineKind, text: impl Into<String>, section: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            section,
        }
    }

    fn blank(section: usize) -> Self {
        Self::new(LineKind::Blank, String::new(), section)
    }
}

fn push_block(lines: &mut Vec<DocLine>, block: &Block, width: u16, section: usize) {
    match block {
        Block::Paragraph { text } => {
            for row in textwrap::wrap(text, usize::from(width)) {
                lines.push(DocLine::new(LineKind::Body, row, section));
            }
        }
        Block::Quote { text, citation } => {
            let inner = usize::from(width.saturating_sub(QUOTE_INDENT).max(1));
            for row in textwrap::wrap(text, inner) {
                lines.push(DocLine::new(LineKind::Quote, row, section));
            }
            if let Some(citation) = citation {
                for row in textwrap::wrap(&format!("— {citation}"), inner) {
                    lines.push(DocLine::new(LineKind::Citation, row, section));
                }
            }
        }
    }
}

fn row_count(len: usize) -> u16 {
    u16::try_from(len).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_sync::ElementResolver;
    use lectern_types::{ArticleSection, SectionDescriptor};

    fn article() -> Article {
        Article {
            title: "Test".into(),
            subtitle: None,
            sections: vec![
                ArticleSection {
                    descriptor: SectionDescriptor::new("intro", "Introduction").with_icon("◆"),
                    blocks: vec![Block::Paragraph {
                        text: "one two three four five six".into(),
                    }],
                },
                ArticleSection {
                    descriptor: SectionDescriptor::new("quote", "Quote"),
                    blocks: vec![
                        Block::Paragraph { text: "short".into() },
                        Block::Quote {
                            text: "quoted words".into(),
                            citation: Some("Someone".into()),
                        },
                    ],
                },
            ],
        }
    }

    #[test]
    fn sections_are_stacked_without_gaps() {
        let layout = DocumentLayout::build(&article(), 10, 0);
        let spans = layout.spans();

        assert_eq!(spans[0].top, 0);
        assert_eq!(spans[1].top, spans[0].bottom());
        assert_eq!(spans[1].bottom(), layout.height());
        assert_eq!(layout.lines()[0].text, "◆ Introduction");
    }

    #[test]
    fn overlong_articles_are_cut_at_the_row_limit() {
        let long = Article {
            title: "Long".into(),
            subtitle: None,
            sections: vec![
                ArticleSection {
                    descriptor: SectionDescriptor::new("bulk", "Bulk"),
                    blocks: vec![Block::Paragraph {
                        text: vec!["x"; 70_000].join("\n"),
                    }],
                },
                ArticleSection {
                    descriptor: SectionDescriptor::new("tail", "Tail"),
                    blocks: vec![Block::Paragraph { text: "end".into() }],
                },
            ],
        };
        let layout = DocumentLayout::build(&long, 20, 0);

        assert_eq!(layout.height(), u16::MAX);
        assert_eq!(layout.lines().len(), usize::from(u16::MAX));
        assert_eq!(layout.spans()[0].height, u16::MAX);
        assert_eq!(layout.spans()[1].top, u16::MAX);
        assert_eq!(layout.spans()[1].height, 0);
    }

    #[test]
    fn paragraphs_wrap_to_width() {
        let layout = DocumentLayout::build(&article(), 10, 0);
        let body: Vec<_> = layout
            .lines()
            .iter()
            .filter(|line| line.kind == LineKind::Body && line.section == 0)
            .map(|line| line.text.as_str())
            .collect();
        assert_eq!(body, vec!["one two", "three four", "five six"]);
    }

    #[test]
    fn quotes_carry_their_citation() {
        let layout = DocumentLayout::build(&article(), 40, 0);
        let kinds: Vec<_> = layout.lines().iter().filter(|line| line.section == 1).map(|line| line.kind).collect();
        assert_eq!(
            kinds,
            vec![
                LineKind::Heading,
                LineKind::Blank,
                LineKind::Body,
                LineKind::Blank,
                LineKind::Quote,
                LineKind::Citation,
                LineKind::Blank,
            ]
        );
    }

    #[test]
    fn handles_from_other_generations_do_not_resolve() {
        let layout = DocumentLayout::build(&article(), 40, 3);
        assert!(layout.span(&BlockHandle { generation: 3, index: 1 }).is_some());
        assert!(layout.span(&BlockHandle { generation: 2, index: 1 }).is_none());

        let bindings = layout.bindings();
        assert_eq!(bindings.resolve(&SectionId::from("quote")), Some(layout.handle(1)));
    }
}
