//! Markdown to printable blocks.
//!
//! The PDF engine has no markdown support, so the rendered resume is walked
//! once with pulldown-cmark and flattened into headings, paragraphs, bullets
//! and rules. Soft line breaks are kept: each description line stays its own
//! printed line.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
}

pub type Line = Vec<Span>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfBlock {
    Heading { level: u8, text: String },
    Paragraph(Vec<Line>),
    Bullet(Line),
    Rule,
}

#[derive(Default)]
struct Inline {
    lines: Vec<Line>,
    bold: usize,
    italic: usize,
}

impl Inline {
    fn push(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.lines.is_empty() {
            self.lines.push(Vec::new());
        }
        let span = Span {
            text: text.to_string(),
            bold: self.bold > 0,
            italic: self.italic > 0,
        };
        if let Some(line) = self.lines.last_mut() {
            line.push(span);
        }
    }

    fn break_line(&mut self) {
        self.lines.push(Vec::new());
    }

    fn take_lines(&mut self) -> Vec<Line> {
        std::mem::take(&mut self.lines)
            .into_iter()
            .filter(|line| line.iter().any(|s| !s.text.trim().is_empty()))
            .collect()
    }

    /// All lines folded into one, separated by spaces.
    fn take_joined(&mut self) -> Line {
        let mut joined: Line = Vec::new();
        for line in self.take_lines() {
            if !joined.is_empty() {
                joined.push(Span {
                    text: " ".to_string(),
                    bold: false,
                    italic: false,
                });
            }
            joined.extend(line);
        }
        joined
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

pub fn layout(markdown: &str) -> Vec<PdfBlock> {
    let mut blocks = Vec::new();
    let mut inline = Inline::default();
    let mut links: Vec<String> = Vec::new();
    let mut item_depth = 0usize;

    for event in Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH) {
        match event {
            Event::Start(Tag::Heading { .. }) => {
                inline.take_lines();
            }
            Event::End(TagEnd::Heading(level)) => {
                let text: String = inline
                    .take_joined()
                    .into_iter()
                    .map(|span| span.text)
                    .collect();
                if !text.trim().is_empty() {
                    blocks.push(PdfBlock::Heading {
                        level: heading_level(level),
                        text: text.trim().to_string(),
                    });
                }
            }
            Event::End(TagEnd::Paragraph) => {
                if item_depth > 0 {
                    inline.break_line();
                } else {
                    let lines = inline.take_lines();
                    if !lines.is_empty() {
                        blocks.push(PdfBlock::Paragraph(lines));
                    }
                }
            }
            Event::Start(Tag::Item) => {
                // A nested list flushes the text of its parent item first.
                let line = inline.take_joined();
                if !line.is_empty() {
                    blocks.push(PdfBlock::Bullet(line));
                }
                item_depth += 1;
            }
            Event::End(TagEnd::Item) => {
                item_depth = item_depth.saturating_sub(1);
                let line = inline.take_joined();
                if !line.is_empty() {
                    blocks.push(PdfBlock::Bullet(line));
                }
            }
            Event::Start(Tag::Strong) => inline.bold += 1,
            Event::End(TagEnd::Strong) => inline.bold = inline.bold.saturating_sub(1),
            Event::Start(Tag::Emphasis) => inline.italic += 1,
            Event::End(TagEnd::Emphasis) => inline.italic = inline.italic.saturating_sub(1),
            Event::Start(Tag::Link { dest_url, .. }) => links.push(dest_url.to_string()),
            Event::End(TagEnd::Link) => {
                if let Some(url) = links.pop() {
                    inline.push(&format!(" ({url})"));
                }
            }
            Event::Text(text) | Event::Code(text) => inline.push(&text),
            Event::SoftBreak | Event::HardBreak => inline.break_line(),
            Event::Rule => {
                let lines = inline.take_lines();
                if !lines.is_empty() {
                    blocks.push(PdfBlock::Paragraph(lines));
                }
                blocks.push(PdfBlock::Rule);
            }
            Event::Html(_) | Event::InlineHtml(_) => {}
            _ => {}
        }
    }

    let rest = inline.take_lines();
    if !rest.is_empty() {
        blocks.push(PdfBlock::Paragraph(rest));
    }
    blocks
}
