use genpdf::elements::{Break, Paragraph, UnorderedList};
use genpdf::style::Style;
use genpdf::{fonts, Element, Margins, PaperSize, SimplePageDecorator};
use tracing::debug;

use super::layout::{layout, Line, PdfBlock};
use super::{ExportError, ExportOptions};

/// Typesets rendered markdown as an A4 PDF.
///
/// Blocking: fonts are read from disk and the whole document is laid out in
/// memory. Call it from `spawn_blocking`.
pub fn write_pdf(markdown: &str, options: &ExportOptions) -> Result<Vec<u8>, ExportError> {
    let blocks = layout(markdown);
    if blocks.is_empty() {
        return Err(ExportError::EmptyContent);
    }

    let family = fonts::from_files(&options.font_dir, &options.font_family, None)
        .map_err(|e| ExportError::FontLoad(format!("{}: {e}", options.font_family)))?;

    let mut doc = genpdf::Document::new(family);
    doc.set_title(options.title.clone());
    doc.set_paper_size(PaperSize::A4);
    doc.set_font_size(options.font_size);

    let (top, right, bottom, left) = options.margins_mm;
    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(Margins::trbl(top, right, bottom, left));
    doc.set_page_decorator(decorator);

    let mut list: Option<UnorderedList> = None;
    for block in blocks {
        if !matches!(block, PdfBlock::Bullet(_)) {
            if let Some(done) = list.take() {
                doc.push(done);
            }
        }
        match block {
            PdfBlock::Heading { level, text } => {
                let size = heading_size(level, options.font_size);
                doc.push(Break::new(0.5));
                doc.push(Paragraph::new(text).styled(Style::new().bold().with_font_size(size)));
            }
            PdfBlock::Paragraph(lines) => {
                for line in &lines {
                    doc.push(paragraph(line));
                }
                doc.push(Break::new(0.3));
            }
            PdfBlock::Bullet(line) => {
                list.get_or_insert_with(UnorderedList::new).push(paragraph(&line));
            }
            PdfBlock::Rule => doc.push(Break::new(1.0)),
        }
    }
    if let Some(done) = list.take() {
        doc.push(done);
    }

    let mut bytes = Vec::new();
    doc.render(&mut bytes)
        .map_err(|e| ExportError::Render(e.to_string()))?;
    debug!("rendered PDF ({} bytes)", bytes.len());
    Ok(bytes)
}

fn heading_size(level: u8, base: u8) -> u8 {
    match level {
        1 => base + 7,
        2 => base + 3,
        _ => base + 1,
    }
}

fn paragraph(line: &Line) -> Paragraph {
    let mut p = Paragraph::default();
    for span in line {
        let mut style = Style::new();
        if span.bold {
            style = style.bold();
        }
        if span.italic {
            style = style.italic();
        }
        p.push_styled(span.text.clone(), style);
    }
    p
}
