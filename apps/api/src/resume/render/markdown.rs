use pulldown_cmark::{html, CowStr, Event, Options, Parser};

use crate::resume::document::{Block, ContactItem};
use crate::resume::entry::Entry;

/// Renders blocks as markdown, one blank line between blocks.
pub fn render(blocks: &[Block<'_>]) -> String {
    blocks
        .iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_block(block: &Block<'_>) -> String {
    match block {
        Block::Contact { name, items } => {
            let mut parts = Vec::new();
            if !name.is_empty() {
                parts.push(format!("# {name}"));
            }
            if !items.is_empty() {
                parts.push(
                    items
                        .iter()
                        .map(contact_item)
                        .collect::<Vec<_>>()
                        .join(" | "),
                );
            }
            parts.join("\n\n")
        }
        Block::Summary(text) => format!("## Professional Summary\n\n{text}"),
        Block::Skills { text, breakdown } => {
            let mut md = String::from("## Skills");
            if let Some(text) = text {
                md.push_str(&format!("\n\n{text}"));
            }
            if !breakdown.is_empty() {
                md.push_str("\n\n");
                let lines: Vec<String> = breakdown
                    .iter()
                    .map(|(label, value)| format!("- **{label}:** {value}"))
                    .collect();
                md.push_str(&lines.join("\n"));
            }
            md
        }
        Block::Section { kind, entries } => {
            let body: Vec<String> = entries.iter().map(render_entry).collect();
            format!("## {}\n\n{}", kind.heading(), body.join("\n\n"))
        }
    }
}

fn contact_item(item: &ContactItem<'_>) -> String {
    match item.link_label() {
        Some(label) => format!("[{label}]({})", item.value()),
        None => item.value().to_string(),
    }
}

fn render_entry(entry: &Entry) -> String {
    let period = &entry.period().label;
    if period.is_empty() {
        format!("### {}\n\n{}", entry.heading(), entry.description())
    } else {
        format!("### {}\n{}\n\n{}", entry.heading(), period, entry.description())
    }
}

/// CommonMark preview of a saved (possibly hand-edited) markdown resume.
/// Raw HTML in the source is shown as text, never passed through.
pub fn to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(CowStr::from(raw.to_string())),
        other => other,
    });
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::document::fixtures::{empty, entry, sample};
    use crate::resume::document::assemble;
    use crate::resume::entry::SectionKind;

    #[test]
    fn test_entry_markdown_shape() {
        let mut doc = empty("");
        doc.experience = vec![entry(
            SectionKind::Experience,
            "Engineer",
            "Acme",
            "Built X\nScaled Y",
        )];
        let md = render(&assemble(&doc));
        assert_eq!(
            md,
            "## Work Experience\n\n### Engineer @ Acme\nJun 2021 - Present\n\nBuilt X\nScaled Y"
        );
    }

    #[test]
    fn test_full_document_markdown() {
        let md = render(&assemble(&sample()));
        assert!(md.starts_with(
            "# Ada Lovelace\n\nada@example.com | [LinkedIn](https://linkedin.com/in/ada)\n\n"
        ));
        assert!(md.contains("## Professional Summary\n\nSystems engineer."));
        assert!(md.contains("## Skills\n\nRust, Postgres"));
        assert!(md.contains("### BSc Mathematics @ University of London"));
        let experience = md.find("## Work Experience").unwrap();
        let education = md.find("## Education").unwrap();
        assert!(experience < education);
    }

    #[test]
    fn test_no_headers_for_empty_skills_and_projects() {
        let mut doc = sample();
        doc.skills.clear();
        doc.projects.clear();
        let md = render(&assemble(&doc));
        assert!(!md.contains("Skills"));
        assert!(!md.contains("Projects"));
    }

    #[test]
    fn test_skills_breakdown_lines() {
        let mut doc = empty("");
        doc.skills_summary.languages = "Rust".into();
        doc.skills_summary.platforms = "AWS".into();
        assert_eq!(
            render(&assemble(&doc)),
            "## Skills\n\n- **Languages:** Rust\n- **Platforms:** AWS"
        );
    }

    #[test]
    fn test_multiple_entries_separated_by_blank_line() {
        let mut doc = empty("");
        doc.projects = vec![
            entry(SectionKind::Project, "coach", "Rust", "API"),
            entry(SectionKind::Project, "lens", "Go", "CLI"),
        ];
        let md = render(&assemble(&doc));
        assert!(md.contains("API\n\n### lens @ Go"));
    }

    #[test]
    fn test_preview_html_escapes_raw_html() {
        let html = to_html("## Skills\n\n<script>alert(1)</script>");
        assert!(html.contains("<h2>Skills</h2>"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
