//! Styled HTML fragments mirroring the printable resume template.

use crate::resume::document::{Block, ContactItem};
use crate::resume::entry::Entry;

/// Id of the printable root container.
pub const CONTAINER_ID: &str = "resume-pdf";

pub fn render(blocks: &[Block<'_>]) -> String {
    let mut out = format!("<div id=\"{CONTAINER_ID}\" class=\"resume\">");
    for block in blocks {
        render_block(block, &mut out);
    }
    out.push_str("</div>");
    out
}

fn render_block(block: &Block<'_>, out: &mut String) {
    match block {
        Block::Contact { name, items } => {
            out.push_str("<header class=\"resume-header\">");
            if !name.is_empty() {
                out.push_str(&format!("<h1 class=\"resume-name\">{}</h1>", escape(name)));
            }
            if !items.is_empty() {
                let parts: Vec<String> = items.iter().map(contact_item).collect();
                out.push_str(&format!(
                    "<p class=\"resume-contact\">{}</p>",
                    parts.join(" | ")
                ));
            }
            out.push_str("</header>");
        }
        Block::Summary(text) => {
            section_open("PROFESSIONAL SUMMARY", out);
            out.push_str(&format!("<p class=\"summary\">{}</p>", escape(text)));
            out.push_str("</section>");
        }
        Block::Skills { text, breakdown } => {
            section_open("SKILLS SUMMARY", out);
            if let Some(text) = text {
                out.push_str(&format!("<p class=\"skills\">{}</p>", escape(text)));
            }
            if !breakdown.is_empty() {
                out.push_str("<dl class=\"skills-breakdown\">");
                for (label, value) in breakdown {
                    out.push_str(&format!("<dt>{label}:</dt><dd>{}</dd>", escape(value)));
                }
                out.push_str("</dl>");
            }
            out.push_str("</section>");
        }
        Block::Section { kind, entries } => {
            section_open(&kind.heading().to_uppercase(), out);
            for entry in entries.iter() {
                render_entry(entry, out);
            }
            out.push_str("</section>");
        }
    }
}

fn section_open(title: &str, out: &mut String) {
    out.push_str(&format!(
        "<section class=\"resume-section\"><h2 class=\"section-title\">{title}</h2>"
    ));
}

fn contact_item(item: &ContactItem<'_>) -> String {
    match item.link_label() {
        Some(label) => format!("<a href=\"{}\">{label}</a>", escape(item.value())),
        None => escape(item.value()),
    }
}

fn render_entry(entry: &Entry, out: &mut String) {
    // The bold head line names the place; the sub line names the role.
    let (head, sub, link_label) = match entry {
        Entry::Experience(e) => (&e.company, &e.title, "LINK"),
        Entry::Education(e) => (&e.institution, &e.degree, "LINK"),
        Entry::Project(e) => (&e.name, &e.stack, "LINK"),
        Entry::Certificate(e) => (&e.title, &e.issuer, "CERTIFICATE"),
    };

    out.push_str("<article class=\"entry\"><div class=\"entry-head\">");
    out.push_str(&format!("<span class=\"entry-title\">{}</span>", escape(head)));
    if let Some(link) = entry.link() {
        out.push_str(&format!(
            " | <a class=\"entry-link\" href=\"{}\">{link_label}</a>",
            escape(link)
        ));
    }
    let period = &entry.period().label;
    if !period.is_empty() {
        out.push_str(&format!(
            "<span class=\"entry-period\">{}</span>",
            escape(period)
        ));
    }
    out.push_str("</div>");
    out.push_str(&format!("<div class=\"entry-subtitle\">{}</div>", escape(sub)));

    let bullets: Vec<&str> = entry.bullets().collect();
    if !bullets.is_empty() {
        out.push_str("<ul class=\"entry-bullets\">");
        for bullet in bullets {
            out.push_str(&format!("<li>{}</li>", escape(bullet.trim())));
        }
        out.push_str("</ul>");
    }
    out.push_str("</article>");
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::document::assemble;
    use crate::resume::document::fixtures::{empty, entry, sample};
    use crate::resume::entry::{EntryDraft, SectionKind};

    #[test]
    fn test_description_lines_become_list_items() {
        let mut doc = empty("");
        doc.experience = vec![entry(
            SectionKind::Experience,
            "Lead",
            "Acme",
            "Led team\nShipped feature\n",
        )];
        let html = render(&assemble(&doc));
        assert_eq!(html.matches("<li>").count(), 2);
        assert!(html.contains("<li>Led team</li><li>Shipped feature</li>"));
    }

    #[test]
    fn test_example_entry_fragments() {
        let mut doc = empty("");
        doc.experience = vec![entry(
            SectionKind::Experience,
            "Engineer",
            "Acme",
            "Built X\nScaled Y",
        )];
        let html = render(&assemble(&doc));
        assert!(html.starts_with("<div id=\"resume-pdf\" class=\"resume\">"));
        assert!(html.contains("<h2 class=\"section-title\">WORK EXPERIENCE</h2>"));
        assert!(html.contains("<span class=\"entry-title\">Acme</span>"));
        assert!(html.contains("<div class=\"entry-subtitle\">Engineer</div>"));
        assert!(html.contains("<span class=\"entry-period\">Jun 2021 - Present</span>"));
        assert!(html.contains("<li>Built X</li><li>Scaled Y</li>"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut doc = empty("<b>Ada</b>");
        doc.summary = "R&D \"lead\"".into();
        let html = render(&assemble(&doc));
        assert!(html.contains("&lt;b&gt;Ada&lt;/b&gt;"));
        assert!(html.contains("R&amp;D &quot;lead&quot;"));
    }

    #[test]
    fn test_certificate_link_label() {
        let cert = EntryDraft {
            title: "CKA".into(),
            organization: "CNCF".into(),
            current: true,
            description: "Kubernetes administration".into(),
            link: "https://cncf.io/cert/123".into(),
            ..EntryDraft::default()
        }
        .accept(SectionKind::Certificate)
        .unwrap();
        let mut doc = empty("");
        doc.certificates = vec![cert];
        let html = render(&assemble(&doc));
        assert!(html.contains("href=\"https://cncf.io/cert/123\">CERTIFICATE</a>"));
    }

    #[test]
    fn test_empty_sections_have_no_headers() {
        let mut doc = sample();
        doc.skills.clear();
        let html = render(&assemble(&doc));
        assert!(!html.contains("SKILLS SUMMARY"));
        assert!(!html.contains("PROJECTS"));
        assert!(html.contains("EDUCATION"));
    }
}
