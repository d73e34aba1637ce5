//! The assembled resume and its ordered, non-empty blocks.

use serde::Serialize;

use crate::resume::entry::{Entry, SectionKind};
use crate::resume::form::{ContactInfo, SkillsSummary};

/// A validated resume, owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub full_name: String,
    pub contact: ContactInfo,
    pub summary: String,
    pub skills: String,
    pub skills_summary: SkillsSummary,
    pub experience: Vec<Entry>,
    pub education: Vec<Entry>,
    pub projects: Vec<Entry>,
    pub certificates: Vec<Entry>,
}

impl Document {
    pub fn section(&self, kind: SectionKind) -> &[Entry] {
        match kind {
            SectionKind::Experience => &self.experience,
            SectionKind::Education => &self.education,
            SectionKind::Project => &self.projects,
            SectionKind::Certificate => &self.certificates,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactItem<'a> {
    Email(&'a str),
    Mobile(&'a str),
    LinkedIn(&'a str),
    GitHub(&'a str),
    Twitter(&'a str),
}

impl ContactItem<'_> {
    /// Link label for profile URLs; `None` for plain-text items.
    pub fn link_label(&self) -> Option<&'static str> {
        match self {
            ContactItem::Email(_) | ContactItem::Mobile(_) => None,
            ContactItem::LinkedIn(_) => Some("LinkedIn"),
            ContactItem::GitHub(_) => Some("GitHub"),
            ContactItem::Twitter(_) => Some("Twitter"),
        }
    }

    pub fn value(&self) -> &str {
        match self {
            ContactItem::Email(v)
            | ContactItem::Mobile(v)
            | ContactItem::LinkedIn(v)
            | ContactItem::GitHub(v)
            | ContactItem::Twitter(v) => *v,
        }
    }
}

/// One rendered unit of the resume, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block<'a> {
    Contact {
        name: &'a str,
        items: Vec<ContactItem<'a>>,
    },
    Summary(&'a str),
    Skills {
        text: Option<&'a str>,
        breakdown: Vec<(&'static str, &'a str)>,
    },
    Section {
        kind: SectionKind,
        entries: &'a [Entry],
    },
}

/// Assembles the document into its blocks: contact, summary, skills, then the
/// entry sections in fixed order. Blank text and empty sections produce no block.
pub fn assemble(doc: &Document) -> Vec<Block<'_>> {
    let mut blocks = Vec::new();

    let c = &doc.contact;
    let items: Vec<ContactItem<'_>> = [
        ContactItem::Email(c.email.trim()),
        ContactItem::Mobile(c.mobile.trim()),
        ContactItem::LinkedIn(c.linkedin.trim()),
        ContactItem::GitHub(c.github.trim()),
        ContactItem::Twitter(c.twitter.trim()),
    ]
    .into_iter()
    .filter(|item| !item.value().is_empty())
    .collect();
    let name = doc.full_name.trim();
    if !name.is_empty() || !items.is_empty() {
        blocks.push(Block::Contact { name, items });
    }

    let summary = doc.summary.trim();
    if !summary.is_empty() {
        blocks.push(Block::Summary(summary));
    }

    let skills = Some(doc.skills.trim()).filter(|s| !s.is_empty());
    let breakdown = doc.skills_summary.lines();
    if skills.is_some() || !breakdown.is_empty() {
        blocks.push(Block::Skills {
            text: skills,
            breakdown,
        });
    }

    for kind in SectionKind::ORDERED {
        let entries = doc.section(kind);
        if !entries.is_empty() {
            blocks.push(Block::Section { kind, entries });
        }
    }

    blocks
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::resume::entry::EntryDraft;

    pub fn entry(kind: SectionKind, title: &str, org: &str, description: &str) -> Entry {
        EntryDraft {
            title: title.into(),
            organization: org.into(),
            start_date: "2021-06".into(),
            current: true,
            description: description.into(),
            ..EntryDraft::default()
        }
        .accept(kind)
        .unwrap()
    }

    pub fn empty(name: &str) -> Document {
        Document {
            full_name: name.into(),
            contact: ContactInfo::default(),
            summary: String::new(),
            skills: String::new(),
            skills_summary: SkillsSummary::default(),
            experience: vec![],
            education: vec![],
            projects: vec![],
            certificates: vec![],
        }
    }

    pub fn sample() -> Document {
        let mut doc = empty("Ada Lovelace");
        doc.contact.email = "ada@example.com".into();
        doc.contact.linkedin = "https://linkedin.com/in/ada".into();
        doc.summary = "Systems engineer.".into();
        doc.skills = "Rust, Postgres".into();
        doc.experience = vec![entry(
            SectionKind::Experience,
            "Engineer",
            "Acme",
            "Built X\nScaled Y",
        )];
        doc.education = vec![entry(
            SectionKind::Education,
            "BSc Mathematics",
            "University of London",
            "First class honours",
        )];
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_blocks_follow_fixed_order() {
        let mut doc = sample();
        doc.certificates = vec![entry(SectionKind::Certificate, "CKA", "CNCF", "Passed")];
        doc.projects = vec![entry(SectionKind::Project, "coach", "Rust", "API")];
        let kinds: Vec<_> = assemble(&doc)
            .iter()
            .map(|b| match b {
                Block::Contact { .. } => "contact",
                Block::Summary(_) => "summary",
                Block::Skills { .. } => "skills",
                Block::Section { kind, .. } => kind.heading(),
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                "contact",
                "summary",
                "skills",
                "Work Experience",
                "Education",
                "Projects",
                "Certificates"
            ]
        );
    }

    #[test]
    fn test_empty_sections_contribute_nothing() {
        let mut doc = empty("");
        doc.skills = "   ".into();
        assert!(assemble(&doc).is_empty());
    }

    #[test]
    fn test_contact_items_skip_blank_values() {
        let doc = sample();
        let blocks = assemble(&doc);
        let Block::Contact { name, items } = &blocks[0] else {
            panic!("expected contact block first");
        };
        assert_eq!(*name, "Ada Lovelace");
        assert_eq!(
            items,
            &vec![
                ContactItem::Email("ada@example.com"),
                ContactItem::LinkedIn("https://linkedin.com/in/ada")
            ]
        );
    }

    #[test]
    fn test_skills_breakdown_alone_yields_block() {
        let mut doc = empty("Ada");
        doc.skills_summary.languages = "Rust".into();
        let blocks = assemble(&doc);
        assert_eq!(
            blocks[1],
            Block::Skills {
                text: None,
                breakdown: vec![("Languages", "Rust")]
            }
        );
    }

    #[test]
    fn test_assemble_is_idempotent() {
        let doc = sample();
        assert_eq!(assemble(&doc), assemble(&doc));
    }
}
