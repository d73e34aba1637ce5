//! Typed form state of the resume editor and its pure validation into a [`Document`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::FieldError;
use crate::resume::document::Document;
use crate::resume::entry::{is_web_url, Entry, SectionKind};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInfo {
    pub email: String,
    pub mobile: String,
    pub linkedin: String,
    pub github: String,
    pub twitter: String,
}

/// Structured skills breakdown shown as labelled lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillsSummary {
    pub languages: String,
    pub frameworks: String,
    pub tools: String,
    pub platforms: String,
    pub soft_skills: String,
}

impl SkillsSummary {
    /// Non-blank categories in display order.
    pub fn lines(&self) -> Vec<(&'static str, &str)> {
        [
            ("Languages", self.languages.as_str()),
            ("Frameworks", self.frameworks.as_str()),
            ("Tools", self.tools.as_str()),
            ("Platforms", self.platforms.as_str()),
            ("Soft Skills", self.soft_skills.as_str()),
        ]
        .into_iter()
        .map(|(label, value)| (label, value.trim()))
        .filter(|(_, value)| !value.is_empty())
        .collect()
    }
}

/// Everything the editor form holds. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeForm {
    pub contact_info: ContactInfo,
    pub summary: String,
    pub skills: String,
    pub skills_summary: SkillsSummary,
    pub experience: Vec<Entry>,
    pub education: Vec<Entry>,
    pub projects: Vec<Entry>,
    pub certificates: Vec<Entry>,
}

impl ResumeForm {
    pub fn section(&self, kind: SectionKind) -> &[Entry] {
        match kind {
            SectionKind::Experience => &self.experience,
            SectionKind::Education => &self.education,
            SectionKind::Project => &self.projects,
            SectionKind::Certificate => &self.certificates,
        }
    }
}

/// Validates the form and builds the document it describes.
///
/// All field errors are returned at once. Entries get the same date rules as a
/// freshly accepted draft; a current entry that still carries an end date is
/// normalized, not rejected. Every period label is rebuilt from its dates.
pub fn validate(form: &ResumeForm, full_name: &str) -> Result<Document, Vec<FieldError>> {
    let mut errors = validate_contact(&form.contact_info);

    let mut sections: Vec<Vec<Entry>> = Vec::with_capacity(SectionKind::ORDERED.len());
    for kind in SectionKind::ORDERED {
        let mut entries = form.section(kind).to_vec();
        for (index, entry) in entries.iter_mut().enumerate() {
            let path = format!("{}[{index}]", kind.form_key());
            if entry.kind() != kind {
                errors.push(FieldError::new(
                    path.clone(),
                    format!(
                        "A {:?} entry cannot be placed under {}",
                        entry.kind(),
                        kind.heading()
                    ),
                ));
                continue;
            }
            errors.extend(entry.check().into_iter().map(|e| e.nested(&path)));
            if entry.period().is_inconsistent() {
                debug!("{path}: cleared end date of a current entry");
            }
            // Labels are always derived here, never taken from the client.
            entry.normalize();
        }
        sections.push(entries);
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let contact = &form.contact_info;
    let mut sections = sections.into_iter();
    let mut next = || sections.next().unwrap_or_default();
    Ok(Document {
        full_name: full_name.trim().to_string(),
        contact: ContactInfo {
            email: contact.email.trim().to_string(),
            mobile: contact.mobile.trim().to_string(),
            linkedin: contact.linkedin.trim().to_string(),
            github: contact.github.trim().to_string(),
            twitter: contact.twitter.trim().to_string(),
        },
        summary: form.summary.trim().to_string(),
        skills: form.skills.trim().to_string(),
        skills_summary: form.skills_summary.clone(),
        experience: next(),
        education: next(),
        projects: next(),
        certificates: next(),
    })
}

fn validate_contact(contact: &ContactInfo) -> Vec<FieldError> {
    let mut errors = Vec::new();
    let email = contact.email.trim();
    if !email.is_empty() && !looks_like_email(email) {
        errors.push(FieldError::new("contactInfo.email", "Invalid email address"));
    }
    for (field, value) in [
        ("contactInfo.linkedin", &contact.linkedin),
        ("contactInfo.github", &contact.github),
        ("contactInfo.twitter", &contact.twitter),
    ] {
        let value = value.trim();
        if !value.is_empty() && !is_web_url(value) {
            errors.push(FieldError::new(field, "Must be a valid http(s) URL"));
        }
    }
    errors
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
                && !value.chars().any(char::is_whitespace)
                && !domain.contains('@')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::entry::EntryDraft;

    fn entry(kind: SectionKind, title: &str) -> Entry {
        EntryDraft {
            title: title.into(),
            organization: "Acme".into(),
            start_date: "2020-01".into(),
            current: true,
            description: "Did things".into(),
            ..EntryDraft::default()
        }
        .accept(kind)
        .unwrap()
    }

    #[test]
    fn test_validate_builds_trimmed_document() {
        let form = ResumeForm {
            contact_info: ContactInfo {
                email: " ada@example.com ".into(),
                linkedin: "https://linkedin.com/in/ada".into(),
                ..ContactInfo::default()
            },
            summary: "  Engineer.  ".into(),
            experience: vec![entry(SectionKind::Experience, "Engineer")],
            ..ResumeForm::default()
        };
        let doc = validate(&form, " Ada Lovelace ").unwrap();
        assert_eq!(doc.full_name, "Ada Lovelace");
        assert_eq!(doc.contact.email, "ada@example.com");
        assert_eq!(doc.summary, "Engineer.");
        assert_eq!(doc.experience.len(), 1);
    }

    #[test]
    fn test_contact_errors_are_collected() {
        let form = ResumeForm {
            contact_info: ContactInfo {
                email: "ada.example.com".into(),
                github: "github.com/ada".into(),
                ..ContactInfo::default()
            },
            ..ResumeForm::default()
        };
        let errors = validate(&form, "Ada").unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["contactInfo.email", "contactInfo.github"]);
    }

    #[test]
    fn test_entry_in_wrong_section_rejected() {
        let form = ResumeForm {
            projects: vec![entry(SectionKind::Education, "BSc")],
            ..ResumeForm::default()
        };
        let errors = validate(&form, "Ada").unwrap_err();
        assert_eq!(errors[0].field, "projects[0]");
    }

    #[test]
    fn test_blank_entry_field_reported_with_path() {
        let mut bad = entry(SectionKind::Experience, "Engineer");
        if let Entry::Experience(e) = &mut bad {
            e.company = "  ".into();
        }
        let form = ResumeForm {
            experience: vec![entry(SectionKind::Experience, "Lead"), bad],
            ..ResumeForm::default()
        };
        let errors = validate(&form, "Ada").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "experience[1].organization");
    }

    #[test]
    fn test_stale_end_date_normalized_silently() {
        let mut stale = entry(SectionKind::Experience, "Engineer");
        if let Entry::Experience(e) = &mut stale {
            e.period.end = crate::resume::entry::YearMonth::parse("2022-05");
        }
        let form = ResumeForm {
            experience: vec![stale],
            ..ResumeForm::default()
        };
        let doc = validate(&form, "Ada").unwrap();
        assert!(doc.experience[0].period().end.is_none());
        assert_eq!(doc.experience[0].period().label, "Jan 2020 - Present");
    }

    #[test]
    fn test_forged_period_label_is_rebuilt() {
        let form: ResumeForm = serde_json::from_str(
            r#"{"experience": [{
                "kind": "experience", "title": "Engineer", "company": "Acme",
                "period": {"start": "2021-06", "end": null, "current": true,
                           "label": "Jun 2021 - Dec 2022"},
                "description": "Built X", "link": null
            }]}"#,
        )
        .unwrap();
        let doc = validate(&form, "Ada").unwrap();
        let markdown = crate::resume::render::render(&doc).markdown;
        assert!(markdown.contains("Jun 2021 - Present"));
        assert!(!markdown.contains("Dec 2022"));
    }

    #[test]
    fn test_end_before_start_rejected_with_path() {
        let form: ResumeForm = serde_json::from_str(
            r#"{"experience": [
                {"kind": "experience", "title": "Engineer", "company": "Acme",
                 "period": {"start": "2021-06", "current": true},
                 "description": "Built X", "link": null},
                {"kind": "experience", "title": "Dev", "company": "Beta",
                 "period": {"start": "2023-06", "end": "2020-01", "current": false},
                 "description": "Shipped Y", "link": null}
            ]}"#,
        )
        .unwrap();
        let errors = validate(&form, "Ada").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "experience[1].endDate");
    }

    #[test]
    fn test_missing_end_date_rejected() {
        let mut open = entry(SectionKind::Education, "BSc");
        if let Entry::Education(e) = &mut open {
            e.period.current = false;
        }
        let form = ResumeForm {
            education: vec![open],
            ..ResumeForm::default()
        };
        let errors = validate(&form, "Ada").unwrap_err();
        assert_eq!(errors[0].field, "education[0].endDate");
    }

    #[test]
    fn test_form_deserializes_from_partial_json() {
        let form: ResumeForm = serde_json::from_str(
            r#"{"contactInfo": {"email": "a@b.io"}, "skillsSummary": {"softSkills": "Mentoring"}}"#,
        )
        .unwrap();
        assert_eq!(form.contact_info.email, "a@b.io");
        assert_eq!(form.skills_summary.soft_skills, "Mentoring");
        assert!(form.experience.is_empty());
    }

    #[test]
    fn test_skills_summary_lines_skip_blank() {
        let summary = SkillsSummary {
            languages: "Rust, Go".into(),
            tools: "   ".into(),
            soft_skills: "Mentoring".into(),
            ..SkillsSummary::default()
        };
        assert_eq!(
            summary.lines(),
            vec![("Languages", "Rust, Go"), ("Soft Skills", "Mentoring")]
        );
    }

    #[test]
    fn test_email_shapes() {
        assert!(looks_like_email("a@b.io"));
        assert!(!looks_like_email("a@b"));
        assert!(!looks_like_email("@b.io"));
        assert!(!looks_like_email("a b@c.io"));
    }
}
