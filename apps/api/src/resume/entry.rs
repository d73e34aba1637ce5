//! Resume entries: one line item of a section, normalized from form input.
//!
//! The display period ("Jun 2021 - Present") is derived once, when a draft is
//! accepted, and stored on the entry. Renderers only ever read `Period::label`.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::FieldError;

// ────────────────────────────────────────────────────────────────────────────
// Section kinds
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Experience,
    Education,
    Project,
    Certificate,
}

impl SectionKind {
    /// Fixed document order of entry sections.
    pub const ORDERED: [SectionKind; 4] = [
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Project,
        SectionKind::Certificate,
    ];

    pub fn heading(self) -> &'static str {
        match self {
            SectionKind::Experience => "Work Experience",
            SectionKind::Education => "Education",
            SectionKind::Project => "Projects",
            SectionKind::Certificate => "Certificates",
        }
    }

    /// Label of the draft's `title` input for this section.
    pub fn title_label(self) -> &'static str {
        match self {
            SectionKind::Experience => "Title / Position",
            SectionKind::Education => "Degree / Course",
            SectionKind::Project => "Project Name",
            SectionKind::Certificate => "Certificate Name",
        }
    }

    /// Label of the draft's `organization` input for this section.
    pub fn organization_label(self) -> &'static str {
        match self {
            SectionKind::Experience => "Organization / Company",
            SectionKind::Education => "Institution / University",
            SectionKind::Project => "Tech Stack / Role",
            SectionKind::Certificate => "Issuing Organization",
        }
    }

    /// Form key of the section's entry list inside `ResumeForm`.
    pub fn form_key(self) -> &'static str {
        match self {
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Project => "projects",
            SectionKind::Certificate => "certificates",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Year-month and period
// ────────────────────────────────────────────────────────────────────────────

/// A calendar month as entered in a `type="month"` input (`YYYY-MM`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth(NaiveDate);

impl YearMonth {
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        // `2021-6` and `2021-06-15` are both rejected; the input is exactly YYYY-MM.
        if input.len() != 7 {
            return None;
        }
        NaiveDate::parse_from_str(&format!("{input}-01"), "%Y-%m-%d")
            .ok()
            .map(YearMonth)
    }

    /// Human display form, e.g. `Jun 2021`.
    pub fn label(&self) -> String {
        self.0.format("%b %Y").to_string()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m"))
    }
}

impl TryFrom<String> for YearMonth {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        YearMonth::parse(&value).ok_or_else(|| format!("invalid year-month '{value}'"))
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: Option<YearMonth>,
    pub end: Option<YearMonth>,
    #[serde(default)]
    pub current: bool,
    /// Derived from the dates. A label sent by a client is replaced on validation.
    #[serde(default)]
    pub label: String,
}

impl Period {
    /// Builds a period; a current period never keeps an end date.
    pub fn new(start: Option<YearMonth>, end: Option<YearMonth>, current: bool) -> Self {
        let end = if current { None } else { end };
        Self {
            start,
            end,
            current,
            label: period_label(start, end, current),
        }
    }

    /// True when a current period still carries an end date.
    pub fn is_inconsistent(&self) -> bool {
        self.current && self.end.is_some()
    }

    /// The same dates with the end date policy applied and the label rebuilt.
    pub fn normalized(&self) -> Self {
        Period::new(self.start, self.end, self.current)
    }
}

/// End date required unless current; end may not precede start.
fn check_dates(
    start: Option<YearMonth>,
    end: Option<YearMonth>,
    current: bool,
    errors: &mut Vec<FieldError>,
) {
    if current {
        return;
    }
    match (start, end) {
        (_, None) => errors.push(FieldError::new(
            "endDate",
            "End date is required unless this is a current entry",
        )),
        (Some(s), Some(e)) if e < s => errors.push(FieldError::new(
            "endDate",
            "End date cannot be before the start date",
        )),
        _ => {}
    }
}

fn period_label(start: Option<YearMonth>, end: Option<YearMonth>, current: bool) -> String {
    let start = start.map(|s| s.label());
    match (start, current) {
        (Some(s), true) => format!("{s} - Present"),
        (None, true) => "Present".to_string(),
        (Some(s), false) => match end {
            Some(e) => format!("{s} - {}", e.label()),
            None => s,
        },
        (None, false) => end.map(|e| e.label()).unwrap_or_default(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Entries
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub period: Period,
    pub description: String,
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub period: Period,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    pub name: String,
    /// Tech stack or the author's role.
    pub stack: String,
    pub period: Period,
    pub description: String,
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateEntry {
    pub title: String,
    pub issuer: String,
    pub period: Period,
    pub description: String,
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entry {
    Experience(ExperienceEntry),
    Education(EducationEntry),
    Project(ProjectEntry),
    Certificate(CertificateEntry),
}

impl Entry {
    pub fn kind(&self) -> SectionKind {
        match self {
            Entry::Experience(_) => SectionKind::Experience,
            Entry::Education(_) => SectionKind::Education,
            Entry::Project(_) => SectionKind::Project,
            Entry::Certificate(_) => SectionKind::Certificate,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Entry::Experience(e) => &e.title,
            Entry::Education(e) => &e.degree,
            Entry::Project(e) => &e.name,
            Entry::Certificate(e) => &e.title,
        }
    }

    pub fn organization(&self) -> &str {
        match self {
            Entry::Experience(e) => &e.company,
            Entry::Education(e) => &e.institution,
            Entry::Project(e) => &e.stack,
            Entry::Certificate(e) => &e.issuer,
        }
    }

    pub fn period(&self) -> &Period {
        match self {
            Entry::Experience(e) => &e.period,
            Entry::Education(e) => &e.period,
            Entry::Project(e) => &e.period,
            Entry::Certificate(e) => &e.period,
        }
    }

    fn period_mut(&mut self) -> &mut Period {
        match self {
            Entry::Experience(e) => &mut e.period,
            Entry::Education(e) => &mut e.period,
            Entry::Project(e) => &mut e.period,
            Entry::Certificate(e) => &mut e.period,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Entry::Experience(e) => &e.description,
            Entry::Education(e) => &e.description,
            Entry::Project(e) => &e.description,
            Entry::Certificate(e) => &e.description,
        }
    }

    pub fn link(&self) -> Option<&str> {
        match self {
            Entry::Experience(e) => e.link.as_deref(),
            Entry::Education(_) => None,
            Entry::Project(e) => e.link.as_deref(),
            Entry::Certificate(e) => e.link.as_deref(),
        }
    }

    /// `title @ organization`, the entry's sub-heading.
    pub fn heading(&self) -> String {
        format!("{} @ {}", self.title(), self.organization())
    }

    /// One bullet per non-blank description line.
    pub fn bullets(&self) -> impl Iterator<Item = &str> {
        self.description()
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.trim().is_empty())
    }

    /// Re-checks an entry received from a client with the rules of [`EntryDraft::accept`].
    pub fn check(&self) -> Vec<FieldError> {
        let kind = self.kind();
        let mut errors = Vec::new();
        require(self.title(), "title", kind.title_label(), &mut errors);
        require(
            self.organization(),
            "organization",
            kind.organization_label(),
            &mut errors,
        );
        require(self.description(), "description", "Description", &mut errors);
        let period = self.period();
        check_dates(period.start, period.end, period.current, &mut errors);
        if let Some(link) = self.link() {
            if !is_web_url(link) {
                errors.push(FieldError::new("link", "Must be a valid http(s) URL"));
            }
        }
        errors
    }

    /// Rebuilds the period from its dates, clearing a stale end date on a current
    /// entry. Returns whether the stored period changed.
    pub fn normalize(&mut self) -> bool {
        let period = self.period_mut();
        let rebuilt = period.normalized();
        if rebuilt == *period {
            return false;
        }
        *period = rebuilt;
        true
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Draft (form input)
// ────────────────────────────────────────────────────────────────────────────

/// Raw values of the "add entry" form. Dates are `YYYY-MM` month inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntryDraft {
    pub title: String,
    pub organization: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
    pub link: String,
}

impl EntryDraft {
    /// Validates the draft and turns it into an entry of `kind`, collecting every field error.
    ///
    /// End dates are required unless the entry is current; a current entry's end date is
    /// cleared rather than rejected. Education entries carry no link.
    pub fn accept(&self, kind: SectionKind) -> Result<Entry, Vec<FieldError>> {
        let mut errors = Vec::new();

        require(&self.title, "title", kind.title_label(), &mut errors);
        require(
            &self.organization,
            "organization",
            kind.organization_label(),
            &mut errors,
        );
        require(&self.description, "description", "Description", &mut errors);

        let start = parse_month(&self.start_date, "startDate", &mut errors);
        let end = if self.current {
            None
        } else if self.end_date.trim().is_empty() {
            check_dates(start, None, false, &mut errors);
            None
        } else {
            let end = parse_month(&self.end_date, "endDate", &mut errors);
            if end.is_some() {
                check_dates(start, end, false, &mut errors);
            }
            end
        };

        let link = match self.link.trim() {
            "" => None,
            raw if is_web_url(raw) => Some(raw.to_string()),
            _ => {
                errors.push(FieldError::new("link", "Must be a valid http(s) URL"));
                None
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        let title = self.title.trim().to_string();
        let organization = self.organization.trim().to_string();
        let description = self.description.trim_end().to_string();
        let period = Period::new(start, end, self.current);

        Ok(match kind {
            SectionKind::Experience => Entry::Experience(ExperienceEntry {
                title,
                company: organization,
                period,
                description,
                link,
            }),
            SectionKind::Education => Entry::Education(EducationEntry {
                degree: title,
                institution: organization,
                period,
                description,
            }),
            SectionKind::Project => Entry::Project(ProjectEntry {
                name: title,
                stack: organization,
                period,
                description,
                link,
            }),
            SectionKind::Certificate => Entry::Certificate(CertificateEntry {
                title,
                issuer: organization,
                period,
                description,
                link,
            }),
        })
    }
}

fn require(value: &str, field: &str, label: &str, errors: &mut Vec<FieldError>) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, format!("{label} is required")));
    }
}

fn parse_month(raw: &str, field: &str, errors: &mut Vec<FieldError>) -> Option<YearMonth> {
    if raw.trim().is_empty() {
        return None;
    }
    let parsed = YearMonth::parse(raw);
    if parsed.is_none() {
        errors.push(FieldError::new(field, "Use the YYYY-MM format"));
    }
    parsed
}

/// Absolute `http`/`https` URL with a host.
pub fn is_web_url(raw: &str) -> bool {
    Url::parse(raw.trim())
        .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> EntryDraft {
        EntryDraft {
            title: "Engineer".into(),
            organization: "Acme".into(),
            start_date: "2021-06".into(),
            end_date: String::new(),
            current: true,
            description: "Built X\nScaled Y".into(),
            link: String::new(),
        }
    }

    #[test]
    fn test_year_month_parse_and_label() {
        let ym = YearMonth::parse("2021-06").unwrap();
        assert_eq!(ym.label(), "Jun 2021");
        assert_eq!(ym.to_string(), "2021-06");
        assert!(YearMonth::parse("2021-13").is_none());
        assert!(YearMonth::parse("2021-6").is_none());
        assert!(YearMonth::parse("June 2021").is_none());
    }

    #[test]
    fn test_year_month_serde_as_string() {
        let ym: YearMonth = serde_json::from_str("\"2019-11\"").unwrap();
        assert_eq!(serde_json::to_string(&ym).unwrap(), "\"2019-11\"");
        assert!(serde_json::from_str::<YearMonth>("\"2019/11\"").is_err());
    }

    #[test]
    fn test_current_entry_period() {
        let entry = draft().accept(SectionKind::Experience).unwrap();
        assert_eq!(entry.heading(), "Engineer @ Acme");
        assert_eq!(entry.period().label, "Jun 2021 - Present");
        assert_eq!(entry.bullets().collect::<Vec<_>>(), vec!["Built X", "Scaled Y"]);
    }

    #[test]
    fn test_current_entry_clears_end_date() {
        let mut d = draft();
        d.end_date = "2023-01".into();
        let entry = d.accept(SectionKind::Experience).unwrap();
        assert!(entry.period().end.is_none());
        assert!(entry.period().label.ends_with("Present"));
    }

    #[test]
    fn test_current_without_start() {
        let mut d = draft();
        d.start_date.clear();
        let entry = d.accept(SectionKind::Project).unwrap();
        assert_eq!(entry.period().label, "Present");
    }

    #[test]
    fn test_closed_period_label() {
        let mut d = draft();
        d.current = false;
        d.end_date = "2023-02".into();
        let entry = d.accept(SectionKind::Education).unwrap();
        assert_eq!(entry.period().label, "Jun 2021 - Feb 2023");
    }

    #[test]
    fn test_end_date_required_unless_current() {
        let mut d = draft();
        d.current = false;
        let errors = d.accept(SectionKind::Experience).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "endDate");
    }

    #[test]
    fn test_end_before_start_rejected() {
        let mut d = draft();
        d.current = false;
        d.end_date = "2020-01".into();
        let errors = d.accept(SectionKind::Experience).unwrap_err();
        assert!(errors[0].message.contains("before"));
    }

    #[test]
    fn test_collects_all_required_errors_with_section_labels() {
        let errors = EntryDraft {
            current: true,
            ..EntryDraft::default()
        }
        .accept(SectionKind::Education)
        .unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["title", "organization", "description"]);
        assert_eq!(errors[0].message, "Degree / Course is required");
        assert_eq!(errors[1].message, "Institution / University is required");
    }

    #[test]
    fn test_invalid_month_and_link() {
        let mut d = draft();
        d.start_date = "06/2021".into();
        d.link = "not a url".into();
        let errors = d.accept(SectionKind::Project).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["startDate", "link"]);
    }

    #[test]
    fn test_ftp_link_rejected() {
        assert!(!is_web_url("ftp://files.example.com/cert.pdf"));
        assert!(is_web_url("https://github.com/acme/x"));
    }

    #[test]
    fn test_education_drops_link() {
        let mut d = draft();
        d.link = "https://uni.example.edu".into();
        let entry = d.accept(SectionKind::Education).unwrap();
        assert!(entry.link().is_none());
    }

    #[test]
    fn test_entry_serde_is_tagged() {
        let entry = draft().accept(SectionKind::Certificate).unwrap();
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["kind"], "certificate");
        assert_eq!(value["issuer"], "Acme");
        assert_eq!(value["period"]["start"], "2021-06");
        let back: Entry = serde_json::from_value(value).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_normalize_stale_end_date() {
        let mut entry = draft().accept(SectionKind::Experience).unwrap();
        if let Entry::Experience(e) = &mut entry {
            e.period.end = YearMonth::parse("2024-01");
            e.period.label = "Jun 2021 - Jan 2024".into();
        }
        assert!(entry.normalize());
        assert!(entry.period().end.is_none());
        assert_eq!(entry.period().label, "Jun 2021 - Present");
        assert!(!entry.normalize());
    }

    #[test]
    fn test_normalize_replaces_client_label() {
        let mut entry: Entry = serde_json::from_str(
            r#"{"kind": "experience", "title": "Engineer", "company": "Acme",
                "period": {"start": "2021-06", "end": null, "current": true,
                           "label": "Jun 2021 - Dec 2022"},
                "description": "Built X", "link": null}"#,
        )
        .unwrap();
        assert!(entry.check().is_empty());
        assert!(entry.normalize());
        assert_eq!(entry.period().label, "Jun 2021 - Present");
    }

    #[test]
    fn test_label_may_be_omitted() {
        let mut entry: Entry = serde_json::from_str(
            r#"{"kind": "education", "degree": "BSc", "institution": "Uni",
                "period": {"start": "2018-09", "end": "2021-06"},
                "description": "Maths"}"#,
        )
        .unwrap();
        entry.normalize();
        assert_eq!(entry.period().label, "Sep 2018 - Jun 2021");
    }

    #[test]
    fn test_check_applies_end_date_rules() {
        let open: Entry = serde_json::from_str(
            r#"{"kind": "project", "name": "coach", "stack": "Rust",
                "period": {"start": "2023-06", "end": null, "current": false},
                "description": "API", "link": null}"#,
        )
        .unwrap();
        let errors = open.check();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "endDate");

        let reversed: Entry = serde_json::from_str(
            r#"{"kind": "project", "name": "coach", "stack": "Rust",
                "period": {"start": "2023-06", "end": "2020-01", "current": false},
                "description": "API", "link": null}"#,
        )
        .unwrap();
        let errors = reversed.check();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("before"));
    }

    #[test]
    fn test_bullets_drop_blank_and_trailing_lines() {
        let mut d = draft();
        d.description = "Led team\n\n   \nShipped feature\r\n".into();
        let entry = d.accept(SectionKind::Experience).unwrap();
        assert_eq!(
            entry.bullets().collect::<Vec<_>>(),
            vec!["Led team", "Shipped feature"]
        );
    }
}
