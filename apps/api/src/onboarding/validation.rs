use serde::Deserialize;

use crate::errors::FieldError;

pub const BIO_MAX_CHARS: usize = 500;
pub const EXPERIENCE_MAX_YEARS: i32 = 50;

/// Onboarding form as submitted. `experience` arrives as the raw text input.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OnboardingForm {
    pub industry: String,
    pub sub_industry: String,
    pub bio: Option<String>,
    pub experience: String,
    /// Comma-separated.
    pub skills: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingProfile {
    /// `{industry}-{sub-industry}`, e.g. `tech-software-development`.
    pub industry: String,
    pub experience: i32,
    pub bio: Option<String>,
    pub skills: Vec<String>,
}

impl OnboardingForm {
    pub fn validate(&self) -> Result<OnboardingProfile, Vec<FieldError>> {
        let mut errors = Vec::new();

        let industry = self.industry.trim();
        if industry.is_empty() {
            errors.push(FieldError::new("industry", "Please select an industry"));
        }
        let sub_industry = self.sub_industry.trim();
        if sub_industry.is_empty() {
            errors.push(FieldError::new("subIndustry", "Please select a specialization"));
        }

        let bio = self
            .bio
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty());
        if bio.is_some_and(|b| b.chars().count() > BIO_MAX_CHARS) {
            errors.push(FieldError::new(
                "bio",
                format!("Bio cannot exceed {BIO_MAX_CHARS} characters"),
            ));
        }

        let experience = match self.experience.trim() {
            "" => {
                errors.push(FieldError::new(
                    "experience",
                    "Please enter your years of experience",
                ));
                None
            }
            raw => match leading_years(raw) {
                Some(years) if years < 0 => {
                    errors.push(FieldError::new(
                        "experience",
                        "Experience must be at least 0 years",
                    ));
                    None
                }
                Some(years) if years > EXPERIENCE_MAX_YEARS => {
                    errors.push(FieldError::new(
                        "experience",
                        format!("Experience cannot exceed {EXPERIENCE_MAX_YEARS} years"),
                    ));
                    None
                }
                Some(years) => Some(years),
                None => {
                    errors.push(FieldError::new("experience", "Experience must be a whole number"));
                    None
                }
            },
        };

        match experience {
            Some(experience) if errors.is_empty() => Ok(OnboardingProfile {
                industry: industry_key(industry, sub_industry),
                experience,
                bio: bio.map(String::from),
                skills: split_skills(self.skills.as_deref().unwrap_or_default()),
            }),
            _ => Err(errors),
        }
    }
}

/// `("tech", "Software Development")` → `tech-software-development`.
pub fn industry_key(industry: &str, sub_industry: &str) -> String {
    let sub = sub_industry
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    format!("{}-{sub}", industry.trim())
}

/// Leading integer of the input, so `"5 years"` is 5 and `"7.5"` is 7.
fn leading_years(raw: &str) -> Option<i32> {
    let digits_from = usize::from(raw.starts_with(['+', '-']));
    let end = raw[digits_from..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(raw.len(), |i| i + digits_from);
    if end == digits_from {
        return None;
    }
    raw[..end].parse().ok()
}

fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> OnboardingForm {
        OnboardingForm {
            industry: "tech".into(),
            sub_industry: "Software Development".into(),
            bio: Some("  Backend engineer  ".into()),
            experience: "7".into(),
            skills: Some("Rust, , Postgres ,Kubernetes".into()),
        }
    }

    #[test]
    fn test_valid_form() {
        let profile = form().validate().unwrap();
        assert_eq!(profile.industry, "tech-software-development");
        assert_eq!(profile.experience, 7);
        assert_eq!(profile.bio.as_deref(), Some("Backend engineer"));
        assert_eq!(profile.skills, vec!["Rust", "Postgres", "Kubernetes"]);
    }

    #[test]
    fn test_experience_bounds() {
        for (raw, ok) in [("0", true), ("50", true), ("51", false), ("-1", false), ("ten", false), ("", false)] {
            let mut f = form();
            f.experience = raw.into();
            assert_eq!(f.validate().is_ok(), ok, "experience {raw:?}");
        }
    }

    #[test]
    fn test_experience_reads_leading_integer() {
        for (raw, years) in [("5 years", 5), ("7.5", 7), ("+3", 3), ("12yrs", 12)] {
            let mut f = form();
            f.experience = raw.into();
            assert_eq!(f.validate().unwrap().experience, years, "experience {raw:?}");
        }
        for raw in ["years 5", "-", ".5", "99999999999"] {
            let mut f = form();
            f.experience = raw.into();
            assert!(f.validate().is_err(), "experience {raw:?}");
        }
    }

    #[test]
    fn test_bio_limit_counts_characters() {
        let mut f = form();
        f.bio = Some("é".repeat(BIO_MAX_CHARS));
        assert!(f.validate().is_ok());
        f.bio = Some("a".repeat(BIO_MAX_CHARS + 1));
        let errors = f.validate().unwrap_err();
        assert_eq!(errors[0].field, "bio");
    }

    #[test]
    fn test_missing_selections_collected() {
        let f = OnboardingForm {
            experience: "3".into(),
            ..OnboardingForm::default()
        };
        let fields: Vec<_> = f
            .validate()
            .unwrap_err()
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, vec!["industry", "subIndustry"]);
    }

    #[test]
    fn test_optional_fields_absent() {
        let mut f = form();
        f.bio = None;
        f.skills = None;
        let profile = f.validate().unwrap();
        assert!(profile.bio.is_none());
        assert!(profile.skills.is_empty());
    }
}
