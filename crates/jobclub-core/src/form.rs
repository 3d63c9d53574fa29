//! Onboarding form input and validation.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));

/// Graduation year as submitted: browsers send either a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GraduationYear {
    Number(serde_json::Number),
    Text(String),
}

impl GraduationYear {
    /// Parse the year as an integer.
    ///
    /// Strings are read like a lenient integer parse: surrounding whitespace is
    /// ignored and only the leading sign and digits count, so `"2025"` and
    /// `"2025 (spring)"` both give 2025. Fractional numbers are truncated.
    pub fn parse(&self) -> Option<i32> {
        match self {
            Self::Number(n) => {
                if let Some(i) = n.as_i64() {
                    i32::try_from(i).ok()
                } else {
                    let f = n.as_f64()?;
                    if f.is_finite() && f.abs() < i32::MAX as f64 {
                        Some(f.trunc() as i32)
                    } else {
                        None
                    }
                }
            }
            Self::Text(s) => parse_leading_int(s),
        }
    }
}

impl From<i32> for GraduationYear {
    fn from(year: i32) -> Self {
        Self::Number(year.into())
    }
}

fn parse_leading_int(s: &str) -> Option<i32> {
    let s = s.trim();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1i64, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };

    let digits: &str = rest
        .find(|c: char| !c.is_ascii_digit())
        .map_or(rest, |end| &rest[..end]);
    if digits.is_empty() {
        return None;
    }

    let value: i64 = digits.parse().ok()?;
    i32::try_from(sign * value).ok()
}

/// Check an address against the simple `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Raw onboarding form as posted by the site.
///
/// Every field is optional so that [`OnboardingForm::validate`] can report
/// all missing fields at once instead of failing on the first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub graduation_year: Option<GraduationYear>,
    #[serde(default)]
    pub career_goal: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub portfolio_url: Option<String>,
    #[serde(default)]
    pub calendly_url: Option<String>,
    #[serde(default)]
    pub discord_username: Option<String>,
}

impl OnboardingForm {
    /// Validate required fields. An empty list means the form is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if is_blank(self.name.as_deref()) {
            errors.push("Name is required".to_string());
        }

        if !self.email.as_deref().is_some_and(is_valid_email) {
            errors.push("Valid email is required".to_string());
        }

        if is_blank(self.major.as_deref()) {
            errors.push("Major is required".to_string());
        }

        if self.graduation_year().is_none() {
            errors.push("Valid graduation year is required".to_string());
        }

        if self.career_goal.as_deref().is_none_or(str::is_empty) {
            errors.push("Career goal is required".to_string());
        }

        errors
    }

    /// Parsed graduation year; zero counts as missing.
    fn graduation_year(&self) -> Option<i32> {
        self.graduation_year
            .as_ref()
            .and_then(GraduationYear::parse)
            .filter(|year| *year != 0)
    }

    /// Validate and convert into an immutable submission.
    pub fn into_submission(self) -> Result<OnboardingSubmission, Vec<String>> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }

        let graduation_year = self
            .graduation_year()
            .ok_or_else(|| vec!["Valid graduation year is required".to_string()])?;

        Ok(OnboardingSubmission {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            major: self.major.unwrap_or_default(),
            graduation_year,
            career_goal: self.career_goal.unwrap_or_default(),
            linkedin_url: non_empty(self.linkedin_url),
            github_url: non_empty(self.github_url),
            portfolio_url: non_empty(self.portfolio_url),
            calendly_url: non_empty(self.calendly_url),
            discord_username: non_empty(self.discord_username),
        })
    }
}

/// A validated onboarding submission.
#[derive(Debug, Clone, PartialEq)]
pub struct OnboardingSubmission {
    pub name: String,
    pub email: String,
    pub major: String,
    pub graduation_year: i32,
    /// Raw career goal value; membership in [`crate::CareerGoal`] is not enforced.
    pub career_goal: String,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub calendly_url: Option<String>,
    pub discord_username: Option<String>,
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn jane() -> OnboardingForm {
        OnboardingForm {
            name: Some("Jane Doe".to_string()),
            email: Some("jane@njit.edu".to_string()),
            major: Some("CS".to_string()),
            graduation_year: Some(2025.into()),
            career_goal: Some("ai-engineer".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn accepts_valid_form() {
        assert!(jane().validate().is_empty());
    }

    #[test]
    fn reports_every_missing_field() {
        let errors = OnboardingForm::default().validate();

        assert_eq!(
            errors,
            vec![
                "Name is required",
                "Valid email is required",
                "Major is required",
                "Valid graduation year is required",
                "Career goal is required",
            ]
        );
    }

    #[test]
    fn rejects_whitespace_name_and_major() {
        let form = OnboardingForm {
            name: Some("   ".to_string()),
            major: Some("\t".to_string()),
            ..jane()
        };

        assert_eq!(form.validate(), vec!["Name is required", "Major is required"]);
    }

    #[test]
    fn validates_email_shape() {
        assert!(!is_valid_email("not-an-email"));
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.io"));
    }

    #[test]
    fn parses_graduation_year_leniently() {
        assert_eq!(GraduationYear::Text("2025".into()).parse(), Some(2025));
        assert_eq!(GraduationYear::Text(" 2026 spring".into()).parse(), Some(2026));
        assert_eq!(GraduationYear::Text("abc".into()).parse(), None);
        assert_eq!(GraduationYear::Text("".into()).parse(), None);
        assert_eq!(GraduationYear::from(2024).parse(), Some(2024));
    }

    #[test]
    fn deserializes_year_from_string_or_number() {
        let form: OnboardingForm =
            serde_json::from_str(r#"{"graduationYear": "2027"}"#).unwrap();
        assert_eq!(form.graduation_year.and_then(|y| y.parse()), Some(2027));

        let form: OnboardingForm = serde_json::from_str(r#"{"graduationYear": 2028}"#).unwrap();
        assert_eq!(form.graduation_year.and_then(|y| y.parse()), Some(2028));
    }

    #[test]
    fn zero_graduation_year_is_missing() {
        let form = OnboardingForm {
            graduation_year: Some(0.into()),
            ..jane()
        };

        assert_eq!(form.validate(), vec!["Valid graduation year is required"]);
        assert!(form.into_submission().is_err());
    }

    #[test]
    fn career_goal_is_not_checked_against_known_values() {
        let form = OnboardingForm {
            career_goal: Some("astronaut".to_string()),
            ..jane()
        };

        assert!(form.validate().is_empty());
    }

    #[test]
    fn converts_to_submission_and_drops_empty_links() {
        let form = OnboardingForm {
            linkedin_url: Some(String::new()),
            github_url: Some("https://github.com/jane".to_string()),
            ..jane()
        };

        let submission = form.into_submission().unwrap();

        assert_eq!(submission.graduation_year, 2025);
        assert_eq!(submission.linkedin_url, None);
        assert_eq!(
            submission.github_url.as_deref(),
            Some("https://github.com/jane")
        );
    }

    #[test]
    fn submission_conversion_returns_errors() {
        let form = OnboardingForm {
            email: Some("nope".to_string()),
            ..jane()
        };

        assert_eq!(
            form.into_submission().unwrap_err(),
            vec!["Valid email is required"]
        );
    }
}
