//! Member records as stored in the content store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::form::OnboardingSubmission;

/// Document type of member records in the content store.
pub const MEMBER_DOCUMENT_TYPE: &str = "memberProfile";

/// Where a member is in the onboarding flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OnboardingStatus {
    #[default]
    New,
    InProgress,
    Completed,
}

impl OnboardingStatus {
    /// Stored value (`new`, `in-progress`, `completed`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }
}

/// A member profile document.
///
/// Records created through onboarding always carry every required field, but
/// documents edited by hand in the content store may not, so the descriptive
/// fields are optional when read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberProfile {
    /// Identifier generated by the content store; absent before creation.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "_type", default = "member_type")]
    pub doc_type: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub major: Option<String>,

    #[serde(default)]
    pub graduation_year: Option<i32>,

    /// Raw career goal value (see [`crate::CareerGoal`]).
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

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discord_username: Option<String>,

    #[serde(default)]
    pub onboarding_status: Option<OnboardingStatus>,

    #[serde(default)]
    pub joined_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

fn member_type() -> String {
    MEMBER_DOCUMENT_TYPE.to_string()
}

impl MemberProfile {
    /// Build the document for a new member: status `new`, joined and
    /// updated at `now`.
    pub fn from_submission(submission: &OnboardingSubmission, now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            doc_type: member_type(),
            name: submission.name.clone(),
            email: submission.email.clone(),
            major: Some(submission.major.clone()),
            graduation_year: Some(submission.graduation_year),
            career_goal: Some(submission.career_goal.clone()),
            linkedin_url: submission.linkedin_url.clone(),
            github_url: submission.github_url.clone(),
            portfolio_url: submission.portfolio_url.clone(),
            calendly_url: submission.calendly_url.clone(),
            discord_username: submission.discord_username.clone(),
            onboarding_status: Some(OnboardingStatus::New),
            joined_date: Some(now),
            last_updated: Some(now),
        }
    }

    /// Identifier, or an empty string for documents not yet created.
    pub fn member_id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    /// Status, treating a missing value as `new`.
    pub fn status(&self) -> OnboardingStatus {
        self.onboarding_status.unwrap_or_default()
    }
}
