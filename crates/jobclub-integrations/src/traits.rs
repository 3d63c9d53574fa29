//! Trait seams for the external systems.

use async_trait::async_trait;

use jobclub_core::{Event, MemberProfile, OnboardingSubmission, Resource};

use crate::error::IntegrationError;

/// Result of mirroring a member into the workspace database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new page was created with this id.
    Created(String),
    /// An existing page with the same email was updated.
    Updated(String),
    /// The integration is not configured; nothing was sent.
    Skipped,
}

/// Result of posting to the chat webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    Sent,
    /// The webhook is not configured; nothing was sent.
    Skipped,
}

/// The content store: system of record for members, events and resources.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Create a member record (status `new`, joined/updated now) and return it
    /// with its generated identifier.
    async fn create_member(
        &self,
        submission: &OnboardingSubmission,
    ) -> Result<MemberProfile, IntegrationError>;

    /// Published events dated from now on, earliest first.
    async fn upcoming_events(&self) -> Result<Vec<Event>, IntegrationError>;

    /// Resources, newest first, optionally restricted to one category.
    async fn resources(&self, category: Option<&str>) -> Result<Vec<Resource>, IntegrationError>;

    /// First member with exactly this email.
    async fn find_member_by_email(
        &self,
        email: &str,
    ) -> Result<Option<MemberProfile>, IntegrationError>;

    /// A single event by document id.
    async fn event_by_id(&self, id: &str) -> Result<Option<Event>, IntegrationError>;
}

/// The workspace database used to track members.
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    /// Update the entry whose email matches, or create one.
    async fn upsert_member(&self, member: &MemberProfile)
        -> Result<UpsertOutcome, IntegrationError>;
}

/// The chat webhook.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Post the welcome message with a short summary embed.
    async fn send_welcome(&self, member: &MemberProfile) -> Result<NotifyOutcome, IntegrationError>;

    /// Post the multi-line introduction with contact links.
    async fn post_introduction(
        &self,
        member: &MemberProfile,
    ) -> Result<NotifyOutcome, IntegrationError>;

    /// Welcome then introduce a new member. Stops at the first failed post.
    async fn announce_member(
        &self,
        member: &MemberProfile,
    ) -> Result<NotifyOutcome, IntegrationError> {
        let welcome = self.send_welcome(member).await?;
        let introduction = self.post_introduction(member).await?;
        tracing::debug!(?welcome, ?introduction, "Member announced");

        Ok(match (welcome, introduction) {
            (NotifyOutcome::Skipped, NotifyOutcome::Skipped) => NotifyOutcome::Skipped,
            _ => NotifyOutcome::Sent,
        })
    }

    /// Announce an event.
    async fn announce_event(&self, event: &Event) -> Result<NotifyOutcome, IntegrationError>;
}
