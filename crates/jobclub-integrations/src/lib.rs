//! Clients for the systems an onboarding fans out to.
//!
//! Each external system sits behind a trait in [`traits`] so the API layer can
//! be wired with real HTTP clients at startup and with fakes in tests.

pub mod discord;
pub mod error;
pub mod notion;
pub mod sanity;
pub mod traits;

pub use discord::{DiscordConfig, DiscordWebhook, Embed, EmbedField, WebhookMessage};
pub use error::{IntegrationError, Service};
pub use notion::{member_properties, NotionClient, NotionConfig};
pub use sanity::{SanityClient, SanityConfig};
pub use traits::{ContentStore, MemberDirectory, Notifier, NotifyOutcome, UpsertOutcome};
