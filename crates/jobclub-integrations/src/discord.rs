//! Chat webhook client (Discord).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use jobclub_core::career_goal::announcement_label;
use jobclub_core::{Event, MemberProfile};

use crate::error::{check_status, IntegrationError, Service};
use crate::traits::{Notifier, NotifyOutcome};

const SERVICE: Service = Service::ChatWebhook;
const BRAND_COLOR: u32 = 0x6366f1;
const FOOTER: &str = "Job Club | AI Career Accelerator";
const NOT_SPECIFIED: &str = "Not specified";

/// Webhook settings.
#[derive(Debug, Clone)]
pub struct DiscordConfig {
    /// Incoming webhook URL
    pub webhook_url: String,

    /// Channel that introductions are expected to land in
    pub intro_channel_id: Option<String>,
}

/// A webhook message body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookMessage {
    pub content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
}

/// A rich embed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub fields: Vec<EmbedField>,
    pub footer: EmbedFooter,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

impl EmbedField {
    fn new(name: &str, value: impl Into<String>, inline: bool) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
            inline,
        }
    }
}

/// Build the welcome message posted when a member joins.
pub fn welcome_message(member: &MemberProfile, now: DateTime<Utc>) -> WebhookMessage {
    let graduation = member
        .graduation_year
        .map(|y| y.to_string())
        .unwrap_or_else(|| NOT_SPECIFIED.to_string());

    WebhookMessage {
        content: format!("🎉 Welcome to Job Club, {}!", member.name),
        embeds: vec![Embed {
            title: format!("{} has joined Job Club! 👋", member.name),
            description:
                "Welcome to the NJIT Job Club community! We're excited to have you here."
                    .to_string(),
            color: BRAND_COLOR,
            fields: vec![
                EmbedField::new(
                    "Major",
                    member.major.as_deref().unwrap_or(NOT_SPECIFIED),
                    true,
                ),
                EmbedField::new("Graduation Year", graduation, true),
                EmbedField::new(
                    "Career Goal",
                    announcement_label(member.career_goal.as_deref()),
                    false,
                ),
            ],
            footer: EmbedFooter {
                text: FOOTER.to_string(),
            },
            timestamp: now.to_rfc3339(),
        }],
    }
}

/// Build the multi-line introduction text.
pub fn introduction_text(member: &MemberProfile) -> String {
    let links: Vec<String> = [
        ("LinkedIn", &member.linkedin_url),
        ("GitHub", &member.github_url),
        ("Portfolio", &member.portfolio_url),
    ]
    .into_iter()
    .filter_map(|(label, url)| {
        url.as_deref()
            .filter(|u| !u.is_empty())
            .map(|u| format!("[{label}]({u})"))
    })
    .collect();

    let graduation = member
        .graduation_year
        .map(|y| y.to_string())
        .unwrap_or_else(|| NOT_SPECIFIED.to_string());

    let mut text = format!("## {}\n", member.name);
    text.push_str(&format!(
        "**Major:** {}\n",
        member.major.as_deref().unwrap_or(NOT_SPECIFIED)
    ));
    text.push_str(&format!("**Graduation:** {graduation}\n"));
    text.push_str(&format!(
        "**Career Goal:** {}\n",
        announcement_label(member.career_goal.as_deref())
    ));

    if !links.is_empty() {
        text.push_str(&format!("\n**Connect:** {}\n", links.join(" • ")));
    }

    if let Some(calendly) = member.calendly_url.as_deref().filter(|u| !u.is_empty()) {
        text.push_str(&format!(
            "\n[Schedule time with {}]({})",
            member.name, calendly
        ));
    }

    text
}

/// Build the announcement for an event.
pub fn event_message(event: &Event, now: DateTime<Utc>) -> WebhookMessage {
    let emoji = event.kind().map(|k| k.emoji()).unwrap_or("📌");

    let when = event
        .date
        .map(|d| d.format("%a, %b %-d %Y, %-I:%M %p UTC").to_string())
        .unwrap_or_else(|| "TBD".to_string());

    let location = match (present(&event.location), present(&event.zoom_link)) {
        (Some(location), _) => location.to_string(),
        (None, Some(_)) => "Virtual".to_string(),
        (None, None) => "TBD".to_string(),
    };

    let mut fields = vec![
        EmbedField::new("Date & Time", when, true),
        EmbedField::new("Location", location, true),
    ];
    if let Some(link) = present(&event.registration_link) {
        fields.push(EmbedField::new(
            "Register",
            format!("[Click here]({link})"),
            false,
        ));
    }

    WebhookMessage {
        content: format!("📅 New Job Club Event: {}", event.title),
        embeds: vec![Embed {
            title: format!("{} {}", emoji, event.title),
            description: event.description.clone().unwrap_or_default(),
            color: BRAND_COLOR,
            fields,
            footer: EmbedFooter {
                text: FOOTER.to_string(),
            },
            timestamp: now.to_rfc3339(),
        }],
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Client that posts to the chat webhook.
///
/// Without a [`DiscordConfig`] every post is a logged no-op.
pub struct DiscordWebhook {
    config: Option<DiscordConfig>,
    http: reqwest::Client,
}

impl DiscordWebhook {
    pub fn new(config: Option<DiscordConfig>) -> Self {
        if config.is_none() {
            tracing::warn!("Discord integration not configured. Set DISCORD_WEBHOOK_URL.");
        }

        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    async fn post(
        &self,
        what: &str,
        message: &WebhookMessage,
    ) -> Result<NotifyOutcome, IntegrationError> {
        let Some(config) = &self.config else {
            tracing::warn!("Discord integration not configured, skipping {}", what);
            return Ok(NotifyOutcome::Skipped);
        };

        let response = self
            .http
            .post(&config.webhook_url)
            .json(message)
            .send()
            .await
            .map_err(IntegrationError::transport(SERVICE))?;
        check_status(SERVICE, response).await?;

        tracing::debug!(channel = ?config.intro_channel_id, "Posted {} to Discord", what);
        Ok(NotifyOutcome::Sent)
    }
}

#[async_trait]
impl Notifier for DiscordWebhook {
    async fn send_welcome(&self, member: &MemberProfile) -> Result<NotifyOutcome, IntegrationError> {
        self.post("welcome message", &welcome_message(member, Utc::now()))
            .await
    }

    async fn post_introduction(
        &self,
        member: &MemberProfile,
    ) -> Result<NotifyOutcome, IntegrationError> {
        let message = WebhookMessage {
            content: introduction_text(member),
            embeds: Vec::new(),
        };
        self.post("introduction", &message).await
    }

    async fn announce_event(&self, event: &Event) -> Result<NotifyOutcome, IntegrationError> {
        self.post("event notification", &event_message(event, Utc::now()))
            .await
    }
}
