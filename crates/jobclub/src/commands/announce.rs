//! Post an event announcement to the chat webhook.

use std::path::Path;

use anyhow::{Context, Result};

use jobclub_api::AppState;
use jobclub_integrations::{ContentStore, Notifier, NotifyOutcome};

use crate::config::{load_config, Integrations};

/// Run the announce command.
pub async fn run(config_path: &Path, event_id: &str) -> Result<()> {
    let config = load_config(config_path)?;
    let state = Integrations::from_env(&config.content)?.into_state();

    match announce(&state, event_id).await? {
        NotifyOutcome::Sent => tracing::info!("Announced event {}", event_id),
        NotifyOutcome::Skipped => {
            tracing::warn!("DISCORD_WEBHOOK_URL not set; nothing was posted")
        }
    }

    Ok(())
}

async fn announce(state: &AppState, event_id: &str) -> Result<NotifyOutcome> {
    let event = state
        .content
        .event_by_id(event_id)
        .await
        .context("Failed to fetch event")?
        .with_context(|| format!("Event not found: {event_id}"))?;

    state
        .notifier
        .announce_event(&event)
        .await
        .context("Failed to announce event")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use jobclub_integrations::{
        DiscordConfig, DiscordWebhook, NotionClient, SanityClient, SanityConfig,
    };
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn state(server: &MockServer) -> AppState {
        let content = SanityClient::new(SanityConfig {
            project_id: "proj".to_string(),
            ..Default::default()
        })
        .with_base_url(server.uri());
        let notifier = DiscordWebhook::new(Some(DiscordConfig {
            webhook_url: format!("{}/webhook", server.uri()),
            intro_channel_id: None,
        }));

        AppState::new(
            Arc::new(content),
            Arc::new(NotionClient::new(None)),
            Arc::new(notifier),
        )
    }

    #[tokio::test]
    async fn posts_the_stored_event() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param("$id", "\"evt-1\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": { "_id": "evt-1", "title": "Hack Night", "eventType": "hack-night" }
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/webhook"))
            .and(body_partial_json(json!({ "content": "📅 New Job Club Event: Hack Night" })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = announce(&state(&server), "evt-1").await.unwrap();

        assert_eq!(outcome, NotifyOutcome::Sent);
    }

    #[tokio::test]
    async fn fails_for_unknown_event_without_posting() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": null })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;

        let err = announce(&state(&server), "missing").await.unwrap_err();

        assert_eq!(err.to_string(), "Event not found: missing");
    }
}
