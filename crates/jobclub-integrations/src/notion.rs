//! Workspace database client (Notion API).

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use jobclub_core::career_goal::tracker_label;
use jobclub_core::MemberProfile;

use crate::error::{check_status, IntegrationError, Service};
use crate::traits::{MemberDirectory, UpsertOutcome};

const SERVICE: Service = Service::WorkspaceDb;
const NOTION_VERSION: &str = "2022-06-28";
const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";

/// Credentials for the members database.
#[derive(Debug, Clone)]
pub struct NotionConfig {
    pub api_key: String,
    pub database_id: String,
}

#[derive(Deserialize)]
struct QueryResults {
    #[serde(default)]
    results: Vec<Page>,
}

#[derive(Deserialize)]
struct Page {
    id: String,
}

/// Client that mirrors member records into the workspace database.
///
/// Without a [`NotionConfig`] every call is a logged no-op.
pub struct NotionClient {
    config: Option<NotionConfig>,
    base_url: String,
    http: reqwest::Client,
}

impl NotionClient {
    pub fn new(config: Option<NotionConfig>) -> Self {
        if config.is_none() {
            tracing::warn!(
                "Notion integration not configured. Set NOTION_API_KEY and NOTION_DATABASE_ID."
            );
        }

        Self {
            config,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    fn request(
        &self,
        method: reqwest::Method,
        path: &str,
        config: &NotionConfig,
    ) -> reqwest::RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(&config.api_key)
            .header("Notion-Version", NOTION_VERSION)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value, IntegrationError> {
        let response = request
            .send()
            .await
            .map_err(IntegrationError::transport(SERVICE))?;
        let response = check_status(SERVICE, response).await?;

        response
            .json()
            .await
            .map_err(IntegrationError::decode(SERVICE))
    }

    /// Find the page whose `Email` property matches exactly.
    async fn find_page_by_email(
        &self,
        config: &NotionConfig,
        email: &str,
    ) -> Result<Option<String>, IntegrationError> {
        let path = format!("/databases/{}/query", config.database_id);
        let body = self
            .send(
                self.request(reqwest::Method::POST, &path, config)
                    .json(&json!({
                        "filter": { "property": "Email", "email": { "equals": email } }
                    })),
            )
            .await?;

        let results: QueryResults = serde_json::from_value(body).map_err(|e| {
            IntegrationError::Decode {
                service: SERVICE,
                message: e.to_string(),
            }
        })?;

        Ok(results.results.into_iter().next().map(|page| page.id))
    }

    async fn create_page(
        &self,
        config: &NotionConfig,
        member: &MemberProfile,
    ) -> Result<String, IntegrationError> {
        let body = self
            .send(
                self.request(reqwest::Method::POST, "/pages", config)
                    .json(&json!({
                        "parent": { "database_id": config.database_id },
                        "properties": member_properties(member),
                    })),
            )
            .await?;

        Ok(page_id(&body))
    }

    async fn update_page(
        &self,
        config: &NotionConfig,
        page_id: &str,
        member: &MemberProfile,
    ) -> Result<(), IntegrationError> {
        let path = format!("/pages/{page_id}");
        self.send(
            self.request(reqwest::Method::PATCH, &path, config)
                .json(&json!({ "properties": member_properties(member) })),
        )
        .await?;

        Ok(())
    }
}

fn page_id(body: &Value) -> String {
    body.get("id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[async_trait]
impl MemberDirectory for NotionClient {
    async fn upsert_member(
        &self,
        member: &MemberProfile,
    ) -> Result<UpsertOutcome, IntegrationError> {
        let Some(config) = &self.config else {
            tracing::warn!("Notion integration not configured, skipping member sync");
            return Ok(UpsertOutcome::Skipped);
        };

        let outcome = match self.find_page_by_email(config, &member.email).await? {
            Some(existing) => {
                self.update_page(config, &existing, member).await?;
                UpsertOutcome::Updated(existing)
            }
            None => UpsertOutcome::Created(self.create_page(config, member).await?),
        };

        tracing::info!(?outcome, "Synced member to Notion");
        Ok(outcome)
    }
}

fn rich_text(content: &str) -> Value {
    json!({ "rich_text": [{ "text": { "content": content } }] })
}

fn url(value: Option<&str>) -> Value {
    json!({ "url": value.filter(|v| !v.is_empty()) })
}

/// Map a member onto the database's properties.
///
/// Every property is always present; missing optional values become `null`
/// or an empty string so that updates clear stale data.
pub fn member_properties(member: &MemberProfile) -> Value {
    let joined = member.joined_date.unwrap_or_else(Utc::now).to_rfc3339();

    json!({
        "Name": { "title": [{ "text": { "content": member.name } }] },
        "Email": { "email": member.email },
        "Major": rich_text(member.major.as_deref().unwrap_or_default()),
        "Graduation Year": { "number": member.graduation_year },
        "Career Goal": { "select": { "name": tracker_label(member.career_goal.as_deref()) } },
        "LinkedIn": url(member.linkedin_url.as_deref()),
        "GitHub": url(member.github_url.as_deref()),
        "Portfolio": url(member.portfolio_url.as_deref()),
        "Calendly": url(member.calendly_url.as_deref()),
        "Status": { "select": { "name": member.status().as_str() } },
        "Joined": { "date": { "start": joined } },
        "Discord Username": rich_text(member.discord_username.as_deref().unwrap_or_default()),
    })
}
