//! Content store client (Sanity HTTP API).

use async_trait::async_trait;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use jobclub_core::{Event, MemberProfile, OnboardingSubmission, Resource};

use crate::error::{check_status, IntegrationError, Service};
use crate::traits::ContentStore;

const SERVICE: Service = Service::ContentStore;

const EVENT_PROJECTION: &str = r#"{
  _id,
  title,
  description,
  eventType,
  date,
  endTime,
  location,
  zoomLink,
  capacity,
  registrationLink,
  tags,
  "speakers": speakers[]->{ _id, name, title, company, bio }
}"#;

const RESOURCE_PROJECTION: &str =
    "{ _id, title, slug, description, category, difficulty, timeToRead, publishedAt }";

/// Connection settings for the content store.
#[derive(Debug, Clone)]
pub struct SanityConfig {
    /// Project identifier
    pub project_id: String,

    /// Dataset name
    pub dataset: String,

    /// Token with write access (required for creating members)
    pub token: Option<String>,

    /// Dated API version, e.g. `2025-12-01`
    pub api_version: String,

    /// Serve queries from the CDN
    pub use_cdn: bool,
}

impl Default for SanityConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: "production".to_string(),
            token: None,
            api_version: "2025-12-01".to_string(),
            use_cdn: false,
        }
    }
}

#[derive(Deserialize)]
struct QueryResponse<T> {
    result: T,
}

#[derive(Deserialize)]
struct MutateResponse<T> {
    #[serde(default = "Vec::new")]
    results: Vec<MutateResult<T>>,
}

#[derive(Deserialize)]
struct MutateResult<T> {
    id: String,
    #[serde(default = "Option::default")]
    document: Option<T>,
}

/// Client for the content store's query and mutate endpoints.
pub struct SanityClient {
    config: SanityConfig,
    api_url: String,
    query_url: String,
    http: reqwest::Client,
}

impl SanityClient {
    /// Create a client for the hosted API.
    pub fn new(config: SanityConfig) -> Self {
        let api_url = format!("https://{}.api.sanity.io", config.project_id);
        let query_url = if config.use_cdn {
            format!("https://{}.apicdn.sanity.io", config.project_id)
        } else {
            api_url.clone()
        };

        Self {
            config,
            api_url,
            query_url,
            http: reqwest::Client::new(),
        }
    }

    /// Point both queries and mutations at another host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        self.query_url = base_url.clone();
        self.api_url = base_url;
        self
    }

    fn endpoint(&self, base: &str, kind: &str) -> String {
        format!(
            "{}/v{}/data/{}/{}",
            base, self.config.api_version, kind, self.config.dataset
        )
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Run a GROQ query. Parameters are bound as `$name` and JSON-encoded.
    pub async fn query<T: DeserializeOwned>(
        &self,
        groq: &str,
        params: &[(&str, Value)],
    ) -> Result<T, IntegrationError> {
        let mut pairs = vec![("query".to_string(), groq.to_string())];
        pairs.extend(
            params
                .iter()
                .map(|(name, value)| (format!("${name}"), value.to_string())),
        );

        tracing::debug!(query = groq, "Querying content store");

        let request = self
            .http
            .get(self.endpoint(&self.query_url, "query"))
            .query(&pairs);

        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(IntegrationError::transport(SERVICE))?;
        let response = check_status(SERVICE, response).await?;

        let body: QueryResponse<T> = response
            .json()
            .await
            .map_err(IntegrationError::decode(SERVICE))?;

        Ok(body.result)
    }

    /// Create a document and return the stored copy along with its id.
    pub async fn create<T>(&self, document: &T) -> Result<(String, Option<T>), IntegrationError>
    where
        T: Serialize + DeserializeOwned,
    {
        let request = self
            .http
            .post(self.endpoint(&self.api_url, "mutate"))
            .query(&[("returnDocuments", "true")])
            .json(&json!({ "mutations": [{ "create": document }] }));

        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(IntegrationError::transport(SERVICE))?;
        let response = check_status(SERVICE, response).await?;

        let body: MutateResponse<T> = response
            .json()
            .await
            .map_err(IntegrationError::decode(SERVICE))?;

        let result = body
            .results
            .into_iter()
            .next()
            .ok_or_else(|| IntegrationError::Decode {
                service: SERVICE,
                message: "mutation returned no results".to_string(),
            })?;

        Ok((result.id, result.document))
    }
}

#[async_trait]
impl ContentStore for SanityClient {
    async fn create_member(
        &self,
        submission: &OnboardingSubmission,
    ) -> Result<MemberProfile, IntegrationError> {
        let draft = MemberProfile::from_submission(submission, Utc::now());
        let (id, stored) = self.create(&draft).await?;

        let mut member = stored.unwrap_or(draft);
        member.id = Some(id);

        tracing::info!(member_id = member.member_id(), "Created member profile");
        Ok(member)
    }

    async fn upcoming_events(&self) -> Result<Vec<Event>, IntegrationError> {
        let groq = format!(
            r#"*[_type == "event" && status == "published" && dateTime(date) >= dateTime(now())] | order(date asc) {EVENT_PROJECTION}"#
        );
        self.query(&groq, &[]).await
    }

    async fn resources(&self, category: Option<&str>) -> Result<Vec<Resource>, IntegrationError> {
        let (filter, params) = match category {
            Some(category) => (
                "[category == $category]",
                vec![("category", Value::from(category))],
            ),
            None => ("", Vec::new()),
        };

        let groq = format!(
            r#"*[_type == "resource"]{filter} | order(publishedAt desc) {RESOURCE_PROJECTION}"#
        );
        self.query(&groq, &params).await
    }

    async fn find_member_by_email(
        &self,
        email: &str,
    ) -> Result<Option<MemberProfile>, IntegrationError> {
        self.query(
            r#"*[_type == "memberProfile" && email == $email][0]"#,
            &[("email", Value::from(email))],
        )
        .await
    }

    async fn event_by_id(&self, id: &str) -> Result<Option<Event>, IntegrationError> {
        let groq = format!(r#"*[_type == "event" && _id == $id][0] {EVENT_PROJECTION}"#);
        self.query(&groq, &[("id", Value::from(id))]).await
    }
}
