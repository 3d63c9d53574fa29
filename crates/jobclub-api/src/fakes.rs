//! In-memory stand-ins for the integration clients.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use jobclub_core::{Event, MemberProfile, OnboardingSubmission, Resource};
use jobclub_integrations::{
    ContentStore, IntegrationError, MemberDirectory, Notifier, NotifyOutcome, Service,
    UpsertOutcome,
};

use crate::state::AppState;

static NEXT_ID: AtomicUsize = AtomicUsize::new(1);

pub fn api_failure(service: Service, status: u16, message: &str) -> IntegrationError {
    IntegrationError::Api {
        service,
        status,
        message: message.to_string(),
    }
}

#[derive(Default)]
pub struct FakeContentStore {
    pub created: Mutex<Vec<MemberProfile>>,
    pub fail_create: Option<String>,
    pub events: Vec<Event>,
    pub resources: Vec<Resource>,
    pub members: Vec<MemberProfile>,
    pub categories_requested: Mutex<Vec<Option<String>>>,
    pub fail_reads: Option<String>,
}

#[async_trait]
impl ContentStore for FakeContentStore {
    async fn create_member(
        &self,
        submission: &OnboardingSubmission,
    ) -> Result<MemberProfile, IntegrationError> {
        if let Some(msg) = &self.fail_create {
            return Err(api_failure(Service::ContentStore, 401, msg));
        }

        let mut member = MemberProfile::from_submission(submission, Utc::now());
        member.id = Some(format!("member-{}", NEXT_ID.fetch_add(1, Ordering::SeqCst)));
        self.created.lock().unwrap().push(member.clone());
        Ok(member)
    }

    async fn upcoming_events(&self) -> Result<Vec<Event>, IntegrationError> {
        if let Some(msg) = &self.fail_reads {
            return Err(api_failure(Service::ContentStore, 500, msg));
        }
        Ok(self.events.clone())
    }

    async fn resources(&self, category: Option<&str>) -> Result<Vec<Resource>, IntegrationError> {
        if let Some(msg) = &self.fail_reads {
            return Err(api_failure(Service::ContentStore, 500, msg));
        }
        self.categories_requested
            .lock()
            .unwrap()
            .push(category.map(str::to_string));

        Ok(self
            .resources
            .iter()
            .filter(|r| category.is_none() || r.category.as_deref() == category)
            .cloned()
            .collect())
    }

    async fn find_member_by_email(
        &self,
        email: &str,
    ) -> Result<Option<MemberProfile>, IntegrationError> {
        if let Some(msg) = &self.fail_reads {
            return Err(api_failure(Service::ContentStore, 500, msg));
        }
        Ok(self.members.iter().find(|m| m.email == email).cloned())
    }

    async fn event_by_id(&self, id: &str) -> Result<Option<Event>, IntegrationError> {
        Ok(self.events.iter().find(|e| e.id == id).cloned())
    }
}

#[derive(Default)]
pub struct FakeDirectory {
    pub upserts: AtomicUsize,
    pub fail: Option<String>,
}

#[async_trait]
impl MemberDirectory for FakeDirectory {
    async fn upsert_member(
        &self,
        member: &MemberProfile,
    ) -> Result<UpsertOutcome, IntegrationError> {
        if let Some(msg) = &self.fail {
            return Err(api_failure(Service::WorkspaceDb, 400, msg));
        }
        self.upserts.fetch_add(1, Ordering::SeqCst);
        Ok(UpsertOutcome::Created(format!("page-{}", member.member_id())))
    }
}

#[derive(Default)]
pub struct FakeNotifier {
    pub welcomes: AtomicUsize,
    pub introductions: AtomicUsize,
    pub fail: Option<String>,
}

impl FakeNotifier {
    fn check(&self) -> Result<(), IntegrationError> {
        match &self.fail {
            Some(msg) => Err(api_failure(Service::ChatWebhook, 500, msg)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Notifier for FakeNotifier {
    async fn send_welcome(&self, _member: &MemberProfile) -> Result<NotifyOutcome, IntegrationError> {
        self.check()?;
        self.welcomes.fetch_add(1, Ordering::SeqCst);
        Ok(NotifyOutcome::Sent)
    }

    async fn post_introduction(
        &self,
        _member: &MemberProfile,
    ) -> Result<NotifyOutcome, IntegrationError> {
        self.check()?;
        self.introductions.fetch_add(1, Ordering::SeqCst);
        Ok(NotifyOutcome::Sent)
    }

    async fn announce_event(&self, _event: &Event) -> Result<NotifyOutcome, IntegrationError> {
        self.check()?;
        Ok(NotifyOutcome::Sent)
    }
}

/// Fakes plus the state wired from them.
pub struct Harness {
    pub content: Arc<FakeContentStore>,
    pub directory: Arc<FakeDirectory>,
    pub notifier: Arc<FakeNotifier>,
}

impl Harness {
    pub fn new(content: FakeContentStore, directory: FakeDirectory, notifier: FakeNotifier) -> Self {
        Self {
            content: Arc::new(content),
            directory: Arc::new(directory),
            notifier: Arc::new(notifier),
        }
    }

    pub fn state(&self) -> AppState {
        AppState::new(
            self.content.clone(),
            self.directory.clone(),
            self.notifier.clone(),
        )
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new(
            FakeContentStore::default(),
            FakeDirectory::default(),
            FakeNotifier::default(),
        )
    }
}

/// Send one request through the router and decode the JSON body (`Null` when empty).
pub async fn call(
    app: axum::Router,
    request: axum::http::Request<axum::body::Body>,
) -> (axum::http::StatusCode, serde_json::Value) {
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(axum::body::Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap()
}
