//! Errors raised by the integration clients.

use std::fmt;

/// The external system a request was sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// Headless content store (Sanity).
    ContentStore,
    /// Workspace database (Notion).
    WorkspaceDb,
    /// Chat webhook (Discord).
    ChatWebhook,
}

impl Service {
    pub fn name(self) -> &'static str {
        match self {
            Self::ContentStore => "Sanity",
            Self::WorkspaceDb => "Notion",
            Self::ChatWebhook => "Discord",
        }
    }

    /// Pull the human-readable message out of an error response body.
    ///
    /// The webhook answers with plain text worth showing verbatim; the other
    /// two answer with JSON error objects.
    pub(crate) fn error_message(self, body: &str) -> String {
        if self == Self::ChatWebhook {
            return body.to_string();
        }

        let Ok(json) = serde_json::from_str::<serde_json::Value>(body) else {
            return body.to_string();
        };

        json.get("message")
            .and_then(|m| m.as_str())
            .or_else(|| json.pointer("/error/description").and_then(|m| m.as_str()))
            .or_else(|| json.get("error").and_then(|m| m.as_str()))
            .map(str::to_string)
            .unwrap_or_else(|| body.to_string())
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors that can occur when talking to an external system.
#[derive(Debug, thiserror::Error)]
pub enum IntegrationError {
    #[error("{service} request failed: {source}")]
    Transport {
        service: Service,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} API error: {message}")]
    Api {
        service: Service,
        status: u16,
        message: String,
    },

    #[error("{service} returned an unexpected response: {message}")]
    Decode { service: Service, message: String },
}

impl IntegrationError {
    pub fn service(&self) -> Service {
        match self {
            Self::Transport { service, .. }
            | Self::Api { service, .. }
            | Self::Decode { service, .. } => *service,
        }
    }

    pub(crate) fn transport(service: Service) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| Self::Transport { service, source }
    }

    pub(crate) fn decode(service: Service) -> impl FnOnce(reqwest::Error) -> Self {
        move |e| Self::Decode {
            service,
            message: e.to_string(),
        }
    }
}

/// Pass successful responses through; turn anything else into
/// [`IntegrationError::Api`] carrying the upstream message.
pub(crate) async fn check_status(
    service: Service,
    response: reqwest::Response,
) -> Result<reqwest::Response, IntegrationError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(IntegrationError::Api {
        service,
        status: status.as_u16(),
        message: service.error_message(&body),
    })
}
