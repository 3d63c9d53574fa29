//! Shared handler state.

use std::sync::Arc;

use jobclub_integrations::{ContentStore, MemberDirectory, Notifier};

/// Clients built once at startup and shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub content: Arc<dyn ContentStore>,
    pub directory: Arc<dyn MemberDirectory>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(
        content: Arc<dyn ContentStore>,
        directory: Arc<dyn MemberDirectory>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            content,
            directory,
            notifier,
        }
    }
}
