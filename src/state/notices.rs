//! User-facing notices
//!
//! Every mutating action either merges state or surfaces a human-readable
//! message. The notifier is the sink the host UI drains to render toasts.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::utils::errors::PortalError;

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

/// One message destined for the user
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub id: Uuid,
    pub level: NoticeLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Collecting sink for user-facing notices.
///
/// Cloning shares the queue; the host UI drains it after each action.
#[derive(Clone, Default)]
pub struct Notifier {
    queue: Arc<Mutex<Vec<Notice>>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, level: NoticeLevel, message: String) {
        debug!(level = ?level, message = %message, "Notice queued");
        let mut queue = self.queue.lock().expect("notice queue poisoned");
        queue.push(Notice {
            id: Uuid::new_v4(),
            level,
            message,
            created_at: Utc::now(),
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Info, message.into());
    }

    /// Queue the user-facing rendering of an error.
    ///
    /// Cancelled and in-flight refusals stay silent: the former has no
    /// surface left to show on, the latter maps to a disabled control.
    pub fn report(&self, error: &PortalError) {
        if error.is_silent() {
            debug!(error = %error, "Suppressing notice for silent error");
            return;
        }
        self.error(error.user_message());
    }

    /// Drain all pending notices in arrival order
    pub fn drain(&self) -> Vec<Notice> {
        let mut queue = self.queue.lock().expect("notice queue poisoned");
        std::mem::take(&mut *queue)
    }

    pub fn len(&self) -> usize {
        self.queue.lock().expect("notice queue poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
