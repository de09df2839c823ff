//! Transient notifications.
//!
//! Each call to [`ToastNotifier::toast`] appends a new element to the
//! notification stack (created on first use, one per page). A timer task
//! then dismisses it in two stages: after the timeout the toast gets the
//! `hide` class so it can fade, and after a short grace period the element
//! is removed. Toasts are never deduplicated, capped, or queued.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ToastConfig;
use crate::ui::escape::escape_html;
use crate::view::{ids, ElementId, View};

/// Styling hint only; every severity behaves the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warn,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone)]
pub struct ToastNotifier {
    view: Arc<dyn View>,
    timeout: Duration,
    grace: Duration,
}

impl ToastNotifier {
    pub fn new(view: Arc<dyn View>, config: &ToastConfig) -> Self {
        Self {
            view,
            timeout: config.timeout(),
            grace: config.grace(),
        }
    }

    /// Shows a toast with the configured timeout.
    pub fn toast(&self, message: &str, severity: Severity) -> ElementId {
        self.toast_for(message, severity, self.timeout)
    }

    pub fn toast_for(&self, message: &str, severity: Severity, timeout: Duration) -> ElementId {
        match severity {
            Severity::Info | Severity::Success => tracing::info!(%severity, "{}", message),
            Severity::Warn => tracing::warn!(%severity, "{}", message),
            Severity::Error => tracing::error!(%severity, "{}", message),
        }

        let stack = self.ensure_stack();
        let id = ElementId::new(format!("toast-{}", uuid::Uuid::new_v4()));
        self.view.create(&id, Some(&stack));
        self.view.set_class(&id, "toast", true);
        self.view
            .set_class(&id, &format!("toast-{}", severity.as_str()), true);
        self.view.set_html(&id, &escape_html(message));

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let view = self.view.clone();
                let grace = self.grace;
                let toast_id = id.clone();
                handle.spawn(async move {
                    tokio::time::sleep(timeout).await;
                    view.set_class(&toast_id, "hide", true);
                    tokio::time::sleep(grace).await;
                    view.remove(&toast_id);
                });
            }
            Err(_) => tracing::debug!(toast = %id, "no runtime; toast will not auto-dismiss"),
        }

        id
    }

    fn ensure_stack(&self) -> ElementId {
        let stack = ElementId::new(ids::TOAST_STACK);
        if !self.view.exists(&stack) {
            self.view.create(&stack, None);
        }
        stack
    }
}
