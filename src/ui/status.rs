use std::sync::Arc;

use crate::view::{ids, ElementId, View};

/// Label shown when no operation is in flight.
pub const READY: &str = "Ready";

/// Writes the single status line of a page.
///
/// A page without a status element is tolerated: writes are dropped.
#[derive(Clone)]
pub struct StatusReporter {
    view: Arc<dyn View>,
    target: ElementId,
}

impl StatusReporter {
    pub fn new(view: Arc<dyn View>) -> Self {
        Self {
            view,
            target: ElementId::new(ids::STATUS),
        }
    }

    pub fn set_status(&self, message: &str) {
        if !self.view.set_text(&self.target, message) {
            tracing::debug!(message, "no status element; status dropped");
        }
    }

    pub fn ready(&self) {
        self.set_status(READY);
    }
}
