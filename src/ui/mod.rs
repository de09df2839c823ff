//! Shared UI kit used by every page controller.

pub mod escape;
pub mod skeleton;
pub mod status;
pub mod toast;

use std::sync::Arc;

use crate::config::ToastConfig;
use crate::view::View;

pub use skeleton::Skeleton;
pub use status::StatusReporter;
pub use toast::{Severity, ToastNotifier};

/// Status line and toast stack of one page.
#[derive(Clone)]
pub struct Feedback {
    pub status: StatusReporter,
    pub toasts: ToastNotifier,
}

impl Feedback {
    pub fn new(view: Arc<dyn View>, toast: &ToastConfig) -> Self {
        Self {
            status: StatusReporter::new(view.clone()),
            toasts: ToastNotifier::new(view, toast),
        }
    }
}
