//! Single-question form of the main page.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::api::Backend;
use crate::outcome::Outcome;
use crate::ui::{Feedback, Severity, Skeleton};
use crate::view::{ids, ElementId, View};

/// Rendered when the backend answers without an `answer` field.
pub const NO_ANSWER: &str = "(no answer)";
/// Rendered when the request fails.
pub const ERROR_TEXT: &str = "(error)";

pub struct AskController {
    view: Arc<dyn View>,
    backend: Arc<dyn Backend>,
    feedback: Feedback,
    input: ElementId,
    answer_box: ElementId,
    generation: AtomicU64,
}

impl AskController {
    pub fn new(view: Arc<dyn View>, backend: Arc<dyn Backend>, feedback: Feedback) -> Self {
        Self {
            view,
            backend,
            feedback,
            input: ElementId::new(ids::QUESTION_INPUT),
            answer_box: ElementId::new(ids::ANSWER_BOX),
            generation: AtomicU64::new(0),
        }
    }

    /// Types `question` into the input and submits it.
    pub async fn submit(&self, question: &str) -> Outcome {
        self.view.set_value(&self.input, question);
        self.ask().await
    }

    /// Submits the question currently in the input.
    pub async fn ask(&self) -> Outcome {
        let raw = self.view.value(&self.input).unwrap_or_default();
        let question = raw.trim();
        if question.is_empty() {
            self.feedback
                .toasts
                .toast("Please enter a question.", Severity::Warn);
            return Outcome::Rejected;
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.feedback.status.set_status("Asking...");
        Skeleton::Answer.show(self.view.as_ref(), &self.answer_box);

        let result = self.backend.ask(question).await;

        let outcome = if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(generation, "dropping superseded answer");
            Outcome::Stale
        } else {
            match result {
                Ok(res) => {
                    let answer = res.answer.as_deref().unwrap_or(NO_ANSWER);
                    self.view.set_text(&self.answer_box, answer);
                    self.feedback.toasts.toast("Answer ready.", Severity::Success);
                    Outcome::Done
                }
                Err(e) => {
                    self.view.set_text(&self.answer_box, ERROR_TEXT);
                    self.feedback.toasts.toast("Ask failed.", Severity::Error);
                    Outcome::Failed(e.to_string())
                }
            }
        };

        self.feedback.status.ready();
        outcome
    }
}
