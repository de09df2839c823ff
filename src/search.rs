//! Semantic search form of the main page.
//!
//! Results are rendered in backend order. Each row shows the escaped
//! title, the score to three decimals, and the content cut to
//! `snippet_chars` characters (cut first, escaped second). A failed
//! search puts the last rendered results back in place of the skeleton.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::api::Backend;
use crate::models::{SearchFilters, SearchResult};
use crate::outcome::Outcome;
use crate::ui::escape::{escape_html, format_score, truncate_chars};
use crate::ui::{Feedback, Severity, Skeleton};
use crate::view::{ids, ElementId, View};

pub const NO_MATCHES: &str = "(no matches)";

pub struct SearchController {
    view: Arc<dyn View>,
    backend: Arc<dyn Backend>,
    feedback: Feedback,
    snippet_chars: usize,
    input: ElementId,
    results: ElementId,
    generation: AtomicU64,
    /// Markup of the last settled result list. Never a skeleton.
    rendered: Mutex<String>,
}

impl SearchController {
    pub fn new(
        view: Arc<dyn View>,
        backend: Arc<dyn Backend>,
        feedback: Feedback,
        snippet_chars: usize,
    ) -> Self {
        let results = ElementId::new(ids::SEARCH_RESULTS);
        let rendered = view
            .content(&results)
            .map(|c| c.html())
            .unwrap_or_default();
        Self {
            view,
            backend,
            feedback,
            snippet_chars,
            input: ElementId::new(ids::SEARCH_INPUT),
            results,
            generation: AtomicU64::new(0),
            rendered: Mutex::new(rendered),
        }
    }

    /// Types `query` into the input and searches.
    pub async fn submit(&self, query: &str, filters: &SearchFilters) -> Outcome {
        self.view.set_value(&self.input, query);
        self.search_with(filters).await
    }

    pub async fn search(&self) -> Outcome {
        self.search_with(&SearchFilters::default()).await
    }

    pub async fn search_with(&self, filters: &SearchFilters) -> Outcome {
        let raw = self.view.value(&self.input).unwrap_or_default();
        let query = raw.trim();
        if query.is_empty() {
            self.feedback
                .toasts
                .toast("Please enter a search term.", Severity::Warn);
            return Outcome::Rejected;
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.feedback.status.set_status("Searching...");
        Skeleton::SearchRows.show(self.view.as_ref(), &self.results);

        let result = self.backend.search(query, filters).await;

        let outcome = if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(generation, "dropping superseded search results");
            Outcome::Stale
        } else {
            match result {
                Ok(hits) => {
                    let markup = render_results(&hits, self.snippet_chars);
                    self.view.set_html(&self.results, &markup);
                    *self.rendered.lock().unwrap() = markup;
                    self.feedback.toasts.toast(
                        &format!("{} result(s).", hits.len()),
                        Severity::Success,
                    );
                    Outcome::Done
                }
                Err(e) => {
                    let previous = self.rendered.lock().unwrap().clone();
                    self.view.set_html(&self.results, &previous);
                    self.feedback.toasts.toast("Search failed.", Severity::Error);
                    Outcome::Failed(e.to_string())
                }
            }
        };

        self.feedback.status.ready();
        outcome
    }
}

/// Markup for a result list; a single placeholder row when empty.
pub fn render_results(hits: &[SearchResult], snippet_chars: usize) -> String {
    if hits.is_empty() {
        return format!(r#"<div class="result empty">{}</div>"#, NO_MATCHES);
    }

    hits.iter()
        .map(|hit| {
            format!(
                concat!(
                    r#"<div class="result">"#,
                    r#"<div class="result-head"><strong>{}</strong> "#,
                    r#"<span class="score">{}</span></div>"#,
                    r#"<div class="result-body">{}</div>"#,
                    "</div>"
                ),
                escape_html(&hit.title),
                format_score(hit.score),
                escape_html(&truncate_chars(&hit.content, snippet_chars)),
            )
        })
        .collect()
}
