//! Sample-query catalog of the testing page.
//!
//! The controller owns a [`CatalogSession`]: the queries loaded from the
//! backend and the answer cell of every row, keyed by query id. The map is
//! rebuilt on each table render, so per-row updates never construct
//! element ids by hand.
//!
//! ```text
//! load_queries ──▶ session + table rows ──▶ run_single(id) / run_all
//!                                              │
//!                                              ▼
//!                                   answer cell of each row
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use crate::api::Backend;
use crate::ask::{ERROR_TEXT, NO_ANSWER};
use crate::models::{BulkAskItem, SampleQuery};
use crate::outcome::Outcome;
use crate::progress::{ElementProgress, NoProgress, ProgressEvent, ProgressReporter};
use crate::ui::escape::escape_html;
use crate::ui::{Feedback, Severity, Skeleton};
use crate::view::{ids, ElementId, View};

/// Queries of the current page load and their answer cells.
#[derive(Debug, Default, Clone)]
pub struct CatalogSession {
    queries: Vec<SampleQuery>,
    cells: HashMap<String, ElementId>,
}

impl CatalogSession {
    /// Builds the session for `queries`, deriving one answer cell per id.
    /// A repeated id keeps its first occurrence; later ones are dropped so
    /// every row, cell and bulk item maps to exactly one query.
    pub fn new(queries: Vec<SampleQuery>) -> Self {
        let mut taken = HashSet::new();
        let mut cells = HashMap::new();
        let mut unique = Vec::with_capacity(queries.len());
        for q in queries {
            if cells.contains_key(&q.id) {
                tracing::debug!(id = %q.id, "duplicate query id dropped");
                continue;
            }
            let cell = answer_cell_id(&q.id, &mut taken);
            cells.insert(q.id.clone(), cell);
            unique.push(q);
        }
        Self {
            queries: unique,
            cells,
        }
    }

    pub fn queries(&self) -> &[SampleQuery] {
        &self.queries
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&SampleQuery> {
        self.queries.iter().find(|q| q.id == id)
    }

    pub fn cell(&self, id: &str) -> Option<&ElementId> {
        self.cells.get(id)
    }
}

/// `ans-<id>` with characters outside `[A-Za-z0-9_-]` mapped to `_`.
/// A numeric suffix keeps ids unique when two query ids sanitize alike.
fn answer_cell_id(query_id: &str, taken: &mut HashSet<String>) -> ElementId {
    let sanitized: String = query_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let base = format!("ans-{}", sanitized);

    let mut candidate = base.clone();
    let mut n = 2;
    while taken.contains(&candidate) {
        candidate = format!("{}-{}", base, n);
        n += 1;
    }
    taken.insert(candidate.clone());
    ElementId::new(candidate)
}

pub struct QueryCatalogController {
    view: Arc<dyn View>,
    backend: Arc<dyn Backend>,
    feedback: Feedback,
    session: Mutex<CatalogSession>,
    counter: ElementProgress,
    reporter: Box<dyn ProgressReporter>,
    table_body: ElementId,
    run_all: ElementId,
}

impl QueryCatalogController {
    pub fn new(view: Arc<dyn View>, backend: Arc<dyn Backend>, feedback: Feedback) -> Self {
        Self {
            counter: ElementProgress::new(view.clone()),
            view,
            backend,
            feedback,
            session: Mutex::new(CatalogSession::default()),
            reporter: Box::new(NoProgress),
            table_body: ElementId::new(ids::QUERY_TABLE_BODY),
            run_all: ElementId::new(ids::RUN_ALL),
        }
    }

    /// Mirrors bulk progress to an extra sink besides the page counter.
    pub fn with_reporter(mut self, reporter: Box<dyn ProgressReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn session(&self) -> CatalogSession {
        self.session.lock().unwrap().clone()
    }

    pub async fn load_queries(&self) -> Outcome {
        self.feedback.status.set_status("Loading queries...");
        Skeleton::Table.show(self.view.as_ref(), &self.table_body);

        match self.backend.sample_queries().await {
            Ok(queries) => {
                let session = CatalogSession::new(queries);
                self.render_table(&session);
                let count = session.queries().len();
                *self.session.lock().unwrap() = session;

                self.view.set_disabled(&self.run_all, false);
                self.feedback
                    .toasts
                    .toast(&format!("Loaded {} queries.", count), Severity::Success);
                self.feedback.status.ready();
                Outcome::Done
            }
            Err(e) => {
                self.feedback.status.set_status("Failed to load queries");
                self.feedback
                    .toasts
                    .toast("Could not load sample queries.", Severity::Error);
                Outcome::Failed(e.to_string())
            }
        }
    }

    /// Writes the row markup into the table body, then creates one child
    /// element per answer cell under the same id as the row's empty
    /// `<td>`. Answers are written to those child elements only; the body
    /// markup stays the static template it was rendered as.
    fn render_table(&self, session: &CatalogSession) {
        let rows: String = session
            .queries()
            .iter()
            .filter_map(|q| session.cell(&q.id).map(|cell| render_row(q, cell)))
            .collect();
        self.view.set_html(&self.table_body, &rows);

        for q in session.queries() {
            if let Some(cell) = session.cell(&q.id) {
                self.view.create(cell, Some(&self.table_body));
            }
        }
    }

    pub async fn run_single(&self, id: &str) -> Outcome {
        let (query, cell) = {
            let session = self.session.lock().unwrap();
            match (session.find(id), session.cell(id)) {
                (Some(q), Some(c)) => (q.clone(), c.clone()),
                _ => {
                    tracing::debug!(id, "run requested for unknown query");
                    return Outcome::Skipped;
                }
            }
        };

        self.feedback
            .status
            .set_status(&format!("Running {}...", query.id));
        Skeleton::Cell.show(self.view.as_ref(), &cell);

        let outcome = match self.backend.ask(&query.text).await {
            Ok(res) => {
                let answer = res.answer.as_deref().unwrap_or(NO_ANSWER);
                self.view.set_text(&cell, answer);
                self.feedback
                    .toasts
                    .toast(&format!("{} answered.", query.id), Severity::Success);
                Outcome::Done
            }
            Err(e) => {
                self.view.set_text(&cell, ERROR_TEXT);
                self.feedback
                    .toasts
                    .toast(&format!("{} failed.", query.id), Severity::Error);
                Outcome::Failed(e.to_string())
            }
        };

        self.feedback.status.ready();
        outcome
    }

    pub async fn run_all(&self) -> Outcome {
        let session = self.session();
        if session.is_empty() {
            self.feedback
                .toasts
                .toast("Load the queries first.", Severity::Warn);
            return Outcome::Skipped;
        }

        let items: Vec<BulkAskItem> = session
            .queries()
            .iter()
            .map(|q| BulkAskItem {
                id: q.id.clone(),
                question: q.text.clone(),
            })
            .collect();

        self.feedback
            .status
            .set_status(&format!("Running {} queries...", items.len()));
        for q in session.queries() {
            if let Some(cell) = session.cell(&q.id) {
                Skeleton::Cell.show(self.view.as_ref(), cell);
            }
        }
        self.report(ProgressEvent {
            n: 0,
            total: items.len() as u64,
        });

        let outcome = match self.backend.bulk_ask(items).await {
            Ok(results) => {
                let total = results.len() as u64;
                if total == 0 {
                    self.report(ProgressEvent { n: 0, total: 0 });
                }
                for (i, result) in results.iter().enumerate() {
                    match result.id.as_deref().and_then(|id| session.cell(id)) {
                        Some(cell) => {
                            self.view.set_text(cell, &result.answer);
                        }
                        None => tracing::debug!(id = ?result.id, "bulk result for unknown query"),
                    }
                    self.report(ProgressEvent {
                        n: i as u64 + 1,
                        total,
                    });
                }
                self.feedback
                    .toasts
                    .toast(&format!("{} answers received.", total), Severity::Success);
                Outcome::Done
            }
            Err(e) => {
                self.feedback.toasts.toast("Bulk run failed.", Severity::Error);
                Outcome::Failed(e.to_string())
            }
        };

        self.feedback.status.ready();
        outcome
    }

    fn report(&self, event: ProgressEvent) {
        self.counter.report(event);
        self.reporter.report(event);
    }
}

fn render_row(q: &SampleQuery, cell: &ElementId) -> String {
    let badge = if q.behavioral {
        r#"<span class="badge yes">Yes</span>"#
    } else {
        "No"
    };
    let id = escape_html(&q.id);
    format!(
        concat!(
            r#"<tr data-id="{id}">"#,
            "<td>{id}</td>",
            "<td>{text}</td>",
            "<td>{badge}</td>",
            r#"<td id="{cell}" class="answer"></td>"#,
            r#"<td><button class="run" data-id="{id}">Run</button></td>"#,
            "</tr>"
        ),
        id = id,
        text = escape_html(&q.text),
        badge = badge,
        cell = cell,
    )
}
