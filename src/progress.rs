//! Bulk-run progress reporting.
//!
//! The testing page always shows a `completed/total` counter in its
//! progress element ([`ElementProgress`]). The CLI can mirror the same
//! events on **stderr** so stdout stays parseable for scripts.

use std::io::Write;
use std::sync::Arc;

use crate::view::{ids, ElementId, View};

/// `n` answers written out of `total`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressEvent {
    pub n: u64,
    pub total: u64,
}

impl ProgressEvent {
    pub fn label(&self) -> String {
        format!("{}/{}", self.n, self.total)
    }
}

pub trait ProgressReporter: Send + Sync {
    fn report(&self, event: ProgressEvent);
}

/// Writes the counter into the page's progress element.
pub struct ElementProgress {
    view: Arc<dyn View>,
    target: ElementId,
}

impl ElementProgress {
    pub fn new(view: Arc<dyn View>) -> Self {
        Self {
            view,
            target: ElementId::new(ids::PROGRESS),
        }
    }
}

impl ProgressReporter for ElementProgress {
    fn report(&self, event: ProgressEvent) {
        self.view.set_text(&self.target, &event.label());
    }
}

/// Human-friendly progress on stderr: "run-all  12 / 40 answered".
pub struct StderrProgress;

impl ProgressReporter for StderrProgress {
    fn report(&self, event: ProgressEvent) {
        let line = format!(
            "run-all  {} / {} answered\n",
            format_number(event.n),
            format_number(event.total)
        );
        let _ = std::io::stderr().lock().write_all(line.as_bytes());
        let _ = std::io::stderr().lock().flush();
    }
}

/// Machine-readable progress: one JSON object per line on stderr.
pub struct JsonProgress;

impl ProgressReporter for JsonProgress {
    fn report(&self, event: ProgressEvent) {
        let obj = serde_json::json!({
            "event": "progress",
            "phase": "answering",
            "n": event.n,
            "total": event.total
        });
        if let Ok(line) = serde_json::to_string(&obj) {
            let _ = writeln!(std::io::stderr().lock(), "{}", line);
            let _ = std::io::stderr().lock().flush();
        }
    }
}

pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&self, _event: ProgressEvent) {}
}

fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + (s.len() - 1) / 3);
    let chars: Vec<char> = s.chars().rev().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }
    result.chars().rev().collect()
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum ProgressMode {
    Off,
    Human,
    Json,
}

impl ProgressMode {
    /// Human progress when stderr is a TTY, otherwise off.
    pub fn default_for_tty() -> Self {
        if atty::is(atty::Stream::Stderr) {
            ProgressMode::Human
        } else {
            ProgressMode::Off
        }
    }

    pub fn reporter(&self) -> Box<dyn ProgressReporter> {
        match self {
            ProgressMode::Off => Box::new(NoProgress),
            ProgressMode::Human => Box::new(StderrProgress),
            ProgressMode::Json => Box::new(JsonProgress),
        }
    }
}
