/// How a controller operation settled.
///
/// Controllers never return errors: failures are rendered and toasted on
/// the page. The outcome lets callers (the CLI, tests) see what happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Input failed validation; no request was made.
    Rejected,
    /// Request succeeded and the page was updated.
    Done,
    /// Request failed; the fallback was rendered.
    Failed(String),
    /// A newer request of the same controller started first; the response was dropped.
    Stale,
    /// Nothing to do (unknown id, empty catalog).
    Skipped,
}

