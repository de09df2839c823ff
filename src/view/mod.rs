//! Page model the controllers render into.
//!
//! The [`View`] trait is a minimal element tree: every element has an
//! [`ElementId`], content (plain text or markup), CSS classes, hidden and
//! disabled flags, an input value, and child elements. Controllers only
//! ever address elements by id, so any backing (an in-memory page, a
//! browser document) can sit behind the trait.
//!
//! Writes to a missing element return `false` and change nothing.
//!
//! # Well-known elements
//!
//! | Id | Role |
//! |----|------|
//! | [`ids::STATUS`] | status line |
//! | [`ids::QUESTION_INPUT`] | ask input |
//! | [`ids::ANSWER_BOX`] | ask answer |
//! | [`ids::SEARCH_INPUT`] | search input |
//! | [`ids::SEARCH_RESULTS`] | search result list |
//! | [`ids::QUERY_TABLE_BODY`] | catalog table body |
//! | [`ids::RUN_ALL`] | bulk run control |
//! | [`ids::PROGRESS`] | bulk progress counter |
//! | [`ids::TOAST_STACK`] | notification stack (created lazily) |
//! | [`ids::PROFILE_BODY`] | profile sections |

pub mod layout;
pub mod memory;

use std::fmt;

pub use memory::MemoryPage;

pub mod ids {
    pub const STATUS: &str = "status";
    pub const QUESTION_INPUT: &str = "question-input";
    pub const ANSWER_BOX: &str = "answer-box";
    pub const SEARCH_INPUT: &str = "search-input";
    pub const SEARCH_RESULTS: &str = "search-results";
    pub const QUERY_TABLE_BODY: &str = "query-table-body";
    pub const RUN_ALL: &str = "run-all";
    pub const PROGRESS: &str = "progress";
    pub const TOAST_STACK: &str = "toast-stack";
    pub const PROFILE_BODY: &str = "profile-body";
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        ElementId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn tab(name: &str) -> Self {
        ElementId(format!("tab-{}", name))
    }

    pub fn panel(name: &str) -> Self {
        ElementId(format!("panel-{}", name))
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        ElementId::new(id)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What an element currently displays.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Content {
    #[default]
    Empty,
    /// Rendered literally, never interpreted as markup.
    Text(String),
    /// Trusted markup produced by this crate (untrusted parts pre-escaped).
    Html(String),
}

impl Content {
    /// Human-readable text of the content.
    pub fn text(&self) -> String {
        match self {
            Content::Empty => String::new(),
            Content::Text(t) => t.clone(),
            Content::Html(h) => crate::ui::escape::markup_text(h),
        }
    }

    /// Content as markup; text is escaped.
    pub fn html(&self) -> String {
        match self {
            Content::Empty => String::new(),
            Content::Text(t) => crate::ui::escape::escape_html(t),
            Content::Html(h) => h.clone(),
        }
    }
}

pub trait View: Send + Sync {
    fn exists(&self, id: &ElementId) -> bool;

    /// Creates an empty element. Returns `false` if `id` is taken or the
    /// parent does not exist.
    fn create(&self, id: &ElementId, parent: Option<&ElementId>) -> bool;

    /// Removes the element and its descendants.
    fn remove(&self, id: &ElementId) -> bool;

    fn set_text(&self, id: &ElementId, text: &str) -> bool;

    /// Replaces the content with markup. Existing children are dropped.
    fn set_html(&self, id: &ElementId, html: &str) -> bool;

    fn content(&self, id: &ElementId) -> Option<Content>;

    fn value(&self, id: &ElementId) -> Option<String>;

    fn set_value(&self, id: &ElementId, value: &str) -> bool;

    fn set_class(&self, id: &ElementId, class: &str, on: bool) -> bool;

    fn has_class(&self, id: &ElementId, class: &str) -> bool;

    fn set_hidden(&self, id: &ElementId, hidden: bool) -> bool;

    fn is_hidden(&self, id: &ElementId) -> Option<bool>;

    fn set_disabled(&self, id: &ElementId, disabled: bool) -> bool;

    fn is_disabled(&self, id: &ElementId) -> Option<bool>;

    fn children(&self, id: &ElementId) -> Vec<ElementId>;

    /// Plain text of an element, if it exists.
    fn text(&self, id: &ElementId) -> Option<String> {
        self.content(id).map(|c| c.text())
    }
}
