//! # Twin Console
//!
//! Client for the digital twin recruiter API: a question-answering and
//! semantic search backend built on retrieval-augmented generation.
//!
//! All retrieval, generation and guardrails live in the backend. This
//! crate holds the client side: the page controllers, the shared UI kit
//! (status line, toasts, skeletons, escaping), the HTTP contract, and an
//! abstract page model the controllers render into.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  user action  ┌──────────────┐  HTTP  ┌──────────┐
//! │  Page (View) │──────────────▶│  Controller  │───────▶│ Backend  │
//! │ MemoryPage   │◀──────────────│ ask/search/  │◀───────│ /api/... │
//! └──────────────┘ status, toast │ catalog/...  │  JSON  └──────────┘
//!                  skeleton, DOM └──────────────┘
//! ```
//!
//! Every controller operation follows the same shape: validate input, set
//! the status line, show a skeleton, make one request, render the result
//! or a fallback, toast, and reset the status line last.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Wire types |
//! | [`api`] | Backend trait and HTTP implementation |
//! | [`health`] | Backend readiness check |
//! | [`view`] | Page model, in-memory page, page layouts |
//! | [`ui`] | Status line, toasts, skeletons, escaping |
//! | [`ask`] | Single question form |
//! | [`search`] | Search form and result rendering |
//! | [`catalog`] | Sample-query catalog, single and bulk runs |
//! | [`tabs`] | Tab selection |
//! | [`profile`] | Profile page |
//! | [`progress`] | Bulk-run progress sinks |

pub mod api;
pub mod ask;
pub mod catalog;
pub mod config;
pub mod error;
pub mod health;
pub mod models;
pub mod outcome;
pub mod profile;
pub mod progress;
pub mod search;
pub mod tabs;
pub mod ui;
pub mod view;

#[cfg(test)]
mod testing;
