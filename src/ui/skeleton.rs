//! Placeholder shapes shown while a request is in flight.
//!
//! A skeleton carries no data; whatever arrives next overwrites it.

use crate::view::{ElementId, View};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skeleton {
    /// Three stacked bars.
    Answer,
    /// Five table rows with one bar each.
    Table,
    /// Four result rows, each a title line and a content line.
    SearchRows,
    /// One short bar inside a table cell.
    Cell,
}

const BAR: &str = r#"<div class="skeleton skeleton-bar"></div>"#;

impl Skeleton {
    pub fn markup(self) -> String {
        match self {
            Skeleton::Answer => BAR.repeat(3),
            Skeleton::Table => {
                let row = format!(r#"<tr class="skeleton-row"><td colspan="5">{}</td></tr>"#, BAR);
                row.repeat(5)
            }
            Skeleton::SearchRows => {
                let row = concat!(
                    r#"<div class="result skeleton-row">"#,
                    r#"<div class="skeleton skeleton-title"></div>"#,
                    r#"<div class="skeleton skeleton-line"></div>"#,
                    "</div>"
                );
                row.repeat(4)
            }
            Skeleton::Cell => r#"<div class="skeleton skeleton-cell"></div>"#.to_string(),
        }
    }

    /// Replaces the target's content with this skeleton.
    pub fn show(self, view: &dyn View, target: &ElementId) -> bool {
        view.set_html(target, &self.markup())
    }
}
