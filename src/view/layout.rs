//! Initial element trees of the three console pages.

use super::{ids, ElementId, View};

/// Tabs of the main page, first one active.
pub const MAIN_TABS: &[&str] = &["ask", "search"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// Ask and search panels behind tabs.
    Main,
    /// Sample-query catalog with per-row and bulk runs.
    Testing,
    /// Profile sections.
    Profile,
}

impl PageKind {
    /// Creates the page's elements in `view`.
    pub fn build(self, view: &dyn View) {
        let status = ElementId::new(ids::STATUS);
        view.create(&status, None);
        view.set_text(&status, crate::ui::status::READY);

        match self {
            PageKind::Main => build_main(view),
            PageKind::Testing => build_testing(view),
            PageKind::Profile => {
                view.create(&ElementId::new(ids::PROFILE_BODY), None);
            }
        }
    }
}

fn build_main(view: &dyn View) {
    let tabs = ElementId::new("tabs");
    let panels = ElementId::new("panels");
    view.create(&tabs, None);
    view.create(&panels, None);

    for (i, name) in MAIN_TABS.iter().enumerate() {
        let tab = ElementId::tab(name);
        let panel = ElementId::panel(name);
        view.create(&tab, Some(&tabs));
        view.create(&panel, Some(&panels));
        view.set_class(&tab, "tab", true);
        view.set_class(&tab, "active", i == 0);
        view.set_hidden(&panel, i != 0);
    }

    let ask = ElementId::panel("ask");
    view.create(&ElementId::new(ids::QUESTION_INPUT), Some(&ask));
    view.create(&ElementId::new(ids::ANSWER_BOX), Some(&ask));

    let search = ElementId::panel("search");
    view.create(&ElementId::new(ids::SEARCH_INPUT), Some(&search));
    view.create(&ElementId::new(ids::SEARCH_RESULTS), Some(&search));
}

fn build_testing(view: &dyn View) {
    view.create(&ElementId::new(ids::QUERY_TABLE_BODY), None);
    let run_all = ElementId::new(ids::RUN_ALL);
    view.create(&run_all, None);
    view.set_disabled(&run_all, true);
    view.create(&ElementId::new(ids::PROGRESS), None);
}
