use std::sync::Arc;

use crate::error::{ClientError, ClientResult};
use crate::view::{ElementId, View};

/// Single-selection group of tabs and their panels.
///
/// Tab `name` is element `tab-<name>`, its panel `panel-<name>`. The
/// controller does not pick an initial tab; the layout does.
pub struct TabController {
    view: Arc<dyn View>,
    names: Vec<String>,
}

impl TabController {
    pub fn new(view: Arc<dyn View>, names: &[&str]) -> Self {
        Self {
            view,
            names: names.iter().map(|n| n.to_string()).collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Activates `name` and shows only its panel.
    pub fn select(&self, name: &str) -> ClientResult<()> {
        if !self.names.iter().any(|n| n == name) {
            return Err(ClientError::validation(format!("unknown tab: {}", name)));
        }

        for n in &self.names {
            let selected = n == name;
            self.view.set_class(&ElementId::tab(n), "active", selected);
            self.view.set_hidden(&ElementId::panel(n), !selected);
        }
        Ok(())
    }

    /// Name of the tab currently marked active, if any.
    pub fn active(&self) -> Option<&str> {
        self.names
            .iter()
            .find(|n| self.view.has_class(&ElementId::tab(n), "active"))
            .map(String::as_str)
    }
}
