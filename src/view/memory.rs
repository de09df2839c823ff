//! In-memory [`View`] implementation.
//!
//! Backs the CLI and every controller test. Elements live in a `HashMap`
//! behind `std::sync::RwLock`; a write journal records every content
//! change so tests can assert on ordering (e.g. that the status line was
//! reset exactly once, after the answer was written).

use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, RwLock};

use super::{Content, ElementId, View};

#[derive(Debug, Default)]
struct Element {
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    content: Content,
    classes: BTreeSet<String>,
    hidden: bool,
    disabled: bool,
    value: String,
}

/// One recorded content write.
#[derive(Debug, Clone, PartialEq)]
pub struct Write {
    pub id: ElementId,
    pub content: Content,
}

pub struct MemoryPage {
    elements: RwLock<HashMap<ElementId, Element>>,
    journal: Mutex<Vec<Write>>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self {
            elements: RwLock::new(HashMap::new()),
            journal: Mutex::new(Vec::new()),
        }
    }

    /// Every content write so far, oldest first.
    pub fn journal(&self) -> Vec<Write> {
        self.journal.lock().unwrap().clone()
    }

    /// Texts written to one element, oldest first.
    pub fn writes_to(&self, id: &ElementId) -> Vec<String> {
        self.journal
            .lock()
            .unwrap()
            .iter()
            .filter(|w| &w.id == id)
            .map(|w| w.content.text())
            .collect()
    }

    pub fn clear_journal(&self) {
        self.journal.lock().unwrap().clear();
    }

    fn record(&self, id: &ElementId, content: Content) {
        self.journal.lock().unwrap().push(Write {
            id: id.clone(),
            content,
        });
    }

    fn with_element<F>(&self, id: &ElementId, f: F) -> bool
    where
        F: FnOnce(&mut Element),
    {
        let mut elements = self.elements.write().unwrap();
        match elements.get_mut(id) {
            Some(el) => {
                f(el);
                true
            }
            None => false,
        }
    }

    fn remove_subtree(elements: &mut HashMap<ElementId, Element>, id: &ElementId) {
        if let Some(el) = elements.remove(id) {
            for child in el.children {
                Self::remove_subtree(elements, &child);
            }
        }
    }
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl View for MemoryPage {
    fn exists(&self, id: &ElementId) -> bool {
        self.elements.read().unwrap().contains_key(id)
    }

    fn create(&self, id: &ElementId, parent: Option<&ElementId>) -> bool {
        let mut elements = self.elements.write().unwrap();
        if elements.contains_key(id) {
            return false;
        }
        if let Some(parent_id) = parent {
            match elements.get_mut(parent_id) {
                Some(p) => p.children.push(id.clone()),
                None => return false,
            }
        }
        elements.insert(
            id.clone(),
            Element {
                parent: parent.cloned(),
                ..Element::default()
            },
        );
        true
    }

    fn remove(&self, id: &ElementId) -> bool {
        let mut elements = self.elements.write().unwrap();
        let parent = match elements.get(id) {
            Some(el) => el.parent.clone(),
            None => return false,
        };
        if let Some(parent_id) = parent {
            if let Some(p) = elements.get_mut(&parent_id) {
                p.children.retain(|c| c != id);
            }
        }
        Self::remove_subtree(&mut elements, id);
        true
    }

    fn set_text(&self, id: &ElementId, text: &str) -> bool {
        let content = Content::Text(text.to_string());
        let written = self.with_element(id, |el| el.content = content.clone());
        if written {
            self.record(id, content);
        }
        written
    }

    fn set_html(&self, id: &ElementId, html: &str) -> bool {
        let content = Content::Html(html.to_string());
        let children = {
            let mut elements = self.elements.write().unwrap();
            match elements.get_mut(id) {
                Some(el) => {
                    el.content = content.clone();
                    std::mem::take(&mut el.children)
                }
                None => return false,
            }
        };
        {
            let mut elements = self.elements.write().unwrap();
            for child in &children {
                Self::remove_subtree(&mut elements, child);
            }
        }
        self.record(id, content);
        true
    }

    fn content(&self, id: &ElementId) -> Option<Content> {
        self.elements
            .read()
            .unwrap()
            .get(id)
            .map(|el| el.content.clone())
    }

    fn value(&self, id: &ElementId) -> Option<String> {
        self.elements
            .read()
            .unwrap()
            .get(id)
            .map(|el| el.value.clone())
    }

    fn set_value(&self, id: &ElementId, value: &str) -> bool {
        self.with_element(id, |el| el.value = value.to_string())
    }

    fn set_class(&self, id: &ElementId, class: &str, on: bool) -> bool {
        self.with_element(id, |el| {
            if on {
                el.classes.insert(class.to_string());
            } else {
                el.classes.remove(class);
            }
        })
    }

    fn has_class(&self, id: &ElementId, class: &str) -> bool {
        self.elements
            .read()
            .unwrap()
            .get(id)
            .map(|el| el.classes.contains(class))
            .unwrap_or(false)
    }

    fn set_hidden(&self, id: &ElementId, hidden: bool) -> bool {
        self.with_element(id, |el| el.hidden = hidden)
    }

    fn is_hidden(&self, id: &ElementId) -> Option<bool> {
        self.elements.read().unwrap().get(id).map(|el| el.hidden)
    }

    fn set_disabled(&self, id: &ElementId, disabled: bool) -> bool {
        self.with_element(id, |el| el.disabled = disabled)
    }

    fn is_disabled(&self, id: &ElementId) -> Option<bool> {
        self.elements.read().unwrap().get(id).map(|el| el.disabled)
    }

    fn children(&self, id: &ElementId) -> Vec<ElementId> {
        self.elements
            .read()
            .unwrap()
            .get(id)
            .map(|el| el.children.clone())
            .unwrap_or_default()
    }
}
