// Page domain model: text nodes and class lists addressed by element id
use std::collections::{BTreeMap, BTreeSet};

/// Render target for the status poller.
pub trait StatusSink: Send + Sync {
    fn set_text(&mut self, element_id: &str, text: &str);
    fn add_class(&mut self, element_id: &str, class: &str);
    fn remove_class(&mut self, element_id: &str, class: &str);
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageModel {
    texts: BTreeMap<String, String>,
    classes: BTreeMap<String, BTreeSet<String>>,
}

impl PageModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self, element_id: &str) -> Option<&str> {
        self.texts.get(element_id).map(String::as_str)
    }

    #[cfg(test)]
    pub fn has_class(&self, element_id: &str, class: &str) -> bool {
        self.classes
            .get(element_id)
            .is_some_and(|set| set.contains(class))
    }

    /// Classes on an element in stable order, space separated.
    pub fn class_attr(&self, element_id: &str) -> String {
        self.classes
            .get(element_id)
            .map(|set| set.iter().map(String::as_str).collect::<Vec<_>>().join(" "))
            .unwrap_or_default()
    }
}

impl StatusSink for PageModel {
    fn set_text(&mut self, element_id: &str, text: &str) {
        self.texts.insert(element_id.to_string(), text.to_string());
    }

    fn add_class(&mut self, element_id: &str, class: &str) {
        self.classes
            .entry(element_id.to_string())
            .or_default()
            .insert(class.to_string());
    }

    fn remove_class(&mut self, element_id: &str, class: &str) {
        if let Some(set) = self.classes.get_mut(element_id) {
            set.remove(class);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_overwrites() {
        let mut page = PageModel::new();
        page.set_text("light-status", "it's on");
        page.set_text("light-status", "it's off");
        assert_eq!(page.text("light-status"), Some("it's off"));
        assert_eq!(page.text("missing"), None);
    }

    #[test]
    fn test_class_add_remove() {
        let mut page = PageModel::new();
        page.add_class("body", "body-light-on");
        page.add_class("body", "body-light-on");
        page.add_class("body", "dark");
        assert_eq!(page.class_attr("body"), "body-light-on dark");

        page.remove_class("body", "body-light-on");
        page.remove_class("other", "body-light-on");
        assert!(!page.has_class("body", "body-light-on"));
        assert!(page.has_class("body", "dark"));
        assert_eq!(page.class_attr("other"), "");
    }
}
