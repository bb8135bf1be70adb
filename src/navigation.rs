// src/navigation.rs
use crate::data_types::slugify;

/// Which configured section is showing. Exactly one label is active at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationController {
    labels: Vec<String>,
    active: Option<usize>,
}

impl NavigationController {
    pub fn new(labels: Vec<String>) -> Self {
        let active = if labels.is_empty() { None } else { Some(0) };
        NavigationController { labels, active }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Makes `label` the active control. Unknown labels change nothing.
    pub fn activate(&mut self, label: &str) -> bool {
        match self.labels.iter().position(|l| l == label) {
            Some(index) => {
                self.active = Some(index);
                true
            }
            None => false,
        }
    }

    pub fn active_label(&self) -> Option<&str> {
        self.active.map(|i| self.labels[i].as_str())
    }

    pub fn active_slug(&self) -> Option<String> {
        self.active_label().map(slugify)
    }

    pub fn is_active(&self, label: &str) -> bool {
        self.active_label() == Some(label)
    }

    /// Whether the section with this slug should be drawn.
    pub fn is_visible(&self, slug: &str) -> bool {
        self.active_slug().as_deref() == Some(slug)
    }
}
