//! Navigation state owned by the browser shell
//!
//! Selection, expand/collapse and the search term live here and change only
//! through [`NavEvent`]s. None of the transitions validate against the
//! current index.

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::entities::{Category, TopicIndex};

/// Events raised by the navigation collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    /// A topic was picked, identified by its file name
    TopicSelected(String),
    /// A category header was clicked, identified by its title
    CategoryToggled(String),
    /// The search box changed
    SearchChanged(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    selected_file: String,
    expanded: BTreeMap<String, bool>,
    search_term: String,
}

impl NavigationState {
    /// Fresh state with `fallback_file` selected and everything collapsed.
    pub fn new(fallback_file: impl Into<String>) -> Self {
        Self {
            selected_file: fallback_file.into(),
            expanded: BTreeMap::new(),
            search_term: String::new(),
        }
    }

    /// Reset the expand map so that exactly the first category is open.
    pub fn seed(&mut self, index: &TopicIndex) {
        self.expanded.clear();
        if let Some(first) = index.first_category() {
            debug!("seed: expanding {:?}", first.title);
            self.expanded.insert(first.title.clone(), true);
        }
    }

    pub fn apply(&mut self, event: NavEvent) {
        debug!("apply: {:?}", event);
        match event {
            NavEvent::TopicSelected(file_name) => self.selected_file = file_name,
            NavEvent::CategoryToggled(title) => {
                let open = self.expanded.entry(title).or_insert(false);
                *open = !*open;
            }
            NavEvent::SearchChanged(term) => self.search_term = term,
        }
    }

    /// Open every category of `index`.
    pub fn expand_all(&mut self, index: &TopicIndex) {
        for category in index {
            self.expanded.insert(category.title.clone(), true);
        }
    }

    pub fn selected_file(&self) -> &str {
        &self.selected_file
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn is_expanded(&self, title: &str) -> bool {
        self.expanded.get(title).copied().unwrap_or(false)
    }

    /// Titles currently open.
    pub fn expanded_titles(&self) -> impl Iterator<Item = &str> {
        self.expanded
            .iter()
            .filter(|(_, open)| **open)
            .map(|(title, _)| title.as_str())
    }
}

/// Restrict `index` to what matches `term`, case-insensitively.
///
/// A category whose title matches keeps all of its topics. Otherwise only
/// matching topics survive, and categories left without topics are dropped.
/// A blank term returns the index unchanged.
pub fn filter_index(index: &TopicIndex, term: &str) -> TopicIndex {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return index.clone();
    }

    let categories = index
        .categories()
        .iter()
        .filter_map(|category| {
            if category.title.to_lowercase().contains(&needle) {
                return Some(category.clone());
            }
            let topics: Vec<_> = category
                .topics
                .iter()
                .filter(|t| t.title.to_lowercase().contains(&needle))
                .cloned()
                .collect();
            (!topics.is_empty()).then(|| Category {
                title: category.title.clone(),
                topics,
            })
        })
        .collect();

    TopicIndex::new(categories)
}
