//! Browser controller
//!
//! Owns the topic index and the navigation state for one session. The
//! navigation and content front-ends read from it and report back through
//! [`NavEvent`]s.

use tracing::{debug, info, instrument};

use crate::application::services::TopicLoader;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{filter_index, NavEvent, NavigationState, TopicIndex};

pub struct Browser {
    loader: TopicLoader,
    index: TopicIndex,
    nav: NavigationState,
}

impl Browser {
    /// Create an unmounted browser with `fallback_file` selected.
    pub fn new(loader: TopicLoader, fallback_file: impl Into<String>) -> Self {
        Self {
            loader,
            index: TopicIndex::default(),
            nav: NavigationState::new(fallback_file),
        }
    }

    /// Load the index once and seed the expand state from it.
    ///
    /// Mounting again reloads and replaces the whole tree. An empty load
    /// leaves the expand state as it was.
    #[instrument(level = "debug", skip(self))]
    pub async fn mount(&mut self) {
        self.index = self.loader.load_topics().await;
        if !self.index.is_empty() {
            self.nav.seed(&self.index);
        }
        info!("mounted {} categories", self.index.len());
    }

    pub fn handle(&mut self, event: NavEvent) {
        self.nav.apply(event);
    }

    pub fn index(&self) -> &TopicIndex {
        &self.index
    }

    pub fn nav(&self) -> &NavigationState {
        &self.nav
    }

    pub fn expand_all(&mut self) {
        self.nav.expand_all(&self.index);
    }

    /// The tree as the navigation front-end should display it.
    pub fn visible_index(&self) -> TopicIndex {
        filter_index(&self.index, self.nav.search_term())
    }

    /// Map a user-supplied target to a topic file name.
    ///
    /// Tries an exact file name, then a case-insensitive title. Anything else
    /// ending in `.md` is passed through unchanged.
    pub fn resolve(&self, target: &str) -> ApplicationResult<String> {
        if let Some(topic) = self.index.find_by_file_name(target) {
            return Ok(topic.file_name.clone());
        }
        if let Some(topic) = self.index.find_by_title(target) {
            debug!("resolve: title {:?} -> {}", target, topic.file_name);
            return Ok(topic.file_name.clone());
        }
        if target.ends_with(".md") {
            return Ok(target.to_string());
        }
        Err(ApplicationError::TopicNotFound(target.to_string()))
    }

    /// Markdown of the currently selected topic.
    pub async fn selected_content(&self) -> ApplicationResult<String> {
        self.loader.fetch_topic(self.nav.selected_file()).await
    }
}
