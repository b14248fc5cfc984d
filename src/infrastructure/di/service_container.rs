//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{Browser, TopicLoader};
use crate::config::Settings;
use crate::infrastructure::traits::{DocumentFetcher, HttpFetcher, Selector, SkimSelector};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Remote document access
    pub fetcher: Arc<dyn DocumentFetcher>,

    /// Interactive topic picker
    pub selector: Arc<dyn Selector>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(
            settings,
            Arc::new(HttpFetcher::new()),
            Arc::new(SkimSelector),
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fetcher: Arc<dyn DocumentFetcher>,
        selector: Arc<dyn Selector>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            fetcher,
            selector,
        }
    }

    /// Loader bound to the configured base URL.
    pub fn loader(&self) -> TopicLoader {
        TopicLoader::new(self.fetcher.clone(), self.settings.base_url.clone())
    }

    /// Fresh, unmounted browser session.
    pub fn browser(&self) -> Browser {
        Browser::new(self.loader(), self.settings.default_topic.clone())
    }
}
