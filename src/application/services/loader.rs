//! Topic index loader
//!
//! Fetches `<base_url>data.md`, parses it, and absorbs every failure into an
//! empty index.

use std::sync::Arc;

use tracing::{debug, error, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{parse_index, TopicIndex};
use crate::infrastructure::traits::DocumentFetcher;

/// Name of the index document next to the topic documents.
pub const INDEX_DOCUMENT: &str = "data.md";

/// Service that turns the remote index document into a [`TopicIndex`].
pub struct TopicLoader {
    fetcher: Arc<dyn DocumentFetcher>,
    base_url: String,
}

impl TopicLoader {
    /// Create a new loader.
    ///
    /// `base_url` is used as a plain prefix and is expected to end in `/`.
    pub fn new(fetcher: Arc<dyn DocumentFetcher>, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
        }
    }

    pub fn index_url(&self) -> String {
        self.topic_url(INDEX_DOCUMENT)
    }

    pub fn topic_url(&self, file_name: &str) -> String {
        format!("{}{}", self.base_url, file_name)
    }

    /// Load the topic index, never failing.
    ///
    /// Any failure is logged once and yields an empty index, so "empty" is the
    /// single "nothing available" signal for callers.
    pub async fn load_topics(&self) -> TopicIndex {
        match self.try_load_topics().await {
            Ok(index) => index,
            Err(e) => {
                error!("failed to load topic index: {}", e);
                TopicIndex::default()
            }
        }
    }

    /// Load the topic index, surfacing the failure.
    #[instrument(level = "debug", skip(self), fields(url = %self.index_url()))]
    pub async fn try_load_topics(&self) -> ApplicationResult<TopicIndex> {
        let url = self.index_url();
        let text = self
            .fetcher
            .fetch(&url)
            .await
            .map_err(|source| ApplicationError::Fetch { url, source })?;

        // A panicking parse surfaces as a JoinError instead of unwinding into the caller.
        let index = tokio::task::spawn_blocking(move || parse_index(&text))
            .await
            .map_err(|e| ApplicationError::Parse {
                message: e.to_string(),
            })?;

        debug!(
            "loaded {} categories, {} topics",
            index.len(),
            index.topic_count()
        );
        Ok(index)
    }

    /// Fetch one topic document as raw markdown.
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch_topic(&self, file_name: &str) -> ApplicationResult<String> {
        let url = self.topic_url(file_name);
        self.fetcher
            .fetch(&url)
            .await
            .map_err(|source| ApplicationError::Fetch { url, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::traits::HttpFetcher;
    use tracing_test::traced_test;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const DATA_MD: &str = "# Topics\n\
                           ### **Category One**\n\
                           1. **Topic Alpha**\n\
                           2. **Topic Beta**\n\
                           ### **Category Two**\n\
                           1. **API Rate Limiting and Throttling**\n";

    fn loader_for(server: &MockServer) -> TopicLoader {
        TopicLoader::new(
            Arc::new(HttpFetcher::new()),
            format!("{}/docs/", server.uri()),
        )
    }

    #[test]
    fn given_base_url_when_building_urls_then_concatenates_literally() {
        let loader = TopicLoader::new(Arc::new(HttpFetcher::new()), "https://example.org/kb/");
        assert_eq!(loader.index_url(), "https://example.org/kb/data.md");
        assert_eq!(
            loader.topic_url("topic-alpha.md"),
            "https://example.org/kb/topic-alpha.md"
        );
    }

    #[tokio::test]
    async fn given_well_formed_index_when_loading_then_returns_tree() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/docs/data.md"))
            .respond_with(ResponseTemplate::new(200).set_body_string(DATA_MD))
            .expect(1)
            .mount(&server)
            .await;

        let index = loader_for(&server).load_topics().await;

        assert_eq!(index.len(), 2);
        assert_eq!(index.first_category().unwrap().title, "Category One");
        assert_eq!(
            index.categories()[1].topics[0].file_name,
            "api-rate-limiting-and-throttling.md"
        );
    }

    #[tokio::test]
    #[traced_test]
    async fn given_error_status_when_loading_then_empty_and_logged_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/docs/data.md"))
            .respond_with(ResponseTemplate::new(500).set_body_string(DATA_MD))
            .mount(&server)
            .await;

        let index = loader_for(&server).load_topics().await;

        assert!(index.is_empty());
        logs_assert(|lines: &[&str]| {
            let errors = lines
                .iter()
                .filter(|line| line.contains("ERROR"))
                .count();
            match errors {
                1 => Ok(()),
                n => Err(format!("expected exactly one error event, got {n}")),
            }
        });
        assert!(logs_contain("failed to load topic index"));
    }

    #[tokio::test]
    async fn given_error_status_when_try_loading_then_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = loader_for(&server).try_load_topics().await.unwrap_err();

        match err {
            ApplicationError::Fetch { url, .. } => assert!(url.ends_with("/docs/data.md")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn given_topic_file_when_fetching_then_returns_markdown() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/docs/topic-alpha.md"))
            .respond_with(ResponseTemplate::new(200).set_body_string("# Alpha\n"))
            .mount(&server)
            .await;

        let body = loader_for(&server).fetch_topic("topic-alpha.md").await.unwrap();
        assert_eq!(body, "# Alpha\n");
    }
}
