//! Application-level errors (wraps fetch failures)

use thiserror::Error;

use crate::infrastructure::traits::FetchError;

/// Application errors add use-case context to boundary failures.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("parse topic index: {message}")]
    Parse { message: String },

    #[error("topic not found: {0}")]
    TopicNotFound(String),

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
