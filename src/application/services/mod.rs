//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (DocumentFetcher, Selector)
//! but are themselves concrete structs, not traits.

mod browser;
mod loader;

pub use browser::Browser;
pub use loader::{TopicLoader, INDEX_DOCUMENT};
