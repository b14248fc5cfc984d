//! Topic index parser
//!
//! Turns the markdown outline in `data.md` into a [`TopicIndex`].
//! Recognized lines:
//! - `### **Category Title**` opens a category
//! - `1. **Topic Title**` adds a topic to the most recent category
//!
//! Everything else is ignored. The parser never fails: malformed input
//! degrades to fewer entries.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{instrument, trace};

use crate::domain::entities::{Category, Topic, TopicIndex};
use crate::domain::slug::slugify;

/// Prefix marking a category heading line.
pub const CATEGORY_PREFIX: &str = "### **";

const EMPHASIS: &str = "**";

/// Legacy title whose document name predates slug derivation.
const RATE_LIMITING_TITLE: &str = "API Rate Limiting and Throttling";
const RATE_LIMITING_FILE: &str = "api-rate-limiting-and-throttling.md";

static TOPIC_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.\s+\*\*").expect("valid topic regex"));

/// Parse the raw index document.
#[instrument(level = "debug", skip(markdown), fields(bytes = markdown.len()))]
pub fn parse_index(markdown: &str) -> TopicIndex {
    let mut index = TopicIndex::default();

    for line in markdown.split('\n') {
        if let Some(title) = category_title(line) {
            trace!("category: {:?}", title);
            index.push(Category::new(title));
            continue;
        }

        let Some(title) = topic_title(line) else {
            continue;
        };
        match index.current_mut() {
            Some(category) => {
                let file_name = file_name_for(&title);
                trace!("topic: {:?} -> {}", title, file_name);
                category.topics.push(Topic::new(title, file_name));
            }
            None => trace!("dropping topic before first category: {:?}", title),
        }
    }

    index
}

/// Backing document name for a topic title.
pub fn file_name_for(title: &str) -> String {
    if title == RATE_LIMITING_TITLE {
        return RATE_LIMITING_FILE.to_string();
    }
    format!("{}.md", slugify(title))
}

fn category_title(line: &str) -> Option<String> {
    let rest = line.strip_prefix(CATEGORY_PREFIX)?;
    let rest = rest.trim_end();
    let rest = rest.strip_suffix(EMPHASIS).unwrap_or(rest);
    Some(rest.trim().to_string())
}

// Only the first `**` after the numbering token is removed, even when the
// title itself contains emphasis further along.
fn topic_title(line: &str) -> Option<String> {
    let token = TOPIC_TOKEN.find(line)?;
    let rest = &line[token.end()..];
    Some(rest.replacen(EMPHASIS, "", 1).trim().to_string())
}
