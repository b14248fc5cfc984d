//! Domain entities: core data structures

use serde::Serialize;

/// A single navigable document within a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Topic {
    /// Display name as written in the index
    pub title: String,
    /// Backing markdown document, e.g. "topic-alpha.md"
    pub file_name: String,
}

impl Topic {
    pub fn new(title: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            file_name: file_name.into(),
        }
    }
}

/// Top-level grouping of topics, sourced from one heading line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub title: String,
    /// Topics in document order (may be empty)
    pub topics: Vec<Topic>,
}

impl Category {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            topics: Vec::new(),
        }
    }
}

/// The full Category -> Topic tree produced by one parse.
///
/// Built fresh on every load; nothing carries over between loads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TopicIndex {
    categories: Vec<Category>,
}

impl TopicIndex {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn first_category(&self) -> Option<&Category> {
        self.categories.first()
    }

    /// Total number of topics across all categories.
    pub fn topic_count(&self) -> usize {
        self.categories.iter().map(|c| c.topics.len()).sum()
    }

    /// All topics in document order, paired with their category.
    pub fn topics(&self) -> impl Iterator<Item = (&Category, &Topic)> {
        self.categories
            .iter()
            .flat_map(|c| c.topics.iter().map(move |t| (c, t)))
    }

    /// First topic whose file name matches exactly.
    pub fn find_by_file_name(&self, file_name: &str) -> Option<&Topic> {
        self.topics()
            .map(|(_, t)| t)
            .find(|t| t.file_name == file_name)
    }

    /// First topic whose title matches, ignoring case and surrounding whitespace.
    pub fn find_by_title(&self, title: &str) -> Option<&Topic> {
        let wanted = title.trim().to_lowercase();
        self.topics()
            .map(|(_, t)| t)
            .find(|t| t.title.to_lowercase() == wanted)
    }

    pub(crate) fn push(&mut self, category: Category) {
        self.categories.push(category);
    }

    pub(crate) fn current_mut(&mut self) -> Option<&mut Category> {
        self.categories.last_mut()
    }
}

impl From<Vec<Category>> for TopicIndex {
    fn from(categories: Vec<Category>) -> Self {
        Self::new(categories)
    }
}

impl<'a> IntoIterator for &'a TopicIndex {
    type Item = &'a Category;
    type IntoIter = std::slice::Iter<'a, Category>;

    fn into_iter(self) -> Self::IntoIter {
        self.categories.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TopicIndex {
        TopicIndex::new(vec![
            Category {
                title: "Basics".into(),
                topics: vec![
                    Topic::new("Getting Started", "getting-started.md"),
                    Topic::new("Install", "install.md"),
                ],
            },
            Category::new("Empty"),
            Category {
                title: "Advanced".into(),
                topics: vec![Topic::new("Tuning", "tuning.md")],
            },
        ])
    }

    #[test]
    fn given_index_when_counting_then_sums_all_categories() {
        let index = sample();
        assert_eq!(index.len(), 3);
        assert_eq!(index.topic_count(), 3);
        assert_eq!(index.first_category().map(|c| c.title.as_str()), Some("Basics"));
    }

    #[test]
    fn given_title_with_other_case_when_finding_then_matches() {
        let index = sample();
        let topic = index.find_by_title("  getting started ").expect("topic");
        assert_eq!(topic.file_name, "getting-started.md");
    }

    #[test]
    fn given_unknown_file_when_finding_then_none() {
        assert!(sample().find_by_file_name("missing.md").is_none());
        assert_eq!(
            sample().find_by_file_name("tuning.md").map(|t| t.title.as_str()),
            Some("Tuning")
        );
    }

    #[test]
    fn given_index_when_serializing_then_is_plain_category_array() {
        let json = serde_json::to_value(sample()).expect("serialize");
        assert_eq!(json[0]["title"], "Basics");
        assert_eq!(json[0]["topics"][1]["file_name"], "install.md");
        assert_eq!(json[1]["topics"].as_array().map(Vec::len), Some(0));
    }
}
