//! FAQ filtering.

use serde::{Deserialize, Serialize};

use crate::ids::FaqId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqItem {
    pub id: FaqId,
    pub question: String,
    pub answer: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl FaqItem {
    /// Case-insensitive substring match over question, answer and tags.
    /// `needle` must already be lowercase.
    fn mentions(&self, needle: &str) -> bool {
        self.question.to_lowercase().contains(needle)
            || self.answer.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }
}

/// The FAQ page's category button and search box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaqQuery {
    /// `None` shows every category.
    pub category: Option<String>,
    pub search: String,
}

impl FaqQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a category; `"all"` clears the restriction.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = (category != "all").then_some(category);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into().trim().to_string();
        self
    }

    /// Items matching the category and search term, in source order.
    pub fn apply<'a>(&self, items: &'a [FaqItem]) -> Vec<&'a FaqItem> {
        let needle = self.search.to_lowercase();
        items
            .iter()
            .filter(|item| self.category.as_ref().map_or(true, |c| &item.category == c))
            .filter(|item| needle.is_empty() || item.mentions(&needle))
            .collect()
    }

    /// The results line shown above the list.
    pub fn summary(&self, count: usize) -> String {
        let noun = if count == 1 { "question" } else { "questions" };
        if self.search.is_empty() {
            format!("{} {} available", count, noun)
        } else {
            format!("Found {} {} matching \"{}\"", count, noun, self.search)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<FaqItem> {
        let item = |id, question: &str, category: &str, tags: &[&str]| FaqItem {
            id: FaqId::new(id),
            question: question.to_string(),
            answer: format!("Answer to {}", id),
            category: category.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        };
        vec![
            item(1, "What AC types do you sell?", "products", &["products", "types"]),
            item(2, "How long does installation take?", "installation", &["time"]),
            item(3, "Can I install it myself?", "installation", &["DIY", "safety"]),
            item(4, "How often should I service my AC?", "maintenance", &["servicing"]),
        ]
    }

    fn ids(found: &[&FaqItem]) -> Vec<u32> {
        found.iter().map(|i| i.id.get()).collect()
    }

    #[test]
    fn test_category_filter() {
        let items = items();
        let found = FaqQuery::new().with_category("installation").apply(&items);
        assert_eq!(ids(&found), vec![2, 3]);
        assert_eq!(FaqQuery::new().with_category("all").apply(&items).len(), 4);
    }

    #[test]
    fn test_search_covers_tags_case_insensitively() {
        let items = items();
        assert_eq!(ids(&FaqQuery::new().with_search("diy").apply(&items)), vec![3]);
        assert_eq!(ids(&FaqQuery::new().with_search(" INSTALL ").apply(&items)), vec![2, 3]);
        assert_eq!(ids(&FaqQuery::new().with_search("answer to 4").apply(&items)), vec![4]);
    }

    #[test]
    fn test_category_and_search_combine() {
        let items = items();
        let query = FaqQuery::new().with_category("installation").with_search("long");
        assert_eq!(ids(&query.apply(&items)), vec![2]);
    }

    #[test]
    fn test_summary() {
        assert_eq!(FaqQuery::new().summary(10), "10 questions available");
        assert_eq!(FaqQuery::new().summary(1), "1 question available");
        assert_eq!(
            FaqQuery::new().with_search("warranty").summary(2),
            "Found 2 questions matching \"warranty\""
        );
    }
}
