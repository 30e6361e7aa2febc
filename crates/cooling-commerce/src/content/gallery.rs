//! Installation gallery filtering and "load more" paging.

use serde::{Deserialize, Serialize};

use crate::ids::GalleryItemId;

/// Items revealed per "load more" click.
pub const GALLERY_PAGE_SIZE: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub id: GalleryItemId,
    pub image: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// AC type shown in the installation, e.g. "split".
    #[serde(rename = "type")]
    pub item_type: String,
    /// "Residential" or "Commercial".
    pub location: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// The gallery's filter buttons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GalleryFilter {
    #[default]
    All,
    Tag(String),
}

impl GalleryFilter {
    /// Parse a filter button value; `"all"` shows everything.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "" | "all" => GalleryFilter::All,
            tag => GalleryFilter::Tag(tag.to_string()),
        }
    }

    /// An item matches when the tag is one of its tags, its type, or its
    /// lowercased location.
    pub fn matches(&self, item: &GalleryItem) -> bool {
        match self {
            GalleryFilter::All => true,
            GalleryFilter::Tag(tag) => {
                item.tags.iter().any(|t| t == tag)
                    || &item.item_type == tag
                    || &item.location.to_lowercase() == tag
            }
        }
    }
}

/// Filtered gallery with a growing visible window.
#[derive(Debug, Clone)]
pub struct GalleryView {
    items: Vec<GalleryItem>,
    filter: GalleryFilter,
    pages: usize,
    page_size: usize,
}

impl GalleryView {
    pub fn new(items: Vec<GalleryItem>) -> Self {
        Self {
            items,
            filter: GalleryFilter::All,
            pages: 1,
            page_size: GALLERY_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Switch filters and collapse back to the first window.
    pub fn set_filter(&mut self, filter: GalleryFilter) {
        self.filter = filter;
        self.pages = 1;
    }

    pub fn filter(&self) -> &GalleryFilter {
        &self.filter
    }

    /// Every item passing the filter, in source order.
    pub fn filtered(&self) -> Vec<&GalleryItem> {
        self.items.iter().filter(|i| self.filter.matches(i)).collect()
    }

    /// The items currently shown.
    pub fn visible(&self) -> Vec<&GalleryItem> {
        let mut items = self.filtered();
        items.truncate(self.pages.saturating_mul(self.page_size));
        items
    }

    /// Reveal the next window. Returns `false` when everything is already
    /// shown.
    pub fn load_more(&mut self) -> bool {
        if self.all_loaded() {
            return false;
        }
        self.pages += 1;
        true
    }

    pub fn all_loaded(&self) -> bool {
        self.pages.saturating_mul(self.page_size) >= self.filtered().len()
    }

    /// "Load More (9/20)" or "All Installations Loaded".
    pub fn load_more_label(&self) -> String {
        let total = self.filtered().len();
        let shown = self.pages.saturating_mul(self.page_size).min(total);
        if shown >= total {
            "All Installations Loaded".to_string()
        } else {
            format!("Load More ({}/{})", shown, total)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: u32) -> Vec<GalleryItem> {
        (1..=n)
            .map(|id| {
                let (item_type, location) = if id % 2 == 0 {
                    ("window", "Commercial")
                } else {
                    ("split", "Residential")
                };
                GalleryItem {
                    id: GalleryItemId::new(id),
                    image: format!("img{}.jpg", id),
                    title: format!("Install {}", id),
                    description: String::new(),
                    item_type: item_type.to_string(),
                    location: location.to_string(),
                    tags: if id == 3 { vec!["luxury".to_string()] } else { Vec::new() },
                }
            })
            .collect()
    }

    #[test]
    fn test_filter_matches_tag_type_or_location() {
        let items = items(4);
        let ids = |filter: GalleryFilter| -> Vec<u32> {
            items
                .iter()
                .filter(|i| filter.matches(i))
                .map(|i| i.id.get())
                .collect()
        };
        assert_eq!(ids(GalleryFilter::parse("all")), vec![1, 2, 3, 4]);
        assert_eq!(ids(GalleryFilter::parse("luxury")), vec![3]);
        assert_eq!(ids(GalleryFilter::parse("window")), vec![2, 4]);
        assert_eq!(ids(GalleryFilter::parse("commercial")), vec![2, 4]);
        assert!(ids(GalleryFilter::parse("Commercial")).is_empty());
    }

    #[test]
    fn test_load_more_window() {
        let mut view = GalleryView::new(items(20));
        assert_eq!(view.visible().len(), 9);
        assert_eq!(view.load_more_label(), "Load More (9/20)");

        assert!(view.load_more());
        assert_eq!(view.visible().len(), 18);
        assert!(view.load_more());
        assert_eq!(view.visible().len(), 20);
        assert!(view.all_loaded());
        assert_eq!(view.load_more_label(), "All Installations Loaded");
        assert!(!view.load_more());
    }

    #[test]
    fn test_set_filter_resets_window() {
        let mut view = GalleryView::new(items(20));
        view.load_more();
        view.set_filter(GalleryFilter::parse("split"));
        assert_eq!(view.filtered().len(), 10);
        assert_eq!(view.visible().len(), 9);
        assert_eq!(view.load_more_label(), "Load More (9/10)");
    }

    #[test]
    fn test_gallery_json() {
        let json = r#"{"id": 1, "image": "a.jpg", "title": "T", "type": "cassette",
                       "location": "commercial", "tags": ["cassette"]}"#;
        let item: GalleryItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.item_type, "cassette");
        assert!(GalleryFilter::parse("commercial").matches(&item));
    }
}
