//! Query results and pagination.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: u32,
    /// Items per page.
    pub page_size: u32,
    /// Total number of matching items.
    pub total: usize,
    /// Total number of pages, never less than 1.
    pub total_pages: u32,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info.
    ///
    /// `page` is reported as given, even past the last page, so callers can
    /// see the mismatch against `total_pages`.
    pub fn new(page: u32, page_size: u32, total: usize) -> Self {
        let total_pages = total_pages(total, page_size);

        Self {
            page,
            page_size,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page.max(1) as usize - 1) * self.page_size as usize
    }

    /// Check if on first page.
    pub fn is_first(&self) -> bool {
        self.page <= 1
    }

    /// Check if on last page.
    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }

    /// Get start item number (1-indexed), or 0 when the page is empty.
    pub fn start_item(&self) -> usize {
        if self.offset() >= self.total {
            0
        } else {
            self.offset() + 1
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> usize {
        (self.offset() + self.page_size as usize).min(self.total)
    }

    /// The pager window: first page, neighbours of the current page, last
    /// page, with ellipses over the gaps.
    pub fn page_links(&self) -> Vec<PageLink> {
        let current = self.page;
        let last = self.total_pages;
        let link = |number| PageLink::Page {
            number,
            current: number == current,
        };

        let mut links = vec![link(1)];
        if current > 3 {
            links.push(PageLink::Ellipsis);
        }

        let from = current.saturating_sub(1).max(2);
        let to = current.saturating_add(1).min(last.saturating_sub(1));
        links.extend((from..=to).map(link));

        if current.saturating_add(2) < last {
            links.push(PageLink::Ellipsis);
        }
        if last > 1 {
            links.push(link(last));
        }
        links
    }

    /// "Showing 11-20 of 45 products".
    pub fn summary(&self, noun: &str) -> String {
        format!(
            "Showing {}-{} of {} {}",
            self.start_item(),
            self.end_item(),
            self.total,
            noun
        )
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, 10, 0)
    }
}

/// `max(1, ceil(total / page_size))`.
pub fn total_pages(total: usize, page_size: u32) -> u32 {
    let page_size = page_size.max(1) as usize;
    let pages = total.div_ceil(page_size).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// One entry in the pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum PageLink {
    /// A numbered page.
    Page { number: u32, current: bool },
    /// A gap in the numbering.
    Ellipsis,
}

/// The evaluated view: every matching product in sort order, plus the
/// pagination of the current page.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResults<'a> {
    /// All matching products, sorted.
    pub items: Vec<&'a Product>,
    pub pagination: Pagination,
}

impl<'a> QueryResults<'a> {
    /// Number of matching products across all pages.
    pub fn total_count(&self) -> usize {
        self.items.len()
    }

    pub fn total_pages(&self) -> u32 {
        self.pagination.total_pages
    }

    /// Products on the current page; empty when the page is out of range.
    pub fn page_items(&self) -> &[&'a Product] {
        let start = self.pagination.offset().min(self.items.len());
        let end = self.pagination.end_item().max(start);
        &self.items[start..end]
    }

    /// Check if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// "1 product found" / "12 products found".
pub fn results_label(count: usize) -> String {
    if count == 1 {
        "1 product found".to_string()
    } else {
        format!("{} products found", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(links: &[PageLink]) -> Vec<String> {
        links
            .iter()
            .map(|link| match link {
                PageLink::Page { number, current: true } => format!("[{}]", number),
                PageLink::Page { number, .. } => number.to_string(),
                PageLink::Ellipsis => "...".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_pagination() {
        let p = Pagination::new(2, 10, 45);
        assert_eq!(p.total_pages, 5);
        assert!(p.has_next);
        assert!(p.has_prev);
        assert_eq!(p.offset(), 10);
        assert_eq!(p.start_item(), 11);
        assert_eq!(p.end_item(), 20);
        assert_eq!(p.summary("products"), "Showing 11-20 of 45 products");
    }

    #[test]
    fn test_pagination_empty() {
        let p = Pagination::new(1, 10, 0);
        assert_eq!(p.total_pages, 1);
        assert!(!p.has_next);
        assert!(!p.has_prev);
        assert_eq!(p.start_item(), 0);
        assert_eq!(p.end_item(), 0);
    }

    #[test]
    fn test_last_page_partial() {
        let p = Pagination::new(5, 10, 45);
        assert!(p.is_last());
        assert_eq!(p.start_item(), 41);
        assert_eq!(p.end_item(), 45);
    }

    #[test]
    fn test_page_links_window() {
        assert_eq!(numbers(&Pagination::new(1, 10, 5).page_links()), vec!["[1]"]);
        assert_eq!(
            numbers(&Pagination::new(1, 10, 30).page_links()),
            vec!["[1]", "2", "3"]
        );
        assert_eq!(
            numbers(&Pagination::new(1, 10, 100).page_links()),
            vec!["[1]", "2", "...", "10"]
        );
        assert_eq!(
            numbers(&Pagination::new(5, 10, 100).page_links()),
            vec!["1", "...", "4", "[5]", "6", "...", "10"]
        );
        assert_eq!(
            numbers(&Pagination::new(10, 10, 100).page_links()),
            vec!["1", "...", "9", "[10]"]
        );
        assert_eq!(
            numbers(&Pagination::new(3, 10, 50).page_links()),
            vec!["1", "2", "[3]", "4", "5"]
        );
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn test_results_label() {
        assert_eq!(results_label(0), "0 products found");
        assert_eq!(results_label(1), "1 product found");
        assert_eq!(results_label(12), "12 products found");
    }
}
