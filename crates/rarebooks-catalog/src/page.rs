//! Search results, teaser results and pagination.

use serde::{Deserialize, Serialize};

use crate::book::BookSummary;

/// Remaining request allowance reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Quota {
    /// No allowance applies (field absent or null).
    #[default]
    Unlimited,
    /// Requests left in the current period.
    Remaining(u32),
}

impl Quota {
    /// Decode the nullable `remainingRequests` field.
    pub fn from_remaining(remaining: Option<u32>) -> Self {
        match remaining {
            Some(n) => Quota::Remaining(n),
            None => Quota::Unlimited,
        }
    }

    /// Requests left, `None` when unlimited.
    pub fn remaining(&self) -> Option<u32> {
        match self {
            Quota::Unlimited => None,
            Quota::Remaining(n) => Some(*n),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, Quota::Remaining(0))
    }
}

/// One full page of search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    pub items: Vec<BookSummary>,
    /// Always at least 1.
    pub total_pages: u32,
    pub total_items: Option<u64>,
    pub remaining: Quota,
}

impl ResultPage {
    /// Create a page; `total_pages` is clamped to at least 1.
    pub fn new(items: Vec<BookSummary>, total_pages: u32) -> Self {
        Self {
            items,
            total_pages: total_pages.max(1),
            total_items: None,
            remaining: Quota::Unlimited,
        }
    }

    pub fn with_total_items(mut self, total: Option<u64>) -> Self {
        self.total_items = total;
        self
    }

    pub fn with_remaining(mut self, remaining: Quota) -> Self {
        self.remaining = remaining;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Truncated response returned when the caller lacks entitlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialResult {
    pub total_found: u64,
    /// At most [`PartialResult::SAMPLE_LIMIT`] titles.
    pub sample_titles: Vec<String>,
    pub remaining: Quota,
}

impl PartialResult {
    /// Maximum number of sample titles kept.
    pub const SAMPLE_LIMIT: usize = 2;

    /// Create a teaser result, keeping only the first sample titles.
    pub fn new(total_found: u64, mut sample_titles: Vec<String>) -> Self {
        sample_titles.truncate(Self::SAMPLE_LIMIT);
        Self {
            total_found,
            sample_titles,
            remaining: Quota::Unlimited,
        }
    }

    pub fn with_remaining(mut self, remaining: Quota) -> Self {
        self.remaining = remaining;
        self
    }
}

/// What a search request produced. The two shapes never mix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SearchOutcome {
    Page(ResultPage),
    Partial(PartialResult),
}

impl SearchOutcome {
    pub fn remaining(&self) -> Quota {
        match self {
            SearchOutcome::Page(page) => page.remaining,
            SearchOutcome::Partial(partial) => partial.remaining,
        }
    }

    pub fn is_partial(&self) -> bool {
        matches!(self, SearchOutcome::Partial(_))
    }
}

/// Position within a paginated result set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed). Not clamped to `total_pages`.
    pub page: u32,
    /// Total number of pages, at least 1.
    pub total_pages: u32,
}

impl Pagination {
    pub fn new(page: u32, total_pages: u32) -> Self {
        Self {
            page: page.max(1),
            total_pages: total_pages.max(1),
        }
    }

    /// The page the controls treat as current: the requested page, capped at
    /// `total_pages`.
    pub fn current(&self) -> u32 {
        self.page.min(self.total_pages)
    }

    pub fn has_prev(&self) -> bool {
        self.current() > 1
    }

    pub fn has_next(&self) -> bool {
        self.current() < self.total_pages
    }

    pub fn is_first(&self) -> bool {
        self.current() == 1
    }

    pub fn is_last(&self) -> bool {
        self.current() >= self.total_pages
    }

    /// Page before the current one.
    pub fn prev(&self) -> Option<u32> {
        self.has_prev().then(|| self.current() - 1)
    }

    /// Page after the current one.
    pub fn next(&self) -> Option<u32> {
        self.has_next().then(|| self.current() + 1)
    }

    /// Page numbers for the numbered control, a window of at most
    /// `max_visible` pages around the current one.
    pub fn page_numbers(&self, max_visible: usize) -> Vec<u32> {
        let max_visible = u32::try_from(max_visible).unwrap_or(u32::MAX).max(1);
        if self.total_pages <= max_visible {
            return (1..=self.total_pages).collect();
        }

        let half = max_visible / 2;
        let start = self.current().saturating_sub(half).max(1);
        let end = start
            .saturating_add(max_visible - 1)
            .min(self.total_pages);
        let start = end.saturating_add(1).saturating_sub(max_visible).max(1);

        (start..=end).collect()
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_from_remaining() {
        assert_eq!(Quota::from_remaining(None), Quota::Unlimited);
        assert_eq!(Quota::from_remaining(Some(3)).remaining(), Some(3));
        assert!(Quota::Remaining(0).is_exhausted());
        assert!(!Quota::Unlimited.is_exhausted());
    }

    #[test]
    fn test_result_page_clamps_total_pages() {
        let page = ResultPage::new(Vec::new(), 0);
        assert_eq!(page.total_pages, 1);
        assert!(page.is_empty());
    }

    #[test]
    fn test_partial_result_keeps_two_titles() {
        let partial = PartialResult::new(
            42,
            vec!["A".to_string(), "B".to_string(), "C".to_string()],
        );
        assert_eq!(partial.sample_titles, vec!["A", "B"]);
        assert_eq!(partial.total_found, 42);
    }

    #[test]
    fn test_pagination_first_page() {
        let p = Pagination::new(1, 5);
        assert!(p.is_first());
        assert!(!p.has_prev());
        assert!(p.has_next());
        assert_eq!(p.prev(), None);
        assert_eq!(p.next(), Some(2));
    }

    #[test]
    fn test_pagination_last_page() {
        let p = Pagination::new(5, 5);
        assert!(p.is_last());
        assert!(p.has_prev());
        assert!(!p.has_next());
    }

    #[test]
    fn test_pagination_single_page() {
        let p = Pagination::new(1, 1);
        assert!(!p.has_prev());
        assert!(!p.has_next());
        assert_eq!(p.page_numbers(7), vec![1]);
    }

    #[test]
    fn test_pagination_window_centered() {
        let p = Pagination::new(10, 20);
        assert_eq!(p.page_numbers(5), vec![8, 9, 10, 11, 12]);
    }

    #[test]
    fn test_pagination_window_at_edges() {
        assert_eq!(Pagination::new(1, 20).page_numbers(5), vec![1, 2, 3, 4, 5]);
        assert_eq!(
            Pagination::new(20, 20).page_numbers(5),
            vec![16, 17, 18, 19, 20]
        );
    }

    #[test]
    fn test_pagination_out_of_range_page_kept() {
        let p = Pagination::new(9, 3);
        assert_eq!(p.page, 9);
        assert_eq!(p.current(), 3);
        assert!(p.is_last());
        assert!(!p.has_next());
        assert_eq!(p.prev(), Some(2));
        assert_eq!(p.page_numbers(5), vec![1, 2, 3]);
    }

    #[test]
    fn test_pagination_huge_page_from_url() {
        let page = crate::url::UrlQuery::parse("page=4294967295").page();
        let p = Pagination::new(page, 20);

        assert_eq!(p.page_numbers(7), vec![14, 15, 16, 17, 18, 19, 20]);
        assert_eq!(p.prev(), Some(19));
        assert_eq!(p.next(), None);
        assert_eq!(Pagination::new(u32::MAX, 20).page_numbers(7).len(), 7);
    }
}
