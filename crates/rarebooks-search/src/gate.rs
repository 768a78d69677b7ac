//! Partial-result gate.
//!
//! Callers without entitlement get a teaser (a count and a couple of titles)
//! instead of the list. The gate only branches; it never re-fetches.

use rarebooks_catalog::{PartialResult, Quota, ResultPage, SearchOutcome};

use crate::messages::{fill, Messages};

/// Teaser shown in place of a gated list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Teaser {
    pub total_found: u64,
    /// At most two titles.
    pub sample_titles: Vec<String>,
    pub remaining: Quota,
    /// Target of the call-to-action.
    pub subscribe_href: String,
}

impl Teaser {
    pub fn from_partial(partial: PartialResult, subscribe_href: impl Into<String>) -> Self {
        Self {
            total_found: partial.total_found,
            sample_titles: partial.sample_titles,
            remaining: partial.remaining,
            subscribe_href: subscribe_href.into(),
        }
    }

    pub fn headline(&self, messages: &Messages) -> String {
        fill(&messages.teaser_found, &[("count", &self.total_found)])
    }
}

/// Either the full content or the teaser standing in for it.
#[derive(Debug, Clone, PartialEq)]
pub enum Gated<T> {
    List(T),
    Teaser(Teaser),
}

impl<T> Gated<T> {
    pub fn is_teaser(&self) -> bool {
        matches!(self, Gated::Teaser(_))
    }

    pub fn list(&self) -> Option<&T> {
        match self {
            Gated::List(list) => Some(list),
            Gated::Teaser(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Gated<U> {
        match self {
            Gated::List(list) => Gated::List(f(list)),
            Gated::Teaser(teaser) => Gated::Teaser(teaser),
        }
    }
}

/// Branch a search outcome.
pub fn gate(outcome: SearchOutcome, subscribe_href: &str) -> Gated<ResultPage> {
    match outcome {
        SearchOutcome::Page(page) => Gated::List(page),
        SearchOutcome::Partial(partial) => Gated::Teaser(Teaser::from_partial(partial, subscribe_href)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_becomes_teaser() {
        let outcome = SearchOutcome::Partial(PartialResult::new(
            42,
            vec!["A".into(), "B".into()],
        ));
        let Gated::Teaser(teaser) = gate(outcome, "/subscribe") else {
            panic!("expected a teaser");
        };
        assert_eq!(teaser.total_found, 42);
        assert_eq!(teaser.sample_titles, vec!["A", "B"]);
        assert_eq!(teaser.subscribe_href, "/subscribe");
        assert_eq!(teaser.headline(&Messages::default()), "Найдено книг: 42");
    }

    #[test]
    fn test_page_passes_through() {
        let page = ResultPage::new(Vec::new(), 3);
        let gated = gate(SearchOutcome::Page(page.clone()), "/subscribe");
        assert_eq!(gated.list(), Some(&page));
        assert!(!gated.is_teaser());
        assert_eq!(gated.map(|p| p.total_pages), Gated::List(3));
    }
}
