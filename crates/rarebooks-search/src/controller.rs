//! Paginated, URL-synchronized search controller.
//!
//! One controller drives every search mode. The page shell derives a query
//! from the current URL, calls [`SearchController::begin`], runs the fetch,
//! and hands the result to [`SearchController::settle`] together with the
//! ticket it got from `begin`. Only the ticket of the most recent request can
//! change state; a settled request yields the [`Location`] to write back to
//! the address bar with a replace navigation.
//!
//! ```text
//! Idle -> Loading -> Full | Partial | Empty | Failed -> Loading -> ...
//! ```

use rarebooks_catalog::{
    BookSummary, Pagination, PartialResult, Quota, ResultPage, SearchOutcome, SearchQuery,
};
use std::fmt;
use std::marker::PhantomData;
use tracing::{debug, error, warn};

use crate::gate::{gate, Gated};
use crate::messages::Messages;
use crate::{ApiError, Epoch, Location, SearchApi, SearchMode};

/// What the search page currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchStatus {
    /// Nothing requested yet.
    Idle,
    Loading,
    /// A page with at least one item.
    Full(ResultPage),
    /// A page with no items.
    Empty,
    /// The API answered with a teaser instead of a page.
    Partial(PartialResult),
    /// The request failed; the cause has been logged.
    Failed,
}

/// Handle for one issued request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestTicket<F> {
    epoch: Epoch,
    query: SearchQuery<F>,
}

impl<F> RequestTicket<F> {
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn query(&self) -> &SearchQuery<F> {
        &self.query
    }
}

/// Search state for one mode: the last requested query, its status, the
/// reported quota and the epoch of the request allowed to settle.
pub struct SearchController<M: SearchMode> {
    query: SearchQuery<M::Filter>,
    status: SearchStatus,
    remaining: Quota,
    epoch: Epoch,
    _mode: PhantomData<fn() -> M>,
}

impl<M: SearchMode> SearchController<M> {
    /// An idle controller for `query`. Nothing is requested until `begin`.
    pub fn new(query: SearchQuery<M::Filter>) -> Self {
        Self {
            query,
            status: SearchStatus::Idle,
            remaining: Quota::Unlimited,
            epoch: Epoch::default(),
            _mode: PhantomData,
        }
    }

    /// Create a controller and immediately issue its first request.
    pub fn mount(query: SearchQuery<M::Filter>) -> (Self, RequestTicket<M::Filter>) {
        let mut controller = Self::new(query.clone());
        let ticket = controller.begin(query);
        (controller, ticket)
    }

    /// Issue a request for `query`, superseding any request in flight.
    pub fn begin(&mut self, query: SearchQuery<M::Filter>) -> RequestTicket<M::Filter> {
        let epoch = self.epoch.advance();
        self.query = query.clone();
        self.status = SearchStatus::Loading;
        debug!(mode = M::NAME, page = query.page, %epoch, "search started");
        RequestTicket { epoch, query }
    }

    /// Same filter, another page.
    pub fn go_to_page(&mut self, page: u32) -> RequestTicket<M::Filter> {
        self.begin(self.query.at_page(page))
    }

    /// New filter. The current page is kept.
    pub fn navigate_filter(&mut self, filter: M::Filter) -> RequestTicket<M::Filter> {
        let query = SearchQuery {
            filter,
            page: self.query.page,
        };
        self.begin(query)
    }

    /// Whether `query` differs from what the controller last requested.
    ///
    /// The location written back after a settlement re-enters the page shell
    /// as a route change; this keeps that echo from fetching again.
    pub fn needs_fetch(&self, query: &SearchQuery<M::Filter>) -> bool {
        self.status == SearchStatus::Idle || *query != self.query
    }

    /// Apply a finished request. Returns `None` for superseded tickets,
    /// otherwise the location to replace the current one with.
    pub fn settle(
        &mut self,
        ticket: RequestTicket<M::Filter>,
        result: Result<SearchOutcome, ApiError>,
    ) -> Option<Location> {
        if ticket.epoch != self.epoch {
            debug!(
                mode = M::NAME,
                page = ticket.query.page,
                epoch = %ticket.epoch,
                current = %self.epoch,
                "dropping stale search result"
            );
            return None;
        }

        self.status = match result {
            Ok(outcome) => {
                self.remaining = outcome.remaining();
                match outcome {
                    SearchOutcome::Page(page) if page.is_empty() => SearchStatus::Empty,
                    SearchOutcome::Page(page) => SearchStatus::Full(page),
                    SearchOutcome::Partial(partial) => SearchStatus::Partial(partial),
                }
            }
            Err(e) if e.is_malformed() => {
                error!(mode = M::NAME, page = ticket.query.page, error = %e, "unexpected search response");
                SearchStatus::Failed
            }
            Err(e) => {
                warn!(mode = M::NAME, page = ticket.query.page, error = %e, "search failed");
                SearchStatus::Failed
            }
        };

        Some(M::location(&ticket.query))
    }

    /// Drop whatever is in flight; later settlements are ignored.
    pub fn cancel(&mut self) {
        self.epoch.advance();
        if self.status == SearchStatus::Loading {
            self.status = SearchStatus::Idle;
        }
    }

    pub fn query(&self) -> &SearchQuery<M::Filter> {
        &self.query
    }

    pub fn status(&self) -> &SearchStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == SearchStatus::Loading
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Last reported quota; kept across failures.
    pub fn remaining(&self) -> Quota {
        self.remaining
    }

    /// Items to render. Empty unless a full page is shown.
    pub fn items(&self) -> &[BookSummary] {
        match &self.status {
            SearchStatus::Full(page) => &page.items,
            _ => &[],
        }
    }

    pub fn pagination(&self) -> Option<Pagination> {
        match &self.status {
            SearchStatus::Full(page) => Some(Pagination::new(self.query.page, page.total_pages)),
            _ => None,
        }
    }

    /// The list or the teaser, once one of them is known.
    pub fn gated(&self, subscribe_href: &str) -> Option<Gated<ResultPage>> {
        match &self.status {
            SearchStatus::Full(page) => Some(gate(SearchOutcome::Page(page.clone()), subscribe_href)),
            SearchStatus::Partial(partial) => {
                Some(gate(SearchOutcome::Partial(partial.clone()), subscribe_href))
            }
            _ => None,
        }
    }

    /// Status line for the non-list states.
    pub fn notice<'m>(&self, messages: &'m Messages) -> Option<&'m str> {
        match self.status {
            SearchStatus::Loading => Some(&messages.loading),
            SearchStatus::Empty => Some(&messages.nothing_found),
            SearchStatus::Failed => Some(&messages.search_failed),
            _ => None,
        }
    }

    pub fn heading(&self, messages: &Messages) -> String {
        M::heading(&self.query.filter, messages)
    }

    pub fn location(&self) -> Location {
        M::location(&self.query)
    }
}

impl<M: SearchMode> fmt::Debug for SearchController<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchController")
            .field("mode", &M::NAME)
            .field("query", &self.query)
            .field("status", &self.status)
            .field("remaining", &self.remaining)
            .field("epoch", &self.epoch)
            .finish()
    }
}

/// Run the request a ticket describes.
pub async fn fetch<M: SearchMode>(
    api: &dyn SearchApi,
    ticket: &RequestTicket<M::Filter>,
) -> Result<SearchOutcome, ApiError> {
    M::fetch(api, &ticket.query).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SellerSearch, TitleSearch};
    use rarebooks_catalog::{BookId, SellerFilter, TitleFilter};
    use rarebooks_data::FetchError;

    fn book(id: u64) -> BookSummary {
        BookSummary {
            id: BookId::new(id),
            title: format!("Book {id}"),
            price: 100.0,
            date: String::new(),
            seller_name: "Seller".into(),
            book_type: "book".into(),
            first_image_name: None,
        }
    }

    fn page(ids: &[u64], total_pages: u32) -> SearchOutcome {
        SearchOutcome::Page(ResultPage::new(ids.iter().copied().map(book).collect(), total_pages))
    }

    fn title_query(page: u32) -> SearchQuery<TitleFilter> {
        SearchQuery::new(TitleFilter::new("Пушкин")).with_page(page)
    }

    #[test]
    fn test_mount_starts_loading() {
        let (controller, ticket) = SearchController::<TitleSearch>::mount(title_query(1));
        assert!(controller.is_loading());
        assert_eq!(ticket.query().page, 1);
        assert_eq!(controller.notice(&Messages::default()), Some("Загрузка…"));
    }

    #[test]
    fn test_full_page_settles() {
        let (mut controller, ticket) = SearchController::<TitleSearch>::mount(title_query(1));
        let location = controller.settle(ticket, Ok(page(&[1, 2, 3], 5))).unwrap();

        assert_eq!(controller.items().len(), 3);
        let pagination = controller.pagination().unwrap();
        assert_eq!(pagination.total_pages, 5);
        assert!(!pagination.has_prev());
        assert!(pagination.has_next());
        assert_eq!(location.page(), 1);
        assert_eq!(controller.notice(&Messages::default()), None);
    }

    #[test]
    fn test_empty_page_is_not_an_error() {
        let (mut controller, ticket) = SearchController::<TitleSearch>::mount(title_query(1));
        controller.settle(ticket, Ok(page(&[], 1)));

        assert_eq!(controller.status(), &SearchStatus::Empty);
        assert!(controller.items().is_empty());
        assert!(controller.pagination().is_none());
        assert_eq!(
            controller.notice(&Messages::default()),
            Some(Messages::default().nothing_found.as_str())
        );
    }

    #[test]
    fn test_failure_clears_items_and_still_syncs_url() {
        let (mut controller, ticket) = SearchController::<TitleSearch>::mount(title_query(1));
        controller.settle(ticket, Ok(page(&[1], 2)));

        let ticket = controller.go_to_page(2);
        let location = controller.settle(
            ticket,
            Err(FetchError::RequestError("offline".into()).into()),
        );

        assert_eq!(controller.status(), &SearchStatus::Failed);
        assert!(controller.items().is_empty());
        assert_eq!(location.map(|l| l.page()), Some(2));
    }

    #[test]
    fn test_stale_result_is_dropped() {
        let (mut controller, first) = SearchController::<TitleSearch>::mount(title_query(1));
        let second = controller.go_to_page(2);

        assert!(controller.settle(second, Ok(page(&[20, 21], 3))).is_some());
        assert!(controller.settle(first, Ok(page(&[10], 3))).is_none());

        assert_eq!(controller.query().page, 2);
        assert_eq!(controller.items()[0].id, BookId::new(20));
    }

    #[test]
    fn test_partial_keeps_quota() {
        let (mut controller, ticket) = SearchController::<TitleSearch>::mount(title_query(1));
        let partial = PartialResult::new(42, vec!["A".into(), "B".into()]).with_remaining(Quota::Remaining(0));
        controller.settle(ticket, Ok(SearchOutcome::Partial(partial)));

        assert!(controller.items().is_empty());
        assert_eq!(controller.remaining(), Quota::Remaining(0));
        assert!(controller.gated("/subscribe").unwrap().is_teaser());

        let ticket = controller.go_to_page(1);
        controller.settle(ticket, Err(ApiError::Malformed("x".into())));
        assert_eq!(controller.remaining(), Quota::Remaining(0));
    }

    #[test]
    fn test_navigate_filter_keeps_page() {
        let mut controller =
            SearchController::<SellerSearch>::new(SearchQuery::new(SellerFilter::new("A")).with_page(3));
        let ticket = controller.navigate_filter(SellerFilter::new("B"));
        assert_eq!(ticket.query().page, 3);
        assert_eq!(ticket.query().filter.seller_name, "B");
    }

    #[test]
    fn test_needs_fetch() {
        let controller = SearchController::<TitleSearch>::new(title_query(1));
        assert!(controller.needs_fetch(&title_query(1)));

        let (controller, _ticket) = SearchController::<TitleSearch>::mount(title_query(1));
        assert!(!controller.needs_fetch(&title_query(1)));
        assert!(controller.needs_fetch(&title_query(2)));
    }

    #[test]
    fn test_cancel_ignores_in_flight() {
        let (mut controller, ticket) = SearchController::<TitleSearch>::mount(title_query(1));
        controller.cancel();
        assert!(controller.settle(ticket, Ok(page(&[1], 1))).is_none());
        assert_eq!(controller.status(), &SearchStatus::Idle);
    }
}
