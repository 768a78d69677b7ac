//! End-to-end search flows against a scripted transport.

use async_trait::async_trait;
use futures::channel::oneshot;
use rarebooks_auth::{AuthToken, Credentials, LoginResponse};
use rarebooks_catalog::{
    BookDetails, BookId, Category, CategoryFilter, PriceRangeFilter, Quota, ResultPage,
    SearchOutcome, SearchQuery, SellerFilter, TitleFilter, UrlQuery,
};
use rarebooks_data::{FetchClient, Method, Response, StaticTransport};
use rarebooks_search::{
    controller, gate, load_thumbnails, ApiError, Gated, HttpSearchApi, ImageData, ImageFactory,
    PriceRangeSearch, SearchApi, SearchController, SearchMode, SearchStatus, ThumbnailCache,
    ThumbnailUpdate, TitleSearch,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

const BASE: &str = "https://books.test/api";

fn books_json(ids: &[u64]) -> String {
    let items: Vec<String> = ids
        .iter()
        .map(|id| {
            format!(
                r#"{{"id":{id},"title":"Пушкин, том {id}","price":{price},"date":"1837-02-10","sellerName":"Букинист","type":"book","firstImageName":"{id}.jpg"}}"#,
                price = id * 1000
            )
        })
        .collect();
    items.join(",")
}

fn http_api(transport: &Rc<StaticTransport>) -> HttpSearchApi {
    HttpSearchApi::new(FetchClient::with_transport(transport.clone()).with_base_url(BASE))
}

#[tokio::test]
async fn title_search_renders_first_of_five_pages() {
    let body = format!(r#"{{"items":[{}],"totalPages":5}}"#, books_json(&[1, 2, 3]));
    let transport = Rc::new(StaticTransport::new().get_json("/api/books/search/title", body));
    let api = http_api(&transport);

    let segments: UrlQuery = [("title", "Пушкин")].into_iter().collect();
    let query = TitleSearch::query_from(&segments, &UrlQuery::new()).unwrap();
    let (mut search, ticket) = SearchController::<TitleSearch>::mount(query);
    let result = controller::fetch::<TitleSearch>(&api, &ticket).await;
    let location = search.settle(ticket, result).unwrap();

    assert_eq!(search.items().len(), 3);
    let pagination = search.pagination().unwrap();
    assert_eq!(pagination.total_pages, 5);
    assert!(!pagination.has_prev());
    assert!(pagination.has_next());
    assert_eq!(location.query.get("page"), Some("1"));
    assert_eq!(location.query.get("exactPhrase"), Some("false"));

    let sent = transport.requests();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].url.contains("exactPhrase=false&page=1"));
}

#[tokio::test]
async fn each_page_navigation_requests_that_page() {
    let body = format!(r#"{{"items":[{}],"totalPages":4}}"#, books_json(&[9]));
    let transport = Rc::new(StaticTransport::new().get_json("/api/categories/3/books", body));
    let api = http_api(&transport);

    let mut search = SearchController::<rarebooks_search::CategorySearch>::new(SearchQuery::new(
        CategoryFilter::new(3),
    ));
    for page in 1..=4 {
        let ticket = search.go_to_page(page);
        let result =
            controller::fetch::<rarebooks_search::CategorySearch>(&api, &ticket).await;
        let location = search.settle(ticket, result).unwrap();
        assert_eq!(location.page(), page);
        assert_eq!(location.path, "/category/3");
    }

    let pages: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
    assert_eq!(
        pages,
        (1..=4)
            .map(|p| format!("{BASE}/categories/3/books?page={p}"))
            .collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn price_range_partial_shows_teaser() {
    let transport = Rc::new(StaticTransport::new().get_json(
        "/api/books/search/price",
        r#"{"partialResults":true,"totalFound":42,"firstBookTitles":["A","B"],"remainingRequests":0}"#,
    ));
    let api = http_api(&transport);

    let query = SearchQuery::new(PriceRangeFilter::new(100, 500));
    let (mut search, ticket) = SearchController::<PriceRangeSearch>::mount(query);
    let result = controller::fetch::<PriceRangeSearch>(&api, &ticket).await;
    let location = search.settle(ticket, result).unwrap();

    assert!(search.items().is_empty());
    assert!(search.pagination().is_none());
    let Some(Gated::Teaser(teaser)) = search.gated("/subscribe") else {
        panic!("expected a teaser, got {:?}", search.status());
    };
    assert_eq!(teaser.total_found, 42);
    assert_eq!(teaser.sample_titles, vec!["A", "B"]);
    assert_eq!(teaser.subscribe_href, "/subscribe");
    assert_eq!(teaser.remaining, Quota::Remaining(0));
    assert_eq!(location.href(), "/search/price/100/500?page=1");
}

#[tokio::test]
async fn malformed_and_failed_responses_become_failed_state() {
    let transport = Rc::new(
        StaticTransport::new()
            .get_json("/api/books/search/seller", r#"{"items":[]}"#)
            .route(
                Method::Get,
                "/api/books/search/title",
                Ok(Response::new(503, Vec::new(), b"maintenance".to_vec())),
            ),
    );
    let api = http_api(&transport);

    let (mut seller, ticket) = SearchController::<rarebooks_search::SellerSearch>::mount(
        SearchQuery::new(SellerFilter::new("x")),
    );
    let result = controller::fetch::<rarebooks_search::SellerSearch>(&api, &ticket).await;
    assert!(result.as_ref().is_err_and(ApiError::is_malformed));
    assert!(seller.settle(ticket, result).is_some());
    assert_eq!(seller.status(), &SearchStatus::Failed);

    let (mut title, ticket) =
        SearchController::<TitleSearch>::mount(SearchQuery::new(TitleFilter::new("x")));
    let result = controller::fetch::<TitleSearch>(&api, &ticket).await;
    title.settle(ticket, result);
    assert_eq!(title.status(), &SearchStatus::Failed);
    assert!(title.items().is_empty());
}

/// API whose title searches resolve only when the test says so.
#[derive(Default)]
struct DeferredApi {
    pending: RefCell<HashMap<u32, oneshot::Receiver<SearchOutcome>>>,
}

impl DeferredApi {
    fn defer(&self, page: u32) -> oneshot::Sender<SearchOutcome> {
        let (tx, rx) = oneshot::channel();
        self.pending.borrow_mut().insert(page, rx);
        tx
    }
}

fn unused<T>() -> Result<T, ApiError> {
    Err(ApiError::Malformed("not scripted".into()))
}

#[async_trait(?Send)]
impl SearchApi for DeferredApi {
    async fn search_by_title(
        &self,
        _filter: &TitleFilter,
        page: u32,
    ) -> Result<SearchOutcome, ApiError> {
        let rx = self.pending.borrow_mut().remove(&page);
        match rx {
            Some(rx) => rx
                .await
                .map_err(|_| ApiError::Malformed("sender dropped".into())),
            None => unused(),
        }
    }

    async fn search_by_price_range(
        &self,
        _filter: &PriceRangeFilter,
        _page: u32,
    ) -> Result<SearchOutcome, ApiError> {
        unused()
    }

    async fn search_by_seller(
        &self,
        _filter: &SellerFilter,
        _page: u32,
    ) -> Result<SearchOutcome, ApiError> {
        unused()
    }

    async fn search_by_category(
        &self,
        _filter: &CategoryFilter,
        _page: u32,
    ) -> Result<SearchOutcome, ApiError> {
        unused()
    }

    async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        unused()
    }

    async fn book(&self, _id: BookId) -> Result<BookDetails, ApiError> {
        unused()
    }

    async fn book_image(&self, _id: BookId, _image_name: &str) -> Result<ImageData, ApiError> {
        unused()
    }

    async fn login(&self, _credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        unused()
    }
}

fn outcome(ids: &[u64], total_pages: u32) -> SearchOutcome {
    let body = format!(r#"{{"items":[{}],"totalPages":{total_pages}}}"#, books_json(ids));
    rarebooks_search::wire::decode_outcome(body.as_bytes()).unwrap()
}

#[tokio::test]
async fn late_first_page_does_not_overwrite_second() {
    let api = DeferredApi::default();
    let first_tx = api.defer(1);
    let second_tx = api.defer(2);

    let (mut search, first) =
        SearchController::<TitleSearch>::mount(SearchQuery::new(TitleFilter::new("Пушкин")));
    let second = search.go_to_page(2);

    let first_fetch = controller::fetch::<TitleSearch>(&api, &first);
    let second_fetch = controller::fetch::<TitleSearch>(&api, &second);

    second_tx.send(outcome(&[21, 22], 3)).unwrap();
    let second_result = second_fetch.await;
    assert!(search.settle(second, second_result).is_some());

    first_tx.send(outcome(&[11], 3)).unwrap();
    let first_result = first_fetch.await;
    assert!(search.settle(first, first_result).is_none());

    assert_eq!(search.query().page, 2);
    let ids: Vec<u64> = search.items().iter().map(|b| b.id.get()).collect();
    assert_eq!(ids, vec![21, 22]);
    assert_eq!(search.location().page(), 2);
}

#[derive(Clone, Default)]
struct CountingFactory {
    created: Rc<RefCell<usize>>,
    released: Rc<RefCell<usize>>,
}

impl ImageFactory for CountingFactory {
    type Handle = String;

    fn create(&self, image: &ImageData) -> Result<String, String> {
        *self.created.borrow_mut() += 1;
        Ok(format!("blob:{}", image.bytes.len()))
    }

    fn release(&self, _handle: String) {
        *self.released.borrow_mut() += 1;
    }
}

fn image_routes() -> StaticTransport {
    let ok = |len: usize| {
        Ok(Response::new(
            200,
            vec![("Content-Type".into(), "image/jpeg".into())],
            vec![0xFF; len],
        ))
    };
    StaticTransport::new()
        .route(Method::Get, "/api/books/1/images/", Err(rarebooks_data::FetchError::RequestError("reset".into())))
        .route(Method::Get, "/api/books/2/images/", ok(2))
        .route(Method::Get, "/api/books/3/images/", ok(3))
}

#[tokio::test]
async fn thumbnail_failure_does_not_block_others() {
    let transport = Rc::new(image_routes());
    let api = http_api(&transport).with_token(Some(AuthToken::new("tok").unwrap()));

    let page: ResultPage = match outcome(&[1, 2, 3], 1) {
        SearchOutcome::Page(page) => page,
        SearchOutcome::Partial(_) => unreachable!(),
    };
    let gated = gate(SearchOutcome::Page(page), "/subscribe");
    let items = gated.list().unwrap().items.clone();

    let mut cache = ThumbnailCache::new(CountingFactory::default());
    let requests = cache.refresh(&items);
    assert_eq!(requests.len(), 3);

    let mut updates = Vec::new();
    load_thumbnails(&api, requests, |request, result| {
        updates.push(cache.complete(&request, result));
    })
    .await;

    assert_eq!(
        updates
            .iter()
            .filter(|u| matches!(u, ThumbnailUpdate::Failed { .. }))
            .count(),
        1
    );
    assert!(cache.get(BookId::new(1)).is_none());
    assert_eq!(cache.get(BookId::new(2)).map(String::as_str), Some("blob:2"));
    assert_eq!(cache.get(BookId::new(3)).map(String::as_str), Some("blob:3"));
    assert!(cache.has_warning());

    assert!(transport
        .requests()
        .iter()
        .all(|r| r.header("Authorization") == Some("Bearer tok")));
}

#[tokio::test]
async fn unmount_with_fetches_in_flight_changes_nothing() {
    let transport = Rc::new(image_routes());
    let api = http_api(&transport);
    let factory = CountingFactory::default();

    let items = match outcome(&[1, 2, 3], 1) {
        SearchOutcome::Page(page) => page.items,
        SearchOutcome::Partial(_) => unreachable!(),
    };
    let mut cache = ThumbnailCache::new(factory.clone());
    let requests = cache.refresh(&items);
    cache.unmount();

    let mut updates = Vec::new();
    load_thumbnails(&api, requests, |request, result| {
        updates.push(cache.complete(&request, result));
    })
    .await;

    assert_eq!(updates, vec![ThumbnailUpdate::Stale; 3]);
    assert!(cache.is_empty());
    assert_eq!(*factory.created.borrow(), 0);
}
