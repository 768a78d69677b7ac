//! Client route paths and link builders.
//!
//! Search links built here carry no `page`, so a new filter always lands on
//! the first page.

use rarebooks_catalog::{
    BookId, CategoryFilter, CategoryId, PriceRangeFilter, SearchQuery, SellerFilter, TitleFilter,
    UrlQuery,
};
use rarebooks_search::{
    CategorySearch, Location, PriceRangeSearch, SearchMode, SellerSearch, TitleSearch,
};

pub const HOME: &str = "/";
pub const CATEGORIES: &str = "/categories";
pub const LOGIN: &str = "/login";
pub const SUBSCRIBE: &str = "/subscribe";

/// A path segment as typed by the user. Segments that fail to decode are
/// kept verbatim.
pub fn decode_segment(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|v| v.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

pub fn book_href(id: BookId) -> String {
    format!("/book/{id}")
}

/// Link to the first page of a search.
pub fn search_href<M: SearchMode>(filter: M::Filter) -> String {
    let location = M::location(&SearchQuery::new(filter));
    let mut query = location.query;
    query.remove(rarebooks_catalog::url::PAGE_PARAM);
    Location::new(location.path, query).href()
}

pub fn category_href(id: CategoryId) -> String {
    search_href::<CategorySearch>(CategoryFilter::new(id))
}

pub fn title_search_href(title: &str, exact_phrase: bool) -> Option<String> {
    let title = title.trim();
    (!title.is_empty())
        .then(|| search_href::<TitleSearch>(TitleFilter::new(title).exact(exact_phrase)))
}

/// `None` unless both bounds are whole numbers.
pub fn price_search_href(min: &str, max: &str) -> Option<String> {
    let segments: UrlQuery = [("min", min.trim()), ("max", max.trim())].into_iter().collect();
    PriceRangeSearch::filter_from(&segments, &UrlQuery::new())
        .ok()
        .map(|filter: PriceRangeFilter| search_href::<PriceRangeSearch>(filter))
}

pub fn seller_search_href(seller: &str) -> Option<String> {
    let seller = seller.trim();
    (!seller.is_empty()).then(|| search_href::<SellerSearch>(SellerFilter::new(seller)))
}
