//! The four search modes.
//!
//! A [`SearchMode`] tells the generic controller how its filter maps to a
//! client route, which query keys it owns, how to title the page and which
//! API call fetches a page.

use futures::future::LocalBoxFuture;
use rarebooks_catalog::filter::EXACT_PHRASE_PARAM;
use rarebooks_catalog::url::{encode_segment, PAGE_PARAM};
use rarebooks_catalog::{
    CatalogError, CategoryFilter, PriceRangeFilter, SearchOutcome, SearchQuery, SellerFilter,
    TitleFilter, UrlQuery,
};
use std::fmt::Debug;

use crate::messages::{fill, Messages};
use crate::{ApiError, Location, SearchApi};

pub trait SearchMode: 'static {
    type Filter: Clone + PartialEq + Debug + Send + Sync + 'static;

    /// Short name used in logs.
    const NAME: &'static str;

    /// Route pattern, for documentation and route tables.
    const ROUTE: &'static str;

    /// Names of the route segments the filter is read from.
    const SEGMENTS: &'static [&'static str];

    /// Client path for a filter, without query.
    fn path(filter: &Self::Filter) -> String;

    /// Filter from decoded route segments and the query string.
    fn filter_from(segments: &UrlQuery, query: &UrlQuery) -> Result<Self::Filter, CatalogError>;

    /// Mode-specific query parameters.
    fn query_params(_filter: &Self::Filter) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn heading(filter: &Self::Filter, messages: &Messages) -> String;

    fn fetch<'a>(
        api: &'a dyn SearchApi,
        query: &'a SearchQuery<Self::Filter>,
    ) -> LocalBoxFuture<'a, Result<SearchOutcome, ApiError>>;

    /// Query from route segments and query string, page included.
    fn query_from(
        segments: &UrlQuery,
        query: &UrlQuery,
    ) -> Result<SearchQuery<Self::Filter>, CatalogError> {
        Ok(SearchQuery::new(Self::filter_from(segments, query)?).with_page(query.page()))
    }

    /// Location for a query: the mode path, `page`, then the mode's keys.
    fn location(query: &SearchQuery<Self::Filter>) -> Location {
        let mut params = UrlQuery::new().with(PAGE_PARAM, query.page);
        for (key, value) in Self::query_params(&query.filter) {
            params.set(key, value);
        }
        Location::new(Self::path(&query.filter), params)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleSearch;

impl SearchMode for TitleSearch {
    type Filter = TitleFilter;
    const NAME: &'static str = "title";
    const ROUTE: &'static str = "/search/title/:title";
    const SEGMENTS: &'static [&'static str] = &["title"];

    fn path(filter: &TitleFilter) -> String {
        format!("/search/title/{}", encode_segment(&filter.title))
    }

    fn filter_from(segments: &UrlQuery, query: &UrlQuery) -> Result<TitleFilter, CatalogError> {
        TitleFilter::from_params(segments.get("title"), query)
    }

    fn query_params(filter: &TitleFilter) -> Vec<(&'static str, String)> {
        vec![(EXACT_PHRASE_PARAM, filter.exact_phrase.to_string())]
    }

    fn heading(filter: &TitleFilter, messages: &Messages) -> String {
        fill(&messages.title_heading, &[("title", &filter.title)])
    }

    fn fetch<'a>(
        api: &'a dyn SearchApi,
        query: &'a SearchQuery<TitleFilter>,
    ) -> LocalBoxFuture<'a, Result<SearchOutcome, ApiError>> {
        Box::pin(async move { api.search_by_title(&query.filter, query.page).await })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRangeSearch;

impl SearchMode for PriceRangeSearch {
    type Filter = PriceRangeFilter;
    const NAME: &'static str = "price";
    const ROUTE: &'static str = "/search/price/:min/:max";
    const SEGMENTS: &'static [&'static str] = &["min", "max"];

    fn path(filter: &PriceRangeFilter) -> String {
        format!("/search/price/{}/{}", filter.min, filter.max)
    }

    fn filter_from(segments: &UrlQuery, _query: &UrlQuery) -> Result<PriceRangeFilter, CatalogError> {
        PriceRangeFilter::from_params(segments.get("min"), segments.get("max"))
    }

    fn heading(filter: &PriceRangeFilter, messages: &Messages) -> String {
        fill(
            &messages.price_heading,
            &[("min", &filter.min), ("max", &filter.max)],
        )
    }

    fn fetch<'a>(
        api: &'a dyn SearchApi,
        query: &'a SearchQuery<PriceRangeFilter>,
    ) -> LocalBoxFuture<'a, Result<SearchOutcome, ApiError>> {
        Box::pin(async move { api.search_by_price_range(&query.filter, query.page).await })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SellerSearch;

impl SearchMode for SellerSearch {
    type Filter = SellerFilter;
    const NAME: &'static str = "seller";
    const ROUTE: &'static str = "/search/seller/:seller";
    const SEGMENTS: &'static [&'static str] = &["seller"];

    fn path(filter: &SellerFilter) -> String {
        format!("/search/seller/{}", encode_segment(&filter.seller_name))
    }

    fn filter_from(segments: &UrlQuery, _query: &UrlQuery) -> Result<SellerFilter, CatalogError> {
        SellerFilter::from_params(segments.get("seller"))
    }

    fn heading(filter: &SellerFilter, messages: &Messages) -> String {
        fill(&messages.seller_heading, &[("seller", &filter.seller_name)])
    }

    fn fetch<'a>(
        api: &'a dyn SearchApi,
        query: &'a SearchQuery<SellerFilter>,
    ) -> LocalBoxFuture<'a, Result<SearchOutcome, ApiError>> {
        Box::pin(async move { api.search_by_seller(&query.filter, query.page).await })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySearch;

impl SearchMode for CategorySearch {
    type Filter = CategoryFilter;
    const NAME: &'static str = "category";
    const ROUTE: &'static str = "/category/:id";
    const SEGMENTS: &'static [&'static str] = &["id"];

    fn path(filter: &CategoryFilter) -> String {
        format!("/category/{}", filter.category_id)
    }

    fn filter_from(segments: &UrlQuery, _query: &UrlQuery) -> Result<CategoryFilter, CatalogError> {
        CategoryFilter::from_params(segments.get("id"))
    }

    fn heading(filter: &CategoryFilter, messages: &Messages) -> String {
        fill(&messages.category_heading, &[("id", &filter.category_id)])
    }

    fn fetch<'a>(
        api: &'a dyn SearchApi,
        query: &'a SearchQuery<CategoryFilter>,
    ) -> LocalBoxFuture<'a, Result<SearchOutcome, ApiError>> {
        Box::pin(async move { api.search_by_category(&query.filter, query.page).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rarebooks_catalog::CategoryId;

    fn segments(pairs: &[(&str, &str)]) -> UrlQuery {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_title_location_round_trip() {
        let query = TitleSearch::query_from(
            &segments(&[("title", "Пушкин")]),
            &UrlQuery::parse("page=3&exactPhrase=true"),
        )
        .unwrap();
        assert_eq!(query.page, 3);
        assert!(query.filter.exact_phrase);

        let location = TitleSearch::location(&query);
        assert_eq!(
            location.href(),
            "/search/title/%D0%9F%D1%83%D1%88%D0%BA%D0%B8%D0%BD?page=3&exactPhrase=true"
        );
    }

    #[test]
    fn test_price_location() {
        let query = SearchQuery::new(PriceRangeFilter::new(100, 500)).with_page(2);
        assert_eq!(
            PriceRangeSearch::location(&query).href(),
            "/search/price/100/500?page=2"
        );
    }

    #[test]
    fn test_missing_page_defaults_to_first() {
        let query =
            SellerSearch::query_from(&segments(&[("seller", "Букинист")]), &UrlQuery::new())
                .unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.filter.seller_name, "Букинист");
    }

    #[test]
    fn test_category_from_segments() {
        let query =
            CategorySearch::query_from(&segments(&[("id", "7")]), &UrlQuery::parse("page=2"))
                .unwrap();
        assert_eq!(query.filter.category_id, CategoryId::new(7));
        assert_eq!(CategorySearch::location(&query).href(), "/category/7?page=2");
    }

    #[test]
    fn test_invalid_segments() {
        assert!(PriceRangeSearch::query_from(&segments(&[("min", "1")]), &UrlQuery::new()).is_err());
        assert!(CategorySearch::query_from(&segments(&[("id", "x")]), &UrlQuery::new()).is_err());
    }

    #[test]
    fn test_headings() {
        let messages = Messages::default();
        assert_eq!(
            PriceRangeSearch::heading(&PriceRangeFilter::new(100, 500), &messages),
            "Книги от 100 до 500 ₽"
        );
        assert_eq!(
            TitleSearch::heading(&TitleFilter::new("Пушкин"), &messages),
            "Поиск по названию: «Пушкин»"
        );
    }
}
