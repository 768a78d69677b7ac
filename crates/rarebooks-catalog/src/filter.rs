//! Per-mode search filters and the paged query built from them.

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::ids::CategoryId;
use crate::url::UrlQuery;

/// Query parameter carrying the exact-phrase switch of title search.
pub const EXACT_PHRASE_PARAM: &str = "exactPhrase";

/// Search by title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TitleFilter {
    pub title: String,
    /// Match the whole phrase rather than any word.
    pub exact_phrase: bool,
}

impl TitleFilter {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            exact_phrase: false,
        }
    }

    pub fn exact(mut self, exact_phrase: bool) -> Self {
        self.exact_phrase = exact_phrase;
        self
    }

    /// Build from the `:title` route segment and the `exactPhrase` query flag.
    pub fn from_params(title: Option<&str>, query: &UrlQuery) -> Result<Self, CatalogError> {
        let title = required("title", title)?;
        Ok(Self::new(title).exact(query.flag(EXACT_PHRASE_PARAM)))
    }
}

/// Search by price range, in whole currency units, both bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceRangeFilter {
    pub min: u64,
    pub max: u64,
}

impl PriceRangeFilter {
    pub fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    /// Build from the `:min` and `:max` route segments.
    pub fn from_params(min: Option<&str>, max: Option<&str>) -> Result<Self, CatalogError> {
        let min = parse_number("min", required("min", min)?)?;
        let max = parse_number("max", required("max", max)?)?;
        Ok(Self::new(min, max))
    }
}

/// Search by seller name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SellerFilter {
    pub seller_name: String,
}

impl SellerFilter {
    pub fn new(seller_name: impl Into<String>) -> Self {
        Self {
            seller_name: seller_name.into(),
        }
    }

    pub fn from_params(seller: Option<&str>) -> Result<Self, CatalogError> {
        required("seller", seller).map(Self::new)
    }
}

/// Browse one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryFilter {
    pub category_id: CategoryId,
}

impl CategoryFilter {
    pub fn new(category_id: impl Into<CategoryId>) -> Self {
        Self {
            category_id: category_id.into(),
        }
    }

    pub fn from_params(id: Option<&str>) -> Result<Self, CatalogError> {
        let raw = required("id", id)?;
        raw.parse::<CategoryId>()
            .map(Self::new)
            .map_err(|_| CatalogError::InvalidParam {
                field: "id",
                value: raw.to_string(),
            })
    }
}

/// A filter plus the requested page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchQuery<F> {
    pub filter: F,
    /// Current page (1-indexed).
    pub page: u32,
}

impl<F> SearchQuery<F> {
    /// Query for the first page.
    pub fn new(filter: F) -> Self {
        Self { filter, page: 1 }
    }

    /// Set the page; 0 is treated as 1.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Same filter, different page.
    pub fn at_page(&self, page: u32) -> Self
    where
        F: Clone,
    {
        Self {
            filter: self.filter.clone(),
            page: page.max(1),
        }
    }
}

fn required<'a>(field: &'static str, value: Option<&'a str>) -> Result<&'a str, CatalogError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(CatalogError::MissingParam(field)),
    }
}

fn parse_number(field: &'static str, raw: &str) -> Result<u64, CatalogError> {
    raw.parse().map_err(|_| CatalogError::InvalidParam {
        field,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_filter_from_params() {
        let query = UrlQuery::parse("exactPhrase=true&page=2");
        let filter = TitleFilter::from_params(Some("Пушкин"), &query).unwrap();
        assert_eq!(filter.title, "Пушкин");
        assert!(filter.exact_phrase);
    }

    #[test]
    fn test_title_filter_requires_title() {
        let query = UrlQuery::new();
        assert_eq!(
            TitleFilter::from_params(Some("   "), &query),
            Err(CatalogError::MissingParam("title"))
        );
        assert!(TitleFilter::from_params(None, &query).is_err());
    }

    #[test]
    fn test_price_range_from_params() {
        let filter = PriceRangeFilter::from_params(Some("100"), Some("500")).unwrap();
        assert_eq!(filter, PriceRangeFilter::new(100, 500));

        let err = PriceRangeFilter::from_params(Some("100"), Some("lots")).unwrap_err();
        assert_eq!(
            err,
            CatalogError::InvalidParam {
                field: "max",
                value: "lots".to_string()
            }
        );
    }

    #[test]
    fn test_category_filter_from_params() {
        assert_eq!(
            CategoryFilter::from_params(Some("12")).unwrap().category_id,
            CategoryId::new(12)
        );
        assert!(CategoryFilter::from_params(Some("twelve")).is_err());
    }

    #[test]
    fn test_search_query_pages() {
        let query = SearchQuery::new(SellerFilter::new("Букинист")).with_page(0);
        assert_eq!(query.page, 1);

        let third = query.at_page(3);
        assert_eq!(third.page, 3);
        assert_eq!(third.filter, query.filter);
    }
}
