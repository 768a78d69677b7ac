//! Domain types for the rare-books marketplace client.
//!
//! - **Books**: summaries shown in result lists, details for the book page
//! - **Categories**: the browsable category tree (flat)
//! - **Results**: full pages, partial (teaser) results, quota, pagination
//! - **Queries**: per-mode filters and the URL query they round-trip through

pub mod book;
pub mod category;
pub mod error;
pub mod filter;
pub mod ids;
pub mod page;
pub mod url;

pub use book::{BookDetails, BookSummary};
pub use category::{sort_by_name, Category};
pub use error::CatalogError;
pub use filter::{CategoryFilter, PriceRangeFilter, SearchQuery, SellerFilter, TitleFilter};
pub use ids::{BookId, CategoryId, UserId};
pub use page::{Pagination, PartialResult, Quota, ResultPage, SearchOutcome};
pub use url::UrlQuery;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::book::{BookDetails, BookSummary};
    pub use crate::category::Category;
    pub use crate::error::CatalogError;
    pub use crate::filter::{
        CategoryFilter, PriceRangeFilter, SearchQuery, SellerFilter, TitleFilter,
    };
    pub use crate::ids::*;
    pub use crate::page::{Pagination, PartialResult, Quota, ResultPage, SearchOutcome};
    pub use crate::url::UrlQuery;
}
