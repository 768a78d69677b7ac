//! Routed pages.

mod book;
mod categories;
mod home;
mod login;
mod misc;
mod search;

pub use book::BookPage;
pub use categories::CategoriesPage;
pub use home::HomePage;
pub use login::LoginPage;
pub use misc::{NotFound, SubscribePage};
pub use search::{
    CategorySearchPage, PriceSearchPage, SearchHandle, SellerSearchPage, TitleSearchPage,
};

/// One-shot load state of a page's data.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Loaded<T> {
    Pending,
    Ready(T),
    Failed,
}
