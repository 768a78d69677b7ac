//! Search for the rare-books marketplace client.
//!
//! - [`SearchApi`] / [`HttpSearchApi`]: the marketplace endpoints
//! - [`SearchMode`]: title, price range, seller and category search
//! - [`SearchController`]: paginated state machine with URL write-back
//! - [`gate`]: full list or teaser
//! - [`ThumbnailCache`]: cancellable per-list image loading
//!
//! # Example
//!
//! ```rust,ignore
//! use rarebooks_search::{controller, HttpSearchApi, SearchController, TitleSearch};
//!
//! let (mut search, ticket) = SearchController::<TitleSearch>::mount(query);
//! let result = controller::fetch::<TitleSearch>(&api, &ticket).await;
//! if let Some(location) = search.settle(ticket, result) {
//!     navigate(&location.href(), replace);
//! }
//! ```

pub mod api;
pub mod controller;
mod epoch;
mod error;
pub mod gate;
mod location;
pub mod messages;
pub mod mode;
pub mod thumbnails;
pub mod wire;

pub use api::{HttpSearchApi, ImageData, SearchApi};
pub use controller::{RequestTicket, SearchController, SearchStatus};
pub use epoch::Epoch;
pub use error::ApiError;
pub use gate::{gate, Gated, Teaser};
pub use location::Location;
pub use messages::Messages;
pub use mode::{CategorySearch, PriceRangeSearch, SearchMode, SellerSearch, TitleSearch};
pub use thumbnails::{
    load_thumbnails, ImageFactory, ThumbnailCache, ThumbnailRequest, ThumbnailUpdate,
};
