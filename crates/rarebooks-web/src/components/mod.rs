//! Reusable view components.

mod book_list;
mod pagination;
mod quota;
mod skeleton;
mod teaser;

pub use book_list::BookList;
pub use pagination::PaginationControls;
pub use quota::QuotaBadge;
pub use skeleton::ListSkeleton;
pub use teaser::TeaserView;
