//! Category types.

use serde::{Deserialize, Serialize};

use crate::ids::CategoryId;

/// A browsable book category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Number of listed books, when the API reports it.
    #[serde(default)]
    pub book_count: Option<u64>,
}

impl Category {
    /// Description with surrounding whitespace removed; `None` when blank.
    pub fn description_text(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

/// Sort categories by name for the listing page.
pub fn sort_by_name(categories: &mut [Category]) {
    categories.sort_by_cached_key(|c| c.name.to_lowercase());
}
