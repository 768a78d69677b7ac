//! Client-side locations written back to the address bar.

use rarebooks_catalog::UrlQuery;
use std::fmt;

/// Path plus query string of a client route.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    pub path: String,
    pub query: UrlQuery,
}

impl Location {
    pub fn new(path: impl Into<String>, query: UrlQuery) -> Self {
        Self {
            path: path.into(),
            query,
        }
    }

    /// Parse an href such as `/search/seller/x?page=2`.
    pub fn parse(href: &str) -> Self {
        match href.split_once('?') {
            Some((path, query)) => Self::new(path, UrlQuery::parse(query)),
            None => Self::new(href, UrlQuery::new()),
        }
    }

    pub fn href(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query)
        }
    }

    /// Page recorded in the query, 1 when absent.
    pub fn page(&self) -> u32 {
        self.query.page()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_href() {
        let location = Location::new("/category/3", UrlQuery::new().with("page", 2));
        assert_eq!(location.href(), "/category/3?page=2");
        assert_eq!(Location::new("/categories", UrlQuery::new()).href(), "/categories");
    }

    #[test]
    fn test_parse() {
        let location = Location::parse("/search/title/abc?page=4&exactPhrase=true");
        assert_eq!(location.path, "/search/title/abc");
        assert_eq!(location.page(), 4);
        assert_eq!(Location::parse("/").page(), 1);
    }
}
