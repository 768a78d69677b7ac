//! URL query strings for search pages.
//!
//! Search pages keep their position in the query string (`page`, plus
//! mode-specific keys such as `exactPhrase`) so reload and back/forward land
//! on the same page.

use std::fmt;

/// Query parameter holding the 1-based page number.
pub const PAGE_PARAM: &str = "page";

/// Ordered query-string parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlQuery {
    pairs: Vec<(String, String)>,
}

impl UrlQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `a=1&b=two`, with or without a leading `?`. `+` decodes to a
    /// space; undecodable values are kept verbatim.
    pub fn parse(query_string: &str) -> Self {
        let pairs = query_string
            .trim_start_matches('?')
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let mut parts = pair.splitn(2, '=');
                let key = decode(parts.next().unwrap_or(""));
                let value = decode(parts.next().unwrap_or(""));
                (key, value)
            })
            .collect();
        Self { pairs }
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set `key`, replacing existing values in place or appending.
    pub fn set(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        match self.pairs.iter().position(|(k, _)| *k == key) {
            Some(idx) => {
                self.pairs[idx].1 = value;
                let mut seen = false;
                self.pairs.retain(|(k, _)| {
                    if *k != key {
                        return true;
                    }
                    let keep = !seen;
                    seen = true;
                    keep
                });
            }
            None => self.pairs.push((key, value)),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.set(key, value);
        self
    }

    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    /// The `page` parameter as a positive integer, 1 when absent or invalid.
    pub fn page(&self) -> u32 {
        self.get(PAGE_PARAM)
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1)
    }

    pub fn set_page(&mut self, page: u32) {
        self.set(PAGE_PARAM, page.max(1));
    }

    /// Boolean flag: `true`/`1` are set, anything else (or absent) is not.
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.get(key), Some(v) if v.eq_ignore_ascii_case("true") || v == "1")
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Encoded query string without the leading `?`.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl fmt::Display for UrlQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for UrlQuery {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = UrlQuery::new();
        for (k, v) in iter {
            query.set(k, v);
        }
        query
    }
}

/// Percent-encode one path segment.
pub fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}
