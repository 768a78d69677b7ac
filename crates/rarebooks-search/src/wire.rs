//! Decoding of search response bodies.
//!
//! Search endpoints answer with one of two shapes:
//!
//! - a full page: `{ items, totalPages, totalItems?, remainingRequests? }`
//! - a teaser: `{ partialResults: true, totalFound, firstBookTitles, remainingRequests? }`
//!
//! The shape is detected from the fields present. Anything else is a
//! [`ApiError::Malformed`].

use rarebooks_catalog::{BookSummary, PartialResult, Quota, ResultPage, SearchOutcome};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSearchResponse {
    #[serde(default)]
    items: Option<Vec<BookSummary>>,
    #[serde(default)]
    total_pages: Option<u32>,
    #[serde(default)]
    total_items: Option<u64>,
    #[serde(default)]
    remaining_requests: Option<u32>,
    #[serde(default)]
    partial_results: bool,
    #[serde(default)]
    total_found: Option<u64>,
    #[serde(default)]
    first_book_titles: Option<Vec<String>>,
}

impl RawSearchResponse {
    fn into_outcome(self) -> Result<SearchOutcome, ApiError> {
        let remaining = Quota::from_remaining(self.remaining_requests);

        if self.partial_results {
            let total_found = self
                .total_found
                .ok_or_else(|| ApiError::Malformed("partial result without totalFound".into()))?;
            let titles = self.first_book_titles.unwrap_or_default();
            return Ok(SearchOutcome::Partial(
                PartialResult::new(total_found, titles).with_remaining(remaining),
            ));
        }

        let items = self
            .items
            .ok_or_else(|| ApiError::Malformed("missing items".into()))?;
        let total_pages = self
            .total_pages
            .ok_or_else(|| ApiError::Malformed("missing totalPages".into()))?;

        Ok(SearchOutcome::Page(
            ResultPage::new(items, total_pages)
                .with_total_items(self.total_items)
                .with_remaining(remaining),
        ))
    }
}

/// Decode a search response body.
pub fn decode_outcome(body: &[u8]) -> Result<SearchOutcome, ApiError> {
    decode::<RawSearchResponse>(body)?.into_outcome()
}

/// Decode any JSON body, reporting failures as malformed responses.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOOK: &str = r#"{"id":1,"title":"Евгений Онегин","price":1500,"date":"1833-01-01","sellerName":"Букинист","type":"book","firstImageName":"cover.jpg"}"#;

    #[test]
    fn test_full_page() {
        let body = format!(r#"{{"items":[{BOOK}],"totalPages":5,"remainingRequests":null}}"#);
        let SearchOutcome::Page(page) = decode_outcome(body.as_bytes()).unwrap() else {
            panic!("expected a page");
        };
        assert_eq!(page.len(), 1);
        assert_eq!(page.total_pages, 5);
        assert_eq!(page.remaining, Quota::Unlimited);
        assert_eq!(page.items[0].first_image_name.as_deref(), Some("cover.jpg"));
    }

    #[test]
    fn test_total_pages_zero_is_clamped() {
        let outcome = decode_outcome(br#"{"items":[],"totalPages":0}"#).unwrap();
        assert_eq!(outcome, SearchOutcome::Page(ResultPage::new(Vec::new(), 1)));
    }

    #[test]
    fn test_partial_result() {
        let body = br#"{"partialResults":true,"totalFound":42,"firstBookTitles":["A","B","C"],"remainingRequests":0}"#;
        let SearchOutcome::Partial(partial) = decode_outcome(body).unwrap() else {
            panic!("expected a partial result");
        };
        assert_eq!(partial.total_found, 42);
        assert_eq!(partial.sample_titles, vec!["A", "B"]);
        assert_eq!(partial.remaining, Quota::Remaining(0));
    }

    #[test]
    fn test_partial_flag_false_reads_page() {
        let outcome = decode_outcome(br#"{"partialResults":false,"items":[],"totalPages":1,"remainingRequests":3}"#)
            .unwrap();
        assert!(!outcome.is_partial());
        assert_eq!(outcome.remaining(), Quota::Remaining(3));
    }

    #[test]
    fn test_malformed_shapes() {
        for body in [
            &br#"{"totalPages":2}"#[..],
            br#"{"items":[]}"#,
            br#"{"partialResults":true,"firstBookTitles":[]}"#,
            br#"[]"#,
            b"<html>",
        ] {
            let err = decode_outcome(body).unwrap_err();
            assert!(err.is_malformed(), "{err}");
        }
    }
}
