//! Book types.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::ids::BookId;

/// A book as it appears in a result list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSummary {
    pub id: BookId,
    pub title: String,
    pub price: f64,
    /// Publication or listing date as sent by the API.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub seller_name: String,
    /// Free-form kind ("book", "manuscript", "map", ...).
    #[serde(rename = "type", default)]
    pub book_type: String,
    /// Name of the first uploaded image, used for the list thumbnail.
    #[serde(default)]
    pub first_image_name: Option<String>,
}

impl BookSummary {
    /// Format the price for display.
    pub fn price_display(&self) -> String {
        format_price(self.price)
    }

    /// Format the date as `dd.mm.yyyy` when it parses, verbatim otherwise.
    pub fn date_display(&self) -> String {
        format_date(&self.date)
    }

    /// Whether a preview image can be requested for this book.
    pub fn has_preview(&self) -> bool {
        self.first_image_name
            .as_deref()
            .is_some_and(|name| !name.trim().is_empty())
    }
}

/// Full book record for the detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDetails {
    pub id: BookId,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub seller_name: String,
    #[serde(rename = "type", default)]
    pub book_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_names: Vec<String>,
}

impl BookDetails {
    pub fn price_display(&self) -> String {
        format_price(self.price)
    }

    pub fn date_display(&self) -> String {
        format_date(&self.date)
    }

    /// Description with surrounding whitespace removed; `None` when blank.
    pub fn description_text(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

impl From<&BookDetails> for BookSummary {
    fn from(details: &BookDetails) -> Self {
        Self {
            id: details.id,
            title: details.title.clone(),
            price: details.price,
            date: details.date.clone(),
            seller_name: details.seller_name.clone(),
            book_type: details.book_type.clone(),
            first_image_name: details.image_names.first().cloned(),
        }
    }
}

/// `1250.0` -> `1 250 ₽`, `99.5` -> `99.50 ₽`.
fn format_price(price: f64) -> String {
    let whole = price.trunc() as i64;
    let cents = ((price - price.trunc()) * 100.0).round() as i64;

    let digits = whole.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    if whole < 0 {
        grouped.insert(0, '-');
    }

    if cents == 0 {
        format!("{grouped} ₽")
    } else {
        format!("{grouped}.{:02} ₽", cents.abs())
    }
}

fn format_date(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%d.%m.%Y").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%d.%m.%Y").to_string();
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary_json() -> &'static str {
        r#"{
            "id": 11,
            "title": "Евгений Онегин",
            "price": 125000,
            "date": "1833-03-23",
            "sellerName": "Букинист",
            "type": "book",
            "firstImageName": "cover.jpg"
        }"#
    }

    #[test]
    fn test_summary_deserializes_camel_case() {
        let book: BookSummary = serde_json::from_str(summary_json()).unwrap();
        assert_eq!(book.id, BookId::new(11));
        assert_eq!(book.seller_name, "Букинист");
        assert_eq!(book.book_type, "book");
        assert!(book.has_preview());
    }

    #[test]
    fn test_summary_without_image() {
        let book: BookSummary =
            serde_json::from_str(r#"{"id": 1, "title": "Без обложки", "price": 10}"#).unwrap();
        assert_eq!(book.first_image_name, None);
        assert!(!book.has_preview());
    }

    #[test]
    fn test_blank_image_name_is_not_a_preview() {
        let mut book: BookSummary = serde_json::from_str(summary_json()).unwrap();
        book.first_image_name = Some("  ".to_string());
        assert!(!book.has_preview());
    }

    #[test]
    fn test_price_display() {
        assert_eq!(format_price(125000.0), "125 000 ₽");
        assert_eq!(format_price(999.0), "999 ₽");
        assert_eq!(format_price(1234567.5), "1 234 567.50 ₽");
    }

    #[test]
    fn test_date_display() {
        assert_eq!(format_date("1833-03-23"), "23.03.1833");
        assert_eq!(format_date("2024-05-01T10:00:00Z"), "01.05.2024");
        assert_eq!(format_date("XIX век"), "XIX век");
    }

    #[test]
    fn test_details_defaults() {
        let details: BookDetails =
            serde_json::from_str(r#"{"id": 2, "title": "Карта", "price": 5000, "type": "map"}"#)
                .unwrap();
        assert!(details.image_names.is_empty());
        assert_eq!(details.description, None);
        assert_eq!(details.price_display(), "5 000 ₽");
    }

    #[test]
    fn test_summary_from_details_uses_first_image() {
        let details: BookDetails = serde_json::from_str(
            r#"{"id": 3, "title": "Атлас", "price": 1, "description": "  ", "imageNames": ["a.jpg", "b.jpg"]}"#,
        )
        .unwrap();
        let summary = BookSummary::from(&details);
        assert_eq!(summary.first_image_name.as_deref(), Some("a.jpg"));
        assert_eq!(details.description_text(), None);
    }
}
