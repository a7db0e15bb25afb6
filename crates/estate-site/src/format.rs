//! Display formatting for prices, areas, dates and text.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use estate_api::{Numeric, Property};
use regex::Regex;

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static SPACE_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Maximum length of a derived page description.
pub const DESCRIPTION_CHARS: usize = 160;

/// Format an amount as US dollars with thousands separators.
///
/// At most two decimals are shown and trailing zeros are dropped:
/// `1250000.0` is `$1,250,000` and `950.5` is `$950.5`.
#[must_use]
pub fn format_usd(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((&fixed, ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if fraction.is_empty() {
        format!("{sign}${grouped}")
    } else {
        format!("{sign}${grouped}.{fraction}")
    }
}

/// Display price of a property.
///
/// Uses the API's `price_formatted` when present, otherwise formats the
/// numeric price. `None` when neither is usable.
#[must_use]
pub fn format_price(property: &Property) -> Option<String> {
    if let Some(formatted) = property.price_formatted.as_deref()
        && !formatted.trim().is_empty()
    {
        return Some(formatted.to_owned());
    }
    property
        .price
        .as_ref()
        .and_then(Numeric::as_f64)
        .map(format_usd)
}

/// Living area in square meters, preferring `area` over `square_meters`.
#[must_use]
pub fn area(property: &Property) -> Option<f64> {
    property
        .area
        .or_else(|| property.square_meters.as_ref().and_then(Numeric::as_f64))
        .filter(|a| *a > 0.0)
}

/// Format an area as `120 m²` (one decimal at most).
#[must_use]
pub fn format_area(area: f64) -> String {
    let rounded = format!("{area:.1}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} m²")
}

/// Format an API timestamp as `January 5, 2025`.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` and `YYYY-MM-DD`. Returns `None`
/// for anything else.
#[must_use]
pub fn format_date(value: &str) -> Option<String> {
    let value = value.trim();
    let date = DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
        .ok()?;
    Some(date.format("%B %-d, %Y").to_string())
}

/// Remove HTML tags and collapse whitespace.
#[must_use]
pub fn strip_tags(html: &str) -> String {
    let text = TAG_PATTERN.replace_all(html, " ");
    SPACE_PATTERN.replace_all(&text, " ").trim().to_owned()
}

/// First `max_chars` characters of the text content of `html`.
#[must_use]
pub fn summary(html: &str, max_chars: usize) -> String {
    strip_tags(html).chars().take(max_chars).collect()
}

/// Capitalize a slug-like word: `full-width` becomes `Full width`.
#[must_use]
pub fn humanize(value: &str) -> String {
    let spaced = value.replace(['-', '_'], " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(1_250_000.0), "$1,250,000");
        assert_eq!(format_usd(950.5), "$950.5");
        assert_eq!(format_usd(999.999), "$1,000");
        assert_eq!(format_usd(100.0), "$100");
        assert_eq!(format_usd(0.0), "$0");
        assert_eq!(format_usd(1234.56), "$1,234.56");
        assert_eq!(format_usd(-5.0), "-$5");
    }

    #[test]
    fn test_format_price_prefers_formatted() {
        let mut property = Property::new(1, "Loft");
        property.price = Some(Numeric::Number(1000.0));
        assert_eq!(format_price(&property).as_deref(), Some("$1,000"));

        property.price_formatted = Some("€1.000".to_owned());
        assert_eq!(format_price(&property).as_deref(), Some("€1.000"));
    }

    #[test]
    fn test_format_price_from_text() {
        let mut property = Property::new(1, "Loft");
        property.price = Some(Numeric::Text("250000.00".to_owned()));
        assert_eq!(format_price(&property).as_deref(), Some("$250,000"));

        property.price = Some(Numeric::Text("on request".to_owned()));
        assert_eq!(format_price(&property), None);
    }

    #[test]
    fn test_area_preference() {
        let mut property = Property::new(1, "Loft");
        assert_eq!(area(&property), None);
        property.square_meters = Some(Numeric::Text("84.5".to_owned()));
        assert_eq!(area(&property), Some(84.5));
        property.area = Some(90.0);
        assert_eq!(area(&property), Some(90.0));
    }

    #[test]
    fn test_format_area() {
        assert_eq!(format_area(120.0), "120 m²");
        assert_eq!(format_area(84.55), "84.5 m²");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2025-01-05T10:00:00Z").as_deref(), Some("January 5, 2025"));
        assert_eq!(format_date("2025-01-05T10:00:00.000000Z").as_deref(), Some("January 5, 2025"));
        assert_eq!(format_date("2024-12-31 23:59:59").as_deref(), Some("December 31, 2024"));
        assert_eq!(format_date("2024-02-29").as_deref(), Some("February 29, 2024"));
        assert_eq!(format_date("yesterday"), None);
    }

    #[test]
    fn test_summary_strips_tags() {
        let html = "<h2>Welcome</h2>\n<p>Find   your <b>home</b>.</p>";
        assert_eq!(summary(html, 160), "Welcome Find your home .");
        assert_eq!(summary(html, 7), "Welcome");
    }

    #[test]
    fn test_summary_counts_characters() {
        assert_eq!(summary("<p>ééé</p>", 2), "éé");
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("full-width"), "Full width");
        assert_eq!(humanize("apartment"), "Apartment");
        assert_eq!(humanize(""), "");
    }
}
