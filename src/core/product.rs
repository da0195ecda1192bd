//! # Product Cards
//!
//! Product records come straight from the recommendation service and are not
//! trusted: any field may be missing, empty, the wrong JSON type, or the
//! whole record may not be an object at all. [`render`] turns one record into
//! a [`CardView`] and never fails. Every field has a deterministic fallback.
//!
//! | field              | rule                                             |
//! |--------------------|--------------------------------------------------|
//! | `image_url`        | value, else placeholder; broken → second placeholder |
//! | `name`             | value, else "Unnamed Product"                    |
//! | `category`         | value, else "Uncategorized"                      |
//! | `description`      | value, else "No description available"           |
//! | `price`            | numeric prefix, else 0 → "$0.00"                 |
//! | `similarity_score` | truthy number → "Match: N%", else no line        |

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/200";
pub const BROKEN_IMAGE_URL: &str = "https://via.placeholder.com/200/cccccc/666666?text=No+Image";

const FALLBACK_NAME: &str = "Unnamed Product";
const FALLBACK_ALT: &str = "Product";
const FALLBACK_CATEGORY: &str = "Uncategorized";
const FALLBACK_DESCRIPTION: &str = "No description available";

/// Leading decimal number, the way a lenient float parser reads "19.9 USD".
static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("valid float regex")
});

/// One recommendation as sent by the service. Every field is kept as raw
/// JSON so that coercion happens in one place, at render time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductRecord {
    pub name: Option<Value>,
    pub category: Option<Value>,
    pub description: Option<Value>,
    pub price: Option<Value>,
    pub image_url: Option<Value>,
    pub similarity_score: Option<Value>,
}

impl ProductRecord {
    /// Pick known fields out of an arbitrary JSON value. Non-objects yield a
    /// record with every field absent.
    pub fn from_value(value: &Value) -> Self {
        let Some(fields) = value.as_object() else {
            return Self::default();
        };
        let field = |key: &str| fields.get(key).filter(|v| !v.is_null()).cloned();
        Self {
            name: field("name"),
            category: field("category"),
            description: field("description"),
            price: field("price"),
            image_url: field("image_url"),
            similarity_score: field("similarity_score"),
        }
    }
}

impl<'de> Deserialize<'de> for ProductRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// Image reference for a card, with its runtime fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSource {
    pub url: String,
    pub alt: String,
    /// True when `url` is already the default placeholder (nothing to probe).
    pub is_placeholder: bool,
    /// Set once the image failed to load; `current()` then returns the
    /// broken-image placeholder.
    pub failed: bool,
}

impl ImageSource {
    pub fn current(&self) -> &str {
        if self.failed { BROKEN_IMAGE_URL } else { &self.url }
    }

    pub fn mark_failed(&mut self) {
        self.failed = true;
    }

    pub fn needs_probe(&self) -> bool {
        !self.is_placeholder && !self.failed
    }
}

/// Fully-resolved, display-ready card. Contains no optional text except the
/// match line, which is genuinely absent when there is no score.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub image: ImageSource,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: String,
    pub match_line: Option<String>,
}

/// Render one product record. Pure and total.
pub fn render(product: &ProductRecord) -> CardView {
    let name = display_text(product.name.as_ref());
    let image_url = display_text(product.image_url.as_ref());

    CardView {
        image: ImageSource {
            is_placeholder: image_url.is_none(),
            url: image_url.unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string()),
            alt: name.clone().unwrap_or_else(|| FALLBACK_ALT.to_string()),
            failed: false,
        },
        name: name.unwrap_or_else(|| FALLBACK_NAME.to_string()),
        category: display_text(product.category.as_ref())
            .unwrap_or_else(|| FALLBACK_CATEGORY.to_string()),
        description: display_text(product.description.as_ref())
            .unwrap_or_else(|| FALLBACK_DESCRIPTION.to_string()),
        price: format_price(coerce_price(product.price.as_ref())),
        match_line: match_percent(product.similarity_score.as_ref())
            .map(|pct| format!("Match: {pct}%")),
    }
}

/// Text for a field if it is "truthy": a non-empty string, a non-zero
/// number, or `true`. Arrays, objects, null, zero, false and "" fall back.
fn display_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|v| v != 0.0) => Some(number_text(n)),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// Integral floats print without a fraction: `1.0` shows as "1".
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(v) if n.is_f64() => v.to_string(),
        _ => n.to_string(),
    }
}

/// Numeric price, defaulting to 0 for anything missing or unparseable.
pub fn coerce_price(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_float_prefix(s),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Parse the longest leading decimal number in `text`, ignoring leading
/// whitespace and any trailing garbage.
fn parse_float_prefix(text: &str) -> Option<f64> {
    FLOAT_PREFIX
        .find(text.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// `$` plus exactly two decimals. Negative zero prints as "$0.00".
pub fn format_price(price: f64) -> String {
    let price = if price == 0.0 { 0.0 } else { price };
    format!("${:.2}", round_half_cent_ties(price))
}

/// `{:.2}` rounds exact half-cent ties to even; ties go away from zero
/// instead, so 0.125 prints as 0.13. A double sits exactly on a half cent
/// only when it is an odd number of eighths (x.125, x.375, ...), and
/// scaling by 8 is exact.
fn round_half_cent_ties(price: f64) -> f64 {
    let eighths = price * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        (price * 100.0).round() / 100.0
    } else {
        price
    }
}

/// Whole-percent match score, or `None` when the score is absent or falsy.
///
/// A number must be non-zero. Any non-empty string counts, so `"0"` and
/// `" "` give "Match: 0%"; a string that is not a number gives no line. Halves
/// round up, so -0.125 becomes -12.
fn match_percent(value: Option<&Value>) -> Option<i64> {
    let score = match value? {
        Value::Number(n) => n.as_f64().filter(|v| *v != 0.0)?,
        Value::String(s) if s.trim().is_empty() && !s.is_empty() => 0.0,
        Value::String(s) if !s.is_empty() => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !score.is_finite() {
        return None;
    }
    Some((score * 100.0 + 0.5).floor() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn card(value: Value) -> CardView {
        render(&ProductRecord::from_value(&value))
    }

    #[test]
    fn empty_record_uses_every_fallback() {
        let view = card(json!({}));
        assert_eq!(view.name, "Unnamed Product");
        assert_eq!(view.category, "Uncategorized");
        assert_eq!(view.description, "No description available");
        assert_eq!(view.price, "$0.00");
        assert_eq!(view.match_line, None);
        assert_eq!(view.image.current(), PLACEHOLDER_IMAGE_URL);
        assert_eq!(view.image.alt, "Product");
        assert!(!view.image.needs_probe());
    }

    #[test]
    fn non_object_record_is_treated_as_empty() {
        for value in [json!(null), json!(42), json!("shoes"), json!([1, 2])] {
            let view = card(value);
            assert_eq!(view.name, "Unnamed Product");
            assert_eq!(view.price, "$0.00");
        }
    }

    #[test]
    fn string_price_is_padded_to_two_decimals() {
        assert_eq!(card(json!({"price": "19.9"})).price, "$19.90");
    }

    #[test]
    fn numeric_price_is_rounded_to_cents() {
        assert_eq!(card(json!({"price": 5})).price, "$5.00");
        assert_eq!(card(json!({"price": 12.999})).price, "$13.00");
    }

    #[test]
    fn half_cent_ties_round_up() {
        assert_eq!(card(json!({"price": "0.125"})).price, "$0.13");
        assert_eq!(card(json!({"price": 0.875})).price, "$0.88");
        assert_eq!(card(json!({"price": 2.5})).price, "$2.50");
        assert_eq!(card(json!({"price": -0.125})).price, "$-0.13");
        // 1.005 is stored just below the tie
        assert_eq!(card(json!({"price": 1.005})).price, "$1.00");
    }

    #[test]
    fn price_takes_numeric_prefix_of_strings() {
        assert_eq!(card(json!({"price": "  12abc"})).price, "$12.00");
        assert_eq!(card(json!({"price": ".5"})).price, "$0.50");
        assert_eq!(card(json!({"price": "1e2 dollars"})).price, "$100.00");
    }

    #[test]
    fn unparseable_price_falls_back_to_zero() {
        assert_eq!(card(json!({"price": "free"})).price, "$0.00");
        assert_eq!(card(json!({"price": true})).price, "$0.00");
        assert_eq!(card(json!({"price": {"amount": 3}})).price, "$0.00");
        assert_eq!(card(json!({"price": "-0"})).price, "$0.00");
    }

    #[test]
    fn similarity_score_rounds_to_whole_percent() {
        assert_eq!(
            card(json!({"similarity_score": 0.873})).match_line.as_deref(),
            Some("Match: 87%")
        );
        assert_eq!(
            card(json!({"similarity_score": 0.875})).match_line.as_deref(),
            Some("Match: 88%")
        );
    }

    #[test]
    fn falsy_similarity_score_renders_nothing() {
        assert_eq!(card(json!({"similarity_score": 0})).match_line, None);
        assert_eq!(card(json!({"similarity_score": ""})).match_line, None);
        assert_eq!(card(json!({"similarity_score": "n/a"})).match_line, None);
        assert_eq!(card(json!({"similarity_score": null})).match_line, None);
        assert_eq!(card(json!({"similarity_score": false})).match_line, None);
    }

    #[test]
    fn zero_string_similarity_score_is_shown() {
        assert_eq!(
            card(json!({"similarity_score": "0"})).match_line.as_deref(),
            Some("Match: 0%")
        );
    }

    #[test]
    fn numeric_string_similarity_score_is_coerced() {
        assert_eq!(
            card(json!({"similarity_score": "0.5"})).match_line.as_deref(),
            Some("Match: 50%")
        );
    }

    #[test]
    fn empty_strings_fall_back() {
        let view = card(json!({"name": "", "category": "", "description": "", "image_url": ""}));
        assert_eq!(view.name, "Unnamed Product");
        assert_eq!(view.category, "Uncategorized");
        assert_eq!(view.description, "No description available");
        assert_eq!(view.image.current(), PLACEHOLDER_IMAGE_URL);
    }

    #[test]
    fn present_fields_are_used_verbatim() {
        let view = card(json!({
            "name": "Trail Runner <X>",
            "category": "Shoes",
            "description": "Light and grippy",
            "price": 89.5,
            "image_url": "https://img.example/shoe.png",
            "similarity_score": 0.91,
        }));
        assert_eq!(view.name, "Trail Runner <X>");
        assert_eq!(view.category, "Shoes");
        assert_eq!(view.description, "Light and grippy");
        assert_eq!(view.price, "$89.50");
        assert_eq!(view.match_line.as_deref(), Some("Match: 91%"));
        assert_eq!(view.image.current(), "https://img.example/shoe.png");
        assert_eq!(view.image.alt, "Trail Runner <X>");
        assert!(view.image.needs_probe());
    }

    #[test]
    fn numeric_name_is_displayed() {
        assert_eq!(card(json!({"name": 1984})).name, "1984");
        assert_eq!(card(json!({"name": 1.0})).name, "1");
        assert_eq!(card(json!({"category": 2.5})).category, "2.5");
        assert_eq!(card(json!({"name": 0})).name, "Unnamed Product");
    }

    #[test]
    fn failed_image_switches_to_broken_placeholder() {
        let mut view = card(json!({"image_url": "https://img.example/missing.png"}));
        view.image.mark_failed();
        assert_eq!(view.image.current(), BROKEN_IMAGE_URL);
        assert!(!view.image.needs_probe());
    }

    #[test]
    fn deserialize_is_lenient() {
        let records: Vec<ProductRecord> =
            serde_json::from_str(r#"[{"name": "A", "price": null}, 7, "x"]"#).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].name, Some(json!("A")));
        assert_eq!(records[0].price, None);
        assert_eq!(records[1], ProductRecord::default());
    }
}
