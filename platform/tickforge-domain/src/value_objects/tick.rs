use crate::value_objects::symbol::Symbol;
use serde::{Deserialize, Serialize, Serializer};

/// Column names of a tick CSV, in row order.
pub const TICK_CSV_HEADER: [&str; 4] = ["symbol", "ts", "price", "volume"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub symbol: Symbol,
    /// Milliseconds since the Unix epoch (UTC).
    pub ts: i64,
    #[serde(serialize_with = "serialize_price")]
    pub price: f64,
    pub volume: u32,
}

/// Fixed-point decimal with at most 4 fraction digits and at least one
/// (`100.5`, `123.4568`, `10.0`). Never switches to exponent notation.
/// `None` for NaN and infinities.
pub fn format_price(price: f64) -> Option<String> {
    if !price.is_finite() {
        return None;
    }
    let fixed = format!("{price:.4}");
    let mut text = fixed.trim_end_matches('0').to_string();
    if text.ends_with('.') {
        text.push('0');
    }
    Some(text)
}

fn serialize_price<S: Serializer>(price: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    match format_price(*price) {
        Some(text) => serializer.serialize_str(&text),
        None => Err(serde::ser::Error::custom(format!(
            "price {price} is not a finite number"
        ))),
    }
}
