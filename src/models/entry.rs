//! List entries
//!
//! A `ListEntry` is one product saved to a folder. It is immutable once
//! created: the normalized price is derived from the source price exactly
//! once, at creation.
//!
//! The serialized field names (`price_crc`, `price_usd`, `marca`) are the
//! ones already present in the shared store and must not change.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::product::NOT_AVAILABLE;
use super::{CurrencyConverter, Money, ProductHit};

/// One persisted grocery list item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListEntry {
    /// Translated description
    #[serde(default = "not_available", deserialize_with = "lenient_text")]
    description: String,

    #[serde(rename = "price_crc", default, deserialize_with = "lenient_money")]
    price_source: Money,

    #[serde(rename = "price_usd", default, deserialize_with = "lenient_money")]
    price_normalized: Money,

    #[serde(
        default,
        deserialize_with = "lenient_image",
        skip_serializing_if = "Option::is_none"
    )]
    image_url: Option<String>,

    #[serde(
        rename = "marca",
        default = "not_available",
        deserialize_with = "lenient_text"
    )]
    brand: String,
}

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

// Other clients write to the same store, so stored fields are read
// leniently: any JSON value is accepted and coerced.

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => not_available(),
        Value::String(text) => text,
        other => other.to_string(),
    })
}

fn lenient_money<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(Money::deserialize(value).unwrap_or_default())
}

fn lenient_image<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(url) if !url.trim().is_empty() => Some(url),
        _ => None,
    })
}

impl ListEntry {
    /// Create an entry, deriving the normalized price from the source price
    pub fn new(
        description: impl Into<String>,
        price_source: Money,
        image_url: Option<String>,
        brand: impl Into<String>,
        converter: &CurrencyConverter,
    ) -> Self {
        let price_source = price_source.non_negative();
        Self {
            description: description.into(),
            price_source,
            price_normalized: converter.to_normalized(price_source),
            image_url,
            brand: brand.into(),
        }
    }

    /// Create an entry from a catalogue hit and an already translated description
    pub fn from_hit(
        hit: &ProductHit,
        translated_description: impl Into<String>,
        converter: &CurrencyConverter,
    ) -> Self {
        Self::new(
            translated_description,
            hit.price_source(),
            hit.image(),
            hit.brand_or_default(),
            converter,
        )
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price_source(&self) -> Money {
        self.price_source
    }

    pub fn price_normalized(&self) -> Money {
        self.price_normalized
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }
}
