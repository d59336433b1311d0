//! Catalogue product hits
//!
//! A `ProductHit` is a product record exactly as the catalogue returned it:
//! every field may be missing. Defaults are applied when a hit is turned
//! into something the application keeps (see `ListEntry`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Money;

/// Placeholder for missing text fields
pub const NOT_AVAILABLE: &str = "N/A";

/// One raw product record from the catalogue
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductHit {
    /// Description in the catalogue's language
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Price in the source currency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_price: Option<Money>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

impl ProductHit {
    /// Build a hit from an Algolia record
    ///
    /// Reads `ecomDescription`, `imageURL`, `marca` and
    /// `storeDetail.<store_id>.basePrice`. Prices that are neither a number
    /// nor a numeric string are treated as absent.
    pub fn from_catalogue(record: &Value, store_id: &str) -> Self {
        let text = |field: &str| {
            record
                .get(field)
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        let base_price = record
            .get("storeDetail")
            .and_then(|detail| detail.get(store_id))
            .and_then(|store| store.get("basePrice"))
            .and_then(|price| serde_json::from_value::<Money>(price.clone()).ok());

        Self {
            description: text("ecomDescription"),
            base_price,
            image_url: text("imageURL"),
            brand: text("marca"),
        }
    }

    /// Description, or "N/A" when missing or blank
    pub fn description_or_default(&self) -> String {
        non_blank(self.description.as_deref()).unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    /// Brand, or "N/A" when missing or blank
    pub fn brand_or_default(&self) -> String {
        non_blank(self.brand.as_deref()).unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    /// Source price coerced to a non-negative amount (missing → 0)
    pub fn price_source(&self) -> Money {
        self.base_price.unwrap_or_default().non_negative()
    }

    /// Image URL, treating an empty string as absent
    pub fn image(&self) -> Option<String> {
        non_blank(self.image_url.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_catalogue_full_record() {
        let record = json!({
            "ecomDescription": "Leche entera 1L",
            "imageURL": "https://img.example/leche.png",
            "marca": "Dos Pinos",
            "storeDetail": {"08": {"basePrice": "1000"}}
        });

        let hit = ProductHit::from_catalogue(&record, "08");
        assert_eq!(hit.description.as_deref(), Some("Leche entera 1L"));
        assert_eq!(hit.brand_or_default(), "Dos Pinos");
        assert_eq!(hit.price_source(), Money::from_cents(100_000));
        assert_eq!(hit.image().as_deref(), Some("https://img.example/leche.png"));
    }

    #[test]
    fn test_numeric_price_and_other_store() {
        let record = json!({
            "storeDetail": {"08": {"basePrice": 1250.5}, "10": {"basePrice": 999}}
        });

        assert_eq!(
            ProductHit::from_catalogue(&record, "08").price_source(),
            Money::from_cents(125_050)
        );
        assert_eq!(
            ProductHit::from_catalogue(&record, "10").price_source(),
            Money::from_cents(99_900)
        );
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let hit = ProductHit::from_catalogue(&json!({}), "08");

        assert_eq!(hit.description_or_default(), "N/A");
        assert_eq!(hit.brand_or_default(), "N/A");
        assert_eq!(hit.price_source(), Money::zero());
        assert_eq!(hit.image(), None);
    }

    #[test]
    fn test_invalid_and_negative_prices_become_zero() {
        let garbage = json!({"storeDetail": {"08": {"basePrice": "gratis"}}});
        assert_eq!(ProductHit::from_catalogue(&garbage, "08").price_source(), Money::zero());

        let negative = json!({"storeDetail": {"08": {"basePrice": -50}}});
        assert_eq!(ProductHit::from_catalogue(&negative, "08").price_source(), Money::zero());
    }

    #[test]
    fn test_blank_image_is_absent() {
        let hit = ProductHit {
            image_url: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(hit.image(), None);
    }
}
