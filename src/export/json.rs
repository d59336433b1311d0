//! JSON export of grocery lists

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GroceryError, GroceryResult};
use crate::models::{Folder, FolderListing, ItemKey, Money};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Exported listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub folders: Vec<FolderExport>,

    /// Sum of all folder totals
    pub grand_total: Money,

    /// Items skipped because they were not valid list entries
    #[serde(default)]
    pub skipped_items: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderExport {
    pub name: String,
    pub total: Money,
    pub items: Vec<ItemExport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemExport {
    pub key: ItemKey,
    pub description: String,
    pub brand: String,
    pub price_crc: Money,
    pub price_usd: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl FolderExport {
    fn from_folder(folder: &Folder) -> Self {
        Self {
            name: folder.name.clone(),
            total: folder.total(),
            items: folder
                .entries()
                .map(|(key, entry)| ItemExport {
                    key: key.clone(),
                    description: entry.description().to_string(),
                    brand: entry.brand().to_string(),
                    price_crc: entry.price_source(),
                    price_usd: entry.price_normalized(),
                    image_url: entry.image_url().map(str::to_string),
                })
                .collect(),
        }
    }
}

impl ListingExport {
    pub fn from_listing(listing: &FolderListing) -> Self {
        let folders: Vec<FolderExport> = listing.folders().map(FolderExport::from_folder).collect();
        let skipped_items = listing
            .folders()
            .flat_map(|folder| folder.items.values())
            .filter(|item| item.is_malformed())
            .count();

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            folders,
            grand_total: listing.grand_total(),
            skipped_items,
        }
    }

    pub fn item_count(&self) -> usize {
        self.folders.iter().map(|folder| folder.items.len()).sum()
    }
}

/// Export a listing to pretty-printed JSON
pub fn export_listing_json<W: Write>(listing: &FolderListing, writer: &mut W) -> GroceryResult<()> {
    let export = ListingExport::from_listing(listing);
    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| GroceryError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| GroceryError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    pub(crate) fn sample_listing() -> FolderListing {
        FolderListing::from_store_value(json!({
            "home": {
                "-Nk1": {
                    "description": "milk",
                    "price_crc": 1000.0,
                    "price_usd": 1.94,
                    "image_url": "",
                    "marca": "Dos Pinos"
                },
                "-Nk2": 42
            },
            "office": {
                "-Nk3": {
                    "description": "coffee, ground",
                    "price_crc": 2580.0,
                    "price_usd": 5.0,
                    "image_url": "https://img/coffee.png",
                    "marca": "Britt"
                }
            }
        }))
    }

    #[test]
    fn test_export_structure() {
        let export = ListingExport::from_listing(&sample_listing());

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.folders.len(), 2);
        assert_eq!(export.item_count(), 2);
        assert_eq!(export.skipped_items, 1);
        assert_eq!(export.grand_total, Money::from_cents(694));
    }

    #[test]
    fn test_json_output() {
        let mut buffer = Vec::new();
        export_listing_json(&sample_listing(), &mut buffer).unwrap();

        let value: Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["folders"][0]["name"], "home");
        assert_eq!(value["folders"][0]["items"][0]["price_usd"], 1.94);
        assert_eq!(value["folders"][1]["total"], 5.0);
        assert!(value["exported_at"].is_string());
        assert!(value["app_version"].is_string());
    }
}
