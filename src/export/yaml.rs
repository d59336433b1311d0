//! YAML export of grocery lists

use std::io::Write;

use super::json::ListingExport;
use crate::error::{GroceryError, GroceryResult};
use crate::models::FolderListing;

/// Export a listing to YAML with a short comment header
pub fn export_listing_yaml<W: Write>(listing: &FolderListing, writer: &mut W) -> GroceryResult<()> {
    let export = ListingExport::from_listing(listing);

    writeln!(writer, "# Grocery lists export")
        .and_then(|_| writeln!(writer, "# Generated: {}", export.exported_at))
        .and_then(|_| writeln!(writer, "# App Version: {}", export.app_version))
        .and_then(|_| writeln!(writer))
        .map_err(|e| GroceryError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| GroceryError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_yaml_round_trips_through_the_export_type() {
        let listing = FolderListing::from_store_value(json!({
            "home": {
                "-Nk1": {
                    "description": "milk",
                    "price_crc": 1000.0,
                    "price_usd": 1.94,
                    "marca": "Dos Pinos"
                }
            }
        }));

        let mut buffer = Vec::new();
        export_listing_yaml(&listing, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.starts_with("# Grocery lists export\n"));
        let parsed: ListingExport = serde_yaml::from_str(&text).unwrap();
        assert_eq!(parsed.folders[0].items[0].description, "milk");
        assert_eq!(parsed.grand_total, listing.grand_total());
    }
}
