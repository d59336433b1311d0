//! CSV export of grocery lists

use std::io::Write;

use serde::Serialize;

use crate::error::{GroceryError, GroceryResult};
use crate::models::{FolderListing, Money};

#[derive(Serialize)]
struct CsvRow<'a> {
    folder: &'a str,
    key: &'a str,
    description: &'a str,
    brand: &'a str,
    price_crc: String,
    price_usd: String,
}

fn decimal(amount: Money) -> String {
    format!("{:.2}", amount.to_decimal())
}

/// Write one row per well-formed item; returns the number of rows
pub fn export_listing_csv<W: Write>(listing: &FolderListing, writer: W) -> GroceryResult<usize> {
    let mut csv_writer = ::csv::Writer::from_writer(writer);
    let mut rows = 0;

    for folder in listing.folders() {
        for (key, entry) in folder.entries() {
            csv_writer
                .serialize(CsvRow {
                    folder: &folder.name,
                    key: key.as_str(),
                    description: entry.description(),
                    brand: entry.brand(),
                    price_crc: decimal(entry.price_source()),
                    price_usd: decimal(entry.price_normalized()),
                })
                .map_err(|e| GroceryError::Export(e.to_string()))?;
            rows += 1;
        }
    }

    if rows == 0 {
        csv_writer
            .write_record(["folder", "key", "description", "brand", "price_crc", "price_usd"])
            .map_err(|e| GroceryError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| GroceryError::Export(e.to_string()))?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rows_and_quoting() {
        let listing = FolderListing::from_store_value(json!({
            "office": {
                "-Nk3": {
                    "description": "coffee, ground",
                    "price_crc": 2580.0,
                    "price_usd": 5.0,
                    "marca": "Britt"
                },
                "-Nk4": "garbage"
            }
        }));

        let mut buffer = Vec::new();
        let rows = export_listing_csv(&listing, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert_eq!(rows, 1);
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("folder,key,description,brand,price_crc,price_usd")
        );
        assert_eq!(
            lines.next(),
            Some("office,-Nk3,\"coffee, ground\",Britt,2580.00,5.00")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_empty_listing_still_has_header() {
        let mut buffer = Vec::new();
        let rows = export_listing_csv(&FolderListing::new(), &mut buffer).unwrap();

        assert_eq!(rows, 0);
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "folder,key,description,brand,price_crc,price_usd\n"
        );
    }
}
