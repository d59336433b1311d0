//! Grocery list formatting

use super::Symbols;
use crate::models::{Folder, FolderListing, ItemKey, StoredItem};
use crate::services::{AddOutcome, DeleteOutcome};

/// Format every folder with its items and total
pub fn format_folder_listing(listing: &FolderListing, symbols: Symbols<'_>) -> String {
    if listing.is_empty() {
        return "No grocery lists found.".to_string();
    }

    let folders: Vec<String> = listing
        .folders()
        .map(|folder| format_folder(folder, symbols))
        .collect();
    folders.join("\n")
}

/// Format a single folder
pub fn format_folder(folder: &Folder, symbols: Symbols<'_>) -> String {
    let mut output = format!("{}\n", folder.name);

    if folder.is_empty() {
        output.push_str("  (empty)\n");
    }

    for (key, item) in &folder.items {
        match item {
            StoredItem::Entry(entry) => {
                output.push_str(&format!("  {}\n", symbols.entry_line(entry)));
                output.push_str(&format!("    Brand: {}\n", entry.brand()));
                if let Some(image) = entry.image_url() {
                    output.push_str(&format!("    Image: {}\n", image));
                }
                output.push_str(&format!("    Key:   {}\n", key));
            }
            StoredItem::Malformed(value) => {
                output.push_str(&format!("  Unexpected item format: {}\n", value));
                output.push_str(&format!("    Key:   {}\n", key));
            }
        }
    }

    output.push_str(&format!(
        "  Total Price: {}\n",
        symbols.normalized(folder.total())
    ));
    output
}

pub fn format_add_outcome(outcome: &AddOutcome, symbols: Symbols<'_>) -> String {
    format!(
        "Added {} to {} ({}, key {})",
        outcome.entry.description(),
        outcome.folder,
        symbols.normalized(outcome.entry.price_normalized()),
        outcome.key
    )
}

pub fn format_delete_outcome(
    outcome: &DeleteOutcome,
    folder: &str,
    key: &ItemKey,
    symbols: Symbols<'_>,
) -> String {
    match outcome {
        DeleteOutcome::Deleted { item, in_session } => {
            let what = match item {
                StoredItem::Entry(entry) => format!(
                    "{} ({})",
                    entry.description(),
                    symbols.normalized(entry.price_normalized())
                ),
                StoredItem::Malformed(_) => format!("item {}", key),
            };
            let note = if *in_session { "" } else { " (not added in this session)" };
            format!("Deleted {} from {}{}", what, folder, note)
        }
        DeleteOutcome::NotFound => format!("Item not found in {}", folder),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn listing() -> FolderListing {
        FolderListing::from_store_value(json!({
            "home": {
                "-Nk1": {
                    "description": "milk",
                    "price_crc": 1000.0,
                    "price_usd": 1.94,
                    "image_url": "",
                    "marca": "Dos Pinos"
                },
                "-Nk2": "garbage"
            }
        }))
    }

    #[test]
    fn test_empty_listing() {
        let output = format_folder_listing(&FolderListing::new(), Symbols::default());
        assert_eq!(output, "No grocery lists found.");
    }

    #[test]
    fn test_folder_lines() {
        let output = format_folder_listing(&listing(), Symbols::default());

        assert!(output.starts_with("home\n"));
        assert!(output.contains("  milk: ₡1000.00 ($1.94)\n"));
        assert!(output.contains("    Brand: Dos Pinos\n"));
        assert!(output.contains("    Key:   -Nk1\n"));
        assert!(output.contains("  Unexpected item format: \"garbage\"\n"));
        assert!(output.contains("  Total Price: $1.94\n"));
        assert!(!output.contains("Image:"));
    }

    #[test]
    fn test_delete_messages() {
        let key = ItemKey::new("-Nk1");
        let symbols = Symbols::default();

        let not_found = format_delete_outcome(&DeleteOutcome::NotFound, "home", &key, symbols);
        assert_eq!(not_found, "Item not found in home");

        let folder = listing().get("home").cloned().unwrap();
        let item = folder.items.get(&key).cloned().unwrap();
        let deleted = format_delete_outcome(
            &DeleteOutcome::Deleted {
                item,
                in_session: true,
            },
            "home",
            &key,
            symbols,
        );
        assert_eq!(deleted, "Deleted milk ($1.94) from home");
    }
}
