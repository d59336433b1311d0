//! Folders and folder listings
//!
//! A folder is a named group of items under `grocery_lists/<name>` in the
//! list store. Items are addressed by their store-generated key. Because the
//! store is shared and schemaless, an item may not be a record at all; such
//! items are kept as `StoredItem::Malformed` so they can still be shown (and
//! deleted) but never count toward a total. Any JSON object is a record, with
//! odd field types coerced by `ListEntry`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::{ItemKey, ListEntry, Money};
use crate::error::GroceryError;

/// Characters the hierarchical store does not allow inside a key
const FORBIDDEN_NAME_CHARS: &[char] = &['.', '$', '#', '[', ']', '/'];

/// Validate and normalize a folder name for a new item
///
/// Surrounding whitespace is trimmed so new folders get clean names.
pub fn normalize_folder_name(name: &str) -> Result<String, GroceryError> {
    validate_folder_key(name.trim()).map(str::to_string)
}

/// Check a folder name used to address existing items
///
/// The name is taken exactly as stored. Folders written by other clients
/// may carry surrounding whitespace and must stay reachable.
pub fn validate_folder_key(name: &str) -> Result<&str, GroceryError> {
    if name.trim().is_empty() {
        return Err(GroceryError::Validation(
            "Folder name cannot be empty".into(),
        ));
    }
    if let Some(c) = name.chars().find(|c| FORBIDDEN_NAME_CHARS.contains(c) || c.is_control()) {
        return Err(GroceryError::Validation(format!(
            "Folder name '{}' contains forbidden character {:?}",
            name, c
        )));
    }
    Ok(name)
}

/// One item as found in the store
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StoredItem {
    Entry(ListEntry),
    Malformed(Value),
}

impl StoredItem {
    /// Interpret a raw store value
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            return Self::Malformed(value);
        }
        match ListEntry::deserialize(&value) {
            Ok(entry) => Self::Entry(entry),
            Err(e) => {
                warn!(error = %e, "Stored object could not be read as an entry");
                Self::Malformed(value)
            }
        }
    }

    pub fn as_entry(&self) -> Option<&ListEntry> {
        match self {
            Self::Entry(entry) => Some(entry),
            Self::Malformed(_) => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }
}

/// A named folder with its items in key order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Folder {
    pub name: String,
    pub items: BTreeMap<ItemKey, StoredItem>,
}

impl Folder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: BTreeMap::new(),
        }
    }

    /// Sum of normalized prices; malformed items are skipped
    pub fn total(&self) -> Money {
        self.entries().map(|(_, entry)| entry.price_normalized()).sum()
    }

    /// Well-formed entries with their keys
    pub fn entries(&self) -> impl Iterator<Item = (&ItemKey, &ListEntry)> {
        self.items
            .iter()
            .filter_map(|(key, item)| item.as_entry().map(|entry| (key, entry)))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// All folders of the store, by name
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FolderListing {
    folders: BTreeMap<String, Folder>,
}

impl FolderListing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a listing from the raw `grocery_lists` subtree
    ///
    /// `null` (nothing stored yet) gives an empty listing. A folder whose
    /// value is not an object has no addressable items and is listed empty.
    pub fn from_store_value(root: Value) -> Self {
        let mut listing = Self::new();

        let folders = match root {
            Value::Object(folders) => folders,
            Value::Null => return listing,
            other => {
                warn!(value = %other, "List store root is not an object; ignoring it");
                return listing;
            }
        };

        for (name, items) in folders {
            let mut folder = Folder::new(name.clone());
            match items {
                Value::Object(items) => {
                    for (key, value) in items {
                        folder
                            .items
                            .insert(ItemKey::new(key), StoredItem::from_value(value));
                    }
                }
                other => {
                    warn!(folder = %name, value = %other, "Folder value is not an object");
                }
            }
            listing.folders.insert(name, folder);
        }

        listing
    }

    pub fn insert(&mut self, folder: Folder) {
        self.folders.insert(folder.name.clone(), folder);
    }

    pub fn get(&self, name: &str) -> Option<&Folder> {
        self.folders.get(name)
    }

    pub fn folders(&self) -> impl Iterator<Item = &Folder> {
        self.folders.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.folders.keys().map(String::as_str)
    }

    /// Keep only the named folder
    pub fn retain_folder(&mut self, name: &str) {
        self.folders.retain(|folder_name, _| folder_name == name);
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    /// Sum of all folder totals
    pub fn grand_total(&self) -> Money {
        self.folders.values().map(Folder::total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_folder_name() {
        assert_eq!(normalize_folder_name("  home ").unwrap(), "home");
        assert_eq!(normalize_folder_name("Super del lunes").unwrap(), "Super del lunes");
        assert!(normalize_folder_name("   ").unwrap_err().is_validation());
        assert!(normalize_folder_name("a/b").is_err());
        assert!(normalize_folder_name("v1.2").is_err());
        assert!(normalize_folder_name("#tag").is_err());
    }

    #[test]
    fn test_validate_folder_key_keeps_whitespace() {
        assert_eq!(validate_folder_key(" home").unwrap(), " home");
        assert_eq!(validate_folder_key("home ").unwrap(), "home ");
        assert!(validate_folder_key("").unwrap_err().is_validation());
        assert!(validate_folder_key("  ").is_err());
        assert!(validate_folder_key("a]b").is_err());
        assert!(validate_folder_key("tab\there").is_err());
    }

    #[test]
    fn test_listing_from_store_value() {
        let listing = FolderListing::from_store_value(json!({
            "A": {"k1": {"description": "milk", "price_crc": 1000.0, "price_usd": 1.94, "marca": "Dos Pinos"}},
            "B": {"k2": {"description": "rice", "price_crc": 2000.0, "price_usd": 3.88, "marca": "Tio Pelon"}}
        }));

        assert_eq!(listing.len(), 2);
        assert_eq!(listing.names().collect::<Vec<_>>(), vec!["A", "B"]);

        let a = listing.get("A").unwrap();
        let entry = a.items[&ItemKey::from("k1")].as_entry().unwrap();
        assert_eq!(entry.description(), "milk");
        assert_eq!(a.total(), Money::from_cents(194));
        assert_eq!(listing.grand_total(), Money::from_cents(582));
    }

    #[test]
    fn test_null_root_is_empty() {
        assert!(FolderListing::from_store_value(Value::Null).is_empty());
    }

    #[test]
    fn test_malformed_items_listed_but_not_totaled() {
        let listing = FolderListing::from_store_value(json!({
            "home": {
                "k1": {"description": "milk", "price_usd": 1.94},
                "k2": "half written",
                "k3": 12.5
            }
        }));

        let home = listing.get("home").unwrap();
        assert_eq!(home.len(), 3);
        assert!(home.items[&ItemKey::from("k2")].is_malformed());
        assert!(home.items[&ItemKey::from("k3")].is_malformed());
        assert_eq!(home.total(), Money::from_cents(194));
        assert_eq!(home.entries().count(), 1);
    }

    #[test]
    fn test_objects_with_foreign_field_types_still_count() {
        let listing = FolderListing::from_store_value(json!({
            "home": {
                "k1": {"description": "milk", "price_usd": 1.94, "marca": 42},
                "k2": {"description": "rice", "price_usd": "not a number", "image_url": null}
            }
        }));

        let home = listing.get("home").unwrap();
        let milk = home.items[&ItemKey::from("k1")].as_entry().unwrap();
        assert_eq!(milk.brand(), "42");
        assert!(!home.items[&ItemKey::from("k2")].is_malformed());
        assert_eq!(home.entries().count(), 2);
        assert_eq!(home.total(), Money::from_cents(194));
    }

    #[test]
    fn test_non_object_folder_is_listed_empty() {
        let listing = FolderListing::from_store_value(json!({"weird": 42}));
        assert!(listing.get("weird").unwrap().is_empty());
    }

    #[test]
    fn test_retain_folder() {
        let mut listing = FolderListing::from_store_value(json!({"A": {}, "B": {}}));
        listing.retain_folder("B");
        assert_eq!(listing.names().collect::<Vec<_>>(), vec!["B"]);
    }
}
