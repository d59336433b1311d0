//! List synchronization engine
//!
//! Reconciles the session mirror with the shared list store:
//!
//! - **add**: translate, normalize the price, push to the store, and only
//!   once the store accepted the entry record it in the session mirror.
//! - **delete**: read the item, delete it remotely, then drop the mirror
//!   entry with the same folder and key (if this session added it).
//! - **list**: full read of `grocery_lists` under a fixed retry budget;
//!   exhausted retries give an empty listing and an error message.
//!
//! Nothing here is transactional. Concurrent writers to the same folder
//! interleave freely and an add carries no idempotency key, so repeating a
//! call creates a second entry.

use serde_json::Value;
use tracing::{info, warn};

use super::retry::RetryPolicy;
use crate::error::{GroceryError, GroceryResult};
use crate::models::{
    normalize_folder_name, validate_folder_key, CurrencyConverter, FolderListing, ItemKey,
    ListEntry, ProductHit, SessionMirror, StoredItem,
};
use crate::store::{ListStore, StorePath};
use crate::translate::Translator;

/// Result of a successful add
#[derive(Debug, Clone, PartialEq)]
pub struct AddOutcome {
    pub folder: String,
    pub key: ItemKey,
    pub entry: ListEntry,
    /// Non-fatal translation problem; the source description was kept
    pub translation_warning: Option<String>,
}

/// Result of a delete request
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    /// The item existed and was removed from the store
    Deleted {
        item: StoredItem,
        /// Whether the item had been added in this session (and was
        /// therefore taken off the running total)
        in_session: bool,
    },
    /// Nothing stored at that folder and key
    NotFound,
}

impl DeleteOutcome {
    /// The deleted entry, when it was a well-formed record
    pub fn entry(&self) -> Option<&ListEntry> {
        match self {
            Self::Deleted { item, .. } => item.as_entry(),
            Self::NotFound => None,
        }
    }
}

/// Result of a full listing read
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub listing: FolderListing,
    /// Attempts made, successful or not
    pub attempts: u32,
    /// Set when every attempt failed; the listing is then empty
    pub error: Option<String>,
}

impl FetchOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Orchestrates add/delete/list against the store and the session mirror
pub struct SyncEngine<'a> {
    store: &'a dyn ListStore,
    translator: &'a Translator,
    converter: CurrencyConverter,
    retry: RetryPolicy,
}

impl<'a> SyncEngine<'a> {
    pub fn new(
        store: &'a dyn ListStore,
        translator: &'a Translator,
        converter: CurrencyConverter,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            store,
            translator,
            converter,
            retry,
        }
    }

    /// Add a catalogue hit to `folder`
    ///
    /// # Errors
    ///
    /// `Validation` for a bad folder name, `StoreWrite` when the store
    /// rejected the entry. In both cases the mirror is left unchanged.
    pub fn add_to_folder(
        &self,
        mirror: &mut SessionMirror,
        hit: &ProductHit,
        folder: &str,
    ) -> GroceryResult<AddOutcome> {
        let folder = normalize_folder_name(folder)?;

        let translation = self.translator.translate(&hit.description_or_default());
        let entry = ListEntry::from_hit(hit, translation.text, &self.converter);

        let record = serde_json::to_value(&entry)?;
        let key = self.store.push(&StorePath::folder(&folder), &record)?;

        mirror.record(folder.clone(), key.clone(), entry.clone());
        info!(
            folder = %folder,
            key = %key,
            price = %entry.price_normalized(),
            "Added {} to folder",
            entry.description()
        );

        Ok(AddOutcome {
            folder,
            key,
            entry,
            translation_warning: translation.warning,
        })
    }

    /// Delete the item stored under `folder/key`
    ///
    /// # Errors
    ///
    /// `Validation` for a name the store cannot address, `StoreRead` if the
    /// item could not be read, `StoreWrite` if the remote delete failed; the
    /// mirror is only touched after the remote delete succeeded.
    ///
    /// `folder` is used exactly as listed, whitespace included.
    pub fn delete_from_folder(
        &self,
        mirror: &mut SessionMirror,
        folder: &str,
        key: &ItemKey,
    ) -> GroceryResult<DeleteOutcome> {
        let folder = validate_folder_key(folder)?;
        let path = StorePath::item(folder, key);

        let Some(value) = self.store.get(&path)? else {
            warn!(folder = %folder, key = %key, "Item not found");
            return Ok(DeleteOutcome::NotFound);
        };

        self.store.delete(&path)?;

        let in_session = mirror.forget(folder, key).is_some();
        info!(folder = %folder, key = %key, in_session, "Deleted item");

        Ok(DeleteOutcome::Deleted {
            item: StoredItem::from_value(value),
            in_session,
        })
    }

    /// Read every folder, retrying the full read on failure
    pub fn list_all_folders(&self) -> FetchOutcome {
        let root = StorePath::root();
        let result = self
            .retry
            .run("Fetching grocery lists", || self.store.get(&root));

        match result {
            Ok((value, attempts)) => FetchOutcome {
                listing: FolderListing::from_store_value(value.unwrap_or(Value::Null)),
                attempts,
                error: None,
            },
            Err(exhausted) => {
                let message = format!(
                    "Failed to fetch grocery lists after {} attempts: {}",
                    exhausted.attempts, exhausted.last_error
                );
                tracing::error!("{}", message);
                FetchOutcome {
                    listing: FolderListing::new(),
                    attempts: exhausted.attempts,
                    error: Some(message),
                }
            }
        }
    }
}
