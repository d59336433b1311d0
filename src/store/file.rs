//! Local JSON document list store
//!
//! Keeps the whole store tree in one JSON file and re-reads it on every
//! call, so several processes pointed at the same file see each other's
//! writes. Writes go through `write_json_atomic`. Like the Firebase tree,
//! a node left without children disappears.

use std::path::PathBuf;

use serde_json::{Map, Value};
use tracing::debug;

use super::{ListStore, StorePath};
use crate::error::{GroceryError, GroceryResult};
use crate::models::ItemKey;
use crate::storage::file_io::{read_json, write_json_atomic};

/// List store backed by a single JSON file
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn load(&self) -> GroceryResult<Value> {
        read_json(&self.path).map_err(|e| GroceryError::StoreRead(e.to_string()))
    }

    fn save(&self, document: &Value) -> GroceryResult<()> {
        write_json_atomic(&self.path, document).map_err(|e| GroceryError::StoreWrite(e.to_string()))
    }
}

impl ListStore for JsonFileStore {
    fn push(&self, path: &StorePath, record: &Value) -> GroceryResult<ItemKey> {
        let mut document = self.load().map_err(|e| GroceryError::StoreWrite(e.to_string()))?;

        let key = ItemKey::generate();
        object_at(&mut document, path.segments()).insert(key.to_string(), record.clone());

        self.save(&document)?;
        debug!(path = %path, key = %key, "Pushed record to file store");
        Ok(key)
    }

    fn get(&self, path: &StorePath) -> GroceryResult<Option<Value>> {
        let document = self.load()?;

        let mut node = &document;
        for segment in path.segments() {
            match node.get(segment) {
                Some(child) => node = child,
                None => return Ok(None),
            }
        }

        if node.is_null() {
            Ok(None)
        } else {
            Ok(Some(node.clone()))
        }
    }

    fn delete(&self, path: &StorePath) -> GroceryResult<()> {
        let mut document = self.load().map_err(|e| GroceryError::StoreWrite(e.to_string()))?;

        if remove_at(&mut document, path.segments()) {
            self.save(&document)?;
            debug!(path = %path, "Deleted from file store");
        }
        Ok(())
    }
}

/// Turn `node` into an object if it is anything else, and borrow the map
fn ensure_object(node: &mut Value) -> &mut Map<String, Value> {
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    match node {
        Value::Object(map) => map,
        _ => unreachable!("node was just replaced with an object"),
    }
}

/// Walk (and create) the objects along `segments`
fn object_at<'a>(mut node: &'a mut Value, segments: &[String]) -> &'a mut Map<String, Value> {
    for segment in segments {
        node = ensure_object(node)
            .entry(segment.clone())
            .or_insert(Value::Null);
    }
    ensure_object(node)
}

/// Remove the value at `segments`, pruning parents left empty
///
/// Returns whether anything was removed.
fn remove_at(node: &mut Value, segments: &[String]) -> bool {
    let Some((first, rest)) = segments.split_first() else {
        return false;
    };
    let Value::Object(map) = node else {
        return false;
    };

    if rest.is_empty() {
        return map.remove(first).is_some();
    }

    let removed = match map.get_mut(first) {
        Some(child) => remove_at(child, rest),
        None => false,
    };

    let child_now_empty = map
        .get(first)
        .and_then(Value::as_object)
        .is_some_and(Map::is_empty);
    if removed && child_now_empty {
        map.remove(first);
    }

    removed
}
