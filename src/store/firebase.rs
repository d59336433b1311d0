//! Firebase Realtime Database list store
//!
//! Talks to the REST API: every node is addressable as `<url>/<path>.json`.
//! `POST` appends a child and answers `{"name": "<generated key>"}`, `GET`
//! answers `null` for missing nodes, `DELETE` removes a node. Authentication
//! is out of scope; an already issued token can be passed along as the
//! `auth` query parameter.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use super::{ListStore, StorePath};
use crate::error::{GroceryError, GroceryResult};
use crate::models::ItemKey;

#[derive(Debug, Deserialize)]
struct PushResponse {
    name: String,
}

/// List store backed by the Firebase REST API
pub struct FirebaseStore {
    client: Client,
    base_url: Url,
    auth_token: Option<String>,
}

impl FirebaseStore {
    /// Create a client for the database at `base_url`
    pub fn new(
        base_url: &str,
        auth_token: Option<String>,
        timeout: Duration,
    ) -> GroceryResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            GroceryError::Config(format!("Invalid store url '{}': {}", base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(GroceryError::Config(format!(
                "Store url '{}' cannot be used as a base url",
                base_url
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GroceryError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            auth_token,
        })
    }

    /// `<base>/<segment>/.../<last>.json`, segments percent-encoded
    pub fn url_for(&self, path: &StorePath) -> Url {
        let mut url = self.base_url.clone();

        let segments = path.segments();
        if let Ok(mut parts) = url.path_segments_mut() {
            parts.pop_if_empty();
            if let Some((last, parents)) = segments.split_last() {
                parts.extend(parents);
                parts.push(&format!("{}.json", last));
            }
        }

        if let Some(token) = &self.auth_token {
            url.query_pairs_mut().append_pair("auth", token);
        }
        url
    }

    fn check(response: Response, path: &StorePath) -> Result<Response, String> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        Err(format!("{} returned {}: {}", path, status, body.trim()))
    }
}

impl ListStore for FirebaseStore {
    fn push(&self, path: &StorePath, record: &Value) -> GroceryResult<ItemKey> {
        let url = self.url_for(path);
        debug!(path = %path, "POST to Firebase");

        let response = self
            .client
            .post(url)
            .json(record)
            .send()
            .map_err(|e| GroceryError::StoreWrite(format!("{}: {}", path, e)))?;
        let response = Self::check(response, path).map_err(GroceryError::StoreWrite)?;

        let pushed: PushResponse = response
            .json()
            .map_err(|e| GroceryError::StoreWrite(format!("Unexpected push response: {}", e)))?;

        info!(path = %path, key = %pushed.name, "Pushed record to Firebase");
        Ok(ItemKey::new(pushed.name))
    }

    fn get(&self, path: &StorePath) -> GroceryResult<Option<Value>> {
        let url = self.url_for(path);
        debug!(path = %path, "GET from Firebase");

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| GroceryError::StoreRead(format!("{}: {}", path, e)))?;
        let response = Self::check(response, path).map_err(GroceryError::StoreRead)?;

        let value: Value = response
            .json()
            .map_err(|e| GroceryError::StoreRead(format!("Invalid JSON at {}: {}", path, e)))?;

        Ok(if value.is_null() { None } else { Some(value) })
    }

    fn delete(&self, path: &StorePath) -> GroceryResult<()> {
        let url = self.url_for(path);
        debug!(path = %path, "DELETE from Firebase");

        let response = self
            .client
            .delete(url)
            .send()
            .map_err(|e| GroceryError::StoreWrite(format!("{}: {}", path, e)))?;
        Self::check(response, path).map_err(GroceryError::StoreWrite)?;

        info!(path = %path, "Deleted from Firebase");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(token: Option<&str>) -> FirebaseStore {
        FirebaseStore::new(
            "https://fam-assist-default-rtdb.firebaseio.com/",
            token.map(str::to_string),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_url_for_root() {
        let url = store(None).url_for(&StorePath::root());
        assert_eq!(
            url.as_str(),
            "https://fam-assist-default-rtdb.firebaseio.com/grocery_lists.json"
        );
    }

    #[test]
    fn test_url_for_item_encodes_segments() {
        let url = store(None).url_for(&StorePath::item("Super lunes", &ItemKey::from("-Nx1")));
        assert_eq!(
            url.as_str(),
            "https://fam-assist-default-rtdb.firebaseio.com/grocery_lists/Super%20lunes/-Nx1.json"
        );
    }

    #[test]
    fn test_url_carries_auth_token() {
        let url = store(Some("secret")).url_for(&StorePath::folder("home"));
        assert_eq!(url.query(), Some("auth=secret"));
    }

    #[test]
    fn test_rejects_invalid_url() {
        let err = FirebaseStore::new("not a url", None, Duration::from_secs(1))
            .err()
            .unwrap();
        assert!(matches!(err, GroceryError::Config(_)));
    }
}
