//! Product catalogue client
//!
//! The catalogue is an Algolia index. A search never fails from the
//! caller's point of view: transport errors, non-success statuses and
//! unexpected payloads are logged and produce an empty result.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::settings::CatalogueSettings;
use crate::error::{GroceryError, GroceryResult};
use crate::models::ProductHit;

/// Attributes requested for every hit
const ATTRIBUTES: [&str; 4] = ["ecomDescription", "imageURL", "basePrice", "marca"];

/// Source of product hits for a free-text query
pub trait CatalogueClient {
    /// Search the catalogue; failures yield an empty list
    fn search(&self, query: &str) -> Vec<ProductHit>;
}

#[derive(Debug, Serialize)]
struct MultiQueryRequest<'a> {
    requests: Vec<IndexQuery<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IndexQuery<'a> {
    index_name: &'a str,
    query: &'a str,
    page: u32,
    facets: Vec<String>,
    attributes_to_retrieve: Vec<String>,
}

/// Algolia-backed catalogue
pub struct AlgoliaCatalogue {
    client: Client,
    settings: CatalogueSettings,
}

impl AlgoliaCatalogue {
    pub fn new(settings: CatalogueSettings, timeout: Duration) -> GroceryResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("grocery-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GroceryError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, settings })
    }

    fn attributes(&self) -> Vec<String> {
        ATTRIBUTES
            .iter()
            .map(|attribute| match *attribute {
                "basePrice" => format!("storeDetail.{}.basePrice", self.settings.store_id),
                other => other.to_string(),
            })
            .collect()
    }

    fn try_search(&self, query: &str) -> GroceryResult<Vec<ProductHit>> {
        let api_key = self.settings.api_key.as_deref().ok_or_else(|| {
            GroceryError::Catalogue(
                "No catalogue API key configured (set GROCERY_CATALOGUE_API_KEY)".into(),
            )
        })?;

        let url = format!(
            "{}/1/indexes/*/queries",
            self.settings.url.trim_end_matches('/')
        );
        let body = MultiQueryRequest {
            requests: vec![IndexQuery {
                index_name: &self.settings.index_name,
                query,
                page: 0,
                facets: Vec::new(),
                attributes_to_retrieve: self.attributes(),
            }],
        };

        debug!(query, index = %self.settings.index_name, "Searching catalogue");
        let response = self
            .client
            .post(url)
            .header("x-algolia-api-key", api_key)
            .header("x-algolia-application-id", &self.settings.application_id)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(GroceryError::Catalogue(format!(
                "Catalogue answered {}",
                status
            )));
        }

        let payload: Value = response.json()?;
        Ok(hits_from_payload(&payload, &self.settings.store_id))
    }
}

impl CatalogueClient for AlgoliaCatalogue {
    fn search(&self, query: &str) -> Vec<ProductHit> {
        match self.try_search(query) {
            Ok(hits) => hits,
            Err(e) => {
                warn!(query, error = %e, "Catalogue search failed");
                Vec::new()
            }
        }
    }
}

/// Extract `results[0].hits` from a multi-query answer
pub fn hits_from_payload(payload: &Value, store_id: &str) -> Vec<ProductHit> {
    payload
        .get("results")
        .and_then(|results| results.get(0))
        .and_then(|result| result.get("hits"))
        .and_then(Value::as_array)
        .map(|hits| {
            hits.iter()
                .map(|hit| ProductHit::from_catalogue(hit, store_id))
                .collect()
        })
        .unwrap_or_default()
}
