//! Catalogue search
//!
//! Runs a query against the catalogue and prepares each hit for display:
//! translated description plus source and normalized prices. The raw hits
//! are remembered in the session so a later command can add one by its
//! position.

use tracing::debug;

use crate::catalogue::CatalogueClient;
use crate::error::{GroceryError, GroceryResult};
use crate::models::{CurrencyConverter, Money, ProductHit, Session};
use crate::translate::Translator;

/// One displayable search result
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// 1-based position, as accepted by `add`
    pub position: usize,
    pub description: String,
    pub price_source: Money,
    pub price_normalized: Money,
    pub brand: String,
    pub image_url: Option<String>,
}

/// Results of a search plus any non-fatal problems met on the way
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    pub results: Vec<SearchResult>,
    pub warnings: Vec<String>,
}

/// Service for catalogue searches
pub struct SearchService<'a> {
    catalogue: &'a dyn CatalogueClient,
    translator: &'a Translator,
    converter: CurrencyConverter,
}

impl<'a> SearchService<'a> {
    pub fn new(
        catalogue: &'a dyn CatalogueClient,
        translator: &'a Translator,
        converter: CurrencyConverter,
    ) -> Self {
        Self {
            catalogue,
            translator,
            converter,
        }
    }

    /// Search and remember the hits in `session.last_search`
    ///
    /// An empty catalogue answer (including a failed request) clears the
    /// remembered hits.
    pub fn search(&self, session: &mut Session, query: &str) -> GroceryResult<SearchOutcome> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GroceryError::Validation(
                "Please enter a search query".into(),
            ));
        }

        let hits = self.catalogue.search(query);
        debug!(query, hits = hits.len(), "Catalogue answered");

        let mut outcome = SearchOutcome::default();
        for (index, hit) in hits.iter().enumerate() {
            let translation = self.translator.translate(&hit.description_or_default());
            if let Some(warning) = translation.warning {
                if !outcome.warnings.contains(&warning) {
                    outcome.warnings.push(warning);
                }
            }

            let price_source = hit.price_source();
            outcome.results.push(SearchResult {
                position: index + 1,
                description: translation.text,
                price_source,
                price_normalized: self.converter.to_normalized(price_source),
                brand: hit.brand_or_default(),
                image_url: hit.image(),
            });
        }

        session.last_search = hits;
        session.touch();
        Ok(outcome)
    }

    /// Hit of the last search at 1-based `position`
    pub fn remembered_hit<'s>(
        &self,
        session: &'s Session,
        position: usize,
    ) -> GroceryResult<&'s ProductHit> {
        session
            .search_hit(position)
            .ok_or_else(|| GroceryError::search_result_not_found(format!("#{}", position)))
    }
}
