//! Application context
//!
//! Wires settings to the concrete collaborators once per process and hands
//! out the services that borrow them.

use std::time::Duration;

use crate::catalogue::{AlgoliaCatalogue, CatalogueClient};
use crate::config::{GroceryPaths, Settings};
use crate::display::Symbols;
use crate::error::GroceryResult;
use crate::models::CurrencyConverter;
use crate::services::{RetryPolicy, SearchService, SyncEngine};
use crate::storage::SessionRepository;
use crate::store::{open_store, ListStore};
use crate::translate::Translator;

/// Everything a command needs to run
pub struct App {
    pub paths: GroceryPaths,
    pub settings: Settings,
    pub sessions: SessionRepository,
    store: Box<dyn ListStore>,
    catalogue: Box<dyn CatalogueClient>,
    translator: Translator,
    converter: CurrencyConverter,
    retry: RetryPolicy,
}

impl App {
    /// Build the context from loaded settings
    pub fn new(paths: GroceryPaths, settings: Settings) -> GroceryResult<Self> {
        let timeout = Duration::from_secs(settings.store.timeout_secs);
        let store = open_store(&settings, &paths)?;
        let catalogue = Box::new(AlgoliaCatalogue::new(settings.catalogue.clone(), timeout)?);
        let translator = Translator::from_settings(&settings.translation, timeout)?;

        Ok(Self::with_parts(paths, settings, store, catalogue, translator))
    }

    /// Build the context around given collaborators
    pub fn with_parts(
        paths: GroceryPaths,
        settings: Settings,
        store: Box<dyn ListStore>,
        catalogue: Box<dyn CatalogueClient>,
        translator: Translator,
    ) -> Self {
        Self {
            converter: CurrencyConverter::new(settings.exchange_rate),
            retry: RetryPolicy::from(&settings.retry),
            sessions: SessionRepository::new(paths.clone()),
            paths,
            settings,
            store,
            catalogue,
            translator,
        }
    }

    pub fn sync_engine(&self) -> SyncEngine<'_> {
        SyncEngine::new(
            self.store.as_ref(),
            &self.translator,
            self.converter,
            self.retry,
        )
    }

    pub fn search_service(&self) -> SearchService<'_> {
        SearchService::new(self.catalogue.as_ref(), &self.translator, self.converter)
    }

    pub fn symbols(&self) -> Symbols<'_> {
        Symbols {
            source: &self.settings.source_currency_symbol,
            normalized: &self.settings.currency_symbol,
        }
    }
}
