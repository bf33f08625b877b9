use std::sync::Arc;

use hanzi_config::Config;
use hanzi_core::language::Lookup;
use hanzi_lang_chinese::{CedictLoader, ChineseLookup, DictionaryStore};
use tokio::sync::RwLock;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub lookup: Arc<dyn Lookup>,
}

impl AppState {
    /// Creates the dictionary store for the configured sources. Nothing is
    /// fetched until the first lookup.
    pub fn new(config: Config) -> Self {
        let store = DictionaryStore::new(CedictLoader::from_config(&config.dictionary));
        let lookup = Arc::new(ChineseLookup::new(Arc::new(store)));
        Self::with_lookup(config, lookup)
    }

    pub fn with_lookup(config: Config, lookup: Arc<dyn Lookup>) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            lookup,
        }
    }
}
