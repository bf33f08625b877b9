use std::sync::Arc;

use hanzi_config::dictionary::DictionaryConfig;
use hanzi_core::dictionary::Dictionary;
use hanzi_core::error::BuildError;

use crate::format::DictionaryFormat;
use crate::index::{DictionaryIndex, build_index};
use crate::source::{TextSource, source_from_location};

/// Both built dictionaries. They are never merged; lookups combine them.
#[derive(Debug, Clone)]
pub struct Dictionaries {
    pub mandarin: DictionaryIndex,
    pub cantonese: DictionaryIndex,
}

/// Fetches and parses CC-CEDICT and CC-Canto
pub struct CedictLoader {
    mandarin: Arc<dyn TextSource>,
    cantonese: Arc<dyn TextSource>,
    version: String,
}

impl CedictLoader {
    pub fn new(mandarin: Arc<dyn TextSource>, cantonese: Arc<dyn TextSource>) -> Self {
        Self {
            mandarin,
            cantonese,
            version: String::new(),
        }
    }

    pub fn from_config(config: &DictionaryConfig) -> Self {
        let client = reqwest::Client::new();
        let mandarin = source_from_location(
            &client,
            DictionaryFormat::Mandarin.name(),
            &config.mandarin_source,
            &config.version,
        );
        let cantonese = source_from_location(
            &client,
            DictionaryFormat::Cantonese.name(),
            &config.cantonese_source,
            &config.version,
        );

        Self::new(mandarin, cantonese).with_version(config.version.clone())
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Fetch both sources concurrently, then parse them off the async runtime.
    /// Either both indexes are returned or neither.
    pub async fn load(&self) -> Result<Dictionaries, BuildError> {
        tracing::info!(
            "Loading dictionaries {} and {}",
            self.mandarin.name(),
            self.cantonese.name()
        );

        let (mandarin_text, cantonese_text) =
            tokio::try_join!(self.mandarin.fetch(), self.cantonese.fetch())?;

        let version = self.version.clone();
        let dictionaries = tokio::task::spawn_blocking(move || Dictionaries {
            mandarin: build_index(DictionaryFormat::Mandarin, &mandarin_text)
                .with_version(version.clone()),
            cantonese: build_index(DictionaryFormat::Cantonese, &cantonese_text)
                .with_version(version),
        })
        .await
        .map_err(|e| BuildError::Task(e.to_string()))?;

        for index in [&dictionaries.mandarin, &dictionaries.cantonese] {
            let metadata = index.metadata();
            tracing::info!(
                "Loaded {}: {} characters, {} words ({} malformed lines skipped)",
                metadata.name,
                metadata.character_count,
                metadata.word_count,
                index.skipped_lines()
            );
        }

        Ok(dictionaries)
    }
}
