use serde::{Deserialize, Serialize};

use crate::dictionary::{CharacterEntry, WordEntry};
use crate::error::LookupError;

/// Phrase and character lookup for a language implementation
#[async_trait::async_trait]
pub trait Lookup: Send + Sync {
    /// Look up the full phrase and every distinct character of `text`
    async fn lookup(&self, text: &str) -> Result<LookupResult, LookupError> {
        self.lookup_scoped(text, LookupScope::Combined).await
    }

    /// Same as [`Lookup::lookup`], restricted to the given dictionaries
    async fn lookup_scoped(
        &self,
        text: &str,
        scope: LookupScope,
    ) -> Result<LookupResult, LookupError>;
}

/// Which dictionaries a lookup consults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupScope {
    Mandarin,
    Cantonese,
    #[default]
    Combined,
}

impl LookupScope {
    pub fn includes_mandarin(self) -> bool {
        matches!(self, LookupScope::Mandarin | LookupScope::Combined)
    }

    pub fn includes_cantonese(self) -> bool {
        matches!(self, LookupScope::Cantonese | LookupScope::Combined)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LookupResult {
    /// Exact match of the whole trimmed input, if any
    pub full_phrase: Option<PhraseLookup>,
    /// Distinct characters with an entry, in first-occurrence order
    pub characters: Vec<CharacterLookup>,
}

impl LookupResult {
    pub fn is_empty(&self) -> bool {
        self.full_phrase.is_none() && self.characters.is_empty()
    }

    pub fn character(&self, ch: char) -> Option<&CharacterLookup> {
        self.characters.iter().find(|c| c.character == ch)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhraseLookup {
    pub text: String,
    pub mandarin: Option<PhraseReading>,
    pub cantonese: Option<PhraseReading>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhraseReading {
    pub pronunciation: String,
    pub gloss: String,
}

impl From<&WordEntry> for PhraseReading {
    fn from(entry: &WordEntry) -> Self {
        Self {
            pronunciation: entry.pronunciation.clone(),
            gloss: entry.gloss.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterLookup {
    pub character: char,
    pub mandarin: Option<CharacterReading>,
    pub cantonese: Option<CharacterReading>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterReading {
    pub pronunciation: String,
    pub gloss: String,
    pub ranked_glosses: Vec<String>,
    pub all_glosses: Vec<String>,
}

impl From<&CharacterEntry> for CharacterReading {
    fn from(entry: &CharacterEntry) -> Self {
        Self {
            pronunciation: entry.pronunciation.clone(),
            gloss: entry.gloss.clone(),
            ranked_glosses: entry.ranked_glosses.clone(),
            all_glosses: entry.all_glosses.clone(),
        }
    }
}
