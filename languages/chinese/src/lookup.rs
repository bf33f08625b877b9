use std::sync::Arc;

use hanzi_core::dictionary::Dictionary;
use hanzi_core::error::LookupError;
use hanzi_core::language::{
    CharacterLookup, CharacterReading, Lookup, LookupResult, LookupScope, PhraseLookup, PhraseReading,
};
use hanzi_core::preprocess::{DefaultPreprocessor, Preprocessor};

use crate::loader::Dictionaries;
use crate::store::DictionaryStore;

/// Phrase and character lookup against CC-CEDICT and CC-Canto
pub struct ChineseLookup {
    store: Arc<DictionaryStore>,
    preprocessor: DefaultPreprocessor,
}

impl ChineseLookup {
    pub fn new(store: Arc<DictionaryStore>) -> Self {
        Self {
            store,
            preprocessor: DefaultPreprocessor,
        }
    }

    pub fn store(&self) -> &Arc<DictionaryStore> {
        &self.store
    }
}

#[async_trait::async_trait]
impl Lookup for ChineseLookup {
    async fn lookup_scoped(
        &self,
        text: &str,
        scope: LookupScope,
    ) -> Result<LookupResult, LookupError> {
        // Blank input never triggers a build
        if self.preprocessor.phrase(text).is_none() {
            return Ok(LookupResult::default());
        }

        let dictionaries = self.store.dictionaries().await?;
        Ok(lookup_in(&dictionaries, &self.preprocessor, text, scope))
    }
}

/// Answer a query against already built dictionaries
pub fn lookup_in(
    dictionaries: &Dictionaries,
    preprocessor: &impl Preprocessor,
    text: &str,
    scope: LookupScope,
) -> LookupResult {
    let mandarin = scope.includes_mandarin().then_some(&dictionaries.mandarin);
    let cantonese = scope.includes_cantonese().then_some(&dictionaries.cantonese);

    let full_phrase = preprocessor.phrase(text).and_then(|phrase| {
        let mandarin = mandarin.and_then(|d| d.word(phrase)).map(PhraseReading::from);
        let cantonese = cantonese.and_then(|d| d.word(phrase)).map(PhraseReading::from);

        (mandarin.is_some() || cantonese.is_some()).then(|| PhraseLookup {
            text: phrase.to_string(),
            mandarin,
            cantonese,
        })
    });

    let characters = preprocessor
        .characters(text)
        .into_iter()
        .filter_map(|ch| {
            let mandarin = mandarin.and_then(|d| d.character(ch)).map(CharacterReading::from);
            let cantonese = cantonese.and_then(|d| d.character(ch)).map(CharacterReading::from);

            (mandarin.is_some() || cantonese.is_some()).then_some(CharacterLookup {
                character: ch,
                mandarin,
                cantonese,
            })
        })
        .collect();

    LookupResult {
        full_phrase,
        characters,
    }
}
