use std::collections::HashMap;

use hanzi_core::dictionary::{CharacterEntry, Dictionary, DictionaryMetadata, WordEntry};

use crate::filter::{filter_noise, merge_unique, rank_glosses};
use crate::format::DictionaryFormat;
use crate::parser::{RawRecord, parse_records};

pub const RANKED_GLOSS_CAP: usize = 3;
pub const ALL_GLOSS_CAP: usize = 10;

/// Character and word indexes of one dictionary source
#[derive(Debug, Clone)]
pub struct DictionaryIndex {
    format: DictionaryFormat,
    version: String,
    characters: HashMap<char, CharacterEntry>,
    words: HashMap<String, WordEntry>,
    records: usize,
    skipped_lines: usize,
}

impl DictionaryIndex {
    pub fn character_count(&self) -> usize {
        self.characters.len()
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Records accepted while building
    pub fn record_count(&self) -> usize {
        self.records
    }

    /// Non-comment lines that did not match the record shape
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

impl Dictionary for DictionaryIndex {
    fn character(&self, ch: char) -> Option<&CharacterEntry> {
        self.characters.get(&ch)
    }

    fn word(&self, text: &str) -> Option<&WordEntry> {
        self.words.get(text)
    }

    fn metadata(&self) -> DictionaryMetadata {
        DictionaryMetadata {
            name: self.format.name().to_string(),
            version: self.version.clone(),
            language: self.format.language_code().to_string(),
            character_count: self.characters.len(),
            word_count: self.words.len(),
        }
    }
}

/// Parse `text` and fold every record into a fresh index
pub fn build_index(format: DictionaryFormat, text: &str) -> DictionaryIndex {
    let mut builder = IndexBuilder::new(format);

    let mut records = parse_records(format, text);
    for record in records.by_ref() {
        builder.add(&record);
    }
    builder.skipped_lines = records.skipped();

    builder.finish()
}

/// Order-sensitive fold of records into one dictionary's indexes.
///
/// Single-character headwords always end up owning their character slot.
/// Between two single-character records the one with the good gloss wins,
/// otherwise the first one parsed stays.
pub struct IndexBuilder {
    format: DictionaryFormat,
    characters: HashMap<char, CharacterEntry>,
    words: HashMap<String, WordEntry>,
    records: usize,
    skipped_lines: usize,
}

impl IndexBuilder {
    pub fn new(format: DictionaryFormat) -> Self {
        Self {
            format,
            characters: HashMap::new(),
            words: HashMap::new(),
            records: 0,
            skipped_lines: 0,
        }
    }

    pub fn add(&mut self, record: &RawRecord) {
        self.records += 1;

        let pronunciation = self.format.pronunciation(record);
        let headword_len = record.headword_len();
        let glosses = &record.glosses;
        let headword_chars: Vec<char> = record
            .traditional
            .chars()
            .chain(record.simplified.chars())
            .collect();

        if headword_len == 1 {
            let best = rank_glosses(&filter_noise(glosses), RANKED_GLOSS_CAP, true);
            let primary = self.format.pick_primary(&best, glosses);

            for key in [&record.traditional, &record.simplified] {
                self.add_single_word(key, pronunciation, &primary);
            }
            for ch in headword_chars {
                self.add_single_character(ch, pronunciation, &primary, &best, glosses);
            }
        } else {
            let first = glosses.first().cloned().unwrap_or_default();
            let ranked = rank_glosses(glosses, RANKED_GLOSS_CAP, false);

            // Words are first-write-wins regardless of length
            for key in [&record.traditional, &record.simplified] {
                if !self.words.contains_key(key.as_str()) {
                    self.words.insert(
                        key.clone(),
                        WordEntry {
                            pronunciation: pronunciation.to_string(),
                            gloss: first.clone(),
                            headword_len,
                        },
                    );
                }
            }
            for ch in headword_chars {
                self.add_phrase_character(ch, pronunciation, &first, &ranked, glosses, headword_len);
            }
        }
    }

    pub fn finish(self) -> DictionaryIndex {
        DictionaryIndex {
            format: self.format,
            version: String::new(),
            characters: self.characters,
            words: self.words,
            records: self.records,
            skipped_lines: self.skipped_lines,
        }
    }

    fn add_single_word(&mut self, key: &str, pronunciation: &str, primary: &str) {
        let entry = WordEntry {
            pronunciation: pronunciation.to_string(),
            gloss: primary.to_string(),
            headword_len: 1,
        };

        match self.words.get_mut(key) {
            None => {
                self.words.insert(key.to_string(), entry);
            }
            Some(existing) if existing.headword_len == 1 => {
                if self.format.is_bad(&existing.gloss) && !self.format.is_bad(primary) {
                    *existing = entry;
                }
            }
            Some(_) => {}
        }
    }

    fn add_single_character(
        &mut self,
        ch: char,
        pronunciation: &str,
        primary: &str,
        best: &[String],
        glosses: &[String],
    ) {
        let format = self.format;

        match self.characters.get_mut(&ch) {
            Some(existing) if existing.is_single_character() => {
                let existing_bad = format.is_bad(&existing.gloss);
                let candidate_bad = format.is_bad(primary);

                match (existing_bad, candidate_bad) {
                    (false, true) => {
                        if format.merges_rejected_glosses() {
                            merge_unique(&mut existing.all_glosses, glosses, ALL_GLOSS_CAP);
                        }
                    }
                    (true, false) => {
                        let mut all_glosses = if !existing.all_glosses.is_empty() {
                            existing.all_glosses.clone()
                        } else if !existing.gloss.is_empty() {
                            vec![existing.gloss.clone()]
                        } else {
                            Vec::new()
                        };
                        merge_unique(&mut all_glosses, glosses, ALL_GLOSS_CAP);

                        *existing = CharacterEntry {
                            pronunciation: pronunciation.to_string(),
                            gloss: primary.to_string(),
                            ranked_glosses: best.to_vec(),
                            all_glosses,
                            headword_len: 1,
                        };
                    }
                    _ => {}
                }
            }
            _ => {
                self.characters.insert(
                    ch,
                    CharacterEntry {
                        pronunciation: pronunciation.to_string(),
                        gloss: primary.to_string(),
                        ranked_glosses: best.to_vec(),
                        all_glosses: capped(glosses),
                        headword_len: 1,
                    },
                );
            }
        }
    }

    fn add_phrase_character(
        &mut self,
        ch: char,
        pronunciation: &str,
        first: &str,
        ranked: &[String],
        glosses: &[String],
        headword_len: usize,
    ) {
        match self.characters.get_mut(&ch) {
            None => {
                self.characters.insert(
                    ch,
                    CharacterEntry {
                        pronunciation: pronunciation.to_string(),
                        gloss: first.to_string(),
                        ranked_glosses: ranked.to_vec(),
                        all_glosses: capped(glosses),
                        headword_len,
                    },
                );
            }
            Some(existing) if existing.headword_len > 1 && headword_len <= existing.headword_len => {
                merge_unique(&mut existing.ranked_glosses, glosses, RANKED_GLOSS_CAP);
                merge_unique(&mut existing.all_glosses, glosses, ALL_GLOSS_CAP);
            }
            Some(_) => {}
        }
    }
}

fn capped(glosses: &[String]) -> Vec<String> {
    let mut all = Vec::new();
    merge_unique(&mut all, glosses, ALL_GLOSS_CAP);
    all
}
