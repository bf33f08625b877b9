use serde::Serialize;

/// Indexed dictionary operations
pub trait Dictionary: Send + Sync {
    /// Entry for a single character
    fn character(&self, ch: char) -> Option<&CharacterEntry>;

    /// Entry for an exact word or phrase
    fn word(&self, text: &str) -> Option<&WordEntry>;

    /// Get dictionary metadata
    fn metadata(&self) -> DictionaryMetadata;
}

/// Entry stored under a character key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterEntry {
    /// Romanization of the dictionary that produced the entry
    pub pronunciation: String,
    /// Primary gloss
    pub gloss: String,
    /// At most 3, deduplicated, preference-ordered
    pub ranked_glosses: Vec<String>,
    /// At most 10, deduplicated, for detailed display
    pub all_glosses: Vec<String>,
    /// Character count of the headword this entry came from
    pub headword_len: usize,
}

impl CharacterEntry {
    pub fn is_single_character(&self) -> bool {
        self.headword_len == 1
    }
}

/// Entry stored under a word key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordEntry {
    pub pronunciation: String,
    pub gloss: String,
    pub headword_len: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DictionaryMetadata {
    pub name: String,
    pub version: String,
    pub language: String,
    pub character_count: usize,
    pub word_count: usize,
}
