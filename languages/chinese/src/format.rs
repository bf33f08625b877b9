use serde::{Deserialize, Serialize};

use crate::filter::{is_bad_cantonese, is_bad_mandarin, prefer_non_slang};
use crate::parser::RawRecord;

/// The two supported source formats and the gloss policy each one uses
/// while building indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DictionaryFormat {
    /// CC-CEDICT: `TRAD SIMP [PINYIN] /gloss/.../`
    Mandarin,
    /// CC-Canto: `TRAD SIMP [PINYIN] {JYUTPING} /gloss/.../`
    Cantonese,
}

impl DictionaryFormat {
    pub fn name(self) -> &'static str {
        match self {
            DictionaryFormat::Mandarin => "CC-CEDICT",
            DictionaryFormat::Cantonese => "CC-Canto",
        }
    }

    pub fn language_code(self) -> &'static str {
        match self {
            DictionaryFormat::Mandarin => "cmn",
            DictionaryFormat::Cantonese => "yue",
        }
    }

    /// Whether a gloss should lose against a competing single-character entry
    pub fn is_bad(self, gloss: &str) -> bool {
        match self {
            DictionaryFormat::Mandarin => is_bad_mandarin(gloss),
            DictionaryFormat::Cantonese => is_bad_cantonese(gloss),
        }
    }

    /// Primary gloss of a single-character record from its ranked and raw glosses
    pub fn pick_primary(self, ranked: &[String], raw: &[String]) -> String {
        match self {
            DictionaryFormat::Mandarin => ranked
                .first()
                .or_else(|| raw.first())
                .cloned()
                .unwrap_or_default(),
            DictionaryFormat::Cantonese => {
                let primary = prefer_non_slang(ranked);
                if primary.is_empty() {
                    prefer_non_slang(raw)
                } else {
                    primary
                }
            }
        }
    }

    /// Romanization stored in this format's entries
    pub fn pronunciation(self, record: &RawRecord) -> &str {
        match self {
            DictionaryFormat::Mandarin => &record.pinyin,
            DictionaryFormat::Cantonese => record.jyutping.as_deref().unwrap_or(&record.pinyin),
        }
    }

    /// Whether glosses of a rejected bad record are still kept for detailed display
    pub fn merges_rejected_glosses(self) -> bool {
        matches!(self, DictionaryFormat::Mandarin)
    }
}
