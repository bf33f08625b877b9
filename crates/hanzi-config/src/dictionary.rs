use serde::{Deserialize, Serialize};

fn default_mandarin_source() -> String {
    "assets/cedict_ts.u8".to_string()
}

fn default_cantonese_source() -> String {
    "assets/cccanto.u8".to_string()
}

fn default_version() -> String {
    "cedict-20251223-13".to_string()
}

/// Where the two dictionary texts are read from.
///
/// A source starting with `http://` or `https://` is fetched over the
/// network, anything else is treated as a local file path.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DictionaryConfig {
    #[serde(default = "default_mandarin_source")]
    pub mandarin_source: String,
    #[serde(default = "default_cantonese_source")]
    pub cantonese_source: String,
    /// Appended as `v=` to remote sources so stale copies are never served
    #[serde(default = "default_version")]
    pub version: String,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            mandarin_source: default_mandarin_source(),
            cantonese_source: default_cantonese_source(),
            version: default_version(),
        }
    }
}
