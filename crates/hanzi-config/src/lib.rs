use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use self::dictionary::DictionaryConfig;
use self::logging::LoggingConfig;

pub mod dictionary;
pub mod logging;

fn default_lookup_timeout_ms() -> u64 {
    10000
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub dictionary: DictionaryConfig,
    pub logging: LoggingConfig,

    /// Upper bound on waiting for a single lookup; 0 disables the limit
    #[serde(default = "default_lookup_timeout_ms")]
    pub lookup_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary: DictionaryConfig::default(),
            logging: LoggingConfig::default(),
            lookup_timeout_ms: default_lookup_timeout_ms(),
        }
    }
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Apply `CEDICT_SOURCE`, `CCCANTO_SOURCE`, `DICT_VERSION`,
    /// `LOOKUP_TIMEOUT_MS` and `LOG_JSON` from `get`. Unparseable values are
    /// ignored.
    pub fn apply_overrides(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(source) = get("CEDICT_SOURCE") {
            self.dictionary.mandarin_source = source;
        }
        if let Some(source) = get("CCCANTO_SOURCE") {
            self.dictionary.cantonese_source = source;
        }
        if let Some(version) = get("DICT_VERSION") {
            self.dictionary.version = version;
        }
        if let Some(timeout) = get("LOOKUP_TIMEOUT_MS").and_then(|v| v.parse().ok()) {
            self.lookup_timeout_ms = timeout;
        }
        if let Some(json) = get("LOG_JSON") {
            self.logging.json = matches!(json.to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
    }

    /// `None` when lookups may wait indefinitely
    pub fn lookup_timeout(&self) -> Option<Duration> {
        match self.lookup_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.dictionary.mandarin_source, "assets/cedict_ts.u8");
        assert_eq!(config.dictionary.cantonese_source, "assets/cccanto.u8");
        assert_eq!(config.lookup_timeout(), Some(Duration::from_secs(10)));
        assert!(!config.logging.json);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(
            r#"{ "dictionary": { "mandarin_source": "https://example.org/cedict.u8" }, "lookup_timeout_ms": 500 }"#,
        )
        .unwrap();
        assert_eq!(config.dictionary.mandarin_source, "https://example.org/cedict.u8");
        assert_eq!(config.dictionary.cantonese_source, "assets/cccanto.u8");
        assert_eq!(config.dictionary.version, "cedict-20251223-13");
        assert_eq!(config.lookup_timeout_ms, 500);
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("CEDICT_SOURCE", "/data/cedict.u8"),
            ("DICT_VERSION", "v2"),
            ("LOOKUP_TIMEOUT_MS", "not a number"),
            ("LOG_JSON", "TRUE"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.dictionary.mandarin_source, "/data/cedict.u8");
        assert_eq!(config.dictionary.cantonese_source, "assets/cccanto.u8");
        assert_eq!(config.dictionary.version, "v2");
        assert_eq!(config.lookup_timeout_ms, 10000);
        assert!(config.logging.json);
    }

    #[test]
    fn test_zero_timeout_means_no_limit() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "LOOKUP_TIMEOUT_MS").then(|| "0".to_string()));
        assert_eq!(config.lookup_timeout_ms, 0);
        assert_eq!(config.lookup_timeout(), None);

        let config = Config::from_json(r#"{ "lookup_timeout_ms": 0 }"#).unwrap();
        assert_eq!(config.lookup_timeout(), None);

        let config = Config::from_json(r#"{ "lookup_timeout_ms": 250 }"#).unwrap();
        assert_eq!(config.lookup_timeout(), Some(Duration::from_millis(250)));
    }
}
