use once_cell::sync::Lazy;
use regex::Regex;

use crate::format::DictionaryFormat;

static MANDARIN_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\S+)\s+(\S+)\s+\[([^\]]+)\]\s+/(.+)/").expect("valid CC-CEDICT line pattern")
});

static CANTONESE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\S+)\s+(\S+)\s+\[([^\]]+)\]\s+\{([^}]+)\}\s+/(.+)/")
        .expect("valid CC-Canto line pattern")
});

/// One dictionary line split into its fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub traditional: String,
    pub simplified: String,
    pub pinyin: String,
    /// Only present in CC-Canto records
    pub jyutping: Option<String>,
    /// Source order, not deduplicated
    pub glosses: Vec<String>,
}

impl RawRecord {
    /// Character count of the traditional headword
    pub fn headword_len(&self) -> usize {
        self.traditional.chars().count()
    }

    pub fn is_single_character(&self) -> bool {
        self.headword_len() == 1
    }
}

/// Comment and blank lines carry no record and are not counted as malformed
pub fn is_ignorable(line: &str) -> bool {
    line.trim().is_empty() || line.starts_with('#')
}

pub fn parse_line(format: DictionaryFormat, line: &str) -> Option<RawRecord> {
    if is_ignorable(line) {
        return None;
    }

    match format {
        DictionaryFormat::Mandarin => {
            let caps = MANDARIN_LINE.captures(line)?;
            Some(RawRecord {
                traditional: caps[1].to_string(),
                simplified: caps[2].to_string(),
                pinyin: caps[3].to_string(),
                jyutping: None,
                glosses: split_glosses(&caps[4]),
            })
        }
        DictionaryFormat::Cantonese => {
            let caps = CANTONESE_LINE.captures(line)?;
            Some(RawRecord {
                traditional: caps[1].to_string(),
                simplified: caps[2].to_string(),
                pinyin: caps[3].to_string(),
                jyutping: Some(caps[4].to_string()),
                glosses: split_glosses(&caps[5]),
            })
        }
    }
}

/// All records of `text` in line order, malformed lines dropped
pub fn parse_records(format: DictionaryFormat, text: &str) -> Records<'_> {
    Records {
        format,
        lines: text.lines(),
        skipped: 0,
    }
}

/// Iterator over the records of one dictionary text
pub struct Records<'a> {
    format: DictionaryFormat,
    lines: std::str::Lines<'a>,
    skipped: usize,
}

impl Records<'_> {
    /// Malformed lines passed over so far; comments and blanks excluded
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl Iterator for Records<'_> {
    type Item = RawRecord;

    fn next(&mut self) -> Option<RawRecord> {
        for line in self.lines.by_ref() {
            if let Some(record) = parse_line(self.format, line) {
                return Some(record);
            }
            if !is_ignorable(line) {
                tracing::debug!("Skipping malformed {} line: {}", self.format.name(), line);
                self.skipped += 1;
            }
        }
        None
    }
}

fn split_glosses(block: &str) -> Vec<String> {
    block
        .split('/')
        .filter(|gloss| !gloss.is_empty())
        .map(str::to_string)
        .collect()
}
