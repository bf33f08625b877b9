use std::collections::HashSet;

pub trait Preprocessor {
    /// Text used for the full-phrase match, `None` when blank
    fn phrase<'a>(&self, text: &'a str) -> Option<&'a str> {
        let trimmed = text.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Distinct non-whitespace characters in first-occurrence order
    fn characters(&self, text: &str) -> Vec<char> {
        let mut seen = HashSet::new();
        text.chars()
            .filter(|ch| !ch.is_whitespace())
            .filter(|ch| seen.insert(*ch))
            .collect()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrase_is_trimmed() {
        assert_eq!(DefaultPreprocessor.phrase("  你好 \n"), Some("你好"));
        assert_eq!(DefaultPreprocessor.phrase(" \t "), None);
        assert_eq!(DefaultPreprocessor.phrase(""), None);
    }

    #[test]
    fn test_characters_skip_whitespace_and_repeats() {
        let chars = DefaultPreprocessor.characters("山 水\u{3000}山水人");
        assert_eq!(chars, vec!['山', '水', '人']);
    }
}
