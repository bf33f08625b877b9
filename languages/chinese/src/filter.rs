//! Gloss classification and ranking.

use std::collections::HashSet;

/// Glosses that make poor primary definitions: too short, surnames,
/// classifiers, cross references and proper nouns.
pub fn is_noise_gloss(gloss: &str) -> bool {
    if gloss.chars().count() < 2 {
        return true;
    }

    let lower = gloss.to_lowercase();
    if lower.contains("surname") || lower.contains("classifier") {
        return true;
    }
    if lower.starts_with("variant of") || lower.starts_with("abbr.") || lower.starts_with("see ") {
        return true;
    }

    // Capitalized first letter usually marks an English proper noun
    gloss.chars().next().is_some_and(is_cased_upper)
}

fn is_cased_upper(ch: char) -> bool {
    let unchanged_upper = ch.to_uppercase().eq(std::iter::once(ch));
    let changes_lower = !ch.to_lowercase().eq(std::iter::once(ch));
    unchanged_upper && changes_lower
}

/// Drop noise glosses, falling back to the input when nothing would remain.
pub fn filter_noise(glosses: &[String]) -> Vec<String> {
    let filtered: Vec<String> = glosses
        .iter()
        .filter(|gloss| !is_noise_gloss(gloss))
        .cloned()
        .collect();

    if filtered.is_empty() {
        glosses.to_vec()
    } else {
        filtered
    }
}

/// Up to `max_count` distinct glosses ordered by length.
///
/// Single characters prefer the most concise glosses, words the most
/// descriptive ones. Equal lengths keep their source order.
pub fn rank_glosses(glosses: &[String], max_count: usize, single_character: bool) -> Vec<String> {
    let mut sorted: Vec<&String> = glosses.iter().collect();
    if single_character {
        sorted.sort_by_key(|gloss| gloss.chars().count());
    } else {
        sorted.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
    }

    let mut seen = HashSet::new();
    sorted
        .into_iter()
        .filter(|gloss| !gloss.is_empty())
        .filter(|gloss| seen.insert(gloss.as_str()))
        .take(max_count)
        .cloned()
        .collect()
}

pub fn is_bad_mandarin(gloss: &str) -> bool {
    gloss.to_lowercase().contains("surname")
}

pub fn is_bad_cantonese(gloss: &str) -> bool {
    gloss.to_lowercase().contains("slang")
}

/// First non-slang gloss, else the first gloss, else "".
pub fn prefer_non_slang(glosses: &[String]) -> String {
    glosses
        .iter()
        .find(|gloss| !gloss.is_empty() && !is_bad_cantonese(gloss))
        .or_else(|| glosses.first())
        .cloned()
        .unwrap_or_default()
}

/// Append `incoming` to `target` skipping duplicates, until `cap` is reached.
pub(crate) fn merge_unique(target: &mut Vec<String>, incoming: &[String], cap: usize) {
    for gloss in incoming {
        if target.len() >= cap {
            break;
        }
        if !gloss.is_empty() && !target.contains(gloss) {
            target.push(gloss.clone());
        }
    }
}
