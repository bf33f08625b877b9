use hanzi_core::language::{CharacterReading, LookupResult, PhraseReading};
use hanzi_core::types::AppEvent;
use kanal::AsyncReceiver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print responses until the event loop reports that input is closed
pub async fn output_loop(app_rx: AsyncReceiver<AppEvent>, format: OutputFormat) -> anyhow::Result<()> {
    loop {
        let event = app_rx.recv().await?;
        if matches!(event, AppEvent::InputClosed) {
            return Ok(());
        }

        let rendered = match format {
            OutputFormat::Text => render_text(&event),
            OutputFormat::Json => render_json(&event)?,
        };
        if let Some(rendered) = rendered {
            println!("{rendered}");
        }
    }
}

pub fn render_json(event: &AppEvent) -> anyhow::Result<Option<String>> {
    let value = match event {
        AppEvent::LookupResult { id, text, result } => serde_json::json!({
            "id": id,
            "text": text,
            "result": result,
        }),
        AppEvent::LookupFailed { id, text, error } => serde_json::json!({
            "id": id,
            "text": text,
            "error": error,
        }),
        _ => return Ok(None),
    };
    Ok(Some(serde_json::to_string(&value)?))
}

pub fn render_text(event: &AppEvent) -> Option<String> {
    match event {
        AppEvent::LookupResult { text, result, .. } => Some(render_result(text, result)),
        AppEvent::LookupFailed { text, error, .. } => Some(format!("{text}\n  error: {error}")),
        _ => None,
    }
}

fn render_result(text: &str, result: &LookupResult) -> String {
    let mut lines = vec![text.trim().to_string()];

    if let Some(phrase) = &result.full_phrase {
        lines.push(format!(
            "  {}{}{}",
            phrase.text,
            phrase_part("", phrase.mandarin.as_ref()),
            phrase_part("粵 ", phrase.cantonese.as_ref())
        ));
    }

    for entry in &result.characters {
        lines.push(format!(
            "  {}{}{}",
            entry.character,
            character_part("", entry.mandarin.as_ref()),
            character_part("粵 ", entry.cantonese.as_ref())
        ));
    }

    if result.is_empty() {
        lines.push("  (no entries)".to_string());
    }

    lines.join("\n")
}

fn phrase_part(label: &str, reading: Option<&PhraseReading>) -> String {
    match reading {
        Some(reading) => format!("  {label}[{}] {}", reading.pronunciation, reading.gloss),
        None => String::new(),
    }
}

fn character_part(label: &str, reading: Option<&CharacterReading>) -> String {
    match reading {
        Some(reading) => {
            let glosses = if reading.ranked_glosses.is_empty() {
                reading.gloss.clone()
            } else {
                reading.ranked_glosses.join("; ")
            };
            format!("  {label}[{}] {}", reading.pronunciation, glosses)
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use hanzi_core::language::{CharacterLookup, PhraseLookup};

    use super::*;

    fn reading(pronunciation: &str, ranked: &[&str]) -> CharacterReading {
        CharacterReading {
            pronunciation: pronunciation.to_string(),
            gloss: ranked[0].to_string(),
            ranked_glosses: ranked.iter().map(|s| s.to_string()).collect(),
            all_glosses: ranked.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn sample() -> AppEvent {
        AppEvent::LookupResult {
            id: 7,
            text: "山".to_string(),
            result: LookupResult {
                full_phrase: Some(PhraseLookup {
                    text: "山".to_string(),
                    mandarin: Some(PhraseReading {
                        pronunciation: "shan1".to_string(),
                        gloss: "hill".to_string(),
                    }),
                    cantonese: None,
                }),
                characters: vec![CharacterLookup {
                    character: '山',
                    mandarin: Some(reading("shan1", &["hill", "mountain"])),
                    cantonese: Some(reading("saan1", &["mountain"])),
                }],
            },
        }
    }

    #[test]
    fn test_render_text() {
        let rendered = render_text(&sample()).unwrap();
        assert_eq!(
            rendered,
            "山\n  山  [shan1] hill\n  山  [shan1] hill; mountain  粵 [saan1] mountain"
        );
    }

    #[test]
    fn test_render_text_empty_and_failed() {
        let empty = AppEvent::LookupResult {
            id: 1,
            text: "x".to_string(),
            result: LookupResult::default(),
        };
        assert_eq!(render_text(&empty).unwrap(), "x\n  (no entries)");

        let failed = AppEvent::LookupFailed {
            id: 2,
            text: "山".to_string(),
            error: "Failed to fetch CC-CEDICT: 404".to_string(),
        };
        assert_eq!(
            render_text(&failed).unwrap(),
            "山\n  error: Failed to fetch CC-CEDICT: 404"
        );
        assert!(render_text(&AppEvent::InputClosed).is_none());
    }

    #[test]
    fn test_render_json() {
        let rendered = render_json(&sample()).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["id"], 7);
        assert_eq!(value["result"]["full_phrase"]["mandarin"]["gloss"], "hill");
        assert!(value["result"]["full_phrase"]["cantonese"].is_null());
        assert_eq!(value["result"]["characters"][0]["character"], "山");
        assert_eq!(
            value["result"]["characters"][0]["cantonese"]["pronunciation"],
            "saan1"
        );
    }
}
