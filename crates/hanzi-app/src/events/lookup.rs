use std::time::Duration;

use hanzi_core::error::LookupError;
use hanzi_core::language::{Lookup, LookupScope};
use hanzi_core::types::AppEvent;
use kanal::AsyncSender;

/// Answer one request, giving up on it after `limit` when one is set.
///
/// Timing out only abandons this request; the dictionary build it may be
/// waiting on keeps running for later requests.
pub async fn handle_lookup(
    lookup: &dyn Lookup,
    id: u64,
    text: String,
    scope: LookupScope,
    limit: Option<Duration>,
    app_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let outcome = match limit {
        Some(limit) => match tokio::time::timeout(limit, lookup.lookup_scoped(&text, scope)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(LookupError::Timeout(limit)),
        },
        None => lookup.lookup_scoped(&text, scope).await,
    };

    let event = match outcome {
        Ok(result) => {
            tracing::debug!(
                "Lookup {} '{}': {} characters, full phrase: {}",
                id,
                text,
                result.characters.len(),
                result.full_phrase.is_some()
            );
            AppEvent::LookupResult { id, text, result }
        }
        Err(e) => {
            tracing::warn!("Lookup {} '{}' failed: {}", id, text, e);
            AppEvent::LookupFailed {
                id,
                text,
                error: e.to_string(),
            }
        }
    };

    app_tx.send(event).await?;
    Ok(())
}
