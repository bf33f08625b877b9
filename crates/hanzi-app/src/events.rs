use std::sync::Arc;

use hanzi_core::types::AppEvent;
use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::{JoinError, JoinSet};

use crate::state::AppState;

pub mod lookup;

use lookup::handle_lookup;

/// App's main loop: answers lookup requests concurrently until input closes
pub async fn event_loop(
    state: Arc<AppState>,
    requests_rx: AsyncReceiver<AppEvent>,
    app_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let limit = {
        let config = state.config.read().await;
        config.lookup_timeout()
    };

    let mut in_flight: JoinSet<anyhow::Result<()>> = JoinSet::new();

    tracing::info!("[EVENT_LOOP] Waiting for lookup requests");
    loop {
        let event = requests_rx.recv().await?;

        match event {
            AppEvent::Lookup { id, text, scope } => {
                let lookup = Arc::clone(&state.lookup);
                let app_tx = app_tx.clone();
                in_flight.spawn(async move {
                    handle_lookup(lookup.as_ref(), id, text, scope, limit, &app_tx).await
                });
            }
            AppEvent::InputClosed => {
                while let Some(joined) = in_flight.join_next().await {
                    report(joined);
                }
                app_tx.send(AppEvent::InputClosed).await?;
                tracing::info!("[EVENT_LOOP] Input closed, all requests answered");
                return Ok(());
            }
            other => {
                tracing::warn!(
                    "[EVENT_LOOP] Ignoring unexpected event {:?}",
                    std::mem::discriminant(&other)
                );
            }
        }

        while let Some(joined) = in_flight.try_join_next() {
            report(joined);
        }
    }
}

fn report(joined: Result<anyhow::Result<()>, JoinError>) {
    match joined {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!("Failed to deliver lookup response: {}", e),
        Err(e) => tracing::error!("Lookup task panicked: {}", e),
    }
}
