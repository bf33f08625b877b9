use std::sync::Arc;

use hanzi_core::language::LookupScope;
use hanzi_core::types::AppEvent;
use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::io::{Input, read_requests};
use crate::output::{OutputFormat, output_loop};
use crate::state::AppState;

/// Centralized channel management
pub struct ChannelSet {
    pub requests: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub responses: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            requests: kanal::bounded_async(64),
            responses: kanal::bounded_async(256),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(
        &self,
        input: Input,
        scope: LookupScope,
        format: OutputFormat,
    ) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.requests.1.clone(),
            self.channels.responses.0.clone(),
        ));

        // Output
        tasks.spawn(output_loop(self.channels.responses.1.clone(), format));

        // Input reader
        tasks.spawn(read_requests(
            input,
            scope,
            self.cancel_token.child_token(),
            self.channels.requests.0.clone(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
