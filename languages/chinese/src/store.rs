use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use hanzi_core::error::BuildError;
use tokio::sync::Mutex;

use crate::loader::{CedictLoader, Dictionaries};

type SharedBuild = Shared<BoxFuture<'static, Result<Arc<Dictionaries>, BuildError>>>;

enum Slot {
    Empty,
    Pending { generation: u64, build: SharedBuild },
    Ready(Arc<Dictionaries>),
}

struct StoreState {
    slot: Slot,
    generation: u64,
}

/// Owns the built dictionaries.
///
/// The first request starts a build on a spawned task; every request that
/// arrives while it runs awaits that same build. A successful build is kept
/// for the life of the store. A failed one is reported to all of its waiters
/// and then forgotten, so the next request starts over, even when nobody
/// was still waiting when it failed.
pub struct DictionaryStore {
    loader: Arc<CedictLoader>,
    state: Mutex<StoreState>,
}

impl DictionaryStore {
    pub fn new(loader: CedictLoader) -> Self {
        Self {
            loader: Arc::new(loader),
            state: Mutex::new(StoreState {
                slot: Slot::Empty,
                generation: 0,
            }),
        }
    }

    /// Built dictionaries, building them first if needed
    pub async fn dictionaries(&self) -> Result<Arc<Dictionaries>, BuildError> {
        let (generation, build) = {
            let mut state = self.state.lock().await;

            // A build can finish after all of its waiters have given up
            let finished = match &state.slot {
                Slot::Pending { generation, build } => {
                    build.peek().cloned().map(|outcome| (*generation, outcome))
                }
                _ => None,
            };
            match finished {
                Some((_, Ok(dictionaries))) => {
                    state.slot = Slot::Ready(Arc::clone(&dictionaries));
                    return Ok(dictionaries);
                }
                Some((generation, Err(e))) => {
                    tracing::warn!("Dictionary build {} failed: {}", generation, e);
                    state.slot = Slot::Empty;
                }
                None => {}
            }

            let pending = match &state.slot {
                Slot::Ready(dictionaries) => return Ok(Arc::clone(dictionaries)),
                Slot::Pending { generation, build } => Some((*generation, build.clone())),
                Slot::Empty => None,
            };

            match pending {
                Some(pending) => pending,
                None => {
                    state.generation += 1;
                    let generation = state.generation;
                    let build = self.start_build(generation);
                    state.slot = Slot::Pending {
                        generation,
                        build: build.clone(),
                    };
                    (generation, build)
                }
            }
        };

        let outcome = build.await;

        let mut state = self.state.lock().await;
        let current = matches!(&state.slot, Slot::Pending { generation: g, .. } if *g == generation);
        if current {
            state.slot = match &outcome {
                Ok(dictionaries) => Slot::Ready(Arc::clone(dictionaries)),
                Err(e) => {
                    tracing::warn!("Dictionary build {} failed: {}", generation, e);
                    Slot::Empty
                }
            };
        }

        outcome
    }

    /// Whether a completed build is cached
    pub async fn is_ready(&self) -> bool {
        matches!(self.state.lock().await.slot, Slot::Ready(_))
    }

    fn start_build(&self, generation: u64) -> SharedBuild {
        tracing::info!("Starting dictionary build {}", generation);

        // Spawned so the build keeps running when every waiter gives up
        let loader = Arc::clone(&self.loader);
        let handle = tokio::spawn(async move { loader.load().await.map(Arc::new) });

        async move {
            match handle.await {
                Ok(outcome) => outcome,
                Err(e) => Err(BuildError::Task(e.to_string())),
            }
        }
        .boxed()
        .shared()
    }
}
