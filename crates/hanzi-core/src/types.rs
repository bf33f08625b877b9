use crate::language::{LookupResult, LookupScope};

#[derive(Debug, Clone)]
pub enum AppEvent {
    Lookup {
        id: u64,
        text: String,
        scope: LookupScope,
    },
    LookupResult {
        id: u64,
        text: String,
        result: LookupResult,
    },
    LookupFailed {
        id: u64,
        text: String,
        error: String,
    },
    /// No more requests will be sent
    InputClosed,
}

impl AppEvent {
    pub fn request_id(&self) -> Option<u64> {
        match self {
            AppEvent::Lookup { id, .. }
            | AppEvent::LookupResult { id, .. }
            | AppEvent::LookupFailed { id, .. } => Some(*id),
            AppEvent::InputClosed => None,
        }
    }
}
