use std::time::Duration;

/// Failure of a dictionary build.
///
/// Cloneable because one failed build is reported to every caller that was
/// waiting on it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to fetch {name}: {reason}")]
    Fetch { name: String, reason: String },

    #[error("Failed to fetch {name}: {status}")]
    Status { name: String, status: u16 },

    #[error("Dictionary build task failed: {0}")]
    Task(String),
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum LookupError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("Lookup timed out after {0:?}")]
    Timeout(Duration),
}
