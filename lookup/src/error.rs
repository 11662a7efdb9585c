use thiserror::Error;

/// Why a scheduled task produced no outcome.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    #[error("task panicked before completing")]
    Panicked,

    #[error("scheduler shut down before the task completed")]
    SchedulerGone,
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("source {endpoint} failed: {message}")]
    Source { endpoint: String, message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("legacy query has {plates} plates and {states} states, only one of each is supported")]
    LegacyMultiValueQuery { plates: usize, states: usize },

    #[error(transparent)]
    Queue(#[from] QueueError),
}

pub type Result<T> = std::result::Result<T, LookupError>;
