use thiserror::Error;

/// Errors surfaced by the queue's public write and lifecycle operations.
///
/// Mirrors the teacher's `ChannelError`: small, `Copy`, and formatted with
/// `thiserror` so a caller can log it without an allocation on the hot path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// The queue has been closed; no further events can be published.
    #[error("the queue has been closed")]
    Closed,
    /// A lifecycle transition (`start`) failed because the component was not `Ready`.
    #[error("start [{component}] error: already running")]
    StartError {
        /// Name of the component that rejected the transition (`"queue"`, `"consumer"`).
        component: &'static str,
    },
    /// A lifecycle transition (`close`) failed because the component was not `Running`.
    #[error("close [{component}] error: not running")]
    CloseError {
        /// Name of the component that rejected the transition.
        component: &'static str,
    },
}

/// Result alias used throughout the public API.
pub type Result<T> = std::result::Result<T, QueueError>;
