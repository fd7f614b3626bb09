//! Handler chain result type.

/// What a handler did with an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no summary.
    Stop,
    /// Not for this handler; try next.
    Ignore,
    /// Stop the chain with a short summary of the outcome (logged by `after()` observers).
    Reply(String),
}
