//! Dispatcher error types.

/// Errors surfaced by dispatcher construction and the transport edges.
///
/// Task-level failures (unregistered names, panicking task functions) are not
/// errors to the submitter: they are reported on the console channel and the
/// task simply never completes.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The pool was configured with zero contexts
    #[error("Pool size must be at least 1")]
    EmptyPool,

    /// A request could not be delivered because its context is gone
    #[error("Worker context in slot {0} is no longer reachable")]
    ContextGone(usize),
}

/// Dispatcher result
pub type DispatchResult<T> = Result<T, DispatchError>;
