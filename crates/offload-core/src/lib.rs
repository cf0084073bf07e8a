//! Offload — background task dispatch over isolated workers
//!
//! This crate provides the host-side machinery for offloading named units of
//! work to a fixed pool of isolated worker threads:
//! - Worker pool and strict-FIFO task backlog
//! - Correlation of inbound replies to pending submissions
//! - Hard-stop cancellation with slot re-arming
//! - Synchronous in-host fallback when isolation is disabled
//! - Console relay from worker contexts to the host log
//!
//! Task functions are registered by name in a [`TaskRegistry`] before the
//! [`Dispatcher`] starts; callers submit `(name, args, callback)` triples and
//! receive a [`TaskId`] they may later use to cancel.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod config;
mod console;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod message;
pub mod registry;

pub use config::{DispatcherConfig, ExecutionMode, DEFAULT_POOL_SIZE};
pub use context::{ContextHandle, ExecutionBackend, InlineBackend, ThreadBackend};
pub use dispatch::{Dispatcher, DispatcherStats};
pub use error::{DispatchError, DispatchResult};
pub use message::{ConsoleLevel, TaskId, TaskRequest, TaskResult, WorkerReply};
pub use registry::{TaskContext, TaskFn, TaskRegistry};

/// JSON-representable value passed to and returned from task functions.
pub type Value = serde_json::Value;
