//! Dispatch core: worker pool, backlog, pending table and the dispatcher.

mod dispatcher;
mod pending;
mod pool;
mod queue;

pub use dispatcher::{Dispatcher, DispatcherStats};
pub use pending::{PendingTable, PendingTask, TaskCallback};
pub use pool::WorkerPool;
pub use queue::TaskQueue;
