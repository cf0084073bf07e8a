//! Execution contexts: isolated worker threads or the synchronous stand-in.
//!
//! The dispatcher never talks to a runtime environment directly; it arms pool
//! slots through an [`ExecutionBackend`] chosen once at construction and sends
//! requests through the resulting [`ContextHandle`]s. Replies — results and
//! console entries alike — travel one shared channel back to the host.

mod inline;
mod thread;

pub use inline::InlineBackend;
pub use thread::ThreadBackend;

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;

use crossbeam::channel::Sender;

use crate::error::{DispatchError, DispatchResult};
use crate::message::{ConsoleLevel, TaskRequest, TaskResult, WorkerReply};
use crate::registry::{TaskContext, TaskRegistry};
use crate::Value;

/// Creates execution contexts for pool slots.
///
/// Selected once from configuration when the dispatcher is built; the two
/// variants are [`ThreadBackend`] (isolated worker threads) and
/// [`InlineBackend`] (synchronous same-stack execution).
pub trait ExecutionBackend: Send + Sync {
    /// Arm `slot` with a fresh execution context.
    fn spawn(&self, slot: usize) -> ContextHandle;
}

/// Uniform send surface over one execution context.
pub(crate) enum ContextPort {
    /// Inbox of an isolated worker thread
    Thread(Sender<TaskRequest>),
    /// Synchronous stand-in executing in the caller's stack
    Inline(inline::InlineRunner),
}

/// Handle to the execution context occupying one pool slot.
///
/// Owned by the pool while idle and by the pending record of the task running
/// on it while busy; dropping the handle detaches the context.
pub struct ContextHandle {
    slot: usize,
    port: ContextPort,
}

impl ContextHandle {
    pub(crate) fn new(slot: usize, port: ContextPort) -> Self {
        Self { slot, port }
    }

    /// Pool slot this context occupies.
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Transmit a request to the context.
    ///
    /// For a thread context this enqueues onto its inbox; for the inline
    /// stand-in the request executes before the call returns.
    pub(crate) fn send(&self, request: TaskRequest) -> DispatchResult<()> {
        match &self.port {
            ContextPort::Thread(tx) => tx
                .send(request)
                .map_err(|_| DispatchError::ContextGone(self.slot)),
            ContextPort::Inline(runner) => {
                runner.run(self.slot, request);
                Ok(())
            }
        }
    }
}

impl std::fmt::Debug for ContextHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextHandle")
            .field("slot", &self.slot)
            .finish()
    }
}

/// Execute one request against the registry and post the reply.
///
/// An unregistered name or a panicking task function produces a console
/// `error` diagnostic and no result: the task never completes and its record
/// stays assigned until the caller cancels it.
pub(crate) fn run_task(
    registry: &TaskRegistry,
    reply_tx: &Sender<WorkerReply>,
    slot: usize,
    request: TaskRequest,
) {
    let ctx = TaskContext::new(request.id, slot, reply_tx.clone());
    let Some(task) = registry.get(&request.worker) else {
        ctx.console(
            ConsoleLevel::Error,
            vec![Value::String(format!(
                "Unregistered task function: {}",
                request.worker
            ))],
        );
        return;
    };

    let start = Instant::now();
    match catch_unwind(AssertUnwindSafe(|| task(&ctx, &request.args))) {
        Ok(results) => {
            let _ = reply_tx.send(WorkerReply::Result(TaskResult {
                id: request.id,
                worker: request.worker,
                results,
                time_ms: start.elapsed().as_millis() as u64,
            }));
        }
        Err(_) => {
            ctx.console(
                ConsoleLevel::Error,
                vec![Value::String(format!(
                    "Task function '{}' panicked",
                    request.worker
                ))],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::TaskId;
    use crossbeam::channel;

    fn request(id: u64, worker: &str, args: Vec<Value>) -> TaskRequest {
        TaskRequest {
            id: TaskId::from_u64(id),
            worker: worker.to_string(),
            args,
        }
    }

    #[test]
    fn test_run_task_posts_result() {
        let mut registry = TaskRegistry::new();
        registry.register("double", |_ctx, args| {
            let n = args.first().and_then(Value::as_i64).unwrap_or(0);
            vec![Value::from(n * 2)]
        });

        let (tx, rx) = channel::unbounded();
        run_task(&registry, &tx, 0, request(1, "double", vec![Value::from(5)]));

        match rx.try_recv().unwrap() {
            WorkerReply::Result(result) => {
                assert_eq!(result.id, TaskId::from_u64(1));
                assert_eq!(result.worker, "double");
                assert_eq!(result.results, vec![Value::from(10)]);
            }
            WorkerReply::Console { .. } => panic!("expected a result reply"),
        }
    }

    #[test]
    fn test_run_task_unregistered_name() {
        let registry = TaskRegistry::new();
        let (tx, rx) = channel::unbounded();
        run_task(&registry, &tx, 0, request(1, "missing", vec![]));

        // One console diagnostic, no result.
        match rx.try_recv().unwrap() {
            WorkerReply::Console { level, entries } => {
                assert_eq!(level, ConsoleLevel::Error);
                assert!(entries[0].as_str().unwrap().contains("missing"));
            }
            WorkerReply::Result(_) => panic!("unregistered task produced a result"),
        }
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_run_task_contains_panic() {
        let mut registry = TaskRegistry::new();
        registry.register("boom", |_ctx, _args| panic!("kaboom"));

        let (tx, rx) = channel::unbounded();
        run_task(&registry, &tx, 2, request(3, "boom", vec![]));

        match rx.try_recv().unwrap() {
            WorkerReply::Console { level, entries } => {
                assert_eq!(level, ConsoleLevel::Error);
                assert!(entries[0].as_str().unwrap().contains("boom"));
            }
            WorkerReply::Result(_) => panic!("panicking task produced a result"),
        }
        assert!(rx.try_recv().is_err());
    }
}
