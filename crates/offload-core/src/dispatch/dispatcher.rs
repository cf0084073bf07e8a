//! The dispatcher: submission, reply routing, cancellation, recycling.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, Receiver};
use parking_lot::Mutex;

use super::pending::{PendingTable, PendingTask};
use super::pool::WorkerPool;
use super::queue::TaskQueue;
use crate::config::{DispatcherConfig, ExecutionMode};
use crate::console;
use crate::context::{ContextHandle, ExecutionBackend, InlineBackend, ThreadBackend};
use crate::error::{DispatchError, DispatchResult};
use crate::message::{TaskId, TaskRequest, TaskResult, WorkerReply};
use crate::registry::TaskRegistry;
use crate::Value;

/// Dispatcher statistics.
#[derive(Debug, Clone, Default)]
pub struct DispatcherStats {
    /// Contexts currently parked in the pool
    pub idle_contexts: usize,

    /// Contexts currently assigned to an in-flight task
    pub busy_contexts: usize,

    /// Requests waiting for an idle context, in submission order
    pub queued_tasks: usize,

    /// All in-flight tasks (queued and assigned)
    pub pending_tasks: usize,
}

/// Mutable dispatcher state.
///
/// Everything lives behind one mutex: submissions, cancellations and reply
/// routing each take the lock in turn, so mutations never interleave — the
/// single-owner coordinator discipline.
struct Inner {
    pool: WorkerPool,
    queue: TaskQueue,
    pending: PendingTable,
    next_id: u64,
}

impl Inner {
    /// Send `request` on `handle` and park the handle in the task's record.
    fn dispatch_on(&mut self, handle: ContextHandle, request: TaskRequest) {
        let id = request.id;
        if let Err(err) = handle.send(request) {
            tracing::warn!(task = %id, "{err}");
        }
        match self.pending.get_mut(id) {
            Some(record) => record.context = Some(handle),
            // The record is gone; the slot stays in the pool.
            None => self.pool.release(handle),
        }
    }

    /// Resolve a completed task.
    ///
    /// Returns the callback and results to invoke once the state lock is
    /// released; `None` for an unknown id (late or duplicate reply, dropped).
    fn finish(&mut self, result: TaskResult) -> Option<(super::pending::TaskCallback, Vec<Value>)> {
        let record = self.pending.remove(result.id)?;
        if let Some(handle) = record.context {
            // Reuse the freed context for the next queued request directly
            // instead of an idle/reacquire round trip.
            match self.queue.dequeue() {
                Some(next) => self.dispatch_on(handle, next),
                None => self.pool.release(handle),
            }
        }
        Some((record.callback, result.results))
    }
}

/// Routes named task submissions across a fixed pool of execution contexts.
///
/// Constructed from a [`TaskRegistry`] and a [`DispatcherConfig`]; owns the
/// worker pool, the backlog and the pending table, and allocates correlation
/// ids from its own counter. See the module docs for the control flow.
pub struct Dispatcher {
    inner: Arc<Mutex<Inner>>,
    backend: Option<Arc<dyn ExecutionBackend>>,
    mode: ExecutionMode,
    /// Reply receiver, held only in inline mode (threaded mode moves it into
    /// the router thread).
    reply_rx: Option<Receiver<WorkerReply>>,
    router: Option<JoinHandle<()>>,
}

impl Dispatcher {
    /// Create a dispatcher and arm its pool.
    ///
    /// In [`ExecutionMode::Inline`] the pool collapses to one synchronous
    /// context regardless of the configured size.
    pub fn new(registry: Arc<TaskRegistry>, config: DispatcherConfig) -> DispatchResult<Self> {
        if config.pool_size == 0 {
            return Err(DispatchError::EmptyPool);
        }

        let (reply_tx, reply_rx) = channel::unbounded();
        let (backend, pool_size): (Arc<dyn ExecutionBackend>, usize) = match config.mode {
            ExecutionMode::Threaded => (
                Arc::new(ThreadBackend::new(registry, reply_tx)),
                config.pool_size,
            ),
            ExecutionMode::Inline => (Arc::new(InlineBackend::new(registry, reply_tx)), 1),
        };

        let mut pool = WorkerPool::new(pool_size);
        for slot in 0..pool_size {
            pool.release(backend.spawn(slot));
        }

        let inner = Arc::new(Mutex::new(Inner {
            pool,
            queue: TaskQueue::new(),
            pending: PendingTable::new(),
            next_id: 0,
        }));

        let (router, reply_rx) = match config.mode {
            ExecutionMode::Threaded => (Some(spawn_router(inner.clone(), reply_rx)), None),
            ExecutionMode::Inline => (None, Some(reply_rx)),
        };

        Ok(Self {
            inner,
            backend: Some(backend),
            mode: config.mode,
            reply_rx,
            router,
        })
    }

    /// Submit a named task.
    ///
    /// Registers a pending record and either dispatches immediately on an
    /// idle context or appends to the backlog. Returns the correlation id
    /// synchronously; the caller may use it to [`cancel`](Self::cancel).
    ///
    /// In inline mode the callback fires before this method returns.
    pub fn submit(
        &self,
        worker: &str,
        args: Vec<Value>,
        callback: impl FnOnce(Vec<Value>) + Send + 'static,
    ) -> TaskId {
        let id;
        {
            let mut inner = self.inner.lock();
            inner.next_id += 1;
            id = TaskId::from_u64(inner.next_id);

            let request = TaskRequest {
                id,
                worker: worker.to_string(),
                args,
            };
            inner
                .pending
                .register(id, PendingTask::new(Box::new(callback)));

            match inner.pool.acquire_idle() {
                Some(handle) => inner.dispatch_on(handle, request),
                // No free context; wait in submission order.
                None => inner.queue.enqueue(request),
            }
        }

        if self.mode == ExecutionMode::Inline {
            self.drain_replies();
        }
        id
    }

    /// Cancel an in-flight task. Silent: the callback is never invoked.
    ///
    /// An assigned task's context is detached and its slot re-armed with a
    /// fresh context, which immediately takes the next queued request or goes
    /// idle. A queued task is simply removed. Unknown ids are a no-op.
    pub fn cancel(&self, id: TaskId) {
        {
            let mut inner = self.inner.lock();
            let Some(record) = inner.pending.remove(id) else {
                return;
            };

            match record.context {
                Some(handle) => {
                    let slot = handle.slot();
                    // Detach: the context's inbox closes and any result still
                    // in transit is dropped by the unknown-id rule.
                    drop(handle);
                    tracing::debug!(task = %id, slot, "cancelled running task; re-arming slot");

                    if let Some(backend) = &self.backend {
                        let fresh = backend.spawn(slot);
                        match inner.queue.dequeue() {
                            Some(next) => inner.dispatch_on(fresh, next),
                            None => inner.pool.release(fresh),
                        }
                    }
                }
                None => {
                    inner.queue.remove(id);
                    tracing::debug!(task = %id, "cancelled queued task");
                }
            }
        }

        if self.mode == ExecutionMode::Inline {
            self.drain_replies();
        }
    }

    /// Snapshot of pool and backlog occupancy.
    pub fn stats(&self) -> DispatcherStats {
        let inner = self.inner.lock();
        DispatcherStats {
            idle_contexts: inner.pool.idle_count(),
            busy_contexts: inner.pending.busy_count(),
            queued_tasks: inner.queue.len(),
            pending_tasks: inner.pending.len(),
        }
    }

    /// Fixed number of pool slots.
    pub fn pool_size(&self) -> usize {
        self.inner.lock().pool.size()
    }

    /// Tear the pool down.
    ///
    /// Detaches every context (pending callbacks are dropped uninvoked),
    /// clears the backlog and waits for the worker threads and the router to
    /// wind down. Also runs on `Drop`.
    pub fn shutdown(&mut self) {
        {
            let mut inner = self.inner.lock();
            inner.queue.clear();
            inner.pending.clear();
            inner.pool.clear();
        }

        // Dropping the backend releases the last host-side reply sender; the
        // router stops once the detached workers have exited.
        self.backend = None;
        self.reply_rx = None;
        if let Some(router) = self.router.take() {
            let _ = router.join();
        }
    }

    /// Route every reply already queued (inline mode only).
    fn drain_replies(&self) {
        if let Some(reply_rx) = &self.reply_rx {
            while let Ok(reply) = reply_rx.try_recv() {
                route_reply(&self.inner, reply);
            }
        }
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Handle one inbound reply: relay console entries, resolve results.
fn route_reply(inner: &Mutex<Inner>, reply: WorkerReply) {
    match reply {
        WorkerReply::Console { level, entries } => console::relay(level, &entries),
        WorkerReply::Result(result) => {
            tracing::debug!(
                task = %result.id,
                worker = %result.worker,
                time_ms = result.time_ms,
                "task completed"
            );
            let finished = inner.lock().finish(result);
            // The callback runs outside the lock; it may submit new tasks.
            if let Some((callback, results)) = finished {
                callback(results);
            }
        }
    }
}

/// Reply router for threaded mode.
fn spawn_router(inner: Arc<Mutex<Inner>>, reply_rx: Receiver<WorkerReply>) -> JoinHandle<()> {
    thread::Builder::new()
        .name("offload-router".to_string())
        .spawn(move || {
            // One reply at a time; the loop ends when every context and the
            // backend have dropped their reply senders.
            for reply in reply_rx {
                route_reply(&inner, reply);
            }
        })
        .expect("Failed to spawn router thread")
}
