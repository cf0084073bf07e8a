//! In-flight task records keyed by correlation id.

use rustc_hash::FxHashMap;

use crate::context::ContextHandle;
use crate::message::TaskId;
use crate::Value;

/// Callback invoked with a completed task's results.
pub type TaskCallback = Box<dyn FnOnce(Vec<Value>) + Send>;

/// One in-flight task: its callback and, once dispatched, its context.
///
/// `context` is `None` while the task waits in the queue; after dispatch the
/// record is the sole owner of the context handle until the task completes or
/// is cancelled.
pub struct PendingTask {
    pub(crate) callback: TaskCallback,
    pub(crate) context: Option<ContextHandle>,
}

impl PendingTask {
    pub(crate) fn new(callback: TaskCallback) -> Self {
        Self {
            callback,
            context: None,
        }
    }
}

/// Table of in-flight tasks keyed by correlation id.
pub struct PendingTable {
    records: FxHashMap<TaskId, PendingTask>,
}

impl PendingTable {
    pub(crate) fn new() -> Self {
        Self {
            records: FxHashMap::default(),
        }
    }

    /// Insert a record for a freshly allocated id.
    pub(crate) fn register(&mut self, id: TaskId, record: PendingTask) {
        self.records.insert(id, record);
    }

    /// Remove and return the record for `id`.
    ///
    /// Unknown ids return `None` and the caller drops the reply — this is how
    /// late or duplicate replies from a detached context are tolerated.
    pub(crate) fn remove(&mut self, id: TaskId) -> Option<PendingTask> {
        self.records.remove(&id)
    }

    /// Mutable access to the record for `id`.
    pub(crate) fn get_mut(&mut self, id: TaskId) -> Option<&mut PendingTask> {
        self.records.get_mut(&id)
    }

    /// Drop every record, callbacks uninvoked.
    pub(crate) fn clear(&mut self) {
        self.records.clear();
    }

    /// Check if a record exists for `id`.
    pub fn contains(&self, id: TaskId) -> bool {
        self.records.contains_key(&id)
    }

    /// Number of in-flight tasks (queued and assigned).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if no task is in flight.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records with an assigned context.
    pub fn busy_count(&self) -> usize {
        self.records
            .values()
            .filter(|record| record.context.is_some())
            .count()
    }
}
