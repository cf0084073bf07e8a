//! Named task functions and the registry that resolves them.

use std::sync::Arc;

use crossbeam::channel::Sender;
use rustc_hash::FxHashMap;

use crate::message::{ConsoleLevel, TaskId, WorkerReply};
use crate::Value;

/// Surface a task function sees while it runs.
///
/// Carries the task's correlation id, the pool slot of its context, and the
/// console port back to the host. A task's data inputs arrive solely through
/// its arguments; the context exists so output can travel the reply channel
/// without ambient globals.
pub struct TaskContext {
    id: TaskId,
    slot: usize,
    console: Sender<WorkerReply>,
}

impl TaskContext {
    pub(crate) fn new(id: TaskId, slot: usize, console: Sender<WorkerReply>) -> Self {
        Self { id, slot, console }
    }

    /// Correlation id of the running task.
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Pool slot of the context executing this task.
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Relay console entries to the host at the given level.
    pub fn console(&self, level: ConsoleLevel, entries: Vec<Value>) {
        // A detached context can outlive the host side; its output goes
        // nowhere.
        let _ = self.console.send(WorkerReply::Console { level, entries });
    }

    /// Relay a single message at [`ConsoleLevel::Log`].
    pub fn log(&self, message: impl Into<String>) {
        self.console(ConsoleLevel::Log, vec![Value::String(message.into())]);
    }
}

/// A named task function.
///
/// Pure with respect to its arguments; returns the list of values handed to
/// the submitter's callback.
pub type TaskFn = Arc<dyn Fn(&TaskContext, &[Value]) -> Vec<Value> + Send + Sync>;

/// Registry of task functions indexed by worker name.
///
/// Built once before the dispatcher starts and shared immutably with every
/// execution context.
pub struct TaskRegistry {
    tasks: FxHashMap<String, TaskFn>,
}

impl TaskRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            tasks: FxHashMap::default(),
        }
    }

    /// Register a task function by name
    pub fn register(
        &mut self,
        name: &str,
        task: impl Fn(&TaskContext, &[Value]) -> Vec<Value> + Send + Sync + 'static,
    ) {
        self.tasks.insert(name.to_string(), Arc::new(task));
    }

    /// Get a task function by name
    pub fn get(&self, name: &str) -> Option<TaskFn> {
        self.tasks.get(name).cloned()
    }

    /// Check if a task function is registered
    pub fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    /// Get the number of registered task functions
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl Default for TaskRegistry {
    fn default() -> Self {
        Self::new()
    }
}
