//! Worker pool: idle context handles for a fixed set of slots.

use std::collections::VecDeque;

use crate::context::ContextHandle;

/// Fixed-size pool of execution contexts.
///
/// Only idle handles live here; a busy handle is owned by the pending record
/// of the task running on it. Idle handles are reused in FIFO order.
pub struct WorkerPool {
    idle: VecDeque<ContextHandle>,
    size: usize,
}

impl WorkerPool {
    /// Create a pool for `size` slots with no idle handles yet.
    pub(crate) fn new(size: usize) -> Self {
        Self {
            idle: VecDeque::with_capacity(size),
            size,
        }
    }

    /// Pop one idle handle if any is available. Never blocks.
    pub(crate) fn acquire_idle(&mut self) -> Option<ContextHandle> {
        self.idle.pop_front()
    }

    /// Return a handle to the idle set.
    pub(crate) fn release(&mut self, handle: ContextHandle) {
        debug_assert!(self.idle.len() < self.size);
        self.idle.push_back(handle);
    }

    /// Drop every idle handle, detaching the contexts behind them.
    pub(crate) fn clear(&mut self) {
        self.idle.clear();
    }

    /// Number of idle handles.
    pub fn idle_count(&self) -> usize {
        self.idle.len()
    }

    /// Fixed number of slots.
    pub fn size(&self) -> usize {
        self.size
    }
}
