//! Synchronous same-stack execution, for hosts without isolation support.

use std::sync::Arc;

use crossbeam::channel::Sender;

use super::{run_task, ContextHandle, ContextPort, ExecutionBackend};
use crate::message::{TaskRequest, WorkerReply};
use crate::registry::TaskRegistry;

/// Synchronous stand-in for an isolated context.
///
/// `run` executes the request in the caller's stack and posts the reply
/// before returning, so the dispatcher observes the same send/receive
/// contract as with a real context.
#[derive(Clone)]
pub(crate) struct InlineRunner {
    registry: Arc<TaskRegistry>,
    reply_tx: Sender<WorkerReply>,
}

impl InlineRunner {
    pub(crate) fn run(&self, slot: usize, request: TaskRequest) {
        run_task(&self.registry, &self.reply_tx, slot, request);
    }
}

/// Backend used when isolation is disabled: every slot is a synchronous
/// stand-in and the pool collapses to a single context.
pub struct InlineBackend {
    registry: Arc<TaskRegistry>,
    reply_tx: Sender<WorkerReply>,
}

impl InlineBackend {
    pub(crate) fn new(registry: Arc<TaskRegistry>, reply_tx: Sender<WorkerReply>) -> Self {
        Self { registry, reply_tx }
    }
}

impl ExecutionBackend for InlineBackend {
    fn spawn(&self, slot: usize) -> ContextHandle {
        ContextHandle::new(
            slot,
            ContextPort::Inline(InlineRunner {
                registry: self.registry.clone(),
                reply_tx: self.reply_tx.clone(),
            }),
        )
    }
}
