//! Thread-backed isolated contexts.

use std::sync::Arc;
use std::thread;

use crossbeam::channel::{self, Sender};

use super::{run_task, ContextHandle, ContextPort, ExecutionBackend};
use crate::message::{TaskRequest, WorkerReply};
use crate::registry::TaskRegistry;

/// Backend arming each pool slot with a dedicated worker thread.
///
/// A context shares nothing mutable with the host: it owns its inbox, holds
/// an immutable reference to the function registry, and posts replies to the
/// shared reply channel.
pub struct ThreadBackend {
    registry: Arc<TaskRegistry>,
    reply_tx: Sender<WorkerReply>,
}

impl ThreadBackend {
    pub(crate) fn new(registry: Arc<TaskRegistry>, reply_tx: Sender<WorkerReply>) -> Self {
        Self { registry, reply_tx }
    }
}

impl ExecutionBackend for ThreadBackend {
    fn spawn(&self, slot: usize) -> ContextHandle {
        let (inbox_tx, inbox_rx) = channel::unbounded::<TaskRequest>();
        let registry = self.registry.clone();
        let reply_tx = self.reply_tx.clone();

        thread::Builder::new()
            .name(format!("offload-worker-{}", slot))
            .spawn(move || {
                // Requests execute strictly in arrival order; the loop ends
                // once the handle for this slot is dropped and the inbox
                // disconnects.
                for request in inbox_rx {
                    run_task(&registry, &reply_tx, slot, request);
                }
            })
            .expect("Failed to spawn worker thread");

        ContextHandle::new(slot, ContextPort::Thread(inbox_tx))
    }
}
