//! Wire messages exchanged between the host and worker contexts.

use serde::{Deserialize, Serialize};

use crate::Value;

/// Unique identifier pairing a submitted task with its eventual result.
///
/// Allocated from a monotonically increasing counter owned by the dispatcher,
/// so an id is never reused among pending tasks.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Create a TaskId from a raw counter value.
    pub fn from_u64(id: u64) -> Self {
        TaskId(id)
    }

    /// Get the numeric id value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "task-{}", self.0)
    }
}

/// A unit of work bound for an execution context.
///
/// Immutable after creation and sent exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRequest {
    /// Correlation id
    pub id: TaskId,

    /// Name of the registered task function
    pub worker: String,

    /// Arguments forwarded to the task function
    pub args: Vec<Value>,
}

/// Completion report for one task request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResult {
    /// Correlation id of the originating request
    pub id: TaskId,

    /// Task function that produced the results
    pub worker: String,

    /// Values handed to the submitter's callback
    pub results: Vec<Value>,

    /// Wall time spent executing, in milliseconds
    pub time_ms: u64,
}

/// Severity of a relayed console entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleLevel {
    /// Plain output
    Log,
    /// Informational output
    Info,
    /// Error output
    Error,
    /// Debug output
    Debug,
}

/// Message posted by an execution context back to the host.
///
/// Console entries share the transport with results; the tag keeps the two
/// apart so a log line can never resolve a pending task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WorkerReply {
    /// A finished task
    Result(TaskResult),

    /// Diagnostic output produced inside the context
    Console {
        /// Severity
        level: ConsoleLevel,
        /// Entries, in argument order
        entries: Vec<Value>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_id_display() {
        let id = TaskId::from_u64(42);
        assert_eq!(id.to_string(), "task-42");
        assert_eq!(id.as_u64(), 42);
    }

    #[test]
    fn test_reply_tag_separates_console_from_result() {
        let reply: WorkerReply =
            serde_json::from_str(r#"{"kind":"console","level":"error","entries":["boom"]}"#)
                .unwrap();
        assert!(matches!(
            reply,
            WorkerReply::Console {
                level: ConsoleLevel::Error,
                ..
            }
        ));

        let reply: WorkerReply = serde_json::from_str(
            r#"{"kind":"result","id":7,"worker":"double","results":[14],"time_ms":3}"#,
        )
        .unwrap();
        match reply {
            WorkerReply::Result(result) => {
                assert_eq!(result.id, TaskId::from_u64(7));
                assert_eq!(result.worker, "double");
                assert_eq!(result.results, vec![Value::from(14)]);
            }
            WorkerReply::Console { .. } => panic!("console reply decoded as result"),
        }
    }

    #[test]
    fn test_request_round_trips_as_json() {
        let request = TaskRequest {
            id: TaskId::from_u64(1),
            worker: "primes".to_string(),
            args: vec![Value::from(1), Value::from(100)],
        };
        let json = serde_json::to_string(&request).unwrap();
        let decoded: TaskRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.id, request.id);
        assert_eq!(decoded.worker, request.worker);
        assert_eq!(decoded.args, request.args);
    }
}
