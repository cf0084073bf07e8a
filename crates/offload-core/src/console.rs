//! Host-side relay of console entries produced inside execution contexts.

use crate::message::ConsoleLevel;
use crate::Value;

/// Re-emit a context's console entries through the host log.
pub(crate) fn relay(level: ConsoleLevel, entries: &[Value]) {
    let line = entries.iter().map(render).collect::<Vec<_>>().join(" ");
    match level {
        ConsoleLevel::Log | ConsoleLevel::Info => {
            tracing::info!(target: "offload::console", "{line}");
        }
        ConsoleLevel::Error => tracing::error!(target: "offload::console", "{line}"),
        ConsoleLevel::Debug => tracing::debug!(target: "offload::console", "{line}"),
    }
}

/// Display form of one console entry. Strings print bare, everything else as
/// compact JSON.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_strings_bare() {
        assert_eq!(render(&Value::from("plain")), "plain");
    }

    #[test]
    fn test_render_values_as_json() {
        assert_eq!(render(&Value::from(7)), "7");
        assert_eq!(
            render(&serde_json::json!({ "a": 1 })),
            r#"{"a":1}"#
        );
    }
}
