//! Standard tasks driven through a live dispatcher.

use std::sync::Arc;
use std::sync::mpsc;
use std::time::Duration;

use offload_core::{Dispatcher, DispatcherConfig, TaskRegistry, Value};

fn dispatcher(config: DispatcherConfig) -> Dispatcher {
    let mut registry = TaskRegistry::new();
    offload_tasks::register_all(&mut registry);
    Dispatcher::new(Arc::new(registry), config).unwrap()
}

#[test]
fn test_primes_through_worker_pool() {
    let dispatcher = dispatcher(DispatcherConfig::with_pool_size(2));
    let (tx, rx) = mpsc::channel();

    dispatcher.submit(
        "primes",
        vec![Value::from(1), Value::from(30)],
        move |results| {
            let _ = tx.send(results);
        },
    );

    let results = rx.recv_timeout(Duration::from_secs(2)).unwrap();
    assert_eq!(
        results,
        vec![Value::from(vec![2i64, 3, 5, 7, 11, 13, 17, 19, 23, 29])]
    );
}

#[test]
fn test_digest_in_fallback_mode() {
    let dispatcher = dispatcher(DispatcherConfig::inline());
    let (tx, rx) = mpsc::channel();

    dispatcher.submit(
        "digest",
        vec![Value::from("sha256"), Value::from("abc")],
        move |results| {
            let _ = tx.send(results);
        },
    );

    // Inline mode delivered before submit returned.
    let results = rx.try_recv().unwrap();
    assert_eq!(
        results,
        vec![Value::from(
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        )]
    );
}

#[test]
fn test_unsupported_digest_yields_no_results() {
    let dispatcher = dispatcher(DispatcherConfig::inline());
    let (tx, rx) = mpsc::channel();

    dispatcher.submit(
        "digest",
        vec![Value::from("md5"), Value::from("abc")],
        move |results| {
            let _ = tx.send(results);
        },
    );

    // The task completes with an empty result list.
    assert_eq!(rx.try_recv().unwrap(), Vec::<Value>::new());
}
