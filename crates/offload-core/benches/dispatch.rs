//! Submit-to-completion round-trip benchmarks.

use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use crossbeam::channel;
use offload_core::{Dispatcher, DispatcherConfig, TaskRegistry, Value};

fn double_registry() -> Arc<TaskRegistry> {
    let mut registry = TaskRegistry::new();
    registry.register("double", |_ctx, args| {
        let n = args.first().and_then(Value::as_i64).unwrap_or(0);
        vec![Value::from(n * 2)]
    });
    Arc::new(registry)
}

fn bench_round_trip(c: &mut Criterion) {
    let registry = double_registry();

    c.bench_function("inline_round_trip", |b| {
        let dispatcher = Dispatcher::new(registry.clone(), DispatcherConfig::inline()).unwrap();
        b.iter(|| {
            let (tx, rx) = channel::bounded(1);
            dispatcher.submit("double", vec![Value::from(21)], move |results| {
                let _ = tx.send(results);
            });
            rx.recv().unwrap()
        });
    });

    c.bench_function("threaded_round_trip", |b| {
        let dispatcher =
            Dispatcher::new(registry.clone(), DispatcherConfig::with_pool_size(2)).unwrap();
        b.iter(|| {
            let (tx, rx) = channel::bounded(1);
            dispatcher.submit("double", vec![Value::from(21)], move |results| {
                let _ = tx.send(results);
            });
            rx.recv().unwrap()
        });
    });
}

criterion_group!(benches, bench_round_trip);
criterion_main!(benches);
