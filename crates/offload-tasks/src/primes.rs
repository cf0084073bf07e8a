//! Prime range task.
//!
//! `primes` takes `[from, to]` and returns one result: the primes in the
//! inclusive range. Usage from a host:
//! `submit("primes", [1, 100], |results| ...)`.

use offload_core::{TaskRegistry, Value};

/// Register the `primes` task function.
pub fn register(registry: &mut TaskRegistry) {
    registry.register("primes", |_ctx, args| {
        let from = args.first().and_then(Value::as_i64).unwrap_or(0);
        let to = args.get(1).and_then(Value::as_i64).unwrap_or(0);
        vec![Value::from(primes_in_range(from, to))]
    });
}

/// Prime numbers in the inclusive range `[from, to]`.
pub fn primes_in_range(from: i64, to: i64) -> Vec<i64> {
    let mut primes = Vec::new();
    for n in from.max(2)..=to {
        if is_prime(n) {
            primes.push(n);
        }
    }
    primes
}

fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    let mut i = 2;
    while i * i <= n {
        if n % i == 0 {
            return false;
        }
        i += 1;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primes_below_hundred() {
        let primes = primes_in_range(1, 100);
        assert_eq!(primes.len(), 25);
        assert_eq!(primes.first(), Some(&2));
        assert_eq!(primes.last(), Some(&97));
    }

    #[test]
    fn test_primes_narrow_ranges() {
        assert_eq!(primes_in_range(14, 16), Vec::<i64>::new());
        assert_eq!(primes_in_range(17, 17), vec![17]);
        assert_eq!(primes_in_range(10, 2), Vec::<i64>::new());
    }

    #[test]
    fn test_primes_excludes_one() {
        assert_eq!(primes_in_range(1, 2), vec![2]);
    }
}
