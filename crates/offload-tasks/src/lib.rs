//! Standard task functions for the offload dispatcher.
//!
//! Each module registers one named task into a
//! [`TaskRegistry`](offload_core::TaskRegistry); hosts call
//! [`register_all`] (or the per-module `register` functions) before
//! constructing the dispatcher.

#![warn(missing_docs)]

pub mod digest;
pub mod primes;

use offload_core::TaskRegistry;

/// Register every standard task function into `registry`.
pub fn register_all(registry: &mut TaskRegistry) {
    digest::register(registry);
    primes::register(registry);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_all() {
        let mut registry = TaskRegistry::new();
        register_all(&mut registry);

        assert!(registry.contains("digest"));
        assert!(registry.contains("primes"));
        assert_eq!(registry.len(), 2);
    }
}
