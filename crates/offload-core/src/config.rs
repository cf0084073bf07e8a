//! Dispatcher configuration.

/// Number of worker contexts created when no pool size is specified.
pub const DEFAULT_POOL_SIZE: usize = 6;

/// How task requests are executed.
///
/// Selected once at dispatcher construction; there is no runtime detection of
/// the environment.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Each context is an isolated worker thread fed over a channel.
    #[default]
    Threaded,

    /// Isolation disabled: requests execute synchronously in the caller's
    /// stack and callbacks fire before `submit` returns.
    Inline,
}

/// Configuration for a [`Dispatcher`](crate::Dispatcher).
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Number of worker contexts to create at startup.
    ///
    /// Ignored in [`ExecutionMode::Inline`], where the pool collapses to a
    /// single synchronous context.
    pub pool_size: usize,

    /// Execution mode.
    pub mode: ExecutionMode,
}

impl DispatcherConfig {
    /// Configuration with an explicit pool size.
    pub fn with_pool_size(pool_size: usize) -> Self {
        Self {
            pool_size,
            ..Self::default()
        }
    }

    /// Configuration sized to the number of CPU cores.
    pub fn per_cpu() -> Self {
        Self::with_pool_size(num_cpus::get())
    }

    /// Disable isolation: a single context executing in the caller's stack.
    pub fn inline() -> Self {
        Self {
            pool_size: 1,
            mode: ExecutionMode::Inline,
        }
    }
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
            mode: ExecutionMode::Threaded,
        }
    }
}
