//! Shared worker pool for blocking load work.
//!
//! [`WorkerPool`] wraps a multi-threaded `tokio` runtime whose blocking pool
//! runs read-and-convert units. The runtime is built on the first spawn, not
//! at construction, so an application that never loads a document never
//! starts a thread. Idle blocking threads exit after
//! [`PoolConfig::keep_alive`].
//!
//! The pool is shared by `Arc`; nothing tears it down automatically while a
//! handle is alive. [`WorkerPool::shutdown`] is the explicit, idempotent
//! teardown.
//!
//! # Example
//!
//! ```
//! use std::sync::mpsc;
//! use mdview_core::{PoolConfig, WorkerPool};
//!
//! let pool = WorkerPool::new(PoolConfig::default());
//! assert!(!pool.is_started());
//!
//! let (tx, rx) = mpsc::channel();
//! pool.spawn_blocking(move || tx.send(21 * 2).unwrap()).unwrap();
//! assert_eq!(rx.recv().unwrap(), 42);
//!
//! pool.shutdown();
//! pool.shutdown(); // idempotent
//! assert!(pool.spawn_blocking(|| ()).is_err());
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, info};
use tokio::runtime::{Builder, Runtime};

use crate::config::PoolConfig;
use crate::{Error, Result};

enum PoolState {
    Idle,
    Running(Runtime),
    ShutDown,
}

/// Lazily started pool that runs blocking units off the UI thread.
pub struct WorkerPool {
    config: PoolConfig,
    state: Mutex<PoolState>,
}

impl WorkerPool {
    /// Create a pool. No threads are started until the first spawn.
    pub fn new(config: PoolConfig) -> Self {
        Self {
            config,
            state: Mutex::new(PoolState::Idle),
        }
    }

    /// The pool's configuration.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Run `task` on a pool thread.
    ///
    /// Starts the runtime on first use. The task runs to completion on one
    /// thread; there is no cancellation and no timeout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PoolShutdown`] after [`shutdown`](Self::shutdown),
    /// or an I/O error if the runtime cannot be started.
    pub fn spawn_blocking<F>(&self, task: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let mut state = self.lock();
        if matches!(*state, PoolState::Idle) {
            *state = PoolState::Running(self.build_runtime()?);
            debug!(
                "Started worker pool '{}' (max {} threads)",
                self.config.thread_name, self.config.max_threads
            );
        }

        match &*state {
            PoolState::Running(runtime) => {
                drop(runtime.spawn_blocking(task));
                Ok(())
            }
            PoolState::Idle | PoolState::ShutDown => Err(Error::PoolShutdown),
        }
    }

    /// Whether the runtime has been started and not yet shut down.
    pub fn is_started(&self) -> bool {
        matches!(*self.lock(), PoolState::Running(_))
    }

    /// Whether [`shutdown`](Self::shutdown) has been called.
    pub fn is_shutdown(&self) -> bool {
        matches!(*self.lock(), PoolState::ShutDown)
    }

    /// Shut the pool down.
    ///
    /// Waits up to [`PoolConfig::shutdown_timeout`] for in-flight units.
    /// Safe to call when the pool was never started or is already shut
    /// down. Must not be called from inside an async context.
    pub fn shutdown(&self) {
        let previous = std::mem::replace(&mut *self.lock(), PoolState::ShutDown);
        match previous {
            PoolState::Running(runtime) => {
                runtime.shutdown_timeout(self.config.shutdown_timeout());
                info!("Worker pool '{}' shut down", self.config.thread_name);
            }
            PoolState::Idle => debug!("Worker pool was never started"),
            PoolState::ShutDown => debug!("Worker pool already shut down"),
        }
    }

    fn build_runtime(&self) -> Result<Runtime> {
        Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(self.config.max_threads.max(1))
            .thread_keep_alive(self.config.keep_alive())
            .thread_name(self.config.thread_name.clone())
            .build()
            .map_err(Error::from)
    }

    fn lock(&self) -> MutexGuard<'_, PoolState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match *self.lock() {
            PoolState::Idle => "idle",
            PoolState::Running(_) => "running",
            PoolState::ShutDown => "shut down",
        };
        f.debug_struct("WorkerPool")
            .field("thread_name", &self.config.thread_name)
            .field("state", &state)
            .finish()
    }
}
