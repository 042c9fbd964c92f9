//! Serial UI queue.
//!
//! Completions produced on worker threads are posted through a cloneable
//! [`UiHandle`] and run, one at a time and in posting order, by whichever
//! thread owns the single [`UiQueue`]. That thread is "the UI thread" as far
//! as mdview is concerned.
//!
//! # Example
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use mdview_core::ui;
//!
//! let (handle, mut queue) = ui::channel();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let log = Arc::clone(&seen);
//! std::thread::spawn(move || {
//!     handle.post(move || log.lock().unwrap().push("done"));
//! })
//! .join()
//! .unwrap();
//!
//! assert!(queue.run_next());
//! assert_eq!(*seen.lock().unwrap(), vec!["done"]);
//! ```

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender, error::TryRecvError};

/// A unit of work to run on the UI thread.
pub type UiTask = Box<dyn FnOnce() + Send + 'static>;

/// Create a connected handle/queue pair.
pub fn channel() -> (UiHandle, UiQueue) {
    let (tx, rx) = mpsc::unbounded_channel();
    (UiHandle { tx }, UiQueue { rx })
}

/// Posts tasks onto the UI queue. Cheap to clone and `Send`.
#[derive(Clone, Debug)]
pub struct UiHandle {
    tx: UnboundedSender<UiTask>,
}

impl UiHandle {
    /// Post `task` to run on the UI thread.
    ///
    /// Returns `false` if the queue has been dropped; the task is then
    /// discarded without running.
    pub fn post<F>(&self, task: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        self.tx.send(Box::new(task)).is_ok()
    }

    /// Whether the receiving [`UiQueue`] has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiving end of the UI queue, owned by the UI thread.
#[derive(Debug)]
pub struct UiQueue {
    rx: UnboundedReceiver<UiTask>,
}

impl UiQueue {
    /// Run every task that is already queued, without blocking.
    ///
    /// Returns the number of tasks run.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        loop {
            match self.rx.try_recv() {
                Ok(task) => {
                    task();
                    ran += 1;
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return ran,
            }
        }
    }

    /// Block until one task arrives and run it.
    ///
    /// Returns `false` once every [`UiHandle`] is gone and the queue is
    /// drained. Must not be called from inside an async context; use
    /// [`next`](Self::next) there.
    pub fn run_next(&mut self) -> bool {
        match self.rx.blocking_recv() {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }

    /// Await one task and run it.
    ///
    /// Returns `false` once every [`UiHandle`] is gone and the queue is
    /// drained.
    pub async fn next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }

    /// Number of tasks waiting to run.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// Whether no task is waiting.
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}
