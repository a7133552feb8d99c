//! The UI-affinity execution context.
//!
//! The engine performs UI work from the moment it is started, so the start
//! call must happen on one specific, serialized context.  [`UiContext`] models
//! that as a single dedicated OS thread draining a FIFO job queue:
//!
//! ```text
//!  any thread ── run(job) ──► [ unbounded queue ] ──► "veriff-ui" thread
//!                                                    runs jobs one at a time
//! ```
//!
//! The thread exits when [`UiContext::shutdown`] is processed, or once every
//! [`UiContext`] clone has been dropped and the queue is empty.  Jobs queued
//! behind a shutdown are dropped without running.  A panicking job is logged
//! and does not take the thread down with it.

use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, JoinHandle, ThreadId};

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, error};

type UiJob = Box<dyn FnOnce() + Send + 'static>;

enum UiCommand {
    Run(UiJob),
    Stop,
}

/// The UI thread is gone; the job was not queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("UI context is no longer running")]
pub struct UiContextClosed;

/// Handle for queueing work onto the UI thread.  Cheap to clone.
#[derive(Clone)]
pub struct UiContext {
    tx: mpsc::UnboundedSender<UiCommand>,
    thread_id: ThreadId,
}

/// Owner of the UI thread itself, used to wait for it on shutdown.
pub struct UiThread {
    handle: JoinHandle<()>,
}

impl UiContext {
    /// Starts the UI thread.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the thread cannot be spawned.
    pub fn spawn(name: &str) -> std::io::Result<(Self, UiThread)> {
        let (tx, mut rx) = mpsc::unbounded_channel::<UiCommand>();

        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                debug!("UI context started");
                // `blocking_recv` is fine here: this thread never runs async code.
                while let Some(command) = rx.blocking_recv() {
                    let UiCommand::Run(job) = command else {
                        break;
                    };
                    if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
                        error!("UI job panicked; UI context keeps running");
                    }
                }
                debug!("UI context stopped");
            })?;

        let context = Self {
            tx,
            thread_id: handle.thread().id(),
        };
        Ok((context, UiThread { handle }))
    }

    /// Queues `job` to run on the UI thread after all previously queued jobs.
    ///
    /// Returns immediately; it does not wait for `job` to run.
    pub fn run<F>(&self, job: F) -> Result<(), UiContextClosed>
    where
        F: FnOnce() + Send + 'static,
    {
        self.tx
            .send(UiCommand::Run(Box::new(job)))
            .map_err(|_| UiContextClosed)
    }

    /// Asks the UI thread to exit after the jobs queued so far.
    pub fn shutdown(&self) {
        // Already gone is as good as stopped.
        let _ = self.tx.send(UiCommand::Stop);
    }

    pub fn thread_id(&self) -> ThreadId {
        self.thread_id
    }
}

impl UiThread {
    /// Waits for the UI thread to exit.
    ///
    /// Blocks until [`UiContext::shutdown`] is processed or every
    /// [`UiContext`] clone has been dropped.
    pub fn join(self) {
        if self.handle.join().is_err() {
            error!("UI thread terminated abnormally");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::mpsc as std_mpsc;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_jobs_run_on_the_ui_thread() {
        // Arrange
        let (ui, ui_thread) = UiContext::spawn("test-ui").unwrap();
        let (tx, rx) = std_mpsc::channel();

        // Act
        ui.run(move || {
            tx.send(thread::current().id()).unwrap();
        })
        .unwrap();

        // Assert
        let ran_on = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(ran_on, ui.thread_id());
        assert_ne!(ran_on, thread::current().id());

        drop(ui);
        ui_thread.join();
    }

    #[test]
    fn test_jobs_run_in_submission_order() {
        let (ui, ui_thread) = UiContext::spawn("test-ui-order").unwrap();
        let order = Arc::new(Mutex::new(Vec::new()));

        for i in 0..20 {
            let order = Arc::clone(&order);
            ui.run(move || order.lock().unwrap().push(i)).unwrap();
        }
        drop(ui);
        ui_thread.join();

        assert_eq!(*order.lock().unwrap(), (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_panicking_job_does_not_stop_the_context() {
        let (ui, ui_thread) = UiContext::spawn("test-ui-panic").unwrap();
        let (tx, rx) = std_mpsc::channel();

        ui.run(|| panic!("boom")).unwrap();
        ui.run(move || tx.send("still alive").unwrap()).unwrap();

        assert_eq!(
            rx.recv_timeout(Duration::from_secs(5)).unwrap(),
            "still alive"
        );
        drop(ui);
        ui_thread.join();
    }

    #[test]
    fn test_run_after_shutdown_reports_closed() {
        // Arrange
        let (ui, ui_thread) = UiContext::spawn("test-ui-shutdown").unwrap();

        // Act
        ui.shutdown();
        ui_thread.join();

        // Assert: the context handle is still alive but nothing consumes it
        assert_eq!(ui.run(|| {}), Err(UiContextClosed));
    }

    #[test]
    fn test_jobs_behind_shutdown_never_run() {
        let (ui, ui_thread) = UiContext::spawn("test-ui-behind").unwrap();
        let ran = Arc::new(Mutex::new(Vec::new()));

        let before = Arc::clone(&ran);
        ui.run(move || before.lock().unwrap().push("before")).unwrap();
        ui.shutdown();
        let after = Arc::clone(&ran);
        let _ = ui.run(move || after.lock().unwrap().push("after"));
        ui_thread.join();

        assert_eq!(*ran.lock().unwrap(), vec!["before"]);
    }

    #[test]
    fn test_thread_carries_the_given_name() {
        let (ui, ui_thread) = UiContext::spawn("veriff-ui").unwrap();
        let (tx, rx) = std_mpsc::channel();

        ui.run(move || {
            tx.send(thread::current().name().map(str::to_string)).unwrap();
        })
        .unwrap();

        assert_eq!(
            rx.recv_timeout(Duration::from_secs(5)).unwrap().as_deref(),
            Some("veriff-ui")
        );
        drop(ui);
        ui_thread.join();
    }
}
