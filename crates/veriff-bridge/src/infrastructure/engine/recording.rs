//! Recording engine for tests.
//!
//! # Why a recording engine?
//!
//! The vendor engine opens camera and microphone, renders UI, and talks to
//! its backend, none of which can run in a unit test.  `RecordingEngine`
//! replaces all of that with a queue: each `start` pushes a
//! [`RecordedLaunch`] that the test pops and completes by hand.
//!
//! # Usage in tests
//!
//! ```ignore
//! let engine = Arc::new(RecordingEngine::new());
//! // ... launch through the bridge ...
//!
//! let launch = engine.next_launch().await.unwrap();
//! assert_eq!(launch.session_url, "https://magic.veriff.me/s1");
//! launch.complete(EngineResult::Done);
//! ```
//!
//! Dropping a [`RecordedLaunch`] without completing it simulates an engine
//! that loses its completion handler.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::{self, ThreadId};

use tokio::sync::{mpsc, Mutex};
use tracing::debug;
use veriff_core::EngineResult;

use crate::application::{CompletionHandler, EngineConfiguration, VerificationEngine};

/// One captured `start` call.
pub struct RecordedLaunch {
    pub session_url: String,
    pub configuration: EngineConfiguration,
    /// Thread `start` was called on.
    pub thread_id: ThreadId,
    on_complete: CompletionHandler,
}

impl RecordedLaunch {
    /// Reports `result` to the bridge, as the engine would.
    pub fn complete(self, result: EngineResult) {
        (self.on_complete)(result);
    }
}

impl fmt::Debug for RecordedLaunch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordedLaunch")
            .field("session_url", &self.session_url)
            .field("configuration", &self.configuration)
            .field("thread_id", &self.thread_id)
            .finish_non_exhaustive()
    }
}

/// An engine that records starts instead of running a flow.
pub struct RecordingEngine {
    launches: AtomicUsize,
    tx: mpsc::UnboundedSender<RecordedLaunch>,
    rx: Mutex<mpsc::UnboundedReceiver<RecordedLaunch>>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            launches: AtomicUsize::new(0),
            tx,
            rx: Mutex::new(rx),
        }
    }

    /// Number of times `start` has been called.
    pub fn launch_count(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }

    /// Waits for the next recorded start.
    pub async fn next_launch(&self) -> Option<RecordedLaunch> {
        self.rx.lock().await.recv().await
    }

    /// The next recorded start, if one is already queued.
    pub fn try_next_launch(&self) -> Option<RecordedLaunch> {
        self.rx.try_lock().ok()?.try_recv().ok()
    }
}

impl Default for RecordingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl VerificationEngine for RecordingEngine {
    fn start(&self, session_url: &str, configuration: EngineConfiguration, on_complete: CompletionHandler) {
        self.launches.fetch_add(1, Ordering::SeqCst);
        debug!("recording engine start for {session_url}");
        // The receiver lives as long as `self`, so this cannot fail.
        let _ = self.tx.send(RecordedLaunch {
            session_url: session_url.to_string(),
            configuration,
            thread_id: thread::current().id(),
            on_complete,
        });
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex as StdMutex};

    use veriff_core::BrandingDescriptor;

    use super::*;

    fn configuration() -> EngineConfiguration {
        EngineConfiguration {
            branding: BrandingDescriptor::default(),
            locale: None,
            custom_intro_screen: false,
            query_items: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_start_is_recorded_and_counted() {
        // Arrange
        let engine = RecordingEngine::new();

        // Act
        engine.start("https://x/1", configuration(), Box::new(|_| {}));
        engine.start("https://x/2", configuration(), Box::new(|_| {}));

        // Assert
        assert_eq!(engine.launch_count(), 2);
        assert_eq!(engine.next_launch().await.unwrap().session_url, "https://x/1");
        assert_eq!(engine.next_launch().await.unwrap().session_url, "https://x/2");
        assert!(engine.try_next_launch().is_none());
    }

    #[test]
    fn test_complete_invokes_the_handler() {
        let engine = RecordingEngine::new();
        let seen = Arc::new(StdMutex::new(None));
        let slot = Arc::clone(&seen);
        engine.start(
            "https://x/1",
            configuration(),
            Box::new(move |result| *slot.lock().unwrap() = Some(result)),
        );

        engine.try_next_launch().unwrap().complete(EngineResult::Canceled);

        assert_eq!(*seen.lock().unwrap(), Some(EngineResult::Canceled));
    }

    #[test]
    fn test_records_calling_thread() {
        let engine = RecordingEngine::new();

        engine.start("https://x/1", configuration(), Box::new(|_| {}));

        assert_eq!(engine.try_next_launch().unwrap().thread_id, thread::current().id());
    }
}
