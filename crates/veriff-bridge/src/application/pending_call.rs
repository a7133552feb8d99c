//! The host's single outstanding call.
//!
//! A [`PendingCall`] is created per launch and settled exactly once, either by
//! [`reject`](PendingCall::reject) (the session never started) or by
//! [`resolve`](PendingCall::resolve) (the engine reported an outcome).
//! Settling twice is a bug in the bridge or the engine and panics.
//!
//! The host awaits the paired [`PendingReceiver`].  If every handle to the
//! call is dropped unsettled, the receiver reports
//! [`PendingCallAbandoned`] so the host is never left waiting forever.
//!
//! A call may hold a [`SessionLease`].  The lease is released when the call
//! settles or when the last handle to it is dropped, whichever comes first,
//! and never after the host has been woken.  Dropping the host's receiver
//! does not release it.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};

use thiserror::Error;
use tokio::sync::oneshot;
use tracing::debug;
use uuid::Uuid;
use veriff_core::{Rejection, ResultPayload};

/// What the host ultimately receives: resolve or reject.
pub type CallOutcome = Result<ResultPayload, Rejection>;

/// Every handle to the pending call was dropped before it was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("pending call dropped without being settled")]
pub struct PendingCallAbandoned;

/// Exclusive claim on a shared "session in flight" flag.
///
/// The flag is cleared when the lease is dropped.
#[derive(Debug)]
pub struct SessionLease(Arc<AtomicBool>);

impl SessionLease {
    /// Sets `flag`, or returns `None` if another lease already holds it.
    pub fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for SessionLease {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Single-settlement slot shared between the bridge and the engine completion.
#[derive(Debug)]
pub struct PendingCall {
    launch_id: Uuid,
    // Declared before `slot` so an abandoned call frees the lease before the
    // receiver observes the dropped sender.
    lease: Mutex<Option<SessionLease>>,
    slot: Mutex<Option<oneshot::Sender<CallOutcome>>>,
}

/// The host's side of a [`PendingCall`].
#[derive(Debug)]
pub struct PendingReceiver {
    rx: oneshot::Receiver<CallOutcome>,
}

impl PendingCall {
    /// Creates a call for `launch_id` together with the host's receiver.
    pub fn new(launch_id: Uuid) -> (Arc<Self>, PendingReceiver) {
        Self::create(launch_id, None)
    }

    /// Like [`new`](Self::new), but keeps `lease` until the call settles or
    /// every handle to it is gone.
    pub fn leased(launch_id: Uuid, lease: SessionLease) -> (Arc<Self>, PendingReceiver) {
        Self::create(launch_id, Some(lease))
    }

    fn create(launch_id: Uuid, lease: Option<SessionLease>) -> (Arc<Self>, PendingReceiver) {
        let (tx, rx) = oneshot::channel();
        let call = Arc::new(Self {
            launch_id,
            lease: Mutex::new(lease),
            slot: Mutex::new(Some(tx)),
        });
        (call, PendingReceiver { rx })
    }

    pub fn launch_id(&self) -> Uuid {
        self.launch_id
    }

    /// Fulfils the call with an engine outcome.
    ///
    /// # Panics
    ///
    /// Panics if the call was already settled.
    pub fn resolve(&self, payload: ResultPayload) {
        self.settle(Ok(payload));
    }

    /// Fails the call before the engine was started.
    ///
    /// # Panics
    ///
    /// Panics if the call was already settled.
    pub fn reject(&self, rejection: Rejection) {
        self.settle(Err(rejection));
    }

    pub fn is_settled(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    fn settle(&self, outcome: CallOutcome) {
        let sender = self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        let Some(sender) = sender else {
            panic!(
                "pending call for launch {} settled more than once",
                self.launch_id
            );
        };

        // Free the lease first: a host woken by the send may launch again.
        drop(self.lease.lock().unwrap_or_else(PoisonError::into_inner).take());

        if sender.send(outcome).is_err() {
            debug!("host stopped waiting for launch {}", self.launch_id);
        }
    }
}

impl Future for PendingReceiver {
    type Output = Result<CallOutcome, PendingCallAbandoned>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|result| result.map_err(|_| PendingCallAbandoned))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
