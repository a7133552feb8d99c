//! VerificationBridge: the host-facing entry point.
//!
//! [`VerificationBridge::launch_verification`] is the one call a host makes.
//! It resolves to either:
//!
//! - `Err(Rejection)` when the session could not even start (invalid
//!   configuration, another session in flight, no UI context), or
//! - `Ok(ResultPayload)` once the engine has reported, however the session
//!   ended.
//!
//! ```text
//! host ── launch_verification(map) ─┐
//!                                   ▼
//!             ConfigResolver ── reject? ──► Err(Rejection)
//!                   │
//!             SessionLauncher ──► UI context ──► engine.start
//!                                                   │
//!             PendingCall ◄── translate(result) ◄───┘
//!                   │
//! host ◄──── Ok(ResultPayload)
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;
use veriff_core::{ErrorCode, Rejection, ResultPayload};

use crate::application::launch_session::{SessionLauncher, VerificationEngine};
use crate::application::pending_call::{
    CallOutcome, PendingCall, PendingCallAbandoned, SessionLease,
};
use crate::application::resolve_config::{ConfigResolver, ResolveError, ResolvedConfiguration};
use crate::domain::BridgeSettings;
use crate::infrastructure::{AssetResolver, UiContext};

/// Runs at most one verification session at a time.
///
/// A session counts as in flight until the engine reports or drops its
/// completion, even if the host stops waiting for it.
pub struct VerificationBridge {
    resolver: ConfigResolver,
    launcher: SessionLauncher,
    in_flight: Arc<AtomicBool>,
}

impl VerificationBridge {
    pub fn new(
        settings: &BridgeSettings,
        engine: Arc<dyn VerificationEngine>,
        assets: Arc<AssetResolver>,
        ui: UiContext,
    ) -> Self {
        Self {
            resolver: ConfigResolver::new(&settings.session, Arc::clone(&assets)),
            launcher: SessionLauncher::new(engine, assets, ui),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Validates `configuration` without launching anything.
    ///
    /// # Errors
    ///
    /// See [`ResolveError`].
    pub fn resolve_configuration(
        &self,
        configuration: &Value,
    ) -> Result<ResolvedConfiguration, ResolveError> {
        self.resolver.resolve(configuration)
    }

    /// `true` while a session launched by this bridge is outstanding.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Launches a verification session and waits for its outcome.
    ///
    /// Settles exactly once per call.  A second call while one is outstanding
    /// is rejected with `SESSION_IN_PROGRESS` and does not affect the first.
    pub async fn launch_verification(&self, configuration: &Value) -> CallOutcome {
        let launch_id = Uuid::new_v4();
        self.run_launch(launch_id, configuration)
            .instrument(info_span!("launch", %launch_id))
            .await
    }

    async fn run_launch(&self, launch_id: Uuid, configuration: &Value) -> CallOutcome {
        let Some(lease) = SessionLease::acquire(&self.in_flight) else {
            warn!("a verification session is already in progress");
            return Err(Rejection::session_in_progress());
        };

        // The call carries the lease, so it stays taken for as long as the
        // engine can still report, even if this future is dropped.
        let (call, receiver) = PendingCall::leased(launch_id, lease);

        match self.resolver.resolve(configuration) {
            Ok(resolved) => {
                info!("launching session {}", resolved.session.session_url());
                let launched = self
                    .launcher
                    .launch(resolved.session, resolved.branding, Arc::clone(&call))
                    .await;
                if let Err(err) = launched {
                    // The launcher has already rejected the call.
                    error!("{err}");
                }
            }
            Err(err) => {
                warn!("invalid configuration: {err}");
                call.reject(err.into());
            }
        }

        // Only the engine's completion may hold the call from here on, so an
        // engine that drops it unblocks the receiver below.
        drop(call);

        match receiver.await {
            Ok(outcome) => outcome,
            Err(PendingCallAbandoned) => {
                error!("engine dropped its completion handler without reporting an outcome");
                Ok(ResultPayload::error(ErrorCode::UnknownError))
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
