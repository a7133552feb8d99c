//! SessionLauncher: hands resolved descriptors to the engine.
//!
//! The launcher:
//!
//! 1. Waits for a pending remote logo (if any) and attaches it to the
//!    branding, so logo attachment never races the engine start.
//! 2. Registers the completion handler that translates the engine outcome
//!    and resolves the [`PendingCall`].
//! 3. Dispatches `start` onto the [`UiContext`] and returns without waiting
//!    for the engine.  If the UI context drops the start without running it,
//!    the call is rejected with `UI_CONTEXT_NOT_ATTACHED`.
//!
//! The engine is reached only through the [`VerificationEngine`] trait;
//! concrete engines live in the infrastructure layer.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};
use veriff_core::{
    translate, BrandingDescriptor, EngineResult, QueryItem, Rejection, SessionDescriptor,
};

use crate::application::pending_call::PendingCall;
use crate::infrastructure::{AssetResolver, UiContext, UiContextClosed};

/// Single-shot callback the engine invokes with its outcome.
pub type CompletionHandler = Box<dyn FnOnce(EngineResult) + Send + 'static>;

/// Everything the engine needs besides the session URL.
#[derive(Debug, Clone)]
pub struct EngineConfiguration {
    pub branding: BrandingDescriptor,
    pub locale: Option<String>,
    pub custom_intro_screen: bool,
    pub query_items: Vec<QueryItem>,
}

impl EngineConfiguration {
    pub fn new(session: &SessionDescriptor, branding: BrandingDescriptor) -> Self {
        Self {
            branding,
            locale: session.locale().map(str::to_string),
            custom_intro_screen: session.custom_intro_screen(),
            query_items: session.query_items().to_vec(),
        }
    }
}

/// The embedded verification engine.
///
/// `start` is always called on the UI context.  The engine must call
/// `on_complete` at most once; dropping it without calling it is reported
/// to the host as `UNKNOWN_ERROR`.
pub trait VerificationEngine: Send + Sync {
    fn start(&self, session_url: &str, configuration: EngineConfiguration, on_complete: CompletionHandler);
}

/// Error type for the launch use case.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("cannot start engine: {0}")]
    UiContext(#[from] UiContextClosed),
}

impl From<LaunchError> for Rejection {
    fn from(err: LaunchError) -> Self {
        match err {
            LaunchError::UiContext(_) => Rejection::ui_context_not_attached(),
        }
    }
}

/// Rejects the call when the start job is dropped before it runs.
struct PendingStart {
    call: Option<Arc<PendingCall>>,
}

impl PendingStart {
    fn new(call: &Arc<PendingCall>) -> Self {
        Self {
            call: Some(Arc::clone(call)),
        }
    }

    /// The start is running; from here on the completion owns the call.
    fn disarm(mut self) {
        self.call = None;
    }
}

impl Drop for PendingStart {
    fn drop(&mut self) {
        if let Some(call) = self.call.take() {
            warn!("UI context dropped the engine start before it ran");
            call.reject(LaunchError::UiContext(UiContextClosed).into());
        }
    }
}

/// Starts verification sessions on the UI context.
pub struct SessionLauncher {
    engine: Arc<dyn VerificationEngine>,
    assets: Arc<AssetResolver>,
    ui: UiContext,
}

impl SessionLauncher {
    pub fn new(engine: Arc<dyn VerificationEngine>, assets: Arc<AssetResolver>, ui: UiContext) -> Self {
        Self { engine, assets, ui }
    }

    /// Launches one session whose outcome will resolve `call`.
    ///
    /// Returns once the start has been queued on the UI context.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError::UiContext`] if the UI context has shut down.
    /// The engine was not started and `call` has already been rejected.
    pub async fn launch(
        &self,
        session: SessionDescriptor,
        branding: BrandingDescriptor,
        call: Arc<PendingCall>,
    ) -> Result<(), LaunchError> {
        let branding = self.attach_remote_logo(branding).await;
        let configuration = EngineConfiguration::new(&session, branding);
        let session_url = session.session_url().to_string();

        let pending_start = PendingStart::new(&call);
        let on_complete: CompletionHandler = Box::new(move |result: EngineResult| {
            let payload = translate(result);
            info!("engine finished with {result}; status {}", payload.status.as_str());
            call.resolve(payload);
        });

        let engine = Arc::clone(&self.engine);
        self.ui.run(move || {
            pending_start.disarm();
            debug!("starting engine for {session_url}");
            engine.start(&session_url, configuration, on_complete);
        })?;

        Ok(())
    }

    async fn attach_remote_logo(&self, branding: BrandingDescriptor) -> BrandingDescriptor {
        let Some(url) = branding.pending_remote_logo().cloned() else {
            return branding;
        };

        let (tx, rx) = oneshot::channel();
        self.assets.resolve_remote(url, move |image| {
            let _ = tx.send(image);
        });

        // The resolver always completes; a closed channel still means "no image".
        let image = rx.await.unwrap_or(None);
        branding.with_resolved_logo(image)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
