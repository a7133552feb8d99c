//! Scripted engine: every session ends with a preset outcome.

use std::time::Duration;

use tokio::runtime::Handle;
use tracing::info;
use veriff_core::EngineResult;

use crate::application::{CompletionHandler, EngineConfiguration, VerificationEngine};

/// Completes each session with `outcome` after `delay`.
///
/// `start` runs on the UI thread, which has no Tokio runtime of its own, so
/// the engine keeps a [`Handle`] to schedule its completion.
#[derive(Debug, Clone)]
pub struct ScriptedEngine {
    outcome: EngineResult,
    delay: Duration,
    runtime: Handle,
}

impl ScriptedEngine {
    pub fn new(outcome: EngineResult, delay: Duration, runtime: Handle) -> Self {
        Self {
            outcome,
            delay,
            runtime,
        }
    }
}

impl VerificationEngine for ScriptedEngine {
    fn start(&self, session_url: &str, configuration: EngineConfiguration, on_complete: CompletionHandler) {
        info!(
            "scripted engine started for {session_url} (locale {:?}, {} query item(s), logo: {})",
            configuration.locale,
            configuration.query_items.len(),
            configuration.branding.logo_image().is_some()
        );

        let outcome = self.outcome;
        let delay = self.delay;
        self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            on_complete(outcome);
        });
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use tokio::sync::oneshot;
    use veriff_core::{BrandingDescriptor, EngineError};

    use super::*;

    #[tokio::test]
    async fn test_completes_with_preset_outcome_from_another_thread() {
        // Arrange
        let engine = ScriptedEngine::new(
            EngineResult::Error(EngineError::CameraUnavailable),
            Duration::from_millis(5),
            Handle::current(),
        );
        let (tx, rx) = oneshot::channel();
        let configuration = EngineConfiguration {
            branding: BrandingDescriptor::default(),
            locale: None,
            custom_intro_screen: false,
            query_items: Vec::new(),
        };

        // Act: call `start` from a plain thread, as the UI context does
        std::thread::spawn(move || {
            engine.start(
                "https://x/1",
                configuration,
                Box::new(move |result| {
                    let _ = tx.send(result);
                }),
            );
        })
        .join()
        .unwrap();

        // Assert
        assert_eq!(
            rx.await.unwrap(),
            EngineResult::Error(EngineError::CameraUnavailable)
        );
    }
}
