//! Application state shared across handlers.

use replykaro_core::{CompletionBackend, ReplyOrchestrator, TranscriptionBackend};
use std::sync::Arc;

/// Shared application state; cheap to clone per request. Trait objects keep
/// the upstream APIs swappable at the same seam the tests mock.
#[derive(Clone)]
pub struct AppState {
    /// Outbound completion API used for drafting and evaluation.
    pub completions: Arc<dyn CompletionBackend>,
    /// Outbound speech-to-text API used for transcription.
    pub transcriptions: Arc<dyn TranscriptionBackend>,
    /// Drafting and evaluation orchestration.
    pub orchestrator: Arc<ReplyOrchestrator>,
}

impl AppState {
    pub fn new(
        completions: Arc<dyn CompletionBackend>,
        transcriptions: Arc<dyn TranscriptionBackend>,
        orchestrator: ReplyOrchestrator,
    ) -> Self {
        Self {
            completions,
            transcriptions,
            orchestrator: Arc::new(orchestrator),
        }
    }
}
