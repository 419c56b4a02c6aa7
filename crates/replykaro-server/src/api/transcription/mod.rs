//! Audio transcription proxy endpoint.

mod handlers;

use axum::{routing::post, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/transcribe-audio", post(handlers::transcribe_audio))
}
