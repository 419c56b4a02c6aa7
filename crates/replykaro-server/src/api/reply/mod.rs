//! Reply drafting endpoint.

mod handlers;

use axum::{routing::post, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/generate-reply", post(handlers::generate_reply))
}
