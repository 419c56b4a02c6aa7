//! API routes and handlers

pub mod internal;
pub mod reply;
pub mod request_context;
mod router;
pub mod transcription;

pub use router::create_router;
