use axum::{
    extract::{Extension, Multipart, Request, State},
    http::header,
    Json, RequestExt,
};
use serde::Serialize;
use tracing::{debug, error};

use crate::api::request_context::RequestContext;
use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_FILENAME: &str = "audio.wav";

#[derive(Debug, Serialize)]
pub struct TranscribeAudioResponse {
    pub transcript: String,
}

/// Uploaded audio, held in memory for the duration of the call only.
#[derive(Debug)]
struct UploadedAudio {
    bytes: Vec<u8>,
    filename: String,
}

pub async fn transcribe_audio(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    req: Request,
) -> Result<Json<TranscribeAudioResponse>, ApiError> {
    let upload = parse_upload(req)
        .await?
        .ok_or_else(|| ApiError::bad_request("No audio file uploaded."))?;

    debug!(
        request_id = %ctx.request_id,
        bytes = upload.bytes.len(),
        filename = %upload.filename,
        "Transcribing uploaded audio"
    );

    let transcript = state
        .transcriptions
        .transcribe(upload.bytes, upload.filename)
        .await
        .map_err(map_transcription_error)?;

    Ok(Json(TranscribeAudioResponse { transcript }))
}

/// Pull the first non-empty `audio` (or `file`) part out of a multipart
/// body. A request that is not multipart, or carries no such part, counts as
/// "no file uploaded" and never reaches the upstream API.
async fn parse_upload(req: Request) -> Result<Option<UploadedAudio>, ApiError> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if !content_type.starts_with("multipart/form-data") {
        return Ok(None);
    }

    let mut multipart = req
        .extract::<Multipart, _>()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart payload: {e}")))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Failed reading multipart field: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "audio" | "file" => {
                let filename = field
                    .file_name()
                    .map(|value| value.to_string())
                    .unwrap_or_else(|| DEFAULT_FILENAME.to_string());
                let bytes = field.bytes().await.map_err(|e| {
                    ApiError::bad_request(format!("Failed reading '{name}' bytes: {e}"))
                })?;
                if !bytes.is_empty() {
                    return Ok(Some(UploadedAudio {
                        bytes: bytes.to_vec(),
                        filename,
                    }));
                }
            }
            _ => {}
        }
    }

    Ok(None)
}

fn map_transcription_error(err: replykaro_core::Error) -> ApiError {
    match err {
        replykaro_core::Error::MissingAudio => ApiError::bad_request("No audio file uploaded."),
        other => {
            error!("Transcription failed: {other}");
            ApiError::internal("Failed to transcribe audio.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::StatusCode;
    use replykaro_core::{
        CompletionBackend, CompletionRequest, Error, ReplyOrchestrator, TranscriptionBackend,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    const BOUNDARY: &str = "replykaro-test-boundary";

    #[derive(Default)]
    struct RecordingTranscriptions {
        calls: AtomicUsize,
        received: Mutex<Option<(Vec<u8>, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl TranscriptionBackend for RecordingTranscriptions {
        async fn transcribe(
            &self,
            audio: Vec<u8>,
            filename: String,
        ) -> replykaro_core::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.received.lock().expect("lock") = Some((audio, filename));
            if self.fail {
                return Err(Error::Upstream("simulated upstream 500".to_string()));
            }
            Ok("hello world".to_string())
        }
    }

    struct UnusedCompletions;

    #[async_trait]
    impl CompletionBackend for UnusedCompletions {
        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> replykaro_core::Result<Vec<String>> {
            Err(Error::Upstream(
                "completion backend should not be called".to_string(),
            ))
        }
    }

    fn test_state(backend: Arc<RecordingTranscriptions>) -> AppState {
        AppState::new(
            Arc::new(UnusedCompletions),
            backend,
            ReplyOrchestrator::new("gpt-4", "gpt-4"),
        )
    }

    fn test_ctx() -> Extension<RequestContext> {
        Extension(RequestContext {
            request_id: "test".to_string(),
        })
    }

    fn multipart_request(body: String) -> Request {
        Request::builder()
            .method("POST")
            .uri("/transcribe-audio")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("request should build")
    }

    fn file_part(name: &str, filename: &str, contents: &str) -> String {
        format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
             Content-Type: audio/wav\r\n\
             \r\n\
             {contents}\r\n"
        )
    }

    fn text_part(name: &str, value: &str) -> String {
        format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{name}\"\r\n\
             \r\n\
             {value}\r\n"
        )
    }

    fn closing() -> String {
        format!("--{BOUNDARY}--\r\n")
    }

    #[tokio::test]
    async fn uploaded_file_is_forwarded_and_transcript_relayed() {
        let backend = Arc::new(RecordingTranscriptions::default());
        let body = file_part("audio", "clip.wav", "RIFFdata") + &closing();

        let Json(response) = transcribe_audio(
            State(test_state(backend.clone())),
            test_ctx(),
            multipart_request(body),
        )
        .await
        .expect("transcription should succeed");

        assert_eq!(response.transcript, "hello world");
        let received = backend.received.lock().expect("lock");
        let (bytes, filename) = received.as_ref().expect("backend should be called");
        assert_eq!(bytes, b"RIFFdata");
        assert_eq!(filename, "clip.wav");
    }

    #[tokio::test]
    async fn missing_file_returns_400_without_upstream_call() {
        let backend = Arc::new(RecordingTranscriptions::default());
        let body = text_part("note", "no file here") + &closing();

        let err = transcribe_audio(
            State(test_state(backend.clone())),
            test_ctx(),
            multipart_request(body),
        )
        .await
        .expect_err("missing file should fail");

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "No audio file uploaded.");
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_file_part_counts_as_missing() {
        let backend = Arc::new(RecordingTranscriptions::default());
        let body = file_part("audio", "clip.wav", "") + &closing();

        let err = transcribe_audio(
            State(test_state(backend.clone())),
            test_ctx(),
            multipart_request(body),
        )
        .await
        .expect_err("empty file should fail");

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn non_multipart_body_counts_as_missing_file() {
        let backend = Arc::new(RecordingTranscriptions::default());
        let req = Request::builder()
            .method("POST")
            .uri("/transcribe-audio")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .expect("request should build");

        let err = transcribe_audio(State(test_state(backend.clone())), test_ctx(), req)
            .await
            .expect_err("non-multipart should fail");

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn upstream_failure_maps_to_500_with_generic_message() {
        let backend = Arc::new(RecordingTranscriptions {
            fail: true,
            ..Default::default()
        });
        let body = file_part("audio", "clip.wav", "RIFFdata") + &closing();

        let err = transcribe_audio(
            State(test_state(backend)),
            test_ctx(),
            multipart_request(body),
        )
        .await
        .expect_err("upstream failure should surface");

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Failed to transcribe audio.");
    }
}
