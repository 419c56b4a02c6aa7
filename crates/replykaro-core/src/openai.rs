//! reqwest client for the OpenAI-compatible completion and transcription APIs.

use crate::backend::{CompletionBackend, CompletionRequest, TranscriptionBackend};
use crate::config::Config;
use crate::errors::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Client for one OpenAI-compatible API, shared by all requests.
#[derive(Debug)]
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    transcription_model: String,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let headers = build_headers(&config.api_key)?;
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            transcription_model: config.transcription_model.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn build_headers(api_key: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let bearer = HeaderValue::from_str(&format!("Bearer {api_key}"))
        .map_err(|e| Error::Config(format!("Invalid API key header value: {e}")))?;
    headers.insert(AUTHORIZATION, bearer);
    Ok(headers)
}

#[async_trait]
impl CompletionBackend for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<Vec<String>> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!(model = %request.model, n = request.n, "Sending chat completion request");

        let response = self.http.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            return Err(Error::Upstream(format!(
                "Completion request failed with status {status}: {body}"
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("Failed to parse completion response: {e}")))?;

        if completion.choices.is_empty() {
            return Err(Error::Upstream(
                "Completion response contained no choices".to_string(),
            ));
        }

        Ok(completion
            .choices
            .into_iter()
            .map(|choice| choice.message.content.unwrap_or_default())
            .collect())
    }
}

#[async_trait]
impl TranscriptionBackend for OpenAiClient {
    async fn transcribe(&self, audio: Vec<u8>, filename: String) -> Result<String> {
        if audio.is_empty() {
            return Err(Error::MissingAudio);
        }

        let url = format!("{}/audio/transcriptions", self.base_url);
        debug!(bytes = audio.len(), %filename, "Sending transcription request");

        let audio_part = Part::bytes(audio).file_name(filename);
        let form = Form::new()
            .part("file", audio_part)
            .text("model", self.transcription_model.clone());

        let response = self.http.post(&url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            return Err(Error::Upstream(format!(
                "Transcription request failed with status {status}: {body}"
            )));
        }

        let transcription: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("Failed to parse transcription response: {e}")))?;

        Ok(transcription.text)
    }
}
