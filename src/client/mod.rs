//! Typed client for the `/generate` endpoint.
//!
//! Mirrors the browser submission flow: validate the prompt before any I/O,
//! issue exactly one request, surface server error messages verbatim with a
//! generic fallback, and keep the result as opaque bytes. The e2e suite uses
//! it as the reference consumer of the endpoint.

use serde_json::json;

use crate::domain::generation::{AudioFormat, ModelKey};

/// Shown when a failure response carries no parsable `error` field.
pub const GENERIC_FAILURE_MESSAGE: &str = "Generation failed on server.";

/// Base name for suggested download file names.
const TRACK_FILE_STEM: &str = "sonicforge_track";

/// Submission lifecycle. One submission at a time: a valid trigger moves
/// Idle (or any Settled phase) to Loading, completion moves Loading to
/// Settled. There is no terminal phase; the cycle repeats indefinitely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    Loading,
    Settled(SubmissionOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success,
    Failure,
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Rejected before any network activity.
    #[error("{0}")]
    Validation(String),
    /// Network failure or an unreadable response.
    #[error("{0}")]
    Transport(String),
    /// Non-success response; carries the server's message or the generic
    /// fallback.
    #[error("{0}")]
    Server(String),
    /// A submission is already in flight; no request was issued.
    #[error("a submission is already in flight")]
    InFlight,
}

/// A generated track: opaque audio bytes plus the metadata needed to play
/// and save it.
#[derive(Debug, Clone)]
pub struct GeneratedTrack {
    pub audio: Vec<u8>,
    pub content_type: String,
    /// Suggested download name; the extension follows the requested format.
    pub file_name: String,
}

pub struct GenerateClient {
    http: reqwest::Client,
    base_url: String,
    phase: SubmissionPhase,
}

impl GenerateClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, GenerateError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| GenerateError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            phase: SubmissionPhase::Idle,
        })
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    /// Drop a stuck Loading phase. Only needed if a `submit` future was
    /// dropped mid-flight; the protocol itself has no cancellation.
    pub fn reset(&mut self) {
        self.phase = SubmissionPhase::Idle;
    }

    /// Submit one generation request.
    ///
    /// An empty or whitespace-only prompt fails with a validation message
    /// before any request is issued and leaves the current phase untouched.
    /// Every other outcome settles the phase, success or failure, so the
    /// client can always be triggered again.
    pub async fn submit(
        &mut self,
        prompt: &str,
        model: ModelKey,
        format: AudioFormat,
    ) -> Result<GeneratedTrack, GenerateError> {
        if self.phase == SubmissionPhase::Loading {
            return Err(GenerateError::InFlight);
        }

        if prompt.trim().is_empty() {
            return Err(GenerateError::Validation(
                "Please describe the song you want to create.".to_string(),
            ));
        }

        self.phase = SubmissionPhase::Loading;
        let result = self.send(prompt, model, format).await;
        self.phase = if result.is_ok() {
            SubmissionPhase::Settled(SubmissionOutcome::Success)
        } else {
            SubmissionPhase::Settled(SubmissionOutcome::Failure)
        };
        result
    }

    async fn send(
        &self,
        prompt: &str,
        model: ModelKey,
        format: AudioFormat,
    ) -> Result<GeneratedTrack, GenerateError> {
        let response = self
            .http
            .post(format!("{}/generate", self.base_url))
            .json(&json!({
                "prompt": prompt,
                "model": model.as_str(),
                "format": format.extension(),
            }))
            .send()
            .await
            .map_err(|e| GenerateError::Transport(e.to_string()))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_else(|| format.content_type())
            .to_string();

        let body = response
            .bytes()
            .await
            .map_err(|e| GenerateError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(GenerateError::Server(extract_error_message(&body)));
        }

        Ok(GeneratedTrack {
            audio: body.to_vec(),
            content_type,
            file_name: format!("{}.{}", TRACK_FILE_STEM, format.extension()),
        })
    }
}

/// Pull the `error` field out of a failure body, falling back to the generic
/// message when the body is not the expected JSON shape.
fn extract_error_message(body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string())
}
