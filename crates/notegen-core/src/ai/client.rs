//! HTTP client for the generation and extraction endpoints
//!
//! One client, two calls: `generate` streams SSE deltas through the
//! accumulator, `extract` is a plain JSON round trip. Exactly one
//! generation is in flight at a time; each call owns a fresh accumulator.

use futures::StreamExt;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::ai::sse::SseAccumulator;
use crate::ai::types::{Attachment, ExtractRequest, GenerateRequest, Mode};
use crate::config::Config;
use crate::error::{NotesError, Result};

/// Result of extracting one file out of a batch
#[derive(Debug)]
pub struct ExtractOutcome {
    /// Display name of the source file
    pub file: String,
    /// Extracted text, or the per-file failure
    pub result: Result<String>,
}

/// Client for the notes-generation and text-extraction services
pub struct NotesClient {
    http: reqwest::Client,
    config: Config,
}

impl NotesClient {
    pub fn new(config: Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn request(&self, url: &str) -> reqwest::RequestBuilder {
        let mut builder = self.http.post(url);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }
        builder
    }

    /// Generate notes for `text` in the given mode, streaming updates.
    ///
    /// The sink receives the full accumulated text after every delta.
    /// On a mid-stream failure the already-accumulated partial text has
    /// been delivered through the sink and stays usable by the caller.
    pub async fn generate(
        &self,
        text: &str,
        mode: Mode,
        mut on_text: impl FnMut(&str),
    ) -> Result<String> {
        info!("generating notes in {} mode", mode.as_str());
        let body = GenerateRequest { text, mode };
        let response = self
            .request(&self.config.generate_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| NotesError::GenerationFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // Do not touch the body; the status alone decides the outcome
            warn!("generation request rejected with HTTP {status}");
            return Err(NotesError::from_status(status));
        }

        let mut stream = response.bytes_stream();
        let mut accumulator = SseAccumulator::new();
        let mut sink = |accumulated: &str| on_text(accumulated);

        while let Some(chunk) = stream.next().await {
            let bytes = chunk.map_err(|e| {
                warn!("transport failed mid-stream: {e}");
                NotesError::GenerationFailed(format!("stream interrupted: {e}"))
            })?;
            // After [DONE] the transport is drained but no longer parsed
            accumulator.process_chunk(&bytes, &mut sink);
        }
        accumulator.finish(&mut sink);

        if !accumulator.is_done() {
            debug!("stream ended without [DONE] sentinel");
        }
        Ok(accumulator.into_text())
    }

    /// Extract text from one uploaded file via the OCR endpoint.
    pub async fn extract(&self, attachment: &Attachment) -> Result<String> {
        debug!(
            "extracting text from {} ({})",
            attachment.name, attachment.mime_type
        );
        let body = ExtractRequest {
            file_base64: &attachment.data_base64,
            mime_type: &attachment.mime_type,
            file_type: attachment.file_type,
        };
        let fail = |reason: String| NotesError::ExtractionFailed {
            file: attachment.name.clone(),
            reason,
        };

        let response = self
            .request(&self.config.extract_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| fail(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fail(NotesError::from_status(status).to_string()));
        }

        let json: Value = response.json().await.map_err(|e| fail(e.to_string()))?;
        let text = json
            .get("text")
            .and_then(|t| t.as_str())
            .unwrap_or("")
            .to_string();
        Ok(text)
    }

    /// Extract a batch of files, isolating failures per file: one bad
    /// file never aborts its siblings, it is just reported and skipped.
    pub async fn extract_batch(&self, attachments: &[Attachment]) -> Vec<ExtractOutcome> {
        let mut outcomes = Vec::with_capacity(attachments.len());
        for attachment in attachments {
            let result = self.extract(attachment).await;
            if let Err(err) = &result {
                warn!("extraction failed for {}: {err}", attachment.name);
            }
            outcomes.push(ExtractOutcome {
                file: attachment.name.clone(),
                result,
            });
        }
        outcomes
    }

    /// Combine successful batch outcomes into the text fed to generation.
    /// Failed files are excluded entirely.
    pub fn combine_extracted(outcomes: &[ExtractOutcome]) -> String {
        outcomes
            .iter()
            .filter_map(|o| o.result.as_deref().ok())
            .filter(|text| !text.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
