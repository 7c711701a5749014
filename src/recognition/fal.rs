use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::WhisperResult;
use crate::recognition::client::{RecognitionBackend, RecognitionRequest};
use crate::recognition::error::RecognitionError;

/// Configuration for the hosted Whisper backend
#[derive(Debug, Clone)]
pub struct FalConfig {
    /// API key (from FAL_KEY env var)
    pub api_key: String,
    /// Queue endpoint for the model
    pub endpoint: String,
    /// Model version requested from the service
    pub model_version: String,
    /// Batch size hint passed to the service
    pub batch_size: u32,
    /// Delay between status polls while the job runs
    pub poll_interval: Duration,
}

impl FalConfig {
    /// Create config from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key =
            std::env::var("FAL_KEY").context("FAL_KEY environment variable not set")?;
        Ok(Self::new(api_key))
    }

    /// Create with an explicit API key and default model parameters
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            endpoint: "https://queue.fal.run/fal-ai/whisper".to_string(),
            model_version: "3".to_string(),
            batch_size: 64,
            poll_interval: Duration::from_millis(500),
        }
    }
}

/// Recognition backend backed by a hosted WhisperX model
///
/// Jobs go through the service's queue API: submit the job, poll its
/// status until it completes, then fetch the result payload.
pub struct FalWhisperBackend {
    client: Client,
    config: FalConfig,
}

impl FalWhisperBackend {
    pub fn new(config: FalConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn job_request(&self, request: &RecognitionRequest) -> WhisperJobRequest {
        WhisperJobRequest {
            audio_url: request.audio_url.clone(),
            task: "transcribe",
            diarize: true,
            chunk_level: "word",
            version: self.config.model_version.clone(),
            batch_size: self.config.batch_size,
            num_speakers: request.expected_speakers,
        }
    }

    async fn submit(
        &self,
        request: &RecognitionRequest,
    ) -> Result<QueueSubmitted, RecognitionError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Authorization", format!("Key {}", self.config.api_key))
            .json(&self.job_request(request))
            .send()
            .await?;

        let submitted = Self::check_status(response).await?.json().await?;
        Ok(submitted)
    }

    async fn poll(&self, submitted: &QueueSubmitted) -> Result<(), RecognitionError> {
        loop {
            let response = self
                .client
                .get(&submitted.status_url)
                .header("Authorization", format!("Key {}", self.config.api_key))
                .send()
                .await?;
            let status: QueueStatus = Self::check_status(response).await?.json().await?;

            match status.status.as_str() {
                "COMPLETED" => return Ok(()),
                "IN_QUEUE" | "IN_PROGRESS" => {
                    debug!(
                        "Recognition job {}: {}",
                        submitted.request_id, status.status
                    );
                    tokio::time::sleep(self.config.poll_interval).await;
                }
                other => {
                    return Err(RecognitionError::JobFailed(format!(
                        "unexpected job status: {}",
                        other
                    )));
                }
            }
        }
    }

    async fn check_status(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, RecognitionError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(RecognitionError::Service { status, body })
    }
}

#[async_trait]
impl RecognitionBackend for FalWhisperBackend {
    async fn transcribe(
        &self,
        request: &RecognitionRequest,
    ) -> Result<WhisperResult, RecognitionError> {
        let submitted = self.submit(request).await?;
        debug!("Recognition job {} submitted", submitted.request_id);

        self.poll(&submitted).await?;

        let response = self
            .client
            .get(&submitted.response_url)
            .header("Authorization", format!("Key {}", self.config.api_key))
            .send()
            .await?;
        let result: WhisperResult = Self::check_status(response).await?.json().await?;
        Ok(result)
    }
}

#[derive(Debug, Serialize)]
struct WhisperJobRequest {
    audio_url: String,
    task: &'static str,
    diarize: bool,
    chunk_level: &'static str,
    version: String,
    batch_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_speakers: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct QueueSubmitted {
    request_id: String,
    status_url: String,
    response_url: String,
}

#[derive(Debug, Deserialize)]
struct QueueStatus {
    status: String,
}
