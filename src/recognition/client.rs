use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::models::{RawWord, WhisperResult};
use crate::recognition::error::RecognitionError;

/// One recognition attempt against the external service
///
/// The production implementation is `FalWhisperBackend`; tests substitute
/// scripted backends to exercise the retry policy.
#[async_trait]
pub trait RecognitionBackend: Send + Sync {
    /// Submit the job and block until the service completes it
    async fn transcribe(
        &self,
        request: &RecognitionRequest,
    ) -> Result<WhisperResult, RecognitionError>;
}

/// Parameters for one recognition job
#[derive(Debug, Clone)]
pub struct RecognitionRequest {
    /// Reference to the audio to transcribe (a URL the service can fetch)
    pub audio_url: String,
    /// Expected number of distinct speakers, when known
    pub expected_speakers: Option<u32>,
    /// Deadline applied to each attempt; None defers to the transport's own limits
    pub timeout: Option<Duration>,
}

impl RecognitionRequest {
    pub fn new(audio_url: impl Into<String>) -> Self {
        Self {
            audio_url: audio_url.into(),
            expected_speakers: None,
            timeout: None,
        }
    }

    pub fn with_expected_speakers(mut self, count: u32) -> Self {
        self.expected_speakers = Some(count);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Retry policy for the recognition call
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Delay between consecutive attempts
    pub backoff: Duration,
    /// Language reported when the service never inferred one
    pub default_language: String,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::ZERO,
            default_language: "en".to_string(),
        }
    }
}

/// Word-level output of a completed recognition job
#[derive(Debug, Clone)]
pub struct Recognition {
    /// Words in service order
    pub words: Vec<RawWord>,
    /// Language the service inferred, when reported
    pub language: Option<String>,
}

/// Outcome of a recognition call after retries
///
/// `Degraded` is a legitimate (if empty) outcome, not an error: callers
/// must not read an empty transcript as evidence of silent audio.
#[derive(Debug)]
pub enum RecognitionOutcome {
    /// The service produced word-level output
    Complete(Recognition),
    /// Every attempt failed; the transcript is empty
    Degraded {
        /// Attempts consumed before giving up
        attempts: u32,
        /// The last failure observed
        reason: RecognitionError,
    },
}

impl RecognitionOutcome {
    /// Words to feed the pipeline; empty when degraded
    pub fn words(&self) -> &[RawWord] {
        match self {
            Self::Complete(recognition) => &recognition.words,
            Self::Degraded { .. } => &[],
        }
    }

    /// Inferred language, falling back to the given default
    pub fn language_or<'a>(&'a self, default: &'a str) -> &'a str {
        match self {
            Self::Complete(recognition) => recognition.language.as_deref().unwrap_or(default),
            Self::Degraded { .. } => default,
        }
    }

    /// Whether this outcome came from exhausted retries
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}

/// Retrying client around a recognition backend
///
/// Runs up to `RetryConfig::max_attempts` sequential attempts and degrades
/// to an empty result instead of surfacing an error.
pub struct RecognitionClient {
    backend: Arc<dyn RecognitionBackend>,
    retry: RetryConfig,
}

impl RecognitionClient {
    pub fn new(backend: Arc<dyn RecognitionBackend>, retry: RetryConfig) -> Self {
        Self { backend, retry }
    }

    /// Language reported when the service never inferred one
    pub fn default_language(&self) -> &str {
        &self.retry.default_language
    }

    /// Fetch word-level output for one audio reference
    ///
    /// An empty or absent chunk list counts as a failed attempt, not as a
    /// valid silent transcript. Attempts run sequentially with
    /// `RetryConfig::backoff` between them.
    pub async fn fetch(&self, request: &RecognitionRequest) -> RecognitionOutcome {
        let mut last_error = RecognitionError::EmptyResult;

        for attempt in 1..=self.retry.max_attempts {
            if attempt > 1 && !self.retry.backoff.is_zero() {
                tokio::time::sleep(self.retry.backoff).await;
            }

            match self.attempt(request).await {
                Ok(result) => {
                    if result.chunks.is_empty() {
                        warn!("Recognition attempt {}: no chunks in result", attempt);
                        last_error = RecognitionError::EmptyResult;
                        continue;
                    }
                    info!(
                        "Recognition attempt {}: {} words",
                        attempt,
                        result.chunks.len()
                    );
                    let words = result.chunks.iter().map(RawWord::from_chunk).collect();
                    return RecognitionOutcome::Complete(Recognition {
                        words,
                        language: result.language().map(str::to_string),
                    });
                }
                Err(e) => {
                    warn!("Recognition attempt {} failed: {}", attempt, e);
                    last_error = e;
                }
            }
        }

        info!(
            "Recognition exhausted {} attempts, degrading to empty result",
            self.retry.max_attempts
        );
        RecognitionOutcome::Degraded {
            attempts: self.retry.max_attempts,
            reason: last_error,
        }
    }

    /// Run one attempt, bounded by the request deadline when present
    async fn attempt(
        &self,
        request: &RecognitionRequest,
    ) -> Result<WhisperResult, RecognitionError> {
        match request.timeout {
            Some(deadline) => tokio::time::timeout(deadline, self.backend.transcribe(request))
                .await
                .map_err(|_| RecognitionError::DeadlineExceeded(deadline))?,
            None => self.backend.transcribe(request).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::models::WhisperChunk;

    /// Backend that replays a scripted sequence of attempt results
    struct ScriptedBackend {
        script: Mutex<Vec<Result<WhisperResult, RecognitionError>>>,
    }

    impl ScriptedBackend {
        fn new(script: Vec<Result<WhisperResult, RecognitionError>>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script),
            })
        }
    }

    #[async_trait]
    impl RecognitionBackend for ScriptedBackend {
        async fn transcribe(
            &self,
            _request: &RecognitionRequest,
        ) -> Result<WhisperResult, RecognitionError> {
            self.script.lock().unwrap().remove(0)
        }
    }

    /// Backend that never responds in time
    struct StalledBackend;

    #[async_trait]
    impl RecognitionBackend for StalledBackend {
        async fn transcribe(
            &self,
            _request: &RecognitionRequest,
        ) -> Result<WhisperResult, RecognitionError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(empty_result())
        }
    }

    fn empty_result() -> WhisperResult {
        WhisperResult {
            chunks: vec![],
            inferred_languages: vec![],
        }
    }

    fn result_with_words(language: Option<&str>) -> WhisperResult {
        WhisperResult {
            chunks: vec![
                WhisperChunk {
                    timestamp: (0.0, Some(0.5)),
                    speaker: Some("SPEAKER_00".to_string()),
                    text: " Hi".to_string(),
                },
                WhisperChunk {
                    timestamp: (0.6, Some(1.0)),
                    speaker: Some("SPEAKER_00".to_string()),
                    text: " there".to_string(),
                },
            ],
            inferred_languages: language.map(str::to_string).into_iter().collect(),
        }
    }

    fn service_error() -> RecognitionError {
        RecognitionError::Service {
            status: 500,
            body: "internal error".to_string(),
        }
    }

    #[tokio::test]
    async fn test_fetch_succeeds_after_transient_failures() {
        let backend = ScriptedBackend::new(vec![
            Err(service_error()),
            Err(service_error()),
            Ok(result_with_words(Some("en"))),
        ]);
        let client = RecognitionClient::new(backend, RetryConfig::default());

        let outcome = client.fetch(&RecognitionRequest::new("https://audio.test/a.wav")).await;

        assert!(!outcome.is_degraded());
        assert_eq!(outcome.words().len(), 2);
        assert_eq!(outcome.words()[0].speaker.as_deref(), Some("SPEAKER_00"));
    }

    #[tokio::test]
    async fn test_fetch_degrades_after_exhausted_attempts() {
        let backend = ScriptedBackend::new(vec![
            Err(service_error()),
            Err(service_error()),
            Err(service_error()),
        ]);
        let client = RecognitionClient::new(backend, RetryConfig::default());

        let outcome = client.fetch(&RecognitionRequest::new("https://audio.test/a.wav")).await;

        assert!(outcome.is_degraded());
        assert!(outcome.words().is_empty());
        assert_eq!(outcome.language_or("en"), "en");
        match outcome {
            RecognitionOutcome::Degraded { attempts, .. } => assert_eq!(attempts, 3),
            RecognitionOutcome::Complete(_) => panic!("expected degraded outcome"),
        }
    }

    #[tokio::test]
    async fn test_empty_chunks_count_as_failure() {
        let backend = ScriptedBackend::new(vec![
            Ok(empty_result()),
            Ok(result_with_words(None)),
        ]);
        let client = RecognitionClient::new(backend, RetryConfig::default());

        let outcome = client.fetch(&RecognitionRequest::new("https://audio.test/a.wav")).await;

        assert!(!outcome.is_degraded());
        assert_eq!(outcome.words().len(), 2);
    }

    #[tokio::test]
    async fn test_all_empty_results_degrade() {
        let backend = ScriptedBackend::new(vec![
            Ok(empty_result()),
            Ok(empty_result()),
            Ok(empty_result()),
        ]);
        let client = RecognitionClient::new(backend, RetryConfig::default());

        let outcome = client.fetch(&RecognitionRequest::new("https://audio.test/a.wav")).await;

        match outcome {
            RecognitionOutcome::Degraded { reason, .. } => {
                assert!(matches!(reason, RecognitionError::EmptyResult));
            }
            RecognitionOutcome::Complete(_) => panic!("expected degraded outcome"),
        }
    }

    #[tokio::test]
    async fn test_inferred_language_wins_over_default() {
        let backend = ScriptedBackend::new(vec![Ok(result_with_words(Some("es")))]);
        let client = RecognitionClient::new(backend, RetryConfig::default());

        let outcome = client.fetch(&RecognitionRequest::new("https://audio.test/a.wav")).await;

        assert_eq!(outcome.language_or("en"), "es");
    }

    #[tokio::test]
    async fn test_attempt_deadline_is_enforced() {
        let retry = RetryConfig {
            max_attempts: 1,
            ..Default::default()
        };
        let client = RecognitionClient::new(Arc::new(StalledBackend), retry);
        let request = RecognitionRequest::new("https://audio.test/a.wav")
            .with_timeout(Duration::from_millis(10));

        let outcome = client.fetch(&request).await;

        match outcome {
            RecognitionOutcome::Degraded { reason, .. } => {
                assert!(matches!(reason, RecognitionError::DeadlineExceeded(_)));
            }
            RecognitionOutcome::Complete(_) => panic!("expected degraded outcome"),
        }
    }
}
