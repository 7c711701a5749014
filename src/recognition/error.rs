use std::time::Duration;

use thiserror::Error;

/// Failure of a single recognition attempt
///
/// Covers network failure, service-reported failure, and empty results.
/// Never surfaces past the retrying client: exhausted retries degrade to
/// an empty transcript instead of raising.
#[derive(Debug, Error)]
pub enum RecognitionError {
    /// Transport-level failure talking to the service
    #[error("recognition transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// Non-success response from the service
    #[error("recognition service error {status}: {body}")]
    Service { status: u16, body: String },
    /// The service reported the job as failed or in an unknown state
    #[error("recognition job failed: {0}")]
    JobFailed(String),
    /// The job completed but returned no word chunks
    #[error("recognition returned no word chunks")]
    EmptyResult,
    /// The attempt did not finish within the requested deadline
    #[error("recognition attempt exceeded deadline of {0:?}")]
    DeadlineExceeded(Duration),
}
