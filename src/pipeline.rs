use tracing::info;

use crate::models::{RawWord, TranscriptSegment};
use crate::recognition::{RecognitionClient, RecognitionRequest};
use crate::stages::{
    build_turns, normalize, render_segments, resolve_primary_speaker, MergeConfig,
    NormalizeConfig,
};

/// Configuration for the pure post-processing stages
#[derive(Debug, Clone, Default)]
pub struct PostprocessConfig {
    pub normalize: NormalizeConfig,
    pub merge: MergeConfig,
}

/// A finished transcription run
#[derive(Debug)]
pub struct Transcription {
    /// Final transcript segments, in order
    pub segments: Vec<TranscriptSegment>,
    /// Inferred language, or the configured default
    pub language: String,
    /// True when recognition exhausted its retries; an empty transcript
    /// then reflects service failure, not silent audio
    pub degraded: bool,
}

/// Run the pure post-processing stages over raw recognition words
///
/// Words inside the calibration window elect the primary speaker and are
/// excluded from the rendered transcript. Input is assumed sorted by start
/// time ascending.
pub fn postprocess(
    raw_words: &[RawWord],
    calibration_secs: f64,
    config: &PostprocessConfig,
) -> Vec<TranscriptSegment> {
    let words = normalize(raw_words, &config.normalize);
    let primary_speaker = resolve_primary_speaker(&words, calibration_secs);
    let turns = build_turns(
        &words,
        calibration_secs,
        primary_speaker.as_deref(),
        &config.merge,
    );
    render_segments(&turns)
}

/// Fetch recognition output for one audio reference and post-process it
/// into transcript segments
pub async fn transcribe(
    client: &RecognitionClient,
    request: &RecognitionRequest,
    calibration_secs: f64,
    config: &PostprocessConfig,
) -> Transcription {
    let outcome = client.fetch(request).await;
    let language = outcome.language_or(client.default_language()).to_string();

    let segments = postprocess(outcome.words(), calibration_secs, config);
    info!(
        "Transcription produced {} segments (degraded: {})",
        segments.len(),
        outcome.is_degraded()
    );

    Transcription {
        segments,
        language,
        degraded: outcome.is_degraded(),
    }
}
