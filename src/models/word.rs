use serde::{Deserialize, Serialize};

use super::WhisperChunk;

/// Round a timestamp to 2 decimal places
pub fn round2(secs: f64) -> f64 {
    (secs * 100.0).round() / 100.0
}

/// Word as delivered by the recognition service, before normalization
#[derive(Debug, Clone)]
pub struct RawWord {
    /// Start timestamp in seconds, service-native precision
    pub start: f64,
    /// End timestamp in seconds; None when the service omitted it
    pub end: Option<f64>,
    /// Diarized speaker label; None when the word is unattributed
    pub speaker: Option<String>,
    /// The recognized text, untrimmed
    pub text: String,
}

impl RawWord {
    /// Create a raw word from a service chunk
    pub fn from_chunk(chunk: &WhisperChunk) -> Self {
        Self {
            start: chunk.timestamp.0,
            end: chunk.timestamp.1,
            speaker: chunk.speaker.clone().filter(|s| !s.is_empty()),
            text: chunk.text.clone(),
        }
    }
}

/// Cleaned word produced by normalization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Word {
    /// Start timestamp in seconds, rounded to 2 decimals
    pub start: f64,
    /// End timestamp in seconds, rounded to 2 decimals; start <= end
    pub end: f64,
    /// Speaker label, never empty after normalization
    pub speaker: String,
    /// Trimmed text
    pub text: String,
    /// Whether this word belongs to the primary speaker; false until turn building
    pub is_user: bool,
    /// Reserved for downstream identity resolution; always None in this pipeline
    pub person_id: Option<String>,
}

/// A merged run of consecutive same-speaker words
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub start: f64,
    pub end: f64,
    pub speaker: String,
    /// Space-joined text of all contributing words
    pub text: String,
    pub is_user: bool,
    pub person_id: Option<String>,
}

impl Turn {
    /// Duration of this turn in seconds
    pub fn duration_secs(&self) -> f64 {
        self.end - self.start
    }
}
