use serde::{Deserialize, Serialize};

/// Result payload from the recognition service
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WhisperResult {
    /// Word-level chunks; absent or empty in failed responses
    #[serde(default)]
    pub chunks: Vec<WhisperChunk>,
    /// Languages the model inferred, most likely first
    #[serde(default)]
    pub inferred_languages: Vec<String>,
}

/// A single word-level chunk with diarization info
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WhisperChunk {
    /// [start, end] in seconds; end may be null when the model could not place it
    pub timestamp: (f64, Option<f64>),
    /// Diarized speaker label (e.g. "SPEAKER_01"), null when unattributed
    #[serde(default)]
    pub speaker: Option<String>,
    /// The recognized text
    pub text: String,
}

impl WhisperResult {
    /// Most likely inferred language, if the service reported any
    pub fn language(&self) -> Option<&str> {
        self.inferred_languages.first().map(String::as_str)
    }
}
