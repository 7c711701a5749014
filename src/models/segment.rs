use serde::{Deserialize, Serialize};

use super::word::{round2, Turn};

/// Final transcript entity handed to callers
///
/// Timestamps are relative to the first emitted turn. Created once per
/// pipeline run and never mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Unique identifier for this segment (UUID)
    pub id: String,
    /// Turn text, trimmed and capitalized
    pub text: String,
    /// Speaker label for the whole turn
    pub speaker: String,
    /// Whether the turn belongs to the primary speaker
    pub is_user: bool,
    /// Reserved for downstream identity resolution
    pub person_id: Option<String>,
    /// Start in seconds, relative to the first emitted turn
    pub start: f64,
    /// End in seconds, relative to the first emitted turn
    pub end: f64,
}

impl TranscriptSegment {
    /// Build a segment from a merged turn, re-basing timestamps against `base`
    pub fn from_turn(turn: &Turn, base: f64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text: capitalize(turn.text.trim()),
            speaker: turn.speaker.clone(),
            is_user: turn.is_user,
            person_id: turn.person_id.clone(),
            start: round2(turn.start - base),
            end: round2(turn.end - base),
        }
    }

    /// Duration of this segment in seconds
    pub fn duration_secs(&self) -> f64 {
        self.end - self.start
    }
}

/// Upper-case the first character, leaving the remainder unchanged
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
