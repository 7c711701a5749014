use crate::models::{TranscriptSegment, Turn};

/// Render merged turns into final transcript segments
///
/// Timestamps are re-based so the first turn starts at zero; turn text is
/// trimmed and capitalized. Empty input renders to an empty transcript.
pub fn render_segments(turns: &[Turn]) -> Vec<TranscriptSegment> {
    let base = match turns.first() {
        Some(turn) => turn.start,
        None => return Vec::new(),
    };

    turns
        .iter()
        .map(|turn| TranscriptSegment::from_turn(turn, base))
        .collect()
}
