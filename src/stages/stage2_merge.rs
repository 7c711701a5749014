use crate::models::{Turn, Word};

/// Configuration for turn merging
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Maximum silence between words of one turn, in seconds (strict)
    pub max_gap_secs: f64,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self { max_gap_secs: 30.0 }
    }
}

/// Merge words after the calibration window into speaker turns
///
/// Words starting before `calibration_secs` are dropped entirely, and each
/// retained word is tagged as the primary speaker's when its label matches
/// `primary_speaker`. A word extends the current turn when it keeps the
/// same speaker and follows within `MergeConfig::max_gap_secs` of the
/// turn's end; otherwise it opens a new turn. A same-speaker run never
/// splits on accumulated duration alone.
pub fn build_turns(
    words: &[Word],
    calibration_secs: f64,
    primary_speaker: Option<&str>,
    config: &MergeConfig,
) -> Vec<Turn> {
    let mut turns: Vec<Turn> = Vec::new();

    for word in words {
        if word.start < calibration_secs {
            continue;
        }

        if let Some(turn) = turns.last_mut() {
            let gap = word.start - turn.end;
            if turn.speaker == word.speaker && gap < config.max_gap_secs {
                turn.end = word.end;
                turn.text.push(' ');
                turn.text.push_str(&word.text);
                continue;
            }
        }

        turns.push(Turn {
            start: word.start,
            end: word.end,
            speaker: word.speaker.clone(),
            text: word.text.clone(),
            is_user: primary_speaker.is_some_and(|primary| word.speaker == primary),
            person_id: word.person_id.clone(),
        });
    }

    turns
}
