use crate::models::{round2, RawWord, Word};

/// Configuration for word normalization
#[derive(Debug, Clone)]
pub struct NormalizeConfig {
    /// Label assigned when no neighbor offers a speaker
    pub default_speaker: String,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            default_speaker: "SPEAKER_00".to_string(),
        }
    }
}

/// Normalize raw service words into clean words
///
/// Per-word shaping rounds timestamps to 2 decimals, fills a missing end
/// as start + 1, and trims text. A second, left-to-right pass fills
/// missing speaker labels from the nearest labeled neighbor.
pub fn normalize(raw_words: &[RawWord], config: &NormalizeConfig) -> Vec<Word> {
    let mut shaped: Vec<ShapedWord> = raw_words.iter().map(shape_word).collect();
    fill_missing_speakers(&mut shaped, &config.default_speaker);

    shaped
        .into_iter()
        .map(|word| Word {
            start: word.start,
            end: word.end,
            speaker: word
                .speaker
                .unwrap_or_else(|| config.default_speaker.clone()),
            text: word.text,
            is_user: false,
            person_id: None,
        })
        .collect()
}

/// Word after per-word shaping, before the speaker fill
struct ShapedWord {
    start: f64,
    end: f64,
    speaker: Option<String>,
    text: String,
}

fn shape_word(word: &RawWord) -> ShapedWord {
    let end = word.end.unwrap_or(word.start + 1.0);
    ShapedWord {
        start: round2(word.start),
        end: round2(end),
        speaker: word.speaker.clone(),
        text: word.text.trim().to_string(),
    }
}

/// Fill absent speaker labels from neighbors, in a single forward pass
///
/// Labels written by this pass are visible when a later word inspects its
/// previous neighbor, while next neighbors are still raw; a run of
/// unlabeled words therefore inherits from the left.
fn fill_missing_speakers(words: &mut [ShapedWord], default_speaker: &str) {
    for i in 0..words.len() {
        if words[i].speaker.is_some() {
            continue;
        }

        let prev_speaker = if i > 0 { words[i - 1].speaker.clone() } else { None };
        let next_speaker = words.get(i + 1).and_then(|w| w.speaker.clone());

        let speaker = match (prev_speaker, next_speaker) {
            (Some(prev), Some(next)) => {
                if prev == next {
                    prev
                } else {
                    let secs_from_prev = words[i].start - words[i - 1].end;
                    let secs_to_next = words[i + 1].start - words[i].end;
                    if secs_from_prev < secs_to_next { prev } else { next }
                }
            }
            (Some(prev), None) => prev,
            (None, Some(next)) => next,
            (None, None) => default_speaker.to_string(),
        };

        words[i].speaker = Some(speaker);
    }
}
