use crate::models::Word;

/// Determine the primary speaker from the calibration window
///
/// Scans words in order, stopping at the first word that starts at or past
/// `calibration_secs`, and returns the most frequent label among the
/// scanned words. Ties resolve to the label tallied first. A cutoff of
/// zero (or less) designates no primary speaker.
pub fn resolve_primary_speaker(words: &[Word], calibration_secs: f64) -> Option<String> {
    if calibration_secs <= 0.0 {
        return None;
    }

    let mut tally: Vec<(String, u32)> = Vec::new();
    for word in words {
        if word.start >= calibration_secs {
            break;
        }
        // Normalization guarantees a label, but an unlabeled word must not vote
        if word.speaker.is_empty() {
            continue;
        }
        match tally.iter_mut().find(|(speaker, _)| *speaker == word.speaker) {
            Some((_, count)) => *count += 1,
            None => tally.push((word.speaker.clone(), 1)),
        }
    }

    let mut best: Option<(String, u32)> = None;
    for (speaker, count) in tally {
        if best.as_ref().is_none_or(|(_, best_count)| count > *best_count) {
            best = Some((speaker, count));
        }
    }
    best.map(|(speaker, _)| speaker)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(start: f64, speaker: &str) -> Word {
        Word {
            start,
            end: start + 0.4,
            speaker: speaker.to_string(),
            text: "word".to_string(),
            is_user: false,
            person_id: None,
        }
    }

    #[test]
    fn test_majority_wins() {
        let words = vec![word(0.0, "A"), word(1.0, "A"), word(2.0, "B")];

        assert_eq!(resolve_primary_speaker(&words, 10.0).as_deref(), Some("A"));
    }

    #[test]
    fn test_zero_cutoff_designates_nobody() {
        let words = vec![word(0.0, "A"), word(1.0, "A")];

        assert_eq!(resolve_primary_speaker(&words, 0.0), None);
    }

    #[test]
    fn test_scan_stops_at_cutoff() {
        // "B" dominates only past the cutoff
        let words = vec![
            word(0.0, "A"),
            word(5.5, "B"),
            word(6.0, "B"),
            word(7.0, "B"),
        ];

        assert_eq!(resolve_primary_speaker(&words, 5.0).as_deref(), Some("A"));
    }

    #[test]
    fn test_tie_resolves_to_first_tallied_label() {
        let words = vec![word(0.0, "B"), word(1.0, "A"), word(2.0, "A"), word(3.0, "B")];

        assert_eq!(resolve_primary_speaker(&words, 10.0).as_deref(), Some("B"));
    }

    #[test]
    fn test_no_scanned_words_designates_nobody() {
        let words = vec![word(12.0, "A")];

        assert_eq!(resolve_primary_speaker(&words, 10.0), None);
        assert_eq!(resolve_primary_speaker(&[], 10.0), None);
    }
}
