use seg_transcript_interface::Utterance;

/// Drop non-speech entries and transcription artifacts with zero or negative
/// duration, preserving input order.
///
/// The engine depends on the surviving utterances keeping their original
/// (non-decreasing sequence and time) order, so this must never reorder.
pub fn speech_only(utterances: Vec<Utterance>) -> Vec<Utterance> {
    let before = utterances.len();
    let speech: Vec<Utterance> = utterances
        .into_iter()
        .filter(|u| u.is_speech() && u.is_well_formed())
        .collect();

    let dropped = before - speech.len();
    if dropped > 0 {
        tracing::debug!(dropped, kept = speech.len(), "non_speech_utterances_filtered");
    }

    speech
}
