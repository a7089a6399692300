use seg_transcript_interface::Segment;

use crate::accumulator::{Accumulator, GeneratedAudio};
use crate::config::SegmenterConfig;
use crate::executor::{AudioExtractor, BoxError, ObjectStore};

const CLIP_CONTENT_TYPE: &str = "audio/wav";

/// Extraction or upload failure for one accumulator. Callers drop that
/// segment and keep scanning — never fatal to the run.
#[derive(Debug, thiserror::Error)]
pub enum FinalizeError {
    #[error("audio extraction failed: {0}")]
    Extract(#[source] BoxError),
    #[error("clip upload failed: {0}")]
    Upload(#[source] BoxError),
}

/// Stable segment id derived from the first utterance's sequence number.
pub fn segment_id(sequence_start: u64) -> String {
    format!("sequence_{sequence_start:04}")
}

pub fn audio_key(output_prefix: &str, segment_id: &str, speaker: &str) -> String {
    format!("{output_prefix}/{segment_id}_{speaker}.wav")
}

/// Close an accumulator: apply the minimum-duration policy, extract and
/// upload its audio, and build the output [`Segment`].
///
/// Returns `Ok(None)` when the accumulator is discarded as too short — no
/// audio work happens and its utterances stay unmapped. On success the
/// accumulator is marked audio-generated so it can serve reuse attaches.
pub(crate) async fn finalize_accumulator(
    accumulator: &mut Accumulator,
    config: &SegmenterConfig,
    source: &str,
    output_prefix: &str,
    extractor: &dyn AudioExtractor,
    store: &dyn ObjectStore,
) -> Result<Option<Segment>, FinalizeError> {
    let total_duration_ms = accumulator.total_duration_ms(config.gap_duration_ms);
    let floor = if accumulator.pending().len() == 1 {
        config.min_duration_ms
    } else {
        config.min_multi_duration_ms
    };
    if total_duration_ms < floor {
        tracing::warn!(
            speaker = %accumulator.speaker(),
            sequence_start = accumulator.sequence_start(),
            total_duration_ms,
            floor_ms = floor,
            "segment_discarded_below_min_duration"
        );
        return Ok(None);
    }

    let segment_id = segment_id(accumulator.sequence_start());
    let audio_key = audio_key(output_prefix, &segment_id, accumulator.speaker());

    tracing::debug!(
        segment_id = %segment_id,
        speaker = %accumulator.speaker(),
        ranges = accumulator.time_ranges().len(),
        sentences = accumulator.pending().len(),
        total_duration_ms,
        "segment_finalizing"
    );

    let clip = extractor
        .extract(source, accumulator.time_ranges(), config.gap_duration_ms)
        .await
        .map_err(FinalizeError::Extract)?;
    store
        .put(&audio_key, clip, CLIP_CONTENT_TYPE)
        .await
        .map_err(FinalizeError::Upload)?;

    let segment = Segment {
        segment_id: segment_id.clone(),
        audio_key: audio_key.clone(),
        speaker: accumulator.speaker().to_string(),
        start_ms: accumulator.start_ms(),
        end_ms: accumulator.end_ms(),
        duration_ms: total_duration_ms,
        sentences: accumulator.sentences(),
    };

    accumulator.mark_generated(GeneratedAudio {
        segment_id,
        audio_key,
    });

    Ok(Some(segment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_id_is_zero_padded() {
        assert_eq!(segment_id(1), "sequence_0001");
        assert_eq!(segment_id(42), "sequence_0042");
        assert_eq!(segment_id(12345), "sequence_12345");
    }

    #[test]
    fn audio_key_includes_prefix_and_speaker() {
        assert_eq!(
            audio_key("task-7/clips", "sequence_0001", "SPEAKER_00"),
            "task-7/clips/sequence_0001_SPEAKER_00.wav"
        );
    }
}
