use seg_transcript_interface::{Segment, SegmentationOutput, Utterance};

use crate::accumulator::Accumulator;
use crate::config::{ConfigError, SegmenterConfig};
use crate::error::Error;
use crate::executor::{AudioExtractor, ObjectStore};
use crate::filter::speech_only;
use crate::finalize::finalize_accumulator;
use crate::mapper::SentenceMap;

/// Why the open accumulator was closed before the current utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BreakReason {
    SpeakerChange,
    GapExceeded,
    WouldExceedCap,
}

/// Streaming segmentation engine: a single forward scan over the filtered
/// utterances, owning one open [`Accumulator`] at a time.
///
/// The scan must stay sequential — every decision depends on the
/// accumulator state the previous utterance left behind — so finalization
/// is awaited inline at each boundary.
pub struct Segmenter {
    config: SegmenterConfig,
}

impl Segmenter {
    pub fn new(config: SegmenterConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Partition `utterances` into segments, extracting and uploading each
    /// finalized clip from `source` under `output_prefix`.
    ///
    /// Best-effort: a failed extraction or upload drops only that segment.
    pub async fn run(
        &self,
        utterances: Vec<Utterance>,
        source: &str,
        output_prefix: &str,
        extractor: &dyn AudioExtractor,
        store: &dyn ObjectStore,
    ) -> SegmentationOutput {
        let speech = speech_only(utterances);
        tracing::info!(utterances = speech.len(), source, "segmentation_started");

        let mut scan = Scan {
            config: &self.config,
            source,
            output_prefix,
            extractor,
            store,
            segments: Vec::new(),
            map: SentenceMap::new(),
        };
        let mut current: Option<Accumulator> = None;

        for utterance in speech {
            if let Some(acc) = current.as_ref()
                && let Some(reason) = self.break_reason(acc, &utterance)
            {
                tracing::debug!(sequence = utterance.sequence, reason = ?reason, "accumulation_break");
                if let Some(mut closed) = current.take()
                    && closed.has_pending()
                {
                    scan.emit(&mut closed).await;
                }
            }

            match current.take() {
                None => current = Some(Accumulator::open(utterance)),
                Some(mut acc) => {
                    if let Some(generated) = acc.generated() {
                        // Reuse mode: the clip already exists, map directly.
                        tracing::debug!(
                            sequence = utterance.sequence,
                            segment_id = %generated.segment_id,
                            "segment_audio_reused"
                        );
                        scan.map
                            .attach(utterance.sequence, generated.segment_id.clone());
                    } else {
                        acc.add(utterance, self.config.gap_threshold_ms());
                    }
                    current = Some(acc);
                }
            }

            let cap_hit = current.as_ref().is_some_and(|acc| {
                !acc.is_audio_generated()
                    && acc.total_duration_ms(self.config.gap_duration_ms)
                        >= self.config.max_duration_ms
            });
            if cap_hit && let Some(mut acc) = current.take() {
                tracing::debug!(
                    sequence_start = acc.sequence_start(),
                    "duration_cap_reached"
                );
                if scan.emit(&mut acc).await && self.config.reuse_on_cap_hit {
                    acc.begin_reuse();
                    current = Some(acc);
                }
            }
        }

        if let Some(mut acc) = current.take()
            && acc.has_pending()
        {
            scan.emit(&mut acc).await;
        }

        tracing::info!(
            segments = scan.segments.len(),
            mapped = scan.map.len(),
            "segmentation_completed"
        );
        SegmentationOutput {
            segments: scan.segments,
            sentence_to_segment_map: scan.map.into_inner(),
        }
    }

    /// Decide whether the open accumulator closes before `utterance`.
    ///
    /// Speaker change always breaks. The gap break is config-gated. The cap
    /// break fires when adding the utterance would push the accumulated
    /// duration past the cap — a reuse-mode accumulator never cap-breaks,
    /// since attaches don't grow it.
    fn break_reason(&self, acc: &Accumulator, utterance: &Utterance) -> Option<BreakReason> {
        if utterance.speaker != acc.speaker() {
            return Some(BreakReason::SpeakerChange);
        }
        if self.config.enable_gap_break && acc.gap_to(utterance) > self.config.gap_threshold_ms() {
            return Some(BreakReason::GapExceeded);
        }
        if !acc.is_audio_generated()
            && acc.projected_duration_ms(
                utterance,
                self.config.gap_duration_ms,
                self.config.gap_threshold_ms(),
            ) > self.config.max_duration_ms
        {
            return Some(BreakReason::WouldExceedCap);
        }
        None
    }
}

/// One segmentation pass's mutable state: collaborators plus the output
/// being assembled.
struct Scan<'a> {
    config: &'a SegmenterConfig,
    source: &'a str,
    output_prefix: &'a str,
    extractor: &'a dyn AudioExtractor,
    store: &'a dyn ObjectStore,
    segments: Vec<Segment>,
    map: SentenceMap,
}

impl Scan<'_> {
    /// Finalize one accumulator and record its segment and sentence
    /// mappings. Returns whether a segment was emitted; failures are logged
    /// and swallowed so the scan continues.
    async fn emit(&mut self, accumulator: &mut Accumulator) -> bool {
        match finalize_accumulator(
            accumulator,
            self.config,
            self.source,
            self.output_prefix,
            self.extractor,
            self.store,
        )
        .await
        {
            Ok(Some(segment)) => {
                for utterance in accumulator.pending() {
                    self.map
                        .attach(utterance.sequence, segment.segment_id.clone());
                }
                self.segments.push(segment);
                true
            }
            Ok(None) => false,
            Err(error) => {
                tracing::warn!(
                    speaker = %accumulator.speaker(),
                    sequence_start = accumulator.sequence_start(),
                    error = %error,
                    "segment_finalize_failed"
                );
                false
            }
        }
    }
}

/// Partition a transcript into per-speaker audio segments.
///
/// Validates `config` up front — [`Error::Config`] is the only failure;
/// everything past validation is best-effort and returns however many
/// segments were produced. Empty or speech-free input yields an empty
/// success.
pub async fn segment_transcript(
    utterances: Vec<Utterance>,
    source: &str,
    output_prefix: &str,
    config: SegmenterConfig,
    extractor: &dyn AudioExtractor,
    store: &dyn ObjectStore,
) -> Result<SegmentationOutput, Error> {
    let segmenter = Segmenter::new(config)?;
    Ok(segmenter
        .run(utterances, source, output_prefix, extractor, store)
        .await)
}
