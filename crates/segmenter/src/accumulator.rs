use seg_transcript_interface::{Sentence, TimeRange, Utterance};

/// Marker left on an accumulator once its audio has been extracted and
/// uploaded. While the accumulator stays open, later same-speaker utterances
/// can map onto this segment without triggering new audio work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedAudio {
    pub segment_id: String,
    pub audio_key: String,
}

/// A segment under construction: one speaker, an ordered set of
/// non-overlapping time ranges, and the utterances assigned so far.
///
/// Exactly one accumulator is open at any point of the scan. Ranges are kept
/// minimal — an utterance whose gap to the previous range end is at or below
/// the merge threshold extends that range instead of opening a new one.
#[derive(Debug, Clone)]
pub struct Accumulator {
    speaker: String,
    time_ranges: Vec<TimeRange>,
    pending: Vec<Utterance>,
    sequence_start: u64,
    generated: Option<GeneratedAudio>,
}

impl Accumulator {
    /// Seed a new accumulator with the first utterance of a segment.
    pub fn open(utterance: Utterance) -> Self {
        Self {
            speaker: utterance.speaker.clone(),
            time_ranges: vec![TimeRange::new(utterance.start_ms, utterance.end_ms)],
            sequence_start: utterance.sequence,
            pending: vec![utterance],
            generated: None,
        }
    }

    /// Add a same-speaker utterance, merging into the last time range when
    /// the gap is at or below `gap_threshold_ms`, otherwise opening a new
    /// range. Overlapping timestamps count as a zero gap.
    pub fn add(&mut self, utterance: Utterance, gap_threshold_ms: i64) {
        debug_assert_eq!(utterance.speaker, self.speaker);

        if self.gap_to(&utterance) <= gap_threshold_ms {
            if let Some(range) = self.time_ranges.last_mut() {
                range.end_ms = utterance.end_ms;
            }
        } else {
            self.time_ranges
                .push(TimeRange::new(utterance.start_ms, utterance.end_ms));
        }
        self.pending.push(utterance);
    }

    /// Gap between the last range end and the utterance start, clamped at
    /// zero so overlapping upstream timestamps always merge.
    pub fn gap_to(&self, utterance: &Utterance) -> i64 {
        (utterance.start_ms - self.last_end_ms()).max(0)
    }

    /// Total duration once extracted: speech ranges plus one inserted
    /// silence gap between each pair of ranges.
    pub fn total_duration_ms(&self, gap_duration_ms: i64) -> i64 {
        let speech: i64 = self.time_ranges.iter().map(TimeRange::duration_ms).sum();
        let gaps = self.time_ranges.len().saturating_sub(1) as i64;
        speech + gaps * gap_duration_ms
    }

    /// Duration this accumulator would have after `add(utterance)`, without
    /// mutating it. Used for the would-exceed-cap break decision.
    pub fn projected_duration_ms(
        &self,
        utterance: &Utterance,
        gap_duration_ms: i64,
        gap_threshold_ms: i64,
    ) -> i64 {
        let current = self.total_duration_ms(gap_duration_ms);
        if self.gap_to(utterance) <= gap_threshold_ms {
            current + (utterance.end_ms - self.last_end_ms()).max(0)
        } else {
            current + gap_duration_ms + utterance.duration_ms()
        }
    }

    /// Switch to reuse mode after a cap-hit finalization: the emitted
    /// sentences are done, but speaker and generated audio stay so later
    /// utterances can attach to the same segment.
    pub fn begin_reuse(&mut self) {
        self.pending.clear();
    }

    pub fn mark_generated(&mut self, generated: GeneratedAudio) {
        self.generated = Some(generated);
    }

    pub fn generated(&self) -> Option<&GeneratedAudio> {
        self.generated.as_ref()
    }

    pub fn is_audio_generated(&self) -> bool {
        self.generated.is_some()
    }

    pub fn speaker(&self) -> &str {
        &self.speaker
    }

    pub fn sequence_start(&self) -> u64 {
        self.sequence_start
    }

    pub fn time_ranges(&self) -> &[TimeRange] {
        &self.time_ranges
    }

    pub fn pending(&self) -> &[Utterance] {
        &self.pending
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn start_ms(&self) -> i64 {
        self.time_ranges.first().map_or(0, |r| r.start_ms)
    }

    pub fn end_ms(&self) -> i64 {
        self.last_end_ms()
    }

    fn last_end_ms(&self) -> i64 {
        self.time_ranges.last().map_or(0, |r| r.end_ms)
    }

    pub fn sentences(&self) -> Vec<Sentence> {
        self.pending
            .iter()
            .map(|u| Sentence {
                sequence: u.sequence,
                original_text: u.original_text.clone(),
                translation: u.translation.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utterance(sequence: u64, start_ms: i64, end_ms: i64) -> Utterance {
        Utterance {
            sequence,
            speaker: "A".into(),
            start_ms,
            end_ms,
            original_text: format!("u{sequence}"),
            translation: None,
            content_type: Default::default(),
        }
    }

    #[test]
    fn small_gap_extends_last_range() {
        let mut acc = Accumulator::open(utterance(1, 0, 2000));
        acc.add(utterance(2, 2100, 4000), 1500);

        assert_eq!(acc.time_ranges(), [TimeRange::new(0, 4000)]);
        assert_eq!(acc.total_duration_ms(500), 4000);
    }

    #[test]
    fn gap_at_threshold_still_merges() {
        let mut acc = Accumulator::open(utterance(1, 0, 1000));
        acc.add(utterance(2, 2500, 3000), 1500);

        assert_eq!(acc.time_ranges(), [TimeRange::new(0, 3000)]);
    }

    #[test]
    fn gap_above_threshold_opens_new_range() {
        let mut acc = Accumulator::open(utterance(1, 0, 1000));
        acc.add(utterance(2, 2501, 3000), 1500);

        assert_eq!(
            acc.time_ranges(),
            [TimeRange::new(0, 1000), TimeRange::new(2501, 3000)]
        );
        // 1000ms + 499ms speech, one inserted 500ms gap
        assert_eq!(acc.total_duration_ms(500), 1999);
    }

    #[test]
    fn overlapping_timestamps_merge_as_zero_gap() {
        let mut acc = Accumulator::open(utterance(1, 0, 2000));
        // starts before the previous utterance ended
        acc.add(utterance(2, 1800, 3000), 1500);

        assert_eq!(acc.time_ranges(), [TimeRange::new(0, 3000)]);
    }

    #[test]
    fn projected_duration_matches_actual_add() {
        let mut acc = Accumulator::open(utterance(1, 0, 5000));

        let merged = utterance(2, 5000, 10_000);
        assert_eq!(acc.projected_duration_ms(&merged, 500, 1500), 10_000);
        acc.add(merged, 1500);
        assert_eq!(acc.total_duration_ms(500), 10_000);

        let split = utterance(3, 13_000, 14_000);
        assert_eq!(acc.projected_duration_ms(&split, 500, 1500), 11_500);
        acc.add(split, 1500);
        assert_eq!(acc.total_duration_ms(500), 11_500);
    }

    #[test]
    fn begin_reuse_clears_pending_but_keeps_audio() {
        let mut acc = Accumulator::open(utterance(1, 0, 13_000));
        acc.mark_generated(GeneratedAudio {
            segment_id: "sequence_0001".into(),
            audio_key: "clips/sequence_0001_A.wav".into(),
        });
        acc.begin_reuse();

        assert!(!acc.has_pending());
        assert!(acc.is_audio_generated());
        assert_eq!(acc.generated().unwrap().segment_id, "sequence_0001");
        assert_eq!(acc.speaker(), "A");
    }
}
