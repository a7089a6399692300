use std::collections::BTreeMap;

/// Per-segment echo of one source utterance's text.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sentence {
    pub sequence: u64,
    pub original_text: String,
    #[serde(default)]
    pub translation: Option<String>,
}

/// One finalized audio clip plus the utterances it was cut from.
///
/// `segment_id` is derived from the first utterance's sequence number, so a
/// given transcript always produces the same ids. `duration_ms` includes the
/// silence gaps inserted between non-adjacent time ranges at extraction time
/// and can therefore exceed `end_ms - start_ms`'s covered speech.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub segment_id: String,
    pub audio_key: String,
    pub speaker: String,
    pub start_ms: i64,
    pub end_ms: i64,
    pub duration_ms: i64,
    pub sentences: Vec<Sentence>,
}

/// Result of a full segmentation pass.
///
/// Utterances discarded for being too short appear in neither field — callers
/// must treat "absent from the map" as "this utterance has no audio segment."
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentationOutput {
    pub segments: Vec<Segment>,
    pub sentence_to_segment_map: BTreeMap<u64, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_serializes_with_camel_case_keys() {
        let segment = Segment {
            segment_id: "sequence_0001".into(),
            audio_key: "clips/sequence_0001_A.wav".into(),
            speaker: "A".into(),
            start_ms: 0,
            end_ms: 4000,
            duration_ms: 4000,
            sentences: vec![Sentence {
                sequence: 1,
                original_text: "hello".into(),
                translation: None,
            }],
        };

        let json = serde_json::to_value(&segment).unwrap();
        assert_eq!(json["segmentId"], "sequence_0001");
        assert_eq!(json["audioKey"], "clips/sequence_0001_A.wav");
        assert_eq!(json["durationMs"], 4000);
        assert_eq!(json["sentences"][0]["originalText"], "hello");
    }
}
