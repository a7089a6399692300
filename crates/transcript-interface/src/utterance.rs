#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Speech,
    Other,
}

impl Default for ContentType {
    fn default() -> Self {
        Self::Speech
    }
}

/// One transcribed unit of speech: who said what, and when.
///
/// `sequence` is assigned upstream and is unique and monotonically
/// non-decreasing across a transcript. The segmenter relies on that ordering
/// and never reorders utterances.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Utterance {
    pub sequence: u64,
    pub speaker: String,
    pub start_ms: i64,
    pub end_ms: i64,
    pub original_text: String,
    #[serde(default)]
    pub translation: Option<String>,
    /// Upstream omits this field for plain speech.
    #[serde(default)]
    pub content_type: ContentType,
}

impl Utterance {
    pub fn duration_ms(&self) -> i64 {
        self.end_ms - self.start_ms
    }

    pub fn is_speech(&self) -> bool {
        self.content_type == ContentType::Speech
    }

    /// Timestamps are well formed when the utterance has positive duration.
    /// Zero- and negative-duration entries are transcription artifacts and
    /// must not reach the segmentation engine.
    pub fn is_well_formed(&self) -> bool {
        self.start_ms < self.end_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_defaults_to_speech() {
        let u: Utterance = serde_json::from_str(
            r#"{"sequence":1,"speaker":"A","startMs":0,"endMs":1200,"originalText":"hi"}"#,
        )
        .unwrap();

        assert_eq!(u.content_type, ContentType::Speech);
        assert!(u.is_speech());
        assert!(u.translation.is_none());
    }

    #[test]
    fn non_speech_and_degenerate_timestamps_detected() {
        let u: Utterance = serde_json::from_str(
            r#"{"sequence":2,"speaker":"A","startMs":500,"endMs":500,"originalText":"","contentType":"other"}"#,
        )
        .unwrap();

        assert!(!u.is_speech());
        assert!(!u.is_well_formed());
    }
}
