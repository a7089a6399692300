use std::collections::BTreeMap;

/// Index from source utterance sequence number to emitted segment id.
///
/// Populated when an accumulator finalizes successfully, or immediately on a
/// reuse-mode attach. Utterances of discarded accumulators get no entry, so
/// an absent key means "this utterance has no audio segment."
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct SentenceMap(BTreeMap<u64, String>);

impl SentenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, sequence: u64, segment_id: impl Into<String>) {
        self.0.insert(sequence, segment_id.into());
    }

    pub fn get(&self, sequence: u64) -> Option<&str> {
        self.0.get(&sequence).map(String::as_str)
    }

    pub fn contains(&self, sequence: u64) -> bool {
        self.0.contains_key(&sequence)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<u64, String> {
        self.0
    }
}
