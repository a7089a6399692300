//! Wire-level data model shared between the transcription service and the
//! audio segmenter.
//!
//! Types here mirror the upstream JSON shapes (camelCase field names) and
//! carry no segmentation logic. Convert provider-specific payloads into
//! [`Utterance`]s before feeding them to the segmenter core.

mod range;
mod segment;
mod utterance;

pub use range::TimeRange;
pub use segment::{Segment, SegmentationOutput, Sentence};
pub use utterance::{ContentType, Utterance};
