//! # Streaming transcript segmenter
//!
//! Partitions a time-stamped transcript into per-speaker audio segments for
//! downstream processing (voice cloning, denoising). The engine is one
//! forward pass over the speech utterances, threading a single mutable
//! [`Accumulator`] through three decisions per utterance:
//!
//! 1. **Break** — close the open accumulator before this utterance
//!    (speaker change, optional gap break, or the utterance would push the
//!    accumulated duration past the cap).
//! 2. **Open / extend / attach** — seed a new accumulator, merge the
//!    utterance into the open one, or map it directly onto an
//!    already-extracted segment (reuse mode).
//! 3. **Cap** — an accumulator that reached `max_duration_ms` is finalized
//!    immediately and, by default, kept alive for reuse.
//!
//! Finalization cuts the accumulated time ranges from the source track via
//! the [`AudioExtractor`] seam, uploads the clip through [`ObjectStore`],
//! and records which source sentences map to which output segment. Both
//! collaborators are external; this crate ships only their contracts.
//!
//! The scan is inherently sequential — each decision depends on the
//! accumulator state left by the previous utterance — so finalization is
//! awaited inline. Extraction-level parallelism across unrelated segments
//! belongs inside the executor; see [`ThrottledExtractor`].

pub mod accumulator;
pub mod config;
pub mod engine;
pub mod error;
pub mod executor;
pub mod filter;
pub mod finalize;
pub mod mapper;

pub use accumulator::{Accumulator, GeneratedAudio};
pub use config::{ConfigError, SegmenterConfig};
pub use engine::{Segmenter, segment_transcript};
pub use error::Error;
pub use executor::{AudioExtractor, BoxError, BoxFuture, ObjectStore, ThrottledExtractor};
pub use filter::speech_only;
pub use finalize::FinalizeError;
pub use mapper::SentenceMap;
