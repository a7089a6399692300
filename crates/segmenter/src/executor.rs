use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use seg_transcript_interface::TimeRange;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Cuts and concatenates ranges of a source audio track.
///
/// Given N ranges and a gap duration, an implementation returns one
/// continuous buffer of `sum(range durations) + (N-1) * gap` milliseconds,
/// preserving range order and inserting silence between non-adjacent ranges.
/// Single-range calls should take a fast path (stream copy, no re-encode)
/// where the backing format allows.
///
/// Implementations live outside this crate (ffmpeg invocation or
/// equivalent) and own their timeout policy — the engine treats any error,
/// including expiry, as finalization failure for that one segment.
///
/// # Object safety
///
/// Object-safe via the explicit `BoxFuture` return type; the engine takes
/// `&dyn AudioExtractor`.
pub trait AudioExtractor: Send + Sync {
    fn extract<'a>(
        &'a self,
        source: &'a str,
        ranges: &'a [TimeRange],
        gap_duration_ms: i64,
    ) -> BoxFuture<'a, Result<Bytes, BoxError>>;
}

/// Durable key→bytes storage for finalized clips (S3-compatible store).
///
/// Retries and backoff belong to the implementation, not the engine.
pub trait ObjectStore: Send + Sync {
    fn put<'a>(
        &'a self,
        key: &'a str,
        body: Bytes,
        content_type: &'a str,
    ) -> BoxFuture<'a, Result<(), BoxError>>;
}

/// Caps how many extractions run at once across independent segments.
///
/// The scan itself awaits each finalization inline, so this only matters
/// when one extractor instance is shared by several concurrent segmentation
/// runs — the semaphore keeps the total ffmpeg-equivalent load bounded.
pub struct ThrottledExtractor<E> {
    inner: E,
    permits: Arc<tokio::sync::Semaphore>,
}

impl<E> ThrottledExtractor<E> {
    pub const DEFAULT_PERMITS: usize = 3;

    pub fn new(inner: E) -> Self {
        Self::with_permits(inner, Self::DEFAULT_PERMITS)
    }

    pub fn with_permits(inner: E, permits: usize) -> Self {
        Self {
            inner,
            permits: Arc::new(tokio::sync::Semaphore::new(permits)),
        }
    }
}

impl<E: AudioExtractor> AudioExtractor for ThrottledExtractor<E> {
    fn extract<'a>(
        &'a self,
        source: &'a str,
        ranges: &'a [TimeRange],
        gap_duration_ms: i64,
    ) -> BoxFuture<'a, Result<Bytes, BoxError>> {
        Box::pin(async move {
            let _permit = self.permits.acquire().await.map_err(BoxError::from)?;
            self.inner.extract(source, ranges, gap_duration_ms).await
        })
    }
}
