use crate::config::ConfigError;

/// Top-level failure of a segmentation run.
///
/// Invalid configuration is the only fatal case — per-segment extraction or
/// upload failures are logged, shrink the output, and never surface here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
}
