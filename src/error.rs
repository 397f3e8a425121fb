//! Error type shared by the buffer and the text area.

use thiserror::Error;

/// Failure raised by an operation that takes character offsets.
///
/// Offsets are never clamped: a range that is reversed or runs past the
/// end of the buffer is rejected before anything is mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TextareaError {
    #[error("invalid range {from}..{to} for buffer of {len} chars")]
    InvalidRange { from: usize, to: usize, len: usize },
}

/// Result alias for text area operations.
pub type Result<T> = std::result::Result<T, TextareaError>;

/// Check that `from..to` is an ordered range inside a buffer of `len` chars.
pub(crate) fn check_range(from: usize, to: usize, len: usize) -> Result<()> {
    if from > to || to > len {
        tracing::warn!(from, to, len, "rejected out-of-range offsets");
        return Err(TextareaError::InvalidRange { from, to, len });
    }
    Ok(())
}
