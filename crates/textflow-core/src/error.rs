//! Error types for Textflow

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FlowError>;

/// Main error type for Textflow
///
/// Every failure surfaces synchronously through one of these variants.
/// Nothing is retried and no partial results escape: a block either lays
/// out and draws completely, or the caller gets the error.
#[derive(Debug, Error)]
pub enum FlowError {
    /// Ambiguous or self-contradictory style input.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A style specification references a segment index outside the block.
    #[error("Segment index {index} out of range for {count} segments")]
    IndexRange { index: usize, count: usize },

    /// Two entries at the same priority tier claim the same index.
    #[error("Conflicting style values for segment index {index}: {detail}")]
    Conflict { index: usize, detail: String },

    /// The external measurement collaborator failed for a segment.
    #[error("Measurement failed: {0}")]
    Measure(String),

    /// The external renderer collaborator failed for a segment.
    #[error("Rendering failed: {0}")]
    Render(String),
}

impl FlowError {
    /// Shorthand used throughout the normalizer.
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
