//! Summarization engine trait.
//!
//! The `SummarizerBackend` trait abstracts over abstractive summary
//! generation. Implementations:
//! - `OnnxSummarizer`: ONNX Runtime with a BART CNN export (requires the `onnx` feature)
//! - Scripted doubles in tests

use precis_core::Result;

/// Trait for summarization backends.
///
/// `max_length` and `min_length` are generation bounds in model tokens,
/// passed through to the underlying model as-is.
pub trait SummarizerBackend: Send + Sync {
    /// Generate an abstractive summary of `text` within the given bounds.
    fn summarize(&self, text: &str, max_length: usize, min_length: usize) -> Result<String>;

    /// Backend name for logs.
    fn name(&self) -> &str;
}
