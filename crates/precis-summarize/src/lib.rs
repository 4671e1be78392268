//! Precis Summarize — chunked summarization over a pluggable engine.
//!
//! Provides the `SummarizerBackend` trait plus the length arithmetic and
//! chunking pipeline that drive it. When the `onnx` feature is enabled
//! and model files are present, `OnnxSummarizer` runs a BART seq2seq
//! export via ONNX Runtime.

pub mod backend;
pub mod chunking;
pub mod length;
pub mod onnx_summarizer;
pub mod pipeline;

pub use backend::SummarizerBackend;
pub use chunking::{split_fixed, TextChunk, CHUNK_CHARS};
pub use length::LengthSpec;
pub use pipeline::{summarize_text, word_count, DIRECT_CHAR_LIMIT};

#[cfg(feature = "onnx")]
pub use onnx_summarizer::OnnxSummarizer;

use std::path::Path;
use std::sync::Arc;

/// Create the summarization engine for the given model directory.
///
/// Requires the `onnx` feature and the exported model files on disk;
/// there is no degraded fallback engine. Fails with a human-readable
/// reason otherwise.
pub fn create_summarizer(model_dir: &Path) -> Result<Arc<dyn SummarizerBackend>, String> {
    #[cfg(feature = "onnx")]
    {
        let summarizer = OnnxSummarizer::load(model_dir)?;
        tracing::info!("Using ONNX summarizer: {}", summarizer.name());
        return Ok(Arc::new(summarizer));
    }

    #[cfg(not(feature = "onnx"))]
    {
        let _ = model_dir;
        Err("Built without the `onnx` feature; no summarization engine available".to_string())
    }
}
