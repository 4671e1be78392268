//! Fixed-size character chunking for long inputs.
//!
//! Inputs over the direct-summarization cutoff are split into consecutive
//! 900-character chunks so each stays under the model's input window
//! without tokenizing first. Boundaries fall on `char` boundaries, never
//! inside a multi-byte character, and concatenating the chunks reproduces
//! the source text exactly.

/// Chunk size in characters for the long-text path.
pub const CHUNK_CHARS: usize = 900;

/// A contiguous character slice of the source text.
#[derive(Debug, Clone)]
pub struct TextChunk {
    pub text: String,
    pub chunk_index: usize,
    pub total_chunks: usize,
    pub start_char: usize,
    pub end_char: usize,
}

/// Partition `text` into consecutive chunks of `size` characters.
///
/// The partition is complete, non-overlapping, and order-preserving; the
/// final chunk may be shorter. Offsets are in characters.
pub fn split_fixed(text: &str, size: usize) -> Vec<TextChunk> {
    let chars: Vec<char> = text.chars().collect();
    let total = chars.len().div_ceil(size);

    let mut chunks = Vec::with_capacity(total);
    for (chunk_index, slice) in chars.chunks(size).enumerate() {
        let start_char = chunk_index * size;
        chunks.push(TextChunk {
            text: slice.iter().collect(),
            chunk_index,
            total_chunks: total,
            start_char,
            end_char: start_char + slice.len(),
        });
    }
    chunks
}
