//! Generation bounds derived from the requested ratio.

use precis_core::SummaryLength;

/// Floor and ceiling for the overall target, in words.
const TARGET_FLOOR: usize = 30;
const TARGET_CEILING: usize = 500;

/// Generation bounds for a summarization request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthSpec {
    /// Upper generation bound (`max_length`).
    pub target: usize,
    /// Lower generation bound (`min_length`).
    pub min: usize,
}

impl LengthSpec {
    /// Derive bounds from the input word count and the requested length.
    ///
    /// `target` is the ratio applied to the word count, clamped to
    /// [30, 500]; `min` is 30% of the target, floored at 10.
    pub fn for_input(word_count: usize, length: SummaryLength) -> Self {
        let target = ((word_count as f64 * length.ratio()).round() as usize)
            .clamp(TARGET_FLOOR, TARGET_CEILING);
        let min = ((target as f64 * 0.3).floor() as usize).max(10);
        Self { target, min }
    }

    /// Per-chunk bounds when the input is split into `chunks` pieces.
    ///
    /// The budget is divided across chunks with a little additive slack;
    /// per-chunk `max_length` is capped at 150 and `min_length` at 20.
    pub fn per_chunk(&self, chunks: usize) -> Self {
        Self {
            target: (self.target / chunks + 30).min(150),
            min: (self.min / chunks + 5).min(20),
        }
    }
}
