//! Chunked summarization pipeline.
//!
//! Inputs at or below [`DIRECT_CHAR_LIMIT`] characters go to the engine
//! in a single call. Longer inputs are split into fixed-size chunks,
//! each chunk is summarized with a divided budget, and the stitched
//! result gets one corrective pass when it still overshoots the target.

use precis_core::{Result, SummaryLength};
use tracing::{debug, info};

use crate::backend::SummarizerBackend;
use crate::chunking::{split_fixed, CHUNK_CHARS};
use crate::length::LengthSpec;

/// Inputs at or below this many characters are summarized in one call.
pub const DIRECT_CHAR_LIMIT: usize = 1000;

/// Number of whitespace-delimited words in `text`.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Summarize `text` at the requested length.
pub fn summarize_text(
    backend: &dyn SummarizerBackend,
    text: &str,
    length: SummaryLength,
) -> Result<String> {
    let words = word_count(text);
    let bounds = LengthSpec::for_input(words, length);
    let chars = text.chars().count();
    debug!(
        "Summarizing {} words / {} chars at {} (target={}, min={})",
        words, chars, length, bounds.target, bounds.min
    );

    if chars <= DIRECT_CHAR_LIMIT {
        return backend.summarize(text, bounds.target, bounds.min);
    }

    let chunks = split_fixed(text, CHUNK_CHARS);
    let per_chunk = bounds.per_chunk(chunks.len());
    let mut parts = Vec::with_capacity(chunks.len());
    for chunk in &chunks {
        info!(
            "Summarizing part {}/{}",
            chunk.chunk_index + 1,
            chunk.total_chunks
        );
        parts.push(backend.summarize(&chunk.text, per_chunk.target, per_chunk.min)?);
    }

    let combined = parts.join(" ");
    if word_count(&combined) > bounds.target {
        debug!(
            "Combined chunk summaries run {} words, condensing to {}",
            word_count(&combined),
            bounds.target
        );
        return backend.summarize(&combined, bounds.target, bounds.min);
    }
    Ok(combined)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use parking_lot::Mutex;
    use precis_core::Error;

    use super::*;

    /// Test double that records every call and replays a canned script.
    struct ScriptedBackend {
        calls: Mutex<Vec<(String, usize, usize)>>,
        script: Mutex<VecDeque<Result<String>>>,
    }

    impl ScriptedBackend {
        fn new(script: Vec<Result<String>>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                script: Mutex::new(script.into()),
            }
        }

        fn calls(&self) -> Vec<(String, usize, usize)> {
            self.calls.lock().clone()
        }
    }

    impl SummarizerBackend for ScriptedBackend {
        fn summarize(&self, text: &str, max_length: usize, min_length: usize) -> Result<String> {
            self.calls
                .lock()
                .push((text.to_string(), max_length, min_length));
            self.script
                .lock()
                .pop_front()
                .unwrap_or_else(|| Err(Error::Model("script exhausted".to_string())))
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    #[test]
    fn test_short_input_is_a_single_call() {
        let backend = ScriptedBackend::new(vec![Ok("a terse recap.".to_string())]);
        let text = "word ".repeat(60); // 300 chars, 60 words
        let summary = summarize_text(&backend, &text, SummaryLength::Short).unwrap();
        assert_eq!(summary, "a terse recap.");
        let calls = backend.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], (text, 30, 10));
    }

    #[test]
    fn test_input_at_the_char_limit_stays_direct() {
        let backend = ScriptedBackend::new(vec![Ok("summary.".to_string())]);
        let text = format!("{}c", "ab ".repeat(333));
        assert_eq!(text.chars().count(), 1000);
        summarize_text(&backend, &text, SummaryLength::Medium).unwrap();
        let calls = backend.calls();
        assert_eq!(calls.len(), 1);
        // 334 words at the medium ratio.
        assert_eq!(calls[0].1, 100);
        assert_eq!(calls[0].2, 30);
    }

    #[test]
    fn test_input_just_over_the_limit_is_chunked() {
        let backend =
            ScriptedBackend::new(vec![Ok("one.".to_string()), Ok("two.".to_string())]);
        let text = format!("{}cd", "ab ".repeat(333));
        assert_eq!(text.chars().count(), 1001);
        let summary = summarize_text(&backend, &text, SummaryLength::Medium).unwrap();
        assert_eq!(summary, "one. two.");
        let calls = backend.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0.chars().count(), 900);
        assert_eq!(calls[1].0.chars().count(), 101);
        // The chunks cover the input exactly, in order.
        let stitched = format!("{}{}", calls[0].0, calls[1].0);
        assert_eq!(stitched, text);
        for call in &calls {
            assert_eq!(call.1, 80); // 100/2 + 30
            assert_eq!(call.2, 20); // 30/2 + 5, capped at 20
        }
    }

    #[test]
    fn test_chunk_count_tracks_input_size() {
        let sentence = "alpha beta gamma delta epsilon ".repeat(4); // 20 words
        let text = sentence.repeat(20);
        let chars = text.chars().count();
        assert!(chars > DIRECT_CHAR_LIMIT);
        let expected_chunks = chars.div_ceil(CHUNK_CHARS);
        let script = (0..expected_chunks)
            .map(|_| Ok("part.".to_string()))
            .collect();
        let backend = ScriptedBackend::new(script);
        summarize_text(&backend, &text, SummaryLength::Medium).unwrap();
        assert_eq!(backend.calls().len(), expected_chunks);
    }

    #[test]
    fn test_oversized_combination_gets_one_corrective_pass() {
        let verbose = "lorem ".repeat(60).trim_end().to_string();
        let backend = ScriptedBackend::new(vec![
            Ok(verbose.clone()),
            Ok(verbose.clone()),
            Ok("tight summary.".to_string()),
        ]);
        let text = "word ".repeat(300); // 1500 chars, two chunks
        let summary = summarize_text(&backend, &text, SummaryLength::Medium).unwrap();
        assert_eq!(summary, "tight summary.");
        let calls = backend.calls();
        assert_eq!(calls.len(), 3);
        // The stitched 120-word result exceeds the 90-word target, so it
        // is condensed once under the original bounds.
        let stitched = format!("{} {}", verbose, verbose);
        assert_eq!(calls[2], (stitched, 90, 27));
    }

    #[test]
    fn test_engine_failure_stops_the_pipeline() {
        let backend = ScriptedBackend::new(vec![
            Ok("fine.".to_string()),
            Err(Error::Model("engine exploded".to_string())),
        ]);
        let text = "word ".repeat(300);
        let err = summarize_text(&backend, &text, SummaryLength::Medium).unwrap_err();
        assert!(matches!(err, Error::Model(_)));
        assert_eq!(backend.calls().len(), 2);
    }

    #[test]
    fn test_path_selection_uses_chars_not_words() {
        // Many words but few characters: one direct call.
        let backend = ScriptedBackend::new(vec![Ok("short.".to_string())]);
        let dense = "ab ".repeat(250); // 750 chars, 250 words
        summarize_text(&backend, &dense, SummaryLength::Medium).unwrap();
        assert_eq!(backend.calls().len(), 1);

        // Few words but many characters: chunked.
        let backend =
            ScriptedBackend::new(vec![Ok("first.".to_string()), Ok("second.".to_string())]);
        let sparse = "supercalifragilistic ".repeat(52); // 1092 chars, 52 words
        summarize_text(&backend, &sparse, SummaryLength::Medium).unwrap();
        assert_eq!(backend.calls().len(), 2);
    }

    #[test]
    fn test_word_count_splits_on_any_whitespace() {
        assert_eq!(word_count("one two\tthree\nfour   five "), 5);
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
    }
}
