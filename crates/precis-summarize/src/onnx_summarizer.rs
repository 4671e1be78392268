//! ONNX-based summarization engine driving a BART encoder/decoder export.
//!
//! Loads the encoder and decoder sessions plus the HuggingFace tokenizer
//! and generates summaries by greedy decoding. Requires the `onnx` feature.

#[cfg(feature = "onnx")]
mod inner {
    use std::path::Path;

    use ort::session::Session;
    use ort::value::Tensor;
    use parking_lot::Mutex;
    use tokenizers::Tokenizer;
    use tracing::{debug, info, warn};

    use precis_core::Error;

    use crate::backend::SummarizerBackend;

    /// Maximum encoder sequence length for the model.
    const MAX_INPUT_TOKENS: usize = 1024;

    /// BART vocabulary ids for the control tokens.
    const BOS_TOKEN: i64 = 0;
    const EOS_TOKEN: i64 = 2;
    /// BART starts decoding from EOS.
    const DECODER_START_TOKEN: i64 = 2;

    /// ONNX summarization engine using a BART-style seq2seq export.
    pub struct OnnxSummarizer {
        encoder: Mutex<Session>,
        decoder: Mutex<Session>,
        tokenizer: Tokenizer,
        model_name: String,
    }

    impl OnnxSummarizer {
        /// Load the encoder, decoder and tokenizer from the given directory.
        ///
        /// Expects:
        /// - `model_dir/encoder_model.onnx` — the encoder session
        /// - `model_dir/decoder_model.onnx` — the decoder session
        /// - `model_dir/tokenizer.json` — the HuggingFace tokenizer
        pub fn load(model_dir: &Path) -> Result<Self, String> {
            let encoder_path = model_dir.join("encoder_model.onnx");
            let decoder_path = model_dir.join("decoder_model.onnx");
            let tokenizer_path = model_dir.join("tokenizer.json");

            for path in [&encoder_path, &decoder_path, &tokenizer_path] {
                if !path.exists() {
                    return Err(format!("Model file not found: {}", path.display()));
                }
            }

            // Initialize ONNX Runtime environment.
            // With load-dynamic, ORT_DYLIB_PATH must point to libonnxruntime.so
            ort::init()
                .commit()
                .map_err(|e| format!("Failed to initialize ONNX Runtime: {}", e))?;

            let encoder = build_session(&encoder_path)?;
            let decoder = build_session(&decoder_path)?;

            let tokenizer = Tokenizer::from_file(&tokenizer_path)
                .map_err(|e| format!("Failed to load tokenizer: {}", e))?;

            let model_name = model_dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "onnx".to_string());

            info!(
                "ONNX summarizer loaded: model={}, dir={}",
                model_name,
                model_dir.display()
            );

            Ok(Self {
                encoder: Mutex::new(encoder),
                decoder: Mutex::new(decoder),
                tokenizer,
                model_name,
            })
        }

        /// Greedy-decode a summary of `text` within the given token bounds.
        fn generate(
            &self,
            text: &str,
            max_length: usize,
            min_length: usize,
        ) -> Result<String, String> {
            let encoding = self
                .tokenizer
                .encode(text, true)
                .map_err(|e| format!("Tokenization failed: {}", e))?;

            let input_ids = encoding.get_ids();
            let attention_mask = encoding.get_attention_mask();

            // Truncate to the encoder's positional limit
            let seq_len = input_ids.len().min(MAX_INPUT_TOKENS);
            let ids_data: Vec<i64> = input_ids[..seq_len].iter().map(|&id| id as i64).collect();
            let mask_data: Vec<i64> = attention_mask[..seq_len]
                .iter()
                .map(|&m| m as i64)
                .collect();

            // Run the encoder once; its hidden states feed every decoder step.
            let (enc_seq, hidden_dim, hidden_data) = {
                let ids_tensor = Tensor::from_array(([1usize, seq_len], ids_data))
                    .map_err(|e| format!("Failed to create ids tensor: {}", e))?;
                let mask_tensor = Tensor::from_array(([1usize, seq_len], mask_data.clone()))
                    .map_err(|e| format!("Failed to create mask tensor: {}", e))?;

                let mut encoder = self.encoder.lock();
                let outputs = encoder
                    .run(ort::inputs![
                        "input_ids" => ids_tensor,
                        "attention_mask" => mask_tensor,
                    ])
                    .map_err(|e| format!("Encoder inference failed: {}", e))?;

                let (shape, data) = outputs[0]
                    .try_extract_tensor::<f32>()
                    .map_err(|e| format!("Failed to extract encoder output: {}", e))?;
                let dims: Vec<usize> = shape.iter().map(|&d| d as usize).collect();
                if dims.len() != 3 {
                    return Err(format!("Unexpected encoder output shape: {:?}", dims));
                }
                (dims[1], dims[2], data.to_vec())
            };

            let mut decoder_ids: Vec<i64> = vec![DECODER_START_TOKEN];
            let mut generated: Vec<u32> = Vec::new();

            let mut decoder = self.decoder.lock();
            while generated.len() < max_length {
                let step_len = decoder_ids.len();
                let decoder_tensor =
                    Tensor::from_array(([1usize, step_len], decoder_ids.clone()))
                        .map_err(|e| format!("Failed to create decoder tensor: {}", e))?;
                let hidden_tensor = Tensor::from_array((
                    [1usize, enc_seq, hidden_dim],
                    hidden_data.clone(),
                ))
                .map_err(|e| format!("Failed to create hidden-state tensor: {}", e))?;
                let mask_tensor = Tensor::from_array(([1usize, seq_len], mask_data.clone()))
                    .map_err(|e| format!("Failed to create mask tensor: {}", e))?;

                let outputs = decoder
                    .run(ort::inputs![
                        "input_ids" => decoder_tensor,
                        "encoder_hidden_states" => hidden_tensor,
                        "encoder_attention_mask" => mask_tensor,
                    ])
                    .map_err(|e| format!("Decoder inference failed: {}", e))?;

                let (shape, logits) = outputs[0]
                    .try_extract_tensor::<f32>()
                    .map_err(|e| format!("Failed to extract decoder logits: {}", e))?;
                let dims: Vec<usize> = shape.iter().map(|&d| d as usize).collect();
                if dims.len() != 3 {
                    return Err(format!("Unexpected decoder output shape: {:?}", dims));
                }

                // Logits for the last position decide the next token.
                let vocab = dims[2];
                let last = &logits[(dims[1] - 1) * vocab..dims[1] * vocab];

                // BART forces BOS as the first generated token.
                let next = if generated.is_empty() {
                    BOS_TOKEN
                } else {
                    argmax(last, generated.len() < min_length) as i64
                };

                if next == EOS_TOKEN {
                    break;
                }
                decoder_ids.push(next);
                generated.push(next as u32);
            }
            drop(decoder);

            let summary = self
                .tokenizer
                .decode(&generated, true)
                .map_err(|e| format!("Failed to decode output tokens: {}", e))?;

            debug!(
                "Generated {} tokens from {} input tokens",
                generated.len(),
                seq_len
            );

            Ok(summary.trim().to_string())
        }
    }

    /// Index of the highest logit, skipping EOS while it is suppressed.
    fn argmax(logits: &[f32], suppress_eos: bool) -> usize {
        let mut best = 0usize;
        let mut best_score = f32::NEG_INFINITY;
        for (i, &score) in logits.iter().enumerate() {
            if suppress_eos && i == EOS_TOKEN as usize {
                continue;
            }
            if score > best_score {
                best = i;
                best_score = score;
            }
        }
        best
    }

    impl SummarizerBackend for OnnxSummarizer {
        fn summarize(
            &self,
            text: &str,
            max_length: usize,
            min_length: usize,
        ) -> precis_core::Result<String> {
            self.generate(text, max_length, min_length).map_err(|e| {
                warn!("Summarization failed: {}", e);
                Error::Model(e)
            })
        }

        fn name(&self) -> &str {
            &self.model_name
        }
    }

    /// Build an inference session for one exported graph.
    fn build_session(path: &Path) -> Result<Session, String> {
        Session::builder()
            .map_err(|e| format!("Failed to create session builder: {}", e))?
            .with_intra_threads(2)
            .map_err(|e| format!("Failed to set threads: {}", e))?
            .commit_from_file(path)
            .map_err(|e| format!("Failed to load {}: {}", path.display(), e))
    }
}

#[cfg(feature = "onnx")]
pub use inner::OnnxSummarizer;
