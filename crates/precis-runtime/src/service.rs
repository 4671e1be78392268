//! Summarization service — engine readiness and request validation.

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use precis_core::{Error, PrecisConfig, Result, SummaryLength};
use precis_summarize::SummarizerBackend;

/// Requests with fewer whitespace-delimited words are rejected.
pub const MIN_INPUT_WORDS: usize = 50;

/// Observable state of the one-time engine load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Loading,
    Ready,
    Failed,
}

/// The engine slot transitions out of `Loading` exactly once.
enum EngineSlot {
    Loading,
    Ready(Arc<dyn SummarizerBackend>),
    Failed(String),
}

/// Shared summarization service.
///
/// The engine loads once, on a background task. Requests that arrive
/// while it is still loading fail with `NotReady`; requests after a
/// failed load carry the load failure reason.
pub struct SummaryService {
    engine: RwLock<EngineSlot>,
}

impl SummaryService {
    /// Create the service and start loading the engine in the background.
    pub fn start(config: PrecisConfig) -> Arc<Self> {
        let service = Arc::new(Self {
            engine: RwLock::new(EngineSlot::Loading),
        });

        let loader = service.clone();
        tokio::spawn(async move {
            let model_dir = config.model_dir.clone();
            let loaded =
                tokio::task::spawn_blocking(move || precis_summarize::create_summarizer(&model_dir))
                    .await
                    .unwrap_or_else(|e| Err(format!("Model loader panicked: {}", e)));

            match loaded {
                Ok(backend) => {
                    info!("Summarization engine ready: {}", backend.name());
                    *loader.engine.write() = EngineSlot::Ready(backend);
                }
                Err(reason) => {
                    warn!("Summarization engine failed to load: {}", reason);
                    *loader.engine.write() = EngineSlot::Failed(reason);
                }
            }
        });

        service
    }

    /// Create a service around an already-loaded engine.
    pub fn with_backend(backend: Arc<dyn SummarizerBackend>) -> Arc<Self> {
        Arc::new(Self {
            engine: RwLock::new(EngineSlot::Ready(backend)),
        })
    }

    /// Current readiness of the engine.
    pub fn readiness(&self) -> Readiness {
        match &*self.engine.read() {
            EngineSlot::Loading => Readiness::Loading,
            EngineSlot::Ready(_) => Readiness::Ready,
            EngineSlot::Failed(_) => Readiness::Failed,
        }
    }

    /// The reason the engine load failed, if it did.
    pub fn load_failure(&self) -> Option<String> {
        match &*self.engine.read() {
            EngineSlot::Failed(reason) => Some(reason.clone()),
            _ => None,
        }
    }

    /// Summarize raw text at the requested length.
    pub fn summarize_text(&self, text: &str, length: SummaryLength) -> Result<String> {
        let backend = match &*self.engine.read() {
            EngineSlot::Loading => return Err(Error::NotReady),
            EngineSlot::Failed(reason) => {
                return Err(Error::Model(format!("Model unavailable: {}", reason)))
            }
            EngineSlot::Ready(backend) => backend.clone(),
        };

        let words = precis_summarize::word_count(text);
        if words < MIN_INPUT_WORDS {
            return Err(Error::TooShort {
                words,
                min_words: MIN_INPUT_WORDS,
            });
        }

        precis_summarize::summarize_text(backend.as_ref(), text, length)
    }

    /// Extract text from a document, then summarize it.
    pub fn summarize_file(&self, path: &Path, length: SummaryLength) -> Result<String> {
        let text = precis_extract::extract_text(path)?;
        self.summarize_text(&text, length)
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;

    /// Engine double that counts calls and returns a fixed summary.
    struct FixedBackend {
        calls: Mutex<usize>,
        reply: &'static str,
    }

    impl FixedBackend {
        fn new(reply: &'static str) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(0),
                reply,
            })
        }
    }

    impl SummarizerBackend for FixedBackend {
        fn summarize(&self, _text: &str, _max_length: usize, _min_length: usize) -> Result<String> {
            *self.calls.lock() += 1;
            Ok(self.reply.to_string())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[test]
    fn test_rejects_input_below_word_floor() {
        let backend = FixedBackend::new("done.");
        let service = SummaryService::with_backend(backend.clone());

        let text = "word ".repeat(49);
        let err = service
            .summarize_text(&text, SummaryLength::Medium)
            .unwrap_err();
        match err {
            Error::TooShort { words, min_words } => {
                assert_eq!(words, 49);
                assert_eq!(min_words, MIN_INPUT_WORDS);
            }
            other => panic!("expected TooShort, got {:?}", other),
        }
        // The engine is never invoked for rejected input.
        assert_eq!(*backend.calls.lock(), 0);
    }

    #[test]
    fn test_accepts_input_at_word_floor() {
        let backend = FixedBackend::new("done.");
        let service = SummaryService::with_backend(backend.clone());

        let text = "word ".repeat(50);
        let summary = service.summarize_text(&text, SummaryLength::Medium).unwrap();
        assert_eq!(summary, "done.");
        assert_eq!(*backend.calls.lock(), 1);
    }

    #[test]
    fn test_not_ready_while_loading() {
        let service = SummaryService {
            engine: RwLock::new(EngineSlot::Loading),
        };
        assert_eq!(service.readiness(), Readiness::Loading);

        let text = "word ".repeat(60);
        let err = service
            .summarize_text(&text, SummaryLength::Short)
            .unwrap_err();
        assert!(matches!(err, Error::NotReady));
    }

    #[test]
    fn test_failed_load_surfaces_reason() {
        let service = SummaryService {
            engine: RwLock::new(EngineSlot::Failed("missing model files".to_string())),
        };
        assert_eq!(service.readiness(), Readiness::Failed);
        assert_eq!(
            service.load_failure().as_deref(),
            Some("missing model files")
        );

        let text = "word ".repeat(60);
        let err = service
            .summarize_text(&text, SummaryLength::Short)
            .unwrap_err();
        match err {
            Error::Model(reason) => assert!(reason.contains("missing model files")),
            other => panic!("expected Model, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_start_reports_failed_load() {
        let dir = tempfile::tempdir().unwrap();
        let config = PrecisConfig {
            model_dir: dir.path().join("missing-model"),
        };
        let service = SummaryService::start(config);

        // The loader runs on a background task; give it time to settle.
        let mut readiness = service.readiness();
        for _ in 0..100 {
            if readiness != Readiness::Loading {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            readiness = service.readiness();
        }

        assert_eq!(readiness, Readiness::Failed);
        assert!(service.load_failure().is_some());
    }
}
