/*!
 * Mock text recognizer for tests and the demo CLI.
 *
 * - `MockRecognizer::with_spans()` - Returns the same spans for every frame
 * - `MockRecognizer::scripted()` - Returns spans chosen by the frame label
 * - `MockRecognizer::failing()` - Always fails with an engine error
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::app_config::RecognitionMode;
use crate::errors::RecognitionError;

use super::{BoundingBox, ImageFrame, RecognizedSpan, TextRecognizer};

/// Mock recognizer returning canned spans
#[derive(Debug, Clone)]
pub struct MockRecognizer {
    /// Spans returned for frames without a matching scene
    default_spans: Vec<RecognizedSpan>,
    /// Spans returned for frames with a given label
    scenes: HashMap<String, Vec<RecognizedSpan>>,
    /// Simulated processing time
    delay: Option<Duration>,
    /// Whether every call fails
    failing: bool,
    /// Number of recognize calls, shared between clones
    calls: Arc<AtomicUsize>,
    /// Mode of the most recent call
    last_mode: Arc<Mutex<Option<RecognitionMode>>>,
}

impl MockRecognizer {
    fn new(default_spans: Vec<RecognizedSpan>, failing: bool) -> Self {
        Self {
            default_spans,
            scenes: HashMap::new(),
            delay: None,
            failing,
            calls: Arc::new(AtomicUsize::new(0)),
            last_mode: Arc::new(Mutex::new(None)),
        }
    }

    /// Return the same spans for every frame
    pub fn with_spans(spans: Vec<RecognizedSpan>) -> Self {
        Self::new(spans, false)
    }

    /// Recognizer that always fails
    pub fn failing() -> Self {
        Self::new(Vec::new(), true)
    }

    /// Recognizer preloaded with labelled test scenes
    ///
    /// * `test_english` - two confident English spans
    /// * `test_mixed` - a word and a number
    /// * `test_low_quality` - one low-confidence span
    pub fn scripted() -> Self {
        Self::new(Vec::new(), false)
            .with_scene(
                "test_english",
                vec![
                    RecognizedSpan::new("Hello World", 0.95, BoundingBox::new(0.1, 0.1, 0.8, 0.2)),
                    RecognizedSpan::new("Welcome", 0.92, BoundingBox::new(0.1, 0.3, 0.5, 0.1)),
                ],
            )
            .with_scene(
                "test_mixed",
                vec![
                    RecognizedSpan::new("Test", 0.88, BoundingBox::new(0.2, 0.2, 0.3, 0.1)),
                    RecognizedSpan::new("123", 0.75, BoundingBox::new(0.5, 0.5, 0.2, 0.1)),
                ],
            )
            .with_scene(
                "test_low_quality",
                vec![RecognizedSpan::new("Blurry", 0.45, BoundingBox::new(0.3, 0.3, 0.4, 0.15))],
            )
    }

    /// Add spans returned for frames carrying `label`
    pub fn with_scene(mut self, label: &str, spans: Vec<RecognizedSpan>) -> Self {
        self.scenes.insert(label.to_string(), spans);
        self
    }

    /// Simulate a slow engine
    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay = Some(Duration::from_millis(delay_ms));
        self
    }

    /// Number of recognize calls made so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Mode passed to the most recent call
    pub fn last_mode(&self) -> Option<RecognitionMode> {
        *self.last_mode.lock()
    }
}

#[async_trait]
impl TextRecognizer for MockRecognizer {
    async fn recognize(
        &self,
        frame: &ImageFrame,
        mode: RecognitionMode,
    ) -> Result<Vec<RecognizedSpan>, RecognitionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_mode.lock() = Some(mode);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing {
            return Err(RecognitionError::EngineFailed("Simulated recognizer failure".to_string()));
        }

        let spans = frame
            .label
            .as_ref()
            .and_then(|label| self.scenes.get(label))
            .unwrap_or(&self.default_spans);

        Ok(spans.clone())
    }
}
