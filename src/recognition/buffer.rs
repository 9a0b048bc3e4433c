/*!
 * Recognition result buffer.
 *
 * Holds the latest set of recognized spans and throttles ingestion so that
 * at most one frame is being recognized at a time. A request arriving while
 * another is in flight, or within the configured minimum interval of the
 * last accepted request, is dropped rather than queued.
 */

use log::{debug, warn};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::app_config::{RecognitionConfig, RecognitionMode};
use crate::errors::RecognitionError;

use super::{ImageFrame, RecognizedSpan, TextRecognizer};

/// Result of a `process_image` call
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessOutcome {
    /// The frame was recognized and the buffer now holds this many spans
    Processed(usize),
    /// Another frame was still being recognized
    ThrottledInFlight,
    /// The previous accepted request was too recent
    ThrottledInterval,
    /// The recognizer failed; the previous result set is kept
    Failed(RecognitionError),
}

impl ProcessOutcome {
    /// Whether the request was ignored by the throttle
    pub fn is_throttled(&self) -> bool {
        matches!(self, Self::ThrottledInFlight | Self::ThrottledInterval)
    }
}

/// Resets the in-flight flag even if the processing future is dropped
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Latest recognition results with throttled ingestion
#[derive(Debug)]
pub struct RecognitionBuffer {
    recognizer: Arc<dyn TextRecognizer>,
    min_confidence: f32,
    max_spans: usize,
    min_interval: Duration,
    mode: RwLock<RecognitionMode>,
    spans: RwLock<Vec<RecognizedSpan>>,
    processing: AtomicBool,
    last_accepted: Mutex<Option<Instant>>,
    generation: AtomicU64,
}

impl RecognitionBuffer {
    /// Create a buffer in front of the given recognizer
    pub fn new(recognizer: Arc<dyn TextRecognizer>, config: &RecognitionConfig) -> Self {
        Self {
            recognizer,
            min_confidence: config.min_confidence,
            max_spans: config.max_spans,
            min_interval: Duration::from_millis(config.min_interval_ms),
            mode: RwLock::new(config.mode),
            spans: RwLock::new(Vec::new()),
            processing: AtomicBool::new(false),
            last_accepted: Mutex::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// Recognize a frame and replace the buffered spans
    pub async fn process_image(&self, frame: &ImageFrame) -> ProcessOutcome {
        if self
            .processing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Recognition already in progress, dropping frame");
            return ProcessOutcome::ThrottledInFlight;
        }
        let _guard = InFlightGuard(&self.processing);

        {
            let mut last = self.last_accepted.lock();
            if let Some(previous) = *last {
                if previous.elapsed() < self.min_interval {
                    debug!("Frame arrived {:?} after the last one, dropping", previous.elapsed());
                    return ProcessOutcome::ThrottledInterval;
                }
            }
            *last = Some(Instant::now());
        }

        let mode = *self.mode.read();
        match self.recognizer.recognize(frame, mode).await {
            Ok(raw) => {
                let retained = self.retain(raw);
                let count = retained.len();
                *self.spans.write() = retained;
                let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
                debug!("Recognition cycle {} stored {} spans ({} mode)", generation, count, mode);
                ProcessOutcome::Processed(count)
            }
            Err(e) => {
                warn!("Text recognition failed: {}", e);
                ProcessOutcome::Failed(e)
            }
        }
    }

    /// Drop empty spans, order by confidence and keep at most `max_spans`
    fn retain(&self, raw: Vec<RecognizedSpan>) -> Vec<RecognizedSpan> {
        let mut spans: Vec<RecognizedSpan> = raw
            .into_iter()
            .filter(|span| !span.text.trim().is_empty())
            .collect();

        spans.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        spans.truncate(self.max_spans);
        spans
    }

    /// Whether a frame is currently being recognized
    pub fn is_processing(&self) -> bool {
        self.processing.load(Ordering::Acquire)
    }

    /// Discard the buffered spans
    pub fn clear(&self) {
        self.spans.write().clear();
    }

    /// Change the recognition mode used for subsequent frames
    pub fn set_recognition_mode(&self, mode: RecognitionMode) {
        *self.mode.write() = mode;
    }

    /// Current recognition mode
    pub fn recognition_mode(&self) -> RecognitionMode {
        *self.mode.read()
    }

    /// All retained spans from the latest cycle
    pub fn recognized_spans(&self) -> Vec<RecognizedSpan> {
        self.spans.read().clone()
    }

    /// Retained spans whose confidence reaches the detection threshold
    pub fn detected_spans(&self) -> Vec<RecognizedSpan> {
        self.spans
            .read()
            .iter()
            .filter(|span| span.confidence >= self.min_confidence)
            .cloned()
            .collect()
    }

    /// Text of the detected spans
    pub fn detected_texts(&self) -> Vec<String> {
        self.detected_spans().into_iter().map(|span| span.text).collect()
    }

    /// Number of result sets stored so far
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}
