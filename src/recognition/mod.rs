/*!
 * Text recognition results and the OCR engine seam.
 *
 * The OCR engine itself is an external capability; this module defines
 * the span types it produces, the `TextRecognizer` trait it is reached
 * through, and the `RecognitionBuffer` that throttles ingestion and holds
 * the latest result set for the translation orchestrator.
 */

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::app_config::RecognitionMode;
use crate::errors::RecognitionError;

pub mod buffer;
pub mod mock;

pub use buffer::{ProcessOutcome, RecognitionBuffer};
pub use mock::MockRecognizer;

/// Normalized rectangle; every component lies in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    /// Create a bounding box, clamping every component into [0, 1]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x: clamp_unit(x),
            y: clamp_unit(y),
            width: clamp_unit(width),
            height: clamp_unit(height),
        }
    }
}

/// A single recognized text region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedSpan {
    /// Recognized text
    pub text: String,
    /// Engine confidence in [0, 1]
    pub confidence: f32,
    /// Location of the text in the frame
    pub bounding_box: BoundingBox,
}

impl RecognizedSpan {
    /// Create a span, clamping the confidence into [0, 1]
    pub fn new(text: impl Into<String>, confidence: f32, bounding_box: BoundingBox) -> Self {
        Self {
            text: text.into(),
            confidence: clamp_unit(confidence),
            bounding_box,
        }
    }
}

/// A camera frame handed to the recognizer
#[derive(Debug, Clone, Default)]
pub struct ImageFrame {
    /// Pixel width
    pub width: u32,
    /// Pixel height
    pub height: u32,
    /// Encoded or raw image data
    pub data: Bytes,
    /// Optional label identifying the frame source
    pub label: Option<String>,
}

impl ImageFrame {
    /// Create a frame from raw data
    pub fn new(width: u32, height: u32, data: impl Into<Bytes>) -> Self {
        Self {
            width,
            height,
            data: data.into(),
            label: None,
        }
    }

    /// Attach a label to the frame
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// External OCR capability
#[async_trait]
pub trait TextRecognizer: Send + Sync + Debug {
    /// Recognize text in a frame
    ///
    /// # Arguments
    /// * `frame` - The frame to process
    /// * `mode` - Speed/accuracy trade-off requested by the caller
    async fn recognize(
        &self,
        frame: &ImageFrame,
        mode: RecognitionMode,
    ) -> Result<Vec<RecognizedSpan>, RecognitionError>;
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}
