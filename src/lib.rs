//! `subwave`: audio segmentation and subtitle timing for transcription
//! pipelines.
//!
//! This crate provides:
//! - Voice activity filtering that suppresses non-speech audio while
//!   preserving sample-accurate timing
//! - Fixed-duration PCM framing with a deterministic tail-drop rule
//! - WAV reading/writing with atomic finalization
//! - SRT timecode formatting and subtitle document assembly
//! - A per-input pipeline plus a worker-pool batch layer over it
//!
//! The audio extractor (video → PCM) and the transcriber (PCM → timed text
//! spans) are collaborators behind traits; this crate is the plumbing between
//! them.

// High-level API (most consumers should start here).
pub mod opts;
pub mod pipeline;

// Batch processing over independent inputs.
pub mod batch;

// Audio framing, classification, and filtering.
pub mod frame;
pub mod vad;
pub mod wav;

// Collaborator seams.
pub mod extractor;
pub mod transcriber;

// Span data structures and timecode formatting.
pub mod segments;
pub mod timecode;

// Output selection and encoder interfaces.
pub mod output_type;
pub mod segment_encoder;

// Output encoders that serialize spans into various formats.
pub mod json_array_encoder;
pub mod srt_encoder;

// Logging configuration and control.
#[cfg(feature = "logging")]
pub mod logging;

mod error;

pub use error::{Error, Result};
