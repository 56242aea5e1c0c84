//! Voice activity filtering.
//!
//! Splits into two halves:
//! - [`detector`]: frame-level speech/non-speech classifiers behind the
//!   [`SpeechDetector`] trait.
//! - [`filter`]: the orchestration that frames a PCM buffer, classifies each
//!   frame, and substitutes silence for non-speech while preserving timing.

pub mod detector;
pub mod filter;

pub use detector::{Aggressiveness, Detector, DetectorKind, EnergyDetector, SpeechDetector};
#[cfg(feature = "webrtc")]
pub use detector::WebRtcDetector;
pub use filter::VoiceActivityFilter;
