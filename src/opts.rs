use crate::frame::FrameDuration;
use crate::output_type::OutputType;
use crate::vad::{Aggressiveness, DetectorKind};

/// Options that control how one input is processed.
///
/// This struct represents *library-level configuration*, not CLI flags
/// directly. The CLI maps user input into this type so that other frontends
/// (tests, batch jobs, services) can construct options programmatically.
#[derive(Debug, Clone)]
pub struct Opts {
    /// Whether to suppress non-speech audio before transcription.
    ///
    /// When enabled, non-speech frames are zeroed in the buffer handed to
    /// the transcriber; the timeline is preserved either way.
    pub enable_voice_activity_detection: bool,

    /// Which frame classifier the filter runs.
    pub detector: DetectorKind,

    /// Classifier aggressiveness (0–3 scale; higher suppresses more).
    pub aggressiveness: Aggressiveness,

    /// Frame duration used for classification.
    pub frame_duration: FrameDuration,

    /// The desired output format for transcript spans.
    pub output_type: OutputType,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            enable_voice_activity_detection: true,
            detector: DetectorKind::default(),
            aggressiveness: Aggressiveness::default(),
            frame_duration: FrameDuration::default(),
            output_type: OutputType::default(),
        }
    }
}
