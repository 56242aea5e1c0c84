//! Frame-level speech classifiers.
//!
//! The filter only depends on the [`SpeechDetector`] signature; the decision
//! algorithm behind it is a swappable capability. This module ships a simple
//! RMS-energy reference detector, and (behind the `webrtc` feature) an
//! adapter over the `webrtc-vad` crate's GMM classifier.

use crate::error::{Error, Result};
use crate::frame::{BYTES_PER_SAMPLE, FrameDuration, SampleRate};

/// Classifier aggressiveness on the conventional 0–3 scale.
///
/// Higher modes are stricter about what counts as speech, so more frames are
/// classified as non-speech. Defaults to the most aggressive mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Aggressiveness {
    /// Least aggressive; best for clean audio.
    Quality = 0,
    /// Low-bitrate optimised.
    LowBitrate = 1,
    /// More aggressive; good for moderate background noise.
    Aggressive = 2,
    /// Most aggressive; best for noisy sources.
    #[default]
    VeryAggressive = 3,
}

impl TryFrom<u8> for Aggressiveness {
    type Error = Error;

    fn try_from(level: u8) -> Result<Self> {
        match level {
            0 => Ok(Aggressiveness::Quality),
            1 => Ok(Aggressiveness::LowBitrate),
            2 => Ok(Aggressiveness::Aggressive),
            3 => Ok(Aggressiveness::VeryAggressive),
            other => Err(Error::format(format!(
                "unsupported aggressiveness: {other} (expected 0..=3)"
            ))),
        }
    }
}

/// A frame-level binary speech/non-speech decision.
///
/// Contract:
/// - `frame` must have exactly the byte length the framer produces for
///   `rate` and the detector's configured frame duration; anything else is
///   an [`Error::InvalidFrame`].
/// - The decision is a function of the frame and rate alone. Implementations
///   may smooth internally, but callers must not rely on cross-frame state.
pub trait SpeechDetector {
    fn is_speech(&mut self, frame: &[u8], rate: SampleRate) -> Result<bool>;
}

/// Selects which classifier a pipeline runs, from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum DetectorKind {
    /// RMS-energy thresholding.
    #[default]
    Energy,

    /// GMM-based classification via the `webrtc-vad` crate.
    #[cfg(feature = "webrtc")]
    WebRtc,
}

/// Enum-dispatched detector so callers can pick a classifier from
/// configuration without going generic.
pub enum Detector {
    Energy(EnergyDetector),
    #[cfg(feature = "webrtc")]
    WebRtc(WebRtcDetector),
}

impl Detector {
    /// Build the configured detector.
    ///
    /// `rate` matters only to detectors whose backing implementation binds
    /// the rate at construction time (the WebRTC classifier does).
    pub fn build(
        kind: DetectorKind,
        aggressiveness: Aggressiveness,
        duration: FrameDuration,
        rate: SampleRate,
    ) -> Detector {
        match kind {
            DetectorKind::Energy => {
                let _ = rate;
                Detector::Energy(EnergyDetector::new(aggressiveness, duration))
            }
            #[cfg(feature = "webrtc")]
            DetectorKind::WebRtc => {
                Detector::WebRtc(WebRtcDetector::new(aggressiveness, duration, rate))
            }
        }
    }
}

impl SpeechDetector for Detector {
    fn is_speech(&mut self, frame: &[u8], rate: SampleRate) -> Result<bool> {
        match self {
            Detector::Energy(d) => d.is_speech(frame, rate),
            #[cfg(feature = "webrtc")]
            Detector::WebRtc(d) => d.is_speech(frame, rate),
        }
    }
}

/// Reference detector: RMS energy against an aggressiveness-mapped threshold.
///
/// Stateless across frames, so filtering an already-filtered buffer is
/// idempotent: zeroed frames have zero RMS and stay classified as non-speech.
pub struct EnergyDetector {
    duration: FrameDuration,
    threshold: f32,
}

impl EnergyDetector {
    pub fn new(aggressiveness: Aggressiveness, duration: FrameDuration) -> Self {
        Self {
            duration,
            threshold: rms_threshold(aggressiveness),
        }
    }
}

impl SpeechDetector for EnergyDetector {
    fn is_speech(&mut self, frame: &[u8], rate: SampleRate) -> Result<bool> {
        check_frame_len(frame, rate, self.duration)?;
        Ok(rms(frame) > self.threshold)
    }
}

/// RMS threshold per aggressiveness mode.
///
/// Anchored at 0.02 for `Aggressive` (full-scale sine is ~0.707, ordinary
/// speech sits well above 0.02) and scaled a binary step per mode.
fn rms_threshold(aggressiveness: Aggressiveness) -> f32 {
    match aggressiveness {
        Aggressiveness::Quality => 0.005,
        Aggressiveness::LowBitrate => 0.01,
        Aggressiveness::Aggressive => 0.02,
        Aggressiveness::VeryAggressive => 0.04,
    }
}

/// Root mean square of a mono 16-bit little-endian frame, normalized to
/// `[0.0, 1.0]`.
fn rms(frame: &[u8]) -> f32 {
    if frame.is_empty() {
        return 0.0;
    }

    let mut sum_squares = 0.0f64;
    for pair in frame.chunks_exact(BYTES_PER_SAMPLE) {
        let sample = i16::from_le_bytes([pair[0], pair[1]]);
        let normalized = sample as f64 / i16::MAX as f64;
        sum_squares += normalized * normalized;
    }

    let mean_square = sum_squares / (frame.len() / BYTES_PER_SAMPLE) as f64;
    mean_square.sqrt() as f32
}

fn check_frame_len(frame: &[u8], rate: SampleRate, duration: FrameDuration) -> Result<()> {
    let expected = duration.frame_bytes(rate);
    if frame.len() != expected {
        return Err(Error::InvalidFrame {
            expected,
            actual: frame.len(),
        });
    }
    Ok(())
}

/// Adapter over the `webrtc-vad` crate.
///
/// The underlying classifier binds its sample rate at construction and is
/// `!Send`, so concurrent pipelines must each hold their own instance.
#[cfg(feature = "webrtc")]
pub struct WebRtcDetector {
    vad: webrtc_vad::Vad,
    duration: FrameDuration,
    rate: SampleRate,
}

#[cfg(feature = "webrtc")]
impl WebRtcDetector {
    pub fn new(aggressiveness: Aggressiveness, duration: FrameDuration, rate: SampleRate) -> Self {
        let vad = webrtc_vad::Vad::new_with_rate_and_mode(
            webrtc_rate(rate),
            webrtc_mode(aggressiveness),
        );
        Self {
            vad,
            duration,
            rate,
        }
    }
}

#[cfg(feature = "webrtc")]
impl SpeechDetector for WebRtcDetector {
    fn is_speech(&mut self, frame: &[u8], rate: SampleRate) -> Result<bool> {
        if rate != self.rate {
            return Err(Error::format(format!(
                "detector configured for {} Hz, called with {} Hz",
                self.rate.hz(),
                rate.hz()
            )));
        }
        check_frame_len(frame, rate, self.duration)?;

        let samples: Vec<i16> = frame
            .chunks_exact(BYTES_PER_SAMPLE)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect();

        self.vad
            .is_voice_segment(&samples)
            .map_err(|()| Error::msg("webrtc vad rejected the frame"))
    }
}

#[cfg(feature = "webrtc")]
fn webrtc_rate(rate: SampleRate) -> webrtc_vad::SampleRate {
    match rate {
        SampleRate::Hz8000 => webrtc_vad::SampleRate::Rate8kHz,
        SampleRate::Hz16000 => webrtc_vad::SampleRate::Rate16kHz,
        SampleRate::Hz32000 => webrtc_vad::SampleRate::Rate32kHz,
        SampleRate::Hz48000 => webrtc_vad::SampleRate::Rate48kHz,
    }
}

#[cfg(feature = "webrtc")]
fn webrtc_mode(aggressiveness: Aggressiveness) -> webrtc_vad::VadMode {
    match aggressiveness {
        Aggressiveness::Quality => webrtc_vad::VadMode::Quality,
        Aggressiveness::LowBitrate => webrtc_vad::VadMode::LowBitrate,
        Aggressiveness::Aggressive => webrtc_vad::VadMode::Aggressive,
        Aggressiveness::VeryAggressive => webrtc_vad::VadMode::VeryAggressive,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: SampleRate = SampleRate::Hz16000;
    const DURATION: FrameDuration = FrameDuration::Ms30;

    fn frame_of(sample: i16) -> Vec<u8> {
        let mut frame = Vec::with_capacity(DURATION.frame_bytes(RATE));
        for _ in 0..DURATION.frame_bytes(RATE) / BYTES_PER_SAMPLE {
            frame.extend_from_slice(&sample.to_le_bytes());
        }
        frame
    }

    #[test]
    fn silence_is_not_speech() -> anyhow::Result<()> {
        let mut det = EnergyDetector::new(Aggressiveness::default(), DURATION);
        assert!(!det.is_speech(&frame_of(0), RATE)?);
        Ok(())
    }

    #[test]
    fn loud_frames_are_speech() -> anyhow::Result<()> {
        // Constant 3000 is an RMS of ~0.09, above every mode's threshold.
        let mut det = EnergyDetector::new(Aggressiveness::VeryAggressive, DURATION);
        assert!(det.is_speech(&frame_of(3000), RATE)?);
        Ok(())
    }

    #[test]
    fn higher_aggressiveness_rejects_quieter_frames() -> anyhow::Result<()> {
        // Constant 400 is an RMS of ~0.012: speech for Quality, not for VeryAggressive.
        let quiet = frame_of(400);

        let mut lenient = EnergyDetector::new(Aggressiveness::Quality, DURATION);
        let mut strict = EnergyDetector::new(Aggressiveness::VeryAggressive, DURATION);

        assert!(lenient.is_speech(&quiet, RATE)?);
        assert!(!strict.is_speech(&quiet, RATE)?);
        Ok(())
    }

    #[test]
    fn negative_samples_carry_the_same_energy() -> anyhow::Result<()> {
        let mut det = EnergyDetector::new(Aggressiveness::VeryAggressive, DURATION);
        assert!(det.is_speech(&frame_of(-3000), RATE)?);
        Ok(())
    }

    #[test]
    fn wrong_frame_length_is_rejected() {
        let mut det = EnergyDetector::new(Aggressiveness::default(), DURATION);
        let short = vec![0u8; 100];

        let err = det.is_speech(&short, RATE).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidFrame {
                expected: 960,
                actual: 100
            }
        ));
    }

    #[test]
    fn frame_sized_for_another_rate_is_rejected() {
        // A correct 30 ms frame at 8 kHz is not a correct frame at 16 kHz.
        let mut det = EnergyDetector::new(Aggressiveness::default(), DURATION);
        let frame = vec![0u8; DURATION.frame_bytes(SampleRate::Hz8000)];

        assert!(det.is_speech(&frame, RATE).is_err());
    }

    #[test]
    fn aggressiveness_try_from_covers_the_scale() {
        assert_eq!(
            Aggressiveness::try_from(0).unwrap(),
            Aggressiveness::Quality
        );
        assert_eq!(
            Aggressiveness::try_from(3).unwrap(),
            Aggressiveness::VeryAggressive
        );
        assert!(Aggressiveness::try_from(4).is_err());
    }

    #[test]
    fn detector_enum_dispatches_to_energy() -> anyhow::Result<()> {
        let mut det = Detector::build(
            DetectorKind::Energy,
            Aggressiveness::default(),
            DURATION,
            RATE,
        );
        assert!(det.is_speech(&frame_of(3000), RATE)?);
        assert!(!det.is_speech(&frame_of(0), RATE)?);
        Ok(())
    }
}
