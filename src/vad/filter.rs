use tracing::debug;

use crate::error::Result;
use crate::frame::{FrameDuration, SampleRate, frames};
use crate::vad::detector::SpeechDetector;

/// Voice activity filter: suppresses non-speech audio while preserving the
/// timeline exactly.
///
/// Each frame is classified by the configured detector. Speech frames pass
/// through byte-for-byte; non-speech frames are replaced by an all-zero frame
/// of identical length. Because every classified frame keeps its sample
/// count, timestamps produced downstream remain valid against the *original*
/// audio timeline. That alignment is the whole point of substituting
/// silence instead of cutting.
///
/// Length invariant: `output.len() <= input.len()`, and the difference is the
/// dropped partial tail, strictly less than one frame's byte length.
pub struct VoiceActivityFilter<D: SpeechDetector> {
    detector: D,
    duration: FrameDuration,
}

impl<D: SpeechDetector> VoiceActivityFilter<D> {
    /// Create a filter around a detector. The frame duration must match the
    /// one the detector was configured with; a mismatch surfaces as an
    /// invalid-frame error on the first classified frame.
    pub fn new(detector: D, duration: FrameDuration) -> Self {
        Self { detector, duration }
    }

    /// Produce the filtered copy of `pcm`.
    pub fn apply(&mut self, pcm: &[u8], rate: SampleRate) -> Result<Vec<u8>> {
        let frame_bytes = self.duration.frame_bytes(rate);

        let mut out = Vec::with_capacity(pcm.len() - (pcm.len() % frame_bytes));
        let mut total_frames = 0usize;
        let mut speech_frames = 0usize;

        for frame in frames(pcm, rate, self.duration) {
            total_frames += 1;
            if self.detector.is_speech(frame, rate)? {
                speech_frames += 1;
                out.extend_from_slice(frame);
            } else {
                out.resize(out.len() + frame_bytes, 0);
            }
        }

        debug!(
            input_bytes = pcm.len(),
            output_bytes = out.len(),
            total_frames,
            speech_frames,
            "voice activity filter pass"
        );

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::frame::BYTES_PER_SAMPLE;
    use crate::vad::detector::{Aggressiveness, EnergyDetector};

    const RATE: SampleRate = SampleRate::Hz16000;
    const DURATION: FrameDuration = FrameDuration::Ms30;
    const FRAME_BYTES: usize = DURATION.frame_bytes(RATE);

    /// Detector with a fixed answer, for exercising the filter alone.
    struct FixedDetector(bool);

    impl SpeechDetector for FixedDetector {
        fn is_speech(&mut self, frame: &[u8], rate: SampleRate) -> Result<bool> {
            let expected = DURATION.frame_bytes(rate);
            if frame.len() != expected {
                return Err(Error::InvalidFrame {
                    expected,
                    actual: frame.len(),
                });
            }
            Ok(self.0)
        }
    }

    fn pcm_of_samples(samples: &[i16]) -> Vec<u8> {
        let mut pcm = Vec::with_capacity(samples.len() * BYTES_PER_SAMPLE);
        for s in samples {
            pcm.extend_from_slice(&s.to_le_bytes());
        }
        pcm
    }

    #[test]
    fn all_speech_detector_reproduces_input_minus_tail() -> anyhow::Result<()> {
        let mut pcm = pcm_of_samples(&vec![1234i16; FRAME_BYTES / BYTES_PER_SAMPLE * 4]);
        // Partial tail that must be dropped.
        pcm.extend_from_slice(&[9, 9, 9, 9]);

        let mut filter = VoiceActivityFilter::new(FixedDetector(true), DURATION);
        let out = filter.apply(&pcm, RATE)?;

        assert_eq!(out, pcm[..FRAME_BYTES * 4].to_vec());
        Ok(())
    }

    #[test]
    fn all_non_speech_detector_zeroes_every_frame() -> anyhow::Result<()> {
        let pcm = pcm_of_samples(&vec![1234i16; FRAME_BYTES / BYTES_PER_SAMPLE * 3]);

        let mut filter = VoiceActivityFilter::new(FixedDetector(false), DURATION);
        let out = filter.apply(&pcm, RATE)?;

        assert_eq!(out.len(), pcm.len());
        assert!(out.iter().all(|&b| b == 0));
        Ok(())
    }

    #[test]
    fn output_never_exceeds_input_and_difference_is_sub_frame() -> anyhow::Result<()> {
        for extra in [0usize, 1, FRAME_BYTES / 2, FRAME_BYTES - 1] {
            let pcm = vec![5u8; FRAME_BYTES * 2 + extra];

            let mut filter = VoiceActivityFilter::new(FixedDetector(true), DURATION);
            let out = filter.apply(&pcm, RATE)?;

            assert!(out.len() <= pcm.len());
            assert!(pcm.len() - out.len() < FRAME_BYTES);
            assert_eq!(out.len() % FRAME_BYTES, 0);
        }
        Ok(())
    }

    #[test]
    fn empty_input_filters_to_empty_output() -> anyhow::Result<()> {
        let mut filter = VoiceActivityFilter::new(FixedDetector(true), DURATION);
        assert!(filter.apply(&[], RATE)?.is_empty());
        Ok(())
    }

    #[test]
    fn filtering_is_idempotent_with_the_energy_detector() -> anyhow::Result<()> {
        // Two loud frames, two quiet frames, one partial tail.
        let samples_per_frame = FRAME_BYTES / BYTES_PER_SAMPLE;
        let mut samples = vec![3000i16; samples_per_frame * 2];
        samples.extend(vec![10i16; samples_per_frame * 2]);
        samples.extend(vec![3000i16; samples_per_frame / 3]);
        let pcm = pcm_of_samples(&samples);

        let detector = |aggr| EnergyDetector::new(aggr, DURATION);

        let mut filter = VoiceActivityFilter::new(detector(Aggressiveness::VeryAggressive), DURATION);
        let once = filter.apply(&pcm, RATE)?;

        let mut filter = VoiceActivityFilter::new(detector(Aggressiveness::VeryAggressive), DURATION);
        let twice = filter.apply(&once, RATE)?;

        assert_eq!(once, twice);
        Ok(())
    }

    #[test]
    fn detector_errors_propagate() {
        struct FailingDetector;
        impl SpeechDetector for FailingDetector {
            fn is_speech(&mut self, _frame: &[u8], _rate: SampleRate) -> Result<bool> {
                Err(Error::msg("classifier exploded"))
            }
        }

        let pcm = vec![0u8; FRAME_BYTES];
        let mut filter = VoiceActivityFilter::new(FailingDetector, DURATION);
        assert!(filter.apply(&pcm, RATE).is_err());
    }
}
