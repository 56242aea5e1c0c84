//! Fixed-duration framing of PCM audio.
//!
//! Frame-level classifiers only accept frames of an exact size, so everything
//! here is derived from two small enums: the sample rate and the frame
//! duration. The framer itself is a thin wrapper around `chunks_exact`, which
//! gives us the boundary rule we need for free: the trailing remainder that is
//! shorter than a full frame is dropped, never padded.

use crate::error::{Error, Result};

/// Bytes per sample for mono 16-bit PCM.
pub const BYTES_PER_SAMPLE: usize = 2;

/// The sample rates supported by the frame classifier contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleRate {
    Hz8000,
    Hz16000,
    Hz32000,
    Hz48000,
}

impl SampleRate {
    /// The rate in Hertz.
    pub const fn hz(self) -> u32 {
        match self {
            SampleRate::Hz8000 => 8_000,
            SampleRate::Hz16000 => 16_000,
            SampleRate::Hz32000 => 32_000,
            SampleRate::Hz48000 => 48_000,
        }
    }
}

impl TryFrom<u32> for SampleRate {
    type Error = Error;

    fn try_from(hz: u32) -> Result<Self> {
        match hz {
            8_000 => Ok(SampleRate::Hz8000),
            16_000 => Ok(SampleRate::Hz16000),
            32_000 => Ok(SampleRate::Hz32000),
            48_000 => Ok(SampleRate::Hz48000),
            other => Err(Error::format(format!(
                "unsupported sample rate: {other} Hz (expected 8000, 16000, 32000, or 48000)"
            ))),
        }
    }
}

/// Frame durations accepted by frame-level classifiers.
///
/// At 16 kHz:
/// - 10 ms = 160 samples
/// - 20 ms = 320 samples
/// - 30 ms = 480 samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FrameDuration {
    Ms10,
    Ms20,
    #[default]
    Ms30,
}

impl FrameDuration {
    /// The duration in milliseconds.
    pub const fn millis(self) -> u32 {
        match self {
            FrameDuration::Ms10 => 10,
            FrameDuration::Ms20 => 20,
            FrameDuration::Ms30 => 30,
        }
    }

    /// The exact byte length of one frame at the given sample rate.
    ///
    /// `rate * duration / 1000` samples, two bytes each. All supported
    /// rate/duration combinations divide evenly, so this is exact.
    pub const fn frame_bytes(self, rate: SampleRate) -> usize {
        (rate.hz() as usize * self.millis() as usize / 1000) * BYTES_PER_SAMPLE
    }
}

impl TryFrom<u32> for FrameDuration {
    type Error = Error;

    fn try_from(ms: u32) -> Result<Self> {
        match ms {
            10 => Ok(FrameDuration::Ms10),
            20 => Ok(FrameDuration::Ms20),
            30 => Ok(FrameDuration::Ms30),
            other => Err(Error::format(format!(
                "unsupported frame duration: {other} ms (expected 10, 20, or 30)"
            ))),
        }
    }
}

/// Slice a PCM byte buffer into exact, non-overlapping frames.
///
/// The returned iterator is lazy, finite, and restartable (call again on the
/// same buffer to iterate again).
///
/// Boundary rule: a trailing partial frame is *excluded* from the sequence.
/// It is never classified and never reaches the output, which truncates the
/// audio tail by up to `duration - 1` ms. This drop is a contract (it keeps
/// the filtered output length deterministic), not an oversight to patch.
pub fn frames(
    pcm: &[u8],
    rate: SampleRate,
    duration: FrameDuration,
) -> impl Iterator<Item = &[u8]> {
    pcm.chunks_exact(duration.frame_bytes(rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_RATES: [SampleRate; 4] = [
        SampleRate::Hz8000,
        SampleRate::Hz16000,
        SampleRate::Hz32000,
        SampleRate::Hz48000,
    ];

    const ALL_DURATIONS: [FrameDuration; 3] =
        [FrameDuration::Ms10, FrameDuration::Ms20, FrameDuration::Ms30];

    #[test]
    fn frame_bytes_matches_rate_times_duration() {
        for rate in ALL_RATES {
            for duration in ALL_DURATIONS {
                let expected =
                    (rate.hz() as usize * duration.millis() as usize / 1000) * BYTES_PER_SAMPLE;
                assert_eq!(duration.frame_bytes(rate), expected);
            }
        }

        // Spot-check the default: 30 ms at 16 kHz is 480 samples, 960 bytes.
        assert_eq!(FrameDuration::Ms30.frame_bytes(SampleRate::Hz16000), 960);
    }

    #[test]
    fn frames_are_exact_and_sum_to_input_minus_remainder() {
        for rate in ALL_RATES {
            for duration in ALL_DURATIONS {
                let frame_bytes = duration.frame_bytes(rate);
                // Five full frames plus a partial tail.
                let pcm = vec![7u8; frame_bytes * 5 + frame_bytes / 2];

                let mut total = 0usize;
                for frame in frames(&pcm, rate, duration) {
                    assert_eq!(frame.len(), frame_bytes);
                    total += frame.len();
                }

                assert_eq!(total, pcm.len() - (pcm.len() % frame_bytes));
            }
        }
    }

    #[test]
    fn partial_tail_is_dropped_not_padded() {
        let frame_bytes = FrameDuration::Ms30.frame_bytes(SampleRate::Hz16000);
        let pcm = vec![0u8; frame_bytes * 3 + 2];

        let count = frames(&pcm, SampleRate::Hz16000, FrameDuration::Ms30).count();
        assert_eq!(count, 3);
    }

    #[test]
    fn buffer_shorter_than_one_frame_yields_nothing() {
        let frame_bytes = FrameDuration::Ms30.frame_bytes(SampleRate::Hz16000);
        let pcm = vec![0u8; frame_bytes - 2];

        assert_eq!(
            frames(&pcm, SampleRate::Hz16000, FrameDuration::Ms30).count(),
            0
        );
    }

    #[test]
    fn framer_is_restartable() {
        let frame_bytes = FrameDuration::Ms10.frame_bytes(SampleRate::Hz8000);
        let pcm = vec![1u8; frame_bytes * 4];

        let first: Vec<&[u8]> = frames(&pcm, SampleRate::Hz8000, FrameDuration::Ms10).collect();
        let second: Vec<&[u8]> = frames(&pcm, SampleRate::Hz8000, FrameDuration::Ms10).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn sample_rate_try_from_rejects_unsupported_rates() {
        assert!(SampleRate::try_from(16_000).is_ok());
        assert!(SampleRate::try_from(44_100).is_err());
        assert!(SampleRate::try_from(0).is_err());
    }

    #[test]
    fn frame_duration_try_from_rejects_unsupported_durations() {
        assert!(FrameDuration::try_from(30).is_ok());
        assert!(FrameDuration::try_from(25).is_err());
    }
}
