use std::path::Path;

use crate::error::Result;
use crate::frame::SampleRate;
use crate::wav::read_wav;

/// Recovers the PCM audio for one input.
///
/// Demuxing a video container and decoding its audio track are collaborator
/// responsibilities, not this crate's: implementations wrap whatever decoder
/// fits the deployment (ffmpeg invocation, a decoding library, a remote
/// service) and hand the core a mono 16-bit PCM buffer plus its sample rate.
/// An input with no usable audio stream is a precondition failure to surface
/// here, before the core runs.
pub trait AudioExtractor {
    fn extract(&mut self, input: &Path) -> Result<(Vec<u8>, SampleRate)>;
}

/// Extractor for inputs whose audio track has already been recovered into a
/// WAV file.
#[derive(Debug, Clone, Copy, Default)]
pub struct WavFileExtractor;

impl AudioExtractor for WavFileExtractor {
    fn extract(&mut self, input: &Path) -> Result<(Vec<u8>, SampleRate)> {
        read_wav(input)
    }
}
