//! WAV container reading and writing.
//!
//! The codec normalizes everything to the shape the rest of the crate
//! expects: mono, 16-bit little-endian PCM bytes at one of the supported
//! sample rates. Enforcing the constraints here keeps the framing and
//! filtering code simple and predictable.

use std::fs::File;
use std::io::{BufWriter, Read};
use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use tracing::info;

use crate::error::{Error, Result};
use crate::frame::{BYTES_PER_SAMPLE, SampleRate};

/// Read a WAV file into mono 16-bit PCM bytes plus its sample rate.
///
/// Fails with a format error when the sample width is not 16-bit integer PCM
/// or the sample rate is outside the supported set. Multi-channel input is
/// downmixed to mono by equal-weight averaging (logged). Zero-sample input is
/// an [`Error::EmptyInput`] so callers can degrade to an empty output instead
/// of crashing.
///
/// The returned buffer length is always an exact multiple of 2.
pub fn read_wav(path: &Path) -> Result<(Vec<u8>, SampleRate)> {
    let file = File::open(path)?;
    read_wav_from(file)
}

/// Reader-generic variant of [`read_wav`].
pub fn read_wav_from<R: Read>(reader: R) -> Result<(Vec<u8>, SampleRate)> {
    let mut reader = WavReader::new(reader)?;
    let spec = reader.spec();

    if spec.bits_per_sample != 16 || spec.sample_format != SampleFormat::Int {
        return Err(Error::format(format!(
            "expected 16-bit integer PCM, got {}-bit {:?}",
            spec.bits_per_sample, spec.sample_format
        )));
    }

    let rate = SampleRate::try_from(spec.sample_rate)?;

    let channels = spec.channels as usize;
    if channels == 0 {
        return Err(Error::format("audio stream reports zero channels"));
    }

    let raw: Vec<i16> = reader
        .samples::<i16>()
        .collect::<std::result::Result<_, hound::Error>>()?;

    let mono = if channels > 1 {
        info!(channels, "downmixing multi-channel audio to mono");
        downmix_to_mono(&raw, channels)
    } else {
        raw
    };

    if mono.is_empty() {
        return Err(Error::empty("audio stream contains no samples"));
    }

    let mut pcm = Vec::with_capacity(mono.len() * BYTES_PER_SAMPLE);
    for sample in mono {
        pcm.extend_from_slice(&sample.to_le_bytes());
    }

    Ok((pcm, rate))
}

/// Write mono 16-bit PCM bytes as a WAV file.
///
/// The file is written to a temporary sibling and atomically persisted into
/// place, so a failure mid-write never leaves a partial container behind.
pub fn write_wav(path: &Path, pcm: &[u8], rate: SampleRate) -> Result<()> {
    if pcm.len() % BYTES_PER_SAMPLE != 0 {
        return Err(Error::format(format!(
            "PCM buffer length {} is not a whole number of 16-bit samples",
            pcm.len()
        )));
    }

    let spec = WavSpec {
        channels: 1,
        sample_rate: rate.hz(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    // The temp file must live in the destination directory so the final
    // rename stays on one filesystem.
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::Builder::new()
        .prefix(".subwave-wav-")
        .tempfile_in(dir)?;

    {
        let mut writer = WavWriter::new(BufWriter::new(tmp.as_file_mut()), spec)?;
        for pair in pcm.chunks_exact(BYTES_PER_SAMPLE) {
            writer.write_sample(i16::from_le_bytes([pair[0], pair[1]]))?;
        }
        writer.finalize()?;
    }

    tmp.persist(path).map_err(|err| Error::Io(err.error))?;
    Ok(())
}

/// Downmix interleaved samples into mono by equal-weight averaging.
fn downmix_to_mono(interleaved: &[i16], channels: usize) -> Vec<i16> {
    interleaved
        .chunks_exact(channels)
        .map(|group| {
            let sum: i32 = group.iter().map(|&s| s as i32).sum();
            (sum / channels as i32) as i16
        })
        .collect()
}
