use std::io::Write;

use crate::segments::Segment;
use crate::segment_encoder::SegmentEncoder;
use crate::timecode::format_timecode;
use crate::{Error, Result};

/// A `SegmentEncoder` that writes spans as SubRip (SRT) subtitle entries.
///
/// Each entry is a numbered block:
///
/// ```text
/// 1
/// 00:00:01,000 --> 00:00:02,500
/// hello
///
/// ```
///
/// Entry numbers are 1-based and assigned by position in the written
/// sequence; any identifier carried by the producer is ignored. Spans are
/// emitted exactly in the order given: no reordering, merging, or overlap
/// validation happens here. Correcting a misordered transcript would mask the
/// producer's bug, so malformed ordering passes through faithfully.
///
/// An encoder that is closed without any spans has written nothing, which is
/// a valid zero-entry document.
pub struct SrtEncoder<W: Write> {
    /// The underlying writer we stream SRT into.
    w: W,

    /// The index assigned to the next entry, starting at 1.
    next_index: u64,

    /// Whether the encoder has been closed.
    closed: bool,
}

impl<W: Write> SrtEncoder<W> {
    /// Create a new SRT encoder that writes to the provided writer.
    pub fn new(w: W) -> Self {
        Self {
            w,
            next_index: 1,
            closed: false,
        }
    }
}

impl<W: Write> SegmentEncoder for SrtEncoder<W> {
    /// Write a single numbered SRT entry.
    fn write_segment(&mut self, seg: &Segment) -> Result<()> {
        if self.closed {
            return Err(Error::msg("cannot write segment: encoder is already closed"));
        }

        let start = format_timecode(seg.start_seconds);
        let end = format_timecode(seg.end_seconds);

        writeln!(&mut self.w, "{}", self.next_index)?;
        writeln!(&mut self.w, "{start} --> {end}")?;
        writeln!(&mut self.w, "{}", seg.text)?;

        // Blank line terminates the entry.
        writeln!(&mut self.w)?;

        self.next_index += 1;

        // Flush so streaming consumers (stdout, pipes) see output promptly.
        self.w.flush()?;

        Ok(())
    }

    /// Flush the underlying writer. This is idempotent.
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        self.w.flush()?;
        self.closed = true;

        Ok(())
    }
}

/// Assemble an ordered span sequence into a complete SRT document string.
///
/// An empty sequence yields an empty string (a valid zero-entry document).
pub fn assemble(segments: &[Segment]) -> Result<String> {
    let mut out = Vec::new();

    let mut enc = SrtEncoder::new(&mut out);
    for seg in segments {
        enc.write_segment(seg)?;
    }
    enc.close()?;

    String::from_utf8(out).map_err(|err| Error::msg(err.to_string()))
}
