use std::io::Write;

use crate::segments::Segment;
use crate::segment_encoder::SegmentEncoder;
use crate::{Error, Result};

/// A `SegmentEncoder` that writes spans as a single JSON array.
///
/// Useful for handing spans between tools: the output of one run can be fed
/// back into the SRT assembler, or inspected with standard JSON tooling.
///
/// The array is opened lazily so that a run with zero spans still produces
/// valid JSON (`[]`) on close, and commas are placed between elements as they
/// stream out.
pub struct JsonArrayEncoder<W: Write> {
    w: W,
    started: bool,
    first: bool,
    closed: bool,
}

impl<W: Write> JsonArrayEncoder<W> {
    /// Create a new JSON array encoder that writes to the given writer.
    pub fn new(w: W) -> Self {
        Self {
            w,
            started: false,
            first: true,
            closed: false,
        }
    }

    fn start_if_needed(&mut self) -> Result<()> {
        if !self.started {
            self.w.write_all(b"[")?;
            self.started = true;
        }
        Ok(())
    }
}

impl<W: Write> SegmentEncoder for JsonArrayEncoder<W> {
    fn write_segment(&mut self, seg: &Segment) -> Result<()> {
        if self.closed {
            return Err(Error::msg("cannot write segment: encoder is already closed"));
        }

        self.start_if_needed()?;

        if !self.first {
            self.w.write_all(b",")?;
        }
        self.first = false;

        serde_json::to_writer(&mut self.w, seg)?;
        self.w.flush()?;

        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        // Even with no spans written we still emit a valid array.
        self.start_if_needed()?;
        self.w.write_all(b"]")?;
        self.w.flush()?;

        self.closed = true;
        Ok(())
    }
}
