use crate::Result;
use crate::segments::Segment;

/// The seam between span producers and output formats.
///
/// Encoders receive spans one at a time, in the order the producer emitted
/// them, and must be `close()`d to finalize output.
pub trait SegmentEncoder {
    fn write_segment(&mut self, seg: &Segment) -> Result<()>;
    fn close(&mut self) -> Result<()>;
}
