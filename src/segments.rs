use serde::{Deserialize, Serialize};

/// One transcript span: a time range on the original audio timeline and the
/// text spoken within it.
///
/// Spans are produced by a transcriber ordered by start time. Timestamps are
/// `f64` seconds; `f32` resolution above roughly an hour of audio is coarser
/// than one millisecond, which would corrupt subtitle timecodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start_seconds: f64,
    pub end_seconds: f64,
    pub text: String,
}
