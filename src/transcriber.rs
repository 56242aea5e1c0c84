use crate::error::Result;
use crate::frame::SampleRate;
use crate::segments::Segment;

/// Turns a PCM buffer into ordered transcript spans.
///
/// The speech-to-text model behind this trait is a collaborator, not part of
/// the core: implementations wrap whatever engine the deployment uses. The
/// core assumes the returned spans are ordered by start time with
/// non-negative timestamps and does not re-sort or validate them;
/// correcting them here would mask transcriber bugs downstream.
///
/// Implementations may be expensive to construct (model loading) and are not
/// required to be `Send`; concurrent pipelines hold one instance per worker.
pub trait Transcriber {
    fn transcribe(&mut self, pcm: &[u8], rate: SampleRate) -> Result<Vec<Segment>>;
}
