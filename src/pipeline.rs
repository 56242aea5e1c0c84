//! High-level per-input orchestration.
//!
//! One [`SubtitlePipeline`] wires up the stages in order: extract audio,
//! suppress non-speech, transcribe, assemble, persist. The pipeline owns its
//! collaborators (extractor and transcriber) so expensive resources are
//! loaded once and reused across inputs, while the frame classifier is cheap
//! and rebuilt per pass from configuration.
//!
//! All stages are synchronous and sequential within one pipeline; running
//! many inputs concurrently is the batch layer's job (see [`crate::batch`]).

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::extractor::AudioExtractor;
use crate::json_array_encoder::JsonArrayEncoder;
use crate::opts::Opts;
use crate::output_type::OutputType;
use crate::segment_encoder::SegmentEncoder;
use crate::segments::Segment;
use crate::srt_encoder::SrtEncoder;
use crate::transcriber::Transcriber;
use crate::vad::{Detector, VoiceActivityFilter};

/// The per-input subtitle pipeline.
///
/// Typical usage: construct once, call [`generate`](Self::generate) for each
/// input/output pair.
pub struct SubtitlePipeline<X: AudioExtractor, T: Transcriber> {
    extractor: X,
    transcriber: T,
    opts: Opts,
}

impl<X: AudioExtractor, T: Transcriber> SubtitlePipeline<X, T> {
    pub fn new(extractor: X, transcriber: T, opts: Opts) -> Self {
        Self {
            extractor,
            transcriber,
            opts,
        }
    }

    /// Run the full pipeline for one input and persist the subtitle document.
    ///
    /// Empty audio degrades to a well-formed empty document rather than a
    /// failure: an input with nothing to say still gets a valid artifact, and
    /// a batch over many inputs keeps going.
    pub fn generate(&mut self, input: &Path, output: &Path) -> Result<()> {
        let (pcm, rate) = match self.extractor.extract(input) {
            Err(Error::EmptyInput { message }) => {
                warn!(input = %input.display(), reason = %message, "empty audio; writing empty document");
                return self.write_document(output, &[]);
            }
            other => other?,
        };

        let pcm = if self.opts.enable_voice_activity_detection {
            let detector = Detector::build(
                self.opts.detector,
                self.opts.aggressiveness,
                self.opts.frame_duration,
                rate,
            );
            let mut filter = VoiceActivityFilter::new(detector, self.opts.frame_duration);
            filter.apply(&pcm, rate)?
        } else {
            pcm
        };

        let spans = self.transcriber.transcribe(&pcm, rate)?;
        if spans.is_empty() {
            debug!(input = %input.display(), "transcriber produced no spans");
        }

        self.write_document(output, &spans)
    }

    fn write_document(&self, output: &Path, spans: &[Segment]) -> Result<()> {
        let file = File::create(output)?;
        let writer = BufWriter::new(file);

        // Explicit match (no trait objects) keeps encoder lifetimes simple.
        match self.opts.output_type {
            OutputType::Srt => {
                let mut encoder = SrtEncoder::new(writer);
                write_all_spans(&mut encoder, spans)
            }
            OutputType::Json => {
                let mut encoder = JsonArrayEncoder::new(writer);
                write_all_spans(&mut encoder, spans)
            }
        }
    }
}

fn write_all_spans<E: SegmentEncoder>(encoder: &mut E, spans: &[Segment]) -> Result<()> {
    for span in spans {
        encoder.write_segment(span)?;
    }
    encoder.close()
}
