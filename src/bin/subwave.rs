use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use subwave::batch::{self, Job};
use subwave::frame::FrameDuration;
use subwave::json_array_encoder::JsonArrayEncoder;
use subwave::logging;
use subwave::output_type::OutputType;
use subwave::segment_encoder::SegmentEncoder;
use subwave::segments::Segment;
use subwave::srt_encoder::SrtEncoder;
use subwave::vad::{Aggressiveness, Detector, DetectorKind, VoiceActivityFilter};
use subwave::wav;

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Filter {
            input,
            output,
            vad,
        } => run_filter(&input, &output, &vad),
        Command::Assemble {
            input,
            output,
            output_type,
        } => run_assemble(&input, &output, output_type),
        Command::Batch {
            input_dir,
            output_dir,
            jobs,
            vad,
        } => run_batch(&input_dir, &output_dir, jobs, &vad),
    }
}

#[derive(Parser, Debug)]
#[command(name = "subwave")]
#[command(about = "Audio segmentation and subtitle timing toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Suppress non-speech audio in a WAV file, preserving its timeline.
    Filter {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        vad: VadArgs,
    },

    /// Assemble transcript spans (a JSON array) into a subtitle document.
    Assemble {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(
            short = 't',
            long = "output-type",
            value_enum,
            default_value_t = OutputType::Srt
        )]
        output_type: OutputType,
    },

    /// Filter every WAV file in a directory, one output per input.
    Batch {
        #[arg(long)]
        input_dir: PathBuf,

        #[arg(long)]
        output_dir: PathBuf,

        /// Worker count. Defaults to one per CPU.
        #[arg(short, long)]
        jobs: Option<usize>,

        #[command(flatten)]
        vad: VadArgs,
    },
}

#[derive(clap::Args, Debug, Clone, Copy)]
struct VadArgs {
    /// Classifier aggressiveness (0 = lenient, 3 = most aggressive).
    #[arg(long, default_value_t = 3)]
    aggressiveness: u8,

    /// Frame duration in milliseconds (10, 20, or 30).
    #[arg(long = "frame-duration", default_value_t = 30)]
    frame_duration_ms: u32,

    /// Which frame classifier to run.
    #[arg(long, value_enum, default_value_t = DetectorKind::default())]
    detector: DetectorKind,
}

impl VadArgs {
    fn aggressiveness(&self) -> Result<Aggressiveness> {
        Ok(Aggressiveness::try_from(self.aggressiveness)?)
    }

    fn frame_duration(&self) -> Result<FrameDuration> {
        Ok(FrameDuration::try_from(self.frame_duration_ms)?)
    }
}

fn run_filter(input: &Path, output: &Path, vad: &VadArgs) -> Result<()> {
    filter_one(input, output, vad)
        .with_context(|| format!("failed to filter '{}'", input.display()))
}

fn filter_one(input: &Path, output: &Path, vad: &VadArgs) -> Result<()> {
    let aggressiveness = vad.aggressiveness()?;
    let duration = vad.frame_duration()?;

    let (pcm, rate) = wav::read_wav(input)?;

    let detector = Detector::build(vad.detector, aggressiveness, duration, rate);
    let mut filter = VoiceActivityFilter::new(detector, duration);
    let filtered = filter.apply(&pcm, rate)?;

    wav::write_wav(output, &filtered, rate)?;
    Ok(())
}

fn run_assemble(input: &Path, output: &Path, output_type: OutputType) -> Result<()> {
    let file = File::open(input)
        .with_context(|| format!("failed to open span file '{}'", input.display()))?;
    let spans: Vec<Segment> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse spans from '{}'", input.display()))?;

    let out = File::create(output)
        .with_context(|| format!("failed to create '{}'", output.display()))?;
    let writer = BufWriter::new(out);

    match output_type {
        OutputType::Srt => write_spans(SrtEncoder::new(writer), &spans),
        OutputType::Json => write_spans(JsonArrayEncoder::new(writer), &spans),
    }
}

fn write_spans<E: SegmentEncoder>(mut encoder: E, spans: &[Segment]) -> Result<()> {
    for span in spans {
        encoder.write_segment(span)?;
    }
    encoder.close()?;
    Ok(())
}

fn run_batch(
    input_dir: &Path,
    output_dir: &Path,
    jobs: Option<usize>,
    vad: &VadArgs,
) -> Result<()> {
    // Validate tuning up front so a bad flag fails the command, not every job.
    vad.aggressiveness()?;
    vad.frame_duration()?;

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create '{}'", output_dir.display()))?;

    let job_list = collect_wav_jobs(input_dir, output_dir)?;
    if job_list.is_empty() {
        bail!("no .wav files found in '{}'", input_dir.display());
    }

    let parallelism = jobs
        .and_then(NonZeroUsize::new)
        .unwrap_or_else(batch::default_parallelism);

    let vad = *vad;
    let summary = batch::process_all(&job_list, parallelism, || {
        move |job: &Job| {
            filter_one(&job.input, &job.output, &vad)
                .map_err(|err| subwave::Error::Message(format!("{err:#}")))
        }
    });

    println!(
        "processed {} file(s): {} succeeded, {} failed",
        job_list.len(),
        summary.succeeded,
        summary.failed
    );

    if summary.failed > 0 {
        bail!("{} file(s) failed", summary.failed);
    }
    Ok(())
}

/// Every `.wav` directly inside `input_dir`, paired with its destination.
/// Sorted so runs are deterministic regardless of directory order.
fn collect_wav_jobs(input_dir: &Path, output_dir: &Path) -> Result<Vec<Job>> {
    let mut jobs = Vec::new();

    for entry in std::fs::read_dir(input_dir)
        .with_context(|| format!("failed to read '{}'", input_dir.display()))?
    {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let is_wav = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"));
        if !is_wav {
            continue;
        }

        let Some(name) = path.file_name() else {
            continue;
        };
        jobs.push(Job {
            output: output_dir.join(name),
            input: path,
        });
    }

    jobs.sort_by(|a, b| a.input.cmp(&b.input));
    Ok(jobs)
}
