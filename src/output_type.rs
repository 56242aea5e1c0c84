/// The supported output formats for encoded transcript spans.
///
/// Each variant maps to a concrete `SegmentEncoder` implementation; keeping
/// format selection as an enum keeps it explicit and discoverable across the
/// CLI and library code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputType {
    /// SubRip subtitle entries (`HH:MM:SS,mmm --> HH:MM:SS,mmm`).
    #[default]
    Srt,

    /// A JSON array of spans.
    Json,
}
