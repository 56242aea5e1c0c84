//! Subtitle timecode formatting.

/// Format a seconds offset as an SRT timecode (`HH:MM:SS,mmm`).
///
/// Rounding policy:
/// - The whole decomposition starts from the *rounded total millisecond*
///   value of the fractional input, so the millisecond field reflects the
///   fraction instead of truncating to zero, and 999.5 ms or more carries
///   cleanly into the seconds field rather than overflowing past `,999`.
///
/// Hour policy:
/// - The hour field is two digits minimum and widens beyond 99 hours instead
///   of capping. Real video durations never get there, and widening can never
///   produce a wrong timecode.
pub fn format_timecode(seconds: f64) -> String {
    let total_ms = (seconds * 1000.0).round() as u64;

    let ms = total_ms % 1000;
    let total_s = total_ms / 1000;

    let s = total_s % 60;
    let total_m = total_s / 60;

    let m = total_m % 60;
    let h = total_m / 60;

    format!("{h:02}:{m:02}:{s:02},{ms:03}")
}
