//! EDL document encoding.
//!
//! Renders an ordered list of segments belonging to one media item into the
//! plain-text EDL format: one `"<start> <end> <action> "` line per kept
//! segment. Encoding is a pure function of the segments and the config
//! snapshot; the output is byte-for-byte deterministic.

use edlsync_core::{EdlConfig, MediaSegment, TICKS_PER_SECOND};

/// Convert a tick timestamp to seconds, rounded to 2 fractional digits
/// (half away from zero).
///
/// Every entry in a document uses this one precision; mixing precisions
/// would break idempotent comparison against previously written files.
#[must_use]
pub fn ticks_to_seconds(ticks: i64) -> f64 {
    let seconds = ticks as f64 / TICKS_PER_SECOND as f64;
    (seconds * 100.0).round() / 100.0
}

/// Render one EDL line for a kept entry.
///
/// Seconds print as minimal decimals (`15`, not `15.0`) with a `.` decimal
/// point. The single trailing space before the newline is part of the wire
/// format consumed by players and must be preserved.
#[must_use]
pub fn render_entry(start_seconds: f64, end_seconds: f64, action_code: i32) -> String {
    format!("{} {} {} \n", start_seconds, end_seconds, action_code)
}

/// Encode all segments of one media item into EDL file content.
///
/// Segments whose configured action is `None` are dropped; the order of the
/// remaining segments is preserved exactly as presented (no sorting,
/// deduplication, or merging of overlapping entries). A non-empty result
/// carries no trailing newline. The empty string means "no visible markers
/// for this item".
#[must_use]
pub fn encode_document(segments: &[MediaSegment], config: &EdlConfig) -> String {
    let mut content = String::new();

    for segment in segments {
        let action = config.action_for(segment.segment_type);

        // Skip None actions
        let Some(code) = action.code() else {
            continue;
        };

        content.push_str(&render_entry(
            ticks_to_seconds(segment.start_ticks),
            ticks_to_seconds(segment.end_ticks),
            code,
        ));
    }

    // Remove the last newline so the file ends without a blank line.
    if content.ends_with('\n') {
        content.pop();
    }

    content
}
