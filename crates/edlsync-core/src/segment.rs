//! Media segment data model.
//!
//! Segments are time-coded, semantically typed markers (intro, outro, etc.)
//! attached to a media item. Timestamps use a fixed-resolution integer tick
//! (1 tick = 100ns), the unit the upstream segment providers report in.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::ItemId;

/// Number of ticks per second (1 tick = 100ns).
pub const TICKS_PER_SECOND: i64 = 10_000_000;

/// Semantic type of a media segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaSegmentType {
    Unknown,
    Intro,
    Outro,
    Recap,
    Preview,
    Commercial,
}

impl fmt::Display for MediaSegmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Intro => write!(f, "intro"),
            Self::Outro => write!(f, "outro"),
            Self::Recap => write!(f, "recap"),
            Self::Preview => write!(f, "preview"),
            Self::Commercial => write!(f, "commercial"),
        }
    }
}

/// A time-coded marker owned by a media item.
///
/// `start_ticks <= end_ticks` is an input invariant of the upstream segment
/// source; the encoder does not check or repair it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSegment {
    /// The media item this segment belongs to.
    pub item_id: ItemId,
    /// Semantic type of the segment.
    pub segment_type: MediaSegmentType,
    /// Start position in ticks.
    pub start_ticks: i64,
    /// End position in ticks.
    pub end_ticks: i64,
}

impl MediaSegment {
    /// Create a new segment.
    pub fn new(
        item_id: ItemId,
        segment_type: MediaSegmentType,
        start_ticks: i64,
        end_ticks: i64,
    ) -> Self {
        Self {
            item_id,
            segment_type,
            start_ticks,
            end_ticks,
        }
    }
}
