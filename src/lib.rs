//! edlsync - EDL sidecar generation and batch synchronization
//!
//! Converts time-coded media segments into Kodi/MPlayer-style EDL sidecar
//! files and keeps those files in sync with the current segment data across
//! a media collection, with bounded parallelism, progress reporting, and
//! cooperative cancellation.

pub mod batch;
pub mod encoder;
pub mod progress;
pub mod queue;
pub mod sync;

// Re-export the shared foundation so callers only need one dependency.
pub use edlsync_core::{
    EdlAction, EdlConfig, Error, ItemId, MediaSegment, MediaSegmentType, Result,
    TICKS_PER_SECOND,
};

pub use batch::{BatchCoordinator, BatchSummary, GroupOutcome, GroupStatus};
pub use encoder::encode_document;
pub use progress::ProgressSender;
pub use queue::{group_by_item, MediaLookup, SegmentGroup, SkipFilter, SyncTarget};
pub use sync::{edl_path, sync_file, SyncOutcome};
